use serde::{Deserialize, Serialize};

/// The attributes tracked by every ability system
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Attribute {
    #[default]
    Health,
    MaxHealth,
    Mana,
    MaxMana,
}

impl Attribute {
    /// Fixed order: current resource, maximum resource, current secondary, maximum secondary
    pub const ALL: [Attribute; 4] = [
        Attribute::Health,
        Attribute::MaxHealth,
        Attribute::Mana,
        Attribute::MaxMana,
    ];

    pub fn index(self) -> usize {
        match self {
            Attribute::Health => 0,
            Attribute::MaxHealth => 1,
            Attribute::Mana => 2,
            Attribute::MaxMana => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Attribute::Health => "Health",
            Attribute::MaxHealth => "MaxHealth",
            Attribute::Mana => "Mana",
            Attribute::MaxMana => "MaxMana",
        }
    }

    /// The maximum that bounds this attribute, if it is a current value
    pub fn maximum(self) -> Option<Attribute> {
        match self {
            Attribute::Health => Some(Attribute::MaxHealth),
            Attribute::Mana => Some(Attribute::MaxMana),
            Attribute::MaxHealth | Attribute::MaxMana => None,
        }
    }

    /// The current value bounded by this attribute, if it is a maximum
    pub fn bounded(self) -> Option<Attribute> {
        match self {
            Attribute::MaxHealth => Some(Attribute::Health),
            Attribute::MaxMana => Some(Attribute::Mana),
            Attribute::Health | Attribute::Mana => None,
        }
    }
}

/// Base value plus the current value after temporary modifiers
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct AttributeData {
    pub base: f32,
    pub current: f32,
}

impl AttributeData {
    pub fn new(value: f32) -> Self {
        Self { base: value, current: value }
    }
}

/// Numeric gameplay values owned by an ability system
/// - health/mana are kept within [0, max]
/// - maxima are never negative
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct AttributeSet {
    pub health: AttributeData,
    pub max_health: AttributeData,
    pub mana: AttributeData,
    pub max_mana: AttributeData,
}

impl Default for AttributeSet {
    fn default() -> Self {
        Self {
            health: AttributeData::new(50.),
            max_health: AttributeData::new(100.),
            mana: AttributeData::new(50.),
            max_mana: AttributeData::new(50.),
        }
    }
}

impl AttributeSet {
    pub fn data(&self, attribute: Attribute) -> &AttributeData {
        match attribute {
            Attribute::Health => &self.health,
            Attribute::MaxHealth => &self.max_health,
            Attribute::Mana => &self.mana,
            Attribute::MaxMana => &self.max_mana,
        }
    }

    pub fn data_mut(&mut self, attribute: Attribute) -> &mut AttributeData {
        match attribute {
            Attribute::Health => &mut self.health,
            Attribute::MaxHealth => &mut self.max_health,
            Attribute::Mana => &mut self.mana,
            Attribute::MaxMana => &mut self.max_mana,
        }
    }

    pub fn get(&self, attribute: Attribute) -> f32 {
        self.data(attribute).current
    }

    /// Clamp a proposed value into the attribute's legal range before it is written
    pub fn pre_attribute_change(&self, attribute: Attribute, value: f32) -> f32 {
        match attribute.maximum() {
            Some(max) => value.clamp(0., self.get(max).max(0.)),
            None => value.max(0.),
        }
    }
}
