//! Attribute state sync
//!
//! Each replicated attribute is declared once in [`ATTRIBUTE_REPLICATION`] with the
//! condition under which it is sent and when the receiver fires its change notification.
//! The authority drains dirty attributes into an [`AttributeUpdate`], which is what
//! goes on the wire; the receiver applies it through [`apply`].

use bincode::error::{DecodeError, EncodeError};
use serde::{Deserialize, Serialize};
use tinyvec::ArrayVec;

use crate::common::components::{ability_system::AbilitySystem, attributes::Attribute};

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ReplicationCondition {
    /// Sent to every connection
    None,
    /// Sent only to the owning connection
    OwnerOnly,
    /// Sent to everyone except the owning connection
    SkipOwner,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum RepNotify {
    /// Notify only when the received value differs from the local one
    OnChanged,
    /// Notify on every received value
    Always,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ReplicatedField {
    pub attribute: Attribute,
    pub condition: ReplicationCondition,
    pub notify: RepNotify,
}

pub const ATTRIBUTE_REPLICATION: [ReplicatedField; 4] = [
    ReplicatedField { attribute: Attribute::Health, condition: ReplicationCondition::None, notify: RepNotify::Always },
    ReplicatedField { attribute: Attribute::MaxHealth, condition: ReplicationCondition::None, notify: RepNotify::Always },
    ReplicatedField { attribute: Attribute::Mana, condition: ReplicationCondition::None, notify: RepNotify::Always },
    ReplicatedField { attribute: Attribute::MaxMana, condition: ReplicationCondition::None, notify: RepNotify::Always },
];

pub fn replicated_field(attribute: Attribute) -> &'static ReplicatedField {
    &ATTRIBUTE_REPLICATION[attribute.index()]
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct AttributeDelta {
    pub attribute: Attribute,
    pub value: f32,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct AttributeUpdate {
    pub deltas: ArrayVec<[AttributeDelta; 4]>,
}

impl AttributeUpdate {
    pub fn is_empty(&self) -> bool {
        self.deltas.is_empty()
    }
}

/// Drain dirty attributes into an update for one receiver.
/// Dirty flags are cleared even for attributes the receiver's condition filters out.
pub fn collect(asc: &mut AbilitySystem, to_owner: bool) -> AttributeUpdate {
    let mut update = AttributeUpdate::default();
    for attribute in asc.take_dirty() {
        let send = match replicated_field(attribute).condition {
            ReplicationCondition::None => true,
            ReplicationCondition::OwnerOnly => to_owner,
            ReplicationCondition::SkipOwner => !to_owner,
        };
        if send {
            update.deltas.push(AttributeDelta {
                attribute,
                value: asc.attribute_set().get(attribute),
            });
        }
    }
    update
}

pub fn apply(asc: &mut AbilitySystem, update: &AttributeUpdate) {
    for delta in update.deltas.iter() {
        asc.on_rep_attribute(delta.attribute, delta.value, replicated_field(delta.attribute).notify);
    }
}

pub fn encode(update: &AttributeUpdate) -> Result<Vec<u8>, EncodeError> {
    bincode::serde::encode_to_vec(update, bincode::config::standard())
}

pub fn decode(bytes: &[u8]) -> Result<AttributeUpdate, DecodeError> {
    bincode::serde::decode_from_slice(bytes, bincode::config::standard()).map(|(update, _)| update)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::components::ability_system::AttributeSource;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_table_covers_every_attribute_in_order() {
        for attribute in Attribute::ALL {
            assert_eq!(replicated_field(attribute).attribute, attribute);
            assert_eq!(replicated_field(attribute).notify, RepNotify::Always);
        }
    }

    #[test]
    fn test_collect_takes_only_dirty_attributes() {
        let mut asc = AbilitySystem::default();
        asc.set_numeric_attribute_base(Attribute::Mana, 20.);

        let update = collect(&mut asc, true);
        assert_eq!(update.deltas.len(), 1);
        assert_eq!(update.deltas[0], AttributeDelta { attribute: Attribute::Mana, value: 20. });

        assert!(collect(&mut asc, true).is_empty(), "dirty flags were drained");
    }

    #[test]
    fn test_update_survives_the_wire() {
        let mut asc = AbilitySystem::default();
        asc.set_numeric_attribute_base(Attribute::Health, 75.);
        asc.set_numeric_attribute_base(Attribute::MaxMana, 60.);
        let update = collect(&mut asc, true);

        let bytes = encode(&update).unwrap();
        assert_eq!(decode(&bytes).unwrap(), update);
    }

    #[test]
    fn test_decode_rejects_truncated_payload() {
        let mut asc = AbilitySystem::default();
        asc.set_numeric_attribute_base(Attribute::Health, 75.);
        let bytes = encode(&collect(&mut asc, true)).unwrap();
        assert!(decode(&bytes[..bytes.len() - 1]).is_err());
    }

    #[test]
    fn test_apply_notifies_even_when_value_unchanged() {
        let mut authority = AbilitySystem::default();
        authority.set_numeric_attribute_base(Attribute::Health, 50.);
        let update = collect(&mut authority, true);

        let mut replica = AbilitySystem::default();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        replica
            .attribute_value_change_delegate(Attribute::Health)
            .add(move |change| sink.lock().unwrap().push((change.old_value, change.new_value)));

        apply(&mut replica, &update);

        assert_eq!(*seen.lock().unwrap(), vec![(50., 50.)]);
        assert_eq!(replica.attribute_value(Attribute::Health), 50.);
    }
}
