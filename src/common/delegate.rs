use std::{
    fmt,
    sync::{Arc, PoisonError, RwLock},
};

/// Identifies one binding on a [`MulticastDelegate`] so it can be removed later
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct DelegateHandle(u64);

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Bindings<T> {
    next: u64,
    callbacks: Vec<(DelegateHandle, Callback<T>)>,
}

/// One-to-many notification list
///
/// - Callbacks fire in registration order
/// - The binding list is snapshotted before dispatch, so callbacks added or removed
///   while a broadcast is running only take part from the next broadcast
/// - Clones share the same binding list, which lets a relay capture a channel by value
pub struct MulticastDelegate<T> {
    bindings: Arc<RwLock<Bindings<T>>>,
}

impl<T> MulticastDelegate<T> {
    pub fn new() -> Self {
        Self {
            bindings: Arc::new(RwLock::new(Bindings { next: 0, callbacks: Vec::new() })),
        }
    }

    pub fn add(&self, callback: impl Fn(&T) + Send + Sync + 'static) -> DelegateHandle {
        let mut bindings = self.bindings.write().unwrap_or_else(PoisonError::into_inner);
        let handle = DelegateHandle(bindings.next);
        bindings.next += 1;
        bindings.callbacks.push((handle, Arc::new(callback)));
        handle
    }

    /// Returns false if the handle was not bound to this delegate
    pub fn remove(&self, handle: DelegateHandle) -> bool {
        let mut bindings = self.bindings.write().unwrap_or_else(PoisonError::into_inner);
        let before = bindings.callbacks.len();
        bindings.callbacks.retain(|(h, _)| *h != handle);
        bindings.callbacks.len() != before
    }

    pub fn clear(&self) {
        self.bindings.write().unwrap_or_else(PoisonError::into_inner).callbacks.clear();
    }

    pub fn len(&self) -> usize {
        self.bindings.read().unwrap_or_else(PoisonError::into_inner).callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn broadcast(&self, value: &T) {
        let snapshot: Vec<Callback<T>> = {
            let bindings = self.bindings.read().unwrap_or_else(PoisonError::into_inner);
            bindings.callbacks.iter().map(|(_, cb)| cb.clone()).collect()
        };
        for callback in snapshot {
            callback(value);
        }
    }
}

impl<T> Clone for MulticastDelegate<T> {
    fn clone(&self) -> Self {
        Self { bindings: self.bindings.clone() }
    }
}

impl<T> Default for MulticastDelegate<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for MulticastDelegate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MulticastDelegate").field("bindings", &self.len()).finish()
    }
}
