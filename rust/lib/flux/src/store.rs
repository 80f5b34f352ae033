use std::any::Any;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use crate::pattern;
use crate::value::{StateValue, SubscriptionId};

/// Callback type for state change notifications.
pub type ChangeHandler = Arc<dyn Fn(&str, &StateValue) + Send + Sync>;

/// Per-path state store with pattern-matched change notifications.
///
/// - `set(path, value)` stores a value and notifies matching subscribers.
/// - `get(path)` reads the current value (Arc clone).
/// - `subscribe(pattern, handler)` / `unsubscribe(id)` manage observers.
///
/// Subscribers run synchronously on the thread that called `set`, after the
/// value lock is released, so a handler may read the store.
pub struct StateStore {
    values: RwLock<BTreeMap<String, StateValue>>,
    subscribers: RwLock<Vec<Subscriber>>,
    next_id: AtomicU64,
}

#[derive(Clone)]
struct Subscriber {
    id: SubscriptionId,
    pattern: String,
    handler: ChangeHandler,
}

impl StateStore {
    pub fn new() -> Self {
        Self {
            values: RwLock::new(BTreeMap::new()),
            subscribers: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Set a typed value at the given path and notify matching subscribers.
    pub fn set<T: Any + Send + Sync>(&self, path: &str, value: T) {
        self.set_value(path, StateValue::new(value));
    }

    /// Set a pre-built `StateValue` and notify matching subscribers.
    pub fn set_value(&self, path: &str, value: StateValue) {
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.to_string(), value.clone());

        let matched: Vec<ChangeHandler> = self
            .subscribers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|s| pattern::matches(&s.pattern, path))
            .map(|s| Arc::clone(&s.handler))
            .collect();
        for handler in matched {
            handler(path, &value);
        }
    }

    pub fn get(&self, path: &str) -> Option<StateValue> {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path)
            .cloned()
    }

    /// Read and clone a typed value. `None` if absent or of another type.
    pub fn get_as<T: Any + Clone>(&self, path: &str) -> Option<T> {
        self.get(path).and_then(|v| v.cloned::<T>())
    }

    /// Read-modify-write a typed value, starting from `init` when the path
    /// is empty or holds another type. Notifies subscribers.
    pub fn update<T, I, F>(&self, path: &str, init: I, f: F)
    where
        T: Any + Clone + Send + Sync,
        I: FnOnce() -> T,
        F: FnOnce(&mut T),
    {
        let mut state = self.get_as::<T>(path).unwrap_or_else(init);
        f(&mut state);
        self.set(path, state);
    }

    pub fn contains(&self, path: &str) -> bool {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Subscribe to changes on paths matching `pattern`.
    pub fn subscribe<F>(&self, pattern: &str, handler: F) -> SubscriptionId
    where
        F: Fn(&str, &StateValue) + Send + Sync + 'static,
    {
        debug_assert!(pattern::is_valid(pattern), "invalid pattern {pattern:?}");
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Subscriber {
                id,
                pattern: pattern.to_string(),
                handler: Arc::new(handler),
            });
        id
    }

    /// Remove a subscription. Returns `true` if it existed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self
            .subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let before = subscribers.len();
        subscribers.retain(|s| s.id != id);
        subscribers.len() < before
    }

    /// Snapshot of all entries, ordered by path.
    pub fn snapshot(&self) -> Vec<(String, StateValue)> {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}
