use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use super::Identity;

/// Callback invoked with the provider's current identity on every change.
pub type SessionObserver = Arc<dyn Fn(Option<&Identity>) + Send + Sync>;

/// Handle returned by `AuthProvider::observe_session`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

#[derive(Default)]
struct Cell {
    current: Option<Identity>,
    /// `current` changed since observers were last called.
    dirty: bool,
    delivering: bool,
}

/// Current-identity cell plus its observer list.
///
/// Provider implementations embed one of these. A new observer is called
/// immediately with the current value, then once per change.
pub struct SessionBroadcast {
    cell: Mutex<Cell>,
    observers: RwLock<Vec<(ObserverId, SessionObserver)>>,
    next_id: AtomicU64,
}

impl SessionBroadcast {
    pub fn new() -> Self {
        Self {
            cell: Mutex::new(Cell::default()),
            observers: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn current(&self) -> Option<Identity> {
        self.cell
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .current
            .clone()
    }

    /// Replace the current identity and notify every observer.
    ///
    /// One caller at a time delivers. A `set` that lands while another is
    /// delivering, including one made from inside an observer, is picked up
    /// by that delivery loop, so observers always end on the latest value.
    pub fn set(&self, identity: Option<Identity>) {
        {
            let mut cell = self.lock_cell();
            cell.current = identity;
            cell.dirty = true;
            if cell.delivering {
                return;
            }
            cell.delivering = true;
        }
        loop {
            let value = {
                let mut cell = self.lock_cell();
                if !cell.dirty {
                    cell.delivering = false;
                    return;
                }
                cell.dirty = false;
                cell.current.clone()
            };
            for observer in self.snapshot() {
                observer(value.as_ref());
            }
        }
    }

    fn lock_cell(&self) -> MutexGuard<'_, Cell> {
        self.cell.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn observe(&self, observer: SessionObserver) -> ObserverId {
        let id = ObserverId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.observers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Arc::clone(&observer)));
        observer(self.current().as_ref());
        id
    }

    pub fn unobserve(&self, id: ObserverId) -> bool {
        let mut observers = self.observers.write().unwrap_or_else(PoisonError::into_inner);
        let before = observers.len();
        observers.retain(|(oid, _)| *oid != id);
        observers.len() < before
    }

    pub fn observer_count(&self) -> usize {
        self.observers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn snapshot(&self) -> Vec<SessionObserver> {
        self.observers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, o)| Arc::clone(o))
            .collect()
    }
}

impl Default for SessionBroadcast {
    fn default() -> Self {
        Self::new()
    }
}
