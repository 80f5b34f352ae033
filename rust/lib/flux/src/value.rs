use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

/// A type-erased, reference-counted state value.
///
/// Wraps `Arc<dyn Any + Send + Sync>` so every reader shares the same
/// allocation. Clone is an atomic increment.
#[derive(Clone)]
pub struct StateValue {
    inner: Arc<dyn Any + Send + Sync>,
}

impl StateValue {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            inner: Arc::new(value),
        }
    }

    /// Try to downcast to a concrete type reference.
    ///
    /// Returns `None` if the stored type doesn't match `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    /// Downcast and clone the stored value out.
    pub fn cloned<T: Any + Clone>(&self) -> Option<T> {
        self.downcast_ref::<T>().cloned()
    }

    pub fn is<T: Any>(&self) -> bool {
        self.inner.is::<T>()
    }

    pub fn type_id(&self) -> TypeId {
        (*self.inner).type_id()
    }

    /// Number of strong references to the underlying value.
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }
}

impl fmt::Debug for StateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateValue")
            .field("type_id", &(*self.inner).type_id())
            .finish()
    }
}

/// Handle returned by `StateStore::subscribe()`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub(crate) u64);

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Route(String);

    #[test]
    fn downcast_to_stored_type() {
        let v = StateValue::new(Route("/welcome".into()));
        assert_eq!(v.downcast_ref::<Route>(), Some(&Route("/welcome".into())));
        assert!(v.is::<Route>());
        assert_eq!(v.type_id(), TypeId::of::<Route>());
    }

    #[test]
    fn downcast_wrong_type_returns_none() {
        let v = StateValue::new(Route("/login".into()));
        assert!(v.downcast_ref::<String>().is_none());
        assert!(v.cloned::<u32>().is_none());
    }

    #[test]
    fn cloned_copies_value_out() {
        let v = StateValue::new(Some("uid-1".to_string()));
        assert_eq!(v.cloned::<Option<String>>(), Some(Some("uid-1".to_string())));
    }

    #[test]
    fn clone_shares_allocation() {
        let v1 = StateValue::new(vec![0u8; 4096]);
        let v2 = v1.clone();
        assert_eq!(v1.ref_count(), 2);

        let p1 = v1.downcast_ref::<Vec<u8>>().unwrap().as_ptr();
        let p2 = v2.downcast_ref::<Vec<u8>>().unwrap().as_ptr();
        assert_eq!(p1, p2);

        drop(v2);
        assert_eq!(v1.ref_count(), 1);
    }

    #[test]
    fn debug_format() {
        let debug = format!("{:?}", StateValue::new(1u8));
        assert!(debug.contains("StateValue"));
    }

    fn _assert_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}
        assert_send::<StateValue>();
        assert_sync::<StateValue>();
    }
}
