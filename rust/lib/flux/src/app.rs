use std::any::Any;
use std::future::Future;
use std::sync::Arc;

use crate::router::Router;
use crate::store::StateStore;
use crate::value::{StateValue, SubscriptionId};

/// Flux: the state engine a platform UI talks to.
///
/// ```ignore
/// let flux = Flux::new();
/// flux.on("auth/logout", |_, _, store| async move {
///     store.set("app/route", "/login".to_string());
/// });
/// flux.subscribe("app/route", |_, value| render(value));
/// flux.emit("auth/logout", ()).await;
/// ```
pub struct Flux {
    store: Arc<StateStore>,
    router: Router,
}

impl Flux {
    pub fn new() -> Self {
        Self::with_store(Arc::new(StateStore::new()))
    }

    /// Build a Flux around an existing store, so collaborators created
    /// before the engine (e.g. the identity session) share its state.
    pub fn with_store(store: Arc<StateStore>) -> Self {
        Self {
            store,
            router: Router::new(),
        }
    }

    // ====================================================================
    // State: read
    // ====================================================================

    pub fn get(&self, path: &str) -> Option<StateValue> {
        self.store.get(path)
    }

    /// Read and clone a typed state value.
    pub fn get_as<T: Any + Clone>(&self, path: &str) -> Option<T> {
        self.store.get_as(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.store.contains(path)
    }

    pub fn snapshot(&self) -> Vec<(String, StateValue)> {
        self.store.snapshot()
    }

    // ====================================================================
    // Requests
    // ====================================================================

    /// Emit a request and wait for every matching handler to finish.
    pub async fn emit<T: Any + Send + Sync>(&self, path: &str, payload: T) {
        self.router
            .dispatch(path, Arc::new(payload), Arc::clone(&self.store))
            .await;
    }

    /// Register an async request handler for a path pattern.
    pub fn on<F, Fut>(&self, pattern: &str, handler: F)
    where
        F: Fn(String, Arc<dyn Any + Send + Sync>, Arc<StateStore>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.router.on(pattern, handler);
    }

    pub fn has_handler(&self, path: &str) -> bool {
        self.router.matches(path)
    }

    // ====================================================================
    // Subscriptions
    // ====================================================================

    /// Subscribe to state changes; the handler runs on the thread that
    /// called `set`.
    pub fn subscribe<F>(&self, pattern: &str, handler: F) -> SubscriptionId
    where
        F: Fn(&str, &StateValue) + Send + Sync + 'static,
    {
        self.store.subscribe(pattern, handler)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.store.unsubscribe(id)
    }

    pub fn store(&self) -> &Arc<StateStore> {
        &self.store
    }
}

impl Default for Flux {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    struct LoginReq {
        email: String,
    }

    #[test]
    fn new_creates_empty_flux() {
        let flux = Flux::new();
        assert!(flux.snapshot().is_empty());
        assert!(flux.get("app/route").is_none());
    }

    #[test]
    fn with_store_shares_state() {
        let store = Arc::new(StateStore::new());
        store.set("session/identity", Some("uid-1".to_string()));

        let flux = Flux::with_store(store.clone());
        assert_eq!(
            flux.get_as::<Option<String>>("session/identity"),
            Some(Some("uid-1".to_string()))
        );
    }

    #[tokio::test]
    async fn emit_routes_payload_to_handler() {
        let flux = Flux::new();
        flux.on("auth/login", |_, payload, store: Arc<StateStore>| async move {
            if let Some(req) = payload.downcast_ref::<LoginReq>() {
                store.set("auth/email", req.email.clone());
                store.set("app/route", "/dashboard".to_string());
            }
        });

        flux.emit("auth/login", LoginReq { email: "ana@example.com".into() })
            .await;

        assert_eq!(flux.get_as::<String>("auth/email").as_deref(), Some("ana@example.com"));
        assert_eq!(flux.get_as::<String>("app/route").as_deref(), Some("/dashboard"));
    }

    #[tokio::test]
    async fn subscribers_observe_handler_writes() {
        let flux = Flux::new();
        let timeline = Arc::new(Mutex::new(Vec::<String>::new()));
        let tl = timeline.clone();
        let id = flux.subscribe("#", move |path, _| {
            tl.lock().unwrap().push(path.to_string());
        });

        flux.on("app/initialize", |_, _, store: Arc<StateStore>| async move {
            store.set("session/identity", None::<String>);
            store.set("app/route", "/welcome".to_string());
        });

        flux.emit("app/initialize", ()).await;
        assert_eq!(*timeline.lock().unwrap(), vec!["session/identity", "app/route"]);

        assert!(flux.unsubscribe(id));
        flux.emit("app/initialize", ()).await;
        assert_eq!(timeline.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn emit_without_handler_is_silent() {
        let flux = Flux::new();
        flux.emit("nothing/here", ()).await;
        assert!(!flux.has_handler("nothing/here"));
    }

    fn _assert_flux_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}
        assert_send::<Flux>();
        assert_sync::<Flux>();
    }
}
