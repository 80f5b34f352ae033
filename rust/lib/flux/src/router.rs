use std::any::Any;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use crate::pattern;
use crate::store::StateStore;

/// A boxed, `Send`-able future returned by request handlers.
pub type BoxFuture = Pin<Box<dyn Future<Output = ()> + Send>>;

/// Type-erased handler function stored in the router.
///
/// Takes owned values so the returned future can be `'static`:
/// - `String`: the request path
/// - `Arc<dyn Any + Send + Sync>`: type-erased request payload
/// - `Arc<StateStore>`: the state store for reading/writing state
type ErasedHandler =
    Arc<dyn Fn(String, Arc<dyn Any + Send + Sync>, Arc<StateStore>) -> BoxFuture + Send + Sync>;

/// Request router: maps path patterns to async handlers.
///
/// Several handlers may match one path; they run sequentially in
/// registration order.
pub struct Router {
    routes: RwLock<Vec<(String, ErasedHandler)>>,
}

impl Router {
    pub fn new() -> Self {
        Self {
            routes: RwLock::new(Vec::new()),
        }
    }

    /// Register an async handler for a path pattern (`+` and `#` allowed).
    pub fn on<F, Fut>(&self, pattern: &str, handler: F)
    where
        F: Fn(String, Arc<dyn Any + Send + Sync>, Arc<StateStore>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        debug_assert!(pattern::is_valid(pattern), "invalid pattern {pattern:?}");
        let handler: ErasedHandler = Arc::new(
            move |path: String,
                  payload: Arc<dyn Any + Send + Sync>,
                  store: Arc<StateStore>|
                  -> BoxFuture { Box::pin(handler(path, payload, store)) },
        );
        self.routes
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((pattern.to_string(), handler));
    }

    /// Dispatch a request to every matching handler, one after another.
    ///
    /// An unmatched path is a no-op.
    pub async fn dispatch(
        &self,
        path: &str,
        payload: Arc<dyn Any + Send + Sync>,
        store: Arc<StateStore>,
    ) {
        let handlers = self.matching(path);
        if handlers.is_empty() {
            debug!(path, "no handler for request");
            return;
        }
        for handler in handlers {
            handler(path.to_string(), Arc::clone(&payload), Arc::clone(&store)).await;
        }
    }

    /// Check if any handler would match the given path.
    pub fn matches(&self, path: &str) -> bool {
        !self.matching(path).is_empty()
    }

    // The lock is released before any handler runs, so handlers may
    // register further routes.
    fn matching(&self, path: &str) -> Vec<ErasedHandler> {
        self.routes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|(p, _)| pattern::matches(p, path))
            .map(|(_, h)| Arc::clone(h))
            .collect()
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn test_store() -> Arc<StateStore> {
        Arc::new(StateStore::new())
    }

    #[tokio::test]
    async fn dispatch_exact_match() {
        let router = Router::new();
        router.on("auth/login", |_, _, store: Arc<StateStore>| async move {
            store.set("auth/login", true);
        });

        let store = test_store();
        router.dispatch("auth/login", Arc::new(()), store.clone()).await;
        assert_eq!(store.get_as::<bool>("auth/login"), Some(true));
    }

    #[tokio::test]
    async fn dispatch_no_match_is_noop() {
        let router = Router::new();
        router.on("auth/login", |_, _, store: Arc<StateStore>| async move {
            store.set("auth/login", true);
        });

        let store = test_store();
        router.dispatch("auth/logout", Arc::new(()), store.clone()).await;
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn handler_receives_typed_payload() {
        struct ResetPassword {
            email: String,
        }

        let router = Router::new();
        router.on("auth/reset-password", |_, payload, store: Arc<StateStore>| async move {
            if let Some(req) = payload.downcast_ref::<ResetPassword>() {
                store.set("auth/reset-email", req.email.clone());
            }
        });

        let store = test_store();
        let req = ResetPassword {
            email: "ana@example.com".into(),
        };
        router
            .dispatch("auth/reset-password", Arc::new(req), store.clone())
            .await;
        assert_eq!(
            store.get_as::<String>("auth/reset-email").as_deref(),
            Some("ana@example.com")
        );
    }

    #[tokio::test]
    async fn wildcard_handlers_run_in_registration_order() {
        let router = Router::new();
        let order = Arc::new(Mutex::new(Vec::<&'static str>::new()));

        let o = order.clone();
        router.on("auth/+", move |_, _, _| {
            let o = o.clone();
            async move { o.lock().unwrap().push("single") }
        });
        let o = order.clone();
        router.on("auth/register", move |_, _, _| {
            let o = o.clone();
            async move { o.lock().unwrap().push("exact") }
        });
        let o = order.clone();
        router.on("#", move |_, _, _| {
            let o = o.clone();
            async move { o.lock().unwrap().push("all") }
        });

        router.dispatch("auth/register", Arc::new(()), test_store()).await;
        assert_eq!(*order.lock().unwrap(), vec!["single", "exact", "all"]);
    }

    #[tokio::test]
    async fn handler_receives_request_path() {
        let router = Router::new();
        router.on("dashboard/#", |path, _, store: Arc<StateStore>| async move {
            store.set("last", path);
        });

        let store = test_store();
        router.dispatch("dashboard/load", Arc::new(()), store.clone()).await;
        assert_eq!(store.get_as::<String>("last").as_deref(), Some("dashboard/load"));
    }

    #[test]
    fn matches_reports_registered_patterns() {
        let router = Router::new();
        router.on("auth/#", |_, _, _| async {});
        assert!(router.matches("auth/login"));
        assert!(router.matches("auth/deep/path"));
        assert!(!router.matches("dashboard/load"));
    }
}
