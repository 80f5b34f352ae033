//! A ready-to-drive Swasthya Setu client.

use std::any::Any;
use std::sync::Arc;

use swasthya_flux::{Flux, StateStore, StateValue, SubscriptionId};

use crate::auth::{AuthProvider, ObserverId};
use crate::backend::DataBackend;
use crate::handlers::{register_handlers, SwasthyaContext};
use crate::session::IdentitySession;

/// Flux instance with every handler registered and the session following
/// the auth provider.
pub struct SwasthyaApp {
    flux: Flux,
    ctx: Arc<SwasthyaContext>,
    observer: Option<ObserverId>,
}

impl SwasthyaApp {
    pub fn new(auth: Arc<dyn AuthProvider>, backend: Arc<dyn DataBackend>) -> Self {
        let store = Arc::new(StateStore::new());
        let flux = Flux::with_store(Arc::clone(&store));
        let session = Arc::new(IdentitySession::new(store));
        let observer = session.attach(auth.as_ref());

        let ctx = Arc::new(SwasthyaContext {
            auth,
            backend,
            session,
        });
        register_handlers(&flux, Arc::clone(&ctx));
        Self {
            flux,
            ctx,
            observer: Some(observer),
        }
    }

    /// Emit a request and wait for its handler.
    pub async fn emit<T: Any + Send + Sync>(&self, path: &str, payload: T) {
        self.flux.emit(path, payload).await;
    }

    pub fn get<T: Any + Clone>(&self, path: &str) -> Option<T> {
        self.flux.get_as::<T>(path)
    }

    pub fn subscribe<F>(&self, pattern: &str, handler: F) -> SubscriptionId
    where
        F: Fn(&str, &StateValue) + Send + Sync + 'static,
    {
        self.flux.subscribe(pattern, handler)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.flux.unsubscribe(id)
    }

    pub fn session(&self) -> &Arc<IdentitySession> {
        &self.ctx.session
    }

    pub fn flux(&self) -> &Flux {
        &self.flux
    }

    /// Stop following the provider's session.
    pub fn shutdown(&mut self) {
        if let Some(id) = self.observer.take() {
            self.ctx.session.detach(self.ctx.auth.as_ref(), id);
        }
    }
}

impl Drop for SwasthyaApp {
    fn drop(&mut self) {
        self.shutdown();
    }
}
