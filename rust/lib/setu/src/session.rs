//! The process-wide signed-in identity, as an explicit context value.
//!
//! Only the auth provider's session observer (and the login flow, with the
//! identity the provider just returned) publishes into it. Everything else
//! reads `current()` or subscribes.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use swasthya_flux::{StateStore, StateValue, SubscriptionId};
use tracing::debug;

use crate::auth::{AuthProvider, Identity, ObserverId};
use crate::state::SessionState;

#[derive(Default)]
struct Gate {
    in_flight: usize,
    /// Latest publication not yet applied.
    pending: Option<Option<Identity>>,
    /// Some caller is applying `pending`; others only queue behind it.
    draining: bool,
}

pub struct IdentitySession {
    store: Arc<StateStore>,
    gate: Mutex<Gate>,
}

impl IdentitySession {
    pub fn new(store: Arc<StateStore>) -> Self {
        Self {
            store,
            gate: Mutex::new(Gate::default()),
        }
    }

    pub fn current(&self) -> Option<Identity> {
        self.store
            .get_as::<SessionState>(SessionState::PATH)
            .and_then(|s| s.identity)
    }

    /// Replace the current identity. Returns `false` when nothing changed,
    /// or when the value was deferred behind a running flow or queued behind
    /// a publication already being applied.
    pub fn publish(&self, identity: Option<Identity>) -> bool {
        {
            let mut gate = self.lock_gate();
            if gate.in_flight > 0 {
                debug!(signed_in = identity.is_some(), "session change deferred");
            }
            gate.pending = Some(identity);
            if gate.in_flight > 0 || gate.draining {
                return false;
            }
            gate.draining = true;
        }
        self.drain()
    }

    /// Apply queued publications one at a time until none is left or a
    /// flow starts. Returns whether the current identity changed.
    fn drain(&self) -> bool {
        let mut changed = false;
        loop {
            let next = {
                let mut gate = self.lock_gate();
                match gate.pending.take() {
                    Some(identity) if gate.in_flight == 0 => identity,
                    held => {
                        gate.pending = held;
                        gate.draining = false;
                        return changed;
                    }
                }
            };
            changed |= self.apply(next);
        }
    }

    fn lock_gate(&self) -> MutexGuard<'_, Gate> {
        self.gate.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn apply(&self, identity: Option<Identity>) -> bool {
        if self.current() == identity {
            return false;
        }
        debug!(uid = ?identity.as_ref().map(|i| i.uid.as_str()), "session changed");
        self.store.set(SessionState::PATH, SessionState { identity });
        true
    }

    /// Call `callback` on every change of the current identity.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(Option<&Identity>) + Send + Sync + 'static,
    {
        self.store.subscribe(SessionState::PATH, move |_, value: &StateValue| {
            if let Some(state) = value.downcast_ref::<SessionState>() {
                callback(state.identity.as_ref());
            }
        })
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.store.unsubscribe(id)
    }

    /// Follow the provider's session. The provider calls back immediately
    /// with its current identity.
    pub fn attach(self: &Arc<Self>, provider: &dyn AuthProvider) -> ObserverId {
        let session = Arc::downgrade(self);
        provider.observe_session(Arc::new(move |identity: Option<&Identity>| {
            if let Some(session) = session.upgrade() {
                session.publish(identity.cloned());
            }
        }))
    }

    pub fn detach(&self, provider: &dyn AuthProvider, id: ObserverId) {
        provider.unobserve_session(id);
    }

    /// Hold back publications until the returned guard, and every other
    /// live guard, is dropped. The latest held-back value is then applied.
    pub fn begin_flow(self: &Arc<Self>) -> FlowGuard {
        self.lock_gate().in_flight += 1;
        FlowGuard {
            session: Arc::clone(self),
        }
    }

    pub fn flows_in_flight(&self) -> usize {
        self.lock_gate().in_flight
    }
}

/// Keeps session publications deferred while alive.
pub struct FlowGuard {
    session: Arc<IdentitySession>,
}

impl Drop for FlowGuard {
    fn drop(&mut self) {
        {
            let mut gate = self.session.lock_gate();
            gate.in_flight = gate.in_flight.saturating_sub(1);
            if gate.in_flight > 0 || gate.draining || gate.pending.is_none() {
                return;
            }
            gate.draining = true;
        }
        self.session.drain();
    }
}
