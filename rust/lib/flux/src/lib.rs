//! Flux: path-addressed state engine for the Swasthya Setu app.
//!
//! Rust owns every piece of app state; platform UIs (Android, iOS, web)
//! only read state and emit requests.
//!
//! # Three Primitives
//!
//! - `get(path)`: read state at a path, Arc zero-copy
//! - `emit(path, payload)`: send a request to the handler(s) bound to a path
//! - `subscribe(pattern)`: observe state changes under a path pattern
//!
//! # Path Addressing
//!
//! State and requests share one flat namespace with `/` as separator:
//! - `app/route`, `session/identity`
//! - `auth/login`, `auth/register`
//! - `dashboard/view`
//!
//! Patterns use MQTT-style wildcards: `+` matches one level, `#` matches
//! the rest of the path (last segment only).
//!
//! # Example
//!
//! ```ignore
//! use swasthya_flux::Flux;
//!
//! let app = Flux::new();
//! app.on("app/initialize", |_, _, store| async move {
//!     store.set("app/route", "/welcome".to_string());
//! });
//! app.subscribe("app/#", |path, _value| println!("changed: {}", path));
//! app.emit("app/initialize", ()).await;
//! ```

pub mod app;
pub mod pattern;
pub mod router;
pub mod store;
pub mod value;

pub use app::Flux;
pub use router::{BoxFuture, Router};
pub use store::{ChangeHandler, StateStore};
pub use value::{StateValue, SubscriptionId};
