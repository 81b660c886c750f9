//! # circuit
//!
//! **circuit** is a lightweight in-process publish/dispatch bus.
//!
//! Producers post typed messages ("impulses") onto a shared bus (a
//! [`Circuit`]); a dynamic set of registered listeners ("etches", built with
//! [`Etch`]) each declare a match rule and a preferred execution context, and
//! matching listeners are invoked asynchronously. A dispatch body may return
//! follow-up impulses, which are re-submitted onto the same bus; that is how
//! listeners chain reactions without knowing about each other.
//!
//! It is strictly an in-process concurrency primitive for decoupling
//! producers from consumers: no persistence, no cross-restart delivery, no
//! distributed transport, no ordering guarantee across different listeners.
//!
//! ## Architecture
//! ```text
//!  any task:                    circuit worker (one task, serial):
//!    Circuit::submit ──┐
//!    Circuit::submit ──┼──► [commands, FIFO] ──► per impulse: fan-out scan
//!    Circuit::register ┘                           over the listener sequence
//!                                                  (registration order)
//!                                       │ alive()==false → prune, skip
//!                                       │ match rule declines → skip
//!                                       ▼
//!                            schedule dispatch, fire-and-forget
//!                       ┌────────────┴─────────────┐
//!                       ▼                          ▼
//!               ExecContext::Parallel      ExecContext::Serial
//!               (tokio::spawn, unordered)  (dedicated FIFO worker)
//!                       │                          │
//!                       └──── follow-up impulses ──┴──► Circuit::submit
//! ```
//!
//! ## Guarantees
//! - Within one scan, listeners are visited in registration order and each
//!   receives the impulse at most once; actual dispatch execution across
//!   listeners is unordered (and possibly parallel) once scheduled.
//! - A listener registered after a scan has begun does not see that impulse.
//! - A listener whose `alive` predicate reports `false` is removed
//!   permanently the next time it is visited, and never invoked again.
//! - A panicking dispatch body is isolated: logged, no follow-ups, the scan
//!   and the sequence are unaffected.
//!
//! ## Example
//! ```no_run
//! use std::sync::Arc;
//! use circuit::{Circuit, Etch};
//!
//! #[derive(Debug)]
//! enum TodoImpulse {
//!     RequestRead,
//!     ResponseRead(String),
//! }
//!
//! #[tokio::main(flavor = "multi_thread")]
//! async fn main() {
//!     let bus = Circuit::<TodoImpulse>::new();
//!
//!     // A "model" listener: answers read requests.
//!     bus.register(
//!         Etch::new()
//!             .with_filter(|m: &TodoImpulse| matches!(m, TodoImpulse::RequestRead))
//!             .with_dispatch(|_m: Arc<TodoImpulse>| async {
//!                 vec![TodoImpulse::ResponseRead("ok".into())]
//!             }),
//!     );
//!
//!     // A "view-model" listener: narrows the payload to the response body.
//!     let view_model = Arc::new(());
//!     bus.register(
//!         Etch::new()
//!             .with_alive_host(&view_model)
//!             .with_unwrap(|m: &TodoImpulse| match m {
//!                 TodoImpulse::ResponseRead(body) => Some(body.clone()),
//!                 _ => None,
//!             })
//!             .with_dispatch(|body: String| async move {
//!                 println!("read: {body}");
//!                 Vec::new()
//!             }),
//!     );
//!
//!     bus.submit(TodoImpulse::RequestRead);
//! }
//! ```
//!
//! ## Optional features
//! - `logging`: exports [`trace_tap`], a probe etch that logs every impulse
//!   _(demo/diagnostic only)_.

mod circuit;
mod context;
mod error;
mod etches;
mod impulse;

pub use circuit::Circuit;
pub use context::{ExecContext, SerialContext};
pub use error::CircuitError;
pub use etches::{Etch, EtchId};
pub use impulse::Impulse;

#[cfg(feature = "logging")]
pub use etches::trace_tap;
