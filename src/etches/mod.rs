//! Listener descriptors ("etches") and their builder.
//!
//! An [`Etch`] describes one listener: a liveness predicate, a match rule
//! (predicate or extractor), an optional preferred [`ExecContext`], and an
//! async dispatch body that may emit follow-up impulses. Etches are immutable
//! values built with a `with_*` chain; registering one hands a sealed,
//! type-erased copy to the circuit worker.
//!
//! [`ExecContext`]: crate::ExecContext

mod etch;
mod registered;
#[cfg(feature = "logging")]
mod trace;

pub use etch::{Etch, EtchId};
pub(crate) use registered::RegisteredEtch;
#[cfg(feature = "logging")]
pub use trace::trace_tap;
