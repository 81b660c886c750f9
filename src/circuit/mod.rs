//! The bus: listener sequence ownership and the fan-out scan.
//!
//! Internal modules:
//! - [`circuit`]: the public [`Circuit`] handle and its command protocol;
//! - [`worker`]: the serial worker that owns the listener sequence, runs one
//!   fan-out scan per submitted impulse, prunes dead listeners, and schedules
//!   dispatches on their preferred contexts.

mod circuit;
mod worker;

pub use circuit::Circuit;
