//! Error types for the circuit bus.
//!
//! The bus has no global failure state: listener death and non-matching
//! impulses are normal control flow, and dispatch panics are isolated per
//! listener (see [`Circuit`](crate::Circuit)). The only condition a caller
//! can observe as an error is talking to a circuit whose worker has already
//! shut down, and even that is a defined no-op through the infallible entry
//! points. [`CircuitError`] exists for callers that use the `try_*` variants
//! and want to know.

use thiserror::Error;

/// Errors surfaced by the fallible circuit entry points.
#[non_exhaustive]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitError {
    /// The circuit worker has shut down, either because [`close`] was called
    /// or because every handle to the circuit was dropped. Impulses and
    /// registrations sent to a closed circuit are discarded.
    ///
    /// [`close`]: crate::Circuit::close
    #[error("circuit is closed; impulse or registration discarded")]
    Closed,
}

impl CircuitError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use circuit::CircuitError;
    ///
    /// assert_eq!(CircuitError::Closed.as_label(), "circuit_closed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            CircuitError::Closed => "circuit_closed",
        }
    }
}
