//! # Circuit: the public bus handle.
//!
//! [`Circuit`] is a cheap clonable handle over an unbounded command channel
//! into the bus worker. Registration and submission are both commands; their
//! FIFO order on that channel is the bus's single serialization point, so
//! `register` and `submit` are safe from any calling context, including from
//! inside a dispatch body, and never block the caller past enqueueing.
//!
//! ## Delivery model
//! ```text
//! producers (any task):              circuit worker (serial):
//!   submit(impulse) ─┐
//!   submit(impulse) ─┼─► [command channel] ─► fan-out scan per impulse
//!   register(etch)  ─┘                          │ visit etches in
//!                                               │ registration order
//!                                               ├─ alive() false → prune
//!                                               ├─ no match      → skip
//!                                               └─ match → schedule dispatch
//!                                                  on the etch's context
//!                                                  (fire-and-forget)
//!
//! dispatch (parallel or serial context):
//!   returned follow-up impulses ──► submit() again, independently
//! ```
//!
//! A registration becomes visible to the first scan that starts after the
//! worker has processed it; it never replays past impulses. A scan sees
//! exactly the sequence present when its own command is dequeued.

use std::fmt;
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::error::CircuitError;
use crate::etches::{Etch, RegisteredEtch};
use crate::impulse::Impulse;

use super::worker::Worker;

/// Commands processed one at a time by the circuit worker.
pub(crate) enum Command<I> {
    Register(RegisteredEtch<I>),
    Submit(Arc<I>),
    Close,
}

/// An in-process publish/dispatch bus for impulses of type `I`.
///
/// Producers [`submit`](Circuit::submit) impulses; registered
/// [`Etch`](crate::Etch) listeners whose match rule accepts an impulse have
/// their dispatch body scheduled on their preferred execution context, and
/// any follow-up impulses they return are re-submitted to the same bus.
///
/// Cloning the handle shares the same bus. The bus shuts down when
/// [`close`](Circuit::close) is called or when the last handle is dropped;
/// in-flight dispatches then finish on their own and their follow-ups are
/// discarded.
pub struct Circuit<I> {
    tx: mpsc::UnboundedSender<Command<I>>,
}

impl<I: Impulse> Circuit<I> {
    /// Creates a new circuit and spawns its worker.
    ///
    /// Must be called from within a Tokio runtime. There is nothing to
    /// configure; the bus is generic over the impulse type and that is all.
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(Worker::new(tx.downgrade()).run(rx));
        Self { tx }
    }

    /// Appends a listener to the end of the sequence.
    ///
    /// Fire-and-forget: returns once the registration is enqueued. The
    /// listener becomes eligible for impulses submitted after the worker
    /// processes the registration; past impulses are never replayed.
    /// Registering on a closed circuit is a no-op.
    pub fn register<P: Send + 'static>(&self, etch: Etch<I, P>) {
        let _ = self.try_register(etch);
    }

    /// Like [`register`](Circuit::register), but reports a closed circuit.
    pub fn try_register<P: Send + 'static>(&self, etch: Etch<I, P>) -> Result<(), CircuitError> {
        self.tx
            .send(Command::Register(etch.seal()))
            .map_err(|_| CircuitError::Closed)
    }

    /// Submits an impulse for delivery to the current listener sequence.
    ///
    /// Fire-and-forget: returns before any listener has necessarily run.
    /// Submitting with no listeners registered, or on a closed circuit, is a
    /// no-op. Re-entrant submission from inside a dispatch body is legal and
    /// is how listeners chain reactions.
    pub fn submit(&self, impulse: I) {
        let _ = self.try_submit(impulse);
    }

    /// Like [`submit`](Circuit::submit), but reports a closed circuit.
    pub fn try_submit(&self, impulse: I) -> Result<(), CircuitError> {
        self.tx
            .send(Command::Submit(Arc::new(impulse)))
            .map_err(|_| CircuitError::Closed)
    }

    /// Shuts the bus down even while other handles are still held.
    ///
    /// Asynchronous like every other operation: commands already enqueued
    /// ahead of the close are still processed; once the worker has stopped,
    /// further submissions are discarded and the `try_*` variants return
    /// [`CircuitError::Closed`]. Dropping the last handle closes the bus
    /// implicitly.
    pub fn close(&self) {
        let _ = self.tx.send(Command::Close);
    }

    /// Whether the worker has shut down.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

impl<I: Impulse> Default for Circuit<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I> Clone for Circuit<I> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<I> fmt::Debug for Circuit<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Circuit")
            .field("closed", &self.tx.is_closed())
            .finish_non_exhaustive()
    }
}
