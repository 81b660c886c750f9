//! Execution contexts: where dispatch bodies run.
//!
//! A circuit schedules every matched dispatch call onto an execution context.
//! Two kinds exist:
//!
//! - [`ExecContext::Parallel`]: the Tokio runtime itself. Dispatches are
//!   independent spawned tasks with no ordering between them. This is the
//!   circuit default.
//! - [`ExecContext::Serial`]: a [`SerialContext`], a dedicated worker task
//!   that runs scheduled jobs strictly one at a time in FIFO order. Use one
//!   for listeners that touch state with single-threaded affinity.
//!
//! Contexts are built independently of any circuit and may be shared across
//! listeners and across circuits.

mod exec;
mod serial;

pub use exec::ExecContext;
pub use serial::SerialContext;
