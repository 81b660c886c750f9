//! A serial execution context: one worker, strict FIFO.

use std::panic::AssertUnwindSafe;

use futures::{FutureExt, future::BoxFuture};
use tokio::sync::mpsc;

/// Handle to a dedicated worker task that runs jobs one at a time.
///
/// Jobs scheduled through [`spawn`](SerialContext::spawn) execute in the
/// order they were submitted, and a job does not start until the previous one
/// has finished. This is the affinity-preserving counterpart to the circuit's
/// default parallel context: two listeners sharing one `SerialContext` never
/// run their dispatch bodies concurrently.
///
/// The handle is cheap to clone; all clones feed the same worker. The worker
/// exits after draining its queue once every handle has been dropped. A
/// panicking job is caught and logged so it cannot take the worker down with
/// it.
#[derive(Clone, Debug)]
pub struct SerialContext {
    tx: mpsc::UnboundedSender<BoxFuture<'static, ()>>,
}

impl SerialContext {
    /// Creates a new serial context and spawns its worker task.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new() -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<BoxFuture<'static, ()>>();
        tokio::spawn(async move {
            while let Some(job) = rx.recv().await {
                if let Err(panic) = AssertUnwindSafe(job).catch_unwind().await {
                    log::error!("serial context job panicked: {panic:?}");
                }
            }
            log::trace!("serial context worker exiting; all handles dropped");
        });
        Self { tx }
    }

    /// Schedules a job to run after every previously scheduled job.
    ///
    /// Returns immediately. If the worker is gone the job is dropped.
    pub fn spawn(&self, job: impl Future<Output = ()> + Send + 'static) {
        let _ = self.tx.send(job.boxed());
    }
}

impl Default for SerialContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    #[tokio::test(flavor = "multi_thread")]
    async fn jobs_run_in_fifo_order() {
        let ctx = SerialContext::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for n in 0..8u32 {
            let order = Arc::clone(&order);
            ctx.spawn(async move {
                // The first job dawdles; later jobs must still wait their turn.
                if n == 0 {
                    tokio::time::sleep(Duration::from_millis(50)).await;
                }
                order.lock().unwrap().push(n);
            });
        }

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(*order.lock().unwrap(), (0..8).collect::<Vec<_>>());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn panicking_job_does_not_kill_the_worker() {
        let ctx = SerialContext::new();
        let ran = Arc::new(Mutex::new(false));

        ctx.spawn(async { panic!("boom") });
        let flag = Arc::clone(&ran);
        ctx.spawn(async move {
            *flag.lock().unwrap() = true;
        });

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(*ran.lock().unwrap());
    }
}
