use super::SerialContext;

/// Where a listener's dispatch body runs.
///
/// Attached to an [`Etch`](crate::Etch) via
/// [`with_context`](crate::Etch::with_context). Listeners that do not request
/// a context get [`ExecContext::Parallel`].
#[derive(Clone, Debug, Default)]
pub enum ExecContext {
    /// Spawn each dispatch as an independent task on the Tokio runtime.
    /// No ordering between dispatches, even for the same listener.
    #[default]
    Parallel,
    /// Run dispatches one at a time, FIFO, on the given serial worker.
    Serial(SerialContext),
}

impl ExecContext {
    /// Schedules `job` on this context, fire-and-forget.
    pub(crate) fn run(&self, job: impl Future<Output = ()> + Send + 'static) {
        match self {
            ExecContext::Parallel => {
                tokio::spawn(job);
            }
            ExecContext::Serial(ctx) => ctx.spawn(job),
        }
    }
}

impl From<SerialContext> for ExecContext {
    fn from(ctx: SerialContext) -> Self {
        ExecContext::Serial(ctx)
    }
}
