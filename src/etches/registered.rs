use std::sync::Arc;

use futures::future::BoxFuture;

use crate::context::ExecContext;

use super::etch::{AliveFn, EtchId};

/// Match-and-dispatch in one step: `None` means no interest, `Some(fut)` is
/// the dispatch body ready to be scheduled.
pub(crate) type RouteFn<I> =
    dyn Fn(&Arc<I>) -> Option<BoxFuture<'static, Vec<I>>> + Send + Sync;

/// The type-erased form of an [`Etch`](super::Etch) as stored in the
/// circuit's listener sequence. Produced by `Etch::seal` at registration;
/// the payload type is folded into `route`.
pub(crate) struct RegisteredEtch<I> {
    pub(crate) id: EtchId,
    pub(crate) alive: Arc<AliveFn>,
    pub(crate) context: ExecContext,
    pub(crate) route: Arc<RouteFn<I>>,
}
