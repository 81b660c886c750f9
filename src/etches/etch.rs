//! # Etch: an immutable listener descriptor with a fluent builder.
//!
//! An etch is built once, possibly from a shared template, and registered
//! into a [`Circuit`](crate::Circuit). Every `with_*` method returns a
//! modified copy and leaves the receiver untouched, so partially configured
//! templates can be reused safely across threads:
//!
//! ```
//! use std::sync::Arc;
//! use circuit::{Etch, SerialContext};
//!
//! # #[derive(Debug)] enum Msg { Tick }
//! # async fn demo(ui: SerialContext) {
//! let template = Etch::<Msg>::new().with_context(ui.clone());
//!
//! let on_tick = template
//!     .clone()
//!     .with_filter(|m: &Msg| matches!(m, Msg::Tick))
//!     .with_dispatch(|_m: Arc<Msg>| async { Vec::new() });
//! # let _ = (template, on_tick);
//! # }
//! ```
//!
//! ## Match rules
//! Two variants decide whether a listener is interested in an impulse, and
//! what its dispatch body receives:
//!
//! - **Predicate** ([`with_filter`](Etch::with_filter)): a `Fn(&I) -> bool`
//!   test; dispatch receives the whole impulse as `Arc<I>`.
//! - **Extractor** ([`with_unwrap`](Etch::with_unwrap)): a
//!   `Fn(&I) -> Option<Q>` that both decides interest and narrows the
//!   payload; dispatch receives the `Q`. Declining (`None`) skips dispatch.
//!
//! An etch with neither matches every impulse. The variant is resolved at the
//! type level: `Etch<I, P>` is generic over the payload `P` handed to
//! dispatch, defaulting to `Arc<I>`, and `with_unwrap` moves the value to a
//! new payload type.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;

use crate::context::ExecContext;
use crate::impulse::Impulse;

use super::registered::RegisteredEtch;

/// Global sequence counter for etch identity.
static ETCH_SEQ: AtomicU64 = AtomicU64::new(0);

/// Opaque unique identity of an [`Etch`].
///
/// Assigned at construction and carried unchanged through the `with_*`
/// chain. Used only for equality and removal, never for lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EtchId(u64);

impl EtchId {
    fn next() -> Self {
        Self(ETCH_SEQ.fetch_add(1, Ordering::Relaxed))
    }
}

pub(crate) type AliveFn = dyn Fn() -> bool + Send + Sync;
type MatcherFn<I, P> = dyn Fn(&Arc<I>) -> Option<P> + Send + Sync;
type DispatchFn<I, P> = dyn Fn(P) -> BoxFuture<'static, Vec<I>> + Send + Sync;

/// A listener descriptor: liveness, match rule, preferred context, dispatch.
///
/// `I` is the impulse type of the circuit this etch will be registered into;
/// `P` is the payload type its dispatch body receives (`Arc<I>` unless
/// [`with_unwrap`](Etch::with_unwrap) narrowed it).
///
/// Defaults: alive forever, matches every impulse, circuit's parallel
/// context, no-op dispatch with no follow-ups.
pub struct Etch<I, P = Arc<I>> {
    id: EtchId,
    alive: Arc<AliveFn>,
    matcher: Arc<MatcherFn<I, P>>,
    context: Option<ExecContext>,
    dispatch: Arc<DispatchFn<I, P>>,
}

fn noop_dispatch<I: Impulse, P: Send + 'static>() -> Arc<DispatchFn<I, P>> {
    Arc::new(|_payload| {
        let none: Vec<I> = Vec::new();
        futures::future::ready(none).boxed()
    })
}

impl<I: Impulse> Etch<I> {
    /// Creates a listener that matches everything and does nothing.
    pub fn new() -> Self {
        Self {
            id: EtchId::next(),
            alive: Arc::new(|| true),
            matcher: Arc::new(|impulse: &Arc<I>| Some(Arc::clone(impulse))),
            context: None,
            dispatch: noop_dispatch(),
        }
    }

    /// Sets a boolean filter; dispatch keeps receiving the whole impulse.
    ///
    /// Replaces any previously set match rule.
    pub fn with_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&I) -> bool + Send + Sync + 'static,
    {
        self.matcher = Arc::new(move |impulse: &Arc<I>| {
            if filter(impulse.as_ref()) {
                Some(Arc::clone(impulse))
            } else {
                None
            }
        });
        self
    }
}

impl<I: Impulse> Default for Etch<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Impulse, P: Send + 'static> Etch<I, P> {
    /// Returns this etch's identity.
    pub fn id(&self) -> EtchId {
        self.id
    }

    /// Sets the liveness predicate.
    ///
    /// The circuit queries it before every delivery attempt; the first time
    /// it reports `false` the listener is removed for good and never queried
    /// again, even if the predicate would later report `true`. The predicate
    /// runs on the circuit's serial worker and must be cheap.
    pub fn with_alive<F>(mut self, alive: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        self.alive = Arc::new(alive);
        self
    }

    /// Ties liveness to a host object without keeping it alive.
    ///
    /// The etch holds only a [`Weak`](std::sync::Weak) reference; it reports
    /// dead as soon as the last `Arc` to the host is dropped. This is the
    /// standard way to avoid manual unregistration: a view-model registers an
    /// etch whose liveness tracks the view-model itself.
    pub fn with_alive_host<T>(self, host: &Arc<T>) -> Self
    where
        T: Send + Sync + ?Sized + 'static,
    {
        let host = Arc::downgrade(host);
        self.with_alive(move || host.strong_count() > 0)
    }

    /// Sets the preferred execution context for the dispatch body.
    pub fn with_context(mut self, context: impl Into<ExecContext>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Sets the filter-and-unwrap match rule, narrowing the dispatch payload
    /// to `Q`.
    ///
    /// Replaces any previously set match rule and, because the payload type
    /// changes, resets dispatch to the default no-op; set the match rule
    /// before [`with_dispatch`](Etch::with_dispatch).
    pub fn with_unwrap<Q, F>(self, unwrap: F) -> Etch<I, Q>
    where
        Q: Send + 'static,
        F: Fn(&I) -> Option<Q> + Send + Sync + 'static,
    {
        Etch {
            id: self.id,
            alive: self.alive,
            matcher: Arc::new(move |impulse: &Arc<I>| unwrap(impulse.as_ref())),
            context: self.context,
            dispatch: noop_dispatch(),
        }
    }

    /// Sets the async dispatch body.
    ///
    /// Runs on the etch's preferred context whenever the match rule accepts
    /// an impulse. Returned impulses are re-submitted to the circuit, each
    /// triggering its own fan-out scan; return an empty `Vec` for none.
    pub fn with_dispatch<F, Fut>(mut self, dispatch: F) -> Self
    where
        F: Fn(P) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Vec<I>> + Send + 'static,
    {
        self.dispatch = Arc::new(move |payload| dispatch(payload).boxed());
        self
    }

    /// Erases the payload type for storage in the circuit's listener
    /// sequence.
    pub(crate) fn seal(self) -> RegisteredEtch<I> {
        let matcher = self.matcher;
        let dispatch = self.dispatch;
        RegisteredEtch {
            id: self.id,
            alive: self.alive,
            context: self.context.unwrap_or_default(),
            route: Arc::new(move |impulse| {
                (*matcher)(impulse).map(|payload| (*dispatch)(payload))
            }),
        }
    }
}

impl<I, P> Clone for Etch<I, P> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            alive: Arc::clone(&self.alive),
            matcher: Arc::clone(&self.matcher),
            context: self.context.clone(),
            dispatch: Arc::clone(&self.dispatch),
        }
    }
}

/// Equality is id-based only; clones and `with_*` copies of one etch compare
/// equal.
impl<I, P> PartialEq for Etch<I, P> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<I, P> Eq for Etch<I, P> {}

impl<I, P> fmt::Debug for Etch<I, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Etch")
            .field("id", &self.id)
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    enum Msg {
        Ping,
    }

    #[test]
    fn identity_survives_the_builder_chain() {
        let template = Etch::<Msg>::new();
        let id = template.id();

        let derived = template
            .clone()
            .with_filter(|m| matches!(m, Msg::Ping))
            .with_alive(|| true)
            .with_dispatch(|_m| async { Vec::new() });

        assert_eq!(derived.id(), id);
        assert_eq!(template, derived);
    }

    #[test]
    fn distinct_etches_are_never_equal() {
        let a = Etch::<Msg>::new();
        let b = Etch::<Msg>::new();
        assert_ne!(a, b);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn unwrap_keeps_identity_across_payload_change() {
        let whole = Etch::<Msg>::new();
        let id = whole.id();
        let narrowed = whole.with_unwrap(|m| match m {
            Msg::Ping => Some(1u32),
        });
        assert_eq!(narrowed.id(), id);
    }

    #[test]
    fn alive_host_dies_with_the_host() {
        let host = Arc::new(());
        let etch = Etch::<Msg>::new().with_alive_host(&host);

        assert!((*etch.alive)());
        drop(host);
        assert!(!(*etch.alive)());
    }
}
