//! A prebuilt probe etch that logs every impulse it sees.

use std::fmt::Debug;
use std::sync::Arc;

use crate::impulse::Impulse;

use super::Etch;

/// Builds an etch that matches everything and logs each impulse at debug
/// level under `label`. Intended for tests and demos; wire it into a circuit
/// like any other listener:
///
/// ```no_run
/// use circuit::{Circuit, trace_tap};
///
/// # #[derive(Debug)] enum Msg { Tick }
/// # async fn demo() {
/// let bus = Circuit::<Msg>::new();
/// bus.register(trace_tap("bus"));
/// # }
/// ```
pub fn trace_tap<I>(label: &'static str) -> Etch<I>
where
    I: Impulse + Debug,
{
    Etch::<I>::new().with_dispatch(move |impulse: Arc<I>| async move {
        log::debug!("[{label}] impulse: {impulse:?}");
        Vec::new()
    })
}
