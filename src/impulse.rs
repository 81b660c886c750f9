//! The impulse marker trait.

/// Marker for types that can travel over a [`Circuit`](crate::Circuit).
///
/// An impulse is an opaque, application-defined message; the bus never
/// inspects, compares, or orders impulses itself. Any `Send + Sync + 'static`
/// type qualifies via the blanket impl, so in practice this trait only exists
/// to name the bound. An enum with one variant per message kind is the usual
/// shape:
///
/// ```
/// enum TodoImpulse {
///     RequestRead,
///     ResponseRead(Vec<String>),
/// }
/// ```
pub trait Impulse: Send + Sync + 'static {}

impl<T> Impulse for T where T: Send + Sync + 'static {}
