//! # Observer trait.
//!
//! Provides [`Observe`], the extension point for plugging event handlers into a
//! dispatcher, and [`ObserverFn`], an adapter turning a closure into one.
//!
//! ## Rules
//! - `on_event` may be called from several threads at once (parallel delivery,
//!   or concurrent `emit` calls on the same dispatcher).
//! - `on_event` may re-enter the dispatcher (`add`/`remove`/`emit`); the
//!   dispatcher never holds its lock while an observer runs.
//! - Handle errors internally. A panic is caught and logged by the dispatcher
//!   (see [`PanicPolicy`](crate::PanicPolicy) for the synchronous case).
//!
//! ## Identity
//! Observers are shared as [`ObserverRef`] (`Arc<dyn Observe<E>>`). Registration
//! identity is the `Arc` allocation: clones of the same `Arc` are the same
//! observer, two separate `Arc::new` calls are two observers.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use fanout::{Observe, ObserverRef};
//!
//! struct Counter(AtomicUsize);
//!
//! impl Observe<String> for Counter {
//!     fn on_event(&self, _event: &String) {
//!         self.0.fetch_add(1, Ordering::Relaxed);
//!     }
//!
//!     fn name(&self) -> &'static str { "counter" }
//! }
//!
//! let obs: ObserverRef<String> = Arc::new(Counter(AtomicUsize::new(0)));
//! obs.on_event(&"hello".to_string());
//! ```

use std::sync::Arc;

/// Shared handle to a registered observer.
pub type ObserverRef<E> = Arc<dyn Observe<E>>;

/// Contract for event observers.
///
/// ### Implementation requirements
/// - Must be safe to call concurrently and reentrantly.
/// - Should not panic; failures are the observer's own concern.
/// - Blocking is allowed, but it blocks a synchronous `emit` for its duration.
pub trait Observe<E>: Send + Sync + 'static {
    /// Handles a single event.
    ///
    /// # Parameters
    /// - `event`: Reference to the event (does not transfer ownership)
    fn on_event(&self, event: &E);

    /// Returns the observer name used in logs.
    ///
    /// The default uses `type_name::<Self>()`, which can be verbose - override it when possible.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Returns true if both handles point at the same observer allocation.
///
/// Vtable metadata is ignored: the same value seen through different trait
/// object pointers is still one observer.
#[inline]
pub(crate) fn same_observer<E>(a: &ObserverRef<E>, b: &ObserverRef<E>) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

/// Function-backed observer.
///
/// Wraps a closure `Fn(&E)` with a name. Each [`ObserverFn::arc`] call creates a
/// new allocation and therefore a new identity.
///
/// # Example
/// ```rust
/// use fanout::{ObserverFn, ObserverRef};
///
/// let printer: ObserverRef<u32> = ObserverFn::arc("printer", |n: &u32| println!("got {n}"));
/// assert_eq!(printer.name(), "printer");
/// ```
pub struct ObserverFn<F> {
    name: &'static str,
    f: F,
}

impl<F> ObserverFn<F> {
    /// Creates a new function observer with the given name.
    pub fn new(name: &'static str, f: F) -> Self {
        Self { name, f }
    }

    /// Creates the observer and returns it as an [`ObserverRef`].
    pub fn arc<E>(name: &'static str, f: F) -> ObserverRef<E>
    where
        F: Fn(&E) + Send + Sync + 'static,
        E: 'static,
    {
        Arc::new(Self::new(name, f))
    }
}

impl<E, F> Observe<E> for ObserverFn<F>
where
    F: Fn(&E) + Send + Sync + 'static,
    E: 'static,
{
    fn on_event(&self, event: &E) {
        (self.f)(event)
    }

    fn name(&self) -> &'static str {
        self.name
    }
}
