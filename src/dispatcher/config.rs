//! # Dispatcher configuration.
//!
//! Provides [`Config`] settings shared by both dispatchers.
//!
//! Config is used in two ways:
//! 1. **Synchronous delivery**: [`Config::panic_policy`] decides what a panicking
//!    observer does to the rest of the emission.
//! 2. **Parallel delivery**: [`Config::spawn_mode`] picks the tokio pool each
//!    observer runs on. Panics are always isolated there.

/// What a synchronous emission does when an observer panics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PanicPolicy {
    /// Catch the panic, log it, continue with the next observer.
    #[default]
    Isolate,
    /// Let the panic unwind out of `emit`; later observers are skipped.
    Propagate,
}

/// Where the parallel dispatcher runs each observer invocation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SpawnMode {
    /// `spawn_blocking`: observers may block without stalling runtime workers.
    #[default]
    Blocking,
    /// `spawn`: a regular task per observer; for short, non-blocking observers.
    Async,
}

/// Configuration for a dispatcher.
///
/// ## Field semantics
/// - `panic_policy`: synchronous dispatcher only
/// - `spawn_mode`: parallel dispatcher only
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Config {
    /// Panic handling during synchronous emission.
    pub panic_policy: PanicPolicy,

    /// Execution pool for parallel emission.
    pub spawn_mode: SpawnMode,
}

impl Config {
    /// Returns the config with the given panic policy.
    #[must_use]
    pub fn with_panic_policy(mut self, policy: PanicPolicy) -> Self {
        self.panic_policy = policy;
        self
    }

    /// Returns the config with the given spawn mode.
    #[must_use]
    pub fn with_spawn_mode(mut self, mode: SpawnMode) -> Self {
        self.spawn_mode = mode;
        self
    }

    /// True if synchronous delivery catches observer panics.
    #[inline]
    pub fn isolates_panics(&self) -> bool {
        matches!(self.panic_policy, PanicPolicy::Isolate)
    }
}
