//! `test-parse-counter`-gated instrumentation. Lets integration tests assert
//! that a given input actually drove the speculative-parse machinery rather
//! than coincidentally taking a fast path.

#[cfg(feature = "test-parse-counter")]
use std::sync::atomic::{AtomicU64, Ordering};

#[cfg(feature = "test-parse-counter")]
static SPECULATIVE_ATTEMPTS: AtomicU64 = AtomicU64::new(0);
#[cfg(feature = "test-parse-counter")]
static BACKTRACKS: AtomicU64 = AtomicU64::new(0);

/// Records that the parser entered a speculative sub-parse (a save point was
/// taken). No-op unless `test-parse-counter` is enabled.
#[inline]
pub fn record_speculative_attempt() {
    #[cfg(feature = "test-parse-counter")]
    SPECULATIVE_ATTEMPTS.fetch_add(1, Ordering::Relaxed);
}

/// Records that a speculative sub-parse was rolled back. No-op unless
/// `test-parse-counter` is enabled.
#[inline]
pub fn record_backtrack() {
    #[cfg(feature = "test-parse-counter")]
    BACKTRACKS.fetch_add(1, Ordering::Relaxed);
}

#[cfg(feature = "test-parse-counter")]
pub fn speculative_attempts() -> u64 {
    SPECULATIVE_ATTEMPTS.load(Ordering::Relaxed)
}

#[cfg(feature = "test-parse-counter")]
pub fn backtracks() -> u64 {
    BACKTRACKS.load(Ordering::Relaxed)
}

#[cfg(feature = "test-parse-counter")]
pub fn reset() {
    SPECULATIVE_ATTEMPTS.store(0, Ordering::Relaxed);
    BACKTRACKS.store(0, Ordering::Relaxed);
}
