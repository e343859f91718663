//! Recursion-depth bookkeeping, bounding the parser against stack overflow
//! on pathologically nested input.

use std::cell::Cell;

use text_size::TextRange;

use crate::error::{ParseFailure, ParseFailureKind};

/// Caller-tunable knobs. `nova-cache` and `nova-build` expose small
/// `*Config` structs with `Default` impls for anything an embedder might
/// reasonably override rather than a bare constant; this crate follows
/// suit for `MAX_PARSE_DEPTH`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Maximum recursive-descent nesting depth before the parser fails
    /// deterministically rather than risk a native stack overflow.
    pub max_parse_depth: u32,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_parse_depth: 200,
        }
    }
}

/// Tracks current nesting depth against [`ParserConfig::max_parse_depth`].
/// Every recursive descent into a nested delimiter or expression production
/// increments this via [`DepthTracker::enter`]; the guard decrements on
/// drop. Uses a `Cell` rather than requiring `&mut self` so a parser can
/// hold a guard for an outer production while entering further guards for
/// nested ones without fighting the borrow checker over a single tracker.
#[derive(Debug)]
pub struct DepthTracker {
    current: Cell<u32>,
    max: u32,
}

impl DepthTracker {
    pub fn new(config: &ParserConfig) -> Self {
        Self {
            current: Cell::new(0),
            max: config.max_parse_depth,
        }
    }

    /// Enter one more level of nesting, failing if it would exceed the
    /// configured maximum. `range` is attached to the resulting
    /// [`ParseFailure`] so callers can point at the token that tripped it.
    pub fn enter(&self, range: TextRange) -> Result<DepthGuard<'_>, ParseFailure> {
        if self.current.get() >= self.max {
            tracing::debug!(
                target = "java_syntax.parser",
                max_depth = self.max,
                "depth guard tripped"
            );
            return Err(ParseFailure::new(
                ParseFailureKind::DepthExceeded {
                    max_depth: self.max,
                },
                range,
            ));
        }
        self.current.set(self.current.get() + 1);
        Ok(DepthGuard { tracker: self })
    }

    #[inline]
    pub fn current(&self) -> u32 {
        self.current.get()
    }
}

/// RAII token for one level of nesting; decrements [`DepthTracker::current`]
/// on drop regardless of whether the sub-production it guarded succeeded.
pub struct DepthGuard<'a> {
    tracker: &'a DepthTracker,
}

impl Drop for DepthGuard<'_> {
    fn drop(&mut self) {
        self.tracker.current.set(self.tracker.current.get() - 1);
    }
}
