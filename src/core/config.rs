//! # Mediator configuration.
//!
//! Provides [`Config`], the settings consumed by
//! [`MediatorBuilder`](crate::MediatorBuilder).
//!
//! ## Sentinel values
//! - `delta_depth_limit = 0` → treated as 1 (a queue mutation always records
//!   its delta; only the *re-broadcast* nesting is capped, and a cap below 1
//!   would suppress delta broadcasts entirely).

/// Configuration for a mediator instance.
///
/// ## Field semantics
/// - `delta_depth_limit`: maximum nesting depth of `__mediator.delta`
///   broadcasts (min 1; clamped by the builder accessor). When a delta
///   listener synchronously mutates a queue, that mutation fires another
///   delta broadcast; once the in-flight delta count reaches this limit,
///   further delta broadcasts are skipped (the delta slot is still updated).
///
/// ## Notes
/// The limit counts **in-flight** delta broadcasts on the whole mediator,
/// not per thread. Under the intended single-threaded use this is exactly
/// the recursion depth; concurrent mutators on separate threads share the
/// budget, which only ever errs toward skipping a re-broadcast.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Maximum nesting depth for delta re-broadcasts.
    ///
    /// - `0` or `1` = a mutation performed *inside* a delta listener does not
    ///   fire another delta broadcast
    /// - `n > 1` = delta listeners may cascade mutations `n - 1` levels deep
    pub delta_depth_limit: usize,
}

impl Config {
    /// Returns the delta depth limit clamped to a minimum of 1.
    ///
    /// The mediator uses this value so a zero limit cannot disable delta
    /// broadcasts for ordinary (non-nested) mutations.
    #[inline]
    pub fn delta_depth_clamped(&self) -> usize {
        self.delta_depth_limit.max(1)
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `delta_depth_limit = 8` (delta listeners may cascade a few mutations,
    ///   runaway recursion is cut off)
    fn default() -> Self {
        Self {
            delta_depth_limit: 8,
        }
    }
}
