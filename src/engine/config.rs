//! Tunable bounds on the engine's optimistic loops.

/// Caps on the bounded CAS loops. Every hot-path operation in the engine retries a fixed
/// number of times rather than spinning forever; these knobs set those limits.
///
/// The defaults match the engine's reference workload and are a reasonable starting point
/// for most deployments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnginePolicy {
    /// Attempts the primary insertion loop makes before escalating to the fallback phase.
    /// Bounds admission latency on the common path.
    pub primary_retries: u32,

    /// Maximum predecessors an insertion traverses looking for its price position. Bounds
    /// positional accuracy: an order beyond the cap is spliced at the scan frontier.
    pub scan_limit: u32,

    /// Attempts the fallback phase makes (with widening scans and exponential backoff)
    /// before the insert is handed to the background inserter. Bounds the window between
    /// heavy contention and the ordering-relaxed hand-off.
    pub fallback_retries: u32,

    /// Iterations of the crossing loop per invocation. Bounds how much matching work a
    /// single admission performs; residual crossings are resolved by the next admission or
    /// an explicit match call.
    pub match_iterations: u32,
}

impl Default for EnginePolicy {
    fn default() -> Self {
        EnginePolicy {
            primary_retries: 10,
            scan_limit: 100,
            fallback_retries: 50,
            match_iterations: 100,
        }
    }
}
