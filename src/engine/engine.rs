//! Engine construction and its inspection surface.

use super::book::OrderBook;
use super::config::EnginePolicy;

/// The engine: an order book plus the crossing loop that resolves it.
///
/// All methods take `&self`; a single engine instance is meant to be shared across
/// producer threads (typically behind an `Arc`).
pub struct MatchingEngine {
    pub(super) book: OrderBook,
    pub(super) policy: EnginePolicy,
}

impl MatchingEngine {
    /// Create an engine with default policy caps.
    pub fn new() -> MatchingEngine {
        MatchingEngine::with_policy(EnginePolicy::default())
    }

    /// Create an engine whose loops run under the given policy caps.
    pub fn with_policy(policy: EnginePolicy) -> MatchingEngine {
        MatchingEngine {
            book: OrderBook::with_policy(policy),
            policy,
        }
    }

    /// The engine's book, for inspection.
    pub fn book(&self) -> &OrderBook {
        &self.book
    }

    /// The policy caps this engine runs under.
    pub fn policy(&self) -> EnginePolicy {
        self.policy
    }
}

impl Default for MatchingEngine {
    fn default() -> Self {
        MatchingEngine::new()
    }
}
