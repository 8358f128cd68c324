//! The slot table: a fixed array of per-symbol (bid, ask) list pairs.

use super::config::EnginePolicy;
use super::list::OrderList;
use super::order::Side;
use super::snapshot::BookSnapshot;
use crate::utils::{current_time_millis, ticker_slot};
use tracing::trace;

/// Number of symbol slots in a book. Symbols are mapped onto `[0, CAPACITY)` by
/// [`ticker_slot`]; distinct symbols that collide share a slot and therefore a book.
pub const CAPACITY: usize = 1024;

struct BookSlot {
    bids: OrderList,
    asks: OrderList,
}

/// The order book: one (bid list, ask list) pair per symbol slot.
///
/// The slot array is immutable after construction; all mutation happens inside the lists,
/// so every book operation is lock-free O(1) slot indexing.
pub struct OrderBook {
    slots: Box<[BookSlot]>,
}

impl OrderBook {
    /// Create a book with default policy caps.
    pub fn new() -> OrderBook {
        OrderBook::with_policy(EnginePolicy::default())
    }

    /// Create a book whose lists run under the given policy caps.
    pub fn with_policy(policy: EnginePolicy) -> OrderBook {
        let slots = (0..CAPACITY)
            .map(|_| BookSlot {
                bids: OrderList::new(Side::Buy, policy),
                asks: OrderList::new(Side::Sell, policy),
            })
            .collect();
        OrderBook { slots }
    }

    /// The bid list for a symbol.
    pub fn bids(&self, symbol: &str) -> &OrderList {
        self.bids_at(ticker_slot(symbol))
    }

    /// The ask list for a symbol.
    pub fn asks(&self, symbol: &str) -> &OrderList {
        self.asks_at(ticker_slot(symbol))
    }

    /// The bid list at a precomputed slot index. Hot-path variant of [`OrderBook::bids`].
    pub fn bids_at(&self, index: usize) -> &OrderList {
        &self.slots[index].bids
    }

    /// The ask list at a precomputed slot index. Hot-path variant of [`OrderBook::asks`].
    pub fn asks_at(&self, index: usize) -> &OrderList {
        &self.slots[index].asks
    }

    /// Best (highest) resting bid price, if any. O(1): the head is best by construction.
    pub fn best_bid(&self, symbol: &str) -> Option<f64> {
        self.bids(symbol).peek().map(|order| order.price)
    }

    /// Best (lowest) resting ask price, if any. O(1): the head is best by construction.
    pub fn best_ask(&self, symbol: &str) -> Option<f64> {
        self.asks(symbol).peek().map(|order| order.price)
    }

    /// The spread (best ask minus best bid), if both sides are populated. Negative while
    /// the book is crossed and matching has not yet caught up.
    pub fn spread(&self, symbol: &str) -> Option<f64> {
        match (self.best_bid(symbol), self.best_ask(symbol)) {
            (Some(bid), Some(ask)) => Some(ask - bid),
            _ => None,
        }
    }

    /// The mid price (average of best bid and best ask), if both sides are populated.
    pub fn mid_price(&self, symbol: &str) -> Option<f64> {
        match (self.best_bid(symbol), self.best_ask(symbol)) {
            (Some(bid), Some(ask)) => Some((bid + ask) / 2.0),
            _ => None,
        }
    }

    /// Point-in-time copy of both sides of a symbol's book.
    pub fn snapshot(&self, symbol: &str) -> BookSnapshot {
        trace!("snapshotting book for {}", symbol);
        BookSnapshot {
            symbol: symbol.to_string(),
            timestamp: current_time_millis(),
            bids: self.bids(symbol).orders(),
            asks: self.asks(symbol).orders(),
        }
    }
}

impl Default for OrderBook {
    fn default() -> Self {
        OrderBook::new()
    }
}
