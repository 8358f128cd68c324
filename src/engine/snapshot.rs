//! Point-in-time copies of book state for inspection and market-data-style export.
//!
//! The engine emits no trade records; observers that need fills diff these snapshots
//! across admissions. The integration tests do exactly that.

use super::order::{Order, Side};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::trace;

/// A copy of one resting order at the moment it was observed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSnapshot {
    /// Side of the book the order rests on
    pub side: Side,

    /// Ticker symbol the order was admitted under
    pub symbol: String,

    /// Limit price
    pub price: f64,

    /// Residual quantity at observation time
    pub quantity: i32,
}

impl OrderSnapshot {
    pub(crate) fn capture(order: &Order) -> OrderSnapshot {
        OrderSnapshot {
            side: order.side(),
            symbol: order.symbol().to_string(),
            price: order.price(),
            quantity: order.quantity(),
        }
    }
}

impl fmt::Display for OrderSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} qty={} price={:.2}",
            self.side, self.symbol, self.quantity, self.price
        )
    }
}

/// A snapshot of both sides of one symbol's book.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookSnapshot {
    /// The symbol this snapshot was taken for
    pub symbol: String,

    /// Milliseconds since the UNIX epoch at capture time
    pub timestamp: u64,

    /// Resting bids, best (highest) price first
    pub bids: Vec<OrderSnapshot>,

    /// Resting asks, best (lowest) price first
    pub asks: Vec<OrderSnapshot>,
}

impl BookSnapshot {
    /// Best bid price and quantity, if any.
    pub fn best_bid(&self) -> Option<(f64, i32)> {
        let bid = self.bids.first().map(|order| (order.price, order.quantity));
        trace!("best_bid: {:?}", bid);
        bid
    }

    /// Best ask price and quantity, if any.
    pub fn best_ask(&self) -> Option<(f64, i32)> {
        let ask = self.asks.first().map(|order| (order.price, order.quantity));
        trace!("best_ask: {:?}", ask);
        ask
    }

    /// Total resting bid quantity.
    pub fn bid_quantity(&self) -> i64 {
        self.bids.iter().map(|order| i64::from(order.quantity)).sum()
    }

    /// Total resting ask quantity.
    pub fn ask_quantity(&self) -> i64 {
        self.asks.iter().map(|order| i64::from(order.quantity)).sum()
    }
}
