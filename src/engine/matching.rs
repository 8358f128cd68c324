//! The head-of-book crossing loop.

use crossbeam_epoch as epoch;
use std::thread;
use tracing::trace;

use super::engine::MatchingEngine;
use crate::utils::ticker_slot;

impl MatchingEngine {
    /// Run the crossing loop for a symbol.
    pub fn match_symbol(&self, symbol: &str) {
        self.match_slot(ticker_slot(symbol));
    }

    /// Run the crossing loop for a precomputed slot index.
    ///
    /// Sweeps while the slot's book is crossed (best bid ≥ best ask), filling
    /// `min(bid_qty, ask_qty)` at each step, up to the policy's iteration cap. Residual
    /// crossings left by the cap are picked up by the next admission or the next explicit
    /// call.
    pub fn match_slot(&self, index: usize) {
        let bids = self.book.bids_at(index);
        let asks = self.book.asks_at(index);
        let guard = epoch::pin();

        for _ in 0..self.policy.match_iterations {
            let (Some(bid), Some(ask)) = (bids.head_ref(&guard), asks.head_ref(&guard)) else {
                break;
            };

            if bid.order().price() < ask.order().price() {
                break;
            }

            let bid_qty = bid.order().quantity();
            let ask_qty = ask.order().quantity();

            // Drained heads left behind by another thread's fill are unlinked here.
            if bid_qty == 0 || ask_qty == 0 {
                if bid_qty == 0 {
                    bids.remove_head_if(&bid, &guard);
                }
                if ask_qty == 0 {
                    asks.remove_head_if(&ask, &guard);
                }
                continue;
            }

            let fill = bid_qty.min(ask_qty);

            // The two decrements are independent CASes, not a transaction; a concurrent
            // reader may observe one side reduced before the other.
            let bid_filled = bid.order().try_decrement(bid_qty, bid_qty - fill);
            let ask_filled = ask.order().try_decrement(ask_qty, ask_qty - fill);

            if !bid_filled || !ask_filled {
                thread::yield_now();
                continue;
            }

            trace!(
                "slot {}: filled {} between bid @ {:.2} and ask @ {:.2}",
                index,
                fill,
                bid.order().price(),
                ask.order().price()
            );

            if bid_qty - fill == 0 {
                bids.remove_head_if(&bid, &guard);
            }
            if ask_qty - fill == 0 {
                asks.remove_head_if(&ask, &guard);
            }
        }
    }
}
