//! Admission: validation, order construction, insertion, and the follow-up match sweep.

use crossbeam_epoch::{self as epoch, Owned};
use tracing::{debug, warn};

use super::engine::MatchingEngine;
use super::error::OrderRejected;
use super::order::{Order, Side};
use crate::utils::ticker_slot;

impl MatchingEngine {
    /// Submit an order. Invalid input (non-positive quantity or price, including NaN) is
    /// logged and dropped; the call itself never fails.
    pub fn admit(&self, side: Side, symbol: &str, quantity: i32, price: f64) {
        if let Err(rejected) = self.try_admit(side, symbol, quantity, price) {
            warn!(
                "rejected {} {} qty={} price={}: {}",
                side, symbol, quantity, price, rejected
            );
        }
    }

    /// Submit an order, surfacing validation failures to the caller.
    ///
    /// On `Ok` the order has been published into its side's list and one crossing sweep
    /// has run for its slot.
    pub fn try_admit(
        &self,
        side: Side,
        symbol: &str,
        quantity: i32,
        price: f64,
    ) -> Result<(), OrderRejected> {
        if quantity <= 0 {
            return Err(OrderRejected::NonPositiveQuantity { quantity });
        }
        if price.is_nan() || price <= 0.0 {
            return Err(OrderRejected::NonPositivePrice { price });
        }

        let order = Owned::new(Order::new(side, symbol, quantity, price));
        let index = ticker_slot(symbol);
        debug!("admitting {} into slot {}", *order, index);

        let list = match side {
            Side::Buy => self.book().bids_at(index),
            Side::Sell => self.book().asks_at(index),
        };
        {
            let guard = epoch::pin();
            list.insert(order, &guard);
        }

        self.match_slot(index);
        Ok(())
    }
}
