//! The order record: immutable identity plus the atomic fields shared with other threads.

use crossbeam_epoch::{Atomic, Guard, Owned, Shared};
use crossbeam_utils::CachePadded;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicI32, AtomicU32, Ordering};

/// The side of the book an order rests on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// A bid. Resting bids are sorted by descending price.
    Buy,
    /// An ask. Resting asks are sorted by ascending price.
    Sell,
}

impl Side {
    /// Get the opposite side
    pub fn opposite(&self) -> Side {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }

    /// True if price `a` outranks price `b` on this side: higher wins for bids,
    /// lower wins for asks. Strict, so equal prices never outrank each other.
    pub(crate) fn outranks(&self, a: f64, b: f64) -> bool {
        match self {
            Side::Buy => a > b,
            Side::Sell => a < b,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

/// The mutable fields shared with other threads. Kept behind [`CachePadded`] so that the
/// quantity and link CAS traffic of one order never invalidates the cache line of a
/// neighboring allocation.
struct Hot {
    /// Residual quantity. Non-negative, monotonically non-increasing after creation.
    quantity: AtomicI32,

    /// Version counter, reserved for ABA mitigation. Initialized to 0.
    version: AtomicU32,

    /// Successor in the owning list, or null.
    next: Atomic<Order>,
}

/// A resting order. The identity fields (`side`, `symbol`, `price`) are immutable after
/// construction; `quantity` and `next` are mutated only through CAS once the order has been
/// published into a list.
pub(crate) struct Order {
    side: Side,
    symbol: String,
    price: f64,
    hot: CachePadded<Hot>,
}

impl Order {
    /// Construct a pre-publication order. The caller is responsible for validating that
    /// `quantity` and `price` are positive before the order is admitted.
    pub(crate) fn new(side: Side, symbol: &str, quantity: i32, price: f64) -> Order {
        Order {
            side,
            symbol: symbol.to_string(),
            price,
            hot: CachePadded::new(Hot {
                quantity: AtomicI32::new(quantity),
                version: AtomicU32::new(0),
                next: Atomic::null(),
            }),
        }
    }

    pub(crate) fn side(&self) -> Side {
        self.side
    }

    pub(crate) fn symbol(&self) -> &str {
        &self.symbol
    }

    pub(crate) fn price(&self) -> f64 {
        self.price
    }

    /// Current residual quantity.
    pub(crate) fn quantity(&self) -> i32 {
        self.hot.quantity.load(Ordering::Acquire)
    }

    /// Atomically lower the residual quantity from `expected` to `new_quantity`. Fails if
    /// another thread moved the quantity first.
    pub(crate) fn try_decrement(&self, expected: i32, new_quantity: i32) -> bool {
        debug_assert!(new_quantity >= 0 && new_quantity <= expected);
        self.hot
            .quantity
            .compare_exchange(expected, new_quantity, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Current version counter. Reserved for ABA mitigation.
    #[allow(dead_code)]
    pub(crate) fn version(&self) -> u32 {
        self.hot.version.load(Ordering::Acquire)
    }

    /// Bump the version counter if it matches `expected`. Reserved for ABA mitigation.
    #[allow(dead_code)]
    pub(crate) fn try_bump_version(&self, expected: u32) -> bool {
        self.hot
            .version
            .compare_exchange(expected, expected + 1, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub(crate) fn load_next<'g>(&self, guard: &'g Guard) -> Shared<'g, Order> {
        self.hot.next.load(Ordering::Acquire, guard)
    }

    /// Plain store of the successor link. Only legal while the order is still the inserting
    /// thread's private node, or to sever the link of a node already unlinked from its list.
    pub(crate) fn store_next(&self, next: Shared<'_, Order>, ord: Ordering) {
        self.hot.next.store(next, ord);
    }

    /// CAS the successor link from `current` to the not-yet-published `new` node. On failure
    /// the caller gets its node back for the next attempt.
    pub(crate) fn cas_next<'g>(
        &self,
        current: Shared<'g, Order>,
        new: Owned<Order>,
        guard: &'g Guard,
    ) -> Result<(), Owned<Order>> {
        self.hot
            .next
            .compare_exchange(current, new, Ordering::AcqRel, Ordering::Acquire, guard)
            .map(|_| ())
            .map_err(|err| err.new)
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Order{{{} {}, qty={}, price={:.2}}}",
            self.side,
            self.symbol,
            self.quantity(),
            self.price
        )
    }
}
