//! A lock-free singly-linked list of resting orders, sorted by price.
//!
//! Bid lists keep the highest price at the head, ask lists the lowest, so the head is
//! always the best-priced resting order on its side. Insertion and head removal are
//! coordinated purely through CAS; unlinked nodes are reclaimed with crossbeam's epoch
//! scheme so concurrent readers never observe freed memory.

use crossbeam_epoch::{self as epoch, Atomic, Guard, Owned, Shared};
use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::thread;
use std::time::Duration;
use tracing::{trace, warn};

use super::config::EnginePolicy;
use super::order::{Order, Side};
use super::snapshot::OrderSnapshot;

/// A borrowed view of a published order, valid for the lifetime of the epoch guard that
/// produced it. Carries the node identity needed for conditional head removal.
pub(crate) struct OrderRef<'g> {
    node: Shared<'g, Order>,
    order: &'g Order,
}

impl<'g> OrderRef<'g> {
    pub(crate) fn order(&self) -> &'g Order {
        self.order
    }
}

/// One side of a symbol slot's book.
///
/// The list core sits behind an `Arc` so the background inserter of last resort can keep
/// the list alive past the admitting call.
pub struct OrderList {
    shared: Arc<ListShared>,
}

struct ListShared {
    side: Side,
    policy: EnginePolicy,
    head: Atomic<Order>,
}

impl OrderList {
    pub(crate) fn new(side: Side, policy: EnginePolicy) -> OrderList {
        OrderList {
            shared: Arc::new(ListShared {
                side,
                policy,
                head: Atomic::null(),
            }),
        }
    }

    /// The side this list is sorted for.
    pub fn side(&self) -> Side {
        self.shared.side
    }

    /// Link a freshly constructed order into the list at its price position.
    ///
    /// Runs the bounded primary loop, escalates to the fallback phase under contention,
    /// and as a last resort hands the order to a detached background inserter so the
    /// caller returns regardless of contention.
    pub(crate) fn insert(&self, order: Owned<Order>, guard: &Guard) {
        let order = match self.shared.primary_insert(order, guard) {
            Ok(()) => return,
            Err(order) => order,
        };
        let order = match self.shared.fallback_insert(order, guard) {
            Ok(()) => return,
            Err(order) => order,
        };
        self.background_insert(order);
    }

    /// Hand a hard-contended insert to a detached thread that retries until it lands.
    ///
    /// The background path inserts at the head unconditionally, trading price ordering for
    /// guaranteed progress; the order becomes visible to matching as soon as it lands. The
    /// `Arc` around the list core keeps the list alive for as long as the thread runs.
    fn background_insert(&self, order: Owned<Order>) {
        warn!(
            "{} list under hard contention, handing {} to background inserter",
            self.shared.side, *order
        );
        let shared = Arc::clone(&self.shared);
        thread::spawn(move || shared.head_only_insert(order));
    }

    /// Snapshot of the best-priced resting order, if any.
    pub fn peek(&self) -> Option<OrderSnapshot> {
        let guard = epoch::pin();
        self.shared
            .head_ref(&guard)
            .map(|head| OrderSnapshot::capture(head.order()))
    }

    /// Pop the best-priced resting order. Retries its CAS until it wins or the list is
    /// observed empty.
    pub fn remove_head(&self) -> Option<OrderSnapshot> {
        let guard = epoch::pin();
        self.shared.remove_head(&guard)
    }

    /// True if no order is currently reachable from the head.
    pub fn is_empty(&self) -> bool {
        let guard = epoch::pin();
        self.shared.head.load(Ordering::Acquire, &guard).is_null()
    }

    /// Number of resting orders, by traversal. Under concurrent mutation this is a
    /// point-in-time estimate.
    pub fn len(&self) -> usize {
        let guard = epoch::pin();
        let mut count = 0;
        let mut cur = self.shared.head.load(Ordering::Acquire, &guard);
        while let Some(order) = unsafe { cur.as_ref() } {
            count += 1;
            cur = order.load_next(&guard);
        }
        count
    }

    /// Snapshots of every resting order in list order.
    pub fn orders(&self) -> Vec<OrderSnapshot> {
        let guard = epoch::pin();
        let mut out = Vec::new();
        let mut cur = self.shared.head.load(Ordering::Acquire, &guard);
        while let Some(order) = unsafe { cur.as_ref() } {
            out.push(OrderSnapshot::capture(order));
            cur = order.load_next(&guard);
        }
        out
    }

    /// Sum of residual quantities across the list, by traversal.
    pub fn total_quantity(&self) -> i64 {
        let guard = epoch::pin();
        let mut total = 0i64;
        let mut cur = self.shared.head.load(Ordering::Acquire, &guard);
        while let Some(order) = unsafe { cur.as_ref() } {
            total += i64::from(order.quantity());
            cur = order.load_next(&guard);
        }
        total
    }

    /// Drop every resting order. Test scaffolding only; not safe to interleave with
    /// concurrent inserts that are mid-traversal.
    pub fn clear(&self) {
        let guard = epoch::pin();
        let mut cur = self
            .shared
            .head
            .swap(Shared::null(), Ordering::AcqRel, &guard);
        while let Some(order) = unsafe { cur.as_ref() } {
            let next = order.load_next(&guard);
            unsafe { guard.defer_destroy(cur) };
            cur = next;
        }
    }

    pub(crate) fn head_ref<'g>(&self, guard: &'g Guard) -> Option<OrderRef<'g>> {
        self.shared.head_ref(guard)
    }

    /// Pop the head only if it is still the observed node. Used by the matcher so a
    /// drained order is unlinked exactly once.
    pub(crate) fn remove_head_if(&self, expected: &OrderRef<'_>, guard: &Guard) -> bool {
        self.shared.remove_head_if(expected, guard)
    }
}

impl ListShared {
    /// One pass of the insertion algorithm: empty-list CAS, better-than-head CAS, or a
    /// bounded walk to the first strictly-worse successor followed by a splice CAS. On any
    /// CAS failure the caller gets the node back for another pass.
    fn try_insert_once(
        &self,
        order: Owned<Order>,
        scan_limit: u32,
        guard: &Guard,
    ) -> Result<(), Owned<Order>> {
        let head = self.head.load(Ordering::Acquire, guard);

        if head.is_null() {
            order.store_next(Shared::null(), Ordering::Relaxed);
            return match self.head.compare_exchange(
                Shared::null(),
                order,
                Ordering::AcqRel,
                Ordering::Acquire,
                guard,
            ) {
                Ok(_) => Ok(()),
                Err(err) => Err(err.new),
            };
        }

        let head_order = unsafe { head.deref() };
        if self.side.outranks(order.price(), head_order.price()) {
            order.store_next(head, Ordering::Relaxed);
            return match self.head.compare_exchange(
                head,
                order,
                Ordering::AcqRel,
                Ordering::Acquire,
                guard,
            ) {
                Ok(_) => Ok(()),
                Err(err) => Err(err.new),
            };
        }

        // Walk to the first successor the new order outranks, bounded by the scan cap.
        let mut prev = head_order;
        let mut cur = head_order.load_next(guard);
        let mut scanned = 0;
        while scanned < scan_limit {
            let Some(cur_order) = (unsafe { cur.as_ref() }) else {
                break;
            };
            scanned += 1;
            if self.side.outranks(order.price(), cur_order.price()) {
                break;
            }
            prev = cur_order;
            cur = cur_order.load_next(guard);
        }

        order.store_next(cur, Ordering::Relaxed);
        prev.cas_next(cur, order, guard)
    }

    /// The bounded optimistic loop taken by every admission.
    fn primary_insert(&self, mut order: Owned<Order>, guard: &Guard) -> Result<(), Owned<Order>> {
        for _ in 0..self.policy.primary_retries {
            match self.try_insert_once(order, self.policy.scan_limit, guard) {
                Ok(()) => return Ok(()),
                Err(returned) => order = returned,
            }
        }
        Err(order)
    }

    /// Contention fallback: progressively longer scans, a scheduler yield between
    /// attempts, and an exponential spin backoff after each failure.
    fn fallback_insert(&self, mut order: Owned<Order>, guard: &Guard) -> Result<(), Owned<Order>> {
        trace!("{} list insert entering fallback phase", self.side);
        for attempt in 0..self.policy.fallback_retries {
            let scan_cap = 10 + 5 * attempt;
            match self.try_insert_once(order, scan_cap, guard) {
                Ok(()) => return Ok(()),
                Err(returned) => order = returned,
            }
            thread::yield_now();
            let spins = 1u32 << attempt.min(10);
            for _ in 0..spins {
                std::hint::spin_loop();
            }
        }
        Err(order)
    }

    /// Loop a head-only insert until it lands. Runs on the background inserter thread;
    /// the brief initial sleep lets the contention burst that stranded this order pass.
    fn head_only_insert(&self, mut order: Owned<Order>) {
        thread::sleep(Duration::from_millis(1));
        loop {
            let guard = epoch::pin();
            let head = self.head.load(Ordering::Acquire, &guard);
            order.store_next(head, Ordering::Relaxed);
            match self
                .head
                .compare_exchange(head, order, Ordering::AcqRel, Ordering::Acquire, &guard)
            {
                Ok(_) => return,
                Err(err) => {
                    order = err.new;
                    thread::yield_now();
                }
            }
        }
    }

    fn head_ref<'g>(&self, guard: &'g Guard) -> Option<OrderRef<'g>> {
        let node = self.head.load(Ordering::Acquire, guard);
        unsafe { node.as_ref() }.map(|order| OrderRef { node, order })
    }

    fn remove_head(&self, guard: &Guard) -> Option<OrderSnapshot> {
        loop {
            let head = self.head.load(Ordering::Acquire, guard);
            let head_order = unsafe { head.as_ref() }?;
            let next = head_order.load_next(guard);
            if self
                .head
                .compare_exchange(head, next, Ordering::AcqRel, Ordering::Acquire, guard)
                .is_ok()
            {
                let snapshot = OrderSnapshot::capture(head_order);
                trace!("removed {} head {}", self.side, head_order);
                // Sever the link so the unlinked node no longer pins its successors.
                head_order.store_next(Shared::null(), Ordering::Release);
                unsafe { guard.defer_destroy(head) };
                return Some(snapshot);
            }
        }
    }

    fn remove_head_if(&self, expected: &OrderRef<'_>, guard: &Guard) -> bool {
        let next = expected.order.load_next(guard);
        if self
            .head
            .compare_exchange(
                expected.node,
                next,
                Ordering::AcqRel,
                Ordering::Acquire,
                guard,
            )
            .is_ok()
        {
            expected.order.store_next(Shared::null(), Ordering::Release);
            unsafe { guard.defer_destroy(expected.node) };
            true
        } else {
            false
        }
    }
}

impl Drop for ListShared {
    fn drop(&mut self) {
        // Exclusive access at drop time, so the chain can be freed without pinning.
        unsafe {
            let guard = epoch::unprotected();
            let mut cur = self.head.load(Ordering::Relaxed, guard);
            while !cur.is_null() {
                let next = cur.deref().load_next(guard);
                drop(cur.into_owned());
                cur = next;
            }
        }
    }
}
