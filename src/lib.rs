//! # Matchbook
//!
//! A lock-free, in-memory limit-order matching engine written in Rust. The crate accepts a
//! stream of buy and sell orders for a fixed universe of ticker symbols, maintains per-symbol
//! price-priority order books, and continuously matches crossing orders.
//!
//! ## Key Features
//!
//! - **Lock-Free Data Plane**: All shared state is mutated exclusively through atomic
//!   compare-and-swap operations. No mutex, condition variable, or blocking synchronizer
//!   appears on the hot path.
//!
//! - **Price-Priority Books**: Each symbol slot holds a bid list sorted by descending price
//!   and an ask list sorted by ascending price, so the best-priced resting order is always
//!   at the head. Relative order of equal-priced orders is unspecified.
//!
//! - **Bounded Admission**: Insertion runs a bounded optimistic CAS loop, escalates to a
//!   backoff fallback phase under contention, and finally hands off to a best-effort
//!   background inserter so the submitting thread never blocks indefinitely.
//!
//! - **Epoch-Based Reclamation**: Removed orders are reclaimed through crossbeam's epoch
//!   scheme, so readers may traverse the lists without coordinating with writers.
//!
//! - **Tunable Policy**: The retry, scan, and sweep caps that bound each operation are
//!   exposed as an [`EnginePolicy`] rather than buried as constants.
//!
//! ## Example
//!
//! ```
//! use matchbook_rs::{MatchingEngine, Side};
//!
//! let engine = MatchingEngine::new();
//! engine.admit(Side::Buy, "ACME", 100, 250.0);
//! engine.admit(Side::Sell, "ACME", 100, 245.0);
//!
//! // The orders crossed and both books are now empty.
//! assert!(engine.book().bids("ACME").is_empty());
//! assert!(engine.book().asks("ACME").is_empty());
//! ```
//!
//! ## Non-Goals
//!
//! The engine keeps no journal and speaks no wire protocol. Orders cannot be cancelled or
//! modified after submission, no trade records are emitted (observers recover fills by
//! diffing book snapshots across admissions), and distinct symbols hashing to the same slot
//! share a book.

mod engine;

mod utils;

pub use engine::{
    BookSnapshot, CAPACITY, EnginePolicy, MatchingEngine, OrderBook, OrderList, OrderRejected,
    OrderSnapshot, Side,
};
pub use utils::{current_time_millis, setup_logger, ticker_slot};
