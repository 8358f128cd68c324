//! Randomized multi-threaded workload against a shared engine, reporting throughput.

use matchbook_rs::{MatchingEngine, Side, setup_logger};
use rand::Rng;
use std::sync::Arc;
use std::thread;
use std::time::Instant;
use tracing::{debug, info};

// Simulation parameters
const TICKER_COUNT: usize = 100;
const ORDER_COUNT: usize = 100_000;
const THREAD_COUNT: usize = 8;

fn main() {
    setup_logger();
    info!("Starting trading simulation");
    info!(
        "Simulating {} orders over {} symbols on {} threads",
        ORDER_COUNT, TICKER_COUNT, THREAD_COUNT
    );

    let engine = Arc::new(MatchingEngine::new());
    let tickers: Arc<Vec<String>> = Arc::new(
        (0..TICKER_COUNT.min(1024))
            .map(|i| format!("STOCK{i}"))
            .collect(),
    );

    let start = Instant::now();

    let mut handles = Vec::with_capacity(THREAD_COUNT);
    for worker in 0..THREAD_COUNT {
        let engine = Arc::clone(&engine);
        let tickers = Arc::clone(&tickers);

        // Spread the order count evenly; early workers absorb the remainder.
        let orders = ORDER_COUNT / THREAD_COUNT + usize::from(worker < ORDER_COUNT % THREAD_COUNT);

        handles.push(thread::spawn(move || {
            let mut rng = rand::rng();
            for i in 0..orders {
                let side = if rng.random::<bool>() {
                    Side::Buy
                } else {
                    Side::Sell
                };
                let symbol = &tickers[rng.random_range(0..tickers.len())];
                let quantity = 100 * rng.random_range(1..=10); // 100-1000
                let price = 10.0 + rng.random::<f64>() * 90.0; // 10.0-100.0

                engine.admit(side, symbol, quantity, price);

                if i % 1000 == 0 {
                    debug!("worker {} submitted {} orders", worker, i);
                }
            }
        }));
    }

    for handle in handles {
        handle.join().expect("simulation worker panicked");
    }

    let seconds = start.elapsed().as_secs_f64();
    info!("Completed simulation of {} orders in {:.2} seconds", ORDER_COUNT, seconds);
    info!(
        "Average throughput: {:.0} orders/second",
        ORDER_COUNT as f64 / seconds
    );

    // A quick look at a few books after the dust settles.
    for symbol in ["STOCK0", "STOCK1", "STOCK2"] {
        engine.match_symbol(symbol);
        info!(
            "{}: best bid {:?}, best ask {:?}, resting {} / {}",
            symbol,
            engine.book().best_bid(symbol),
            engine.book().best_ask(symbol),
            engine.book().bids(symbol).len(),
            engine.book().asks(symbol).len(),
        );
    }
}
