//! A walkthrough of the engine's behavior on a single symbol.

use matchbook_rs::{MatchingEngine, Side, setup_logger};
use tracing::info;

fn main() {
    setup_logger();
    info!("Basic matching walkthrough");
    info!("--------------------------");

    let engine = MatchingEngine::new();

    // Build a small book.
    engine.admit(Side::Buy, "ACME", 100, 150.0);
    engine.admit(Side::Buy, "ACME", 200, 152.0);
    engine.admit(Side::Buy, "ACME", 150, 151.0);
    engine.admit(Side::Sell, "ACME", 100, 155.0);
    engine.admit(Side::Sell, "ACME", 50, 154.0);
    print_book(&engine, "after resting orders");

    // A marketable sell sweeps the best bids.
    engine.admit(Side::Sell, "ACME", 250, 150.5);
    print_book(&engine, "after a 250-lot sell at 150.5");

    // A marketable buy lifts the best ask.
    engine.admit(Side::Buy, "ACME", 50, 154.0);
    print_book(&engine, "after a 50-lot buy at 154.0");
}

fn print_book(engine: &MatchingEngine, label: &str) {
    let snapshot = engine.book().snapshot("ACME");
    info!("Book {}:", label);
    for bid in &snapshot.bids {
        info!("  bid  {}", bid);
    }
    for ask in &snapshot.asks {
        info!("  ask  {}", ask);
    }
    info!(
        "  spread: {:?}, mid: {:?}",
        engine.book().spread("ACME"),
        engine.book().mid_price("ACME")
    );
}
