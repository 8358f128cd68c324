//! Supporting utilities: symbol hashing, wall-clock time, and logger setup.

mod hash;
mod logging;
mod tests;
mod time;

pub use hash::ticker_slot;
pub use logging::setup_logger;
pub use time::current_time_millis;
