//! Admission validation errors

use std::fmt;

/// Why an order was refused at admission.
///
/// Admission is the only fallible step in the engine; once an order is accepted every
/// subsequent operation is infallible at its signature. [`MatchingEngine::admit`] logs
/// these and returns, [`MatchingEngine::try_admit`] surfaces them to the caller.
///
/// [`MatchingEngine::admit`]: crate::MatchingEngine::admit
/// [`MatchingEngine::try_admit`]: crate::MatchingEngine::try_admit
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OrderRejected {
    /// Quantity was zero or negative.
    NonPositiveQuantity {
        /// The offending quantity
        quantity: i32,
    },

    /// Price was zero, negative, or NaN.
    NonPositivePrice {
        /// The offending price
        price: f64,
    },
}

impl fmt::Display for OrderRejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderRejected::NonPositiveQuantity { quantity } => {
                write!(f, "quantity must be positive, got {}", quantity)
            }
            OrderRejected::NonPositivePrice { price } => {
                write!(f, "price must be positive, got {}", price)
            }
        }
    }
}

impl std::error::Error for OrderRejected {}
