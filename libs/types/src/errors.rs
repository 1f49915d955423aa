//! Error taxonomy
//!
//! Validation errors surface to the producer; sink errors stay local to the
//! trade-log writer; invariant violations are fatal and never recovered by
//! skipping an order.

use crate::numeric::Price;
use thiserror::Error;

/// Rejection of an order at validation time. The book is left untouched.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderRejected {
    #[error("non-positive price: {0}")]
    InvalidPrice(Price),

    #[error("zero quantity")]
    InvalidQuantity,
}

/// Errors surfaced to producers by the submission path.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitError {
    #[error("order rejected: {0}")]
    Rejected(#[from] OrderRejected),

    #[error("engine is shutting down")]
    ShuttingDown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_display() {
        let err = OrderRejected::InvalidPrice(Price::from_cents(-100));
        assert_eq!(err.to_string(), "non-positive price: -1.00");
        assert_eq!(OrderRejected::InvalidQuantity.to_string(), "zero quantity");
    }

    #[test]
    fn test_submit_error_from_rejection() {
        let err: SubmitError = OrderRejected::InvalidQuantity.into();
        assert!(matches!(err, SubmitError::Rejected(_)));
        assert_eq!(err.to_string(), "order rejected: zero quantity");
    }

    #[test]
    fn test_shutting_down_display() {
        assert_eq!(
            SubmitError::ShuttingDown.to_string(),
            "engine is shutting down"
        );
    }
}
