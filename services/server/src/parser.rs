//! JSON order parser
//!
//! Turns one wire line `{"side":"buy","price":100.50,"quantity":10}` into a
//! validated `Order`. The parser owns id assignment: every accepted order
//! gets the next value of an atomic counter, so ids are unique per parser
//! instance. The matching core receives only already-validated records.

use rust_decimal::Decimal;
use serde::Deserialize;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;
use types::ids::OrderId;
use types::numeric::Price;
use types::order::{Order, Side};

/// Wire shape of an order submission.
#[derive(Debug, Clone, Deserialize)]
struct OrderRequest {
    side: Side,
    price: f64,
    quantity: u32,
}

/// Why a wire line was rejected.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("malformed order: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("invalid price: {0}")]
    InvalidPrice(f64),

    #[error("zero quantity")]
    InvalidQuantity,
}

/// Stateful parser handing out monotonically increasing order ids.
#[derive(Debug)]
pub struct OrderParser {
    next_order_id: AtomicU64,
}

impl OrderParser {
    /// Create a parser; ids start at 1
    pub fn new() -> Self {
        Self {
            next_order_id: AtomicU64::new(1),
        }
    }

    /// Parse and validate one wire line into an `Order`.
    ///
    /// The id counter only advances for accepted orders.
    pub fn parse_order(&self, line: &str) -> Result<Order, ParseError> {
        let request: OrderRequest = serde_json::from_str(line)?;

        let price = Decimal::try_from(request.price)
            .ok()
            .and_then(Price::try_from_decimal)
            .ok_or(ParseError::InvalidPrice(request.price))?;
        if request.quantity == 0 {
            return Err(ParseError::InvalidQuantity);
        }

        let id = OrderId::new(self.next_order_id.fetch_add(1, Ordering::Relaxed));
        Ok(Order::new(id, request.side, price, request.quantity))
    }
}

impl Default for OrderParser {
    fn default() -> Self {
        Self::new()
    }
}
