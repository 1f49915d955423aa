//! Trade event record
//!
//! A trade is produced by the book at match time and passed by value down
//! the dispatch path; it lives only long enough to be observed, queued, and
//! written.

use crate::ids::OrderId;
use crate::numeric::Price;
use std::time::Instant;

/// An executed cross between a resting order and the aggressor.
#[derive(Debug, Clone)]
pub struct Trade {
    pub buy_order_id: OrderId,
    pub sell_order_id: OrderId,
    /// Execution price: the resting counter-party's limit
    pub price: Price,
    pub quantity: u32,
    /// Monotonic stamp taken at match time
    pub executed_at: Instant,
}

impl Trade {
    /// Create a trade, stamping the execution time
    pub fn new(buy_order_id: OrderId, sell_order_id: OrderId, price: Price, quantity: u32) -> Self {
        Self {
            buy_order_id,
            sell_order_id,
            price,
            quantity,
            executed_at: Instant::now(),
        }
    }
}
