//! Order record and side
//!
//! An order is immutable on submission apart from its residual quantity,
//! which only the matching loop decrements. `submitted_at` is a monotonic
//! stamp taken at construction; it drives the trade-price tie-break and the
//! latency conversion in the trade log.

use crate::errors::OrderRejected;
use crate::ids::OrderId;
use crate::numeric::Price;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;
use tracing::error;

/// Order side (buyer or seller)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Buy order (bid)
    Buy,
    /// Sell order (ask)
    Sell,
}

impl Side {
    /// Get the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "buy"),
            Side::Sell => write!(f, "sell"),
        }
    }
}

// Wire input is case-insensitive ("buy"/"BUY"/"Buy" all accepted).
impl<'de> Deserialize<'de> for Side {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.to_ascii_lowercase().as_str() {
            "buy" => Ok(Side::Buy),
            "sell" => Ok(Side::Sell),
            other => Err(serde::de::Error::custom(format!(
                "invalid order side: {other}"
            ))),
        }
    }
}

/// A single limit order.
///
/// Ownership moves producer → submission queue → book; while resting, the
/// book is the sole owner and the sole mutator of `quantity`.
#[derive(Debug, Clone)]
pub struct Order {
    pub id: OrderId,
    pub side: Side,
    pub price: Price,
    /// Residual quantity; strictly positive while the order rests
    pub quantity: u32,
    /// Monotonic stamp taken at construction
    pub submitted_at: Instant,
}

impl Order {
    /// Create a new order, stamping the submission time
    pub fn new(id: OrderId, side: Side, price: Price, quantity: u32) -> Self {
        Self {
            id,
            side,
            price,
            quantity,
            submitted_at: Instant::now(),
        }
    }

    /// Validate submission constraints: positive price, non-zero quantity
    pub fn validate(&self) -> Result<(), OrderRejected> {
        if !self.price.is_positive() {
            return Err(OrderRejected::InvalidPrice(self.price));
        }
        if self.quantity == 0 {
            return Err(OrderRejected::InvalidQuantity);
        }
        Ok(())
    }

    /// Reduce the residual quantity by a fill.
    ///
    /// # Panics
    /// Panics if the fill exceeds the residual; the matching loop sizes
    /// fills with `min`, so this firing means the book is corrupt.
    pub fn fill(&mut self, quantity: u32) {
        if quantity > self.quantity {
            error!(
                order_id = %self.id,
                fill = quantity,
                residual = self.quantity,
                "fill exceeds residual quantity"
            );
        }
        assert!(
            quantity <= self.quantity,
            "fill {} exceeds residual {} on order {}",
            quantity,
            self.quantity,
            self.id
        );
        self.quantity -= quantity;
    }

    /// Whether the residual quantity reached zero
    pub fn is_filled(&self) -> bool {
        self.quantity == 0
    }
}
