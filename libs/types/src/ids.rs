//! Order identifiers
//!
//! Ids are plain 64-bit integers assigned by the producer (the parser hands
//! out a monotonically increasing counter). The matching core treats them as
//! opaque: it never generates one and never checks global uniqueness.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for an order, assigned at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(u64);

impl OrderId {
    /// Create an OrderId from a raw producer-assigned value
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw id value
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for OrderId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_id_roundtrip() {
        let id = OrderId::new(17);
        assert_eq!(id.as_u64(), 17);
        assert_eq!(id.to_string(), "17");
    }

    #[test]
    fn test_order_id_serialization() {
        let id = OrderId::new(42);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "42");

        let deserialized: OrderId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }

    #[test]
    fn test_order_id_ordering() {
        assert!(OrderId::new(1) < OrderId::new(2));
    }
}
