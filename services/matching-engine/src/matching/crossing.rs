//! Crossing detection
//!
//! A bid and an ask can trade when the bid price is at or above the ask
//! price. The comparison is non-strict: exactly equal prices match.

use types::numeric::Price;

/// Check whether a bid and an ask cross at the given prices
pub fn can_match(bid_price: Price, ask_price: Price) -> bool {
    bid_price >= ask_price
}
