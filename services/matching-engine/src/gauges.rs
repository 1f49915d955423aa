//! Cross-thread book gauges
//!
//! The book itself is owned by the matching worker and never locked.
//! Depth and best-price queries from other threads are instead served from
//! these atomic gauges, refreshed by the worker after every placement.
//! A price of zero means the side is empty (real prices are positive).

use std::sync::atomic::{AtomicI64, AtomicU64, AtomicUsize, Ordering};
use types::numeric::Price;
use types::order::Side;

use crate::book::OrderBook;

/// Atomic snapshot of the book published by the matching worker.
#[derive(Debug, Default)]
pub struct BookGauges {
    bid_orders: AtomicUsize,
    ask_orders: AtomicUsize,
    best_bid_cents: AtomicI64,
    best_ask_cents: AtomicI64,
    trades_executed: AtomicU64,
}

impl BookGauges {
    /// Create gauges for an empty book
    pub fn new() -> Self {
        Self::default()
    }

    /// Refresh from the book; called on the worker thread after placement
    pub fn refresh(&self, book: &OrderBook) {
        self.bid_orders
            .store(book.depth(Side::Buy), Ordering::Release);
        self.ask_orders
            .store(book.depth(Side::Sell), Ordering::Release);
        self.best_bid_cents.store(
            book.best_bid().map_or(0, |p| p.as_cents()),
            Ordering::Release,
        );
        self.best_ask_cents.store(
            book.best_ask().map_or(0, |p| p.as_cents()),
            Ordering::Release,
        );
    }

    /// Count trades emitted by a placement
    pub fn add_trades(&self, count: u64) {
        self.trades_executed.fetch_add(count, Ordering::Relaxed);
    }

    /// Resting orders on one side
    pub fn depth(&self, side: Side) -> usize {
        match side {
            Side::Buy => self.bid_orders.load(Ordering::Acquire),
            Side::Sell => self.ask_orders.load(Ordering::Acquire),
        }
    }

    /// Best bid as of the last refresh
    pub fn best_bid(&self) -> Option<Price> {
        price_from_cents(self.best_bid_cents.load(Ordering::Acquire))
    }

    /// Best ask as of the last refresh
    pub fn best_ask(&self) -> Option<Price> {
        price_from_cents(self.best_ask_cents.load(Ordering::Acquire))
    }

    /// Total trades executed since start
    pub fn trades_executed(&self) -> u64 {
        self.trades_executed.load(Ordering::Relaxed)
    }
}

fn price_from_cents(cents: i64) -> Option<Price> {
    if cents == 0 {
        None
    } else {
        Some(Price::from_cents(cents))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::ids::OrderId;
    use types::order::Order;

    #[test]
    fn test_empty_book_gauges() {
        let gauges = BookGauges::new();
        assert_eq!(gauges.depth(Side::Buy), 0);
        assert_eq!(gauges.best_bid(), None);
        assert_eq!(gauges.best_ask(), None);
        assert_eq!(gauges.trades_executed(), 0);
    }

    #[test]
    fn test_refresh_tracks_book() {
        let mut book = OrderBook::new();
        let gauges = BookGauges::new();

        book.place(Order::new(
            OrderId::new(1),
            Side::Buy,
            Price::from_cents(9900),
            10,
        ))
        .unwrap();
        book.place(Order::new(
            OrderId::new(2),
            Side::Sell,
            Price::from_cents(10100),
            5,
        ))
        .unwrap();
        gauges.refresh(&book);

        assert_eq!(gauges.depth(Side::Buy), 1);
        assert_eq!(gauges.depth(Side::Sell), 1);
        assert_eq!(gauges.best_bid(), Some(Price::from_cents(9900)));
        assert_eq!(gauges.best_ask(), Some(Price::from_cents(10100)));
    }

    #[test]
    fn test_trade_counter() {
        let gauges = BookGauges::new();
        gauges.add_trades(3);
        gauges.add_trades(2);
        assert_eq!(gauges.trades_executed(), 5);
    }
}
