//! Order book with the matching loop
//!
//! `OrderBook` owns both sides and runs the continuous matching algorithm:
//! an incoming order is inserted into its side, then crosses are consumed
//! head-against-head until the spread reopens. The book performs no I/O and
//! never blocks; it is intended to live on a single owner thread.

pub mod ask_book;
pub mod bid_book;
pub mod price_level;

pub use ask_book::AskBook;
pub use bid_book::BidBook;
pub use price_level::PriceLevel;

use tracing::error;
use types::errors::OrderRejected;
use types::numeric::Price;
use types::order::{Order, Side};
use types::trade::Trade;

use crate::matching::crossing;

/// Single-instrument limit order book with price-time priority.
#[derive(Debug, Default)]
pub struct OrderBook {
    bids: BidBook,
    asks: AskBook,
}

impl OrderBook {
    /// Create a new empty order book
    pub fn new() -> Self {
        Self {
            bids: BidBook::new(),
            asks: AskBook::new(),
        }
    }

    /// Insert an order and run matching until the book is no longer crossed.
    ///
    /// Returns the trades produced by this placement, in match order. An
    /// order with zero quantity or non-positive price is rejected and the
    /// book is left untouched.
    pub fn place(&mut self, order: Order) -> Result<Vec<Trade>, OrderRejected> {
        order.validate()?;

        match order.side {
            Side::Buy => self.bids.insert(order),
            Side::Sell => self.asks.insert(order),
        }

        let trades = self.match_crosses();
        self.check_uncrossed();
        Ok(trades)
    }

    /// Consume head-against-head crosses until none remains.
    fn match_crosses(&mut self) -> Vec<Trade> {
        let mut trades = Vec::new();

        loop {
            let (Some(bid), Some(ask)) = (self.bids.front_mut(), self.asks.front_mut()) else {
                break;
            };
            if !crossing::can_match(bid.price, ask.price) {
                break;
            }

            let traded = bid.quantity.min(ask.quantity);
            // Execution price is the resting counter-party's limit: of the
            // two head orders, the one that arrived first was resting.
            let price = if bid.submitted_at <= ask.submitted_at {
                bid.price
            } else {
                ask.price
            };
            trades.push(Trade::new(bid.id, ask.id, price, traded));

            bid.fill(traded);
            ask.fill(traded);
            let bid_filled = bid.is_filled();
            let ask_filled = ask.is_filled();

            if bid_filled {
                self.bids.remove_front();
            }
            if ask_filled {
                self.asks.remove_front();
            }
        }

        trades
    }

    /// Fatal self-check: both sides non-empty implies an open spread.
    fn check_uncrossed(&self) {
        if let (Some(bid), Some(ask)) = (self.best_bid(), self.best_ask()) {
            if bid >= ask {
                error!(%bid, %ask, "book crossed at rest after matching");
                panic!("book crossed at rest: bid {bid} >= ask {ask}");
            }
        }
    }

    /// Highest resting bid price
    pub fn best_bid(&self) -> Option<Price> {
        self.bids.best_price()
    }

    /// Lowest resting ask price
    pub fn best_ask(&self) -> Option<Price> {
        self.asks.best_price()
    }

    /// Number of resting orders on one side
    pub fn depth(&self, side: Side) -> usize {
        match side {
            Side::Buy => self.bids.order_count(),
            Side::Sell => self.asks.order_count(),
        }
    }
}
