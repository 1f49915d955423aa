//! Trade log
//!
//! Durable append-only record of executed trades in a CSV-shaped file.
//! Writing happens on a dedicated thread behind a queue so the matching
//! path never blocks on sink I/O; a slow sink grows the queue instead.

pub mod clock;
pub mod writer;

pub use clock::WallClock;
pub use writer::{LogHandle, TradeLogger, HEADER};
