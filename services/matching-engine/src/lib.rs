//! Matching Engine
//!
//! Single-instrument continuous limit-order-book matching with price-time
//! priority. The book itself is plain single-threaded data; concurrency is
//! handled by serializing all submissions through an MPSC queue onto one
//! owner thread.
//!
//! **Key invariants:**
//! - Price-time priority strictly enforced
//! - The book is never crossed at rest
//! - Resting orders always have positive residual quantity
//! - Conservation of quantity across fills

pub mod book;
pub mod engine;
pub mod gauges;
pub mod latency;
pub mod matching;
pub mod submission;

pub use book::OrderBook;
pub use engine::{Engine, EngineHandle, EngineMonitor};
pub use gauges::BookGauges;
pub use latency::{LatencySnapshot, LatencyStats};
pub use submission::{submission_queue, SubmissionQueue, SubmissionReceiver};
