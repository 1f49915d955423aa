//! Single-owner matching worker
//!
//! All book mutations happen on one thread: the worker blocks on the
//! submission queue, drains whatever has accumulated, and feeds each order
//! to the book in arrival order. Trades are handed to the dispatch callback
//! synchronously, before the order's latency is recorded, so the meter
//! covers the full matching cost.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;
use tracing::{error, info, warn};
use types::errors::SubmitError;
use types::numeric::Price;
use types::order::{Order, Side};
use types::trade::Trade;

use crate::book::OrderBook;
use crate::gauges::BookGauges;
use crate::latency::{LatencySnapshot, LatencyStats};
use crate::submission::{submission_queue, SubmissionQueue};

/// The matching engine entry point.
pub struct Engine;

impl Engine {
    /// Start the matching worker with the given trade dispatch callback.
    ///
    /// The callback slot is fixed here, before any order is processed; it
    /// runs on the worker thread and must not block in the common case.
    /// Compose observers (logging, printing, counting) inside one closure.
    pub fn start<F>(mut on_trade: F) -> EngineHandle
    where
        F: FnMut(&Trade) + Send + 'static,
    {
        let (queue, mut receiver) = submission_queue();
        let latency = Arc::new(LatencyStats::new());
        let gauges = Arc::new(BookGauges::new());

        let worker_latency = Arc::clone(&latency);
        let worker_gauges = Arc::clone(&gauges);

        let worker = thread::spawn(move || {
            let mut book = OrderBook::new();
            info!("matching worker started");

            loop {
                let batch = receiver.recv_all();
                if batch.is_empty() && receiver.is_closed() {
                    break;
                }

                for order in batch {
                    let order_id = order.id;
                    let started = Instant::now();

                    match book.place(order) {
                        Ok(trades) => {
                            for trade in &trades {
                                on_trade(trade);
                            }
                            worker_gauges.add_trades(trades.len() as u64);
                        }
                        Err(rejection) => {
                            warn!(%order_id, %rejection, "order rejected at placement");
                        }
                    }

                    worker_latency.record(started.elapsed());
                    worker_gauges.refresh(&book);
                }
            }

            info!(
                orders = worker_latency.snapshot().total_orders,
                trades = worker_gauges.trades_executed(),
                "matching worker stopped"
            );
        });

        EngineHandle {
            queue,
            monitor: EngineMonitor { latency, gauges },
            worker: Some(worker),
        }
    }
}

/// Read-only view of a running engine, served from atomic state the worker
/// maintains after each placement. Clone freely across threads.
#[derive(Clone)]
pub struct EngineMonitor {
    latency: Arc<LatencyStats>,
    gauges: Arc<BookGauges>,
}

impl EngineMonitor {
    /// Resting orders on one side, as of the last completed placement
    pub fn depth(&self, side: Side) -> usize {
        self.gauges.depth(side)
    }

    /// Best bid, as of the last completed placement
    pub fn best_bid(&self) -> Option<Price> {
        self.gauges.best_bid()
    }

    /// Best ask, as of the last completed placement
    pub fn best_ask(&self) -> Option<Price> {
        self.gauges.best_ask()
    }

    /// Latency meter snapshot
    pub fn latency(&self) -> LatencySnapshot {
        self.latency.snapshot()
    }

    /// Total trades executed since start
    pub fn trades_executed(&self) -> u64 {
        self.gauges.trades_executed()
    }
}

/// Handle to a running engine: submission, queries, lifecycle.
pub struct EngineHandle {
    queue: SubmissionQueue,
    monitor: EngineMonitor,
    worker: Option<JoinHandle<()>>,
}

impl EngineHandle {
    /// Enqueue an order for matching
    pub fn submit(&self, order: Order) -> Result<(), SubmitError> {
        self.queue.submit(order)
    }

    /// A cloneable submit-only handle for producer threads
    pub fn producer(&self) -> SubmissionQueue {
        self.queue.clone()
    }

    /// A cloneable read-only view for observer threads
    pub fn monitor(&self) -> EngineMonitor {
        self.monitor.clone()
    }

    /// Resting orders on one side, as of the last completed placement
    pub fn depth(&self, side: Side) -> usize {
        self.monitor.depth(side)
    }

    /// Best bid, as of the last completed placement
    pub fn best_bid(&self) -> Option<Price> {
        self.monitor.best_bid()
    }

    /// Best ask, as of the last completed placement
    pub fn best_ask(&self) -> Option<Price> {
        self.monitor.best_ask()
    }

    /// Latency meter snapshot
    pub fn latency(&self) -> LatencySnapshot {
        self.monitor.latency()
    }

    /// Total trades executed since start
    pub fn trades_executed(&self) -> u64 {
        self.monitor.trades_executed()
    }

    /// Close the submission queue, process every order already accepted,
    /// and join the worker. No in-flight order is dropped. Query methods
    /// stay usable afterwards; further submissions fail with `ShuttingDown`.
    pub fn stop(&mut self) {
        self.queue.close();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                error!("matching worker panicked");
            }
        }
    }
}
