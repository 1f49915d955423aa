//! Submission channel
//!
//! Multi-producer, single-consumer handoff between front ends and the
//! matching worker. FIFO across all producers. Producers get a cheap
//! cloneable handle; the worker owns the sole receiver and drains the
//! queue in batches so one wakeup amortizes over a burst.

use crossbeam_channel::{unbounded, Receiver, Sender};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use types::errors::SubmitError;
use types::order::Order;

enum Envelope {
    Order(Order),
    Shutdown,
}

/// Producer handle: validates and enqueues orders. Clone freely.
#[derive(Clone)]
pub struct SubmissionQueue {
    tx: Sender<Envelope>,
    closed: Arc<AtomicBool>,
}

/// Consumer end, held by the matching worker only.
pub struct SubmissionReceiver {
    rx: Receiver<Envelope>,
    shutdown: bool,
}

/// Create a connected submission queue pair.
pub fn submission_queue() -> (SubmissionQueue, SubmissionReceiver) {
    let (tx, rx) = unbounded();
    (
        SubmissionQueue {
            tx,
            closed: Arc::new(AtomicBool::new(false)),
        },
        SubmissionReceiver {
            rx,
            shutdown: false,
        },
    )
}

impl SubmissionQueue {
    /// Validate and enqueue an order for matching.
    ///
    /// Fails with `Rejected` for a zero quantity or non-positive price, and
    /// with `ShuttingDown` once `close` has been called.
    pub fn submit(&self, order: Order) -> Result<(), SubmitError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(SubmitError::ShuttingDown);
        }
        order.validate()?;
        self.tx
            .send(Envelope::Order(order))
            .map_err(|_| SubmitError::ShuttingDown)
    }

    /// Signal shutdown. Subsequent submissions fail; orders already queued
    /// are still delivered to the consumer.
    pub fn close(&self) {
        if !self.closed.swap(true, Ordering::AcqRel) {
            let _ = self.tx.send(Envelope::Shutdown);
        }
    }

    /// Whether shutdown has been signaled
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}

impl SubmissionReceiver {
    /// Block until at least one order is available, then drain everything
    /// currently queued.
    ///
    /// After shutdown is observed this stops blocking: it returns whatever
    /// remains in the queue, then empty batches.
    pub fn recv_all(&mut self) -> Vec<Order> {
        let mut batch = Vec::new();

        if !self.shutdown {
            match self.rx.recv() {
                Ok(Envelope::Order(order)) => batch.push(order),
                Ok(Envelope::Shutdown) | Err(_) => self.shutdown = true,
            }
        }

        loop {
            match self.rx.try_recv() {
                Ok(Envelope::Order(order)) => batch.push(order),
                Ok(Envelope::Shutdown) => self.shutdown = true,
                Err(_) => break,
            }
        }

        batch
    }

    /// Whether shutdown has been observed on this end
    pub fn is_closed(&self) -> bool {
        self.shutdown
    }
}
