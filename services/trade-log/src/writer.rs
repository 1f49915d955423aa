//! Background trade log writer
//!
//! Owns the sink file and a dedicated thread. `log_trade` only enqueues;
//! the thread formats and appends one line per trade, flushing after each
//! so a crash loses at most the record being formatted. A failed append
//! drops that record, bumps a counter, and moves on: the log is lossy
//! under sink failure, the matching path never is.

use crossbeam_channel::{unbounded, Receiver, Sender};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{error, info, warn};
use types::trade::Trade;

use crate::clock::WallClock;

/// Header row written exactly once when the sink is opened.
pub const HEADER: &str = "timestamp,buy_order_id,sell_order_id,price,quantity";

enum Command {
    Write(Trade),
    Shutdown,
}

/// Handle to the background trade logger.
pub struct TradeLogger {
    tx: Sender<Command>,
    worker: Option<JoinHandle<()>>,
    dropped: Arc<AtomicU64>,
}

impl TradeLogger {
    /// Create the sink file, write the header, calibrate the clock, and
    /// start the writer thread.
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let mut sink = BufWriter::new(File::create(path)?);
        writeln!(sink, "{HEADER}")?;
        sink.flush()?;

        let clock = WallClock::calibrate();
        let (tx, rx) = unbounded();
        let dropped = Arc::new(AtomicU64::new(0));

        let worker_dropped = Arc::clone(&dropped);
        let worker = thread::spawn(move || run_writer(sink, rx, clock, &worker_dropped));

        info!(path = %path.display(), "trade log opened");
        Ok(Self {
            tx,
            worker: Some(worker),
            dropped,
        })
    }

    /// Queue a trade for appending; never blocks on I/O
    pub fn log_trade(&self, trade: &Trade) {
        if self.tx.send(Command::Write(trade.clone())).is_err() {
            self.dropped.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// A cloneable enqueue-only handle for dispatch callbacks
    pub fn handle(&self) -> LogHandle {
        LogHandle {
            tx: self.tx.clone(),
            dropped: Arc::clone(&self.dropped),
        }
    }

    /// Records lost to sink failures (or logging after stop)
    pub fn records_dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Drain the queue, flush, and close the sink
    pub fn stop(&mut self) {
        let _ = self.tx.send(Command::Shutdown);
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                error!("trade log writer panicked");
            }
        }
    }
}

impl Drop for TradeLogger {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Enqueue-only handle to the trade log, for use inside the trade dispatch
/// callback. Cloning is cheap; all clones feed the same writer thread.
#[derive(Clone)]
pub struct LogHandle {
    tx: Sender<Command>,
    dropped: Arc<AtomicU64>,
}

impl LogHandle {
    /// Queue a trade for appending; never blocks on I/O
    pub fn log_trade(&self, trade: &Trade) {
        if self.tx.send(Command::Write(trade.clone())).is_err() {
            self.dropped.fetch_add(1, Ordering::Relaxed);
        }
    }
}

fn run_writer(
    mut sink: BufWriter<File>,
    rx: Receiver<Command>,
    clock: WallClock,
    dropped: &AtomicU64,
) {
    loop {
        match rx.recv() {
            Ok(Command::Write(trade)) => append_line(&mut sink, &clock, &trade, dropped),
            Ok(Command::Shutdown) | Err(_) => break,
        }
    }

    // Anything still queued (sent concurrently with shutdown) is written out.
    while let Ok(Command::Write(trade)) = rx.try_recv() {
        append_line(&mut sink, &clock, &trade, dropped);
    }

    if let Err(e) = sink.flush() {
        warn!(error = %e, "trade log final flush failed");
    }
    info!("trade log closed");
}

fn append_line(sink: &mut BufWriter<File>, clock: &WallClock, trade: &Trade, dropped: &AtomicU64) {
    let result = writeln!(
        sink,
        "{},{},{},{},{}",
        clock.format_local(trade.executed_at),
        trade.buy_order_id,
        trade.sell_order_id,
        trade.price,
        trade.quantity
    )
    .and_then(|()| sink.flush());

    if let Err(e) = result {
        dropped.fetch_add(1, Ordering::Relaxed);
        warn!(error = %e, "trade log append failed; record dropped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::TempDir;
    use types::ids::OrderId;
    use types::numeric::Price;

    fn trade(buy: u64, sell: u64, cents: i64, qty: u32) -> Trade {
        Trade::new(OrderId::new(buy), OrderId::new(sell), Price::from_cents(cents), qty)
    }

    fn read_lines(path: &Path) -> Vec<String> {
        fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_header_written_once_on_open() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("trades.csv");

        let mut logger = TradeLogger::create(&path).unwrap();
        logger.stop();

        assert_eq!(read_lines(&path), vec![HEADER.to_string()]);
    }

    #[test]
    fn test_line_format() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("trades.csv");

        let mut logger = TradeLogger::create(&path).unwrap();
        logger.log_trade(&trade(17, 42, 10050, 5));
        logger.stop();

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);

        let fields: Vec<&str> = lines[1].split(',').collect();
        assert_eq!(fields.len(), 5);
        assert_eq!(fields[0].len(), 19); // YYYY-MM-DD HH:MM:SS
        assert_eq!(fields[1], "17");
        assert_eq!(fields[2], "42");
        assert_eq!(fields[3], "100.50");
        assert_eq!(fields[4], "5");
    }

    #[test]
    fn test_price_always_two_fractional_digits() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("trades.csv");

        let mut logger = TradeLogger::create(&path).unwrap();
        logger.log_trade(&trade(1, 2, 10000, 1)); // 100.00
        logger.log_trade(&trade(3, 4, 7, 1)); // 0.07
        logger.stop();

        let lines = read_lines(&path);
        assert!(lines[1].contains(",100.00,"));
        assert!(lines[2].contains(",0.07,"));
    }

    #[test]
    fn test_read_back_reproduces_trade_stream() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("trades.csv");

        let trades = vec![
            trade(1, 2, 10000, 5),
            trade(1, 3, 10000, 7),
            trade(4, 3, 9900, 2),
            trade(1, 2, 10000, 1),
        ];

        let mut logger = TradeLogger::create(&path).unwrap();
        for t in &trades {
            logger.log_trade(t);
        }
        logger.stop();

        // Tally quantity per (buy, sell) pair from the file and compare
        // against the in-memory stream.
        let mut logged: HashMap<(String, String), u64> = HashMap::new();
        for line in read_lines(&path).into_iter().skip(1) {
            let fields: Vec<String> = line.split(',').map(str::to_string).collect();
            *logged
                .entry((fields[1].clone(), fields[2].clone()))
                .or_default() += fields[4].parse::<u64>().unwrap();
        }

        let mut expected: HashMap<(String, String), u64> = HashMap::new();
        for t in &trades {
            *expected
                .entry((t.buy_order_id.to_string(), t.sell_order_id.to_string()))
                .or_default() += u64::from(t.quantity);
        }

        assert_eq!(logged, expected);
    }

    #[test]
    fn test_stop_drains_queue() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("trades.csv");

        let mut logger = TradeLogger::create(&path).unwrap();
        for i in 0..500u64 {
            logger.log_trade(&trade(i, i + 1, 10000, 1));
        }
        logger.stop();

        assert_eq!(read_lines(&path).len(), 501);
        assert_eq!(logger.records_dropped(), 0);
    }

    #[test]
    fn test_log_after_stop_counts_as_dropped() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("trades.csv");

        let mut logger = TradeLogger::create(&path).unwrap();
        logger.stop();

        logger.log_trade(&trade(1, 2, 10000, 1));
        assert_eq!(logger.records_dropped(), 1);
        assert_eq!(read_lines(&path).len(), 1);
    }
}
