//! Process bootstrap
//!
//! Wires the pipeline together: trade logger, matching engine with its
//! dispatch callback, TCP intake, periodic stats dump, and the interactive
//! console on the main thread. Shutdown order matters: intake first, then
//! the engine (draining accepted orders), then the logger (draining queued
//! trades).

use anyhow::Context;
use matching_engine::Engine;
use server::{console, stats, OrderParser, TcpFrontEnd};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use trade_log::TradeLogger;
use tracing::info;
use types::trade::Trade;

const TRADE_LOG_PATH: &str = "trades.csv";
const STATS_INTERVAL: Duration = Duration::from_secs(10);
const SHUTDOWN_POLL_INTERVAL: Duration = Duration::from_millis(100);

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let port: u16 = match std::env::args().nth(1) {
        Some(arg) => arg.parse().context("invalid port argument")?,
        None => 8080,
    };

    let mut logger =
        TradeLogger::create(TRADE_LOG_PATH).context("failed to open the trade log")?;
    let log = logger.handle();

    let mut engine = Engine::start(move |trade: &Trade| {
        log.log_trade(trade);
        println!(
            "TRADE: Buy Order {} matched with Sell Order {} at price {} for quantity {}",
            trade.buy_order_id, trade.sell_order_id, trade.price, trade.quantity
        );
    });

    let parser = Arc::new(OrderParser::new());
    let mut tcp = TcpFrontEnd::start(("0.0.0.0", port), Arc::clone(&parser), engine.producer())
        .context("failed to bind the TCP intake port")?;

    println!("Ultra-Low Latency Order Book Engine Starting...");
    println!("Server listening on port {port}");

    let running = Arc::new(AtomicBool::new(true));
    let stats_thread = spawn_stats_thread(&engine, &running);

    // The console owns the main thread until the operator quits.
    console::run(&parser, &engine.producer(), &engine.monitor());

    info!("shutting down");
    running.store(false, Ordering::Release);
    tcp.stop();
    engine.stop();
    logger.stop();
    if stats_thread.join().is_err() {
        info!("stats thread panicked during shutdown");
    }

    stats::print(&engine.monitor());
    Ok(())
}

/// Print the statistics block every interval until shutdown.
fn spawn_stats_thread(
    engine: &matching_engine::EngineHandle,
    running: &Arc<AtomicBool>,
) -> thread::JoinHandle<()> {
    let monitor = engine.monitor();
    let running = Arc::clone(running);

    thread::spawn(move || {
        let mut last_dump = Instant::now();
        while running.load(Ordering::Acquire) {
            thread::sleep(SHUTDOWN_POLL_INTERVAL);
            if last_dump.elapsed() >= STATS_INTERVAL {
                stats::print(&monitor);
                last_dump = Instant::now();
            }
        }
    })
}
