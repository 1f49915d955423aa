//! Statistics dump
//!
//! Human-facing summary of the engine counters, printed on demand from the
//! console and periodically by the background stats thread. Each counter is
//! individually coherent; the block as a whole is not a transactional
//! snapshot.

use matching_engine::EngineMonitor;
use std::fmt::Write;
use types::order::Side;

/// Render the statistics block
pub fn render(monitor: &EngineMonitor) -> String {
    let latency = monitor.latency();

    let mut out = String::new();
    let _ = writeln!(out, "\n=== ORDER BOOK STATISTICS ===");
    let _ = writeln!(out, "Total Orders Processed: {}", latency.total_orders);
    let _ = writeln!(out, "Total Trades Executed: {}", monitor.trades_executed());
    let _ = writeln!(out, "Average Latency: {:.2}µs", latency.avg_us());
    let _ = writeln!(out, "Min Latency: {:.2}µs", latency.min_us());
    let _ = writeln!(out, "Max Latency: {:.2}µs", latency.max_us());
    let _ = writeln!(out, "Active Buy Orders: {}", monitor.depth(Side::Buy));
    let _ = writeln!(out, "Active Sell Orders: {}", monitor.depth(Side::Sell));
    let _ = writeln!(out, "=============================");
    out
}

/// Print the statistics block to stdout
pub fn print(monitor: &EngineMonitor) {
    print!("{}", render(monitor));
}

#[cfg(test)]
mod tests {
    use super::*;
    use matching_engine::Engine;
    use types::ids::OrderId;
    use types::numeric::Price;
    use types::order::Order;
    use types::trade::Trade;

    #[test]
    fn test_render_reflects_engine_state() {
        let mut engine = Engine::start(|_: &Trade| {});
        engine
            .submit(Order::new(
                OrderId::new(1),
                Side::Buy,
                Price::from_units(100),
                10,
            ))
            .unwrap();
        engine
            .submit(Order::new(
                OrderId::new(2),
                Side::Sell,
                Price::from_units(100),
                10,
            ))
            .unwrap();
        let monitor = engine.monitor();
        engine.stop();

        let block = render(&monitor);
        assert!(block.contains("Total Orders Processed: 2"));
        assert!(block.contains("Total Trades Executed: 1"));
        assert!(block.contains("Active Buy Orders: 0"));
        assert!(block.contains("Active Sell Orders: 0"));
        assert!(block.contains("µs"));
    }

    #[test]
    fn test_render_with_no_orders() {
        let mut engine = Engine::start(|_: &Trade| {});
        let monitor = engine.monitor();
        engine.stop();

        let block = render(&monitor);
        assert!(block.contains("Total Orders Processed: 0"));
        assert!(block.contains("Average Latency: 0.00µs"));
        assert!(block.contains("Min Latency: 0.00µs"));
    }
}
