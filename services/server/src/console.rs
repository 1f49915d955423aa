//! Interactive console
//!
//! Reads stdin line by line on the calling thread: `quit` exits, `stats`
//! prints the statistics block, anything else is treated as one JSON order.
//! Per-order feedback mirrors what the operator cares about at the prompt:
//! intake time and current book counts.

use matching_engine::{EngineMonitor, SubmissionQueue};
use std::io::{self, BufRead};
use std::time::Instant;
use types::order::Side;

use crate::parser::OrderParser;
use crate::stats;

/// Run the console loop until `quit`/`exit` or stdin closes.
pub fn run(parser: &OrderParser, queue: &SubmissionQueue, monitor: &EngineMonitor) {
    println!("Commands: 'quit', 'stats', or JSON orders");
    println!("Example: {{\"side\":\"buy\",\"price\":100.50,\"quantity\":10}}\n");

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        let input = line.trim();

        match input {
            "quit" | "exit" => break,
            "stats" => stats::print(monitor),
            "" => {}
            order_line => process_order_line(order_line, parser, queue, monitor),
        }
    }
}

fn process_order_line(
    line: &str,
    parser: &OrderParser,
    queue: &SubmissionQueue,
    monitor: &EngineMonitor,
) {
    let started = Instant::now();

    let outcome = parser
        .parse_order(line)
        .map_err(|e| e.to_string())
        .and_then(|order| queue.submit(order).map_err(|e| e.to_string()));
    let elapsed = started.elapsed();

    match outcome {
        Ok(()) => println!(
            "Input processing: {}µs | Buy orders: {} | Sell orders: {}",
            elapsed.as_micros(),
            monitor.depth(Side::Buy),
            monitor.depth(Side::Sell),
        ),
        Err(reason) => println!("Error: {reason}"),
    }
}
