//! TCP line server
//!
//! Accepts connections on a configured port and treats every received line
//! as one order submission. Each client gets its own native thread; all of
//! them funnel into the same submission queue, which serializes the actual
//! matching. Accepted orders are acknowledged per line.

use matching_engine::SubmissionQueue;
use std::io::{BufRead, BufReader, Write};
use std::net::{SocketAddr, TcpListener, TcpStream, ToSocketAddrs};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::parser::OrderParser;

const ACCEPT_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Listening TCP front end feeding the submission queue.
pub struct TcpFrontEnd {
    local_addr: SocketAddr,
    running: Arc<AtomicBool>,
    acceptor: Option<JoinHandle<()>>,
}

impl TcpFrontEnd {
    /// Bind and start accepting clients. Pass port 0 to let the OS pick.
    pub fn start(
        addr: impl ToSocketAddrs,
        parser: Arc<OrderParser>,
        queue: SubmissionQueue,
    ) -> std::io::Result<Self> {
        let listener = TcpListener::bind(addr)?;
        listener.set_nonblocking(true)?;
        let local_addr = listener.local_addr()?;
        let running = Arc::new(AtomicBool::new(true));

        let accept_running = Arc::clone(&running);
        let acceptor = thread::spawn(move || {
            accept_loop(&listener, &accept_running, &parser, &queue);
        });

        info!(%local_addr, "TCP order intake listening");
        Ok(Self {
            local_addr,
            running,
            acceptor: Some(acceptor),
        })
    }

    /// The bound address (useful when started on port 0)
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Stop accepting new connections and join the acceptor thread.
    ///
    /// Client threads already running finish on their own when the peer
    /// disconnects or the queue shuts down.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::Release);
        if let Some(acceptor) = self.acceptor.take() {
            let _ = acceptor.join();
        }
    }
}

impl Drop for TcpFrontEnd {
    fn drop(&mut self) {
        self.stop();
    }
}

fn accept_loop(
    listener: &TcpListener,
    running: &AtomicBool,
    parser: &Arc<OrderParser>,
    queue: &SubmissionQueue,
) {
    while running.load(Ordering::Acquire) {
        match listener.accept() {
            Ok((stream, peer)) => {
                debug!(%peer, "client connected");
                let parser = Arc::clone(parser);
                let queue = queue.clone();
                thread::spawn(move || {
                    if let Err(e) = handle_client(stream, &parser, &queue) {
                        debug!(%peer, error = %e, "client connection ended");
                    }
                });
            }
            Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                thread::sleep(ACCEPT_POLL_INTERVAL);
            }
            Err(e) => {
                warn!(error = %e, "accept failed");
                thread::sleep(ACCEPT_POLL_INTERVAL);
            }
        }
    }
}

fn handle_client(
    stream: TcpStream,
    parser: &OrderParser,
    queue: &SubmissionQueue,
) -> std::io::Result<()> {
    let mut writer = stream.try_clone()?;
    let reader = BufReader::new(stream);

    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match parser.parse_order(&line) {
            Ok(order) => match queue.submit(order) {
                Ok(()) => writer.write_all(b"ACK: Order received\n")?,
                Err(e) => {
                    writeln!(writer, "ERROR: {e}")?;
                    // Shutting down: no further submissions can succeed.
                    break;
                }
            },
            Err(e) => writeln!(writer, "ERROR: {e}")?,
        }
    }
    Ok(())
}
