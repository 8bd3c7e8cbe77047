//! # One-Shot Exchange API
//!
//! Purpose: Expose a compact, blocking API for sending one command to the
//! transaction server and capturing its single reply.
//!
//! ## Design Principles
//! 1. **Facade Pattern**: `Exchanger` hides connection and framing details.
//! 2. **Scoped Connections**: Each call owns a fresh `TcpStream` that drops
//!    on every exit path, success or failure.
//! 3. **Fail Fast**: Transport failures surface immediately as one of the
//!    typed variants below, never as a retry.
//! 4. **Bounded Waits**: Connect and read are both capped by a timeout so an
//!    unresponsive peer cannot block the caller indefinitely.

use std::io::{self, Read, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::str::Utf8Error;
use std::time::Duration;

use thiserror::Error;

use crate::frame::{self, MAX_RESPONSE_BYTES};

/// Timeout applied to connect and read when none is configured explicitly.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Result type for exchange operations.
pub type ExchangeResult<T> = Result<T, ExchangeError>;

/// Failures surfaced by an exchange.
///
/// Every variant is terminal for the call: the connection is already
/// released by the time the caller sees it, and nothing is retried.
#[derive(Debug, Error)]
pub enum ExchangeError {
    /// Peer was reachable but nothing accepted the connection.
    #[error("connection refused")]
    ConnectionRefused,
    /// Connect or read did not complete within the configured timeout.
    #[error("timed out after {0:?}")]
    Timeout(Duration),
    /// Any other IO failure during connect, write, or read.
    #[error("transport error: {0}")]
    Transport(#[source] io::Error),
    /// Reply bytes were not valid UTF-8.
    #[error("reply is not valid UTF-8: {0}")]
    Decode(#[from] Utf8Error),
    /// Command text contains the frame terminator.
    #[error("command must not contain a newline")]
    InvalidCommand,
}

/// Configuration for a reusable [`Exchanger`].
#[derive(Debug, Clone)]
pub struct ExchangeConfig {
    /// Server hostname or literal address.
    pub host: String,
    /// Server TCP port.
    pub port: u16,
    /// Cap on establishing the connection, applied per resolved address.
    pub connect_timeout: Duration,
    /// Cap on waiting for the reply once the command is sent.
    pub read_timeout: Duration,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        ExchangeConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            connect_timeout: DEFAULT_TIMEOUT,
            read_timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Blocking client for the newline-delimited command protocol.
///
/// The struct only carries configuration. Each [`exchange`](Self::exchange)
/// call opens its own connection, performs exactly one write and at most one
/// read, and closes the connection before returning. Calls share no state,
/// so an `Exchanger` may be used from several threads at once if the caller
/// wants parallel smoke traffic.
pub struct Exchanger {
    config: ExchangeConfig,
}

impl Exchanger {
    /// Creates an exchanger for `host:port` with default timeouts.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        let config = ExchangeConfig {
            host: host.into(),
            port,
            ..ExchangeConfig::default()
        };
        Exchanger { config }
    }

    /// Creates an exchanger with a custom configuration.
    pub fn with_config(config: ExchangeConfig) -> Self {
        Exchanger { config }
    }

    /// Sends one command and returns the server's trimmed reply text.
    ///
    /// A peer that accepts and closes without writing yields `Ok("")` —
    /// a degenerate but legitimate reply, distinct from any failure.
    pub fn exchange(&self, command: &str) -> ExchangeResult<String> {
        let mut request = Vec::with_capacity(command.len() + 1);
        frame::encode_command(command, &mut request)?;

        let mut stream = self.connect()?;
        stream
            .set_read_timeout(Some(self.config.read_timeout))
            .map_err(ExchangeError::Transport)?;
        // Disable Nagle so the single small command goes out immediately.
        stream.set_nodelay(true).map_err(ExchangeError::Transport)?;

        stream
            .write_all(&request)
            .and_then(|_| stream.flush())
            .map_err(|err| classify_io(err, self.config.read_timeout))?;

        let mut reply = [0u8; MAX_RESPONSE_BYTES];
        let received = stream
            .read(&mut reply)
            .map_err(|err| classify_io(err, self.config.read_timeout))?;

        frame::decode_response(&reply[..received])
        // The stream drops here, and on every early return above.
    }

    /// Resolves the target and attempts each address with the connect cap.
    fn connect(&self) -> ExchangeResult<TcpStream> {
        let addrs = (self.config.host.as_str(), self.config.port)
            .to_socket_addrs()
            .map_err(ExchangeError::Transport)?;

        let mut last_failure = None;
        for addr in addrs {
            match TcpStream::connect_timeout(&addr, self.config.connect_timeout) {
                Ok(stream) => return Ok(stream),
                Err(err) => last_failure = Some(classify_io(err, self.config.connect_timeout)),
            }
        }

        Err(last_failure.unwrap_or_else(|| {
            ExchangeError::Transport(io::Error::new(
                io::ErrorKind::AddrNotAvailable,
                "host resolved to no addresses",
            ))
        }))
    }
}

/// Sends one command to `host:port` and returns the trimmed reply.
///
/// One-shot form of [`Exchanger::exchange`] with `timeout` bounding both the
/// connect and the read phase.
pub fn exchange(
    host: &str,
    port: u16,
    command: &str,
    timeout: Duration,
) -> ExchangeResult<String> {
    Exchanger::with_config(ExchangeConfig {
        host: host.to_string(),
        port,
        connect_timeout: timeout,
        read_timeout: timeout,
    })
    .exchange(command)
}

/// Maps an IO failure onto the exchange taxonomy.
///
/// Read timeouts surface as `WouldBlock` on Unix and `TimedOut` on Windows;
/// both mean the peer did not answer in time.
fn classify_io(err: io::Error, timeout: Duration) -> ExchangeError {
    match err.kind() {
        io::ErrorKind::ConnectionRefused => ExchangeError::ConnectionRefused,
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => ExchangeError::Timeout(timeout),
        _ => ExchangeError::Transport(err),
    }
}
