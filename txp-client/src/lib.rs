//! # TxProbe Client
//!
//! Purpose: Provide a minimal, blocking client for the transaction server's
//! newline-delimited command protocol, built for smoke testing rather than
//! sustained traffic.
//!
//! ## Design Principles
//! 1. **One Shot Per Call**: Every exchange is connect, send, receive, close;
//!    no pooling, pipelining, or retries.
//! 2. **Typed Failures**: Connection refusal, timeouts, transport faults, and
//!    decode errors stay distinct so callers can act on each.
//! 3. **Bounded Everything**: Connect and read are capped by timeouts and the
//!    reply by a fixed byte budget.
//! 4. **Opaque Replies**: The server's text is surfaced verbatim (trimmed),
//!    never parsed into structure.

mod exchange;
mod frame;

pub use exchange::{
    exchange, ExchangeConfig, ExchangeError, ExchangeResult, Exchanger, DEFAULT_TIMEOUT,
};
pub use frame::MAX_RESPONSE_BYTES;
