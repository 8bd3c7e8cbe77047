//! # Line-Protocol Framing
//!
//! Purpose: Encode outgoing commands and decode server replies for the
//! newline-delimited transaction protocol without external dependencies.
//!
//! ## Design Principles
//! 1. **Exact Framing**: Exactly one terminator per transmitted command.
//! 2. **Fail Fast**: Commands carrying an embedded terminator are rejected
//!    before any connection is opened.
//! 3. **Opaque Payloads**: Replies are plain UTF-8 text, never parsed into
//!    protocol structure here.
//! 4. **Bounded Replies**: The server answers in one segment; the capacity
//!    below caps the single read.

use std::str;

use crate::exchange::{ExchangeError, ExchangeResult};

/// Byte marking the end of a transmitted command.
pub const FRAME_TERMINATOR: u8 = b'\n';

/// Maximum reply size accepted from the server, in bytes.
///
/// The protocol sends its full reply in a single segment under this cap, so
/// the client performs exactly one bounded read of this size.
pub const MAX_RESPONSE_BYTES: usize = 4096;

/// Encodes one command into the provided buffer, appending the terminator.
pub fn encode_command(command: &str, out: &mut Vec<u8>) -> ExchangeResult<()> {
    if command.as_bytes().contains(&FRAME_TERMINATOR) {
        return Err(ExchangeError::InvalidCommand);
    }
    out.extend_from_slice(command.as_bytes());
    out.push(FRAME_TERMINATOR);
    Ok(())
}

/// Decodes a raw reply into trimmed UTF-8 text.
///
/// Leading and trailing whitespace, including the terminator and any `\r`,
/// is stripped. An empty slice decodes to an empty string.
pub fn decode_response(raw: &[u8]) -> ExchangeResult<String> {
    let text = str::from_utf8(raw)?;
    Ok(text.trim().to_string())
}
