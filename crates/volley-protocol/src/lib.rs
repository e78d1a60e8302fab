//! Volley Protocol - Wire envelope and framing
//!
//! Messages are flat JSON objects with an explicit `type` discriminant,
//! framed over a byte stream with a CRLF terminator per message and a `|`
//! separator between messages that arrive in the same read.
//!
//! A malformed or unrecognized frame is an error the caller logs and drops;
//! the stream continues. A frame split across reads stays inside
//! `FrameBuffer` until its terminator arrives and is never partially
//! decoded.

mod error;
mod framing;
mod message;

pub use error::{Error, Result};
pub use framing::{decode, encode, split_frames, FrameBuffer, DELIMITER, TERMINATOR};
pub use message::Message;
