//! Transport seam between the session and the byte stream
//!
//! A connection moves opaque framed text in and out of the session loop; it
//! never touches game state. Sends are fire-and-forget into a queue and
//! receives are non-blocking, so nothing in the core ever waits on the
//! network.

use crate::Result;

/// A connection-oriented transport to the session coordinator service
pub trait Connection {
    /// Queue one framed message for sending
    ///
    /// The frame already carries its terminator. Queued frames that were
    /// never written when the connection drops are discarded; there is no
    /// durable outbox.
    fn send(&mut self, frame: String) -> Result<()>;

    /// Take the next complete inbound frame, if one has arrived
    ///
    /// Never returns a partial frame: reassembly of split frames happens
    /// below this seam.
    fn poll(&mut self) -> Result<Option<String>>;

    /// Whether the underlying stream is still alive
    fn is_connected(&self) -> bool;

    /// Tear the connection down
    fn close(&mut self);
}
