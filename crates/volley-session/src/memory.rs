//! In-memory connection for tests and demos
//!
//! Inbound frames are scripted by the test; outbound frames are captured
//! for assertions. No sockets, no threads.

use crate::{Connection, Error, Result};
use std::collections::VecDeque;
use volley_protocol::Message;

/// A scriptable, capturing connection
#[derive(Debug)]
pub struct MemoryConnection {
    inbound: VecDeque<String>,
    sent: Vec<String>,
    connected: bool,
}

impl MemoryConnection {
    pub fn new() -> Self {
        Self {
            inbound: VecDeque::new(),
            sent: Vec::new(),
            connected: true,
        }
    }

    /// Queue a raw frame as if it had arrived from the peer
    pub fn push_frame(&mut self, frame: impl Into<String>) {
        self.inbound.push_back(frame.into());
    }

    /// Queue a message as if it had arrived from the peer
    pub fn push_message(&mut self, message: &Message) -> volley_protocol::Result<()> {
        self.inbound.push_back(volley_protocol::encode(message)?);
        Ok(())
    }

    /// Every frame sent so far, oldest first
    pub fn sent_frames(&self) -> &[String] {
        &self.sent
    }

    /// Every sent frame that decodes, oldest first
    pub fn sent_messages(&self) -> Vec<Message> {
        self.sent
            .iter()
            .filter_map(|frame| volley_protocol::decode(frame).ok())
            .collect()
    }

    /// Simulate the peer dropping the connection
    pub fn drop_connection(&mut self) {
        self.connected = false;
    }
}

impl Default for MemoryConnection {
    fn default() -> Self {
        Self::new()
    }
}

impl Connection for MemoryConnection {
    fn send(&mut self, frame: String) -> Result<()> {
        if !self.connected {
            return Err(Error::NotConnected);
        }
        self.sent.push(frame);
        Ok(())
    }

    fn poll(&mut self) -> Result<Option<String>> {
        if let Some(frame) = self.inbound.pop_front() {
            return Ok(Some(frame));
        }
        if !self.connected {
            return Err(Error::ConnectionLost("memory connection dropped".into()));
        }
        Ok(None)
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    fn close(&mut self) {
        self.connected = false;
    }
}
