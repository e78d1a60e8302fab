//! Framing over the byte stream
//!
//! Each encoded message ends with a CRLF terminator; messages that arrive
//! concatenated in the same read are separated by `|`. There is no length
//! prefix, so a message can be split across reads: `FrameBuffer` holds
//! partial bytes until the terminator is seen and never hands up an
//! incomplete frame.

use crate::{Message, Result};
use log::warn;

/// Separator between messages concatenated into one read
pub const DELIMITER: char = '|';

/// Per-message terminator appended on send
pub const TERMINATOR: &str = "\r\n";

/// Serialize a message and append the terminator
pub fn encode(message: &Message) -> Result<String> {
    let mut text = serde_json::to_string(message)?;
    text.push_str(TERMINATOR);
    Ok(text)
}

/// Decode one framed message
pub fn decode(frame: &str) -> Result<Message> {
    Ok(serde_json::from_str(frame.trim())?)
}

/// Split a complete read chunk into individual message frames
pub fn split_frames(chunk: &str) -> impl Iterator<Item = &str> {
    chunk
        .split(DELIMITER)
        .map(|frame| frame.trim_matches(['\r', '\n']))
        .filter(|frame| !frame.is_empty())
}

/// Reassembles message frames from a byte stream
///
/// Bytes are buffered until a terminator arrives; `push` yields only
/// complete frames. A non-UTF-8 segment is dropped with a warning and the
/// surrounding frames are unaffected.
#[derive(Debug, Default)]
pub struct FrameBuffer {
    buffer: Vec<u8>,
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed received bytes, returning every frame completed by them
    pub fn push(&mut self, bytes: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(bytes);

        let mut frames = Vec::new();
        while let Some(pos) = self
            .buffer
            .windows(TERMINATOR.len())
            .position(|w| w == TERMINATOR.as_bytes())
        {
            let segment: Vec<u8> = self.buffer.drain(..pos + TERMINATOR.len()).collect();
            match std::str::from_utf8(&segment[..pos]) {
                Ok(text) => frames.extend(split_frames(text).map(str::to_string)),
                // the segment is already drained, later frames are intact
                Err(_) => warn!("dropping {pos} undecodable bytes"),
            }
        }
        frames
    }

    /// Bytes still waiting for their terminator
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connect(device: &str) -> Message {
        Message::ConnectRequest {
            device_id: device.into(),
        }
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let msg = connect("device-1");
        let decoded = decode(&encode(&msg).unwrap()).unwrap();
        assert_eq!(decoded, msg);
    }

    #[test]
    fn test_split_frames_on_delimiter() {
        let a = encode(&connect("a")).unwrap();
        let b = encode(&connect("b")).unwrap();
        let chunk = format!("{}|{}", a.trim_end(), b.trim_end());

        let frames: Vec<&str> = split_frames(&chunk).collect();
        assert_eq!(frames.len(), 2);
        assert_eq!(decode(frames[0]).unwrap(), connect("a"));
        assert_eq!(decode(frames[1]).unwrap(), connect("b"));
    }

    #[test]
    fn test_frame_buffer_handles_split_frame() {
        let mut buffer = FrameBuffer::new();
        let encoded = encode(&connect("split-device")).unwrap();
        let (head, tail) = encoded.as_bytes().split_at(10);

        // nothing complete yet, nothing partially decoded
        assert!(buffer.push(head).is_empty());
        assert_eq!(buffer.pending(), 10);

        let frames = buffer.push(tail);
        assert_eq!(frames.len(), 1);
        assert_eq!(decode(&frames[0]).unwrap(), connect("split-device"));
        assert_eq!(buffer.pending(), 0);
    }

    #[test]
    fn test_frame_buffer_multiple_messages_in_one_read() {
        let mut buffer = FrameBuffer::new();
        let a = encode(&connect("a")).unwrap();
        let b = encode(&connect("b")).unwrap();
        let read = format!("{}|{}", a.trim_end(), b);

        let frames = buffer.push(read.as_bytes());
        assert_eq!(frames.len(), 2);
    }

    #[test]
    fn test_frame_buffer_terminator_split_across_reads() {
        let mut buffer = FrameBuffer::new();
        let encoded = encode(&connect("x")).unwrap();
        let bytes = encoded.as_bytes();

        // split right between \r and \n
        let (head, tail) = bytes.split_at(bytes.len() - 1);
        assert!(buffer.push(head).is_empty());
        let frames = buffer.push(tail);
        assert_eq!(frames.len(), 1);
    }

    #[test]
    fn test_frame_buffer_resynchronizes_after_bad_bytes() {
        let mut buffer = FrameBuffer::new();
        assert!(buffer.push(b"\xff\xfe\r\n").is_empty());

        // the bad segment is gone; a healthy frame decodes afterwards
        let frames = buffer.push(encode(&connect("ok")).unwrap().as_bytes());
        assert_eq!(frames.len(), 1);
    }

    #[test]
    fn test_bad_segment_does_not_lose_adjacent_frames() {
        let mut buffer = FrameBuffer::new();
        let good = encode(&connect("survivor")).unwrap();
        let mut read = good.clone().into_bytes();
        read.extend_from_slice(b"\xff\xfe\r\n");

        // one read carrying a healthy frame followed by garbage: the
        // healthy frame must still come out
        let frames = buffer.push(&read);
        assert_eq!(frames.len(), 1);
        assert_eq!(decode(&frames[0]).unwrap(), connect("survivor"));
        assert_eq!(buffer.pending(), 0);
    }
}
