//! TCP transport
//!
//! One thread writes outbound frames, one thread reads bytes and
//! reassembles frames through a [`FrameBuffer`]. The session side talks
//! to both through channels and never blocks on the socket.

use crate::{Connection, Error, Result};
use log::{debug, warn};
use std::io::{Read, Write};
use std::net::{Shutdown, TcpStream, ToSocketAddrs};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread;
use volley_protocol::FrameBuffer;

const READ_CHUNK: usize = 1024;

pub struct TcpConnection {
    outbound: Sender<String>,
    inbound: Receiver<String>,
    connected: Arc<AtomicBool>,
    stream: TcpStream,
}

impl TcpConnection {
    /// Connect and spawn the reader and writer threads.
    pub fn connect<A: ToSocketAddrs>(addr: A) -> Result<Self> {
        let stream = TcpStream::connect(addr)?;
        let connected = Arc::new(AtomicBool::new(true));

        let (out_tx, out_rx) = mpsc::channel::<String>();
        let (in_tx, in_rx) = mpsc::channel::<String>();

        let mut write_stream = stream.try_clone()?;
        let write_flag = Arc::clone(&connected);
        thread::spawn(move || {
            while let Ok(frame) = out_rx.recv() {
                if write_stream.write_all(frame.as_bytes()).is_err()
                    || write_stream.flush().is_err()
                {
                    write_flag.store(false, Ordering::SeqCst);
                    break;
                }
            }
        });

        let mut read_stream = stream.try_clone()?;
        let read_flag = Arc::clone(&connected);
        thread::spawn(move || {
            let mut buffer = FrameBuffer::new();
            let mut chunk = [0u8; READ_CHUNK];
            loop {
                match read_stream.read(&mut chunk) {
                    Ok(0) => {
                        debug!("peer closed the connection");
                        read_flag.store(false, Ordering::SeqCst);
                        break;
                    }
                    Ok(n) => {
                        for frame in buffer.push(&chunk[..n]) {
                            if in_tx.send(frame).is_err() {
                                return;
                            }
                        }
                    }
                    Err(err) => {
                        warn!("socket read failed: {err}");
                        read_flag.store(false, Ordering::SeqCst);
                        break;
                    }
                }
            }
        });

        Ok(Self {
            outbound: out_tx,
            inbound: in_rx,
            connected,
            stream,
        })
    }
}

impl Connection for TcpConnection {
    fn send(&mut self, frame: String) -> Result<()> {
        if !self.is_connected() {
            return Err(Error::ConnectionLost("tcp stream closed".into()));
        }
        self.outbound
            .send(frame)
            .map_err(|_| Error::ConnectionLost("writer thread gone".into()))
    }

    fn poll(&mut self) -> Result<Option<String>> {
        match self.inbound.try_recv() {
            Ok(frame) => Ok(Some(frame)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => {
                Err(Error::ConnectionLost("reader thread gone".into()))
            }
        }
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    fn close(&mut self) {
        self.connected.store(false, Ordering::SeqCst);
        let _ = self.stream.shutdown(Shutdown::Both);
    }
}

impl Drop for TcpConnection {
    fn drop(&mut self) {
        self.close();
    }
}
