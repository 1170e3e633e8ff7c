//! Transport
//!
//! Owns the socket and moves whole frames across it.

use std::io::{self, Read, Write};
use std::net::{Shutdown, TcpStream, ToSocketAddrs};
use std::time::Duration;

use crate::config::Config;
use crate::error::{RconError, Result};
use crate::protocol::{decode, encode_packet, parse_size, Packet, SIZE_FIELD_LEN};

/// A blocking byte stream the transport can run over
pub trait Stream: Read + Write {
    /// Release the underlying resource. Called at most once per transport.
    fn shutdown(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Stream for TcpStream {
    fn shutdown(&mut self) -> io::Result<()> {
        TcpStream::shutdown(self, Shutdown::Both)
    }
}

/// Exclusive owner of one RCON connection's byte stream
///
/// The stream is closed exactly once: on `close()`, or on drop if
/// `close()` was never called.
pub struct Transport<S: Stream = TcpStream> {
    /// `None` once closed
    stream: Option<S>,

    /// Peer address for logging
    peer_addr: String,
}

impl Transport<TcpStream> {
    /// Connect to `host:port`
    ///
    /// Every resolved address is tried in turn with `connect_timeout`.
    /// `read_timeout` then bounds every blocking read on the socket.
    pub fn open(
        host: &str,
        port: u16,
        connect_timeout: Duration,
        read_timeout: Duration,
        write_timeout: Option<Duration>,
    ) -> Result<Self> {
        let addrs = (host, port).to_socket_addrs().map_err(|e| {
            RconError::Connection(format!("failed to resolve {}:{}: {}", host, port, e))
        })?;

        let mut last_error = None;
        for addr in addrs {
            tracing::debug!("Connecting to {} (timeout {:?})", addr, connect_timeout);

            match TcpStream::connect_timeout(&addr, connect_timeout) {
                Ok(stream) => {
                    configure(&stream, read_timeout, write_timeout).map_err(|e| {
                        RconError::Connection(format!("failed to configure socket: {}", e))
                    })?;
                    return Ok(Self::from_stream(stream, addr.to_string()));
                }
                Err(e) => {
                    tracing::debug!("Connection to {} failed: {}", addr, e);
                    last_error = Some(e);
                }
            }
        }

        Err(RconError::Connection(match last_error {
            Some(e) => e.to_string(),
            None => format!("no addresses found for {}:{}", host, port),
        }))
    }

    /// Connect using the endpoint and timeouts from `config`
    pub fn open_with(config: &Config) -> Result<Self> {
        Self::open(
            &config.host,
            config.port,
            config.connect_timeout,
            config.read_timeout,
            config.write_timeout,
        )
    }
}

fn configure(
    stream: &TcpStream,
    read_timeout: Duration,
    write_timeout: Option<Duration>,
) -> io::Result<()> {
    // Requests are tiny and strictly alternate with replies.
    stream.set_nodelay(true)?;
    stream.set_read_timeout(Some(read_timeout))?;
    stream.set_write_timeout(write_timeout)?;
    Ok(())
}

impl<S: Stream> Transport<S> {
    /// Wrap an already connected stream
    pub fn from_stream(stream: S, peer_addr: impl Into<String>) -> Self {
        Self {
            stream: Some(stream),
            peer_addr: peer_addr.into(),
        }
    }

    /// Whether `close()` has not run yet
    pub fn is_open(&self) -> bool {
        self.stream.is_some()
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }

    fn stream_mut(&mut self) -> Result<&mut S> {
        self.stream.as_mut().ok_or(RconError::NotConnected)
    }

    /// Write every byte of `frame`
    pub fn write_frame(&mut self, frame: &[u8]) -> Result<()> {
        let stream = self.stream_mut()?;
        stream.write_all(frame).map_err(map_io_error)?;
        stream.flush().map_err(map_io_error)?;
        Ok(())
    }

    /// Read exactly `len` bytes
    ///
    /// Keeps reading until the buffer is full. A short read is never
    /// returned: end of stream and timeouts are errors.
    pub fn read_exact(&mut self, len: usize) -> Result<Vec<u8>> {
        let stream = self.stream_mut()?;
        let mut buf = vec![0u8; len];
        let mut filled = 0;

        while filled < len {
            match stream.read(&mut buf[filled..]) {
                Ok(0) => {
                    return Err(RconError::ConnectionClosed {
                        expected: len,
                        received: filled,
                    })
                }
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(map_io_error(e)),
            }
        }

        Ok(buf)
    }

    /// Encode and send one packet
    pub fn write_packet(&mut self, packet: &Packet) -> Result<()> {
        let frame = encode_packet(packet)?;
        tracing::trace!(
            "Sending packet to {}: id={} type={} body_len={}",
            self.peer_addr,
            packet.id,
            packet.packet_type,
            packet.body.len()
        );
        self.write_frame(&frame)
    }

    /// Receive one packet
    ///
    /// The frame is consumed in full before decoding, so a decode error
    /// leaves the stream positioned at the next frame.
    pub fn read_packet(&mut self) -> Result<Packet> {
        let mut field = [0u8; SIZE_FIELD_LEN];
        field.copy_from_slice(&self.read_exact(SIZE_FIELD_LEN)?);
        let size = parse_size(field)?;

        let payload = self.read_exact(size)?;
        let packet = decode(&payload)?;

        tracing::trace!(
            "Received packet from {}: id={} type={} body_len={}",
            self.peer_addr,
            packet.id,
            packet.packet_type,
            packet.body.len()
        );
        Ok(packet)
    }

    /// Close the stream. Safe to call any number of times.
    pub fn close(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            if let Err(e) = stream.shutdown() {
                // Peer may already be gone; the handle is dropped either way.
                tracing::debug!("Shutdown of {} reported: {}", self.peer_addr, e);
            }
            tracing::debug!("Closed connection to {}", self.peer_addr);
        }
    }
}

impl<S: Stream> Drop for Transport<S> {
    fn drop(&mut self) {
        self.close();
    }
}

/// Classify socket errors. Windows reports read timeouts as `TimedOut`,
/// unix as `WouldBlock`.
fn map_io_error(e: io::Error) -> RconError {
    match e.kind() {
        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut => RconError::Timeout,
        _ => RconError::Io(e),
    }
}
