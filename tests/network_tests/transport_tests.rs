//! Transport Tests
//!
//! Socket lifecycle, exact reads and timeout behaviour.

#[path = "../common/mod.rs"]
mod common;

use std::io::{self, Cursor, Read, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use common::{
    closed_port, init_tracing, read_request, spawn_server, wait_for_close, write_raw, write_reply,
};
use srcon::network::{Stream, Transport};
use srcon::protocol::{encode, Packet, PacketType, COMMAND_ID};
use srcon::RconError;

const TIMEOUT: Duration = Duration::from_secs(3);

fn open(port: u16, read_timeout: Duration) -> srcon::Result<Transport> {
    Transport::open("127.0.0.1", port, TIMEOUT, read_timeout, Some(TIMEOUT))
}

// =============================================================================
// Lifecycle Tests
// =============================================================================

#[test]
fn test_open_refused_is_connection_error() {
    init_tracing();
    match open(closed_port(), TIMEOUT) {
        Err(RconError::Connection(message)) => assert!(!message.is_empty()),
        Err(other) => panic!("expected Connection error, got {:?}", other),
        Ok(_) => panic!("expected Connection error, got a transport"),
    }
}

#[test]
fn test_open_unresolvable_host() {
    let result = Transport::open("host.invalid", 25575, TIMEOUT, TIMEOUT, None);
    assert!(matches!(result, Err(RconError::Connection(_))));
}

#[test]
fn test_close_is_idempotent_and_reaches_peer() {
    let (addr, server) = spawn_server(1, |_, mut stream| {
        assert!(wait_for_close(&mut stream));
    });

    let mut transport = open(addr.port(), TIMEOUT).unwrap();
    assert!(transport.is_open());

    transport.close();
    transport.close();
    assert!(!transport.is_open());
    assert!(matches!(transport.read_exact(1), Err(RconError::NotConnected)));

    server.join().unwrap();
}

#[test]
fn test_drop_closes_socket() {
    let (addr, server) = spawn_server(1, |_, mut stream| {
        assert!(wait_for_close(&mut stream));
    });

    {
        let _transport = open(addr.port(), TIMEOUT).unwrap();
    }

    server.join().unwrap();
}

// =============================================================================
// Read/Write Tests
// =============================================================================

#[test]
fn test_packet_exchange() {
    let (addr, server) = spawn_server(1, |_, mut stream| {
        let request = read_request(&mut stream);
        assert_eq!(request, Packet::command("status"));
        write_reply(&mut stream, COMMAND_ID, PacketType::RESPONSE_VALUE, b"players: 0");
    });

    let mut transport = open(addr.port(), TIMEOUT).unwrap();
    transport.write_packet(&Packet::command("status")).unwrap();
    let reply = transport.read_packet().unwrap();

    assert_eq!(reply.id, COMMAND_ID);
    assert_eq!(reply.packet_type, PacketType::RESPONSE_VALUE);
    assert_eq!(reply.body_text(), Some("players: 0"));

    server.join().unwrap();
}

#[test]
fn test_reply_split_across_segments() {
    let (addr, server) = spawn_server(1, |_, mut stream| {
        let frame = encode(COMMAND_ID, PacketType::RESPONSE_VALUE, b"slow reply").unwrap();
        for byte in frame.iter() {
            write_raw(&mut stream, &[*byte]);
            thread::sleep(Duration::from_millis(2));
        }
    });

    let mut transport = open(addr.port(), TIMEOUT).unwrap();
    let reply = transport.read_packet().unwrap();
    assert_eq!(reply.body, b"slow reply");

    server.join().unwrap();
}

#[test]
fn test_read_timeout_does_not_hang() {
    let (addr, server) = spawn_server(1, |_, mut stream| {
        wait_for_close(&mut stream);
    });

    let mut transport = open(addr.port(), Duration::from_millis(200)).unwrap();
    let started = Instant::now();
    let result = transport.read_packet();

    assert!(matches!(result, Err(RconError::Timeout)));
    assert!(started.elapsed() < Duration::from_secs(5));

    transport.close();
    server.join().unwrap();
}

#[test]
fn test_peer_close_mid_frame() {
    let (addr, server) = spawn_server(1, |_, mut stream| {
        // Size claims 10 bytes, only 3 follow.
        write_raw(&mut stream, &10i32.to_le_bytes());
        write_raw(&mut stream, &[1, 2, 3]);
    });

    let mut transport = open(addr.port(), TIMEOUT).unwrap();
    server.join().unwrap();

    match transport.read_packet() {
        Err(RconError::ConnectionClosed { expected, received }) => {
            assert_eq!(expected, 10);
            assert_eq!(received, 3);
        }
        other => panic!("expected ConnectionClosed, got {:?}", other),
    }
}

#[test]
fn test_oversized_size_field_is_fatal() {
    let (addr, server) = spawn_server(1, |_, mut stream| {
        write_raw(&mut stream, &5000i32.to_le_bytes());
    });

    let mut transport = open(addr.port(), TIMEOUT).unwrap();
    let err = transport.read_packet().unwrap_err();

    assert!(matches!(err, RconError::InvalidSize { size: 5000, .. }));
    assert!(err.is_fatal());

    server.join().unwrap();
}

#[test]
fn test_undersized_frame_keeps_stream_aligned() {
    let (addr, server) = spawn_server(1, |_, mut stream| {
        write_raw(&mut stream, &4i32.to_le_bytes());
        write_raw(&mut stream, &[9, 9, 9, 9]);
        write_reply(&mut stream, COMMAND_ID, PacketType::RESPONSE_VALUE, b"next");
    });

    let mut transport = open(addr.port(), TIMEOUT).unwrap();

    let err = transport.read_packet().unwrap_err();
    assert!(matches!(err, RconError::Protocol(_)));
    assert!(!err.is_fatal());

    assert_eq!(transport.read_packet().unwrap().body, b"next");

    server.join().unwrap();
}

// =============================================================================
// Custom Stream Tests
// =============================================================================

/// Records how often the transport shut it down
struct CountingStream {
    input: Cursor<Vec<u8>>,
    output: Vec<u8>,
    shutdowns: Arc<AtomicUsize>,
}

impl Read for CountingStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        // Two bytes at a time to force partial reads.
        let n = buf.len().min(2);
        self.input.read(&mut buf[..n])
    }
}

impl Write for CountingStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.output.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Stream for CountingStream {
    fn shutdown(&mut self) -> io::Result<()> {
        self.shutdowns.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[test]
fn test_stream_shut_down_exactly_once() {
    let shutdowns = Arc::new(AtomicUsize::new(0));
    let frame = encode(COMMAND_ID, PacketType::RESPONSE_VALUE, b"hello").unwrap();

    let mut transport = Transport::from_stream(
        CountingStream {
            input: Cursor::new(frame.to_vec()),
            output: Vec::new(),
            shutdowns: Arc::clone(&shutdowns),
        },
        "memory",
    );

    assert_eq!(transport.read_packet().unwrap().body, b"hello");

    transport.close();
    transport.close();
    drop(transport);

    assert_eq!(shutdowns.load(Ordering::SeqCst), 1);
}

#[test]
fn test_drop_without_close_shuts_down() {
    let shutdowns = Arc::new(AtomicUsize::new(0));
    let transport = Transport::from_stream(
        CountingStream {
            input: Cursor::new(Vec::new()),
            output: Vec::new(),
            shutdowns: Arc::clone(&shutdowns),
        },
        "memory",
    );

    drop(transport);
    assert_eq!(shutdowns.load(Ordering::SeqCst), 1);
}
