//! Protocol codec
//!
//! Encoding and decoding functions for the wire protocol. Nothing here
//! touches a socket; the transport layer reads and writes on top.
//!
//! ## Wire Format
//!
//! ```text
//! ┌──────────┬──────────┬──────────┬──────────────┬──────┬──────┐
//! │ Size (4) │  ID (4)  │ Type (4) │ Body (0-4096)│ 0x00 │ 0x00 │
//! └──────────┴──────────┴──────────┴──────────────┴──────┴──────┘
//! ```
//!
//! All integers are signed 32-bit little-endian. `Size` counts every byte
//! after the size field itself.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use super::{Packet, PacketType};
use crate::error::{RconError, Result};

/// Length of the leading size field
pub const SIZE_FIELD_LEN: usize = 4;

/// id (4) + type (4)
pub const HEADER_SIZE: usize = 8;

/// Body terminator + empty-string terminator
pub const TERMINATOR_LEN: usize = 2;

/// Largest body a single packet may carry
pub const MAX_BODY_SIZE: usize = 4096;

/// Largest value the size field may hold
pub const MAX_PACKET_SIZE: usize = HEADER_SIZE + MAX_BODY_SIZE + TERMINATOR_LEN;

// =============================================================================
// Encoding
// =============================================================================

/// Encode a packet frame
///
/// Format: size (4) + id (4) + type (4) + body + 0x00 0x00
///
/// Bodies over `MAX_BODY_SIZE` would need several packets, which this
/// client does not support, so they are rejected instead of truncated.
pub fn encode(id: i32, packet_type: PacketType, body: &[u8]) -> Result<Bytes> {
    if body.len() > MAX_BODY_SIZE {
        return Err(RconError::BodyTooLarge {
            size: body.len(),
            max: MAX_BODY_SIZE,
        });
    }
    if let Some(offset) = body.iter().position(|&b| b == 0) {
        return Err(RconError::Protocol(format!(
            "Body contains a NUL byte at offset {}",
            offset
        )));
    }

    let size = HEADER_SIZE + body.len() + TERMINATOR_LEN;

    let mut frame = BytesMut::with_capacity(SIZE_FIELD_LEN + size);
    frame.put_i32_le(size as i32);
    frame.put_i32_le(id);
    frame.put_i32_le(packet_type.raw());
    frame.put_slice(body);
    frame.put_bytes(0, TERMINATOR_LEN);

    Ok(frame.freeze())
}

/// Encode a `Packet` value
pub fn encode_packet(packet: &Packet) -> Result<Bytes> {
    encode(packet.id, packet.packet_type, &packet.body)
}

// =============================================================================
// Decoding
// =============================================================================

/// Validate a size field read off the wire
///
/// Returns the number of bytes that follow it. A negative or oversized
/// value leaves the stream unframeable, so the caller must drop the
/// connection.
pub fn parse_size(field: [u8; SIZE_FIELD_LEN]) -> Result<usize> {
    let size = i32::from_le_bytes(field);
    if size < 0 || size as usize > MAX_PACKET_SIZE {
        return Err(RconError::InvalidSize {
            size,
            max: MAX_PACKET_SIZE,
        });
    }
    Ok(size as usize)
}

/// Decode the bytes following the size field
///
/// Up to two trailing NUL terminators are stripped from the body.
pub fn decode(bytes: &[u8]) -> Result<Packet> {
    if bytes.len() < HEADER_SIZE {
        return Err(RconError::Protocol(format!(
            "Malformed packet: expected at least {} bytes, got {}",
            HEADER_SIZE,
            bytes.len()
        )));
    }

    let mut buf = bytes;
    let id = buf.get_i32_le();
    let packet_type = PacketType::from_raw(buf.get_i32_le());
    let body = strip_terminators(buf).to_vec();

    Ok(Packet {
        id,
        packet_type,
        body,
    })
}

fn strip_terminators(body: &[u8]) -> &[u8] {
    let mut end = body.len();
    for _ in 0..TERMINATOR_LEN {
        if end > 0 && body[end - 1] == 0 {
            end -= 1;
        } else {
            break;
        }
    }
    &body[..end]
}
