//! Authentication handshake
//!
//! ```text
//! Disconnected ──open──▶ AwaitingAuthReply ──matching reply──▶ Authenticated
//!      ▲                        │
//!      └────── close ◀── Failed ┘ (mismatch, timeout, I/O error)
//! ```
//!
//! Some servers send an empty RESPONSE_VALUE packet right before the real
//! auth reply. That packet is not skipped here: it fails the handshake.

use crate::error::{RconError, Result};
use crate::network::{Stream, Transport};
use crate::protocol::{Packet, PacketType, AUTHORIZE_ID};

/// Send the password and wait for the server's verdict
///
/// Closing the transport after a failure is left to the owner.
pub fn authenticate<S: Stream>(transport: &mut Transport<S>, password: &str) -> Result<()> {
    transport.write_packet(&Packet::auth(password))?;
    let reply = transport.read_packet()?;
    check_reply(&reply)
}

/// Accept only `{id: AUTHORIZE_ID, type: AUTH_RESPONSE}`
pub fn check_reply(reply: &Packet) -> Result<()> {
    if reply.packet_type == PacketType::AUTH_RESPONSE && reply.id == AUTHORIZE_ID {
        Ok(())
    } else {
        Err(RconError::AuthRejected {
            id: reply.id,
            packet_type: reply.packet_type.raw(),
        })
    }
}
