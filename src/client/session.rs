//! Command session
//!
//! One EXECCOMMAND request, one reply. Only used once the handshake has
//! succeeded.

use crate::error::Result;
use crate::network::{Stream, Transport};
use crate::protocol::{Packet, PacketType, COMMAND_ID};

/// How the server answered a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Correlated RESPONSE_VALUE. The body is `None` when it is not UTF-8.
    Matched(Option<String>),

    /// A well-formed packet that does not answer the command
    Mismatched { id: i32, packet_type: PacketType },
}

/// Send `command` and classify the reply
///
/// Errors are either encoding failures (nothing was written) or transport
/// and framing failures; `RconError::is_fatal` tells them apart.
pub fn execute<S: Stream>(transport: &mut Transport<S>, command: &str) -> Result<Reply> {
    transport.write_packet(&Packet::command(command))?;
    let reply = transport.read_packet()?;
    Ok(classify(reply))
}

/// Match a reply against the command request
pub fn classify(reply: Packet) -> Reply {
    if reply.id == COMMAND_ID && reply.packet_type == PacketType::RESPONSE_VALUE {
        Reply::Matched(String::from_utf8(reply.body).ok())
    } else {
        Reply::Mismatched {
            id: reply.id,
            packet_type: reply.packet_type,
        }
    }
}
