//! Packet definitions
//!
//! The single wire unit of the RCON protocol.

use std::fmt;

/// Correlation id used for the authentication request
pub const AUTHORIZE_ID: i32 = 5;

/// Correlation id used for command requests
pub const COMMAND_ID: i32 = 6;

/// Packet type field.
///
/// `AUTH_RESPONSE` and `EXEC_COMMAND` share the value 2; which one a packet
/// means depends on the direction and on the reply being waited for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PacketType(i32);

impl PacketType {
    /// SERVERDATA_AUTH
    pub const AUTH: PacketType = PacketType(3);
    /// SERVERDATA_AUTH_RESPONSE
    pub const AUTH_RESPONSE: PacketType = PacketType(2);
    /// SERVERDATA_EXECCOMMAND
    pub const EXEC_COMMAND: PacketType = PacketType(2);
    /// SERVERDATA_RESPONSE_VALUE
    pub const RESPONSE_VALUE: PacketType = PacketType(0);

    pub const fn from_raw(value: i32) -> Self {
        Self(value)
    }

    pub const fn raw(self) -> i32 {
        self.0
    }
}

impl From<i32> for PacketType {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl fmt::Display for PacketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A decoded RCON packet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    /// Request/response correlation tag
    pub id: i32,

    /// Packet type
    pub packet_type: PacketType,

    /// Body without its trailing NUL terminators
    pub body: Vec<u8>,
}

impl Packet {
    pub fn new(id: i32, packet_type: PacketType, body: impl Into<Vec<u8>>) -> Self {
        Self {
            id,
            packet_type,
            body: body.into(),
        }
    }

    /// The authentication request carrying the password
    pub fn auth(password: &str) -> Self {
        Self::new(AUTHORIZE_ID, PacketType::AUTH, password.as_bytes())
    }

    /// A command request
    pub fn command(command: &str) -> Self {
        Self::new(COMMAND_ID, PacketType::EXEC_COMMAND, command.as_bytes())
    }

    /// Body as text, or `None` if it is not valid UTF-8
    pub fn body_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.body).ok()
    }

    /// Value of the size field once this packet is framed
    pub fn wire_size(&self) -> usize {
        super::codec::HEADER_SIZE + self.body.len() + super::codec::TERMINATOR_LEN
    }
}
