//! Protocol Module
//!
//! Defines the Source RCON wire protocol.
//!
//! ## Packet Format
//! ```text
//! ┌──────────┬──────────┬──────────┬─────────────────────┬───────────┐
//! │ Size (4) │  ID (4)  │ Type (4) │        Body         │ 0x00 0x00 │
//! └──────────┴──────────┴──────────┴─────────────────────┴───────────┘
//! ```
//!
//! ### Packet Types
//! - 3: SERVERDATA_AUTH           - Body: password
//! - 2: SERVERDATA_AUTH_RESPONSE  - Body: empty
//! - 2: SERVERDATA_EXECCOMMAND    - Body: command line
//! - 0: SERVERDATA_RESPONSE_VALUE - Body: command output
//!
//! Responses larger than one packet are split by the server. Reassembling
//! them is not supported; an oversized frame is a protocol error.

mod codec;
mod packet;

pub use codec::{
    decode, encode, encode_packet, parse_size, HEADER_SIZE, MAX_BODY_SIZE, MAX_PACKET_SIZE,
    SIZE_FIELD_LEN, TERMINATOR_LEN,
};
pub use packet::{Packet, PacketType, AUTHORIZE_ID, COMMAND_ID};
