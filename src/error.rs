//! Error types for srcon
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using RconError
pub type Result<T> = std::result::Result<T, RconError>;

/// Unified error type for RCON operations
#[derive(Debug, Error)]
pub enum RconError {
    // -------------------------------------------------------------------------
    // Connection Errors
    // -------------------------------------------------------------------------
    #[error("Connection failed: {0}")]
    Connection(String),

    // -------------------------------------------------------------------------
    // Transport Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Read timed out")]
    Timeout,

    #[error("Connection closed by peer after {received} of {expected} bytes")]
    ConnectionClosed { expected: usize, received: usize },

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Invalid packet size: {size} (max {max})")]
    InvalidSize { size: i32, max: usize },

    #[error("Packet body too large: {size} bytes (max {max})")]
    BodyTooLarge { size: usize, max: usize },

    // -------------------------------------------------------------------------
    // Session Errors
    // -------------------------------------------------------------------------
    #[error("Authentication rejected (reply id {id}, type {packet_type})")]
    AuthRejected { id: i32, packet_type: i32 },

    #[error("The connection has not been established")]
    NotConnected,

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl RconError {
    /// Whether the error leaves the byte stream in an unknown position.
    ///
    /// A fatal error means the connection can no longer be used and must be
    /// closed. A malformed but fully consumed packet is not fatal.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            RconError::Io(_)
                | RconError::Timeout
                | RconError::ConnectionClosed { .. }
                | RconError::Connection(_)
                | RconError::InvalidSize { .. }
        )
    }
}
