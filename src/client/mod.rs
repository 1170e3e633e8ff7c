//! Client Module
//!
//! The RCON client: connect, authenticate, run commands, disconnect.
//!
//! ## Contract
//! - `connect()` and command outcomes are plain booleans
//! - Calling `send_command` without an authenticated session is a caller
//!   bug and is the one case reported as `Err(RconError::NotConnected)`
//! - Nothing is retried; after any fatal failure the caller reconnects

mod auth;
mod session;
mod shared;

pub use auth::{authenticate, check_reply};
pub use session::{classify, execute, Reply};
pub use shared::SharedRcon;

use std::time::Duration;

use crate::config::Config;
use crate::error::{RconError, Result};
use crate::network::Transport;

/// Observable connection state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Disconnected,
    AwaitingAuthReply,
    Authenticated,
}

/// The socket lives inside the state, so a session without a socket
/// cannot exist. A failed handshake closes the socket and falls back to
/// `Disconnected`.
enum Connection {
    Disconnected,
    AwaitingAuthReply(Transport),
    Authenticated(Transport),
}

/// Blocking Source RCON client
pub struct Rcon {
    config: Config,
    connection: Connection,

    /// Last command reply body, or the last connect error message
    last_response: Option<String>,
}

impl Rcon {
    /// Create a client. No I/O happens until `connect()`.
    ///
    /// `timeout` bounds the TCP connect. Reads keep the default 3 second
    /// timeout; use `with_config` to change it.
    pub fn new(
        host: impl Into<String>,
        port: u16,
        password: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self::with_config(
            Config::builder()
                .host(host)
                .port(port)
                .password(password)
                .connect_timeout(timeout)
                .build(),
        )
    }

    /// Create a client from a full configuration
    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            connection: Connection::Disconnected,
            last_response: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn state(&self) -> SessionState {
        match self.connection {
            Connection::Disconnected => SessionState::Disconnected,
            Connection::AwaitingAuthReply(_) => SessionState::AwaitingAuthReply,
            Connection::Authenticated(_) => SessionState::Authenticated,
        }
    }

    /// True once the handshake has succeeded and until the connection ends
    pub fn is_connected(&self) -> bool {
        matches!(self.connection, Connection::Authenticated(_))
    }

    /// Open the socket and authenticate
    ///
    /// Any existing session is closed first. If the socket cannot be
    /// opened the error message is stored as the last response.
    pub fn connect(&mut self) -> bool {
        self.disconnect();

        let opened = self
            .config
            .validate()
            .and_then(|_| Transport::open_with(&self.config));
        let transport = match opened {
            Ok(transport) => transport,
            Err(e) => {
                tracing::warn!("Failed to connect to {}: {}", self.config.address(), e);
                self.last_response = Some(connect_error_message(e));
                return false;
            }
        };

        self.connection = Connection::AwaitingAuthReply(transport);
        self.finish_handshake();
        self.is_connected()
    }

    /// AwaitingAuthReply → Authenticated, or → Disconnected on failure
    fn finish_handshake(&mut self) {
        self.connection = match std::mem::replace(&mut self.connection, Connection::Disconnected) {
            Connection::AwaitingAuthReply(mut transport) => {
                match authenticate(&mut transport, &self.config.password) {
                    Ok(()) => {
                        tracing::debug!("Authenticated with {}", transport.peer_addr());
                        Connection::Authenticated(transport)
                    }
                    Err(e) => {
                        tracing::warn!(
                            "Authentication with {} failed: {}",
                            transport.peer_addr(),
                            e
                        );
                        transport.close();
                        Connection::Disconnected
                    }
                }
            }
            other => other,
        };
    }

    /// Run one command
    ///
    /// `Ok(true)` when the server answered with a correlated
    /// RESPONSE_VALUE, whose body becomes the last response. `Ok(false)`
    /// for any other outcome; the last response is then left untouched.
    /// Transport failures also close the connection.
    pub fn send_command(&mut self, command: &str) -> Result<bool> {
        let Connection::Authenticated(transport) = &mut self.connection else {
            return Err(RconError::NotConnected);
        };

        match execute(transport, command) {
            Ok(Reply::Matched(body)) => {
                self.last_response = body;
                Ok(true)
            }
            Ok(Reply::Mismatched { id, packet_type }) => {
                tracing::debug!(
                    "Ignoring uncorrelated reply to {:?}: id={} type={}",
                    command,
                    id,
                    packet_type
                );
                Ok(false)
            }
            Err(e) if e.is_fatal() => {
                tracing::warn!("Command {:?} failed, dropping connection: {}", command, e);
                self.disconnect();
                Ok(false)
            }
            Err(e) => {
                tracing::warn!("Command {:?} failed: {}", command, e);
                Ok(false)
            }
        }
    }

    /// The last cached reply body
    pub fn response(&self) -> Option<&str> {
        self.last_response.as_deref()
    }

    /// Close the connection. Safe to call when already disconnected.
    pub fn disconnect(&mut self) {
        match std::mem::replace(&mut self.connection, Connection::Disconnected) {
            Connection::AwaitingAuthReply(mut transport)
            | Connection::Authenticated(mut transport) => transport.close(),
            Connection::Disconnected => {}
        }
    }
}

impl std::fmt::Debug for Rcon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rcon")
            .field("config", &self.config)
            .field("state", &self.state())
            .field("last_response", &self.last_response)
            .finish()
    }
}

/// Socket errors are reported bare, like the OS message a caller expects
fn connect_error_message(e: RconError) -> String {
    match e {
        RconError::Connection(message) => message,
        other => other.to_string(),
    }
}
