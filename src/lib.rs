//! # srcon
//!
//! A blocking client for the Source RCON protocol:
//! - Binary packet codec (little-endian, length-prefixed frames)
//! - Authentication handshake state machine
//! - Command request/response correlation over one TCP connection
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Rcon / SharedRcon                         │
//! │        connect · send_command · response · disconnect       │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │  Handshake  │          │   Session   │
//!   │   (AUTH)    │          │ (EXECCMD)   │
//!   └──────┬──────┘          └──────┬──────┘
//!          └────────────┬───────────┘
//!                       ▼
//!               ┌─────────────┐
//!               │  Transport  │──▶ Packet Codec
//!               │ (TcpStream) │
//!               └─────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use std::time::Duration;
//! use srcon::Rcon;
//!
//! let mut rcon = Rcon::new("127.0.0.1", 25575, "password", Duration::from_secs(3));
//! if rcon.connect() {
//!     if rcon.send_command("list").unwrap_or(false) {
//!         println!("{}", rcon.response().unwrap_or_default());
//!     }
//!     rcon.disconnect();
//! }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod network;
pub mod client;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{RconError, Result};
pub use config::Config;
pub use client::{Rcon, SessionState, SharedRcon};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of srcon
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
