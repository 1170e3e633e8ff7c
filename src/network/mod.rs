//! Network Module
//!
//! Socket ownership for the client.
//!
//! ## Model
//! - One blocking TCP stream per client
//! - Exact-length reads bounded by a read timeout
//! - Scoped lifecycle: open → used → closed (close also runs on drop)

mod transport;

pub use transport::{Stream, Transport};
