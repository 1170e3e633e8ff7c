//! Shared client handle
//!
//! The wire protocol has no multiplexing, so concurrent callers are
//! serialised: each call holds the lock for a full request/response cycle.

use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use super::Rcon;
use crate::error::Result;

/// Cloneable, thread-safe handle to one `Rcon` client
#[derive(Clone, Debug)]
pub struct SharedRcon {
    inner: Arc<Mutex<Rcon>>,
}

impl SharedRcon {
    pub fn new(client: Rcon) -> Self {
        Self {
            inner: Arc::new(Mutex::new(client)),
        }
    }

    pub fn connect(&self) -> bool {
        self.inner.lock().connect()
    }

    pub fn is_connected(&self) -> bool {
        self.inner.lock().is_connected()
    }

    pub fn send_command(&self, command: &str) -> Result<bool> {
        self.inner.lock().send_command(command)
    }

    /// Run a command and read its reply under the same lock
    ///
    /// Returns `Ok(None)` if the command failed, otherwise the cached body
    /// (which is itself `None` for a non-text reply).
    pub fn command(&self, command: &str) -> Result<Option<Option<String>>> {
        let mut client = self.inner.lock();
        if client.send_command(command)? {
            Ok(Some(client.response().map(str::to_owned)))
        } else {
            Ok(None)
        }
    }

    /// Copy of the last cached reply body
    pub fn response(&self) -> Option<String> {
        self.inner.lock().response().map(str::to_owned)
    }

    pub fn disconnect(&self) {
        self.inner.lock().disconnect()
    }

    /// Hold the client for a sequence of calls
    pub fn lock(&self) -> MutexGuard<'_, Rcon> {
        self.inner.lock()
    }
}
