//! Configuration for srcon
//!
//! Connection parameters with sensible defaults.

use std::time::Duration;

use crate::error::{RconError, Result};

/// Default RCON port
pub const DEFAULT_PORT: u16 = 25575;

/// Default timeout for connecting and for each blocking read
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

/// Connection configuration for an RCON client
#[derive(Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Endpoint
    // -------------------------------------------------------------------------
    /// Server host name or IP address
    pub host: String,

    /// Server TCP port (1-65535)
    pub port: u16,

    // -------------------------------------------------------------------------
    // Credentials
    // -------------------------------------------------------------------------
    /// RCON password, sent in plaintext during the handshake
    pub password: String,

    // -------------------------------------------------------------------------
    // Timeouts
    // -------------------------------------------------------------------------
    /// Timeout for establishing the TCP connection
    pub connect_timeout: Duration,

    /// Timeout applied to every blocking read
    pub read_timeout: Duration,

    /// Timeout applied to writes (`None` blocks until the OS gives up)
    pub write_timeout: Option<Duration>,
}

// Hand-written so the password never ends up in logs.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("password", &"<redacted>")
            .field("connect_timeout", &self.connect_timeout)
            .field("read_timeout", &self.read_timeout)
            .field("write_timeout", &self.write_timeout)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            password: String::new(),
            connect_timeout: DEFAULT_TIMEOUT,
            read_timeout: DEFAULT_TIMEOUT,
            write_timeout: Some(DEFAULT_TIMEOUT),
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// `host:port` as used for address resolution
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Check the values before a connection is attempted
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(RconError::Config("host must not be empty".to_string()));
        }
        if self.port == 0 {
            return Err(RconError::Config(
                "port must be in the range 1-65535".to_string(),
            ));
        }
        if self.connect_timeout.is_zero() {
            return Err(RconError::Config(
                "connect timeout must be non-zero".to_string(),
            ));
        }
        if self.read_timeout.is_zero() {
            return Err(RconError::Config(
                "read timeout must be non-zero".to_string(),
            ));
        }
        if matches!(self.write_timeout, Some(t) if t.is_zero()) {
            return Err(RconError::Config(
                "write timeout must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the server host
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    /// Set the server port
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Set the RCON password
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.config.password = password.into();
        self
    }

    /// Set both the connect and the read timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self.config.read_timeout = timeout;
        self
    }

    /// Set the connect timeout
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Set the read timeout
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.config.read_timeout = timeout;
        self
    }

    /// Set the write timeout
    pub fn write_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.config.write_timeout = timeout;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
