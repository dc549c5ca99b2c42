//! Custom error types for the plugin.
//!
//! The typed taxonomy covers what this layer validates itself: setting
//! values against their domains, configuration files after loading, and
//! connection-state misuse of the device handle. Everything coming out of
//! the vendor driver propagates unmodified as `anyhow::Error`; user-facing
//! error reporting is owned by the host framework.

use thiserror::Error;

/// Convenience alias for results using the plugin error type.
pub type ChopperResult<T> = std::result::Result<T, ChopperError>;

/// Errors raised by the plugin layer itself.
#[derive(Error, Debug)]
pub enum ChopperError {
    #[error("configuration validation error: {0}")]
    Configuration(String),

    #[error("device not connected")]
    NotConnected,

    #[error("device already connected")]
    AlreadyConnected,

    #[error("serial port unreachable: {0}")]
    PortUnreachable(String),

    #[error("unknown setting '{0}'")]
    UnknownSetting(String),

    #[error("invalid choice '{0}'")]
    InvalidChoice(String),

    #[error("value out of range: {0}")]
    OutOfRange(String),

    #[error("expected a {0} value")]
    WrongType(&'static str),
}
