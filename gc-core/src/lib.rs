//! GosuCatcher Core - Foundation types, error handling, configuration, and logging.
//!
//! This crate provides the shared foundation used by all other GosuCatcher crates:
//! - Application configuration (server bind address, database, logging, security)
//! - Global error type and the stable error codes exposed over HTTP
//! - Field-level request validation helpers
//! - Structured logging with tracing
//! - Platform directory resolution and common constants

pub mod config;
pub mod error;
pub mod logging;
pub mod platform;
pub mod constants;
pub mod validation;

// Re-export commonly used items at the crate root
pub use config::{AppConfig, ConfigHandle};
pub use error::{ErrorCode, FieldError, GcError, GcResult};
pub use logging::init_logging;
pub use platform::Platform;
pub use validation::{Validate, Violations};
