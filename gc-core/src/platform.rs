//! OS-specific application directories.

use std::path::PathBuf;
use crate::constants::APP_DIR_NAME;
use crate::error::{GcError, GcResult};

/// OS-specific application directories.
pub struct Platform;

impl Platform {
    /// Get the platform-specific application data directory.
    ///
    /// - Windows: `%APPDATA%/GosuCatcher`
    /// - macOS: `~/Library/Application Support/GosuCatcher`
    /// - Linux: `~/.local/share/GosuCatcher`
    pub fn data_dir() -> GcResult<PathBuf> {
        let base = dirs::data_dir()
            .ok_or_else(|| GcError::Config("could not determine data directory".into()))?;
        Ok(base.join(APP_DIR_NAME))
    }

    /// Get the platform-specific configuration directory.
    ///
    /// - Windows: `%APPDATA%/GosuCatcher`
    /// - macOS: `~/Library/Application Support/GosuCatcher`
    /// - Linux: `~/.config/GosuCatcher`
    pub fn config_dir() -> GcResult<PathBuf> {
        let base = dirs::config_dir()
            .ok_or_else(|| GcError::Config("could not determine config directory".into()))?;
        Ok(base.join(APP_DIR_NAME))
    }
}
