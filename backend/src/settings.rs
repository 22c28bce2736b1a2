//! Server settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `LIBRARY_*` environment variables, and config
//! files. Unset values fall back to the defaults exposed by the accessors.

use std::path::{Path, PathBuf};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::{SpamGuardPolicy, SpamGuardPolicyError};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5050;
const DEFAULT_DATA_DIR: &str = "data";

/// Settings that cannot be turned into a running server.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid delete spam guard settings: {0}")]
    SpamGuard(#[from] SpamGuardPolicyError),
}

/// Configuration values for the library server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "LIBRARY")]
pub struct AppSettings {
    /// Interface to bind.
    pub host: Option<String>,
    /// Port to bind.
    #[ortho_config(default = 5050)]
    pub port: u16,
    /// Directory holding `books.json`, `users.json`, and their templates.
    pub data_dir: Option<PathBuf>,
    /// Delete attempts inside the window that lock deletes.
    pub delete_threshold: Option<usize>,
    /// Sliding window length in seconds.
    pub delete_window_secs: Option<u64>,
    /// Lock duration in seconds.
    pub delete_cooldown_secs: Option<u64>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            host: None,
            port: DEFAULT_PORT,
            data_dir: None,
            delete_threshold: None,
            delete_window_secs: None,
            delete_cooldown_secs: None,
        }
    }
}

impl AppSettings {
    /// Return the configured interface, falling back to all interfaces.
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Return the configured port.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Return the configured data directory, falling back to `data`.
    pub fn data_dir(&self) -> &Path {
        self.data_dir
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_DATA_DIR))
    }

    /// Build the delete spam guard policy, rejecting zero values.
    ///
    /// # Examples
    /// ```
    /// use library_backend::domain::SpamGuardPolicy;
    /// use library_backend::settings::AppSettings;
    ///
    /// let settings = AppSettings::default();
    /// assert_eq!(settings.spam_guard_policy()?, SpamGuardPolicy::default());
    /// # Ok::<(), library_backend::settings::SettingsError>(())
    /// ```
    pub fn spam_guard_policy(&self) -> Result<SpamGuardPolicy, SettingsError> {
        let defaults = SpamGuardPolicy::default();
        let threshold = self.delete_threshold.unwrap_or(defaults.threshold());
        let window = self
            .delete_window_secs
            .map_or(defaults.window(), Duration::from_secs);
        let cooldown = self
            .delete_cooldown_secs
            .map_or(defaults.cooldown(), Duration::from_secs);
        Ok(SpamGuardPolicy::new(threshold, window, cooldown)?)
    }
}
