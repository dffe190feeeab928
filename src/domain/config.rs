use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Name of the directory, under the board root, holding the configuration
/// and the record file.
pub const CONFIG_DIR: &str = ".swap";

const CONFIG_FILE: &str = "config.toml";

/// Configuration for an exchange board.
///
/// Describes the event being traded and where records are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// The name of the event, shown in headers.
    event_name: String,

    /// The venue, if known.
    venue: Option<String>,

    /// The key records are stored under.
    ///
    /// This is the stem of the record file name, so changing it starts a
    /// fresh, empty board.
    storage_key: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            event_name: default_event_name(),
            venue: None,
            storage_key: default_storage_key(),
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Loads the configuration of the board rooted at `root`, falling back to
    /// the defaults if there is none or it cannot be read.
    #[must_use]
    pub fn load_or_default(root: &Path) -> Self {
        Self::load(&Self::path(root)).unwrap_or_else(|e| {
            tracing::debug!("Using default config: {e}");
            Self::default()
        })
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }

    /// The location of the config file for the board rooted at `root`.
    #[must_use]
    pub fn path(root: &Path) -> PathBuf {
        root.join(CONFIG_DIR).join(CONFIG_FILE)
    }

    /// Returns the event name.
    #[must_use]
    pub fn event_name(&self) -> &str {
        &self.event_name
    }

    /// Returns the venue, if configured.
    #[must_use]
    pub fn venue(&self) -> Option<&str> {
        self.venue.as_deref()
    }

    /// Returns the storage key.
    #[must_use]
    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// Sets the event name.
    pub fn set_event_name(&mut self, name: String) {
        self.event_name = name;
    }

    /// Sets the venue.
    pub fn set_venue(&mut self, venue: Option<String>) {
        self.venue = venue;
    }
}

fn default_event_name() -> String {
    "DAY6 <The DECADE> in Taipei".to_string()
}

fn default_storage_key() -> String {
    "day6_exchange_db_v2".to_string()
}

/// The serialized versions of the configuration.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_event_name")]
        event_name: String,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        venue: Option<String>,

        #[serde(default = "default_storage_key")]
        storage_key: String,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                event_name,
                venue,
                storage_key,
            } => Self {
                event_name,
                venue,
                storage_key,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            event_name: config.event_name,
            venue: config.venue,
            storage_key: config.storage_key,
        }
    }
}
