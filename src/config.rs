//! Wizard configuration
//!
//! Passed explicitly into the controller at construction. Values come from
//! defaults, an optional TOML file, then `WIZARD_`-prefixed environment
//! variables, in increasing precedence.

use crate::constants::defaults;
use crate::error::{Result, WizardError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WizardConfig {
    /// Duration used when a file has no URL or a probe fails
    pub fallback_duration_secs: u32,
    pub probe_timeout_secs: u64,
    pub max_tags: usize,
    pub max_genres: usize,
    pub max_sub_genres: usize,
    pub release_track_limit: usize,
    /// Library entries listed before the user asks for the full list
    pub initial_visible_files: usize,
    pub event_channel_capacity: usize,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            fallback_duration_secs: defaults::FALLBACK_DURATION_SECS,
            probe_timeout_secs: defaults::PROBE_TIMEOUT_SECS,
            max_tags: defaults::MAX_TAGS,
            max_genres: defaults::MAX_GENRES,
            max_sub_genres: defaults::MAX_SUB_GENRES,
            release_track_limit: defaults::RELEASE_TRACK_LIMIT,
            initial_visible_files: defaults::INITIAL_VISIBLE_FILES,
            event_channel_capacity: defaults::EVENT_CHANNEL_CAPACITY,
        }
    }
}

impl WizardConfig {
    /// Load from an optional TOML file layered under the environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(
                config::File::from(path)
                    .format(config::FileFormat::Toml)
                    .required(true),
            );
        }

        let settings = builder
            .add_source(config::Environment::with_prefix("WIZARD").try_parsing(true))
            .build()?;

        let config: WizardConfig = settings.try_deserialize()?;
        config.validate()?;

        tracing::debug!(
            fallback_duration_secs = config.fallback_duration_secs,
            probe_timeout_secs = config.probe_timeout_secs,
            max_tags = config.max_tags,
            "Wizard configuration loaded"
        );

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let checks = [
            ("fallback_duration_secs", self.fallback_duration_secs as u64),
            ("probe_timeout_secs", self.probe_timeout_secs),
            ("max_tags", self.max_tags as u64),
            ("max_genres", self.max_genres as u64),
            ("max_sub_genres", self.max_sub_genres as u64),
            ("release_track_limit", self.release_track_limit as u64),
            ("event_channel_capacity", self.event_channel_capacity as u64),
        ];

        for (name, value) in checks {
            if value == 0 {
                return Err(WizardError::Configuration(format!(
                    "{name} must be greater than zero"
                )));
            }
        }

        Ok(())
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }
}
