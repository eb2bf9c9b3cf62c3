//! Error taxonomy of the wizard.
//!
//! Validation errors and persistence failures block forward progress and are
//! reported with enough context to correct and retry. `ProbeInProgress` is a
//! "please wait" condition, not a data failure. Probe failures never surface
//! here; they degrade to a fallback duration.

use crate::gateways::GatewayError;
use crate::models::{ProjectType, TrackId};
use crate::state_machine::errors::StateMachineError;
use thiserror::Error;

/// Correctable user-input problems; form state is preserved
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("License '{license_name}' ({license_id}) has no contract template")]
    MissingContract {
        license_id: String,
        license_name: String,
    },

    #[error("License {license_id} references unknown contract template {contract_id}")]
    UnknownContract {
        license_id: String,
        contract_id: String,
    },

    #[error("A {project_type} project holds at most {limit} track(s)")]
    TrackLimitReached {
        project_type: ProjectType,
        limit: usize,
    },

    #[error("At most {limit} tags are allowed")]
    TagLimitReached { limit: usize },

    #[error("Tags cannot be empty")]
    EmptyTag,

    #[error("At most {limit} {kind} selections are allowed")]
    GenreLimitReached { kind: &'static str, limit: usize },

    #[error("Invalid BPM value: {value:?}")]
    InvalidBpm { value: String },

    #[error("License {license_id} cannot have a negative price")]
    NegativePrice { license_id: String },

    #[error("Library file not found: {file_id}")]
    UnknownLibraryFile { file_id: String },

    #[error("Track index {index} out of range ({len} tracks)")]
    TrackIndexOutOfRange { index: usize, len: usize },

    #[error("License index {index} out of range ({len} licenses)")]
    LicenseIndexOutOfRange { index: usize, len: usize },
}

/// Crate-level error returned by wizard operations
#[derive(Error, Debug)]
pub enum WizardError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Duration probe still running for {} track(s)", pending.len())]
    ProbeInProgress { pending: Vec<TrackId> },

    #[error("Persistence error: {0}")]
    Persistence(#[from] GatewayError),

    #[error(transparent)]
    StateMachine(#[from] StateMachineError),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl WizardError {
    /// Whether the same call may succeed later without any edit
    pub fn is_retriable(&self) -> bool {
        matches!(self, Self::ProbeInProgress { .. } | Self::Persistence(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<config::ConfigError> for WizardError {
    fn from(err: config::ConfigError) -> Self {
        Self::Configuration(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, WizardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retriable_classification() {
        let pending = WizardError::ProbeInProgress {
            pending: vec![TrackId::from("t1")],
        };
        assert!(pending.is_retriable());
        assert_eq!(pending.to_string(), "Duration probe still running for 1 track(s)");

        let persistence = WizardError::from(GatewayError::Transport("timeout".to_string()));
        assert!(persistence.is_retriable());

        let validation = WizardError::from(ValidationError::EmptyTag);
        assert!(!validation.is_retriable());
        assert!(validation.is_validation());
    }

    #[test]
    fn test_missing_contract_names_the_license() {
        let err = ValidationError::MissingContract {
            license_id: "l2".to_string(),
            license_name: "Premium Lease".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "License 'Premium Lease' (l2) has no contract template"
        );
    }
}
