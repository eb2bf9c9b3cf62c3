use super::states::{WizardStatus, WizardStep};
use crate::models::TrackId;
use thiserror::Error;

/// Errors raised by the wizard reducer itself
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StateMachineError {
    #[error("Invalid transition from step {from}: {action}")]
    InvalidTransition { from: WizardStep, action: String },

    #[error("Wizard is no longer open (status: {status})")]
    WizardClosed { status: WizardStatus },

    #[error("Invalid field {path}: {reason}")]
    InvalidField { path: String, reason: String },

    #[error("Operation requires a wizard opened on an existing project")]
    NotEditing,
}

/// Reasons a commit guard refuses to let a commit through
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GuardError {
    #[error("Duration probes outstanding for {} track(s)", pending.len())]
    ProbesOutstanding { pending: Vec<TrackId> },

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
}

pub type StateMachineResult<T> = Result<T, StateMachineError>;
pub type GuardResult<T> = Result<T, GuardError>;

impl From<GuardError> for crate::error::WizardError {
    fn from(err: GuardError) -> Self {
        use crate::error::ValidationError;

        match err {
            GuardError::ProbesOutstanding { pending } => Self::ProbeInProgress { pending },
            GuardError::MissingContract {
                license_id,
                license_name,
            } => Self::Validation(ValidationError::MissingContract {
                license_id,
                license_name,
            }),
            GuardError::UnknownContract {
                license_id,
                contract_id,
            } => Self::Validation(ValidationError::UnknownContract {
                license_id,
                contract_id,
            }),
        }
    }
}

/// Helper for field parsing failures
pub fn invalid_field(path: impl Into<String>, reason: impl Into<String>) -> StateMachineError {
    StateMachineError::InvalidField {
        path: path.into(),
        reason: reason.into(),
    }
}
