// State machine module for the publishing wizard
//
// Steps and lifecycle status, the actions that drive them, the reducer that
// applies an action to the form state, and the guards consulted at commit.

pub mod errors;
pub mod events;
pub mod field_path;
pub mod form_state;
pub mod guards;
pub mod states;
pub mod wizard_state_machine;

// Re-export main types for convenient access
pub use errors::{GuardError, StateMachineError};
pub use events::{ProbeOutcome, WizardAction};
pub use field_path::parse_field;
pub use form_state::{ProjectDraft, WizardFormState};
pub use states::{WizardStatus, WizardStep};
pub use wizard_state_machine::{reduce, Transition, WizardEffect};

// Common traits and utilities
pub use guards::{CommitContext, CommitGuard, LicenseContractsGuard, ProbesSettledGuard};
