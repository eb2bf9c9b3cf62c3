//! # Orchestration
//!
//! The wizard's sub-state owners and the controller that drives them.
//!
//! ## Core Components
//!
//! - **WizardController**: Owns the form state, runs reducer effects and the commit protocol
//! - **TrackAssembler**: Binds library files into track slots and derives titles and durations
//! - **InFlightProbeRegistry**: Track ids with an outstanding duration probe
//! - **LicenseMatrix**: The fixed three-tier license structure per project type
//! - **Commit assembly**: Tag merging, BPM normalization and payload construction

pub mod commit;
pub mod license_matrix;
pub mod probe_registry;
pub mod track_assembler;
pub mod wizard_controller;

pub use commit::{merge_tags, normalize_bpm, prepare_commit, CommitPlan, CommitTarget};
pub use license_matrix::LicenseMatrix;
pub use probe_registry::InFlightProbeRegistry;
pub use track_assembler::{BindOutcome, ProbeApplication, TrackAssembler};
pub use wizard_controller::{CommitReceipt, WizardCollaborators, WizardController};
