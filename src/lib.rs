#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Wizard Core
//!
//! Workflow engine behind a three-step project publishing wizard: details,
//! content, pricing.
//!
//! ## Overview
//!
//! A producer assembles a project (a beat tape, a sound pack or a single
//! release) from files already in their media library, prices it through a
//! fixed set of license tiers and commits it to a persistence collaborator.
//! Track durations are measured by background probes that may finish in any
//! order while the producer keeps editing; commit waits for them.
//!
//! ## Architecture
//!
//! - A **reducer** ([`state_machine::reduce`]) maps `(state, action)` to a new
//!   state plus effects. It never mutates its input, so a rejected action
//!   leaves the form untouched.
//! - The **controller** ([`orchestration::WizardController`]) owns the form
//!   state, runs effects (spawning probes, publishing events) and performs the
//!   commit protocol against the collaborator gateways.
//! - **Duration probes** ([`services::duration_probe`]) run as tokio tasks and
//!   report back by track id over a channel the controller drains.
//!
//! ## Module Organization
//!
//! - [`models`] - Project, track, license and library file records
//! - [`state_machine`] - Steps, actions, reducer and commit guards
//! - [`orchestration`] - Track assembly, license matrix, commit assembly, controller
//! - [`services`] - Duration probing
//! - [`gateways`] - Collaborator traits and in-memory implementations
//! - [`events`] - Lifecycle event publishing
//! - [`config`] - Configuration management
//! - [`error`] - Structured error handling
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use wizard_core::config::WizardConfig;
//! use wizard_core::gateways::memory::{
//!     InMemoryContractCatalog, InMemoryFileStore, InMemoryMediaLibrary, InMemoryProjectStore,
//! };
//! use wizard_core::models::ProjectType;
//! use wizard_core::orchestration::{WizardCollaborators, WizardController};
//! use wizard_core::services::MediaDurationProbe;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let collaborators = WizardCollaborators::new(
//!     Arc::new(InMemoryMediaLibrary::default()),
//!     Arc::new(InMemoryContractCatalog::default()),
//!     Arc::new(InMemoryProjectStore::new()),
//!     Arc::new(InMemoryFileStore::new()),
//!     Arc::new(MediaDurationProbe::new()?),
//! );
//!
//! let mut wizard =
//!     WizardController::open_new(ProjectType::Release, collaborators, WizardConfig::default())?;
//! wizard.refresh_sources().await?;
//! wizard.set_field("title", "Night Drive".into())?;
//! wizard.advance()?;
//! wizard.add_track()?;
//! wizard.settle_probes().await?;
//! let receipt = wizard.commit().await?;
//! println!("stored as {}", receipt.project.id);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod gateways;
pub mod logging;
pub mod models;
pub mod orchestration;
pub mod services;
pub mod state_machine;
pub mod validation;

pub use config::WizardConfig;
pub use error::{Result, ValidationError, WizardError};
pub use events::{EventPublisher, PublishedEvent};
pub use gateways::{GatewayError, GatewayResult};
pub use models::{
    ContractTemplate, FileKind, FileSlot, LibraryFile, LicenseField, LicenseInfo, LicenseType,
    Project, ProjectPayload, ProjectStatus, ProjectType, Track, TrackField, TrackId,
};
pub use orchestration::{CommitReceipt, CommitTarget, WizardCollaborators, WizardController};
pub use services::{DurationProbe, MediaDurationProbe, ProbeError, ProbeReport};
pub use state_machine::{WizardAction, WizardFormState, WizardStatus, WizardStep};
