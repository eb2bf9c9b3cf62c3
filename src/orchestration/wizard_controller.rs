//! # Wizard Controller
//!
//! Sole owner of the wizard's form state. Every edit goes through the reducer;
//! the controller adopts the resulting state and performs the effects it
//! returns: spawning duration probes, publishing lifecycle events, logging.
//!
//! ## Probe reports
//!
//! Probe tasks report over an unbounded channel whose receiver lives here.
//! Reports are only applied when the controller asks for them
//! ([`WizardController::pump_probe_reports`], [`WizardController::next_probe_report`],
//! [`WizardController::settle_probes`], and implicitly at the start of
//! [`WizardController::commit`]), so state is never mutated from another task.
//! Dropping the controller drops the receiver and late reports vanish with it.

use crate::config::WizardConfig;
use crate::constants::events;
use crate::error::{Result, ValidationError, WizardError};
use crate::events::EventPublisher;
use crate::gateways::{
    ContractCatalogGateway, FileUpload, FileUploadGateway, MediaLibraryGateway,
    ProjectPersistenceGateway,
};
use crate::logging::{log_commit_operation, log_error, log_probe_operation, log_wizard_operation};
use crate::models::{
    ContractTemplate, FileKind, FileSlot, LibraryFile, LicenseField, LicenseInfo, Project,
    ProjectPayload, ProjectType, Track, TrackField,
};
use crate::orchestration::commit::{prepare_commit, CommitPlan, CommitTarget};
use crate::orchestration::track_assembler::ProbeApplication;
use crate::services::duration_probe::{spawn_probe, DurationProbe, ProbeReport};
use crate::state_machine::errors::StateMachineError;
use crate::state_machine::field_path::parse_field;
use crate::state_machine::{
    reduce, ProbeOutcome, WizardAction, WizardEffect, WizardFormState, WizardStatus, WizardStep,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

/// External services the wizard calls
#[derive(Clone)]
pub struct WizardCollaborators {
    pub media: Arc<dyn MediaLibraryGateway>,
    pub contracts: Arc<dyn ContractCatalogGateway>,
    pub projects: Arc<dyn ProjectPersistenceGateway>,
    pub uploads: Arc<dyn FileUploadGateway>,
    pub probe: Arc<dyn DurationProbe>,
    /// Shared publisher; when unset the controller creates one sized by
    /// `WizardConfig::event_channel_capacity`
    pub events: Option<EventPublisher>,
}

impl WizardCollaborators {
    pub fn new(
        media: Arc<dyn MediaLibraryGateway>,
        contracts: Arc<dyn ContractCatalogGateway>,
        projects: Arc<dyn ProjectPersistenceGateway>,
        uploads: Arc<dyn FileUploadGateway>,
        probe: Arc<dyn DurationProbe>,
    ) -> Self {
        Self {
            media,
            contracts,
            projects,
            uploads,
            probe,
            events: None,
        }
    }

    /// Publish lifecycle events through `events` instead of a private channel
    pub fn with_event_publisher(mut self, events: EventPublisher) -> Self {
        self.events = Some(events);
        self
    }
}

/// What a successful commit produced
#[derive(Debug, Clone, PartialEq)]
pub struct CommitReceipt {
    pub target: CommitTarget,
    pub payload: ProjectPayload,
    /// Project as returned by the persistence gateway
    pub project: Project,
}

pub struct WizardController {
    state: WizardFormState,
    config: WizardConfig,
    collaborators: WizardCollaborators,
    events: EventPublisher,
    reports_tx: mpsc::UnboundedSender<ProbeReport>,
    reports_rx: mpsc::UnboundedReceiver<ProbeReport>,
    library: Vec<LibraryFile>,
    catalog: Option<Vec<ContractTemplate>>,
}

impl WizardController {
    /// Open the wizard on an empty draft
    pub fn open_new(
        project_type: ProjectType,
        collaborators: WizardCollaborators,
        config: WizardConfig,
    ) -> Result<Self> {
        config.validate()?;
        let controller = Self::with_state(WizardFormState::new(project_type), collaborators, config);
        controller.announce_open("create", None);
        Ok(controller)
    }

    /// Open the wizard pre-populated from a stored project
    pub fn open_existing(
        project: &Project,
        collaborators: WizardCollaborators,
        config: WizardConfig,
    ) -> Result<Self> {
        config.validate()?;
        let state = WizardFormState::from_project(project, &config);
        let controller = Self::with_state(state, collaborators, config);
        controller.announce_open("edit", Some(&project.id));
        Ok(controller)
    }

    fn with_state(
        state: WizardFormState,
        collaborators: WizardCollaborators,
        config: WizardConfig,
    ) -> Self {
        let (reports_tx, reports_rx) = mpsc::unbounded_channel();
        let events = collaborators
            .events
            .clone()
            .unwrap_or_else(|| EventPublisher::new(config.event_channel_capacity));
        Self {
            state,
            config,
            collaborators,
            events,
            reports_tx,
            reports_rx,
            library: Vec::new(),
            catalog: None,
        }
    }

    fn announce_open(&self, mode: &str, project_id: Option<&str>) {
        log_wizard_operation("open", project_id, Some("details"), "open", Some(mode));
        self.publish(
            events::WIZARD_OPENED,
            json!({
                "mode": mode,
                "project_id": project_id,
                "project_type": self.state.project_type().to_string(),
            }),
        );
    }

    // ---------------------------------------------------------------
    // Accessors
    // ---------------------------------------------------------------

    pub fn state(&self) -> &WizardFormState {
        &self.state
    }

    pub fn step(&self) -> WizardStep {
        self.state.step
    }

    pub fn status(&self) -> WizardStatus {
        self.state.status
    }

    pub fn config(&self) -> &WizardConfig {
        &self.config
    }

    pub fn tracks(&self) -> &[Track] {
        self.state.tracks.tracks()
    }

    pub fn licenses(&self) -> &[LicenseInfo] {
        self.state.licenses.licenses()
    }

    pub fn is_editing(&self) -> bool {
        self.state.is_editing()
    }

    pub fn library(&self) -> &[LibraryFile] {
        &self.library
    }

    /// Contract templates, once loaded by [`Self::refresh_sources`]
    pub fn catalog(&self) -> Option<&[ContractTemplate]> {
        self.catalog.as_deref()
    }

    /// Licenses still lacking a contract template, for live hints
    pub fn missing_contracts(&self) -> Vec<&LicenseInfo> {
        self.state.licenses.missing_contracts()
    }

    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<crate::events::PublishedEvent> {
        self.events.subscribe()
    }

    // ---------------------------------------------------------------
    // Edits
    // ---------------------------------------------------------------

    /// Apply one action through the reducer
    pub fn dispatch(&mut self, action: WizardAction) -> Result<()> {
        let action_type = action.action_type();
        let transition = match reduce(&self.state, action, &self.config) {
            Ok(transition) => transition,
            Err(err) => {
                debug!(action = action_type, step = %self.state.step, error = %err, "Action rejected");
                return Err(err);
            }
        };

        self.state = transition.state;
        for effect in transition.effects {
            self.run_effect(effect);
        }
        Ok(())
    }

    pub fn advance(&mut self) -> Result<()> {
        self.dispatch(WizardAction::Advance)
    }

    pub fn retreat(&mut self) -> Result<()> {
        self.dispatch(WizardAction::Retreat)
    }

    /// Set a field addressed by path, e.g. `tracks[0].title` or `bpm.min`
    pub fn set_field(&mut self, path: &str, value: Value) -> Result<()> {
        let action = parse_field(path, value)?;
        self.dispatch(action)
    }

    pub fn add_track(&mut self) -> Result<()> {
        self.dispatch(WizardAction::AddTrack)
    }

    pub fn remove_track(&mut self, index: usize) -> Result<()> {
        self.dispatch(WizardAction::RemoveTrack(index))
    }

    pub fn update_track_field(&mut self, index: usize, field: TrackField) -> Result<()> {
        self.dispatch(WizardAction::UpdateTrack { index, field })
    }

    /// Bind the library file `file_id` into `slot` of the track at `track_index`
    pub fn bind_file(&mut self, track_index: usize, slot: FileSlot, file_id: &str) -> Result<()> {
        let file = self
            .library
            .iter()
            .find(|file| file.id == file_id)
            .cloned()
            .ok_or_else(|| ValidationError::UnknownLibraryFile {
                file_id: file_id.to_string(),
            })?;

        self.dispatch(WizardAction::BindFile {
            track_index,
            slot,
            file,
        })
    }

    pub fn update_license(&mut self, index: usize, field: LicenseField) -> Result<()> {
        self.dispatch(WizardAction::UpdateLicense { index, field })
    }

    // ---------------------------------------------------------------
    // Library browsing
    // ---------------------------------------------------------------

    /// Load the user's files and the contract catalog concurrently
    #[instrument(skip(self))]
    pub async fn refresh_sources(&mut self) -> Result<()> {
        let (entries, templates) = futures::try_join!(
            self.collaborators.media.list_user_files(),
            self.collaborators.contracts.list_contract_templates(),
        )?;

        self.library = entries.into_iter().map(LibraryFile::from).collect();
        self.catalog = Some(templates);

        debug!(
            files = self.library.len(),
            templates = self.catalog.as_ref().map_or(0, Vec::len),
            "Wizard sources refreshed"
        );
        Ok(())
    }

    /// Files that may be bound into `slot`
    ///
    /// `mp3` and `wav` take audio files; `stems` takes archives or audio.
    pub fn library_files_for_slot(&self, slot: FileSlot) -> Vec<&LibraryFile> {
        self.library
            .iter()
            .filter(|file| match slot {
                FileSlot::Mp3 | FileSlot::Wav => file.kind == FileKind::Audio,
                FileSlot::Stems => matches!(file.kind, FileKind::Archive | FileKind::Audio),
            })
            .collect()
    }

    /// The library list as currently shown
    pub fn visible_library_files(&self, show_all: bool) -> &[LibraryFile] {
        if show_all {
            &self.library
        } else {
            let shown = self.library.len().min(self.config.initial_visible_files);
            &self.library[..shown]
        }
    }

    /// Upload a cover image and store its public URL on the draft
    #[instrument(skip(self, upload), fields(file_name = %upload.file_name))]
    pub async fn upload_cover(&mut self, upload: FileUpload) -> Result<String> {
        self.ensure_open()?;
        let uploaded = self.collaborators.uploads.upload_file(upload).await?;
        self.dispatch(WizardAction::SetCoverImage(Some(uploaded.public_url.clone())))?;
        Ok(uploaded.public_url)
    }

    // ---------------------------------------------------------------
    // Probe reports
    // ---------------------------------------------------------------

    /// Apply every probe report that has already arrived
    pub fn pump_probe_reports(&mut self) -> Result<usize> {
        let mut applied = 0;
        while let Ok(report) = self.reports_rx.try_recv() {
            self.apply_report(report)?;
            applied += 1;
        }
        Ok(applied)
    }

    /// Wait for the next probe report and apply it
    pub async fn next_probe_report(&mut self) -> Result<Option<ProbeReport>> {
        match self.reports_rx.recv().await {
            Some(report) => {
                self.apply_report(report.clone())?;
                Ok(Some(report))
            }
            None => Ok(None),
        }
    }

    /// Wait until no current track has an outstanding probe
    pub async fn settle_probes(&mut self) -> Result<()> {
        while !self.state.tracks.probes_settled() {
            if self.next_probe_report().await?.is_none() {
                break;
            }
        }
        Ok(())
    }

    fn apply_report(&mut self, report: ProbeReport) -> Result<()> {
        self.dispatch(WizardAction::ProbeResolved {
            track_id: report.track_id,
            outcome: report.outcome,
        })
    }

    // ---------------------------------------------------------------
    // Commit and close
    // ---------------------------------------------------------------

    /// Validate, normalize and persist the draft
    ///
    /// On success the wizard closes. On a guard or persistence failure it stays
    /// open with every field intact so the call can be retried.
    #[instrument(skip(self), fields(project_type = %self.state.project_type()))]
    pub async fn commit(&mut self) -> Result<CommitReceipt> {
        self.pump_probe_reports()?;
        self.ensure_open()?;

        let plan = match prepare_commit(&self.state, self.catalog.as_deref(), &self.config) {
            Ok(plan) => plan,
            Err(err) => {
                self.publish(
                    events::COMMIT_BLOCKED,
                    json!({ "reason": err.to_string(), "retriable": err.is_retriable() }),
                );
                return Err(err);
            }
        };

        self.state.status = WizardStatus::Submitting;
        let CommitPlan { target, payload } = plan;
        let started = Instant::now();

        let result = match &target {
            CommitTarget::Create => self.collaborators.projects.create_project(&payload).await,
            CommitTarget::Update { project_id } => {
                self.collaborators
                    .projects
                    .update_project(project_id, &payload)
                    .await
            }
        };
        let duration_ms = started.elapsed().as_millis() as u64;
        let project_type = payload.project_type.to_string();

        match result {
            Ok(project) => {
                self.state.status = WizardStatus::Committed;
                log_commit_operation(
                    &target.to_string(),
                    Some(&project.id),
                    &project_type,
                    "committed",
                    Some(duration_ms),
                    None,
                );
                self.publish(
                    events::COMMITTED,
                    json!({
                        "target": target,
                        "project_id": project.id,
                        "tracks": payload.tracks.len(),
                        "licenses": payload.licenses.len(),
                    }),
                );
                Ok(CommitReceipt {
                    target,
                    payload,
                    project,
                })
            }
            Err(err) => {
                self.state.status = WizardStatus::Open;
                log_error(
                    "wizard_controller",
                    "commit",
                    &err.to_string(),
                    target.project_id(),
                );
                self.publish(
                    events::COMMIT_FAILED,
                    json!({ "target": target, "error": err.to_string() }),
                );
                Err(WizardError::Persistence(err))
            }
        }
    }

    /// Abandon the wizard; outstanding probes resolve into nothing
    pub fn cancel(&mut self) -> Result<()> {
        if self.state.status.is_terminal() {
            return Err(StateMachineError::WizardClosed {
                status: self.state.status,
            }
            .into());
        }

        self.state.status = WizardStatus::Cancelled;
        log_wizard_operation(
            "cancel",
            self.state.draft.existing_id.as_deref(),
            Some(&self.state.step.to_string()),
            "cancelled",
            None,
        );
        self.publish(events::WIZARD_CANCELLED, json!({ "step": self.state.step }));
        Ok(())
    }

    /// Delete the project being edited and close the wizard
    #[instrument(skip(self))]
    pub async fn delete(&mut self) -> Result<()> {
        self.ensure_open()?;
        let project_id = self
            .state
            .draft
            .existing_id
            .clone()
            .ok_or(StateMachineError::NotEditing)?;

        if let Err(err) = self.collaborators.projects.delete_project(&project_id).await {
            log_error("wizard_controller", "delete", &err.to_string(), Some(&project_id));
            return Err(err.into());
        }

        self.state.status = WizardStatus::Deleted;
        log_wizard_operation("delete", Some(&project_id), None, "deleted", None);
        self.publish(events::PROJECT_DELETED, json!({ "project_id": project_id }));
        Ok(())
    }

    fn ensure_open(&self) -> Result<()> {
        if !self.state.status.accepts_edits() {
            return Err(StateMachineError::WizardClosed {
                status: self.state.status,
            }
            .into());
        }
        Ok(())
    }

    // ---------------------------------------------------------------
    // Effects
    // ---------------------------------------------------------------

    fn run_effect(&self, effect: WizardEffect) {
        match effect {
            WizardEffect::StartProbe { track_id, url } => {
                log_probe_operation("start", track_id.as_str(), "pending", None, Some(&url));
                self.publish(
                    events::PROBE_STARTED,
                    json!({ "track_id": track_id, "url": url }),
                );
                if tokio::runtime::Handle::try_current().is_err() {
                    warn!(track_id = %track_id, "No async runtime, probe reported as failed");
                    let report = ProbeReport {
                        track_id,
                        outcome: ProbeOutcome::Failed {
                            reason: "no async runtime available".to_string(),
                        },
                    };
                    let _ = self.reports_tx.send(report);
                    return;
                }
                spawn_probe(
                    Arc::clone(&self.collaborators.probe),
                    track_id,
                    url,
                    self.config.probe_timeout(),
                    self.reports_tx.clone(),
                );
            }
            WizardEffect::StepChanged { from, to } => {
                info!(from = %from, to = %to, "Wizard step changed");
                self.publish(
                    events::WIZARD_STEP_CHANGED,
                    json!({ "from": from, "to": to }),
                );
            }
            WizardEffect::TracksTruncated { removed } => {
                info!(
                    removed = removed.len(),
                    limit = self.config.release_track_limit,
                    "Tracks removed by release cap"
                );
            }
            WizardEffect::ProbeApplied {
                track_id,
                application,
            } => match application {
                ProbeApplication::Updated { duration_secs } => {
                    log_probe_operation("resolve", track_id.as_str(), "measured", Some(duration_secs), None);
                    self.publish(
                        events::PROBE_RESOLVED,
                        json!({ "track_id": track_id, "duration_secs": duration_secs }),
                    );
                }
                ProbeApplication::FellBack { duration_secs } => {
                    log_probe_operation("resolve", track_id.as_str(), "fallback", Some(duration_secs), None);
                    self.publish(
                        events::PROBE_FAILED,
                        json!({ "track_id": track_id, "duration_secs": duration_secs }),
                    );
                }
                ProbeApplication::Dropped => {
                    debug!(track_id = %track_id, "Probe report dropped for removed track");
                }
            },
        }
    }

    fn publish(&self, name: &str, context: Value) {
        self.events.publish(name, context);
    }
}

impl Drop for WizardController {
    fn drop(&mut self) {
        let pending = self.state.tracks.outstanding_probes().len();
        if pending > 0 && !self.state.status.is_terminal() {
            warn!(pending, "Wizard dropped with duration probes outstanding");
        }
    }
}
