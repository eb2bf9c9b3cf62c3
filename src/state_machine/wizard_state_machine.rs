//! # Wizard reducer
//!
//! A single transition function from `(state, action)` to a new state plus the
//! side effects the controller must carry out. The input state is never
//! mutated, so a rejected action leaves the caller's state exactly as it was.

use super::errors::StateMachineError;
use super::events::WizardAction;
use super::form_state::WizardFormState;
use super::states::WizardStep;
use crate::config::WizardConfig;
use crate::error::{Result, ValidationError};
use crate::models::{ProjectType, TrackId};
use crate::orchestration::track_assembler::{BindOutcome, ProbeApplication};
use crate::validation::{normalize_bpm_bound, normalize_tag};
use tracing::debug;

/// Work the controller performs after adopting a new state
#[derive(Debug, Clone, PartialEq)]
pub enum WizardEffect {
    /// Spawn a duration probe; the track id is already registered
    StartProbe { track_id: TrackId, url: String },
    StepChanged { from: WizardStep, to: WizardStep },
    /// Tracks cut by the release cap
    TracksTruncated { removed: Vec<TrackId> },
    ProbeApplied {
        track_id: TrackId,
        application: ProbeApplication,
    },
}

#[derive(Debug, Clone)]
pub struct Transition {
    pub state: WizardFormState,
    pub effects: Vec<WizardEffect>,
}

impl Transition {
    fn unchanged(state: &WizardFormState) -> Self {
        Self {
            state: state.clone(),
            effects: Vec::new(),
        }
    }
}

/// Apply `action` to `state`
pub fn reduce(
    state: &WizardFormState,
    action: WizardAction,
    config: &WizardConfig,
) -> Result<Transition> {
    if !state.status.accepts_edits() {
        if action.is_background() {
            debug!(status = %state.status, "Ignoring probe completion for a closed wizard");
            return Ok(Transition::unchanged(state));
        }
        return Err(StateMachineError::WizardClosed {
            status: state.status,
        }
        .into());
    }

    let mut next = state.clone();
    let mut effects = Vec::new();

    match action {
        WizardAction::Advance => {
            let from = next.step;
            let to = from.next().ok_or_else(|| StateMachineError::InvalidTransition {
                from,
                action: "advance".to_string(),
            })?;
            next.step = to;
            if to == WizardStep::Content {
                apply_release_cap(&mut next, config, &mut effects);
            }
            effects.push(WizardEffect::StepChanged { from, to });
        }
        WizardAction::Retreat => {
            let from = next.step;
            let to = from
                .previous()
                .ok_or_else(|| StateMachineError::InvalidTransition {
                    from,
                    action: "retreat".to_string(),
                })?;
            next.step = to;
            effects.push(WizardEffect::StepChanged { from, to });
        }

        WizardAction::SetTitle(title) => next.draft.title = title,
        WizardAction::SetDescription(description) => next.draft.description = description,
        WizardAction::SetProjectType(project_type) => {
            set_project_type(&mut next, project_type, config, &mut effects);
        }
        WizardAction::SetStatus(status) => next.draft.status = status,
        WizardAction::SetKey(key) => next.draft.key = non_blank(key),
        WizardAction::SetCoverImage(url) => next.draft.cover_image = non_blank(url),
        WizardAction::SetMinBpm(raw) => next.min_bpm = normalize_bpm_bound(&raw)?,
        WizardAction::SetMaxBpm(raw) => next.max_bpm = normalize_bpm_bound(&raw)?,

        WizardAction::AddTag(raw) => {
            let tag = normalize_tag(&raw)?;
            if !next.draft.tags.contains(&tag) {
                if next.draft.tags.len() >= config.max_tags {
                    return Err(ValidationError::TagLimitReached {
                        limit: config.max_tags,
                    }
                    .into());
                }
                next.draft.tags.push(tag);
            }
        }
        WizardAction::RemoveTag(raw) => {
            let tag = raw.trim();
            next.draft.tags.retain(|existing| existing != tag);
        }
        WizardAction::ToggleGenre(genre) => {
            toggle_selection(&mut next.selected_genres, &genre, config.max_genres, "genre")?;
        }
        WizardAction::ToggleSubGenre(sub_genre) => {
            toggle_selection(
                &mut next.selected_sub_genres,
                &sub_genre,
                config.max_sub_genres,
                "sub-genre",
            )?;
        }

        WizardAction::AddTrack => {
            let project_type = next.project_type();
            next.tracks
                .add_track(project_type, config.release_track_limit)?;
        }
        WizardAction::RemoveTrack(index) => {
            next.tracks.remove_track(index)?;
        }
        WizardAction::UpdateTrack { index, field } => {
            next.tracks.update_track_field(index, field)?;
        }
        WizardAction::BindFile {
            track_index,
            slot,
            file,
        } => {
            let outcome =
                next.tracks
                    .bind_file(track_index, slot, &file, config.fallback_duration_secs)?;
            if let BindOutcome::ProbeRequired { track_id, url } = outcome {
                effects.push(WizardEffect::StartProbe { track_id, url });
            }
        }

        WizardAction::UpdateLicense { index, field } => {
            next.licenses.update_license(index, field)?;
        }

        WizardAction::ProbeResolved { track_id, outcome } => {
            let application = next.tracks.apply_probe_outcome(
                &track_id,
                &outcome,
                config.fallback_duration_secs,
            );
            effects.push(WizardEffect::ProbeApplied {
                track_id,
                application,
            });
        }
    }

    Ok(Transition {
        state: next,
        effects,
    })
}

fn set_project_type(
    state: &mut WizardFormState,
    project_type: ProjectType,
    config: &WizardConfig,
    effects: &mut Vec<WizardEffect>,
) {
    state.draft.project_type = project_type;

    if project_type.is_release() {
        if state.step != WizardStep::Details {
            apply_release_cap(state, config, effects);
        }
    } else if state.licenses.ensure_seeded(project_type) {
        debug!(project_type = %project_type, "Seeded default license tiers");
    }
}

fn apply_release_cap(
    state: &mut WizardFormState,
    config: &WizardConfig,
    effects: &mut Vec<WizardEffect>,
) {
    if !state.project_type().is_release() {
        return;
    }

    let removed = state.tracks.enforce_track_limit(config.release_track_limit);
    if !removed.is_empty() {
        debug!(removed = removed.len(), "Release track cap applied");
        effects.push(WizardEffect::TracksTruncated {
            removed: removed.into_iter().map(|track| track.id).collect(),
        });
    }
}

fn toggle_selection(
    selected: &mut Vec<String>,
    value: &str,
    limit: usize,
    kind: &'static str,
) -> std::result::Result<(), ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(());
    }

    if let Some(position) = selected.iter().position(|existing| existing == value) {
        selected.remove(position);
        return Ok(());
    }

    if selected.len() >= limit {
        return Err(ValidationError::GenreLimitReached { kind, limit });
    }
    selected.push(value.to_string());
    Ok(())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
