//! # Commit assembly
//!
//! Turns the wizard form state into a submission payload and decides whether
//! it is a create or an update. Everything here is synchronous and touches no
//! collaborator; the controller dispatches the resulting plan.

use crate::config::WizardConfig;
use crate::constants::{genres, BPM_PLACEHOLDER};
use crate::error::Result;
use crate::models::{ContractTemplate, ProjectPayload};
use crate::state_machine::form_state::WizardFormState;
use crate::state_machine::guards::{
    CommitContext, CommitGuard, LicenseContractsGuard, ProbesSettledGuard,
};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use tracing::{debug, info};

/// Which persistence call a commit dispatches
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CommitTarget {
    Create,
    Update { project_id: String },
}

impl CommitTarget {
    pub fn project_id(&self) -> Option<&str> {
        match self {
            Self::Create => None,
            Self::Update { project_id } => Some(project_id),
        }
    }
}

impl fmt::Display for CommitTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create => write!(f, "create"),
            Self::Update { .. } => write!(f, "update"),
        }
    }
}

/// Validated payload plus where it goes
#[derive(Debug, Clone, PartialEq)]
pub struct CommitPlan {
    pub target: CommitTarget,
    pub payload: ProjectPayload,
}

/// Union of free tags, genres and sub-genres, first occurrence wins
pub fn merge_tags(tags: &[String], genres: &[String], sub_genres: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    tags.iter()
        .chain(genres)
        .chain(sub_genres)
        .filter(|tag| seen.insert(tag.as_str()))
        .cloned()
        .collect()
}

/// Collapse the BPM bounds into the stored representation
///
/// Equal bounds store one value, differing bounds store `"min-max"` as
/// entered, a single bound stores itself and no bound stores `"0"`.
pub fn normalize_bpm(min: &str, max: &str) -> String {
    let (min, max) = (min.trim(), max.trim());

    match (min.is_empty(), max.is_empty()) {
        (true, true) => BPM_PLACEHOLDER.to_string(),
        (false, true) => min.to_string(),
        (true, false) => max.to_string(),
        (false, false) if min == max => min.to_string(),
        (false, false) => format!("{min}-{max}"),
    }
}

/// Run the commit guards and assemble the payload
///
/// Guards run in order: outstanding probes first, then license contracts.
/// Contract existence is only checked when `catalog` is loaded.
pub fn prepare_commit(
    state: &WizardFormState,
    catalog: Option<&[ContractTemplate]>,
    config: &WizardConfig,
) -> Result<CommitPlan> {
    let draft = &state.draft;
    let is_release = draft.project_type.is_release();

    let licenses = if is_release {
        Vec::new()
    } else {
        state.licenses.with_default_names()
    };

    let ctx = CommitContext {
        tracks: &state.tracks,
        licenses: &licenses,
        catalog,
    };
    let guards: [&dyn CommitGuard; 2] = [&ProbesSettledGuard, &LicenseContractsGuard];
    for guard in guards {
        if let Err(err) = guard.check(&ctx) {
            info!(guard = guard.description(), error = %err, "Commit blocked by guard");
            return Err(err.into());
        }
    }

    let mut tracks = state.tracks.tracks().to_vec();
    if is_release {
        tracks.truncate(config.release_track_limit);
    }

    let payload = ProjectPayload {
        title: draft.title.clone(),
        description: draft.description.clone(),
        cover_image: draft.cover_image.clone(),
        project_type: draft.project_type,
        status: draft.status,
        key: draft.key.clone(),
        genre: state
            .selected_genres
            .first()
            .cloned()
            .unwrap_or_else(|| genres::UNKNOWN_GENRE.to_string()),
        sub_genre: state.selected_sub_genres.first().cloned().unwrap_or_default(),
        tags: merge_tags(&draft.tags, &state.selected_genres, &state.selected_sub_genres),
        bpm: normalize_bpm(&state.min_bpm, &state.max_bpm),
        tracks,
        licenses,
    };

    let target = match &draft.existing_id {
        Some(project_id) => CommitTarget::Update {
            project_id: project_id.clone(),
        },
        None => CommitTarget::Create,
    };

    debug!(
        target = %target,
        project_type = %payload.project_type,
        tracks = payload.tracks.len(),
        licenses = payload.licenses.len(),
        "Commit payload assembled"
    );

    Ok(CommitPlan { target, payload })
}
