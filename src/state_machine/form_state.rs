//! Step-local fields plus the project draft, owned by the wizard controller.

use super::states::{WizardStatus, WizardStep};
use crate::config::WizardConfig;
use crate::constants::genres;
use crate::models::{Project, ProjectStatus, ProjectType};
use crate::orchestration::license_matrix::LicenseMatrix;
use crate::orchestration::track_assembler::TrackAssembler;
use crate::validation::split_stored_bpm;
use serde::Serialize;

/// Scalar project fields edited on the details step
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProjectDraft {
    /// Set when the wizard edits an existing project
    pub existing_id: Option<String>,
    pub title: String,
    pub description: String,
    pub cover_image: Option<String>,
    pub project_type: ProjectType,
    pub status: ProjectStatus,
    pub key: Option<String>,
    /// Free-form tags, deduplicated, in insertion order
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WizardFormState {
    pub step: WizardStep,
    pub status: WizardStatus,
    pub draft: ProjectDraft,
    pub selected_genres: Vec<String>,
    pub selected_sub_genres: Vec<String>,
    pub min_bpm: String,
    pub max_bpm: String,
    pub tracks: TrackAssembler,
    pub licenses: LicenseMatrix,
}

impl WizardFormState {
    /// Empty draft for a new project of `project_type`
    pub fn new(project_type: ProjectType) -> Self {
        Self {
            step: WizardStep::Details,
            status: WizardStatus::Open,
            draft: ProjectDraft {
                project_type,
                ..Default::default()
            },
            selected_genres: Vec::new(),
            selected_sub_genres: Vec::new(),
            min_bpm: String::new(),
            max_bpm: String::new(),
            tracks: TrackAssembler::new(),
            licenses: LicenseMatrix::seeded_for(project_type),
        }
    }

    /// Pre-populate from a stored project for editing
    pub fn from_project(project: &Project, config: &WizardConfig) -> Self {
        let mut selected_genres = Vec::new();
        let mut selected_sub_genres = Vec::new();
        let mut tags: Vec<String> = Vec::new();

        let push_unique = |list: &mut Vec<String>, value: &str, cap: usize| -> bool {
            if list.len() < cap && !list.iter().any(|v| v == value) {
                list.push(value.to_string());
                return true;
            }
            false
        };

        if !project.genre.is_empty() && project.genre != genres::UNKNOWN_GENRE {
            push_unique(&mut selected_genres, &project.genre, config.max_genres);
        }
        if !project.sub_genre.is_empty() {
            push_unique(&mut selected_sub_genres, &project.sub_genre, config.max_sub_genres);
        }

        for tag in &project.tags {
            if selected_genres.contains(tag) || selected_sub_genres.contains(tag) {
                continue;
            }
            let placed = if genres::is_known_genre(tag) {
                push_unique(&mut selected_genres, tag, config.max_genres)
            } else if genres::is_known_sub_genre(tag) {
                push_unique(&mut selected_sub_genres, tag, config.max_sub_genres)
            } else {
                false
            };

            if !placed && !push_unique(&mut tags, tag, config.max_tags) {
                tracing::debug!(project_id = %project.id, tag = %tag, "Dropping tag beyond hydration limits");
            }
        }

        let (min_bpm, max_bpm) = split_stored_bpm(&project.bpm);

        let mut licenses = LicenseMatrix::from_licenses(project.licenses.clone());
        licenses.ensure_seeded(project.project_type);

        Self {
            step: WizardStep::Details,
            status: WizardStatus::Open,
            draft: ProjectDraft {
                existing_id: Some(project.id.clone()),
                title: project.title.clone(),
                description: project.description.clone(),
                cover_image: project.cover_image.clone(),
                project_type: project.project_type,
                status: project.status,
                key: project.key.clone(),
                tags,
            },
            selected_genres,
            selected_sub_genres,
            min_bpm,
            max_bpm,
            tracks: TrackAssembler::from_tracks(project.tracks.clone()),
            licenses,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.draft.existing_id.is_some()
    }

    pub fn project_type(&self) -> ProjectType {
        self.draft.project_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Track;

    fn stored_project() -> Project {
        Project {
            id: "p1".to_string(),
            title: "Night Drive".to_string(),
            description: "Late night tape".to_string(),
            cover_image: None,
            project_type: ProjectType::BeatTape,
            status: ProjectStatus::Published,
            key: Some("Am".to_string()),
            genre: "Trap".to_string(),
            sub_genre: "Dark".to_string(),
            tags: vec![
                "Trap".to_string(),
                "Dark".to_string(),
                "Lofi".to_string(),
                "night".to_string(),
                "drive".to_string(),
            ],
            bpm: "120-140".to_string(),
            tracks: vec![Track::new()],
            licenses: Vec::new(),
        }
    }

    #[test]
    fn test_new_state_seeds_licenses() {
        let state = WizardFormState::new(ProjectType::BeatTape);
        assert_eq!(state.step, WizardStep::Details);
        assert_eq!(state.licenses.len(), 3);
        assert!(!state.is_editing());

        let release = WizardFormState::new(ProjectType::Release);
        assert!(release.licenses.is_empty());
    }

    #[test]
    fn test_hydration_from_existing_project() {
        let state = WizardFormState::from_project(&stored_project(), &WizardConfig::default());

        assert!(state.is_editing());
        assert_eq!(state.selected_genres, vec!["Trap", "Lofi"]);
        assert_eq!(state.selected_sub_genres, vec!["Dark"]);
        assert_eq!(state.draft.tags, vec!["night", "drive"]);
        assert_eq!(state.min_bpm, "120");
        assert_eq!(state.max_bpm, "140");
        assert_eq!(state.tracks.len(), 1);
        assert!(state.tracks.registry().is_empty());
        // Stored project had no licenses; the beat-tape tiers are seeded
        assert_eq!(state.licenses.len(), 3);
    }
}
