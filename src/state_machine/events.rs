use crate::models::{
    FileSlot, LibraryFile, LicenseField, ProjectStatus, ProjectType, TrackField, TrackId,
};
use serde::{Deserialize, Serialize};

/// Result of a duration probe as fed back into the reducer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProbeOutcome {
    Measured { duration_secs: u32 },
    Failed { reason: String },
}

impl ProbeOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Measured { .. })
    }
}

/// Actions that drive wizard state transitions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum WizardAction {
    /// Move to the next step
    Advance,
    /// Move to the previous step, keeping all field state
    Retreat,

    SetTitle(String),
    SetDescription(String),
    SetProjectType(ProjectType),
    SetStatus(ProjectStatus),
    SetKey(Option<String>),
    SetCoverImage(Option<String>),
    SetMinBpm(String),
    SetMaxBpm(String),

    AddTag(String),
    RemoveTag(String),
    ToggleGenre(String),
    ToggleSubGenre(String),

    AddTrack,
    RemoveTrack(usize),
    UpdateTrack {
        index: usize,
        field: TrackField,
    },
    /// Bind a library file into one slot of a track
    BindFile {
        track_index: usize,
        slot: FileSlot,
        file: LibraryFile,
    },

    UpdateLicense {
        index: usize,
        field: LicenseField,
    },

    /// A duration probe finished, matched by track id
    ProbeResolved {
        track_id: TrackId,
        outcome: ProbeOutcome,
    },
}

impl WizardAction {
    /// Get a string representation of the action type for logging
    pub fn action_type(&self) -> &'static str {
        match self {
            Self::Advance => "advance",
            Self::Retreat => "retreat",
            Self::SetTitle(_) => "set_title",
            Self::SetDescription(_) => "set_description",
            Self::SetProjectType(_) => "set_project_type",
            Self::SetStatus(_) => "set_status",
            Self::SetKey(_) => "set_key",
            Self::SetCoverImage(_) => "set_cover_image",
            Self::SetMinBpm(_) => "set_min_bpm",
            Self::SetMaxBpm(_) => "set_max_bpm",
            Self::AddTag(_) => "add_tag",
            Self::RemoveTag(_) => "remove_tag",
            Self::ToggleGenre(_) => "toggle_genre",
            Self::ToggleSubGenre(_) => "toggle_sub_genre",
            Self::AddTrack => "add_track",
            Self::RemoveTrack(_) => "remove_track",
            Self::UpdateTrack { .. } => "update_track",
            Self::BindFile { .. } => "bind_file",
            Self::UpdateLicense { .. } => "update_license",
            Self::ProbeResolved { .. } => "probe_resolved",
        }
    }

    /// Probe completions arrive from background tasks, not from the user
    pub fn is_background(&self) -> bool {
        matches!(self, Self::ProbeResolved { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_serde_shape() {
        let action = WizardAction::UpdateTrack {
            index: 0,
            field: TrackField::Title("Intro".to_string()),
        };
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json["type"], "update_track");
        assert_eq!(json["data"]["index"], 0);
        assert_eq!(json["data"]["field"]["field"], "title");

        let parsed: WizardAction = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, action);
    }

    #[test]
    fn test_action_classification() {
        assert!(WizardAction::ProbeResolved {
            track_id: TrackId::from("t1"),
            outcome: ProbeOutcome::Failed {
                reason: "unreadable".to_string()
            },
        }
        .is_background());
        assert_eq!(WizardAction::ToggleSubGenre("Dark".into()).action_type(), "toggle_sub_genre");
    }
}
