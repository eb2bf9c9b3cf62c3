use proptest::prelude::*;
use proptest::strategy::Just;
use wizard_core::models::ProjectType;
use wizard_core::state_machine::WizardAction;

/// Strategy for generating short free-form tags, duplicates likely
pub fn tag_strategy() -> impl Strategy<Value = String> {
    "[a-e]{1,2}"
}

/// Strategy for generating tag lists of any length
pub fn tag_list_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(tag_strategy(), 0..8)
}

/// Strategy for generating a valid BPM bound
pub fn bpm_strategy() -> impl Strategy<Value = u32> {
    1u32..=999
}

/// Strategy for generating a BPM field as typed, empty allowed
pub fn bpm_field_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        bpm_strategy().prop_map(|bpm| bpm.to_string()),
    ]
}

pub fn project_type_strategy() -> impl Strategy<Value = ProjectType> {
    prop_oneof![
        Just(ProjectType::BeatTape),
        Just(ProjectType::SoundPack),
        Just(ProjectType::Release),
    ]
}

/// Strategy for generating optional contract references, blanks included
pub fn contract_ref_strategy() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some("   ".to_string())),
        Just(Some("c-standard".to_string())),
        Just(Some("c-exclusive".to_string())),
    ]
}

/// Strategy for generating track-editing and navigation actions
pub fn track_action_strategy() -> impl Strategy<Value = WizardAction> {
    prop_oneof![
        4 => Just(WizardAction::AddTrack),
        1 => (0usize..3).prop_map(WizardAction::RemoveTrack),
        1 => Just(WizardAction::Advance),
        1 => Just(WizardAction::Retreat),
        1 => project_type_strategy().prop_map(WizardAction::SetProjectType),
    ]
}

pub fn track_action_sequence_strategy() -> impl Strategy<Value = Vec<WizardAction>> {
    prop::collection::vec(track_action_strategy(), 0..24)
}
