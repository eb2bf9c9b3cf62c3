mod common;

use common::strategies::*;
use proptest::prelude::*;
use std::collections::HashSet;
use wizard_core::config::WizardConfig;
use wizard_core::error::{ValidationError, WizardError};
use wizard_core::models::{LicenseField, ProjectType};
use wizard_core::orchestration::{merge_tags, normalize_bpm, prepare_commit};
use wizard_core::state_machine::{reduce, WizardAction, WizardFormState};

fn as_set(values: &[String]) -> HashSet<&str> {
    values.iter().map(String::as_str).collect()
}

/// Apply actions, skipping the ones the reducer rejects
fn run_actions(mut state: WizardFormState, actions: Vec<WizardAction>) -> WizardFormState {
    let config = WizardConfig::default();
    for action in actions {
        if let Ok(transition) = reduce(&state, action, &config) {
            state = transition.state;
        }
    }
    state
}

proptest! {
    /// Property: merged tags are the deduplicated union of all three sources
    #[test]
    fn merged_tags_are_deduplicated_union(
        tags in tag_list_strategy(),
        genres in tag_list_strategy(),
        sub_genres in tag_list_strategy(),
    ) {
        let merged = merge_tags(&tags, &genres, &sub_genres);

        let unique: HashSet<&str> = as_set(&merged);
        prop_assert_eq!(unique.len(), merged.len(), "duplicates in {:?}", merged);

        let expected: HashSet<&str> = as_set(&tags)
            .into_iter()
            .chain(as_set(&genres))
            .chain(as_set(&sub_genres))
            .collect();
        prop_assert_eq!(unique, expected);
    }

    /// Property: the merged set does not depend on insertion order
    #[test]
    fn merged_tags_ignore_insertion_order(
        tags in tag_list_strategy(),
        genres in tag_list_strategy(),
    ) {
        let mut reversed = tags.clone();
        reversed.reverse();

        let forward = merge_tags(&tags, &genres, &[]);
        let backward = merge_tags(&reversed, &genres, &[]);
        prop_assert_eq!(as_set(&forward), as_set(&backward));
    }

    /// Property: BPM bounds collapse per the storage rules, order kept
    #[test]
    fn bpm_normalization_rules(min in bpm_strategy(), max in bpm_strategy()) {
        let (min_s, max_s) = (min.to_string(), max.to_string());

        prop_assert_eq!(normalize_bpm(&min_s, &min_s), min_s.clone());
        prop_assert_eq!(normalize_bpm(&min_s, ""), min_s.clone());
        prop_assert_eq!(normalize_bpm("", &max_s), max_s.clone());
        prop_assert_eq!(normalize_bpm("", ""), "0");

        if min != max {
            let expected = format!("{min}-{max}");
            prop_assert_eq!(normalize_bpm(&min_s, &max_s), expected);
        }
    }

    /// Property: a release never holds more than one track
    #[test]
    fn release_never_exceeds_track_cap(actions in track_action_sequence_strategy()) {
        let config = WizardConfig::default();
        let mut state = WizardFormState::new(ProjectType::Release);

        for action in actions {
            if matches!(action, WizardAction::SetProjectType(_)) {
                continue;
            }
            if let Ok(transition) = reduce(&state, action, &config) {
                state = transition.state;
            }
            prop_assert!(state.tracks.len() <= config.release_track_limit);
        }
    }

    /// Property: a release commits with at most one track and no licenses,
    /// whatever type switching happened before
    #[test]
    fn release_payload_is_capped(mut actions in track_action_sequence_strategy()) {
        actions.push(WizardAction::SetProjectType(ProjectType::Release));
        let state = run_actions(WizardFormState::new(ProjectType::BeatTape), actions);
        prop_assert!(state.project_type().is_release());

        let plan = prepare_commit(&state, None, &WizardConfig::default()).unwrap();
        prop_assert!(plan.payload.tracks.len() <= 1);
        prop_assert!(plan.payload.licenses.is_empty());
    }

    /// Property: commit fails on contracts iff some license lacks one
    #[test]
    fn commit_requires_every_contract(
        project_type in prop_oneof![Just(ProjectType::BeatTape), Just(ProjectType::SoundPack)],
        refs in prop::collection::vec(contract_ref_strategy(), 3),
    ) {
        let mut state = WizardFormState::new(project_type);
        for (index, contract_id) in refs.iter().cloned().enumerate() {
            state.licenses.update_license(index, LicenseField::ContractId(contract_id)).unwrap();
        }

        let any_missing = refs
            .iter()
            .any(|r| r.as_deref().map_or(true, |id| id.trim().is_empty()));

        match prepare_commit(&state, None, &WizardConfig::default()) {
            Ok(plan) => {
                prop_assert!(!any_missing);
                prop_assert_eq!(plan.payload.licenses.len(), 3);
            }
            Err(WizardError::Validation(ValidationError::MissingContract { license_id, .. })) => {
                prop_assert!(any_missing);
                let first_missing = refs
                    .iter()
                    .position(|r| r.as_deref().map_or(true, |id| id.trim().is_empty()))
                    .unwrap();
                prop_assert_eq!(license_id, format!("l{}", first_missing + 1));
            }
            Err(other) => prop_assert!(false, "unexpected error: {}", other),
        }
    }
}
