//! # Track assembly
//!
//! Binds library files into track slots, derives a track's title and duration
//! from the first file bound to it, and keeps the in-flight probe registry in
//! step with the probes that binding requires.
//!
//! Probe completions are matched by track id against the *current* track list.
//! The list may have been reordered, truncated or edited since the probe was
//! started; a completion for a vanished track is dropped.

use super::probe_registry::InFlightProbeRegistry;
use crate::error::ValidationError;
use crate::models::{FileSlot, LibraryFile, ProjectType, Track, TrackField, TrackId};
use crate::state_machine::events::ProbeOutcome;
use tracing::{debug, warn};

/// What binding a file decided about the track's duration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindOutcome {
    /// The track already had a bound file; title and duration untouched
    AdditionalSlot,
    /// The file carried a known duration
    DurationKnown { duration_secs: u32 },
    /// A probe must be started; the track id is now registered
    ProbeRequired { track_id: TrackId, url: String },
    /// No URL to probe; the fallback duration was applied
    FallbackApplied { duration_secs: u32 },
}

/// How a probe completion landed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeApplication {
    Updated { duration_secs: u32 },
    FellBack { duration_secs: u32 },
    /// The track no longer exists
    Dropped,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackAssembler {
    tracks: Vec<Track>,
    registry: InFlightProbeRegistry,
}

impl TrackAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from tracks of an existing project; nothing is in flight
    pub fn from_tracks(tracks: Vec<Track>) -> Self {
        Self {
            tracks,
            registry: InFlightProbeRegistry::new(),
        }
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn registry(&self) -> &InFlightProbeRegistry {
        &self.registry
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn find(&self, id: &TrackId) -> Option<&Track> {
        self.tracks.iter().find(|track| &track.id == id)
    }

    /// Append an empty track, refused once a release already holds its limit
    pub fn add_track(
        &mut self,
        project_type: ProjectType,
        release_limit: usize,
    ) -> Result<&Track, ValidationError> {
        if project_type.is_release() && self.tracks.len() >= release_limit {
            return Err(ValidationError::TrackLimitReached {
                project_type,
                limit: release_limit,
            });
        }

        self.tracks.push(Track::new());
        let index = self.tracks.len() - 1;
        Ok(&self.tracks[index])
    }

    /// Remove a track; an outstanding probe for it stops counting at commit
    pub fn remove_track(&mut self, index: usize) -> Result<Track, ValidationError> {
        self.check_index(index)?;
        let removed = self.tracks.remove(index);

        if self.registry.contains(&removed.id) {
            debug!(track_id = %removed.id, "Removed track with an outstanding duration probe");
        }

        Ok(removed)
    }

    pub fn update_track_field(
        &mut self,
        index: usize,
        field: TrackField,
    ) -> Result<(), ValidationError> {
        self.check_index(index)?;
        let track = &mut self.tracks[index];

        match field {
            TrackField::Title(title) => track.title = title,
            TrackField::Duration(duration_secs) => track.duration_secs = duration_secs,
        }

        Ok(())
    }

    /// Bind `file` into `slot` of the track at `index`
    ///
    /// Only the first binding of a track derives its title and duration.
    pub fn bind_file(
        &mut self,
        index: usize,
        slot: FileSlot,
        file: &LibraryFile,
        fallback_secs: u32,
    ) -> Result<BindOutcome, ValidationError> {
        self.check_index(index)?;
        let track = &mut self.tracks[index];
        let first_binding = track.files.is_empty();

        track.files.insert(slot, file.id.clone());

        if !first_binding {
            return Ok(BindOutcome::AdditionalSlot);
        }

        track.title = file.title_stem().to_string();

        if let Some(duration_secs) = file.known_duration() {
            track.duration_secs = duration_secs;
            return Ok(BindOutcome::DurationKnown { duration_secs });
        }

        match file.playable_url() {
            Some(url) => {
                track.duration_secs = 0;
                let track_id = track.id.clone();
                self.registry.add(track_id.clone());
                Ok(BindOutcome::ProbeRequired {
                    track_id,
                    url: url.to_string(),
                })
            }
            None => {
                track.duration_secs = fallback_secs;
                Ok(BindOutcome::FallbackApplied {
                    duration_secs: fallback_secs,
                })
            }
        }
    }

    /// Land a probe completion on the track with `track_id`, if it still exists
    pub fn apply_probe_outcome(
        &mut self,
        track_id: &TrackId,
        outcome: &ProbeOutcome,
        fallback_secs: u32,
    ) -> ProbeApplication {
        self.registry.remove(track_id);

        let Some(track) = self.tracks.iter_mut().find(|track| &track.id == track_id) else {
            debug!(track_id = %track_id, "Probe resolved for a track that no longer exists");
            return ProbeApplication::Dropped;
        };

        match outcome {
            ProbeOutcome::Measured { duration_secs } if *duration_secs > 0 => {
                track.duration_secs = *duration_secs;
                ProbeApplication::Updated {
                    duration_secs: *duration_secs,
                }
            }
            ProbeOutcome::Measured { .. } => {
                warn!(track_id = %track_id, "Probe measured zero duration, using fallback");
                track.duration_secs = fallback_secs;
                ProbeApplication::FellBack {
                    duration_secs: fallback_secs,
                }
            }
            ProbeOutcome::Failed { reason } => {
                warn!(track_id = %track_id, reason = %reason, "Duration probe failed, using fallback");
                track.duration_secs = fallback_secs;
                ProbeApplication::FellBack {
                    duration_secs: fallback_secs,
                }
            }
        }
    }

    /// Cap the list at `limit` entries, returning what was cut
    pub fn enforce_track_limit(&mut self, limit: usize) -> Vec<Track> {
        if self.tracks.len() <= limit {
            return Vec::new();
        }
        self.tracks.split_off(limit)
    }

    pub fn outstanding_probes(&self) -> Vec<TrackId> {
        self.registry.outstanding_for(&self.tracks)
    }

    pub fn probes_settled(&self) -> bool {
        self.registry.is_empty_relative_to(&self.tracks)
    }

    fn check_index(&self, index: usize) -> Result<(), ValidationError> {
        if index >= self.tracks.len() {
            return Err(ValidationError::TrackIndexOutOfRange {
                index,
                len: self.tracks.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FALLBACK: u32 = 180;

    fn assembler_with(count: usize) -> TrackAssembler {
        let mut assembler = TrackAssembler::new();
        for _ in 0..count {
            assembler.add_track(ProjectType::BeatTape, 1).unwrap();
        }
        assembler
    }

    #[test]
    fn test_release_track_cap() {
        let mut assembler = TrackAssembler::new();
        assert!(assembler.add_track(ProjectType::Release, 1).is_ok());
        let err = assembler.add_track(ProjectType::Release, 1).unwrap_err();
        assert_eq!(
            err,
            ValidationError::TrackLimitReached {
                project_type: ProjectType::Release,
                limit: 1
            }
        );
        assert_eq!(assembler.len(), 1);
    }

    #[test]
    fn test_first_binding_with_known_duration() {
        let mut assembler = assembler_with(1);
        let file = LibraryFile::new("f1", "beat_final_mix.mp3").with_duration(201);

        let outcome = assembler.bind_file(0, FileSlot::Mp3, &file, FALLBACK).unwrap();
        assert_eq!(outcome, BindOutcome::DurationKnown { duration_secs: 201 });

        let track = &assembler.tracks()[0];
        assert_eq!(track.title, "beat_final_mix");
        assert_eq!(track.duration_secs, 201);
        assert_eq!(track.bound_file(FileSlot::Mp3), Some("f1"));
        assert!(assembler.registry().is_empty());
    }

    #[test]
    fn test_first_binding_with_url_registers_probe() {
        let mut assembler = assembler_with(1);
        let file = LibraryFile::new("f1", "demo.wav").with_url("https://cdn.example/demo.wav");

        let outcome = assembler.bind_file(0, FileSlot::Wav, &file, FALLBACK).unwrap();
        let track_id = assembler.tracks()[0].id.clone();
        assert_eq!(
            outcome,
            BindOutcome::ProbeRequired {
                track_id: track_id.clone(),
                url: "https://cdn.example/demo.wav".to_string()
            }
        );
        assert_eq!(assembler.tracks()[0].duration_secs, 0);
        assert!(assembler.registry().contains(&track_id));
        assert!(!assembler.probes_settled());
    }

    #[test]
    fn test_first_binding_without_url_uses_fallback() {
        let mut assembler = assembler_with(1);
        let file = LibraryFile::new("f1", "demo.wav");

        let outcome = assembler.bind_file(0, FileSlot::Wav, &file, FALLBACK).unwrap();
        assert_eq!(outcome, BindOutcome::FallbackApplied { duration_secs: FALLBACK });
        assert_eq!(assembler.tracks()[0].duration_secs, FALLBACK);
    }

    #[test]
    fn test_later_bindings_do_not_rederive() {
        let mut assembler = assembler_with(1);
        let mp3 = LibraryFile::new("f1", "lead.mp3").with_duration(150);
        let stems = LibraryFile::new("f3", "stems_zip_archive.zip").with_duration(999);

        assembler.bind_file(0, FileSlot::Mp3, &mp3, FALLBACK).unwrap();
        assembler
            .update_track_field(0, TrackField::Title("Renamed".to_string()))
            .unwrap();
        let outcome = assembler.bind_file(0, FileSlot::Stems, &stems, FALLBACK).unwrap();

        assert_eq!(outcome, BindOutcome::AdditionalSlot);
        let track = &assembler.tracks()[0];
        assert_eq!(track.title, "Renamed");
        assert_eq!(track.duration_secs, 150);
        assert_eq!(track.files.len(), 2);
    }

    #[test]
    fn test_probe_completion_is_matched_by_id() {
        let mut assembler = assembler_with(2);
        let file = LibraryFile::new("f1", "a.mp3").with_url("file:///a.mp3");
        assembler.bind_file(1, FileSlot::Mp3, &file, FALLBACK).unwrap();
        let probed = assembler.tracks()[1].id.clone();

        // The earlier track disappears while the probe runs
        assembler.remove_track(0).unwrap();

        let applied = assembler.apply_probe_outcome(
            &probed,
            &ProbeOutcome::Measured { duration_secs: 187 },
            FALLBACK,
        );
        assert_eq!(applied, ProbeApplication::Updated { duration_secs: 187 });
        assert_eq!(assembler.tracks()[0].duration_secs, 187);
        assert!(assembler.registry().is_empty());
    }

    #[test]
    fn test_probe_failure_falls_back() {
        let mut assembler = assembler_with(1);
        let file = LibraryFile::new("f1", "a.mp3").with_url("file:///a.mp3");
        assembler.bind_file(0, FileSlot::Mp3, &file, FALLBACK).unwrap();
        let id = assembler.tracks()[0].id.clone();

        let applied = assembler.apply_probe_outcome(
            &id,
            &ProbeOutcome::Failed {
                reason: "unreadable".to_string(),
            },
            FALLBACK,
        );
        assert_eq!(applied, ProbeApplication::FellBack { duration_secs: FALLBACK });
        assert_eq!(assembler.tracks()[0].duration_secs, FALLBACK);
        assert!(assembler.probes_settled());
    }

    #[test]
    fn test_probe_for_deleted_track_is_dropped() {
        let mut assembler = assembler_with(1);
        let file = LibraryFile::new("f1", "a.mp3").with_url("file:///a.mp3");
        assembler.bind_file(0, FileSlot::Mp3, &file, FALLBACK).unwrap();
        let id = assembler.tracks()[0].id.clone();

        assembler.remove_track(0).unwrap();
        assert!(assembler.probes_settled());

        let applied = assembler.apply_probe_outcome(
            &id,
            &ProbeOutcome::Measured { duration_secs: 90 },
            FALLBACK,
        );
        assert_eq!(applied, ProbeApplication::Dropped);
        assert!(assembler.is_empty());
        assert!(assembler.registry().is_empty());
    }

    #[test]
    fn test_enforce_track_limit() {
        let mut assembler = assembler_with(3);
        let cut = assembler.enforce_track_limit(1);
        assert_eq!(cut.len(), 2);
        assert_eq!(assembler.len(), 1);
        assert!(assembler.enforce_track_limit(1).is_empty());
    }

    #[test]
    fn test_index_out_of_range() {
        let mut assembler = assembler_with(1);
        assert_eq!(
            assembler.remove_track(4).unwrap_err(),
            ValidationError::TrackIndexOutOfRange { index: 4, len: 1 }
        );
    }
}
