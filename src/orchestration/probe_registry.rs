//! # In-flight probe registry
//!
//! Set of track ids with an outstanding duration probe. Emptiness is always
//! judged relative to the current track list, so a track deleted mid-probe
//! never blocks a commit through a stale entry.

use crate::models::{Track, TrackId};
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InFlightProbeRegistry {
    pending: HashSet<TrackId>,
}

impl InFlightProbeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if the id was already registered
    pub fn add(&mut self, id: TrackId) -> bool {
        self.pending.insert(id)
    }

    /// Returns false if the id was not registered
    pub fn remove(&mut self, id: &TrackId) -> bool {
        self.pending.remove(id)
    }

    pub fn contains(&self, id: &TrackId) -> bool {
        self.pending.contains(id)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// True if no registered id belongs to a track still in `tracks`
    pub fn is_empty_relative_to(&self, tracks: &[Track]) -> bool {
        !tracks.iter().any(|track| self.pending.contains(&track.id))
    }

    /// Registered ids that still belong to a current track, in track order
    pub fn outstanding_for(&self, tracks: &[Track]) -> Vec<TrackId> {
        tracks
            .iter()
            .filter(|track| self.pending.contains(&track.id))
            .map(|track| track.id.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(id: &str) -> Track {
        Track {
            id: TrackId::from(id),
            ..Track::new()
        }
    }

    #[test]
    fn test_add_and_remove() {
        let mut registry = InFlightProbeRegistry::new();
        assert!(registry.add(TrackId::from("t1")));
        assert!(!registry.add(TrackId::from("t1")));
        assert_eq!(registry.len(), 1);
        assert!(registry.remove(&TrackId::from("t1")));
        assert!(!registry.remove(&TrackId::from("t1")));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_emptiness_is_relative_to_current_tracks() {
        let mut registry = InFlightProbeRegistry::new();
        registry.add(TrackId::from("deleted"));

        let tracks = vec![track("t1"), track("t2")];
        assert!(!registry.is_empty());
        assert!(registry.is_empty_relative_to(&tracks));
        assert!(registry.outstanding_for(&tracks).is_empty());

        registry.add(TrackId::from("t2"));
        assert!(!registry.is_empty_relative_to(&tracks));
        assert_eq!(registry.outstanding_for(&tracks), vec![TrackId::from("t2")]);
    }
}
