use crate::constants::UNTITLED_TRACK;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// Stable track identifier used to match probe completions
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(String);

impl TrackId {
    pub fn generate() -> Self {
        Self(format!("new_{}", Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TrackId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for TrackId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Named file positions a track can hold a library file in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileSlot {
    Mp3,
    Wav,
    Stems,
}

impl FileSlot {
    pub const ALL: [FileSlot; 3] = [FileSlot::Mp3, FileSlot::Wav, FileSlot::Stems];

    pub fn key(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Wav => "wav",
            Self::Stems => "stems",
        }
    }
}

impl fmt::Display for FileSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl std::str::FromStr for FileSlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mp3" => Ok(Self::Mp3),
            "wav" => Ok(Self::Wav),
            "stems" => Ok(Self::Stems),
            _ => Err(format!("Invalid file slot: {s}")),
        }
    }
}

/// A track of the project under construction
///
/// `duration_secs` is a placeholder (0, or a prior fallback) while a duration
/// probe is outstanding for the track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: TrackId,
    pub title: String,
    pub duration_secs: u32,
    #[serde(default)]
    pub files: BTreeMap<FileSlot, String>,
}

impl Track {
    pub fn new() -> Self {
        Self {
            id: TrackId::generate(),
            title: UNTITLED_TRACK.to_string(),
            duration_secs: 0,
            files: BTreeMap::new(),
        }
    }

    pub fn has_bound_files(&self) -> bool {
        !self.files.is_empty()
    }

    pub fn bound_file(&self, slot: FileSlot) -> Option<&str> {
        self.files.get(&slot).map(String::as_str)
    }
}

impl Default for Track {
    fn default() -> Self {
        Self::new()
    }
}

/// Single-field edits accepted by `updateTrackField`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum TrackField {
    Title(String),
    Duration(u32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_track_is_unbound() {
        let track = Track::new();
        assert!(track.id.as_str().starts_with("new_"));
        assert_eq!(track.title, UNTITLED_TRACK);
        assert_eq!(track.duration_secs, 0);
        assert!(!track.has_bound_files());
    }

    #[test]
    fn test_generated_ids_are_unique() {
        assert_ne!(TrackId::generate(), TrackId::generate());
    }

    #[test]
    fn test_slot_serde_uses_lowercase_keys() {
        let mut track = Track::new();
        track.files.insert(FileSlot::Stems, "f3".to_string());
        let json = serde_json::to_value(&track).unwrap();
        assert_eq!(json["files"]["stems"], "f3");
        assert_eq!("wav".parse::<FileSlot>().unwrap(), FileSlot::Wav);
        assert!("main".parse::<FileSlot>().is_err());
    }
}
