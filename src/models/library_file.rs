//! Library files as seen by the wizard.
//!
//! Files belong to the media gateway; the wizard only reads them and binds
//! their ids into track slots. The file kind is resolved once, when the raw
//! gateway record is converted, and never re-sniffed afterwards.

use crate::constants::extensions;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Resolved kind of a library file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    Audio,
    Archive,
    Image,
    Unknown,
}

impl FileKind {
    /// Resolve a kind from a MIME type, falling back to the file name extension
    pub fn resolve(name: &str, mime_type: Option<&str>) -> Self {
        if let Some(mime) = mime_type {
            let mime = mime.to_ascii_lowercase();
            if mime.starts_with("audio/") {
                return Self::Audio;
            }
            if mime.starts_with("image/") {
                return Self::Image;
            }
            if mime.contains("zip") || mime.contains("x-7z") || mime.contains("x-rar") {
                return Self::Archive;
            }
        }

        Self::from_file_name(name)
    }

    pub fn from_file_name(name: &str) -> Self {
        let Some((_, ext)) = name.rsplit_once('.') else {
            return Self::Unknown;
        };
        let ext = ext.to_ascii_lowercase();

        if extensions::AUDIO.contains(&ext.as_str()) {
            Self::Audio
        } else if extensions::ARCHIVE.contains(&ext.as_str()) {
            Self::Archive
        } else if extensions::IMAGE.contains(&ext.as_str()) {
            Self::Image
        } else {
            Self::Unknown
        }
    }

    pub fn is_audio(&self) -> bool {
        matches!(self, Self::Audio)
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Audio => write!(f, "audio"),
            Self::Archive => write!(f, "archive"),
            Self::Image => write!(f, "image"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Record as delivered by the media gateway, with loosely populated fields
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawLibraryEntry {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub size_bytes: Option<u64>,
    #[serde(default)]
    pub duration_secs: Option<f64>,
    #[serde(default)]
    pub url: Option<String>,
}

/// A user's uploaded file with its kind resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LibraryFile {
    pub id: String,
    pub name: String,
    pub kind: FileKind,
    pub size_bytes: Option<u64>,
    /// Known duration in whole seconds, if the gateway already measured it
    pub duration_secs: Option<u32>,
    /// Playable URL a duration probe can load
    pub url: Option<String>,
}

impl LibraryFile {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: id.into(),
            kind: FileKind::from_file_name(&name),
            name,
            size_bytes: None,
            duration_secs: None,
            url: None,
        }
    }

    pub fn with_duration(mut self, duration_secs: u32) -> Self {
        self.duration_secs = Some(duration_secs);
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_size(mut self, size_bytes: u64) -> Self {
        self.size_bytes = Some(size_bytes);
        self
    }

    /// File name without its final extension
    pub fn title_stem(&self) -> &str {
        match self.name.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem,
            _ => &self.name,
        }
    }

    /// Known duration, ignoring zero placeholders
    pub fn known_duration(&self) -> Option<u32> {
        self.duration_secs.filter(|secs| *secs > 0)
    }

    pub fn playable_url(&self) -> Option<&str> {
        self.url.as_deref().filter(|url| !url.trim().is_empty())
    }
}

impl From<RawLibraryEntry> for LibraryFile {
    fn from(raw: RawLibraryEntry) -> Self {
        let kind = FileKind::resolve(&raw.name, raw.mime_type.as_deref());
        let duration_secs = raw
            .duration_secs
            .filter(|secs| secs.is_finite() && *secs > 0.0)
            .map(|secs| secs.round() as u32);

        Self {
            id: raw.id,
            name: raw.name,
            kind,
            size_bytes: raw.size_bytes,
            duration_secs,
            url: raw.url,
        }
    }
}
