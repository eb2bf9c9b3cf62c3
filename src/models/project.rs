use super::license::LicenseInfo;
use super::track::Track;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Project type, which decides track caps and license seeding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectType {
    BeatTape,
    SoundPack,
    Release,
}

impl ProjectType {
    pub fn is_release(&self) -> bool {
        matches!(self, Self::Release)
    }
}

impl Default for ProjectType {
    fn default() -> Self {
        Self::BeatTape
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BeatTape => write!(f, "beat_tape"),
            Self::SoundPack => write!(f, "sound_pack"),
            Self::Release => write!(f, "release"),
        }
    }
}

impl std::str::FromStr for ProjectType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "beat_tape" => Ok(Self::BeatTape),
            "sound_pack" => Ok(Self::SoundPack),
            "release" => Ok(Self::Release),
            _ => Err(format!("Invalid project type: {s}")),
        }
    }
}

/// Visibility of a published project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Published,
    Private,
    Draft,
}

impl Default for ProjectStatus {
    fn default() -> Self {
        Self::Published
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Published => write!(f, "published"),
            Self::Private => write!(f, "private"),
            Self::Draft => write!(f, "draft"),
        }
    }
}

impl std::str::FromStr for ProjectStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "published" => Ok(Self::Published),
            "private" => Ok(Self::Private),
            "draft" => Ok(Self::Draft),
            _ => Err(format!("Invalid project status: {s}")),
        }
    }
}

/// A stored project as returned by the persistence gateway
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(rename = "type")]
    pub project_type: ProjectType,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub sub_genre: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Single numeric string or `"min-max"` range
    #[serde(default)]
    pub bpm: String,
    #[serde(default)]
    pub tracks: Vec<Track>,
    #[serde(default)]
    pub licenses: Vec<LicenseInfo>,
}

/// Finalized submission assembled at commit time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectPayload {
    pub title: String,
    pub description: String,
    pub cover_image: Option<String>,
    #[serde(rename = "type")]
    pub project_type: ProjectType,
    pub status: ProjectStatus,
    pub key: Option<String>,
    pub genre: String,
    pub sub_genre: String,
    pub tags: Vec<String>,
    pub bpm: String,
    pub tracks: Vec<Track>,
    pub licenses: Vec<LicenseInfo>,
}

impl ProjectPayload {
    /// Materialize the stored project for a given id
    pub fn into_project(self, id: impl Into<String>) -> Project {
        Project {
            id: id.into(),
            title: self.title,
            description: self.description,
            cover_image: self.cover_image,
            project_type: self.project_type,
            status: self.status,
            key: self.key,
            genre: self.genre,
            sub_genre: self.sub_genre,
            tags: self.tags,
            bpm: self.bpm,
            tracks: self.tracks,
            licenses: self.licenses,
        }
    }
}

/// Contract template a license can reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractTemplate {
    pub id: String,
    pub title: String,
}

impl ContractTemplate {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}
