//! Data model of the project aggregate and the collaborator records it reads.

pub mod library_file;
pub mod license;
pub mod project;
pub mod track;

pub use library_file::{FileKind, LibraryFile, RawLibraryEntry};
pub use license::{LicenseField, LicenseInfo, LicenseType};
pub use project::{ContractTemplate, Project, ProjectPayload, ProjectStatus, ProjectType};
pub use track::{FileSlot, Track, TrackField, TrackId};
