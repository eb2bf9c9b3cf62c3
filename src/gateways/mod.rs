//! # Collaborator Gateways
//!
//! Defines the traits through which the wizard reaches the outside world:
//! the user's media library, the contract-template catalog, project
//! persistence and file upload. The wizard owns none of these concerns; it
//! only calls them and assembles their results.
//!
//! In-memory implementations live in [`memory`] and back the demo binary and
//! the test suite.

pub mod memory;

use crate::models::{ContractTemplate, Project, ProjectPayload, RawLibraryEntry};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures reported by a collaborator
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    #[error("Not authenticated")]
    Unauthenticated,

    #[error("Request rejected: {reason}")]
    Rejected { reason: String },

    #[error("Resource not found: {id}")]
    NotFound { id: String },

    #[error("Transport error: {0}")]
    Transport(String),
}

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Source of the user's uploaded files
#[async_trait]
pub trait MediaLibraryGateway: Send + Sync {
    /// List every file the current user has uploaded
    ///
    /// Entries arrive with loosely populated fields; the controller resolves
    /// their kind once, on ingestion.
    async fn list_user_files(&self) -> GatewayResult<Vec<RawLibraryEntry>>;
}

/// Catalog of contract templates a license may reference
#[async_trait]
pub trait ContractCatalogGateway: Send + Sync {
    async fn list_contract_templates(&self) -> GatewayResult<Vec<ContractTemplate>>;
}

/// Project storage
///
/// Implementations should treat `update_project` as a full replacement of the
/// stored project with the payload.
#[async_trait]
pub trait ProjectPersistenceGateway: Send + Sync {
    /// Store a new project, returning it with its assigned id
    async fn create_project(&self, payload: &ProjectPayload) -> GatewayResult<Project>;

    /// Replace the project stored under `id`
    async fn update_project(&self, id: &str, payload: &ProjectPayload) -> GatewayResult<Project>;

    async fn delete_project(&self, id: &str) -> GatewayResult<()>;
}

/// A file the caller wants stored, e.g. a cover image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

/// Where an uploaded file can be fetched from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub public_url: String,
}

#[async_trait]
pub trait FileUploadGateway: Send + Sync {
    async fn upload_file(&self, upload: FileUpload) -> GatewayResult<UploadedFile>;
}
