//! In-memory gateway implementations
//!
//! Each implementation records the calls made against it so callers can assert
//! on what the wizard dispatched, and can be primed to fail the next call.

use super::{
    ContractCatalogGateway, FileUpload, FileUploadGateway, GatewayError, GatewayResult,
    MediaLibraryGateway, ProjectPersistenceGateway, UploadedFile,
};
use crate::models::{ContractTemplate, Project, ProjectPayload, RawLibraryEntry};
use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use uuid::Uuid;

/// Media library backed by a fixed list of entries
#[derive(Debug, Default)]
pub struct InMemoryMediaLibrary {
    entries: RwLock<Vec<RawLibraryEntry>>,
}

impl InMemoryMediaLibrary {
    pub fn new(entries: Vec<RawLibraryEntry>) -> Self {
        Self {
            entries: RwLock::new(entries),
        }
    }

    pub fn push(&self, entry: RawLibraryEntry) {
        self.entries.write().push(entry);
    }
}

#[async_trait]
impl MediaLibraryGateway for InMemoryMediaLibrary {
    async fn list_user_files(&self) -> GatewayResult<Vec<RawLibraryEntry>> {
        Ok(self.entries.read().clone())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryContractCatalog {
    templates: RwLock<Vec<ContractTemplate>>,
}

impl InMemoryContractCatalog {
    pub fn new(templates: Vec<ContractTemplate>) -> Self {
        Self {
            templates: RwLock::new(templates),
        }
    }
}

#[async_trait]
impl ContractCatalogGateway for InMemoryContractCatalog {
    async fn list_contract_templates(&self) -> GatewayResult<Vec<ContractTemplate>> {
        Ok(self.templates.read().clone())
    }
}

/// One dispatched persistence call
#[derive(Debug, Clone, PartialEq)]
pub enum PersistenceCall {
    Create(ProjectPayload),
    Update { id: String, payload: ProjectPayload },
    Delete { id: String },
}

/// Project store keeping projects in a map
#[derive(Debug, Default)]
pub struct InMemoryProjectStore {
    projects: RwLock<HashMap<String, Project>>,
    calls: Mutex<Vec<PersistenceCall>>,
    fail_next: Mutex<Option<GatewayError>>,
}

impl InMemoryProjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_project(project: Project) -> Self {
        let store = Self::default();
        store.projects.write().insert(project.id.clone(), project);
        store
    }

    /// Make the next create/update/delete fail with `error`
    pub fn fail_next(&self, error: GatewayError) {
        *self.fail_next.lock() = Some(error);
    }

    pub fn calls(&self) -> Vec<PersistenceCall> {
        self.calls.lock().clone()
    }

    pub fn get(&self, id: &str) -> Option<Project> {
        self.projects.read().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.projects.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.read().is_empty()
    }

    fn record(&self, call: PersistenceCall) -> GatewayResult<()> {
        self.calls.lock().push(call);
        match self.fail_next.lock().take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ProjectPersistenceGateway for InMemoryProjectStore {
    async fn create_project(&self, payload: &ProjectPayload) -> GatewayResult<Project> {
        self.record(PersistenceCall::Create(payload.clone()))?;

        let project = payload.clone().into_project(Uuid::new_v4().to_string());
        self.projects
            .write()
            .insert(project.id.clone(), project.clone());
        Ok(project)
    }

    async fn update_project(&self, id: &str, payload: &ProjectPayload) -> GatewayResult<Project> {
        self.record(PersistenceCall::Update {
            id: id.to_string(),
            payload: payload.clone(),
        })?;

        let mut projects = self.projects.write();
        if !projects.contains_key(id) {
            return Err(GatewayError::NotFound { id: id.to_string() });
        }
        let project = payload.clone().into_project(id);
        projects.insert(id.to_string(), project.clone());
        Ok(project)
    }

    async fn delete_project(&self, id: &str) -> GatewayResult<()> {
        self.record(PersistenceCall::Delete { id: id.to_string() })?;

        self.projects
            .write()
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| GatewayError::NotFound { id: id.to_string() })
    }
}

/// Upload target returning `memory://` URLs
#[derive(Debug, Default)]
pub struct InMemoryFileStore {
    uploads: Mutex<Vec<FileUpload>>,
}

impl InMemoryFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn uploads(&self) -> Vec<FileUpload> {
        self.uploads.lock().clone()
    }
}

#[async_trait]
impl FileUploadGateway for InMemoryFileStore {
    async fn upload_file(&self, upload: FileUpload) -> GatewayResult<UploadedFile> {
        if upload.bytes.is_empty() {
            return Err(GatewayError::Rejected {
                reason: format!("{} is empty", upload.file_name),
            });
        }

        let public_url = format!("memory://uploads/{}/{}", Uuid::new_v4(), upload.file_name);
        self.uploads.lock().push(upload);
        Ok(UploadedFile { public_url })
    }
}
