#![allow(dead_code)]

pub mod mocks;
pub mod strategies;

use mocks::GatedProbe;
use std::sync::Arc;
use wizard_core::config::WizardConfig;
use wizard_core::events::EventPublisher;
use wizard_core::gateways::memory::{
    InMemoryContractCatalog, InMemoryFileStore, InMemoryMediaLibrary, InMemoryProjectStore,
};
use wizard_core::models::{ContractTemplate, ProjectType, RawLibraryEntry};
use wizard_core::orchestration::{WizardCollaborators, WizardController};

pub const CONTRACT_ID: &str = "c-standard";
pub const BEAT_URL: &str = "https://cdn.example/library/night_drive.mp3";

/// Everything a test needs to drive and inspect a wizard
pub struct Harness {
    pub store: Arc<InMemoryProjectStore>,
    pub files: Arc<InMemoryFileStore>,
    pub probe: Arc<GatedProbe>,
    pub events: EventPublisher,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_store(InMemoryProjectStore::new())
    }

    pub fn with_store(store: InMemoryProjectStore) -> Self {
        Self {
            store: Arc::new(store),
            files: Arc::new(InMemoryFileStore::new()),
            probe: Arc::new(GatedProbe::new()),
            events: EventPublisher::new(64),
        }
    }

    pub fn collaborators(&self) -> WizardCollaborators {
        WizardCollaborators::new(
            Arc::new(InMemoryMediaLibrary::new(library_entries())),
            Arc::new(InMemoryContractCatalog::new(vec![
                ContractTemplate::new(CONTRACT_ID, "Standard Lease"),
                ContractTemplate::new("c-exclusive", "Exclusive Transfer"),
            ])),
            self.store.clone(),
            self.files.clone(),
            self.probe.clone(),
        )
        .with_event_publisher(self.events.clone())
    }

    pub async fn open_new(&self, project_type: ProjectType) -> WizardController {
        let mut wizard =
            WizardController::open_new(project_type, self.collaborators(), WizardConfig::default())
                .expect("wizard opens");
        wizard.refresh_sources().await.expect("sources load");
        wizard
    }
}

/// The user's library: one probe-able beat, one with a known duration,
/// one with neither, a stems archive and a cover image
pub fn library_entries() -> Vec<RawLibraryEntry> {
    vec![
        RawLibraryEntry {
            id: "f-beat".into(),
            name: "night_drive.mp3".into(),
            mime_type: Some("audio/mpeg".into()),
            url: Some(BEAT_URL.into()),
            ..Default::default()
        },
        RawLibraryEntry {
            id: "f-known".into(),
            name: "intro.wav".into(),
            duration_secs: Some(95.4),
            url: Some("https://cdn.example/library/intro.wav".into()),
            ..Default::default()
        },
        RawLibraryEntry {
            id: "f-offline".into(),
            name: "sketch.mp3".into(),
            ..Default::default()
        },
        RawLibraryEntry {
            id: "f-stems".into(),
            name: "night_drive_stems.zip".into(),
            mime_type: Some("application/zip".into()),
            ..Default::default()
        },
        RawLibraryEntry {
            id: "f-cover".into(),
            name: "cover.png".into(),
            ..Default::default()
        },
    ]
}

/// Point every license at the standard contract
pub fn attach_contracts(wizard: &mut WizardController) {
    for index in 0..wizard.licenses().len() {
        wizard
            .set_field(
                &format!("licenses[{index}].contract_id"),
                serde_json::json!(CONTRACT_ID),
            )
            .expect("license index in range");
    }
}
