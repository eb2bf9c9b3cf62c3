//! # Wizard Demo
//!
//! Runs the publishing wizard end to end against in-memory gateways. Audio
//! files passed with `--media` become the user's library and are probed for
//! their real duration before the project is committed.

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use wizard_core::gateways::memory::{
    InMemoryContractCatalog, InMemoryFileStore, InMemoryMediaLibrary, InMemoryProjectStore,
};
use wizard_core::logging::init_structured_logging;
use wizard_core::models::{ContractTemplate, FileSlot, ProjectType, RawLibraryEntry};
use wizard_core::orchestration::{WizardCollaborators, WizardController};
use wizard_core::services::MediaDurationProbe;
use wizard_core::WizardConfig;

#[derive(Parser)]
#[command(name = "wizard-demo")]
#[command(about = "Assemble and commit a project through the publishing wizard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Project type (beat_tape, sound_pack, release)
    #[arg(short = 't', long, default_value = "beat_tape")]
    project_type: ProjectType,

    /// Project title
    #[arg(long, default_value = "Untitled Project")]
    title: String,

    /// Audio files to add as tracks, one track per file
    #[arg(short, long)]
    media: Vec<PathBuf>,

    /// Optional TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

const DEMO_CONTRACT_ID: &str = "standard-lease";

#[tokio::main]
async fn main() -> Result<()> {
    init_structured_logging();
    let cli = Cli::parse();

    let config = WizardConfig::load(cli.config.as_deref()).context("loading configuration")?;

    let library = cli
        .media
        .iter()
        .enumerate()
        .map(|(index, path)| RawLibraryEntry {
            id: format!("file-{index}"),
            name: path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| format!("file-{index}")),
            url: Some(path.to_string_lossy().into_owned()),
            ..Default::default()
        })
        .collect::<Vec<_>>();

    let store = Arc::new(InMemoryProjectStore::new());
    let collaborators = WizardCollaborators::new(
        Arc::new(InMemoryMediaLibrary::new(library.clone())),
        Arc::new(InMemoryContractCatalog::new(vec![ContractTemplate::new(
            DEMO_CONTRACT_ID,
            "Standard Lease Agreement",
        )])),
        store.clone(),
        Arc::new(InMemoryFileStore::new()),
        Arc::new(MediaDurationProbe::new()?),
    );

    let mut wizard = WizardController::open_new(cli.project_type, collaborators, config)?;
    wizard.refresh_sources().await?;
    wizard.set_field("title", json!(cli.title))?;
    wizard.advance()?;

    for (index, entry) in library.iter().enumerate() {
        if let Err(err) = wizard.add_track() {
            info!(file = %entry.name, error = %err, "Skipping file");
            break;
        }
        wizard.bind_file(index, FileSlot::Mp3, &entry.id)?;
    }
    wizard.settle_probes().await?;

    wizard.advance()?;
    for index in 0..wizard.licenses().len() {
        wizard.set_field(
            &format!("licenses[{index}].contract_id"),
            json!(DEMO_CONTRACT_ID),
        )?;
    }

    let receipt = wizard.commit().await?;
    info!(project_id = %receipt.project.id, target = %receipt.target, "Project committed");
    println!("{}", serde_json::to_string_pretty(&receipt.project)?);

    Ok(())
}
