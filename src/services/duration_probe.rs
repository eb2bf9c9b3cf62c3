//! # Duration Probe
//!
//! Measures a track's audio duration from a playable URL. Each probe runs as
//! its own tokio task, bounded by the configured timeout, and reports back
//! over a channel owned by the wizard controller. Probes are never cancelled;
//! a report that arrives after the wizard closed is simply discarded.

use crate::models::TrackId;
use crate::state_machine::events::ProbeOutcome;
use async_trait::async_trait;
use lofty::prelude::*;
use lofty::probe::Probe;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProbeError {
    #[error("Media at {url} could not be read: {reason}")]
    Unreadable { url: String, reason: String },

    #[error("No metadata from {url} within {timeout_secs}s")]
    Timeout { url: String, timeout_secs: u64 },

    #[error("Unsupported media location: {url}")]
    Unsupported { url: String },

    #[error("I/O error: {0}")]
    Io(String),
}

pub type ProbeResult<T> = Result<T, ProbeError>;

/// Yields the duration, in whole seconds, of the media behind a URL
#[async_trait]
pub trait DurationProbe: Send + Sync {
    async fn probe(&self, url: &str) -> ProbeResult<u32>;
}

/// Completion of one probe task, matched back to its track by id
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeReport {
    pub track_id: TrackId,
    pub outcome: ProbeOutcome,
}

/// Start a probe task for `track_id`
///
/// The task always sends exactly one report unless the receiver is gone.
pub fn spawn_probe(
    probe: Arc<dyn DurationProbe>,
    track_id: TrackId,
    url: String,
    timeout: Duration,
    reports: mpsc::UnboundedSender<ProbeReport>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let outcome = match tokio::time::timeout(timeout, probe.probe(&url)).await {
            Ok(Ok(0)) => ProbeOutcome::Failed {
                reason: format!("Media at {url} reported zero duration"),
            },
            Ok(Ok(duration_secs)) => ProbeOutcome::Measured { duration_secs },
            Ok(Err(err)) => ProbeOutcome::Failed {
                reason: err.to_string(),
            },
            Err(_) => ProbeOutcome::Failed {
                reason: ProbeError::Timeout {
                    url: url.clone(),
                    timeout_secs: timeout.as_secs(),
                }
                .to_string(),
            },
        };

        debug!(track_id = %track_id, success = outcome.is_success(), "Duration probe finished");

        if reports.send(ProbeReport { track_id, outcome }).is_err() {
            debug!("Probe report discarded, wizard already closed");
        }
    })
}

/// Where a probe URL points
#[derive(Debug, Clone, PartialEq)]
enum MediaLocation {
    Local(PathBuf),
    Remote(String),
}

fn locate(url: &str) -> ProbeResult<MediaLocation> {
    if url.starts_with("http://") || url.starts_with("https://") {
        return Ok(MediaLocation::Remote(url.to_string()));
    }

    if url.starts_with("file://") {
        let parsed = reqwest::Url::parse(url).map_err(|_| ProbeError::Unsupported {
            url: url.to_string(),
        })?;
        return parsed
            .to_file_path()
            .map(MediaLocation::Local)
            .map_err(|_| ProbeError::Unsupported {
                url: url.to_string(),
            });
    }

    if url.contains("://") {
        return Err(ProbeError::Unsupported {
            url: url.to_string(),
        });
    }

    Ok(MediaLocation::Local(PathBuf::from(url)))
}

/// Probe reading local files or fetching over HTTP, measured with `lofty`
#[derive(Debug, Clone)]
pub struct MediaDurationProbe {
    http_client: reqwest::Client,
}

impl MediaDurationProbe {
    pub fn new() -> ProbeResult<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(concat!("wizard-core/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ProbeError::Io(e.to_string()))?;

        Ok(Self { http_client })
    }

    async fn fetch(&self, url: &str) -> ProbeResult<Vec<u8>> {
        let unreadable = |e: reqwest::Error| ProbeError::Unreadable {
            url: url.to_string(),
            reason: e.to_string(),
        };

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(unreadable)?
            .error_for_status()
            .map_err(unreadable)?;

        let bytes = response.bytes().await.map_err(unreadable)?;
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl DurationProbe for MediaDurationProbe {
    async fn probe(&self, url: &str) -> ProbeResult<u32> {
        let owned_url = url.to_string();

        let measured = match locate(url)? {
            MediaLocation::Local(path) => {
                tokio::task::spawn_blocking(move || measure_path(&path, &owned_url)).await
            }
            MediaLocation::Remote(remote) => {
                let bytes = self.fetch(&remote).await?;
                tokio::task::spawn_blocking(move || measure_bytes(bytes, &owned_url)).await
            }
        };

        let duration_secs = measured.map_err(|e| ProbeError::Io(e.to_string()))??;
        if duration_secs == 0 {
            warn!(url = %url, "Media metadata carried no duration");
        }
        Ok(duration_secs)
    }
}

fn measure_path(path: &Path, url: &str) -> ProbeResult<u32> {
    let unreadable = |reason: String| ProbeError::Unreadable {
        url: url.to_string(),
        reason,
    };

    let tagged_file = Probe::open(path)
        .map_err(|e| unreadable(e.to_string()))?
        .read()
        .map_err(|e| unreadable(e.to_string()))?;

    Ok(round_secs(tagged_file.properties().duration()))
}

fn measure_bytes(bytes: Vec<u8>, url: &str) -> ProbeResult<u32> {
    let unreadable = |reason: String| ProbeError::Unreadable {
        url: url.to_string(),
        reason,
    };

    let tagged_file = Probe::new(Cursor::new(bytes))
        .guess_file_type()
        .map_err(|e| unreadable(e.to_string()))?
        .read()
        .map_err(|e| unreadable(e.to_string()))?;

    Ok(round_secs(tagged_file.properties().duration()))
}

fn round_secs(duration: Duration) -> u32 {
    duration.as_secs_f64().round() as u32
}
