//! Test doubles for the duration probe

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use tokio::sync::Notify;
use wizard_core::services::{DurationProbe, ProbeResult};

#[derive(Debug, Default)]
struct GateState {
    started: Vec<String>,
    released: HashMap<String, ProbeResult<u32>>,
}

/// Probe that blocks until the test releases a result for its URL
///
/// A result released before the probe starts is kept until it does.
#[derive(Debug, Default)]
pub struct GatedProbe {
    state: Mutex<GateState>,
    notify: Notify,
}

impl GatedProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn release(&self, url: &str, result: ProbeResult<u32>) {
        self.state.lock().released.insert(url.to_string(), result);
        self.notify.notify_waiters();
    }

    /// URLs probed so far, in start order
    pub fn started(&self) -> Vec<String> {
        self.state.lock().started.clone()
    }
}

#[async_trait]
impl DurationProbe for GatedProbe {
    async fn probe(&self, url: &str) -> ProbeResult<u32> {
        self.state.lock().started.push(url.to_string());

        loop {
            let notified = self.notify.notified();
            let released = self.state.lock().released.remove(url);
            if let Some(result) = released {
                return result;
            }
            notified.await;
        }
    }
}
