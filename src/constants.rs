//! # Wizard Constants
//!
//! Vocabularies, limits and lifecycle event names that define the operational
//! boundaries of the project publishing wizard.

/// Lifecycle events published by the wizard controller
pub mod events {
    pub const WIZARD_OPENED: &str = "wizard.opened";
    pub const WIZARD_STEP_CHANGED: &str = "wizard.step_changed";
    pub const WIZARD_CANCELLED: &str = "wizard.cancelled";

    // Duration probe lifecycle
    pub const PROBE_STARTED: &str = "wizard.probe_started";
    pub const PROBE_RESOLVED: &str = "wizard.probe_resolved";
    pub const PROBE_FAILED: &str = "wizard.probe_failed";

    // Commit protocol
    pub const COMMIT_BLOCKED: &str = "wizard.commit_blocked";
    pub const COMMITTED: &str = "wizard.committed";
    pub const COMMIT_FAILED: &str = "wizard.commit_failed";
    pub const PROJECT_DELETED: &str = "wizard.project_deleted";
}

/// Genre and sub-genre vocabularies offered by the details step
pub mod genres {
    pub const GENRES: &[&str] = &[
        "Trap",
        "Boom Bap",
        "R&B",
        "Drill",
        "Lofi",
        "Afrobeat",
        "Synthwave",
        "Pop",
        "Electronic",
        "Rock",
        "Jazz",
        "Soul",
        "Reggaeton",
        "Dancehall",
        "House",
    ];

    pub const SUB_GENRES: &[&str] = &[
        "Dark",
        "Melodic",
        "Hard",
        "Chill",
        "Guitar",
        "Piano",
        "Experimental",
        "Old School",
        "New Wave",
        "Ambient",
        "Cinematic",
        "Soulful",
        "Aggressive",
        "Upbeat",
        "Sad",
        "Romantic",
        "Groovy",
        "Minimal",
    ];

    /// Primary genre stored when nothing was selected
    pub const UNKNOWN_GENRE: &str = "Unknown";

    pub fn is_known_genre(value: &str) -> bool {
        GENRES.iter().any(|g| g.eq_ignore_ascii_case(value))
    }

    pub fn is_known_sub_genre(value: &str) -> bool {
        SUB_GENRES.iter().any(|g| g.eq_ignore_ascii_case(value))
    }
}

/// Default limits, overridable through [`crate::config::WizardConfig`]
pub mod defaults {
    pub const FALLBACK_DURATION_SECS: u32 = 180;
    pub const PROBE_TIMEOUT_SECS: u64 = 30;
    pub const MAX_TAGS: usize = 5;
    pub const MAX_GENRES: usize = 3;
    pub const MAX_SUB_GENRES: usize = 3;
    pub const RELEASE_TRACK_LIMIT: usize = 1;
    pub const INITIAL_VISIBLE_FILES: usize = 12;
    pub const EVENT_CHANNEL_CAPACITY: usize = 256;
}

/// Title given to a freshly added track before a file is bound
pub const UNTITLED_TRACK: &str = "Untitled Track";

/// BPM stored when neither bound is set
pub const BPM_PLACEHOLDER: &str = "0";

/// File extensions recognised when resolving a library file's kind
pub mod extensions {
    pub const AUDIO: &[&str] = &["mp3", "wav", "flac", "aif", "aiff", "ogg", "m4a", "aac", "opus"];
    pub const ARCHIVE: &[&str] = &["zip", "rar", "7z", "tar", "gz"];
    pub const IMAGE: &[&str] = &["png", "jpg", "jpeg", "webp", "gif"];
}
