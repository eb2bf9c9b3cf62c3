use serde::{Deserialize, Serialize};
use std::fmt;

/// Wizard steps, totally ordered Details → Content → Pricing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    /// Title, type, description, genres, tags, BPM
    Details,
    /// Tracks and their bound library files
    Content,
    /// License tiers and contract templates
    Pricing,
}

impl WizardStep {
    pub const ALL: [WizardStep; 3] = [Self::Details, Self::Content, Self::Pricing];

    /// 1-based position shown in the step indicator
    pub fn number(&self) -> u8 {
        match self {
            Self::Details => 1,
            Self::Content => 2,
            Self::Pricing => 3,
        }
    }

    pub fn next(&self) -> Option<Self> {
        match self {
            Self::Details => Some(Self::Content),
            Self::Content => Some(Self::Pricing),
            Self::Pricing => None,
        }
    }

    pub fn previous(&self) -> Option<Self> {
        match self {
            Self::Details => None,
            Self::Content => Some(Self::Details),
            Self::Pricing => Some(Self::Content),
        }
    }

    pub fn is_first(&self) -> bool {
        matches!(self, Self::Details)
    }

    pub fn is_last(&self) -> bool {
        matches!(self, Self::Pricing)
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Details => write!(f, "details"),
            Self::Content => write!(f, "content"),
            Self::Pricing => write!(f, "pricing"),
        }
    }
}

impl std::str::FromStr for WizardStep {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "details" => Ok(Self::Details),
            "content" => Ok(Self::Content),
            "pricing" => Ok(Self::Pricing),
            _ => Err(format!("Invalid wizard step: {s}")),
        }
    }
}

impl Default for WizardStep {
    fn default() -> Self {
        Self::Details
    }
}

/// Lifecycle of the wizard modal itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStatus {
    /// Accepting edits
    Open,
    /// A create/update call is in flight
    Submitting,
    /// The project was persisted and the wizard closed
    Committed,
    /// The user abandoned the wizard
    Cancelled,
    /// The existing project was deleted from the wizard
    Deleted,
}

impl WizardStatus {
    /// Check if this is a terminal state (no further edits allowed)
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Committed | Self::Cancelled | Self::Deleted)
    }

    pub fn accepts_edits(&self) -> bool {
        matches!(self, Self::Open)
    }
}

impl fmt::Display for WizardStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Submitting => write!(f, "submitting"),
            Self::Committed => write!(f, "committed"),
            Self::Cancelled => write!(f, "cancelled"),
            Self::Deleted => write!(f, "deleted"),
        }
    }
}

impl Default for WizardStatus {
    fn default() -> Self {
        Self::Open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_ordering_is_linear() {
        assert_eq!(WizardStep::Details.next(), Some(WizardStep::Content));
        assert_eq!(WizardStep::Content.next(), Some(WizardStep::Pricing));
        assert_eq!(WizardStep::Pricing.next(), None);
        assert_eq!(WizardStep::Details.previous(), None);
        assert_eq!(WizardStep::Pricing.previous(), Some(WizardStep::Content));
        assert!(WizardStep::Details < WizardStep::Pricing);
    }

    #[test]
    fn test_status_terminal_check() {
        assert!(WizardStatus::Committed.is_terminal());
        assert!(WizardStatus::Cancelled.is_terminal());
        assert!(WizardStatus::Deleted.is_terminal());
        assert!(!WizardStatus::Open.is_terminal());
        assert!(!WizardStatus::Submitting.is_terminal());
        assert!(!WizardStatus::Submitting.accepts_edits());
    }

    #[test]
    fn test_state_string_conversion() {
        assert_eq!(WizardStep::Content.to_string(), "content");
        assert_eq!("pricing".parse::<WizardStep>().unwrap(), WizardStep::Pricing);
        assert!("review".parse::<WizardStep>().is_err());
    }

    #[test]
    fn test_state_serde() {
        let json = serde_json::to_string(&WizardStatus::Submitting).unwrap();
        assert_eq!(json, "\"submitting\"");
        let parsed: WizardStep = serde_json::from_str("\"details\"").unwrap();
        assert_eq!(parsed, WizardStep::Details);
    }
}
