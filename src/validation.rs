//! Input validation for wizard fields
//!
//! Normalizes free-form input (tags, BPM bounds) before it reaches the draft.

use crate::error::ValidationError;

/// Highest tempo accepted in a BPM field
const MAX_BPM: u32 = 999;

/// Trim a tag and reject empty input
pub fn normalize_tag(raw: &str) -> Result<String, ValidationError> {
    let tag = raw.trim();
    if tag.is_empty() {
        return Err(ValidationError::EmptyTag);
    }
    Ok(tag.to_string())
}

/// Validate a BPM bound; empty input clears the bound
pub fn normalize_bpm_bound(raw: &str) -> Result<String, ValidationError> {
    let value = raw.trim();
    if value.is_empty() {
        return Ok(String::new());
    }

    match value.parse::<u32>() {
        Ok(bpm) if (1..=MAX_BPM).contains(&bpm) => Ok(bpm.to_string()),
        _ => Err(ValidationError::InvalidBpm {
            value: raw.to_string(),
        }),
    }
}

/// Split a stored BPM string into (min, max) bounds
///
/// `"120-140"` → (`"120"`, `"140"`), `"120"` → (`"120"`, `""`),
/// `"0"` or unparsable input → both empty.
pub fn split_stored_bpm(stored: &str) -> (String, String) {
    let stored = stored.trim();
    let bound = |value: &str| normalize_bpm_bound(value).unwrap_or_default();

    match stored.split_once('-') {
        Some((min, max)) => (bound(min), bound(max)),
        None => (bound(stored), String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_normalization() {
        assert_eq!(normalize_tag("  dark vibes ").unwrap(), "dark vibes");
        assert_eq!(normalize_tag("   ").unwrap_err(), ValidationError::EmptyTag);
    }

    #[test]
    fn test_bpm_bounds() {
        assert_eq!(normalize_bpm_bound(" 140 ").unwrap(), "140");
        assert_eq!(normalize_bpm_bound("").unwrap(), "");
        assert_eq!(normalize_bpm_bound("090").unwrap(), "90");
        assert!(normalize_bpm_bound("0").is_err());
        assert!(normalize_bpm_bound("fast").is_err());
        assert!(normalize_bpm_bound("-5").is_err());
        assert!(normalize_bpm_bound("1000").is_err());
    }

    #[test]
    fn test_split_stored_bpm() {
        assert_eq!(split_stored_bpm("120-140"), ("120".into(), "140".into()));
        assert_eq!(split_stored_bpm("120"), ("120".into(), String::new()));
        assert_eq!(split_stored_bpm("0"), (String::new(), String::new()));
        assert_eq!(split_stored_bpm(""), (String::new(), String::new()));
        assert_eq!(split_stored_bpm("fast"), (String::new(), String::new()));
    }
}
