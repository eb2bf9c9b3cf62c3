//! String field paths accepted by `WizardController::set_field`
//!
//! Paths name a draft field (`title`, `bpm.min`) or an indexed entry
//! (`tracks[0].title`, `licenses[2].price`). Values are JSON.

use super::errors::{invalid_field, StateMachineResult};
use super::events::WizardAction;
use crate::models::{LicenseField, TrackField};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Translate a path/value pair into the action that applies it
pub fn parse_field(path: &str, value: Value) -> StateMachineResult<WizardAction> {
    let action = match path {
        "title" => WizardAction::SetTitle(text(path, value)?),
        "description" => WizardAction::SetDescription(text(path, value)?),
        "type" => WizardAction::SetProjectType(typed(path, value)?),
        "status" => WizardAction::SetStatus(typed(path, value)?),
        "key" => WizardAction::SetKey(optional_text(path, value)?),
        "cover_image" => WizardAction::SetCoverImage(optional_text(path, value)?),
        "bpm.min" => WizardAction::SetMinBpm(text(path, value)?),
        "bpm.max" => WizardAction::SetMaxBpm(text(path, value)?),
        _ => return parse_indexed(path, value),
    };
    Ok(action)
}

fn parse_indexed(path: &str, value: Value) -> StateMachineResult<WizardAction> {
    let (collection, index, field) =
        split_indexed(path).ok_or_else(|| invalid_field(path, "unknown field"))?;

    match (collection, field) {
        ("tracks", "title") => Ok(WizardAction::UpdateTrack {
            index,
            field: TrackField::Title(text(path, value)?),
        }),
        ("tracks", "duration") => Ok(WizardAction::UpdateTrack {
            index,
            field: TrackField::Duration(typed(path, value)?),
        }),
        ("licenses", field) => {
            let field = match field {
                "name" => LicenseField::Name(text(path, value)?),
                "price" => LicenseField::Price(typed(path, value)?),
                "contract_id" => LicenseField::ContractId(optional_text(path, value)?),
                "features" => LicenseField::Features(typed(path, value)?),
                "file_types" => LicenseField::FileTypes(typed(path, value)?),
                _ => return Err(invalid_field(path, "unknown license field")),
            };
            Ok(WizardAction::UpdateLicense { index, field })
        }
        _ => Err(invalid_field(path, "unknown field")),
    }
}

/// `tracks[3].title` → (`tracks`, 3, `title`)
fn split_indexed(path: &str) -> Option<(&str, usize, &str)> {
    let (collection, rest) = path.split_once('[')?;
    let (index, field) = rest.split_once("].")?;
    let index = index.trim().parse().ok()?;
    Some((collection, index, field))
}

fn text(path: &str, value: Value) -> StateMachineResult<String> {
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(invalid_field(path, format!("expected a string, got {other}"))),
    }
}

fn optional_text(path: &str, value: Value) -> StateMachineResult<Option<String>> {
    match value {
        Value::Null => Ok(None),
        other => text(path, other).map(Some),
    }
}

fn typed<T: DeserializeOwned>(path: &str, value: Value) -> StateMachineResult<T> {
    serde_json::from_value(value).map_err(|e| invalid_field(path, e.to_string()))
}
