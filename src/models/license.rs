use super::project::ProjectType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// License tier kind, which doubles as the file-type label it grants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LicenseType {
    #[serde(alias = "mp3", alias = "Mp3")]
    Mp3,
    #[serde(alias = "wav", alias = "Wav")]
    Wav,
    #[serde(alias = "stems", alias = "Stems")]
    Stems,
}

impl fmt::Display for LicenseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mp3 => write!(f, "MP3"),
            Self::Wav => write!(f, "WAV"),
            Self::Stems => write!(f, "STEMS"),
        }
    }
}

impl std::str::FromStr for LicenseType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "MP3" => Ok(Self::Mp3),
            "WAV" => Ok(Self::Wav),
            "STEMS" => Ok(Self::Stems),
            _ => Err(format!("Invalid license type: {s}")),
        }
    }
}

/// A purchasable license tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LicenseInfo {
    pub id: String,
    #[serde(rename = "type")]
    pub license_type: LicenseType,
    pub name: String,
    pub price: f64,
    pub file_types_included: Vec<LicenseType>,
    pub features: Vec<String>,
    /// Contract template this tier is sold under; required before publishing
    #[serde(default)]
    pub contract_id: Option<String>,
}

impl LicenseInfo {
    fn tier(
        id: &str,
        license_type: LicenseType,
        name: &str,
        price: f64,
        file_types_included: &[LicenseType],
        features: &[&str],
    ) -> Self {
        Self {
            id: id.to_string(),
            license_type,
            name: name.to_string(),
            price,
            file_types_included: file_types_included.to_vec(),
            features: features.iter().map(|f| f.to_string()).collect(),
            contract_id: None,
        }
    }

    /// Name used when the seller left the display name empty
    pub fn default_name(&self) -> String {
        format!("{} Lease", self.license_type)
    }

    pub fn has_contract(&self) -> bool {
        self.contract_id
            .as_deref()
            .is_some_and(|id| !id.trim().is_empty())
    }

    /// Seeded entry/mid/top tiers for a project type; empty for releases
    pub fn default_tiers(project_type: ProjectType) -> Vec<LicenseInfo> {
        use LicenseType::{Mp3, Stems, Wav};

        match project_type {
            ProjectType::BeatTape => vec![
                Self::tier(
                    "l1",
                    Mp3,
                    "Basic Lease",
                    29.99,
                    &[Mp3],
                    &["MP3 File", "2,000 Streams", "Non-Profit Use"],
                ),
                Self::tier(
                    "l2",
                    Wav,
                    "Premium Lease",
                    49.99,
                    &[Wav, Mp3],
                    &["WAV + MP3", "50,000 Streams", "Commercial Use"],
                ),
                Self::tier(
                    "l3",
                    Stems,
                    "Exclusive Rights",
                    499.99,
                    &[Stems, Wav, Mp3],
                    &["All Stems", "Unlimited Streams", "Full Ownership Transfer"],
                ),
            ],
            ProjectType::SoundPack => vec![
                Self::tier(
                    "l1",
                    Wav,
                    "Basic License",
                    19.99,
                    &[Wav],
                    &["WAV Files", "Personal Use", "100 Projects"],
                ),
                Self::tier(
                    "l2",
                    Wav,
                    "Extended License",
                    49.99,
                    &[Wav, Stems],
                    &["WAV + Stems", "Commercial Use", "Unlimited Projects"],
                ),
                Self::tier(
                    "l3",
                    Stems,
                    "Exclusive Rights",
                    199.99,
                    &[Stems, Wav],
                    &["All Files + Stems", "Full Ownership", "Resell Rights"],
                ),
            ],
            ProjectType::Release => Vec::new(),
        }
    }
}

/// Single-field edits accepted by `updateLicense`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum LicenseField {
    Name(String),
    Price(f64),
    ContractId(Option<String>),
    Features(Vec<String>),
    FileTypes(Vec<LicenseType>),
}

impl LicenseField {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Name(_) => "name",
            Self::Price(_) => "price",
            Self::ContractId(_) => "contract_id",
            Self::Features(_) => "features",
            Self::FileTypes(_) => "file_types",
        }
    }
}
