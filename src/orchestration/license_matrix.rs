//! # License matrix
//!
//! Fixed three-tier license structure seeded per project type. Tiers can be
//! edited field by field but never added or removed. Contract-template checks
//! run only at commit time through [`crate::state_machine::guards`].

use crate::error::ValidationError;
use crate::models::{LicenseField, LicenseInfo, ProjectType};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LicenseMatrix {
    licenses: Vec<LicenseInfo>,
}

impl LicenseMatrix {
    /// Seed the default tiers for `project_type`
    pub fn seeded_for(project_type: ProjectType) -> Self {
        Self {
            licenses: LicenseInfo::default_tiers(project_type),
        }
    }

    /// Keep the licenses of an existing project
    pub fn from_licenses(licenses: Vec<LicenseInfo>) -> Self {
        Self { licenses }
    }

    pub fn licenses(&self) -> &[LicenseInfo] {
        &self.licenses
    }

    pub fn is_empty(&self) -> bool {
        self.licenses.is_empty()
    }

    pub fn len(&self) -> usize {
        self.licenses.len()
    }

    pub fn update_license(
        &mut self,
        index: usize,
        field: LicenseField,
    ) -> Result<(), ValidationError> {
        let len = self.licenses.len();
        let license = self
            .licenses
            .get_mut(index)
            .ok_or(ValidationError::LicenseIndexOutOfRange { index, len })?;

        match field {
            LicenseField::Name(name) => license.name = name,
            LicenseField::Price(price) => {
                if !price.is_finite() || price < 0.0 {
                    return Err(ValidationError::NegativePrice {
                        license_id: license.id.clone(),
                    });
                }
                license.price = price;
            }
            LicenseField::ContractId(contract_id) => {
                license.contract_id = contract_id.filter(|id| !id.trim().is_empty());
            }
            LicenseField::Features(features) => license.features = features,
            LicenseField::FileTypes(file_types) => license.file_types_included = file_types,
        }

        Ok(())
    }

    /// Seed tiers if the matrix is empty and the type sells licenses
    pub fn ensure_seeded(&mut self, project_type: ProjectType) -> bool {
        if self.licenses.is_empty() && !project_type.is_release() {
            self.licenses = LicenseInfo::default_tiers(project_type);
            return true;
        }
        false
    }

    /// Licenses still lacking a contract template, for live UI hints
    pub fn missing_contracts(&self) -> Vec<&LicenseInfo> {
        self.licenses
            .iter()
            .filter(|license| !license.has_contract())
            .collect()
    }

    /// Copy of the tiers with empty display names filled from their type
    pub fn with_default_names(&self) -> Vec<LicenseInfo> {
        self.licenses
            .iter()
            .cloned()
            .map(|mut license| {
                if license.name.trim().is_empty() {
                    license.name = license.default_name();
                }
                license
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LicenseType;

    #[test]
    fn test_seeding_per_type() {
        assert_eq!(LicenseMatrix::seeded_for(ProjectType::BeatTape).len(), 3);
        assert_eq!(LicenseMatrix::seeded_for(ProjectType::SoundPack).len(), 3);
        assert!(LicenseMatrix::seeded_for(ProjectType::Release).is_empty());
    }

    #[test]
    fn test_update_fields() {
        let mut matrix = LicenseMatrix::seeded_for(ProjectType::BeatTape);
        matrix
            .update_license(0, LicenseField::Price(34.99))
            .unwrap();
        matrix
            .update_license(0, LicenseField::ContractId(Some("c1".to_string())))
            .unwrap();
        matrix
            .update_license(1, LicenseField::FileTypes(vec![LicenseType::Wav]))
            .unwrap();

        assert_eq!(matrix.licenses()[0].price, 34.99);
        assert_eq!(matrix.licenses()[0].contract_id.as_deref(), Some("c1"));
        assert_eq!(matrix.licenses()[1].file_types_included, vec![LicenseType::Wav]);
        assert_eq!(matrix.len(), 3);
    }

    #[test]
    fn test_negative_price_rejected() {
        let mut matrix = LicenseMatrix::seeded_for(ProjectType::BeatTape);
        let err = matrix.update_license(2, LicenseField::Price(-1.0)).unwrap_err();
        assert_eq!(
            err,
            ValidationError::NegativePrice {
                license_id: "l3".to_string()
            }
        );
        assert_eq!(matrix.licenses()[2].price, 499.99);
    }

    #[test]
    fn test_out_of_range_index() {
        let mut matrix = LicenseMatrix::seeded_for(ProjectType::BeatTape);
        assert_eq!(
            matrix
                .update_license(3, LicenseField::Name("Extra".into()))
                .unwrap_err(),
            ValidationError::LicenseIndexOutOfRange { index: 3, len: 3 }
        );
    }

    #[test]
    fn test_blank_contract_id_clears_reference() {
        let mut matrix = LicenseMatrix::seeded_for(ProjectType::BeatTape);
        matrix
            .update_license(0, LicenseField::ContractId(Some("  ".to_string())))
            .unwrap();
        assert!(matrix.licenses()[0].contract_id.is_none());
        assert_eq!(matrix.missing_contracts().len(), 3);
    }

    #[test]
    fn test_default_names_fill_only_blanks() {
        let mut matrix = LicenseMatrix::seeded_for(ProjectType::BeatTape);
        matrix.update_license(0, LicenseField::Name(String::new())).unwrap();

        let named = matrix.with_default_names();
        assert_eq!(named[0].name, "MP3 Lease");
        assert_eq!(named[1].name, "Premium Lease");
        assert!(matrix.licenses()[0].name.is_empty());
    }

    #[test]
    fn test_ensure_seeded() {
        let mut matrix = LicenseMatrix::default();
        assert!(!matrix.ensure_seeded(ProjectType::Release));
        assert!(matrix.ensure_seeded(ProjectType::SoundPack));
        assert!(!matrix.ensure_seeded(ProjectType::BeatTape));
        assert_eq!(matrix.licenses()[0].name, "Basic License");
    }
}
