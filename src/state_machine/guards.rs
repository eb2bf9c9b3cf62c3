use super::errors::{GuardError, GuardResult};
use crate::models::{ContractTemplate, LicenseInfo};
use crate::orchestration::track_assembler::TrackAssembler;

/// What a commit guard gets to inspect
#[derive(Debug, Clone, Copy)]
pub struct CommitContext<'a> {
    pub tracks: &'a TrackAssembler,
    /// Licenses as they will be submitted (already empty for releases)
    pub licenses: &'a [LicenseInfo],
    /// Loaded contract catalog, if any
    pub catalog: Option<&'a [ContractTemplate]>,
}

/// Trait for implementing commit guards
pub trait CommitGuard {
    /// Check whether the commit may proceed
    fn check(&self, ctx: &CommitContext<'_>) -> GuardResult<()>;

    /// Get a description of this guard for logging
    fn description(&self) -> &'static str;
}

/// Guard blocking commit while a probe is outstanding for a current track
pub struct ProbesSettledGuard;

impl CommitGuard for ProbesSettledGuard {
    fn check(&self, ctx: &CommitContext<'_>) -> GuardResult<()> {
        let pending = ctx.tracks.outstanding_probes();
        if !pending.is_empty() {
            return Err(GuardError::ProbesOutstanding { pending });
        }
        Ok(())
    }

    fn description(&self) -> &'static str {
        "No duration probe may be outstanding for a current track"
    }
}

/// Guard requiring every submitted license to reference a contract template
pub struct LicenseContractsGuard;

impl CommitGuard for LicenseContractsGuard {
    fn check(&self, ctx: &CommitContext<'_>) -> GuardResult<()> {
        for license in ctx.licenses {
            let Some(contract_id) = license.contract_id.as_deref().filter(|id| !id.trim().is_empty())
            else {
                return Err(GuardError::MissingContract {
                    license_id: license.id.clone(),
                    license_name: license.name.clone(),
                });
            };

            if let Some(catalog) = ctx.catalog {
                if !catalog.iter().any(|template| template.id == contract_id) {
                    return Err(GuardError::UnknownContract {
                        license_id: license.id.clone(),
                        contract_id: contract_id.to_string(),
                    });
                }
            }
        }

        Ok(())
    }

    fn description(&self) -> &'static str {
        "Every license must reference a known contract template"
    }
}
