//! The RDMA config update validator.

use fieldop_platform::{
    extract_branch_version, identify_asic, AsicVendor, DeviceInfo, PlatformProbe,
};
use fieldop_rules::{RulesSource, RDMA_VALIDATOR};
use tracing::debug;

use crate::decision::{Decision, Rejection};
use crate::error::Result;
use crate::field::normalize;
use crate::matcher::check_field;
use crate::patch::PatchElement;

/// Gates RDMA-related configuration changes by platform and firmware branch.
///
/// Holds no decision state: every call reloads the rules, re-reads the
/// device info and re-runs the platform probes.
#[derive(Debug, Clone)]
pub struct RdmaConfigUpdateValidator<R, D, P> {
    rules: R,
    device: D,
    probe: P,
}

impl<R, D, P> RdmaConfigUpdateValidator<R, D, P>
where
    R: RulesSource,
    D: DeviceInfo,
    P: PlatformProbe,
{
    /// Validator name, as listed in a table's `field_operation_validators`.
    pub const NAME: &'static str = RDMA_VALIDATOR;

    pub fn new(rules: R, device: D, probe: P) -> Self {
        RdmaConfigUpdateValidator {
            rules,
            device,
            probe,
        }
    }

    pub fn rules(&self) -> &R {
        &self.rules
    }

    /// Decide whether a patch element may be applied, with the reason when
    /// it may not.
    pub fn decide(&self, element: &PatchElement) -> Result<Decision> {
        let doc = self.rules.load()?;
        let info = self.device.version_info()?;
        let vendor = AsicVendor::from_tag(&info.asic_type);
        let platform = identify_asic(&doc, &vendor, &self.probe)?;
        if platform.is_unknown() {
            debug!(path = %element.path, %vendor, "rejected: unknown platform");
            return Ok(Decision::Reject(Rejection::UnknownPlatform));
        }

        let branch = extract_branch_version(&info.build_version);
        let patch = normalize(element)?;
        let scenarios = doc.scenarios(&patch.table, Self::NAME)?;

        for field in &patch.fields {
            if let Err(rejection) = check_field(
                scenarios,
                field,
                element.op.as_str(),
                &platform,
                branch.as_ref(),
            ) {
                debug!(
                    table = %patch.table,
                    op = %element.op,
                    %platform,
                    "rejected: {rejection}"
                );
                return Ok(Decision::Reject(rejection));
            }
        }

        debug!(
            table = %patch.table,
            op = %element.op,
            fields = ?patch.fields,
            %platform,
            branch = ?branch.as_ref().map(|b| b.as_str()),
            "admitted"
        );
        Ok(Decision::Admit {
            platform,
            branch,
            fields: patch.fields,
        })
    }

    /// Whether a patch element may be applied.
    ///
    /// Errors only for configuration faults; every rejection is `Ok(false)`.
    pub fn validate(&self, element: &PatchElement) -> Result<bool> {
        Ok(self.decide(element)?.is_admitted())
    }
}
