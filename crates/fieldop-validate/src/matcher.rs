//! Rule matching for a single field identifier.
//!
//! Gates run in a fixed order: scenario lookup, explicit "unsupported"
//! marker, operation, then branch version (only when the device reports one).

use fieldop_platform::{BranchVersion, PlatformId};
use fieldop_rules::Scenario;
use indexmap::IndexMap;

use crate::decision::Rejection;

/// Check one field identifier against a table's scenarios.
pub fn check_field(
    scenarios: &IndexMap<String, Scenario>,
    field: &str,
    operation: &str,
    platform: &PlatformId,
    branch: Option<&BranchVersion>,
) -> Result<(), Rejection> {
    let Some((name, scenario)) = scenarios.iter().find(|(_, s)| s.governs(field)) else {
        return Err(Rejection::NoScenario {
            field: field.to_string(),
        });
    };

    if scenario.marks_unsupported(platform.as_str()) {
        return Err(Rejection::PlatformUnsupported {
            field: field.to_string(),
            scenario: name.clone(),
            platform: platform.clone(),
        });
    }

    if !scenario.permits(operation) {
        return Err(Rejection::OperationNotAllowed {
            field: field.to_string(),
            scenario: name.clone(),
            operation: operation.to_string(),
        });
    }

    if let Some(branch) = branch {
        match scenario.min_version(platform.as_str()) {
            None => {
                return Err(Rejection::PlatformNotListed {
                    field: field.to_string(),
                    scenario: name.clone(),
                    platform: platform.clone(),
                })
            }
            Some(required) if !branch.satisfies(required) => {
                return Err(Rejection::BranchTooOld {
                    field: field.to_string(),
                    scenario: name.clone(),
                    platform: platform.clone(),
                    required: required.to_string(),
                    running: branch.clone(),
                })
            }
            Some(_) => {}
        }
    }

    Ok(())
}

/// Boolean form of [`check_field`].
pub fn is_allowed(
    scenarios: &IndexMap<String, Scenario>,
    field: &str,
    operation: &str,
    platform: &PlatformId,
    branch: Option<&BranchVersion>,
) -> bool {
    check_field(scenarios, field, operation, platform, branch).is_ok()
}
