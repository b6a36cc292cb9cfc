//! Authoring checks for rules documents.
//!
//! Scenario lookup and Broadcom shorthand matching are first match wins, so a
//! field listed in two scenarios, or a PCI description shared by two
//! shorthands, silently depends on declaration order. These checks surface
//! such overlaps together with values the validator could never match.

use std::collections::HashMap;

use crate::document::{RulesDocument, RDMA_VALIDATOR};

/// Operation names defined by JSON Patch.
const PATCH_OPERATIONS: [&str; 6] = ["add", "remove", "replace", "move", "copy", "test"];

/// An issue found in a rules document.
#[derive(Debug, Clone)]
pub struct RulesIssue {
    /// Severity: "error" or "warning".
    pub severity: &'static str,
    /// Human-readable description.
    pub message: String,
}

impl RulesIssue {
    fn error(message: String) -> Self {
        RulesIssue {
            severity: "error",
            message,
        }
    }

    fn warning(message: String) -> Self {
        RulesIssue {
            severity: "warning",
            message,
        }
    }

    /// Whether this issue is an error.
    pub fn is_error(&self) -> bool {
        self.severity == "error"
    }
}

/// Check a rules document for authoring mistakes.
///
/// Returns `Ok(())` if clean, or `Err(issues)` with every problem found.
pub fn check_rules(doc: &RulesDocument) -> std::result::Result<(), Vec<RulesIssue>> {
    let mut issues = Vec::new();

    if let Some(mapping) = &doc.helper_data.rdma {
        let mut owners: HashMap<&str, &str> = HashMap::new();
        for (shorthand, descriptions) in &mapping.broadcom_asics {
            for description in descriptions {
                match owners.get(description.as_str()) {
                    Some(first) if first != shorthand => {
                        issues.push(RulesIssue::warning(format!(
                            "broadcom description '{description}' is listed for both '{first}' and '{shorthand}'; '{first}' wins"
                        )));
                    }
                    Some(_) => {}
                    None => {
                        owners.insert(description, shorthand);
                    }
                }
            }
        }
    } else {
        issues.push(RulesIssue::error(format!(
            "missing helper_data.{RDMA_VALIDATOR} section"
        )));
    }

    for (table, rules) in &doc.tables {
        if rules.lists_validator(RDMA_VALIDATOR) && !rules.validator_data.contains_key(RDMA_VALIDATOR)
        {
            issues.push(RulesIssue::error(format!(
                "table '{table}' runs {RDMA_VALIDATOR} but has no validator data for it"
            )));
        }

        let Some(scenarios) = rules.validator_data.get(RDMA_VALIDATOR) else {
            continue;
        };

        let mut owners: HashMap<&str, &str> = HashMap::new();
        for (name, scenario) in scenarios {
            if scenario.fields.is_empty() {
                issues.push(RulesIssue::warning(format!(
                    "{table}: scenario '{name}' governs no fields"
                )));
            }
            if scenario.operations.is_empty() {
                issues.push(RulesIssue::warning(format!(
                    "{table}: scenario '{name}' allows no operations"
                )));
            }

            for field in &scenario.fields {
                if let Some(first) = owners.get(field.as_str()) {
                    issues.push(RulesIssue::warning(format!(
                        "{table}: field '{field}' appears in scenarios '{first}' and '{name}'; '{first}' wins"
                    )));
                } else {
                    owners.insert(field, name);
                }
            }

            for op in &scenario.operations {
                if !PATCH_OPERATIONS.contains(&op.as_str()) {
                    issues.push(RulesIssue::error(format!(
                        "{table}: scenario '{name}' allows unknown operation '{op}'"
                    )));
                }
            }

            let mut platforms: Vec<_> = scenario.platforms.iter().collect();
            platforms.sort();
            for (platform, version) in platforms {
                if !version.is_empty() && !is_dated_version(version) {
                    issues.push(RulesIssue::error(format!(
                        "{table}: scenario '{name}' has version '{version}' for '{platform}' (expected 8 digits or empty)"
                    )));
                }
            }
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}

fn is_dated_version(s: &str) -> bool {
    s.len() == 8 && s.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(json: &str) -> RulesDocument {
        RulesDocument::parse(json).unwrap()
    }

    const CLEAN: &str = r#"{
        "helper_data": {"rdma_config_update_validator": {
            "mellanox_asics": {"spc1": ["ACS-MSN2700"]},
            "broadcom_asics": {"th": ["Device b960"], "th2": ["Device b971"]}
        }},
        "tables": {"PFC_WD": {
            "field_operation_validators": ["rdma_config_update_validator"],
            "validator_data": {"rdma_config_update_validator": {
                "wd": {"fields": ["action"], "operations": ["replace"], "platforms": {"th": "20181100", "td2": ""}}
            }}
        }}
    }"#;

    #[test]
    fn clean_document_passes() {
        assert!(check_rules(&doc(CLEAN)).is_ok());
    }

    #[test]
    fn shipped_rules_are_clean() {
        let shipped = include_str!("../../../conf/gcu_field_operation_validators.conf.json");
        let doc = doc(shipped);
        assert_eq!(doc.tables.len(), 5);
        assert!(check_rules(&doc).is_ok());
    }

    #[test]
    fn duplicate_field_is_a_warning() {
        let issues = check_rules(&doc(
            r#"{
            "helper_data": {"rdma_config_update_validator": {}},
            "tables": {"PFC_WD": {"validator_data": {"rdma_config_update_validator": {
                "first": {"fields": ["action"], "operations": ["add"], "platforms": {}},
                "second": {"fields": ["action"], "operations": ["add"], "platforms": {}}
            }}}}
        }"#,
        ))
        .unwrap_err();
        assert_eq!(issues.len(), 1);
        assert!(!issues[0].is_error());
        assert!(issues[0].message.contains("'first' wins"));
    }

    #[test]
    fn bad_version_and_operation_are_errors() {
        let issues = check_rules(&doc(
            r#"{
            "helper_data": {"rdma_config_update_validator": {}},
            "tables": {"PFC_WD": {"validator_data": {"rdma_config_update_validator": {
                "wd": {"fields": ["action"], "operations": ["upsert"], "platforms": {"th": "2018-11"}}
            }}}}
        }"#,
        ))
        .unwrap_err();
        assert_eq!(issues.iter().filter(|i| i.is_error()).count(), 2);
        assert!(issues.iter().any(|i| i.message.contains("'upsert'")));
        assert!(issues.iter().any(|i| i.message.contains("'2018-11'")));
    }

    #[test]
    fn shared_broadcom_description_is_a_warning() {
        let issues = check_rules(&doc(
            r#"{
            "helper_data": {"rdma_config_update_validator": {
                "broadcom_asics": {"th": ["Device b960"], "th2": ["Device b960"]}
            }}
        }"#,
        ))
        .unwrap_err();
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("'th' wins"));
    }

    #[test]
    fn missing_helper_data_is_an_error() {
        let issues = check_rules(&doc(r#"{"tables": {}}"#)).unwrap_err();
        assert!(issues[0].is_error());
    }

    #[test]
    fn listed_validator_without_data_is_an_error() {
        let issues = check_rules(&doc(
            r#"{
            "helper_data": {"rdma_config_update_validator": {}},
            "tables": {"BUFFER_POOL": {"field_operation_validators": ["x.rdma_config_update_validator"]}}
        }"#,
        ))
        .unwrap_err();
        assert!(issues
            .iter()
            .any(|i| i.is_error() && i.message.contains("BUFFER_POOL")));
    }

    #[test]
    fn empty_scenario_warns_twice() {
        let issues = check_rules(&doc(
            r#"{
            "helper_data": {"rdma_config_update_validator": {}},
            "tables": {"PFC_WD": {"validator_data": {"rdma_config_update_validator": {
                "empty": {"fields": [], "operations": [], "platforms": {}}
            }}}}
        }"#,
        ))
        .unwrap_err();
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(|i| !i.is_error()));
    }
}
