//! Rules document model.
//!
//! Mirrors the JSON layout of `gcu_field_operation_validators.conf.json`:
//!
//! ```text
//! {
//!   "helper_data": {
//!     "rdma_config_update_validator": {
//!       "mellanox_asics": { "spc1": [<hwsku>, ...] },
//!       "broadcom_asics": { <shorthand>: [<lspci description>, ...], ... }
//!     }
//!   },
//!   "tables": {
//!     <TABLE>: {
//!       "field_operation_validators": [<validator>, ...],
//!       "validator_data": {
//!         "rdma_config_update_validator": {
//!           <scenario>: { "fields": [...], "operations": [...], "platforms": {...} }
//!         }
//!       }
//!     }
//!   }
//! }
//! ```
//!
//! Scenario and shorthand maps keep declaration order: lookups are first
//! match wins.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Result, RulesError};

/// Name of the RDMA config update validator, used as the key in both
/// `helper_data` and `validator_data`.
pub const RDMA_VALIDATOR: &str = "rdma_config_update_validator";

/// A parsed rules document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesDocument {
    /// Vendor-specific auxiliary mappings.
    #[serde(default)]
    pub helper_data: HelperData,
    /// Configuration table name to table rules.
    #[serde(default)]
    pub tables: IndexMap<String, TableRules>,
}

/// The `helper_data` section, keyed by validator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelperData {
    #[serde(
        default,
        rename = "rdma_config_update_validator",
        skip_serializing_if = "Option::is_none"
    )]
    pub rdma: Option<AsicMapping>,
}

/// Vendor tables used to turn a probe result into a platform identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AsicMapping {
    /// Mellanox hardware SKUs grouped by ASIC generation.
    #[serde(default)]
    pub mellanox_asics: MellanoxAsics,
    /// Broadcom shorthand to the PCI description substrings that identify it.
    #[serde(default)]
    pub broadcom_asics: IndexMap<String, Vec<String>>,
}

/// Mellanox SKU lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MellanoxAsics {
    /// Hardware SKUs built on Spectrum-1 silicon.
    #[serde(default)]
    pub spc1: Vec<String>,
}

/// Rules for a single configuration table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRules {
    /// Validators the patch applier runs for this table. Entries may be
    /// dotted module paths; only the last segment is significant.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub field_operation_validators: Vec<String>,
    /// Validator name to its scenarios, in declaration order.
    #[serde(default)]
    pub validator_data: IndexMap<String, IndexMap<String, Scenario>>,
}

/// A named rule: which fields it governs, which operations it allows, and the
/// minimum branch version per platform.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub fields: Vec<String>,
    pub operations: Vec<String>,
    /// Platform to minimum branch version. An empty string marks the platform
    /// as explicitly unsupported.
    pub platforms: HashMap<String, String>,
}

impl RulesDocument {
    /// Parse a rules document from a JSON string.
    pub fn parse(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The ASIC vendor tables for the RDMA validator.
    pub fn asic_mapping(&self) -> Result<&AsicMapping> {
        self.helper_data
            .rdma
            .as_ref()
            .ok_or_else(|| RulesError::MissingSection {
                section: format!("helper_data.{RDMA_VALIDATOR}"),
            })
    }

    /// Look up a table's rules.
    pub fn table(&self, name: &str) -> Result<&TableRules> {
        self.tables.get(name).ok_or_else(|| RulesError::MissingTable {
            table: name.to_string(),
        })
    }

    /// The scenarios a validator defines for a table.
    pub fn scenarios(&self, table: &str, validator: &str) -> Result<&IndexMap<String, Scenario>> {
        self.table(table)?
            .validator_data
            .get(validator)
            .ok_or_else(|| RulesError::MissingValidatorData {
                table: table.to_string(),
                validator: validator.to_string(),
            })
    }
}

impl TableRules {
    /// Whether `validator` should run for this table.
    ///
    /// An explicit `field_operation_validators` list decides on its own;
    /// without one, the presence of validator data does.
    pub fn applies_to(&self, validator: &str) -> bool {
        if self.field_operation_validators.is_empty() {
            self.validator_data.contains_key(validator)
        } else {
            self.lists_validator(validator)
        }
    }

    /// Whether the `field_operation_validators` list names `validator`.
    pub fn lists_validator(&self, validator: &str) -> bool {
        self.field_operation_validators
            .iter()
            .any(|entry| validator_basename(entry) == validator)
    }
}

impl Scenario {
    /// Whether this scenario governs the field identifier.
    pub fn governs(&self, field: &str) -> bool {
        self.fields.iter().any(|f| f == field)
    }

    /// Whether the operation is allowed.
    pub fn permits(&self, operation: &str) -> bool {
        self.operations.iter().any(|op| op == operation)
    }

    /// Minimum branch version for a platform, if the platform is listed.
    pub fn min_version(&self, platform: &str) -> Option<&str> {
        self.platforms.get(platform).map(String::as_str)
    }

    /// Whether the platform is listed with the empty "unsupported" marker.
    pub fn marks_unsupported(&self, platform: &str) -> bool {
        self.min_version(platform).is_some_and(str::is_empty)
    }
}

/// `generic_config_updater.field_operation_validators.rdma_config_update_validator`
/// -> `rdma_config_update_validator`.
fn validator_basename(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"{
        "README": ["ignored"],
        "helper_data": {
            "rdma_config_update_validator": {
                "mellanox_asics": { "spc1": ["ACS-MSN2700", "Mellanox-SN2700"] },
                "broadcom_asics": {
                    "th2": ["Broadcom Limited Device b971"],
                    "th": ["Broadcom Limited Device b960"],
                    "td3": ["Broadcom Limited Device b870"]
                }
            }
        },
        "tables": {
            "PFC_WD": {
                "field_operation_validators": [
                    "generic_config_updater.field_operation_validators.rdma_config_update_validator"
                ],
                "validator_data": {
                    "rdma_config_update_validator": {
                        "PFCWD enable/disable": {
                            "fields": ["restoration_time", "detection_time", "action"],
                            "operations": ["remove", "add", "replace"],
                            "platforms": { "spc1": "20181100", "td2": "" }
                        },
                        "Poll interval": {
                            "fields": ["global/poll_interval"],
                            "operations": ["replace"],
                            "platforms": { "spc1": "20181100" }
                        }
                    }
                }
            },
            "BUFFER_POOL": {}
        }
    }"#;

    #[test]
    fn parse_full_document() {
        let doc = RulesDocument::parse(DOC).unwrap();
        let mapping = doc.asic_mapping().unwrap();
        assert_eq!(mapping.mellanox_asics.spc1.len(), 2);
        assert_eq!(doc.tables.len(), 2);
    }

    #[test]
    fn broadcom_shorthands_keep_declaration_order() {
        let doc = RulesDocument::parse(DOC).unwrap();
        let order: Vec<&str> = doc
            .asic_mapping()
            .unwrap()
            .broadcom_asics
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(order, ["th2", "th", "td3"]);
    }

    #[test]
    fn scenarios_keep_declaration_order() {
        let doc = RulesDocument::parse(DOC).unwrap();
        let scenarios = doc.scenarios("PFC_WD", RDMA_VALIDATOR).unwrap();
        let names: Vec<&str> = scenarios.keys().map(String::as_str).collect();
        assert_eq!(names, ["PFCWD enable/disable", "Poll interval"]);
    }

    #[test]
    fn missing_table_and_validator_data() {
        let doc = RulesDocument::parse(DOC).unwrap();
        assert!(matches!(
            doc.scenarios("WRED_PROFILE", RDMA_VALIDATOR),
            Err(RulesError::MissingTable { .. })
        ));
        assert!(matches!(
            doc.scenarios("BUFFER_POOL", RDMA_VALIDATOR),
            Err(RulesError::MissingValidatorData { .. })
        ));
    }

    #[test]
    fn missing_helper_data_is_an_error() {
        let doc = RulesDocument::parse(r#"{"tables": {}}"#).unwrap();
        assert!(matches!(
            doc.asic_mapping(),
            Err(RulesError::MissingSection { .. })
        ));
    }

    #[test]
    fn scenario_without_platforms_is_malformed() {
        let json = r#"{"tables": {"T": {"validator_data": {"v": {"s": {"fields": [], "operations": []}}}}}}"#;
        assert!(matches!(
            RulesDocument::parse(json),
            Err(RulesError::Json(_))
        ));
    }

    #[test]
    fn scenario_queries() {
        let doc = RulesDocument::parse(DOC).unwrap();
        let scenario = &doc.scenarios("PFC_WD", RDMA_VALIDATOR).unwrap()["PFCWD enable/disable"];
        assert!(scenario.governs("action"));
        assert!(!scenario.governs("Action"));
        assert!(scenario.permits("add"));
        assert!(!scenario.permits("move"));
        assert_eq!(scenario.min_version("spc1"), Some("20181100"));
        assert_eq!(scenario.min_version("th"), None);
        assert!(scenario.marks_unsupported("td2"));
        assert!(!scenario.marks_unsupported("spc1"));
        assert!(!scenario.marks_unsupported("th"));
    }

    #[test]
    fn validator_applicability() {
        let doc = RulesDocument::parse(DOC).unwrap();
        assert!(doc.table("PFC_WD").unwrap().applies_to(RDMA_VALIDATOR));
        assert!(!doc.table("BUFFER_POOL").unwrap().applies_to(RDMA_VALIDATOR));

        let listed_elsewhere = TableRules {
            field_operation_validators: vec!["other_validator".into()],
            validator_data: doc.table("PFC_WD").unwrap().validator_data.clone(),
        };
        assert!(!listed_elsewhere.applies_to(RDMA_VALIDATOR));
    }

    #[test]
    fn basename_of_dotted_validator() {
        assert_eq!(
            validator_basename("a.b.rdma_config_update_validator"),
            RDMA_VALIDATOR
        );
        assert_eq!(validator_basename(RDMA_VALIDATOR), RDMA_VALIDATOR);
    }
}
