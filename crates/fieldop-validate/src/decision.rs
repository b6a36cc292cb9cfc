//! Admit/reject decisions.

use std::fmt;

use fieldop_platform::{BranchVersion, PlatformId};
use serde::Serialize;

/// The validator's decision on whether a patch element may be applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Every field identifier passed all gates.
    Admit {
        platform: PlatformId,
        branch: Option<BranchVersion>,
        fields: Vec<String>,
    },
    /// The element must not be applied.
    Reject(Rejection),
}

impl Decision {
    pub fn is_admitted(&self) -> bool {
        matches!(self, Decision::Admit { .. })
    }

    /// The rejection, if any.
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Decision::Admit { .. } => None,
            Decision::Reject(rejection) => Some(rejection),
        }
    }
}

/// Why a patch element was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "kebab-case")]
pub enum Rejection {
    /// The running platform could not be identified.
    UnknownPlatform,
    /// No scenario of the table governs the field.
    NoScenario { field: String },
    /// The scenario marks the platform as unsupported.
    PlatformUnsupported {
        field: String,
        scenario: String,
        platform: PlatformId,
    },
    /// The scenario does not allow the operation.
    OperationNotAllowed {
        field: String,
        scenario: String,
        operation: String,
    },
    /// The scenario has no version entry for the platform.
    PlatformNotListed {
        field: String,
        scenario: String,
        platform: PlatformId,
    },
    /// The running branch predates the scenario's minimum for the platform.
    BranchTooOld {
        field: String,
        scenario: String,
        platform: PlatformId,
        required: String,
        running: BranchVersion,
    },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::UnknownPlatform => write!(f, "platform could not be identified"),
            Rejection::NoScenario { field } => {
                write!(f, "field '{field}' is not covered by any scenario")
            }
            Rejection::PlatformUnsupported {
                field,
                scenario,
                platform,
            } => write!(
                f,
                "field '{field}': scenario '{scenario}' is unsupported on {platform}"
            ),
            Rejection::OperationNotAllowed {
                field,
                scenario,
                operation,
            } => write!(
                f,
                "field '{field}': scenario '{scenario}' does not allow '{operation}'"
            ),
            Rejection::PlatformNotListed {
                field,
                scenario,
                platform,
            } => write!(
                f,
                "field '{field}': scenario '{scenario}' lists no version for {platform}"
            ),
            Rejection::BranchTooOld {
                field,
                scenario,
                platform,
                required,
                running,
            } => write!(
                f,
                "field '{field}': scenario '{scenario}' needs branch {required} on {platform}, running {running}"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admit_and_reject() {
        let admit = Decision::Admit {
            platform: PlatformId::new("th2"),
            branch: None,
            fields: vec!["action".into()],
        };
        assert!(admit.is_admitted());
        assert!(admit.rejection().is_none());

        let reject = Decision::Reject(Rejection::UnknownPlatform);
        assert!(!reject.is_admitted());
        assert_eq!(reject.rejection(), Some(&Rejection::UnknownPlatform));
    }

    #[test]
    fn rejection_messages() {
        let r = Rejection::BranchTooOld {
            field: "action".into(),
            scenario: "wd_action".into(),
            platform: PlatformId::new("cisco-8000"),
            required: "20201231".into(),
            running: BranchVersion::parse("20201230").unwrap(),
        };
        assert_eq!(
            r.to_string(),
            "field 'action': scenario 'wd_action' needs branch 20201231 on cisco-8000, running 20201230"
        );
        assert_eq!(
            Rejection::NoScenario { field: "".into() }.to_string(),
            "field '' is not covered by any scenario"
        );
    }

    #[test]
    fn rejection_serializes_with_reason_tag() {
        let json = serde_json::to_value(Rejection::OperationNotAllowed {
            field: "action".into(),
            scenario: "wd_action".into(),
            operation: "add".into(),
        })
        .unwrap();
        assert_eq!(json["reason"], "operation-not-allowed");
        assert_eq!(json["operation"], "add");
        assert_eq!(
            serde_json::to_value(Rejection::UnknownPlatform).unwrap()["reason"],
            "unknown-platform"
        );
    }
}
