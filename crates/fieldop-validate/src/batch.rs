//! Whole-patch validation.
//!
//! Elements touching tables the RDMA validator does not cover are skipped,
//! the same way the patch applier only runs validators a table lists.

use fieldop_platform::{DeviceInfo, PlatformProbe};
use fieldop_rules::{RulesSource, RDMA_VALIDATOR};
use serde::Serialize;
use tracing::info;

use crate::decision::{Decision, Rejection};
use crate::error::Result;
use crate::field::normalize;
use crate::patch::{PatchElement, PatchOp};
use crate::validator::RdmaConfigUpdateValidator;

/// Outcome for one patch element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", content = "detail", rename_all = "kebab-case")]
pub enum Verdict {
    Admitted,
    Rejected(Rejection),
    /// The table is not governed by the validator.
    Skipped,
}

/// A verdict together with the element it applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElementVerdict {
    /// Position of the element in the patch.
    pub index: usize,
    pub op: PatchOp,
    pub path: String,
    #[serde(flatten)]
    pub verdict: Verdict,
}

impl ElementVerdict {
    pub fn is_rejected(&self) -> bool {
        matches!(self.verdict, Verdict::Rejected(_))
    }
}

/// Validate every element of a patch, in order.
///
/// Configuration faults abort the whole run; rejections do not.
pub fn validate_patch<R, D, P>(
    validator: &RdmaConfigUpdateValidator<R, D, P>,
    elements: &[PatchElement],
) -> Result<Vec<ElementVerdict>>
where
    R: RulesSource,
    D: DeviceInfo,
    P: PlatformProbe,
{
    let doc = validator.rules().load()?;
    let mut verdicts = Vec::with_capacity(elements.len());

    for (index, element) in elements.iter().enumerate() {
        let table = normalize(element)?.table;
        let governed = doc
            .tables
            .get(&table)
            .is_some_and(|rules| rules.applies_to(RDMA_VALIDATOR));

        let verdict = if !governed {
            Verdict::Skipped
        } else {
            match validator.decide(element)? {
                Decision::Admit { .. } => Verdict::Admitted,
                Decision::Reject(rejection) => Verdict::Rejected(rejection),
            }
        };

        verdicts.push(ElementVerdict {
            index,
            op: element.op,
            path: element.path.clone(),
            verdict,
        });
    }

    let rejected = verdicts.iter().filter(|v| v.is_rejected()).count();
    info!(elements = verdicts.len(), rejected, "validated patch");
    Ok(verdicts)
}
