//! `fieldop validate`: verdict per patch element.

use std::path::Path;

use anyhow::{bail, Result};
use fieldop_platform::{DeviceInfo, PlatformProbe};
use fieldop_rules::RulesSource;
use fieldop_validate::{
    validate_patch, ElementVerdict, PatchElement, RdmaConfigUpdateValidator, Verdict,
};

use crate::config::FieldopConfig;

/// Validate a patch against the running device.
pub fn run(
    config: &FieldopConfig,
    rules: Option<&Path>,
    elements: &[PatchElement],
    format: Option<&str>,
) -> Result<()> {
    let validator = RdmaConfigUpdateValidator::new(
        config.rules_source(rules)?,
        config.version_file(),
        config.probe(),
    );
    report(&validator, elements, format)
}

fn report<R, D, P>(
    validator: &RdmaConfigUpdateValidator<R, D, P>,
    elements: &[PatchElement],
    format: Option<&str>,
) -> Result<()>
where
    R: RulesSource,
    D: DeviceInfo,
    P: PlatformProbe,
{
    let verdicts = validate_patch(validator, elements)?;

    match format {
        Some("json") => println!("{}", serde_json::to_string_pretty(&verdicts)?),
        Some("human") | None => print!("{}", render_human(&verdicts)),
        Some(other) => bail!("unknown format: '{other}'. Choose: human, json"),
    }

    let rejected = verdicts.iter().filter(|v| v.is_rejected()).count();
    if rejected > 0 {
        bail!("{rejected} of {} patch element(s) rejected", verdicts.len());
    }
    Ok(())
}

fn render_human(verdicts: &[ElementVerdict]) -> String {
    let mut out = String::new();
    for v in verdicts {
        let outcome = match &v.verdict {
            Verdict::Admitted => "admitted".to_string(),
            Verdict::Skipped => "skipped (no rules for table)".to_string(),
            Verdict::Rejected(rejection) => format!("rejected: {rejection}"),
        };
        out.push_str(&format!("[{}] {} {}: {outcome}\n", v.index, v.op, v.path));
    }
    out
}
