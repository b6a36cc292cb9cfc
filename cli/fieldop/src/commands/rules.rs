//! `fieldop rules check`: rules document authoring checks.

use std::path::Path;

use anyhow::{bail, Context, Result};
use fieldop_rules::{check_rules, FileRules, RulesDocument, RulesIssue, RulesSource};

use crate::config::FieldopConfig;

/// Load the rules document and report authoring issues.
pub fn check(config: &FieldopConfig, rules: Option<&Path>) -> Result<()> {
    let path = config.rules_path(rules)?;
    let doc = FileRules::new(&path)
        .load()
        .with_context(|| format!("loading {}", path.display()))?;

    let (out, errors) = report(&doc);
    print!("{out}");
    if errors > 0 {
        bail!("{}: {errors} error(s)", path.display());
    }
    Ok(())
}

/// Render the check result; also returns the error count.
fn report(doc: &RulesDocument) -> (String, usize) {
    let tables = doc.tables.len();
    let scenarios: usize = doc
        .tables
        .values()
        .flat_map(|t| t.validator_data.values())
        .map(|s| s.len())
        .sum();

    match check_rules(doc) {
        Ok(()) => (
            format!("ok: {tables} table(s), {scenarios} scenario(s), no issues\n"),
            0,
        ),
        Err(issues) => {
            let mut out = String::new();
            for RulesIssue { severity, message } in &issues {
                out.push_str(&format!("  [{severity}] {message}\n"));
            }
            let errors = issues.iter().filter(|i| i.is_error()).count();
            out.push_str(&format!(
                "{tables} table(s), {scenarios} scenario(s): {errors} error(s), {} warning(s)\n",
                issues.len() - errors
            ));
            (out, errors)
        }
    }
}
