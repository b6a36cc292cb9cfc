//! `fieldop fields`: show how patch paths normalize.

use anyhow::{Context, Result};
use fieldop_validate::{normalize, PatchElement};

/// Print the table and field identifiers of every element.
pub fn run(elements: &[PatchElement]) -> Result<()> {
    print!("{}", render(elements)?);
    Ok(())
}

fn render(elements: &[PatchElement]) -> Result<String> {
    let mut out = String::new();
    for (index, element) in elements.iter().enumerate() {
        let patch = normalize(element).with_context(|| format!("element {index}"))?;
        out.push_str(&format!(
            "[{index}] {} {} -> {}\n",
            element.op, element.path, patch.table
        ));
        for field in &patch.fields {
            out.push_str(&format!("      '{field}'\n"));
        }
    }
    Ok(out)
}
