//! CLI command implementations.

pub mod fields;
pub mod platform;
pub mod rules;
pub mod validate;

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use fieldop_validate::{parse_patch, PatchElement};

/// Read a JSON patch from a file, or from stdin when `path` is `None` or `-`.
pub fn read_patch(path: Option<&Path>) -> Result<Vec<PatchElement>> {
    match path {
        Some(path) if path != Path::new("-") => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            parse_patch(&content).with_context(|| format!("parsing {}", path.display()))
        }
        _ => {
            let mut content = String::new();
            std::io::stdin()
                .read_to_string(&mut content)
                .context("reading patch from stdin")?;
            parse_patch(&content).context("parsing patch from stdin")
        }
    }
}
