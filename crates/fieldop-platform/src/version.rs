//! Firmware branch versions.
//!
//! Build versions look like `SONiC.20201231.39` or `master.20230617.1`; the
//! branch is the 8-digit dated segment. Dates are fixed width, so string
//! order is chronological order.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An 8-digit dated branch token, e.g. `20201231`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BranchVersion(String);

impl BranchVersion {
    /// Parse a segment that is exactly eight ASCII digits.
    pub fn parse(segment: &str) -> Option<Self> {
        let dated = segment.len() == 8 && segment.bytes().all(|b| b.is_ascii_digit());
        dated.then(|| BranchVersion(segment.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this branch is at least `minimum`.
    pub fn satisfies(&self, minimum: &str) -> bool {
        minimum <= self.as_str()
    }
}

impl fmt::Display for BranchVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Extract the branch version from a build-version string.
///
/// Every dated segment overwrites the previous one, so when several segments
/// qualify the last one wins.
pub fn extract_branch_version(build_version: &str) -> Option<BranchVersion> {
    build_version
        .split('.')
        .filter_map(BranchVersion::parse)
        .last()
}
