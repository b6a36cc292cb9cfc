//! Path normalization: from a patch element to field identifiers.
//!
//! Segment 0 of the path names the configuration table. Of the remaining
//! segments, any containing an ASCII digit is an instance key (`Ethernet112`,
//! `pg_lossless_100000_300m_profile`) and is dropped; the rest are joined with
//! `/` and lower-cased. A record value expands into one identifier per
//! top-level key, so adding `{"action": .., "detection_time": ..}` at
//! `/PFC_WD/Ethernet8` yields `/action` and `/detection_time`. An empty record
//! is treated like a scalar so the identifier list is never empty.

use serde_json::Value;

use crate::error::{Result, ValidateError};
use crate::patch::PatchElement;

/// A patch element reduced to its table and field identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedPatch {
    /// Configuration table name (path segment 0).
    pub table: String,
    /// Field identifiers, never empty.
    pub fields: Vec<String>,
}

/// Normalize a patch element.
pub fn normalize(element: &PatchElement) -> Result<NormalizedPatch> {
    let segments = element.path_segments()?;
    let Some((table, rest)) = segments.split_first() else {
        return Err(ValidateError::InvalidPath {
            path: element.path.clone(),
            detail: "path does not name a table".into(),
        });
    };

    let base = base_field(rest);
    let fields = match &element.value {
        Some(Value::Object(record)) if !record.is_empty() => {
            record.keys().map(|key| format!("{base}/{key}")).collect()
        }
        _ => vec![base],
    };

    Ok(NormalizedPatch {
        table: table.clone(),
        fields,
    })
}

/// Join the non-instance segments into a lower-case field identifier.
///
/// May be empty when every segment is an instance key.
pub fn base_field(segments: &[String]) -> String {
    segments
        .iter()
        .filter(|segment| !segment.bytes().any(|b| b.is_ascii_digit()))
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join("/")
        .to_lowercase()
}
