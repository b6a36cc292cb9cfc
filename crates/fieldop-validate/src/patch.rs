//! JSON Patch elements and JSON pointer handling.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, ValidateError};

/// JSON Patch operation kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchOp {
    Add,
    Remove,
    Replace,
    Move,
    Copy,
    Test,
}

impl PatchOp {
    /// The operation name as it appears in patches and rules.
    pub fn as_str(&self) -> &'static str {
        match self {
            PatchOp::Add => "add",
            PatchOp::Remove => "remove",
            PatchOp::Replace => "replace",
            PatchOp::Move => "move",
            PatchOp::Copy => "copy",
            PatchOp::Test => "test",
        }
    }
}

impl fmt::Display for PatchOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One proposed mutation of the configuration tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatchElement {
    pub op: PatchOp,
    /// JSON pointer to the target, e.g. `/PFC_WD/Ethernet8/action`.
    pub path: String,
    /// New value for add/replace/test. `null` and absent are equivalent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// Source pointer for move/copy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
}

impl PatchElement {
    pub fn new(op: PatchOp, path: impl Into<String>) -> Self {
        PatchElement {
            op,
            path: path.into(),
            value: None,
            from: None,
        }
    }

    pub fn with_value(mut self, value: Value) -> Self {
        self.value = Some(value);
        self
    }

    /// Unescaped segments of the element's path.
    pub fn path_segments(&self) -> Result<Vec<String>> {
        pointer_parts(&self.path)
    }
}

/// Parse a JSON Patch document: an array of elements, or a single element.
pub fn parse_patch(json: &str) -> Result<Vec<PatchElement>> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum PatchInput {
        Many(Vec<PatchElement>),
        One(PatchElement),
    }

    Ok(match serde_json::from_str(json)? {
        PatchInput::Many(elements) => elements,
        PatchInput::One(element) => vec![element],
    })
}

/// Split a JSON pointer into unescaped reference tokens.
///
/// `""` is the whole document and has no tokens; every other pointer must
/// start with `/`. Within a token `~1` stands for `/` and `~0` for `~`.
pub fn pointer_parts(pointer: &str) -> Result<Vec<String>> {
    if pointer.is_empty() {
        return Ok(Vec::new());
    }
    let Some(rest) = pointer.strip_prefix('/') else {
        return Err(invalid(pointer, "JSON pointer must start with '/'"));
    };
    rest.split('/')
        .map(|token| {
            unescape(token).ok_or_else(|| invalid(pointer, "'~' must be followed by '0' or '1'"))
        })
        .collect()
}

fn unescape(token: &str) -> Option<String> {
    let mut out = String::with_capacity(token.len());
    let mut chars = token.chars();
    while let Some(c) = chars.next() {
        if c == '~' {
            match chars.next() {
                Some('0') => out.push('~'),
                Some('1') => out.push('/'),
                _ => return None,
            }
        } else {
            out.push(c);
        }
    }
    Some(out)
}

fn invalid(path: &str, detail: &str) -> ValidateError {
    ValidateError::InvalidPath {
        path: path.to_string(),
        detail: detail.to_string(),
    }
}
