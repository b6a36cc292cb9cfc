//! Patch element normalization and RDMA field operation validation.
//!
//! For one JSON Patch element the validator:
//! 1. resolves the running platform (rejecting `unknown`),
//! 2. extracts the firmware branch version,
//! 3. normalizes the path into instance-independent field identifiers,
//! 4. checks every identifier against the table's scenarios.
//!
//! The element is admitted only if every identifier passes.

pub mod batch;
pub mod decision;
pub mod error;
pub mod field;
pub mod matcher;
pub mod patch;
pub mod validator;

// Re-exports for convenience.
pub use batch::{validate_patch, ElementVerdict, Verdict};
pub use decision::{Decision, Rejection};
pub use error::{Result, ValidateError};
pub use field::{normalize, NormalizedPatch};
pub use matcher::{check_field, is_allowed};
pub use patch::{parse_patch, pointer_parts, PatchElement, PatchOp};
pub use validator::RdmaConfigUpdateValidator;
