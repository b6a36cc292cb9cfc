//! Rules document model and loading for fieldop validators.
//!
//! The rules document is owned by configuration management and shipped next to
//! the validator. It carries two sections:
//! - **helper_data:** vendor tables used to identify the running ASIC
//! - **tables:** per configuration table, the scenarios that say which fields
//!   may change, with which operations, on which platforms and firmware branches
//!
//! Documents are loaded through a [`RulesSource`]. [`FileRules`] re-reads the
//! file on every call; [`CachedFileRules`] keeps the parsed document until the
//! file changes or the cache is invalidated.

pub mod cache;
pub mod check;
pub mod document;
pub mod error;
pub mod source;

// Re-exports for convenience.
pub use cache::CachedFileRules;
pub use check::{check_rules, RulesIssue};
pub use document::{
    AsicMapping, HelperData, MellanoxAsics, RulesDocument, Scenario, TableRules, RDMA_VALIDATOR,
};
pub use error::{Result, RulesError};
pub use source::{default_rules_path, FileRules, RulesSource, StaticRules, RULES_FILE_NAME};
