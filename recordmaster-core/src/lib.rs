//! Recordmaster Core Library
//!
//! Provides the reconciliation logic for declarative DNS record
//! management, including:
//! - Parsing local zone configurations (Config)
//! - Matching remote records against local declarations (Matcher)
//! - Deriving the update/create/delete change set (Diff)
//! - Applying changes through a nameserver backend (Sync)
//! - Exporting live zones back into configuration form (Export)
//!
//! This library is transport-independent: remote zone access goes through
//! the [`recordmaster_provider::NameserverApi`] trait, so any backend that
//! implements it can be synced against.

pub mod config;
pub mod diff;
pub mod error;
pub mod export;
pub mod matcher;
pub mod snapshot;
pub mod sync;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult};
pub use matcher::MatcherConfig;
pub use sync::{ConfirmPrompt, SyncEngine, SyncOptions};
pub use types::{Domain, DomainOptions, DomainStats, Record};
