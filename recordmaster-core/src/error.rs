//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export the provider-layer error type
pub use recordmaster_provider::ProviderError;

/// Core layer error type
///
/// Configuration errors and remote-call errors are both fatal to the whole
/// run: the caller must stop rather than continue reconciling other domains
/// from an inconsistent partial state.
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Local configuration declares record IDs; IDs only ever enter local
    /// records as the output of matching.
    #[error("[{domain}] Local records must not carry an 'id' (IDs are assigned by matching): {records}")]
    LocalIdsForbidden {
        /// Zone name.
        domain: String,
        /// Rendering of the offending records.
        records: String,
    },

    /// Two local records share the same `(type, name, content)` signature.
    #[error("[{domain}] Locally defined records share the same type, name and content as an earlier one: {records}")]
    DuplicateLocalRecord {
        /// Zone name.
        domain: String,
        /// Rendering of the offending records.
        records: String,
    },

    /// The domain configuration could not be parsed (bad YAML, non-integer
    /// `ttl`/`prio`, missing required fields).
    #[error("[{domain}] Invalid domain configuration: {detail}")]
    ConfigParse {
        /// Zone name.
        domain: String,
        /// What went wrong.
        detail: String,
    },

    /// Failed to write the pre-mutation snapshot file.
    #[error("[{domain}] Failed to write snapshot: {detail}")]
    SnapshotWrite {
        /// Zone name.
        domain: String,
        /// What went wrong.
        detail: String,
    },

    /// Serialization error (export rendering, snapshots).
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Provider error (converted from the API layer).
    #[error("{0}")]
    Provider(#[from] ProviderError),
}

impl CoreError {
    /// Whether this is expected behavior (operator input to fix), used for
    /// log levelling. `warn` when `true`, `error` when `false`.
    ///
    /// **Update this method when adding variants.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::LocalIdsForbidden { .. }
            | Self::DuplicateLocalRecord { .. }
            | Self::ConfigParse { .. } => true,
            Self::Provider(e) => e.is_expected(),
            _ => false,
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
