use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::types::{CreateRecord, UpdateRecord, ZoneInfo};

/// Raw API error (internal use).
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// Error code (format differs per API).
    pub code: Option<String>,
    /// Raw error message.
    pub message: String,
}

impl RawApiError {
    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }
}

/// Extra context available when mapping a raw API error (internal use).
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    /// Record ID, for `RecordNotFound` and friends.
    pub record_id: Option<String>,
    /// Domain name, for `DomainNotFound` and friends.
    pub domain: Option<String>,
}

/// API error mapping trait (internal use).
///
/// Each implementation maps its raw API errors to the unified
/// [`ProviderError`] type.
pub(crate) trait ApiErrorMapper {
    /// Identifier used in error messages and logs.
    fn provider_name(&self) -> &'static str;

    /// Map a raw API error to the unified error type.
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError;

    /// Shortcut: parse error.
    fn parse_error(&self, detail: impl ToString) -> ProviderError {
        ProviderError::ParseError {
            provider: self.provider_name().to_string(),
            detail: detail.to_string(),
        }
    }

    /// Shortcut: unknown error (fallback).
    fn unknown_error(&self, raw: RawApiError) -> ProviderError {
        ProviderError::Unknown {
            provider: self.provider_name().to_string(),
            raw_code: raw.code,
            raw_message: raw.message,
        }
    }
}

/// Remote nameserver interface.
///
/// One snapshot read plus three mutation operations; exactly the surface
/// the reconciliation engine consumes. Implementations: the INWX JSON-RPC
/// client and a read-only file-backed source for offline runs.
#[async_trait]
pub trait NameserverApi: Send + Sync {
    /// Implementation identifier.
    fn id(&self) -> &'static str;

    /// Read the zone identity and full record list for a domain.
    async fn zone_info(&self, domain: &str) -> Result<ZoneInfo>;

    /// Create a record in the given zone.
    async fn create_record(&self, domain: &str, req: &CreateRecord) -> Result<()>;

    /// Update fields of an existing record, keyed by its remote identity.
    async fn update_record(&self, record_id: u64, req: &UpdateRecord) -> Result<()>;

    /// Delete a record, keyed by its remote identity.
    async fn delete_record(&self, record_id: u64) -> Result<()>;
}
