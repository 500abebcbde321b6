//! Domrobot result-code mapping

use crate::error::ProviderError;
use crate::traits::{ApiErrorMapper, ErrorContext, RawApiError};

use super::InwxApi;

/// Domrobot result codes follow the EPP convention.
/// Reference: <https://www.inwx.com/en/help/apidoc>
impl ApiErrorMapper for InwxApi {
    fn provider_name(&self) -> &'static str {
        "inwx"
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        match raw.code.as_deref() {
            // Authentication / authorization
            // 2200: Authentication error
            // 2201: Authorization error
            // 2202: Invalid authorization information
            Some("2200" | "2201" | "2202") => ProviderError::InvalidCredentials {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            },

            // 2303: Object does not exist. Whether that object is the zone
            // or a record depends on the call that failed.
            Some("2303") => {
                if let Some(domain) = context.domain {
                    ProviderError::DomainNotFound {
                        provider: self.provider_name().to_string(),
                        domain,
                        raw_message: Some(raw.message),
                    }
                } else {
                    ProviderError::RecordNotFound {
                        provider: self.provider_name().to_string(),
                        record_id: context.record_id.unwrap_or_else(|| "<unknown>".to_string()),
                        raw_message: Some(raw.message),
                    }
                }
            }

            // Parameter faults
            // 2001: Command syntax error
            // 2003: Required parameter missing
            // 2004: Parameter value range error
            // 2005: Parameter value syntax error
            Some("2001" | "2003" | "2004" | "2005") => ProviderError::InvalidParameter {
                provider: self.provider_name().to_string(),
                param: "general".to_string(),
                detail: raw.message,
            },

            _ => self.unknown_error(raw),
        }
    }
}
