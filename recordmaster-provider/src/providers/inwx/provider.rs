//! INWX `NameserverApi` trait implementation

use async_trait::async_trait;
use serde_json::json;

use crate::error::{ProviderError, Result};
use crate::traits::{ApiErrorMapper, ErrorContext, NameserverApi};
use crate::types::{CreateRecord, UpdateRecord, ZoneInfo};

use super::{InwxApi, ZoneInfoData};

impl InwxApi {
    /// Log in and establish the session cookie.
    ///
    /// Must be called once before any zone operation.
    pub async fn login(&self, username: &str, password: &str) -> Result<()> {
        log::info!("[{}] Logging in as {username}", self.provider_name());
        self.call::<_, serde_json::Value>(
            "account.login",
            json!({ "user": username, "pass": password }),
            ErrorContext::default(),
        )
        .await?;
        Ok(())
    }

    /// Serialize a payload into a JSON object and add the given key.
    fn params_with<T: serde::Serialize>(
        &self,
        payload: &T,
        key: &str,
        value: serde_json::Value,
    ) -> Result<serde_json::Value> {
        let mut params =
            serde_json::to_value(payload).map_err(|e| ProviderError::SerializationError {
                provider: self.provider_name().to_string(),
                detail: e.to_string(),
            })?;
        match params.as_object_mut() {
            Some(map) => {
                map.insert(key.to_string(), value);
                Ok(params)
            }
            None => Err(ProviderError::SerializationError {
                provider: self.provider_name().to_string(),
                detail: "payload did not serialize to a JSON object".to_string(),
            }),
        }
    }
}

#[async_trait]
impl NameserverApi for InwxApi {
    fn id(&self) -> &'static str {
        "inwx"
    }

    async fn zone_info(&self, domain: &str) -> Result<ZoneInfo> {
        let data: Option<ZoneInfoData> = self
            .call(
                "nameserver.info",
                json!({ "domain": domain }),
                ErrorContext {
                    domain: Some(domain.to_string()),
                    ..ErrorContext::default()
                },
            )
            .await?;

        let data = data.ok_or_else(|| self.parse_error("nameserver.info returned no resData"))?;
        Ok(ZoneInfo {
            id: data.ro_id,
            records: data.records,
        })
    }

    async fn create_record(&self, domain: &str, req: &CreateRecord) -> Result<()> {
        let params = self.params_with(req, "domain", json!(domain))?;
        self.call::<_, serde_json::Value>(
            "nameserver.createRecord",
            params,
            ErrorContext {
                domain: Some(domain.to_string()),
                ..ErrorContext::default()
            },
        )
        .await?;
        Ok(())
    }

    async fn update_record(&self, record_id: u64, req: &UpdateRecord) -> Result<()> {
        let params = self.params_with(req, "id", json!(record_id))?;
        self.call::<_, serde_json::Value>(
            "nameserver.updateRecord",
            params,
            ErrorContext {
                record_id: Some(record_id.to_string()),
                ..ErrorContext::default()
            },
        )
        .await?;
        Ok(())
    }

    async fn delete_record(&self, record_id: u64) -> Result<()> {
        self.call::<_, serde_json::Value>(
            "nameserver.deleteRecord",
            json!({ "id": record_id }),
            ErrorContext {
                record_id: Some(record_id.to_string()),
                ..ErrorContext::default()
            },
        )
        .await?;
        Ok(())
    }
}
