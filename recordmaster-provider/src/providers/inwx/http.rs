//! Domrobot HTTP call plumbing

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{ProviderError, Result};
use crate::http_client::HttpUtils;
use crate::traits::{ApiErrorMapper, ErrorContext, RawApiError};

use super::types::RpcRequest;
use super::{InwxApi, RpcResponse, RPC_OK};

impl InwxApi {
    /// Execute one JSON-RPC call and unwrap the `resData` payload.
    ///
    /// Returns `Ok(None)` when the API reports success without a payload
    /// (mutations); error codes are mapped through [`ApiErrorMapper`].
    pub(crate) async fn call<P, T>(
        &self,
        method: &str,
        params: P,
        context: ErrorContext,
    ) -> Result<Option<T>>
    where
        P: Serialize + Send + Sync,
        T: DeserializeOwned,
    {
        let request = RpcRequest { method, params };
        let body = serde_json::to_value(&request).map_err(|e| {
            ProviderError::SerializationError {
                provider: self.provider_name().to_string(),
                detail: e.to_string(),
            }
        })?;

        let builder = self.client.post(self.endpoint).json(&body);
        let (_status, text) =
            HttpUtils::execute_request(builder, self.provider_name(), method).await?;

        let response: RpcResponse<T> = HttpUtils::parse_json(&text, self.provider_name())?;

        if response.code != RPC_OK {
            let message = response
                .msg
                .unwrap_or_else(|| "Unknown error".to_string());
            log::error!(
                "[{}] {} failed: code={} msg={}",
                self.provider_name(),
                method,
                response.code,
                message
            );
            return Err(self.map_error(
                RawApiError::with_code(response.code.to_string(), message),
                context,
            ));
        }

        Ok(response.res_data)
    }
}
