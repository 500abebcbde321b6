//! Test helpers
//!
//! Mock implementations of the external interfaces, recording every call
//! so tests can assert exactly which mutations were issued.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::RwLock;

use recordmaster_provider::{
    CreateRecord, NameserverApi, ProviderError, Result as ProviderResult, UpdateRecord, ZoneInfo,
};

use crate::sync::ConfirmPrompt;

/// One recorded mutation call.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    Create { domain: String, payload: CreateRecord },
    Update { id: u64, payload: UpdateRecord },
    Delete { id: u64 },
}

/// Recording mock of the remote nameserver interface.
pub struct MockNameserverApi {
    zone: RwLock<Option<ZoneInfo>>,
    calls: RwLock<Vec<ApiCall>>,
    /// If Some, every mutation fails with this message (remote-error paths).
    mutation_error: RwLock<Option<String>>,
}

impl MockNameserverApi {
    pub fn new() -> Self {
        Self {
            zone: RwLock::new(None),
            calls: RwLock::new(Vec::new()),
            mutation_error: RwLock::new(None),
        }
    }

    pub async fn set_zone(&self, zone: ZoneInfo) {
        *self.zone.write().await = Some(zone);
    }

    pub async fn set_mutation_error(&self, message: Option<String>) {
        *self.mutation_error.write().await = message;
    }

    pub async fn calls(&self) -> Vec<ApiCall> {
        self.calls.read().await.clone()
    }

    async fn record(&self, call: ApiCall) -> ProviderResult<()> {
        if let Some(ref message) = *self.mutation_error.read().await {
            return Err(ProviderError::Unknown {
                provider: "mock".to_string(),
                raw_code: None,
                raw_message: message.clone(),
            });
        }
        self.calls.write().await.push(call);
        Ok(())
    }
}

#[async_trait]
impl NameserverApi for MockNameserverApi {
    fn id(&self) -> &'static str {
        "mock"
    }

    async fn zone_info(&self, domain: &str) -> ProviderResult<ZoneInfo> {
        self.zone
            .read()
            .await
            .clone()
            .ok_or_else(|| ProviderError::DomainNotFound {
                provider: "mock".to_string(),
                domain: domain.to_string(),
                raw_message: None,
            })
    }

    async fn create_record(&self, domain: &str, req: &CreateRecord) -> ProviderResult<()> {
        self.record(ApiCall::Create {
            domain: domain.to_string(),
            payload: req.clone(),
        })
        .await
    }

    async fn update_record(&self, record_id: u64, req: &UpdateRecord) -> ProviderResult<()> {
        self.record(ApiCall::Update {
            id: record_id,
            payload: req.clone(),
        })
        .await
    }

    async fn delete_record(&self, record_id: u64) -> ProviderResult<()> {
        self.record(ApiCall::Delete { id: record_id }).await
    }
}

/// Prompt answering from a fixed script, front to back; runs out → decline.
pub struct ScriptedPrompt {
    answers: Mutex<VecDeque<bool>>,
    seen: Mutex<Vec<String>>,
}

impl ScriptedPrompt {
    pub fn new(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().collect()),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts_seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

impl ConfirmPrompt for ScriptedPrompt {
    fn confirm(&self, prompt: &str) -> bool {
        self.seen.lock().unwrap().push(prompt.to_string());
        self.answers.lock().unwrap().pop_front().unwrap_or(false)
    }
}
