//! Read-only zone source backed by a pre-captured JSON file
//!
//! Lets a run work offline against a previously captured `nameserver.info`
//! payload. Mutations are refused; callers are expected to force dry-run
//! when this source is selected.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::{ProviderError, Result};
use crate::traits::NameserverApi;
use crate::types::{CreateRecord, UpdateRecord, ZoneInfo, ZoneRecord};

const PROVIDER_NAME: &str = "file";

/// Accepted file shapes: the raw Domrobot `resData` payload, or the plain
/// [`ZoneInfo`] shape written by the engine's pre-mutation snapshots.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SnapshotFile {
    Domrobot {
        #[serde(rename = "roId")]
        ro_id: u64,
        #[serde(default)]
        domain: Option<String>,
        #[serde(default, rename = "record")]
        records: Vec<ZoneRecord>,
        #[serde(flatten)]
        _rest: BTreeMap<String, serde_json::Value>,
    },
    Plain(ZoneInfo),
}

/// File-backed [`NameserverApi`] implementation.
pub struct FileZoneSource {
    path: PathBuf,
}

impl FileZoneSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_only(&self) -> ProviderError {
        ProviderError::ReadOnly {
            provider: PROVIDER_NAME.to_string(),
        }
    }
}

#[async_trait]
impl NameserverApi for FileZoneSource {
    fn id(&self) -> &'static str {
        PROVIDER_NAME
    }

    async fn zone_info(&self, domain: &str) -> Result<ZoneInfo> {
        log::debug!(
            "[{PROVIDER_NAME}] Reading zone snapshot for '{domain}' from {}",
            self.path.display()
        );

        let raw = std::fs::read_to_string(&self.path).map_err(|e| ProviderError::NetworkError {
            provider: PROVIDER_NAME.to_string(),
            detail: format!("Failed to read {}: {e}", self.path.display()),
        })?;

        let parsed: SnapshotFile =
            serde_json::from_str(&raw).map_err(|e| ProviderError::ParseError {
                provider: PROVIDER_NAME.to_string(),
                detail: format!("{}: {e}", self.path.display()),
            })?;

        Ok(match parsed {
            SnapshotFile::Domrobot {
                ro_id,
                domain: captured,
                records,
                ..
            } => {
                if let Some(captured) = captured {
                    if captured != domain {
                        log::warn!(
                            "[{PROVIDER_NAME}] Snapshot {} was captured for '{captured}', \
                             but '{domain}' was requested",
                            self.path.display()
                        );
                    }
                }
                ZoneInfo {
                    id: ro_id,
                    records,
                }
            }
            SnapshotFile::Plain(info) => info,
        })
    }

    async fn create_record(&self, _domain: &str, _req: &CreateRecord) -> Result<()> {
        Err(self.read_only())
    }

    async fn update_record(&self, _record_id: u64, _req: &UpdateRecord) -> Result<()> {
        Err(self.read_only())
    }

    async fn delete_record(&self, _record_id: u64) -> Result<()> {
        Err(self.read_only())
    }
}
