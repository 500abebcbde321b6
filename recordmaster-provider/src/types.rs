use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Default TTL assumed when the remote service reports none.
pub const DEFAULT_TTL: u32 = 3600;

fn default_ttl() -> u32 {
    DEFAULT_TTL
}

// ============ Zone Snapshot Types ============

/// A zone snapshot as reported by the remote nameserver service.
///
/// Read once at the start of a domain run; never re-read mid-run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneInfo {
    /// Remote zone identity.
    pub id: u64,
    /// All records currently held by the remote service, in the order the
    /// service reported them.
    #[serde(default)]
    pub records: Vec<ZoneRecord>,
}

/// One resource record as held remotely.
///
/// Provider-specific attributes the core does not interpret (redirect
/// metadata and the like) round-trip opaquely through `extras`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneRecord {
    /// Stable remote record identity.
    pub id: u64,
    /// Fully-qualified record name (e.g. `sub.example.com`).
    pub name: String,
    /// Record type (e.g. `A`, `MX`, `TXT`).
    #[serde(rename = "type")]
    pub rtype: String,
    /// Record value.
    #[serde(default)]
    pub content: String,
    /// Time to live in seconds.
    #[serde(default = "default_ttl")]
    pub ttl: u32,
    /// Record priority.
    #[serde(default)]
    pub prio: u32,
    /// Opaque provider-specific attributes.
    #[serde(flatten)]
    pub extras: BTreeMap<String, serde_json::Value>,
}

// ============ Mutation Payloads ============

/// Payload for creating a record in a zone.
///
/// Optional fields are omitted from the wire rather than sent as explicit
/// defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateRecord {
    /// Fully-qualified record name. Omitted for zone-apex records where the
    /// API derives the name from the domain.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Record type.
    #[serde(rename = "type")]
    pub rtype: String,
    /// Record value.
    pub content: String,
    /// Time to live in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    /// Record priority.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prio: Option<u32>,
    /// Opaque provider-specific attributes.
    #[serde(flatten)]
    pub extras: BTreeMap<String, serde_json::Value>,
}

/// Sparse payload for updating an existing record.
///
/// Only fields that actually changed are present; everything else is left
/// untouched at the remote.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateRecord {
    /// New record value, if changed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// New TTL, if changed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    /// New priority, if changed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prio: Option<u32>,
    /// Changed provider-specific attributes.
    #[serde(flatten)]
    pub extras: BTreeMap<String, serde_json::Value>,
}

impl UpdateRecord {
    /// Whether this update carries no changes at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_none() && self.ttl.is_none() && self.prio.is_none() && self.extras.is_empty()
    }
}
