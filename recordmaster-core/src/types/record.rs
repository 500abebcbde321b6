use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use recordmaster_provider::ZoneRecord;

/// Default TTL in seconds.
pub use recordmaster_provider::DEFAULT_TTL;

/// Position key denoting records at the zone apex.
pub const ROOT_POSITION: &str = ".";

fn default_ttl() -> u32 {
    DEFAULT_TTL
}

/// One DNS resource record, local or remote.
///
/// A locally-declared record starts without an `id`; only a successful
/// match against a remote record may assign one. Remote-origin records
/// always carry their stable remote identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Remote record identity, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
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
    /// Opaque provider-specific attributes, round-tripped without
    /// interpretation.
    #[serde(flatten)]
    pub extras: BTreeMap<String, serde_json::Value>,
}

impl Default for Record {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            rtype: String::new(),
            content: String::new(),
            ttl: DEFAULT_TTL,
            prio: 0,
            extras: BTreeMap::new(),
        }
    }
}

/// Identity of a local record declaration within one zone.
///
/// Duplicate signatures in one zone's configuration are an error.
pub type RecordSignature = (String, String, String);

impl Record {
    /// `(type, name, content)` signature for duplicate detection.
    #[must_use]
    pub fn signature(&self) -> RecordSignature {
        (self.rtype.clone(), self.name.clone(), self.content.clone())
    }

    /// Convert a remote record into the core model.
    #[must_use]
    pub fn from_remote(remote: ZoneRecord) -> Self {
        Self {
            id: Some(remote.id),
            name: remote.name,
            rtype: remote.rtype,
            content: remote.content,
            ttl: remote.ttl,
            prio: remote.prio,
            extras: remote.extras,
        }
    }

    /// The configuration position of this record relative to its zone:
    /// [`ROOT_POSITION`] for apex records, otherwise the subdomain label.
    ///
    /// A record whose name does not belong to the zone keeps its full name
    /// as position; exporting it stays lossless either way.
    #[must_use]
    pub fn position(&self, zone: &str) -> String {
        if self.name == zone {
            ROOT_POSITION.to_string()
        } else if let Some(label) = self.name.strip_suffix(&format!(".{zone}")) {
            label.to_string()
        } else {
            self.name.clone()
        }
    }
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} = '{}' (ttl={}, prio={}",
            self.rtype, self.name, self.content, self.ttl, self.prio
        )?;
        if let Some(id) = self.id {
            write!(f, ", id={id}")?;
        }
        write!(f, ")")
    }
}
