use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use recordmaster_provider::ZoneInfo;

use super::{DomainStats, Record};

/// Per-domain policy overrides from the `options` key of the domain
/// configuration. Unrecognized keys are kept for forward compatibility but
/// not interpreted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DomainOptions {
    /// Record types never deleted when unmatched remotely, overriding the
    /// run-wide list for this domain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore_types: Option<Vec<String>>,
    /// Unrecognized option keys.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// One DNS zone under management, fully populated, matched, diffed and
/// synced within a single run, then discarded.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Domain {
    /// Remote zone identity, filled from the remote snapshot.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Zone name.
    pub name: String,
    /// Snapshot of the remote record set taken at domain entry. Not a live
    /// view; concurrent external mutations stay invisible for the run.
    pub remote_records: Vec<Record>,
    /// Locally declared records, in declaration order.
    pub local_records: Vec<Record>,
    /// Per-domain counters.
    #[serde(skip)]
    pub stats: DomainStats,
    /// Per-domain policy overrides.
    #[serde(skip)]
    pub options: DomainOptions,
}

impl Domain {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Populate zone identity and the remote record snapshot, and fix
    /// `total_remote` for the run.
    pub fn set_remote(&mut self, zone: ZoneInfo) {
        self.id = Some(zone.id);
        self.remote_records = zone.records.into_iter().map(Record::from_remote).collect();
        self.stats.total_remote = self.remote_records.len() as u32;
    }

    /// Look up a remote record by its identity.
    #[must_use]
    pub fn remote_by_id(&self, id: u64) -> Option<&Record> {
        self.remote_records.iter().find(|rec| rec.id == Some(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_remote_fills_identity_and_total() {
        let mut domain = Domain::new("example.com");
        let zone: ZoneInfo = serde_json::from_str(
            r#"{"id": 2905, "records": [
                {"id": 1, "name": "example.com", "type": "A", "content": "1.2.3.4"},
                {"id": 2, "name": "example.com", "type": "NS", "content": "ns1.example.com"}
            ]}"#,
        )
        .unwrap();

        domain.set_remote(zone);
        assert_eq!(domain.id, Some(2905));
        assert_eq!(domain.stats.total_remote, 2);
        assert_eq!(domain.remote_by_id(2).unwrap().rtype, "NS");
        assert!(domain.remote_by_id(3).is_none());
    }

    #[test]
    fn domain_options_capture_unknown_keys() {
        let options: DomainOptions = serde_yaml::from_str(
            "ignore_types: [SOA, NS]\ncustom_flag: true\n",
        )
        .unwrap();
        assert_eq!(
            options.ignore_types.as_deref(),
            Some(&["SOA".to_string(), "NS".to_string()][..])
        );
        assert!(options.extra.contains_key("custom_flag"));
    }
}
