//! Domain configuration parsing and validation
//!
//! The domain-config format is one YAML mapping from *position* to an
//! ordered list of record descriptors. Position `"."` holds zone-apex
//! records; any other key is a subdomain label, prepended to the zone
//! name to form the record's FQDN. The reserved top-level key `options`
//! carries per-domain policy overrides instead of records:
//!
//! ```yaml
//! options:
//!   ignore_types: [SOA, NS]
//! .:
//!   - type: A
//!     content: 1.2.3.4
//! www:
//!   - type: CNAME
//!     content: example.com
//! ```
//!
//! Everything here runs before the remote service is contacted; all
//! violations abort the run. The parser consumes a string — file I/O is
//! the caller's business.

use std::collections::{BTreeMap, HashSet};

use serde::Deserialize;

use crate::error::{CoreError, CoreResult};
use crate::types::{Domain, DomainOptions, Record, RecordSignature, DEFAULT_TTL, ROOT_POSITION};

/// Reserved top-level key for [`DomainOptions`].
const OPTIONS_KEY: &str = "options";

fn default_ttl() -> u32 {
    DEFAULT_TTL
}

/// One record descriptor as written in the configuration file. The name
/// is derived from the position, never declared.
#[derive(Debug, Deserialize)]
struct RecordEntry {
    #[serde(rename = "type")]
    rtype: String,
    #[serde(default)]
    content: String,
    #[serde(default = "default_ttl")]
    ttl: u32,
    #[serde(default)]
    prio: u32,
    #[serde(flatten)]
    extras: BTreeMap<String, serde_json::Value>,
}

/// Parse one domain's configuration into local records and options.
///
/// Record order follows declaration order across all positions; the
/// matcher's tie-breaking depends on it. Duplicate-signature and
/// forbidden-key violations are detected here, before any remote call.
pub fn parse_domain_config(
    domain_name: &str,
    source: &str,
) -> CoreResult<(Vec<Record>, DomainOptions)> {
    let value: serde_yaml::Value =
        serde_yaml::from_str(source).map_err(|e| CoreError::ConfigParse {
            domain: domain_name.to_string(),
            detail: e.to_string(),
        })?;

    let serde_yaml::Value::Mapping(mapping) = value else {
        return Err(CoreError::ConfigParse {
            domain: domain_name.to_string(),
            detail: "top level must be a mapping from position to record list".to_string(),
        });
    };

    let mut local_records = Vec::new();
    let mut options = DomainOptions::default();

    for (key, entry_list) in mapping {
        let Some(position) = key.as_str().map(ToString::to_string) else {
            return Err(CoreError::ConfigParse {
                domain: domain_name.to_string(),
                detail: format!("position keys must be strings, got: {key:?}"),
            });
        };

        if position == OPTIONS_KEY {
            options =
                serde_yaml::from_value(entry_list).map_err(|e| CoreError::ConfigParse {
                    domain: domain_name.to_string(),
                    detail: format!("invalid options: {e}"),
                })?;
            continue;
        }

        let entries: Vec<RecordEntry> =
            serde_yaml::from_value(entry_list).map_err(|e| CoreError::ConfigParse {
                domain: domain_name.to_string(),
                detail: format!("position '{position}': {e}"),
            })?;

        let name = position_to_name(domain_name, &position);
        for entry in entries {
            local_records.push(entry_to_record(domain_name, &name, entry)?);
        }
    }

    check_duplicate_signatures(domain_name, &local_records)?;

    Ok((local_records, options))
}

/// Derive the record FQDN from its position within the zone.
fn position_to_name(domain_name: &str, position: &str) -> String {
    if position == ROOT_POSITION {
        domain_name.to_string()
    } else {
        format!("{position}.{domain_name}")
    }
}

fn entry_to_record(domain_name: &str, name: &str, mut entry: RecordEntry) -> CoreResult<Record> {
    // An id in local configuration breaks the matching model.
    if entry.extras.contains_key("id") {
        return Err(CoreError::LocalIdsForbidden {
            domain: domain_name.to_string(),
            records: format!("{} {} = '{}'", entry.rtype, name, entry.content),
        });
    }
    // The position determines the name; a declared one is dropped.
    if entry.extras.remove("name").is_some() {
        log::warn!(
            "[{domain_name}] Ignoring 'name' key on a {} record at '{name}'; \
             the position determines the record name",
            entry.rtype
        );
    }

    Ok(Record {
        id: None,
        name: name.to_string(),
        rtype: entry.rtype,
        content: entry.content,
        ttl: entry.ttl,
        prio: entry.prio,
        extras: entry.extras,
    })
}

/// Reject configurations where two records share a `(type, name, content)`
/// signature; syncing them would produce unstable matches.
fn check_duplicate_signatures(domain_name: &str, records: &[Record]) -> CoreResult<()> {
    let mut seen: HashSet<RecordSignature> = HashSet::new();
    let mut duplicates = Vec::new();

    for rec in records {
        if !seen.insert(rec.signature()) {
            duplicates.push(rec.to_string());
        }
    }

    if duplicates.is_empty() {
        Ok(())
    } else {
        Err(CoreError::DuplicateLocalRecord {
            domain: domain_name.to_string(),
            records: duplicates.join(", "),
        })
    }
}

/// Re-check the invariants a populated [`Domain`] must satisfy before
/// matching: no local record carries an id, no duplicate signatures.
///
/// [`parse_domain_config`] guarantees both; this covers domains populated
/// through other paths.
pub fn validate_local_records(domain: &Domain) -> CoreResult<()> {
    let with_ids: Vec<String> = domain
        .local_records
        .iter()
        .filter(|rec| rec.id.is_some())
        .map(ToString::to_string)
        .collect();

    if !with_ids.is_empty() {
        return Err(CoreError::LocalIdsForbidden {
            domain: domain.name.clone(),
            records: with_ids.join(", "),
        });
    }

    check_duplicate_signatures(&domain.name, &domain.local_records)
}
