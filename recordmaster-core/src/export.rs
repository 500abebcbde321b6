//! Configuration-shaped rendering of a remote record set
//!
//! The inverse of [`crate::config`]: groups records by position and omits
//! default-valued fields, producing YAML an operator can drop into the
//! configuration directory to bootstrap a zone that so far only exists
//! remotely.

use serde_yaml::{Mapping, Value};

use crate::error::{CoreError, CoreResult};
use crate::types::{Record, DEFAULT_TTL, ROOT_POSITION};

/// Render records as domain-configuration YAML.
///
/// Apex records come first under `"."`, remaining positions in first-seen
/// order. Remote identities and names are dropped (the position carries
/// the name); `ttl` is omitted at 3600 and `prio` at 0.
pub fn render_zone_config(zone: &str, records: &[Record]) -> CoreResult<String> {
    let mut positions: Vec<(String, Vec<&Record>)> = Vec::new();

    for rec in records {
        let position = rec.position(zone);
        match positions.iter_mut().find(|(pos, _)| *pos == position) {
            Some((_, recs)) => recs.push(rec),
            None => positions.push((position, vec![rec])),
        }
    }
    // Stable: apex first, everything else keeps first-seen order.
    positions.sort_by_key(|(pos, _)| pos != ROOT_POSITION);

    let mut mapping = Mapping::new();
    for (position, recs) in positions {
        let entries: CoreResult<Vec<Value>> = recs.iter().map(|rec| render_record(rec)).collect();
        mapping.insert(Value::String(position), Value::Sequence(entries?));
    }

    serde_yaml::to_string(&Value::Mapping(mapping))
        .map_err(|e| CoreError::SerializationError(e.to_string()))
}

fn render_record(rec: &Record) -> CoreResult<Value> {
    let mut entry = Mapping::new();
    entry.insert(
        Value::String("type".to_string()),
        Value::String(rec.rtype.clone()),
    );
    entry.insert(
        Value::String("content".to_string()),
        Value::String(rec.content.clone()),
    );
    if rec.ttl != DEFAULT_TTL {
        entry.insert(Value::String("ttl".to_string()), Value::Number(rec.ttl.into()));
    }
    if rec.prio != 0 {
        entry.insert(Value::String("prio".to_string()), Value::Number(rec.prio.into()));
    }
    for (key, value) in &rec.extras {
        let yaml_value =
            serde_yaml::to_value(value).map_err(|e| CoreError::SerializationError(e.to_string()))?;
        entry.insert(Value::String(key.clone()), yaml_value);
    }
    Ok(Value::Mapping(entry))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_domain_config;
    use serde_json::json;

    fn remote(id: u64, name: &str, rtype: &str, content: &str, ttl: u32, prio: u32) -> Record {
        Record {
            id: Some(id),
            name: name.to_string(),
            rtype: rtype.to_string(),
            content: content.to_string(),
            ttl,
            prio,
            ..Record::default()
        }
    }

    #[test]
    fn groups_by_position_with_apex_first() {
        let records = vec![
            remote(1, "www.example.com", "CNAME", "example.com", 3600, 0),
            remote(2, "example.com", "A", "1.2.3.4", 3600, 0),
            remote(3, "example.com", "MX", "mail.example.com", 300, 10),
        ];

        let yaml = render_zone_config("example.com", &records).unwrap();
        let apex = yaml.find(".:").unwrap();
        let www = yaml.find("www:").unwrap();
        assert!(apex < www, "apex must be rendered first:\n{yaml}");
    }

    #[test]
    fn omits_default_ttl_and_prio_and_identities() {
        let records = vec![remote(42, "example.com", "A", "1.2.3.4", 3600, 0)];
        let yaml = render_zone_config("example.com", &records).unwrap();

        assert!(!yaml.contains("ttl"));
        assert!(!yaml.contains("prio"));
        assert!(!yaml.contains("id"));
        assert!(!yaml.contains("name"));
    }

    #[test]
    fn keeps_non_default_fields_and_extras() {
        let mut rec = remote(1, "example.com", "URL", "https://example.org", 300, 0);
        rec.extras.insert("urlRedirectType".to_string(), json!("HEADER301"));

        let yaml = render_zone_config("example.com", &[rec]).unwrap();
        assert!(yaml.contains("ttl: 300"));
        assert!(yaml.contains("urlRedirectType: HEADER301"));
    }

    #[test]
    fn exported_config_parses_back_to_equivalent_records() {
        let records = vec![
            remote(1, "example.com", "A", "1.2.3.4", 3600, 0),
            remote(2, "mail.example.com", "A", "5.6.7.8", 300, 0),
            remote(3, "example.com", "MX", "mail.example.com", 3600, 10),
        ];

        let yaml = render_zone_config("example.com", &records).unwrap();
        let (parsed, _) = parse_domain_config("example.com", &yaml).unwrap();

        assert_eq!(parsed.len(), records.len());
        for original in &records {
            let twin = parsed
                .iter()
                .find(|rec| rec.signature() == original.signature())
                .unwrap_or_else(|| panic!("missing {original}"));
            assert_eq!(twin.ttl, original.ttl);
            assert_eq!(twin.prio, original.prio);
            assert!(twin.id.is_none(), "exported records must not carry ids");
        }
    }
}
