//! Change-set derivation from the post-matching state
//!
//! Partitions the matched/unmatched state into the three disjoint
//! operation sets the executor walks: updates (matched records whose
//! fields differ), creations (local records no remote record accounts
//! for) and deletions (remote records no local declaration accounts for,
//! minus the preserved types).

use std::collections::BTreeMap;

use recordmaster_provider::{CreateRecord, UpdateRecord};

use crate::types::{Domain, Record};

/// One field scheduled for update, with both values for operator-visible
/// logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    /// Field name (`content`, `ttl`, `prio`, or an extra attribute key).
    pub field: String,
    /// Remote value before the update.
    pub old: String,
    /// Local value the remote will be set to.
    pub new: String,
}

/// A planned update of one matched record.
#[derive(Debug, Clone)]
pub struct RecordUpdatePlan {
    /// Remote identity of the record being updated.
    pub record_id: u64,
    /// Record type, for logging.
    pub rtype: String,
    /// Record name, for logging.
    pub name: String,
    /// Sparse wire payload with only the differing fields.
    pub payload: UpdateRecord,
    /// The individual field changes, for logging and confirmation.
    pub fields: Vec<FieldChange>,
}

/// The three disjoint operation sets, plus the preserved remainder.
#[derive(Debug, Clone, Default)]
pub struct ChangeSet {
    /// Matched records with at least one differing field.
    pub updates: Vec<RecordUpdatePlan>,
    /// Local records without a remote counterpart.
    pub creates: Vec<Record>,
    /// Unmatched remote records scheduled for deletion.
    pub deletes: Vec<Record>,
    /// Unmatched remote records preserved because of their type.
    pub ignored: Vec<Record>,
}

impl ChangeSet {
    /// Whether the set schedules no mutation at all. Preserved (ignored)
    /// records do not count; they cause no API call.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.updates.is_empty() && self.creates.is_empty() && self.deletes.is_empty()
    }
}

/// "Set" semantics of the configuration format: a field participates in
/// diffing and creation payloads only when its local value is non-empty /
/// non-default. A consequence the format accepts: an empty local value can
/// never clear a previously-set remote field.
fn value_is_set(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => false,
        serde_json::Value::Bool(b) => *b,
        serde_json::Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        serde_json::Value::String(s) => !s.is_empty(),
        serde_json::Value::Array(a) => !a.is_empty(),
        serde_json::Value::Object(o) => !o.is_empty(),
    }
}

/// Derive the update/create/delete partitions for a matched domain.
///
/// `unmatched_remote` is the matcher's output, in snapshot order;
/// `ignore_types` is the effective preservation list (exact, case-sensitive
/// type names).
#[must_use]
pub fn build_change_set(
    domain: &Domain,
    unmatched_remote: &[Record],
    ignore_types: &[String],
) -> ChangeSet {
    let mut change_set = ChangeSet::default();

    // Matched local records: diff field by field against the remote twin.
    for loc_rec in &domain.local_records {
        let Some(id) = loc_rec.id else { continue };
        let Some(rem_rec) = domain.remote_by_id(id) else {
            // Matching only ever hands out IDs taken from the snapshot.
            log::warn!(
                "[{}] Matched local record references unknown remote id {id}: {loc_rec}",
                domain.name
            );
            continue;
        };

        if let Some(plan) = diff_record(loc_rec, rem_rec, id) {
            change_set.updates.push(plan);
        } else {
            log::debug!(
                "[{}] ({id}) No field differs, no update needed: {loc_rec}",
                domain.name
            );
        }
    }

    // Unmatched local records become creations.
    change_set.creates = domain
        .local_records
        .iter()
        .filter(|rec| rec.id.is_none())
        .cloned()
        .collect();

    // Unmatched remote records become deletions, minus the preserved types.
    for rem_rec in unmatched_remote {
        if ignore_types.contains(&rem_rec.rtype) {
            change_set.ignored.push(rem_rec.clone());
        } else {
            change_set.deletes.push(rem_rec.clone());
        }
    }

    change_set
}

/// Compare the enumerated mutable fields of a matched pair.
///
/// Returns `None` when nothing differs (no API call needed).
fn diff_record(loc_rec: &Record, rem_rec: &Record, id: u64) -> Option<RecordUpdatePlan> {
    let mut payload = UpdateRecord::default();
    let mut fields = Vec::new();

    if !loc_rec.content.is_empty() && loc_rec.content != rem_rec.content {
        fields.push(FieldChange {
            field: "content".to_string(),
            old: rem_rec.content.clone(),
            new: loc_rec.content.clone(),
        });
        payload.content = Some(loc_rec.content.clone());
    }

    if loc_rec.ttl != 0 && loc_rec.ttl != rem_rec.ttl {
        fields.push(FieldChange {
            field: "ttl".to_string(),
            old: rem_rec.ttl.to_string(),
            new: loc_rec.ttl.to_string(),
        });
        payload.ttl = Some(loc_rec.ttl);
    }

    if loc_rec.prio != 0 && loc_rec.prio != rem_rec.prio {
        fields.push(FieldChange {
            field: "prio".to_string(),
            old: rem_rec.prio.to_string(),
            new: loc_rec.prio.to_string(),
        });
        payload.prio = Some(loc_rec.prio);
    }

    for (key, value) in &loc_rec.extras {
        if value_is_set(value) && rem_rec.extras.get(key) != Some(value) {
            fields.push(FieldChange {
                field: key.clone(),
                old: rem_rec
                    .extras
                    .get(key)
                    .map_or_else(|| "<unset>".to_string(), ToString::to_string),
                new: value.to_string(),
            });
            payload.extras.insert(key.clone(), value.clone());
        }
    }

    if fields.is_empty() {
        return None;
    }

    Some(RecordUpdatePlan {
        record_id: id,
        rtype: loc_rec.rtype.clone(),
        name: loc_rec.name.clone(),
        payload,
        fields,
    })
}

/// Build the creation payload for an unmatched local record.
///
/// Only set attributes are included; absent or default-valued fields are
/// omitted rather than sent as explicit defaults.
#[must_use]
pub fn creation_payload(rec: &Record) -> CreateRecord {
    let extras: BTreeMap<String, serde_json::Value> = rec
        .extras
        .iter()
        .filter(|(_, value)| value_is_set(value))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    CreateRecord {
        name: (!rec.name.is_empty()).then(|| rec.name.clone()),
        rtype: rec.rtype.clone(),
        content: rec.content.clone(),
        ttl: (rec.ttl != 0).then_some(rec.ttl),
        prio: (rec.prio != 0).then_some(rec.prio),
        extras,
    }
}
