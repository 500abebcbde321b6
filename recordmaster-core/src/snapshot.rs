//! Pre-mutation zone snapshots
//!
//! Before the first mutation of a run touches a zone, its remote state can
//! be dumped to a JSON file. The file is a manual-recovery aid for the
//! operator (it parses as an offline zone source); the engine never reads
//! it back.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{CoreError, CoreResult};
use crate::types::{Domain, Record};

#[derive(Serialize)]
struct ZoneSnapshot<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<u64>,
    name: &'a str,
    records: &'a [Record],
}

/// Write `<zone>-<UTC timestamp>.json` under `dir`, creating the
/// directory if needed. Returns the path of the written file.
pub fn write_snapshot(dir: &Path, domain: &Domain) -> CoreResult<PathBuf> {
    let write_err = |detail: String| CoreError::SnapshotWrite {
        domain: domain.name.clone(),
        detail,
    };

    fs::create_dir_all(dir).map_err(|e| write_err(format!("{}: {e}", dir.display())))?;

    let timestamp = chrono::Utc::now().format("%Y%m%dT%H%M%SZ");
    let path = dir.join(format!("{}-{timestamp}.json", domain.name));

    let snapshot = ZoneSnapshot {
        id: domain.id,
        name: &domain.name,
        records: &domain.remote_records,
    };
    let body = serde_json::to_string_pretty(&snapshot).map_err(|e| write_err(e.to_string()))?;

    fs::write(&path, body).map_err(|e| write_err(format!("{}: {e}", path.display())))?;
    log::info!(
        "[{}] Remote zone state saved to {} before applying changes",
        domain.name,
        path.display()
    );

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_zone_state_as_json() {
        let dir = tempfile::tempdir().unwrap();
        let mut domain = Domain::new("example.com");
        domain.id = Some(2905);
        domain.remote_records.push(Record {
            id: Some(42),
            name: "example.com".to_string(),
            rtype: "A".to_string(),
            content: "1.2.3.4".to_string(),
            ..Record::default()
        });

        let path = write_snapshot(dir.path(), &domain).unwrap();
        assert!(path.file_name().unwrap().to_string_lossy().starts_with("example.com-"));

        let body = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["id"], 2905);
        assert_eq!(value["records"][0]["id"], 42);
        assert_eq!(value["records"][0]["type"], "A");
    }

    #[test]
    fn creates_missing_snapshot_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("snapshots");
        let domain = Domain::new("example.com");

        let path = write_snapshot(&nested, &domain).unwrap();
        assert!(path.exists());
    }
}
