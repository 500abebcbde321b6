//! Core data model: zones, records, per-domain counters

mod domain;
mod record;
mod stats;

pub use domain::{Domain, DomainOptions};
pub use record::{Record, RecordSignature, DEFAULT_TTL, ROOT_POSITION};
pub use stats::DomainStats;
