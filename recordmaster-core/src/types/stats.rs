use serde::Serialize;

/// Per-domain counters summarizing one reconciliation run.
///
/// The movement counters (`updated`, `added`, `deleted`, `ignored`) are
/// incremented by the executor as mutations are applied (or counted as
/// intended, in dry-run). `unchanged` and `changed` are derived once at
/// the end of the run by [`finalize`](Self::finalize), never set directly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DomainStats {
    /// Records reported by the remote snapshot at domain entry.
    pub total_remote: u32,
    /// Matched records for which at least one field was updated.
    pub updated: u32,
    /// Records created remotely.
    pub added: u32,
    /// Unmatched remote records deleted.
    pub deleted: u32,
    /// Unmatched remote records preserved due to their type.
    pub ignored: u32,
    /// Derived: `total_remote - updated - deleted`.
    pub unchanged: u32,
    /// Derived: `updated + added + deleted`.
    pub changed: u32,
}

impl DomainStats {
    /// Compute the derived counters. Call exactly once, after all
    /// mutations for the domain have been attempted.
    ///
    /// Saturating: a `total_remote` that was never populated yields
    /// `unchanged == 0` instead of underflowing.
    pub fn finalize(&mut self) {
        self.unchanged = self
            .total_remote
            .saturating_sub(self.updated)
            .saturating_sub(self.deleted);
        self.changed = self.updated + self.added + self.deleted;
    }
}

impl std::fmt::Display for DomainStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} remote records: {} updated, {} added, {} deleted, {} ignored, {} unchanged, {} changed in total",
            self.total_remote,
            self.updated,
            self.added,
            self.deleted,
            self.ignored,
            self.unchanged,
            self.changed
        )
    }
}
