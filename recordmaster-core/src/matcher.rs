//! Matching of remote records against local declarations
//!
//! Nothing stable links a remote record to a line of local configuration,
//! so identity is established here: each remote record is assigned to at
//! most one local record sharing its name and type, with content
//! similarity breaking ties between several candidates.
//!
//! The algorithm is a greedy, order-dependent single pass over the remote
//! snapshot, not a globally optimal bipartite matching. Two remote records
//! colliding with the same two similar local candidates may be assigned
//! differently depending on processing order. That approximation is
//! intentional and load-bearing for compatibility; do not replace it with
//! a "better" matching without a product decision.

use crate::types::{Domain, Record};

/// Tuning knobs for ambiguity resolution.
#[derive(Debug, Clone, Copy)]
pub struct MatcherConfig {
    /// Minimum normalized similarity between remote and candidate content
    /// for the candidate to qualify.
    pub similarity_cutoff: f64,
    /// Cap on the number of qualifying candidates considered.
    pub max_candidates: usize,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            similarity_cutoff: 0.6,
            max_candidates: 10,
        }
    }
}

/// Match every remote record against the local declarations, assigning
/// remote IDs to the matched local records in place.
///
/// Returns the remote records no local declaration accounts for, in
/// snapshot order — the deletion candidates.
///
/// Post-condition: a local record with an `id` is matched; a local record
/// without one is a creation candidate.
pub fn match_remote_to_local(domain: &mut Domain, config: &MatcherConfig) -> Vec<Record> {
    let mut unmatched_remote = Vec::new();

    let remote_records = domain.remote_records.clone();
    for rem_rec in &remote_records {
        log::debug!(
            "[{}] Trying to find matches with local records for this remote record: {rem_rec}",
            domain.name
        );

        let candidates: Vec<usize> = domain
            .local_records
            .iter()
            .enumerate()
            .filter(|(_, loc)| {
                loc.id.is_none() && loc.name == rem_rec.name && loc.rtype == rem_rec.rtype
            })
            .map(|(idx, _)| idx)
            .collect();

        match candidates.len() {
            1 => assign_remote_id(domain, candidates[0], rem_rec, 0),
            0 => {
                log::debug!(
                    "[{}] No matching local record with at least the same name and type \
                     found for the remote record",
                    domain.name
                );
                unmatched_remote.push(rem_rec.clone());
            }
            _ => {
                let closest = closest_candidates(&domain.local_records, &candidates, rem_rec, config);
                if let Some(&best) = closest.first() {
                    assign_remote_id(domain, best, rem_rec, closest.len());
                } else {
                    log::debug!(
                        "[{}] No close-enough local match for the remote record. Will rather delete it",
                        domain.name
                    );
                    unmatched_remote.push(rem_rec.clone());
                }
            }
        }
    }

    unmatched_remote
}

/// Rank ambiguous candidates by content similarity.
///
/// Keeps up to `max_candidates` whose score reaches the cutoff, best
/// first; equal scores keep candidate order, so the first declared record
/// wins ties.
fn closest_candidates(
    local_records: &[Record],
    candidates: &[usize],
    rem_rec: &Record,
    config: &MatcherConfig,
) -> Vec<usize> {
    let mut scored: Vec<(usize, f64)> = candidates
        .iter()
        .map(|&idx| {
            let score = strsim::normalized_levenshtein(&rem_rec.content, &local_records[idx].content);
            (idx, score)
        })
        .filter(|&(_, score)| score >= config.similarity_cutoff)
        .collect();

    // Stable sort: ties stay in candidate-enumeration order.
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(config.max_candidates);
    scored.into_iter().map(|(idx, _)| idx).collect()
}

/// Mark the local record as matched by storing the remote identity.
///
/// `similar` is the number of qualifying candidates the choice was made
/// among; diagnostics only.
fn assign_remote_id(domain: &mut Domain, local_idx: usize, rem_rec: &Record, similar: usize) {
    let choice = if similar == 0 {
        "the only yet unassigned one".to_string()
    } else {
        format!("the closest among {similar} similar unmatched ones")
    };
    log::debug!(
        "[{}] Found this local record to be {choice} for the remote record: {}",
        domain.name,
        domain.local_records[local_idx]
    );

    domain.local_records[local_idx].id = rem_rec.id;
}
