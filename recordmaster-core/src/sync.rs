//! Sync executor
//!
//! Walks a populated [`Domain`] through the full reconciliation pipeline:
//! invariant checks, matching, change-set derivation, then the three
//! mutation phases — updates, creations, deletions, in that order — each
//! gated by the execution-mode policy. Counters are updated as mutations
//! are applied; a single summary line closes the domain.
//!
//! Partial-failure semantics: the first failed remote call aborts the run
//! via `?`, leaving the zone in whatever state the already-applied
//! mutations produced. There is no rollback; the pre-mutation snapshot is
//! the operator's recovery aid.

use std::path::PathBuf;
use std::sync::Arc;

use recordmaster_provider::NameserverApi;

use crate::config::validate_local_records;
use crate::diff::{build_change_set, creation_payload, ChangeSet, RecordUpdatePlan};
use crate::error::CoreResult;
use crate::matcher::{match_remote_to_local, MatcherConfig};
use crate::snapshot::write_snapshot;
use crate::types::Domain;

/// Run-wide execution policy, passed in explicitly by the caller.
#[derive(Debug, Clone, Default)]
pub struct SyncOptions {
    /// Compute and log every intended mutation, issue no external call.
    /// Intended mutations still count in the statistics, so the summary
    /// reflects intended effect.
    pub dry_run: bool,
    /// Ask for confirmation before each individual mutation. Declining
    /// skips exactly that mutation and proceeds with the next.
    pub interactive: bool,
    /// Record types never deleted when unmatched remotely. Per-domain
    /// options may override this list.
    pub ignore_types: Vec<String>,
    /// Where to write the pre-mutation zone snapshot; `None` disables it.
    pub snapshot_dir: Option<PathBuf>,
    /// Matching knobs.
    pub matcher: MatcherConfig,
}

/// Operator confirmation hook for interactive mode.
pub trait ConfirmPrompt: Send + Sync {
    /// Present the intended action and return whether to apply it.
    fn confirm(&self, prompt: &str) -> bool;
}

impl<T: ConfirmPrompt + ?Sized> ConfirmPrompt for Arc<T> {
    fn confirm(&self, prompt: &str) -> bool {
        (**self).confirm(prompt)
    }
}

/// Outcome of the execution-mode gate for one mutation.
enum Gate {
    /// Issue the call and count it.
    Apply,
    /// Dry-run: no call, but count the intended effect.
    CountOnly,
    /// Declined: no call, no count.
    Skip,
}

/// Applies change sets against the remote mutation interface.
pub struct SyncEngine {
    api: Arc<dyn NameserverApi>,
    options: SyncOptions,
    prompt: Option<Box<dyn ConfirmPrompt>>,
}

impl SyncEngine {
    #[must_use]
    pub fn new(api: Arc<dyn NameserverApi>, options: SyncOptions) -> Self {
        Self {
            api,
            options,
            prompt: None,
        }
    }

    /// Install the confirmation hook used in interactive mode.
    #[must_use]
    pub fn with_prompt(mut self, prompt: Box<dyn ConfirmPrompt>) -> Self {
        self.prompt = Some(prompt);
        self
    }

    /// Reconcile one populated domain: match, diff, apply, summarize.
    ///
    /// Any configuration or remote-call error is fatal; the caller must
    /// not continue with other domains.
    pub async fn sync_domain(&self, domain: &mut Domain) -> CoreResult<()> {
        validate_local_records(domain)?;

        let unmatched_remote = match_remote_to_local(domain, &self.options.matcher);

        let ignore_types = domain
            .options
            .ignore_types
            .clone()
            .unwrap_or_else(|| self.options.ignore_types.clone());
        let change_set = build_change_set(domain, &unmatched_remote, &ignore_types);

        for rec in &change_set.ignored {
            log::debug!(
                "[{}] This remote record is not configured locally, but you requested \
                 to not delete remote records of this type: {rec}",
                domain.name
            );
        }
        domain.stats.ignored = change_set.ignored.len() as u32;

        if !change_set.is_empty() && !self.options.dry_run {
            if let Some(ref dir) = self.options.snapshot_dir {
                write_snapshot(dir, domain)?;
            }
        }

        self.apply_updates(domain, &change_set).await?;
        self.apply_creates(domain, &change_set).await?;
        self.apply_deletes(domain, &change_set).await?;

        domain.stats.finalize();
        log::info!("[{}] Sync finished. {}", domain.name, domain.stats);
        Ok(())
    }

    /// Decide what happens to one intended mutation. The intended action
    /// has already been logged in full when this runs; dry-run and an
    /// interactive decline differ only in whether the intent is counted.
    fn gate(&self, domain: &Domain, action: &str) -> Gate {
        if self.options.dry_run {
            log::info!("[{}] Dry-run, not executing: {action}", domain.name);
            return Gate::CountOnly;
        }
        if self.options.interactive {
            let confirmed = self
                .prompt
                .as_ref()
                .is_some_and(|prompt| prompt.confirm(action));
            if confirmed {
                return Gate::Apply;
            }
            log::info!("[{}] Skipped on operator request: {action}", domain.name);
            return Gate::Skip;
        }
        Gate::Apply
    }

    async fn apply_updates(&self, domain: &mut Domain, change_set: &ChangeSet) -> CoreResult<()> {
        for plan in &change_set.updates {
            self.log_update_intent(domain, plan);
            let action = format!(
                "update '{}' record of '{}' (id={})",
                plan.rtype, plan.name, plan.record_id
            );
            match self.gate(domain, &action) {
                Gate::Apply => {
                    self.api.update_record(plan.record_id, &plan.payload).await?;
                    domain.stats.updated += 1;
                }
                Gate::CountOnly => domain.stats.updated += 1,
                Gate::Skip => {}
            }
        }
        Ok(())
    }

    async fn apply_creates(&self, domain: &mut Domain, change_set: &ChangeSet) -> CoreResult<()> {
        for rec in &change_set.creates {
            let payload = creation_payload(rec);
            log::info!("[{}] Creating new record: {rec}", domain.name);
            let action = format!("create '{}' record '{}' = '{}'", rec.rtype, rec.name, rec.content);
            match self.gate(domain, &action) {
                Gate::Apply => {
                    self.api.create_record(&domain.name, &payload).await?;
                    domain.stats.added += 1;
                }
                Gate::CountOnly => domain.stats.added += 1,
                Gate::Skip => {}
            }
        }
        Ok(())
    }

    async fn apply_deletes(&self, domain: &mut Domain, change_set: &ChangeSet) -> CoreResult<()> {
        for rec in &change_set.deletes {
            let Some(id) = rec.id else {
                log::warn!(
                    "[{}] Unmatched remote record without an id cannot be deleted: {rec}",
                    domain.name
                );
                continue;
            };
            log::info!(
                "[{}] Deleting record at remote as it is not configured locally: \
                 id={id}, type={}, name={}, content={}",
                domain.name,
                rec.rtype,
                rec.name,
                rec.content
            );
            let action = format!("delete '{}' record '{}' (id={id})", rec.rtype, rec.name);
            match self.gate(domain, &action) {
                Gate::Apply => {
                    self.api.delete_record(id).await?;
                    domain.stats.deleted += 1;
                }
                Gate::CountOnly => domain.stats.deleted += 1,
                Gate::Skip => {}
            }
        }
        Ok(())
    }

    /// Make the full intent visible before any decision point: record
    /// identity, field, old value, new value.
    fn log_update_intent(&self, domain: &Domain, plan: &RecordUpdatePlan) {
        for change in &plan.fields {
            log::info!(
                "[{}] Update '{}' record of '{}': '{}' from '{}' to '{}'",
                domain.name,
                plan.rtype,
                plan.name,
                change.field,
                change.old,
                change.new
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{ApiCall, MockNameserverApi, ScriptedPrompt};
    use crate::types::{DomainOptions, Record};
    use recordmaster_provider::CreateRecord;

    fn local(name: &str, rtype: &str, content: &str) -> Record {
        Record {
            name: name.to_string(),
            rtype: rtype.to_string(),
            content: content.to_string(),
            ..Record::default()
        }
    }

    fn remote(id: u64, name: &str, rtype: &str, content: &str) -> Record {
        Record {
            id: Some(id),
            ..local(name, rtype, content)
        }
    }

    fn domain_with(local_records: Vec<Record>, remote_records: Vec<Record>) -> Domain {
        let total = remote_records.len() as u32;
        let mut domain = Domain {
            name: "example.com".to_string(),
            id: Some(2905),
            local_records,
            remote_records,
            ..Domain::default()
        };
        domain.stats.total_remote = total;
        domain
    }

    fn engine(api: &Arc<MockNameserverApi>, options: SyncOptions) -> SyncEngine {
        SyncEngine::new(Arc::clone(api) as Arc<dyn NameserverApi>, options)
    }

    #[tokio::test]
    async fn matched_equal_records_cause_no_mutation() {
        let api = Arc::new(MockNameserverApi::new());
        let mut domain = domain_with(
            vec![local("example.com", "A", "1.1.1.1")],
            vec![remote(42, "example.com", "A", "1.1.1.1")],
        );

        engine(&api, SyncOptions::default())
            .sync_domain(&mut domain)
            .await
            .unwrap();

        assert!(api.calls().await.is_empty());
        assert_eq!(domain.local_records[0].id, Some(42));
        assert_eq!(domain.stats.unchanged, 1);
        assert_eq!(domain.stats.changed, 0);
    }

    #[tokio::test]
    async fn differing_content_issues_one_update() {
        let api = Arc::new(MockNameserverApi::new());
        let mut domain = domain_with(
            vec![local("example.com", "A", "1.1.1.1")],
            vec![remote(42, "example.com", "A", "2.2.2.2")],
        );

        engine(&api, SyncOptions::default())
            .sync_domain(&mut domain)
            .await
            .unwrap();

        let calls = api.calls().await;
        assert_eq!(calls.len(), 1);
        match &calls[0] {
            ApiCall::Update { id, payload } => {
                assert_eq!(*id, 42);
                assert_eq!(payload.content.as_deref(), Some("1.1.1.1"));
                assert!(payload.ttl.is_none());
            }
            other => panic!("unexpected call: {other:?}"),
        }
        assert_eq!(domain.stats.updated, 1);
        assert_eq!(domain.stats.changed, 1);
    }

    #[tokio::test]
    async fn unmatched_local_record_is_created() {
        let api = Arc::new(MockNameserverApi::new());
        let mut domain = domain_with(vec![local("example.com", "TXT", "v=spf1 -all")], vec![]);

        engine(&api, SyncOptions::default())
            .sync_domain(&mut domain)
            .await
            .unwrap();

        let calls = api.calls().await;
        assert_eq!(
            calls,
            vec![ApiCall::Create {
                domain: "example.com".to_string(),
                payload: CreateRecord {
                    name: Some("example.com".to_string()),
                    rtype: "TXT".to_string(),
                    content: "v=spf1 -all".to_string(),
                    ttl: Some(3600),
                    prio: None,
                    extras: Default::default(),
                },
            }]
        );
        assert_eq!(domain.stats.added, 1);
    }

    #[tokio::test]
    async fn unmatched_remote_record_is_deleted_unless_ignored() {
        let api = Arc::new(MockNameserverApi::new());
        let mut domain = domain_with(
            vec![],
            vec![
                remote(7, "example.com", "NS", "ns1.example.com"),
                remote(8, "example.com", "SOA", "ns1.example.com hostmaster.example.com"),
            ],
        );

        let options = SyncOptions {
            ignore_types: vec!["SOA".to_string()],
            ..SyncOptions::default()
        };
        engine(&api, options).sync_domain(&mut domain).await.unwrap();

        assert_eq!(api.calls().await, vec![ApiCall::Delete { id: 7 }]);
        assert_eq!(domain.stats.deleted, 1);
        assert_eq!(domain.stats.ignored, 1);
        assert_eq!(domain.stats.unchanged, 1);
    }

    #[tokio::test]
    async fn domain_options_override_global_ignore_types() {
        let api = Arc::new(MockNameserverApi::new());
        let mut domain = domain_with(vec![], vec![remote(7, "example.com", "NS", "ns1.example.com")]);
        domain.options = DomainOptions {
            ignore_types: Some(vec!["NS".to_string()]),
            ..DomainOptions::default()
        };

        // Globally NS would be deleted; the domain override preserves it.
        engine(&api, SyncOptions::default())
            .sync_domain(&mut domain)
            .await
            .unwrap();

        assert!(api.calls().await.is_empty());
        assert_eq!(domain.stats.ignored, 1);
        assert_eq!(domain.stats.deleted, 0);
    }

    #[tokio::test]
    async fn dry_run_never_touches_the_api_but_counts_intent() {
        let api = Arc::new(MockNameserverApi::new());
        let mut domain = domain_with(
            vec![
                local("example.com", "A", "1.1.1.1"),
                local("new.example.com", "TXT", "hello"),
            ],
            vec![
                remote(42, "example.com", "A", "2.2.2.2"),
                remote(43, "example.com", "NS", "ns1.example.com"),
            ],
        );

        let options = SyncOptions {
            dry_run: true,
            ..SyncOptions::default()
        };
        engine(&api, options).sync_domain(&mut domain).await.unwrap();

        assert!(api.calls().await.is_empty());
        assert_eq!(domain.stats.updated, 1);
        assert_eq!(domain.stats.added, 1);
        assert_eq!(domain.stats.deleted, 1);
        assert_eq!(domain.stats.changed, 3);
        assert_eq!(domain.stats.unchanged, 0);
    }

    #[tokio::test]
    async fn declined_confirmation_skips_exactly_one_mutation() {
        let api = Arc::new(MockNameserverApi::new());
        let mut domain = domain_with(
            vec![
                local("example.com", "A", "1.1.1.1"),
                local("new.example.com", "TXT", "hello"),
            ],
            vec![remote(42, "example.com", "A", "2.2.2.2")],
        );

        // Decline the update, accept the creation.
        let prompt = Arc::new(ScriptedPrompt::new([false, true]));
        let options = SyncOptions {
            interactive: true,
            ..SyncOptions::default()
        };
        let engine = SyncEngine::new(Arc::clone(&api) as Arc<dyn NameserverApi>, options)
            .with_prompt(Box::new(Arc::clone(&prompt)));
        engine.sync_domain(&mut domain).await.unwrap();

        let calls = api.calls().await;
        assert_eq!(calls.len(), 1);
        assert!(matches!(calls[0], ApiCall::Create { .. }));
        assert_eq!(domain.stats.updated, 0);
        assert_eq!(domain.stats.added, 1);
        assert_eq!(prompt.prompts_seen().len(), 2);
    }

    #[tokio::test]
    async fn interactive_without_prompt_hook_declines() {
        let api = Arc::new(MockNameserverApi::new());
        let mut domain = domain_with(vec![local("example.com", "A", "1.1.1.1")], vec![]);

        let options = SyncOptions {
            interactive: true,
            ..SyncOptions::default()
        };
        engine(&api, options).sync_domain(&mut domain).await.unwrap();

        assert!(api.calls().await.is_empty());
        assert_eq!(domain.stats.added, 0);
    }

    #[tokio::test]
    async fn remote_error_aborts_the_run() {
        let api = Arc::new(MockNameserverApi::new());
        api.set_mutation_error(Some("Command failed".to_string())).await;
        let mut domain = domain_with(vec![local("example.com", "A", "1.1.1.1")], vec![]);

        let result = engine(&api, SyncOptions::default()).sync_domain(&mut domain).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn local_ids_abort_before_any_call() {
        let api = Arc::new(MockNameserverApi::new());
        let mut domain = domain_with(vec![remote(1, "example.com", "A", "1.1.1.1")], vec![]);

        let result = engine(&api, SyncOptions::default()).sync_domain(&mut domain).await;
        assert!(result.is_err());
        assert!(api.calls().await.is_empty());
    }

    #[tokio::test]
    async fn snapshot_written_before_mutations_when_configured() {
        let dir = tempfile::tempdir().unwrap();
        let api = Arc::new(MockNameserverApi::new());
        let mut domain = domain_with(
            vec![local("example.com", "A", "1.1.1.1")],
            vec![remote(42, "example.com", "A", "2.2.2.2")],
        );

        let options = SyncOptions {
            snapshot_dir: Some(dir.path().to_path_buf()),
            ..SyncOptions::default()
        };
        engine(&api, options).sync_domain(&mut domain).await.unwrap();

        let files: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(files.len(), 1);
    }

    #[tokio::test]
    async fn no_snapshot_for_clean_or_dry_runs() {
        let dir = tempfile::tempdir().unwrap();
        let api = Arc::new(MockNameserverApi::new());

        // Nothing to change: no snapshot.
        let mut clean = domain_with(
            vec![local("example.com", "A", "1.1.1.1")],
            vec![remote(42, "example.com", "A", "1.1.1.1")],
        );
        let options = SyncOptions {
            snapshot_dir: Some(dir.path().to_path_buf()),
            ..SyncOptions::default()
        };
        engine(&api, options).sync_domain(&mut clean).await.unwrap();
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);

        // Dry run: no snapshot either.
        let mut dirty = domain_with(
            vec![local("example.com", "A", "1.1.1.1")],
            vec![remote(42, "example.com", "A", "2.2.2.2")],
        );
        let options = SyncOptions {
            dry_run: true,
            snapshot_dir: Some(dir.path().to_path_buf()),
            ..SyncOptions::default()
        };
        engine(&api, options).sync_domain(&mut dirty).await.unwrap();
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn mutations_run_updates_then_creates_then_deletes() {
        let api = Arc::new(MockNameserverApi::new());
        let mut domain = domain_with(
            vec![
                local("new.example.com", "TXT", "hello"),
                local("example.com", "A", "1.1.1.1"),
            ],
            vec![
                remote(42, "example.com", "A", "2.2.2.2"),
                remote(43, "old.example.com", "CNAME", "example.com"),
            ],
        );

        engine(&api, SyncOptions::default())
            .sync_domain(&mut domain)
            .await
            .unwrap();

        let calls = api.calls().await;
        assert_eq!(calls.len(), 3);
        assert!(matches!(calls[0], ApiCall::Update { id: 42, .. }));
        assert!(matches!(calls[1], ApiCall::Create { .. }));
        assert!(matches!(calls[2], ApiCall::Delete { id: 43 }));
    }
}
