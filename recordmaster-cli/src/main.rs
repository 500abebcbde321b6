//! Recordmaster entry point
//!
//! Reconciles INWX nameserver entries with local per-domain YAML
//! configuration files, or exports a live zone back into that
//! configuration shape. Logs go to stderr so `export` output stays
//! pipeable.

mod app_config;
mod prompt;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use recordmaster_core::config::parse_domain_config;
use recordmaster_core::export::render_zone_config;
use recordmaster_core::{Domain, MatcherConfig, SyncEngine, SyncOptions};
use recordmaster_provider::{FileZoneSource, InwxApi, InwxEndpoint, NameserverApi};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use prompt::StdinPrompt;

/// Sync INWX nameserver entries with local state
#[derive(Parser, Debug)]
#[command(name = "recordmaster")]
#[command(author, version, about)]
struct Cli {
    /// Verbose debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Reconcile remote zones with the local configuration directory
    Sync {
        /// Directory containing one YAML configuration file per domain
        #[arg(short = 'c', long, value_name = "DIR")]
        dns_config: PathBuf,

        /// Read the remote state from a local snapshot file instead of the
        /// API. Implies --dry
        #[arg(short, long, value_name = "FILE")]
        local: Option<PathBuf>,

        /// Do not delete these record types when they are only found
        /// remotely but not locally. Pass without values to consider all
        /// types
        #[arg(short, long, num_args = 0.., default_values_t = vec![String::from("SOA")])]
        ignore_types: Vec<String>,

        /// Dry run, do not change anything at remote
        #[arg(long)]
        dry: bool,

        /// Ask for confirmation before each individual change
        #[arg(long)]
        interactive: bool,

        /// Write a JSON snapshot of each zone into this directory before
        /// mutating it
        #[arg(long, value_name = "DIR")]
        snapshot_dir: Option<PathBuf>,
    },

    /// Print a zone's remote records as configuration-shaped YAML
    Export {
        /// Zone name to export
        #[arg(long, value_name = "ZONE")]
        domain: String,

        /// Read the remote state from a local snapshot file instead of the
        /// API
        #[arg(short, long, value_name = "FILE")]
        local: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let result = match cli.command {
        Commands::Sync {
            dns_config,
            local,
            ignore_types,
            dry,
            interactive,
            snapshot_dir,
        } => {
            run_sync(
                &dns_config,
                local.as_deref(),
                ignore_types,
                dry,
                interactive,
                snapshot_dir,
            )
            .await
        }
        Commands::Export { domain, local } => run_export(&domain, local.as_deref()).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Logs to stderr; default level info, `--debug` raises it to debug.
/// `RUST_LOG` still wins when set.
fn init_tracing(debug: bool) {
    let level = if debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .with(EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}

/// Open the remote backend: a read-only snapshot file when `--local` is
/// given, otherwise a logged-in INWX session.
async fn connect(local: Option<&Path>) -> Result<Arc<dyn NameserverApi>> {
    if let Some(path) = local {
        tracing::info!("Reading remote state from '{}'", path.display());
        return Ok(Arc::new(FileZoneSource::new(path)));
    }

    let account = app_config::load_account(&app_config::config_file_path()?)?;
    let api = InwxApi::new(InwxEndpoint::Live);
    tracing::info!("Logging in as {}", account.username);
    api.login(&account.username, &account.password)
        .await
        .context("INWX API login failed")?;
    Ok(Arc::new(api))
}

async fn run_sync(
    dns_config: &Path,
    local: Option<&Path>,
    ignore_types: Vec<String>,
    dry: bool,
    interactive: bool,
    snapshot_dir: Option<PathBuf>,
) -> Result<()> {
    // A snapshot file can only stand in for the API read-only.
    let dry = dry || local.is_some();
    if dry {
        tracing::info!("Dry-run mode activated. No changes on remote DNS entries will be executed.");
    }

    let config_files = find_domain_config_files(dns_config)?;
    if config_files.is_empty() {
        bail!(
            "no domain configuration files (*.yaml/*.yml) found in '{}'",
            dns_config.display()
        );
    }

    let api = connect(local).await?;
    let options = SyncOptions {
        dry_run: dry,
        interactive,
        ignore_types,
        snapshot_dir,
        matcher: MatcherConfig::default(),
    };
    let mut engine = SyncEngine::new(Arc::clone(&api), options);
    if interactive {
        engine = engine.with_prompt(Box::new(StdinPrompt));
    }

    for (zone, path) in config_files {
        let source = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read '{}'", path.display()))?;
        let (records, domain_options) = parse_domain_config(&zone, &source)?;

        let mut domain = Domain::new(&zone);
        domain.local_records = records;
        domain.options = domain_options;

        let zone_info = api
            .zone_info(&zone)
            .await
            .with_context(|| format!("failed to read remote records of '{zone}'"))?;
        domain.set_remote(zone_info);

        engine
            .sync_domain(&mut domain)
            .await
            .with_context(|| format!("sync of '{zone}' failed"))?;
    }
    Ok(())
}

async fn run_export(domain: &str, local: Option<&Path>) -> Result<()> {
    let api = connect(local).await?;
    let zone_info = api
        .zone_info(domain)
        .await
        .with_context(|| format!("failed to read remote records of '{domain}'"))?;

    let mut zone = Domain::new(domain);
    zone.set_remote(zone_info);

    let rendered = render_zone_config(domain, &zone.remote_records)?;
    print!("{rendered}");
    Ok(())
}

/// Collect the per-domain configuration files of a directory, sorted by
/// zone name. The file stem is the zone name; anything that is not a
/// YAML file is warned about and skipped.
fn find_domain_config_files(dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("cannot read configuration directory '{}'", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("cannot read entry of '{}'", dir.display()))?
            .path();
        if path.is_dir() {
            continue;
        }
        let extension = path.extension().and_then(|ext| ext.to_str());
        if !matches!(extension, Some("yaml" | "yml")) {
            tracing::warn!("Ignoring '{}', not a YAML configuration file", path.display());
            continue;
        }
        let Some(zone) = path.file_stem().and_then(|stem| stem.to_str()) else {
            tracing::warn!("Ignoring '{}', file name is not valid UTF-8", path.display());
            continue;
        };
        let zone = zone.to_string();
        files.push((zone, path));
    }
    files.sort();
    Ok(files)
}
