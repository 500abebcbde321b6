//! Application configuration
//!
//! Credentials live in `<user config dir>/recordmaster/config.toml`,
//! separate from the zone configuration files passed via `--dns-config`.
//! A missing file is initialized with a commented template so the
//! operator only has to fill in the two values.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

const DEFAULT_APP_CONFIG: &str = "\
# App configuration for recordmaster.
# This is not the place for domain records, those live in the directory
# passed via the -c/--dns-config flag.

# Login data for the INWX API. Can also be a sub-account.
[inwx_account]
# Username and password are both required
username = \"\"
password = \"\"
";

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    pub inwx_account: InwxAccount,
}

#[derive(Debug, Default, Deserialize)]
pub struct InwxAccount {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Default location of the app configuration file.
pub fn config_file_path() -> Result<PathBuf> {
    let dir = dirs::config_dir().context("no user configuration directory available")?;
    Ok(dir.join("recordmaster").join("config.toml"))
}

/// Load the INWX account credentials, initializing a template file on
/// first run. Empty credentials are rejected here, before any network
/// call is attempted.
pub fn load_account(path: &Path) -> Result<InwxAccount> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!(
                "App configuration file '{}' has not been found. Initializing a new empty one.",
                path.display()
            );
            initialize_config_file(path)?;
            DEFAULT_APP_CONFIG.to_string()
        }
        Err(err) => {
            return Err(err).context(format!(
                "failed to read app configuration file '{}'",
                path.display()
            ))
        }
    };

    let config: AppConfig = toml::from_str(&raw).with_context(|| {
        format!(
            "error reading configuration file '{}', check the syntax",
            path.display()
        )
    })?;

    let account = config.inwx_account;
    if account.username.is_empty() || account.password.is_empty() {
        bail!(
            "no username and/or password set to authenticate with the INWX API \
             (see '{}')",
            path.display()
        );
    }
    Ok(account)
}

fn initialize_config_file(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create '{}'", parent.display()))?;
    }
    fs::write(path, DEFAULT_APP_CONFIG)
        .with_context(|| format!("failed to write '{}'", path.display()))
}
