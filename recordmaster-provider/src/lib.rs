//! # recordmaster-provider
//!
//! Nameserver API abstraction for recordmaster: the small surface the
//! reconciliation engine needs from a remote DNS service — one zone
//! snapshot read plus create/update/delete record mutations — behind the
//! [`NameserverApi`] trait.
//!
//! ## Implementations
//!
//! | Source | Type | Notes |
//! |--------|------|-------|
//! | [INWX](https://www.inwx.com/) | [`InwxApi`] | Domrobot JSON-RPC over HTTPS, cookie session |
//! | Snapshot file | [`FileZoneSource`] | Read-only, for offline/dry runs |
//!
//! ## Feature Flags
//!
//! - **`native-tls`** *(default)* — Use the platform's native TLS implementation.
//! - **`rustls`** — Use rustls. Recommended for cross-compilation.
//!
//! ## Quick Start
//!
//! ```no_run
//! use recordmaster_provider::{InwxApi, InwxEndpoint, NameserverApi};
//!
//! # async fn run() -> Result<(), recordmaster_provider::ProviderError> {
//! let api = InwxApi::new(InwxEndpoint::Live);
//! api.login("username", "password").await?;
//! let zone = api.zone_info("example.com").await?;
//! println!("zone {} has {} records", zone.id, zone.records.len());
//! # Ok(())
//! # }
//! ```

mod error;
mod http_client;
mod providers;
mod traits;
mod types;
mod utils;

pub use error::{ProviderError, Result};
pub use providers::{FileZoneSource, InwxApi, InwxEndpoint};
pub use traits::NameserverApi;
pub use types::{CreateRecord, UpdateRecord, ZoneInfo, ZoneRecord, DEFAULT_TTL};
