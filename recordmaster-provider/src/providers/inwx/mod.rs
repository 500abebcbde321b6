//! INWX "Domrobot" JSON-RPC API client

mod error;
mod http;
mod provider;
mod types;

use reqwest::Client;

use crate::http_client::create_http_client;

pub(crate) use types::{RpcResponse, ZoneInfoData};

/// Production API endpoint.
pub(crate) const INWX_API_LIVE: &str = "https://api.domrobot.com/jsonrpc/";
/// OTE sandbox endpoint (test accounts, no real zones touched).
pub(crate) const INWX_API_OTE: &str = "https://api.ote.domrobot.com/jsonrpc/";
/// The one and only success code of the Domrobot API.
pub(crate) const RPC_OK: u32 = 1000;

/// Which Domrobot deployment to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InwxEndpoint {
    /// Production API.
    #[default]
    Live,
    /// OTE sandbox.
    Sandbox,
}

/// INWX nameserver API client.
///
/// Holds a cookie-backed HTTP client; [`login`](InwxApi::login) must be
/// called once before any zone operation so the session cookie is set.
pub struct InwxApi {
    pub(crate) client: Client,
    pub(crate) endpoint: &'static str,
}

impl InwxApi {
    #[must_use]
    pub fn new(endpoint: InwxEndpoint) -> Self {
        Self {
            client: create_http_client(),
            endpoint: match endpoint {
                InwxEndpoint::Live => INWX_API_LIVE,
                InwxEndpoint::Sandbox => INWX_API_OTE,
            },
        }
    }
}
