//! Domrobot wire types

use serde::{Deserialize, Serialize};

use crate::types::ZoneRecord;

/// JSON-RPC request envelope.
///
/// Domrobot speaks a plain `{method, params}` convention without the
/// `jsonrpc`/`id` fields of JSON-RPC 2.0.
#[derive(Debug, Serialize)]
pub(crate) struct RpcRequest<'a, P: Serialize> {
    pub method: &'a str,
    pub params: P,
}

/// JSON-RPC response envelope. `code == 1000` means success.
#[derive(Debug, Deserialize)]
pub(crate) struct RpcResponse<T> {
    pub code: u32,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(rename = "resData")]
    pub res_data: Option<T>,
}

/// `resData` of `nameserver.info`.
#[derive(Debug, Deserialize)]
pub(crate) struct ZoneInfoData {
    #[serde(rename = "roId")]
    pub ro_id: u64,
    #[serde(default, rename = "record")]
    pub records: Vec<ZoneRecord>,
}
