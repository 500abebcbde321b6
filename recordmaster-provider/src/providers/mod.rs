//! Nameserver API implementations

mod file;
mod inwx;

pub use file::FileZoneSource;
pub use inwx::{InwxApi, InwxEndpoint};
