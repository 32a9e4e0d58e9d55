//! Family-constrained host resolution. No fallback to the other family.

use crate::{error::ResolveError, session::AddressFamily};
use std::net::IpAddr;
use tokio::net::lookup_host;
use tracing::debug;

/// Resolve `host` to the first address of `family`.
///
/// IP literals are taken as-is when their family matches.
pub async fn resolve(host: &str, family: AddressFamily) -> Result<IpAddr, ResolveError> {
    let no_match = || ResolveError::NoSuitableAddress {
        host: host.to_owned(),
        family,
    };

    if let Ok(ip) = host.parse::<IpAddr>() {
        return if family.matches(&ip) {
            Ok(ip)
        } else {
            Err(no_match())
        };
    }

    let ip = lookup_host((host, 0))
        .await
        .map_err(ResolveError::Lookup)?
        .map(|addr| addr.ip())
        .find(|ip| family.matches(ip))
        .ok_or_else(no_match)?;

    debug!(%host, %ip, %family, "resolved");
    Ok(ip)
}
