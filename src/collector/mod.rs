//! Platform collectors for saved-network credentials and diagnostics.
//!
//! Every collector drives native configuration utilities (netsh, nmcli,
//! the macOS security tool, ...) and scrapes their semi-structured text
//! output. Parsing lives in free functions taking raw text so that format
//! drift in a tool can be patched and tested without touching collection.

pub mod dummy;
pub mod linux_nm;
pub mod linux_wpa;
pub mod macos;
pub mod pool;
pub mod runner;
pub mod types;
pub mod windows;

use crate::error::{Result, WifiError};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use types::{DnsInterfaceConfig, NetworkMap, VisibleNetwork};

pub use linux_nm::NetworkManagerCollector;
pub use linux_wpa::SupplicantFileCollector;
pub use macos::MacCollector;
pub use windows::WindowsCollector;

/// The uniform interface over the platform-specific collectors.
///
/// Queries never fail because a single profile or SSID could not be read;
/// the affected entry keeps its defaults instead. Missing tools collapse
/// to empty results (or a literal explanatory string for the text
/// variants). The one operation with a real error contract is
/// [`Collector::get_single_password`].
pub trait Collector {
    /// Retrieve all saved network profiles including their keys,
    /// replacing the cached map. Zero profiles is an empty map,
    /// not an error. Can take several seconds.
    fn get_passwords(&mut self) -> Result<NetworkMap>;

    /// The map retrieved by the last `get_passwords` call
    /// (empty before the first call).
    fn cached_data(&self) -> &NetworkMap;

    /// Replace the cached map wholesale.
    fn replace_cache(&mut self, data: NetworkMap);

    /// Synthetic profiles for testing without OS privilege; also
    /// replaces the cached map. See [`dummy::generate`].
    fn get_passwords_dummy(&mut self, delay: Duration, quantity: usize) -> NetworkMap {
        let data = dummy::generate(delay, quantity);
        self.replace_cache(data.clone());
        data
    }

    /// Networks visible in a scan right now, keyed by SSID.
    /// Hidden SSIDs are relabeled "Hidden". A failed scan is an
    /// empty map.
    fn get_visible_networks(&self) -> Result<BTreeMap<String, VisibleNetwork>>;

    /// Human-readable rendition of the current scan, or a literal
    /// "not available" style message.
    fn get_visible_networks_text(&self) -> Result<String>;

    /// Per-interface DNS assignment. Interfaces with no resolvable
    /// DNS block still appear with empty fields.
    fn get_dns_config(&self) -> Result<BTreeMap<String, DnsInterfaceConfig>>;

    /// Human-readable rendition of the DNS configuration.
    fn get_dns_config_text(&self) -> Result<String>;

    /// SSIDs the host is associated with right now, possibly empty.
    fn get_currently_connected_ssids(&self) -> Result<Vec<String>>;

    /// (ssid, psk) for each currently connected network. A failed
    /// lookup for one SSID must not prevent the others.
    fn get_currently_connected_passwords(&self) -> Result<Vec<(String, String)>>;

    /// Key for one named network. Fails with [`WifiError::SsidNotKnown`]
    /// when no profile matches; an empty key is a valid success for
    /// open networks.
    fn get_single_password(&self, ssid: &str) -> Result<String>;

    /// Saved profile names only, without querying secrets.
    fn get_known_ssids(&self) -> Result<Vec<String>>;
}

/// Select the collector for the running host. One-time, fail-fast: any
/// OS outside the supported set is an `UnsupportedPlatform` error.
///
/// On Linux, NetworkManager is the primary source; the wpa_supplicant
/// file collector is used only when NetworkManager is completely absent.
pub fn for_host() -> Result<Box<dyn Collector>> {
    match std::env::consts::OS {
        "windows" => Ok(Box::new(WindowsCollector::new())),
        "linux" => {
            if Path::new(linux_nm::NM_CONNECTIONS_DIR).exists() {
                Ok(Box::new(NetworkManagerCollector::new()))
            } else if Path::new(linux_wpa::WPA_SUPPLICANT_PATH).is_file() {
                Ok(Box::new(SupplicantFileCollector::new()))
            } else {
                // Neither source present: degrade to empty results
                // rather than refusing to run.
                Ok(Box::new(NetworkManagerCollector::new()))
            }
        }
        "macos" => Ok(Box::new(MacCollector::new())),
        other => Err(WifiError::unsupported_platform(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_factory_selects_a_collector_on_supported_platforms() {
        // The test hosts this crate targets are all in the supported set.
        match std::env::consts::OS {
            "windows" | "linux" | "macos" => assert!(for_host().is_ok()),
            _ => assert!(matches!(
                for_host(),
                Err(WifiError::UnsupportedPlatform(_))
            )),
        }
    }

    #[test]
    fn dummy_data_replaces_the_cache() {
        let mut collector = NetworkManagerCollector::new();
        assert!(collector.cached_data().is_empty());
        let data = collector.get_passwords_dummy(Duration::ZERO, 6);
        assert_eq!(collector.cached_data(), &data);
        assert_eq!(data.len(), 6);
    }
}
