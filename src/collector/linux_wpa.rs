//! Collector for Linux hosts configured directly through
//! `/etc/wpa_supplicant/wpa_supplicant.conf`, used only when
//! NetworkManager is completely absent. The file is root-readable, so
//! it is fetched through `sudo cat`.

use crate::collector::runner;
use crate::collector::types::{
    normalize_auth, DnsInterfaceConfig, NetworkMap, NetworkRecord, VisibleNetwork,
};
use crate::collector::Collector;
use crate::error::{Result, WifiError};
use regex::Regex;
use std::collections::BTreeMap;

/// The plaintext supplicant configuration this collector scrapes.
pub const WPA_SUPPLICANT_PATH: &str = "/etc/wpa_supplicant/wpa_supplicant.conf";

const REQUIRES_NM: &str = "Requires NetworkManager.";

#[derive(Debug, Default)]
pub struct SupplicantFileCollector {
    data: NetworkMap,
}

impl SupplicantFileCollector {
    pub fn new() -> Self {
        Self::default()
    }

    fn read_file(&self) -> String {
        runner::run("sudo", &["cat", WPA_SUPPLICANT_PATH]).unwrap_or_default()
    }
}

impl Collector for SupplicantFileCollector {
    fn get_passwords(&mut self) -> Result<NetworkMap> {
        let data = parse_supplicant_file(&self.read_file());
        self.data = data.clone();
        Ok(data)
    }

    fn cached_data(&self) -> &NetworkMap {
        &self.data
    }

    fn replace_cache(&mut self, data: NetworkMap) {
        self.data = data;
    }

    fn get_visible_networks(&self) -> Result<BTreeMap<String, VisibleNetwork>> {
        Ok(BTreeMap::new())
    }

    fn get_visible_networks_text(&self) -> Result<String> {
        Ok(REQUIRES_NM.to_string())
    }

    fn get_dns_config(&self) -> Result<BTreeMap<String, DnsInterfaceConfig>> {
        Ok(BTreeMap::new())
    }

    fn get_dns_config_text(&self) -> Result<String> {
        Ok(REQUIRES_NM.to_string())
    }

    fn get_currently_connected_ssids(&self) -> Result<Vec<String>> {
        let output = runner::run("iwgetid", &["-r"]).unwrap_or_default();
        Ok(output
            .lines()
            .map(str::trim)
            .filter(|ssid| !ssid.is_empty())
            .map(str::to_string)
            .collect())
    }

    fn get_currently_connected_passwords(&self) -> Result<Vec<(String, String)>> {
        let connected = self.get_currently_connected_ssids()?;
        let networks = parse_supplicant_file(&self.read_file());

        Ok(connected
            .into_iter()
            .filter_map(|ssid| {
                let psk = networks.get(&ssid)?.psk.clone();
                Some((ssid, psk))
            })
            .collect())
    }

    fn get_single_password(&self, ssid: &str) -> Result<String> {
        let networks = parse_supplicant_file(&self.read_file());
        networks
            .get(ssid)
            .map(|record| record.psk.clone())
            .ok_or_else(|| WifiError::ssid_not_known(ssid))
    }

    fn get_known_ssids(&self) -> Result<Vec<String>> {
        let networks = parse_supplicant_file(&self.read_file());
        Ok(networks.into_keys().collect())
    }
}

/// Extract every `network={ ... }` block body from a supplicant file.
pub fn network_blocks(contents: &str) -> Vec<String> {
    let re = Regex::new(r"network=\{([^}]*)\}").expect("static pattern");
    re.captures_iter(contents)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Parse a whole supplicant file into the normalized map. The file
/// carries no metered or MAC-randomization data, so those fields stay
/// at their defaults.
pub fn parse_supplicant_file(contents: &str) -> NetworkMap {
    let mut networks = NetworkMap::new();

    for block in network_blocks(contents) {
        let mut ssid = String::new();
        let mut record = NetworkRecord::default();

        for line in block.lines() {
            let line = line.trim();
            if let Some(value) = line.strip_prefix("ssid=") {
                ssid = strip_quotes(value).to_string();
            } else if let Some(value) = line.strip_prefix("key_mgmt=") {
                record.auth = normalize_auth(value);
            } else if let Some(value) = line.strip_prefix("psk=") {
                record.psk = strip_quotes(value).to_string();
            }
        }

        record.auth = normalize_auth(&record.auth);
        if ssid.is_empty() {
            log::warn!("network block without an ssid, skipping");
        } else {
            networks.insert(ssid, record);
        }
    }

    networks
}

fn strip_quotes(value: &str) -> &str {
    let value = value.trim();
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}
