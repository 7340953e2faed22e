//! Collector for macOS. Saved keys live in the login keychain
//! (`security` tool); scans and association state come from the private
//! `airport` utility, DNS from `scutil`. Each key read can prompt the
//! user for keychain authorization.

use crate::collector::pool;
use crate::collector::runner;
use crate::collector::types::{
    normalize_auth, DnsInterfaceConfig, NetworkMap, NetworkRecord, VisibleNetwork,
};
use crate::collector::Collector;
use crate::error::{Result, WifiError};
use regex::Regex;
use std::collections::BTreeMap;

/// The airport utility has no PATH entry; Apple ships it at a fixed
/// framework path.
pub const AIRPORT_PATH: &str =
    "/System/Library/PrivateFrameworks/Apple80211.framework/Versions/Current/Resources/airport";

const KEYCHAIN_NOT_FOUND: &str = "could not be found in the keychain";

#[derive(Debug, Default)]
pub struct MacCollector {
    data: NetworkMap,
}

impl MacCollector {
    pub fn new() -> Self {
        Self::default()
    }

    fn lookup_key(ssid: &str) -> NetworkRecord {
        let psk = runner::run("security", &["find-generic-password", "-a", ssid, "-w"])
            .map(|output| output.trim().to_string())
            .unwrap_or_default();

        // The keychain does not record the auth scheme; an empty label
        // normalizes to "Open" like the other collectors.
        NetworkRecord {
            auth: normalize_auth(""),
            psk,
            ..Default::default()
        }
    }
}

impl Collector for MacCollector {
    fn get_passwords(&mut self) -> Result<NetworkMap> {
        let dump = runner::run("security", &["dump-keychain"]).unwrap_or_default();
        let ssids = parse_keychain_ssids(&dump);

        let data = pool::map_profiles(ssids, Self::lookup_key);
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
        let output = runner::run(AIRPORT_PATH, &["-s"]).unwrap_or_default();
        Ok(parse_airport_scan(&output))
    }

    fn get_visible_networks_text(&self) -> Result<String> {
        let output = match runner::run(AIRPORT_PATH, &["-s"]) {
            Ok(output) => output,
            Err(_) => return Ok("Visible network information is not available.".to_string()),
        };

        let visible = parse_airport_scan(&output);
        let mut text = format!("Number of visible networks: {}\n", visible.len());
        for (ssid, info) in &visible {
            text.push_str(&format!(
                "{}\n BSSID: {}\n Channel: {}\n Signal (RSSI): {}\n Security: {}\n\n",
                ssid,
                info.bssids.join(", "),
                info.channel,
                info.signal,
                info.security
            ));
        }
        Ok(text)
    }

    fn get_dns_config(&self) -> Result<BTreeMap<String, DnsInterfaceConfig>> {
        let scutil = runner::run("scutil", &["--dns"]).unwrap_or_default();
        let ifconfig = runner::run("ifconfig", &[]).unwrap_or_default();
        Ok(parse_dns_config(&scutil, &ifconfig))
    }

    fn get_dns_config_text(&self) -> Result<String> {
        let configs = self.get_dns_config()?;

        let mut text = format!("Number of interfaces: {}\n", configs.len());
        let mut quiet = Vec::new();
        for (interface, config) in &configs {
            if config.nameservers.is_empty() {
                quiet.push(interface.as_str());
            } else {
                text.push_str(&format!(
                    "Interface: {} \n type: {} \n DNS: {} \n domain: {}\n\n",
                    interface,
                    config.assignment,
                    config.nameservers.join(", "),
                    config.suffix
                ));
            }
        }
        text.push_str("\nOther interfaces:\n");
        for interface in quiet {
            text.push_str(&format!(" {}\n", interface));
        }
        Ok(text)
    }

    fn get_currently_connected_ssids(&self) -> Result<Vec<String>> {
        let output = runner::run(AIRPORT_PATH, &["-I"]).unwrap_or_default();
        Ok(output
            .lines()
            .filter(|line| line.contains(" SSID"))
            .filter_map(|line| line.split_once(':').map(|(_, v)| v.trim().to_string()))
            .filter(|ssid| !ssid.is_empty())
            .collect())
    }

    fn get_currently_connected_passwords(&self) -> Result<Vec<(String, String)>> {
        let mut pairs = Vec::new();
        for ssid in self.get_currently_connected_ssids()? {
            let psk = match self.get_single_password(&ssid) {
                Ok(psk) => psk,
                Err(_) => continue,
            };
            pairs.push((ssid, psk));
        }
        Ok(pairs)
    }

    fn get_single_password(&self, ssid: &str) -> Result<String> {
        let (stdout, stderr) =
            runner::run_with_stderr("security", &["find-generic-password", "-a", ssid, "-w"])
                .map_err(|_| WifiError::ssid_not_known(ssid))?;

        if stderr.contains(KEYCHAIN_NOT_FOUND) {
            return Err(WifiError::ssid_not_known(ssid));
        }
        Ok(stdout.trim().to_string())
    }

    fn get_known_ssids(&self) -> Result<Vec<String>> {
        let dump = runner::run("security", &["dump-keychain"]).unwrap_or_default();
        Ok(parse_keychain_ssids(&dump))
    }
}

/// Pull AirPort network SSIDs out of a `security dump-keychain` listing.
/// Items are delimited by "attributes:"; the SSID lives in the
/// `"acct"<blob>=` attribute, hex-encoded when it holds unprintable
/// characters.
pub fn parse_keychain_ssids(dump: &str) -> Vec<String> {
    let mut ssids = Vec::new();

    for item in dump.split("attributes:") {
        if !item.contains("AirPort network password") {
            continue;
        }
        for row in item.lines() {
            let Some(blob) = row.split_once("\"acct\"<blob>=").map(|(_, b)| b.trim()) else {
                continue;
            };
            if let Some(hex) = blob.strip_prefix("0x") {
                // Hex form ends at a double space followed by a comment.
                let hex = hex.split("  ").next().unwrap_or(hex);
                match decode_hex(hex) {
                    Some(bytes) => ssids.push(String::from_utf8_lossy(&bytes).into_owned()),
                    None => log::warn!("undecodable keychain account blob: {:?}", blob),
                }
            } else {
                let ssid = blob.trim_matches('"');
                if !ssid.is_empty() {
                    ssids.push(ssid.to_string());
                }
            }
        }
    }

    ssids
}

fn decode_hex(hex: &str) -> Option<Vec<u8>> {
    if hex.len() % 2 != 0 {
        return None;
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok())
        .collect()
}

/// Parse `airport -s` scan rows. Columns are aligned by whitespace with
/// the SSID potentially containing spaces, so the BSSID is located first
/// and the line is split around it.
pub fn parse_airport_scan(output: &str) -> BTreeMap<String, VisibleNetwork> {
    let bssid_re = Regex::new(r"(?i)([0-9a-f]{2}:){5}[0-9a-f]{2}").expect("static pattern");
    let mut visible = BTreeMap::new();

    // First non-blank line is the column header.
    for line in output.lines().filter(|l| !l.trim().is_empty()).skip(1) {
        let Some(mat) = bssid_re.find(line) else {
            continue;
        };

        let ssid = line[..mat.start()].trim();
        let ssid = if ssid.is_empty() { "Hidden" } else { ssid };

        let rest: Vec<&str> = line[mat.end()..].split_whitespace().collect();
        if rest.len() < 2 {
            continue;
        }

        visible.insert(
            ssid.to_string(),
            VisibleNetwork {
                security: rest.last().map(|s| s.to_string()).unwrap_or_default(),
                channel: rest[1].to_string(),
                signal: rest[0].to_string(),
                bssids: vec![mat.as_str().to_string()],
                rates: Vec::new(),
            },
        );
    }

    visible
}

/// Merge `scutil --dns` scoped queries with the `ifconfig` interface
/// list. Every interface appears; only those with a scoped resolver get
/// nameserver data. Most unscoped scutil entries relate to mDNS, so
/// they are ignored.
pub fn parse_dns_config(scutil: &str, ifconfig: &str) -> BTreeMap<String, DnsInterfaceConfig> {
    let mut configs = BTreeMap::new();

    for line in ifconfig.lines() {
        if line.starts_with(char::is_whitespace) || line.trim().is_empty() {
            continue;
        }
        if let Some((name, _)) = line.split_once(':') {
            configs.insert(name.to_string(), DnsInterfaceConfig::default());
        }
    }

    let blocks: Vec<&str> = scutil.trim().split("\n\n").collect();
    let scoped_start = blocks
        .iter()
        .position(|block| block.contains("DNS configuration (for scoped queries)"));
    let Some(scoped_start) = scoped_start else {
        return configs;
    };

    let if_index_re = Regex::new(r"\(([^)]*)\)").expect("static pattern");
    for block in &blocks[scoped_start + 1..] {
        let mut interface = String::new();
        let mut config = DnsInterfaceConfig::default();

        for row in block.lines() {
            if row.contains("search domain") {
                if let Some((_, suffix)) = row.split_once(':') {
                    config.suffix = suffix.trim().to_string();
                }
            } else if row.contains("if_index") {
                if let Some(caps) = if_index_re.captures(row) {
                    interface = caps[1].to_string();
                }
            } else if row.contains("nameserver") {
                if let Some((_, server)) = row.split_once(':') {
                    config.nameservers.push(server.trim().to_string());
                }
            }
        }

        if !interface.is_empty() {
            configs.insert(interface, config);
        }
    }

    configs
}
