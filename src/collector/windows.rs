//! Collector for Windows, scraping `netsh` output.
//!
//! netsh wording varies with OS version and display locale; every parser
//! here is permissive label-prefix matching that skips lines it does not
//! recognize rather than failing.

use crate::collector::pool;
use crate::collector::runner;
use crate::collector::types::{
    normalize_auth, DnsAssignment, DnsInterfaceConfig, NetworkMap, NetworkRecord, VisibleNetwork,
};
use crate::collector::Collector;
use crate::error::{Result, WifiError};
use std::collections::BTreeMap;

const NOT_AVAILABLE: &str = "Visible network information is not available.";

#[derive(Debug, Default)]
pub struct WindowsCollector {
    data: NetworkMap,
}

impl WindowsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    fn show_profile(ssid: &str) -> NetworkRecord {
        match runner::run("netsh", &["wlan", "show", "profile", ssid, "key=clear"]) {
            Ok(output) => parse_profile_detail(&output),
            Err(_) => {
                // Absorbed: this profile keeps its defaults, the batch
                // carries on.
                log::warn!("could not query profile {:?}", ssid);
                NetworkRecord::default()
            }
        }
    }
}

impl Collector for WindowsCollector {
    fn get_passwords(&mut self) -> Result<NetworkMap> {
        let listing = runner::run("netsh", &["wlan", "show", "profiles"]).unwrap_or_default();
        let profiles = parse_profile_names(&listing);

        let data = pool::map_profiles(profiles, Self::show_profile);
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
        let output =
            runner::run("netsh", &["wlan", "show", "networks", "mode=Bssid"]).unwrap_or_default();
        Ok(parse_visible_networks(&output))
    }

    fn get_visible_networks_text(&self) -> Result<String> {
        match runner::run("netsh", &["wlan", "show", "networks", "mode=Bssid"]) {
            Ok(output) => Ok(output),
            Err(_) => Ok(NOT_AVAILABLE.to_string()),
        }
    }

    fn get_dns_config(&self) -> Result<BTreeMap<String, DnsInterfaceConfig>> {
        let output = runner::run("netsh", &["interface", "ip", "show", "dns"]).unwrap_or_default();
        Ok(parse_dns_config(&output))
    }

    fn get_dns_config_text(&self) -> Result<String> {
        match runner::run("netsh", &["interface", "ip", "show", "dns"]) {
            Ok(output) => Ok(output),
            Err(_) => Ok("DNS configuration is not available.".to_string()),
        }
    }

    fn get_currently_connected_ssids(&self) -> Result<Vec<String>> {
        let output = runner::run("netsh", &["wlan", "show", "interfaces"]).unwrap_or_default();
        Ok(parse_connected_ssids(&output))
    }

    fn get_currently_connected_passwords(&self) -> Result<Vec<(String, String)>> {
        let mut pairs = Vec::new();
        for ssid in self.get_currently_connected_ssids()? {
            // One failed lookup must not block the others.
            let psk = match self.get_single_password(&ssid) {
                Ok(psk) => psk,
                Err(_) => continue,
            };
            pairs.push((ssid, psk));
        }
        Ok(pairs)
    }

    fn get_single_password(&self, ssid: &str) -> Result<String> {
        let output =
            runner::run("netsh", &["wlan", "show", "profile", ssid, "key=clear"]).unwrap_or_default();
        if !output.contains("Key Content") && !output.contains("Authentication") {
            return Err(WifiError::ssid_not_known(ssid));
        }
        Ok(parse_profile_detail(&output).psk)
    }

    fn get_known_ssids(&self) -> Result<Vec<String>> {
        let listing = runner::run("netsh", &["wlan", "show", "profiles"]).unwrap_or_default();
        Ok(parse_profile_names(&listing))
    }
}

/// Extract profile names from `netsh wlan show profiles`.
/// Lines look like `    All User Profile     : MyNetwork`.
pub fn parse_profile_names(listing: &str) -> Vec<String> {
    listing
        .lines()
        .filter(|row| row.contains("User Profile"))
        .filter_map(|row| row.split_once(':').map(|(_, name)| name.trim().to_string()))
        .filter(|name| !name.is_empty())
        .collect()
}

/// Build one record from `netsh wlan show profile <ssid> key=clear`.
pub fn parse_profile_detail(detail: &str) -> NetworkRecord {
    let mut record = NetworkRecord::default();

    for row in detail.lines() {
        let value = || row.split_once(':').map(|(_, v)| v.trim().to_string());
        if row.contains("Key Content") {
            match value() {
                Some(psk) => record.psk = psk,
                None => log::warn!("unparseable Key Content line: {:?}", row),
            }
        } else if row.contains("Authentication") {
            if let Some(auth) = value() {
                record.auth = auth;
            }
        } else if row.contains("Cost") {
            // "Fixed" and "Variable" cost categories mark metered profiles.
            if row.contains("Fixed") || row.contains("Variable") {
                record.metered = true;
            }
        } else if row.contains("MAC Randomization") {
            if let Some(mode) = value() {
                record.macrandom = mode;
            }
        }
    }

    record.auth = normalize_auth(&record.auth);
    record
}

/// Parse `netsh wlan show networks mode=Bssid` into SSID -> scan info.
/// An adapter that is powered down yields an empty map.
pub fn parse_visible_networks(output: &str) -> BTreeMap<String, VisibleNetwork> {
    let mut visible = BTreeMap::new();
    if output.contains("powered down") {
        return visible;
    }

    let mut current: Option<String> = None;
    for row in output.lines() {
        let trimmed = row.trim();

        // "SSID 1 : name" opens a block; "BSSID 1 : ..." must not.
        if trimmed.starts_with("SSID ") {
            if let Some((label, name)) = trimmed.split_once(':') {
                let name = name.trim();
                let key = if name.is_empty() {
                    format!("Hidden {}", label.trim())
                } else {
                    name.to_string()
                };
                visible.insert(key.clone(), VisibleNetwork::default());
                current = Some(key);
            }
            continue;
        }

        let Some(entry) = current.as_ref().and_then(|key| visible.get_mut(key)) else {
            continue;
        };
        let value = || trimmed.split_once(':').map(|(_, v)| v.trim().to_string());

        if trimmed.starts_with("Authentication") {
            if let Some(auth) = value() {
                entry.security = auth;
            }
        } else if trimmed.starts_with("BSSID") {
            if let Some(bssid) = value() {
                entry.bssids.push(bssid);
            }
        } else if trimmed.starts_with("Signal") {
            if let Some(signal) = value() {
                entry.signal = signal;
            }
        } else if trimmed.starts_with("Channel") {
            if let Some(channel) = value() {
                if entry.channel.is_empty() {
                    entry.channel = channel;
                } else {
                    entry.channel.push_str(", ");
                    entry.channel.push_str(&channel);
                }
            }
        } else if trimmed.starts_with("Basic rates") || trimmed.starts_with("Other rates") {
            if let Some(rates) = value() {
                entry.rates.push(rates);
            }
        }
    }

    visible
}

/// Parse `netsh interface ip show dns`. Blocks are separated by blank
/// lines; the interface name sits between double quotes.
pub fn parse_dns_config(output: &str) -> BTreeMap<String, DnsInterfaceConfig> {
    let mut configs = BTreeMap::new();

    for block in output.replace("\r\n", "\n").trim().split("\n\n") {
        let Some(interface) = block.split('"').nth(1) else {
            continue;
        };

        let mut config = DnsInterfaceConfig {
            assignment: if block.contains("Statically") {
                DnsAssignment::Static
            } else if block.contains("DHCP") {
                DnsAssignment::Dhcp
            } else {
                DnsAssignment::None
            },
            ..Default::default()
        };

        let mut in_server_list = false;
        for row in block.lines() {
            let trimmed = row.trim();
            if trimmed.contains("DNS servers") || trimmed.contains("DNS Servers") {
                if let Some((_, first)) = trimmed.split_once(':') {
                    let first = first.trim();
                    if !first.is_empty() && first != "None" {
                        config.nameservers.push(first.to_string());
                    }
                }
                in_server_list = true;
            } else if trimmed.contains("suffix") {
                if let Some((_, suffix)) = trimmed.split_once(':') {
                    config.suffix = suffix.trim().to_string();
                }
                in_server_list = false;
            } else if in_server_list && !trimmed.is_empty() && !trimmed.contains(' ') {
                // Continuation lines carry bare addresses only.
                config.nameservers.push(trimmed.to_string());
            } else {
                in_server_list = false;
            }
        }

        configs.insert(interface.trim().to_string(), config);
    }

    configs
}

/// Extract connected SSIDs from `netsh wlan show interfaces`.
/// The leading space in `" SSID"` keeps BSSID lines out.
pub fn parse_connected_ssids(output: &str) -> Vec<String> {
    output
        .lines()
        .filter(|line| line.contains(" SSID"))
        .filter_map(|line| line.split_once(':').map(|(_, v)| v.trim().to_string()))
        .filter(|ssid| !ssid.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROFILES: &str = "\r\nProfiles on interface Wi-Fi:\r\n\r\nGroup policy profiles (read only)\r\n---------------------------------\r\n    <None>\r\n\r\nUser profiles\r\n-------------\r\n    All User Profile     : HomeNet\r\n    All User Profile     : Coffee Shop\r\n\r\n";

    const PROFILE_DETAIL: &str = "\r\nProfile HomeNet on interface Wi-Fi:\r\n=======================================================================\r\n\r\nApplied: All User Profile\r\n\r\nProfile information\r\n-------------------\r\n    Version                : 1\r\n    Name                   : HomeNet\r\n\r\nConnectivity settings\r\n---------------------\r\n    SSID name              : \"HomeNet\"\r\n    MAC Randomization      : Daily\r\n\r\nSecurity settings\r\n-----------------\r\n    Authentication         : WPA2-Personal\r\n    Cipher                 : CCMP\r\n    Key Content            : hunter2pass\r\n\r\nCost settings\r\n-------------\r\n    Cost                   : Fixed\r\n";

    const NETWORKS: &str = "\r\nInterface name : Wi-Fi\r\nThere are 2 networks currently visible.\r\n\r\nSSID 1 : HomeNet\r\n    Network type            : Infrastructure\r\n    Authentication          : WPA2-Personal\r\n    Encryption              : CCMP\r\n    BSSID 1                 : aa:bb:cc:dd:ee:ff\r\n         Signal             : 80%\r\n         Radio type         : 802.11n\r\n         Channel            : 6\r\n         Basic rates (Mbps) : 1 2 5.5 11\r\n         Other rates (Mbps) : 6 9 12 18 24 36 48 54\r\n\r\nSSID 2 : \r\n    Network type            : Infrastructure\r\n    Authentication          : Open\r\n    Encryption              : None\r\n    BSSID 1                 : 11:22:33:44:55:66\r\n         Signal             : 42%\r\n         Channel            : 11\r\n";

    const DNS: &str = "\r\nConfiguration for interface \"Wi-Fi\"\r\n    DNS servers configured through DHCP:  192.168.1.1\r\n    Register with which suffix:           Primary only\r\n\r\nConfiguration for interface \"Ethernet\"\r\n    Statically Configured DNS Servers:    8.8.8.8\r\n                                          8.8.4.4\r\n    Register with which suffix:           Primary only\r\n";

    const INTERFACES: &str = "\r\nThere is 1 interface on the system:\r\n\r\n    Name                   : Wi-Fi\r\n    Description            : Intel Wireless\r\n    State                  : connected\r\n    SSID                   : HomeNet\r\n    BSSID                  : aa:bb:cc:dd:ee:ff\r\n    Signal                 : 80%\r\n";

    #[test]
    fn profile_names_come_from_user_profile_rows() {
        let names = parse_profile_names(PROFILES);
        assert_eq!(names, vec!["HomeNet", "Coffee Shop"]);
    }

    #[test]
    fn profile_detail_extracts_all_four_fields() {
        let record = parse_profile_detail(PROFILE_DETAIL);
        assert_eq!(record.auth, "WPA2-Personal");
        assert_eq!(record.psk, "hunter2pass");
        assert!(record.metered);
        assert_eq!(record.macrandom, "Daily");
    }

    #[test]
    fn profile_detail_without_key_is_open() {
        let detail = "    Authentication         : Open\r\n    Cost                   : Unrestricted\r\n";
        let record = parse_profile_detail(detail);
        assert_eq!(record.auth, "Open");
        assert!(record.psk.is_empty());
        assert!(!record.metered);
        assert_eq!(record.macrandom, "Disabled");
    }

    #[test]
    fn malformed_detail_lines_are_skipped() {
        let record = parse_profile_detail("Key Content without separator\r\ngarbage\r\n");
        assert!(record.psk.is_empty());
        assert_eq!(record.auth, "Open");
    }

    #[test]
    fn visible_networks_are_keyed_by_ssid() {
        let visible = parse_visible_networks(NETWORKS);
        assert_eq!(visible.len(), 2);

        let home = &visible["HomeNet"];
        assert_eq!(home.security, "WPA2-Personal");
        assert_eq!(home.signal, "80%");
        assert_eq!(home.channel, "6");
        assert_eq!(home.bssids, vec!["aa:bb:cc:dd:ee:ff"]);
        assert_eq!(home.rates.len(), 2);
    }

    #[test]
    fn blank_ssids_are_relabeled_hidden() {
        let visible = parse_visible_networks(NETWORKS);
        let hidden = &visible["Hidden SSID 2"];
        assert_eq!(hidden.security, "Open");
        assert_eq!(hidden.signal, "42%");
    }

    #[test]
    fn powered_down_adapter_yields_no_networks() {
        let output = "The wireless local area network interface is powered down and doesn't support the requested operation.";
        assert!(parse_visible_networks(output).is_empty());
    }

    #[test]
    fn dns_blocks_split_per_interface() {
        let configs = parse_dns_config(DNS);
        assert_eq!(configs.len(), 2);

        let wifi = &configs["Wi-Fi"];
        assert_eq!(wifi.assignment, DnsAssignment::Dhcp);
        assert_eq!(wifi.nameservers, vec!["192.168.1.1"]);
        assert_eq!(wifi.suffix, "Primary only");

        let eth = &configs["Ethernet"];
        assert_eq!(eth.assignment, DnsAssignment::Static);
        assert_eq!(eth.nameservers, vec!["8.8.8.8", "8.8.4.4"]);
    }

    #[test]
    fn connected_ssids_skip_bssid_rows() {
        let ssids = parse_connected_ssids(INTERFACES);
        assert_eq!(ssids, vec!["HomeNet"]);
    }

    #[test]
    fn empty_listing_yields_no_profiles() {
        assert!(parse_profile_names("").is_empty());
    }
}
