//! Collector for Linux hosts managed by NetworkManager, scraping
//! `nmcli -t` (terse) output. Terse mode separates fields with `:` and
//! backslash-escapes colons inside values.

use crate::collector::pool;
use crate::collector::runner;
use crate::collector::types::{
    normalize_auth, DnsAssignment, DnsInterfaceConfig, NetworkMap, NetworkRecord, VisibleNetwork,
    AUTH_OPEN,
};
use crate::collector::Collector;
use crate::error::{Result, WifiError};
use std::collections::BTreeMap;

/// NetworkManager's saved-connection directory. Its presence is how the
/// factory decides NetworkManager is configured on this host.
pub const NM_CONNECTIONS_DIR: &str = "/etc/NetworkManager/system-connections";

const REQUIRES_NM: &str = "Requires NetworkManager.";

const SECRET_FIELDS: &str = "802-11-wireless-security.key-mgmt,\
802-11-wireless-security.psk,connection.metered,802-11-wireless.cloned-mac-address";

#[derive(Debug, Default)]
pub struct NetworkManagerCollector {
    data: NetworkMap,
}

impl NetworkManagerCollector {
    pub fn new() -> Self {
        Self::default()
    }

    fn show_profile(ssid: &str) -> NetworkRecord {
        match runner::run(
            "nmcli",
            &["-t", "-f", SECRET_FIELDS, "c", "s", ssid, "--show-secrets"],
        ) {
            Ok(output) => parse_profile_detail(&output),
            Err(_) => {
                log::warn!("could not query profile {:?}", ssid);
                open_default()
            }
        }
    }
}

impl Collector for NetworkManagerCollector {
    fn get_passwords(&mut self) -> Result<NetworkMap> {
        let listing = runner::run("nmcli", &["-t", "-f", "NAME,TYPE", "c"]).unwrap_or_default();
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
        let output = runner::run(
            "nmcli",
            &["-t", "-f", "SSID,CHAN,RATE,SIGNAL,SECURITY", "dev", "wifi"],
        )
        .unwrap_or_default();
        Ok(parse_visible_networks(&output))
    }

    fn get_visible_networks_text(&self) -> Result<String> {
        let output = match runner::run(
            "nmcli",
            &["-t", "-f", "SSID,CHAN,RATE,SIGNAL,SECURITY", "dev", "wifi"],
        ) {
            Ok(output) => output,
            Err(_) => return Ok(REQUIRES_NM.to_string()),
        };

        let visible = parse_visible_networks(&output);
        let mut text = format!("There are {} networks visible.\n ----- \n", visible.len());
        for (ssid, info) in &visible {
            text.push_str(&format!(
                "{} \n Channel: {} \n Rate: {} \n Signal: {}% \n Security: {} \n\n",
                ssid,
                info.channel,
                info.rates.join(", "),
                info.signal,
                info.security
            ));
        }
        Ok(text)
    }

    fn get_dns_config(&self) -> Result<BTreeMap<String, DnsInterfaceConfig>> {
        let mut configs = BTreeMap::new();

        let devices = runner::run("nmcli", &["-t", "-f", "DEVICE,CONNECTION", "dev"])
            .unwrap_or_default();
        for row in devices.lines() {
            let fields = split_terse(row);
            if fields.len() != 2 {
                continue;
            }
            let (device, connection) = (fields[0].clone(), fields[1].clone());

            let interface_data = runner::run(
                "nmcli",
                &["-t", "-f", "IP4.DNS,IP4.DOMAIN", "device", "show", &device],
            )
            .unwrap_or_default();
            let profile_data = if connection.is_empty() {
                String::new()
            } else {
                runner::run(
                    "nmcli",
                    &["-t", "-f", "ipv4.dns,ipv4.ignore-auto-dns", "c", "s", &connection],
                )
                .unwrap_or_default()
            };

            configs.insert(device, parse_dns_entry(&interface_data, &profile_data));
        }

        Ok(configs)
    }

    fn get_dns_config_text(&self) -> Result<String> {
        let configs = self.get_dns_config()?;
        if configs.is_empty() {
            return Ok(REQUIRES_NM.to_string());
        }

        let mut text = String::new();
        for (interface, config) in &configs {
            text.push_str(&format!(
                "Interface: {} \n type: {} \n DNS: {} \n domain: {}\n\n",
                interface,
                config.assignment,
                config.nameservers.join(", "),
                config.suffix
            ));
        }
        Ok(text)
    }

    fn get_currently_connected_ssids(&self) -> Result<Vec<String>> {
        let output = runner::run("nmcli", &["-t", "d"]).unwrap_or_default();
        Ok(parse_connected_ssids(&output))
    }

    fn get_currently_connected_passwords(&self) -> Result<Vec<(String, String)>> {
        let mut pairs = Vec::new();
        for ssid in self.get_currently_connected_ssids()? {
            let output = runner::run(
                "nmcli",
                &[
                    "-t",
                    "-f",
                    "802-11-wireless-security.psk",
                    "c",
                    "s",
                    &ssid,
                    "--show-secrets",
                ],
            )
            .unwrap_or_default();
            if output.is_empty() {
                continue;
            }
            pairs.push((ssid, parse_psk(&output)));
        }
        Ok(pairs)
    }

    fn get_single_password(&self, ssid: &str) -> Result<String> {
        let output = runner::run(
            "nmcli",
            &[
                "-t",
                "-f",
                "802-11-wireless-security.psk,connection.id",
                "c",
                "s",
                ssid,
                "--show-secrets",
            ],
        )
        .unwrap_or_default();

        // nmcli prints nothing at all for an unknown connection name.
        if output.trim().is_empty() {
            return Err(WifiError::ssid_not_known(ssid));
        }
        Ok(parse_psk(&output))
    }

    fn get_known_ssids(&self) -> Result<Vec<String>> {
        let listing = runner::run("nmcli", &["-t", "-f", "NAME,TYPE", "c"]).unwrap_or_default();
        Ok(parse_profile_names(&listing))
    }
}

fn open_default() -> NetworkRecord {
    NetworkRecord {
        auth: AUTH_OPEN.to_string(),
        ..Default::default()
    }
}

/// Split one terse nmcli row on unescaped colons and unescape the fields.
pub fn split_terse(row: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut escaped = false;

    for ch in row.chars() {
        if escaped {
            field.push(ch);
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else if ch == ':' {
            fields.push(std::mem::take(&mut field));
        } else {
            field.push(ch);
        }
    }
    fields.push(field);
    fields
}

/// Profile names from `nmcli -t -f NAME,TYPE c`, wifi connections only.
pub fn parse_profile_names(listing: &str) -> Vec<String> {
    listing
        .lines()
        .filter(|row| row.contains("802-11-wireless"))
        .map(split_terse)
        .filter(|fields| !fields.is_empty() && !fields[0].is_empty())
        .map(|fields| fields[0].clone())
        .collect()
}

/// One record from the per-profile `--show-secrets` query. Everything
/// defaults to an open network; recognized labels overwrite.
pub fn parse_profile_detail(detail: &str) -> NetworkRecord {
    let mut record = open_default();

    for row in detail.lines() {
        let Some((label, value)) = row.split_once(':') else {
            continue;
        };
        match label {
            "802-11-wireless-security.key-mgmt" => record.auth = normalize_auth(value),
            "802-11-wireless-security.psk" => record.psk = value.to_string(),
            "connection.metered" => record.metered = value.contains("yes"),
            "802-11-wireless.cloned-mac-address" => {
                if !value.is_empty() {
                    record.macrandom = value.to_string();
                }
            }
            _ => {}
        }
    }

    record
}

fn parse_psk(output: &str) -> String {
    output
        .lines()
        .find_map(|row| row.strip_prefix("802-11-wireless-security.psk:"))
        .unwrap_or_default()
        .to_string()
}

/// Scan rows from `nmcli -t -f SSID,CHAN,RATE,SIGNAL,SECURITY dev wifi`.
pub fn parse_visible_networks(output: &str) -> BTreeMap<String, VisibleNetwork> {
    let mut visible = BTreeMap::new();

    for row in output.lines() {
        let fields = split_terse(row);
        if fields.len() < 5 {
            continue;
        }
        let ssid = if fields[0].is_empty() {
            "Hidden".to_string()
        } else {
            fields[0].clone()
        };
        visible.insert(
            ssid,
            VisibleNetwork {
                security: fields[4].clone(),
                channel: fields[1].clone(),
                signal: fields[3].clone(),
                bssids: Vec::new(),
                rates: vec![fields[2].clone()],
            },
        );
    }

    visible
}

/// Merge the two per-interface nmcli outputs into one DNS entry.
/// `interface_data` carries IP4.DNS/IP4.DOMAIN rows, `profile_data`
/// carries ipv4.ignore-auto-dns.
pub fn parse_dns_entry(interface_data: &str, profile_data: &str) -> DnsInterfaceConfig {
    let mut config = DnsInterfaceConfig::default();

    for row in interface_data.lines() {
        let Some((label, value)) = row.split_once(':') else {
            continue;
        };
        if label.starts_with("IP4.DNS") && !value.is_empty() {
            config.nameservers.push(value.to_string());
        } else if label.starts_with("IP4.DOMAIN") {
            config.suffix = value.to_string();
        }
    }

    for row in profile_data.lines() {
        let Some((label, value)) = row.split_once(':') else {
            continue;
        };
        if label == "ipv4.ignore-auto-dns" {
            if value == "yes" {
                config.assignment = DnsAssignment::Static;
            } else if value == "no" && !config.nameservers.is_empty() {
                config.assignment = DnsAssignment::Dhcp;
            }
        }
    }

    config
}

/// Connected SSIDs from `nmcli -t d` rows: DEVICE:TYPE:STATE:CONNECTION.
pub fn parse_connected_ssids(output: &str) -> Vec<String> {
    output
        .lines()
        .map(split_terse)
        .filter(|fields| {
            fields.len() >= 4 && fields[1] == "wifi" && fields[2] == "connected"
        })
        .map(|fields| fields[3].clone())
        .collect()
}
