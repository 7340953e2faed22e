//! Renders the collected map as a wpa_supplicant.conf usable to
//! reconfigure WiFi on another (typically Linux) device.

use crate::collector::types::NetworkMap;
use crate::error::Result;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// Open stanzas get a strongly negative priority so a device holding
/// this file prefers every keyed network first.
const OPEN_NETWORK_PRIORITY: i32 = -999;

/// Render and write the supplicant file. PSKs are written in clear
/// text - that is the file's purpose. Overwrites `path` unconditionally,
/// LF line endings.
///
/// Networks whose auth label is neither WPA-personal nor open cannot be
/// expressed by the two stanza templates; they are listed in a trailing
/// comment block and logged instead of silently vanishing.
pub fn save_wpa_supplicant(
    path: &Path,
    data: &NetworkMap,
    include_open: bool,
    locale: &str,
) -> Result<()> {
    fs::write(path, render(data, include_open, locale))?;
    Ok(())
}

/// Pure renderer behind [`save_wpa_supplicant`].
pub fn render(data: &NetworkMap, include_open: bool, locale: &str) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "# Generated by {} {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );
    let _ = writeln!(out, "# Created: {}", chrono::Local::now());
    let _ = writeln!(out, "# Device: {} {} - {}", os_name(), os_version(), host_name());
    let _ = writeln!(out, "# Detected country code: {}", locale);
    out.push('\n');
    out.push_str("ctrl_interface=DIR=/var/run/wpa_supplicant GROUP=netdev\n");
    out.push_str("update_config=1\n");
    let _ = writeln!(out, "country={}", locale);
    out.push('\n');

    out.push_str("# ######## WPA ########\n");
    for (ssid, network) in data {
        if is_wpa_personal(&network.auth) {
            out.push_str("network={\n");
            let _ = writeln!(out, "\tssid=\"{}\"", ssid);
            let _ = writeln!(out, "\tpsk=\"{}\"", network.psk);
            out.push_str("\tkey_mgmt=WPA-PSK\n");
            let _ = writeln!(out, "\tid_str=\"{}\"", ssid);
            out.push_str("}\n");
        }
    }
    out.push('\n');

    if include_open {
        out.push_str("# ######## OPEN ########\n");
        for (ssid, network) in data {
            if is_open(&network.auth) {
                out.push_str("network={\n");
                let _ = writeln!(out, "\tssid=\"{}\"", ssid);
                out.push_str("\tkey_mgmt=NONE\n");
                let _ = writeln!(out, "\tid_str=\"{}\"", ssid);
                let _ = writeln!(out, "\tpriority={}", OPEN_NETWORK_PRIORITY);
                out.push_str("}\n");
            }
        }
    }

    let skipped: Vec<(&String, &String)> = data
        .iter()
        .filter(|(_, network)| !is_wpa_personal(&network.auth) && !is_open(&network.auth))
        .map(|(ssid, network)| (ssid, &network.auth))
        .collect();
    if !skipped.is_empty() {
        out.push('\n');
        out.push_str("# ######## SKIPPED (unsupported auth) ########\n");
        for (ssid, auth) in skipped {
            log::warn!("cannot express auth {:?} for {:?} in a supplicant stanza", auth, ssid);
            let _ = writeln!(out, "# {}: {}", ssid, auth);
        }
    }

    out
}

fn is_wpa_personal(auth: &str) -> bool {
    auth.eq_ignore_ascii_case("WPA2-Personal") || auth.eq_ignore_ascii_case("wpa-psk")
}

fn is_open(auth: &str) -> bool {
    auth.is_empty() || auth == "Open"
}

fn os_name() -> String {
    sysinfo::System::name().unwrap_or_else(|| std::env::consts::OS.to_string())
}

fn os_version() -> String {
    sysinfo::System::os_version().unwrap_or_default()
}

fn host_name() -> String {
    sysinfo::System::host_name().unwrap_or_else(|| "unknown".to_string())
}
