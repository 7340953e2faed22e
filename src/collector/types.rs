use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A saved network profile, normalized across platforms.
///
/// `psk` is carried in clear text: both export formats exist to reconfigure
/// WiFi on another device and must contain the real key. Treat any file
/// produced from this type as sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkRecord {
    /// Authentication label as reported by the source tool,
    /// e.g. "Open", "WPA2-Personal", "wpa-psk".
    pub auth: String,
    /// Pre-shared key, empty for open networks or when the calling
    /// process lacks privilege to read secrets.
    pub psk: String,
    /// Metered/constrained connection flag.
    pub metered: bool,
    /// MAC randomization mode. Vocabulary is collector-dependent
    /// (Disabled, Enabled, Daily, random, stable, ...).
    pub macrandom: String,
}

impl Default for NetworkRecord {
    fn default() -> Self {
        NetworkRecord {
            auth: String::new(),
            psk: String::new(),
            metered: false,
            macrandom: MAC_RANDOM_DISABLED.to_string(),
        }
    }
}

/// Canonical label for networks with no key material.
pub const AUTH_OPEN: &str = "Open";
/// Default MAC randomization mode when the source does not expose one.
pub const MAC_RANDOM_DISABLED: &str = "Disabled";

/// The unit of export/import: SSID -> record.
pub type NetworkMap = BTreeMap<String, NetworkRecord>;

/// A network visible in a scan. Transient, per-call; fields the
/// collector cannot supply are left empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VisibleNetwork {
    pub security: String,
    pub channel: String,
    pub signal: String,
    pub bssids: Vec<String>,
    pub rates: Vec<String>,
}

/// How an interface gets its nameservers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum DnsAssignment {
    Static,
    Dhcp,
    #[default]
    None,
}

impl std::fmt::Display for DnsAssignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DnsAssignment::Static => write!(f, "Static"),
            DnsAssignment::Dhcp => write!(f, "DHCP"),
            DnsAssignment::None => write!(f, "None"),
        }
    }
}

/// DNS configuration of one network interface. Transient, per-call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DnsInterfaceConfig {
    pub assignment: DnsAssignment,
    pub nameservers: Vec<String>,
    pub suffix: String,
}

/// Map an empty or explicit none/open label to the canonical "Open" label;
/// anything else passes through untouched.
pub fn normalize_auth(label: &str) -> String {
    let trimmed = label.trim();
    if trimmed.is_empty()
        || trimmed.eq_ignore_ascii_case("none")
        || trimmed.eq_ignore_ascii_case("open")
    {
        AUTH_OPEN.to_string()
    } else {
        trimmed.to_string()
    }
}
