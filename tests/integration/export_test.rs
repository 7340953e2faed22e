use std::fs;
use std::time::Duration;
use tempfile::TempDir;
use wifikeys::collector::dummy;
use wifikeys::collector::types::{NetworkMap, NetworkRecord};
use wifikeys::export;

fn record(auth: &str, psk: &str) -> NetworkRecord {
    NetworkRecord {
        auth: auth.to_string(),
        psk: psk.to_string(),
        ..Default::default()
    }
}

#[test]
fn json_round_trips_generated_data() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("networks_data.json");

    let data = dummy::generate(Duration::ZERO, 10);
    export::save_json(&path, &data).unwrap();

    let parsed: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    let object = parsed.as_object().unwrap();
    assert_eq!(object.len(), 10);
    for entry in object.values() {
        let entry = entry.as_object().unwrap();
        assert_eq!(entry.len(), 4);
        assert!(entry["auth"].is_string());
        assert!(entry["psk"].is_string());
        assert!(entry["metered"].is_boolean());
        assert!(entry["macrandom"].is_string());
    }

    assert_eq!(export::json::load_json(&path).unwrap(), data);
}

#[test]
fn json_round_trips_the_empty_map() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("networks_data.json");

    export::save_json(&path, &NetworkMap::new()).unwrap();
    assert!(export::json::load_json(&path).unwrap().is_empty());
}

#[test]
fn supplicant_file_reflects_source_records_exactly() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("wpa_supplicant.conf");

    let mut data = NetworkMap::new();
    data.insert("HomeNet".to_string(), record("WPA2-Personal", "hunter2pass"));
    data.insert("Open Cafe".to_string(), record("Open", ""));
    data.insert("Office".to_string(), record("WPA3-Enterprise", ""));

    export::save_wpa_supplicant(&path, &data, true, "GB").unwrap();
    let conf = fs::read_to_string(&path).unwrap();

    assert!(conf.contains("\tssid=\"HomeNet\"\n\tpsk=\"hunter2pass\"\n\tkey_mgmt=WPA-PSK\n"));
    assert!(conf.contains("\tssid=\"Open Cafe\"\n\tkey_mgmt=NONE\n"));
    // Unsupported auth labels get neither stanza form.
    assert!(!conf.contains("ssid=\"Office\""));
}

#[test]
fn supplicant_open_networks_are_excluded_without_the_flag() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("wpa_supplicant.conf");

    let mut data = NetworkMap::new();
    data.insert("Open Cafe".to_string(), record("Open", ""));

    export::save_wpa_supplicant(&path, &data, false, "GB").unwrap();
    let conf = fs::read_to_string(&path).unwrap();
    assert!(!conf.contains("Open Cafe"));
}

#[test]
fn supplicant_export_of_empty_map_is_header_only() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("wpa_supplicant.conf");

    export::save_wpa_supplicant(&path, &NetworkMap::new(), true, "GB").unwrap();
    let conf = fs::read_to_string(&path).unwrap();

    assert!(conf.contains("ctrl_interface=DIR=/var/run/wpa_supplicant GROUP=netdev"));
    assert!(conf.contains("update_config=1"));
    assert!(conf.contains("country=GB"));
    assert!(!conf.contains("network={"));
}

#[test]
fn exports_overwrite_existing_files() {
    let dir = TempDir::new().unwrap();
    let json_path = dir.path().join("networks_data.json");
    let conf_path = dir.path().join("wpa_supplicant.conf");
    fs::write(&json_path, "old").unwrap();
    fs::write(&conf_path, "old").unwrap();

    export::save_json(&json_path, &NetworkMap::new()).unwrap();
    export::save_wpa_supplicant(&conf_path, &NetworkMap::new(), true, "GB").unwrap();

    assert_eq!(fs::read_to_string(&json_path).unwrap(), "{}");
    assert!(!fs::read_to_string(&conf_path).unwrap().contains("old"));
}
