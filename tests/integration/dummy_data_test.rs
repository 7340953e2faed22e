use std::time::Duration;
use wifikeys::collector::{dummy, Collector, NetworkManagerCollector};

#[test]
fn dummy_data_splits_evenly_for_any_even_quantity() {
    for quantity in [2, 4, 10, 20, 50] {
        let data = dummy::generate(Duration::ZERO, quantity);
        assert_eq!(data.len(), quantity);

        let wpa = data.values().filter(|n| n.auth == "WPA2-Personal").count();
        let open = data.values().filter(|n| n.auth == "Open").count();
        assert_eq!(wpa, quantity / 2);
        assert_eq!(open, quantity / 2);
    }
}

#[test]
fn dummy_records_are_well_formed() {
    let data = dummy::generate(Duration::ZERO, 10);
    for (ssid, record) in &data {
        assert!(!ssid.is_empty());
        assert!(["Disabled", "Enabled", "Daily"].contains(&record.macrandom.as_str()));
        match record.auth.as_str() {
            "WPA2-Personal" => assert!(!record.psk.is_empty()),
            "Open" => assert!(record.psk.is_empty()),
            other => panic!("unexpected auth label {:?}", other),
        }
    }
}

#[test]
fn dummy_call_honors_the_requested_delay() {
    let start = std::time::Instant::now();
    dummy::generate(Duration::from_millis(50), 2);
    assert!(start.elapsed() >= Duration::from_millis(50));
}

#[test]
fn collector_dummy_call_caches_like_a_real_fetch() {
    let mut collector = NetworkManagerCollector::new();
    let data = collector.get_passwords_dummy(Duration::ZERO, 4);
    assert_eq!(collector.cached_data(), &data);

    // A later call replaces the cache wholesale.
    let replacement = collector.get_passwords_dummy(Duration::ZERO, 2);
    assert_eq!(collector.cached_data().len(), 2);
    assert_eq!(collector.cached_data(), &replacement);
}
