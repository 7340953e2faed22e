use wifikeys::collector::{self, Collector as _};
use wifikeys::WifiError;

// The single-password lookup is the one operation with an explicit error
// contract: a name with no matching profile must fail with SsidNotKnown,
// never return a value. That holds whether or not the host has the
// native tooling installed.
#[test]
fn unknown_ssid_fails_with_not_known() {
    let Ok(collector) = collector::for_host() else {
        // Host OS outside the supported set; nothing to assert here.
        return;
    };

    let result = collector.get_single_password("definitely-unknown-name");
    match result {
        Err(WifiError::SsidNotKnown(ssid)) => assert_eq!(ssid, "definitely-unknown-name"),
        other => panic!("expected SsidNotKnown, got {:?}", other),
    }
}

#[test]
fn connected_password_queries_never_error_as_a_batch() {
    let Ok(collector) = collector::for_host() else {
        return;
    };

    // Individual lookups may fail; the batch call absorbs them.
    let pairs = collector.get_currently_connected_passwords().unwrap();
    for (ssid, _psk) in pairs {
        assert!(!ssid.is_empty());
    }
}
