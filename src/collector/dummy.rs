//! Synthetic network data for exercising exports and formatting without
//! OS privilege or any saved profiles.

use crate::collector::types::{NetworkMap, NetworkRecord};
use rand::distr::{Alphanumeric, SampleString};
use rand::prelude::*;
use std::time::Duration;

const MAC_RANDOM_MODES: [&str; 3] = ["Disabled", "Enabled", "Daily"];

/// Generate `quantity` synthetic profiles, split evenly between
/// WPA2-Personal entries (non-empty random PSK) and open entries
/// (empty PSK). Odd quantities round the WPA half up.
///
/// `delay` emulates the wall-clock cost of a real netsh/nmcli round trip.
pub fn generate(delay: Duration, quantity: usize) -> NetworkMap {
    std::thread::sleep(delay);

    let mut rng = rand::rng();
    let mut map = NetworkMap::new();

    let wpa_count = quantity.div_ceil(2);
    for n in 1..=wpa_count {
        let psk_len = rng.random_range(8..=16);
        map.insert(
            format!("network {}", n),
            NetworkRecord {
                auth: "WPA2-Personal".to_string(),
                psk: Alphanumeric.sample_string(&mut rng, psk_len),
                metered: rng.random_bool(0.5),
                macrandom: MAC_RANDOM_MODES.choose(&mut rng).unwrap().to_string(),
            },
        );
    }
    for n in 1..=(quantity - wpa_count) {
        map.insert(
            format!("open network {}", n),
            NetworkRecord {
                auth: "Open".to_string(),
                psk: String::new(),
                metered: rng.random_bool(0.5),
                macrandom: MAC_RANDOM_MODES.choose(&mut rng).unwrap().to_string(),
            },
        );
    }

    map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn even_quantity_splits_evenly() {
        let map = generate(Duration::ZERO, 10);
        assert_eq!(map.len(), 10);

        let wpa = map.values().filter(|n| n.auth == "WPA2-Personal").count();
        let open = map.values().filter(|n| n.auth == "Open").count();
        assert_eq!(wpa, 5);
        assert_eq!(open, 5);
    }

    #[test]
    fn wpa_entries_have_keys_and_open_entries_do_not() {
        let map = generate(Duration::ZERO, 8);
        for record in map.values() {
            if record.auth == "WPA2-Personal" {
                assert!((8..=16).contains(&record.psk.len()));
            } else {
                assert!(record.psk.is_empty());
            }
        }
    }

    #[test]
    fn macrandom_stays_in_vocabulary() {
        let map = generate(Duration::ZERO, 12);
        for record in map.values() {
            assert!(MAC_RANDOM_MODES.contains(&record.macrandom.as_str()));
        }
    }

    #[test]
    fn zero_quantity_is_empty() {
        assert!(generate(Duration::ZERO, 0).is_empty());
    }
}
