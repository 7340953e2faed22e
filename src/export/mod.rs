//! Export formats for the collected network map.
//!
//! Both formats write pre-shared keys in clear text by design: they
//! exist to move credentials onto another device. Handle the output
//! files accordingly.

pub mod json;
pub mod supplicant;

pub use json::save_json;
pub use supplicant::save_wpa_supplicant;

/// Default file name for the JSON interchange document.
pub const JSON_FILE_NAME: &str = "networks_data.json";
/// Default file name for the supplicant configuration.
pub const SUPPLICANT_FILE_NAME: &str = "wpa_supplicant.conf";
