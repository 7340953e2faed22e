use crate::collector::types::NetworkMap;
use crate::error::Result;
use std::fs;
use std::path::Path;

/// Serialize the network map verbatim to a JSON document
/// (SSID -> {auth, psk, metered, macrandom}), overwriting `path`
/// unconditionally. Keys are written in clear text.
pub fn save_json(path: &Path, data: &NetworkMap) -> Result<()> {
    let file = fs::File::create(path)?;
    serde_json::to_writer(file, data)?;
    Ok(())
}

/// Parse a document produced by [`save_json`] back into a map.
/// Round-trip law: `load_json(save_json(m)) == m` for any map.
pub fn load_json(path: &Path) -> Result<NetworkMap> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}
