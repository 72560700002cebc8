use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, Read};

use serde::Deserialize;
use toml;

/// Document (toml) representation of the static constants file
#[derive(Debug, Deserialize)]
pub(super) struct ConstantsSpec {
    pub(super) bgp: Option<BgpSpec>,
}

#[derive(Debug, Deserialize)]
pub(super) struct BgpSpec {
    pub(super) bbr: Option<BbrSpec>,
    pub(super) peers: Option<BTreeMap<String, PeerSpec>>,
}

#[derive(Debug, Deserialize)]
pub(super) struct BbrSpec {
    // Whether the BBR feature is usable on this device at all
    #[serde(default)]
    pub(super) enabled: bool,
    // Initial toggle state when the config store has no persisted value
    pub(super) default_state: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct PeerSpec {
    // peer-group name -> address families BBR applies to
    pub(super) bbr: Option<BTreeMap<String, Vec<String>>>,
}

impl ConstantsSpec {
    pub(super) fn from_file(path: &str) -> io::Result<Self> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        toml::from_str(&contents).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_constants() {
        let spec = ConstantsSpec::from_file("./demos/constants.toml").unwrap();
        let bgp = spec.bgp.unwrap();
        let bbr = bgp.bbr.unwrap();
        assert!(bbr.enabled);
        assert_eq!(bbr.default_state.as_deref(), Some("disabled"));

        let peers = bgp.peers.unwrap();
        let general = peers.get("general").unwrap();
        let table = general.bbr.as_ref().unwrap();
        assert_eq!(table.get("PEER_V4").unwrap(), &vec!["ipv4".to_string()]);
        assert_eq!(table.get("PEER_V6").unwrap(), &vec!["ipv6".to_string()]);
        assert!(peers.get("voq_chassis").unwrap().bbr.is_none());
    }

    #[test]
    fn test_parse_empty_document() {
        let spec: ConstantsSpec = toml::from_str("").unwrap();
        assert!(spec.bgp.is_none());
    }

    #[test]
    fn test_parse_bbr_without_enabled() {
        let spec: ConstantsSpec = toml::from_str(
            r#"
            [bgp.bbr]
            default_state = "enabled"
            "#,
        )
        .unwrap();
        let bbr = spec.bgp.unwrap().bbr.unwrap();
        assert!(!bbr.enabled);
        assert_eq!(bbr.default_state.as_deref(), Some("enabled"));
    }
}
