mod file;

use std::collections::{BTreeMap, BTreeSet};
use std::io;

use log::{info, warn};

use crate::models::AddressFamily;

/// In-memory representation of the static constants document. Loaded once
/// at startup and read-only afterwards.
#[derive(Debug, Default)]
pub struct Constants {
    pub bgp: Option<BgpConstants>,
}

#[derive(Debug, Default)]
pub struct BgpConstants {
    pub bbr: Option<BbrConstants>,
    pub peers: Option<BTreeMap<String, PeerConstants>>,
}

#[derive(Debug)]
pub struct BbrConstants {
    pub enabled: bool,
    pub default_state: Option<String>,
}

#[derive(Debug)]
pub struct PeerConstants {
    pub bbr: Option<BTreeMap<String, BTreeSet<AddressFamily>>>,
}

impl Constants {
    /// Parse a TOML constants file
    pub fn from_file(path: &str) -> io::Result<Constants> {
        let spec = file::ConstantsSpec::from_file(path)?;
        Ok(Constants::from_spec(spec))
    }

    /// Parse a TOML constants document held in memory
    pub fn from_toml(doc: &str) -> io::Result<Constants> {
        let spec =
            toml::from_str(doc).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
        Ok(Constants::from_spec(spec))
    }

    fn from_spec(spec: file::ConstantsSpec) -> Self {
        let bgp = spec.bgp.map(|bgp| BgpConstants {
            bbr: bgp.bbr.map(|bbr| BbrConstants {
                enabled: bbr.enabled,
                default_state: bbr.default_state,
            }),
            peers: bgp.peers.map(|peers| {
                peers
                    .into_iter()
                    .map(|(name, peer)| {
                        (
                            name,
                            PeerConstants {
                                bbr: peer.bbr.map(family_table),
                            },
                        )
                    })
                    .collect()
            }),
        });
        Constants { bgp }
    }

    /// Peer-group -> address-family table collected from the static "peers"
    /// declarations carrying a bbr sub-declaration
    pub fn bbr_peer_groups(&self) -> BTreeMap<String, BTreeSet<AddressFamily>> {
        let peers = match self.bgp.as_ref().and_then(|bgp| bgp.peers.as_ref()) {
            Some(peers) => peers,
            None => {
                info!("No 'peers' section was found in the constants");
                return BTreeMap::new();
            }
        };
        let mut table = BTreeMap::new();
        for peer in peers.values() {
            if let Some(bbr) = &peer.bbr {
                for (name, families) in bbr {
                    table.insert(name.clone(), families.clone());
                }
            }
        }
        table
    }
}

fn family_table(
    table: BTreeMap<String, Vec<String>>,
) -> BTreeMap<String, BTreeSet<AddressFamily>> {
    table
        .into_iter()
        .map(|(name, families)| {
            let families = families
                .iter()
                .filter_map(|family| match family.parse() {
                    Ok(family) => Some(family),
                    Err(_) => {
                        warn!(
                            "Ignoring unsupported address family '{}' for peer-group '{}'",
                            family, name
                        );
                        None
                    }
                })
                .collect();
            (name, families)
        })
        .collect()
}
