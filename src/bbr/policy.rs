use std::collections::{BTreeMap, BTreeSet};

use log::{error, info};

use crate::config::Constants;
use crate::models::{AddressFamily, BbrStatus};
use crate::store::ConfigStore;

use super::{BBR_ROW_KEY, BBR_TABLE, STATUS_FIELD};

/// Outcome of the startup policy resolution. Immutable for the process
/// lifetime; only the manager's effective status changes afterwards.
#[derive(Debug)]
pub(super) struct Resolution {
    pub(super) enabled: bool,
    pub(super) peer_groups: BTreeMap<String, BTreeSet<AddressFamily>>,
    pub(super) status: BbrStatus,
}

impl Resolution {
    fn disabled() -> Self {
        Resolution {
            enabled: false,
            peer_groups: BTreeMap::new(),
            status: BbrStatus::Disabled,
        }
    }
}

/// Resolve the effective BBR state once at startup. A persisted status in the
/// config store wins over the static default, but only when static peer-group
/// declarations exist at all: the override can narrow the state, never
/// reintroduce capability.
pub(super) fn resolve(constants: &Constants, store: &mut dyn ConfigStore) -> Resolution {
    match persisted_status(store) {
        Some(status) => {
            let peer_groups = constants.bbr_peer_groups();
            if peer_groups.is_empty() {
                info!("BBR disabled: no BBR enabled peers");
                return Resolution::disabled();
            }
            info!(
                "BBR initialized and enabled from the config store. Initial state: '{}'",
                status
            );
            Resolution {
                enabled: true,
                peer_groups,
                status,
            }
        }
        None => resolve_from_constants(constants),
    }
}

fn resolve_from_constants(constants: &Constants) -> Resolution {
    let bgp = match &constants.bgp {
        Some(bgp) => bgp,
        None => {
            error!("BBR disabled: 'bgp' key is not found in the constants");
            return Resolution::disabled();
        }
    };
    let requested = bgp.bbr.as_ref().map(|bbr| bbr.enabled).unwrap_or(false);
    if !requested {
        info!("BBR disabled: no bgp.bbr.enabled in the constants");
        return Resolution::disabled();
    }
    let peer_groups = constants.bbr_peer_groups();
    if peer_groups.is_empty() {
        info!("BBR disabled: no BBR enabled peers");
        return Resolution::disabled();
    }
    let status = match bgp
        .bbr
        .as_ref()
        .and_then(|bbr| bbr.default_state.as_deref())
    {
        Some("enabled") => BbrStatus::Enabled,
        _ => BbrStatus::Disabled,
    };
    info!(
        "BBR initialized and enabled from the constants. Default state: '{}'",
        status
    );
    Resolution {
        enabled: true,
        peer_groups,
        status,
    }
}

/// Read the persisted toggle value. Store trouble and an absent row are
/// treated the same: fall back to the static default.
fn persisted_status(store: &mut dyn ConfigStore) -> Option<BbrStatus> {
    let row = match store.get_row(BBR_TABLE, BBR_ROW_KEY) {
        Ok(row) => row,
        Err(err) => {
            info!(
                "Failed to read the BBR status from the config store ({}), using the static default",
                err
            );
            return None;
        }
    };
    match row.and_then(|mut fields| fields.remove(STATUS_FIELD)) {
        Some(value) => Some(BbrStatus::normalize(&value)),
        None => {
            info!("BBR status is not found in the config store, using the static default");
            None
        }
    }
}
