use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex};

use itertools::Itertools;
use log::{debug, error, info};

use crate::config::Constants;
use crate::directory::Directory;
use crate::frr::FrrConfig;
use crate::models::{AddressFamily, BbrStatus};
use crate::store::{ConfigStore, FieldValues};

use super::catalog::PeerGroupCatalog;
use super::commands::{self, CommandBatch};
use super::policy;
use super::{
    ReconcileError, BBR_ROW_KEY, BBR_TABLE, BGP_ASN_FIELD, DEVICE_METADATA_TABLE, LOCALHOST_KEY,
    STATUS_FIELD,
};

/// Reconciles BBR toggle events from the config store into FRR command
/// batches and peer-group session restarts.
///
/// The feature capability is decided once in [`BbrManager::new`] and never
/// changes afterwards; only the effective status moves, and only through a
/// validated set event.
pub struct BbrManager {
    frr: Box<dyn FrrConfig>,
    directory: Arc<Mutex<Directory>>,
    catalog: PeerGroupCatalog,
    enabled: bool,
    peer_groups: BTreeMap<String, BTreeSet<AddressFamily>>,
    status: BbrStatus,
}

impl BbrManager {
    /// Build the manager and resolve the startup policy. The store is only
    /// needed here; live toggle events arrive through [`BbrManager::handle_set`].
    pub fn new(
        constants: &Constants,
        store: &mut dyn ConfigStore,
        frr: Box<dyn FrrConfig>,
        directory: Arc<Mutex<Directory>>,
    ) -> Self {
        // Visible as disabled while resolution runs
        directory
            .lock()
            .unwrap()
            .publish(BBR_TABLE, BBR_ROW_KEY, STATUS_FIELD, "disabled");

        let resolution = policy::resolve(constants, store);
        if resolution.enabled {
            directory.lock().unwrap().publish(
                BBR_TABLE,
                BBR_ROW_KEY,
                STATUS_FIELD,
                &resolution.status.to_string(),
            );
        }

        BbrManager {
            frr,
            directory,
            catalog: PeerGroupCatalog::new(),
            enabled: resolution.enabled,
            peer_groups: resolution.peer_groups,
            status: resolution.status,
        }
    }

    /// Whether the feature is usable on this device at all
    pub fn feature_enabled(&self) -> bool {
        self.enabled
    }

    /// Current effective toggle state
    pub fn status(&self) -> BbrStatus {
        self.status
    }

    /// Handle a set event for the toggle row. Always returns true: invalid
    /// or failed events are logged and dropped, never retried.
    pub fn handle_set(&mut self, key: &str, data: &FieldValues) -> bool {
        if !self.enabled {
            info!("BBR is disabled. Drop the request");
            return true;
        }
        let request = match SetRequest::parse(key, data) {
            Ok(request) => request,
            Err(err) => {
                error!("{}", err);
                return true;
            }
        };
        match self.apply(request.status) {
            Ok(()) => info!("Scheduled BBR update: '{}'", request.status),
            Err(err) => error!("Dropping BBR update: {}", err),
        }
        true
    }

    /// Handle a delete event. The toggle table's single row must never be
    /// removed; this is a configuration-usage error, not a crash condition.
    pub fn handle_del(&mut self, key: &str) -> bool {
        error!(
            "The '{}' table shouldn't be removed from the db (key '{}')",
            BBR_TABLE, key
        );
        true
    }

    fn apply(&mut self, status: BbrStatus) -> Result<(), ReconcileError> {
        let batch = self.generate(status)?;
        self.frr.push(&batch.lines)?;
        let restart: Vec<String> = batch.restart.iter().cloned().collect();
        debug!("Restarting peer-groups: {}", restart.iter().join(", "));
        self.frr.restart_peer_groups(&restart)?;
        self.status = status;
        self.directory.lock().unwrap().publish(
            BBR_TABLE,
            BBR_ROW_KEY,
            STATUS_FIELD,
            &status.to_string(),
        );
        Ok(())
    }

    /// Generate the command batch for the desired status against a fresh
    /// topology snapshot.
    fn generate(&mut self, status: BbrStatus) -> Result<CommandBatch, ReconcileError> {
        let asn = self
            .directory
            .lock()
            .unwrap()
            .get(DEVICE_METADATA_TABLE, LOCALHOST_KEY, BGP_ASN_FIELD)
            .ok_or(ReconcileError::AsnUnavailable)?;
        let available = self.catalog.current(self.frr.as_mut())?;
        Ok(commands::render(&asn, status, &self.peer_groups, &available))
    }
}

/// Validated form of a toggle set event
struct SetRequest {
    status: BbrStatus,
}

impl SetRequest {
    fn parse(key: &str, data: &FieldValues) -> Result<Self, ReconcileError> {
        if key != BBR_ROW_KEY {
            return Err(ReconcileError::InvalidKey(key.to_string()));
        }
        let status = data.get(STATUS_FIELD).ok_or_else(|| {
            ReconcileError::MissingStatus(serde_json::to_string(data).unwrap_or_default())
        })?;
        match status.parse() {
            Ok(status) => Ok(SetRequest { status }),
            Err(_) => Err(ReconcileError::InvalidStatus(status.clone())),
        }
    }
}
