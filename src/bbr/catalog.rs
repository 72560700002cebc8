use std::collections::BTreeSet;

use regex::Regex;

use crate::frr::{FrrConfig, FrrError};

/// Extracts the peer-group templates defined in the daemon's running
/// configuration.
pub(super) struct PeerGroupCatalog {
    pattern: Regex,
}

impl PeerGroupCatalog {
    pub(super) fn new() -> Self {
        // Matches template declarations ("neighbor PG peer-group"); membership
        // lines ("neighbor 10.0.0.1 peer-group PG") carry a trailing name and
        // don't match
        let pattern =
            Regex::new(r"^\s*neighbor\s+(\S+)\s+peer-group\s*$").expect("hard-coded pattern");
        PeerGroupCatalog { pattern }
    }

    /// Refresh the running config and return the currently defined peer-group
    /// names. The daemon's config is mutable external state, so this is called
    /// fresh for every generation pass.
    pub(super) fn current(&self, frr: &mut dyn FrrConfig) -> Result<BTreeSet<String>, FrrError> {
        frr.refresh()?;
        let mut groups = BTreeSet::new();
        for line in frr.lines() {
            if let Some(caps) = self.pattern.captures(&line) {
                groups.insert(caps[1].to_string());
            }
        }
        Ok(groups)
    }
}
