mod catalog;
mod commands;
mod manager;
mod policy;

use std::error;
use std::fmt;

pub use commands::CommandBatch;
pub use manager::BbrManager;

use crate::frr::FrrError;

/// Config-store table holding the BBR toggle
pub const BBR_TABLE: &str = "BGP_BBR";
/// The toggle table's single conventional row key
pub const BBR_ROW_KEY: &str = "all";
/// Field carrying the toggle value
pub const STATUS_FIELD: &str = "status";

/// Device metadata slot published by the metadata tracker
pub const DEVICE_METADATA_TABLE: &str = "DEVICE_METADATA";
pub const LOCALHOST_KEY: &str = "localhost";
pub const BGP_ASN_FIELD: &str = "bgp_asn";

#[derive(Debug)]
pub enum ReconcileError {
    /// Event key other than the single supported row. [key]
    InvalidKey(String),
    /// Set payload without a status field. [payload]
    MissingStatus(String),
    /// Status value other than enabled/disabled. [value]
    InvalidStatus(String),
    /// Device ASN not yet published to the directory
    AsnUnavailable,
    /// The daemon config channel failed
    Frr(FrrError),
}

impl fmt::Display for ReconcileError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use ReconcileError::*;
        match self {
            InvalidKey(key) => write!(
                f,
                "Invalid key '{}' for table '{}'. Only key value '{}' is supported",
                key, BBR_TABLE, BBR_ROW_KEY
            ),
            MissingStatus(payload) => write!(
                f,
                "Invalid value '{}' for table '{}'. Key '{}' in data is expected",
                payload, BBR_TABLE, STATUS_FIELD
            ),
            InvalidStatus(value) => write!(
                f,
                "Invalid status '{}' for table '{}'. Only 'enabled' and 'disabled' are supported",
                value, BBR_TABLE
            ),
            AsnUnavailable => write!(
                f,
                "No '{}' published under '{}/{}' yet",
                BGP_ASN_FIELD, DEVICE_METADATA_TABLE, LOCALHOST_KEY
            ),
            Frr(err) => write!(f, "{}", err),
        }
    }
}

impl From<FrrError> for ReconcileError {
    fn from(error: FrrError) -> Self {
        ReconcileError::Frr(error)
    }
}

impl error::Error for ReconcileError {}
