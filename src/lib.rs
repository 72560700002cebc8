mod bbr;
mod config;
mod directory;
mod frr;
mod models;
mod store;

pub use bbr::{
    BbrManager, CommandBatch, ReconcileError, BBR_ROW_KEY, BBR_TABLE, BGP_ASN_FIELD,
    DEVICE_METADATA_TABLE, LOCALHOST_KEY, STATUS_FIELD,
};
pub use config::Constants;
pub use directory::Directory;
pub use frr::{FrrConfig, FrrError};
pub use models::{AddressFamily, BbrStatus};
pub use store::{ConfigStore, FieldValues, StoreError};
