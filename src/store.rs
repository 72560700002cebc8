use std::collections::HashMap;
use std::error;
use std::fmt;

/// Field/value mapping of a single table row
pub type FieldValues = HashMap<String, String>;

#[derive(Debug)]
pub enum StoreError {
    /// Could not connect to the store. [reason]
    Unavailable(String),
    /// Connected, but the read failed. [reason]
    ReadFailed(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use StoreError::*;
        match self {
            Unavailable(r) => write!(f, "Config store unavailable [{}]", r),
            ReadFailed(r) => write!(f, "Config store read failed [{}]", r),
        }
    }
}

impl error::Error for StoreError {}

/// Read access to the live configuration store. The transport itself lives
/// outside this crate; callers hand in an implementation.
pub trait ConfigStore {
    /// Fetch a single row; Ok(None) when the row is absent
    fn get_row(&mut self, table: &str, key: &str) -> Result<Option<FieldValues>, StoreError>;
}
