use std::error;
use std::fmt;
use std::io;

#[derive(Debug)]
pub enum FrrError {
    /// Failed refreshing the running configuration. [reason]
    Refresh(String),
    /// Failed handing commands to the daemon. [reason]
    Push(String),
    /// Failed scheduling peer-group restarts. [reason]
    Restart(String),
}

impl fmt::Display for FrrError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use FrrError::*;
        match self {
            Refresh(r) => write!(f, "Failed to refresh the FRR running config [{}]", r),
            Push(r) => write!(f, "Failed to push commands to FRR [{}]", r),
            Restart(r) => write!(f, "Failed to restart peer-groups [{}]", r),
        }
    }
}

impl From<io::Error> for FrrError {
    fn from(error: io::Error) -> Self {
        FrrError::Refresh(error.to_string())
    }
}

impl error::Error for FrrError {}

/// Channel to the routing daemon's configuration: refreshing and reading the
/// running config, pushing command batches, and scheduling session restarts.
/// The applier itself is an external collaborator.
pub trait FrrConfig {
    /// Re-read the daemon's running configuration
    fn refresh(&mut self) -> Result<(), FrrError>;

    /// Lines of the running configuration as of the last refresh
    fn lines(&self) -> Vec<String>;

    /// Hand an ordered batch of configuration lines to the daemon
    fn push(&mut self, lines: &[String]) -> Result<(), FrrError>;

    /// Schedule session restarts for the named peer-groups
    fn restart_peer_groups(&mut self, groups: &[String]) -> Result<(), FrrError>;
}
