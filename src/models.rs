use std::fmt;
use std::io::{Error, ErrorKind};
use std::str::FromStr;

/// Live state of the BBR toggle
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BbrStatus {
    Enabled,
    Disabled,
}

impl BbrStatus {
    /// Lossy conversion for values read back from the config store:
    /// anything other than "enabled" collapses to Disabled
    pub fn normalize(value: &str) -> Self {
        if value == "enabled" {
            BbrStatus::Enabled
        } else {
            BbrStatus::Disabled
        }
    }

    pub fn is_enabled(self) -> bool {
        self == BbrStatus::Enabled
    }
}

impl fmt::Display for BbrStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let word = match self {
            BbrStatus::Enabled => "enabled",
            BbrStatus::Disabled => "disabled",
        };
        write!(f, "{}", word)
    }
}

impl FromStr for BbrStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "enabled" => Ok(BbrStatus::Enabled),
            "disabled" => Ok(BbrStatus::Disabled),
            _ => Err(Error::new(
                ErrorKind::InvalidInput,
                format!("Unsupported BBR status: '{}'", s),
            )),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AddressFamily {
    Ipv4,
    Ipv6,
}

impl AddressFamily {
    /// Fixed order used when emitting address-family blocks
    pub const ALL: [AddressFamily; 2] = [AddressFamily::Ipv4, AddressFamily::Ipv6];
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let word = match self {
            AddressFamily::Ipv4 => "ipv4",
            AddressFamily::Ipv6 => "ipv6",
        };
        write!(f, "{}", word)
    }
}

impl FromStr for AddressFamily {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ipv4" => Ok(AddressFamily::Ipv4),
            "ipv6" => Ok(AddressFamily::Ipv6),
            _ => Err(Error::new(
                ErrorKind::InvalidInput,
                format!("Unsupported address family: '{}'", s),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_normalize() {
        assert_eq!(BbrStatus::normalize("enabled"), BbrStatus::Enabled);
        assert_eq!(BbrStatus::normalize("disabled"), BbrStatus::Disabled);
        // Unknown values narrow to disabled rather than erroring
        assert_eq!(BbrStatus::normalize("maybe"), BbrStatus::Disabled);
        assert_eq!(BbrStatus::normalize(""), BbrStatus::Disabled);
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("enabled".parse::<BbrStatus>().unwrap(), BbrStatus::Enabled);
        assert_eq!(
            "disabled".parse::<BbrStatus>().unwrap(),
            BbrStatus::Disabled
        );
        assert!("Enabled".parse::<BbrStatus>().is_err());
        assert!("maybe".parse::<BbrStatus>().is_err());
    }

    #[test]
    fn test_family_from_str() {
        assert_eq!("ipv4".parse::<AddressFamily>().unwrap(), AddressFamily::Ipv4);
        assert_eq!("ipv6".parse::<AddressFamily>().unwrap(), AddressFamily::Ipv6);
        assert!("l2vpn".parse::<AddressFamily>().is_err());
    }

    #[test]
    fn test_family_display_order() {
        let words: Vec<String> = AddressFamily::ALL.iter().map(|af| af.to_string()).collect();
        assert_eq!(words, vec!["ipv4", "ipv6"]);
    }
}
