use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown district '{0}'")]
pub struct UnknownDistrict(pub String);

/// Districts the school collects fees in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum District {
    Colombo,
    Jaffna,
}

impl District {
    pub const ALL: [District; 2] = [Self::Colombo, Self::Jaffna];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Colombo => "Colombo",
            Self::Jaffna => "Jaffna",
        }
    }

    /// Matches the option values of the district picker exactly.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Colombo" => Some(Self::Colombo),
            "Jaffna" => Some(Self::Jaffna),
            _ => None,
        }
    }
}

impl fmt::Display for District {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for District {
    type Error = UnknownDistrict;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value).ok_or_else(|| UnknownDistrict(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_round_trips_every_district() {
        for district in District::ALL {
            assert_eq!(District::parse(district.as_str()), Some(district));
        }
    }

    #[test]
    fn parse_is_exact() {
        assert_eq!(District::parse("colombo"), None);
        assert_eq!(District::parse(""), None);
        assert_eq!(
            District::try_from("Kandy"),
            Err(UnknownDistrict("Kandy".to_string()))
        );
    }
}
