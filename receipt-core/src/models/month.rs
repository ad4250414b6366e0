use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a string does not name a calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown month '{0}'")]
pub struct UnknownMonth(pub String);

/// The twelve calendar months, declared in calendar order so that the derived
/// `Ord` sorts chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    pub const ALL: [Month; 12] = [
        Self::January,
        Self::February,
        Self::March,
        Self::April,
        Self::May,
        Self::June,
        Self::July,
        Self::August,
        Self::September,
        Self::October,
        Self::November,
        Self::December,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::January => "January",
            Self::February => "February",
            Self::March => "March",
            Self::April => "April",
            Self::May => "May",
            Self::June => "June",
            Self::July => "July",
            Self::August => "August",
            Self::September => "September",
            Self::October => "October",
            Self::November => "November",
            Self::December => "December",
        }
    }

    /// Accepts the full English name or its three-letter abbreviation,
    /// ignoring case and surrounding whitespace.
    pub fn parse(s: &str) -> Option<Self> {
        let needle = s.trim().to_ascii_lowercase();
        if needle.len() < 3 {
            return None;
        }
        Self::ALL.into_iter().find(|month| {
            let name = month.name().to_ascii_lowercase();
            name == needle || (needle.len() == 3 && name.starts_with(&needle))
        })
    }
}

impl fmt::Display for Month {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Month {
    type Err = UnknownMonth;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownMonth(s.to_string()))
    }
}

impl TryFrom<String> for Month {
    type Error = UnknownMonth;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Month> for String {
    fn from(month: Month) -> Self {
        month.name().to_string()
    }
}

/// A month paid for, tagged with the year it belongs to.
///
/// Two selections are the same entry when both the month and the year match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MonthSelection {
    pub month: Month,
    pub year: i32,
}

impl MonthSelection {
    pub fn new(
        month: Month,
        year: i32,
    ) -> Self {
        Self { month, year }
    }

    /// Chronological sort key: year first, then calendar order.
    pub fn sort_key(&self) -> (i32, Month) {
        (self.year, self.month)
    }
}

impl fmt::Display for MonthSelection {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{} {}", self.month, self.year)
    }
}
