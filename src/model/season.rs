use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{Datelike, Local, NaiveDate};
use serde::Serialize;

use crate::error::FbrefError;

/// A European football season such as `2023-2024`.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize)]
pub struct Season {
    pub start_year: i32,
}

impl Season {
    /// The season starting in `start_year`.
    pub fn new(start_year: i32) -> Self {
        Self { start_year }
    }

    /// The season in progress on `date`. Seasons roll over on the 1st of July.
    pub fn containing(date: NaiveDate) -> Self {
        if date.month() >= 7 {
            Self::new(date.year())
        } else {
            Self::new(date.year() - 1)
        }
    }

    /// The season in progress today.
    pub fn current() -> Self {
        Self::containing(Local::now().date_naive())
    }
}

impl Display for Season {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start_year, self.start_year + 1)
    }
}

impl FromStr for Season {
    type Err = FbrefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || FbrefError::InvalidSeason(s.to_string());
        let (start, end) = s.trim().split_once('-').ok_or_else(invalid)?;
        let start: i32 = start.parse().map_err(|_| invalid())?;
        let end: i32 = end.parse().map_err(|_| invalid())?;
        if end != start + 1 {
            return Err(invalid());
        }
        Ok(Self::new(start))
    }
}
