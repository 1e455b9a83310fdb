//! Granularity handling and date patterns.
//!
//! A granularity picks how many date components (year down to second) are used
//! when placing a file. The same components drive both the nested directory
//! layout and the flat filename prefix.

use chrono::{DateTime, Datelike, Local, Timelike};
use std::fmt;
use std::str::FromStr;

use crate::errors::ArchiveError;

/// Precision level used to bucket files, from Year (1) to Second (6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Granularity {
    Year = 1,
    Month = 2,
    #[default]
    Day = 3,
    Hour = 4,
    Minute = 5,
    Second = 6,
}

impl Granularity {
    pub const ALL: [Granularity; 6] = [
        Granularity::Year,
        Granularity::Month,
        Granularity::Day,
        Granularity::Hour,
        Granularity::Minute,
        Granularity::Second,
    ];

    /// Accept either the word form (case-insensitive) or the numeric form "1".."6".
    pub fn normalize(input: &str) -> Result<Self, ArchiveError> {
        let trimmed = input.trim();
        let lowered = trimmed.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|g| g.word() == lowered || g.level().to_string() == trimmed)
            .ok_or_else(|| ArchiveError::InvalidGranularity(input.to_string()))
    }

    /// Integer form of `normalize`.
    pub fn from_level(level: u8) -> Result<Self, ArchiveError> {
        Self::ALL
            .into_iter()
            .find(|g| g.level() == level)
            .ok_or_else(|| ArchiveError::InvalidGranularity(level.to_string()))
    }

    #[inline]
    pub fn level(self) -> u8 {
        self as u8
    }

    /// Lowercase word form, e.g. "day".
    pub fn word(self) -> &'static str {
        match self {
            Granularity::Year => "year",
            Granularity::Month => "month",
            Granularity::Day => "day",
            Granularity::Hour => "hour",
            Granularity::Minute => "minute",
            Granularity::Second => "second",
        }
    }

    /// Render for display: "3" when `as_number`, otherwise "day".
    pub fn label(self, as_number: bool) -> String {
        if as_number {
            self.level().to_string()
        } else {
            self.word().to_string()
        }
    }

    pub fn date_pattern(self) -> DatePattern {
        DatePattern {
            components: &ORDERED_COMPONENTS[..self.level() as usize],
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Granularity::Year => "Year",
            Granularity::Month => "Month",
            Granularity::Day => "Day",
            Granularity::Hour => "Hour",
            Granularity::Minute => "Minute",
            Granularity::Second => "Second",
        };
        f.write_str(s)
    }
}

impl FromStr for Granularity {
    type Err = ArchiveError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::normalize(s)
    }
}

/// Free-function form of [`Granularity::date_pattern`].
pub fn date_pattern(granularity: Granularity) -> DatePattern {
    granularity.date_pattern()
}

/// A single calendar field of a timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateComponent {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
}

impl DateComponent {
    pub const ALL: [DateComponent; 6] = [
        DateComponent::Year,
        DateComponent::Month,
        DateComponent::Day,
        DateComponent::Hour,
        DateComponent::Minute,
        DateComponent::Second,
    ];

    /// 4-digit year, every other field 2-digit zero-padded.
    pub fn render(self, time: &DateTime<Local>) -> String {
        match self {
            DateComponent::Year => format!("{:04}", time.year()),
            DateComponent::Month => format!("{:02}", time.month()),
            DateComponent::Day => format!("{:02}", time.day()),
            DateComponent::Hour => format!("{:02}", time.hour()),
            DateComponent::Minute => format!("{:02}", time.minute()),
            DateComponent::Second => format!("{:02}", time.second()),
        }
    }

    pub fn strftime_token(self) -> &'static str {
        match self {
            DateComponent::Year => "%Y",
            DateComponent::Month => "%m",
            DateComponent::Day => "%d",
            DateComponent::Hour => "%H",
            DateComponent::Minute => "%M",
            DateComponent::Second => "%S",
        }
    }
}

static ORDERED_COMPONENTS: [DateComponent; 6] = DateComponent::ALL;

/// Ordered prefix of [`DateComponent::ALL`] selected by a granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatePattern {
    components: &'static [DateComponent],
}

impl DatePattern {
    pub fn components(&self) -> &'static [DateComponent] {
        self.components
    }

    pub fn render(&self, time: &DateTime<Local>) -> Vec<String> {
        self.components.iter().map(|c| c.render(time)).collect()
    }

    /// Display form such as "%Y.%m.%d".
    pub fn strftime(&self) -> String {
        self.components
            .iter()
            .map(|c| c.strftime_token())
            .collect::<Vec<_>>()
            .join(".")
    }
}
