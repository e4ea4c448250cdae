//! Unit-bearing time quantities.
//!
//! All elapsed-time arithmetic happens in seconds, the unit decay engines
//! expect. Quantities keep the unit they were created with so a table's
//! `time_0` round-trips exactly as the caller supplied it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{SECONDS_PER_DAY, SECONDS_PER_HOUR, SECONDS_PER_MINUTE, SECONDS_PER_YEAR};
use crate::error::UnitError;

/// Supported time units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimeUnit {
    #[serde(rename = "s")]
    Second,
    #[serde(rename = "min")]
    Minute,
    #[serde(rename = "h")]
    Hour,
    #[default]
    #[serde(rename = "d")]
    Day,
    /// Julian year.
    #[serde(rename = "y")]
    Year,
}

impl TimeUnit {
    /// Length of one unit in seconds.
    pub fn seconds(&self) -> f64 {
        match self {
            Self::Second => 1.0,
            Self::Minute => SECONDS_PER_MINUTE,
            Self::Hour => SECONDS_PER_HOUR,
            Self::Day => SECONDS_PER_DAY,
            Self::Year => SECONDS_PER_YEAR,
        }
    }

    /// Short symbol used for display and serialization.
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Second => "s",
            Self::Minute => "min",
            Self::Hour => "h",
            Self::Day => "d",
            Self::Year => "y",
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for TimeUnit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "s" | "sec" | "secs" | "second" | "seconds" => Ok(Self::Second),
            "min" | "mins" | "minute" | "minutes" => Ok(Self::Minute),
            "h" | "hr" | "hrs" | "hour" | "hours" => Ok(Self::Hour),
            "d" | "day" | "days" => Ok(Self::Day),
            "y" | "a" | "yr" | "yrs" | "year" | "years" => Ok(Self::Year),
            "" => Err(UnitError::MissingUnit(s.to_string())),
            _ => Err(UnitError::UnknownUnit(s.trim().to_string())),
        }
    }
}

/// A finite time value with an explicit unit.
///
/// # Examples
///
/// ```
/// use isodecay_core::units::{TimeQuantity, TimeUnit};
/// let t: TimeQuantity = "2 d".parse().unwrap();
/// assert_eq!(t.unit(), TimeUnit::Day);
/// assert_eq!(t.as_seconds(), 172_800.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTimeQuantity")]
pub struct TimeQuantity {
    value: f64,
    unit: TimeUnit,
}

#[derive(Deserialize)]
struct RawTimeQuantity {
    value: f64,
    unit: TimeUnit,
}

impl TryFrom<RawTimeQuantity> for TimeQuantity {
    type Error = UnitError;

    fn try_from(raw: RawTimeQuantity) -> Result<Self, Self::Error> {
        Self::new(raw.value, raw.unit)
    }
}

impl TimeQuantity {
    /// Zero days, the default reference time of a table.
    pub const ZERO: Self = Self {
        value: 0.0,
        unit: TimeUnit::Day,
    };

    /// Build a quantity, rejecting NaN and infinities.
    pub fn new(value: f64, unit: TimeUnit) -> Result<Self, UnitError> {
        if !value.is_finite() {
            return Err(UnitError::NonFinite(value));
        }
        Ok(Self { value, unit })
    }

    pub fn days(value: f64) -> Result<Self, UnitError> {
        Self::new(value, TimeUnit::Day)
    }

    pub fn seconds(value: f64) -> Result<Self, UnitError> {
        Self::new(value, TimeUnit::Second)
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn unit(&self) -> TimeUnit {
        self.unit
    }

    pub fn as_seconds(&self) -> f64 {
        self.value * self.unit.seconds()
    }

    /// Express this quantity in another unit.
    pub fn to_unit(&self, unit: TimeUnit) -> Self {
        Self {
            value: self.as_seconds() / unit.seconds(),
            unit,
        }
    }

    /// Elapsed seconds from `earlier` to `self`. Negative when `self` is the
    /// earlier of the two.
    pub fn seconds_since(&self, earlier: &TimeQuantity) -> f64 {
        self.as_seconds() - earlier.as_seconds()
    }
}

impl Default for TimeQuantity {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for TimeQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

impl FromStr for TimeQuantity {
    type Err = UnitError;

    /// Parse `"<number> <unit>"`; the space is optional (`"1.5y"`, `"1e3 s"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (number, unit) =
            split_number(s).ok_or_else(|| UnitError::Malformed(s.to_string()))?;
        if unit.is_empty() {
            return Err(UnitError::MissingUnit(s.to_string()));
        }
        Self::new(number, unit.parse()?)
    }
}

/// Longest numeric prefix of `s` and the remaining (trimmed) suffix.
fn split_number(s: &str) -> Option<(f64, &str)> {
    (1..=s.len())
        .rev()
        .filter(|&i| s.is_char_boundary(i))
        .find_map(|i| {
            let value = s[..i].trim().parse::<f64>().ok()?;
            Some((value, s[i..].trim()))
        })
}

/// The time a table is advanced to.
///
/// A bare number is interpreted in the configured bare unit (days unless
/// [`DecayConfig`](crate::config::DecayConfig) says otherwise); a quantity
/// carries its own unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TargetTime {
    Bare(f64),
    Quantity(TimeQuantity),
}

impl TargetTime {
    /// Resolve into a quantity, attaching `bare_unit` to bare numbers.
    pub fn resolve(self, bare_unit: TimeUnit) -> Result<TimeQuantity, UnitError> {
        match self {
            Self::Bare(value) => TimeQuantity::new(value, bare_unit),
            Self::Quantity(q) => Ok(q),
        }
    }
}

impl From<f64> for TargetTime {
    fn from(value: f64) -> Self {
        Self::Bare(value)
    }
}

impl From<TimeQuantity> for TargetTime {
    fn from(q: TimeQuantity) -> Self {
        Self::Quantity(q)
    }
}

impl FromStr for TargetTime {
    type Err = UnitError;

    /// A plain number is bare; anything else must parse as a quantity.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().parse::<f64>() {
            Ok(value) => Ok(Self::Bare(value)),
            Err(_) => Ok(Self::Quantity(s.parse()?)),
        }
    }
}
