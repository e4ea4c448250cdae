//! Decay and normalization settings.
//!
//! [`DecayConfig`] carries the policy decisions the table operations need:
//! how bare target times are interpreted, what to do with negative elapsed
//! time, and how zero-sum samples behave under normalization.

use serde::{Deserialize, Serialize};

use crate::units::TimeUnit;

/// What [`AbundanceTable::decay`](crate::abundance::AbundanceTable::decay)
/// does when the target time precedes `time_0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NegativeElapsedPolicy {
    /// Fail with `DecayError::NegativeElapsed` before calling the engine.
    #[default]
    Reject,
    /// Hand the negative duration to the engine unchanged.
    PassThrough,
}

/// What normalization does with a sample whose abundances sum to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ZeroSumPolicy {
    /// Fail with `TableError::ZeroColumnSum`.
    #[default]
    Error,
    /// Divide anyway; the column becomes NaN.
    NonFinite,
}

/// Settings for decay and merge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecayConfig {
    /// Unit attached to bare numeric target times.
    pub bare_time_unit: TimeUnit,
    pub negative_elapsed: NegativeElapsedPolicy,
    pub zero_sum: ZeroSumPolicy,
    /// Sort decayed rows by (atomic number, mass number).
    pub sort_rows: bool,
}

impl Default for DecayConfig {
    fn default() -> Self {
        Self {
            bare_time_unit: TimeUnit::Day,
            negative_elapsed: NegativeElapsedPolicy::Reject,
            zero_sum: ZeroSumPolicy::Error,
            sort_rows: true,
        }
    }
}
