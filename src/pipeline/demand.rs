//! Demand bucketing of a predicted rental count.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Predictions below this are `Low`.
pub const LOW_DEMAND_CEILING: f64 = 600.0;

/// Predictions above this are `High`.
pub const HIGH_DEMAND_FLOOR: f64 = 1400.0;

/// Coarse demand category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DemandLevel {
    /// Fewer than 600 renters
    Low,
    /// 600 to 1400 renters, both inclusive
    Medium,
    /// More than 1400 renters
    High,
}

impl DemandLevel {
    /// All levels, low to high.
    pub const ALL: [DemandLevel; 3] = [DemandLevel::Low, DemandLevel::Medium, DemandLevel::High];

    /// Buckets a raw (untruncated) prediction.
    ///
    /// ```
    /// use bikecast::pipeline::DemandLevel;
    ///
    /// assert_eq!(DemandLevel::from_prediction(599.99), DemandLevel::Low);
    /// assert_eq!(DemandLevel::from_prediction(600.0), DemandLevel::Medium);
    /// assert_eq!(DemandLevel::from_prediction(1400.0), DemandLevel::Medium);
    /// assert_eq!(DemandLevel::from_prediction(1400.01), DemandLevel::High);
    /// ```
    #[must_use]
    pub fn from_prediction(prediction: f64) -> Self {
        if prediction < LOW_DEMAND_CEILING {
            DemandLevel::Low
        } else if prediction > HIGH_DEMAND_FLOOR {
            DemandLevel::High
        } else {
            DemandLevel::Medium
        }
    }

    /// Display label.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            DemandLevel::Low => "Low",
            DemandLevel::Medium => "Medium",
            DemandLevel::High => "High",
        }
    }
}

impl fmt::Display for DemandLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
