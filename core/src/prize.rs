use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use strum::{Display, EnumIter, EnumString};
use validator::{Validate, ValidationError};

/// A single wedge definition supplied by the host. `weight` biases how much
/// of the wheel the prize occupies; anything non-positive or non-finite is
/// treated as 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Prize {
    #[validate(length(min = 1, message = "prize id must not be empty"))]
    pub id: String,
    #[validate(length(min = 1, message = "prize label must not be empty"))]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    // Optional slice color, e.g. "#EE4040"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    // Optional emoji or short text icon rendered on the slice
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl Prize {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            weight: None,
            color: None,
            icon: None,
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }
}

/// How often a user may spin. Hourly/daily are fixed windows measured from
/// the last spin; weekly/monthly unlock at the next calendar boundary.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Cadence {
    Hourly,
    Daily,
    Weekly,
    Monthly,
}

/// The persisted outcome of the most recent completed spin for a
/// `(user_id, cadence)` key. Overwritten on each new spin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpinRecord {
    pub prize_id: String,
    pub label: String,
    pub at: DateTime<Utc>,
}

/// Field-level checks plus duplicate-id detection across the set.
pub fn validate_prizes(prizes: &[Prize]) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for prize in prizes {
        if prize.validate().is_err() {
            return Err(ValidationError::new("invalid_prize"));
        }
        if !seen.insert(prize.id.as_str()) {
            return Err(ValidationError::new("duplicate_prize_id"));
        }
    }
    Ok(())
}
