//! Critical-condition classifier.
//!
//! Pure threshold checks over a patient's latest readings. A category with
//! no reading never contributes a reason.

use serde::Serialize;

use crate::models::{Category, LatestReadings, ReadingValue};

pub const SYSTOLIC_MAX: f64 = 180.0;
pub const DIASTOLIC_MAX: f64 = 120.0;
pub const RESPIRATORY_MIN: f64 = 12.0;
pub const RESPIRATORY_MAX: f64 = 25.0;
pub const HEART_RATE_MAX: f64 = 200.0;
/// Oxygen saturation at or below this is critical.
pub const OXYGEN_FLOOR: f64 = 88.0;

/// Outcome of classifying one patient.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Assessment {
    pub critical: bool,
    pub reasons: Vec<String>,
}

impl Assessment {
    /// Reasons joined with `"; "`, empty when nothing breached.
    pub fn reason(&self) -> String {
        self.reasons.join("; ")
    }
}

/// Classify a patient from their latest reading in each category.
pub fn assess(latest: &LatestReadings) -> Assessment {
    let mut reasons = Vec::new();

    if let Some(reading) = latest.get(Category::BloodPressure) {
        match reading.reading {
            ReadingValue::BloodPressure {
                systolic,
                diastolic,
            } => {
                if systolic > SYSTOLIC_MAX {
                    reasons.push(format!(
                        "systolic blood pressure {systolic} above {SYSTOLIC_MAX}"
                    ));
                }
                if diastolic > DIASTOLIC_MAX {
                    reasons.push(format!(
                        "diastolic blood pressure {diastolic} above {DIASTOLIC_MAX}"
                    ));
                }
            }
            ReadingValue::Scalar(v) => {
                tracing::warn!(id = %reading.id, value = v, "Blood pressure stored without diastolic");
                if v > SYSTOLIC_MAX {
                    reasons.push(format!("systolic blood pressure {v} above {SYSTOLIC_MAX}"));
                }
            }
        }
    }

    if let Some(reading) = latest.get(Category::RespiratoryRate) {
        let rate = reading.reading.primary();
        if rate < RESPIRATORY_MIN || rate > RESPIRATORY_MAX {
            reasons.push(format!(
                "respiratory rate {rate} outside {RESPIRATORY_MIN}-{RESPIRATORY_MAX}"
            ));
        }
    }

    if let Some(reading) = latest.get(Category::HeartBeatRate) {
        let rate = reading.reading.primary();
        if rate > HEART_RATE_MAX {
            reasons.push(format!("heart beat rate {rate} above {HEART_RATE_MAX}"));
        }
    }

    if let Some(reading) = latest.get(Category::BloodOxygenLevel) {
        let level = reading.reading.primary();
        if level <= OXYGEN_FLOOR {
            reasons.push(format!(
                "blood oxygen level {level} at or below {OXYGEN_FLOOR}"
            ));
        }
    }

    Assessment {
        critical: !reasons.is_empty(),
        reasons,
    }
}
