use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::Category;
use super::{lenient_text, now, parse_timestamp, required, InputError};

/// Measured value of a reading. Blood pressure carries both pressures;
/// every other category is a single number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReadingValue {
    BloodPressure { systolic: f64, diastolic: f64 },
    Scalar(f64),
}

impl ReadingValue {
    /// Interpret a JSON value as the reading shape expected for `category`.
    pub fn for_category(
        category: Category,
        raw: &serde_json::Value,
    ) -> Result<Self, InputError> {
        let invalid = |reason: &str| InputError::Invalid {
            field: "reading",
            reason: reason.to_string(),
        };

        match category {
            Category::BloodPressure => {
                let obj = raw
                    .as_object()
                    .ok_or_else(|| invalid("blood pressure needs systolic and diastolic"))?;
                let systolic = pressure_component(obj.get("systolic"))
                    .ok_or(InputError::MissingField("reading.systolic"))?;
                let diastolic = pressure_component(obj.get("diastolic"))
                    .ok_or(InputError::MissingField("reading.diastolic"))?;
                Ok(ReadingValue::BloodPressure {
                    systolic,
                    diastolic,
                })
            }
            _ => scalar(raw)
                .map(ReadingValue::Scalar)
                .ok_or_else(|| invalid("expected a number")),
        }
    }

    /// Primary number: systolic for blood pressure, the value otherwise.
    pub fn primary(&self) -> f64 {
        match self {
            ReadingValue::BloodPressure { systolic, .. } => *systolic,
            ReadingValue::Scalar(v) => *v,
        }
    }

    /// Diastolic for blood pressure.
    pub fn secondary(&self) -> Option<f64> {
        match self {
            ReadingValue::BloodPressure { diastolic, .. } => Some(*diastolic),
            ReadingValue::Scalar(_) => None,
        }
    }
}

/// Numbers may arrive as JSON numbers or numeric strings ("120").
/// NaN and infinities are not measurements.
fn scalar(raw: &serde_json::Value) -> Option<f64> {
    let value = match raw {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    value.filter(|v| v.is_finite())
}

fn pressure_component(raw: Option<&serde_json::Value>) -> Option<f64> {
    raw.and_then(scalar)
}

/// A single vital-sign reading for a patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClinicalReading {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub date_time: NaiveDateTime,
    pub category: Category,
    pub reading: ReadingValue,
    pub nurse_name: String,
    #[serde(rename = "type")]
    pub reading_type: String,
    pub created_at: NaiveDateTime,
}

/// Body of `POST /patients/:id/tests`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewReading {
    pub date_time: Option<String>,
    pub category: Option<String>,
    pub reading: Option<serde_json::Value>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub nurse_name: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "lenient_text")]
    pub reading_type: Option<String>,
}

impl NewReading {
    pub fn into_reading(self, patient_id: Uuid) -> Result<ClinicalReading, InputError> {
        let date_time = required("date_time", self.date_time)?;
        let date_time = parse_timestamp("date_time", &date_time)?;

        let category = required("category", self.category)?;
        let category = Category::from_str(&category).map_err(|_| InputError::Invalid {
            field: "category",
            reason: format!(
                "'{category}' is not one of {}",
                Category::ALL.map(|c| c.as_str()).join(", ")
            ),
        })?;

        let reading = match self.reading {
            None | Some(serde_json::Value::Null) => {
                return Err(InputError::MissingField("reading"))
            }
            Some(serde_json::Value::String(s)) if s.trim().is_empty() => {
                return Err(InputError::MissingField("reading"))
            }
            Some(raw) => ReadingValue::for_category(category, &raw)?,
        };

        Ok(ClinicalReading {
            id: Uuid::new_v4(),
            patient_id,
            date_time,
            category,
            reading,
            nurse_name: required("nurse_name", self.nurse_name)?,
            reading_type: required("type", self.reading_type)?,
            created_at: now(),
        })
    }
}

/// The most recent reading per category for one patient.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LatestReadings {
    pub blood_pressure: Option<ClinicalReading>,
    pub respiratory_rate: Option<ClinicalReading>,
    pub blood_oxygen_level: Option<ClinicalReading>,
    pub heart_beat_rate: Option<ClinicalReading>,
}

impl LatestReadings {
    /// Pick the newest reading per category from an arbitrary sequence.
    /// On equal timestamps the earlier item in the sequence is kept.
    pub fn select<I>(readings: I) -> Self
    where
        I: IntoIterator<Item = ClinicalReading>,
    {
        let mut latest = Self::default();
        for reading in readings {
            latest.offer(reading);
        }
        latest
    }

    /// Keep `reading` if its slot is empty or it is strictly newer.
    pub fn offer(&mut self, reading: ClinicalReading) {
        let slot = self.slot_mut(reading.category);
        let newer = match slot {
            Some(current) => reading.date_time > current.date_time,
            None => true,
        };
        if newer {
            *slot = Some(reading);
        }
    }

    pub fn get(&self, category: Category) -> Option<&ClinicalReading> {
        match category {
            Category::BloodPressure => self.blood_pressure.as_ref(),
            Category::RespiratoryRate => self.respiratory_rate.as_ref(),
            Category::BloodOxygenLevel => self.blood_oxygen_level.as_ref(),
            Category::HeartBeatRate => self.heart_beat_rate.as_ref(),
        }
    }

    fn slot_mut(&mut self, category: Category) -> &mut Option<ClinicalReading> {
        match category {
            Category::BloodPressure => &mut self.blood_pressure,
            Category::RespiratoryRate => &mut self.respiratory_rate,
            Category::BloodOxygenLevel => &mut self.blood_oxygen_level,
            Category::HeartBeatRate => &mut self.heart_beat_rate,
        }
    }

    pub fn is_empty(&self) -> bool {
        Category::ALL.iter().all(|c| self.get(*c).is_none())
    }
}
