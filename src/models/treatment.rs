use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{lenient_text, now, optional, required, InputError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreatmentRecord {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub treatment: String,
    pub treatment_date: String,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Body of `POST /patients/:id/treatments`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewTreatment {
    #[serde(default, deserialize_with = "lenient_text")]
    pub treatment: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub treatment_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub notes: Option<String>,
}

impl NewTreatment {
    pub fn into_record(self, patient_id: Uuid) -> Result<TreatmentRecord, InputError> {
        Ok(TreatmentRecord {
            id: Uuid::new_v4(),
            patient_id,
            treatment: required("treatment", self.treatment)?,
            treatment_date: required("treatment_date", self.treatment_date)?,
            notes: optional(self.notes),
            created_at: now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notes_are_optional() {
        let rec = NewTreatment {
            treatment: Some("IV fluids".into()),
            treatment_date: Some("2024-03-02".into()),
            notes: None,
        }
        .into_record(Uuid::new_v4())
        .unwrap();
        assert_eq!(rec.treatment, "IV fluids");
        assert!(rec.notes.is_none());
    }

    #[test]
    fn treatment_date_required() {
        let err = NewTreatment {
            treatment: Some("IV fluids".into()),
            ..Default::default()
        }
        .into_record(Uuid::new_v4())
        .unwrap_err();
        assert_eq!(err, InputError::MissingField("treatment_date"));
    }
}
