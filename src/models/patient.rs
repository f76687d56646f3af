use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{lenient_text, now, optional, required, InputError};

/// An admitted patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub date_of_birth: String,
    pub department: String,
    pub doctor: String,
    pub sex: String,
    pub phone_number: String,
    pub emergency_contact: String,
    pub admission_date: String,
    pub bed_number: String,
    pub photo: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Body of `POST /patients`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewPatient {
    #[serde(default, deserialize_with = "lenient_text")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub date_of_birth: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub department: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub doctor: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub sex: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub phone_number: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub emergency_contact: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub admission_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub bed_number: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub photo: Option<String>,
}

impl NewPatient {
    /// Check required fields in declaration order and build the record.
    pub fn into_patient(self) -> Result<Patient, InputError> {
        Ok(Patient {
            id: Uuid::new_v4(),
            first_name: required("first_name", self.first_name)?,
            last_name: required("last_name", self.last_name)?,
            address: required("address", self.address)?,
            date_of_birth: required("date_of_birth", self.date_of_birth)?,
            department: required("department", self.department)?,
            doctor: required("doctor", self.doctor)?,
            sex: required("sex", self.sex)?,
            phone_number: required("phone_number", self.phone_number)?,
            emergency_contact: required("emergency_contact", self.emergency_contact)?,
            admission_date: required("admission_date", self.admission_date)?,
            bed_number: required("bed_number", self.bed_number)?,
            photo: optional(self.photo),
            created_at: now(),
        })
    }
}

#[cfg(test)]
pub(crate) fn sample_new_patient() -> NewPatient {
    NewPatient {
        first_name: Some("Ada".into()),
        last_name: Some("Byron".into()),
        address: Some("12 St James's Square".into()),
        date_of_birth: Some("1815-12-10".into()),
        department: Some("Cardiology".into()),
        doctor: Some("Dr. Babbage".into()),
        sex: Some("F".into()),
        phone_number: Some("555-0101".into()),
        emergency_contact: Some("555-0102".into()),
        admission_date: Some("2024-03-01".into()),
        bed_number: Some("C-12".into()),
        photo: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_input_builds_patient() {
        let patient = sample_new_patient().into_patient().unwrap();
        assert_eq!(patient.first_name, "Ada");
        assert_eq!(patient.bed_number, "C-12");
        assert!(patient.photo.is_none());
    }

    #[test]
    fn missing_doctor_is_reported() {
        let input = NewPatient {
            doctor: None,
            ..sample_new_patient()
        };
        assert_eq!(
            input.into_patient().unwrap_err(),
            InputError::MissingField("doctor")
        );
    }

    #[test]
    fn first_missing_field_wins() {
        let err = NewPatient::default().into_patient().unwrap_err();
        assert_eq!(err, InputError::MissingField("first_name"));
    }

    #[test]
    fn photo_is_optional_but_kept() {
        let input = NewPatient {
            photo: Some("photos/ada.jpg".into()),
            ..sample_new_patient()
        };
        let patient = input.into_patient().unwrap();
        assert_eq!(patient.photo.as_deref(), Some("photos/ada.jpg"));
    }
}
