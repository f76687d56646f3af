use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{now, required, InputError};

/// A ward login. The password is compared as plaintext and never
/// serialized back to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub role: String,
    pub created_at: NaiveDateTime,
}

impl User {
    pub fn password_matches(&self, candidate: &str) -> bool {
        self.password == candidate
    }
}

/// Body of `POST /user`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewUser {
    pub username: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

impl NewUser {
    pub fn into_user(self) -> Result<User, InputError> {
        let username = required("username", self.username)?;
        // Passwords are kept verbatim; only emptiness is checked.
        let password = match self.password {
            Some(p) if !p.is_empty() => p,
            _ => return Err(InputError::MissingField("password")),
        };
        Ok(User {
            id: Uuid::new_v4(),
            username,
            password,
            role: required("role", self.role)?,
            created_at: now(),
        })
    }
}

/// Body of `POST /login`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl LoginRequest {
    pub fn into_credentials(self) -> Result<(String, String), InputError> {
        let username = required("username", self.username)?;
        let password = match self.password {
            Some(p) if !p.is_empty() => p,
            _ => return Err(InputError::MissingField("password")),
        };
        Ok((username, password))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_not_serialized() {
        let user = NewUser {
            username: Some("nurse1".into()),
            password: Some("secret".into()),
            role: Some("nurse".into()),
        }
        .into_user()
        .unwrap();
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["username"], "nurse1");
    }

    #[test]
    fn password_comparison_is_exact() {
        let user = NewUser {
            username: Some("nurse1".into()),
            password: Some(" secret".into()),
            role: Some("nurse".into()),
        }
        .into_user()
        .unwrap();
        assert!(user.password_matches(" secret"));
        assert!(!user.password_matches("secret"));
    }

    #[test]
    fn login_requires_password() {
        let err = LoginRequest {
            username: Some("nurse1".into()),
            password: None,
        }
        .into_credentials()
        .unwrap_err();
        assert_eq!(err, InputError::MissingField("password"));
    }
}
