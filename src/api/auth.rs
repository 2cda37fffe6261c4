//! Auth Endpoints

use leptos_listkit::{require, Validate, ValidationError};
use serde::Serialize;

use super::{ApiClient, ApiMessage};
use crate::error::AppResult;
use crate::models::AuthSession;

pub const LOGIN: &str = "/auth/login";
pub const REGISTER: &str = "/auth/register";

const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Clone, Default, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Validate for Credentials {
    fn validate(&self) -> Result<(), ValidationError> {
        require(&[("Email", self.email.as_str()), ("Password", self.password.as_str())])
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub phone: String,
    pub password: String,
    #[serde(skip)]
    pub confirm_password: String,
}

fn looks_like_email(email: &str) -> bool {
    match email.trim().split_once('@') {
        Some((user, domain)) => !user.is_empty() && domain.contains('.') && !domain.ends_with('.'),
        None => false,
    }
}

impl Validate for Registration {
    fn validate(&self) -> Result<(), ValidationError> {
        require(&[
            ("Name", self.name.as_str()),
            ("Email", self.email.as_str()),
            ("Password", self.password.as_str()),
        ])?;
        if !looks_like_email(&self.email) {
            return Err(ValidationError::Invalid("Enter a valid email address".into()));
        }
        if self.password.len() < MIN_PASSWORD_LEN {
            return Err(ValidationError::Invalid(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }
        if self.password != self.confirm_password {
            return Err(ValidationError::Invalid("Passwords do not match".into()));
        }
        Ok(())
    }
}

impl ApiClient {
    pub async fn login(&self, credentials: Credentials) -> AppResult<AuthSession> {
        self.post(LOGIN, &credentials).await
    }

    pub async fn register(&self, registration: Registration) -> AppResult<ApiMessage> {
        self.post(REGISTER, &registration).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration() -> Registration {
        Registration {
            name: "Meera".into(),
            email: "meera@example.in".into(),
            phone: String::new(),
            password: "correct horse".into(),
            confirm_password: "correct horse".into(),
        }
    }

    #[test]
    fn test_registration_ok() {
        assert!(registration().validate().is_ok());
    }

    #[test]
    fn test_registration_rules() {
        let bad_email = Registration { email: "meera@localhost".into(), ..registration() };
        assert!(matches!(bad_email.validate(), Err(ValidationError::Invalid(_))));

        let short = Registration {
            password: "short".into(),
            confirm_password: "short".into(),
            ..registration()
        };
        assert!(matches!(short.validate(), Err(ValidationError::Invalid(_))));

        let mismatch = Registration { confirm_password: "other horse".into(), ..registration() };
        assert_eq!(
            mismatch.validate(),
            Err(ValidationError::Invalid("Passwords do not match".into()))
        );
    }

    #[test]
    fn test_confirmation_never_sent() {
        let json = serde_json::to_string(&registration()).unwrap();
        assert!(!json.contains("confirm"));
        assert!(!json.contains("phone"));
    }

    #[test]
    fn test_credentials_required() {
        let creds = Credentials { email: "a@b.in".into(), password: String::new() };
        assert_eq!(creds.validate(), Err(ValidationError::Missing("Password")));
    }
}
