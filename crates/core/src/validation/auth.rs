//! Validators for the authentication endpoints.

use serde_json::{Map, Value};

use super::payload::{check_password_length, normalize_email, normalize_phone, Payload};
use crate::error::{CoreError, CoreResult};

pub const LOGIN_FIELDS: &[&str] = &["email", "password"];
pub const REGISTER_FIELDS: &[&str] = &["firstName", "lastName", "email", "password", "phone"];
pub const CHANGE_PASSWORD_FIELDS: &[&str] = &["currentPassword", "newPassword"];

#[derive(Debug, Clone)]
pub struct LoginInput {
    /// Lower-cased for lookup.
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct RegisterInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ChangePasswordInput {
    pub current_password: String,
    pub new_password: String,
}

/// Login rejects with 400-class errors rather than 422.
fn as_bad_request(err: CoreError) -> CoreError {
    match err {
        CoreError::Validation(msg) => CoreError::InvalidInput(msg),
        other => other,
    }
}

fn parse_login(p: &Payload<'_>) -> CoreResult<LoginInput> {
    p.reject_unknown(LOGIN_FIELDS, "POST /api/auth/login")?;
    let email = p.required_str("email", "Please provide email and password")?;
    let password = p.required_secret("password", "Please provide email and password")?;
    Ok(LoginInput {
        email: email.to_lowercase(),
        password: password.to_string(),
    })
}

pub fn validate_login(body: &Map<String, Value>) -> CoreResult<LoginInput> {
    parse_login(&Payload::new(body)).map_err(as_bad_request)
}

pub fn validate_register(body: &Map<String, Value>) -> CoreResult<RegisterInput> {
    let p = Payload::new(body);
    p.reject_unknown(REGISTER_FIELDS, "POST /api/auth/register")?;
    let first_name = p.required_str("firstName", "First name is required")?;
    let last_name = p.required_str("lastName", "Last name is required")?;
    let email = normalize_email(p.required_str("email", "Email is required")?)?;
    let password = p.required_secret("password", "Password is required")?;
    check_password_length(password, "Password")?;
    let phone = match p.optional_str("phone")? {
        Some(raw) => normalize_phone(raw)?,
        None => None,
    };
    Ok(RegisterInput {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        email,
        password: password.to_string(),
        phone,
    })
}

pub fn validate_change_password(body: &Map<String, Value>) -> CoreResult<ChangePasswordInput> {
    let p = Payload::new(body);
    p.reject_unknown(CHANGE_PASSWORD_FIELDS, "POST /api/auth/change-password")?;
    let current = p.required_secret("currentPassword", "Current password is required")?;
    let new = p.required_secret("newPassword", "New password is required")?;
    check_password_length(new, "New password")?;
    Ok(ChangePasswordInput {
        current_password: current.to_string(),
        new_password: new.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    fn obj(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn login_lowercases_email_and_keeps_password_verbatim() {
        let input =
            validate_login(&obj(json!({"email": "Admin@Corp.IO", "password": " pw "}))).unwrap();
        assert_eq!(input.email, "admin@corp.io");
        assert_eq!(input.password, " pw ");
    }

    #[test]
    fn login_failures_are_bad_request() {
        assert_matches!(
            validate_login(&obj(json!({"email": "a@b.io"}))),
            Err(CoreError::InvalidInput(_))
        );
        assert_matches!(
            validate_login(&obj(json!({"email": "a@b.io", "password": "x", "remember": true}))),
            Err(CoreError::InvalidInput(m)) if m.contains("remember")
        );
    }

    #[test]
    fn register_requires_names_email_and_password() {
        let ok = validate_register(&obj(json!({
            "firstName": "Ada", "lastName": "Lovelace",
            "email": "ADA@example.com", "password": "secret1"
        })))
        .unwrap();
        assert_eq!(ok.email, "ada@example.com");
        assert_eq!(ok.phone, None);

        assert_matches!(
            validate_register(&obj(json!({"lastName": "L", "email": "a@b.io", "password": "secret1"}))),
            Err(CoreError::Validation(m)) if m == "First name is required"
        );
        assert_matches!(
            validate_register(&obj(json!({
                "firstName": "A", "lastName": "L", "email": "a@b.io", "password": "123"
            }))),
            Err(CoreError::Validation(m)) if m == "Password must be at least 6 characters"
        );
    }

    #[test]
    fn register_does_not_accept_role() {
        assert_matches!(
            validate_register(&obj(json!({
                "firstName": "A", "lastName": "L", "email": "a@b.io",
                "password": "secret1", "role": "ADMIN"
            }))),
            Err(CoreError::Validation(m)) if m.contains("role")
        );
    }

    #[test]
    fn change_password_checks_new_length() {
        assert_matches!(
            validate_change_password(&obj(json!({"currentPassword": "old-pass", "newPassword": "short"}))),
            Err(CoreError::Validation(m)) if m.starts_with("New password must be")
        );
        assert!(validate_change_password(&obj(json!({
            "currentPassword": "old-pass", "newPassword": "long-enough"
        })))
        .is_ok());
    }
}
