//! Login, identity and password-change payloads.

use serde::{Deserialize, Serialize};

use tradedesk_core::value::require;
use tradedesk_core::{DomainError, DomainResult};

use crate::Role;

/// Minimum accepted length for a new password.
pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> DomainResult<Self> {
        let request = Self {
            email: email.into().trim().to_string(),
            password: password.into(),
        };
        require("email", &request.email)?;
        require("password", &request.password)?;
        Ok(request)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Response of the identity endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub role: Role,
}

/// Password change form (three inputs).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasswordChange {
    pub old_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

/// Wire payload of a password change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChangeRequest {
    pub old_password: String,
    pub new_password: String,
}

impl PasswordChange {
    /// Check the form in the order the user sees the messages.
    pub fn validate(&self) -> DomainResult<PasswordChangeRequest> {
        if self.new_password != self.confirm_password {
            return Err(DomainError::validation("New passwords do not match!"));
        }
        if self.new_password.chars().count() < MIN_PASSWORD_LEN {
            return Err(DomainError::validation(format!(
                "New password must be at least {MIN_PASSWORD_LEN} characters."
            )));
        }
        if self.old_password.is_empty() {
            return Err(DomainError::validation("Old password is required."));
        }
        Ok(PasswordChangeRequest {
            old_password: self.old_password.clone(),
            new_password: self.new_password.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn change(old: &str, new: &str, confirm: &str) -> PasswordChange {
        PasswordChange {
            old_password: old.into(),
            new_password: new.into(),
            confirm_password: confirm.into(),
        }
    }

    #[test]
    fn password_change_rules() {
        assert_eq!(
            change("old", "secret1", "secret2").validate().unwrap_err(),
            DomainError::validation("New passwords do not match!")
        );
        assert_eq!(
            change("old", "abc", "abc").validate().unwrap_err(),
            DomainError::validation("New password must be at least 6 characters.")
        );
        assert_eq!(
            change("", "secret1", "secret1").validate().unwrap_err(),
            DomainError::validation("Old password is required.")
        );

        let request = change("old", "secret1", "secret1").validate().unwrap();
        let payload = serde_json::to_value(&request).unwrap();
        assert_eq!(payload["oldPassword"], "old");
        assert_eq!(payload["newPassword"], "secret1");
    }

    #[test]
    fn login_requires_both_fields() {
        assert!(LoginRequest::new(" ", "pw").is_err());
        let request = LoginRequest::new(" vendor@rehan.pk ", "pw").unwrap();
        assert_eq!(request.email, "vendor@rehan.pk");
    }
}
