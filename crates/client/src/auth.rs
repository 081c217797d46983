//! Login, identity and account operations against the portal backend.

use reqwest::Method;

use tradedesk_auth::{Identity, LoginRequest, LoginResponse, PasswordChange, Role};
use tradedesk_core::Record;
use tradedesk_portal::Profile;

use crate::endpoint::endpoints;
use crate::error::ApiError;
use crate::http::{decode_record, ApiClient};

#[derive(Debug, Clone)]
pub struct AuthService {
    client: ApiClient,
}

impl AuthService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Exchange credentials for a token and store it in the session.
    pub async fn login(&self, email: &str, password: &str) -> Result<(), ApiError> {
        let request = LoginRequest::new(email, password)?;
        let value = self
            .client
            .send_json(
                Method::POST,
                &endpoints::AUTH_LOGIN,
                endpoints::AUTH_LOGIN.path,
                None,
                &request,
            )
            .await?;
        let response: LoginResponse =
            serde_json::from_value(value).map_err(|e| ApiError::Parse(e.to_string()))?;
        self.client.session().sign_in(&response.token)?;
        tracing::info!("Signed in as {}", request.email);
        Ok(())
    }

    pub fn logout(&self) -> Result<(), ApiError> {
        self.client.session().sign_out()?;
        Ok(())
    }

    pub async fn identity(&self) -> Result<Identity, ApiError> {
        self.client
            .get_json(&endpoints::AUTH_ME, endpoints::AUTH_ME.path, None, &[])
            .await
    }

    /// Role of the signed-in user.
    ///
    /// Any failure to establish the identity yields the least-privileged
    /// role rather than an error.
    pub async fn role(&self) -> Role {
        match self.identity().await {
            Ok(identity) => identity.role,
            Err(e) => {
                let fallback = Role::least_privileged();
                tracing::warn!("Failed to fetch user role, assuming {}: {}", fallback, e);
                fallback
            }
        }
    }

    pub async fn profile(&self) -> Result<Profile, ApiError> {
        self.client
            .get_json(&endpoints::PROFILE, endpoints::PROFILE.path, None, &[])
            .await
    }

    /// Save the profile; returns the stored copy when the backend echoes it.
    pub async fn update_profile(&self, profile: &Profile) -> Result<Option<Profile>, ApiError> {
        if profile.company_name.trim().is_empty() || profile.email.trim().is_empty() {
            return Err(tradedesk_core::DomainError::validation(
                "Company Name and Email are required.",
            )
            .into());
        }
        profile.validate()?;
        let value = self
            .client
            .send_json(
                Method::PUT,
                &endpoints::PROFILE,
                endpoints::PROFILE.path,
                None,
                profile,
            )
            .await?;
        tracing::info!("Profile updated");
        Ok(decode_record(value))
    }

    pub async fn change_password(&self, change: &PasswordChange) -> Result<(), ApiError> {
        let request = change.validate()?;
        self.client
            .send_json(
                Method::PUT,
                &endpoints::PROFILE_PASSWORD,
                endpoints::PROFILE_PASSWORD.path,
                None,
                &request,
            )
            .await?;
        tracing::info!("Password changed");
        Ok(())
    }
}
