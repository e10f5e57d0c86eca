//! Auth collection flows.
//!
//! These operations only make sense on a collection of auth records (such as
//! `users`). Each one authorizes the session first and then issues exactly one
//! request. Password login, OAuth2 code exchange and token refresh store the
//! returned token in the shared session, replacing whatever was there.

use reqwest::Method;
use reqwest::multipart::Form;
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, info, instrument};

use crate::Result;
use crate::api::{
    AUTH_METHODS, AUTH_REFRESH, AUTH_WITH_OAUTH2, AUTH_WITH_PASSWORD, CONFIRM_EMAIL_CHANGE,
    CONFIRM_PASSWORD_RESET, CONFIRM_VERIFICATION, REQUEST_EMAIL_CHANGE, REQUEST_PASSWORD_RESET,
    REQUEST_VERIFICATION,
};
use crate::types::encode_segment;

use super::collection::Collection;
use super::models::{AuthMethods, AuthResponse, ExternalAuth, OAuth2Response};

/// Build a multipart form from named string fields.
fn form(fields: &[(&'static str, &str)]) -> Form {
    fields
        .iter()
        .fold(Form::new(), |form, (name, value)| form.text(*name, value.to_string()))
}

impl<T> Collection<T>
where
    T: Serialize + DeserializeOwned,
{
    /// List the auth methods enabled on this collection.
    #[instrument(skip(self), fields(collection = %self.name()))]
    pub async fn list_auth_methods(&self) -> Result<AuthMethods> {
        let request = self
            .client()
            .authorized(Method::GET, &self.action_path(AUTH_METHODS))
            .await?;
        self.client().api().send_json("auth-methods", request).await
    }

    /// Log in an auth record with its identity (email or username) and password.
    ///
    /// On success the returned token becomes the session token.
    #[instrument(skip(self, password), fields(collection = %self.name()))]
    pub async fn auth_with_password(&self, identity: &str, password: &str) -> Result<AuthResponse> {
        info!("Authenticating record with password");
        let request = self
            .client()
            .authorized(Method::POST, &self.action_path(AUTH_WITH_PASSWORD))
            .await?
            .multipart(form(&[("identity", identity), ("password", password)]));

        let response: AuthResponse = self
            .client()
            .api()
            .send_json("auth-with-password", request)
            .await?;
        self.client().store_token(&response.token).await?;
        Ok(response)
    }

    /// Exchange an OAuth2 authorization code for a session token.
    ///
    /// On success the returned token becomes the session token.
    #[instrument(skip(self, code, code_verifier), fields(collection = %self.name()))]
    pub async fn auth_with_oauth2_code(
        &self,
        provider: &str,
        code: &str,
        code_verifier: &str,
        redirect_url: &str,
    ) -> Result<OAuth2Response> {
        info!("Authenticating record with OAuth2 code");
        let request = self
            .client()
            .authorized(Method::POST, &self.action_path(AUTH_WITH_OAUTH2))
            .await?
            .multipart(form(&[
                ("provider", provider),
                ("code", code),
                ("codeVerifier", code_verifier),
                ("redirectUrl", redirect_url),
            ]));

        let response: OAuth2Response = self
            .client()
            .api()
            .send_json("auth-with-oauth2", request)
            .await?;
        self.client().store_token(&response.token).await?;
        Ok(response)
    }

    /// Trade the current record token for a fresh one.
    ///
    /// On success the returned token becomes the session token.
    #[instrument(skip(self), fields(collection = %self.name()))]
    pub async fn auth_refresh(&self) -> Result<AuthResponse> {
        info!("Refreshing record token");
        let request = self
            .client()
            .authorized(Method::POST, &self.action_path(AUTH_REFRESH))
            .await?;

        let response: AuthResponse = self.client().api().send_json("auth-refresh", request).await?;
        self.client().store_token(&response.token).await?;
        debug!("Record token refreshed");
        Ok(response)
    }

    /// Send a verification email to the record with this email.
    #[instrument(skip(self), fields(collection = %self.name()))]
    pub async fn request_verification(&self, email: &str) -> Result<()> {
        self.post_form(
            "request-verification",
            REQUEST_VERIFICATION,
            &[("email", email)],
        )
        .await
    }

    /// Confirm an email verification with the token from the email.
    #[instrument(skip(self, verification_token), fields(collection = %self.name()))]
    pub async fn confirm_verification(&self, verification_token: &str) -> Result<()> {
        self.post_form(
            "confirm-verification",
            CONFIRM_VERIFICATION,
            &[("token", verification_token)],
        )
        .await
    }

    /// Send a password reset email to the record with this email.
    #[instrument(skip(self), fields(collection = %self.name()))]
    pub async fn request_password_reset(&self, email: &str) -> Result<()> {
        self.post_form(
            "request-password-reset",
            REQUEST_PASSWORD_RESET,
            &[("email", email)],
        )
        .await
    }

    /// Set a new password with the token from a password reset email.
    #[instrument(skip_all, fields(collection = %self.name()))]
    pub async fn confirm_password_reset(
        &self,
        reset_token: &str,
        password: &str,
        password_confirm: &str,
    ) -> Result<()> {
        self.post_form(
            "confirm-password-reset",
            CONFIRM_PASSWORD_RESET,
            &[
                ("token", reset_token),
                ("password", password),
                ("passwordConfirm", password_confirm),
            ],
        )
        .await
    }

    /// Ask for an email change of the authenticated record.
    #[instrument(skip(self), fields(collection = %self.name()))]
    pub async fn request_email_change(&self, new_email: &str) -> Result<()> {
        self.post_form(
            "request-email-change",
            REQUEST_EMAIL_CHANGE,
            &[("newEmail", new_email)],
        )
        .await
    }

    /// Confirm an email change with the token from the email and the record password.
    #[instrument(skip_all, fields(collection = %self.name()))]
    pub async fn confirm_email_change(&self, change_token: &str, password: &str) -> Result<()> {
        self.post_form(
            "confirm-email-change",
            CONFIRM_EMAIL_CHANGE,
            &[("token", change_token), ("password", password)],
        )
        .await
    }

    /// List the external auth providers linked to a record.
    #[instrument(skip(self), fields(collection = %self.name()))]
    pub async fn list_external_auths(&self, record_id: &str) -> Result<Vec<ExternalAuth>> {
        let path = format!("{}/external-auths", self.record_path(record_id));
        let request = self.client().authorized(Method::GET, &path).await?;
        self.client()
            .api()
            .send_json("list-external-auths", request)
            .await
    }

    /// Unlink an external auth provider from a record.
    #[instrument(skip(self), fields(collection = %self.name()))]
    pub async fn unlink_external_auth(&self, record_id: &str, provider: &str) -> Result<()> {
        let path = format!(
            "{}/external-auths/{}",
            self.record_path(record_id),
            encode_segment(provider)
        );
        let request = self.client().authorized(Method::DELETE, &path).await?;
        self.client()
            .api()
            .send_empty("unlink-external-auth", request)
            .await
    }

    async fn post_form(
        &self,
        operation: &'static str,
        action: &str,
        fields: &[(&'static str, &str)],
    ) -> Result<()> {
        let request = self
            .client()
            .authorized(Method::POST, &self.action_path(action))
            .await?
            .multipart(form(fields));
        self.client().api().send_empty(operation, request).await
    }

    /// `/collections/{name}{action}`
    fn action_path(&self, action: &str) -> String {
        format!("{}{}", self.base_path(), action)
    }
}
