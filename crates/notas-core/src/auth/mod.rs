//! Sign-in, registration, and sign-out on top of the gateway and session.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{Error, Result};
use crate::gateway::{HttpGateway, RegisterConfirmation};
use crate::session::Session;

pub const MIN_PASSWORD_CHARS: usize = 8;

#[derive(Clone)]
pub struct AuthService {
    gateway: HttpGateway,
}

impl AuthService {
    pub const fn new(gateway: HttpGateway) -> Self {
        Self { gateway }
    }

    pub const fn session(&self) -> &Session {
        self.gateway.session()
    }

    /// Sign in and persist the returned token.
    ///
    /// The token is stored before this returns, so any note operation issued
    /// afterwards through a gateway sharing the session carries it.
    pub async fn login(&self, identifier: &str, secret: &str) -> Result<()> {
        let identifier = identifier.trim();
        validate_credentials(identifier, secret)?;

        let token = self.gateway.login(identifier, secret).await?;
        self.session().persist(&token)?;
        tracing::info!("Signed in as {}", identifier);
        Ok(())
    }

    /// Create an account. Does not sign in.
    pub async fn register(&self, identifier: &str, secret: &str) -> Result<RegisterConfirmation> {
        let identifier = identifier.trim();
        validate_credentials(identifier, secret)?;

        let confirmation = self.gateway.register(identifier, secret).await?;
        tracing::info!("Registered account {}", identifier);
        Ok(confirmation)
    }

    /// Drop the stored token. The remote service has no logout endpoint.
    pub fn logout(&self) -> Result<()> {
        self.session().clear()?;
        tracing::info!("Signed out");
        Ok(())
    }

    pub fn is_authenticated(&self) -> Result<bool> {
        self.session().is_authenticated()
    }
}

/// Identifier must look like an email address; secret needs 8+ characters.
pub fn validate_credentials(identifier: &str, secret: &str) -> Result<()> {
    if !is_valid_email(identifier) {
        return Err(Error::Validation(
            "Please enter a valid email address".to_string(),
        ));
    }
    if secret.chars().count() < MIN_PASSWORD_CHARS {
        return Err(Error::Validation(format!(
            "Password must be at least {MIN_PASSWORD_CHARS} characters"
        )));
    }
    Ok(())
}

pub fn is_valid_email(value: &str) -> bool {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid regex"))
        .is_match(value)
}
