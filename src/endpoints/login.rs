//! Session login
//!
//! A successful login leaves a session cookie in the client's jar. Every
//! [`AuthMode::Session`] call on the same [`Config`] relies on it, so the
//! login must complete before those calls are issued, including calls made
//! from other tasks sharing the `Config`.

use std::fmt;

use reqwest::Method;
use serde::Serialize;

use crate::http::{AuthMode, Result};
use crate::Config;

const BASE_PATH: &str = "v1/login";

/// Credentials for a session login
#[derive(Clone, Serialize)]
pub struct LoginParameters {
    /// Username or email
    pub id: String,
    pub password: String,
}

impl fmt::Debug for LoginParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginParameters")
            .field("id", &self.id)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Login endpoint client
#[derive(Debug, Clone)]
pub struct Client {
    cfg: Config,
}

impl Client {
    /// Login establishes the session; the call itself is unauthenticated
    pub const AUTH_MODE: AuthMode = AuthMode::Session;

    pub fn new(cfg: &Config) -> Self {
        Self { cfg: cfg.clone() }
    }

    pub async fn login(&self, params: &LoginParameters) -> Result<()> {
        let http = self.cfg.client();
        let req = http.new_json_request(Method::POST, BASE_PATH, "", params)?;
        http.execute_unit(req).await?;
        tracing::debug!("session established for {}", params.id);
        Ok(())
    }
}
