//! Accounts
//!
//! An account is either a user or an organization and is addressed by name.

use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::controlplanes::ControlPlaneResponse;
use super::organizations::Organization;
use super::segment;
use super::users::User;
use crate::http::{AuthMode, Result};
use crate::Config;

const BASE_PATH: &str = "v1/accounts";

/// Kind of owner behind an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AccountType {
    User,
    Organization,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: u32,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: AccountType,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// An account plus the user or organization that backs it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountResponse {
    pub account: Account,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<Organization>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

/// Account endpoint client
#[derive(Debug, Clone)]
pub struct Client {
    cfg: Config,
}

impl Client {
    pub const AUTH_MODE: AuthMode = AuthMode::Session;

    pub fn new(cfg: &Config) -> Self {
        Self { cfg: cfg.clone() }
    }

    /// Get an account by name
    pub async fn get(&self, name: &str) -> Result<AccountResponse> {
        let http = self.cfg.client();
        let req = http.new_request(Method::GET, BASE_PATH, &segment(name))?;
        http.execute(req).await
    }

    /// List the accounts visible to the caller
    pub async fn list(&self) -> Result<Vec<AccountResponse>> {
        let http = self.cfg.client();
        let req = http.new_request(Method::GET, BASE_PATH, "")?;
        http.execute(req).await
    }

    /// List the control planes owned by an account
    pub async fn list_control_planes(&self, name: &str) -> Result<Vec<ControlPlaneResponse>> {
        let http = self.cfg.client();
        let req = http.new_request(
            Method::GET,
            BASE_PATH,
            &format!("{}/controlPlanes", segment(name)),
        )?;
        http.execute(req).await
    }
}
