//! Users

use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::common::DataListResponse;
use crate::http::{AuthMode, Result};
use crate::Config;

const BASE_PATH: &str = "v1/users";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u32,
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// User endpoint client
#[derive(Debug, Clone)]
pub struct Client {
    cfg: Config,
}

impl Client {
    pub const AUTH_MODE: AuthMode = AuthMode::Session;

    pub fn new(cfg: &Config) -> Self {
        Self { cfg: cfg.clone() }
    }

    /// List the API tokens owned by a user
    pub async fn list_tokens(&self, user_id: u32) -> Result<DataListResponse> {
        let http = self.cfg.client();
        let req = http.new_request(Method::GET, BASE_PATH, &format!("{}/tokens", user_id))?;
        http.execute(req).await
    }
}
