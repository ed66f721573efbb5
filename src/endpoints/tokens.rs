//! API tokens
//!
//! Request bodies use the `{"data": {"type": "tokens", ...}}` envelope.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::common::{DataResponse, Envelope};
use crate::http::{AuthMode, Error, Result};
use crate::Config;

const BASE_PATH: &str = "v1/tokens";

const TOKENS_TYPE: &str = "tokens";

/// Kind of principal a token belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenOwnerType {
    #[serde(rename = "users")]
    User,
    #[serde(rename = "controlPlanes")]
    ControlPlane,
    #[serde(rename = "robots")]
    Robot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenAttributes {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenOwnerData {
    #[serde(rename = "type")]
    pub kind: TokenOwnerType,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenOwner {
    pub data: TokenOwnerData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRelationships {
    #[serde(rename = "organization")]
    pub owner: TokenOwner,
}

/// Parameters for creating a token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenCreateParameters {
    pub attributes: TokenAttributes,
    pub relationships: TokenRelationships,
}

impl TokenCreateParameters {
    pub fn new(name: &str, owner: TokenOwnerType, owner_id: &str) -> Self {
        Self {
            attributes: TokenAttributes {
                name: name.to_string(),
            },
            relationships: TokenRelationships {
                owner: TokenOwner {
                    data: TokenOwnerData {
                        kind: owner,
                        id: owner_id.to_string(),
                    },
                },
            },
        }
    }
}

/// Parameters for renaming a token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUpdateParameters {
    #[serde(skip)]
    pub id: Uuid,
    pub attributes: TokenAttributes,
}

/// Token endpoint client
#[derive(Debug, Clone)]
pub struct Client {
    cfg: Config,
}

impl Client {
    pub const AUTH_MODE: AuthMode = AuthMode::Session;

    pub fn new(cfg: &Config) -> Self {
        Self { cfg: cfg.clone() }
    }

    /// Create a token; the response carries the secret exactly once
    pub async fn create(&self, params: &TokenCreateParameters) -> Result<DataResponse> {
        let http = self.cfg.client();
        let body = Envelope::new(TOKENS_TYPE, params);
        let req = http.new_json_request(Method::POST, BASE_PATH, "", &body)?;
        http.execute(req).await
    }

    pub async fn get(&self, id: Uuid) -> Result<DataResponse> {
        let http = self.cfg.client();
        let req = http.new_request(Method::GET, BASE_PATH, &id.to_string())?;
        http.execute(req).await
    }

    /// Update a token. Fails without a request if `params` is missing or
    /// has no id.
    pub async fn update(&self, params: Option<&TokenUpdateParameters>) -> Result<DataResponse> {
        let params = params.ok_or(Error::MissingParameter("params"))?;
        if params.id.is_nil() {
            return Err(Error::MissingParameter("id"));
        }

        let http = self.cfg.client();
        let body = Envelope::with_id(TOKENS_TYPE, params.id, params);
        let req = http.new_json_request(Method::PATCH, BASE_PATH, &params.id.to_string(), &body)?;
        http.execute(req).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let http = self.cfg.client();
        let req = http.new_request(Method::DELETE, BASE_PATH, &id.to_string())?;
        http.execute_unit(req).await
    }
}
