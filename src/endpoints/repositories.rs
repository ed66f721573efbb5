//! Package repositories
//!
//! Repositories are addressed by `(account, name)`.

use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::segment;
use crate::http::options::apply_all;
use crate::http::{AuthMode, ListOption, Result};
use crate::Config;

const BASE_PATH: &str = "v1/repositories";

/// Flags applied to a create-or-update request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryOption {
    Public,
    Private,
    Publish,
    Draft,
}

pub fn with_public() -> RepositoryOption {
    RepositoryOption::Public
}

pub fn with_private() -> RepositoryOption {
    RepositoryOption::Private
}

pub fn with_publish() -> RepositoryOption {
    RepositoryOption::Publish
}

pub fn with_draft() -> RepositoryOption {
    RepositoryOption::Draft
}

/// Body of a create-or-update call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryCreateOrUpdateRequest {
    pub public: bool,
    pub publish: bool,
}

impl RepositoryCreateOrUpdateRequest {
    pub fn from_options(options: &[RepositoryOption]) -> Self {
        let mut req = Self::default();
        for option in options {
            match option {
                RepositoryOption::Public => req.public = true,
                RepositoryOption::Private => req.public = false,
                RepositoryOption::Publish => req.publish = true,
                RepositoryOption::Draft => req.publish = false,
            }
        }
        req
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
    #[serde(rename = "repositoryId")]
    pub id: u32,
    pub account_id: u32,
    pub name: String,
    #[serde(default)]
    pub public: bool,
    #[serde(default)]
    pub publish: bool,
    /// Package kind, e.g. `provider` or `configuration`
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_version: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A repository together with its package versions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryResponse {
    #[serde(flatten)]
    pub repository: Repository,
    #[serde(default)]
    pub versions: Vec<String>,
}

/// One page of repositories
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryListResponse {
    #[serde(default)]
    pub repositories: Vec<Repository>,
    pub size: u32,
    pub page: u32,
    pub count: u32,
}

/// Repository endpoint client
#[derive(Debug, Clone)]
pub struct Client {
    cfg: Config,
}

impl Client {
    pub const AUTH_MODE: AuthMode = AuthMode::Session;

    pub fn new(cfg: &Config) -> Self {
        Self { cfg: cfg.clone() }
    }

    /// Create a repository, or update the flags of an existing one
    ///
    /// Without options the repository is private and draft.
    pub async fn create_or_update_with_options(
        &self,
        account: &str,
        name: &str,
        options: &[RepositoryOption],
    ) -> Result<()> {
        let http = self.cfg.client();
        let body = RepositoryCreateOrUpdateRequest::from_options(options);
        let req = http.new_json_request(
            Method::PUT,
            BASE_PATH,
            &format!("{}/{}", segment(account), segment(name)),
            &body,
        )?;
        http.execute_unit(req).await
    }

    pub async fn get(&self, account: &str, name: &str) -> Result<RepositoryResponse> {
        let http = self.cfg.client();
        let req = http.new_request(
            Method::GET,
            BASE_PATH,
            &format!("{}/{}", segment(account), segment(name)),
        )?;
        http.execute(req).await
    }

    /// One page of an account's repositories
    pub async fn list(
        &self,
        account: &str,
        options: &[ListOption],
    ) -> Result<RepositoryListResponse> {
        let http = self.cfg.client();
        let mut req = http.new_request(Method::GET, BASE_PATH, &segment(account))?;
        apply_all(&mut req, options);
        http.execute(req).await
    }

    pub async fn delete(&self, account: &str, name: &str) -> Result<()> {
        let http = self.cfg.client();
        let req = http.new_request(
            Method::DELETE,
            BASE_PATH,
            &format!("{}/{}", segment(account), segment(name)),
        )?;
        http.execute_unit(req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(options: &[RepositoryOption]) -> String {
        serde_json::to_string(&RepositoryCreateOrUpdateRequest::from_options(options)).unwrap()
    }

    #[test]
    fn test_public_publish() {
        assert_eq!(
            body(&[with_public(), with_publish()]),
            r#"{"public":true,"publish":true}"#
        );
    }

    #[test]
    fn test_private_draft() {
        assert_eq!(
            body(&[with_private(), with_draft()]),
            r#"{"public":false,"publish":false}"#
        );
    }

    #[test]
    fn test_last_option_wins() {
        assert_eq!(
            body(&[with_public(), with_private(), with_draft(), with_publish()]),
            r#"{"public":false,"publish":true}"#
        );
    }

    #[test]
    fn test_response_flattens_repository() {
        let raw = r#"{
            "repositoryId": 12,
            "accountId": 3,
            "name": "getting-started",
            "public": true,
            "type": "configuration",
            "currentVersion": "v0.2.0",
            "versions": ["v0.1.0", "v0.2.0"]
        }"#;
        let resp: RepositoryResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(resp.repository.id, 12);
        assert_eq!(resp.repository.kind.as_deref(), Some("configuration"));
        assert_eq!(resp.versions, vec!["v0.1.0", "v0.2.0"]);
    }
}
