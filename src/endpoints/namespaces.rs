//! Namespaces
//!
//! The newer name for accounts: the same records, served under
//! `v1/namespaces`.

use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::accounts::AccountType;
use super::controlplanes::ControlPlaneResponse;
use super::organizations::Organization;
use super::segment;
use super::users::User;
use crate::http::{AuthMode, Result};
use crate::Config;

const BASE_PATH: &str = "v1/namespaces";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Namespace {
    pub id: u32,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: AccountType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceResponse {
    pub namespace: Namespace,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<Organization>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

/// Namespace endpoint client
#[derive(Debug, Clone)]
pub struct Client {
    cfg: Config,
}

impl Client {
    pub const AUTH_MODE: AuthMode = AuthMode::Session;

    pub fn new(cfg: &Config) -> Self {
        Self { cfg: cfg.clone() }
    }

    pub async fn get(&self, name: &str) -> Result<NamespaceResponse> {
        let http = self.cfg.client();
        let req = http.new_request(Method::GET, BASE_PATH, &segment(name))?;
        http.execute(req).await
    }

    pub async fn list(&self) -> Result<Vec<NamespaceResponse>> {
        let http = self.cfg.client();
        let req = http.new_request(Method::GET, BASE_PATH, "")?;
        http.execute(req).await
    }

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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoints::organizations::OrganizationPermission;

    #[test]
    fn test_namespace_response_decodes_organization() {
        let body = r#"{
            "namespace": {"id": 12, "name": "acme", "type": "organization"},
            "organization": {"id": 3, "name": "acme", "displayName": "Acme", "role": "member"}
        }"#;
        let resp: NamespaceResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.namespace.kind, AccountType::Organization);
        assert_eq!(resp.namespace.name, "acme");
        let org = resp.organization.unwrap();
        assert_eq!(org.display_name, "Acme");
        assert_eq!(org.role, Some(OrganizationPermission::Member));
        assert!(resp.user.is_none());
    }

    #[test]
    fn test_namespace_response_decodes_user() {
        let body = r#"{
            "namespace": {"id": 7, "name": "jdoe", "type": "user"},
            "user": {"id": 7, "username": "jdoe", "email": "jdoe@example.com"}
        }"#;
        let resp: NamespaceResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.namespace.kind, AccountType::User);
        assert_eq!(resp.user.unwrap().email, "jdoe@example.com");
        assert!(resp.organization.is_none());
    }
}
