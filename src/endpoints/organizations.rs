//! Organizations, their invites, members and robots

use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::common::DataListResponse;
use crate::http::{AuthMode, Result};
use crate::Config;

const BASE_PATH: &str = "v1/organizations";

/// Role of a member within an organization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OrganizationPermission {
    Owner,
    Member,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub creator_id: u32,
    /// The caller's role; only present on listings scoped to the caller
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<OrganizationPermission>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationCreateParameters {
    pub name: String,
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invite {
    pub id: u32,
    pub email: String,
    pub permission: OrganizationPermission,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationInviteCreateParameters {
    pub email: String,
    pub permission: OrganizationPermission,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberUser {
    pub id: u32,
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub permission: OrganizationPermission,
    pub user: MemberUser,
}

/// Organization endpoint client
#[derive(Debug, Clone)]
pub struct Client {
    cfg: Config,
}

impl Client {
    pub const AUTH_MODE: AuthMode = AuthMode::Session;

    pub fn new(cfg: &Config) -> Self {
        Self { cfg: cfg.clone() }
    }

    pub async fn create(&self, params: &OrganizationCreateParameters) -> Result<()> {
        let http = self.cfg.client();
        let req = http.new_json_request(Method::POST, BASE_PATH, "", params)?;
        http.execute_unit(req).await
    }

    pub async fn get(&self, id: u32) -> Result<Organization> {
        let http = self.cfg.client();
        let req = http.new_request(Method::GET, BASE_PATH, &id.to_string())?;
        http.execute(req).await
    }

    /// List the organizations the caller belongs to
    pub async fn list(&self) -> Result<Vec<Organization>> {
        let http = self.cfg.client();
        let req = http.new_request(Method::GET, BASE_PATH, "")?;
        http.execute(req).await
    }

    pub async fn list_robots(&self, id: u32) -> Result<DataListResponse> {
        let http = self.cfg.client();
        let req = http.new_request(Method::GET, BASE_PATH, &format!("{}/robots", id))?;
        http.execute(req).await
    }

    pub async fn delete(&self, id: u32) -> Result<()> {
        let http = self.cfg.client();
        let req = http.new_request(Method::DELETE, BASE_PATH, &id.to_string())?;
        http.execute_unit(req).await
    }

    pub async fn list_invites(&self, id: u32) -> Result<Vec<Invite>> {
        let http = self.cfg.client();
        let req = http.new_request(Method::GET, BASE_PATH, &format!("{}/invites", id))?;
        http.execute(req).await
    }

    pub async fn create_invite(
        &self,
        id: u32,
        params: &OrganizationInviteCreateParameters,
    ) -> Result<()> {
        let http = self.cfg.client();
        let req =
            http.new_json_request(Method::POST, BASE_PATH, &format!("{}/invites", id), params)?;
        http.execute_unit(req).await
    }

    pub async fn delete_invite(&self, org_id: u32, invite_id: u32) -> Result<()> {
        let http = self.cfg.client();
        let req = http.new_request(
            Method::DELETE,
            BASE_PATH,
            &format!("{}/invites/{}", org_id, invite_id),
        )?;
        http.execute_unit(req).await
    }

    pub async fn list_members(&self, id: u32) -> Result<Vec<Member>> {
        let http = self.cfg.client();
        let req = http.new_request(Method::GET, BASE_PATH, &format!("{}/members", id))?;
        http.execute(req).await
    }

    pub async fn remove_member(&self, org_id: u32, user_id: u32) -> Result<()> {
        let http = self.cfg.client();
        let req = http.new_request(
            Method::DELETE,
            BASE_PATH,
            &format!("{}/members/{}", org_id, user_id),
        )?;
        http.execute_unit(req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invite_parameters_shape() {
        let params = OrganizationInviteCreateParameters {
            email: "dev@example.com".to_string(),
            permission: OrganizationPermission::Member,
        };
        assert_eq!(
            serde_json::to_string(&params).unwrap(),
            r#"{"email":"dev@example.com","permission":"member"}"#
        );
    }

    #[test]
    fn test_member_decodes() {
        let body = r#"{"permission":"owner","user":{"id":4,"username":"jdoe","firstName":"J"}}"#;
        let member: Member = serde_json::from_str(body).unwrap();
        assert_eq!(member.permission, OrganizationPermission::Owner);
        assert_eq!(member.user.username, "jdoe");
        assert_eq!(member.user.last_name, "");
    }
}
