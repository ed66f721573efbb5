//! Control planes
//!
//! Control planes are addressed by UUID. Listing goes through the owning
//! account, see [`Client::list`].

use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::http::{AuthMode, Result};
use crate::Config;

const BASE_PATH: &str = "v1/controlPlanes";

/// Parameters for creating a control plane
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlPlaneCreateParameters {
    /// Account that will own the control plane
    pub namespace: String,
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub self_hosted: Option<bool>,
    #[serde(rename = "kubeClusterID", default, skip_serializing_if = "Option::is_none")]
    pub kube_cluster_id: Option<String>,
}

/// A control plane record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlPlane {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub creator_id: u32,
    #[serde(default)]
    pub reserved: bool,
    #[serde(default)]
    pub self_hosted: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Lifecycle state reported for a control plane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Status {
    Provisioning,
    Updating,
    Ready,
    Deleting,
    #[serde(other)]
    Unknown,
}

/// The caller's role on a control plane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Permission {
    Owner,
    Editor,
    Viewer,
    #[serde(other)]
    None,
}

/// Response for a single control plane
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlPlaneResponse {
    #[serde(rename = "controlPlane")]
    pub control_plane: ControlPlane,
    #[serde(
        rename = "controlPlanestatus",
        alias = "controlPlaneStatus",
        alias = "status",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<Status>,
    #[serde(
        rename = "controlPlanePermission",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub permission: Option<Permission>,
}

/// Control plane endpoint client
#[derive(Debug, Clone)]
pub struct Client {
    cfg: Config,
}

impl Client {
    pub const AUTH_MODE: AuthMode = AuthMode::Session;

    pub fn new(cfg: &Config) -> Self {
        Self { cfg: cfg.clone() }
    }

    /// Create a control plane
    pub async fn create(
        &self,
        params: &ControlPlaneCreateParameters,
    ) -> Result<ControlPlaneResponse> {
        let http = self.cfg.client();
        let req = http.new_json_request(Method::POST, BASE_PATH, "", params)?;
        http.execute(req).await
    }

    /// Get a control plane by id
    pub async fn get(&self, id: Uuid) -> Result<ControlPlaneResponse> {
        let http = self.cfg.client();
        let req = http.new_request(Method::GET, BASE_PATH, &id.to_string())?;
        http.execute(req).await
    }

    /// Delete a control plane by id
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let http = self.cfg.client();
        let req = http.new_request(Method::DELETE, BASE_PATH, &id.to_string())?;
        http.execute_unit(req).await
    }

    /// List the control planes owned by an account
    pub async fn list(&self, account: &str) -> Result<Vec<ControlPlaneResponse>> {
        super::accounts::Client::new(&self.cfg)
            .list_control_planes(account)
            .await
    }
}
