//! Robots
//!
//! Non-human accounts owned by an organization. Bodies use the
//! `{"data": {"type": "robots", ...}}` envelope.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::common::{DataResponse, Envelope};
use crate::http::{AuthMode, Result};
use crate::Config;

const BASE_PATH: &str = "v2/robots";

const ROBOTS_TYPE: &str = "robots";

const OWNER_TYPE: &str = "organization";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RobotAttributes {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RobotOwnerData {
    #[serde(rename = "type")]
    kind: String,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RobotOwner {
    pub data: RobotOwnerData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RobotRelationships {
    #[serde(rename = "organization")]
    pub owner: RobotOwner,
}

/// Parameters for creating a robot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RobotCreateParameters {
    pub attributes: RobotAttributes,
    pub relationships: RobotRelationships,
}

impl RobotCreateParameters {
    /// A robot named `name` owned by organization `org_id`
    pub fn new(name: &str, description: &str, org_id: &str) -> Self {
        Self {
            attributes: RobotAttributes {
                name: name.to_string(),
                description: description.to_string(),
            },
            relationships: RobotRelationships {
                owner: RobotOwner {
                    data: RobotOwnerData {
                        kind: OWNER_TYPE.to_string(),
                        id: org_id.to_string(),
                    },
                },
            },
        }
    }
}

/// Robot endpoint client
#[derive(Debug, Clone)]
pub struct Client {
    cfg: Config,
}

impl Client {
    pub const AUTH_MODE: AuthMode = AuthMode::Session;

    pub fn new(cfg: &Config) -> Self {
        Self { cfg: cfg.clone() }
    }

    pub async fn create(&self, params: &RobotCreateParameters) -> Result<DataResponse> {
        let http = self.cfg.client();
        let body = Envelope::new(ROBOTS_TYPE, params);
        let req = http.new_json_request(Method::POST, BASE_PATH, "", &body)?;
        http.execute(req).await
    }

    pub async fn get(&self, id: Uuid) -> Result<DataResponse> {
        let http = self.cfg.client();
        let req = http.new_request(Method::GET, BASE_PATH, &id.to_string())?;
        http.execute(req).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let http = self.cfg.client();
        let req = http.new_request(Method::DELETE, BASE_PATH, &id.to_string())?;
        http.execute_unit(req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_body() {
        let params = RobotCreateParameters::new("ci", "pipeline robot", "42");
        let value = serde_json::to_value(Envelope::new(ROBOTS_TYPE, &params)).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "data": {
                    "type": "robots",
                    "attributes": {"name": "ci", "description": "pipeline robot"},
                    "relationships": {
                        "organization": {"data": {"type": "organization", "id": "42"}}
                    }
                }
            })
        );
    }
}
