//! Configurations and configuration templates

use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::segment;
use crate::http::options::apply_all;
use crate::http::{with_page, AuthMode, ListOption, Result};
use crate::Config;

const BASE_PATH: &str = "v1/configurations";

const TEMPLATES_PATH: &str = "v1/configurationTemplates";

/// Source control provider backing a configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProviderType {
    #[default]
    Github,
}

/// Parameters for creating a configuration from a template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationCreateParameters {
    pub name: String,
    /// Repository owner on the provider, e.g. a GitHub organization
    pub context: String,
    pub template_id: String,
    #[serde(default)]
    pub provider: ProviderType,
    #[serde(default)]
    pub private: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationResponse {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub provider: ProviderType,
    #[serde(default)]
    pub context: String,
    #[serde(default)]
    pub template_id: String,
    #[serde(default)]
    pub creator_id: u32,
    #[serde(default)]
    pub latest_version: Option<String>,
    #[serde(default)]
    pub sync_status: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A page of configurations, or all of them when returned by [`Client::list`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationListResponse {
    #[serde(default)]
    pub configurations: Vec<ConfigurationResponse>,
    #[serde(default)]
    pub size: u32,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationTemplateResponse {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub repo: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationTemplateListResponse {
    #[serde(default)]
    pub templates: Vec<ConfigurationTemplateResponse>,
}

/// Configuration endpoint client
#[derive(Debug, Clone)]
pub struct Client {
    cfg: Config,
}

impl Client {
    pub const AUTH_MODE: AuthMode = AuthMode::Session;

    pub fn new(cfg: &Config) -> Self {
        Self { cfg: cfg.clone() }
    }

    /// Fetch all configurations of an account (auto-paginate)
    ///
    /// Requests pages 0, 1, ... with the server's default page size until a
    /// page comes back short or empty.
    pub async fn list(&self, account: &str) -> Result<ConfigurationListResponse> {
        let mut all = ConfigurationListResponse::default();
        let mut page = 0;

        loop {
            let result = self.list_page(account, &[with_page(page)]).await?;
            all.count += result.count;
            all.size = result.size;
            all.configurations.extend(result.configurations);

            // size == 0 would never produce a short page
            if result.count == 0 || result.count < result.size || result.size == 0 {
                break;
            }
            page += 1;
        }

        tracing::debug!("listed {} configurations in {} pages", all.count, page + 1);
        Ok(all)
    }

    /// Fetch one page of configurations
    pub async fn list_page(
        &self,
        account: &str,
        options: &[ListOption],
    ) -> Result<ConfigurationListResponse> {
        let http = self.cfg.client();
        let mut req = http.new_request(Method::GET, BASE_PATH, &segment(account))?;
        apply_all(&mut req, options);
        http.execute(req).await
    }

    pub async fn get(&self, account: &str, name: &str) -> Result<ConfigurationResponse> {
        let http = self.cfg.client();
        let req = http.new_request(
            Method::GET,
            BASE_PATH,
            &format!("{}/{}", segment(account), segment(name)),
        )?;
        http.execute(req).await
    }

    pub async fn create(
        &self,
        account: &str,
        params: &ConfigurationCreateParameters,
    ) -> Result<ConfigurationResponse> {
        let http = self.cfg.client();
        let req = http.new_json_request(Method::POST, BASE_PATH, &segment(account), params)?;
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

    /// List the templates new configurations can start from
    pub async fn list_templates(&self) -> Result<ConfigurationTemplateListResponse> {
        let http = self.cfg.client();
        let req = http.new_request(Method::GET, TEMPLATES_PATH, "")?;
        http.execute(req).await
    }
}
