//! Profile Management
//!
//! Persistent settings for the `up` front-end: the endpoint last logged in
//! to, the default account and the session cookie that login produced.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// User profile
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Profile {
    /// Last used API endpoint
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Default account (user or organization name)
    #[serde(default)]
    pub account: Option<String>,
    /// `Cookie` header value saved after login, valid for `endpoint` only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<String>,
}

impl Profile {
    fn profile_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("up-sdk").join("config.json"))
    }

    /// Load the profile; a missing or unreadable file yields the defaults
    pub fn load() -> Self {
        Self::profile_path()
            .and_then(|path| Self::read_from(&path))
            .unwrap_or_default()
    }

    fn read_from(path: &Path) -> Option<Self> {
        let content = fs::read_to_string(path).ok()?;
        match serde_json::from_str(&content) {
            Ok(profile) => Some(profile),
            Err(err) => {
                tracing::warn!("ignoring malformed profile {}: {}", path.display(), err);
                None
            }
        }
    }

    /// Save the profile. The file holds a session cookie, so on unix it is
    /// readable by the owner only.
    pub fn save(&self) -> Result<()> {
        match Self::profile_path() {
            Some(path) => self.write_to(&path),
            None => Ok(()),
        }
    }

    fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)
            .with_context(|| format!("writing {}", path.display()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
        }
        Ok(())
    }

    /// Get effective endpoint (flag > profile > UP_ENDPOINT/default)
    pub fn effective_endpoint(&self, flag: Option<&str>) -> String {
        flag.map(str::to_string)
            .or_else(|| self.endpoint.clone())
            .unwrap_or_else(crate::config::endpoint_from_env)
    }

    /// Get effective account (flag > profile)
    pub fn effective_account(&self, flag: Option<&str>) -> Option<String> {
        flag.map(str::to_string).or_else(|| self.account.clone())
    }

    /// Saved session cookies, if they were issued by `endpoint`
    pub fn session_for(&self, endpoint: &str) -> Option<&str> {
        match &self.endpoint {
            Some(saved) if saved == endpoint => self.session.as_deref(),
            _ => None,
        }
    }

    /// Record a login against `endpoint` and save
    pub fn set_session(&mut self, endpoint: &str, session: Option<String>) -> Result<()> {
        self.endpoint = Some(endpoint.to_string());
        self.session = session;
        self.save()
    }

    /// Set account and save
    pub fn set_account(&mut self, account: &str) -> Result<()> {
        self.account = Some(account.to_string());
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_beats_profile() {
        let profile = Profile {
            endpoint: Some("https://api.profile.example".to_string()),
            account: Some("acme".to_string()),
            session: None,
        };
        assert_eq!(
            profile.effective_endpoint(Some("https://api.flag.example")),
            "https://api.flag.example"
        );
        assert_eq!(profile.effective_endpoint(None), "https://api.profile.example");
        assert_eq!(profile.effective_account(None).as_deref(), Some("acme"));
        assert_eq!(profile.effective_account(Some("other")).as_deref(), Some("other"));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let profile: Profile = serde_json::from_str(r#"{"account":"acme"}"#).unwrap();
        assert_eq!(profile.endpoint, None);
        assert_eq!(profile.session, None);
        assert_eq!(profile.account.as_deref(), Some("acme"));
    }

    #[test]
    fn test_session_only_for_its_endpoint() {
        let profile = Profile {
            endpoint: Some("https://api.upbound.io".to_string()),
            account: None,
            session: Some("SID=abc".to_string()),
        };
        assert_eq!(profile.session_for("https://api.upbound.io"), Some("SID=abc"));
        assert_eq!(profile.session_for("https://api.other.example"), None);
    }

    #[test]
    fn test_write_then_read() {
        let path = std::env::temp_dir()
            .join(format!("up-sdk-profile-{}", uuid::Uuid::new_v4()))
            .join("config.json");
        let profile = Profile {
            endpoint: Some("https://api.upbound.io".to_string()),
            account: Some("acme".to_string()),
            session: Some("SID=abc".to_string()),
        };

        profile.write_to(&path).unwrap();
        assert_eq!(Profile::read_from(&path), Some(profile));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }

        fs::write(&path, "not json").unwrap();
        assert_eq!(Profile::read_from(&path), None);
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
