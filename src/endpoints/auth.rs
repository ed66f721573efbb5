//! Org-scoped token exchange
//!
//! Trades an identity token for an access token scoped to one organization.
//! Unlike the other families this endpoint is authenticated with a bearer
//! token passed per call, not with the session cookie.

use reqwest::header::{HeaderValue, AUTHORIZATION, CONTENT_LENGTH};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::http::client::bearer_header;
use crate::http::{AuthMode, Result};
use crate::Config;

const BASE_PATH: &str = "apis/tokenexchange.upbound.io/v1alpha1/orgscopedtokens";

const GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:token-exchange";
const SUBJECT_TOKEN_TYPE: &str = "urn:ietf:params:oauth:token-type:id_token";
const AUDIENCE_API: &str = "upbound:spaces:api";
const AUDIENCE_CONTROL_PLANES: &str = "upbound:spaces:controlplanes";
const SCOPE_PREFIX: &str = "upbound:org:";

/// Result of a token exchange
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenExchangeResponse {
    pub access_token: String,
    #[serde(default)]
    pub issued_token_type: String,
    #[serde(default)]
    pub token_type: String,
    /// Lifetime of the access token in seconds
    #[serde(default)]
    pub expires_in: i64,
}

/// Form body for exchanging `token` for an `org`-scoped access token
pub fn exchange_form(org: &str, token: &str) -> String {
    form_urlencoded::Serializer::new(String::new())
        .append_pair("grant_type", GRANT_TYPE)
        .append_pair("subject_token_type", SUBJECT_TOKEN_TYPE)
        .append_pair("subject_token", token)
        .append_pair("audience", AUDIENCE_API)
        .append_pair("audience", AUDIENCE_CONTROL_PLANES)
        .append_pair("scope", &format!("{}{}", SCOPE_PREFIX, org))
        .finish()
}

/// Token exchange endpoint client
#[derive(Debug, Clone)]
pub struct Client {
    cfg: Config,
}

impl Client {
    pub const AUTH_MODE: AuthMode = AuthMode::Bearer;

    pub fn new(cfg: &Config) -> Self {
        Self { cfg: cfg.clone() }
    }

    /// Exchange an identity `token` for an access token scoped to `org`
    ///
    /// The form body is held in memory, so the executor can replay it on a
    /// redirect.
    pub async fn get_org_scoped_token(
        &self,
        org: &str,
        token: &str,
    ) -> Result<TokenExchangeResponse> {
        let http = self.cfg.client();
        let form = exchange_form(org, token);
        let length = HeaderValue::from(form.len());

        let mut req = http.new_request(Method::POST, BASE_PATH, "")?;
        req.set_body(
            form,
            HeaderValue::from_static("application/x-www-form-urlencoded"),
        );
        req.set_header(CONTENT_LENGTH, length);
        req.set_header(AUTHORIZATION, bearer_header(token)?);
        http.execute(req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_has_six_pairs() {
        let form = exchange_form("acme", "T");
        let pairs: Vec<(String, String)> = form_urlencoded::parse(form.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        assert_eq!(
            pairs,
            vec![
                ("grant_type".to_string(), GRANT_TYPE.to_string()),
                ("subject_token_type".to_string(), SUBJECT_TOKEN_TYPE.to_string()),
                ("subject_token".to_string(), "T".to_string()),
                ("audience".to_string(), "upbound:spaces:api".to_string()),
                ("audience".to_string(), "upbound:spaces:controlplanes".to_string()),
                ("scope".to_string(), "upbound:org:acme".to_string()),
            ]
        );
    }

    #[test]
    fn test_response_decodes() {
        let resp: TokenExchangeResponse = serde_json::from_str(
            r#"{"access_token":"A","token_type":"Bearer","expires_in":3600}"#,
        )
        .unwrap();
        assert_eq!(resp.access_token, "A");
        assert_eq!(resp.expires_in, 3600);
        assert_eq!(resp.issued_token_type, "");
    }
}
