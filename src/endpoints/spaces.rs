//! Spaces
//!
//! Served by a kubernetes-shaped API: paths look like
//! `apis/upbound.io/v1alpha1/namespaces/<ns>/spaces[/<name>]`, options travel
//! as metav1 query parameters and failures come back as a metav1 `Status`.

use std::sync::Arc;
use std::sync::OnceLock;

use bytes::Bytes;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::segment;
use crate::http::{AuthMode, ClientOption, Error, HttpClient, Result};
use crate::kube::scheme::decoder;
use crate::kube::{
    CreateOptions, DeleteOptions, ListMeta, ListOptions, ObjectMeta, ParameterCodec, Scheme,
    Status, StatusError, StatusErrorHandler, TypeMeta,
};
use crate::Config;

pub const GROUP: &str = "upbound.io";
pub const VERSION: &str = "v1alpha1";
pub const API_VERSION: &str = "upbound.io/v1alpha1";
pub const KIND: &str = "Space";
pub const LIST_KIND: &str = "SpaceList";

const BASE_PATH: &str = "apis/upbound.io/v1alpha1/namespaces";

/// A space. Its spec and status schemas are server-defined and kept opaque.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Space {
    #[serde(flatten)]
    pub types: TypeMeta,
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub spec: Value,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub status: Value,
}

impl Space {
    /// An empty space named `name`, with apiVersion and kind set
    pub fn new(name: &str) -> Self {
        Self {
            types: TypeMeta::new(API_VERSION, KIND),
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                ..ObjectMeta::default()
            },
            ..Self::default()
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.metadata.name.as_deref()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpaceList {
    #[serde(flatten)]
    pub types: TypeMeta,
    #[serde(default)]
    pub metadata: ListMeta,
    #[serde(default)]
    pub items: Vec<Space>,
}

/// Every kind a spaces response can decode to
#[derive(Debug, Clone, PartialEq)]
pub enum SpaceObject {
    Space(Box<Space>),
    SpaceList(SpaceList),
    Status(Status),
}

impl SpaceObject {
    fn kind(&self) -> &'static str {
        match self {
            SpaceObject::Space(_) => KIND,
            SpaceObject::SpaceList(_) => LIST_KIND,
            SpaceObject::Status(_) => "Status",
        }
    }
}

impl From<Status> for SpaceObject {
    fn from(s: Status) -> Self {
        SpaceObject::Status(s)
    }
}

impl From<Space> for SpaceObject {
    fn from(s: Space) -> Self {
        SpaceObject::Space(Box::new(s))
    }
}

impl From<SpaceList> for SpaceObject {
    fn from(l: SpaceList) -> Self {
        SpaceObject::SpaceList(l)
    }
}

/// Scheme registering the space kinds plus metav1 `Status`
pub fn scheme() -> &'static Scheme<SpaceObject> {
    static SCHEME: OnceLock<Scheme<SpaceObject>> = OnceLock::new();
    SCHEME.get_or_init(|| {
        let mut scheme = Scheme::new();
        scheme.register(API_VERSION, KIND, decoder::<Space, SpaceObject>);
        scheme.register(API_VERSION, LIST_KIND, decoder::<SpaceList, SpaceObject>);
        scheme
    })
}

/// Space endpoint client
#[derive(Debug, Clone)]
pub struct Client {
    http: HttpClient,
}

impl Client {
    pub const AUTH_MODE: AuthMode = AuthMode::Session;

    /// Wraps the shared client with a status-decoding error handler; the
    /// shared client itself is not modified.
    pub fn new(cfg: &Config) -> Self {
        let http = cfg
            .client()
            .with([ClientOption::ErrorHandler(Arc::new(StatusErrorHandler))]);
        Self { http }
    }

    pub async fn create(
        &self,
        namespace: &str,
        space: &Space,
        options: &CreateOptions,
    ) -> Result<Space> {
        let path = options.append_to(&format!("{}/spaces", segment(namespace)));
        let req = self
            .http
            .new_json_request(Method::POST, BASE_PATH, &path, space)?;
        let body = self.http.execute_bytes(req).await?;
        expect_space(decode(&body, KIND)?)
    }

    pub async fn get(&self, namespace: &str, name: &str) -> Result<Space> {
        let path = format!("{}/spaces/{}", segment(namespace), segment(name));
        let req = self.http.new_request(Method::GET, BASE_PATH, &path)?;
        let body = self.http.execute_bytes(req).await?;
        expect_space(decode(&body, KIND)?)
    }

    pub async fn list(&self, namespace: &str, options: &ListOptions) -> Result<SpaceList> {
        let path = options.append_to(&format!("{}/spaces", segment(namespace)));
        let req = self.http.new_request(Method::GET, BASE_PATH, &path)?;
        let body = self.http.execute_bytes(req).await?;
        match decode(&body, LIST_KIND)? {
            SpaceObject::SpaceList(list) => Ok(list),
            other => Err(Error::UnexpectedKind {
                expected: LIST_KIND,
                found: other.kind().to_string(),
            }),
        }
    }

    /// Delete a space. The server answers with either the deleted object or
    /// a `Success` status; both count as success. An untyped body is taken
    /// to be the deleted object.
    pub async fn delete(&self, namespace: &str, name: &str, options: &DeleteOptions) -> Result<()> {
        let path = options.append_to(&format!("{}/spaces/{}", segment(namespace), segment(name)));
        let req = self.http.new_request(Method::DELETE, BASE_PATH, &path)?;
        let body = self.http.execute_bytes(req).await?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(());
        }
        decode(&body, KIND).map(|_| ())
    }
}

/// Decode a response body; a non-`Success` status is an error even on 2xx
///
/// Bodies without `apiVersion`/`kind` are decoded as `expected`.
fn decode(body: &Bytes, expected: &str) -> Result<SpaceObject> {
    let fallback = TypeMeta::new(API_VERSION, expected);

    match scheme().decode(body, &fallback)? {
        SpaceObject::Status(status) if !status.is_success() => {
            Err(StatusError::from_status(status, None).into())
        }
        obj => Ok(obj),
    }
}

fn expect_space(obj: SpaceObject) -> Result<Space> {
    match obj {
        SpaceObject::Space(space) => Ok(*space),
        other => Err(Error::UnexpectedKind {
            expected: KIND,
            found: other.kind().to_string(),
        }),
    }
}
