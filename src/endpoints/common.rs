//! Payload pieces shared by several endpoint families

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// A single resource object in a `{"data": ...}` response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSet {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: Uuid,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub attributes: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub relationships: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub meta: Map<String, Value>,
}

impl DataSet {
    /// String attribute by key
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).and_then(Value::as_str)
    }
}

/// `{"data": {"type": <kind>, "id"?: <id>, ...inner}}`
///
/// The type tag is fixed by the endpoint that builds the envelope.
#[derive(Debug, Serialize)]
pub(crate) struct Envelope<'a, T: Serialize> {
    data: Typed<'a, T>,
}

#[derive(Debug, Serialize)]
struct Typed<'a, T: Serialize> {
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<Uuid>,
    #[serde(flatten)]
    inner: &'a T,
}

impl<'a, T: Serialize> Envelope<'a, T> {
    pub(crate) fn new(kind: &'static str, inner: &'a T) -> Self {
        Self {
            data: Typed {
                kind,
                id: None,
                inner,
            },
        }
    }

    pub(crate) fn with_id(kind: &'static str, id: Uuid, inner: &'a T) -> Self {
        Self {
            data: Typed {
                kind,
                id: Some(id),
                inner,
            },
        }
    }
}

/// `{"data": <one object>}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataResponse {
    pub data: DataSet,
}

/// `{"data": [<objects>]}`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DataListResponse {
    #[serde(default)]
    pub data: Vec<DataSet>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Inner {
        attributes: Value,
    }

    #[test]
    fn test_envelope_tag_comes_first() {
        let inner = Inner {
            attributes: serde_json::json!({"name": "n"}),
        };
        let body = serde_json::to_string(&Envelope::new("tokens", &inner)).unwrap();
        assert_eq!(body, r#"{"data":{"type":"tokens","attributes":{"name":"n"}}}"#);
    }

    #[test]
    fn test_envelope_with_id() {
        let inner = Inner {
            attributes: serde_json::json!({}),
        };
        let id = Uuid::nil();
        let body = serde_json::to_string(&Envelope::with_id("tokens", id, &inner)).unwrap();
        assert_eq!(
            body,
            r#"{"data":{"type":"tokens","id":"00000000-0000-0000-0000-000000000000","attributes":{}}}"#
        );
    }

    #[test]
    fn test_dataset_decodes_sparse_object() {
        let ds: DataSet = serde_json::from_str(
            r#"{"type":"tokens","id":"6ae9e1c4-7a5b-4c3b-9d7c-2a6f1f0e9b11","attributes":{"name":"ci"}}"#,
        )
        .unwrap();
        assert_eq!(ds.kind, "tokens");
        assert_eq!(ds.attribute("name"), Some("ci"));
        assert!(ds.meta.is_empty());
    }
}
