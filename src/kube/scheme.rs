//! A small type registry for kubernetes-shaped bodies
//!
//! Maps `(apiVersion, kind)` to a decoder. The metav1 `Status` kind is always
//! registered; endpoint families register their own kinds on top.

use std::collections::HashMap;

use serde::de::DeserializeOwned;

use super::meta::TypeMeta;
use super::status::Status;
use crate::http::{Error, Result};

type DecodeFn<O> = fn(&[u8]) -> serde_json::Result<O>;

/// Decoder table producing values of `O`
pub struct Scheme<O> {
    decoders: HashMap<(String, String), DecodeFn<O>>,
}

impl<O: From<Status>> Default for Scheme<O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: From<Status>> Scheme<O> {
    /// A scheme knowing only the metav1 `Status` kind
    pub fn new() -> Self {
        let mut scheme = Self {
            decoders: HashMap::new(),
        };
        scheme.register(super::META_V1, "Status", decoder::<Status, O>);
        scheme
    }

    pub fn register(&mut self, api_version: &str, kind: &str, decode: DecodeFn<O>) {
        self.decoders
            .insert((api_version.to_string(), kind.to_string()), decode);
    }

    pub fn is_registered(&self, api_version: &str, kind: &str) -> bool {
        self.decoders
            .contains_key(&(api_version.to_string(), kind.to_string()))
    }

    /// Decode `body` by the `apiVersion`/`kind` it declares
    ///
    /// Bodies that declare neither are decoded as `fallback`.
    pub fn decode(&self, body: &[u8], fallback: &TypeMeta) -> Result<O> {
        let declared: TypeMeta = serde_json::from_slice(body).map_err(Error::Decode)?;
        let types = if declared.is_empty() { fallback } else { &declared };

        let decode = self
            .decoders
            .get(&(types.api_version.clone(), types.kind.clone()))
            .ok_or_else(|| Error::UnregisteredKind {
                api_version: types.api_version.clone(),
                kind: types.kind.clone(),
            })?;

        decode(body).map_err(Error::Decode)
    }
}

/// Decoder for any deserializable `T` convertible into `O`
pub fn decoder<T, O>(body: &[u8]) -> serde_json::Result<O>
where
    T: DeserializeOwned + Into<O>,
{
    serde_json::from_slice::<T>(body).map(Into::into)
}
