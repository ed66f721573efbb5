//! Request descriptors
//!
//! A [`Request`] is built by [`HttpClient::new_request`](super::HttpClient::new_request),
//! may be adjusted by option helpers, and is consumed by a single dispatch.

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use tokio_util::sync::CancellationToken;
use url::Url;

/// An outgoing HTTP request before dispatch
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    url: Url,
    headers: HeaderMap,
    body: Option<Bytes>,
    cancel: Option<CancellationToken>,
}

impl Request {
    pub(crate) fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            body: None,
            cancel: None,
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn url_mut(&mut self) -> &mut Url {
        &mut self.url
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// Replace the body and its content type
    pub fn set_body(&mut self, body: impl Into<Bytes>, content_type: HeaderValue) {
        self.body = Some(body.into());
        self.headers.insert(CONTENT_TYPE, content_type);
    }

    /// Set a header, replacing any previous value
    pub fn set_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers.insert(name, value);
    }

    /// Set a query parameter; the last value set for a key wins
    pub fn set_query(&mut self, key: &str, value: &str) {
        let retained: Vec<(String, String)> = self
            .url
            .query_pairs()
            .filter(|(k, _)| k != key)
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        self.url
            .query_pairs_mut()
            .clear()
            .extend_pairs(retained)
            .append_pair(key, value);
    }

    /// First value of a query parameter
    pub fn query(&self, key: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }

    /// Attach a cancellation token that governs this request only
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub(crate) fn cancellation(&self) -> Option<&CancellationToken> {
        self.cancel.as_ref()
    }

    pub(crate) fn set_cancellation_if_unset(&mut self, token: Option<&CancellationToken>) {
        if self.cancel.is_none() {
            self.cancel = token.cloned();
        }
    }

    pub(crate) fn into_parts(self) -> (Method, Url, HeaderMap, Option<Bytes>) {
        (self.method, self.url, self.headers, self.body)
    }
}
