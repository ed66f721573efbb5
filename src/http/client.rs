//! HTTP client for Upbound API calls
//!
//! [`HttpClient`] owns the base URL, the request executor and its cookie jar,
//! the user agent and the error handler. It is one-shot: nothing is retried.

use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::{HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use url::{Position, Url};

use super::error::{DefaultErrorHandler, Error, ErrorHandler, Handled, Result};
use super::request::Request;

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Sanitize response body for logging
/// Truncates long responses and strips control characters
fn sanitize_for_log(body: &[u8]) -> String {
    let body = String::from_utf8_lossy(body);
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        let cut = (0..=MAX_LOG_BODY_LENGTH)
            .rev()
            .find(|i| body.is_char_boundary(*i))
            .unwrap_or(0);
        format!("{}... [truncated, {} bytes total]", &body[..cut], body.len())
    } else {
        body.into_owned()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// How an endpoint family expects callers to be authenticated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// Session cookie from a prior `login` on the same client.
    /// The login call must complete before any session-authenticated call.
    Session,
    /// `Authorization: Bearer <token>` supplied per call
    Bearer,
}

/// A replacement applied by [`HttpClient::with`]
#[derive(Clone)]
pub enum ClientOption {
    BaseUrl(Url),
    /// Replaces the executor. The client's cookie jar is only consulted if
    /// the new executor was built with it as its cookie provider.
    Executor(reqwest::Client),
    UserAgent(HeaderValue),
    ErrorHandler(Arc<dyn ErrorHandler>),
    /// Attach `Authorization: Bearer` to every request
    BearerToken(String),
    /// Cancellation applied to every request that has none of its own
    Cancellation(CancellationToken),
}

/// HTTP client wrapper for Upbound API calls
#[derive(Clone)]
pub struct HttpClient {
    base_url: Url,
    executor: reqwest::Client,
    user_agent: HeaderValue,
    error_handler: Arc<dyn ErrorHandler>,
    cookies: Arc<Jar>,
    bearer: Option<String>,
    cancel: Option<CancellationToken>,
}

impl fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url.as_str())
            .field("user_agent", &self.user_agent)
            .field("error_handler", &self.error_handler)
            .field("bearer", &self.bearer.as_ref().map(|_| "<redacted>"))
            .finish_non_exhaustive()
    }
}

impl HttpClient {
    /// Create a new HTTP client against an absolute base URL
    ///
    /// The executor keeps a cookie jar for the lifetime of the client, so a
    /// session established by `login` is reused by every later call.
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = parse_base_url(base_url)?;
        let cookies = Arc::new(Jar::default());
        let executor = reqwest::Client::builder()
            .cookie_provider(Arc::clone(&cookies))
            .build()?;

        Ok(Self {
            base_url,
            executor,
            user_agent: default_user_agent(),
            error_handler: Arc::new(DefaultErrorHandler),
            cookies,
            bearer: None,
            cancel: None,
        })
    }

    /// Shallow copy with the options applied; `self` is left untouched
    pub fn with(&self, options: impl IntoIterator<Item = ClientOption>) -> Self {
        let mut client = self.clone();
        for option in options {
            match option {
                ClientOption::BaseUrl(url) => client.base_url = url,
                ClientOption::Executor(executor) => client.executor = executor,
                ClientOption::UserAgent(agent) => client.user_agent = agent,
                ClientOption::ErrorHandler(handler) => client.error_handler = handler,
                ClientOption::BearerToken(token) => client.bearer = Some(token),
                ClientOption::Cancellation(token) => client.cancel = Some(token),
            }
        }
        client
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn user_agent(&self) -> &HeaderValue {
        &self.user_agent
    }

    /// Cookie jar shared by every copy made with [`HttpClient::with`]
    pub fn cookies(&self) -> &Arc<Jar> {
        &self.cookies
    }

    pub fn executor(&self) -> &reqwest::Client {
        &self.executor
    }

    /// Cookies the jar would send to the base URL, as a `Cookie` header value
    pub fn session_cookies(&self) -> Option<String> {
        self.cookies
            .cookies(&self.base_url)
            .and_then(|value| value.to_str().ok().map(str::to_string))
    }

    /// Load cookies saved with [`HttpClient::session_cookies`] into the jar
    pub fn restore_session(&self, cookies: &str) {
        for pair in cookies.split(';').map(str::trim).filter(|p| !p.is_empty()) {
            self.cookies.add_cookie_str(pair, &self.base_url);
        }
    }

    /// Build a body-less request for `<base>/<prefix>/<subpath>`
    pub fn new_request(&self, method: Method, prefix: &str, subpath: &str) -> Result<Request> {
        let url = join_url(&self.base_url, prefix, subpath)?;
        let mut req = Request::new(method, url);
        req.set_header(ACCEPT, HeaderValue::from_static("application/json"));
        req.set_header(USER_AGENT, self.user_agent.clone());
        if let Some(token) = &self.bearer {
            req.set_header(AUTHORIZATION, bearer_header(token)?);
        }
        Ok(req)
    }

    /// Build a request carrying `body` serialized as JSON
    pub fn new_json_request<B>(
        &self,
        method: Method,
        prefix: &str,
        subpath: &str,
        body: &B,
    ) -> Result<Request>
    where
        B: Serialize + ?Sized,
    {
        let encoded = serde_json::to_vec(body).map_err(Error::Encode)?;
        let mut req = self.new_request(method, prefix, subpath)?;
        req.set_body(encoded, HeaderValue::from_static("application/json"));
        Ok(req)
    }

    /// Dispatch and decode a successful JSON body into `T`
    pub async fn execute<T: DeserializeOwned>(&self, req: Request) -> Result<T> {
        let body = self.execute_bytes(req).await?;
        serde_json::from_slice(&body).map_err(Error::Decode)
    }

    /// Dispatch and discard a successful body
    pub async fn execute_unit(&self, req: Request) -> Result<()> {
        self.execute_bytes(req).await.map(|_| ())
    }

    /// Dispatch and return the raw body of a successful response
    pub async fn execute_bytes(&self, req: Request) -> Result<Bytes> {
        let (status, body) = self.dispatch(req).await?;
        self.classify(status, body)
    }

    async fn dispatch(&self, mut req: Request) -> Result<(StatusCode, Bytes)> {
        req.set_cancellation_if_unset(self.cancel.as_ref());
        let cancel = req.cancellation().cloned();
        if cancel.as_ref().is_some_and(|t| t.is_cancelled()) {
            return Err(Error::Cancelled);
        }

        let (method, url, headers, body) = req.into_parts();
        tracing::debug!("{} {}", method, url);

        let mut builder = self.executor.request(method, url).headers(headers);
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let send = async {
            let response = builder.send().await?;
            let status = response.status();
            let body = response.bytes().await?;
            Ok::<_, Error>((status, body))
        };

        match cancel {
            Some(token) => tokio::select! {
                _ = token.cancelled() => Err(Error::Cancelled),
                res = send => res,
            },
            None => send.await,
        }
    }

    fn classify(&self, status: StatusCode, body: Bytes) -> Result<Bytes> {
        tracing::trace!("response status {}", status);
        if status.is_success() {
            return Ok(body);
        }

        tracing::trace!("response body: {}", sanitize_for_log(&body));
        match self.error_handler.handle(status, body) {
            Handled::Error(err) => Err(err),
            Handled::Passthrough(body) => Ok(body),
        }
    }
}

/// Process-wide user agent: `<product>/<version>`
pub fn default_user_agent() -> HeaderValue {
    HeaderValue::from_str(&format!("{}/{}", crate::PRODUCT, crate::VERSION))
        .unwrap_or_else(|_| HeaderValue::from_static(crate::PRODUCT))
}

pub(crate) fn bearer_header(token: &str) -> Result<HeaderValue> {
    let mut value = HeaderValue::from_str(&format!("Bearer {}", token))?;
    value.set_sensitive(true);
    Ok(value)
}

fn parse_base_url(base_url: &str) -> Result<Url> {
    let url = Url::parse(base_url).map_err(|source| Error::InvalidTarget {
        target: base_url.to_string(),
        source,
    })?;
    if url.cannot_be_a_base() || url.host().is_none() {
        return Err(Error::InvalidTarget {
            target: base_url.to_string(),
            source: url::ParseError::EmptyHost,
        });
    }
    Ok(url)
}

/// Join `base`, `prefix` and `subpath` as path components
///
/// Empty components and stray slashes are dropped. `subpath` may carry a
/// pre-encoded `?query`, which is kept as-is.
pub fn join_url(base: &Url, prefix: &str, subpath: &str) -> Result<Url> {
    let (subpath, query) = match subpath.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (subpath, None),
    };

    let segments: Vec<&str> = [base.path(), prefix, subpath]
        .iter()
        .flat_map(|part| part.split('/'))
        .filter(|segment| !segment.is_empty())
        .collect();

    let mut target = format!("{}/{}", &base[..Position::BeforePath], segments.join("/"));
    if let Some(query) = query.filter(|q| !q.is_empty()) {
        target.push('?');
        target.push_str(query);
    }

    Url::parse(&target).map_err(|source| Error::InvalidTarget { target, source })
}
