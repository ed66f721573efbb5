//! Client SDK for the Upbound control-plane API
//!
//! This crate provides a thin, one-shot HTTP transport for the platform's REST
//! endpoints together with typed request and response payloads for each
//! resource family.
//!
//! # Module Structure
//!
//! - [`config`] - The [`Config`] carrier handed to every endpoint client
//! - [`http`] - HTTP client, request descriptors, option helpers and errors
//! - [`kube`] - Kubernetes-shaped option encoding and status decoding
//! - [`endpoints`] - One client per resource family
//! - [`profile`] - Persisted settings for the `up` command-line front-end
//!
//! # Example
//!
//! ```no_run
//! use up_sdk::endpoints::controlplanes;
//! use up_sdk::Config;
//!
//! async fn example() -> up_sdk::Result<()> {
//!     let cfg = Config::from_env()?;
//!     let client = controlplanes::Client::new(&cfg);
//!     let cps = client.list("my-org").await?;
//!     println!("{} control planes", cps.len());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod endpoints;
pub mod http;
pub mod kube;
pub mod profile;

pub use config::Config;
pub use http::{
    AuthMode, ClientOption, DefaultErrorHandler, Error, ErrorHandler, Handled, HttpClient,
    ListOption, Request, Result,
};

/// Version reported in the user agent, injected at compile time via
/// `UP_SDK_VERSION` (set by CI/CD), or the crate version for local builds.
pub const VERSION: &str = match option_env!("UP_SDK_VERSION") {
    Some(v) => v,
    None => env!("CARGO_PKG_VERSION"),
};

/// Product name reported in the user agent.
pub const PRODUCT: &str = "up-sdk-rust";

/// Default public API endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.upbound.io";

/// Environment variable consulted for endpoint selection.
pub const ENDPOINT_ENV: &str = "UP_ENDPOINT";
