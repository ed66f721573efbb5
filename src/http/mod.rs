//! HTTP transport module
//!
//! Everything an endpoint client needs to talk to the API: building request
//! descriptors, dispatching them, decoding responses and classifying errors.
//!
//! # Module Structure
//!
//! - [`client`] - [`HttpClient`] and its [`ClientOption`]s
//! - [`request`] - The [`Request`] descriptor mutated before dispatch
//! - [`options`] - Pagination and filtering helpers ([`ListOption`])
//! - [`error`] - Error taxonomy and the [`ErrorHandler`] hook

pub mod client;
pub mod error;
pub mod options;
pub mod request;

pub use client::{AuthMode, ClientOption, HttpClient};
pub use error::{format_error, DefaultErrorHandler, Error, ErrorHandler, Handled, Result};
pub use options::{with_configuration, with_page, with_size, ListOption};
pub use request::Request;
