//! Endpoint clients
//!
//! One thin client per resource family. Each holds a [`Config`](crate::Config),
//! builds paths from a family base path, and leaves every transport concern to
//! the shared [`HttpClient`](crate::HttpClient).
//!
//! All families except [`auth`] use [`AuthMode::Session`](crate::AuthMode):
//! call [`login::Client::login`] on the same `Config` first.

pub mod accounts;
pub mod auth;
pub mod common;
pub mod configurations;
pub mod controlplanes;
pub mod login;
pub mod namespaces;
pub mod organizations;
pub mod repositories;
pub mod robots;
pub mod spaces;
pub mod tokens;
pub mod users;

/// Percent-encode an opaque identifier for use as a single path segment
pub(crate) fn segment(id: &str) -> std::borrow::Cow<'_, str> {
    urlencoding::encode(id)
}
