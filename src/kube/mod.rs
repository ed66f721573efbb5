//! Kubernetes-shaped endpoint support
//!
//! Some endpoints follow the conventions of a generic structured-API server
//! rather than the plain REST style: metav1 option objects travel as query
//! parameters, bodies carry `apiVersion`/`kind`, and failures come back as a
//! metav1 `Status`.
//!
//! - [`meta`] - `TypeMeta`, `ObjectMeta` and `ListMeta`
//! - [`params`] - List/create/delete options and their parameter codec
//! - [`status`] - The `Status` kind, its error carrier and error handler
//! - [`scheme`] - A small (apiVersion, kind) to decoder table

pub mod meta;
pub mod params;
pub mod scheme;
pub mod status;

pub use meta::{ListMeta, ObjectMeta, TypeMeta};
pub use params::{CreateOptions, DeleteOptions, ListOptions, ParameterCodec, PropagationPolicy};
pub use scheme::Scheme;
pub use status::{Status, StatusCause, StatusDetails, StatusError, StatusErrorHandler, StatusSummary};

/// apiVersion of the core metav1 kinds
pub const META_V1: &str = "v1";
