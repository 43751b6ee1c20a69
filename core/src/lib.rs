//! Async client for the account resource of an organisation-management API.
//!
//! # Overview
//! `AccountClient` creates, fetches and deletes accounts over HTTP/JSON,
//! wrapping records in the service's `{"data": ...}` envelope. Each call
//! returns a `ClientResponse` whose `success` flag reports whether the
//! service answered with the status the operation expects; errors are kept
//! for calls that could not be built, could not complete, or returned a body
//! that does not decode.
//!
//! # Design
//! - The client is stateless between calls and holds an injected
//!   `Transport`; `ReqwestTransport` is the default.
//! - Each operation is split into `build_*` (produces an `HttpRequest`) and
//!   `parse_*` (consumes an `HttpResponse`), so the I/O boundary is explicit.
//! - Every async operation has a `*_with_context` form taking a
//!   `RequestContext` for cancellation and deadlines.

pub mod client;
pub mod config;
pub mod context;
pub mod error;
pub mod http;
pub mod request;
pub mod response;
pub mod transport;
pub mod types;

pub use client::AccountClient;
pub use config::ClientConfig;
pub use context::RequestContext;
pub use error::{ApiError, Result, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use response::ClientResponse;
pub use transport::{ReqwestTransport, Transport};
pub use types::{Account, AccountAttributes, Envelope, ACCOUNTS_RESOURCE};
