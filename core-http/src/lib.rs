//! # HTTP Client Abstraction
//!
//! Async HTTP operations behind a mockable trait, with a reqwest-backed
//! implementation for native hosts.
//!
//! ## Overview
//!
//! Every outbound call in this workspace (token acquisition, drive
//! uploads, metadata queries) goes through the [`HttpClient`] trait so
//! the calling crates can be unit tested against mocks. The concrete
//! [`ReqwestHttpClient`] keeps one pooled transport instance that is
//! shared across calls; it performs no retries, so transport failures and
//! non-success statuses propagate unchanged to the caller.

pub mod client;
pub mod error;
pub mod request;

pub use client::{HttpClient, ReqwestHttpClient};
pub use error::{HttpError, Result};
pub use request::{HttpMethod, HttpRequest, HttpResponse};
