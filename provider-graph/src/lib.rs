//! # Microsoft Graph Provider
//!
//! Drive access through the Microsoft Graph API v1.0.
//!
//! ## Overview
//!
//! This module provides:
//! - Report upload into a user's default drive (or an explicit drive)
//! - Drive metadata queries (default drive, drive listing)
//! - Application authentication via [`core_auth::TokenSource`]
//!
//! Every operation authenticates itself: a fresh token is fetched from
//! the configured token source, attached as a bearer credential, and
//! dropped when the request completes. There is no token cache and no
//! retry; failures propagate wholesale to the caller.

pub mod connector;
pub mod error;
pub mod types;

pub use connector::GraphConnector;
pub use error::{GraphError, Result};
pub use types::{Drive, DriveItem};
