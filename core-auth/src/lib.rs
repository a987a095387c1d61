//! # Authentication Module
//!
//! OAuth 2.0 client-credentials token acquisition for the Microsoft
//! identity platform.
//!
//! ## Overview
//!
//! The web layer that fronts this library authenticates human users
//! itself; this crate only obtains the *application* bearer token used
//! for Graph API calls. Every [`TokenSource::fetch_token`] call performs
//! a fresh form-encoded POST against the tenant token endpoint; tokens
//! are never cached, persisted, or shared between operations.

pub mod credentials;
pub mod error;
pub mod provider;
pub mod token;

pub use credentials::ClientCredentials;
pub use error::{AuthError, Result};
pub use provider::{ClientCredentialsProvider, TokenSource};
pub use token::AccessToken;
