//! # Core Runtime Module
//!
//! Foundational runtime infrastructure shared by the workspace crates:
//! - Service configuration with fail-fast validation
//! - Logging and tracing setup
//!
//! ## Overview
//!
//! Host applications build a [`ServiceConfig`] (from explicit values or
//! environment variables) and initialize logging once at startup; the
//! other crates only consume the resulting values and the global
//! `tracing` dispatcher.

pub mod config;
pub mod error;
pub mod logging;

pub use config::{ServiceConfig, ServiceConfigBuilder};
pub use error::{Error, Result};
