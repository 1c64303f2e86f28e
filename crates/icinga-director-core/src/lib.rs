//! # icinga-director-core
//!
//! Core types and utilities for working with the Icinga Director REST API.
//!
//! This crate provides the error taxonomy, configuration, credentials and the
//! object-type registry shared by Director client implementations.
//!
//! ## Modules
//!
//! - [`error`] - Error types and HTTP status code mapping
//! - [`config`] - Configuration structures for Director clients
//! - [`credentials`] - Basic-auth credentials held by a client
//! - [`client`] - HTTP client settings shared by transports
//! - [`query`] - Query parameter builder
//! - [`types`] - Object-type registry and object data model

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod query;
pub mod types;

// Re-export commonly used types
pub use error::{Error, Result};
