//! Icinga Director client for Rust.
//!
//! This crate provides an asynchronous client for the Icinga Director REST
//! API. Each operation resolves the object type through the endpoint
//! registry, sends exactly one HTTP request and decodes the JSON answer.
//! Nothing is cached or retried.
//!
//! ```rust,no_run
//! use icinga_director::{DirectorClient, NewObject, ObjectType};
//! use serde_json::json;
//!
//! # async fn run() -> icinga_director::Result<()> {
//! let client =
//!     DirectorClient::new("https://icinga.example.com/icingaweb2/", "director", "secret")?;
//!
//! let host = NewObject::named("web01")
//!     .with_template("generic-host")
//!     .with_attr("address", json!("192.0.2.10"));
//! client.objects().create(ObjectType::Host, &host).await?;
//!
//! let fetched = client.objects().get(ObjectType::Host, "web01").await?;
//! assert_eq!(fetched["address"], "192.0.2.10");
//! # Ok(())
//! # }
//! ```
//!
//! Concurrent calls on one client are as safe as the transport they go
//! through; the default reqwest transport may be shared freely.

#![deny(missing_docs)]

pub mod client;
pub mod models;
pub mod objects;
pub mod transport;

pub use client::{DirectorClient, DirectorClientBuilder, API_PREFIX};
pub use director_core::config::DirectorConfig;
pub use director_core::types::{
    EndpointDescriptor, EndpointRegistry, Filter, ObjectDefinition, ObjectKind, ObjectType,
};
pub use director_core::Error;
pub use models::{DeleteObjects, NewObject};
pub use objects::Objects;
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};

/// Convenient result alias that reuses the shared Director error type.
pub type Result<T> = director_core::Result<T>;
