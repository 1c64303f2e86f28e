//! Director client and request assembly.
//!
//! All object operations funnel through [`DirectorClient::call`], which
//! builds the URL, attaches credentials and content headers, serializes the
//! body, hands the request to the transport and maps the response status.

use crate::objects::Objects;
use crate::transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};
use crate::Result;
use director_core::client::ClientConfig;
use director_core::config::DirectorConfig;
use director_core::credentials::Credentials;
use director_core::query::QueryParams;
use director_core::types::{EndpointDescriptor, EndpointRegistry};
use director_core::Error;
use reqwest::{Method, StatusCode};
use serde_json::Value;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Path prefix of the Director module below the Icinga Web base URL.
pub const API_PREFIX: &str = "director";

const USER_AGENT: &str = concat!("icinga-director-rs/", env!("CARGO_PKG_VERSION"));
const JSON: &str = "application/json";

/// Which of a descriptor's paths a request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Segment {
    /// Plural path, e.g. `hosts`
    Collection,
    /// Singular path, e.g. `host`
    Resource,
}

/// Builder for [`DirectorClient`].
pub struct DirectorClientBuilder {
    base_url: Url,
    credentials: Credentials,
    http_config: ClientConfig,
    tls_verify: bool,
    tls_ca_cert: Option<PathBuf>,
    user_agent: String,
    registry: EndpointRegistry,
    transport: Option<Arc<dyn Transport>>,
}

impl DirectorClientBuilder {
    /// Create a builder for the Icinga Web base URL and credentials.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the URL cannot be parsed or cannot act as
    /// a base for relative paths.
    pub fn new(
        base_url: impl AsRef<str>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self> {
        let base_url = normalize_base_url(base_url.as_ref())?;
        Ok(Self {
            base_url,
            credentials: Credentials::new(username, password),
            http_config: ClientConfig::new(),
            tls_verify: true,
            tls_ca_cert: None,
            user_agent: USER_AGENT.to_string(),
            registry: EndpointRegistry::default(),
            transport: None,
        })
    }

    /// Replace the credentials.
    #[must_use]
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    /// Override the HTTP client configuration.
    #[must_use]
    pub fn with_http_config(mut self, config: ClientConfig) -> Self {
        self.http_config = config;
        self
    }

    /// Set the request timeout enforced by the default transport.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.http_config = self.http_config.with_timeout(timeout);
        self
    }

    /// Enable or disable TLS certificate verification.
    #[must_use]
    pub fn with_tls_verify(mut self, verify: bool) -> Self {
        self.tls_verify = verify;
        self
    }

    /// Trust an additional CA certificate (PEM).
    #[must_use]
    pub fn with_ca_cert(mut self, path: impl Into<PathBuf>) -> Self {
        self.tls_ca_cert = Some(path.into());
        self
    }

    /// Override the `User-Agent` header.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Replace the object-type registry.
    #[must_use]
    pub fn with_registry(mut self, registry: EndpointRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Use a custom transport instead of the default reqwest one. TLS and
    /// timeout settings are then the transport's business.
    #[must_use]
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the default transport cannot be built.
    pub fn build(self) -> Result<DirectorClient> {
        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new(
                &self.http_config,
                &self.user_agent,
                self.tls_verify,
                self.tls_ca_cert.as_deref(),
            )?),
        };

        Ok(DirectorClient {
            transport,
            base_url: self.base_url,
            credentials: Arc::new(self.credentials),
            user_agent: self.user_agent,
            registry: Arc::new(self.registry),
        })
    }
}

impl fmt::Debug for DirectorClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectorClientBuilder")
            .field("base_url", &self.base_url.as_str())
            .field("credentials", &self.credentials)
            .field("http_config", &self.http_config)
            .field("tls_verify", &self.tls_verify)
            .field("tls_ca_cert", &self.tls_ca_cert)
            .field("custom_transport", &self.transport.is_some())
            .finish_non_exhaustive()
    }
}

/// Asynchronous Icinga Director client.
///
/// Holds the base URL, credentials and registry as read-only state; cloning
/// is cheap and clones share the transport.
#[derive(Clone)]
pub struct DirectorClient {
    transport: Arc<dyn Transport>,
    base_url: Url,
    credentials: Arc<Credentials>,
    user_agent: String,
    registry: Arc<EndpointRegistry>,
}

impl DirectorClient {
    /// Construct a client with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the URL is invalid. Credentials are only
    /// checked by the Director on the first request.
    pub fn new(
        base_url: impl AsRef<str>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self> {
        DirectorClientBuilder::new(base_url, username, password)?.build()
    }

    /// Start a builder.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the URL is invalid.
    pub fn builder(
        base_url: impl AsRef<str>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<DirectorClientBuilder> {
        DirectorClientBuilder::new(base_url, username, password)
    }

    /// Construct a client from a [`DirectorConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the URL is invalid or the CA certificate
    /// cannot be loaded.
    pub fn from_config(config: &DirectorConfig) -> Result<Self> {
        let mut builder = DirectorClientBuilder::new(&config.url, "", "")?
            .with_credentials(config.credentials())
            .with_tls_verify(config.tls_verify)
            .with_timeout(config.timeout());
        if let Some(ca_cert) = &config.tls_ca_cert {
            builder = builder.with_ca_cert(ca_cert.clone());
        }
        builder.build()
    }

    /// CRUD operations on Director objects.
    #[must_use]
    pub fn objects(&self) -> Objects<'_> {
        Objects::new(self)
    }

    /// The normalized Icinga Web base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The login name sent with every request.
    #[must_use]
    pub fn username(&self) -> &str {
        self.credentials.username()
    }

    /// The object-type registry.
    #[must_use]
    pub fn registry(&self) -> &EndpointRegistry {
        &self.registry
    }

    pub(crate) fn resolve(&self, object_type: &str) -> Result<EndpointDescriptor> {
        self.registry.resolve(object_type).copied()
    }

    /// Assemble the request for a descriptor path without sending it.
    pub(crate) fn build_request(
        &self,
        method: Method,
        descriptor: &EndpointDescriptor,
        segment: Segment,
        params: &QueryParams,
        body: Option<&Value>,
    ) -> Result<HttpRequest> {
        let path = match segment {
            Segment::Collection => descriptor.collection,
            Segment::Resource => descriptor.resource,
        };

        let mut url = self
            .base_url
            .join(&format!("{API_PREFIX}/{path}"))
            .map_err(|err| Error::Config(format!("Invalid Director path `{path}`: {err}")))?;
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params.as_pairs());
        }

        let mut headers = vec![
            (
                "Authorization".to_string(),
                self.credentials.authorization_header(),
            ),
            ("Accept".to_string(), JSON.to_string()),
            ("User-Agent".to_string(), self.user_agent.clone()),
        ];

        let body = match body {
            Some(payload) => {
                headers.push(("Content-Type".to_string(), JSON.to_string()));
                Some(serde_json::to_string(payload)?)
            }
            None => None,
        };

        Ok(HttpRequest {
            method,
            url,
            headers,
            body,
        })
    }

    /// Send one request and decode the JSON answer. An empty success body
    /// decodes to `Value::Null`.
    pub(crate) async fn call(
        &self,
        method: Method,
        descriptor: &EndpointDescriptor,
        segment: Segment,
        params: &QueryParams,
        body: Option<&Value>,
    ) -> Result<Value> {
        let request = self.build_request(method, descriptor, segment, params, body)?;

        info!(
            method = %request.method,
            path = %request.url.path(),
            object_type = descriptor.object_type,
            "Sending Director request"
        );

        let response = self.transport.execute(request).await?;
        debug!(status = %response.status, "Director response received");

        decode_response(response)
    }
}

impl fmt::Debug for DirectorClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectorClient")
            .field("base_url", &self.base_url.as_str())
            .field("credentials", &self.credentials)
            .field("object_types", &self.registry.len())
            .finish_non_exhaustive()
    }
}

fn normalize_base_url(raw: &str) -> Result<Url> {
    let mut url =
        Url::parse(raw).map_err(|e| Error::Config(format!("Invalid Director URL: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(Error::Config(format!(
            "Director URL `{raw}` cannot be used as a base URL"
        )));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

fn decode_response(response: HttpResponse) -> Result<Value> {
    let HttpResponse { status, body } = response;

    if !status.is_success() {
        return Err(map_status_to_error(status, body));
    }

    if body.trim().is_empty() {
        return Ok(Value::Null);
    }

    serde_json::from_str(&body)
        .map_err(|err| Error::Decode(format!("invalid JSON in {status} response: {err}")))
}

fn map_status_to_error(status: StatusCode, body: String) -> Error {
    match status {
        StatusCode::NOT_FOUND => Error::NotFound(body),
        StatusCode::CONFLICT => Error::Conflict(body),
        _ => Error::Api {
            status: status.as_u16(),
            body,
        },
    }
}
