//! HTTP transport collaborator.
//!
//! [`DirectorClient`](crate::DirectorClient) assembles fully formed
//! [`HttpRequest`] values and hands them to a [`Transport`]. The transport
//! owns TLS, timeouts and connection pooling and reports failures unchanged.

use crate::Result;
use async_trait::async_trait;
use director_core::client::ClientConfig;
use director_core::Error;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Certificate, Client, ClientBuilder, Method, StatusCode};
use std::path::Path;
use tracing::{debug, warn};
use url::Url;

/// A request ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// HTTP method
    pub method: Method,
    /// Absolute URL including query parameters
    pub url: Url,
    /// Header name/value pairs
    pub headers: Vec<(String, String)>,
    /// Serialized JSON body
    pub body: Option<String>,
}

impl HttpRequest {
    /// First value of a header, compared case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// First value of a query parameter.
    #[must_use]
    pub fn query_param(&self, name: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }
}

/// Status and raw body returned by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status
    pub status: StatusCode,
    /// Raw response body
    pub body: String,
}

impl HttpResponse {
    /// Create a response.
    #[must_use]
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Sends one request and returns the response, whatever its status.
///
/// Implementations must not retry and must not turn non-success statuses
/// into errors; status interpretation belongs to the client.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute the request.
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// Default [`Transport`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    /// Build a transport from HTTP settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the CA certificate cannot be read or the
    /// HTTP client cannot be built.
    pub fn new(
        config: &ClientConfig,
        user_agent: &str,
        tls_verify: bool,
        ca_cert: Option<&Path>,
    ) -> Result<Self> {
        let mut builder = ClientBuilder::new()
            .user_agent(user_agent)
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .gzip(config.enable_compression);

        if !tls_verify {
            warn!("TLS verification disabled for Director client");
            builder = builder.danger_accept_invalid_certs(true);
        }

        if let Some(ca_cert) = ca_cert {
            debug!("loading Director CA certificate from {}", ca_cert.display());
            let bytes = std::fs::read(ca_cert).map_err(|err| {
                Error::Config(format!(
                    "Failed to read Director CA certificate {}: {err}",
                    ca_cert.display()
                ))
            })?;
            let cert = Certificate::from_pem(&bytes)
                .map_err(|err| Error::Config(format!("Invalid Director CA certificate: {err}")))?;
            builder = builder.add_root_certificate(cert);
        }

        let http = builder
            .build()
            .map_err(|err| Error::Config(format!("Failed to build Director HTTP client: {err}")))?;

        Ok(Self { http })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        let mut headers = HeaderMap::with_capacity(request.headers.len());
        for (name, value) in &request.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|err| Error::InvalidArguments(format!("invalid header `{name}`: {err}")))?;
            let value = HeaderValue::from_str(value).map_err(|err| {
                Error::InvalidArguments(format!("invalid value for header `{name}`: {err}"))
            })?;
            headers.append(name, value);
        }

        let mut builder = self
            .http
            .request(request.method, request.url)
            .headers(headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        Ok(HttpResponse { status, body })
    }
}
