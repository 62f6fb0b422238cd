// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP transport for the heater.

use std::time::Duration;

use reqwest::Client;

use crate::error::ProtocolError;
use crate::protocol::{DeviceResponse, Endpoint, Protocol};

// ============================================================================
// HttpConfig - Connection parameters
// ============================================================================

/// Configuration for reaching a heater over HTTP.
///
/// The heater serves plain HTTP without authentication.
///
/// # Examples
///
/// ```
/// use aquecedor_lib::protocol::HttpConfig;
/// use std::time::Duration;
///
/// let config = HttpConfig::new("192.168.1.60");
/// assert_eq!(config.base_url(), "http://192.168.1.60");
///
/// let config = HttpConfig::new("192.168.1.60")
///     .with_port(8080)
///     .with_timeout(Duration::from_secs(3));
/// assert_eq!(config.base_url(), "http://192.168.1.60:8080");
/// ```
#[derive(Debug, Clone)]
pub struct HttpConfig {
    host: String,
    port: u16,
    timeout: Duration,
}

impl HttpConfig {
    /// Default HTTP port.
    pub const DEFAULT_PORT: u16 = 80;
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a configuration for the specified host.
    ///
    /// # Arguments
    ///
    /// * `host` - Hostname or IP address, optionally prefixed with `http://`
    ///   and suffixed with `:port`
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: Self::DEFAULT_PORT,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Sets a custom port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns the timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Builds the base URL from this configuration.
    #[must_use]
    pub fn base_url(&self) -> String {
        let host = self.host.trim().trim_end_matches('/');
        let host = host.strip_prefix("http://").unwrap_or(host);
        let port_suffix = if self.port == Self::DEFAULT_PORT {
            String::new()
        } else {
            format!(":{}", self.port)
        };
        format!("http://{host}{port_suffix}")
    }

    /// Creates an `HttpClient` from this configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the host is empty or the HTTP client cannot be created.
    pub fn into_client(self) -> Result<HttpClient, ProtocolError> {
        let host = self.host.trim();
        if host.is_empty() || host == "http://" {
            return Err(ProtocolError::InvalidAddress(
                "host is required".to_string(),
            ));
        }
        if host.starts_with("https://") {
            return Err(ProtocolError::InvalidAddress(format!(
                "the heater only serves plain HTTP: {host}"
            )));
        }

        let base_url = self.base_url();

        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(ProtocolError::Http)?;

        Ok(HttpClient { base_url, client })
    }
}

// ============================================================================
// HttpClient - reqwest transport
// ============================================================================

/// HTTP client for a single heater.
///
/// Every endpoint is fetched with `GET {base_url}/{path}`.
///
/// # Examples
///
/// ```no_run
/// use aquecedor_lib::protocol::{Endpoint, HttpClient, Protocol};
///
/// # async fn example() -> aquecedor_lib::Result<()> {
/// let client = HttpClient::new("192.168.1.60")?;
/// let response = client.request(Endpoint::FullState).await?;
/// println!("{}", response.body());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    base_url: String,
    client: Client,
}

impl HttpClient {
    /// Creates a client for the specified host with default settings.
    ///
    /// # Errors
    ///
    /// Returns error if the host is empty or the HTTP client cannot be created.
    pub fn new(host: impl Into<String>) -> Result<Self, ProtocolError> {
        HttpConfig::new(host).into_client()
    }

    /// Returns the base URL of the device.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build_url(&self, endpoint: Endpoint) -> String {
        format!("{}/{}", self.base_url, endpoint.path())
    }
}

impl Protocol for HttpClient {
    async fn request(&self, endpoint: Endpoint) -> Result<DeviceResponse, ProtocolError> {
        let url = self.build_url(endpoint);

        tracing::debug!(url = %url, "Sending HTTP request");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(ProtocolError::Http)?;

        if !response.status().is_success() {
            return Err(ProtocolError::ConnectionFailed(format!(
                "HTTP {} - {}",
                response.status().as_u16(),
                response.status().canonical_reason().unwrap_or("Unknown")
            )));
        }

        let body = response.text().await.map_err(ProtocolError::Http)?;

        tracing::debug!(endpoint = %endpoint, body = %body, "Received HTTP response");

        Ok(DeviceResponse::new(body))
    }
}
