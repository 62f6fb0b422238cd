// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP device builder.

use std::time::Duration;

use crate::device::{ConvergencePolicy, Device};
use crate::error::Error;
use crate::protocol::{HttpClient, HttpConfig};
use crate::state::DeviceState;

/// Builder for creating HTTP-based heaters.
///
/// This builder can be created in two ways:
/// - `Device::http("host")` - Simple host string
/// - `Device::http_config(HttpConfig::new("host").with_port(8080))` - Advanced configuration
///
/// # Examples
///
/// ```no_run
/// use aquecedor_lib::Device;
///
/// # async fn example() -> aquecedor_lib::Result<()> {
/// // No network access until the first operation
/// let device = Device::http("192.168.1.60").build()?;
///
/// // Warm the state cache while connecting
/// let (device, initial_state) = Device::http("192.168.1.60").connect().await?;
/// println!("powered on: {}", initial_state.is_powered_on());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct HttpDeviceBuilder {
    config: HttpConfig,
    policy: ConvergencePolicy,
}

impl HttpDeviceBuilder {
    /// Creates a new builder with the specified HTTP configuration.
    pub(crate) fn new(config: HttpConfig) -> Self {
        Self {
            config,
            policy: ConvergencePolicy::default(),
        }
    }

    /// Sets a custom port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.config = self.config.with_port(port);
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.with_timeout(timeout);
        self
    }

    /// Sets the policy used by [`Device::set_target_temperature`].
    #[must_use]
    pub fn with_convergence_policy(mut self, policy: ConvergencePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the HTTP configuration.
    #[must_use]
    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    /// Builds the device without contacting the heater.
    ///
    /// The state cache starts empty.
    ///
    /// # Errors
    ///
    /// Returns error if the host is invalid or the HTTP client cannot be created.
    pub fn build(self) -> Result<Device<HttpClient>, Error> {
        let client = self.config.into_client().map_err(Error::Transport)?;
        Ok(Device::new(client).with_convergence_policy(self.policy))
    }

    /// Builds the device and reads its state once.
    ///
    /// Returns the device together with the initial state, which is also
    /// stored in the device's cache.
    ///
    /// # Errors
    ///
    /// Returns error if the client cannot be created, the heater cannot be
    /// reached, or its state line cannot be decoded.
    pub async fn connect(self) -> Result<(Device<HttpClient>, DeviceState), Error> {
        let device = self.build()?;
        let state = device.get_state(true).await?;
        tracing::info!(
            url = %device.client().protocol().base_url(),
            powered_on = state.is_powered_on(),
            "Connected to heater"
        );
        Ok((device, state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let builder = HttpDeviceBuilder::new(HttpConfig::new("192.168.1.60"));
        assert_eq!(builder.config().port(), HttpConfig::DEFAULT_PORT);
        assert_eq!(builder.policy, ConvergencePolicy::default());
    }

    #[test]
    fn builder_options_reach_config() {
        let builder = HttpDeviceBuilder::new(HttpConfig::new("192.168.1.60"))
            .with_port(8080)
            .with_timeout(Duration::from_secs(2));
        assert_eq!(builder.config().base_url(), "http://192.168.1.60:8080");
        assert_eq!(builder.config().timeout(), Duration::from_secs(2));
    }

    #[test]
    fn build_carries_policy() {
        let policy = ConvergencePolicy::default().with_max_retries(2);
        let device = HttpDeviceBuilder::new(HttpConfig::new("192.168.1.60"))
            .with_convergence_policy(policy)
            .build()
            .unwrap();
        assert_eq!(device.convergence_policy(), &policy);
        assert!(device.cached_state().is_none());
    }

    #[test]
    fn build_rejects_empty_host() {
        let result = HttpDeviceBuilder::new(HttpConfig::new("")).build();
        assert!(matches!(result, Err(Error::Transport(_))));
    }
}
