// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! High-level heater abstraction.
//!
//! [`Device`] is the API consumed by accessory and platform layers. It
//! serves state reads from the cache, drives the target temperature to a
//! requested value one step at a time, and passes diagnostic reads through
//! to the heater.
//!
//! ```no_run
//! use aquecedor_lib::Device;
//!
//! # async fn example() -> aquecedor_lib::Result<()> {
//! let device = Device::http("192.168.1.60").build()?;
//!
//! let state = device.get_state(true).await?;
//! println!("target: {:?}", state.target_temperature());
//!
//! device.set_power_state(true).await?;
//! device.set_target_temperature(40.0).await?;
//! # Ok(())
//! # }
//! ```

mod convergence;
#[cfg(feature = "http")]
mod http_builder;

pub use convergence::ConvergencePolicy;
#[cfg(feature = "http")]
pub use http_builder::HttpDeviceBuilder;

use crate::client::HeaterClient;
use crate::error::Result;
use crate::protocol::Protocol;
use crate::state::DeviceState;
use crate::telemetry::{ConsumptionSample, ExtendedDeviceParams};

/// A water heater reachable through protocol `P`.
///
/// Each device owns its own state cache, so separate instances never share
/// state.
///
/// # Creating a Device
///
/// ```no_run
/// use std::time::Duration;
/// use aquecedor_lib::{ConvergencePolicy, Device};
///
/// # fn example() -> aquecedor_lib::Result<()> {
/// let device = Device::http("192.168.1.60")
///     .with_timeout(Duration::from_secs(3))
///     .with_convergence_policy(ConvergencePolicy::default().with_max_retries(3))
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Device<P: Protocol> {
    client: HeaterClient<P>,
    policy: ConvergencePolicy,
}

impl<P: Protocol> Device<P> {
    /// Creates a device on top of an arbitrary transport.
    pub fn new(protocol: P) -> Self {
        Self {
            client: HeaterClient::new(protocol),
            policy: ConvergencePolicy::default(),
        }
    }

    /// Replaces the convergence policy.
    #[must_use]
    pub fn with_convergence_policy(mut self, policy: ConvergencePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the convergence policy.
    pub fn convergence_policy(&self) -> &ConvergencePolicy {
        &self.policy
    }

    /// Returns the protocol client backing this device.
    pub fn client(&self) -> &HeaterClient<P> {
        &self.client
    }

    /// Returns the last known state without contacting the heater.
    pub fn cached_state(&self) -> Option<DeviceState> {
        self.client.cache().cached()
    }

    // ========== State ==========

    /// Returns the heater state.
    ///
    /// Without `force_refresh`, a cached snapshot is returned when one
    /// exists and no request is made.
    ///
    /// # Errors
    ///
    /// Returns error if a request was needed and failed or could not be decoded.
    pub async fn get_state(&self, force_refresh: bool) -> Result<DeviceState> {
        self.client.state(force_refresh).await
    }

    // ========== Power Control ==========

    /// Brings the heater into the requested power state.
    ///
    /// The decision is taken on the cached state. When it already matches,
    /// nothing is sent; otherwise exactly one toggle is issued. There is no
    /// retry.
    ///
    /// # Errors
    ///
    /// Returns error if the state read or the toggle request fails.
    pub async fn set_power_state(&self, on: bool) -> Result<DeviceState> {
        let state = self.client.state(false).await?;
        if state.is_powered_on() == on {
            tracing::debug!(on, "Heater already in requested power state");
            return Ok(state);
        }

        tracing::info!(on, "Toggling heater power");
        self.client.toggle_power().await
    }

    /// Turns the heater on.
    ///
    /// # Errors
    ///
    /// Returns error if the state read or the toggle request fails.
    pub async fn power_on(&self) -> Result<DeviceState> {
        self.set_power_state(true).await
    }

    /// Turns the heater off.
    ///
    /// # Errors
    ///
    /// Returns error if the state read or the toggle request fails.
    pub async fn power_off(&self) -> Result<DeviceState> {
        self.set_power_state(false).await
    }

    // ========== Diagnostics ==========

    /// Reads the extended diagnostic parameters. Never cached.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the line cannot be decoded.
    pub async fn get_device_params(&self) -> Result<ExtendedDeviceParams> {
        self.client.read_extended_params().await
    }

    /// Reads the consumption counters. Never cached.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the line cannot be decoded.
    pub async fn get_consumption(&self) -> Result<ConsumptionSample> {
        self.client.read_consumption().await
    }

    /// Returns the heater's identification string, unparsed and untrimmed.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn identify(&self) -> Result<String> {
        self.client.identify().await
    }
}

#[cfg(feature = "http")]
impl Device<crate::protocol::HttpClient> {
    /// Creates a builder for an HTTP heater from a host string.
    ///
    /// Equivalent to `Device::http_config(HttpConfig::new(host))`.
    ///
    /// # Arguments
    ///
    /// * `host` - The hostname or IP address of the heater
    #[must_use]
    pub fn http(host: impl Into<String>) -> HttpDeviceBuilder {
        HttpDeviceBuilder::new(crate::protocol::HttpConfig::new(host))
    }

    /// Creates a builder for an HTTP heater from an `HttpConfig`.
    #[must_use]
    pub fn http_config(config: crate::protocol::HttpConfig) -> HttpDeviceBuilder {
        HttpDeviceBuilder::new(config)
    }
}
