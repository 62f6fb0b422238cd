// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Named heater operations on top of a [`Protocol`].

use crate::error::Result;
use crate::protocol::{DeviceResponse, Endpoint, Protocol};
use crate::state::{DeviceState, StateCache};
use crate::telemetry::{
    ConsumptionSample, ExtendedDeviceParams, parse_consumption, parse_extended_params,
    parse_full_state,
};

/// Client that maps heater operations onto endpoints and keeps the state
/// cache current.
///
/// Every operation is a single request with no retry. Operations whose
/// response is a full-state line (`tela_`, `inc`, `dec`, `lig`) store the
/// decoded snapshot in the cache; the others leave it untouched.
#[derive(Debug)]
pub struct HeaterClient<P: Protocol> {
    protocol: P,
    cache: StateCache,
}

impl<P: Protocol> HeaterClient<P> {
    /// Creates a client with an empty cache.
    pub fn new(protocol: P) -> Self {
        Self {
            protocol,
            cache: StateCache::new(),
        }
    }

    /// Returns the underlying transport.
    pub fn protocol(&self) -> &P {
        &self.protocol
    }

    /// Returns the state cache.
    pub fn cache(&self) -> &StateCache {
        &self.cache
    }

    /// Returns the cached state, fetching it when empty or when
    /// `force_refresh` is set.
    ///
    /// # Errors
    ///
    /// Returns error if a fetch was needed and failed.
    pub async fn state(&self, force_refresh: bool) -> Result<DeviceState> {
        self.cache
            .read(force_refresh, || self.fetch_state(Endpoint::FullState))
            .await
    }

    /// Reads the full state from the device and caches it.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the line cannot be decoded.
    pub async fn read_full_state(&self) -> Result<DeviceState> {
        self.exchange(Endpoint::FullState).await
    }

    /// Reads the extended diagnostic parameters.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the line cannot be decoded.
    pub async fn read_extended_params(&self) -> Result<ExtendedDeviceParams> {
        let response = self.fetch(Endpoint::ExtendedParams).await?;
        Ok(parse_extended_params(response.body())?)
    }

    /// Reads the consumption counters.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the line cannot be decoded.
    pub async fn read_consumption(&self) -> Result<ConsumptionSample> {
        let response = self.fetch(Endpoint::Consumption).await?;
        Ok(parse_consumption(response.body())?)
    }

    /// Raises the target temperature by one step.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the response cannot be decoded.
    pub async fn step_temperature_up(&self) -> Result<DeviceState> {
        self.exchange(Endpoint::StepUp).await
    }

    /// Lowers the target temperature by one step.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the response cannot be decoded.
    pub async fn step_temperature_down(&self) -> Result<DeviceState> {
        self.exchange(Endpoint::StepDown).await
    }

    /// Toggles the heater power.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the response cannot be decoded.
    pub async fn toggle_power(&self) -> Result<DeviceState> {
        self.exchange(Endpoint::TogglePower).await
    }

    /// Returns the device identification string exactly as sent, including
    /// any trailing line break.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn identify(&self) -> Result<String> {
        Ok(self.fetch(Endpoint::Identify).await?.into_body())
    }

    async fn exchange(&self, endpoint: Endpoint) -> Result<DeviceState> {
        self.cache.exchange(|| self.fetch_state(endpoint)).await
    }

    async fn fetch_state(&self, endpoint: Endpoint) -> Result<DeviceState> {
        debug_assert!(endpoint.returns_full_state());
        let response = self.fetch(endpoint).await?;
        Ok(parse_full_state(response.body())?)
    }

    async fn fetch(&self, endpoint: Endpoint) -> Result<DeviceResponse> {
        Ok(self.protocol.request(endpoint).await?)
    }
}
