// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transport for talking to the heater.
//!
//! The heater exposes a handful of fixed paths under its base address. Each
//! one is a plain GET that answers with a single text line. [`Protocol`] is
//! the seam between the device logic and the transport; [`HttpClient`] is
//! the reqwest-based implementation.

#[cfg(feature = "http")]
mod http;
#[cfg(test)]
pub(crate) mod mock;

#[cfg(feature = "http")]
pub use http::{HttpClient, HttpConfig};

use std::fmt;

use crate::error::ProtocolError;

/// A fixed heater endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// `tela_`: full state line.
    FullState,
    /// `bus`: extended diagnostic parameters.
    ExtendedParams,
    /// `consumo`: consumption counters.
    Consumption,
    /// `inc`: raise the target temperature by one step.
    StepUp,
    /// `dec`: lower the target temperature by one step.
    StepDown,
    /// `lig`: toggle power.
    TogglePower,
    /// `connect`: device identification string.
    Identify,
}

impl Endpoint {
    /// Returns the URL path segment of the endpoint.
    #[must_use]
    pub const fn path(&self) -> &'static str {
        match self {
            Self::FullState => "tela_",
            Self::ExtendedParams => "bus",
            Self::Consumption => "consumo",
            Self::StepUp => "inc",
            Self::StepDown => "dec",
            Self::TogglePower => "lig",
            Self::Identify => "connect",
        }
    }

    /// Returns `true` if the endpoint answers with a full-state line.
    #[must_use]
    pub const fn returns_full_state(&self) -> bool {
        matches!(
            self,
            Self::FullState | Self::StepUp | Self::StepDown | Self::TogglePower
        )
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Raw response from a heater endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceResponse {
    body: String,
}

impl DeviceResponse {
    /// Creates a response with the given body.
    #[must_use]
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }

    /// Returns the raw response body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Consumes the response and returns its body.
    #[must_use]
    pub fn into_body(self) -> String {
        self.body
    }
}

/// Trait for transports that can reach the heater's endpoints.
///
/// Implementations perform exactly one request per call and never retry.
#[allow(async_fn_in_trait)]
pub trait Protocol {
    /// Requests `endpoint` and returns the response body.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the device cannot be reached or answers
    /// with a non-success status.
    async fn request(&self, endpoint: Endpoint) -> Result<DeviceResponse, ProtocolError>;
}
