// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Decoded heater state snapshot.

use serde::{Deserialize, Serialize};

use crate::types::{Celsius, PowerState};

/// Snapshot of the heater as reported by its full-state telemetry line.
///
/// A snapshot is never modified after construction: every reading from the
/// device produces a new value.
///
/// # Examples
///
/// ```
/// use aquecedor_lib::state::DeviceState;
/// use aquecedor_lib::types::{Celsius, PowerState};
///
/// let state = DeviceState::new(PowerState::On, true, Celsius::new(40).ok());
/// assert!(state.is_powered_on());
/// assert!(state.is_heating());
/// assert_eq!(state.target_temperature().map(|t| t.value()), Some(40));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceState {
    power: PowerState,
    is_heating: bool,
    /// `None` when the reported device index is outside the known scale.
    target_temperature: Option<Celsius>,
}

impl DeviceState {
    /// Creates a snapshot from decoded values.
    #[must_use]
    pub const fn new(
        power: PowerState,
        is_heating: bool,
        target_temperature: Option<Celsius>,
    ) -> Self {
        Self {
            power,
            is_heating,
            target_temperature,
        }
    }

    /// Returns the power state.
    #[must_use]
    pub const fn power(&self) -> PowerState {
        self.power
    }

    /// Returns `true` unless the heater reported the powered-off code.
    #[must_use]
    pub const fn is_powered_on(&self) -> bool {
        self.power.is_on()
    }

    /// Returns `true` while the burner is heating water.
    #[must_use]
    pub const fn is_heating(&self) -> bool {
        self.is_heating
    }

    /// Returns the target temperature, if the reported index was known.
    #[must_use]
    pub const fn target_temperature(&self) -> Option<Celsius> {
        self.target_temperature
    }
}
