// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Power state of the heater.
//!
//! The heater reports a numeric status code in the first telemetry field.
//! Only the code `"11"` is known to mean "off"; every other code is a
//! powered-on variant (idle, heating, and so on).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Status code the heater reports while powered off.
pub const POWERED_OFF_CODE: &str = "11";

/// Represents the power state of the heater.
///
/// # Examples
///
/// ```
/// use aquecedor_lib::types::PowerState;
///
/// assert_eq!(PowerState::from_code("11"), PowerState::Off);
/// assert_eq!(PowerState::from_code("10"), PowerState::On);
/// assert_eq!(PowerState::from(true), PowerState::On);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerState {
    /// Heater is off.
    Off,
    /// Heater is on.
    On,
}

impl PowerState {
    /// Decodes the status code from the first telemetry field.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        if code.trim() == POWERED_OFF_CODE {
            Self::Off
        } else {
            Self::On
        }
    }

    /// Returns `true` when the heater is on.
    #[must_use]
    pub const fn is_on(&self) -> bool {
        matches!(self, Self::On)
    }

    /// Returns the display string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "OFF",
            Self::On => "ON",
        }
    }
}

impl fmt::Display for PowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<bool> for PowerState {
    fn from(value: bool) -> Self {
        if value { Self::On } else { Self::Off }
    }
}
