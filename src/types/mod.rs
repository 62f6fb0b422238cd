// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for heater control.
//!
//! # Types
//!
//! - [`Celsius`] - Supported target temperature (35-45 °C)
//! - [`PowerState`] - On/Off as decoded from the heater status code
//!
//! The temperature scale functions translate between requested values, the
//! supported scale, and the heater's internal device index.

mod power;
mod temperature;
mod working_time;

pub use power::{POWERED_OFF_CODE, PowerState};
pub use temperature::{
    Celsius, DEVICE_INDEX_CELSIUS, DEVICE_INDEX_OFFSET, SUPPORTED_CELSIUS,
    map_device_index_to_celsius, map_requested_to_supported,
};
pub use working_time::parse_working_time;
