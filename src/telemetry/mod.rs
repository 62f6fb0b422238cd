// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Telemetry decoding.
//!
//! The heater answers every request with a single comma-separated line.
//! Fields carry no names, so each endpoint has its own positional layout:
//!
//! - [`parse_full_state`] for `tela_` and the `inc`, `dec`, `lig` commands
//! - [`parse_extended_params`] for `bus`
//! - [`parse_consumption`] for `consumo`
//!
//! The decoders are independent pure functions. Only the full-state result
//! is ever stored in the state cache.

mod consumption_parser;
mod fields;
mod params_parser;
mod state_parser;

pub use consumption_parser::{
    ConsumptionSample, GAS_VOLUME_DIVISOR, WATER_VOLUME_DIVISOR, parse_consumption,
};
pub use params_parser::{ExtendedDeviceParams, KCAL_TO_KW, parse_extended_params};
pub use state_parser::parse_full_state;
