// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Parser for the extended parameters line returned by the `bus` endpoint.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::types::{Celsius, PowerState, map_device_index_to_celsius};

use super::fields::FieldReader;

const POWER_CODE: usize = 0;
const WORKING_TIME: usize = 4;
const INLET_TEMPERATURE: usize = 9;
const OUTLET_TEMPERATURE: usize = 10;
const POWER_DRAW: usize = 11;
const WATER_FLOW: usize = 12;
const TARGET_INDEX: usize = 18;
const MIN_FIELDS: usize = 19;

/// Converts the heater's power draw, in kcal, to kW.
pub const KCAL_TO_KW: f64 = 0.014_33;

const HUNDREDTHS: f64 = 100.0;

/// Diagnostic snapshot decoded from the `bus` endpoint.
///
/// This is a separate reading from [`DeviceState`](crate::state::DeviceState)
/// and is never cached.
///
/// # Examples
///
/// ```
/// use aquecedor_lib::telemetry::parse_extended_params;
///
/// let line = "10,0,0,0,5400,0,0,0,0,2210,3890,1500,850,0,0,0,0,0,8";
/// let params = parse_extended_params(line).unwrap();
///
/// assert!(params.power.is_on());
/// assert_eq!(params.target_temperature.unwrap().value(), 40);
/// assert!((params.outlet_temperature - 38.9).abs() < 1e-9);
/// assert!((params.water_flow - 8.5).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtendedDeviceParams {
    /// Power state decoded from the status code.
    pub power: PowerState,
    /// Target temperature, `None` if the index is outside the known scale.
    pub target_temperature: Option<Celsius>,
    /// Inlet water temperature in °C.
    pub inlet_temperature: f64,
    /// Outlet water temperature in °C.
    pub outlet_temperature: f64,
    /// Instantaneous power draw in kW.
    pub power_kw: f64,
    /// Water flow in litres per minute.
    pub water_flow: f64,
    /// Cumulative burner working time.
    pub working_time: Duration,
}

/// Decodes an extended parameters line.
///
/// # Errors
///
/// Returns [`ParseError`] if the line has fewer than 19 fields or any
/// decoded field is not numeric.
pub fn parse_extended_params(body: &str) -> Result<ExtendedDeviceParams, ParseError> {
    let fields = FieldReader::new(body)?;
    fields.require(MIN_FIELDS, "extended parameters")?;

    let power_draw = fields.scaled(POWER_DRAW, "power draw", HUNDREDTHS)?;

    Ok(ExtendedDeviceParams {
        power: PowerState::from_code(fields.text(POWER_CODE, "status code")?),
        target_temperature: map_device_index_to_celsius(
            fields.integer(TARGET_INDEX, "target temperature index")?,
        ),
        inlet_temperature: fields.scaled(INLET_TEMPERATURE, "inlet temperature", HUNDREDTHS)?,
        outlet_temperature: fields.scaled(
            OUTLET_TEMPERATURE,
            "outlet temperature",
            HUNDREDTHS,
        )?,
        power_kw: power_draw * KCAL_TO_KW,
        water_flow: fields.scaled(WATER_FLOW, "water flow", HUNDREDTHS)?,
        working_time: Duration::from_secs(fields.unsigned(WORKING_TIME, "working time")?),
    })
}
