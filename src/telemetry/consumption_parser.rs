// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Parser for the `consumo` endpoint.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::types::parse_working_time;

use super::fields::FieldReader;

const WORKING_TIME: usize = 0;
const WATER_COUNTER: usize = 1;
const GAS_COUNTER: usize = 2;

/// Divisor turning the water counter into cubic metres.
pub const WATER_VOLUME_DIVISOR: f64 = 1000.0;

/// Divisor turning the gas counter into cubic metres.
pub const GAS_VOLUME_DIVISOR: f64 = 1000.0;

/// Consumption counters since the last reset.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use aquecedor_lib::telemetry::parse_consumption;
///
/// let sample = parse_consumption("95:12,15250,840").unwrap();
/// assert_eq!(sample.working_time, Duration::from_secs(95 * 60 + 12));
/// assert!((sample.water_volume - 15.25).abs() < 1e-9);
/// assert!((sample.gas_volume - 0.84).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsumptionSample {
    /// Burner working time since the last reset.
    pub working_time: Duration,
    /// Water volume in m³.
    pub water_volume: f64,
    /// Gas volume in m³.
    pub gas_volume: f64,
}

/// Decodes a consumption line.
///
/// # Errors
///
/// Returns [`ParseError`] if the line has fewer than three fields, the
/// working time is not `MM:SS`, or a counter is not numeric.
pub fn parse_consumption(body: &str) -> Result<ConsumptionSample, ParseError> {
    let fields = FieldReader::new(body)?;

    Ok(ConsumptionSample {
        working_time: parse_working_time(fields.text(WORKING_TIME, "working time")?)?,
        water_volume: fields.scaled(WATER_COUNTER, "water volume", WATER_VOLUME_DIVISOR)?,
        gas_volume: fields.scaled(GAS_COUNTER, "gas volume", GAS_VOLUME_DIVISOR)?,
    })
}
