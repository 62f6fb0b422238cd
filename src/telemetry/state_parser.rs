// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Parser for the heater's full-state line.
//!
//! The `tela_` endpoint, and the `inc`, `dec` and `lig` commands, all answer
//! with the same comma-separated line. Only three positions are decoded:
//!
//! | position | meaning |
//! |---|---|
//! | 0 | status code, `"11"` while powered off |
//! | 2 | heating flag, `"1"` while the burner is on |
//! | 7 | raw target temperature device index |

use crate::error::ParseError;
use crate::state::DeviceState;
use crate::types::{PowerState, map_device_index_to_celsius};

use super::fields::FieldReader;

const POWER_CODE: usize = 0;
const HEATING_FLAG: usize = 2;
const TARGET_INDEX: usize = 7;

/// Decodes a full-state line into a [`DeviceState`].
///
/// A device index outside the known scale decodes to an unknown target
/// temperature rather than an error.
///
/// # Examples
///
/// ```
/// use aquecedor_lib::telemetry::parse_full_state;
///
/// let state = parse_full_state("10,0,1,0,0,0,0,6,0").unwrap();
/// assert!(state.is_powered_on());
/// assert!(state.is_heating());
/// assert_eq!(state.target_temperature().unwrap().value(), 38);
/// ```
///
/// # Errors
///
/// Returns [`ParseError`] if the line is empty, has fewer than eight fields,
/// or the target index is not an integer.
pub fn parse_full_state(body: &str) -> Result<DeviceState, ParseError> {
    let fields = FieldReader::new(body)?;

    let power = PowerState::from_code(fields.text(POWER_CODE, "status code")?);
    let is_heating = fields.text(HEATING_FLAG, "heating flag")? == "1";
    let raw_index = fields.integer(TARGET_INDEX, "target temperature index")?;

    Ok(DeviceState::new(
        power,
        is_heating,
        map_device_index_to_celsius(raw_index),
    ))
}
