// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Target temperature type and the heater's temperature scale.
//!
//! The heater accepts target temperatures from 35 °C to 45 °C in whole
//! degrees. Its telemetry does not report Celsius directly: the target is
//! sent as a small device index where index 3 means 35 °C and index 13
//! means 45 °C.
//!
//! # Examples
//!
//! ```
//! use aquecedor_lib::types::{map_device_index_to_celsius, map_requested_to_supported};
//!
//! assert_eq!(map_device_index_to_celsius(6).unwrap().value(), 38);
//! assert_eq!(map_requested_to_supported(50.0).unwrap().value(), 45);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// Target temperatures the heater supports, in ascending order.
pub const SUPPORTED_CELSIUS: [u8; 11] = [35, 36, 37, 38, 39, 40, 41, 42, 43, 44, 45];

/// Celsius value for each device index position, starting at [`DEVICE_INDEX_OFFSET`].
pub const DEVICE_INDEX_CELSIUS: [u8; 11] = [35, 36, 37, 38, 39, 40, 41, 42, 43, 44, 45];

/// Raw device index that corresponds to position 0 of [`DEVICE_INDEX_CELSIUS`].
pub const DEVICE_INDEX_OFFSET: i64 = 3;

/// A target temperature the heater can be set to.
///
/// # Examples
///
/// ```
/// use aquecedor_lib::types::Celsius;
///
/// let temp = Celsius::new(40).unwrap();
/// assert_eq!(temp.value(), 40);
/// assert_eq!(temp.to_string(), "40°C");
///
/// assert!(Celsius::new(34).is_err());
/// assert!(Celsius::new(46).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Celsius(u8);

impl Celsius {
    /// Lowest supported target temperature (35 °C).
    pub const MIN: Self = Self(SUPPORTED_CELSIUS[0]);

    /// Highest supported target temperature (45 °C).
    pub const MAX: Self = Self(SUPPORTED_CELSIUS[SUPPORTED_CELSIUS.len() - 1]);

    /// Creates a target temperature.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::UnsupportedTemperature` if the heater cannot be
    /// set to `value`.
    pub fn new(value: u8) -> Result<Self, ValueError> {
        if SUPPORTED_CELSIUS.contains(&value) {
            Ok(Self(value))
        } else {
            Err(ValueError::UnsupportedTemperature(value))
        }
    }

    /// Returns the temperature in degrees Celsius.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for Celsius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°C", self.0)
    }
}

impl TryFrom<u8> for Celsius {
    type Error = ValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Celsius> for u8 {
    fn from(value: Celsius) -> Self {
        value.0
    }
}

/// Maps a requested temperature onto the supported scale.
///
/// Supported values map to themselves. A value between two supported steps
/// resolves to the lower step, values below the scale clamp to
/// [`Celsius::MIN`] and values above it clamp to [`Celsius::MAX`].
///
/// Infinite requests clamp like any other out-of-range value. Returns
/// `None` for `NaN`.
///
/// # Examples
///
/// ```
/// use aquecedor_lib::types::map_requested_to_supported;
///
/// assert_eq!(map_requested_to_supported(38.0).unwrap().value(), 38);
/// assert_eq!(map_requested_to_supported(38.7).unwrap().value(), 38);
/// assert_eq!(map_requested_to_supported(20.0).unwrap().value(), 35);
/// assert_eq!(map_requested_to_supported(60.0).unwrap().value(), 45);
/// ```
#[must_use]
pub fn map_requested_to_supported(requested: f64) -> Option<Celsius> {
    snap_to_table(&SUPPORTED_CELSIUS, requested).map(Celsius)
}

/// Maps a raw device index to the target temperature it encodes.
///
/// Returns `None` when the index is outside the device table. Callers must
/// treat that as "temperature unknown".
///
/// # Examples
///
/// ```
/// use aquecedor_lib::types::map_device_index_to_celsius;
///
/// assert_eq!(map_device_index_to_celsius(3).unwrap().value(), 35);
/// assert_eq!(map_device_index_to_celsius(13).unwrap().value(), 45);
/// assert!(map_device_index_to_celsius(2).is_none());
/// assert!(map_device_index_to_celsius(14).is_none());
/// ```
#[must_use]
pub fn map_device_index_to_celsius(raw_index: i64) -> Option<Celsius> {
    let position = usize::try_from(raw_index.checked_sub(DEVICE_INDEX_OFFSET)?).ok()?;
    DEVICE_INDEX_CELSIUS.get(position).copied().map(Celsius)
}

/// Snaps `requested` onto an ascending `table`.
///
/// The scan compares each entry's successor with `requested`, so a value
/// strictly between two entries resolves to the lower one.
#[allow(clippy::float_cmp)]
fn snap_to_table(table: &[u8], requested: f64) -> Option<u8> {
    let (&lowest, &highest) = (table.first()?, table.last()?);
    if requested.is_nan() {
        return None;
    }

    if let Some(&exact) = table.iter().find(|&&v| f64::from(v) == requested) {
        return Some(exact);
    }

    if let Some(pair) = table
        .windows(2)
        .find(|pair| f64::from(pair[1]) > requested)
    {
        return Some(pair[0]);
    }

    if requested < f64::from(lowest) {
        Some(lowest)
    } else {
        Some(highest)
    }
}
