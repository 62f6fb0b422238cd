// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Heater working time format parsing.
//!
//! The consumption endpoint reports the burner working time since the last
//! counter reset as `"MM:SS"`. Minutes are not wrapped into hours, so values
//! such as `"1234:05"` are valid.
//!
//! # Examples
//!
//! ```
//! use std::time::Duration;
//!
//! let duration = aquecedor_lib::types::parse_working_time("12:30").unwrap();
//! assert_eq!(duration, Duration::from_secs(750));
//! ```

use std::time::Duration;

use crate::error::ParseError;

/// Parses a `"MM:SS"` working time string into a [`Duration`].
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use aquecedor_lib::types::parse_working_time;
///
/// assert_eq!(parse_working_time("0:05").unwrap(), Duration::from_secs(5));
/// assert_eq!(parse_working_time("1500:00").unwrap(), Duration::from_secs(90_000));
/// ```
///
/// # Errors
///
/// Returns [`ParseError::InvalidValue`] if:
/// - The string doesn't contain exactly one `:` separator
/// - Minutes or seconds are not valid numbers
/// - Seconds > 59
/// - The total does not fit in a `u64` number of seconds
pub fn parse_working_time(s: &str) -> Result<Duration, ParseError> {
    let s = s.trim();

    let (minutes_str, seconds_str) = s.split_once(':').ok_or_else(|| invalid(format!(
        "expected MM:SS format, got: {s}"
    )))?;

    if seconds_str.contains(':') {
        return Err(invalid(format!("expected MM:SS format, got: {s}")));
    }

    let minutes: u64 = minutes_str
        .parse()
        .map_err(|_| invalid(format!("invalid minutes: {minutes_str}")))?;

    let seconds: u64 = seconds_str
        .parse()
        .map_err(|_| invalid(format!("invalid seconds: {seconds_str}")))?;

    if seconds > 59 {
        return Err(invalid(format!("seconds must be 0-59, got: {seconds}")));
    }

    let total = minutes
        .checked_mul(60)
        .and_then(|secs| secs.checked_add(seconds))
        .ok_or_else(|| invalid(format!("minutes out of range: {minutes_str}")))?;

    Ok(Duration::from_secs(total))
}

fn invalid(message: String) -> ParseError {
    ParseError::InvalidValue {
        field: "working time".to_string(),
        message,
    }
}
