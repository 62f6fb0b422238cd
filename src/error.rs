// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `aquecedor` library.
//!
//! The hierarchy separates transport failures, telemetry decoding failures,
//! value validation, and the terminal outcomes of the convergence controller.
//! Only [`Error::Transport`] and [`Error::Parse`] are considered transient:
//! the convergence controller retries them, plain reads surface them directly.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// The device could not be reached or answered with a non-success status.
    #[error("transport error: {0}")]
    Transport(#[from] ProtocolError),

    /// The device answered with a telemetry line that could not be decoded.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// The requested temperature cannot be mapped to a supported value.
    #[error("requested temperature {0} cannot be mapped to a supported value")]
    InvalidTemperature(f64),

    /// The current target temperature is unknown, even after a forced refresh.
    #[error("current target temperature is unavailable")]
    StateUnavailable,

    /// Too many consecutive failures while converging on a target temperature.
    #[error("gave up after {attempts} consecutive failed attempts")]
    MaxRetriesExceeded {
        /// Number of attempts made at the failing step.
        attempts: u32,
        /// The failure of the last attempt.
        source: Box<Error>,
    },

    /// The device acknowledged steps without reaching the target temperature.
    #[error("target temperature not reached after {steps} steps")]
    StepLimitExceeded {
        /// Number of successful steps issued.
        steps: u32,
    },
}

impl Error {
    /// Returns `true` for failures worth retrying inside a convergence run.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Parse(_))
    }
}

/// Errors related to value validation and constraints.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A temperature the heater cannot be set to.
    #[error("{0}°C is not a supported temperature")]
    UnsupportedTemperature(u8),
}

/// Errors related to HTTP communication with the heater.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP request failed.
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Connection to the device failed or it answered with an error status.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Invalid URL or address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),
}

/// Errors related to decoding the heater's comma-separated telemetry.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The line has fewer fields than the position being read.
    #[error("missing field {name} at position {index}")]
    MissingField {
        /// Semantic name of the field.
        name: &'static str,
        /// Zero-based position in the line.
        index: usize,
    },

    /// Unexpected response format.
    #[error("unexpected response format: {0}")]
    UnexpectedFormat(String),

    /// Failed to parse a specific value.
    #[error("failed to parse {field}: {message}")]
    InvalidValue {
        /// The field that failed to parse.
        field: String,
        /// Description of the parsing failure.
        message: String,
    },
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
