// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Positional access to comma-separated telemetry lines.

use crate::error::ParseError;

/// Splits one telemetry line into fields and reads them by position.
#[derive(Debug)]
pub(crate) struct FieldReader<'a> {
    fields: Vec<&'a str>,
}

impl<'a> FieldReader<'a> {
    /// Reads the first line of `body`.
    pub(crate) fn new(body: &'a str) -> Result<Self, ParseError> {
        let line = body.trim().lines().next().unwrap_or_default().trim();
        if line.is_empty() {
            return Err(ParseError::UnexpectedFormat(
                "empty telemetry line".to_string(),
            ));
        }

        Ok(Self {
            fields: line.split(',').map(str::trim).collect(),
        })
    }

    /// Fails unless the line carries at least `count` fields.
    pub(crate) fn require(&self, count: usize, format: &str) -> Result<(), ParseError> {
        if self.fields.len() < count {
            return Err(ParseError::UnexpectedFormat(format!(
                "{format} line has {} fields, expected at least {count}",
                self.fields.len()
            )));
        }
        Ok(())
    }

    pub(crate) fn text(&self, index: usize, name: &'static str) -> Result<&'a str, ParseError> {
        self.fields
            .get(index)
            .copied()
            .ok_or(ParseError::MissingField { name, index })
    }

    pub(crate) fn integer(&self, index: usize, name: &'static str) -> Result<i64, ParseError> {
        let raw = self.text(index, name)?;
        raw.parse().map_err(|_| ParseError::InvalidValue {
            field: name.to_string(),
            message: format!("expected an integer at position {index}, got {raw:?}"),
        })
    }

    pub(crate) fn unsigned(&self, index: usize, name: &'static str) -> Result<u64, ParseError> {
        let raw = self.text(index, name)?;
        raw.parse().map_err(|_| ParseError::InvalidValue {
            field: name.to_string(),
            message: format!("expected a non-negative integer at position {index}, got {raw:?}"),
        })
    }

    /// Reads a number reported in units of `1 / divisor`.
    pub(crate) fn scaled(
        &self,
        index: usize,
        name: &'static str,
        divisor: f64,
    ) -> Result<f64, ParseError> {
        let raw = self.text(index, name)?;
        match raw.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value / divisor),
            _ => Err(ParseError::InvalidValue {
                field: name.to_string(),
                message: format!("expected a number at position {index}, got {raw:?}"),
            }),
        }
    }
}
