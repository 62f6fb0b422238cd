// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory heater used by unit tests.

use std::collections::{HashMap, VecDeque};

use parking_lot::Mutex;

use crate::error::ProtocolError;
use crate::protocol::{DeviceResponse, Endpoint, Protocol};
use crate::types::DEVICE_INDEX_OFFSET;

const MIN_INDEX: i64 = DEVICE_INDEX_OFFSET;
const MAX_INDEX: i64 = DEVICE_INDEX_OFFSET + 10;

/// Builds a full-state line with the decoded positions filled in.
pub(crate) fn full_state_line(power_code: &str, heating: bool, raw_index: i64) -> String {
    let heating = if heating { "1" } else { "0" };
    format!("{power_code},0,{heating},0,0,0,0,{raw_index},0")
}

/// A failure injected into the next request.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Fault {
    /// The request fails before reaching the device.
    Transport,
    /// The device answers with a truncated line.
    Malformed,
}

#[derive(Debug)]
struct Inner {
    powered: bool,
    heating: bool,
    raw_index: i64,
    stuck: bool,
    faults: VecDeque<Fault>,
    scripts: HashMap<Endpoint, VecDeque<Option<Fault>>>,
    calls: Vec<Endpoint>,
}

/// Heater that keeps its state in memory and records every request.
#[derive(Debug)]
pub(crate) struct SimulatedHeater {
    inner: Mutex<Inner>,
}

impl SimulatedHeater {
    /// Powered-on heater whose target is `celsius`.
    pub(crate) fn at(celsius: u8) -> Self {
        Self::with_raw_index(i64::from(celsius) - 35 + DEVICE_INDEX_OFFSET)
    }

    pub(crate) fn with_raw_index(raw_index: i64) -> Self {
        Self {
            inner: Mutex::new(Inner {
                powered: true,
                heating: false,
                raw_index,
                stuck: false,
                faults: VecDeque::new(),
                scripts: HashMap::new(),
                calls: Vec::new(),
            }),
        }
    }

    pub(crate) fn powered_off(self) -> Self {
        self.inner.lock().powered = false;
        self
    }

    pub(crate) fn heating(self) -> Self {
        self.inner.lock().heating = true;
        self
    }

    /// Step commands are acknowledged but never change the target.
    pub(crate) fn stuck(self) -> Self {
        self.inner.lock().stuck = true;
        self
    }

    /// Queues `count` failures for the next requests.
    pub(crate) fn fail_next(&self, count: usize, fault: Fault) {
        self.inner.lock().faults.extend(std::iter::repeat_n(fault, count));
    }

    /// Queues `count` failures for the next requests to `endpoint`.
    pub(crate) fn fail_next_on(&self, endpoint: Endpoint, count: usize, fault: Fault) {
        self.script_on(endpoint, std::iter::repeat_n(Some(fault), count));
    }

    /// Queues outcomes for the next requests to `endpoint`; `None` answers
    /// normally.
    pub(crate) fn script_on(
        &self,
        endpoint: Endpoint,
        plan: impl IntoIterator<Item = Option<Fault>>,
    ) {
        self.inner
            .lock()
            .scripts
            .entry(endpoint)
            .or_default()
            .extend(plan);
    }

    /// Changes the target as if adjusted on the heater's own panel.
    pub(crate) fn set_raw_index(&self, raw_index: i64) {
        self.inner.lock().raw_index = raw_index;
    }

    pub(crate) fn calls(&self) -> Vec<Endpoint> {
        self.inner.lock().calls.clone()
    }

    pub(crate) fn count(&self, endpoint: Endpoint) -> usize {
        self.inner
            .lock()
            .calls
            .iter()
            .filter(|&&call| call == endpoint)
            .count()
    }
}

impl Protocol for SimulatedHeater {
    async fn request(&self, endpoint: Endpoint) -> Result<DeviceResponse, ProtocolError> {
        let mut inner = self.inner.lock();
        inner.calls.push(endpoint);

        let fault = match inner.faults.pop_front() {
            Some(fault) => Some(fault),
            None => inner
                .scripts
                .get_mut(&endpoint)
                .and_then(VecDeque::pop_front)
                .flatten(),
        };

        if let Some(fault) = fault {
            return match fault {
                Fault::Transport => Err(ProtocolError::ConnectionFailed(
                    "simulated outage".to_string(),
                )),
                Fault::Malformed => Ok(DeviceResponse::new("10,0,1")),
            };
        }

        match endpoint {
            Endpoint::StepUp if !inner.stuck => {
                inner.raw_index = (inner.raw_index + 1).min(MAX_INDEX);
            }
            Endpoint::StepDown if !inner.stuck => {
                inner.raw_index = (inner.raw_index - 1).max(MIN_INDEX);
            }
            Endpoint::TogglePower => inner.powered = !inner.powered,
            _ => {}
        }

        let power_code = if inner.powered { "10" } else { "11" };
        let body = match endpoint {
            Endpoint::ExtendedParams => format!(
                "{power_code},0,0,0,3600,0,0,0,0,2000,3800,150000,900,0,0,0,0,0,{}",
                inner.raw_index
            ),
            Endpoint::Consumption => "12:34,1500,250".to_string(),
            Endpoint::Identify => "AQ-0001\n".to_string(),
            _ => full_state_line(power_code, inner.heating, inner.raw_index),
        };

        Ok(DeviceResponse::new(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn global_fault_leaves_endpoint_script_queued() {
        let heater = SimulatedHeater::at(40);
        heater.fail_next(1, Fault::Transport);
        heater.fail_next_on(Endpoint::StepUp, 1, Fault::Malformed);

        assert!(heater.request(Endpoint::StepUp).await.is_err());
        let scripted = heater.request(Endpoint::StepUp).await.unwrap();
        assert_eq!(scripted.body(), "10,0,1");
        let normal = heater.request(Endpoint::StepUp).await.unwrap();
        assert_eq!(normal, DeviceResponse::new(full_state_line("10", false, 9)));
    }
}
