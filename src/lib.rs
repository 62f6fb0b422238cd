// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `aquecedor` Lib - A Rust library to control networked gas water heaters.
//!
//! The heater exposes a small undocumented HTTP surface: every endpoint
//! answers with one comma-separated line, and the target temperature can only
//! be nudged one degree at a time. This library decodes that telemetry,
//! caches the last known state, and drives the target temperature to a
//! requested value step by step.
//!
//! # Supported Features
//!
//! - **State reads**: power, heating flag and target temperature, cached
//!   until a refresh is forced
//! - **Target temperature**: convergence with bounded retries over an
//!   unreliable link
//! - **Power control**: idempotent on/off on top of the heater's toggle
//! - **Diagnostics**: inlet/outlet temperature, power draw, water flow, and
//!   consumption counters
//!
//! # Quick Start
//!
//! ```no_run
//! use aquecedor_lib::Device;
//!
//! #[tokio::main]
//! async fn main() -> aquecedor_lib::Result<()> {
//!     // Returns (device, initial_state) tuple
//!     let (device, initial_state) = Device::http("192.168.1.60").connect().await?;
//!     println!("target: {:?}", initial_state.target_temperature());
//!
//!     device.power_on().await?;
//!     let state = device.set_target_temperature(41.0).await?;
//!     assert_eq!(state.target_temperature().map(|t| t.value()), Some(41));
//!
//!     // Served from the cache, no request
//!     let _cached = device.get_state(false).await?;
//!
//!     let params = device.get_device_params().await?;
//!     println!("outlet: {:.1} °C, flow: {:.2} L/min", params.outlet_temperature, params.water_flow);
//!     Ok(())
//! }
//! ```
//!
//! # Logging
//!
//! The library emits [`tracing`] events and never installs a subscriber.
//! Requests and convergence steps are logged at `debug`, retried failures
//! at `warn`.

mod client;
mod device;
pub mod error;
pub mod protocol;
pub mod state;
pub mod telemetry;
pub mod types;

pub use client::HeaterClient;
#[cfg(feature = "http")]
pub use device::HttpDeviceBuilder;
pub use device::{ConvergencePolicy, Device};
pub use error::{Error, ParseError, ProtocolError, Result, ValueError};
#[cfg(feature = "http")]
pub use protocol::{HttpClient, HttpConfig};
pub use protocol::{DeviceResponse, Endpoint, Protocol};
pub use state::{DeviceState, StateCache};
pub use telemetry::{ConsumptionSample, ExtendedDeviceParams};
pub use types::{Celsius, PowerState};
