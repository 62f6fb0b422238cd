// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Heater state types.
//!
//! [`DeviceState`] is an immutable snapshot decoded from the heater's
//! full-state line. [`StateCache`] holds the most recent snapshot for a
//! single device.
//!
//! # Examples
//!
//! ```
//! use aquecedor_lib::state::{DeviceState, StateCache};
//! use aquecedor_lib::types::PowerState;
//!
//! # async fn example() -> aquecedor_lib::Result<()> {
//! let cache = StateCache::new();
//! assert!(cache.cached().is_none());
//!
//! let state = cache
//!     .exchange(|| async { Ok(DeviceState::new(PowerState::On, false, None)) })
//!     .await?;
//! assert_eq!(cache.cached(), Some(state));
//! # Ok(())
//! # }
//! ```

mod cache;
mod device_state;

pub use cache::StateCache;
pub use device_state::DeviceState;
