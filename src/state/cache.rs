// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Last-known state cache.

use std::future::Future;

use parking_lot::RwLock;
use tokio::sync::Mutex;

use crate::error::Result;

use super::DeviceState;

/// Single-slot holder of the most recent [`DeviceState`].
///
/// The cache starts empty and is overwritten by every successful device
/// interaction that returns a full-state line. It never expires: callers
/// decide when a value is stale by forcing a refresh.
///
/// Device round trips that update the slot run one at a time behind an
/// async writer lock, so a forced refresh cannot overwrite the response of
/// a step command that was issued while it was in flight. Cache hits only
/// take the slot's read lock and never wait for device I/O.
#[derive(Debug, Default)]
pub struct StateCache {
    slot: RwLock<Option<DeviceState>>,
    writer: Mutex<()>,
}

impl StateCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached snapshot without any device I/O.
    #[must_use]
    pub fn cached(&self) -> Option<DeviceState> {
        *self.slot.read()
    }

    /// Returns the cached snapshot, or runs `fetch` to obtain a fresh one.
    ///
    /// `fetch` runs when the cache is empty or `force_refresh` is set. Its
    /// result replaces the cached value.
    ///
    /// # Errors
    ///
    /// Returns the error from `fetch`. The cached value is left untouched.
    pub async fn read<F, Fut>(&self, force_refresh: bool, fetch: F) -> Result<DeviceState>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<DeviceState>>,
    {
        if !force_refresh && let Some(state) = self.cached() {
            tracing::trace!("Serving heater state from cache");
            return Ok(state);
        }

        let _writer = self.writer.lock().await;

        // Another reader may have filled the slot while we waited.
        if !force_refresh && let Some(state) = self.cached() {
            return Ok(state);
        }

        Ok(self.store(fetch().await?))
    }

    /// Runs a device interaction whose response updates the cache.
    ///
    /// # Errors
    ///
    /// Returns the error from `fetch`. The cached value is left untouched.
    pub async fn exchange<F, Fut>(&self, fetch: F) -> Result<DeviceState>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<DeviceState>>,
    {
        let _writer = self.writer.lock().await;
        Ok(self.store(fetch().await?))
    }

    fn store(&self, state: DeviceState) -> DeviceState {
        *self.slot.write() = Some(state);
        state
    }
}
