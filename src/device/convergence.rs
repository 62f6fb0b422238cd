// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Step-by-step convergence on a target temperature.
//!
//! The heater has no command to set an absolute temperature, only `inc`
//! and `dec`. Reaching a target therefore means stepping toward it and
//! re-reading the reported value after every step, while tolerating a
//! bounded number of consecutive failures.

use std::time::Duration;

use crate::error::{Error, Result};
use crate::protocol::Protocol;
use crate::state::DeviceState;
use crate::types::{Celsius, map_requested_to_supported};

use super::Device;

/// Limits applied while converging on a target temperature.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use aquecedor_lib::ConvergencePolicy;
///
/// let policy = ConvergencePolicy::default();
/// assert_eq!(policy.max_retries(), 5);
/// assert_eq!(policy.step_delay(), Duration::from_millis(100));
///
/// let policy = policy.with_step_delay(Duration::from_millis(250));
/// assert_eq!(policy.step_delay(), Duration::from_millis(250));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvergencePolicy {
    max_retries: u32,
    step_delay: Duration,
    max_steps: u32,
}

impl ConvergencePolicy {
    /// Default number of retries after a failed step.
    pub const DEFAULT_MAX_RETRIES: u32 = 5;
    /// Default pause between successful steps.
    pub const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(100);
    /// Default bound on successful steps per convergence run.
    pub const DEFAULT_MAX_STEPS: u32 = 20;

    /// Sets how many consecutive failures are retried before giving up.
    #[must_use]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Sets the pause that lets the heater settle between steps.
    #[must_use]
    pub fn with_step_delay(mut self, step_delay: Duration) -> Self {
        self.step_delay = step_delay;
        self
    }

    /// Sets the maximum number of successful steps per run.
    #[must_use]
    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Returns the retry bound.
    #[must_use]
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Returns the pause between steps.
    #[must_use]
    pub fn step_delay(&self) -> Duration {
        self.step_delay
    }

    /// Returns the step bound.
    #[must_use]
    pub fn max_steps(&self) -> u32 {
        self.max_steps
    }
}

impl Default for ConvergencePolicy {
    fn default() -> Self {
        Self {
            max_retries: Self::DEFAULT_MAX_RETRIES,
            step_delay: Self::DEFAULT_STEP_DELAY,
            max_steps: Self::DEFAULT_MAX_STEPS,
        }
    }
}

/// State carried from one iteration of the convergence loop to the next.
#[derive(Debug, Clone, Copy, Default)]
struct Convergence {
    retries: u32,
    steps: u32,
    /// Target reported by the previous successful step.
    last_known: Option<Celsius>,
}

enum StepOutcome {
    Converged(DeviceState),
    Moved(Option<Celsius>),
}

impl<P: Protocol> Device<P> {
    /// Drives the heater's target temperature to `requested`.
    ///
    /// `requested` is first mapped onto the supported scale: values between
    /// two steps resolve to the lower one and values outside 35-45 °C are
    /// clamped. The heater is then stepped one degree at a time until it
    /// reports the mapped value.
    ///
    /// Transport and decoding failures are retried up to
    /// [`ConvergencePolicy::max_retries`] times in a row; a successful step
    /// resets the count.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidTemperature`] if `requested` cannot be mapped
    /// - [`Error::StateUnavailable`] if the current target cannot be determined
    /// - [`Error::MaxRetriesExceeded`] after too many consecutive failures
    /// - [`Error::StepLimitExceeded`] if the heater stops moving toward the target
    pub async fn set_target_temperature(&self, requested: f64) -> Result<DeviceState> {
        let desired =
            map_requested_to_supported(requested).ok_or(Error::InvalidTemperature(requested))?;

        tracing::debug!(requested, desired = %desired, "Converging on target temperature");

        let mut progress = Convergence::default();
        loop {
            match self.converge_step(desired, progress.last_known).await {
                Ok(StepOutcome::Converged(state)) => {
                    tracing::info!(
                        target = %desired,
                        steps = progress.steps,
                        "Target temperature reached"
                    );
                    return Ok(state);
                }
                Ok(StepOutcome::Moved(reported)) => {
                    progress.steps += 1;
                    if progress.steps >= self.policy.max_steps {
                        return Err(Error::StepLimitExceeded {
                            steps: progress.steps,
                        });
                    }
                    progress.retries = 0;
                    progress.last_known = reported;
                    tokio::time::sleep(self.policy.step_delay).await;
                }
                Err(err) if err.is_transient() && progress.retries < self.policy.max_retries => {
                    progress.retries += 1;
                    tracing::warn!(
                        attempt = progress.retries,
                        error = %err,
                        "Convergence step failed, retrying"
                    );
                }
                Err(err) if err.is_transient() => {
                    return Err(Error::MaxRetriesExceeded {
                        attempts: progress.retries + 1,
                        source: Box::new(err),
                    });
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn converge_step(
        &self,
        desired: Celsius,
        last_known: Option<Celsius>,
    ) -> Result<StepOutcome> {
        let current = match last_known {
            Some(current) => current,
            None => self
                .client
                .state(true)
                .await?
                .target_temperature()
                .ok_or(Error::StateUnavailable)?,
        };

        if current == desired {
            return Ok(StepOutcome::Converged(self.client.state(false).await?));
        }

        let state = if current > desired {
            tracing::debug!(current = %current, desired = %desired, "Stepping target down");
            self.client.step_temperature_down().await?
        } else {
            tracing::debug!(current = %current, desired = %desired, "Stepping target up");
            self.client.step_temperature_up().await?
        };

        let reported = state.target_temperature();
        if reported == Some(desired) {
            Ok(StepOutcome::Converged(state))
        } else {
            Ok(StepOutcome::Moved(reported))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::Endpoint;
    use crate::protocol::mock::{Fault, SimulatedHeater};

    fn steps(device: &Device<SimulatedHeater>) -> usize {
        let heater = device.client().protocol();
        heater.count(Endpoint::StepUp) + heater.count(Endpoint::StepDown)
    }

    fn target(state: &DeviceState) -> u8 {
        state.target_temperature().unwrap().value()
    }

    #[tokio::test(start_paused = true)]
    async fn current_target_needs_no_steps() {
        let device = Device::new(SimulatedHeater::at(40));
        device.get_state(false).await.unwrap();

        let state = device.set_target_temperature(40.0).await.unwrap();

        assert_eq!(target(&state), 40);
        assert_eq!(steps(&device), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn three_degrees_up_takes_three_increments() {
        let device = Device::new(SimulatedHeater::at(38));

        let state = device.set_target_temperature(41.0).await.unwrap();

        assert_eq!(target(&state), 41);
        assert_eq!(device.client().protocol().count(Endpoint::StepUp), 3);
        assert_eq!(device.client().protocol().count(Endpoint::StepDown), 0);
        assert_eq!(device.cached_state(), Some(state));
    }

    #[tokio::test(start_paused = true)]
    async fn steps_down_when_above_target() {
        let device = Device::new(SimulatedHeater::at(42));

        let state = device.set_target_temperature(36.0).await.unwrap();

        assert_eq!(target(&state), 36);
        assert_eq!(device.client().protocol().count(Endpoint::StepDown), 6);
        assert_eq!(device.client().protocol().count(Endpoint::StepUp), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn out_of_range_request_is_clamped() {
        let device = Device::new(SimulatedHeater::at(44));

        let state = device.set_target_temperature(60.0).await.unwrap();

        assert_eq!(state.target_temperature(), Some(Celsius::MAX));
        assert_eq!(steps(&device), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn fractional_request_rounds_down() {
        let device = Device::new(SimulatedHeater::at(40));

        let state = device.set_target_temperature(38.7).await.unwrap();

        assert_eq!(target(&state), 38);
        assert_eq!(device.client().protocol().count(Endpoint::StepDown), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn starts_from_a_forced_refresh() {
        let device = Device::new(SimulatedHeater::at(40));
        device.get_state(false).await.unwrap();
        // Changed on the heater's panel after the cache was filled.
        device.client().protocol().set_raw_index(11);

        let state = device.set_target_temperature(42.0).await.unwrap();

        assert_eq!(target(&state), 42);
        assert_eq!(device.client().protocol().count(Endpoint::StepUp), 0);
        assert_eq!(device.client().protocol().count(Endpoint::StepDown), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn pauses_between_steps_only() {
        let device = Device::new(SimulatedHeater::at(38));
        let started = tokio::time::Instant::now();

        device.set_target_temperature(41.0).await.unwrap();

        // Three steps, the last one converges without a pause.
        assert_eq!(started.elapsed(), Duration::from_millis(200));
    }

    #[tokio::test(start_paused = true)]
    async fn six_consecutive_failures_give_up() {
        let device = Device::new(SimulatedHeater::at(38));
        device
            .client()
            .protocol()
            .fail_next_on(Endpoint::StepUp, 6, Fault::Transport);

        let err = device.set_target_temperature(41.0).await.unwrap_err();

        assert!(matches!(
            err,
            Error::MaxRetriesExceeded { attempts: 6, ref source }
                if matches!(**source, Error::Transport(_))
        ));
        assert_eq!(device.client().protocol().count(Endpoint::StepUp), 6);
        assert_eq!(target(&device.cached_state().unwrap()), 38);
    }

    #[tokio::test(start_paused = true)]
    async fn four_failures_then_success_converges() {
        let device = Device::new(SimulatedHeater::at(38));
        device
            .client()
            .protocol()
            .fail_next_on(Endpoint::StepUp, 4, Fault::Transport);

        let state = device.set_target_temperature(41.0).await.unwrap();

        assert_eq!(target(&state), 41);
        assert_eq!(device.client().protocol().count(Endpoint::StepUp), 7);
    }

    #[tokio::test(start_paused = true)]
    async fn successful_step_resets_retry_count() {
        let device = Device::new(SimulatedHeater::at(38));
        let fail = Some(Fault::Transport);
        // Five failures, a success, five more failures, then normal answers.
        let plan = [fail, fail, fail, fail, fail, None, fail, fail, fail, fail, fail];
        device.client().protocol().script_on(Endpoint::StepUp, plan);

        let state = device.set_target_temperature(41.0).await.unwrap();

        assert_eq!(target(&state), 41);
        assert_eq!(device.client().protocol().count(Endpoint::StepUp), 13);
    }

    #[tokio::test(start_paused = true)]
    async fn malformed_responses_are_retried() {
        let device = Device::new(SimulatedHeater::at(40));
        device
            .client()
            .protocol()
            .fail_next_on(Endpoint::StepDown, 2, Fault::Malformed);

        let state = device.set_target_temperature(39.0).await.unwrap();

        assert_eq!(target(&state), 39);
        assert_eq!(device.client().protocol().count(Endpoint::StepDown), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_initial_refresh_is_retried() {
        let device = Device::new(SimulatedHeater::at(40));
        device
            .client()
            .protocol()
            .fail_next_on(Endpoint::FullState, 3, Fault::Transport);

        let state = device.set_target_temperature(41.0).await.unwrap();

        assert_eq!(target(&state), 41);
        assert_eq!(device.client().protocol().count(Endpoint::FullState), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn unknown_current_target_is_unavailable() {
        let device = Device::new(SimulatedHeater::with_raw_index(0));

        let err = device.set_target_temperature(40.0).await.unwrap_err();

        assert!(matches!(err, Error::StateUnavailable));
        assert_eq!(steps(&device), 0);
        assert_eq!(device.client().protocol().count(Endpoint::FullState), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn nan_request_is_invalid() {
        let device = Device::new(SimulatedHeater::at(40));

        let err = device.set_target_temperature(f64::NAN).await.unwrap_err();

        assert!(matches!(err, Error::InvalidTemperature(_)));
        assert!(device.client().protocol().calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn infinite_requests_clamp_to_scale_ends() {
        let device = Device::new(SimulatedHeater::at(44));

        let state = device.set_target_temperature(f64::INFINITY).await.unwrap();
        assert_eq!(state.target_temperature(), Some(Celsius::MAX));

        let state = device.set_target_temperature(f64::NEG_INFINITY).await.unwrap();
        assert_eq!(state.target_temperature(), Some(Celsius::MIN));
        assert_eq!(device.client().protocol().count(Endpoint::StepDown), 10);
    }

    #[tokio::test(start_paused = true)]
    async fn heater_that_never_moves_hits_step_limit() {
        let device = Device::new(SimulatedHeater::at(38).stuck())
            .with_convergence_policy(ConvergencePolicy::default().with_max_steps(8));

        let err = device.set_target_temperature(41.0).await.unwrap_err();

        assert!(matches!(err, Error::StepLimitExceeded { steps: 8 }));
        assert_eq!(device.client().protocol().count(Endpoint::StepUp), 8);
    }

    #[tokio::test(start_paused = true)]
    async fn custom_retry_bound() {
        let device = Device::new(SimulatedHeater::at(38))
            .with_convergence_policy(ConvergencePolicy::default().with_max_retries(1));
        device
            .client()
            .protocol()
            .fail_next_on(Endpoint::StepUp, 2, Fault::Transport);

        let err = device.set_target_temperature(39.0).await.unwrap_err();

        assert!(matches!(err, Error::MaxRetriesExceeded { attempts: 2, .. }));
    }

    #[test]
    fn default_policy() {
        let policy = ConvergencePolicy::default();
        assert_eq!(policy.max_retries(), 5);
        assert_eq!(policy.step_delay(), Duration::from_millis(100));
        assert_eq!(policy.max_steps(), 20);
    }
}
