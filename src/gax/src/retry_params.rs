// Copyright 2024 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Retry configuration for service requests.
//!
//! The client libraries do not run a retry loop in this layer. [RetryParams]
//! describes the retry behavior the application wants, the service
//! configuration stores it, and the transport that sends the requests
//! consumes it.
//!
//! The configuration describes a truncated exponential backoff: the first
//! retry waits `initial_retry_delay`, each subsequent retry waits
//! `retry_delay_backoff_factor` times longer, up to `max_retry_delay`. The
//! transport keeps retrying while fewer than `retry_min_attempts` attempts
//! were made, or while both `retry_max_attempts` and `total_retry_period`
//! allow it.

use std::time::Duration;

const DEFAULT_MIN_ATTEMPTS: u32 = 3;
const DEFAULT_MAX_ATTEMPTS: u32 = 6;
const DEFAULT_INITIAL_RETRY_DELAY: Duration = Duration::from_millis(250);
const DEFAULT_MAX_RETRY_DELAY: Duration = Duration::from_secs(10);
const DEFAULT_BACKOFF_FACTOR: f64 = 2.0;
const DEFAULT_TOTAL_RETRY_PERIOD: Duration = Duration::from_secs(50);

/// The error type for [RetryParams] creation.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("the backoff factor ({0}) should be a finite number >= 1.0")]
    InvalidBackoffFactor(f64),
    #[error(
        "the maximum number of attempts ({maximum}) should be greater than or equal to the minimum number of attempts ({minimum})"
    )]
    EmptyAttemptRange { maximum: u32, minimum: u32 },
    #[error(
        "the maximum delay ({maximum:?}) should be greater than or equal to the initial delay ({initial:?})"
    )]
    EmptyDelayRange {
        maximum: Duration,
        initial: Duration,
    },
}

/// Immutable retry configuration.
///
/// # Example
/// ```
/// # use gcloud_gax::retry_params::{Error, RetryParams};
/// use std::time::Duration;
/// let params = RetryParams::builder()
///     .with_retry_max_attempts(10)
///     .with_max_retry_delay(Duration::from_secs(30))
///     .build()?;
/// assert_eq!(params.retry_max_attempts(), 10);
/// # Ok::<(), Error>(())
/// ```
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct RetryParams {
    retry_min_attempts: u32,
    retry_max_attempts: u32,
    initial_retry_delay: Duration,
    max_retry_delay: Duration,
    retry_delay_backoff_factor: f64,
    total_retry_period: Duration,
}

impl RetryParams {
    /// Returns the default retry configuration.
    ///
    /// Requests are attempted at least 3 and at most 6 times, starting with a
    /// 250ms delay, doubling the delay up to 10s, for at most 50s.
    pub fn default_instance() -> Self {
        Self {
            retry_min_attempts: DEFAULT_MIN_ATTEMPTS,
            retry_max_attempts: DEFAULT_MAX_ATTEMPTS,
            initial_retry_delay: DEFAULT_INITIAL_RETRY_DELAY,
            max_retry_delay: DEFAULT_MAX_RETRY_DELAY,
            retry_delay_backoff_factor: DEFAULT_BACKOFF_FACTOR,
            total_retry_period: DEFAULT_TOTAL_RETRY_PERIOD,
        }
    }

    /// Returns a configuration where each request is attempted exactly once.
    pub fn no_retries() -> Self {
        Self {
            retry_min_attempts: 1,
            retry_max_attempts: 1,
            ..Self::default_instance()
        }
    }

    /// Returns a builder initialized with the default values.
    pub fn builder() -> RetryParamsBuilder {
        RetryParamsBuilder::new()
    }

    /// Returns a builder initialized with the values of this instance.
    pub fn to_builder(&self) -> RetryParamsBuilder {
        RetryParamsBuilder {
            inner: self.clone(),
        }
    }

    pub fn retry_min_attempts(&self) -> u32 {
        self.retry_min_attempts
    }

    pub fn retry_max_attempts(&self) -> u32 {
        self.retry_max_attempts
    }

    pub fn initial_retry_delay(&self) -> Duration {
        self.initial_retry_delay
    }

    pub fn max_retry_delay(&self) -> Duration {
        self.max_retry_delay
    }

    pub fn retry_delay_backoff_factor(&self) -> f64 {
        self.retry_delay_backoff_factor
    }

    pub fn total_retry_period(&self) -> Duration {
        self.total_retry_period
    }
}

impl serde::Serialize for RetryParams {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        RetryParams::serialize(self, serializer)
    }
}

// Decoded values go through the same validation as the builder.
impl<'de> serde::Deserialize<'de> for RetryParams {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let unchecked = RetryParams::deserialize(deserializer)?;
        unchecked
            .to_builder()
            .build()
            .map_err(serde::de::Error::custom)
    }
}

impl Default for RetryParams {
    fn default() -> Self {
        Self::default_instance()
    }
}

/// A builder for [RetryParams].
#[derive(Clone, Debug)]
pub struct RetryParamsBuilder {
    inner: RetryParams,
}

impl RetryParamsBuilder {
    /// Creates a builder with the default parameters.
    pub fn new() -> Self {
        Self {
            inner: RetryParams::default_instance(),
        }
    }

    /// Change the minimum number of attempts.
    pub fn with_retry_min_attempts(mut self, v: u32) -> Self {
        self.inner.retry_min_attempts = v;
        self
    }

    /// Change the maximum number of attempts.
    pub fn with_retry_max_attempts(mut self, v: u32) -> Self {
        self.inner.retry_max_attempts = v;
        self
    }

    /// Change the initial delay.
    pub fn with_initial_retry_delay<V: Into<Duration>>(mut self, v: V) -> Self {
        self.inner.initial_retry_delay = v.into();
        self
    }

    /// Change the maximum delay.
    pub fn with_max_retry_delay<V: Into<Duration>>(mut self, v: V) -> Self {
        self.inner.max_retry_delay = v.into();
        self
    }

    /// Change the backoff factor.
    pub fn with_retry_delay_backoff_factor<V: Into<f64>>(mut self, v: V) -> Self {
        self.inner.retry_delay_backoff_factor = v.into();
        self
    }

    /// Change the total retry period.
    pub fn with_total_retry_period<V: Into<Duration>>(mut self, v: V) -> Self {
        self.inner.total_retry_period = v.into();
        self
    }

    /// Creates the retry configuration.
    ///
    /// # Example
    /// ```
    /// # use gcloud_gax::retry_params::{Error, RetryParams};
    /// let params = RetryParams::builder()
    ///     .with_retry_min_attempts(5)
    ///     .with_retry_max_attempts(2)
    ///     .build();
    /// assert!(matches!(params, Err(Error::EmptyAttemptRange { .. })));
    /// ```
    pub fn build(self) -> Result<RetryParams, Error> {
        let inner = self.inner;
        let factor = inner.retry_delay_backoff_factor;
        if !factor.is_finite() || factor < 1.0 {
            return Err(Error::InvalidBackoffFactor(
                inner.retry_delay_backoff_factor,
            ));
        }
        if inner.retry_max_attempts < inner.retry_min_attempts {
            return Err(Error::EmptyAttemptRange {
                maximum: inner.retry_max_attempts,
                minimum: inner.retry_min_attempts,
            });
        }
        if inner.max_retry_delay < inner.initial_retry_delay {
            return Err(Error::EmptyDelayRange {
                maximum: inner.max_retry_delay,
                initial: inner.initial_retry_delay,
            });
        }
        Ok(inner)
    }
}

impl Default for RetryParamsBuilder {
    fn default() -> Self {
        Self::new()
    }
}
