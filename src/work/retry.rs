// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Retry pacing.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

type DelayFn = Arc<dyn Fn(u32) -> Option<Duration> + Send + Sync>;

/// Maps the number of attempts made so far to the wait before the next one.
///
/// The retry budget itself lives on the work item (or the executor
/// default); this only decides how long to sleep between attempts.
#[derive(Clone)]
pub enum RetryDelay {
    /// Same delay before every retry.
    Fixed(Duration),

    /// `attempt * step`.
    Linear(Duration),

    /// `initial * 2^(attempt-1)`, capped at `max`.
    Exponential { initial: Duration, max: Duration },

    /// Caller-supplied function. `None` means the function produced no
    /// usable delay, and the retry runs immediately.
    Custom(DelayFn),
}

impl RetryDelay {
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(u32) -> Option<Duration> + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(f))
    }

    /// Delay to wait after `attempt` attempts (1-indexed) have failed.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        match self {
            Self::Fixed(delay) => *delay,
            Self::Linear(step) => step.saturating_mul(attempt),
            Self::Exponential { initial, max } => {
                let multiplier = 2u32.saturating_pow(attempt.saturating_sub(1));
                initial.saturating_mul(multiplier).min(*max)
            }
            Self::Custom(f) => f(attempt).unwrap_or(Duration::ZERO),
        }
    }
}

impl fmt::Debug for RetryDelay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(delay) => f.debug_tuple("Fixed").field(delay).finish(),
            Self::Linear(step) => f.debug_tuple("Linear").field(step).finish(),
            Self::Exponential { initial, max } => f
                .debug_struct("Exponential")
                .field("initial", initial)
                .field("max", max)
                .finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
