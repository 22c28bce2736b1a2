//! Delete spam guard.
//!
//! A sliding-window counter with a cooldown lock. Every delete attempt is
//! timestamped; once `threshold` attempts land inside `window`, all deletes
//! are refused until `cooldown` has elapsed, whatever title they target. No
//! caller identity is tracked.
//!
//! The lock is an expiry instant checked on every access rather than a timer,
//! so an injected [`Clock`] fully drives the guard. State sits behind a mutex:
//! exactly one attempt observes the threshold crossing and sets the lock.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;

const DEFAULT_THRESHOLD: usize = 5;
const DEFAULT_WINDOW: Duration = Duration::from_secs(10);
const DEFAULT_COOLDOWN: Duration = Duration::from_secs(30);

/// Errors raised when building a [`SpamGuardPolicy`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpamGuardPolicyError {
    #[error("attempt threshold must be at least 1")]
    ZeroThreshold,
    #[error("{name} must be greater than zero")]
    ZeroDuration { name: &'static str },
    #[error("{name} is too large")]
    DurationOutOfRange { name: &'static str },
}

/// Trip threshold, sliding window, and lock cooldown.
///
/// The default policy trips after 5 attempts in 10 seconds and locks for
/// 30 seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpamGuardPolicy {
    threshold: usize,
    window: TimeDelta,
    cooldown: TimeDelta,
}

impl Default for SpamGuardPolicy {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            window: TimeDelta::seconds(10),
            cooldown: TimeDelta::seconds(30),
        }
    }
}

fn positive_delta(value: Duration, name: &'static str) -> Result<TimeDelta, SpamGuardPolicyError> {
    if value.is_zero() {
        return Err(SpamGuardPolicyError::ZeroDuration { name });
    }
    TimeDelta::from_std(value).map_err(|_| SpamGuardPolicyError::DurationOutOfRange { name })
}

impl SpamGuardPolicy {
    /// Validate and build a policy.
    ///
    /// # Examples
    /// ```
    /// use std::time::Duration;
    /// use library_backend::domain::SpamGuardPolicy;
    ///
    /// let policy = SpamGuardPolicy::new(5, Duration::from_secs(10), Duration::from_secs(30))
    ///     .expect("valid policy");
    /// assert_eq!(policy, SpamGuardPolicy::default());
    /// assert_eq!(policy.lock_message(), "Do not spam: wait 30s");
    /// ```
    pub fn new(
        threshold: usize,
        window: Duration,
        cooldown: Duration,
    ) -> Result<Self, SpamGuardPolicyError> {
        if threshold == 0 {
            return Err(SpamGuardPolicyError::ZeroThreshold);
        }
        Ok(Self {
            threshold,
            window: positive_delta(window, "window")?,
            cooldown: positive_delta(cooldown, "cooldown")?,
        })
    }

    /// Attempts inside the window that trip the lock.
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Sliding window length.
    pub fn window(&self) -> Duration {
        self.window.to_std().unwrap_or(DEFAULT_WINDOW)
    }

    /// Lock duration.
    pub fn cooldown(&self) -> Duration {
        self.cooldown.to_std().unwrap_or(DEFAULT_COOLDOWN)
    }

    /// Message returned to callers while the lock is held.
    pub fn lock_message(&self) -> String {
        format!("Do not spam: wait {}s", self.cooldown.num_seconds())
    }
}

/// Result of registering one attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// Counted; the guard stays as it was.
    Recorded { attempts_in_window: usize },
    /// This attempt crossed the threshold and set the lock.
    Tripped { locked_until: DateTime<Utc> },
}

#[derive(Debug, Default)]
struct GuardState {
    attempts: VecDeque<DateTime<Utc>>,
    locked_until: Option<DateTime<Utc>>,
}

impl GuardState {
    fn release_if_expired(&mut self, now: DateTime<Utc>) {
        if self.locked_until.is_some_and(|until| now >= until) {
            self.locked_until = None;
            self.attempts.clear();
        }
    }

    fn prune(&mut self, now: DateTime<Utc>, window: TimeDelta) {
        while self
            .attempts
            .front()
            .is_some_and(|attempt| now - *attempt > window)
        {
            self.attempts.pop_front();
        }
    }
}

/// Process-wide delete spam guard, shared by reference.
pub struct DeleteSpamGuard {
    policy: SpamGuardPolicy,
    clock: Arc<dyn Clock>,
    state: Mutex<GuardState>,
}

impl DeleteSpamGuard {
    /// Create an unlocked guard with no recorded attempts.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use library_backend::domain::{DeleteSpamGuard, SpamGuardPolicy};
    /// use mockable::DefaultClock;
    ///
    /// let guard = DeleteSpamGuard::new(SpamGuardPolicy::default(), Arc::new(DefaultClock));
    /// assert!(!guard.is_locked());
    /// ```
    pub fn new(policy: SpamGuardPolicy, clock: Arc<dyn Clock>) -> Self {
        Self {
            policy,
            clock,
            state: Mutex::new(GuardState::default()),
        }
    }

    /// Active policy.
    pub fn policy(&self) -> &SpamGuardPolicy {
        &self.policy
    }

    /// Whether deletes are currently refused.
    pub fn is_locked(&self) -> bool {
        self.is_locked_at(self.clock.utc())
    }

    /// Record a delete attempt at the current time.
    pub fn register_attempt(&self) -> AttemptOutcome {
        self.register_attempt_at(self.clock.utc())
    }

    /// Time left until the lock lifts, or `None` when unlocked.
    pub fn retry_after(&self) -> Option<Duration> {
        self.retry_after_at(self.clock.utc())
    }

    /// [`Self::is_locked`] for an explicit instant.
    pub fn is_locked_at(&self, now: DateTime<Utc>) -> bool {
        let mut state = self.lock_state();
        state.release_if_expired(now);
        state.locked_until.is_some()
    }

    /// [`Self::register_attempt`] for an explicit instant.
    pub fn register_attempt_at(&self, now: DateTime<Utc>) -> AttemptOutcome {
        let mut state = self.lock_state();
        state.release_if_expired(now);
        state.attempts.push_back(now);
        state.prune(now, self.policy.window);

        let attempts_in_window = state.attempts.len();
        if attempts_in_window >= self.policy.threshold && state.locked_until.is_none() {
            let locked_until = now + self.policy.cooldown;
            state.locked_until = Some(locked_until);
            return AttemptOutcome::Tripped { locked_until };
        }
        AttemptOutcome::Recorded { attempts_in_window }
    }

    /// [`Self::retry_after`] for an explicit instant.
    pub fn retry_after_at(&self, now: DateTime<Utc>) -> Option<Duration> {
        let mut state = self.lock_state();
        state.release_if_expired(now);
        state
            .locked_until
            .and_then(|until| (until - now).to_std().ok())
    }

    fn lock_state(&self) -> MutexGuard<'_, GuardState> {
        // Every mutation leaves the state consistent, so a poisoned lock is
        // still safe to reuse.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for DeleteSpamGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeleteSpamGuard")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
