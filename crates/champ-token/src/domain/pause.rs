//! # Pause State Machine
//!
//! `Active -> Paused` by the owner, subject to a cooldown since the previous
//! pause. `Paused -> Active` either explicitly or implicitly once the pause
//! has lasted longer than the maximum duration: the first transfer after that
//! point succeeds and clears the flag.

use crate::errors::{ConfigError, TokenError};
use serde::{Deserialize, Serialize};
use shared_types::Timestamp;

/// Default minimum spacing between two pauses (7 days).
pub const DEFAULT_PAUSE_COOLDOWN_SECS: u64 = 7 * 24 * 60 * 60;

/// Default maximum pause length before auto-expiry (3 days).
pub const DEFAULT_MAX_PAUSE_DURATION_SECS: u64 = 3 * 24 * 60 * 60;

/// Timing constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PauseConfig {
    /// Minimum seconds between pause activations.
    pub cooldown_secs: u64,
    /// Pause auto-expires once strictly more than this many seconds elapsed.
    pub max_duration_secs: u64,
}

impl Default for PauseConfig {
    fn default() -> Self {
        Self {
            cooldown_secs: DEFAULT_PAUSE_COOLDOWN_SECS,
            max_duration_secs: DEFAULT_MAX_PAUSE_DURATION_SECS,
        }
    }
}

impl PauseConfig {
    /// Rejects a zero maximum duration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_duration_secs == 0 {
            return Err(ConfigError::ZeroPauseDuration);
        }
        Ok(())
    }
}

/// Outcome of checking the gate for a transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseGate {
    /// Not paused.
    Open,
    /// The pause had expired; the flag was cleared by this check.
    AutoExpired {
        /// When the expired pause began.
        paused_at: Timestamp,
    },
    /// Paused, but the privileged sender may proceed untaxed.
    AdminBypass,
}

/// Persistent pause state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PauseState {
    config: PauseConfig,
    is_paused: bool,
    paused_at: Timestamp,
    last_pause_at: Option<Timestamp>,
}

impl PauseState {
    /// Starts `Active`, never paused.
    #[must_use]
    pub fn new(config: PauseConfig) -> Self {
        Self {
            config,
            is_paused: false,
            paused_at: 0,
            last_pause_at: None,
        }
    }

    /// Timing constants.
    #[must_use]
    pub fn config(&self) -> PauseConfig {
        self.config
    }

    /// Raw flag, ignoring expiry.
    #[must_use]
    pub fn is_paused_flag(&self) -> bool {
        self.is_paused
    }

    /// Start of the current pause.
    #[must_use]
    pub fn paused_at(&self) -> Option<Timestamp> {
        self.is_paused.then_some(self.paused_at)
    }

    /// Start of the most recent pause, current or past.
    #[must_use]
    pub fn last_pause_at(&self) -> Option<Timestamp> {
        self.last_pause_at
    }

    /// Transfers pass the gate strictly after this second.
    #[must_use]
    pub fn resumes_after(&self) -> Option<Timestamp> {
        self.paused_at()
            .map(|at| at.saturating_add(self.config.max_duration_secs))
    }

    /// Paused flag set and `now - paused_at > max_duration`.
    #[must_use]
    pub fn is_expired(&self, now: Timestamp) -> bool {
        self.is_paused && now.saturating_sub(self.paused_at) > self.config.max_duration_secs
    }

    /// Logical state: paused and not yet expired.
    #[must_use]
    pub fn is_paused(&self, now: Timestamp) -> bool {
        self.is_paused && !self.is_expired(now)
    }

    /// `Active -> Paused`.
    pub fn pause(&mut self, now: Timestamp) -> Result<(), TokenError> {
        if self.is_paused(now) {
            return Err(TokenError::AlreadyPaused);
        }
        if let Some(last) = self.last_pause_at {
            let elapsed = now.saturating_sub(last);
            if elapsed < self.config.cooldown_secs {
                return Err(TokenError::CooldownActive {
                    remaining: self.config.cooldown_secs - elapsed,
                });
            }
        }
        self.is_paused = true;
        self.paused_at = now;
        self.last_pause_at = Some(now);
        Ok(())
    }

    /// Explicit `Paused -> Active`. Also clears an expired pause.
    pub fn unpause(&mut self) -> Result<(), TokenError> {
        if !self.is_paused {
            return Err(TokenError::NotPaused);
        }
        self.is_paused = false;
        Ok(())
    }

    /// Checks whether a transfer may proceed, clearing an expired pause.
    pub fn gate(&mut self, now: Timestamp, privileged: bool) -> Result<PauseGate, TokenError> {
        if !self.is_paused {
            return Ok(PauseGate::Open);
        }
        if self.is_expired(now) {
            self.is_paused = false;
            return Ok(PauseGate::AutoExpired {
                paused_at: self.paused_at,
            });
        }
        if privileged {
            return Ok(PauseGate::AdminBypass);
        }
        Err(TokenError::PausedAndTimeLimitNotReached {
            resumes_after: self.paused_at.saturating_add(self.config.max_duration_secs),
        })
    }
}
