//! Frame-stepped timers for held actions
//!
//! Both timers are plain counters advanced by the tick's `dt`; nothing
//! reads the wall clock, so a test can drive them with any sequence of
//! ticks.

use super::error::InteractionError;

/// Elapsed-time counter for an action that must be held continuously
///
/// `advance` adds `dt` (including on the first tick the condition holds)
/// and reports whether the threshold has been reached. Callers `reset`
/// the timer as soon as the condition lapses.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ProgressTimer {
    elapsed_ms: f64,
}

impl ProgressTimer {
    pub fn new() -> Self {
        ProgressTimer::default()
    }

    /// Progress towards `required_ms`, clamped to 0.0..=1.0
    pub fn fraction(&self, required_ms: f64) -> f64 {
        if required_ms <= 0.0 {
            return 1.0;
        }
        (self.elapsed_ms / required_ms).clamp(0.0, 1.0)
    }

    pub fn advance(&mut self, dt_ms: f64, required_ms: f64) -> Result<(), InteractionError> {
        self.elapsed_ms += dt_ms;

        if self.elapsed_ms >= required_ms {
            Ok(())
        } else {
            Err(InteractionError::ActionNotReady {
                elapsed_ms: self.elapsed_ms,
                required_ms,
            })
        }
    }

    pub fn reset(&mut self) {
        self.elapsed_ms = 0.0;
    }
}

/// Key-repeat gate: fires on the first held tick, then once per `delay_ms`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RepeatGate {
    since_last_ms: Option<f64>,
}

impl RepeatGate {
    pub fn new() -> Self {
        RepeatGate::default()
    }

    /// Call every tick; returns true on ticks where the held action should act
    pub fn tick(&mut self, held: bool, dt_ms: f64, delay_ms: f64) -> bool {
        if !held {
            self.since_last_ms = None;
            return false;
        }

        match self.since_last_ms {
            None => {
                self.since_last_ms = Some(0.0);
                true
            }
            Some(since) => {
                let since = since + dt_ms;
                if since >= delay_ms {
                    self.since_last_ms = Some(0.0);
                    true
                } else {
                    self.since_last_ms = Some(since);
                    false
                }
            }
        }
    }
}
