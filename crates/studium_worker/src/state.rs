//! The retry state machine, as a pure transition function.
//!
//! The effectful shell ([`StudyRequestWorker`]) executes generator calls,
//! store writes, and clock sleeps; every decision about what happens next
//! lives here, where it can be tested without any of those.
//!
//! [`StudyRequestWorker`]: crate::StudyRequestWorker

use crate::backoff::{self, MAX_ATTEMPTS};
use std::time::Duration;

/// Observations fed into the state machine by the effectful shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// The generation attempt (including artifact persistence) succeeded
    AttemptSucceeded,
    /// The attempt failed, classified by the backoff policy
    AttemptFailed {
        /// Whether the failure is worth retrying
        transient: bool,
    },
    /// The backoff delay has elapsed
    BackoffElapsed,
}

/// Where a job invocation currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Running attempt number `attempt` (1-indexed)
    Attempting {
        /// Current attempt number
        attempt: u32,
    },
    /// Sleeping out the backoff before the next attempt
    Waiting {
        /// Attempt number to run after the delay
        next_attempt: u32,
        /// How long to suspend
        delay: Duration,
    },
    /// Terminal: the artifact is persisted
    Completed {
        /// Attempts consumed, including the successful one
        attempts: u32,
    },
    /// Terminal: permanent error or attempts exhausted
    Failed {
        /// Attempts consumed
        attempts: u32,
    },
}

impl Phase {
    /// Initial phase of a fresh invocation.
    pub fn start() -> Self {
        Phase::Attempting { attempt: 1 }
    }

    /// Whether this phase is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Completed { .. } | Phase::Failed { .. })
    }

    /// Advance the machine by one signal.
    ///
    /// A transient failure with attempts remaining schedules a backoff;
    /// a permanent failure or the final attempt fails terminally with no
    /// further attempts. Terminal phases absorb all signals, as do
    /// signals that do not apply to the current phase.
    pub fn advance(self, signal: Signal) -> Self {
        match (self, signal) {
            (Phase::Attempting { attempt }, Signal::AttemptSucceeded) => {
                Phase::Completed { attempts: attempt }
            }
            (Phase::Attempting { attempt }, Signal::AttemptFailed { transient }) => {
                if transient && attempt < MAX_ATTEMPTS {
                    Phase::Waiting {
                        next_attempt: attempt + 1,
                        delay: backoff::delay_for(attempt),
                    }
                } else {
                    Phase::Failed { attempts: attempt }
                }
            }
            (Phase::Waiting { next_attempt, .. }, Signal::BackoffElapsed) => {
                Phase::Attempting {
                    attempt: next_attempt,
                }
            }
            (phase, _) => phase,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRANSIENT: Signal = Signal::AttemptFailed { transient: true };
    const PERMANENT: Signal = Signal::AttemptFailed { transient: false };

    #[test]
    fn success_on_first_attempt_completes() {
        let phase = Phase::start().advance(Signal::AttemptSucceeded);
        assert_eq!(phase, Phase::Completed { attempts: 1 });
    }

    #[test]
    fn transient_failure_schedules_doubling_backoff() {
        let phase = Phase::start().advance(TRANSIENT);
        assert_eq!(
            phase,
            Phase::Waiting {
                next_attempt: 2,
                delay: Duration::from_secs(5),
            }
        );

        let phase = phase.advance(Signal::BackoffElapsed).advance(TRANSIENT);
        assert_eq!(
            phase,
            Phase::Waiting {
                next_attempt: 3,
                delay: Duration::from_secs(10),
            }
        );
    }

    #[test]
    fn permanent_failure_short_circuits() {
        let phase = Phase::start().advance(PERMANENT);
        assert_eq!(phase, Phase::Failed { attempts: 1 });
    }

    #[test]
    fn transient_failures_exhaust_after_three_attempts() {
        let mut phase = Phase::start();
        for _ in 0..2 {
            phase = phase.advance(TRANSIENT).advance(Signal::BackoffElapsed);
        }
        assert_eq!(phase, Phase::Attempting { attempt: 3 });

        let phase = phase.advance(TRANSIENT);
        assert_eq!(phase, Phase::Failed { attempts: 3 });
    }

    #[test]
    fn success_on_final_attempt_completes() {
        let phase = Phase::start()
            .advance(TRANSIENT)
            .advance(Signal::BackoffElapsed)
            .advance(TRANSIENT)
            .advance(Signal::BackoffElapsed)
            .advance(Signal::AttemptSucceeded);
        assert_eq!(phase, Phase::Completed { attempts: 3 });
    }

    #[test]
    fn terminal_phases_absorb_signals() {
        let completed = Phase::Completed { attempts: 1 };
        assert_eq!(completed.advance(TRANSIENT), completed);

        let failed = Phase::Failed { attempts: 3 };
        assert_eq!(failed.advance(Signal::AttemptSucceeded), failed);
    }

    #[test]
    fn mismatched_signals_leave_the_phase_alone() {
        let attempting = Phase::start();
        assert_eq!(attempting.advance(Signal::BackoffElapsed), attempting);

        let waiting = Phase::Waiting {
            next_attempt: 2,
            delay: Duration::from_secs(5),
        };
        assert_eq!(waiting.advance(TRANSIENT), waiting);
    }
}
