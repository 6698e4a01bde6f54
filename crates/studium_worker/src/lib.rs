//! Durable job workers for Studium.
//!
//! Two workers live here, sharing one idempotency discipline:
//!
//! - [`StudyRequestWorker`] drives a study generation request through its
//!   retry state machine to a terminal state, creating at most one
//!   material artifact no matter how often it is re-invoked;
//! - [`ProvisioningWorker`] materializes a user account on first sight of
//!   a sign-up identity and grants the one-time welcome bonus.
//!
//! Both receive their collaborators (generator, stores, clock) as injected
//! capabilities, so every flow is testable with in-memory fakes and a
//! recording clock.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod backoff;
mod clock;
mod provisioning;
mod state;
mod study_request;

pub use clock::{Clock, TokioClock};
pub use provisioning::{ProvisionReport, ProvisioningWorker, WELCOME_BONUS, WELCOME_BONUS_REASON};
pub use state::{Phase, Signal};
pub use study_request::{JobReport, StudyRequestWorker};
