//! # Check-in Module
//!
//! Everything the kiosk decides, independent of how it is drawn.
//!
//! | Concern | Module |
//! |---------|--------|
//! | Provider cards | [`provider`] |
//! | Per-modal state machines | [`attempt`] |
//! | Mock accept/reject rules | [`verdict`] |
//! | Countdown value | [`countdown`] |
//! | Cancellable one-second ticks | [`ticker`] |
//! | CPF field and mask | [`cpf`] |
//! | Token screenshot checks | [`token`] |
//! | Spacing between token collections | [`collection`] |
//! | QR image URL | [`qr`] |
//!
//! None of the verdicts are real: they stand in for a provider backend that
//! does not exist yet.

pub mod attempt;
pub mod code;
pub mod collection;
pub mod countdown;
pub mod cpf;
pub mod error;
pub mod provider;
pub mod qr;
pub mod settings;
pub mod ticker;
pub mod token;
pub mod verdict;

pub use attempt::{
    Attempt, AuthMethod, ClinipamAttempt, CodeStatus, Completion, HapvidaAttempt, OutrosAttempt,
    Transition, UnimedAttempt, UnimedStage,
};
pub use collection::CollectionWindow;
pub use countdown::{format_clock, Countdown, TickOutcome};
pub use error::{CheckinError, CheckinResult};
pub use provider::{ProviderConfig, ProviderKey, Rgb, PROVIDERS};
pub use settings::Settings;
pub use ticker::{CountdownTimer, Tick, TickSource, TickerId};
pub use verdict::{Verdict, VerdictRule};
