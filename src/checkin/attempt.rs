//! # Authentication Attempts
//!
//! One attempt per open modal. Every provider collects a different kind of
//! input and decides a mock verdict with its own rule:
//!
//! | Provider | Input | Outcome |
//! |----------|-------|---------|
//! | Unimed | QR code or token screenshot | simulated / token accepted |
//! | Clinipam | "generate" | 4-digit code valid for a few minutes |
//! | HapVida | CPF or biometric tap | complete CPF / tap accepted |
//! | Outros | CPF | parity of the last digit |
//!
//! An attempt owns at most one [`CountdownTimer`]. Dropping the attempt
//! drops the timer, which cancels its ticker.

use super::code::generate_code;
use super::collection::CollectionWindow;
use super::countdown::{format_clock, TickOutcome};
use super::cpf::CpfField;
use super::error::CheckinError;
use super::provider::ProviderKey;
use super::qr::QrRequest;
use super::settings::Settings;
use super::ticker::{CountdownTimer, Tick, TickSource};
use super::token::TokenFile;
use super::verdict::{CompleteCpf, LastDigitParity, Verdict, VerdictRule};
use rand::Rng;
use std::path::Path;
use tracing::{debug, info, warn};

/// How an attempt finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The attendant pressed "simulate authentication".
    Simulated,
    /// The patient was accepted and the modal closed itself.
    CheckedIn,
}

/// What the owner of the attempt should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Stay,
    Complete(Completion),
}

/// Start the auto-close countdown after an accepted verdict.
fn start_auto_close(
    settings: &Settings,
    source: &mut TickSource,
) -> (Option<CountdownTimer>, Transition) {
    if settings.auto_close_seconds == 0 {
        return (None, Transition::Complete(Completion::CheckedIn));
    }
    (
        Some(CountdownTimer::start(settings.auto_close_seconds, source)),
        Transition::Stay,
    )
}

fn auto_close_tick(timer: &mut Option<CountdownTimer>, tick: Tick) -> Transition {
    match timer.as_mut().and_then(|t| t.on_tick(tick)) {
        Some(TickOutcome::Expired | TickOutcome::Idle) => {
            *timer = None;
            Transition::Complete(Completion::CheckedIn)
        }
        _ => Transition::Stay,
    }
}

// ---------------------------------------------------------------------------
// Outros
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct OutrosAttempt {
    pub cpf: CpfField,
    verdict: Verdict,
    auto_close: Option<CountdownTimer>,
}

impl OutrosAttempt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    /// Seconds left before the modal closes itself, once accepted.
    pub fn auto_close(&self) -> Option<&CountdownTimer> {
        self.auto_close.as_ref()
    }

    pub fn push(&mut self, c: char) {
        if self.verdict.is_accepted() {
            return;
        }
        if self.cpf.push(c) {
            self.verdict = Verdict::Pending;
        }
    }

    pub fn pop(&mut self) {
        if self.verdict.is_accepted() {
            return;
        }
        if self.cpf.pop() {
            self.verdict = Verdict::Pending;
        }
    }

    pub fn confirm(&mut self, settings: &Settings, source: &mut TickSource) -> Transition {
        if self.verdict.is_accepted() {
            return Transition::Stay;
        }
        self.verdict = LastDigitParity.evaluate(self.cpf.digits());
        info!(provider = "outros", verdict = ?self.verdict, "cpf evaluated");

        if !self.verdict.is_accepted() {
            return Transition::Stay;
        }
        let (timer, transition) = start_auto_close(settings, source);
        self.auto_close = timer;
        transition
    }

    pub fn on_tick(&mut self, tick: Tick) -> Transition {
        auto_close_tick(&mut self.auto_close, tick)
    }
}

// ---------------------------------------------------------------------------
// HapVida
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMethod {
    #[default]
    Cpf,
    Biometric,
}

#[derive(Debug, Default)]
pub struct HapvidaAttempt {
    method: AuthMethod,
    pub cpf: CpfField,
    verdict: Verdict,
    auto_close: Option<CountdownTimer>,
}

impl HapvidaAttempt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(&self) -> AuthMethod {
        self.method
    }

    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    pub fn auto_close(&self) -> Option<&CountdownTimer> {
        self.auto_close.as_ref()
    }

    pub fn set_method(&mut self, method: AuthMethod) {
        if self.verdict.is_accepted() || self.method == method {
            return;
        }
        self.method = method;
        self.verdict = Verdict::Pending;
    }

    pub fn toggle_method(&mut self) {
        let next = match self.method {
            AuthMethod::Cpf => AuthMethod::Biometric,
            AuthMethod::Biometric => AuthMethod::Cpf,
        };
        self.set_method(next);
    }

    pub fn push(&mut self, c: char) {
        if self.method == AuthMethod::Cpf && !self.verdict.is_accepted() && self.cpf.push(c) {
            self.verdict = Verdict::Pending;
        }
    }

    pub fn pop(&mut self) {
        if self.method == AuthMethod::Cpf && !self.verdict.is_accepted() && self.cpf.pop() {
            self.verdict = Verdict::Pending;
        }
    }

    /// Whether the submit button is enabled.
    pub fn can_submit(&self) -> bool {
        match self.method {
            AuthMethod::Cpf => self.cpf.is_complete(),
            AuthMethod::Biometric => true,
        }
    }

    /// Submit the CPF, or register a tap on the biometric reader.
    pub fn submit(&mut self, settings: &Settings, source: &mut TickSource) -> Transition {
        if self.verdict.is_accepted() {
            return Transition::Stay;
        }
        self.verdict = match self.method {
            AuthMethod::Cpf => CompleteCpf.evaluate(self.cpf.digits()),
            AuthMethod::Biometric => Verdict::Accepted,
        };
        info!(provider = "hapvida", method = ?self.method, verdict = ?self.verdict, "attempt evaluated");

        if !self.verdict.is_accepted() {
            return Transition::Stay;
        }
        let (timer, transition) = start_auto_close(settings, source);
        self.auto_close = timer;
        transition
    }

    pub fn on_tick(&mut self, tick: Tick) -> Transition {
        auto_close_tick(&mut self.auto_close, tick)
    }
}

// ---------------------------------------------------------------------------
// Clinipam
// ---------------------------------------------------------------------------

/// State of the temporary code shown by Clinipam.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeStatus {
    NotGenerated,
    Valid { remaining: u64 },
    Expired,
}

#[derive(Debug, Default)]
pub struct ClinipamAttempt {
    code: Option<String>,
    timer: Option<CountdownTimer>,
}

impl ClinipamAttempt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    pub fn timer(&self) -> Option<&CountdownTimer> {
        self.timer.as_ref()
    }

    pub fn status(&self) -> CodeStatus {
        match (&self.code, &self.timer) {
            (Some(_), Some(timer)) if !timer.countdown().is_expired() => CodeStatus::Valid {
                remaining: timer.countdown().remaining(),
            },
            (Some(_), _) => CodeStatus::Expired,
            (None, _) => CodeStatus::NotGenerated,
        }
    }

    /// The error to show once the code has expired.
    pub fn error(&self) -> Option<CheckinError> {
        (self.status() == CodeStatus::Expired).then_some(CheckinError::TimerExpired)
    }

    /// Draw a new code and restart the expiry countdown from full duration.
    pub fn generate<R: Rng>(&mut self, rng: &mut R, settings: &Settings, source: &mut TickSource) {
        let code = generate_code(rng);
        match self.timer.as_mut() {
            Some(timer) if timer.countdown().duration() == settings.code_ttl_seconds => {
                timer.restart(source);
            }
            _ => self.timer = Some(CountdownTimer::start(settings.code_ttl_seconds, source)),
        }
        info!(provider = "clinipam", ttl = settings.code_ttl_seconds, "code generated");
        self.code = Some(code);
    }

    pub fn on_tick(&mut self, tick: Tick) -> Transition {
        if let Some(TickOutcome::Expired) = self.timer.as_mut().and_then(|t| t.on_tick(tick)) {
            warn!(provider = "clinipam", "code expired");
        }
        Transition::Stay
    }
}

// ---------------------------------------------------------------------------
// Unimed
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnimedStage {
    #[default]
    Qr,
    Token,
}

#[derive(Debug, Default)]
pub struct UnimedAttempt {
    stage: UnimedStage,
    session_code: String,
    path_input: String,
    preview: Option<TokenFile>,
    error: Option<CheckinError>,
    verdict: Verdict,
    auto_close: Option<CountdownTimer>,
}

impl UnimedAttempt {
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        Self {
            session_code: generate_code(rng),
            ..Self::default()
        }
    }

    pub fn stage(&self) -> UnimedStage {
        self.stage
    }

    pub fn path_input(&self) -> &str {
        &self.path_input
    }

    pub fn preview(&self) -> Option<&TokenFile> {
        self.preview.as_ref()
    }

    pub fn error(&self) -> Option<&CheckinError> {
        self.error.as_ref()
    }

    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    pub fn auto_close(&self) -> Option<&CountdownTimer> {
        self.auto_close.as_ref()
    }

    /// Text encoded in this attempt's QR code.
    pub fn qr_data(&self) -> String {
        format!("UNIMED-CHECKIN-{}", self.session_code)
    }

    pub fn qr_request(&self, settings: &Settings) -> QrRequest {
        QrRequest::new(
            self.qr_data(),
            settings.qr_size,
            ProviderKey::Unimed.config().color,
        )
    }

    pub fn toggle_stage(&mut self) {
        self.stage = match self.stage {
            UnimedStage::Qr => UnimedStage::Token,
            UnimedStage::Token => UnimedStage::Qr,
        };
    }

    pub fn simulate(&mut self) -> Transition {
        info!(provider = "unimed", "authentication simulated");
        self.verdict = Verdict::Accepted;
        Transition::Complete(Completion::Simulated)
    }

    pub fn push(&mut self, c: char) {
        if c.is_control() || self.verdict.is_accepted() {
            return;
        }
        self.path_input.push(c);
        self.preview = None;
        self.error = None;
    }

    pub fn pop(&mut self) {
        if self.verdict.is_accepted() {
            return;
        }
        if self.path_input.pop().is_some() {
            self.preview = None;
            self.error = None;
        }
    }

    /// Enter in the token stage: inspect the typed path, or confirm the
    /// previewed file. Refused while `window` is still closed.
    pub fn submit_token(
        &mut self,
        settings: &Settings,
        source: &mut TickSource,
        window: &mut CollectionWindow,
    ) -> Transition {
        if self.verdict.is_accepted() {
            return Transition::Stay;
        }
        if let Some(remaining) = window.remaining() {
            self.error = Some(CheckinError::InvalidInput(format!(
                "próxima coleta em {}",
                format_clock(remaining)
            )));
            return Transition::Stay;
        }

        if self.preview.is_none() {
            let path = self.path_input.trim();
            match TokenFile::inspect(Path::new(path), settings.max_token_bytes) {
                Ok(token) => {
                    debug!(provider = "unimed", file = %token.file_name, size = token.size, "token previewed");
                    self.preview = Some(token);
                    self.error = None;
                    self.verdict = Verdict::Pending;
                }
                Err(err) => {
                    warn!(provider = "unimed", error = %err, "token rejected");
                    self.verdict = Verdict::InvalidInput;
                    self.error = Some(err);
                }
            }
            return Transition::Stay;
        }

        self.verdict = Verdict::Accepted;
        window.record(settings.collection_interval_seconds);
        info!(
            provider = "unimed",
            interval = settings.collection_interval_seconds,
            "token collected"
        );
        let (timer, transition) = start_auto_close(settings, source);
        self.auto_close = timer;
        transition
    }

    pub fn on_tick(&mut self, tick: Tick) -> Transition {
        auto_close_tick(&mut self.auto_close, tick)
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// The attempt behind the open modal.
#[derive(Debug)]
pub enum Attempt {
    Unimed(UnimedAttempt),
    Clinipam(ClinipamAttempt),
    Hapvida(HapvidaAttempt),
    Outros(OutrosAttempt),
}

impl Attempt {
    /// A fresh attempt for `key`. Nothing is carried over from earlier ones.
    pub fn open<R: Rng>(key: ProviderKey, rng: &mut R) -> Self {
        match key {
            ProviderKey::Unimed => Attempt::Unimed(UnimedAttempt::new(rng)),
            ProviderKey::Clinipam => Attempt::Clinipam(ClinipamAttempt::new()),
            ProviderKey::Hapvida => Attempt::Hapvida(HapvidaAttempt::new()),
            ProviderKey::Outros => Attempt::Outros(OutrosAttempt::new()),
        }
    }

    pub fn key(&self) -> ProviderKey {
        match self {
            Attempt::Unimed(_) => ProviderKey::Unimed,
            Attempt::Clinipam(_) => ProviderKey::Clinipam,
            Attempt::Hapvida(_) => ProviderKey::Hapvida,
            Attempt::Outros(_) => ProviderKey::Outros,
        }
    }

    pub fn on_tick(&mut self, tick: Tick) -> Transition {
        match self {
            Attempt::Unimed(a) => a.on_tick(tick),
            Attempt::Clinipam(a) => a.on_tick(tick),
            Attempt::Hapvida(a) => a.on_tick(tick),
            Attempt::Outros(a) => a.on_tick(tick),
        }
    }

    /// Whether any timer of this attempt currently holds a ticker.
    pub fn is_ticking(&self) -> bool {
        let timer = match self {
            Attempt::Unimed(a) => a.auto_close.as_ref(),
            Attempt::Clinipam(a) => a.timer.as_ref(),
            Attempt::Hapvida(a) => a.auto_close.as_ref(),
            Attempt::Outros(a) => a.auto_close.as_ref(),
        };
        timer.is_some_and(CountdownTimer::is_ticking)
    }
}
