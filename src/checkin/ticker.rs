//! # Cancellable Ticker
//!
//! Drives [`Countdown`]s from a tokio task. Each [`Ticker`] posts a [`Tick`]
//! carrying its own id into the UI loop's channel once per period. Dropping
//! the ticker aborts its task, so a closed modal can never be ticked again;
//! ticks already queued by a dead ticker are discarded because their id no
//! longer matches the live one.
//!
//! ```text
//!  tokio task ──Tick{id}──▶ mpsc ──▶ UI loop ──▶ CountdownTimer::on_tick
//! ```

use super::countdown::{Countdown, TickOutcome};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::{self, Duration, MissedTickBehavior};

/// Default tick period.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickerId(u64);

/// One elapsed period of a specific ticker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub ticker: TickerId,
}

/// Handle to a running periodic task. Aborted on drop.
#[derive(Debug)]
pub struct Ticker {
    id: TickerId,
    handle: JoinHandle<()>,
}

impl Ticker {
    pub fn id(&self) -> TickerId {
        self.id
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
        tracing::trace!(ticker = self.id.0, "ticker cancelled");
    }
}

/// Spawns tickers and collects their ticks.
///
/// Must be used from within a tokio runtime.
#[derive(Debug)]
pub struct TickSource {
    tx: UnboundedSender<Tick>,
    rx: UnboundedReceiver<Tick>,
    next_id: u64,
    period: Duration,
}

impl Default for TickSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TickSource {
    pub fn new() -> Self {
        Self::with_period(TICK_PERIOD)
    }

    pub fn with_period(period: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            tx,
            rx,
            next_id: 0,
            period,
        }
    }

    /// Start a new periodic task. The first tick arrives one period from now.
    pub fn start(&mut self) -> Ticker {
        let id = TickerId(self.next_id);
        self.next_id += 1;

        let tx = self.tx.clone();
        let period = self.period;
        let handle = tokio::spawn(async move {
            let mut interval = time::interval_at(time::Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tx.send(Tick { ticker: id }).is_err() {
                    break;
                }
            }
        });
        tracing::trace!(ticker = id.0, "ticker started");

        Ticker { id, handle }
    }

    /// Next queued tick, if any. Never blocks.
    pub fn try_next(&mut self) -> Option<Tick> {
        self.rx.try_recv().ok()
    }
}

/// A countdown together with the ticker that drives it.
///
/// The ticker is released as soon as the countdown reaches zero, on
/// [`restart`](Self::restart) and on drop.
#[derive(Debug)]
pub struct CountdownTimer {
    countdown: Countdown,
    ticker: Option<Ticker>,
}

impl CountdownTimer {
    pub fn start(duration: u64, source: &mut TickSource) -> Self {
        let countdown = Countdown::new(duration);
        let ticker = (!countdown.is_expired()).then(|| source.start());
        Self { countdown, ticker }
    }

    /// Cancel the current ticker and count again from the full duration.
    pub fn restart(&mut self, source: &mut TickSource) {
        self.ticker = None;
        self.countdown.reset();
        if !self.countdown.is_expired() {
            self.ticker = Some(source.start());
        }
    }

    /// Apply a tick. Returns `None` when the tick belongs to another (or a
    /// cancelled) ticker.
    pub fn on_tick(&mut self, tick: Tick) -> Option<TickOutcome> {
        if self.ticker.as_ref().map(Ticker::id) != Some(tick.ticker) {
            return None;
        }
        let outcome = self.countdown.tick();
        if outcome != TickOutcome::Running {
            self.ticker = None;
        }
        Some(outcome)
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    pub fn is_ticking(&self) -> bool {
        self.ticker.is_some()
    }

    pub fn ticker_id(&self) -> Option<TickerId> {
        self.ticker.as_ref().map(Ticker::id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(source: &mut TickSource) -> Vec<Tick> {
        std::iter::from_fn(|| source.try_next()).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticker_posts_once_per_period() {
        let mut source = TickSource::new();
        let ticker = source.start();

        time::sleep(Duration::from_millis(3500)).await;

        let ticks = drain(&mut source);
        assert_eq!(ticks.len(), 3);
        assert!(ticks.iter().all(|t| t.ticker == ticker.id()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_ticker_stops_ticking() {
        let mut source = TickSource::new();
        let ticker = source.start();
        drop(ticker);

        time::sleep(Duration::from_secs(5)).await;

        assert!(drain(&mut source).is_empty());
    }

    #[tokio::test]
    async fn test_timer_ignores_foreign_ticks() {
        let mut source = TickSource::new();
        let mut timer = CountdownTimer::start(10, &mut source);
        let other = source.start();

        assert_eq!(timer.on_tick(Tick { ticker: other.id() }), None);
        assert_eq!(timer.countdown().remaining(), 10);
    }

    #[tokio::test]
    async fn test_timer_releases_ticker_at_zero() {
        let mut source = TickSource::new();
        let mut timer = CountdownTimer::start(2, &mut source);
        let id = timer.ticker_id().expect("ticking");

        assert_eq!(timer.on_tick(Tick { ticker: id }), Some(TickOutcome::Running));
        assert_eq!(timer.on_tick(Tick { ticker: id }), Some(TickOutcome::Expired));
        assert!(!timer.is_ticking());
        // Late ticks from the released ticker are ignored.
        assert_eq!(timer.on_tick(Tick { ticker: id }), None);
        assert_eq!(timer.countdown().remaining(), 0);
    }

    #[tokio::test]
    async fn test_restart_replaces_ticker_and_resets() {
        let mut source = TickSource::new();
        let mut timer = CountdownTimer::start(300, &mut source);
        let old = timer.ticker_id().expect("ticking");
        for _ in 0..42 {
            timer.on_tick(Tick { ticker: old });
        }
        assert_eq!(timer.countdown().remaining(), 258);

        timer.restart(&mut source);

        let new = timer.ticker_id().expect("ticking");
        assert_ne!(old, new);
        assert_eq!(timer.countdown().remaining(), 300);
        assert_eq!(timer.on_tick(Tick { ticker: old }), None);
    }

    #[tokio::test]
    async fn test_zero_duration_never_ticks() {
        let mut source = TickSource::new();
        let timer = CountdownTimer::start(0, &mut source);
        assert!(!timer.is_ticking());
        assert!(timer.countdown().is_expired());
    }
}
