use crate::checkin::{
    Attempt, AuthMethod, CollectionWindow, Completion, ProviderConfig, ProviderKey, Settings, Tick,
    TickSource, Transition, UnimedStage, PROVIDERS,
};
use crate::ui::config::Config;
use crate::ui::theme::Theme;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use tracing::{info, warn};

/// Cards per row on the landing grid.
pub const GRID_COLUMNS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Info,
}

/// One-line message shown under the grid after a modal closes itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

pub struct App {
    pub selected_index: usize,
    /// The open modal, if any. Only one attempt exists at a time.
    pub modal: Option<Attempt>,
    pub notice: Option<Notice>,
    pub should_quit: bool,
    pub show_info: bool,
    pub theme: &'static Theme,
    pub config: Config,
    pub settings: Settings,
    /// Where theme changes are saved. `None` keeps them in memory only.
    config_path: Option<PathBuf>,
    ticks: TickSource,
    /// Unimed token spacing; kept across modals.
    collection: CollectionWindow,
    rng: StdRng,
}

impl App {
    pub fn new(config: Config) -> Self {
        let theme = Theme::by_name(&config.theme).unwrap_or_else(|| {
            warn!(theme = %config.theme, "unknown theme, using default");
            Theme::default_theme()
        });
        Self {
            selected_index: 0,
            modal: None,
            notice: None,
            should_quit: false,
            show_info: false,
            theme,
            settings: config.settings(),
            config,
            config_path: None,
            ticks: TickSource::new(),
            collection: CollectionWindow::new(),
            rng: StdRng::from_os_rng(),
        }
    }

    /// Use a fixed random source (tests, demos).
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    /// Persist theme changes to `path`.
    pub fn with_config_path(mut self, path: PathBuf) -> Self {
        self.config_path = Some(path);
        self
    }

    pub fn providers(&self) -> &'static [ProviderConfig] {
        &PROVIDERS
    }

    pub fn selected_provider(&self) -> &'static ProviderConfig {
        &PROVIDERS[self.selected_index % PROVIDERS.len()]
    }

    pub fn active_provider(&self) -> Option<ProviderKey> {
        self.modal.as_ref().map(Attempt::key)
    }

    // -- Grid navigation --------------------------------------------------

    pub fn next(&mut self) {
        self.selected_index = (self.selected_index + 1) % PROVIDERS.len();
    }

    pub fn previous(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        } else {
            self.selected_index = PROVIDERS.len() - 1;
        }
    }

    /// Move one row down (or up: with two rows both wrap to the other row).
    pub fn next_row(&mut self) {
        self.selected_index = (self.selected_index + GRID_COLUMNS) % PROVIDERS.len();
    }

    pub fn previous_row(&mut self) {
        self.selected_index =
            (self.selected_index + PROVIDERS.len() - GRID_COLUMNS) % PROVIDERS.len();
    }

    // -- Modal controller ---------------------------------------------------

    /// Show the modal for `key`, replacing whatever modal was open.
    ///
    /// The previous attempt is dropped, which cancels its timer.
    pub fn open_modal(&mut self, key: ProviderKey) {
        if let Some(previous) = self.modal.take() {
            info!(from = %previous.key(), to = %key, "modal replaced");
        }
        self.notice = None;
        self.modal = Some(Attempt::open(key, &mut self.rng));
        if let Some(index) = PROVIDERS.iter().position(|p| p.key == key) {
            self.selected_index = index;
        }
        info!(provider = %key, "modal opened");
    }

    pub fn open_selected(&mut self) {
        self.open_modal(self.selected_provider().key);
    }

    pub fn close_modal(&mut self) {
        if let Some(attempt) = self.modal.take() {
            info!(provider = %attempt.key(), "modal closed");
        }
    }

    /// Act on what an attempt asked for.
    pub fn apply(&mut self, transition: Transition) {
        let Transition::Complete(completion) = transition else {
            return;
        };
        let name = self
            .active_provider()
            .map(|key| key.config().name)
            .unwrap_or_default();
        self.close_modal();
        self.notice = Some(match completion {
            Completion::Simulated => Notice {
                kind: NoticeKind::Info,
                text: "Autenticação simulada com sucesso!".to_string(),
            },
            Completion::CheckedIn => Notice {
                kind: NoticeKind::Success,
                text: format!(
                    "Check-in confirmado: {} às {}",
                    name,
                    chrono::Local::now().format("%H:%M")
                ),
            },
        });
    }

    // -- Modal actions ------------------------------------------------------

    /// Enter inside the modal.
    pub fn confirm(&mut self) {
        let transition = match self.modal.as_mut() {
            Some(Attempt::Outros(a)) => a.confirm(&self.settings, &mut self.ticks),
            Some(Attempt::Hapvida(a)) => a.submit(&self.settings, &mut self.ticks),
            Some(Attempt::Clinipam(a)) => {
                a.generate(&mut self.rng, &self.settings, &mut self.ticks);
                Transition::Stay
            }
            Some(Attempt::Unimed(a)) => match a.stage() {
                UnimedStage::Qr => a.simulate(),
                UnimedStage::Token => {
                    a.submit_token(&self.settings, &mut self.ticks, &mut self.collection)
                }
            },
            None => Transition::Stay,
        };
        self.apply(transition);
    }

    /// Generate a new Clinipam code.
    pub fn generate_code(&mut self) {
        if let Some(Attempt::Clinipam(a)) = self.modal.as_mut() {
            a.generate(&mut self.rng, &self.settings, &mut self.ticks);
        }
    }

    /// Tap on the HapVida biometric placeholder.
    pub fn tap_biometric(&mut self) {
        let transition = match self.modal.as_mut() {
            Some(Attempt::Hapvida(a)) if a.method() == AuthMethod::Biometric => {
                a.submit(&self.settings, &mut self.ticks)
            }
            _ => Transition::Stay,
        };
        self.apply(transition);
    }

    /// Unimed "simulate authentication".
    pub fn simulate(&mut self) {
        let transition = match self.modal.as_mut() {
            Some(Attempt::Unimed(a)) => a.simulate(),
            _ => Transition::Stay,
        };
        self.apply(transition);
    }

    /// Text input inside the modal.
    pub fn push_char(&mut self, c: char) {
        match self.modal.as_mut() {
            Some(Attempt::Outros(a)) => a.push(c),
            Some(Attempt::Hapvida(a)) => a.push(c),
            Some(Attempt::Unimed(a)) => a.push(c),
            Some(Attempt::Clinipam(_)) | None => {}
        }
    }

    pub fn pop_char(&mut self) {
        match self.modal.as_mut() {
            Some(Attempt::Outros(a)) => a.pop(),
            Some(Attempt::Hapvida(a)) => a.pop(),
            Some(Attempt::Unimed(a)) => a.pop(),
            Some(Attempt::Clinipam(_)) | None => {}
        }
    }

    /// Tab inside the modal: switch HapVida method or Unimed stage.
    pub fn switch_mode(&mut self) {
        match self.modal.as_mut() {
            Some(Attempt::Hapvida(a)) => a.toggle_method(),
            Some(Attempt::Unimed(a)) => a.toggle_stage(),
            _ => {}
        }
    }

    // -- Timers ---------------------------------------------------------------

    /// Route one tick to the open attempt.
    pub fn handle_tick(&mut self, tick: Tick) {
        let transition = match self.modal.as_mut() {
            Some(attempt) => attempt.on_tick(tick),
            None => Transition::Stay,
        };
        self.apply(transition);
    }

    /// Apply every queued tick. Returns how many were processed.
    pub fn drain_ticks(&mut self) -> usize {
        let mut count = 0;
        while let Some(tick) = self.ticks.try_next() {
            self.handle_tick(tick);
            count += 1;
        }
        count
    }

    /// Seconds until Unimed accepts another token, if it is waiting.
    pub fn next_collection_in(&self) -> Option<u64> {
        self.collection.remaining()
    }

    /// Whether a ticker is currently alive for the open modal.
    pub fn has_running_timer(&self) -> bool {
        self.modal.as_ref().is_some_and(Attempt::is_ticking)
    }

    // -- Misc -------------------------------------------------------------------

    pub fn toggle_info(&mut self) {
        self.show_info = !self.show_info;
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Switch to the next built-in theme and remember it.
    pub fn cycle_theme(&mut self) {
        self.theme = self.theme.next();
        self.config.theme = self.theme.name.to_string();
        info!(theme = self.theme.name, "theme changed");

        if let Some(path) = &self.config_path {
            if let Err(e) = self.config.save_to(path) {
                warn!(error = %format!("{e:#}"), "could not save theme");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkin::{CountdownTimer, Verdict};

    fn create_test_app() -> App {
        App::new(Config::default()).with_rng(StdRng::seed_from_u64(9))
    }

    #[tokio::test]
    async fn test_starts_without_modal() {
        let app = create_test_app();
        assert!(app.modal.is_none());
        assert_eq!(app.selected_provider().key, ProviderKey::Unimed);
    }

    #[tokio::test]
    async fn test_grid_navigation_wraps() {
        let mut app = create_test_app();
        app.previous();
        assert_eq!(app.selected_index, 3);
        app.next();
        assert_eq!(app.selected_index, 0);
        app.next_row();
        assert_eq!(app.selected_index, 2);
        app.next_row();
        assert_eq!(app.selected_index, 0);
        app.previous_row();
        assert_eq!(app.selected_index, 2);
    }

    #[tokio::test]
    async fn test_open_replaces_without_leaking_state() {
        let mut app = create_test_app();
        app.open_modal(ProviderKey::Outros);
        for c in "12345678902".chars() {
            app.push_char(c);
        }
        app.open_modal(ProviderKey::Hapvida);
        assert_eq!(app.active_provider(), Some(ProviderKey::Hapvida));

        app.open_modal(ProviderKey::Outros);
        match &app.modal {
            Some(Attempt::Outros(a)) => {
                assert!(a.cpf.is_empty());
                assert_eq!(a.verdict(), Verdict::Pending);
            }
            other => panic!("unexpected modal {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_replacing_modal_cancels_timer() {
        let mut app = create_test_app();
        app.open_modal(ProviderKey::Clinipam);
        app.generate_code();
        assert!(app.has_running_timer());

        app.open_modal(ProviderKey::Outros);
        assert!(!app.has_running_timer());
    }

    #[tokio::test]
    async fn test_close_clears_unconditionally() {
        let mut app = create_test_app();
        app.close_modal();
        assert!(app.modal.is_none());
        app.open_modal(ProviderKey::Unimed);
        app.close_modal();
        assert!(app.modal.is_none());
    }

    #[tokio::test]
    async fn test_simulate_closes_with_notice() {
        let mut app = create_test_app();
        app.open_modal(ProviderKey::Unimed);
        app.simulate();
        assert!(app.modal.is_none());
        assert_eq!(
            app.notice.as_ref().map(|n| n.text.as_str()),
            Some("Autenticação simulada com sucesso!")
        );
    }

    #[tokio::test]
    async fn test_stale_tick_after_close_is_ignored() {
        let mut app = create_test_app();
        app.open_modal(ProviderKey::Clinipam);
        app.generate_code();
        let id = match &app.modal {
            Some(Attempt::Clinipam(a)) => a.timer().and_then(CountdownTimer::ticker_id),
            _ => None,
        }
        .expect("ticking");

        app.close_modal();
        app.handle_tick(Tick { ticker: id });
        assert!(app.modal.is_none());
        assert!(app.notice.is_none());
    }

    #[tokio::test]
    async fn test_cycle_theme_updates_config() {
        let mut app = create_test_app();
        app.cycle_theme();
        assert_eq!(app.theme.name, "Catppuccin Mocha");
        assert_eq!(app.config.theme, "Catppuccin Mocha");
    }

    #[tokio::test]
    async fn test_cycle_theme_saves_when_path_set() {
        let dir = tempfile::TempDir::new().expect("create temp dir");
        let path = dir.path().join("config.json");
        let mut app = create_test_app().with_config_path(path.clone());
        app.cycle_theme();

        let saved = Config::load_from(&path).expect("load");
        assert_eq!(saved.theme, "Catppuccin Mocha");
    }

    #[tokio::test]
    async fn test_unknown_theme_falls_back() {
        let config = Config {
            theme: "Solarized".to_string(),
            ..Config::default()
        };
        let app = App::new(config);
        assert_eq!(app.theme.name, Theme::default_theme().name);
    }
}
