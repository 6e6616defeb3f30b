//! Application state tests
//!
//! Exercises the modal controller together with the countdown timers.
//! Time is paused so ticks arrive deterministically.

use convenio::checkin::{Attempt, CheckinError, CodeStatus, ProviderKey, Verdict};
use convenio::ui::app::NoticeKind;
use convenio::ui::config::Config;
use convenio::ui::App;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use std::time::Duration;
use tempfile::TempDir;

fn create_test_app(config: Config) -> App {
    App::new(config).with_rng(StdRng::seed_from_u64(7))
}

/// Let the tickers run for `millis` of paused time, then fold the
/// ticks into the app.
async fn advance(app: &mut App, millis: u64) -> usize {
    tokio::time::sleep(Duration::from_millis(millis)).await;
    app.drain_ticks()
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        app.push_char(c);
    }
}

fn clinipam_status(app: &App) -> CodeStatus {
    match &app.modal {
        Some(Attempt::Clinipam(a)) => a.status(),
        _ => panic!("expected the Clinipam modal"),
    }
}

#[tokio::test]
async fn test_new_app_defaults() {
    let app = create_test_app(Config::default());
    assert_eq!(app.selected_index, 0);
    assert!(app.modal.is_none());
    assert!(app.notice.is_none());
    assert_eq!(app.theme.name, "Catppuccin Latte");
    assert_eq!(app.providers().len(), 4);
}

#[tokio::test]
async fn test_unknown_theme_falls_back_to_default() {
    let config = Config {
        theme: "Solarized".to_string(),
        ..Config::default()
    };
    let app = create_test_app(config);
    assert_eq!(app.theme.name, "Catppuccin Latte");
}

#[tokio::test(start_paused = true)]
async fn test_clinipam_code_counts_down_and_expires() {
    let config = Config {
        code_ttl_seconds: 3,
        ..Config::default()
    };
    let mut app = create_test_app(config);
    app.open_modal(ProviderKey::Clinipam);
    assert_eq!(clinipam_status(&app), CodeStatus::NotGenerated);

    app.generate_code();
    assert_eq!(clinipam_status(&app), CodeStatus::Valid { remaining: 3 });

    assert_eq!(advance(&mut app, 1500).await, 1);
    assert_eq!(clinipam_status(&app), CodeStatus::Valid { remaining: 2 });

    advance(&mut app, 2000).await;
    assert_eq!(clinipam_status(&app), CodeStatus::Expired);
    assert!(!app.has_running_timer());

    let Some(Attempt::Clinipam(attempt)) = &app.modal else {
        panic!("expected the Clinipam modal");
    };
    assert_eq!(attempt.error(), Some(CheckinError::TimerExpired));
}

#[tokio::test(start_paused = true)]
async fn test_clinipam_regenerate_resets_timer() {
    let mut app = create_test_app(Config::default());
    app.open_modal(ProviderKey::Clinipam);
    app.generate_code();

    advance(&mut app, 10_500).await;
    assert_eq!(clinipam_status(&app), CodeStatus::Valid { remaining: 290 });

    app.generate_code();
    assert_eq!(clinipam_status(&app), CodeStatus::Valid { remaining: 300 });

    // Ticks from the replaced ticker are not counted twice.
    advance(&mut app, 1_000).await;
    assert_eq!(clinipam_status(&app), CodeStatus::Valid { remaining: 299 });
}

#[tokio::test(start_paused = true)]
async fn test_closing_modal_stops_ticks() {
    let mut app = create_test_app(Config::default());
    app.open_modal(ProviderKey::Clinipam);
    app.generate_code();
    assert!(app.has_running_timer());

    app.close_modal();
    assert!(!app.has_running_timer());
    assert_eq!(advance(&mut app, 5_000).await, 0);
}

#[tokio::test(start_paused = true)]
async fn test_replacing_modal_drops_old_timer() {
    let mut app = create_test_app(Config::default());
    app.open_modal(ProviderKey::Clinipam);
    app.generate_code();

    app.open_modal(ProviderKey::Outros);
    assert!(!app.has_running_timer());
    advance(&mut app, 3_000).await;
    assert_eq!(app.active_provider(), Some(ProviderKey::Outros));
}

#[tokio::test(start_paused = true)]
async fn test_outros_auto_closes_after_acceptance() {
    let mut app = create_test_app(Config::default());
    app.open_modal(ProviderKey::Outros);
    type_text(&mut app, "12345678902");
    app.confirm();

    match &app.modal {
        Some(Attempt::Outros(a)) => assert_eq!(a.verdict(), Verdict::Accepted),
        _ => panic!("expected the Outros modal"),
    }
    assert!(app.has_running_timer());

    advance(&mut app, 2_500).await;
    assert!(app.modal.is_some());

    advance(&mut app, 1_000).await;
    assert!(app.modal.is_none());
    let notice = app.notice.as_ref().expect("notice");
    assert_eq!(notice.kind, NoticeKind::Success);
    assert!(notice.text.contains("Outros"));
}

#[tokio::test(start_paused = true)]
async fn test_accepted_outros_ignores_edits() {
    let mut app = create_test_app(Config::default());
    app.open_modal(ProviderKey::Outros);
    type_text(&mut app, "12345678902");
    app.confirm();
    app.pop_char();
    app.push_char('1');

    let Some(Attempt::Outros(attempt)) = &app.modal else {
        panic!("expected the Outros modal");
    };
    assert_eq!(attempt.cpf.digits(), "12345678902");
    assert_eq!(attempt.verdict(), Verdict::Accepted);
}

fn submit_unimed_token(app: &mut App, path: &std::path::Path) {
    app.open_modal(ProviderKey::Unimed);
    app.switch_mode();
    type_text(app, &path.display().to_string());
    // First Enter previews, second confirms.
    app.confirm();
    app.confirm();
}

#[tokio::test(start_paused = true)]
async fn test_unimed_accepted_token_auto_closes() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let token_path = temp_dir.path().join("token.png");
    fs::write(&token_path, [0x89, b'P', b'N', b'G']).expect("write token");

    let mut app = create_test_app(Config::default());
    submit_unimed_token(&mut app, &token_path);

    let Some(Attempt::Unimed(attempt)) = &app.modal else {
        panic!("expected the Unimed modal");
    };
    assert_eq!(attempt.verdict(), Verdict::Accepted);
    assert_eq!(attempt.preview().map(|t| t.size), Some(4));
    assert_eq!(app.next_collection_in(), Some(40 * 60));

    advance(&mut app, 10_000).await;
    assert!(app.modal.is_none());
    let notice = app.notice.as_ref().expect("notice");
    assert_eq!(notice.kind, NoticeKind::Success);
    assert!(notice.text.contains("Unimed"));
}

#[tokio::test(start_paused = true)]
async fn test_unimed_interval_survives_reopening_modal() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let token_path = temp_dir.path().join("token.png");
    fs::write(&token_path, [0x89, b'P', b'N', b'G']).expect("write token");

    let config = Config {
        collection_interval_minutes: 1,
        auto_close_seconds: 0,
        ..Config::default()
    };
    let mut app = create_test_app(config);
    submit_unimed_token(&mut app, &token_path);
    assert!(app.modal.is_none());

    // Same file again inside the interval: refused, no preview.
    submit_unimed_token(&mut app, &token_path);
    let Some(Attempt::Unimed(attempt)) = &app.modal else {
        panic!("expected the Unimed modal");
    };
    assert_eq!(attempt.verdict(), Verdict::Pending);
    assert!(attempt.preview().is_none());
    assert_eq!(
        attempt.error(),
        Some(&CheckinError::InvalidInput(
            "próxima coleta em 1:00".to_string()
        ))
    );

    // After the interval the same file is accepted again.
    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_eq!(app.next_collection_in(), None);
    app.close_modal();
    submit_unimed_token(&mut app, &token_path);
    assert!(app.modal.is_none());
    assert!(app.notice.is_some());
}

#[tokio::test]
async fn test_unimed_rejects_unsupported_file() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let path = temp_dir.path().join("token.gif");
    fs::write(&path, b"GIF89a").expect("write");

    let mut app = create_test_app(Config::default());
    app.open_modal(ProviderKey::Unimed);
    app.switch_mode();
    type_text(&mut app, &path.display().to_string());
    app.confirm();

    let Some(Attempt::Unimed(attempt)) = &app.modal else {
        panic!("expected the Unimed modal");
    };
    assert_eq!(attempt.verdict(), Verdict::InvalidInput);
    assert!(matches!(
        attempt.error(),
        Some(CheckinError::UnsupportedFileType(_))
    ));
}

#[tokio::test]
async fn test_cycle_theme_persists_to_config_path() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let config_path = temp_dir.path().join("config.json");

    let mut app = create_test_app(Config::default()).with_config_path(config_path.clone());
    app.cycle_theme();

    let saved = Config::load_from(&config_path).expect("load saved config");
    assert_eq!(saved.theme, "Catppuccin Mocha");
    assert_eq!(app.theme.name, "Catppuccin Mocha");
}

#[tokio::test]
async fn test_opening_modal_clears_notice() {
    let mut app = create_test_app(Config::default());
    app.open_modal(ProviderKey::Unimed);
    app.simulate();
    assert!(app.notice.is_some());

    app.open_modal(ProviderKey::Clinipam);
    assert!(app.notice.is_none());
}
