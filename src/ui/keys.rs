//! # Key Handling
//!
//! Maps crossterm key events onto [`App`] actions. The open modal captures
//! every key except `Esc` and `Ctrl+C`; the info overlay captures everything
//! but its own close keys.

use crate::checkin::{Attempt, AuthMethod, ProviderKey, UnimedStage, PROVIDERS};
use crate::ui::App;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    if app.show_info {
        if matches!(key.code, KeyCode::Char('i') | KeyCode::Esc) {
            app.toggle_info();
        }
        return;
    }

    if app.modal.is_some() {
        handle_modal_key(app, key);
    } else {
        handle_grid_key(app, key);
    }
}

fn handle_grid_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => app.should_quit = true,
        KeyCode::Char('i') => app.toggle_info(),
        KeyCode::Char('t') => app.cycle_theme(),
        KeyCode::Esc => app.dismiss_notice(),
        KeyCode::Right | KeyCode::Char('l') => app.next(),
        KeyCode::Left | KeyCode::Char('h') => app.previous(),
        KeyCode::Down | KeyCode::Char('j') => app.next_row(),
        KeyCode::Up | KeyCode::Char('k') => app.previous_row(),
        KeyCode::Enter | KeyCode::Char(' ') => app.open_selected(),
        KeyCode::Char(c @ '1'..='9') => {
            let index = (c as usize) - ('1' as usize);
            if let Some(provider) = PROVIDERS.get(index) {
                app.open_modal(provider.key);
            }
        }
        _ => {}
    }
}

fn handle_modal_key(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Esc {
        app.close_modal();
        return;
    }

    let Some(active) = app.active_provider() else {
        return;
    };

    match (active, key.code) {
        (_, KeyCode::Enter) => app.confirm(),
        (_, KeyCode::Backspace) => app.pop_char(),
        (ProviderKey::Hapvida | ProviderKey::Unimed, KeyCode::Tab) => app.switch_mode(),

        (ProviderKey::Clinipam, KeyCode::Char('g' | 'G' | ' ')) => app.generate_code(),

        (ProviderKey::Hapvida, KeyCode::Char(' '))
            if hapvida_method(app) == Some(AuthMethod::Biometric) =>
        {
            app.tap_biometric();
        }

        (ProviderKey::Unimed, KeyCode::Char(c)) => {
            if unimed_stage(app) == Some(UnimedStage::Token) {
                app.push_char(c);
            } else if matches!(c, 's' | 'S') {
                app.simulate();
            }
        }

        (ProviderKey::Outros | ProviderKey::Hapvida, KeyCode::Char(c)) => app.push_char(c),
        _ => {}
    }
}

fn hapvida_method(app: &App) -> Option<AuthMethod> {
    match &app.modal {
        Some(Attempt::Hapvida(a)) => Some(a.method()),
        _ => None,
    }
}

fn unimed_stage(app: &App) -> Option<UnimedStage> {
    match &app.modal {
        Some(Attempt::Unimed(a)) => Some(a.stage()),
        _ => None,
    }
}
