use crate::checkin::{
    Attempt, AuthMethod, ClinipamAttempt, CodeStatus, CountdownTimer, HapvidaAttempt,
    OutrosAttempt, ProviderConfig, UnimedAttempt, UnimedStage, Verdict, format_clock,
};
use crate::ui::app::{App, NoticeKind, GRID_COLUMNS};
use crate::ui::theme::{rgb, Theme};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

pub fn render(frame: &mut Frame, app: &App) {
    let theme = app.theme;

    frame.render_widget(
        Block::default().style(Style::default().bg(theme.bg).fg(theme.fg)),
        frame.area(),
    );

    // Main layout: Header + Grid + Notice + Footer
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Header
            Constraint::Min(0),    // Card grid
            Constraint::Length(1), // Notice
            Constraint::Length(1), // Footer
        ])
        .split(frame.area());

    render_header(frame, theme, main_chunks[0]);
    render_grid(frame, app, main_chunks[1]);
    render_notice(frame, app, main_chunks[2]);
    render_footer(frame, app, main_chunks[3]);

    if let Some(attempt) = &app.modal {
        render_modal(frame, app, attempt);
    }

    if app.show_info {
        render_info(frame, theme);
    }
}

fn render_header(frame: &mut Frame, theme: &Theme, area: Rect) {
    let header_text = vec![
        Line::from(Span::styled(
            "Autenticador de Convênio",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Sistema de Check-in Digital",
            Style::default().fg(theme.fg_dim),
        )),
    ];

    let header = Paragraph::new(header_text)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(theme.fg_dim)),
        );

    frame.render_widget(header, area);
}

fn render_grid(frame: &mut Frame, app: &App, area: Rect) {
    let providers = app.providers();
    let rows = providers.len().div_ceil(GRID_COLUMNS);

    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Ratio(1, rows as u32); rows])
        .split(area);

    for (row, row_area) in row_areas.iter().enumerate() {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![
                Constraint::Ratio(1, GRID_COLUMNS as u32);
                GRID_COLUMNS
            ])
            .split(*row_area);

        for (col, cell) in cells.iter().enumerate() {
            let index = row * GRID_COLUMNS + col;
            if let Some(provider) = providers.get(index) {
                let selected = index == app.selected_index;
                render_card(frame, app.theme, provider, index, selected, *cell);
            }
        }
    }
}

fn render_card(
    frame: &mut Frame,
    theme: &Theme,
    provider: &ProviderConfig,
    index: usize,
    selected: bool,
    area: Rect,
) {
    let color = rgb(provider.color);
    let (border_style, name_style) = if selected {
        (
            Style::default().fg(color).add_modifier(Modifier::BOLD),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        (
            Style::default().fg(theme.fg_dim),
            Style::default().fg(theme.fg).add_modifier(Modifier::BOLD),
        )
    };

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  {}  ", provider.icon),
            Style::default()
                .fg(theme.bg)
                .bg(color)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(provider.name, name_style)),
        Line::from(Span::styled(
            provider.description,
            Style::default().fg(theme.fg_dim),
        )),
    ];

    let card = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(border_style)
                .title(format!(" {} ", index + 1)),
        );

    frame.render_widget(card, area);
}

fn render_notice(frame: &mut Frame, app: &App, area: Rect) {
    let Some(notice) = &app.notice else {
        return;
    };
    let (icon, color) = match notice.kind {
        NoticeKind::Success => ("✅", app.theme.success),
        NoticeKind::Info => ("ℹ️", app.theme.accent),
    };
    let line = Line::from(Span::styled(
        format!("{icon} {}", notice.text),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = match &app.modal {
        None => "[←→↑↓/hjkl] Navegar  [Enter] Abrir  [1-4] Convênio  [t] Tema  [i] Info  [q] Sair",
        Some(Attempt::Unimed(a)) if a.stage() == UnimedStage::Token => {
            "[Enter] Verificar/Confirmar token  [Tab] QR Code  [Esc] Cancelar"
        }
        Some(Attempt::Unimed(_)) => "[s/Enter] Simular  [Tab] Enviar token  [Esc] Cancelar",
        Some(Attempt::Clinipam(_)) => "[g/Enter] Gerar senha  [Esc] Cancelar",
        Some(Attempt::Hapvida(_)) => {
            "[Tab] Método  [0-9] CPF  [Espaço] Biometria  [Enter] Autenticar  [Esc] Cancelar"
        }
        Some(Attempt::Outros(_)) => "[0-9] CPF  [Enter] Confirmar  [Esc] Cancelar",
    };

    let footer = Paragraph::new(help_text).style(Style::default().fg(app.theme.fg_dim));
    frame.render_widget(footer, area);
}

// ---------------------------------------------------------------------------
// Modals
// ---------------------------------------------------------------------------

/// A rectangle of `percent_x` × `percent_y` centered in `area`.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

fn render_modal(frame: &mut Frame, app: &App, attempt: &Attempt) {
    let theme = app.theme;
    let provider = attempt.key().config();
    let area = centered_rect(70, 80, frame.area());

    let body = match attempt {
        Attempt::Unimed(a) => unimed_lines(app, a),
        Attempt::Clinipam(a) => clinipam_lines(theme, a),
        Attempt::Hapvida(a) => hapvida_lines(theme, a),
        Attempt::Outros(a) => outros_lines(theme, a),
    };

    let modal = Paragraph::new(body)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(rgb(provider.color)))
                .title(format!(" {} ", provider.name))
                .title_bottom(Line::from(" ✕ Esc ").right_aligned())
                .style(Style::default().bg(theme.surface).fg(theme.fg)),
        );

    frame.render_widget(Clear, area);
    frame.render_widget(modal, area);
}

fn title(theme: &Theme, text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD),
    ))
}

fn dim(theme: &Theme, text: impl Into<String>) -> Line<'static> {
    Line::from(Span::styled(text.into(), Style::default().fg(theme.fg_dim)))
}

fn input_line(theme: &Theme, value: &str, placeholder: &str) -> Line<'static> {
    if value.is_empty() {
        Line::from(vec![
            Span::styled(placeholder.to_string(), Style::default().fg(theme.fg_dim)),
            Span::styled("▏", Style::default().fg(theme.accent)),
        ])
    } else {
        Line::from(vec![
            Span::styled(
                value.to_string(),
                Style::default().fg(theme.fg).add_modifier(Modifier::BOLD),
            ),
            Span::styled("▏", Style::default().fg(theme.accent)),
        ])
    }
}

fn auto_close_line(theme: &Theme, timer: Option<&CountdownTimer>) -> Option<Line<'static>> {
    timer.map(|t| dim(theme, format!("Fechando em {}", t.countdown().display())))
}

fn unimed_lines(app: &App, attempt: &UnimedAttempt) -> Vec<Line<'static>> {
    let theme = app.theme;
    let mut lines = vec![
        Line::from(""),
        title(theme, "🏥 Unimed - Autenticação"),
        Line::from(""),
    ];

    match attempt.stage() {
        UnimedStage::Qr => {
            lines.push(Line::from("Escaneie o QR Code com seu aplicativo Unimed"));
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "┌────────────┐",
                Style::default().fg(theme.fg_dim),
            )));
            lines.push(Line::from(Span::styled(
                "│   📱 QR    │",
                Style::default().fg(theme.fg),
            )));
            lines.push(Line::from(Span::styled(
                "└────────────┘",
                Style::default().fg(theme.fg_dim),
            )));
            lines.push(dim(theme, attempt.qr_data()));
            lines.push(Line::from(""));
            match attempt.qr_request(&app.settings).url(&app.settings.qr_endpoint) {
                Ok(url) => lines.push(dim(theme, format!("Imagem: {url}"))),
                Err(e) => lines.push(Line::from(Span::styled(
                    format!("Endereço do QR inválido: {e}"),
                    Style::default().fg(theme.error),
                ))),
            }
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "[ Simular Autenticação ]",
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            )));
        }
        UnimedStage::Token => {
            lines.push(Line::from("Informe o arquivo com o token do aplicativo"));
            lines.push(dim(theme, "PNG, JPG ou WEBP"));
            lines.push(Line::from(""));
            lines.push(input_line(
                theme,
                attempt.path_input(),
                "/caminho/para/token.png",
            ));
            lines.push(Line::from(""));

            if let Some(token) = attempt.preview() {
                lines.push(Line::from(format!("🖼️  {}", token.file_name)));
                lines.push(dim(
                    theme,
                    format!("{} · {}", token.kind.mime(), token.display_size()),
                ));
            }

            if let Some(err) = attempt.error() {
                lines.push(Line::from(Span::styled(
                    format!("❌ {err}"),
                    Style::default().fg(theme.error),
                )));
            }

            match attempt.verdict() {
                Verdict::Accepted => {
                    lines.push(Line::from(Span::styled(
                        "✅ Token recebido",
                        Style::default()
                            .fg(theme.success)
                            .add_modifier(Modifier::BOLD),
                    )));
                }
                Verdict::Pending if attempt.preview().is_some() => {
                    lines.push(dim(theme, "Enter para confirmar o envio"));
                }
                _ => {}
            }

            if let Some(remaining) = app.next_collection_in() {
                lines.push(Line::from(Span::styled(
                    format!("⏱️ Próxima coleta em {}", format_clock(remaining)),
                    Style::default().fg(theme.secondary),
                )));
            }
            lines.extend(auto_close_line(theme, attempt.auto_close()));
        }
    }

    lines
}

fn clinipam_lines(theme: &Theme, attempt: &ClinipamAttempt) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(""),
        title(theme, "🧑‍⚕️ Clinipam"),
        dim(theme, "Gere sua senha de autenticação temporária"),
        Line::from(""),
    ];

    match attempt.code() {
        Some(code) => {
            let spaced: String = code
                .chars()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(" ");
            lines.push(Line::from(Span::styled(
                format!("  {spaced}  "),
                Style::default()
                    .fg(theme.secondary)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED),
            )));
        }
        None => {
            lines.push(Line::from("🔐"));
            lines.push(dim(theme, "Senha será gerada aqui"));
        }
    }
    lines.push(Line::from(""));

    match attempt.status() {
        CodeStatus::Valid { remaining } => {
            lines.push(Line::from(Span::styled(
                format!("⏱️ Expira em: {}", format_clock(remaining)),
                Style::default().fg(theme.fg),
            )));
        }
        CodeStatus::Expired => {
            lines.push(Line::from(Span::styled(
                format!("⏱️ {}", format_clock(0)),
                Style::default().fg(theme.fg_dim),
            )));
            lines.push(Line::from(Span::styled(
                "⚠️ Senha expirada",
                Style::default()
                    .fg(theme.warning)
                    .add_modifier(Modifier::BOLD),
            )));
        }
        CodeStatus::NotGenerated => {}
    }

    lines.push(Line::from(""));
    lines.push(dim(theme, "🔒 Autenticação segura e temporária"));
    lines.push(Line::from(""));
    let label = if attempt.code().is_some() {
        "[ 🔁 Gerar Nova Senha ]"
    } else {
        "[ ⚡ Gerar Senha ]"
    };
    lines.push(Line::from(Span::styled(
        label,
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD),
    )));

    lines
}

fn hapvida_lines(theme: &Theme, attempt: &HapvidaAttempt) -> Vec<Line<'static>> {
    let tab = |label: &'static str, active: bool| {
        if active {
            Span::styled(
                format!(" {label} "),
                Style::default()
                    .fg(theme.surface)
                    .bg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(format!(" {label} "), Style::default().fg(theme.fg_dim))
        }
    };

    let mut lines = vec![
        Line::from(""),
        title(theme, "🏥 HapVida"),
        dim(theme, "Escolha seu método de autenticação preferido"),
        Line::from(""),
        Line::from(vec![
            tab("📄 CPF", attempt.method() == AuthMethod::Cpf),
            Span::raw("  "),
            tab("👆 Biometria", attempt.method() == AuthMethod::Biometric),
        ]),
        Line::from(""),
    ];

    match attempt.method() {
        AuthMethod::Cpf => {
            lines.push(input_line(theme, &attempt.cpf.masked(), "000.000.000-00"));
        }
        AuthMethod::Biometric => {
            lines.push(Line::from("👆"));
            lines.push(Line::from(Span::styled(
                "TOQUE AQUI",
                Style::default().add_modifier(Modifier::BOLD),
            )));
            lines.push(dim(theme, "Biometria Digital (Espaço)"));
        }
    }
    lines.push(Line::from(""));

    match attempt.verdict() {
        Verdict::Accepted => lines.push(Line::from(Span::styled(
            "✅ Autenticação Confirmada",
            Style::default()
                .fg(theme.success)
                .add_modifier(Modifier::BOLD),
        ))),
        Verdict::InvalidInput => lines.push(Line::from(Span::styled(
            "⚠️ CPF deve ter 11 dígitos",
            Style::default().fg(theme.warning),
        ))),
        Verdict::Rejected | Verdict::Pending => {}
    }
    lines.extend(auto_close_line(theme, attempt.auto_close()));

    lines.push(Line::from(""));
    lines.push(dim(theme, "🔒 Autenticação segura e criptografada"));
    let label = match attempt.method() {
        AuthMethod::Cpf => "[ ✨ Autenticar com CPF ]",
        AuthMethod::Biometric => "[ ✨ Autenticar com Biometria ]",
    };
    let style = if attempt.can_submit() {
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.fg_dim)
    };
    lines.push(Line::from(Span::styled(label, style)));

    lines
}

fn outros_lines(theme: &Theme, attempt: &OutrosAttempt) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(""),
        title(theme, "🏥 Outros Convênios"),
        Line::from(""),
        input_line(theme, attempt.cpf.digits(), "Digite seu CPF"),
        Line::from(""),
    ];

    match attempt.verdict() {
        Verdict::Accepted => lines.push(Line::from(Span::styled(
            "✅ Autenticação Confirmada",
            Style::default()
                .fg(theme.success)
                .add_modifier(Modifier::BOLD),
        ))),
        Verdict::Rejected => lines.push(Line::from(Span::styled(
            "❌ CPF não encontrado",
            Style::default()
                .fg(theme.error)
                .add_modifier(Modifier::BOLD),
        ))),
        Verdict::InvalidInput => lines.push(Line::from(Span::styled(
            "⚠️ CPF deve ter 11 dígitos",
            Style::default().fg(theme.warning),
        ))),
        Verdict::Pending => {}
    }
    lines.extend(auto_close_line(theme, attempt.auto_close()));

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "[ Confirmar ]",
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD),
    )));

    lines
}

fn render_info(frame: &mut Frame, theme: &Theme) {
    let area = centered_rect(60, 60, frame.area());
    let text = vec![
        title(theme, "Autenticador de Convênio"),
        Line::from(""),
        Line::from("Selecione o convênio do paciente para iniciar o check-in."),
        Line::from(""),
        dim(theme, "Unimed    QR Code ou envio de token"),
        dim(theme, "Clinipam  senha temporária"),
        dim(theme, "HapVida   CPF ou biometria"),
        dim(theme, "Outros    CPF"),
        Line::from(""),
        dim(theme, format!("Tema: {}", theme.name)),
        Line::from(""),
        dim(theme, "[i/Esc] Fechar"),
    ];

    let info = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(theme.accent))
                .title(" Info ")
                .style(Style::default().bg(theme.surface).fg(theme.fg)),
        );

    frame.render_widget(Clear, area);
    frame.render_widget(info, area);
}
