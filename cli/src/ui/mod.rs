use crate::app::{AppState, FormField, FIELD_ORDER};
use crate::session::{SessionController, SessionState};
use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
    Terminal,
};
use std::time::{Duration, Instant};
use tokio::sync::watch;
use tracing::warn;

const POLL_INTERVAL: Duration = Duration::from_millis(100);
const LOADING_MESSAGE: &str = "AI 正在为您创作，请稍候…";
const IDLE_MESSAGE: &str = "填写左侧产品信息，按 Enter 生成口播文案。";

pub fn run<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
    controller: &SessionController,
    state_rx: &mut watch::Receiver<SessionState>,
) -> Result<()> {
    loop {
        if state_rx.has_changed().unwrap_or(false) {
            let state = state_rx.borrow_and_update().clone();
            app.apply_session_state(state);
        }

        let now = Instant::now();
        terminal.draw(|frame| draw(frame, app, now))?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Esc => break,
                    KeyCode::Tab => app.focus_next_field(),
                    KeyCode::BackTab => app.focus_prev_field(),
                    KeyCode::Backspace => app.pop_char(),
                    KeyCode::Enter => {
                        controller.start_generation(app.details.clone());
                        app.push_status_line("Generation started".into());
                    }
                    KeyCode::Char('y') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        copy_script(app);
                    }
                    KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                        app.push_char(c);
                    }
                    _ => {}
                }
            }
        }
    }

    Ok(())
}

// Best-effort: the indicator is shown optimistically, a failed write is only
// logged.
fn copy_script(app: &mut AppState) {
    let Some(script) = app.script().map(str::to_string) else {
        return;
    };
    let result =
        arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(script));
    if let Err(err) = result {
        warn!("clipboard write failed: {err}");
    }
    app.mark_copied(Instant::now());
}

fn draw(frame: &mut ratatui::Frame<'_>, app: &AppState, now: Instant) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)].as_ref())
        .split(frame.area());

    draw_form(frame, app, columns[0]);
    draw_display(frame, app, now, columns[1]);
}

fn draw_form(frame: &mut ratatui::Frame<'_>, app: &AppState, area: ratatui::layout::Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(2),
            ]
            .as_ref(),
        )
        .split(area);

    for (index, field) in FIELD_ORDER.iter().enumerate() {
        frame.render_widget(field_widget(app, *field), rows[index]);
    }

    let hints = Paragraph::new("Tab 切换字段 · Enter 生成 · Ctrl+Y 复制 · Esc 退出")
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().title("操作").borders(Borders::ALL));
    frame.render_widget(hints, rows[4]);
}

fn field_widget<'a>(app: &'a AppState, field: FormField) -> Paragraph<'a> {
    let value = app.field_value(field);
    let focused = app.focused == field;

    let block = Block::default().title(field.label()).borders(Borders::ALL).border_style(
        if focused {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        },
    );

    if value.is_empty() && !focused {
        Paragraph::new(field.placeholder())
            .style(Style::default().fg(Color::DarkGray))
            .block(block)
    } else {
        Paragraph::new(value).block(block)
    }
}

fn draw_display(
    frame: &mut ratatui::Frame<'_>,
    app: &AppState,
    now: Instant,
    area: ratatui::layout::Rect,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(4)].as_ref())
        .split(area);

    let display = match &app.session {
        SessionState::Idle => Paragraph::new(IDLE_MESSAGE)
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().title("口播文案").borders(Borders::ALL)),
        SessionState::Loading => Paragraph::new(LOADING_MESSAGE)
            .style(Style::default().fg(Color::Yellow))
            .block(Block::default().title("口播文案").borders(Borders::ALL)),
        SessionState::Failed { message } => Paragraph::new(message.as_str())
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: false })
            .block(Block::default().title("错误").borders(Borders::ALL)),
        SessionState::Succeeded { script } => {
            let title = if app.copied_indicator_active(now) {
                "口播文案 — 已复制 ✓"
            } else {
                "口播文案 — Ctrl+Y 复制"
            };
            Paragraph::new(script.as_str())
                .wrap(Wrap { trim: false })
                .block(Block::default().title(title).borders(Borders::ALL))
        }
    };
    frame.render_widget(display, rows[0]);

    let status_text = if app.status_lines.is_empty() {
        "Ready.".to_string()
    } else {
        app.status_lines.join("\n")
    };
    let status = Paragraph::new(status_text)
        .block(Block::default().title("Status").borders(Borders::ALL));
    frame.render_widget(status, rows[1]);
}
