use std::io;

use anyhow::Result;
use crossterm::cursor;
use crossterm::event::DisableBracketedPaste;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableBracketedPaste;
use crossterm::event::EnableMouseCapture;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::backend::CrosstermBackend;
use ratatui::prelude::*;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Clear;
use ratatui::widgets::Padding;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Wrap;
use ratatui::Terminal;
use tokio::sync::mpsc;

use crate::domain::models::wrap_text;
use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::Loading;
use crate::domain::models::Notice;
use crate::domain::models::TextArea;
use crate::domain::services::actions::help_text;
use crate::domain::services::events::EventsService;
use crate::domain::services::AppState;
use crate::domain::services::Controller;
use crate::domain::services::SessionState;
use crate::domain::services::Submit;
use crate::domain::services::Transcript;
use crate::domain::services::NEW_SESSION_PROMPT;

fn panel_lines(app_state: &AppState, state: &SessionState, width: usize) -> Vec<String> {
    let mut lines = vec![];

    if app_state.show_documents {
        lines.push(format!("Documents ({})", state.documents.len()));
        if state.documents.is_empty() {
            lines.push("No documents uploaded yet. Use /upload <path> to add a PDF.".to_string());
        }
        for document in state.documents.list() {
            lines.push(format!(
                "- {} ({} chunks)",
                document.filename, document.chunk_count
            ));
        }
    }

    if app_state.show_help {
        if !lines.is_empty() {
            lines.push("".to_string());
        }
        lines.extend(help_text().split('\n').map(|line| return line.to_string()));
    }

    return lines
        .iter()
        .flat_map(|line| return wrap_text(line, width))
        .collect();
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);

    return Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    );
}

fn render<B: Backend>(
    frame: &mut Frame<B>,
    app_state: &mut AppState,
    state: &SessionState,
    textarea: &tui_textarea::TextArea,
    loading: &Loading,
    is_busy: bool,
) {
    let area = frame.size();
    let inner_width = usize::from(area.width.saturating_sub(4));

    let notice_lines = match &app_state.notice {
        Some(notice) => wrap_text(notice.text(), inner_width),
        None => vec![],
    };
    let panel_lines = panel_lines(app_state, state, inner_width);

    let mut constraints = vec![];
    if !notice_lines.is_empty() {
        constraints.push(Constraint::Length(notice_lines.len() as u16 + 2));
    }
    if !panel_lines.is_empty() {
        constraints.push(Constraint::Max(panel_lines.len() as u16 + 2));
    }
    constraints.push(Constraint::Min(1));
    constraints.push(Constraint::Max(4));
    constraints.push(Constraint::Length(1));

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);
    let mut idx = 0;

    if let Some(notice) = &app_state.notice {
        let color = match notice {
            Notice::Fatal(_) => Color::Red,
            Notice::Alert(_) => Color::Yellow,
        };
        frame.render_widget(
            Paragraph::new(notice_lines.join("\n"))
                .style(Style::default().fg(color))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded)
                        .padding(Padding::new(1, 1, 0, 0)),
                ),
            layout[idx],
        );
        idx += 1;
    }

    if !panel_lines.is_empty() {
        frame.render_widget(
            Paragraph::new(panel_lines.join("\n")).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .padding(Padding::new(1, 1, 0, 0)),
            ),
            layout[idx],
        );
        idx += 1;
    }

    let transcript_rect = layout[idx];
    let lines = Transcript::lines(&state.messages, usize::from(transcript_rect.width));
    app_state.sync(state, lines.len(), transcript_rect.height);
    frame.render_widget(
        Paragraph::new(lines).scroll((app_state.scroll.position, 0)),
        transcript_rect,
    );

    if is_busy {
        loading.render(frame, layout[idx + 1]);
    } else {
        frame.render_widget(textarea.widget(), layout[idx + 1]);
    }

    let footer = format!(
        " Session: {} | Questions asked: {} | Documents: {} | /upload <path> to add a PDF",
        state.short_session_id(),
        state.questions_asked(),
        state.documents.len()
    );
    frame.render_widget(
        Paragraph::new(footer).style(Style::default().add_modifier(Modifier::DIM)),
        layout[idx + 2],
    );

    if app_state.confirming_new_session {
        let modal = centered_rect(60, 7, area);
        frame.render_widget(Clear, modal);
        frame.render_widget(
            Paragraph::new(format!("{NEW_SESSION_PROMPT}\n\n[y/N]"))
                .wrap(Wrap { trim: true })
                .alignment(Alignment::Center)
                .block(
                    Block::default()
                        .title("New session")
                        .borders(Borders::ALL)
                        .border_type(BorderType::Double)
                        .padding(Padding::new(1, 1, 0, 0)),
                ),
            modal,
        );
    }
}

async fn start_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state: &mut AppState,
    controller: Controller,
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let mut textarea = TextArea::default();
    let mut loading = Loading::default();
    let mut events_service = EventsService::new(rx);
    let mut state = controller.handle().snapshot().await;

    loop {
        let is_busy = controller.handle().is_busy();

        terminal.draw(|frame| {
            render(frame, app_state, &state, &textarea, &loading, is_busy);
        })?;

        events_service.set_confirming(app_state.confirming_new_session);
        match events_service.next().await? {
            Event::KeyboardCTRLC() => {
                break;
            }
            Event::KeyboardCTRLO() => {
                app_state.toggle_documents();
            }
            Event::KeyboardConfirm(answer) => {
                app_state.answer_new_session(answer, &tx)?;
            }
            Event::KeyboardCharInput(input) => {
                if !is_busy {
                    textarea.input(input);
                }
            }
            Event::KeyboardPaste(text) => {
                if !is_busy {
                    textarea.insert_str(text.replace('\r', "\n"));
                }
            }
            Event::KeyboardEnter() => {
                if is_busy {
                    continue;
                }

                let input_str = textarea.lines().join("\n");
                let submitted = app_state.submit(&input_str, &controller, &tx).await?;
                state = controller.handle().snapshot().await;
                match submitted {
                    Submit::Quit => {
                        break;
                    }
                    Submit::ClearInput => {
                        textarea = TextArea::default();
                    }
                    Submit::KeepInput => {}
                }
            }
            Event::OperationSettled() => {
                state = controller.handle().snapshot().await;
            }
            Event::UserNotice(notice) => {
                app_state.set_notice(notice);
            }
            Event::UIScrollDown() => {
                app_state.scroll.down();
            }
            Event::UIScrollUp() => {
                app_state.scroll.up();
            }
            Event::UIScrollPageDown() => {
                app_state.scroll.down_page();
            }
            Event::UIScrollPageUp() => {
                app_state.scroll.up_page();
            }
            Event::UITick() => {
                loading.tick();
            }
        }
    }

    return Ok(());
}

pub fn destruct_terminal_for_panic() {
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    );
    let _ = crossterm::execute!(io::stdout(), cursor::Show);
}

pub async fn start(
    controller: Controller,
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let mut app_state = AppState::default();
    if let Some(notice) = controller.health_check().await {
        app_state.set_notice(notice);
    }
    tx.send(Action::CreateSession())?;

    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    enable_raw_mode()?;
    crossterm::execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let term_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(term_backend)?;

    start_loop(&mut terminal, &mut app_state, controller, tx, rx).await?;

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    return Ok(());
}
