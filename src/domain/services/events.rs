#[cfg(test)]
#[path = "events_test.rs"]
mod tests;

use anyhow::Result;
use crossterm::event::Event as CrosstermEvent;
use crossterm::event::EventStream;
use crossterm::event::KeyEventKind;
use crossterm::event::MouseEventKind;
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::time;
use tui_textarea::Input;
use tui_textarea::Key;

use crate::domain::models::ConfirmAnswer;
use crate::domain::models::Event;

fn is_ctrl_c(input: &Input) -> bool {
    return input.ctrl && matches!(input.key, Key::Char('c'));
}

/// Every key answers an open prompt. Only `y` confirms.
fn map_confirm_key(input: Input) -> Event {
    if is_ctrl_c(&input) {
        return Event::KeyboardCTRLC();
    }

    if let Key::Char('y' | 'Y') = input.key {
        return Event::KeyboardConfirm(ConfirmAnswer::Yes);
    }

    return Event::KeyboardConfirm(ConfirmAnswer::No);
}

fn map_key(input: Input) -> Event {
    if is_ctrl_c(&input) {
        return Event::KeyboardCTRLC();
    }

    match input {
        Input { key: Key::Up, .. } => return Event::UIScrollUp(),
        Input { key: Key::Down, .. } => return Event::UIScrollDown(),
        Input {
            key: Key::PageUp, ..
        }
        | Input {
            key: Key::Char('u'),
            ctrl: true,
            ..
        } => return Event::UIScrollPageUp(),
        Input {
            key: Key::PageDown, ..
        }
        | Input {
            key: Key::Char('d'),
            ctrl: true,
            ..
        } => return Event::UIScrollPageDown(),
        Input {
            key: Key::Char('o'),
            ctrl: true,
            ..
        } => return Event::KeyboardCTRLO(),
        Input {
            key: Key::Enter, ..
        } => return Event::KeyboardEnter(),
        input => return Event::KeyboardCharInput(input),
    }
}

/// Translates terminal input into app events. Pastes and mouse scrolling are
/// dropped while a prompt is open.
pub fn map_crossterm(event: CrosstermEvent, confirming: bool) -> Option<Event> {
    match event {
        CrosstermEvent::Key(keyevent) => {
            if keyevent.kind == KeyEventKind::Release {
                return None;
            }

            if confirming {
                return Some(map_confirm_key(keyevent.into()));
            }

            return Some(map_key(keyevent.into()));
        }
        CrosstermEvent::Paste(text) if !confirming => {
            return Some(Event::KeyboardPaste(text));
        }
        CrosstermEvent::Mouse(mouseevent) if !confirming => match mouseevent.kind {
            MouseEventKind::ScrollUp => return Some(Event::UIScrollUp()),
            MouseEventKind::ScrollDown => return Some(Event::UIScrollDown()),
            _ => return None,
        },
        _ => return None,
    }
}

/// Merges terminal input, events from the action worker and a redraw tick
/// that drives the typing indicator.
pub struct EventsService {
    crossterm_events: EventStream,
    events: mpsc::UnboundedReceiver<Event>,
    confirming: bool,
}

impl EventsService {
    pub fn new(events: mpsc::UnboundedReceiver<Event>) -> EventsService {
        return EventsService {
            crossterm_events: EventStream::new(),
            events,
            confirming: false,
        };
    }

    pub fn set_confirming(&mut self, confirming: bool) {
        self.confirming = confirming;
    }

    pub async fn next(&mut self) -> Result<Event> {
        loop {
            let evt = tokio::select! {
                event = self.events.recv() => event,
                event = self.crossterm_events.next() => match event {
                    Some(Ok(input)) => map_crossterm(input, self.confirming),
                    Some(Err(err)) => {
                        tracing::warn!(error = ?err, "Failed to read terminal event");
                        None
                    }
                    None => None,
                },
                _ = time::sleep(time::Duration::from_millis(500)) => Some(Event::UITick())
            };

            if let Some(event) = evt {
                return Ok(event);
            }
        }
    }
}
