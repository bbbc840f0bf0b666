#[cfg(test)]
#[path = "transcript_test.rs"]
mod tests;

use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;

use crate::domain::models::wrap_text;
use crate::domain::models::Message;
use crate::domain::models::Role;

const INDENT: &str = "  ";

/// Renders the chat log into terminal lines for a given width.
pub struct Transcript {}

impl Transcript {
    pub fn lines(messages: &[Message], line_width: usize) -> Vec<Line<'static>> {
        let content_width = line_width.saturating_sub(INDENT.len()).max(10);
        let mut lines: Vec<Line<'static>> = vec![];

        for message in messages {
            lines.push(Transcript::header(message));

            let mut content_style = Style::default();
            if message.role == Role::Assistant && message.content.starts_with("Error: ") {
                content_style = content_style.fg(Color::Red);
            }

            for line in message.as_string_lines(content_width) {
                lines.push(Line::from(Span::styled(
                    format!("{INDENT}{line}"),
                    content_style,
                )));
            }

            let sources = message.sources();
            if !sources.is_empty() {
                lines.push(Line::from(Span::styled(
                    format!("{INDENT}Sources ({})", sources.len()),
                    Style::default().fg(Color::Yellow),
                )));

                for source in sources {
                    lines.push(Line::from(Span::styled(
                        format!("{INDENT}{INDENT}From: {}", source.filename),
                        Style::default().add_modifier(Modifier::BOLD),
                    )));

                    let excerpt = format!("{}...", source.content.trim_end());
                    for line in wrap_text(&excerpt, content_width.saturating_sub(INDENT.len())) {
                        lines.push(Line::from(Span::styled(
                            format!("{INDENT}{INDENT}{line}"),
                            Style::default().fg(Color::DarkGray),
                        )));
                    }
                }
            }

            lines.push(Line::from(""));
        }

        return lines;
    }

    fn header(message: &Message) -> Line<'static> {
        let colour = match message.role {
            Role::User => Color::Cyan,
            Role::Assistant => Color::Green,
        };

        let mut spans = vec![Span::styled(
            message.role.display_name(),
            Style::default().fg(colour).add_modifier(Modifier::BOLD),
        )];

        let time = message.local_time();
        if !time.is_empty() {
            spans.push(Span::styled(
                format!("  {time}"),
                Style::default().fg(Color::DarkGray),
            ));
        }

        return Line::from(spans);
    }
}
