#[cfg(test)]
#[path = "message_test.rs"]
mod tests;

use chrono::DateTime;
use chrono::Local;
use chrono::SecondsFormat;
use chrono::Utc;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::Role;

/// Excerpt of an uploaded document backing an answer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub filename: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_id: Option<String>,
}

/// A single transcript entry. The serialized shape is what the chat endpoint
/// expects inside `chat_history`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<Source>>,
}

fn now_iso() -> String {
    return Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
}

impl Message {
    pub fn new(role: Role, content: &str) -> Message {
        return Message {
            role,
            content: content.to_string(),
            timestamp: now_iso(),
            sources: None,
        };
    }

    pub fn new_with_sources(content: &str, sources: Vec<Source>) -> Message {
        return Message {
            role: Role::Assistant,
            content: content.to_string(),
            timestamp: now_iso(),
            sources: Some(sources),
        };
    }

    /// Failed exchanges are recorded as regular assistant entries so the
    /// conversation stays usable.
    pub fn new_error(detail: &str) -> Message {
        return Message::new(Role::Assistant, &format!("Error: {detail}"));
    }

    pub fn sources(&self) -> &[Source] {
        if let Some(sources) = &self.sources {
            return sources;
        }

        return &[];
    }

    /// Local wall clock time of the message, or an empty string when the
    /// timestamp can't be parsed.
    pub fn local_time(&self) -> String {
        if let Ok(time) = DateTime::parse_from_rfc3339(&self.timestamp) {
            return time.with_timezone(&Local).format("%H:%M:%S").to_string();
        }

        return "".to_string();
    }

    pub fn as_string_lines(&self, line_max_width: usize) -> Vec<String> {
        return wrap_text(&self.content.replace('\t', "  "), line_max_width);
    }
}

pub fn wrap_text(text: &str, line_max_width: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();

    for full_line in text.split('\n') {
        if full_line.trim().is_empty() {
            lines.push(" ".to_string());
            continue;
        }

        let mut char_count = 0;
        let mut current_lines: Vec<&str> = vec![];

        for word in full_line.split(' ') {
            let word_len = word.chars().count();
            if !current_lines.is_empty() && char_count + word_len > line_max_width {
                lines.push(current_lines.join(" ").trim_end().to_string());
                current_lines = vec![word];
                char_count = word_len + 1;
            } else {
                current_lines.push(word);
                char_count += word_len + 1;
            }
        }
        if !current_lines.is_empty() {
            lines.push(current_lines.join(" ").trim_end().to_string());
        }
    }

    return lines;
}
