/// Signals surfaced to the user outside of the transcript.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    /// The client cannot continue until it is restarted.
    Fatal(String),
    Alert(String),
}

impl Notice {
    pub fn text(&self) -> &str {
        match self {
            Notice::Fatal(text) => return text,
            Notice::Alert(text) => return text,
        }
    }

    pub fn is_fatal(&self) -> bool {
        return matches!(self, Notice::Fatal(_));
    }
}
