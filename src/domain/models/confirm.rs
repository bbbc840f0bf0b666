/// Yes/no decision from the user before a destructive action.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

/// An answer the UI already collected, for example from a modal prompt.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ConfirmAnswer {
    Yes,
    No,
}

impl Confirm for ConfirmAnswer {
    fn confirm(&self, prompt: &str) -> bool {
        tracing::debug!(prompt, answer = ?self, "Confirmation");
        return *self == ConfirmAnswer::Yes;
    }
}
