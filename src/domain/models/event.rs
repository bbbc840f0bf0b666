use tui_textarea::Input;

use super::ConfirmAnswer;
use super::Notice;

#[derive(Debug)]
pub enum Event {
    KeyboardCharInput(Input),
    KeyboardCTRLC(),
    KeyboardCTRLO(),
    /// A key pressed while the new session prompt is open.
    KeyboardConfirm(ConfirmAnswer),
    KeyboardEnter(),
    KeyboardPaste(String),
    /// A background operation finished and state may have changed.
    OperationSettled(),
    UserNotice(Notice),
    UIScrollDown(),
    UIScrollUp(),
    UIScrollPageDown(),
    UIScrollPageUp(),
    UITick(),
}
