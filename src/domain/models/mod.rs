mod action;
mod backend;
mod confirm;
mod document;
mod event;
mod loading;
mod message;
mod notice;
mod role;
mod slash_commands;
mod textarea;

pub use action::*;
pub use backend::*;
pub use confirm::*;
pub use document::*;
pub use event::*;
pub use loading::*;
pub use message::*;
pub use notice::*;
pub use role::*;
pub use slash_commands::*;
pub use textarea::*;
