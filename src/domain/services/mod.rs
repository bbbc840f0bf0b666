pub mod actions;
mod app_state;
mod busy_gate;
mod chat_engine;
mod controller;
mod document_registry;
pub mod events;
mod scroll;
mod session_manager;
mod session_state;
mod transcript;
mod upload_coordinator;

pub use app_state::*;
pub use busy_gate::*;
pub use chat_engine::*;
pub use controller::*;
pub use document_registry::*;
pub use scroll::*;
pub use session_manager::*;
pub use session_state::*;
pub use transcript::*;
pub use upload_coordinator::*;
