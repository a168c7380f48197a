//! Everything between a front end and the rules: move input and promotion,
//! the move/undo pipeline, clocks, PGN export, coach tips and computer turns.

pub mod ai;
pub mod clock;
pub mod coach;
pub mod config;
pub mod display;
pub mod error;
pub mod history;
pub mod selection;
mod session;

pub use ai::{AiCoordinator, AiRequest, AiTicket};
pub use clock::{format_clock, Clock};
pub use coach::{advise, Tip};
pub use config::{AiConfig, SessionConfig};
pub use display::{eval_fraction, DisplayState};
pub use error::SessionError;
pub use history::{History, HistoryEntry};
pub use selection::{ClickAction, Selection};
pub use session::{DrawReason, GameSession, Outcome};
pub use uci_engine::Tier;
