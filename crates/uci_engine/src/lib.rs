//! Engine plumbing: the tier registry, a UCI server over the internal tiers,
//! and a client for external UCI engine processes.

pub mod client;
pub mod error;
pub mod server;
pub mod tiers;

pub use client::{ExternalEngine, DEFAULT_MOVETIME, DEFAULT_REPLY_TIMEOUT};
pub use error::ExternalEngineError;
pub use server::UciServer;
pub use tiers::{Tier, TierEngine};
