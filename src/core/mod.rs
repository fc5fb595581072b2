pub mod config;
pub mod error;
pub mod status;
pub mod types;

pub use config::ColonyConfig;
pub use error::{ColonyError, Result};
pub use status::{StatusMessage, StatusSink, TracingStatus};
pub use types::{AgentId, AgentKind, Coord, Turn};
