pub mod agent;
pub mod forager;

pub use agent::{Agent, DeathCause, Role};
pub use forager::{ForagerMemory, ForagerMode, VisitedGraph};
