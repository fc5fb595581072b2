//! Colony orchestration
//!
//! The colony owns the grid and every agent, assigns ids, queues deaths
//! for end-of-turn reaping, and seeds starting populations.

pub mod events;
pub mod seeding;
pub mod state;
pub mod summary;

pub use events::{ColonyEvent, PopulationCounts, TurnReport};
pub use seeding::Scenario;
pub use state::{Colony, QUEEN_DEATH_MESSAGE};
pub use summary::{render_map, ColonySummary};
