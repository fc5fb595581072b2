//! Agent behaviours and turn processing

pub mod controller;
pub mod enemy;
pub mod forager;
pub mod movement;
pub mod queen;
pub mod scout;
pub mod soldier;
pub mod tick;

pub use controller::SimulationController;
pub use tick::run_turn;
