pub mod actions;
pub mod serialization;
pub mod setup;
pub mod state;
