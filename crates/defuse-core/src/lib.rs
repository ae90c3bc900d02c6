pub mod belief;
pub mod deduction;
pub mod game;
pub mod model;
