pub mod candidate;
pub mod color;
pub mod hand;
pub mod number;
pub mod player;
pub mod pool;
pub mod wire;
