//! Configuration for the moderator engine.

pub mod game;

pub use game::GameConfig;
