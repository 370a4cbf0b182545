//! Utility helpers: node storage and logging.

pub mod arena;
pub mod logging;

pub use arena::{NodeArena, NodeId};
