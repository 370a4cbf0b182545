//! Core types: transforms, modes, and the motion state adapters.

pub mod linked;
pub mod mode;
pub mod motion_state;
pub mod types;

pub use linked::{LinkedMotionState, NoNodes, NodeStore, SceneNode, TransformNode};
pub use mode::{Binding, MotionMode};
pub use motion_state::{MotionState, MotionStateCallbacks, MotionStateRef};
pub use types::Transform;
