//! Motion Relay – motion state adapters for rigid bodies.
//!
//! A motion state sits between a physics engine's per-step callbacks and the
//! application's scene graph. Dynamic states take their pose from the
//! simulation; kinematic states take it from the application and only report
//! it to the simulation. Linked states relay the pose straight to a scene node
//! addressed by a [`NodeId`].

pub mod config;
pub mod core;
pub mod error;
pub mod sync;
pub mod utils;

pub use glam::{Affine3A, Mat4, Quat, Vec3};

pub use config::{KinematicWritePolicy, MotionStateConfig};
pub use crate::core::{
    linked::{LinkedMotionState, NoNodes, NodeStore, SceneNode, TransformNode},
    mode::{Binding, MotionMode},
    motion_state::{MotionState, MotionStateCallbacks, MotionStateRef},
    types::Transform,
};
pub use error::MotionStateError;
pub use sync::{collect_kinematic_transforms, collect_render_matrices, push_dynamic_transforms};
pub use utils::arena::{NodeArena, NodeId};
