use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side owns a body's transform. Fixed when the motion state is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MotionMode {
    /// Simulated; the physics engine writes the pose every step.
    Dynamic,
    /// User controlled; the physics engine only reads the pose.
    Kinematic,
}

impl MotionMode {
    pub fn is_dynamic(self) -> bool {
        matches!(self, MotionMode::Dynamic)
    }

    pub fn is_kinematic(self) -> bool {
        matches!(self, MotionMode::Kinematic)
    }
}

impl fmt::Display for MotionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotionMode::Dynamic => f.write_str("dynamic"),
            MotionMode::Kinematic => f.write_str("kinematic"),
        }
    }
}

/// Where the pose lives between steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Binding {
    /// The motion state holds the only copy.
    Cached,
    /// The pose is relayed to and from an external scene node.
    Linked,
}
