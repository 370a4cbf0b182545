//! Configuration for motion states: crate-wide defaults and the per-state config record.

use serde::{Deserialize, Serialize};

/// Tolerance used when comparing transforms that went through a matrix conversion.
pub const DEFAULT_TRANSFORM_EPSILON: f32 = 1e-5;

/// How kinematic states treat write attempts coming from the physics engine by default.
pub const DEFAULT_KINEMATIC_WRITE_POLICY: KinematicWritePolicy = KinematicWritePolicy::Ignore;

/// Reaction of a kinematic motion state when the physics engine tries to overwrite its pose.
///
/// The write is dropped in every case; the policy only decides whether it is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum KinematicWritePolicy {
    #[default]
    Ignore,
    Warn,
}

/// Per-state settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionStateConfig {
    pub kinematic_writes: KinematicWritePolicy,
    /// Renormalise rotations handed in by the application before caching them.
    pub normalize_rotations: bool,
}

impl Default for MotionStateConfig {
    fn default() -> Self {
        Self {
            kinematic_writes: DEFAULT_KINEMATIC_WRITE_POLICY,
            normalize_rotations: false,
        }
    }
}

impl MotionStateConfig {
    pub fn with_kinematic_writes(mut self, policy: KinematicWritePolicy) -> Self {
        self.kinematic_writes = policy;
        self
    }

    pub fn with_normalized_rotations(mut self, enabled: bool) -> Self {
        self.normalize_rotations = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: MotionStateConfig =
            serde_json::from_str(r#"{ "kinematic_writes": "Warn" }"#).unwrap();

        assert_eq!(config.kinematic_writes, KinematicWritePolicy::Warn);
        assert!(!config.normalize_rotations);
    }

    #[test]
    fn default_policy_is_silent() {
        assert_eq!(
            MotionStateConfig::default().kinematic_writes,
            KinematicWritePolicy::Ignore
        );
    }
}
