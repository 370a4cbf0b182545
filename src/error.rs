//! Error type for motion state operations invoked by the application.
//!
//! Engine callbacks never fail; everything the application drives directly
//! returns `Result<T, MotionStateError>`.

use thiserror::Error;

use crate::core::mode::MotionMode;
use crate::utils::arena::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MotionStateError {
    #[error("operation requires a {expected} motion state, found {actual}")]
    ModeMismatch {
        expected: MotionMode,
        actual: MotionMode,
    },
    #[error("linked motion state has no scene node")]
    Unlinked,
    #[error("scene node {0} does not exist")]
    NodeMissing(NodeId),
    #[error("kinematic motion state follows its scene node; move it through the bound view")]
    FollowsNode,
    #[error("{states} motion states but {poses} transforms")]
    LengthMismatch { states: usize, poses: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_mismatch_names_both_modes() {
        let err = MotionStateError::ModeMismatch {
            expected: MotionMode::Kinematic,
            actual: MotionMode::Dynamic,
        };
        assert_eq!(
            err.to_string(),
            "operation requires a kinematic motion state, found dynamic"
        );
    }

    #[test]
    fn missing_node_prints_index_and_generation() {
        let err = MotionStateError::NodeMissing(NodeId::new(4, 2));
        assert_eq!(err.to_string(), "scene node 4v2 does not exist");
    }
}
