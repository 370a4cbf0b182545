use std::sync::Arc;

use glam::Mat4;
use log::{debug, warn};
use parking_lot::RwLock;

use super::mode::{Binding, MotionMode};
use super::types::Transform;
use crate::config::{KinematicWritePolicy, MotionStateConfig};
use crate::error::MotionStateError;
use crate::utils::arena::NodeId;

/// Callback contract the physics engine drives once per simulation step.
pub trait MotionStateCallbacks {
    /// Pose the engine should use for this body.
    fn world_transform(&self) -> Transform;

    /// Pose the engine computed for this body.
    fn set_world_transform(&mut self, transform: &Transform);
}

/// Shared handle, usually held by the rigid body wrapper and the renderer.
pub type MotionStateRef = Arc<RwLock<MotionState>>;

/// Per-body transform relay between the physics engine and the application.
///
/// The mode decides who may write the cached pose: the engine for dynamic
/// states, the application for kinematic ones. It cannot change after
/// construction; a body that switches modes gets a new motion state.
#[derive(Debug, Clone)]
pub struct MotionState {
    mode: MotionMode,
    binding: Binding,
    position: Transform,
    user_node: Option<NodeId>,
    config: MotionStateConfig,
    rejected_writes: u64,
    unbound_writes: u64,
}

impl MotionState {
    pub fn new(initial: Transform, mode: MotionMode, binding: Binding) -> Self {
        Self::with_config(initial, mode, binding, MotionStateConfig::default())
    }

    pub fn with_config(
        initial: Transform,
        mode: MotionMode,
        binding: Binding,
        config: MotionStateConfig,
    ) -> Self {
        debug!("creating {mode} motion state ({binding:?})");
        Self {
            mode,
            binding,
            position: initial,
            user_node: None,
            config,
            rejected_writes: 0,
            unbound_writes: 0,
        }
    }

    /// Body whose pose the physics engine controls.
    pub fn dynamic(initial: Transform) -> Self {
        Self::new(initial, MotionMode::Dynamic, Binding::Cached)
    }

    /// Body whose pose the application controls through [`MotionState::set_kinematic_position`].
    pub fn kinematic(initial: Transform) -> Self {
        Self::new(initial, MotionMode::Kinematic, Binding::Cached)
    }

    pub fn into_shared(self) -> MotionStateRef {
        Arc::new(RwLock::new(self))
    }

    pub fn mode(&self) -> MotionMode {
        self.mode
    }

    pub fn is_dynamic(&self) -> bool {
        self.mode.is_dynamic()
    }

    pub fn is_kinematic(&self) -> bool {
        self.mode.is_kinematic()
    }

    pub fn binding(&self) -> Binding {
        self.binding
    }

    pub fn is_linked(&self) -> bool {
        self.binding == Binding::Linked
    }

    pub fn config(&self) -> &MotionStateConfig {
        &self.config
    }

    pub fn set_user_node(&mut self, node: NodeId) {
        debug!("motion state linked to node {node}");
        self.user_node = Some(node);
    }

    pub fn user_node(&self) -> Option<NodeId> {
        self.user_node
    }

    pub fn clear_user_node(&mut self) {
        self.user_node = None;
    }

    /// Last pose written by the authoritative side.
    pub fn cached_transform(&self) -> Transform {
        self.position
    }

    /// Moves a kinematic body. Dynamic states refuse and keep their pose.
    ///
    /// Linked kinematic states take their pose from the scene node, so they refuse
    /// as well; move them with [`LinkedMotionState::set_kinematic_position`].
    ///
    /// [`LinkedMotionState::set_kinematic_position`]: super::linked::LinkedMotionState::set_kinematic_position
    pub fn set_kinematic_position(&mut self, transform: &Transform) -> Result<(), MotionStateError> {
        if !self.is_kinematic() {
            return Err(MotionStateError::ModeMismatch {
                expected: MotionMode::Kinematic,
                actual: self.mode,
            });
        }
        if self.is_linked() {
            return Err(MotionStateError::FollowsNode);
        }
        self.position = self.prepare(*transform);
        Ok(())
    }

    /// Cached pose as a matrix for the renderer. A linked kinematic state only
    /// refreshes its cache through `pull`; read it through the bound view instead.
    pub fn gl_world_transform(&self) -> Mat4 {
        self.position.to_matrix()
    }

    /// Cached pose as a column-major float array.
    pub fn opengl_matrix(&self) -> [f32; 16] {
        self.position.to_opengl_matrix()
    }

    /// Number of engine writes a kinematic state has dropped.
    pub fn rejected_writes(&self) -> u64 {
        self.rejected_writes
    }

    /// Applies an engine write according to the mode. Returns whether the cache changed.
    pub(crate) fn accept_engine_write(&mut self, transform: &Transform) -> bool {
        match self.mode {
            MotionMode::Dynamic => {
                self.position = *transform;
                true
            }
            MotionMode::Kinematic => {
                self.rejected_writes += 1;
                if self.config.kinematic_writes == KinematicWritePolicy::Warn {
                    warn!(
                        "physics engine wrote to kinematic motion state (rejected {} so far)",
                        self.rejected_writes
                    );
                }
                false
            }
        }
    }

    /// Engine writes a linked state received without its node store.
    pub fn unbound_writes(&self) -> u64 {
        self.unbound_writes
    }

    pub(crate) fn set_cached(&mut self, transform: Transform) {
        self.position = transform;
    }

    pub(crate) fn prepare(&self, transform: Transform) -> Transform {
        if self.config.normalize_rotations {
            transform.with_normalized_rotation()
        } else {
            transform
        }
    }
}

/// Direct callbacks only see the cache. Linked states should be driven through
/// [`MotionState::bind`]; reaching them here is logged and counted.
impl MotionStateCallbacks for MotionState {
    fn world_transform(&self) -> Transform {
        if self.is_linked() && self.is_kinematic() {
            warn!("linked kinematic motion state read without its node store; reporting cached pose");
        }
        self.position
    }

    fn set_world_transform(&mut self, transform: &Transform) {
        if self.accept_engine_write(transform) && self.is_linked() {
            self.unbound_writes += 1;
            warn!("linked motion state written without its node store; scene node not updated");
        }
    }
}
