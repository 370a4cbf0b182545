//! Motion states that relay the pose straight to a scene node.
//!
//! A linked state keeps a [`NodeId`] instead of a raw pointer to the node. The
//! node is resolved through a [`NodeStore`] only for the duration of a
//! [`LinkedMotionState`] view, so the motion state never owns or outlives it.

use glam::{Mat4, Quat, Vec3};
use log::warn;
use serde::{Deserialize, Serialize};

use super::mode::{Binding, MotionMode};
use super::motion_state::{MotionState, MotionStateCallbacks};
use super::types::Transform;
use crate::error::MotionStateError;
use crate::utils::arena::{NodeArena, NodeId};

/// Anything that exposes a global translation and rotation, e.g. a scene graph node.
pub trait TransformNode {
    fn global_translation(&self) -> Vec3;
    fn global_rotation(&self) -> Quat;
    fn set_global_translation(&mut self, translation: Vec3);
    fn set_global_rotation(&mut self, rotation: Quat);
}

/// Lookup of scene nodes by identifier.
pub trait NodeStore {
    type Node: TransformNode;

    fn node(&self, id: NodeId) -> Option<&Self::Node>;
    fn node_mut(&mut self, id: NodeId) -> Option<&mut Self::Node>;
}

impl<N: TransformNode> NodeStore for NodeArena<N> {
    type Node = N;

    fn node(&self, id: NodeId) -> Option<&N> {
        self.get(id)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut N> {
        self.get_mut(id)
    }
}

/// Store for hosts whose motion states are all cached; it resolves no node.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoNodes;

impl NodeStore for NoNodes {
    type Node = SceneNode;

    fn node(&self, _id: NodeId) -> Option<&SceneNode> {
        None
    }

    fn node_mut(&mut self, _id: NodeId) -> Option<&mut SceneNode> {
        None
    }
}

/// Minimal transform holder for hosts without a scene graph of their own.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneNode {
    pub translation: Vec3,
    pub rotation: Quat,
}

impl Default for SceneNode {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl SceneNode {
    pub fn from_transform(transform: &Transform) -> Self {
        Self {
            translation: transform.origin,
            rotation: transform.rotation,
        }
    }
}

impl TransformNode for SceneNode {
    fn global_translation(&self) -> Vec3 {
        self.translation
    }

    fn global_rotation(&self) -> Quat {
        self.rotation
    }

    fn set_global_translation(&mut self, translation: Vec3) {
        self.translation = translation;
    }

    fn set_global_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation;
    }
}

impl MotionState {
    /// Dynamic state that pushes every simulated pose onto its scene node.
    pub fn dynamic_linked(initial: Transform) -> Self {
        Self::new(initial, MotionMode::Dynamic, Binding::Linked)
    }

    /// Kinematic state that reports its scene node's pose to the physics engine.
    pub fn kinematic_linked(initial: Transform) -> Self {
        Self::new(initial, MotionMode::Kinematic, Binding::Linked)
    }

    /// Pose the engine should see, resolving a kinematic link through `store`.
    /// Every other state reports its cache.
    pub fn world_transform_in<S: NodeStore>(&self, store: &S) -> Result<Transform, MotionStateError> {
        if !(self.is_linked() && self.is_kinematic()) {
            return Ok(self.cached_transform());
        }
        let id = self.user_node().ok_or(MotionStateError::Unlinked)?;
        let node = store.node(id).ok_or(MotionStateError::NodeMissing(id))?;
        Ok(Transform::from_rotation_translation(
            node.global_rotation(),
            node.global_translation(),
        ))
    }

    /// Infallible form of [`MotionState::world_transform_in`]; an unresolved link
    /// is logged and the cache reported.
    pub fn resolved_world_transform<S: NodeStore>(&self, store: &S) -> Transform {
        self.world_transform_in(store).unwrap_or_else(|err| {
            warn!("{err}; reporting cached pose");
            self.cached_transform()
        })
    }

    /// Pairs this state with the store holding its node for one round of callbacks.
    pub fn bind<'a, S: NodeStore>(&'a mut self, store: &'a mut S) -> LinkedMotionState<'a, S> {
        LinkedMotionState { state: self, store }
    }
}

/// Motion state bound to a node store; hand this to the engine's callbacks.
pub struct LinkedMotionState<'a, S: NodeStore> {
    state: &'a mut MotionState,
    store: &'a mut S,
}

impl<'a, S: NodeStore> LinkedMotionState<'a, S> {
    pub fn state(&self) -> &MotionState {
        &*self.state
    }

    /// Pose the engine should see, failing when a kinematic link cannot be resolved.
    pub fn try_world_transform(&self) -> Result<Transform, MotionStateError> {
        self.state.world_transform_in(&*self.store)
    }

    /// Engine write that reports an unresolved dynamic link instead of skipping the node.
    ///
    /// Kinematic states drop the write and return `Ok(false)`.
    pub fn try_set_world_transform(&mut self, transform: &Transform) -> Result<bool, MotionStateError> {
        if !self.state.accept_engine_write(transform) {
            return Ok(false);
        }
        if !self.state.is_linked() {
            return Ok(true);
        }
        let id = self.state.user_node().ok_or(MotionStateError::Unlinked)?;
        let node = self
            .store
            .node_mut(id)
            .ok_or(MotionStateError::NodeMissing(id))?;
        node.set_global_translation(transform.origin);
        node.set_global_rotation(transform.rotation);
        Ok(true)
    }

    /// Moves a kinematic body. A linked state moves its scene node as well, so the
    /// engine sees the new pose on its next query.
    pub fn set_kinematic_position(&mut self, transform: &Transform) -> Result<(), MotionStateError> {
        if !self.state.is_kinematic() {
            return Err(MotionStateError::ModeMismatch {
                expected: MotionMode::Kinematic,
                actual: self.state.mode(),
            });
        }
        let transform = self.state.prepare(*transform);
        if self.state.is_linked() {
            let id = self.state.user_node().ok_or(MotionStateError::Unlinked)?;
            let node = self
                .store
                .node_mut(id)
                .ok_or(MotionStateError::NodeMissing(id))?;
            node.set_global_translation(transform.origin);
            node.set_global_rotation(transform.rotation);
        }
        self.state.set_cached(transform);
        Ok(())
    }

    /// Current pose as a render matrix, read from the node for kinematic links.
    pub fn gl_world_transform(&self) -> Mat4 {
        self.world_transform().to_matrix()
    }

    pub fn opengl_matrix(&self) -> [f32; 16] {
        self.world_transform().to_opengl_matrix()
    }

    /// Reads the node pose of a kinematic link into the state's cache.
    pub fn pull(&mut self) -> Result<Transform, MotionStateError> {
        let transform = self.try_world_transform()?;
        self.state.set_cached(transform);
        Ok(transform)
    }
}

impl<'a, S: NodeStore> MotionStateCallbacks for LinkedMotionState<'a, S> {
    fn world_transform(&self) -> Transform {
        self.state.resolved_world_transform(&*self.store)
    }

    fn set_world_transform(&mut self, transform: &Transform) {
        if let Err(err) = self.try_set_world_transform(transform) {
            warn!("{err}; simulated pose kept in cache only");
        }
    }
}
