//! Per-step batch exchange between the physics engine and a set of motion states.
//!
//! Cached states are independent of each other, so with the `parallel` feature
//! they run on the rayon pool. Linked states share the node store: writes to it
//! happen on the calling thread after the parallel pass, reads go through `&S`.
//! Hosts without linked states pass [`NoNodes`](crate::core::linked::NoNodes).

use glam::Mat4;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::{
    core::{MotionState, MotionStateCallbacks, NodeStore, Transform},
    error::MotionStateError,
    utils::logging::BatchTimer,
};

/// Hands the simulated poses to their motion states. `poses[i]` belongs to
/// `states[i]`; kinematic states are skipped and linked dynamic states also
/// update their scene node. Returns how many states were written.
pub fn push_dynamic_transforms<S: NodeStore>(
    states: &mut [MotionState],
    poses: &[Transform],
    store: &mut S,
) -> Result<usize, MotionStateError> {
    if states.len() != poses.len() {
        return Err(MotionStateError::LengthMismatch {
            states: states.len(),
            poses: poses.len(),
        });
    }
    let _timer = BatchTimer::new("push_dynamic_transforms", states.len());

    let mut written = count_writes(states, poses, |state, pose| {
        if state.is_dynamic() && !state.is_linked() {
            state.set_world_transform(pose);
            true
        } else {
            false
        }
    });

    for (state, pose) in states.iter_mut().zip(poses) {
        if state.is_dynamic() && state.is_linked() {
            state.bind(&mut *store).set_world_transform(pose);
            written += 1;
        }
    }

    Ok(written)
}

/// Poses of every kinematic state, tagged with the state's index. Linked states
/// report their scene node's pose.
pub fn collect_kinematic_transforms<S: NodeStore + Sync>(
    states: &[MotionState],
    store: &S,
) -> Vec<(usize, Transform)> {
    let _timer = BatchTimer::new("collect_kinematic_transforms", states.len());

    filter_map_states(states, |index, state| {
        state
            .is_kinematic()
            .then(|| (index, state.resolved_world_transform(store)))
    })
}

/// Render matrices for all states, in order.
pub fn collect_render_matrices<S: NodeStore + Sync>(states: &[MotionState], store: &S) -> Vec<Mat4> {
    let _timer = BatchTimer::new("collect_render_matrices", states.len());

    filter_map_states(states, |_, state| {
        Some(state.resolved_world_transform(store).to_matrix())
    })
}

#[cfg(feature = "parallel")]
fn count_writes<F>(states: &mut [MotionState], poses: &[Transform], write: F) -> usize
where
    F: Fn(&mut MotionState, &Transform) -> bool + Sync + Send,
{
    states
        .par_iter_mut()
        .zip(poses.par_iter())
        .map(|(state, pose)| usize::from(write(state, pose)))
        .sum()
}

#[cfg(not(feature = "parallel"))]
fn count_writes<F>(states: &mut [MotionState], poses: &[Transform], write: F) -> usize
where
    F: Fn(&mut MotionState, &Transform) -> bool,
{
    states
        .iter_mut()
        .zip(poses.iter())
        .map(|(state, pose)| usize::from(write(state, pose)))
        .sum()
}

#[cfg(feature = "parallel")]
fn filter_map_states<T, F>(states: &[MotionState], pick: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize, &MotionState) -> Option<T> + Sync + Send,
{
    states
        .par_iter()
        .enumerate()
        .filter_map(|(index, state)| pick(index, state))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn filter_map_states<T, F>(states: &[MotionState], pick: F) -> Vec<T>
where
    F: Fn(usize, &MotionState) -> Option<T>,
{
    states
        .iter()
        .enumerate()
        .filter_map(|(index, state)| pick(index, state))
        .collect()
}
