use motion_relay::*;

#[test]
fn dynamic_link_keeps_scene_node_in_step_with_engine() {
    let mut scene = NodeArena::new();
    let node = scene.insert(SceneNode::default());

    let mut state = MotionState::dynamic_linked(Transform::IDENTITY);
    state.set_user_node(node);

    for step in 1..=3 {
        let pose = Transform::from_rotation_translation(
            Quat::from_rotation_y(step as f32 * 0.1),
            Vec3::new(0.0, 10.0 - step as f32, 0.0),
        );
        state.bind(&mut scene).set_world_transform(&pose);

        let node = scene.get(node).unwrap();
        assert_eq!(node.global_translation(), pose.origin);
        assert_eq!(node.global_rotation(), pose.rotation);
    }
}

#[test]
fn kinematic_link_reports_latest_node_pose_on_next_query() {
    let mut scene = NodeArena::new();
    let node = scene.insert(SceneNode::default());

    let mut state = MotionState::kinematic_linked(Transform::IDENTITY);
    state.set_user_node(node);

    let q = Transform::from_rotation_translation(Quat::from_rotation_z(0.8), Vec3::new(7.0, 0.0, -2.0));
    {
        let node = scene.get_mut(node).unwrap();
        node.set_global_translation(q.origin);
        node.set_global_rotation(q.rotation);
    }

    let mut view = state.bind(&mut scene);
    assert_eq!(view.world_transform(), q);

    view.set_world_transform(&Transform::IDENTITY);
    assert_eq!(view.world_transform(), q);
    assert_eq!(view.state().rejected_writes(), 1);
}

#[test]
fn custom_node_store_works_through_the_trait() {
    use std::collections::HashMap;

    #[derive(Default)]
    struct Pivot {
        position: Vec3,
        orientation: Quat,
    }

    impl TransformNode for Pivot {
        fn global_translation(&self) -> Vec3 {
            self.position
        }
        fn global_rotation(&self) -> Quat {
            self.orientation
        }
        fn set_global_translation(&mut self, translation: Vec3) {
            self.position = translation;
        }
        fn set_global_rotation(&mut self, rotation: Quat) {
            self.orientation = rotation;
        }
    }

    struct Pivots(HashMap<NodeId, Pivot>);

    impl NodeStore for Pivots {
        type Node = Pivot;

        fn node(&self, id: NodeId) -> Option<&Pivot> {
            self.0.get(&id)
        }

        fn node_mut(&mut self, id: NodeId) -> Option<&mut Pivot> {
            self.0.get_mut(&id)
        }
    }

    let id = NodeId::new(42, 0);
    let mut pivots = Pivots(HashMap::from([(id, Pivot::default())]));

    let mut state = MotionState::dynamic_linked(Transform::IDENTITY);
    state.set_user_node(id);
    state
        .bind(&mut pivots)
        .try_set_world_transform(&Transform::from_translation(Vec3::ONE))
        .unwrap();

    assert_eq!(pivots.0[&id].position, Vec3::ONE);
}

#[test]
fn removed_node_is_reported_not_dereferenced() {
    let mut scene = NodeArena::new();
    let node = scene.insert(SceneNode::default());
    let mut state = MotionState::kinematic_linked(Transform::from_translation(Vec3::X));
    state.set_user_node(node);
    scene.remove(node);

    let view = state.bind(&mut scene);
    assert_eq!(view.try_world_transform(), Err(MotionStateError::NodeMissing(node)));
    assert_eq!(view.world_transform(), Transform::from_translation(Vec3::X));
}

#[test]
fn dynamic_link_render_matrix_follows_engine_writes() {
    let mut scene = NodeArena::new();
    let node = scene.insert(SceneNode::default());
    let mut state = MotionState::dynamic_linked(Transform::IDENTITY);
    state.set_user_node(node);

    let pose = Transform::from_translation(Vec3::new(1.0, 2.0, 3.0));
    state.bind(&mut scene).set_world_transform(&pose);

    assert_eq!(state.gl_world_transform(), pose.to_matrix());
    assert_eq!(state.opengl_matrix(), pose.to_opengl_matrix());
    assert_eq!(state.bind(&mut scene).gl_world_transform(), pose.to_matrix());
}

#[test]
fn kinematic_link_render_matrix_follows_node() {
    let mut scene = NodeArena::new();
    let node = scene.insert(SceneNode::default());
    let mut state = MotionState::kinematic_linked(Transform::IDENTITY);
    state.set_user_node(node);

    let q = Transform::from_rotation_translation(Quat::from_rotation_y(0.6), Vec3::new(7.0, 0.0, 0.0));
    *scene.get_mut(node).unwrap() = SceneNode::from_transform(&q);

    {
        let view = state.bind(&mut scene);
        assert_eq!(view.gl_world_transform(), q.to_matrix());
        assert_eq!(view.opengl_matrix(), q.to_opengl_matrix());
    }
    assert_eq!(collect_render_matrices(std::slice::from_ref(&state), &scene)[0], q.to_matrix());

    // The state's own accessor only catches up once the node pose is pulled.
    assert_eq!(state.gl_world_transform(), Transform::IDENTITY.to_matrix());
    state.bind(&mut scene).pull().unwrap();
    assert_eq!(state.gl_world_transform(), q.to_matrix());
}

#[test]
fn linked_kinematic_state_is_moved_through_its_node() {
    let mut scene = NodeArena::new();
    let node = scene.insert(SceneNode::default());
    let mut state = MotionState::kinematic_linked(Transform::IDENTITY);
    state.set_user_node(node);
    let target = Transform::from_translation(Vec3::new(0.0, 0.0, -4.0));

    assert_eq!(
        state.set_kinematic_position(&target),
        Err(MotionStateError::FollowsNode)
    );

    state.bind(&mut scene).set_kinematic_position(&target).unwrap();
    assert_eq!(
        collect_kinematic_transforms(std::slice::from_ref(&state), &scene),
        vec![(0, target)]
    );
}
