use motion_relay::*;

fn main() -> Result<(), MotionStateError> {
    let mut scene = NodeArena::new();
    let falling_node = scene.insert(SceneNode::default());
    let paddle_node = scene.insert(SceneNode::default());

    let mut falling = MotionState::dynamic_linked(Transform::from_translation(Vec3::new(0.0, 10.0, 0.0)));
    falling.set_user_node(falling_node);
    let mut paddle = MotionState::kinematic_linked(Transform::IDENTITY);
    paddle.set_user_node(paddle_node);
    let mut states = vec![falling, paddle];

    for frame in 1..=3 {
        let time = frame as f32 / 60.0;
        if let Some(node) = scene.get_mut(paddle_node) {
            node.set_global_translation(Vec3::new(time, 0.0, 0.0));
        }

        println!("frame {frame}");
        for (index, pose) in collect_kinematic_transforms(&states, &scene) {
            println!("  engine sees kinematic body {index} at {:?}", pose.origin);
        }

        // Stand-in for the engine's step: free fall for the dynamic body only.
        let fallen = Transform::from_translation(Vec3::new(0.0, 10.0 - 4.9 * time * time, 0.0));
        push_dynamic_transforms(&mut states, &[fallen, Transform::IDENTITY], &mut scene)?;

        if let Some(node) = scene.get(falling_node) {
            println!("  renderer draws dynamic body at {:?}", node.global_translation());
        }
    }

    for matrix in collect_render_matrices(&states, &scene) {
        println!("final matrix translation: {:?}", matrix.w_axis.truncate());
    }
    Ok(())
}
