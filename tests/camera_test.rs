use std::collections::HashSet;

use cgmath::{InnerSpace, Point3, Vector3};
use phong_ngin::camera::{Camera, CameraUniform, MAX_PITCH, Projection};
use winit::keyboard::KeyCode;

fn camera() -> Camera {
    Camera::new([0.0, 0.0, 0.0], [0.0, 1.0, 0.0], -90.0, 0.0, 5.0, 0.25)
}

fn assert_point(actual: Point3<f32>, expected: [f32; 3]) {
    let diff = actual - Point3::from(expected);
    assert!(diff.magnitude() < 1e-4, "{:?} != {:?}", actual, expected);
}

#[test]
fn should_walk_forward_at_move_speed() {
    let mut camera = camera();
    let keys = HashSet::from([KeyCode::KeyW]);
    camera.key_control(&keys, 0.5);
    assert_point(camera.position(), [0.0, 0.0, -2.5]);
}

#[test]
fn should_strafe_and_cancel_opposite_keys() {
    let mut camera = camera();
    camera.key_control(&HashSet::from([KeyCode::KeyD]), 1.0);
    assert_point(camera.position(), [5.0, 0.0, 0.0]);

    camera.key_control(&HashSet::from([KeyCode::KeyW, KeyCode::KeyS, KeyCode::KeyA]), 1.0);
    assert_point(camera.position(), [0.0, 0.0, 0.0]);
}

#[test]
fn should_ignore_other_keys() {
    let mut camera = camera();
    camera.key_control(&HashSet::from([KeyCode::KeyF, KeyCode::Space]), 1.0);
    assert_point(camera.position(), [0.0, 0.0, 0.0]);
}

#[test]
fn should_turn_by_turn_speed() {
    let mut camera = camera();
    camera.mouse_control(360.0, 0.0);
    assert!((camera.yaw() - 0.0).abs() < 1e-4);
    let dir = camera.direction();
    assert!((dir - Vector3::new(1.0, 0.0, 0.0)).magnitude() < 1e-4);
}

#[test]
fn should_clamp_pitch() {
    let mut camera = camera();
    camera.mouse_control(0.0, 10_000.0);
    assert_eq!(camera.pitch(), MAX_PITCH);
    camera.mouse_control(0.0, -100_000.0);
    assert_eq!(camera.pitch(), -MAX_PITCH);
    assert!(camera.direction().y < 0.0);
    assert!((camera.direction().magnitude() - 1.0).abs() < 1e-5);
}

#[test]
fn should_follow_the_window_aspect() {
    let mut projection = Projection::new(1366, 768, cgmath::Deg(45.0), 0.1, 100.0);
    assert!((projection.aspect() - 1366.0 / 768.0).abs() < 1e-6);
    projection.resize(800, 800);
    assert_eq!(projection.aspect(), 1.0);
}

#[test]
fn should_expose_the_eye_position_to_shaders() {
    let mut camera = camera();
    camera.set_position([1.0, 2.0, 3.0]);
    let projection = Projection::new(100, 100, cgmath::Deg(45.0), 0.1, 100.0);
    let uniform = CameraUniform::new(&camera, &projection);
    assert_eq!(uniform.eye_position, [1.0, 2.0, 3.0]);
}
