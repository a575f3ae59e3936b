use core::f32::consts::FRAC_PI_2;

use ezview::{
  compose_mvp, glam::{Mat4, Vec3, Vec4}, shear_matrix, InputEvent, TransformState, ROTATE_STEP,
  SHEAR_STEP, TRANSLATE_STEP,
};

#[test]
fn test_TransformState_default_composes_to_the_identity() {
  let state = TransformState::default();
  assert_eq!(state.scale, 1.0);
  assert_eq!(state.rotation_radians, 0.0);
  assert_eq!(compose_mvp(&state), Mat4::IDENTITY);
}

#[test]
fn test_TransformState_scale_accumulates_multiplicatively() {
  let mut state = TransformState::default();
  state.apply(InputEvent::ScaleUp);
  state.apply(InputEvent::ScaleUp);
  state.apply(InputEvent::ScaleDown);
  assert_eq!(state.scale, 2.0);

  // only the counts matter, not the interleaving
  let mut other = TransformState::default();
  other.apply(InputEvent::ScaleUp);
  other.apply(InputEvent::ScaleDown);
  other.apply(InputEvent::ScaleUp);
  assert_eq!(other.scale, 2.0);
}

#[test]
fn test_TransformState_rotate_clockwise_is_negative() {
  let mut state = TransformState::default();
  state.apply(InputEvent::RotateClockwise);
  assert_eq!(state.rotation_radians, -FRAC_PI_2);
  state.apply(InputEvent::RotateCounterClockwise);
  state.apply(InputEvent::RotateCounterClockwise);
  assert_eq!(state.rotation_radians, FRAC_PI_2);
}

#[test]
fn test_TransformState_translate_and_shear_steps() {
  let mut state = TransformState::default();
  state.apply(InputEvent::TranslateUp);
  state.apply(InputEvent::TranslateUp);
  state.apply(InputEvent::TranslateLeft);
  state.apply(InputEvent::ShearRight);
  state.apply(InputEvent::ShearDown);
  assert!((state.translate_y - 2.0 * TRANSLATE_STEP).abs() < 1e-6);
  assert!((state.translate_x + TRANSLATE_STEP).abs() < 1e-6);
  assert!((state.shear_x - SHEAR_STEP).abs() < 1e-6);
  assert!((state.shear_y + SHEAR_STEP).abs() < 1e-6);
}

#[test]
fn test_TransformState_quit_changes_nothing() {
  let mut state = TransformState::default();
  state.apply(InputEvent::Quit);
  assert_eq!(state, TransformState::default());
}

#[test]
fn test_TransformState_accumulation_is_unbounded() {
  let mut state = TransformState::default();
  for _ in 0..8 {
    state.apply(InputEvent::RotateCounterClockwise);
  }
  // two full turns, not wrapped back toward zero
  assert!((state.rotation_radians - 8.0 * ROTATE_STEP).abs() < 1e-4);
  for _ in 0..20 {
    state.apply(InputEvent::ScaleUp);
  }
  assert_eq!(state.scale, 1024.0 * 1024.0);
}

#[test]
fn test_compose_mvp_factor_order_is_rotation_shear_scale_translate() {
  let state = TransformState {
    rotation_radians: FRAC_PI_2,
    scale: 2.0,
    translate_x: 0.6,
    translate_y: -0.2,
    shear_x: 0.2,
    shear_y: -0.4,
  };
  let rotation = Mat4::from_rotation_z(state.rotation_radians);
  let shear = shear_matrix(state.shear_x, state.shear_y);
  let scale = Mat4::from_scale(Vec3::new(state.scale, state.scale, 1.0));
  let translate = Mat4::from_translation(Vec3::new(state.translate_x, state.translate_y, 0.0));
  assert_eq!(compose_mvp(&state), rotation * shear * scale * translate);
  // the same factors in the opposite order put different pixels on screen
  assert_ne!(compose_mvp(&state), translate * scale * shear * rotation);
}

#[test]
fn test_compose_mvp_scale_lands_on_the_diagonal() {
  let state = TransformState { scale: 4.0, ..TransformState::default() };
  let mvp = compose_mvp(&state);
  assert_eq!(mvp.x_axis.x, 4.0);
  assert_eq!(mvp.y_axis.y, 4.0);
  assert_eq!(mvp.z_axis.z, 1.0);
  assert_eq!(mvp.w_axis.w, 1.0);
}

#[test]
fn test_compose_mvp_translation_lands_in_the_w_column() {
  let state = TransformState { translate_x: 0.2, translate_y: -0.4, ..TransformState::default() };
  let mvp = compose_mvp(&state);
  assert_eq!(mvp.w_axis, Vec4::new(0.2, -0.4, 0.0, 1.0));
}

#[test]
fn test_compose_mvp_quarter_turn_sends_x_toward_negative_y() {
  let state = TransformState { rotation_radians: -FRAC_PI_2, ..TransformState::default() };
  let spun = compose_mvp(&state) * Vec4::new(1.0, 0.0, 0.0, 1.0);
  assert!(spun.x.abs() < 1e-6);
  assert!((spun.y + 1.0).abs() < 1e-6);
}

#[test]
fn test_shear_matrix_component_placement() {
  let sheared = shear_matrix(0.25, -0.5);
  // column-major: the x shear factor is row 0 of the y axis column
  assert_eq!(sheared.y_axis.x, 0.25);
  assert_eq!(sheared.x_axis.y, -0.5);
  // a point straight up the y axis gets pushed along x
  assert_eq!(sheared * Vec4::new(0.0, 1.0, 0.0, 1.0), Vec4::new(0.25, 1.0, 0.0, 1.0));
}
