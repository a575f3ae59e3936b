#![forbid(unsafe_code)]

//! Composes the per-frame transform matrix out of the accumulated parameters.

use glam::{Mat4, Vec3, Vec4};

use crate::transform::TransformState;

/// Composes the model-view-projection matrix for one frame.
///
/// The factor order is fixed: `rotation * shear * scale * translate`. Matrix
/// multiplication doesn't commute, so any other order puts different pixels
/// on screen. With this order the translation applies to the quad first and
/// the rotation last, so a translated image orbits the clip space origin as
/// it rotates rather than spinning in place. This is a pure function of the
/// parameters, called once per frame.
#[inline]
#[must_use]
pub fn compose_mvp(state: &TransformState) -> Mat4 {
  let rotation = Mat4::from_rotation_z(state.rotation_radians);
  let shear = shear_matrix(state.shear_x, state.shear_y);
  let scale = Mat4::from_scale(Vec3::new(state.scale, state.scale, 1.0));
  let translate = Mat4::from_translation(Vec3::new(state.translate_x, state.translate_y, 0.0));
  rotation * shear * scale * translate
}

/// The identity matrix with the two x/y shear factors dropped in.
///
/// `x_shear` lands at row 0, column 1, and `y_shear` at row 1, column 0.
/// [`Mat4`] is column-major, so in field terms those are `y_axis.x` and
/// `x_axis.y`.
#[inline]
#[must_use]
pub fn shear_matrix(x_shear: f32, y_shear: f32) -> Mat4 {
  Mat4::from_cols(
    Vec4::new(1.0, y_shear, 0.0, 0.0),
    Vec4::new(x_shear, 1.0, 0.0, 0.0),
    Vec4::Z,
    Vec4::W,
  )
}
