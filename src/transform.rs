#![forbid(unsafe_code)]

//! The accumulating transform parameters, and the input events that drive
//! them.

use core::f32::consts::FRAC_PI_2;

/// A scale-up event multiplies the scale factor by this.
pub const SCALE_STEP_UP: f32 = 2.0;
/// A scale-down event multiplies the scale factor by this.
pub const SCALE_STEP_DOWN: f32 = 0.5;
/// How far one translate event moves the image, in clip space units.
pub const TRANSLATE_STEP: f32 = 0.2;
/// How much one shear event changes a shear factor.
pub const SHEAR_STEP: f32 = 0.2;
/// How far one rotate event turns the image: a quarter turn.
pub const ROTATE_STEP: f32 = FRAC_PI_2;

/// A discrete input gesture, as mapped by a renderer backend.
///
/// Each event means exactly one fixed-size update to the transform
/// parameters (see [`TransformState::apply`]), except [`Quit`](Self::Quit),
/// which instead asks the render loop to shut down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
  /// Double the scale factor.
  ScaleUp,
  /// Halve the scale factor.
  ScaleDown,
  TranslateUp,
  TranslateDown,
  TranslateLeft,
  TranslateRight,
  /// A quarter turn clockwise (negative radians).
  RotateClockwise,
  /// A quarter turn counter-clockwise (positive radians).
  RotateCounterClockwise,
  ShearLeft,
  ShearRight,
  ShearUp,
  ShearDown,
  /// Stop the render loop. Never touches the transform parameters.
  Quit,
}

/// The accumulated 2D affine parameters.
///
/// One value of this type lives for the whole run of the viewer. The input
/// side of the loop is the only writer and the matrix composition is the only
/// reader, always on the same thread, so each frame sees one consistent
/// snapshot.
///
/// Nothing here wraps or clamps: every event just keeps accumulating. The
/// scale factor can't reach zero or go negative because the only updates to
/// it are the multiplicative [`SCALE_STEP_UP`] and [`SCALE_STEP_DOWN`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformState {
  /// Accumulated rotation, in radians. Counter-clockwise is positive.
  pub rotation_radians: f32,
  /// Accumulated scale factor. Starts at 1, always positive.
  pub scale: f32,
  /// Accumulated horizontal translation, in clip space units.
  pub translate_x: f32,
  /// Accumulated vertical translation, in clip space units.
  pub translate_y: f32,
  /// Accumulated x-axis shear factor.
  pub shear_x: f32,
  /// Accumulated y-axis shear factor.
  pub shear_y: f32,
}
impl Default for TransformState {
  /// The identity arrangement: scale 1, everything else 0.
  #[inline]
  fn default() -> Self {
    Self {
      rotation_radians: 0.0,
      scale: 1.0,
      translate_x: 0.0,
      translate_y: 0.0,
      shear_x: 0.0,
      shear_y: 0.0,
    }
  }
}
impl TransformState {
  /// Applies one event's fixed update to the parameters.
  ///
  /// There's no limit in either direction and no reset. [`Quit`] is accepted
  /// and changes nothing, since shutting down the loop is the viewer's job,
  /// not this type's.
  ///
  /// [`Quit`]: InputEvent::Quit
  #[inline]
  pub fn apply(&mut self, event: InputEvent) {
    match event {
      InputEvent::ScaleUp => self.scale *= SCALE_STEP_UP,
      InputEvent::ScaleDown => self.scale *= SCALE_STEP_DOWN,
      InputEvent::TranslateUp => self.translate_y += TRANSLATE_STEP,
      InputEvent::TranslateDown => self.translate_y -= TRANSLATE_STEP,
      InputEvent::TranslateLeft => self.translate_x -= TRANSLATE_STEP,
      InputEvent::TranslateRight => self.translate_x += TRANSLATE_STEP,
      InputEvent::RotateClockwise => self.rotation_radians -= ROTATE_STEP,
      InputEvent::RotateCounterClockwise => self.rotation_radians += ROTATE_STEP,
      InputEvent::ShearLeft => self.shear_x -= SHEAR_STEP,
      InputEvent::ShearRight => self.shear_x += SHEAR_STEP,
      InputEvent::ShearUp => self.shear_y += SHEAR_STEP,
      InputEvent::ShearDown => self.shear_y -= SHEAR_STEP,
      InputEvent::Quit => (),
    }
  }
}
