#![forbid(unsafe_code)]

//! The boundary between the render loop and whatever does the drawing.

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use crate::{pixmap::Pixmap, transform::InputEvent};

/// One corner of the textured quad.
#[derive(Debug, Clone, Copy, Default, PartialEq, Zeroable, Pod)]
#[repr(C)]
pub struct Vertex {
  /// Clip space x,y, before the MVP matrix is applied.
  pub position: [f32; 2],
  /// The texture u,v sampled at this corner.
  pub tex_coord: [f32; 2],
}

/// The six vertexes of the image quad: two triangles covering clip space.
///
/// The texture coordinates use 0.99999 instead of 1.0 so that sampling right
/// at the far edge can't wrap around and bleed a line of the opposite border
/// into the image.
pub const QUAD_VERTEXES: [Vertex; 6] = [
  Vertex { position: [1.0, -1.0], tex_coord: [0.99999, 0.99999] },
  Vertex { position: [1.0, 1.0], tex_coord: [0.99999, 0.0] },
  Vertex { position: [-1.0, 1.0], tex_coord: [0.0, 0.0] },
  Vertex { position: [-1.0, 1.0], tex_coord: [0.0, 0.0] },
  Vertex { position: [-1.0, -1.0], tex_coord: [0.0, 0.99999] },
  Vertex { position: [1.0, -1.0], tex_coord: [0.99999, 0.99999] },
];

/// What the render loop needs out of a graphics and windowing backend.
///
/// The loop owns *what* to draw (the decoded image, the matrix for the
/// frame), an implementation owns *how* (window, context, GPU calls). The
/// handle types are associated so that a backend can hand back whatever
/// bookkeeping values it likes and get them returned on every draw.
///
/// All the fallible operations report through [`anyhow::Result`]. The loop
/// treats any backend error as fatal and passes it up unchanged.
pub trait Renderer {
  /// Handle to an uploaded texture.
  type Texture;
  /// Handle to an uploaded static vertex list.
  type QuadBuffer;

  /// Uploads the pixmap as the texture the quad will sample.
  ///
  /// Takes the pixmap by value: once the pixels are uploaded the CPU side
  /// buffer has no further use, so the handoff releases it at the earliest
  /// possible moment, on the error path included.
  fn create_texture(&mut self, pixmap: Pixmap) -> anyhow::Result<Self::Texture>;

  /// Uploads an unchanging vertex list, once per run.
  fn upload_static_quad(&mut self, vertexes: &[Vertex]) -> anyhow::Result<Self::QuadBuffer>;

  /// Draws one frame: fit the viewport to the current framebuffer size,
  /// clear, draw the quad with `mvp` applied, and present.
  ///
  /// Presenting is allowed to block until the display refreshes. That's the
  /// render loop's pacing.
  fn submit_frame(
    &mut self, mvp: Mat4, texture: &Self::Texture, quad: &Self::QuadBuffer,
  ) -> anyhow::Result<()>;

  /// Hands over the input events that arrived since the last poll, oldest
  /// first. Never blocks waiting for more.
  ///
  /// A host-side close of the window (close button, and so on) must come
  /// through as [`InputEvent::Quit`].
  fn poll_input(&mut self) -> Vec<InputEvent>;

  /// Whether the loop should stop instead of drawing another frame.
  fn should_close(&self) -> bool;

  /// Makes [`should_close`](Self::should_close) answer `true` from now on.
  fn request_close(&mut self);
}
