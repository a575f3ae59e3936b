#![forbid(unsafe_code)]

//! The frame-driven loop that ties input, matrix composition, and drawing
//! together.

use log::{debug, trace};

use crate::{
  mvp::compose_mvp,
  pixmap::Pixmap,
  renderer::{Renderer, QUAD_VERTEXES},
  transform::{InputEvent, TransformState},
};

/// Runs the viewer until a quit event or a host-side window closure.
///
/// Setup uploads the pixmap as a texture (consuming it) and uploads the
/// static quad, once each. After that, every iteration composes the MVP
/// matrix from the current transform parameters, submits the frame, and then
/// drains the pending input: `Quit` requests closure, every other event
/// updates the parameters. Input always lands strictly between frames, so no
/// frame is ever drawn from a half-updated set of parameters.
///
/// When the backend reports it should close, the loop returns and the
/// texture and quad handles drop with it.
pub fn run_viewer<R: Renderer>(renderer: &mut R, pixmap: Pixmap) -> anyhow::Result<()> {
  debug!("uploading a {}x{} image as the quad texture", pixmap.width(), pixmap.height());
  let texture = renderer.create_texture(pixmap)?;
  let quad = renderer.upload_static_quad(&QUAD_VERTEXES)?;
  let mut state = TransformState::default();
  while !renderer.should_close() {
    renderer.submit_frame(compose_mvp(&state), &texture, &quad)?;
    for event in renderer.poll_input() {
      trace!("input event: {event:?}");
      match event {
        InputEvent::Quit => renderer.request_close(),
        other => state.apply(other),
      }
    }
  }
  Ok(())
}
