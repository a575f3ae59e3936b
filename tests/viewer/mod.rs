use std::collections::VecDeque;

use ezview::{
  anyhow, glam::Mat4, run_viewer, InputEvent, Pixmap, Renderer, Vertex, QUAD_VERTEXES,
};

/// A scripted stand-in for a real backend. Hands the loop one canned input
/// batch per poll and records everything the loop does.
#[derive(Default)]
struct MockRenderer {
  script: VecDeque<Vec<InputEvent>>,
  submitted: Vec<Mat4>,
  textures_created: usize,
  quads_uploaded: Vec<usize>,
  fail_submit: bool,
  closed: bool,
}
impl MockRenderer {
  fn scripted(batches: &[&[InputEvent]]) -> Self {
    Self { script: batches.iter().map(|batch| batch.to_vec()).collect(), ..Self::default() }
  }
}
impl Renderer for MockRenderer {
  type Texture = (u32, u32);
  type QuadBuffer = usize;

  fn create_texture(&mut self, pixmap: Pixmap) -> anyhow::Result<(u32, u32)> {
    self.textures_created += 1;
    Ok((pixmap.width(), pixmap.height()))
  }

  fn upload_static_quad(&mut self, vertexes: &[Vertex]) -> anyhow::Result<usize> {
    self.quads_uploaded.push(vertexes.len());
    Ok(vertexes.len())
  }

  fn submit_frame(
    &mut self, mvp: Mat4, _texture: &(u32, u32), _quad: &usize,
  ) -> anyhow::Result<()> {
    if self.fail_submit {
      anyhow::bail!("pretend the context went away");
    }
    self.submitted.push(mvp);
    Ok(())
  }

  fn poll_input(&mut self) -> Vec<InputEvent> {
    // an exhausted script quits, so a broken loop can't spin forever
    self.script.pop_front().unwrap_or_else(|| vec![InputEvent::Quit])
  }

  fn should_close(&self) -> bool {
    self.closed
  }

  fn request_close(&mut self) {
    self.closed = true;
  }
}

fn tiny_pixmap() -> Pixmap {
  Pixmap::from_rgb8(2, 1, vec![255, 0, 0, 0, 255, 0]).unwrap()
}

#[test]
fn test_run_viewer_uploads_once_then_quits_on_quit() {
  let mut renderer = MockRenderer::scripted(&[&[], &[InputEvent::Quit]]);
  run_viewer(&mut renderer, tiny_pixmap()).unwrap();
  assert_eq!(renderer.textures_created, 1);
  assert_eq!(renderer.quads_uploaded, vec![QUAD_VERTEXES.len()]);
  assert_eq!(renderer.submitted.len(), 2);
  assert!(renderer.closed);
}

#[test]
fn test_run_viewer_applies_input_between_frames() {
  let mut renderer = MockRenderer::scripted(&[
    &[InputEvent::ScaleUp],
    &[InputEvent::ScaleUp, InputEvent::ScaleDown],
    &[],
  ]);
  run_viewer(&mut renderer, tiny_pixmap()).unwrap();
  // frame 0 is drawn before any input lands, then each batch shows up in the
  // very next frame's matrix, then the exhausted script quits
  let scales: Vec<f32> = renderer.submitted.iter().map(|m| m.x_axis.x).collect();
  assert_eq!(scales, vec![1.0, 2.0, 2.0, 2.0]);
}

#[test]
fn test_run_viewer_stops_at_the_frame_after_quit() {
  let mut renderer = MockRenderer::scripted(&[&[InputEvent::Quit, InputEvent::ScaleUp]]);
  run_viewer(&mut renderer, tiny_pixmap()).unwrap();
  assert_eq!(renderer.submitted.len(), 1);
  assert!(renderer.closed);
}

#[test]
fn test_run_viewer_draws_nothing_if_already_closed() {
  let mut renderer = MockRenderer::scripted(&[]);
  renderer.closed = true;
  run_viewer(&mut renderer, tiny_pixmap()).unwrap();
  assert_eq!(renderer.submitted.len(), 0);
  // setup still happens: the texture and quad go up before the loop check
  assert_eq!(renderer.textures_created, 1);
  assert_eq!(renderer.quads_uploaded.len(), 1);
}

#[test]
fn test_run_viewer_propagates_backend_errors() {
  let mut renderer = MockRenderer::scripted(&[&[]]);
  renderer.fail_submit = true;
  assert!(run_viewer(&mut renderer, tiny_pixmap()).is_err());
}
