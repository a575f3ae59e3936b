//! The OpenGL implementation of the renderer boundary: a glutin window and
//! context, winit event polling, and glow for the GL calls.
//!
//! The GL side targets the lowest common denominator on purpose: desktop GL
//! 2.1 or GLES 2.0, no vertex array objects, attribute pointers re-specified
//! per draw. A textured quad doesn't need anything newer, and the old subset
//! runs everywhere from ancient laptops to a raspberry pi.

use std::rc::Rc;

use anyhow::Context as _;
use bytemuck::cast_slice;
use glam::Mat4;
use glow::HasContext;
use glutin::{ContextBuilder, GlRequest, PossiblyCurrent, WindowedContext};
use log::debug;
use memoffset::offset_of;
use winit::{
  dpi::{LogicalSize, PhysicalSize},
  event::{ElementState, Event, KeyboardInput, VirtualKeyCode, WindowEvent},
  event_loop::{ControlFlow, EventLoop},
  platform::run_return::EventLoopExtRunReturn,
  window::WindowBuilder,
};

use crate::{
  pixmap::Pixmap,
  renderer::{Renderer, Vertex},
  transform::InputEvent,
};

/// A shader compile or link failure.
///
/// This keeps its own type, rather than folding into a plain
/// [`anyhow::Error`], so that the binary can tell shader trouble apart from
/// every other startup failure and exit with a distinct code for it.
#[derive(Debug, Clone, thiserror::Error)]
#[error("shader compile/link failure: {0}")]
pub struct ShaderError(pub String);

const VERTEX_SHADER_SRC: &str = "
uniform mat4 MVP;
attribute vec2 vPos;
attribute vec2 TexCoordIn;
varying vec2 TexCoordOut;

void main() {
  gl_Position = MVP * vec4(vPos, 0.0, 1.0);
  TexCoordOut = TexCoordIn;
}";

const FRAGMENT_SHADER_SRC: &str = "
#ifdef GL_ES
precision mediump float;
#endif
uniform sampler2D Texture;
varying vec2 TexCoordOut;

void main() {
  gl_FragColor = texture2D(Texture, TexCoordOut);
}";

/// Handle to the quad's texture on the GPU.
pub struct GlTexture {
  gl: Rc<glow::Context>,
  raw: glow::Texture,
}
impl Drop for GlTexture {
  fn drop(&mut self) {
    unsafe {
      self.gl.delete_texture(self.raw);
    }
  }
}

/// Handle to the quad's vertex list on the GPU.
pub struct GlQuadBuffer {
  gl: Rc<glow::Context>,
  raw: glow::Buffer,
  vertex_count: i32,
}
impl Drop for GlQuadBuffer {
  fn drop(&mut self) {
    unsafe {
      self.gl.delete_buffer(self.raw);
    }
  }
}

/// The OpenGL renderer. Owns the window, the GL context, and the shader
/// program, and answers the render loop's polling.
pub struct GlRenderer {
  event_loop: EventLoop<()>,
  context: WindowedContext<PossiblyCurrent>,
  context_size: PhysicalSize<u32>,
  gl: Rc<glow::Context>,
  program: glow::Program,
  mvp_location: glow::UniformLocation,
  position_location: u32,
  tex_coord_location: u32,
  close_requested: bool,
}

impl GlRenderer {
  /// Opens a window sized to the image and builds the GL pipeline inside it.
  ///
  /// A [`ShaderError`] out of here means the GL driver rejected the built-in
  /// shaders. Every other failure is a window or context problem.
  pub fn new(title: &str, width: u32, height: u32) -> anyhow::Result<GlRenderer> {
    let event_loop = EventLoop::new();
    let window_builder =
      WindowBuilder::new().with_title(title).with_inner_size(LogicalSize::new(width, height));
    let context = ContextBuilder::new()
      .with_gl(GlRequest::GlThenGles { opengl_version: (2, 1), opengles_version: (2, 0) })
      .with_vsync(true)
      .build_windowed(window_builder, &event_loop)
      .context("failed to create the OpenGL window")?;
    let context = unsafe { context.make_current() }
      .map_err(|(_, e)| e)
      .context("failed to make the OpenGL context current")?;
    let gl = unsafe {
      glow::Context::from_loader_function(|name| context.get_proc_address(name) as *const _)
    };
    let gl = Rc::new(gl);

    let program = unsafe { link_program(&gl, VERTEX_SHADER_SRC, FRAGMENT_SHADER_SRC)? };
    let (mvp_location, position_location, tex_coord_location) = unsafe {
      let mvp = gl
        .get_uniform_location(program, "MVP")
        .ok_or_else(|| ShaderError("the linked program is missing the MVP uniform".to_string()))?;
      let position = gl.get_attrib_location(program, "vPos").ok_or_else(|| {
        ShaderError("the linked program is missing the vPos attribute".to_string())
      })?;
      let tex_coord = gl.get_attrib_location(program, "TexCoordIn").ok_or_else(|| {
        ShaderError("the linked program is missing the TexCoordIn attribute".to_string())
      })?;
      (mvp, position, tex_coord)
    };
    unsafe {
      gl.use_program(Some(program));
      if let Some(sampler) = gl.get_uniform_location(program, "Texture") {
        gl.uniform_1_i32(Some(&sampler), 0);
      }
      gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
      gl.clear_color(0.2, 0.3, 0.3, 1.0);
    }

    let context_size = context.window().inner_size();
    debug!("OpenGL context up, drawable size {}x{}", context_size.width, context_size.height);
    Ok(GlRenderer {
      event_loop,
      context,
      context_size,
      gl,
      program,
      mvp_location,
      position_location,
      tex_coord_location,
      close_requested: false,
    })
  }
}

impl Drop for GlRenderer {
  fn drop(&mut self) {
    unsafe {
      self.gl.delete_program(self.program);
    }
  }
}

impl Renderer for GlRenderer {
  type Texture = GlTexture;
  type QuadBuffer = GlQuadBuffer;

  fn create_texture(&mut self, pixmap: Pixmap) -> anyhow::Result<GlTexture> {
    let raw = unsafe {
      let gl = &self.gl;
      let texture = gl.create_texture().map_err(anyhow::Error::msg)?;
      gl.bind_texture(glow::TEXTURE_2D, Some(texture));
      gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, glow::CLAMP_TO_EDGE as i32);
      gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, glow::CLAMP_TO_EDGE as i32);
      gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, glow::LINEAR as i32);
      gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, glow::LINEAR as i32);
      // the pixmap guarantees tightly packed rows, and unpack alignment is
      // already pinned to 1, so any width uploads without row padding games.
      gl.tex_image_2d(
        glow::TEXTURE_2D,
        0,
        glow::RGB as i32,
        pixmap.width() as i32,
        pixmap.height() as i32,
        0,
        glow::RGB,
        glow::UNSIGNED_BYTE,
        Some(pixmap.pixels()),
      );
      texture
    };
    debug!("uploaded a {}x{} RGB texture", pixmap.width(), pixmap.height());
    Ok(GlTexture { gl: Rc::clone(&self.gl), raw })
  }

  fn upload_static_quad(&mut self, vertexes: &[Vertex]) -> anyhow::Result<GlQuadBuffer> {
    let raw = unsafe {
      let buffer = self.gl.create_buffer().map_err(anyhow::Error::msg)?;
      self.gl.bind_buffer(glow::ARRAY_BUFFER, Some(buffer));
      self.gl.buffer_data_u8_slice(glow::ARRAY_BUFFER, cast_slice(vertexes), glow::STATIC_DRAW);
      buffer
    };
    Ok(GlQuadBuffer { gl: Rc::clone(&self.gl), raw, vertex_count: vertexes.len() as i32 })
  }

  fn submit_frame(
    &mut self, mvp: Mat4, texture: &GlTexture, quad: &GlQuadBuffer,
  ) -> anyhow::Result<()> {
    let window_size = self.context.window().inner_size();
    if self.context_size != window_size {
      self.context.resize(window_size);
      self.context_size = window_size;
    }
    unsafe {
      let gl = &self.gl;
      gl.viewport(0, 0, window_size.width as i32, window_size.height as i32);
      gl.clear(glow::COLOR_BUFFER_BIT);
      gl.use_program(Some(self.program));
      gl.uniform_matrix_4_f32_slice(Some(&self.mvp_location), false, &mvp.to_cols_array());
      gl.active_texture(glow::TEXTURE0);
      gl.bind_texture(glow::TEXTURE_2D, Some(texture.raw));
      gl.bind_buffer(glow::ARRAY_BUFFER, Some(quad.raw));
      let stride = core::mem::size_of::<Vertex>() as i32;
      gl.enable_vertex_attrib_array(self.position_location);
      gl.vertex_attrib_pointer_f32(
        self.position_location,
        2,
        glow::FLOAT,
        false,
        stride,
        offset_of!(Vertex, position) as i32,
      );
      gl.enable_vertex_attrib_array(self.tex_coord_location);
      gl.vertex_attrib_pointer_f32(
        self.tex_coord_location,
        2,
        glow::FLOAT,
        false,
        stride,
        offset_of!(Vertex, tex_coord) as i32,
      );
      gl.draw_arrays(glow::TRIANGLES, 0, quad.vertex_count);
    }
    self.context.swap_buffers()?;
    Ok(())
  }

  fn poll_input(&mut self) -> Vec<InputEvent> {
    let mut events = Vec::new();
    self.event_loop.run_return(|event, _, control_flow| {
      // drain whatever is queued, then hand control straight back
      *control_flow = ControlFlow::Exit;
      if let Event::WindowEvent { event, .. } = event {
        match event {
          WindowEvent::CloseRequested => events.push(InputEvent::Quit),
          WindowEvent::KeyboardInput {
            input: KeyboardInput { state: ElementState::Pressed, virtual_keycode: Some(key), .. },
            ..
          } => {
            if let Some(mapped) = map_key(key) {
              events.push(mapped);
            }
          }
          _ => (),
        }
      }
    });
    events
  }

  fn should_close(&self) -> bool {
    self.close_requested
  }

  fn request_close(&mut self) {
    self.close_requested = true;
  }
}

/// The keyboard map. Keys not listed here mean nothing and are ignored.
fn map_key(key: VirtualKeyCode) -> Option<InputEvent> {
  Some(match key {
    VirtualKeyCode::Equals | VirtualKeyCode::NumpadAdd => InputEvent::ScaleUp,
    VirtualKeyCode::Minus | VirtualKeyCode::NumpadSubtract => InputEvent::ScaleDown,
    VirtualKeyCode::Up => InputEvent::TranslateUp,
    VirtualKeyCode::Down => InputEvent::TranslateDown,
    VirtualKeyCode::Left => InputEvent::TranslateLeft,
    VirtualKeyCode::Right => InputEvent::TranslateRight,
    VirtualKeyCode::E => InputEvent::RotateClockwise,
    VirtualKeyCode::Q => InputEvent::RotateCounterClockwise,
    VirtualKeyCode::A => InputEvent::ShearLeft,
    VirtualKeyCode::D => InputEvent::ShearRight,
    VirtualKeyCode::W => InputEvent::ShearUp,
    VirtualKeyCode::S => InputEvent::ShearDown,
    VirtualKeyCode::Escape => InputEvent::Quit,
    _ => return None,
  })
}

/// Compiles both shader stages and links them into a program.
unsafe fn link_program(
  gl: &glow::Context, vertex_src: &str, fragment_src: &str,
) -> anyhow::Result<glow::Program> {
  let vertex = compile_shader(gl, glow::VERTEX_SHADER, vertex_src)?;
  let fragment = compile_shader(gl, glow::FRAGMENT_SHADER, fragment_src)?;
  let program = gl.create_program().map_err(ShaderError)?;
  gl.attach_shader(program, vertex);
  gl.attach_shader(program, fragment);
  gl.link_program(program);
  // the program owns the stages from here on
  gl.delete_shader(vertex);
  gl.delete_shader(fragment);
  if gl.get_program_link_status(program) {
    Ok(program)
  } else {
    let log = gl.get_program_info_log(program);
    gl.delete_program(program);
    Err(ShaderError(log).into())
  }
}

unsafe fn compile_shader(
  gl: &glow::Context, stage: u32, source: &str,
) -> anyhow::Result<glow::Shader> {
  let shader = gl.create_shader(stage).map_err(ShaderError)?;
  gl.shader_source(shader, source);
  gl.compile_shader(shader);
  if gl.get_shader_compile_status(shader) {
    Ok(shader)
  } else {
    let log = gl.get_shader_info_log(shader);
    gl.delete_shader(shader);
    Err(ShaderError(log).into())
  }
}
