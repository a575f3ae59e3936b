//! A crate for viewing pixel-map images and messing with them in real time.
//!
//! The `ezview` binary opens a `P3` or `P6`
//! [Netpbm](https://en.wikipedia.org/wiki/Netpbm) pixel-map file, puts it on
//! a textured quad in a window, and then lets you pile 2D transforms onto
//! that quad from the keyboard, one keypress at a time:
//!
//! | Key | Effect |
//! |:-|:-|
//! | `=` / numpad `+` | double the scale |
//! | `-` / numpad `-` | halve the scale |
//! | arrow keys | translate by 0.2 |
//! | `Q` / `E` | rotate a quarter turn |
//! | `A` / `D` | shear along x by 0.2 |
//! | `W` / `S` | shear along y by 0.2 |
//! | `Escape` | quit |
//!
//! As a library, the pieces are usable on their own: [`ppm_try_pixmap`]
//! decodes bytes into a [`Pixmap`], [`TransformState`] turns [`InputEvent`]
//! values into accumulated parameters, [`compose_mvp`] turns those into a
//! matrix, and [`run_viewer`] drives any [`Renderer`] implementation with
//! all of the above.

// these two appear in the public API, so implementing a backend elsewhere
// needs the same versions we built against.
pub use anyhow;
pub use glam;

pub mod error;
pub use error::*;

pub mod pixmap;
pub use pixmap::*;

pub mod ppm;
pub use ppm::*;

pub mod transform;
pub use transform::*;

pub mod mvp;
pub use mvp::*;

pub mod renderer;
pub use renderer::*;

pub mod viewer;
pub use viewer::*;

#[cfg(feature = "backend-gl")]
pub mod gl_backend;
#[cfg(feature = "backend-gl")]
pub use gl_backend::*;
