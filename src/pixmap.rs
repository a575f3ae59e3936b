#![forbid(unsafe_code)]

//! Provides the heap-allocated image type that decoding produces.

use crate::error::PpmError;

/// Converts an `(x,y)` position within a given `width` 2D space into a linear
/// index.
///
/// You don't ever need to call this function yourself, but it's how the pixmap
/// converts 2d coordinates into index values within its payload vector. If
/// you'd like to use the exact same function it does for some reason, you can.
#[inline]
#[must_use]
pub const fn xy_width_to_index(x: u32, y: u32, width: u32) -> usize {
  (y * width + x) as usize
}

/// A direct-color image: 8 bits per channel, interleaved RGB, top row first.
///
/// A value of this type always holds exactly `width * height * 3` payload
/// bytes. [`Pixmap::from_rgb8`] is the only way to build one, so if you're
/// holding a pixmap the math already checks out, and a backend can hand the
/// buffer straight to a texture upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pixmap {
  width: u32,
  height: u32,
  pixels: Vec<u8>,
}
impl Pixmap {
  /// Builds a pixmap from dimensions and an interleaved RGB buffer.
  ///
  /// ## Failure
  /// * `WidthOrHeightZero` if either dimension is 0.
  /// * `TruncatedPixelData` if the buffer length isn't `width * height * 3`
  ///   (the error reports expected and actual byte counts either way).
  #[inline]
  pub fn from_rgb8(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, PpmError> {
    if width == 0 || height == 0 {
      return Err(PpmError::WidthOrHeightZero);
    }
    let expected = (width as usize) * (height as usize) * 3;
    if pixels.len() != expected {
      return Err(PpmError::TruncatedPixelData { expected, found: pixels.len() });
    }
    Ok(Self { width, height, pixels })
  }

  /// Width in pixels. Never 0.
  #[inline]
  #[must_use]
  pub const fn width(&self) -> u32 {
    self.width
  }

  /// Height in pixels. Never 0.
  #[inline]
  #[must_use]
  pub const fn height(&self) -> u32 {
    self.height
  }

  /// The payload bytes: `width * height` interleaved RGB triples, top row
  /// first, no padding anywhere.
  #[inline]
  #[must_use]
  pub fn pixels(&self) -> &[u8] {
    &self.pixels
  }

  /// Gets the `[r, g, b]` of the pixel at the position, or `None` if the
  /// position is out of bounds.
  #[inline]
  #[must_use]
  pub fn get(&self, x: u32, y: u32) -> Option<[u8; 3]> {
    if x < self.width && y < self.height {
      let i = xy_width_to_index(x, y, self.width) * 3;
      Some([self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]])
    } else {
      None
    }
  }
}
