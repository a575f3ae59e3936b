#![forbid(unsafe_code)]

use core::{num::ParseIntError, str::Utf8Error};

/// An error from decoding a pixel-map stream.
///
/// Every variant is fatal to the decode that hit it. The decoder never skips
/// bad input, retries, or hands back a partially filled image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PpmError {
  /// The stream doesn't open with a `P3` or `P6` format tag.
  #[error("the stream does not start with a P3 or P6 format tag")]
  UnrecognizedTag,

  /// An ascii unsigned decimal value was required but not found.
  #[error("could not parse an ascii unsigned decimal value")]
  CouldNotParseUnsigned,

  /// The declared width and/or height of this image is 0.
  #[error("the declared width and/or height is zero")]
  WidthOrHeightZero,

  /// The image is too large.
  ///
  /// The decoder limits the width and height of images it processes to be
  /// 17,000 or less to prevent accidental out-of-memory problems.
  #[error("the declared width and/or height exceeds 17,000")]
  DimensionsTooLarge,

  /// This version doesn't handle max channel values other than 255.
  #[error("unsupported max channel value {0}, only 255 is handled")]
  UnsupportedMaxValue(u32),

  /// An ascii pixel entry parsed to more than the max channel value.
  #[error("an ascii pixel entry exceeds the max channel value")]
  IntegerExceedsMaxValue,

  /// The pixel data ended before the full image was read.
  ///
  /// Counts are in bytes of decoded pixel data. Running out of input mid
  /// image is never a normal end of decoding.
  #[error("pixel data ends early: expected {expected} bytes, found {found}")]
  TruncatedPixelData {
    /// How many bytes the header promised (`width * height * 3`).
    expected: usize,
    /// How many bytes were actually there.
    found: usize,
  },
}
impl From<Utf8Error> for PpmError {
  #[inline]
  fn from(_: Utf8Error) -> Self {
    Self::CouldNotParseUnsigned
  }
}
impl From<ParseIntError> for PpmError {
  #[inline]
  fn from(_: ParseIntError) -> Self {
    Self::CouldNotParseUnsigned
  }
}
