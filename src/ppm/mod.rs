#![forbid(unsafe_code)]

//! This module gives support for the `P3` and `P6`
//! [Netpbm](https://en.wikipedia.org/wiki/Netpbm) pixel-map formats.
//!
//! The general idea of these formats is that there's an ascii header which
//! describes the image basics, followed by either ascii or binary data giving
//! the value of every single pixel in the image.
//! * The header is a `P3` or `P6` format tag, then width, then height, then
//!   the max channel value, each as an ascii unsigned decimal.
//! * Comments are marked with `#` and go to the end of the line (like TOML).
//! * Runs of whitespace separate the header fields, and comments can sit
//!   around any of them.
//! * After the max value comes exactly one more delimiter byte, and then the
//!   pixel data: `width * height` red, green, blue triples, top row first.
//!
//! Use [`ppm_parse_header`] if you want the header fields and the exact
//! payload offset, or [`ppm_try_pixmap`] to decode a whole stream into a
//! [`Pixmap`](crate::Pixmap) in one call.
//!
//! ## The header/payload boundary
//!
//! `P6` pixel data is raw bytes, and raw bytes are allowed to *look like*
//! whitespace or comments. So after the max value field the parser consumes
//! exactly one delimiter and not a single byte more: one whitespace byte
//! usually, or one whole comment when a `#` sits right against the digits (the
//! comment's closing newline is the delimiter). Everything past that offset is
//! payload, verbatim.

use core::str::from_utf8;

use crate::{error::PpmError, pixmap::Pixmap};

mod iter_ascii_u8;
pub use iter_ascii_u8::*;

/// The decoder rejects widths and heights beyond this.
pub const MAX_DIMENSION: u32 = 17_000;

/// The two pixel data layouts a pixel-map stream can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PpmFormat {
  /// `P3`: each channel value is an ascii unsigned decimal.
  P3,
  /// `P6`: each channel value is one raw byte.
  P6,
}

/// The parsed info out of a pixel-map stream's header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PpmHeader {
  /// Which pixel data layout follows the header.
  pub format: PpmFormat,
  /// Image width in pixels. Never 0.
  pub width: u32,
  /// Image height in pixels. Never 0.
  pub height: u32,
  /// Max value per channel entry. Always 255 in the current version.
  pub max: u32,
  /// How many bytes of the stream the header took up.
  ///
  /// The pixel data begins at exactly this offset. `P6` has no marker between
  /// header and payload, so being off by even one byte would shift every
  /// pixel after it.
  pub header_len: usize,
}
impl PpmHeader {
  /// How many payload bytes the header promises: `width * height * 3`.
  #[inline]
  #[must_use]
  pub const fn payload_len(&self) -> usize {
    (self.width as usize) * (self.height as usize) * 3
  }
}

/// Trims off the leading whitespace and `#` comments from the front of the
/// bytes.
#[inline]
pub fn ppm_trim_comments_and_whitespace(mut bytes: &[u8]) -> &[u8] {
  loop {
    match bytes {
      // trim leading whitespace
      [u, tail @ ..] if u.is_ascii_whitespace() => bytes = tail,

      // trim single-line comment
      [b'#', tail @ ..] => {
        let mut it = tail.splitn(2, |&u| u == b'\n');
        drop(it.next());
        bytes = it.next().unwrap_or(&[]);
      }

      // now we're done
      _ => return bytes,
    }
  }
}

/// Reads one ascii unsigned decimal value off the front of the bytes.
///
/// The delimiter after the digits is *not* consumed. The caller decides how
/// to step over it, which is what lets the header parse keep an exact byte
/// offset.
#[inline]
pub fn ppm_read_ascii_unsigned(bytes: &[u8]) -> Result<(u32, &[u8]), PpmError> {
  let digit_count = bytes.iter().take_while(|u| u.is_ascii_digit()).count();
  if digit_count == 0 {
    return Err(PpmError::CouldNotParseUnsigned);
  }
  let (digits, spare) = bytes.split_at(digit_count);
  let number = from_utf8(digits)?.parse::<u32>()?;
  Ok((number, spare))
}

/// Pulls the format tag off the front of the bytes.
#[inline]
pub fn ppm_pull_tag(bytes: &[u8]) -> Result<(PpmFormat, &[u8]), PpmError> {
  let (format, rest) = match bytes {
    [b'P', b'3', rest @ ..] => (PpmFormat::P3, rest),
    [b'P', b'6', rest @ ..] => (PpmFormat::P6, rest),
    _ => return Err(PpmError::UnrecognizedTag),
  };
  // the tag has to stand alone: `P35` is not a tag.
  match rest.first() {
    Some(u) if !(u.is_ascii_whitespace() || *u == b'#') => Err(PpmError::UnrecognizedTag),
    _ => Ok((format, rest)),
  }
}

/// Steps over the single delimiter that closes the header.
///
/// One whitespace byte, or one whole comment when a `#` sits right against
/// the last field's digits. At the end of the stream there's nothing to step
/// over, which is fine here: the missing payload is reported by the decode
/// stage, where the expected and found counts are known.
#[inline]
fn ppm_step_one_delimiter(bytes: &[u8]) -> Result<&[u8], PpmError> {
  match bytes {
    [] => Ok(bytes),
    [u, tail @ ..] if u.is_ascii_whitespace() => Ok(tail),
    [b'#', tail @ ..] => {
      let mut it = tail.splitn(2, |&u| u == b'\n');
      drop(it.next());
      Ok(it.next().unwrap_or(&[]))
    }
    _ => Err(PpmError::CouldNotParseUnsigned),
  }
}

/// Parses the four header fields off the front of a pixel-map stream.
///
/// On success, [`header_len`](PpmHeader::header_len) is the exact offset of
/// the first payload byte: the parse consumes one delimiter after the max
/// value field and looks at nothing past it.
///
/// ## Failure
/// * `UnrecognizedTag` if the stream doesn't open with `P3` or `P6`.
/// * `CouldNotParseUnsigned` if a field isn't an ascii unsigned decimal.
/// * `WidthOrHeightZero` and `DimensionsTooLarge` for bad dimensions.
/// * `UnsupportedMaxValue` if the max channel value isn't 255.
#[inline]
pub fn ppm_parse_header(bytes: &[u8]) -> Result<PpmHeader, PpmError> {
  let (format, rest) = ppm_pull_tag(ppm_trim_comments_and_whitespace(bytes))?;
  let (width, rest) = ppm_read_ascii_unsigned(ppm_trim_comments_and_whitespace(rest))?;
  let (height, rest) = ppm_read_ascii_unsigned(ppm_trim_comments_and_whitespace(rest))?;
  let (max, rest) = ppm_read_ascii_unsigned(ppm_trim_comments_and_whitespace(rest))?;
  let rest = ppm_step_one_delimiter(rest)?;
  if width == 0 || height == 0 {
    return Err(PpmError::WidthOrHeightZero);
  }
  if width > MAX_DIMENSION || height > MAX_DIMENSION {
    return Err(PpmError::DimensionsTooLarge);
  }
  if max != 255 {
    return Err(PpmError::UnsupportedMaxValue(max));
  }
  Ok(PpmHeader { format, width, height, max, header_len: bytes.len() - rest.len() })
}

/// Decodes an ascii payload: `pixel_count` triples of decimal channel values.
fn ppm_decode_ascii_rgb8(payload: &[u8], pixel_count: usize) -> Result<Vec<u8>, PpmError> {
  let expected = pixel_count * 3;
  let mut pixels: Vec<u8> = Vec::with_capacity(expected);
  let mut it = PpmAsciiU8Iter::new(payload);
  while pixels.len() < expected {
    match it.next() {
      Some(Ok(u)) => pixels.push(u),
      Some(Err(e)) => return Err(e),
      None => return Err(PpmError::TruncatedPixelData { expected, found: pixels.len() }),
    }
  }
  Ok(pixels)
}

/// Decodes a binary payload: a verbatim copy of the promised byte count.
///
/// The length check is the load-bearing part. A truncated file hits the end
/// of the stream mid image, and that has to come out as an error rather than
/// a quietly short buffer.
fn ppm_decode_binary_rgb8(payload: &[u8], pixel_count: usize) -> Result<Vec<u8>, PpmError> {
  let expected = pixel_count * 3;
  if payload.len() < expected {
    return Err(PpmError::TruncatedPixelData { expected, found: payload.len() });
  }
  Ok(payload[..expected].to_vec())
}

/// Decodes a whole pixel-map stream into a [`Pixmap`].
///
/// This is [`ppm_parse_header`] followed by the payload decode for whichever
/// layout the tag declared. Bytes past the promised payload are ignored.
#[inline]
pub fn ppm_try_pixmap(bytes: &[u8]) -> Result<Pixmap, PpmError> {
  let header = ppm_parse_header(bytes)?;
  let payload = &bytes[header.header_len..];
  let pixel_count = (header.width as usize) * (header.height as usize);
  let pixels = match header.format {
    PpmFormat::P3 => ppm_decode_ascii_rgb8(payload, pixel_count)?,
    PpmFormat::P6 => ppm_decode_binary_rgb8(payload, pixel_count)?,
  };
  Pixmap::from_rgb8(header.width, header.height, pixels)
}
