use super::{ppm_read_ascii_unsigned, ppm_trim_comments_and_whitespace};
use crate::error::PpmError;

/// Parses u8 ascii entries.
///
/// The iterator itself doesn't know how many entries the image needs, it just
/// keeps yielding values until the bytes run out. The decoder checks the
/// count.
pub struct PpmAsciiU8Iter<'b> {
  spare: &'b [u8],
}
impl<'b> PpmAsciiU8Iter<'b> {
  pub fn new(bytes: &'b [u8]) -> Self {
    Self { spare: ppm_trim_comments_and_whitespace(bytes) }
  }
}
impl<'b> core::iter::Iterator for PpmAsciiU8Iter<'b> {
  type Item = Result<u8, PpmError>;
  fn next(&mut self) -> Option<Self::Item> {
    if self.spare.is_empty() {
      return None;
    }
    match ppm_read_ascii_unsigned(self.spare) {
      Ok((u, rest)) => {
        self.spare = ppm_trim_comments_and_whitespace(rest);
        if u <= (u8::MAX as u32) {
          Some(Ok(u as u8))
        } else {
          Some(Err(PpmError::IntegerExceedsMaxValue))
        }
      }
      Err(e) => Some(Err(e)),
    }
  }
}
