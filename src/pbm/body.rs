//! BODY (pixel data) chunk.

use alloc::borrow::Cow;
use alloc::vec;

use enough::{Stop, Unstoppable};

use super::bmhd::{BitmapHeader, Compression};
use crate::byterun1;
use crate::decode::Permissiveness;
use crate::error::IffError;
use crate::limits::Limits;

/// Decode a BODY payload into one 8-bit index per pixel.
///
/// Uncompressed payloads are returned as-is (borrowed, `size` bytes long).
/// ByteRun1 payloads are expanded to exactly `width * height` bytes and must
/// be consumed exactly, otherwise [`IffError::ImageDataCorrupted`].
pub fn decode_body<'a>(
    payload: &'a [u8],
    size: u32,
    header: &BitmapHeader,
) -> Result<Cow<'a, [u8]>, IffError> {
    decode_body_with(
        payload,
        size,
        header,
        None,
        Permissiveness::Standard,
        &Unstoppable,
    )
}

pub(crate) fn decode_body_with<'a>(
    payload: &'a [u8],
    size: u32,
    header: &BitmapHeader,
    limits: Option<&Limits>,
    permissiveness: Permissiveness,
    stop: &dyn Stop,
) -> Result<Cow<'a, [u8]>, IffError> {
    let payload = payload
        .get(..size as usize)
        .ok_or(IffError::TruncatedFile)?;
    let expected = header.pixel_count();

    match header.compression {
        Compression::None => {
            if payload.len() != expected {
                if permissiveness == Permissiveness::Strict {
                    return Err(IffError::ImageDataCorrupted);
                }
                log::warn!(
                    "pbm: uncompressed BODY is {} bytes, expected {}x{} = {}",
                    payload.len(),
                    header.width,
                    header.height,
                    expected
                );
            }
            Ok(Cow::Borrowed(payload))
        }
        Compression::ByteRun1 => {
            if let Some(limits) = limits {
                limits.check_body_buffer(expected)?;
            }
            stop.check()?;
            let mut pixels = vec![0u8; expected];
            let consumed_all = byterun1::unpack_into(payload, &mut pixels, stop)?;
            if !consumed_all {
                return Err(IffError::ImageDataCorrupted);
            }
            log::debug!("pbm: ByteRun1 BODY {} -> {} bytes", payload.len(), expected);
            Ok(Cow::Owned(pixels))
        }
        Compression::Unknown(value) => Err(IffError::UnsupportedFeature {
            field: "compression",
            value: u32::from(value),
        }),
    }
}
