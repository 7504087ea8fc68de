//! BMHD (bitmap header) chunk.

use crate::endian::Reader;
use crate::error::IffError;

/// Size of the BMHD payload in bytes.
pub const BMHD_SIZE: u32 = 20;

/// BMHD masking technique.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Masking {
    None,
    HasMask,
    HasTransparentColor,
    Lasso,
    Unknown(u8),
}

impl Masking {
    pub fn from_u8(v: u8) -> Self {
        match v {
            0 => Self::None,
            1 => Self::HasMask,
            2 => Self::HasTransparentColor,
            3 => Self::Lasso,
            other => Self::Unknown(other),
        }
    }

    pub fn to_u8(self) -> u8 {
        match self {
            Self::None => 0,
            Self::HasMask => 1,
            Self::HasTransparentColor => 2,
            Self::Lasso => 3,
            Self::Unknown(v) => v,
        }
    }
}

/// BMHD compression scheme for the BODY chunk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Compression {
    None,
    ByteRun1,
    Unknown(u8),
}

impl Compression {
    pub fn from_u8(v: u8) -> Self {
        match v {
            0 => Self::None,
            1 => Self::ByteRun1,
            other => Self::Unknown(other),
        }
    }

    pub fn to_u8(self) -> u8 {
        match self {
            Self::None => 0,
            Self::ByteRun1 => 1,
            Self::Unknown(v) => v,
        }
    }
}

/// Decoded BMHD chunk. All fields are in native byte order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BitmapHeader {
    pub width: u16,
    pub height: u16,
    pub x_origin: i16,
    pub y_origin: i16,
    pub planes: u8,
    pub masking: Masking,
    pub compression: Compression,
    pub flags: u8,
    pub transparent_color: u16,
    pub x_aspect: u8,
    pub y_aspect: u8,
    pub page_width: i16,
    pub page_height: i16,
}

impl BitmapHeader {
    /// Number of bytes in one 8-bit index plane.
    pub fn pixel_count(&self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

/// Decode a BMHD payload.
///
/// `size` is the declared chunk size; anything past the first 20 bytes is
/// ignored. Does not check `planes` or `masking`.
pub fn decode_bmhd(payload: &[u8], size: u32) -> Result<BitmapHeader, IffError> {
    if size < BMHD_SIZE {
        return Err(IffError::TruncatedFile);
    }
    let mut r = Reader::new(payload);
    Ok(BitmapHeader {
        width: r.read_u16()?,
        height: r.read_u16()?,
        x_origin: r.read_i16()?,
        y_origin: r.read_i16()?,
        planes: r.read_u8()?,
        masking: Masking::from_u8(r.read_u8()?),
        compression: Compression::from_u8(r.read_u8()?),
        flags: r.read_u8()?,
        transparent_color: r.read_u16()?,
        x_aspect: r.read_u8()?,
        y_aspect: r.read_u8()?,
        page_width: r.read_i16()?,
        page_height: r.read_i16()?,
    })
}
