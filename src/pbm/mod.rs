//! IFF PBM: chunky 8-bit indexed bitmaps inside a `FORM` container.
//!
//! This is the variant Deluxe Paint wrote on the PC and that games such as
//! The Settlers II ship their artwork in. One byte per pixel, palette in
//! `CMAP`, pixel data in `BODY` either raw or ByteRun1-packed.
//!
//! Use top-level [`crate::decode`] or [`crate::DecodeRequest`].

mod bmhd;
mod body;
mod cmap;

pub use bmhd::{BMHD_SIZE, BitmapHeader, Compression, Masking, decode_bmhd};
pub use body::decode_body;
pub use cmap::{Palette, PaletteEntry, decode_cmap};

use alloc::borrow::Cow;
use enough::Stop;

use crate::decode::{DecodeOptions, DecodedImage, Permissiveness};
use crate::endian::Reader;
use crate::error::IffError;
use crate::iff::{self, ChunkId, ChunkInfo, ChunkMap};

pub const BMHD: ChunkId = ChunkId::from_raw(*b"BMHD");
pub const CMAP: ChunkId = ChunkId::from_raw(*b"CMAP");
pub const BODY: ChunkId = ChunkId::from_raw(*b"BODY");

/// `FORM` tag, form size and form type.
pub(crate) const PREAMBLE_LEN: usize = 12;

/// Validate the container preamble and return the declared form size.
pub(crate) fn parse_preamble(data: &[u8]) -> Result<u32, IffError> {
    if data.get(..4) != Some(&b"FORM"[..]) {
        return Err(IffError::NotAContainer);
    }
    let mut r = Reader::at(data, 4)?;
    let form_size = r.read_u32()?;
    let form_type = r.read_fixed_bytes::<4>()?;
    if &form_type[..3] != b"PBM" {
        return Err(IffError::UnknownFormat {
            found_tag: ChunkId::from_raw(form_type),
        });
    }
    Ok(form_size)
}

/// Preamble plus chunk walk, shared by decode and [`crate::ImageInfo`].
pub(crate) fn read_chunks(data: &[u8], options: &DecodeOptions) -> Result<ChunkMap, IffError> {
    let form_size = parse_preamble(data)?;
    iff::walk_with(data, PREAMBLE_LEN, form_size, options.duplicates)
}

fn payload<'a>(data: &'a [u8], info: &ChunkInfo) -> Result<&'a [u8], IffError> {
    info.payload(data).ok_or(IffError::TruncatedFile)
}

pub(crate) fn read_header(data: &[u8], chunks: &ChunkMap) -> Result<BitmapHeader, IffError> {
    let info = chunks.get(&BMHD).ok_or(IffError::MissingHeader)?;
    decode_bmhd(payload(data, info)?, info.size)
}

/// Reject well-formed files that use features outside 8-bit chunky pixels.
pub(crate) fn check_supported(header: &BitmapHeader) -> Result<(), IffError> {
    if header.planes != 8 {
        return Err(IffError::UnsupportedFeature {
            field: "planes",
            value: u32::from(header.planes),
        });
    }
    if header.masking != Masking::None {
        return Err(IffError::UnsupportedFeature {
            field: "masking",
            value: u32::from(header.masking.to_u8()),
        });
    }
    Ok(())
}

/// Decode a whole PBM file.
pub(crate) fn decode<'a>(
    data: &'a [u8],
    options: &DecodeOptions<'_>,
    stop: &dyn Stop,
) -> Result<DecodedImage<'a>, IffError> {
    let chunks = read_chunks(data, options)?;
    let header = read_header(data, &chunks)?;
    check_supported(&header)?;
    if let Some(limits) = options.limits {
        limits.check_header(&header)?;
    }
    stop.check()?;

    let palette = match chunks.get(&CMAP) {
        Some(info) => Some(decode_cmap(payload(data, info)?, info.size)),
        None => None,
    };

    let pixels = match chunks.get(&BODY) {
        Some(info) => body::decode_body_with(
            payload(data, info)?,
            info.size,
            &header,
            options.limits,
            options.permissiveness,
            stop,
        )?,
        None if options.permissiveness == Permissiveness::Strict => {
            return Err(IffError::MissingBody);
        }
        None => {
            log::warn!("pbm: no BODY chunk, returning empty image data");
            Cow::Borrowed(&[][..])
        }
    };

    log::debug!(
        "pbm: decoded {}x{} ({:?}), {} palette entries",
        header.width,
        header.height,
        header.compression,
        palette.as_ref().map_or(0, Palette::len)
    );

    Ok(DecodedImage::new(header, pixels, palette))
}
