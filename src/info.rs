use crate::decode::DecodeOptions;
use crate::error::IffError;
use crate::pbm::{self, BODY, CMAP, Compression, Masking};

/// Header-level information about a PBM file, obtained without decoding
/// pixel data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    pub planes: u8,
    pub masking: Masking,
    pub compression: Compression,
    /// Number of CMAP entries, 0 if there is no palette.
    pub palette_len: usize,
    pub has_body: bool,
}

impl ImageInfo {
    /// Inspect a file: validate the container, walk its chunks and decode BMHD.
    ///
    /// Unsupported variants (other plane counts, masking) are reported here
    /// rather than rejected, so callers can explain why a decode would fail.
    pub fn from_bytes(data: &[u8]) -> Result<Self, IffError> {
        let chunks = pbm::read_chunks(data, &DecodeOptions::default())?;
        let header = pbm::read_header(data, &chunks)?;
        Ok(Self {
            width: u32::from(header.width),
            height: u32::from(header.height),
            planes: header.planes,
            masking: header.masking,
            compression: header.compression,
            palette_len: chunks.get(&CMAP).map_or(0, |c| c.size as usize / 3),
            has_body: chunks.contains(&BODY),
        })
    }

    /// Whether [`crate::decode`] supports this variant.
    pub fn is_supported(&self) -> bool {
        self.planes == 8
            && self.masking == Masking::None
            && !matches!(self.compression, Compression::Unknown(_))
    }
}

/// Cheap magic check: `FORM` at offset 0 and a `PBM` form type at offset 8.
pub fn is_pbm(data: &[u8]) -> bool {
    data.len() >= 12 && &data[..4] == b"FORM" && &data[8..11] == b"PBM"
}
