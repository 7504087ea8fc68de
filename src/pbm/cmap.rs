//! CMAP (color map) chunk.

use alloc::borrow::Cow;

#[cfg(feature = "rgb")]
use rgb::AsPixels as _;

/// One RGB palette entry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PaletteEntry {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl From<[u8; 3]> for PaletteEntry {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

#[cfg(feature = "rgb")]
impl From<PaletteEntry> for rgb::RGB8 {
    fn from(e: PaletteEntry) -> Self {
        rgb::RGB8::new(e.r, e.g, e.b)
    }
}

#[cfg(feature = "rgb")]
impl From<rgb::RGB8> for PaletteEntry {
    fn from(c: rgb::RGB8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
        }
    }
}

/// Ordered palette. Bytes are borrowed from the CMAP payload when possible.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette<'a> {
    bytes: Cow<'a, [u8]>,
}

impl<'a> Palette<'a> {
    /// Packed `r, g, b` bytes, three per entry.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<PaletteEntry> {
        let start = index.checked_mul(3)?;
        let rgb = self.bytes.get(start..start.checked_add(3)?)?;
        Some(PaletteEntry {
            r: rgb[0],
            g: rgb[1],
            b: rgb[2],
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = PaletteEntry> + '_ {
        self.bytes
            .chunks_exact(3)
            .map(|c| PaletteEntry {
                r: c[0],
                g: c[1],
                b: c[2],
            })
    }

    /// Zero-copy typed view.
    #[cfg(feature = "rgb")]
    pub fn as_rgb8(&self) -> &[rgb::RGB8] {
        self.bytes.as_pixels()
    }

    /// Take ownership of the palette bytes (copies if borrowed).
    pub fn into_owned(self) -> Palette<'static> {
        Palette {
            bytes: Cow::Owned(self.bytes.into_owned()),
        }
    }
}

/// Decode a CMAP payload into `size / 3` entries. A trailing partial
/// triplet is dropped.
pub fn decode_cmap(payload: &[u8], size: u32) -> Palette<'_> {
    let len = payload.len().min(size as usize);
    let len = len - len % 3;
    Palette {
        bytes: Cow::Borrowed(&payload[..len]),
    }
}
