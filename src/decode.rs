use alloc::borrow::Cow;
use alloc::vec::Vec;

use enough::Stop;

use crate::error::IffError;
use crate::iff::DuplicateChunks;
use crate::limits::Limits;
use crate::pbm::{BitmapHeader, Palette};
use crate::pixel::PixelLayout;

/// Controls how strictly the decoder validates input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Permissiveness {
    /// Additionally reject files without a BODY chunk and uncompressed
    /// bodies whose size is not exactly width * height.
    Strict,

    /// Default behavior. A missing BODY yields empty image data, and an
    /// uncompressed BODY is returned at whatever size it declares.
    #[default]
    Standard,
}

/// Decoder settings carried from [`DecodeRequest`] into the format code.
#[derive(Clone, Debug, Default)]
pub(crate) struct DecodeOptions<'a> {
    pub limits: Option<&'a Limits>,
    pub permissiveness: Permissiveness,
    pub duplicates: DuplicateChunks,
}

/// Builder for a decode operation.
///
/// ```no_run
/// use zeniff::{DecodeRequest, Limits, Permissiveness, Unstoppable};
///
/// let data: &[u8] = &[]; // your .lbm bytes
/// let limits = Limits { max_pixels: Some(4096 * 4096), ..Default::default() };
/// let image = DecodeRequest::new(data)
///     .with_limits(&limits)
///     .with_permissiveness(Permissiveness::Strict)
///     .decode(Unstoppable)?;
/// # Ok::<(), zeniff::IffError>(())
/// ```
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    options: DecodeOptions<'a>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            options: DecodeOptions::default(),
        }
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.options.limits = Some(limits);
        self
    }

    pub fn with_permissiveness(mut self, permissiveness: Permissiveness) -> Self {
        self.options.permissiveness = permissiveness;
        self
    }

    /// Which chunk wins when a tag is repeated. Defaults to the last one.
    pub fn with_duplicate_chunks(mut self, duplicates: DuplicateChunks) -> Self {
        self.options.duplicates = duplicates;
        self
    }

    pub fn decode(self, stop: impl Stop) -> Result<DecodedImage<'a>, IffError> {
        crate::pbm::decode(self.data, &self.options, &stop)
    }
}

/// Decoded PBM image: header, one palette index per pixel, optional palette.
///
/// Uncompressed pixel data and the palette are borrowed from the input;
/// ByteRun1 output is owned. Use [`DecodedImage::into_owned`] to detach
/// from the input buffer.
#[derive(Clone, Debug)]
pub struct DecodedImage<'a> {
    pub header: BitmapHeader,
    pixels: Cow<'a, [u8]>,
    palette: Option<Palette<'a>>,
}

impl<'a> DecodedImage<'a> {
    pub(crate) fn new(
        header: BitmapHeader,
        pixels: Cow<'a, [u8]>,
        palette: Option<Palette<'a>>,
    ) -> Self {
        Self {
            header,
            pixels,
            palette,
        }
    }

    pub fn width(&self) -> u32 {
        u32::from(self.header.width)
    }

    pub fn height(&self) -> u32 {
        u32::from(self.header.height)
    }

    /// Layout of [`DecodedImage::pixels`]. Always [`PixelLayout::Indexed8`];
    /// [`DecodedImage::to_rgb8`] produces [`PixelLayout::Rgb8`].
    pub fn layout(&self) -> PixelLayout {
        PixelLayout::Indexed8
    }

    /// Palette indices, row-major.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// The CMAP palette, if the file had one.
    pub fn palette(&self) -> Option<&Palette<'a>> {
        self.palette.as_ref()
    }

    /// Take ownership of pixel and palette data (copies if borrowed).
    pub fn into_owned(self) -> DecodedImage<'static> {
        DecodedImage {
            header: self.header,
            pixels: Cow::Owned(self.pixels.into_owned()),
            palette: self.palette.map(Palette::into_owned),
        }
    }

    /// Whether the pixel data is borrowed (zero-copy from input).
    pub fn is_borrowed(&self) -> bool {
        matches!(self.pixels, Cow::Borrowed(_))
    }

    /// Expand indices through the palette into packed RGB8
    /// ([`PixelLayout::Rgb8`]). Indices past the end of the palette map to
    /// black.
    pub fn to_rgb8(&self) -> Result<Vec<u8>, IffError> {
        let palette = self.palette().ok_or(IffError::UnsupportedFeature {
            field: "palette",
            value: 0,
        })?;
        let colors = palette.as_bytes();
        let bpp = PixelLayout::Rgb8.bytes_per_pixel();
        let mut out = Vec::with_capacity(self.pixels.len() * bpp);
        for &index in self.pixels.iter() {
            let start = usize::from(index) * 3;
            match colors.get(start..start + 3) {
                Some(rgb) => out.extend_from_slice(rgb),
                None => out.extend_from_slice(&[0, 0, 0]),
            }
        }
        Ok(out)
    }

    #[cfg(feature = "imgref")]
    fn check_full_plane(&self) -> Result<(), IffError> {
        if self.pixels.len() != self.header.pixel_count() {
            return Err(IffError::ImageDataCorrupted);
        }
        Ok(())
    }

    /// Zero-copy view of the index plane as an [`imgref::ImgRef`].
    ///
    /// Returns [`IffError::ImageDataCorrupted`] if the pixel data is not
    /// exactly `width * height` bytes (possible for uncompressed bodies in
    /// [`Permissiveness::Standard`] mode).
    #[cfg(feature = "imgref")]
    pub fn as_imgref(&self) -> Result<imgref::ImgRef<'_, u8>, IffError> {
        self.check_full_plane()?;
        Ok(imgref::ImgRef::new(
            self.pixels(),
            usize::from(self.header.width),
            usize::from(self.header.height),
        ))
    }

    /// Palette-expanded [`imgref::ImgVec`] of RGB8 pixels.
    #[cfg(feature = "imgref")]
    pub fn to_rgb_imgvec(&self) -> Result<imgref::ImgVec<rgb::RGB8>, IffError> {
        self.check_full_plane()?;
        let rgb: Vec<rgb::RGB8> = self
            .to_rgb8()?
            .chunks_exact(3)
            .map(|c| rgb::RGB8::new(c[0], c[1], c[2]))
            .collect();
        Ok(imgref::ImgVec::new(
            rgb,
            usize::from(self.header.width),
            usize::from(self.header.height),
        ))
    }
}
