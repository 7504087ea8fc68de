//! # zeniff
//!
//! Decoder for IFF PBM images: the chunky 8-bit indexed variant of IFF
//! bitmaps written by Deluxe Paint on the PC and used for the artwork of
//! games such as The Settlers II.
//!
//! ## Supported
//!
//! - `FORM` containers with a `PBM ` form type
//! - `BMHD` with 8 planes and no masking
//! - `BODY` uncompressed or ByteRun1-compressed
//! - optional `CMAP` palette
//!
//! ## Zero-Copy Decoding
//!
//! Uncompressed pixel data and the palette are returned as slices borrowed
//! from the input buffer. ByteRun1 bodies are expanded into an owned buffer.
//!
//! ## Non-Goals
//!
//! - ILBM (planar) images and any plane count other than 8
//! - Masks and transparent-color masking
//! - Encoding
//!
//! ## Usage
//!
//! ```no_run
//! use zeniff::{ImageInfo, decode};
//!
//! let data: &[u8] = &[]; // your .lbm bytes
//!
//! // Header info without decoding
//! let info = ImageInfo::from_bytes(data)?;
//! println!("{}x{} {:?}", info.width, info.height, info.compression);
//!
//! let image = decode(data)?;
//! let indices = image.pixels();
//! let rgb = image.to_rgb8()?;
//! # let _ = (indices, rgb);
//! # Ok::<(), zeniff::IffError>(())
//! ```

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod decode;
mod endian;
mod error;
mod info;
mod limits;
mod pixel;

pub mod byterun1;
pub mod iff;
pub mod pbm;

// Re-exports
pub use decode::{DecodeRequest, DecodedImage, Permissiveness};
pub use enough::{Stop, StopReason, Unstoppable};
pub use error::IffError;
pub use iff::{ChunkId, ChunkInfo, ChunkMap, DuplicateChunks};
pub use info::{ImageInfo, is_pbm};
pub use limits::Limits;
pub use pbm::{BitmapHeader, Compression, Masking, Palette, PaletteEntry};
pub use pixel::PixelLayout;

/// Decode an IFF PBM file with default settings.
///
/// Returns the header, one palette index per pixel and the palette (if
/// present), or the first error encountered.
pub fn decode(data: &[u8]) -> Result<DecodedImage<'_>, IffError> {
    DecodeRequest::new(data).decode(Unstoppable)
}

/// Decode with cancellation support.
pub fn decode_with_stop(data: &[u8], stop: impl Stop) -> Result<DecodedImage<'_>, IffError> {
    DecodeRequest::new(data).decode(stop)
}
