use crate::error::IffError;
use crate::pbm::BitmapHeader;

/// Resource limits for decode operations.
///
/// All fields default to `None` (no limit). Dimension limits are checked
/// against the BMHD before any BODY work starts.
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u16>,
    pub max_height: Option<u16>,
    /// Maximum `width * height`.
    pub max_pixels: Option<u64>,
    /// Maximum size of the index buffer allocated for a ByteRun1 BODY.
    ///
    /// Uncompressed bodies are borrowed from the input and never count
    /// against this. Neither does the 3-bytes-per-pixel buffer built by
    /// [`DecodedImage::to_rgb8`](crate::DecodedImage::to_rgb8).
    pub max_memory_bytes: Option<u64>,
}

fn exceeded(what: &str, value: u64, max: u64) -> IffError {
    IffError::LimitExceeded(alloc::format!("{what} {value} is over the limit of {max}"))
}

impl Limits {
    pub(crate) fn check_header(&self, header: &BitmapHeader) -> Result<(), IffError> {
        if let Some(max) = self.max_width.filter(|&max| header.width > max) {
            return Err(exceeded("BMHD width", header.width.into(), max.into()));
        }
        if let Some(max) = self.max_height.filter(|&max| header.height > max) {
            return Err(exceeded("BMHD height", header.height.into(), max.into()));
        }
        let pixels = u64::from(header.width) * u64::from(header.height);
        if let Some(max) = self.max_pixels.filter(|&max| pixels > max) {
            return Err(exceeded("pixel count", pixels, max));
        }
        Ok(())
    }

    /// Check the size of the ByteRun1 output buffer before allocating it.
    pub(crate) fn check_body_buffer(&self, bytes: usize) -> Result<(), IffError> {
        let bytes = bytes as u64;
        match self.max_memory_bytes.filter(|&max| bytes > max) {
            Some(max) => Err(exceeded("ByteRun1 buffer of", bytes, max)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pbm::{Compression, Masking};

    fn header(width: u16, height: u16) -> BitmapHeader {
        BitmapHeader {
            width,
            height,
            x_origin: 0,
            y_origin: 0,
            planes: 8,
            masking: Masking::None,
            compression: Compression::ByteRun1,
            flags: 0,
            transparent_color: 0,
            x_aspect: 1,
            y_aspect: 1,
            page_width: width as i16,
            page_height: height as i16,
        }
    }

    #[test]
    fn default_is_unlimited() {
        let limits = Limits::default();
        assert!(limits.check_header(&header(u16::MAX, u16::MAX)).is_ok());
        assert!(limits.check_body_buffer(usize::MAX).is_ok());
    }

    #[test]
    fn dimension_limits_are_inclusive() {
        let limits = Limits {
            max_width: Some(320),
            max_height: Some(200),
            ..Default::default()
        };
        assert!(limits.check_header(&header(320, 200)).is_ok());
        assert!(matches!(
            limits.check_header(&header(321, 200)),
            Err(IffError::LimitExceeded(_))
        ));
        assert!(matches!(
            limits.check_header(&header(320, 201)),
            Err(IffError::LimitExceeded(_))
        ));
    }

    #[test]
    fn pixel_count_limit() {
        let limits = Limits {
            max_pixels: Some(100),
            ..Default::default()
        };
        assert!(limits.check_header(&header(10, 10)).is_ok());
        assert!(matches!(
            limits.check_header(&header(10, 11)),
            Err(IffError::LimitExceeded(_))
        ));
    }

    #[test]
    fn pixel_count_of_largest_header_does_not_wrap() {
        let limits = Limits {
            max_pixels: Some(u64::from(u16::MAX) * u64::from(u16::MAX) - 1),
            ..Default::default()
        };
        assert!(limits.check_header(&header(u16::MAX, u16::MAX)).is_err());
    }

    #[test]
    fn body_buffer_message_names_sizes() {
        let limits = Limits {
            max_memory_bytes: Some(1024),
            ..Default::default()
        };
        assert!(limits.check_body_buffer(1024).is_ok());
        match limits.check_body_buffer(4096) {
            Err(IffError::LimitExceeded(msg)) => {
                assert!(msg.contains("4096") && msg.contains("1024"), "{msg}");
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
