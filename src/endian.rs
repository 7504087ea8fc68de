//! Big-endian field decoding.
//!
//! IFF stores every multi-byte number most-significant byte first. All form
//! sizes, chunk sizes and BMHD fields go through these helpers so nothing is
//! left in file byte order.

use crate::error::IffError;

#[inline]
pub(crate) fn u16_be(b: [u8; 2]) -> u16 {
    u16::from_be_bytes(b)
}

#[inline]
pub(crate) fn i16_be(b: [u8; 2]) -> i16 {
    i16::from_be_bytes(b)
}

#[inline]
pub(crate) fn u32_be(b: [u8; 4]) -> u32 {
    u32::from_be_bytes(b)
}

/// Bounds-checked cursor over a byte slice. Reads past the end fail with
/// [`IffError::TruncatedFile`].
pub(crate) struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Start reading at `pos`; fails if `pos` is past the end.
    pub(crate) fn at(data: &'a [u8], pos: usize) -> Result<Self, IffError> {
        if pos > data.len() {
            return Err(IffError::TruncatedFile);
        }
        Ok(Self { data, pos })
    }

    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    pub(crate) fn read_fixed_bytes<const N: usize>(&mut self) -> Result<[u8; N], IffError> {
        let end = self.pos.checked_add(N).ok_or(IffError::TruncatedFile)?;
        let bytes = self
            .data
            .get(self.pos..end)
            .ok_or(IffError::TruncatedFile)?;
        let mut buf = [0u8; N];
        buf.copy_from_slice(bytes);
        self.pos = end;
        Ok(buf)
    }

    pub(crate) fn read_u8(&mut self) -> Result<u8, IffError> {
        let [b] = self.read_fixed_bytes::<1>()?;
        Ok(b)
    }

    pub(crate) fn read_u16(&mut self) -> Result<u16, IffError> {
        self.read_fixed_bytes::<2>().map(u16_be)
    }

    pub(crate) fn read_i16(&mut self) -> Result<i16, IffError> {
        self.read_fixed_bytes::<2>().map(i16_be)
    }

    pub(crate) fn read_u32(&mut self) -> Result<u32, IffError> {
        self.read_fixed_bytes::<4>().map(u32_be)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_are_big_endian() {
        assert_eq!(u16_be([0x02, 0x80]), 640);
        assert_eq!(i16_be([0xFF, 0xFE]), -2);
        assert_eq!(u32_be([0x00, 0x01, 0x2C, 0x08]), 76808);
    }

    #[test]
    fn reader_reports_truncation() {
        let mut r = Reader::new(&[0x01, 0xE0, 0x00]);
        assert_eq!(r.read_u16().unwrap(), 480);
        assert_eq!(r.position(), 2);
        assert!(matches!(r.read_u16(), Err(IffError::TruncatedFile)));
        assert_eq!(r.read_u8().unwrap(), 0);
        assert!(matches!(r.read_u8(), Err(IffError::TruncatedFile)));
    }

    #[test]
    fn reader_at_past_end_fails() {
        assert!(Reader::at(&[0u8; 4], 4).is_ok());
        assert!(matches!(Reader::at(&[0u8; 4], 5), Err(IffError::TruncatedFile)));
    }
}
