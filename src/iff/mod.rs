//! Generic IFF chunk walking.
//!
//! An IFF file is a `FORM` container holding a sequence of chunks. Each
//! chunk is a 4-byte tag, a big-endian 32-bit payload size, and the payload,
//! padded to an even length. [`walk`] scans that sequence and records where
//! every payload lives without copying anything.

use alloc::collections::BTreeMap;
use core::fmt;

use crate::endian::Reader;
use crate::error::IffError;

/// A chunk tag, normalized to its leading ASCII alphanumeric characters.
///
/// Tags such as `"PBM "` or `"BB\0\0"` are padded with spaces or NULs in the
/// file; the padding is dropped so `"PBM "` compares equal to `"PBM"`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkId {
    bytes: [u8; 4],
    len: u8,
}

impl ChunkId {
    pub const FORM: ChunkId = ChunkId::from_raw(*b"FORM");

    /// Normalize a raw 4-byte tag field.
    pub const fn from_raw(raw: [u8; 4]) -> Self {
        let mut bytes = [0u8; 4];
        let mut len = 0;
        while len < 4 && raw[len].is_ascii_alphanumeric() {
            bytes[len] = raw[len];
            len += 1;
        }
        Self {
            bytes,
            len: len as u8,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..usize::from(self.len)]
    }

    pub fn as_str(&self) -> &str {
        // Only ASCII alphanumerics are ever stored.
        core::str::from_utf8(self.as_bytes()).unwrap_or_default()
    }
}

impl fmt::Display for ChunkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for ChunkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChunkId({:?})", self.as_str())
    }
}

/// Location of one chunk's payload within the file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChunkInfo {
    pub id: ChunkId,
    /// Absolute offset of the first payload byte.
    pub offset: usize,
    /// Declared payload length, excluding the pad byte.
    pub size: u32,
}

impl ChunkInfo {
    /// Borrow the payload bytes out of `data`.
    pub fn payload<'a>(&self, data: &'a [u8]) -> Option<&'a [u8]> {
        data.get(self.offset..self.offset.checked_add(self.size as usize)?)
    }
}

/// Which occurrence wins when a tag appears more than once.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DuplicateChunks {
    /// Later chunks overwrite earlier ones.
    #[default]
    Last,
    /// The first chunk with a tag is kept; later ones are ignored.
    First,
}

/// Chunks discovered by [`walk`], keyed by tag.
#[derive(Clone, Debug, Default)]
pub struct ChunkMap {
    chunks: BTreeMap<ChunkId, ChunkInfo>,
}

impl ChunkMap {
    pub fn get(&self, id: &ChunkId) -> Option<&ChunkInfo> {
        self.chunks.get(id)
    }

    pub fn contains(&self, id: &ChunkId) -> bool {
        self.chunks.contains_key(id)
    }

    /// Payload of chunk `id`, borrowed from `data`.
    pub fn payload<'a>(&self, data: &'a [u8], id: &ChunkId) -> Option<&'a [u8]> {
        self.get(id)?.payload(data)
    }

    /// Chunks in tag order.
    pub fn iter(&self) -> impl Iterator<Item = &ChunkInfo> {
        self.chunks.values()
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    fn insert(&mut self, info: ChunkInfo, duplicates: DuplicateChunks) {
        match self.chunks.get(&info.id) {
            Some(prev) => {
                log::warn!(
                    "iff: duplicate {} chunk at offset {} (previous at {})",
                    info.id,
                    info.offset,
                    prev.offset
                );
                if duplicates == DuplicateChunks::Last {
                    self.chunks.insert(info.id, info);
                }
            }
            None => {
                self.chunks.insert(info.id, info);
            }
        }
    }
}

/// Walk the chunks of a form body, last occurrence of a tag winning.
///
/// `start_offset` is where the first chunk header begins and
/// `declared_form_size` is the size field of the enclosing `FORM`, which
/// counts the 4-byte form type preceding `start_offset`.
pub fn walk(data: &[u8], start_offset: usize, declared_form_size: u32) -> Result<ChunkMap, IffError> {
    walk_with(data, start_offset, declared_form_size, DuplicateChunks::Last)
}

/// [`walk`] with an explicit duplicate-tag policy.
pub fn walk_with(
    data: &[u8],
    start_offset: usize,
    declared_form_size: u32,
    duplicates: DuplicateChunks,
) -> Result<ChunkMap, IffError> {
    let end = start_offset.saturating_add((declared_form_size as usize).saturating_sub(4));
    let mut map = ChunkMap::default();
    let mut offset = start_offset;

    while offset < end {
        let mut r = Reader::at(data, offset)?;
        let raw = r.read_fixed_bytes::<4>()?;
        let size = r.read_u32()?;
        let id = ChunkId::from_raw(raw);
        if id.as_bytes() != raw {
            log::trace!("iff: normalized tag {raw:?} to {id}");
        }

        if size > declared_form_size {
            return Err(IffError::CorruptedChunkSize { tag: id, size });
        }

        let payload = r.position();
        let payload_end = payload
            .checked_add(size as usize)
            .ok_or(IffError::TruncatedFile)?;
        if payload_end > data.len() {
            return Err(IffError::TruncatedFile);
        }

        log::debug!("iff: chunk {id} at {payload}, {size} bytes");
        map.insert(
            ChunkInfo {
                id,
                offset: payload,
                size,
            },
            duplicates,
        );

        // Odd payloads are followed by one pad byte.
        offset = payload_end + (size as usize % 2);
    }

    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn chunk(out: &mut Vec<u8>, tag: &[u8; 4], payload: &[u8]) {
        out.extend_from_slice(tag);
        out.extend_from_slice(&(payload.len() as u32).to_be_bytes());
        out.extend_from_slice(payload);
        if payload.len() % 2 == 1 {
            out.push(0);
        }
    }

    #[test]
    fn tag_normalization() {
        assert_eq!(ChunkId::from_raw(*b"PBM ").as_str(), "PBM");
        assert_eq!(ChunkId::from_raw(*b"BB\0\0").as_str(), "BB");
        assert_eq!(ChunkId::from_raw(*b"A\0BC").as_str(), "A");
        assert_eq!(ChunkId::from_raw(*b"\0BMH").as_str(), "");
        assert_eq!(ChunkId::from_raw(*b"BB\0\0"), ChunkId::from_raw(*b"BB  "));
        assert_eq!(ChunkId::FORM.to_string(), "FORM");
    }

    #[test]
    fn even_then_odd_chunk_layout() {
        let mut data = Vec::new();
        chunk(&mut data, b"AAAA", &[1, 2, 3, 4]);
        chunk(&mut data, b"BB\0\0", &[5, 6, 7]);
        chunk(&mut data, b"CCCC", &[8, 9]);
        // 4 bytes of form type precede the chunks in a real FORM.
        let form_size = data.len() as u32 + 4;

        let map = walk(&data, 0, form_size).unwrap();
        assert_eq!(map.len(), 3);

        let a = map.get(&ChunkId::from_raw(*b"AAAA")).unwrap();
        assert_eq!((a.offset, a.size), (8, 4));

        // Second header directly after the even-sized first payload.
        let b = map.get(&ChunkId::from_raw(*b"BB\0\0")).unwrap();
        assert_eq!((b.offset, b.size), (8 + 4 + 8, 3));
        assert_eq!(b.payload(&data).unwrap(), &[5, 6, 7]);

        // Pad byte after the odd payload is skipped.
        let c = map.get(&ChunkId::from_raw(*b"CCCC")).unwrap();
        assert_eq!(c.offset, 20 + 3 + 1 + 8);
        assert_eq!(map.payload(&data, &c.id).unwrap(), &[8, 9]);
    }

    #[test]
    fn chunk_larger_than_form_is_corrupted() {
        let mut data = Vec::new();
        data.extend_from_slice(b"BODY");
        data.extend_from_slice(&1000u32.to_be_bytes());
        data.extend_from_slice(&[0u8; 16]);

        match walk(&data, 0, 24) {
            Err(IffError::CorruptedChunkSize { tag, size }) => {
                assert_eq!(tag.as_str(), "BODY");
                assert_eq!(size, 1000);
            }
            other => panic!("expected CorruptedChunkSize, got {other:?}"),
        }
    }

    #[test]
    fn truncated_chunk_header() {
        let data = b"BODY\0\0";
        assert!(matches!(walk(data, 0, 100), Err(IffError::TruncatedFile)));
    }

    #[test]
    fn payload_past_end_of_file() {
        let mut data = Vec::new();
        data.extend_from_slice(b"CMAP");
        data.extend_from_slice(&30u32.to_be_bytes());
        data.extend_from_slice(&[0u8; 6]);
        assert!(matches!(walk(&data, 0, 100), Err(IffError::TruncatedFile)));
    }

    #[test]
    fn empty_form() {
        let map = walk(&[], 0, 4).unwrap();
        assert!(map.is_empty());
        let map = walk(&[], 0, 0).unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn duplicate_policies() {
        let mut data = Vec::new();
        chunk(&mut data, b"CMAP", &[1, 1, 1]);
        chunk(&mut data, b"CMAP", &[2, 2, 2, 2, 2, 2]);
        let form_size = data.len() as u32 + 4;
        let id = ChunkId::from_raw(*b"CMAP");

        let last = walk_with(&data, 0, form_size, DuplicateChunks::Last).unwrap();
        assert_eq!(last.len(), 1);
        assert_eq!(last.get(&id).unwrap().size, 6);

        let first = walk_with(&data, 0, form_size, DuplicateChunks::First).unwrap();
        assert_eq!(first.get(&id).unwrap().size, 3);
        assert_eq!(first.payload(&data, &id).unwrap(), &[1, 1, 1]);
    }

    #[test]
    fn walk_respects_start_offset() {
        let mut data = b"FORM\0\0\0\0PBM ".to_vec();
        chunk(&mut data, b"TINY", &[0; 2]);
        let form_size = data.len() as u32 - 8;
        let map = walk(&data, 12, form_size).unwrap();
        assert_eq!(map.get(&ChunkId::from_raw(*b"TINY")).unwrap().offset, 20);
    }
}
