use alloc::string::String;
use enough::StopReason;

use crate::iff::ChunkId;

/// Errors from IFF PBM decoding.
///
/// Every variant is recoverable by the caller. Structural problems with the
/// container (`NotAContainer`, `TruncatedFile`, `CorruptedChunkSize`, ...) are
/// kept apart from [`IffError::UnsupportedFeature`], which means the file is
/// well-formed but uses a variant this decoder does not implement.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum IffError {
    #[error("not an IFF container (missing FORM magic)")]
    NotAContainer,

    #[error("unknown IFF form type {found_tag}")]
    UnknownFormat { found_tag: ChunkId },

    #[error("unexpected end of file")]
    TruncatedFile,

    #[error("chunk {tag} declares size {size}, larger than its container")]
    CorruptedChunkSize { tag: ChunkId, size: u32 },

    #[error("missing BMHD chunk")]
    MissingHeader,

    #[error("missing BODY chunk")]
    MissingBody,

    #[error("unsupported {field}: {value}")]
    UnsupportedFeature { field: &'static str, value: u32 },

    #[error("image data corrupted")]
    ImageDataCorrupted,

    #[error("ByteRun1 stream ended before the image was filled")]
    TruncatedInput,

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for IffError {
    fn from(r: StopReason) -> Self {
        IffError::Cancelled(r)
    }
}
