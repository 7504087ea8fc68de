//! ByteRun1 run-length decompression, as used by IFF ILBM and PBM bodies.
//!
//! The stream is a sequence of signed control bytes `n`:
//!
//! - `0..=127`: copy the next `n + 1` bytes literally.
//! - `-127..=-1`: repeat the next byte `1 - n` times.
//! - `-128`: no-op.
//!
//! Expansion stops as soon as the output is full, even in the middle of a
//! run. Callers use the "consumed exactly" flag to detect streams that are
//! longer than the image they describe.

use alloc::vec;
use alloc::vec::Vec;

use enough::{Stop, Unstoppable};

use crate::error::IffError;

/// Result of [`unpack`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Unpacked {
    /// Decompressed bytes, always exactly the requested capacity.
    pub data: Vec<u8>,
    /// Whether the input cursor ended exactly at the end of the input.
    pub consumed_all: bool,
}

/// Expand `input` into a freshly allocated buffer of `capacity` bytes.
///
/// Fails with [`IffError::TruncatedInput`] if `input` runs out before
/// `capacity` bytes were produced.
pub fn unpack(input: &[u8], capacity: usize) -> Result<Unpacked, IffError> {
    let mut data = vec![0u8; capacity];
    let consumed_all = unpack_into(input, &mut data, &Unstoppable)?;
    Ok(Unpacked { data, consumed_all })
}

/// Expand `input` until `out` is full.
///
/// Returns `true` when the last byte read was the last byte of `input`.
pub fn unpack_into(input: &[u8], out: &mut [u8], stop: &dyn Stop) -> Result<bool, IffError> {
    let mut src = 0usize;
    let mut dst = 0usize;
    let mut check_counter = 0u32;

    while dst < out.len() {
        check_counter += 1;
        if check_counter % 1024 == 0 {
            stop.check()?;
        }

        let n = *input.get(src).ok_or(IffError::TruncatedInput)? as i8;
        src += 1;
        let remaining = out.len() - dst;

        match n {
            -128 => {}
            0..=127 => {
                let take = (n as usize + 1).min(remaining);
                let literal = input
                    .get(src..src + take)
                    .ok_or(IffError::TruncatedInput)?;
                out[dst..dst + take].copy_from_slice(literal);
                src += take;
                dst += take;
            }
            _ => {
                let value = *input.get(src).ok_or(IffError::TruncatedInput)?;
                src += 1;
                let take = (1 - isize::from(n)) as usize;
                let take = take.min(remaining);
                out[dst..dst + take].fill(value);
                dst += take;
            }
        }
    }

    Ok(src == input.len())
}
