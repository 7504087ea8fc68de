//! Synthetic PBM construction shared by the integration tests.

#![allow(dead_code)]

/// Test-only ByteRun1 packer: replicate runs for 2+ equal bytes, literal
/// runs otherwise, never longer than 128.
pub fn pack_byte_run_1(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    let mut i = 0;
    while i < data.len() {
        let mut run = 1;
        while i + run < data.len() && data[i + run] == data[i] && run < 128 {
            run += 1;
        }
        if run >= 2 {
            out.push((1 - run as i16) as i8 as u8);
            out.push(data[i]);
            i += run;
        } else {
            let start = i;
            while i < data.len() && i - start < 128 {
                if i + 1 < data.len() && data[i] == data[i + 1] {
                    break;
                }
                i += 1;
            }
            out.push((i - start - 1) as u8);
            out.extend_from_slice(&data[start..i]);
        }
    }
    out
}

pub fn chunk(out: &mut Vec<u8>, tag: &[u8; 4], payload: &[u8]) {
    out.extend_from_slice(tag);
    out.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    out.extend_from_slice(payload);
    if payload.len() % 2 == 1 {
        out.push(0);
    }
}

pub fn bmhd(width: u16, height: u16, planes: u8, masking: u8, compression: u8) -> [u8; 20] {
    let mut h = [0u8; 20];
    h[0..2].copy_from_slice(&width.to_be_bytes());
    h[2..4].copy_from_slice(&height.to_be_bytes());
    h[8] = planes;
    h[9] = masking;
    h[10] = compression;
    h[14] = 5; // x aspect
    h[15] = 6; // y aspect
    h[16..18].copy_from_slice(&(width as i16).to_be_bytes());
    h[18..20].copy_from_slice(&(height as i16).to_be_bytes());
    h
}

/// 256-entry grayscale-ish palette.
pub fn ramp_palette() -> Vec<u8> {
    (0..=255u8).flat_map(|i| [i, 255 - i, i / 2]).collect()
}

/// Wrap a chunk sequence into `FORM <size> PBM `.
pub fn form(form_type: &[u8; 4], chunks: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(chunks.len() + 12);
    out.extend_from_slice(b"FORM");
    out.extend_from_slice(&(chunks.len() as u32 + 4).to_be_bytes());
    out.extend_from_slice(form_type);
    out.extend_from_slice(chunks);
    out
}

/// Complete PBM file. `compress` chooses ByteRun1 or raw BODY.
pub fn pbm_file(width: u16, height: u16, pixels: &[u8], palette: Option<&[u8]>, compress: bool) -> Vec<u8> {
    let mut chunks = Vec::new();
    chunk(&mut chunks, b"BMHD", &bmhd(width, height, 8, 0, u8::from(compress)));
    if let Some(palette) = palette {
        chunk(&mut chunks, b"CMAP", palette);
    }
    if compress {
        chunk(&mut chunks, b"BODY", &pack_byte_run_1(pixels));
    } else {
        chunk(&mut chunks, b"BODY", pixels);
    }
    form(b"PBM ", &chunks)
}
