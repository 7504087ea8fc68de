#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn chunk(out: &mut Vec<u8>, tag: &[u8; 4], payload: &[u8]) {
    out.extend_from_slice(tag);
    out.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    out.extend_from_slice(payload);
    if payload.len() % 2 == 1 {
        out.push(0);
    }
}

fn pbm(width: u16, height: u16, compression: u8, cmap: &[u8], body: &[u8]) -> Vec<u8> {
    let mut bmhd = [0u8; 20];
    bmhd[0..2].copy_from_slice(&width.to_be_bytes());
    bmhd[2..4].copy_from_slice(&height.to_be_bytes());
    bmhd[8] = 8; // planes
    bmhd[10] = compression;
    let mut chunks = Vec::new();
    chunk(&mut chunks, b"BMHD", &bmhd);
    if !cmap.is_empty() {
        chunk(&mut chunks, b"CMAP", cmap);
    }
    chunk(&mut chunks, b"BODY", body);
    let mut out = b"FORM".to_vec();
    out.extend_from_slice(&(chunks.len() as u32 + 4).to_be_bytes());
    out.extend_from_slice(b"PBM ");
    out.extend_from_slice(&chunks);
    out
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // Uncompressed 2x2 with a 4-entry palette
    let cmap = [0, 0, 0, 255, 0, 0, 0, 255, 0, 0, 0, 255];
    fs::write(format!("{dir}/raw_2x2.lbm"), pbm(2, 2, 0, &cmap, &[0, 1, 2, 3])).unwrap();

    // ByteRun1 4x2: literal run then replicate run
    let body = [3, 1, 2, 3, 4, 0xFD, 9];
    fs::write(format!("{dir}/byterun1_4x2.lbm"), pbm(4, 2, 1, &cmap, &body)).unwrap();

    // Odd-sized BODY with pad byte
    fs::write(format!("{dir}/odd_3x1.lbm"), pbm(3, 1, 0, &[], &[5, 6, 7])).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/just_form.bin"), b"FORM").unwrap();
    fs::write(format!("{dir}/ilbm.bin"), b"FORM\0\0\0\x04ILBM").unwrap();
    fs::write(format!("{dir}/huge_chunk.bin"), b"FORM\0\0\0\x10PBM BMHD\xff\xff\xff\xff").unwrap();

    let dir = "fuzz/corpus/fuzz_byterun1";
    fs::create_dir_all(dir).unwrap();
    fs::write(format!("{dir}/mixed.bin"), [8, 0, 3, 1, 2, 3, 4, 0xFD, 9]).unwrap();
    fs::write(format!("{dir}/noop.bin"), [2, 0, 0x80, 0xFF, 1]).unwrap();

    println!("Generated seed corpus in fuzz/corpus/");
}
