#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Header info and decode must never panic
    let _ = zeniff::ImageInfo::from_bytes(data);

    let Ok(image) = zeniff::decode(data) else {
        return;
    };
    if image.header.compression == zeniff::Compression::ByteRun1 {
        assert_eq!(image.pixels().len(), image.header.pixel_count());
    }
    let _ = image.to_rgb8();

    let _ = zeniff::DecodeRequest::new(data)
        .with_permissiveness(zeniff::Permissiveness::Strict)
        .with_duplicate_chunks(zeniff::DuplicateChunks::First)
        .decode(enough::Unstoppable);
});
