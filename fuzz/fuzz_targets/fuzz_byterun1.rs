#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // First two bytes pick the output size, the rest is the packed stream.
    let Some((size, stream)) = data.split_first_chunk::<2>() else {
        return;
    };
    let capacity = usize::from(u16::from_le_bytes(*size));
    if let Ok(unpacked) = zeniff::byterun1::unpack(stream, capacity) {
        assert_eq!(unpacked.data.len(), capacity);
    }
});
