#![no_main]
use libfuzzer_sys::fuzz_target;
use zenbmp_cross::{BmpDocument, DecodeRequest, Limits};

fuzz_target!(|data: &[u8]| {
    // Must never panic
    let _ = BmpDocument::from_bytes(data);

    let limits = Limits {
        max_pixels: Some(1 << 20),
        ..Default::default()
    };
    if let Ok(doc) = DecodeRequest::new()
        .with_expected_len(data.len() as u32)
        .with_limits(&limits)
        .open(std::io::Cursor::new(data))
    {
        let img = doc.bitmap().to_imgvec();
        assert_eq!(img.width() as u32, doc.params().width);
        assert_eq!(img.height() as u32, doc.params().height);
    }
});
