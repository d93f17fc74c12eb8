#![no_main]
use libfuzzer_sys::fuzz_target;
use zenbmp_cross::BmpDocument;

fuzz_target!(|input: (Vec<u8>, [u32; 4])| {
    let (data, corners) = input;
    // If we can decode it, a cross must survive writing and decoding again
    let Ok(mut doc) = BmpDocument::from_bytes(data) else {
        return;
    };

    let (w, h) = (doc.params().width, doc.params().height);
    let a = (corners[0] % w, corners[1] % h);
    let b = (corners[2] % w, corners[3] % h);
    doc.draw_cross(a, b).expect("in-bounds cross");

    let Ok(reread) = BmpDocument::from_bytes(doc.as_bytes().to_vec()) else {
        panic!("edited data failed to decode");
    };
    assert_eq!(reread.bitmap(), doc.bitmap(), "roundtrip pixel mismatch");
});
