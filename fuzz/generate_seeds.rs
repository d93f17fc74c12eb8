#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // Minimal BMP 1x1 24-bit
    let mut bmp = vec![0u8; 58]; // 54 header + 4 pixel (3 + 1 padding)
    bmp[0] = b'B'; bmp[1] = b'M';
    bmp[2..6].copy_from_slice(&58u32.to_le_bytes()); // file size
    bmp[10..14].copy_from_slice(&54u32.to_le_bytes()); // data offset
    bmp[14..18].copy_from_slice(&40u32.to_le_bytes()); // DIB header size
    bmp[18..22].copy_from_slice(&1i32.to_le_bytes()); // width
    bmp[22..26].copy_from_slice(&1i32.to_le_bytes()); // height
    bmp[26..28].copy_from_slice(&1u16.to_le_bytes()); // planes
    bmp[28..30].copy_from_slice(&24u16.to_le_bytes()); // bpp
    bmp[54] = 0xff; bmp[55] = 0x00; bmp[56] = 0x00; // BGR
    fs::write(format!("{dir}/bmp_1x1.bmp"), &bmp).unwrap();

    // Same pixel, top-down
    let mut top_down = bmp.clone();
    top_down[22..26].copy_from_slice(&(-1i32).to_le_bytes());
    fs::write(format!("{dir}/bmp_1x1_top_down.bmp"), top_down).unwrap();

    // Core header 1x1 24-bit
    let mut core = vec![0u8; 30];
    core[0] = b'B'; core[1] = b'M';
    core[2..6].copy_from_slice(&30u32.to_le_bytes());
    core[10..14].copy_from_slice(&26u32.to_le_bytes());
    core[14..18].copy_from_slice(&12u32.to_le_bytes());
    core[18..20].copy_from_slice(&1u16.to_le_bytes());
    core[20..22].copy_from_slice(&1u16.to_le_bytes());
    core[22..24].copy_from_slice(&1u16.to_le_bytes());
    core[24..26].copy_from_slice(&24u16.to_le_bytes());
    fs::write(format!("{dir}/bmp_core_1x1.bmp"), core).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/bm_short.bin"), b"BM\x00\x00").unwrap();
    fs::write(format!("{dir}/bmp_no_pixels.bin"), &bmp[..54]).unwrap();

    println!("Generated seed corpus in {dir}/");
}
