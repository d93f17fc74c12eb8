//! Header and pixel decoding against hand-built files.

use std::io::{self, Cursor, Read, Seek, SeekFrom};

use zenbmp_cross::bmp::{decode_colors, decode_header, encode_bitmap, encode_bmp, row_padding};
use zenbmp_cross::*;

/// Hand-assembled new-dialect BMP. Every field can be bent out of shape.
struct Synth {
    header_size: u32,
    width: i32,
    height: i32,
    planes: u16,
    bit_count: u16,
    compression: u32,
    size_image: u32,
    clr_used: u32,
    clr_important: u32,
    masks: Option<[u32; 3]>,
    pixel_data: Vec<u8>,
}

impl Synth {
    /// White image with correctly padded rows.
    fn white(width: u32, height: u32, bit_count: u16) -> Self {
        let bpp = usize::from(bit_count / 8);
        let stride = width as usize * bpp + usize::from(row_padding(width, bpp));
        Self {
            header_size: 40,
            width: width as i32,
            height: height as i32,
            planes: 1,
            bit_count,
            compression: 0,
            size_image: 0,
            clr_used: 0,
            clr_important: 0,
            masks: None,
            pixel_data: vec![0xFF; stride * height as usize],
        }
    }

    fn build(&self) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(b"BM");
        out.extend_from_slice(&[0u8; 8]); // file size + reserved, patched below
        out.extend_from_slice(&[0u8; 4]); // offset, patched below
        out.extend_from_slice(&self.header_size.to_le_bytes());
        out.extend_from_slice(&self.width.to_le_bytes());
        out.extend_from_slice(&self.height.to_le_bytes());
        out.extend_from_slice(&self.planes.to_le_bytes());
        out.extend_from_slice(&self.bit_count.to_le_bytes());
        out.extend_from_slice(&self.compression.to_le_bytes());
        out.extend_from_slice(&self.size_image.to_le_bytes());
        out.extend_from_slice(&2835u32.to_le_bytes());
        out.extend_from_slice(&2835u32.to_le_bytes());
        out.extend_from_slice(&self.clr_used.to_le_bytes());
        out.extend_from_slice(&self.clr_important.to_le_bytes());
        if let Some(masks) = self.masks {
            for m in masks {
                out.extend_from_slice(&m.to_le_bytes());
            }
        }
        let header_end = (14 + self.header_size as usize).max(out.len());
        out.resize(header_end, 0);
        let offset = out.len() as u32;
        out.extend_from_slice(&self.pixel_data);
        finish(out, offset)
    }
}

/// Hand-assembled core-dialect BMP.
fn core_bmp(width: u16, height: u16, bit_count: u16, pixel_data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&[0u8; 12]);
    out.extend_from_slice(&12u32.to_le_bytes());
    out.extend_from_slice(&width.to_le_bytes());
    out.extend_from_slice(&height.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&bit_count.to_le_bytes());
    out.extend_from_slice(pixel_data);
    finish(out, 26)
}

fn finish(mut out: Vec<u8>, offset: u32) -> Vec<u8> {
    let len = out.len() as u32;
    out[2..6].copy_from_slice(&len.to_le_bytes());
    out[10..14].copy_from_slice(&offset.to_le_bytes());
    out
}

fn open(data: Vec<u8>) -> Result<BmpDocument, BmpError> {
    BmpDocument::from_bytes(data)
}

fn expect_invalid(data: Vec<u8>, needle: &str) {
    match open(data) {
        Err(BmpError::InvalidDocument(reason)) => {
            assert!(reason.contains(needle), "reason {reason:?} lacks {needle:?}")
        }
        other => panic!("expected InvalidDocument({needle}), got {other:?}"),
    }
}

// ── Header fields ────────────────────────────────────────────────────

#[test]
fn ten_by_ten_header_fields() {
    let white = vec![RGB8::new(255, 255, 255); 100];
    let data = encode_bmp(&white, 10, 10, BitDepth::Bgr24, RowOrder::BottomUp).unwrap();
    let len = data.len() as u32;
    let params = decode_header(&mut Cursor::new(&data), Some(len)).unwrap();

    assert_eq!(params.offset, 54);
    assert_eq!(params.width, 10);
    assert_eq!(params.height, 10);
    assert!(params.bottom_up);
    assert_eq!(params.bits_per_pixel(), 24);
    assert_eq!(params.compression, Compression::Rgb);
    assert_eq!(params.size_image, 320);
    assert!(!params.palette_used);
    assert_eq!(params.palette_important_count, 0);
    assert_eq!(params.row_padding_bytes, 2);
    assert_eq!(params.row_stride(), 32);
}

#[test]
fn zero_size_image_is_computed() {
    let data = Synth::white(5, 3, 24).build();
    let params = decode_header(&mut Cursor::new(&data), None).unwrap();
    assert_eq!(params.size_image, 5 * 3 * 3);
    assert_eq!(params.row_padding_bytes, 1);

    let data = Synth::white(5, 3, 32).build();
    let params = decode_header(&mut Cursor::new(&data), None).unwrap();
    assert_eq!(params.size_image, 5 * 3 * 4);
    assert_eq!(params.row_padding_bytes, 0);
}

#[test]
fn negative_height_is_top_down() {
    let mut synth = Synth::white(4, 3, 24);
    synth.height = -3;
    let doc = open(synth.build()).unwrap();
    assert_eq!(doc.params().height, 3);
    assert!(!doc.params().bottom_up);
}

#[test]
fn palette_counts_are_informational() {
    let mut synth = Synth::white(2, 2, 24);
    synth.clr_used = 16;
    synth.clr_important = 4;
    let doc = open(synth.build()).unwrap();
    assert!(doc.params().palette_used);
    assert_eq!(doc.params().palette_important_count, 4);
}

#[test]
fn core_dialect() {
    // 2x2, 24-bit: bottom row black/white, top row white/black.
    let pixels = [
        0, 0, 0, 255, 255, 255, 0, 0, // bottom row + 2 padding
        255, 255, 255, 0, 0, 0, 0, 0, // top row + 2 padding
    ];
    let doc = open(core_bmp(2, 2, 24, &pixels)).unwrap();
    let params = doc.params();
    assert_eq!(params.offset, 26);
    assert!(params.bottom_up);
    assert_eq!(params.compression, Compression::Rgb);
    assert_eq!(params.size_image, 12);
    assert_eq!(doc.bitmap().to_string(), ".#\n#.\n");
}

#[test]
fn core_dialect_32_bit() {
    let pixels = [0x00, 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0x00];
    let doc = open(core_bmp(2, 1, 32, &pixels)).unwrap();
    assert_eq!(doc.params().row_padding_bytes, 0);
    assert_eq!(doc.bitmap().to_string(), "#.\n");
}

#[test]
fn extended_header_sizes() {
    for size in [54, 56, 108, 124] {
        let mut synth = Synth::white(3, 2, 24);
        synth.header_size = size;
        let doc = open(synth.build()).unwrap_or_else(|e| panic!("header size {size}: {e}"));
        assert_eq!(doc.params().offset, 14 + size);
        assert_eq!(doc.bitmap().dark_count(), 0);
    }
}

#[test]
fn standard_masks_accepted() {
    for compression in [3, 6] {
        let mut synth = Synth::white(2, 2, 32);
        synth.compression = compression;
        synth.size_image = 16;
        synth.masks = Some([0x00FF_0000, 0x0000_FF00, 0x0000_00FF]);
        let doc = open(synth.build()).unwrap();
        assert_eq!(doc.params().offset, 66);
        assert!(doc.params().compression.has_masks());
    }
}

#[test]
fn masks_inside_v4_header() {
    let mut synth = Synth::white(2, 2, 32);
    synth.header_size = 108;
    synth.compression = 3;
    synth.size_image = 16;
    synth.masks = Some([0x00FF_0000, 0x0000_FF00, 0x0000_00FF]);
    let doc = open(synth.build()).unwrap();
    assert_eq!(doc.params().offset, 122);
}

// ── Pixel decoding ───────────────────────────────────────────────────

#[test]
fn letters_pattern() {
    let expected = ".###..###.\n\
                    ..#...#...\n\
                    ..#...###.\n\
                    ..#...#...\n\
                    ..#...###.\n\
                    .###..###.\n\
                    .#.....#..\n\
                    .###...#..\n\
                    ...#...#..\n\
                    .###...#..\n";
    let mut bitmap = Bitmap::new(10, 10);
    for (row, line) in expected.lines().enumerate() {
        for (x, c) in line.chars().enumerate() {
            bitmap.set(x as u32, row as u32, c == '#');
        }
    }

    for depth in [BitDepth::Bgr24, BitDepth::Bgrx32] {
        for order in [RowOrder::BottomUp, RowOrder::TopDown] {
            let data = encode_bitmap(&bitmap, depth, order).unwrap();
            let doc = open(data).unwrap();
            assert_eq!(doc.bitmap().to_string(), expected, "{depth:?} {order:?}");
        }
    }
}

#[test]
fn channels_are_reordered() {
    // 24-bit: on-disk B,G,R
    let mut synth = Synth::white(1, 1, 24);
    synth.pixel_data = vec![0x10, 0x20, 0x30, 0x00];
    let data = synth.build();
    let mut cursor = Cursor::new(&data);
    let params = decode_header(&mut cursor, None).unwrap();
    let colors = decode_colors(&mut cursor, &params).unwrap();
    assert_eq!(colors, vec![vec![RGB8::new(0x30, 0x20, 0x10)]]);

    // 32-bit: little-endian word, top byte ignored
    let mut synth = Synth::white(1, 1, 32);
    synth.pixel_data = vec![0x10, 0x20, 0x30, 0x40];
    let data = synth.build();
    let mut cursor = Cursor::new(&data);
    let params = decode_header(&mut cursor, None).unwrap();
    let colors = decode_colors(&mut cursor, &params).unwrap();
    assert_eq!(colors, vec![vec![RGB8::new(0x30, 0x20, 0x10)]]);
}

#[test]
fn luminance_threshold_boundary() {
    for depth in [BitDepth::Bgr24, BitDepth::Bgrx32] {
        let pixels = [RGB8::new(122, 122, 122), RGB8::new(123, 122, 122)];
        let data = encode_bmp(&pixels, 2, 1, depth, RowOrder::BottomUp).unwrap();
        let doc = open(data).unwrap();
        assert_eq!(doc.bitmap().get(0, 0), Some(true), "sum 366 is dark");
        assert_eq!(doc.bitmap().get(1, 0), Some(false), "sum 367 is light");
    }
    assert!(is_dark(RGB8::new(255, 111, 0)));
    assert!(!is_dark(RGB8::new(255, 112, 0)));
}

#[test]
fn row_order_does_not_change_bitmap() {
    let pixels: Vec<RGB8> = (0..35u8)
        .map(|i| {
            let v = i.wrapping_mul(37);
            RGB8::new(v, v.wrapping_add(90), v / 2)
        })
        .collect();
    let up = encode_bmp(&pixels, 7, 5, BitDepth::Bgr24, RowOrder::BottomUp).unwrap();
    let down = encode_bmp(&pixels, 7, 5, BitDepth::Bgr24, RowOrder::TopDown).unwrap();
    assert_ne!(up, down);
    assert_eq!(open(up).unwrap().bitmap(), open(down).unwrap().bitmap());
}

// ── Failures ─────────────────────────────────────────────────────────

#[test]
fn bad_signature_is_invalid_document() {
    let mut data = Synth::white(2, 2, 24).build();
    data[0] = b'X';
    let err = open(data).unwrap_err();
    assert!(err.is_invalid_document(), "{err:?}");
    assert!(!err.is_io());
}

#[test]
fn unsupported_header_size() {
    let mut synth = Synth::white(2, 2, 24);
    synth.header_size = 20;
    expect_invalid(synth.build(), "unsupported info header size: 20");
}

#[test]
fn short_file_header_is_io() {
    let data = Synth::white(2, 2, 24).build();
    let err = open(data[..10].to_vec()).unwrap_err();
    assert!(err.is_io(), "{err:?}");

    let err = open(data[..30].to_vec()).unwrap_err();
    assert!(err.is_io(), "{err:?}");
}

#[test]
fn truncated_pixels_are_io() {
    let data = Synth::white(4, 4, 24).build();
    let err = open(data[..data.len() - 5].to_vec()).unwrap_err();
    assert!(err.is_io(), "{err:?}");
}

#[test]
fn unrepresentable_image_size_is_invalid() {
    let data = core_bmp(0xFFFF, 0xFFFF, 32, &[0; 16]);
    let err = open(data).unwrap_err();
    assert!(err.is_invalid_document(), "{err:?}");
    assert!(err.to_string().contains("65535x65535"), "{err}");
}

#[test]
fn expected_length_is_checked() {
    let data = Synth::white(2, 2, 24).build();
    let len = data.len() as u32;
    DecodeRequest::new()
        .with_expected_len(len)
        .open(Cursor::new(data.clone()))
        .unwrap();
    let err = DecodeRequest::new()
        .with_expected_len(len + 1)
        .open(Cursor::new(data))
        .unwrap_err();
    assert!(err.is_invalid_document());
    assert!(err.to_string().contains("invalid file size"));
}

#[test]
fn size_image_must_fit_expected_length() {
    let mut synth = Synth::white(2, 2, 24);
    synth.size_image = 400;
    let data = synth.build();
    let len = data.len() as u32;
    let err = DecodeRequest::new()
        .with_expected_len(len)
        .open(Cursor::new(data))
        .unwrap_err();
    assert!(err.to_string().contains("exceeds file size"), "{err}");
}

#[test]
fn header_field_violations() {
    let mut data = Synth::white(2, 2, 24).build();
    data[6] = 1;
    expect_invalid(data, "reserved");

    let mut data = Synth::white(2, 2, 24).build();
    data[2..6].copy_from_slice(&0u32.to_le_bytes());
    expect_invalid(data, "file size cannot be 0");

    let mut s = Synth::white(2, 2, 24);
    s.width = 0;
    expect_invalid(s.build(), "width must be positive");

    let mut s = Synth::white(2, 2, 24);
    s.width = -2;
    expect_invalid(s.build(), "width must be positive");

    let mut s = Synth::white(2, 2, 24);
    s.height = 0;
    expect_invalid(s.build(), "height cannot be zero");

    let mut s = Synth::white(2, 2, 24);
    s.planes = 2;
    expect_invalid(s.build(), "planes must be 1, got 2");

    let mut s = Synth::white(2, 2, 24);
    s.bit_count = 8;
    expect_invalid(s.build(), "8-bit BMPs are not supported");

    for code in [1, 2, 4, 5, 7] {
        let mut s = Synth::white(2, 2, 24);
        s.compression = code;
        s.size_image = 16;
        expect_invalid(s.build(), &format!("invalid compression for 24 or 32-bit BMPs: {code}"));
    }

    let mut s = Synth::white(2, 2, 24);
    s.compression = 3;
    expect_invalid(s.build(), "size image cannot be 0");

    let mut s = Synth::white(2, 2, 24);
    s.clr_used = 2;
    s.clr_important = 3;
    expect_invalid(s.build(), "important palette entries");
}

#[test]
fn core_header_violations() {
    let pixels = [0u8; 8];
    expect_invalid(core_bmp(0, 2, 24, &pixels), "width and height must be positive");
    expect_invalid(core_bmp(2, 1, 16, &pixels), "16-bit BMPs are not supported");

    let mut data = core_bmp(2, 1, 24, &pixels);
    data[22] = 3; // planes
    expect_invalid(data, "planes must be 1, got 3");
}

#[test]
fn non_standard_masks_rejected() {
    let mut synth = Synth::white(2, 2, 32);
    synth.compression = 3;
    synth.size_image = 16;
    synth.masks = Some([0x0000_00FF, 0x0000_FF00, 0x00FF_0000]);
    expect_invalid(synth.build(), "non-standard bit masks");
}

#[test]
fn offset_inside_headers_rejected() {
    let mut data = Synth::white(2, 2, 24).build();
    data[10..14].copy_from_slice(&20u32.to_le_bytes());
    expect_invalid(data, "overlaps the headers");
}

#[test]
fn offset_beyond_expected_length_rejected() {
    let mut data = Synth::white(2, 2, 24).build();
    let len = data.len() as u32;
    data[10..14].copy_from_slice(&(len + 10).to_le_bytes());
    let err = DecodeRequest::new()
        .with_expected_len(len)
        .open(Cursor::new(data))
        .unwrap_err();
    assert!(err.to_string().contains("beyond file size"), "{err}");
}

#[test]
fn limits_reject_large() {
    let data = Synth::white(4, 4, 24).build();
    let limits = Limits {
        max_pixels: Some(8),
        ..Default::default()
    };
    let result = DecodeRequest::new()
        .with_limits(&limits)
        .open(Cursor::new(data.clone()));
    match result.unwrap_err() {
        BmpError::LimitExceeded(_) => {}
        other => panic!("expected LimitExceeded, got {other:?}"),
    }

    let limits = Limits {
        max_memory_bytes: Some(32),
        ..Default::default()
    };
    let result = DecodeRequest::new()
        .with_limits(&limits)
        .open(Cursor::new(data));
    assert!(matches!(result, Err(BmpError::LimitExceeded(_))));
}

/// Counts bytes pulled through `read`.
struct CountingReader<R> {
    inner: R,
    bytes_read: u64,
}

impl<R: Read> Read for CountingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.bytes_read += n as u64;
        Ok(n)
    }
}

impl<R: Seek> Seek for CountingReader<R> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.inner.seek(pos)
    }
}

#[test]
fn limits_apply_before_pixel_data_is_read() {
    let pixels = vec![RGB8::new(255, 255, 255); 300 * 200];
    let data = encode_bmp(&pixels, 300, 200, BitDepth::Bgr24, RowOrder::BottomUp).unwrap();
    let total = data.len() as u64;

    let by_pixels = Limits {
        max_pixels: Some(10),
        ..Default::default()
    };
    let by_memory = Limits {
        max_memory_bytes: Some(1024),
        ..Default::default()
    };
    for limits in [by_pixels, by_memory] {
        let mut reader = CountingReader {
            inner: Cursor::new(data.clone()),
            bytes_read: 0,
        };
        let err = DecodeRequest::new()
            .with_limits(&limits)
            .open(&mut reader)
            .unwrap_err();
        assert!(matches!(err, BmpError::LimitExceeded(_)), "{err:?}");
        assert!(reader.bytes_read <= 54, "read {} of {total} bytes", reader.bytes_read);
    }

    // Without limits the same reader sees the whole file.
    let mut reader = CountingReader {
        inner: Cursor::new(data),
        bytes_read: 0,
    };
    DecodeRequest::new().open(&mut reader).unwrap();
    assert!(reader.bytes_read >= total);
}

#[test]
fn read_header_only() {
    let data = Synth::white(6, 2, 32).build();
    let params = DecodeRequest::new()
        .read_header(&mut Cursor::new(&data))
        .unwrap();
    assert_eq!((params.width, params.height), (6, 2));
    assert_eq!(params.bit_depth, BitDepth::Bgrx32);
}
