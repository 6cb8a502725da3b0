use super::*;
use crate::config::{CompressionOptions, ElementWidth};
use crate::error::VbzError;
use crate::utils::typed_slice_to_bytes;

fn sample_signal() -> Vec<i16> {
    (0..1_000).map(|i: i32| ((i * 37) % 211 - 105) as i16).collect()
}

#[test]
fn test_free_functions_roundtrip_unsized() {
    let options = CompressionOptions::new(true, ElementWidth::Two, 1);
    let input = typed_slice_to_bytes(&sample_signal());

    let mut compressed = vec![0u8; max_compressed_size(input.len(), &options).unwrap()];
    let written = compress(&input, &mut compressed, &options).unwrap();
    compressed.truncate(written);

    // The caller knows the length out of band and sizes `dest` to match.
    let mut dest = vec![0u8; input.len()];
    let restored = decompress(&compressed, &mut dest, &options).unwrap();
    assert_eq!(restored, input.len());
    assert_eq!(dest, input);

    let mut oversized = vec![0u8; input.len() + 64];
    assert!(decompress(&compressed, &mut oversized, &options).is_err());
}

#[test]
fn test_free_functions_roundtrip_sized() {
    let options = CompressionOptions::new(false, ElementWidth::Eight, 7);
    let values: Vec<i64> = vec![i64::MIN, -1, 0, 1, i64::MAX, 1 << 40];
    let input = typed_slice_to_bytes(&values);

    let mut compressed = vec![0u8; max_compressed_size(input.len(), &options).unwrap()];
    let written = compress_sized(&input, &mut compressed, &options).unwrap();
    compressed.truncate(written);

    let original = decompressed_size(&compressed, &options).unwrap();
    assert_eq!(original, input.len());
    let mut dest = vec![0u8; original];
    assert_eq!(decompress_sized(&compressed, &mut dest, &options).unwrap(), original);
    assert_eq!(dest, input);
}

#[test]
fn test_typed_helpers_every_width() {
    let options = |w| CompressionOptions::new(true, w, 1);

    let v8: Vec<i8> = vec![-128, 127, 0, 5, -5];
    let c = compress_slice(&v8, &options(ElementWidth::One)).unwrap();
    assert_eq!(decompress_to_vec::<i8>(&c, &options(ElementWidth::One)).unwrap(), v8);

    let v16 = sample_signal();
    let c = compress_slice(&v16, &options(ElementWidth::Two)).unwrap();
    assert_eq!(decompress_to_vec::<i16>(&c, &options(ElementWidth::Two)).unwrap(), v16);

    let v32: Vec<i32> = (0..100).collect();
    let c = compress_slice(&v32, &options(ElementWidth::Four)).unwrap();
    assert_eq!(decompress_to_vec::<i32>(&c, &options(ElementWidth::Four)).unwrap(), v32);

    let v64: Vec<i64> = vec![0, 1 << 62, -(1 << 62), 42];
    let c = compress_slice(&v64, &options(ElementWidth::Eight)).unwrap();
    assert_eq!(decompress_to_vec::<i64>(&c, &options(ElementWidth::Eight)).unwrap(), v64);
}

#[test]
fn test_json_options_drive_the_codec() {
    let options = CompressionOptions::from_json(r#"{"element_width": 4, "compression_level": 0}"#).unwrap();
    let compressed = compress_slice(&[5i32, 4, 3, 2, 1], &options).unwrap();
    assert_eq!(compressed, vec![20, 0, 0, 0, 0, 0, 10, 1, 1, 1, 1]);
}

#[test]
fn test_decompressed_size_on_short_input() {
    let options = CompressionOptions::default();
    assert_eq!(decompressed_size(&[1, 2], &options), Err(VbzError::SizedHeaderMissing(2)));
}
