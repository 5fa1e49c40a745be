// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for the depth visualization pipeline

use depthshot::depth::{
    DepthFrame, FilteredFrame, GrayscaleMapping, ThresholdRange, deserialize_frame,
    filter_by_threshold, rotate90, serialize_frame, to_grayscale,
};
use std::num::NonZeroU32;

/// Deterministic pseudo-random samples covering the whole u16 range
fn samples(count: usize, seed: u32) -> Vec<u16> {
    let mut state = seed;
    (0..count)
        .map(|_| {
            state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            (state >> 16) as u16
        })
        .collect()
}

#[test]
fn test_threshold_output_is_input_or_zero() {
    let ranges = [(0, 1), (500, 8000), (800, 801), (1000, 60000)];
    for (seed, (begin, end)) in ranges.into_iter().enumerate() {
        let range = ThresholdRange::new(begin, end).unwrap();
        let frame = DepthFrame::new(16, 12, samples(16 * 12, seed as u32)).unwrap();
        let filtered = filter_by_threshold(&frame, range, NonZeroU32::MIN);

        for (input, output) in frame.samples().iter().zip(filtered.samples()) {
            if (begin..=end).contains(input) {
                assert_eq!(output, input, "in-range sample must pass through");
            } else {
                assert_eq!(*output, 0, "out-of-range sample {} must become 0", input);
            }
        }
    }
}

#[test]
fn test_ramp_pixel_matches_formula() {
    let (width, height) = (5u32, 4u32);
    let (x, y) = (3u32, 2u32);

    for v in [1u16, 7, 500, 1500, 2000, 2990] {
        let mut data = vec![0u16; (width * height) as usize];
        data[(y * width + x) as usize] = v;
        let frame = DepthFrame::new(width, height, data).unwrap();
        let image = to_grayscale(&FilteredFrame::unfiltered(frame), GrayscaleMapping::ramp());

        let expected = (f64::from(v) * 256.0 / 3000.0).round() as u8;
        assert_eq!(image.pixel(x, y), Some([expected; 3]), "sample {}", v);

        for py in 0..height {
            for px in 0..width {
                if (px, py) != (x, y) {
                    assert_eq!(image.pixel(px, py), Some([255; 3]), "pixel ({}, {})", px, py);
                }
            }
        }
    }
}

#[test]
fn test_ramp_saturates_at_full_depth() {
    let frame = DepthFrame::new(1, 1, vec![3000]).unwrap();
    let image = to_grayscale(&FilteredFrame::unfiltered(frame), GrayscaleMapping::ramp());
    assert_eq!(image.pixel(0, 0), Some([255; 3]));
}

#[test]
fn test_binary_paints_projected_samples_black() {
    let (width, height) = (8u32, 6u32);
    let data = samples((width * height) as usize, 42);
    let frame = DepthFrame::new(width, height, data).unwrap();
    let decimation = NonZeroU32::new(2).unwrap();
    let filtered = filter_by_threshold(&frame, ThresholdRange::default(), decimation);
    let image = to_grayscale(&filtered, GrayscaleMapping::Binary);

    assert_eq!((image.width(), image.height()), (width, height));
    for py in 0..height {
        for px in 0..width {
            let projected = px % 2 == 0 && py % 2 == 0;
            let sample = filtered.samples()[((py / 2) * filtered.width() + px / 2) as usize];
            let expected = if projected && sample != 0 {
                [0; 3]
            } else {
                [255; 3]
            };
            assert_eq!(image.pixel(px, py), Some(expected), "pixel ({}, {})", px, py);
        }
    }
}

#[test]
fn test_rotate90_follows_index_formula_and_inverts() {
    for (width, height) in [(4u32, 3u32), (1, 5), (7, 1), (6, 6)] {
        let src = samples((width * height) as usize, width * 31 + height);
        let once = rotate90(&src, width, height, 1);

        // dst(r', c') = src(H-1-c', W-1-r') with the output W' = H, H' = W
        let (w2, h2) = (height as usize, width as usize);
        for r in 0..h2 {
            for c in 0..w2 {
                let src_row = height as usize - 1 - c;
                let src_col = width as usize - 1 - r;
                assert_eq!(once[r * w2 + c], src[src_row * width as usize + src_col]);
            }
        }

        let twice = rotate90(&once, height, width, 1);
        assert_eq!(twice, src, "{}x{} must round-trip", width, height);
    }
}

#[test]
fn test_raw_format_round_trip() {
    let (width, height) = (640u32, 480u32);
    let data = samples((width * height) as usize, 7);
    let bytes = serialize_frame(&data);
    assert_eq!(bytes.len(), data.len() * 2);

    let frame = deserialize_frame(&bytes, width, height).unwrap();
    assert_eq!(frame.samples(), data.as_slice());
}

#[test]
fn test_raw_format_is_little_endian() {
    let bytes = serialize_frame(&[0x0102, 0xABCD]);
    assert_eq!(bytes, vec![0x02, 0x01, 0xCD, 0xAB]);
}
