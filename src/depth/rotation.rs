// SPDX-License-Identifier: GPL-3.0-only

//! Portrait rotation for depth and video buffers

/// Rotate a row-major `width x height` buffer into portrait orientation
///
/// The result is `height` wide and `width` tall. Destination pixel at row
/// `r`, column `c` comes from source row `height - 1 - c`, column
/// `width - 1 - r`. This is an anti-diagonal transpose, so applying it twice
/// (with the swapped dimensions) restores the original buffer.
///
/// `channels` elements are moved together per pixel (1 for depth, 3 for RGB).
/// The caller must pass a buffer of exactly `width * height * channels`
/// elements.
pub fn rotate90<T: Copy>(data: &[T], width: u32, height: u32, channels: usize) -> Vec<T> {
    let (w, h) = (width as usize, height as usize);
    debug_assert_eq!(data.len(), w * h * channels);

    let mut out = Vec::with_capacity(data.len());
    // Destination is h columns wide and w rows tall
    for r in 0..w {
        let src_col = w - 1 - r;
        for c in 0..h {
            let src_row = h - 1 - c;
            let src = (src_row * w + src_col) * channels;
            out.extend_from_slice(&data[src..src + channels]);
        }
    }
    out
}
