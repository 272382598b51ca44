/*
 * // Copyright (c) Radzivon Bartoshyk 10/2026. All rights reserved.
 * //
 * // Redistribution and use in source and binary forms, with or without modification,
 * // are permitted provided that the following conditions are met:
 * //
 * // 1.  Redistributions of source code must retain the above copyright notice, this
 * // list of conditions and the following disclaimer.
 * //
 * // 2.  Redistributions in binary form must reproduce the above copyright notice,
 * // this list of conditions and the following disclaimer in the documentation
 * // and/or other materials provided with the distribution.
 * //
 * // 3.  Neither the name of the copyright holder nor the names of its
 * // contributors may be used to endorse or promote products derived from
 * // this software without specific prior written permission.
 * //
 * // THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
 * // AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
 * // IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
 * // DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
 * // FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
 * // DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
 * // SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
 * // CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
 * // OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
 * // OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
 */

use crate::rotator::weights::{TapIndex, WEIGHT_ROUND, WEIGHT_SHIFT};

/// Horizontal pass: `dst` receives one pixel of `channels` bytes per tap entry.
pub(crate) type ZoomXFn = fn(
    dst: &mut [u8],
    src: &[u8],
    taps: &[TapIndex],
    weights: &[i32],
    src_w: usize,
    channels: usize,
    bg: &[u8],
);

/// Vertical pass over a ring of `rows` lines, each `dst.len()` bytes, starting at ring
/// row `y`.
pub(crate) type ZoomYFn = fn(
    dst: &mut [u8],
    ring: &[u8],
    taps: &[TapIndex],
    weights: &[i32],
    channels: usize,
    rows: usize,
    y: usize,
);

#[inline(always)]
fn store(dst: &mut [u8], acc: &[i32; 4]) {
    for (dst, &v) in dst.iter_mut().zip(acc.iter()) {
        *dst = (v >> WEIGHT_SHIFT).clamp(0, 255) as u8;
    }
}

/// One output pixel whose taps may lie outside `0..src_w`; those read `bg`.
#[inline]
pub(crate) fn zoom_pixel_edge(
    dst: &mut [u8],
    src: &[u8],
    tap: &TapIndex,
    weights: &[i32],
    src_w: usize,
    channels: usize,
    bg: &[u8],
) {
    let mut acc = [WEIGHT_ROUND; 4];
    let mut pixel = tap.first_pixel as i64;
    for &w in &weights[tap.index..tap.index + tap.n] {
        let value = if pixel < 0 || pixel as usize >= src_w {
            &bg[..channels]
        } else {
            let start = pixel as usize * channels;
            &src[start..start + channels]
        };
        for (acc, &v) in acc.iter_mut().zip(value.iter()) {
            *acc += v as i32 * w;
        }
        pixel += 1;
    }
    store(dst, &acc);
}

pub(crate) fn zoom_x(
    dst: &mut [u8],
    src: &[u8],
    taps: &[TapIndex],
    weights: &[i32],
    src_w: usize,
    channels: usize,
    bg: &[u8],
) {
    for (out, tap) in dst.chunks_exact_mut(channels).zip(taps.iter()) {
        if tap.slow {
            zoom_pixel_edge(out, src, tap, weights, src_w, channels, bg);
            continue;
        }
        let mut acc = [WEIGHT_ROUND; 4];
        let start = tap.first_pixel as usize * channels;
        let pixels = &src[start..start + tap.n * channels];
        for (px, &w) in pixels
            .chunks_exact(channels)
            .zip(weights[tap.index..tap.index + tap.n].iter())
        {
            for (acc, &v) in acc.iter_mut().zip(px.iter()) {
                *acc += v as i32 * w;
            }
        }
        store(out, &acc);
    }
}

pub(crate) fn zoom_y(
    dst: &mut [u8],
    ring: &[u8],
    taps: &[TapIndex],
    weights: &[i32],
    channels: usize,
    rows: usize,
    y: usize,
) {
    let row_bytes = dst.len();
    for (col, (out, tap)) in dst
        .chunks_exact_mut(channels)
        .zip(taps.iter())
        .enumerate()
    {
        let mut row = (tap.first_pixel as i64 + y as i64).rem_euclid(rows as i64) as usize;
        let mut acc = [WEIGHT_ROUND; 4];
        for &w in &weights[tap.index..tap.index + tap.n] {
            let start = row * row_bytes + col * channels;
            for (acc, &v) in acc.iter_mut().zip(ring[start..start + channels].iter()) {
                *acc += v as i32 * w;
            }
            row += 1;
            if row == rows {
                row = 0;
            }
        }
        store(out, &acc);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rotator::weights::x_weights;

    #[test]
    fn unit_zoom_keeps_flat_line() {
        let table = x_weights(12, 12, 1., 0.);
        let src = vec![90u8; 12 * 3];
        let mut dst = vec![0u8; 12 * 3];
        zoom_x(&mut dst, &src, &table.taps, &table.weights, 12, 3, &[90, 90, 90]);
        assert!(
            dst.iter().all(|&v| v.abs_diff(90) <= 1),
            "Flat line drifted: {dst:?}"
        );
    }

    #[test]
    fn edges_blend_background() {
        // Centres land on whole pixels so the outer taps have positive weight.
        let table = x_weights(6, 6, 1., 0.5);
        let src = vec![200u8; 6];
        let mut dst = vec![0u8; 6];
        zoom_x(&mut dst, &src, &table.taps, &table.weights, 6, 1, &[0]);
        assert!(dst[0] < dst[2], "Leading edge must pull towards background {dst:?}");
        assert!(dst[5] < dst[3], "Trailing edge must pull towards background {dst:?}");
    }

    #[test]
    fn vertical_pass_wraps_ring() {
        // Three rows of two single channel pixels; every tap reads row 2 then wraps.
        let ring = [10u8, 10, 20, 20, 30, 30];
        let taps = [
            TapIndex {
                index: 0,
                n: 2,
                slow: false,
                first_pixel: 0,
                last_pixel: 1,
            },
            TapIndex {
                index: 0,
                n: 2,
                slow: false,
                first_pixel: 0,
                last_pixel: 1,
            },
        ];
        let weights = [2048, 2048];
        let mut dst = [0u8; 2];
        zoom_y(&mut dst, &ring, &taps, &weights, 1, 3, 2);
        assert_eq!(dst, [20, 20]);
    }
}
