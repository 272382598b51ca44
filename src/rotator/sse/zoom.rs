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

#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use crate::rotator::weights::{TapIndex, WEIGHT_ROUND, WEIGHT_SHIFT};
use crate::rotator::zoom::zoom_pixel_edge;

/// Widens the `CN` bytes of one pixel into 32 bit lanes.
#[inline(always)]
unsafe fn load_pixel<const CN: usize>(px: &[u8]) -> __m128i {
    let mut bytes = [0u8; 4];
    bytes[..CN].copy_from_slice(&px[..CN]);
    _mm_cvtepu8_epi32(_mm_cvtsi32_si128(i32::from_le_bytes(bytes)))
}

/// Shifts the accumulator down and stores `CN` saturated bytes.
#[inline(always)]
unsafe fn store_pixel<const CN: usize>(dst: &mut [u8], acc: __m128i) {
    let shifted = _mm_srai_epi32::<WEIGHT_SHIFT>(acc);
    let words = _mm_packus_epi32(shifted, shifted);
    let bytes = _mm_packus_epi16(words, words);
    let packed = (_mm_cvtsi128_si32(bytes) as u32).to_le_bytes();
    dst[..CN].copy_from_slice(&packed[..CN]);
}

pub(crate) fn zoom_x_sse<const CN: usize>(
    dst: &mut [u8],
    src: &[u8],
    taps: &[TapIndex],
    weights: &[i32],
    src_w: usize,
    _: usize,
    bg: &[u8],
) {
    unsafe {
        zoom_x_sse_impl::<CN>(dst, src, taps, weights, src_w, bg);
    }
}

#[target_feature(enable = "sse4.1")]
unsafe fn zoom_x_sse_impl<const CN: usize>(
    dst: &mut [u8],
    src: &[u8],
    taps: &[TapIndex],
    weights: &[i32],
    src_w: usize,
    bg: &[u8],
) {
    let round = _mm_set1_epi32(WEIGHT_ROUND);
    for (out, tap) in dst.chunks_exact_mut(CN).zip(taps.iter()) {
        if tap.slow {
            zoom_pixel_edge(out, src, tap, weights, src_w, CN, bg);
            continue;
        }
        let start = tap.first_pixel as usize * CN;
        let pixels = &src[start..start + tap.n * CN];
        let mut acc = round;
        for (px, &w) in pixels
            .chunks_exact(CN)
            .zip(weights[tap.index..tap.index + tap.n].iter())
        {
            let product = _mm_mullo_epi32(load_pixel::<CN>(px), _mm_set1_epi32(w));
            acc = _mm_add_epi32(acc, product);
        }
        store_pixel::<CN>(out, acc);
    }
}

pub(crate) fn zoom_y_sse<const CN: usize>(
    dst: &mut [u8],
    ring: &[u8],
    taps: &[TapIndex],
    weights: &[i32],
    _: usize,
    rows: usize,
    y: usize,
) {
    unsafe {
        zoom_y_sse_impl::<CN>(dst, ring, taps, weights, rows, y);
    }
}

#[target_feature(enable = "sse4.1")]
unsafe fn zoom_y_sse_impl<const CN: usize>(
    dst: &mut [u8],
    ring: &[u8],
    taps: &[TapIndex],
    weights: &[i32],
    rows: usize,
    y: usize,
) {
    let round = _mm_set1_epi32(WEIGHT_ROUND);
    let row_bytes = dst.len();
    for (col, (out, tap)) in dst.chunks_exact_mut(CN).zip(taps.iter()).enumerate() {
        let mut row = (tap.first_pixel as i64 + y as i64).rem_euclid(rows as i64) as usize;
        let mut acc = round;
        for &w in &weights[tap.index..tap.index + tap.n] {
            let start = row * row_bytes + col * CN;
            let product = _mm_mullo_epi32(
                load_pixel::<CN>(&ring[start..start + CN]),
                _mm_set1_epi32(w),
            );
            acc = _mm_add_epi32(acc, product);
            row += 1;
            if row == rows {
                row = 0;
            }
        }
        store_pixel::<CN>(out, acc);
    }
}
