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

use crate::rotator::weights::{WEIGHT_ROUND, WEIGHT_SHIFT};

pub(crate) fn zoom_rows_sse(
    dst: &mut [u8],
    ring: &[u8],
    lines: usize,
    first: usize,
    weights: &[i32],
) {
    unsafe {
        zoom_rows_sse_impl(dst, ring, lines, first, weights);
    }
}

#[target_feature(enable = "sse4.1")]
unsafe fn zoom_rows_sse_impl(
    dst: &mut [u8],
    ring: &[u8],
    lines: usize,
    first: usize,
    weights: &[i32],
) {
    let row_bytes = dst.len();
    debug_assert!(ring.len() >= lines * row_bytes);
    let round = _mm_set1_epi32(WEIGHT_ROUND);

    let mut x = 0usize;
    while x + 16 <= row_bytes {
        let mut acc0 = round;
        let mut acc1 = round;
        let mut acc2 = round;
        let mut acc3 = round;
        let mut line = first;
        for &w in weights {
            let wv = _mm_set1_epi32(w);
            let start = line * row_bytes + x;
            let px = _mm_loadu_si128(ring[start..start + 16].as_ptr() as *const __m128i);
            acc0 = _mm_add_epi32(acc0, _mm_mullo_epi32(_mm_cvtepu8_epi32(px), wv));
            acc1 = _mm_add_epi32(
                acc1,
                _mm_mullo_epi32(_mm_cvtepu8_epi32(_mm_srli_si128::<4>(px)), wv),
            );
            acc2 = _mm_add_epi32(
                acc2,
                _mm_mullo_epi32(_mm_cvtepu8_epi32(_mm_srli_si128::<8>(px)), wv),
            );
            acc3 = _mm_add_epi32(
                acc3,
                _mm_mullo_epi32(_mm_cvtepu8_epi32(_mm_srli_si128::<12>(px)), wv),
            );
            line += 1;
            if line == lines {
                line = 0;
            }
        }
        let lo = _mm_packs_epi32(
            _mm_srai_epi32::<WEIGHT_SHIFT>(acc0),
            _mm_srai_epi32::<WEIGHT_SHIFT>(acc1),
        );
        let hi = _mm_packs_epi32(
            _mm_srai_epi32::<WEIGHT_SHIFT>(acc2),
            _mm_srai_epi32::<WEIGHT_SHIFT>(acc3),
        );
        _mm_storeu_si128(
            dst[x..x + 16].as_mut_ptr() as *mut __m128i,
            _mm_packus_epi16(lo, hi),
        );
        x += 16;
    }

    for (offset, out) in dst[x..].iter_mut().enumerate() {
        let mut line = first;
        let mut acc = WEIGHT_ROUND;
        for &w in weights {
            acc += ring[line * row_bytes + x + offset] as i32 * w;
            line += 1;
            if line == lines {
                line = 0;
            }
        }
        *out = (acc >> WEIGHT_SHIFT).clamp(0, 255) as u8;
    }
}
