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

use crate::compose::blend::blend_pixel;
use crate::unsafe_slice::UnsafeSlice;

#[inline(always)]
unsafe fn load4(ptr: *const u8) -> __m128i {
    _mm_cvtepu8_epi32(_mm_cvtsi32_si128((ptr as *const i32).read_unaligned()))
}

#[inline(always)]
unsafe fn store4(ptr: *mut u8, v: __m128i) {
    let packed = _mm_packus_epi16(_mm_packus_epi32(v, v), _mm_setzero_si128());
    (ptr as *mut i32).write_unaligned(_mm_cvtsi128_si32(packed));
}

#[inline(always)]
unsafe fn mul255_epi32(a: __m128i, b: __m128i) -> __m128i {
    let t = _mm_add_epi32(_mm_mullo_epi32(a, b), _mm_set1_epi32(0x80));
    _mm_srli_epi32::<8>(_mm_add_epi32(t, _mm_srli_epi32::<8>(t)))
}

/// Lane wise `num / den`, truncated. Operands stay below 2^24 so the double
/// quotient truncates to the exact integer result.
#[inline(always)]
unsafe fn div_epi32(num: __m128i, den: __m128i) -> __m128i {
    let q_lo = _mm_div_pd(_mm_cvtepi32_pd(num), _mm_cvtepi32_pd(den));
    let q_hi = _mm_div_pd(
        _mm_cvtepi32_pd(_mm_unpackhi_epi64(num, num)),
        _mm_cvtepi32_pd(_mm_unpackhi_epi64(den, den)),
    );
    _mm_unpacklo_epi64(_mm_cvttpd_epi32(q_lo), _mm_cvttpd_epi32(q_hi))
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn blend_row_sse(
    top: &[u8],
    top_plane: usize,
    dst: &UnsafeSlice<u8>,
    dst_start: usize,
    dst_plane: usize,
    n_chan: usize,
    softmask: Option<&[u8]>,
    alpha: u8,
    width: usize,
) {
    unsafe {
        blend_row_sse_impl(
            top, top_plane, dst, dst_start, dst_plane, n_chan, softmask, alpha, width,
        );
    }
}

#[allow(clippy::too_many_arguments)]
#[target_feature(enable = "sse4.1")]
unsafe fn blend_row_sse_impl(
    top: &[u8],
    top_plane: usize,
    dst: &UnsafeSlice<u8>,
    dst_start: usize,
    dst_plane: usize,
    n_chan: usize,
    softmask: Option<&[u8]>,
    alpha: u8,
    width: usize,
) {
    let zeros = _mm_setzero_si128();
    let v255 = _mm_set1_epi32(255);
    let ones = _mm_set1_epi32(1);
    let half = _mm_set1_epi32(0x80);
    let round = _mm_set1_epi32(0x8000);
    let group_alpha = _mm_set1_epi32(alpha as i32);

    let top_ptr = top.as_ptr();
    let dst_ptr = dst.slice.as_ptr() as *mut u8;

    let mut x = 0usize;
    while x + 4 <= width {
        let src_alpha = load4(top_ptr.add(x + n_chan * top_plane));
        if _mm_movemask_epi8(_mm_cmpeq_epi32(src_alpha, zeros)) == 0xFFFF {
            x += 4;
            continue;
        }

        let alpha_ptr = dst_ptr.add(dst_start + x + n_chan * dst_plane);
        let dst_alpha = load4(alpha_ptr);
        let pix_alpha = match softmask {
            Some(mask) => mul255_epi32(group_alpha, load4(mask.as_ptr().add(x))),
            None => group_alpha,
        };
        // Scaling by 255 is exact, so lanes with full coverage pass through.
        let src_alpha = mul255_epi32(src_alpha, pix_alpha);
        let skip = _mm_cmpeq_epi32(src_alpha, zeros);
        let copy = _mm_cmpeq_epi32(dst_alpha, zeros);

        let t = _mm_add_epi32(
            _mm_mullo_epi32(_mm_sub_epi32(v255, dst_alpha), _mm_sub_epi32(v255, src_alpha)),
            half,
        );
        let a_r = _mm_sub_epi32(
            v255,
            _mm_srli_epi32::<8>(_mm_add_epi32(t, _mm_srli_epi32::<8>(t))),
        );
        let a_r_safe = _mm_max_epi32(a_r, ones);
        let scale = div_epi32(
            _mm_add_epi32(_mm_slli_epi32::<16>(src_alpha), _mm_srli_epi32::<1>(a_r_safe)),
            a_r_safe,
        );

        let out_alpha = _mm_blendv_epi8(_mm_blendv_epi8(a_r, src_alpha, copy), dst_alpha, skip);
        store4(alpha_ptr, out_alpha);

        for p in 0..n_chan {
            let c_ptr = dst_ptr.add(dst_start + x + p * dst_plane);
            let c_s = load4(top_ptr.add(x + p * top_plane));
            let c_b = load4(c_ptr);
            let blended = _mm_srai_epi32::<16>(_mm_add_epi32(
                _mm_add_epi32(
                    _mm_slli_epi32::<16>(c_b),
                    _mm_mullo_epi32(scale, _mm_sub_epi32(c_s, c_b)),
                ),
                round,
            ));
            let out = _mm_blendv_epi8(_mm_blendv_epi8(blended, c_s, copy), c_b, skip);
            store4(c_ptr, out);
        }
        x += 4;
    }

    for x in x..width {
        blend_pixel(
            top,
            top_plane,
            dst,
            dst_start,
            dst_plane,
            n_chan,
            softmask.map(|m| m[x]),
            alpha,
            x,
        );
    }
}
