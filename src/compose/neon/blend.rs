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

use std::arch::aarch64::*;

use crate::compose::blend::blend_pixel;
use crate::unsafe_slice::UnsafeSlice;

#[inline(always)]
unsafe fn load4(ptr: *const u8) -> uint32x4_t {
    let bytes = vcreate_u8((ptr as *const u32).read_unaligned() as u64);
    vmovl_u16(vget_low_u16(vmovl_u8(bytes)))
}

#[inline(always)]
unsafe fn store4(ptr: *mut u8, v: uint32x4_t) {
    let words = vmovn_u32(v);
    let bytes = vmovn_u16(vcombine_u16(words, words));
    (ptr as *mut u32).write_unaligned(vget_lane_u32::<0>(vreinterpret_u32_u8(bytes)));
}

#[inline(always)]
unsafe fn mul255_u32(a: uint32x4_t, b: uint32x4_t) -> uint32x4_t {
    let t = vaddq_u32(vmulq_u32(a, b), vdupq_n_u32(0x80));
    vshrq_n_u32::<8>(vaddq_u32(t, vshrq_n_u32::<8>(t)))
}

/// Lane wise `num / den`, truncated. Operands stay below 2^24 so the double
/// quotient truncates to the exact integer result.
#[inline(always)]
unsafe fn div_u32(num: uint32x4_t, den: uint32x4_t) -> uint32x4_t {
    let q_lo = vdivq_f64(
        vcvtq_f64_u64(vmovl_u32(vget_low_u32(num))),
        vcvtq_f64_u64(vmovl_u32(vget_low_u32(den))),
    );
    let q_hi = vdivq_f64(
        vcvtq_f64_u64(vmovl_high_u32(num)),
        vcvtq_f64_u64(vmovl_high_u32(den)),
    );
    vcombine_u32(vmovn_u64(vcvtq_u64_f64(q_lo)), vmovn_u64(vcvtq_u64_f64(q_hi)))
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn blend_row_neon(
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
        let zeros = vdupq_n_u32(0);
        let v255 = vdupq_n_u32(255);
        let round = vdupq_n_s32(0x8000);
        let group_alpha = vdupq_n_u32(alpha as u32);

        let top_ptr = top.as_ptr();
        let dst_ptr = dst.slice.as_ptr() as *mut u8;

        let mut x = 0usize;
        while x + 4 <= width {
            let src_alpha = load4(top_ptr.add(x + n_chan * top_plane));
            if vminvq_u32(vceqq_u32(src_alpha, zeros)) == u32::MAX {
                x += 4;
                continue;
            }

            let alpha_ptr = dst_ptr.add(dst_start + x + n_chan * dst_plane);
            let dst_alpha = load4(alpha_ptr);
            let pix_alpha = match softmask {
                Some(mask) => mul255_u32(group_alpha, load4(mask.as_ptr().add(x))),
                None => group_alpha,
            };
            let src_alpha = mul255_u32(src_alpha, pix_alpha);
            let skip = vceqq_u32(src_alpha, zeros);
            let copy = vceqq_u32(dst_alpha, zeros);

            let t = vaddq_u32(
                vmulq_u32(vsubq_u32(v255, dst_alpha), vsubq_u32(v255, src_alpha)),
                vdupq_n_u32(0x80),
            );
            let a_r = vsubq_u32(v255, vshrq_n_u32::<8>(vaddq_u32(t, vshrq_n_u32::<8>(t))));
            let a_r_safe = vmaxq_u32(a_r, vdupq_n_u32(1));
            let scale = vreinterpretq_s32_u32(div_u32(
                vaddq_u32(vshlq_n_u32::<16>(src_alpha), vshrq_n_u32::<1>(a_r_safe)),
                a_r_safe,
            ));

            let out_alpha = vbslq_u32(skip, dst_alpha, vbslq_u32(copy, src_alpha, a_r));
            store4(alpha_ptr, out_alpha);

            for p in 0..n_chan {
                let c_ptr = dst_ptr.add(dst_start + x + p * dst_plane);
                let c_s = load4(top_ptr.add(x + p * top_plane));
                let c_b = load4(c_ptr);
                let s = vreinterpretq_s32_u32(c_s);
                let b = vreinterpretq_s32_u32(c_b);
                let blended = vshrq_n_s32::<16>(vaddq_s32(
                    vaddq_s32(vshlq_n_s32::<16>(b), vmulq_s32(scale, vsubq_s32(s, b))),
                    round,
                ));
                let out = vbslq_u32(
                    skip,
                    c_b,
                    vbslq_u32(copy, c_s, vreinterpretq_u32_s32(blended)),
                );
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
}
