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

use crate::unsafe_slice::UnsafeSlice;

/// `a * b / 255`, rounded.
#[inline(always)]
pub(crate) fn mul255(a: u32, b: u32) -> u32 {
    let t = a * b + 0x80;
    (t + (t >> 8)) >> 8
}

/// Blends `width` pixels of one row.
///
/// `top` starts at the first pixel of the row in plane 0 and `dst_start` indexes the
/// same pixel of the backdrop. Planes sit `top_plane` and `dst_plane` apart with alpha
/// in plane `n_chan`. `softmask` holds one resolved mask value per pixel.
pub(crate) type BlendRowFn = fn(
    top: &[u8],
    top_plane: usize,
    dst: &UnsafeSlice<u8>,
    dst_start: usize,
    dst_plane: usize,
    n_chan: usize,
    softmask: Option<&[u8]>,
    alpha: u8,
    width: usize,
);

#[allow(clippy::too_many_arguments)]
#[inline(always)]
pub(crate) fn blend_pixel(
    top: &[u8],
    top_plane: usize,
    dst: &UnsafeSlice<u8>,
    dst_start: usize,
    dst_plane: usize,
    n_chan: usize,
    softmask: Option<u8>,
    alpha: u8,
    x: usize,
) {
    let mut src_alpha = top[x + n_chan * top_plane] as u32;
    if src_alpha == 0 {
        return;
    }
    let pix_alpha = match softmask {
        Some(soft) => mul255(alpha as u32, soft as u32),
        None => alpha as u32,
    };
    if pix_alpha != 255 {
        src_alpha = mul255(src_alpha, pix_alpha);
        if src_alpha == 0 {
            return;
        }
    }

    let d = dst_start + x;
    let alpha_idx = d + n_chan * dst_plane;
    debug_assert!(alpha_idx < dst.len());
    let dst_alpha = unsafe { dst.read(alpha_idx) } as u32;

    unsafe {
        if dst_alpha == 0 {
            for p in 0..n_chan {
                dst.write(d + p * dst_plane, top[x + p * top_plane]);
            }
            dst.write(alpha_idx, src_alpha as u8);
            return;
        }

        // Union of backdrop and source coverage.
        let t = (255 - dst_alpha) * (255 - src_alpha) + 0x80;
        let a_r = 255 - ((t + (t >> 8)) >> 8);
        dst.write(alpha_idx, a_r as u8);

        // src_alpha / a_r in 16.16
        let scale = (((src_alpha << 16) + (a_r >> 1)) / a_r) as i32;
        for p in 0..n_chan {
            let c_s = top[x + p * top_plane] as i32;
            let c_b = dst.read(d + p * dst_plane) as i32;
            let v = ((c_b << 16) + scale * (c_s - c_b) + 0x8000) >> 16;
            dst.write(d + p * dst_plane, v as u8);
        }
    }
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn blend_row(
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
    for x in 0..width {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mul255_is_exact_division() {
        for a in 0..=255u32 {
            assert_eq!(mul255(a, 255), a);
            assert_eq!(mul255(a, 0), 0);
            for b in [1u32, 17, 128, 200] {
                let expected = ((a * b) as f64 / 255.).round() as u32;
                assert!(
                    mul255(a, b).abs_diff(expected) <= 1,
                    "mul255({a}, {b}) = {}",
                    mul255(a, b)
                );
            }
        }
    }

    /// One pixel of three colour planes plus alpha, planes one byte apart.
    fn blend_one(top: [u8; 4], backdrop: [u8; 4], softmask: Option<u8>, alpha: u8) -> [u8; 4] {
        let mut dst = backdrop;
        let slice = UnsafeSlice::new(&mut dst);
        blend_pixel(&top, 1, &slice, 0, 1, 3, softmask, alpha, 0);
        dst
    }

    #[test]
    fn transparent_source_keeps_backdrop() {
        assert_eq!(blend_one([9, 9, 9, 0], [1, 2, 3, 40], None, 255), [1, 2, 3, 40]);
    }

    #[test]
    fn empty_backdrop_takes_source() {
        assert_eq!(blend_one([9, 8, 7, 255], [1, 2, 3, 0], None, 255), [9, 8, 7, 255]);
        // Group alpha scales the stored coverage only.
        assert_eq!(blend_one([9, 8, 7, 255], [1, 2, 3, 0], None, 128), [9, 8, 7, 128]);
    }

    #[test]
    fn opaque_source_replaces_backdrop() {
        assert_eq!(
            blend_one([200, 100, 0, 255], [10, 20, 30, 255], None, 255),
            [200, 100, 0, 255]
        );
    }

    #[test]
    fn half_coverage_mixes_colors() {
        let out = blend_one([200, 0, 100, 128], [0, 200, 100, 255], None, 255);
        assert_eq!(out[3], 255);
        assert!(out[0].abs_diff(100) <= 1, "{out:?}");
        assert!(out[1].abs_diff(100) <= 1, "{out:?}");
        assert_eq!(out[2], 100);
    }

    #[test]
    fn zero_softmask_keeps_backdrop() {
        assert_eq!(blend_one([9, 9, 9, 255], [1, 2, 3, 255], Some(0), 255), [1, 2, 3, 255]);
        assert_eq!(blend_one([9, 9, 9, 255], [1, 2, 3, 0], Some(0), 255), [1, 2, 3, 0]);
    }

    #[test]
    fn coverage_scaled_to_zero_keeps_empty_backdrop() {
        assert_eq!(blend_one([200, 150, 90, 255], [7, 9, 11, 0], None, 0), [7, 9, 11, 0]);
        // 1 * 1 / 255 rounds to zero.
        assert_eq!(blend_one([200, 150, 90, 1], [7, 9, 11, 0], Some(1), 255), [7, 9, 11, 0]);
    }
}
