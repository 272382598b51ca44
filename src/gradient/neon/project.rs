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

use crate::gradient::render::{axial_row, radial_row};

static LANES: [f32; 4] = [0., 1., 2., 3.];

pub(crate) fn axial_row_neon(dst: &mut [f32], x0: f32, axis_x: f32, cos: f32, row_term: f32) {
    unsafe {
        let lanes = vld1q_f32(LANES.as_ptr());
        let v_axis = vdupq_n_f32(axis_x);
        let v_cos = vdupq_n_f32(cos);
        let v_row = vdupq_n_f32(row_term);

        let mut chunks = dst.chunks_exact_mut(4);
        let mut x = 0usize;
        for chunk in &mut chunks {
            let xs = vaddq_f32(vdupq_n_f32(x0 + x as f32), lanes);
            let gx = vsubq_f32(xs, v_axis);
            // Separate multiply and add, a fused step would round differently.
            let projected = vaddq_f32(vmulq_f32(gx, v_cos), v_row);
            vst1q_f32(chunk.as_mut_ptr(), projected);
            x += 4;
        }
        let rem = chunks.into_remainder();
        if !rem.is_empty() {
            axial_row(rem, x0 + x as f32, axis_x, cos, row_term);
        }
    }
}

pub(crate) fn radial_row_neon(dst: &mut [f32], x0: f32, center_x: f32, dy2: f32) {
    unsafe {
        let lanes = vld1q_f32(LANES.as_ptr());
        let v_center = vdupq_n_f32(center_x);
        let v_dy2 = vdupq_n_f32(dy2);

        let mut chunks = dst.chunks_exact_mut(4);
        let mut x = 0usize;
        for chunk in &mut chunks {
            let xs = vaddq_f32(vdupq_n_f32(x0 + x as f32), lanes);
            let dx = vsubq_f32(xs, v_center);
            let distance = vsqrtq_f32(vaddq_f32(vmulq_f32(dx, dx), v_dy2));
            vst1q_f32(chunk.as_mut_ptr(), distance);
            x += 4;
        }
        let rem = chunks.into_remainder();
        if !rem.is_empty() {
            radial_row(rem, x0 + x as f32, center_x, dy2);
        }
    }
}
