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

use crate::halftone::threshold::threshold_biased;

static BIT_WEIGHTS: [u8; 16] = [128, 64, 32, 16, 8, 4, 2, 1, 128, 64, 32, 16, 8, 4, 2, 1];

pub(crate) fn threshold_neon(halftone: &mut [u8], contone: &[u8], screen: &[u8]) {
    unsafe {
        let bias = vdupq_n_u8(0x80);
        let weights = vld1q_u8(BIT_WEIGHTS.as_ptr());

        let length = contone.len().min(screen.len()).min(halftone.len() * 8);
        let contone = &contone[..length];
        let screen = &screen[..length];

        let contone_chunks = contone.chunks_exact(16);
        let screen_chunks = screen.chunks_exact(16);
        let contone_rem = contone_chunks.remainder();
        let screen_rem = screen_chunks.remainder();
        let mut dst_chunks = halftone.chunks_exact_mut(2);

        for ((c, s), dst) in contone_chunks.zip(screen_chunks).zip(&mut dst_chunks) {
            let vc = vreinterpretq_s8_u8(veorq_u8(vld1q_u8(c.as_ptr()), bias));
            let vs = vreinterpretq_s8_u8(vld1q_u8(s.as_ptr()));
            let mask = vandq_u8(vcltq_s8(vc, vs), weights);
            dst[0] = vaddv_u8(vget_low_u8(mask));
            dst[1] = vaddv_u8(vget_high_u8(mask));
        }

        if !contone_rem.is_empty() {
            let done = (length - contone_rem.len()) / 8;
            threshold_biased(&mut halftone[done..], contone_rem, screen_rem);
        }
    }
}
