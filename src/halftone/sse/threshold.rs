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

use crate::halftone::threshold::threshold_biased;

pub(crate) fn threshold_sse(halftone: &mut [u8], contone: &[u8], screen: &[u8]) {
    unsafe {
        threshold_sse_impl(halftone, contone, screen);
    }
}

#[target_feature(enable = "sse4.1")]
unsafe fn threshold_sse_impl(halftone: &mut [u8], contone: &[u8], screen: &[u8]) {
    let bias = _mm_set1_epi8(0x80u8 as i8);
    // movemask collects bit 0 first, the output wants each byte MSB first.
    let reverse = _mm_setr_epi8(7, 6, 5, 4, 3, 2, 1, 0, 15, 14, 13, 12, 11, 10, 9, 8);

    let length = contone.len().min(screen.len()).min(halftone.len() * 8);
    let contone = &contone[..length];
    let screen = &screen[..length];

    let contone_chunks = contone.chunks_exact(16);
    let screen_chunks = screen.chunks_exact(16);
    let contone_rem = contone_chunks.remainder();
    let screen_rem = screen_chunks.remainder();
    let mut dst_chunks = halftone.chunks_exact_mut(2);

    for ((c, s), dst) in contone_chunks.zip(screen_chunks).zip(&mut dst_chunks) {
        let vc = _mm_xor_si128(_mm_loadu_si128(c.as_ptr() as *const __m128i), bias);
        let vs = _mm_loadu_si128(s.as_ptr() as *const __m128i);
        let diff = _mm_subs_epi8(vc, vs);
        let ordered = _mm_shuffle_epi8(diff, reverse);
        let bits = _mm_movemask_epi8(ordered) as u16;
        dst.copy_from_slice(&bits.to_le_bytes());
    }

    if !contone_rem.is_empty() {
        let done = (length - contone_rem.len()) / 8;
        threshold_biased(&mut halftone[done..], contone_rem, screen_rem);
    }
}
