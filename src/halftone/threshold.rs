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

/// Signature shared by every threshold kernel: `(halftone, contone, screen)`.
///
/// `contone` and `screen` have equal length, a multiple of 8, and `halftone` holds one
/// bit per sample.
pub(crate) type ThresholdFn = fn(&mut [u8], &[u8], &[u8]);

/// How screen tiles are stored for a kernel.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum ScreenForm {
    /// Raw threshold values, bitwise inverted for inverted screens.
    Plain,
    /// Values biased by `0x80` so that a signed byte compare orders them, `0x7f` for
    /// inverted screens.
    Biased,
}

impl ScreenForm {
    #[inline]
    pub(crate) fn encode(self, value: u8, invert: bool) -> u8 {
        match (self, invert) {
            (ScreenForm::Plain, false) => value,
            (ScreenForm::Plain, true) => !value,
            (ScreenForm::Biased, false) => value ^ 0x80,
            (ScreenForm::Biased, true) => value ^ 0x7f,
        }
    }
}

/// Sets a bit, MSB first, for every sample darker than its screen value.
pub(crate) fn threshold_scalar(halftone: &mut [u8], contone: &[u8], screen: &[u8]) {
    for ((dst, c), s) in halftone
        .iter_mut()
        .zip(contone.chunks_exact(8))
        .zip(screen.chunks_exact(8))
    {
        let mut byte = 0u8;
        for (&c, &s) in c.iter().zip(s.iter()) {
            byte = (byte << 1) | (c < s) as u8;
        }
        *dst = byte;
    }
}

/// Scalar counterpart of the accelerated kernels, reading biased screens.
pub(crate) fn threshold_biased(halftone: &mut [u8], contone: &[u8], screen: &[u8]) {
    for ((dst, c), s) in halftone
        .iter_mut()
        .zip(contone.chunks_exact(8))
        .zip(screen.chunks_exact(8))
    {
        let mut byte = 0u8;
        for (&c, &s) in c.iter().zip(s.iter()) {
            byte = (byte << 1) | (((c ^ 0x80) as i8) < (s as i8)) as u8;
        }
        *dst = byte;
    }
}

/// Picks the kernel and matching screen storage for the accelerated switch.
pub(crate) fn select_threshold(use_simd: bool) -> (ThresholdFn, ScreenForm) {
    #[cfg(all(any(target_arch = "x86_64", target_arch = "x86"), feature = "sse"))]
    {
        if use_simd && std::arch::is_x86_feature_detected!("sse4.1") {
            use crate::halftone::sse::threshold_sse;
            return (threshold_sse, ScreenForm::Biased);
        }
    }
    #[cfg(all(target_arch = "aarch64", feature = "neon"))]
    {
        if use_simd {
            use crate::halftone::neon::threshold_neon;
            return (threshold_neon, ScreenForm::Biased);
        }
    }
    let _ = use_simd;
    (threshold_scalar, ScreenForm::Plain)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bits_are_msb_first() {
        let contone = [0u8, 255, 255, 255, 255, 255, 255, 0];
        let screen = [128u8; 8];
        let mut out = [0u8; 1];
        threshold_scalar(&mut out, &contone, &screen);
        assert_eq!(out[0], 0b1000_0001);
    }

    #[test]
    fn equal_values_stay_clear() {
        let contone = [77u8; 16];
        let mut out = [0xAAu8; 2];
        threshold_scalar(&mut out, &contone, &contone);
        assert_eq!(out, [0, 0]);
    }

    #[test]
    fn biased_screens_agree_with_plain() {
        let contone: Vec<u8> = (0..256u32).map(|x| (x * 7 % 256) as u8).collect();
        let raw: Vec<u8> = (0..256u32).map(|x| (x * 13 % 256) as u8).collect();
        for invert in [false, true] {
            let plain: Vec<u8> = raw.iter().map(|&v| ScreenForm::Plain.encode(v, invert)).collect();
            let biased: Vec<u8> = raw
                .iter()
                .map(|&v| ScreenForm::Biased.encode(v, invert))
                .collect();
            let mut a = vec![0u8; 32];
            let mut b = vec![0u8; 32];
            threshold_scalar(&mut a, &contone, &plain);
            threshold_biased(&mut b, &contone, &biased);
            assert_eq!(a, b, "Biased storage diverged, invert {invert}");
        }
    }

    #[test]
    fn selected_kernel_matches_scalar() {
        let contone: Vec<u8> = (0..512u32).map(|x| (x * 31 % 251) as u8).collect();
        let raw: Vec<u8> = (0..512u32).map(|x| (x * 17 % 256) as u8).collect();
        let (kernel, form) = select_threshold(true);
        let screen: Vec<u8> = raw.iter().map(|&v| form.encode(v, false)).collect();
        let mut fast = vec![0u8; 64];
        let mut slow = vec![0u8; 64];
        kernel(&mut fast, &contone, &screen);
        threshold_scalar(&mut slow, &contone, &raw);
        assert_eq!(fast, slow);
    }
}
