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

use crate::rotator::weights::{WEIGHT_ROUND, WEIGHT_SHIFT};

/// Vertical pass: every byte of `dst` is the weighted sum of the same byte in
/// `weights.len()` consecutive ring lines, starting at line `first` and wrapping after
/// `lines`. Ring lines are `dst.len()` bytes apart.
pub(crate) type ZoomRowsFn =
    fn(dst: &mut [u8], ring: &[u8], lines: usize, first: usize, weights: &[i32]);

pub(crate) fn zoom_rows(dst: &mut [u8], ring: &[u8], lines: usize, first: usize, weights: &[i32]) {
    let row_bytes = dst.len();
    for (x, out) in dst.iter_mut().enumerate() {
        let mut line = first;
        let mut acc = WEIGHT_ROUND;
        for &w in weights {
            acc += ring[line * row_bytes + x] as i32 * w;
            line += 1;
            if line == lines {
                line = 0;
            }
        }
        *out = (acc >> WEIGHT_SHIFT).clamp(0, 255) as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_around_the_ring() {
        // Three lines of two bytes, read from line 2 onwards.
        let ring = [10u8, 20, 30, 40, 50, 60];
        let mut dst = [0u8; 2];
        zoom_rows(&mut dst, &ring, 3, 2, &[2048, 2048]);
        assert_eq!(dst, [30, 40]);
    }

    #[test]
    fn negative_lobes_clamp() {
        let ring = [0u8, 255, 255, 0];
        let mut dst = [0u8; 2];
        zoom_rows(&mut dst, &ring, 2, 0, &[-1024, 5120]);
        assert_eq!(dst, [255, 0]);
    }
}
