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

/// Fixed point separable kernel, one weight row per output phase.
///
/// Output sample `j` of an axis enlarged by `factor` sits at source coordinate
/// `(j + 0.5) / factor - 0.5`. With `k = j + factor / 2` it takes phase `k % factor`
/// and its taps start at source index `k / factor - 1 - lead`.
#[derive(Debug, Copy, Clone)]
pub(crate) struct Kernel {
    pub(crate) taps: usize,
    pub(crate) lead: usize,
    pub(crate) shift: u32,
    pub(crate) phases: &'static [[i32; 4]],
}

const INTERP_X2: [[i32; 4]; 2] = [[3, 1, 0, 0], [1, 3, 0, 0]];

const INTERP_X4: [[i32; 4]; 4] = [[15, 1, 0, 0], [10, 6, 0, 0], [6, 10, 0, 0], [1, 15, 0, 0]];

// Mitchell-Netravali (B = C = 1/3) sampled at the phase offsets, Q10.
const MITCHELL_X2: [[i32; 4]; 2] = [[-24, 801, 262, -15], [-15, 262, 801, -24]];

const MITCHELL_X4: [[i32; 4]; 4] = [
    [5, 881, 143, -5],
    [-36, 685, 402, -27],
    [-27, 402, 685, -36],
    [-5, 143, 881, 5],
];

impl Kernel {
    pub(crate) fn interp(factor: usize) -> Kernel {
        Kernel {
            taps: 2,
            lead: 0,
            shift: if factor == 4 { 4 } else { 2 },
            phases: if factor == 4 { &INTERP_X4 } else { &INTERP_X2 },
        }
    }

    pub(crate) fn mitchell(factor: usize) -> Kernel {
        Kernel {
            taps: 4,
            lead: 1,
            shift: 10,
            phases: if factor == 4 {
                &MITCHELL_X4
            } else {
                &MITCHELL_X2
            },
        }
    }

    #[inline]
    pub(crate) fn round(&self) -> i32 {
        1 << (2 * self.shift - 1)
    }
}

/// Taps of one output column, already clamped to the source row.
#[derive(Debug, Copy, Clone, Default)]
pub(crate) struct Column {
    pub(crate) x: [usize; 4],
    pub(crate) phase: usize,
}

pub(crate) fn columns(kernel: &Kernel, src_w: usize, factor: usize) -> Vec<Column> {
    let last = src_w as isize - 1;
    (0..src_w * factor)
        .map(|j| {
            let k = j + factor / 2;
            let base = (k / factor) as isize - 1 - kernel.lead as isize;
            let mut x = [0usize; 4];
            for (t, x) in x.iter_mut().take(kernel.taps).enumerate() {
                *x = (base + t as isize).clamp(0, last) as usize;
            }
            Column {
                x,
                phase: k % factor,
            }
        })
        .collect()
}

/// Combines the window lines with the phase weights into `dst`.
pub(crate) fn combine_vertical(dst: &mut [i32], rows: &[&[u8]], weights: &[i32; 4]) {
    for (i, dst) in dst.iter_mut().enumerate() {
        let mut acc = 0i32;
        for (row, &w) in rows.iter().zip(weights.iter()) {
            acc += w * row[i] as i32;
        }
        *dst = acc;
    }
}

/// Filters a vertically combined line across, rounding out both weight scales.
pub(crate) fn filter_horizontal(
    dst: &mut [u8],
    combined: &[i32],
    columns: &[Column],
    kernel: &Kernel,
    channels: usize,
) {
    let round = kernel.round();
    let shift = 2 * kernel.shift;
    for (px, column) in dst.chunks_exact_mut(channels).zip(columns.iter()) {
        let weights = &kernel.phases[column.phase];
        for (c, dst) in px.iter_mut().enumerate() {
            let mut acc = round;
            for t in 0..kernel.taps {
                acc += weights[t] * combined[column.x[t] * channels + c];
            }
            *dst = (acc >> shift).clamp(0, 255) as u8;
        }
    }
}

/// Replicates every pixel of `src` `factor` times across.
pub(crate) fn replicate_row(dst: &mut [u8], src: &[u8], factor: usize, channels: usize) {
    for (dst, px) in dst
        .chunks_exact_mut(channels * factor)
        .zip(src.chunks_exact(channels))
    {
        for d in dst.chunks_exact_mut(channels) {
            d.copy_from_slice(px);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_weights_are_normalized() {
        for factor in [2, 4] {
            for kernel in [Kernel::interp(factor), Kernel::mitchell(factor)] {
                assert_eq!(kernel.phases.len(), factor);
                for weights in kernel.phases {
                    let sum: i32 = weights.iter().sum();
                    assert_eq!(sum, 1 << kernel.shift, "Weights {weights:?}");
                }
            }
        }
    }

    #[test]
    fn columns_clamp_at_edges() {
        let kernel = Kernel::mitchell(2);
        let columns = columns(&kernel, 5, 2);
        assert_eq!(columns.len(), 10);
        assert_eq!(columns[0].x, [0, 0, 0, 1]);
        assert_eq!(columns[0].phase, 1);
        assert_eq!(columns[1].x, [0, 0, 1, 2]);
        assert_eq!(columns[1].phase, 0);
        assert_eq!(columns[9].x, [3, 4, 4, 4]);
        assert_eq!(columns[9].phase, 0);
    }

    #[test]
    fn replicate_row_repeats_pixels() {
        let mut dst = [0u8; 12];
        replicate_row(&mut dst, &[1, 2, 3, 4], 3, 2);
        assert_eq!(dst, [1, 2, 1, 2, 1, 2, 3, 4, 3, 4, 3, 4]);
    }
}
