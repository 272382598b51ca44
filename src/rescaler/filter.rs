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

use crate::rotator::weights::{mitchell, TapIndex, WeightTable, WEIGHT_SCALE};

/// Reconstruction filter of a [Rescaler](crate::Rescaler).
///
/// Reductions always use [RescaleQuality::DogLeg] along the reduced axis.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum RescaleQuality {
    /// Closest source sample.
    Nearest,
    /// Tent over one sample each side.
    Linear,
    /// Smoothstep `1 + (2t - 3)t²` over one sample each side.
    DogLeg,
    /// Mitchell-Netravali cubic over two samples each side.
    #[default]
    Mitchell,
}

impl RescaleQuality {
    #[inline]
    fn support(self) -> f64 {
        match self {
            RescaleQuality::Mitchell => 2.,
            _ => 1.,
        }
    }

    #[inline]
    fn weight(self, t: f64) -> f64 {
        let t = t.abs();
        match self {
            RescaleQuality::Nearest => {
                if t > 0.5 {
                    0.
                } else {
                    1.
                }
            }
            RescaleQuality::Linear => {
                if t >= 1. {
                    0.
                } else {
                    1. - t
                }
            }
            RescaleQuality::DogLeg => {
                if t >= 1. {
                    0.
                } else {
                    1. + (2. * t - 3.) * t * t
                }
            }
            RescaleQuality::Mitchell => mitchell(t),
        }
    }

    /// Filter used along an axis mapping `src` samples onto `dst`.
    pub(crate) fn for_axis(self, src: usize, dst: usize) -> RescaleQuality {
        if dst < src {
            RescaleQuality::DogLeg
        } else {
            self
        }
    }
}

/// Weights for outputs `patch_x..patch_x + patch_w` of an axis mapping `src_w` samples
/// onto `dst_w`.
///
/// Output `i` is centred at `(i + 0.5) * src_w / dst_w - 0.5`, kept as a rational so
/// every patch of an axis sees the same windows. Taps past either edge repeat the edge
/// sample. Pixel positions are relative to `data_x`.
pub(crate) fn contributions(
    src_w: usize,
    dst_w: usize,
    patch_x: usize,
    patch_w: usize,
    data_x: usize,
    quality: RescaleQuality,
) -> WeightTable {
    let scale = dst_w as f64 / src_w as f64;
    let support = quality.support();
    let (width_in, fscale) = if scale < 1. {
        (support / scale, 1. / scale)
    } else {
        (support, 1.)
    };
    let denom = (dst_w * 2) as f64;
    let src_last = src_w as i64 - 1;

    let mut table = WeightTable {
        taps: Vec::with_capacity(patch_w),
        weights: Vec::with_capacity(patch_w * ((width_in * 2.) as usize + 1)),
    };
    let mut raw = Vec::new();

    for i in 0..patch_w {
        let num = ((i + patch_x) as i64 * src_w as i64 * 2 + src_w as i64 - dst_w as i64) as f64;
        let left = ((num - width_in * denom) / denom).ceil() as i64;
        let right = ((num + width_in * denom) / denom).floor() as i64;
        let centre = num / denom;
        let first = left.clamp(0, src_last);
        let last = right.clamp(first, src_last);

        raw.clear();
        raw.extend((left..=right).map(|j| quality.weight((centre - j as f64) / fscale) / fscale));
        let sum: f64 = raw.iter().sum();

        let start = table.weights.len();
        let n = (last - first + 1) as usize;
        table.weights.resize(start + n, 0);
        if sum != 0. {
            for (j, &w) in (left..=right).zip(raw.iter()) {
                let k = (j.clamp(first, src_last) - first) as usize;
                table.weights[start + k] += (w / sum * WEIGHT_SCALE + 0.5) as i32;
            }
        }

        table.taps.push(TapIndex {
            index: start,
            n,
            slow: false,
            first_pixel: (first - data_x as i64) as i32,
            last_pixel: (last - data_x as i64) as i32,
        });
    }
    table
}
