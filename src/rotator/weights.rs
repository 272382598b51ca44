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

pub(crate) const WEIGHT_SHIFT: i32 = 12;
pub(crate) const WEIGHT_SCALE: f64 = (1 << WEIGHT_SHIFT) as f64;
pub(crate) const WEIGHT_ROUND: i32 = 1 << (WEIGHT_SHIFT - 1);
/// Sub pixel phases tabulated per axis.
pub(crate) const SUB_PIX: usize = 4;
const FILTER_WIDTH: f64 = 2.;
const MAX_TAPS: usize = 10;

/// Contributors of one output sample: `n` weights starting at `index`, applied to
/// source samples `first_pixel..=last_pixel`.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub(crate) struct TapIndex {
    pub(crate) index: usize,
    pub(crate) n: usize,
    /// Some taps fall outside the source and read the background.
    pub(crate) slow: bool,
    pub(crate) first_pixel: i32,
    pub(crate) last_pixel: i32,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct WeightTable {
    pub(crate) taps: Vec<TapIndex>,
    pub(crate) weights: Vec<i32>,
}

/// Mitchell-Netravali cubic with B = C = 1/3.
pub(crate) fn mitchell(t: f64) -> f64 {
    const B: f32 = 1. / 3.;
    const C: f32 = 1. / 3.;
    let t = t.abs();
    let t2 = t * t;
    if t < 1. {
        ((12. - 9. * B - 6. * C) as f64 * (t * t2)
            + (-18. + 12. * B + 6. * C) as f64 * t2
            + (6. - 2. * B) as f64)
            / 6.
    } else if t < 2. {
        ((-B - 6. * C) as f64 * (t * t2)
            + (6. * B + 30. * C) as f64 * t2
            + (-12. * B - 48. * C) as f64 * t
            + (8. * B + 24. * C) as f64)
            / 6.
    } else {
        0.
    }
}

#[inline]
fn weight(centre: f64, j: i32, squeeze: f64) -> i32 {
    (mitchell((centre - j as f64) / squeeze) * WEIGHT_SCALE / squeeze) as i32
}

/// Integer window strictly inside `centre ± half`.
#[inline]
fn window(centre: f64, half: f64) -> (i32, i32) {
    let mut left = (centre - half).ceil() as i32;
    let mut right = (centre + half).floor() as i32;
    if centre - left as f64 >= half {
        left += 1;
    }
    if right as f64 - centre >= half {
        right -= 1;
    }
    (left, right)
}

/// Horizontal resampling weights mapping `dst_w` outputs onto `src_w` inputs, output
/// `i` centred at `(i + 0.5) * factor - offset` in source space.
///
/// Taps left of the source fold into a single leading background slot and taps right
/// of it into the last slot, which reads background when it sits at `src_w`.
pub(crate) fn x_weights(src_w: usize, dst_w: usize, factor: f64, offset: f64) -> WeightTable {
    let (squeeze, max_taps) = if factor <= 1. {
        (1., 1 + 2 * FILTER_WIDTH as usize)
    } else {
        let taps = (1. + factor * FILTER_WIDTH * 2.).ceil() as usize;
        if taps > MAX_TAPS {
            (MAX_TAPS as f64 / (FILTER_WIDTH * 2.), MAX_TAPS)
        } else {
            (factor, taps)
        }
    };
    let half = squeeze * FILTER_WIDTH;
    let src_end = src_w as i32;

    let mut table = WeightTable {
        taps: Vec::with_capacity(dst_w),
        weights: Vec::with_capacity(dst_w * max_taps),
    };

    for i in 0..dst_w {
        let mut centre = (i as f64 + 0.5) * factor - offset;
        let (mut left, mut right) = window(centre, half);

        // Sub pixel phases can push the last outputs past the source end.
        if left > src_end {
            right -= left - src_end;
            centre -= (left - src_end) as f64;
            left = src_end;
        }

        let start = table.weights.len();
        let mut j = left;
        let mut first_pixel = left;
        if j < 0 {
            first_pixel = -1;
            let mut folded = 0;
            while j < 0 && j <= right {
                folded += weight(centre, j, squeeze);
                j += 1;
            }
            table.weights.push(folded);
            j = j.max(0);
        }
        let last_pixel = right.min(src_end);
        while j <= last_pixel {
            table.weights.push(weight(centre, j, squeeze));
            j += 1;
        }
        if let Some(tail) = table.weights[start..].last_mut() {
            while j <= right {
                *tail += weight(centre, j, squeeze);
                j += 1;
            }
        }

        let n = table.weights.len() - start;
        table.taps.push(TapIndex {
            index: start,
            n,
            slow: first_pixel < 0 || last_pixel >= src_end,
            first_pixel,
            last_pixel,
        });
    }
    table
}

/// Vertical weights for the diagonal read: column `i` is centred at
/// `(i + 0.5) * factor2 + offset` rows, with a filter sized for the vertical `factor`.
///
/// `first_pixel` is not wrapped; the ring position is taken modulo its height at use.
pub(crate) fn y_weights(width: usize, factor: f64, factor2: f64, offset: f64) -> WeightTable {
    let squeeze = if factor >= 1. {
        1.
    } else {
        let squeeze = 1. / factor;
        let taps = (squeeze * FILTER_WIDTH * 2.).ceil() as usize;
        if taps > MAX_TAPS {
            MAX_TAPS as f64 / (FILTER_WIDTH * 2.)
        } else {
            squeeze
        }
    };
    let half = squeeze * FILTER_WIDTH;

    let mut offset = offset + FILTER_WIDTH / squeeze;
    if factor2 < 0. && width > 0 {
        offset -= (width - 1) as f64 * factor2;
    }

    let mut table = WeightTable {
        taps: Vec::with_capacity(width),
        weights: Vec::new(),
    };
    for i in 0..width {
        let centre = (i as f64 + 0.5) * factor2 + offset;
        let (left, right) = window(centre, half);
        let start = table.weights.len();
        for j in left..=right {
            table.weights.push(weight(centre, j, squeeze));
        }
        table.taps.push(TapIndex {
            index: start,
            n: table.weights.len() - start,
            slow: false,
            first_pixel: left,
            last_pixel: right,
        });
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mitchell_is_a_partition_of_unity() {
        for phase in [0., 0.125, 0.25, 0.5, 0.8] {
            let sum: f64 = (-3..=3).map(|k| mitchell(k as f64 + phase)).sum();
            assert!((sum - 1.).abs() < 1e-5, "Sum was {sum} at phase {phase}");
        }
        assert_eq!(mitchell(2.), 0.);
        assert!((mitchell(0.) - 8. / 9.).abs() < 1e-6);
    }

    #[test]
    fn unit_x_weights_sum_to_scale() {
        let table = x_weights(16, 16, 1., 0.);
        assert_eq!(table.taps.len(), 16);
        for tap in &table.taps[2..14] {
            assert!(!tap.slow);
            let sum: i32 = table.weights[tap.index..tap.index + tap.n].iter().sum();
            assert!(
                (4090..=4096).contains(&sum),
                "Weights must sum close to unity, got {sum}"
            );
        }
    }

    #[test]
    fn edges_are_marked_slow() {
        let table = x_weights(8, 8, 1., 0.);
        let first = table.taps[0];
        assert!(first.slow);
        assert_eq!(first.first_pixel, -1);
        let last = table.taps[7];
        assert!(last.slow);
        assert_eq!(last.last_pixel, 8);
        let total: i32 = table.weights[first.index..first.index + first.n].iter().sum();
        assert!((4090..=4096).contains(&total), "Folded weights lost, got {total}");
    }

    #[test]
    fn downscale_widens_filter() {
        let table = x_weights(40, 10, 4., 0.);
        // Centre 22 with a half width of 5, both ends excluded.
        let tap = table.taps[5];
        assert_eq!((tap.first_pixel, tap.last_pixel), (18, 26));
        assert_eq!(tap.n, 9);
        assert!(!tap.slow);
    }

    #[test]
    fn y_weights_follow_slope() {
        let up = y_weights(8, 1., 0.5, 0.);
        let down = y_weights(8, 1., -0.5, 0.);
        assert!(up.taps[7].first_pixel > up.taps[0].first_pixel);
        assert!(down.taps[7].first_pixel < down.taps[0].first_pixel);
        for tap in up.taps.iter().chain(down.taps.iter()) {
            assert!(tap.first_pixel >= 0, "Rows before the ring start: {tap:?}");
        }
    }
}
