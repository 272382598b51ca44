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

/// Floor division that treats a zero divisor as one. Returns `(quotient, remainder)`
/// with a non-negative remainder.
#[inline]
pub(crate) fn divmod(n: i64, d: i64) -> (i64, i64) {
    let d = if d == 0 { 1 } else { d };
    let i = n.div_euclid(d);
    (i, n - i * d)
}

/// Fixed point rational stepper.
///
/// At any instant the represented value is `i + (d - f) / d`, with `0 < f <= d`.
/// Every [Bresenham::step] advances it by `n / (e - s)` where positions are in 24.8
/// fixed point, so walking a destination extent yields the source sample under each
/// destination pixel centre without accumulating drift.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) struct Bresenham {
    pub(crate) i: i32,
    pub(crate) f: i32,
    pub(crate) d: i32,
    pub(crate) di: i32,
    pub(crate) df: i32,
}

impl Bresenham {
    /// Starts at source index `i`, moving `n` source samples across the destination
    /// range `s..e` (24.8 fixed point), positioned at the centre of the first
    /// destination pixel.
    pub(crate) fn new(i: i32, n: i32, e: i32, s: i32) -> Bresenham {
        let d = (e as i64 - s as i64).max(1);
        let (di, df) = divmod((n as i64) << 8, d);
        let step = (((s as i64 + 127) & !255) + 128) - s as i64;
        let (step_i, step_f) = divmod(n as i64 * step, d);
        let mut stepper = Bresenham {
            i: (i as i64 + step_i) as i32,
            f: (d - step_f) as i32,
            d: d as i32,
            di: di as i32,
            df: df as i32,
        };
        if stepper.f <= 0 {
            stepper.i += 1;
            stepper.f = stepper.d;
        }
        stepper
    }

    #[inline(always)]
    pub(crate) fn step(&mut self) {
        self.i += self.di;
        self.f -= self.df;
        if self.f <= 0 {
            self.f += self.d;
            self.i += 1;
        }
    }

    #[inline]
    pub(crate) fn advance(&mut self, steps: i32) {
        for _ in 0..steps.max(0) {
            self.step();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walk(mut b: Bresenham, count: usize) -> Vec<i32> {
        let mut out = Vec::with_capacity(count);
        for _ in 0..count {
            out.push(b.i);
            b.step();
        }
        out
    }

    #[test]
    fn divmod_floors_toward_negative_infinity() {
        assert_eq!(divmod(7, 2), (3, 1));
        assert_eq!(divmod(-7, 2), (-4, 1));
        assert_eq!(divmod(-8, 2), (-4, 0));
        assert_eq!(divmod(5, 0), (5, 0));
    }

    #[test]
    fn identity_visits_every_sample_once() {
        let b = Bresenham::new(0, 8, 8 << 8, 0);
        assert_eq!(b.di, 1);
        assert_eq!(b.df, 0);
        assert_eq!(walk(b, 8), (0..8).collect::<Vec<_>>());
    }

    #[test]
    fn upscale_by_two_repeats_each_sample() {
        let b = Bresenham::new(0, 4, 8 << 8, 0);
        assert_eq!(b.di, 0);
        assert_eq!(b.df * 2, b.d);
        assert_eq!(walk(b, 8), vec![0, 0, 1, 1, 2, 2, 3, 3]);
    }

    #[test]
    fn downscale_by_two_skips_samples() {
        let b = Bresenham::new(0, 8, 4 << 8, 0);
        assert_eq!(walk(b, 4), vec![1, 3, 5, 7]);
    }

    #[test]
    fn rational_ratio_covers_source() {
        // 3 source samples over 5 destination pixels.
        let b = Bresenham::new(0, 3, 5 << 8, 0);
        let seq = walk(b, 5);
        assert!(seq.windows(2).all(|w| w[0] <= w[1]), "Sequence must not decrease {seq:?}");
        for k in 0..3 {
            assert!(seq.contains(&k), "Sample {k} missing from {seq:?}");
        }
        assert_eq!(*seq.last().unwrap(), 2);
    }

    #[test]
    fn reverse_walk_descends() {
        let b = Bresenham::new(6, -6, 6 << 8, 0);
        assert_eq!(walk(b, 6), vec![5, 4, 3, 2, 1, 0]);
    }

    #[test]
    fn advance_matches_repeated_steps() {
        let mut a = Bresenham::new(0, 7, 13 << 8, 0);
        let mut b = a;
        a.advance(9);
        for _ in 0..9 {
            b.step();
        }
        assert_eq!(a, b);
    }
}
