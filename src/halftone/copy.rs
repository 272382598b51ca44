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

use crate::bresenham::Bresenham;

/// How a source line is resampled into the contone buffer.
///
/// Unit and doubling ratios have dedicated loops. They produce exactly the indices the
/// stepper walk would visit, so the choice only affects speed.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum CopyStrategy {
    Stepper,
    Forward,
    Reverse,
    ForwardDouble,
    ReverseDouble,
}

impl CopyStrategy {
    pub(crate) fn select(brx: &Bresenham) -> CopyStrategy {
        if brx.df == 0 && brx.di == 1 {
            CopyStrategy::Forward
        } else if brx.df == 0 && brx.di == -1 {
            CopyStrategy::Reverse
        } else if brx.df * 2 == brx.d && brx.di == 0 {
            CopyStrategy::ForwardDouble
        } else if brx.df * 2 == brx.d && brx.di == -1 {
            CopyStrategy::ReverseDouble
        } else {
            CopyStrategy::Stepper
        }
    }
}

/// Source index of destination sample `k` for the doubling walks. A leading sample
/// is emitted alone when the stepper starts past the half step.
#[inline(always)]
fn doubled_index(start: i64, k: i64, lead: bool, direction: i64) -> i64 {
    let offset = if lead {
        if k == 0 {
            0
        } else {
            1 + (k - 1) / 2
        }
    } else {
        k / 2
    };
    start + direction * offset
}

/// Feeds `count` resampled samples of `src` to `put` as `(destination index, value)`.
///
/// Source indices outside the line are clamped to its ends; the stepper can land one
/// past the last sample when the destination edge sits exactly on a half pixel.
pub(crate) fn resample_line<F: FnMut(usize, u8)>(
    strategy: CopyStrategy,
    brx: &Bresenham,
    src: &[u8],
    count: usize,
    mut put: F,
) {
    if src.is_empty() || count == 0 {
        return;
    }
    let len = src.len() as i64;
    let start = brx.i as i64;
    let last = count as i64 - 1;
    match strategy {
        CopyStrategy::Forward if start >= 0 && start + last < len => {
            let start = start as usize;
            for (k, &v) in src[start..start + count].iter().enumerate() {
                put(k, v);
            }
        }
        CopyStrategy::Reverse if start < len && start - last >= 0 => {
            let start = start as usize;
            for k in 0..count {
                put(k, src[start - k]);
            }
        }
        CopyStrategy::ForwardDouble => {
            let lead = brx.f <= brx.df;
            if start >= 0 && doubled_index(start, last, lead, 1) < len {
                for k in 0..count {
                    put(k, src[doubled_index(start, k as i64, lead, 1) as usize]);
                }
            } else {
                walk(brx, src, count, put);
            }
        }
        CopyStrategy::ReverseDouble => {
            let lead = brx.f > brx.df;
            if start < len && doubled_index(start, last, lead, -1) >= 0 {
                for k in 0..count {
                    put(k, src[doubled_index(start, k as i64, lead, -1) as usize]);
                }
            } else {
                walk(brx, src, count, put);
            }
        }
        _ => walk(brx, src, count, put),
    }
}

#[inline]
fn walk<F: FnMut(usize, u8)>(brx: &Bresenham, src: &[u8], count: usize, mut put: F) {
    let mut b = *brx;
    let last = src.len() as i64 - 1;
    for k in 0..count {
        let idx = (b.i as i64).clamp(0, last) as usize;
        put(k, src[idx]);
        b.step();
    }
}
