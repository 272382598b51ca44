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

use crate::context::{AlignedBlock, Context};
use crate::rescaler::filter::{contributions, RescaleQuality};
use crate::rescaler::zoom::{zoom_rows, ZoomRowsFn};
use crate::rotator::weights::WeightTable;
use crate::rotator::zoom::{zoom_x, ZoomXFn};
use crate::safe_math::{SafeAdd, SafeMul};
use crate::util::MismatchedSize;
use crate::IpaError;
use std::ops::Range;

/// Sub rectangle of a source or destination image.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct RescaleRect {
    pub x: usize,
    pub y: usize,
    pub w: usize,
    pub h: usize,
}

impl RescaleRect {
    pub fn new(x: usize, y: usize, w: usize, h: usize) -> RescaleRect {
        RescaleRect { x, y, w, h }
    }

    /// The whole of a `w`×`h` image.
    pub fn full(w: usize, h: usize) -> RescaleRect {
        RescaleRect { x: 0, y: 0, w, h }
    }

    fn fits(&self, w: usize, h: usize) -> bool {
        self.x.checked_add(self.w).is_some_and(|r| r <= w)
            && self.y.checked_add(self.h).is_some_and(|b| b <= h)
    }
}

/// Outcome of one [Rescaler::process] call.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum RescaleStep {
    /// A source line is needed before the next output line, but none was given.
    NeedInput,
    /// The given source line was taken.
    Consumed,
    /// The next output line was written and the input, if any, was left untouched.
    Emitted,
    /// Every output line has been written.
    Finished,
}

/// Separable resampler from a `src_w`×`src_h` image to `dst_w`×`dst_h`, streamed a line
/// at a time.
///
/// Only the `data` rectangle of the source is supplied, one line per call, and only the
/// `patch` rectangle of the destination is produced. Source lines are scaled
/// horizontally into a ring as they arrive; an output line is blended from the ring as
/// soon as its last contributing source line is in.
pub struct Rescaler<'ctx> {
    channels: usize,
    data: RescaleRect,
    patch: RescaleRect,
    x: WeightTable,
    y: WeightTable,
    src_rows: Range<usize>,
    ring: AlignedBlock<'ctx>,
    lines: usize,
    src_y: usize,
    dst_y: usize,
    zoom_x: ZoomXFn,
    zoom_rows: ZoomRowsFn,
}

impl<'ctx> Rescaler<'ctx> {
    /// Builds the filter tables and the line ring.
    ///
    /// `data` must lie within the source and cover every source sample `patch` reads,
    /// and `patch` must lie within the destination.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        ctx: &'ctx Context,
        src_w: usize,
        src_h: usize,
        data: RescaleRect,
        dst_w: usize,
        dst_h: usize,
        patch: RescaleRect,
        quality: RescaleQuality,
        channels: usize,
    ) -> Result<Rescaler<'ctx>, IpaError> {
        if channels == 0 || channels > 4 {
            return Err(IpaError::InvalidChannels(channels));
        }
        if src_w == 0 || src_h == 0 || dst_w == 0 || dst_h == 0 {
            return Err(IpaError::ZeroBaseSize);
        }
        if !data.fits(src_w, src_h) || !patch.fits(dst_w, dst_h) {
            return Err(IpaError::InvalidArguments);
        }
        // Rational centres are kept in i64 numerators.
        src_w.safe_mul(dst_w)?.safe_mul(4)?;
        src_h.safe_mul(dst_h)?.safe_mul(4)?;
        let row_bytes = patch.w.safe_mul(channels)?;
        data.w.safe_mul(channels)?;

        let horizontal = quality.for_axis(src_w, dst_w);
        let vertical = quality.for_axis(src_h, dst_h);
        let x = contributions(src_w, dst_w, patch.x, patch.w, data.x, horizontal);
        let y = contributions(src_h, dst_h, patch.y, patch.h, data.y, vertical);

        let covered = |table: &WeightTable, extent: usize| {
            table
                .taps
                .iter()
                .all(|t| t.first_pixel >= 0 && (t.last_pixel as i64) < extent as i64)
        };
        if !covered(&x, data.w) || !covered(&y, data.h) {
            return Err(IpaError::InvalidArguments);
        }

        let src_rows = match (
            y.taps.iter().map(|t| t.first_pixel as usize).min(),
            y.taps.iter().map(|t| t.last_pixel as usize + 1).max(),
        ) {
            (Some(first), Some(end)) => first..end,
            _ => 0..0,
        };
        let lines = y.taps.iter().map(|t| t.n).max().unwrap_or(1).max(1);
        let ring = ctx.alloc_aligned(row_bytes.safe_mul(lines)?, 16)?;

        let (zoom_x, zoom_rows) = select_zoom(channels, ctx.use_simd());

        log::debug!(
            "Rescaler {}x{} (data {:?}) into {}x{} (patch {:?}), {:?} x {:?}, {} channels, ring {}, simd {}",
            src_w,
            src_h,
            data,
            dst_w,
            dst_h,
            patch,
            horizontal,
            vertical,
            channels,
            lines,
            ctx.use_simd()
        );

        Ok(Rescaler {
            channels,
            data,
            patch,
            x,
            y,
            src_rows,
            ring,
            lines,
            src_y: 0,
            dst_y: 0,
            zoom_x,
            zoom_rows,
        })
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Destination rectangle this instance produces.
    pub fn patch(&self) -> RescaleRect {
        self.patch
    }

    /// Lines of the data rectangle that contribute to the patch; the others are
    /// consumed without being read.
    pub fn source_rows(&self) -> Range<usize> {
        self.src_rows.clone()
    }

    /// Advances by one step.
    ///
    /// `input` is the next line of the data rectangle, `data.w` pixels wide. When an
    /// output line is ready it is written to `output` (`patch.w` pixels) instead, and
    /// the same input must be offered again. Input given after the last output line is
    /// swallowed.
    pub fn process(
        &mut self,
        input: Option<&[u8]>,
        output: &mut [u8],
    ) -> Result<RescaleStep, IpaError> {
        let ch = self.channels;
        if self.dst_y == self.patch.h {
            return Ok(match input {
                Some(_) => {
                    self.src_y += 1;
                    RescaleStep::Consumed
                }
                None => RescaleStep::Finished,
            });
        }

        let tap = self.y.taps[self.dst_y];
        let row_bytes = self.patch.w * ch;
        if self.src_y as i64 > tap.last_pixel as i64 {
            if output.len() < row_bytes {
                return Err(IpaError::MinimumSliceSizeMismatch(MismatchedSize {
                    expected: row_bytes,
                    received: output.len(),
                }));
            }
            (self.zoom_rows)(
                &mut output[..row_bytes],
                &self.ring[..],
                self.lines,
                tap.first_pixel as usize % self.lines,
                &self.y.weights[tap.index..tap.index + tap.n],
            );
            self.dst_y += 1;
            return Ok(RescaleStep::Emitted);
        }

        let Some(input) = input else {
            return Ok(RescaleStep::NeedInput);
        };
        let data_bytes = self.data.w * ch;
        if input.len() < data_bytes {
            return Err(IpaError::MinimumSliceSizeMismatch(MismatchedSize {
                expected: data_bytes,
                received: input.len(),
            }));
        }
        if self.src_rows.contains(&self.src_y) {
            let slot = self.src_y % self.lines;
            let background = [0u8; 4];
            (self.zoom_x)(
                &mut self.ring[slot * row_bytes..(slot + 1) * row_bytes],
                &input[..data_bytes],
                &self.x.taps,
                &self.x.weights,
                self.data.w,
                ch,
                &background[..ch],
            );
        }
        self.src_y += 1;
        Ok(RescaleStep::Consumed)
    }

    /// Rewinds to the first source and destination line, keeping the tables.
    pub fn reset(&mut self) {
        self.src_y = 0;
        self.dst_y = 0;
    }

    /// Streams the whole data rectangle from `src` and writes the whole patch to `dst`.
    pub fn rescale_image(
        &mut self,
        src: &[u8],
        src_stride: usize,
        dst: &mut [u8],
        dst_stride: usize,
    ) -> Result<(), IpaError> {
        let ch = self.channels;
        let (data_w, data_h) = (self.data.w, self.data.h);
        let (patch_w, patch_h) = (self.patch.w, self.patch.h);
        if patch_w == 0 || patch_h == 0 {
            return Ok(());
        }
        check_rows(src, src_stride, data_w * ch, data_h)?;
        check_rows(dst, dst_stride, patch_w * ch, patch_h)?;

        self.reset();
        let mut in_y = 0usize;
        let mut out_y = 0usize;
        while out_y < patch_h {
            let input = if in_y < data_h {
                Some(&src[in_y * src_stride..in_y * src_stride + data_w * ch])
            } else {
                None
            };
            let start = out_y * dst_stride;
            let output = &mut dst[start..start + patch_w * ch];
            match self.process(input, output)? {
                RescaleStep::Consumed => in_y += 1,
                RescaleStep::Emitted => out_y += 1,
                RescaleStep::NeedInput | RescaleStep::Finished => {
                    return Err(IpaError::InvalidArguments);
                }
            }
        }
        Ok(())
    }
}

fn check_rows(buf: &[u8], stride: usize, row: usize, rows: usize) -> Result<(), IpaError> {
    if rows == 0 {
        return Ok(());
    }
    if stride < row {
        return Err(IpaError::MinimumStrideSizeMismatch(MismatchedSize {
            expected: row,
            received: stride,
        }));
    }
    let required = stride.safe_mul(rows - 1)?.safe_add(row)?;
    if buf.len() < required {
        return Err(IpaError::MinimumSliceSizeMismatch(MismatchedSize {
            expected: required,
            received: buf.len(),
        }));
    }
    Ok(())
}

fn select_zoom(channels: usize, use_simd: bool) -> (ZoomXFn, ZoomRowsFn) {
    #[cfg(all(any(target_arch = "x86_64", target_arch = "x86"), feature = "sse"))]
    {
        if use_simd && std::arch::is_x86_feature_detected!("sse4.1") {
            use crate::rescaler::sse::zoom_rows_sse;
            use crate::rotator::sse::zoom_x_sse;
            return match channels {
                1 => (zoom_x_sse::<1>, zoom_rows_sse),
                2 => (zoom_x_sse::<2>, zoom_rows_sse),
                3 => (zoom_x_sse::<3>, zoom_rows_sse),
                _ => (zoom_x_sse::<4>, zoom_rows_sse),
            };
        }
    }
    let _ = (channels, use_simd);
    (zoom_x, zoom_rows)
}
