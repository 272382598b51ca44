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

use crate::context::Context;
use crate::rotator::weights::{x_weights, y_weights, WeightTable, SUB_PIX};
use crate::rotator::zoom::{zoom_x, zoom_y, ZoomXFn, ZoomYFn};
use crate::safe_math::{SafeAdd, SafeMul};
use crate::util::MismatchedSize;
use crate::IpaError;

const FILTER_WIDTH: f64 = 2.;
/// Rounds positions to the nearest sub pixel phase.
const SUB_PIX_ROUND: f64 = 1. / (2 * SUB_PIX) as f64;

/// Rotation and scale parameters shared by [Rotator::pre_init] and [Rotator::new].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RotateParams {
    /// Clockwise angle in degrees, within `-90..=90`.
    pub degrees: f64,
    pub pre_x_scale: f64,
    pub pre_y_scale: f64,
    pub post_x_scale: f64,
    pub post_y_scale: f64,
}

impl Default for RotateParams {
    fn default() -> Self {
        RotateParams {
            degrees: 0.,
            pre_x_scale: 1.,
            pre_y_scale: 1.,
            post_x_scale: 1.,
            post_y_scale: 1.,
        }
    }
}

impl RotateParams {
    pub fn new(degrees: f64) -> RotateParams {
        RotateParams {
            degrees,
            ..Default::default()
        }
    }

    pub fn with_pre_scale(self, x: f64, y: f64) -> RotateParams {
        RotateParams {
            pre_x_scale: x,
            pre_y_scale: y,
            ..self
        }
    }

    pub fn with_post_scale(self, x: f64, y: f64) -> RotateParams {
        RotateParams {
            post_x_scale: x,
            post_y_scale: y,
            ..self
        }
    }

    fn validate(&self) -> Result<(), IpaError> {
        if !self.degrees.is_finite() || self.degrees < -90. || self.degrees > 90. {
            return Err(IpaError::InvalidAngle);
        }
        let scales = [
            self.pre_x_scale,
            self.pre_y_scale,
            self.post_x_scale,
            self.post_y_scale,
        ];
        if scales.iter().any(|s| !s.is_finite() || *s <= 0.) {
            return Err(IpaError::InvalidScale);
        }
        Ok(())
    }
}

/// Source rows a destination band depends on.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default, Hash)]
pub struct BandMapping {
    pub src_y0: usize,
    pub src_y1: usize,
    pub src_w: usize,
}

/// Shear coefficients and the resulting output extent.
#[derive(Debug, Copy, Clone)]
struct Geometry {
    alpha: f64,
    beta: f64,
    w2: f64,
    h2: f64,
    h2_div_y: f64,
}

impl Geometry {
    fn new(src_w: usize, src_h: usize, params: &RotateParams) -> Geometry {
        let theta = params.degrees.to_radians();
        let alpha = -(theta / 2.).tan();
        let beta = theta.sin();
        let gamma = alpha;
        let (w, h) = (src_w as f64, src_h as f64);
        let one_plus_ab = 1. + alpha * beta;
        let one_plus_cb = 1. + gamma * beta;
        let w2 = params.post_x_scale
            * (w * params.pre_x_scale * one_plus_ab
                + h * params.pre_y_scale * (gamma * one_plus_ab + alpha).abs());
        let h2_div_y = h * params.pre_y_scale * one_plus_cb + (w * params.pre_x_scale * beta).abs();
        Geometry {
            alpha,
            beta,
            w2,
            h2: params.post_y_scale * h2_div_y,
            h2_div_y,
        }
    }
}

/// Arbitrary angle rotation with independent pre and post scales, done as three
/// shears with Mitchell resampling.
///
/// The first pass scales and shears each source row into a ring of lines, the second
/// reads that ring along a diagonal, and the third scales and shears the result into
/// the destination row. Output is produced in bands through [Rotator::band].
///
/// Every pass samples at pixel centres, so each one moves the image by about half a
/// pixel towards the origin; an unrotated ramp comes back roughly one pixel left.
pub struct Rotator<'ctx> {
    ctx: &'ctx Context,
    channels: usize,
    src_w: usize,
    src_h: usize,
    dst_w: usize,
    dst_h: usize,
    x1: [WeightTable; SUB_PIX],
    y: [WeightTable; SUB_PIX],
    /// Lowest first row and highest last row over each vertical table.
    y_span: [(i64, i64); SUB_PIX],
    x2: [WeightTable; SUB_PIX],
    bg: [u8; 4],
    chy: f64,
    extent1: f64,
    w1: f64,
    h2: f64,
    diagonal_h: f64,
    x_shift2: f64,
    indent: f64,
    tmp1_stride: usize,
    tmp1_w: usize,
    tmp1_h: usize,
    tmp2_w: usize,
    pre_fill_y: usize,
    zoom_x: ZoomXFn,
    zoom_y: ZoomYFn,
}

impl<'ctx> Rotator<'ctx> {
    /// Destination size for rotating a `src_w`×`src_h` image with `params`.
    pub fn pre_init(
        src_w: usize,
        src_h: usize,
        params: &RotateParams,
    ) -> Result<(usize, usize), IpaError> {
        params.validate()?;
        let geometry = Geometry::new(src_w, src_h, params);
        Ok((geometry.w2.ceil() as usize, geometry.h2.ceil() as usize))
    }

    /// Builds the weight tables for rotating a `src_w`×`src_h` image of `channels`
    /// interleaved channels. `bg` fills everything outside the rotated source.
    pub fn new(
        ctx: &'ctx Context,
        src_w: usize,
        src_h: usize,
        params: &RotateParams,
        bg: &[u8],
        channels: usize,
    ) -> Result<Rotator<'ctx>, IpaError> {
        params.validate()?;
        if src_w == 0 || src_h == 0 {
            return Err(IpaError::ZeroBaseSize);
        }
        if channels == 0 || channels > 4 {
            return Err(IpaError::InvalidChannels(channels));
        }
        if bg.len() < channels {
            return Err(IpaError::MinimumSliceSizeMismatch(MismatchedSize {
                expected: channels,
                received: bg.len(),
            }));
        }

        let geometry = Geometry::new(src_w, src_h, params);
        let (w, h) = (src_w as f64, src_h as f64);
        let chy = geometry.alpha * h * params.pre_y_scale;
        let extent1 = params.pre_x_scale * w;
        let w1 = extent1 + chy.abs();
        let diagonal_h = geometry.beta.abs() * w1 / params.pre_y_scale;
        let h2 = geometry.h2;
        let x_shift2 = params.post_x_scale * geometry.alpha * geometry.h2_div_y;
        let indent = params.pre_x_scale * geometry.beta * params.post_y_scale * w * x_shift2 / h2;

        let dst_w = geometry.w2.ceil() as usize;
        let dst_h = h2.ceil() as usize;
        let tmp1_stride = w1.ceil() as usize;
        let tmp1_w = extent1.ceil() as usize + 1;
        let tmp2_w = (params.post_x_scale * w1).ceil() as usize;
        let pre_fill_y = (diagonal_h * extent1 / w1).ceil() as usize + 2 * FILTER_WIDTH as usize;

        let slope = if params.degrees >= 0. {
            diagonal_h / w1
        } else {
            -diagonal_h / w1
        };
        let x2_entries = dst_w.max(tmp2_w);
        let x1 = std::array::from_fn(|i| {
            x_weights(src_w, tmp1_w, w / extent1, i as f64 / SUB_PIX as f64)
        });
        let y = std::array::from_fn(|i| {
            y_weights(
                tmp1_stride,
                params.post_y_scale * params.pre_y_scale,
                slope,
                i as f64 / SUB_PIX as f64,
            )
        });
        let y_span: [(i64, i64); SUB_PIX] = std::array::from_fn(|i| row_span(&y[i]));
        // The ring must hold every row one diagonal read touches.
        let widest = y_span
            .iter()
            .map(|&(first, last)| (last - first + 1).max(1) as usize)
            .max()
            .unwrap_or(1);
        let tmp1_h = ((diagonal_h.ceil() as usize + 2 * FILTER_WIDTH as usize).max(1)
            + 2 * FILTER_WIDTH as usize)
            .max(widest);

        // Ring and line sizes are checked once here so band can allocate freely.
        tmp1_stride.safe_mul(channels)?.safe_mul(tmp1_h)?;
        dst_w.safe_mul(channels)?;

        let x2 = std::array::from_fn(|i| {
            x_weights(
                tmp1_stride,
                x2_entries,
                1. / params.post_x_scale,
                i as f64 / SUB_PIX as f64,
            )
        });

        let (zoom_x, zoom_y) = select_zoom(channels, ctx.use_simd());
        let mut background = [0u8; 4];
        background[..channels].copy_from_slice(&bg[..channels]);

        log::debug!(
            "Rotator {}x{}x{} by {} degrees into {}x{}, ring {}x{}, pre fill {}, simd {}",
            src_w,
            src_h,
            channels,
            params.degrees,
            dst_w,
            dst_h,
            tmp1_stride,
            tmp1_h,
            pre_fill_y,
            ctx.use_simd()
        );

        Ok(Rotator {
            ctx,
            channels,
            src_w,
            src_h,
            dst_w,
            dst_h,
            x1,
            y,
            y_span,
            x2,
            bg: background,
            chy,
            extent1,
            w1,
            h2,
            diagonal_h,
            x_shift2,
            indent,
            tmp1_stride,
            tmp1_w,
            tmp1_h,
            tmp2_w,
            pre_fill_y,
            zoom_x,
            zoom_y,
        })
    }

    /// Destination width and height.
    pub fn dst_size(&self) -> (usize, usize) {
        (self.dst_w, self.dst_h)
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    #[inline]
    fn diag_dy(&self) -> f64 {
        (self.src_h as f64 + self.diagonal_h * (2. * self.extent1 / self.w1 - 1.)) / self.h2
    }

    #[inline]
    fn diag_start(&self) -> f64 {
        FILTER_WIDTH - self.pre_fill_y as f64 + self.diag_dy() / 2.
    }

    /// Splits a diagonal position into its whole row and sub pixel phase.
    #[inline]
    fn phase(position: f64) -> (i64, usize) {
        let y = position + SUB_PIX_ROUND;
        let iy = y.floor();
        let which = (((y - iy) * SUB_PIX as f64).floor() as usize).min(SUB_PIX - 1);
        (iy as i64, which)
    }

    /// Ring origin and vertical phase of the diagonal read for destination row `y`.
    #[inline]
    fn diag_row(&self, y: usize) -> (i64, usize) {
        Self::phase(self.diag_start() + y as f64 * self.diag_dy())
    }

    /// Reports which source rows are needed to produce destination rows
    /// `dst_y0..dst_y1`.
    pub fn map_band(&self, dst_y0: usize, dst_y1: usize) -> BandMapping {
        let src_h = self.src_h as i64;
        let mut lo = i64::MAX;
        let mut hi = i64::MIN;
        for y in dst_y0..dst_y1 {
            let (iy, which) = self.diag_row(y);
            let (first, last) = self.y_span[which];
            lo = lo.min(first + iy);
            hi = hi.max(last + iy + 1);
        }
        if lo > hi {
            let (iy, which) = self.diag_row(dst_y0);
            lo = self.y_span[which].0 + iy;
            hi = lo;
        }
        let src_y0 = lo.clamp(0, src_h);
        let src_y1 = hi.clamp(src_y0, src_h);

        BandMapping {
            src_y0: src_y0 as usize,
            src_y1: src_y1 as usize,
            src_w: self.src_w,
        }
    }

    /// Renders destination rows `dst_y0..dst_y1` into `dst` from source rows
    /// `src_y0..src_y1` held in `src`, as reported by [Rotator::map_band].
    #[allow(clippy::too_many_arguments)]
    pub fn band(
        &self,
        src: &[u8],
        src_stride: usize,
        src_y0: usize,
        src_y1: usize,
        dst: &mut [u8],
        dst_stride: usize,
        dst_y0: usize,
        dst_y1: usize,
    ) -> Result<(), IpaError> {
        let ch = self.channels;
        if src_y0 > src_y1 || src_y1 > self.src_h || dst_y0 > dst_y1 || dst_y1 > self.dst_h {
            return Err(IpaError::BandOutOfRange);
        }
        if src_y1 > src_y0 {
            check_rows(src, src_stride, self.src_w * ch, src_y1 - src_y0)?;
        }
        if dst_y1 > dst_y0 {
            check_rows(dst, dst_stride, self.dst_w * ch, dst_y1 - dst_y0)?;
        }

        let stride = self.tmp1_stride;
        let row_bytes = stride * ch;
        let mut ring = self
            .ctx
            .alloc_aligned(row_bytes.safe_mul(self.tmp1_h)?, 16)?;
        let mut tmp2 = self.ctx.alloc_aligned(row_bytes, 16)?;
        let bg = &self.bg[..ch];
        let rows = self.tmp1_h as i64;

        // Positions are derived from the row index so any banding sees the same phases.
        let dx1 = -self.chy / self.src_h as f64;
        let x1_origin = self.chy.max(0.) + dx1 / 2.;

        let dx2 = -self.x_shift2 / self.h2;
        let mut x2_origin = self.indent + dx2 / 2.;
        if self.x_shift2 > 0. {
            x2_origin += self.x_shift2;
        }

        // Rows outside the source read as background.
        fill_bg(&mut ring[..], bg);
        let mut in_y = src_y0 as i64;

        log::trace!("Rotator band {dst_y0}..{dst_y1} from source rows {src_y0}..{src_y1}");

        let mut out_y = dst_y0;
        while out_y < dst_y1 {
            let (iy, which_y) = self.diag_row(out_y);
            let need_y = self.y_span[which_y].1 + iy;

            if in_y > need_y {
                let table = &self.y[which_y];
                (self.zoom_y)(
                    &mut tmp2[..],
                    &ring[..],
                    &table.taps,
                    &table.weights,
                    ch,
                    self.tmp1_h,
                    iy.rem_euclid(rows) as usize,
                );
                let start = (out_y - dst_y0) * dst_stride;
                let output = &mut dst[start..start + self.dst_w * ch];
                self.emit_row(output, &tmp2, x2_origin + out_y as f64 * dx2);
                out_y += 1;
            } else if in_y < self.src_h as i64 {
                if in_y >= src_y1 as i64 {
                    return Err(IpaError::BandOutOfRange);
                }
                let row = in_y.rem_euclid(rows) as usize;
                let line = &mut ring[row * row_bytes..(row + 1) * row_bytes];
                let offset = (in_y as usize - src_y0) * src_stride;
                let source = &src[offset..offset + self.src_w * ch];
                self.ingest_row(line, source, x1_origin + in_y as f64 * dx1);
                in_y += 1;
            } else {
                let row = in_y.rem_euclid(rows) as usize;
                fill_bg(&mut ring[row * row_bytes..(row + 1) * row_bytes], bg);
                in_y += 1;
            }
        }
        Ok(())
    }

    /// First shear: scales `source` into the ring line starting at column `x`.
    fn ingest_row(&self, line: &mut [u8], source: &[u8], x: f64) {
        let ch = self.channels;
        let stride = self.tmp1_stride as i64;
        let bg = &self.bg[..ch];
        let (xi, which) = Self::phase(x);

        let r = stride.min(xi);
        if r > 0 {
            fill_bg(&mut line[..r as usize * ch], bg);
        }
        let l = (xi + self.tmp1_w as i64 - 1).max(0);
        if l < stride {
            fill_bg(&mut line[l as usize * ch..], bg);
        }
        let l = xi.max(0);
        let r = (xi + self.tmp1_w as i64).min(stride);
        if l < r {
            let table = &self.x1[which];
            (self.zoom_x)(
                &mut line[l as usize * ch..r as usize * ch],
                source,
                &table.taps[(l - xi) as usize..],
                &table.weights,
                self.src_w,
                ch,
                bg,
            );
        }
    }

    /// Third shear: scales the diagonal line `tmp2` into `output` starting at `x`.
    fn emit_row(&self, output: &mut [u8], tmp2: &[u8], x: f64) {
        let ch = self.channels;
        let dst_w = self.dst_w as i64;
        let bg = &self.bg[..ch];
        let (xi, which) = Self::phase(x);

        let xs = xi.clamp(0, dst_w);
        if xs > 0 {
            fill_bg(&mut output[..xs as usize * ch], bg);
        }
        let mut xe = xi + self.tmp2_w as i64;
        if xe < dst_w {
            fill_bg(&mut output[xe.max(0) as usize * ch..], bg);
        } else {
            xe = dst_w;
        }
        if xs < xe {
            let table = &self.x2[which];
            (self.zoom_x)(
                &mut output[xs as usize * ch..xe as usize * ch],
                tmp2,
                &table.taps[(xs - xi) as usize..],
                &table.weights,
                self.tmp1_stride,
                ch,
                bg,
            );
        }
    }

    /// Band state lives in each [Rotator::band] call, so there is nothing to rewind.
    pub fn reset(&mut self) {}
}

fn row_span(table: &WeightTable) -> (i64, i64) {
    let first = table.taps.iter().map(|t| t.first_pixel as i64).min();
    let last = table.taps.iter().map(|t| t.last_pixel as i64).max();
    match (first, last) {
        (Some(first), Some(last)) => (first, last),
        _ => (0, 0),
    }
}

#[inline]
fn fill_bg(dst: &mut [u8], bg: &[u8]) {
    for px in dst.chunks_exact_mut(bg.len()) {
        px.copy_from_slice(bg);
    }
}

fn check_rows(buf: &[u8], stride: usize, row: usize, rows: usize) -> Result<(), IpaError> {
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

fn select_zoom(channels: usize, use_simd: bool) -> (ZoomXFn, ZoomYFn) {
    #[cfg(all(any(target_arch = "x86_64", target_arch = "x86"), feature = "sse"))]
    {
        if use_simd && std::arch::is_x86_feature_detected!("sse4.1") {
            use crate::rotator::sse::{zoom_x_sse, zoom_y_sse};
            return match channels {
                1 => (zoom_x_sse::<1>, zoom_y_sse::<1>),
                2 => (zoom_x_sse::<2>, zoom_y_sse::<2>),
                3 => (zoom_x_sse::<3>, zoom_y_sse::<3>),
                _ => (zoom_x_sse::<4>, zoom_y_sse::<4>),
            };
        }
    }
    let _ = (channels, use_simd);
    (zoom_x, zoom_y)
}
