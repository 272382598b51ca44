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

use crate::gradient::ramp::{ColorRamp, Span};
use crate::util::check_slice_size;
use crate::{Context, IpaError, ThreadingPolicy};
use rayon::iter::{IndexedParallelIterator, IntoParallelRefMutIterator, ParallelIterator};
use rayon::slice::ParallelSliceMut;

/// Samples projected per pass over a row.
const RUN: usize = 64;

#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct GradientPoint {
    pub x: f32,
    pub y: f32,
}

impl GradientPoint {
    pub fn new(x: f32, y: f32) -> GradientPoint {
        GradientPoint { x, y }
    }
}

/// Rendered rectangle and its placement.
///
/// Pixel `(x, y)` of the rectangle is written at row `y + offset_y`, column
/// `x + offset_x` of the destination and sampled at `(x + base_x + offset_x,
/// y + base_y + offset_y)` in gradient space.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Hash)]
pub struct GradientGeometry {
    pub base_x: i32,
    pub base_y: i32,
    pub offset_x: usize,
    pub offset_y: usize,
    pub width: usize,
    pub height: usize,
}

#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct GradientAxis {
    pub start: GradientPoint,
    pub end: GradientPoint,
}

#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct GradientRadius {
    pub center: GradientPoint,
    pub r_start: f32,
    pub r_end: f32,
}

/// Optional coverage output: one byte per rendered pixel, 0xFF when painted.
#[derive(Debug)]
pub struct GradientMask<'a> {
    pub data: &'a mut [u8],
    pub stride: usize,
}

/// Writes `x0 + i - axis_x` projected on the axis, plus the row term, for each lane.
pub(crate) type AxialRowFn = fn(dst: &mut [f32], x0: f32, axis_x: f32, cos: f32, row_term: f32);
/// Writes the distance of `x0 + i` from `center_x`, given the squared row distance.
pub(crate) type RadialRowFn = fn(dst: &mut [f32], x0: f32, center_x: f32, dy2: f32);

pub(crate) fn axial_row(dst: &mut [f32], x0: f32, axis_x: f32, cos: f32, row_term: f32) {
    for (i, d) in dst.iter_mut().enumerate() {
        let gx = (x0 + i as f32) - axis_x;
        *d = gx * cos + row_term;
    }
}

pub(crate) fn radial_row(dst: &mut [f32], x0: f32, center_x: f32, dy2: f32) {
    for (i, d) in dst.iter_mut().enumerate() {
        let dx = (x0 + i as f32) - center_x;
        *d = (dx * dx + dy2).sqrt();
    }
}

fn select_axial(use_simd: bool) -> AxialRowFn {
    #[cfg(all(any(target_arch = "x86_64", target_arch = "x86"), feature = "sse"))]
    {
        if use_simd && std::arch::is_x86_feature_detected!("sse4.1") {
            return crate::gradient::sse::axial_row_sse;
        }
    }
    #[cfg(all(target_arch = "aarch64", feature = "neon"))]
    {
        if use_simd {
            return crate::gradient::neon::axial_row_neon;
        }
    }
    let _ = use_simd;
    axial_row
}

fn select_radial(use_simd: bool) -> RadialRowFn {
    #[cfg(all(any(target_arch = "x86_64", target_arch = "x86"), feature = "sse"))]
    {
        if use_simd && std::arch::is_x86_feature_detected!("sse4.1") {
            return crate::gradient::sse::radial_row_sse;
        }
    }
    #[cfg(all(target_arch = "aarch64", feature = "neon"))]
    {
        if use_simd {
            return crate::gradient::neon::radial_row_neon;
        }
    }
    let _ = use_simd;
    radial_row
}

#[derive(Copy, Clone)]
enum Shape {
    Axial {
        project: AxialRowFn,
        start: GradientPoint,
        cos: f32,
        sin: f32,
        length: f32,
    },
    Radial {
        project: RadialRowFn,
        radius: GradientRadius,
    },
}

impl Shape {
    /// Projects `dst.len()` samples of gradient space row `gy` starting at column `gx`.
    #[inline]
    fn project(&self, dst: &mut [f32], gx: f32, gy: f32) {
        match *self {
            Shape::Axial {
                project,
                start,
                cos,
                sin,
                ..
            } => project(dst, gx, start.x, cos, (gy - start.y) * sin),
            Shape::Radial { project, radius } => {
                let dy = gy - radius.center.y;
                project(dst, gx, radius.center.x, dy * dy)
            }
        }
    }

    #[inline]
    fn span(&self, v: f32) -> Span {
        match *self {
            Shape::Axial { length, .. } => {
                if v < 0. {
                    Span::BeforeStart
                } else if v > length {
                    Span::PastEnd
                } else {
                    Span::Inside(v / length)
                }
            }
            Shape::Radial { radius, .. } => {
                if v < radius.r_start {
                    Span::BeforeStart
                } else if v > radius.r_end {
                    Span::PastEnd
                } else {
                    let width = radius.r_end - radius.r_start;
                    Span::Inside(if width > 0. {
                        (v - radius.r_start) / width
                    } else {
                        0.
                    })
                }
            }
        }
    }
}

fn shade_row(
    shape: &Shape,
    ramp: &ColorRamp,
    geometry: &GradientGeometry,
    y: usize,
    row: &mut [u8],
    mut mask: Option<&mut [u8]>,
) {
    let gy = (y as i64 + geometry.base_y as i64 + geometry.offset_y as i64) as f32;
    let origin = geometry.base_x as i64 + geometry.offset_x as i64;
    let mut projected = [0f32; RUN];
    for (run, pixels) in row.chunks_mut(RUN * 4).enumerate() {
        let x = run * RUN;
        let count = pixels.len() / 4;
        let projected = &mut projected[..count];
        shape.project(projected, (origin + x as i64) as f32, gy);
        for (i, (px, &v)) in pixels.chunks_exact_mut(4).zip(projected.iter()).enumerate() {
            let coverage = mask.as_deref_mut().map(|m| &mut m[x + i]);
            ramp.shade(px, coverage, shape.span(v));
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn render(
    dst: &mut [u8],
    stride: usize,
    geometry: &GradientGeometry,
    shape: Shape,
    ramp: ColorRamp,
    mask: Option<GradientMask>,
    threading_policy: ThreadingPolicy,
) -> Result<(), IpaError> {
    let (width, height) = (geometry.width, geometry.height);
    let first = geometry.offset_y * stride;
    let (left, right) = (geometry.offset_x * 4, (geometry.offset_x + width) * 4);

    let mut mask_rows: Vec<Option<&mut [u8]>> = match mask {
        Some(mask) => mask
            .data
            .chunks_mut(mask.stride)
            .take(height)
            .map(|row| Some(&mut row[..width]))
            .collect(),
        None => (0..height).map(|_| None).collect(),
    };

    let rows = &mut dst[first..];
    if let Some(pool) = threading_policy.pool(width as u32, height as u32) {
        pool.install(|| {
            rows.par_chunks_mut(stride)
                .take(height)
                .zip(mask_rows.par_iter_mut())
                .enumerate()
                .for_each(|(y, (row, mask))| {
                    shade_row(
                        &shape,
                        &ramp,
                        geometry,
                        y,
                        &mut row[left..right],
                        mask.as_deref_mut(),
                    );
                });
        });
    } else {
        for (y, (row, mask)) in rows
            .chunks_mut(stride)
            .take(height)
            .zip(mask_rows.iter_mut())
            .enumerate()
        {
            shade_row(
                &shape,
                &ramp,
                geometry,
                y,
                &mut row[left..right],
                mask.as_deref_mut(),
            );
        }
    }
    Ok(())
}

fn validate(
    dst: &[u8],
    stride: usize,
    geometry: &GradientGeometry,
    colors: &[[f32; 4]],
    mask: &Option<GradientMask>,
) -> Result<bool, IpaError> {
    if colors.is_empty() {
        return Err(IpaError::InvalidArguments);
    }
    if geometry.width == 0 || geometry.height == 0 {
        return Ok(false);
    }
    check_slice_size(
        dst,
        stride,
        geometry.offset_x + geometry.width,
        geometry.offset_y + geometry.height,
        4,
    )?;
    if let Some(mask) = mask {
        check_slice_size(mask.data, mask.stride, geometry.width, geometry.height, 1)?;
    }
    Ok(true)
}

/// Fills the rectangle with a linear ramp along `axis`.
///
/// Samples before the axis start take `colors[0]` when `extend_start` is set and are
/// left untouched otherwise; past the end the same applies with the last colour.
/// A zero length axis renders nothing.
#[allow(clippy::too_many_arguments)]
pub fn render_axial_gradient(
    ctx: &Context,
    dst: &mut [u8],
    stride: usize,
    geometry: &GradientGeometry,
    axis: &GradientAxis,
    colors: &[[f32; 4]],
    interpolate: bool,
    extend_start: bool,
    extend_end: bool,
    mask: Option<GradientMask>,
    threading_policy: ThreadingPolicy,
) -> Result<(), IpaError> {
    if !validate(dst, stride, geometry, colors, &mask)? {
        return Ok(());
    }
    let vx = axis.end.x - axis.start.x;
    let vy = axis.end.y - axis.start.y;
    let length_squared = vx * vx + vy * vy;
    if length_squared == 0. {
        return Ok(());
    }
    let length = length_squared.sqrt();
    let shape = Shape::Axial {
        project: select_axial(ctx.use_simd()),
        start: axis.start,
        cos: vx / length,
        sin: vy / length,
        length,
    };
    log::trace!(
        "Axial gradient {}x{} over {} colors, length {length}",
        geometry.width,
        geometry.height,
        colors.len()
    );
    let ramp = ColorRamp::new(colors, interpolate, extend_start, extend_end);
    render(dst, stride, geometry, shape, ramp, mask, threading_policy)
}

/// Fills the rectangle with concentric rings around `radius.center`, the ramp running
/// from `r_start` to `r_end`.
#[allow(clippy::too_many_arguments)]
pub fn render_radial_gradient(
    ctx: &Context,
    dst: &mut [u8],
    stride: usize,
    geometry: &GradientGeometry,
    radius: &GradientRadius,
    colors: &[[f32; 4]],
    interpolate: bool,
    extend_start: bool,
    extend_end: bool,
    mask: Option<GradientMask>,
    threading_policy: ThreadingPolicy,
) -> Result<(), IpaError> {
    if !validate(dst, stride, geometry, colors, &mask)? {
        return Ok(());
    }
    let shape = Shape::Radial {
        project: select_radial(ctx.use_simd()),
        radius: *radius,
    };
    log::trace!(
        "Radial gradient {}x{} over {} colors, radii {}..{}",
        geometry.width,
        geometry.height,
        colors.len(),
        radius.r_start,
        radius.r_end
    );
    let ramp = ColorRamp::new(colors, interpolate, extend_start, extend_end);
    render(dst, stride, geometry, shape, ramp, mask, threading_policy)
}
