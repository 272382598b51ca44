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
use crate::context::{AlignedBlock, Context};
use crate::halftone::copy::{resample_line, CopyStrategy};
use crate::halftone::threshold::{select_threshold, ScreenForm, ThresholdFn};
use crate::safe_math::{SafeAdd, SafeMul};
use crate::util::MismatchedSize;
use crate::IpaError;

/// Alignment of every halftone scratch block, and the column granularity of the
/// portrait working bounds.
pub const HT_ALIGN: usize = 32;
/// Width of the column block a landscape instance gathers before thresholding.
pub const HT_LANDSCAPE: usize = 32;
/// Maximum number of planes one instance handles.
pub const MAX_PLANES: usize = 4;

/// Affine device mapping `x' = xx*x + yx*y + tx`, `y' = xy*x + yy*y + ty`.
///
/// Only axis aligned mappings are accepted by [Halftone]: either `xy` and `yx` are zero
/// (portrait) or `xx` and `yy` are (landscape).
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Matrix {
    pub xx: f32,
    pub xy: f32,
    pub yx: f32,
    pub yy: f32,
    pub tx: f32,
    pub ty: f32,
}

impl Matrix {
    pub const IDENTITY: Matrix = Matrix {
        xx: 1.,
        xy: 0.,
        yx: 0.,
        yy: 1.,
        tx: 0.,
        ty: 0.,
    };

    pub fn new(xx: f32, xy: f32, yx: f32, yy: f32, tx: f32, ty: f32) -> Matrix {
        Matrix {
            xx,
            xy,
            yx,
            yy,
            tx,
            ty,
        }
    }

    pub fn scale(sx: f32, sy: f32) -> Matrix {
        Matrix {
            xx: sx,
            yy: sy,
            ..Matrix::IDENTITY
        }
    }

    /// Returns the matrix followed by a translation.
    pub fn translated(self, tx: f32, ty: f32) -> Matrix {
        Matrix {
            tx: self.tx + tx,
            ty: self.ty + ty,
            ..self
        }
    }

    #[inline]
    fn transform(&self, x: f32, y: f32) -> (f32, f32) {
        (
            self.xx * x + self.yx * y + self.tx,
            self.xy * x + self.yy * y + self.ty,
        )
    }
}

/// Device space clip rectangle.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default, Hash)]
pub struct ClipRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl ClipRect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> ClipRect {
        ClipRect { x, y, w, h }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub(crate) struct Rect {
    pub(crate) x0: i32,
    pub(crate) y0: i32,
    pub(crate) x1: i32,
    pub(crate) y1: i32,
}

/// A block of thresholded output handed to the [Halftone::process_planar] callback.
///
/// Covers columns `x..x + w` and rows `y..y + h` of the device. Row `r` of plane `p`
/// starts at `offset_x + r * raster + p * plane_raster` once `offset_x` is adjusted by
/// `x >> 3`; [HalftoneData::pixel] does that arithmetic.
#[derive(Debug, Copy, Clone)]
pub struct HalftoneData<'a> {
    pub data: &'a [u8],
    pub offset_x: i32,
    pub raster: usize,
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    pub plane_raster: usize,
}

impl HalftoneData<'_> {
    /// Bit for device column `x`, block row `y` and `plane`. Positions outside the
    /// stored data read as clear.
    pub fn pixel(&self, x: i32, y: usize, plane: usize) -> bool {
        let index = self.offset_x as i64
            + (x >> 3) as i64
            + (y * self.raster) as i64
            + (plane * self.plane_raster) as i64;
        if index < 0 {
            return false;
        }
        self.data
            .get(index as usize)
            .map(|&byte| (byte >> (7 - (x & 7))) & 1 == 1)
            .unwrap_or(false)
    }
}

struct Screen<'ctx> {
    w: i64,
    h: i64,
    x_phase: i64,
    y_phase: i64,
    data: AlignedBlock<'ctx>,
}

impl Screen<'_> {
    #[inline]
    fn row(&self, device_y: i64) -> &[u8] {
        let sy = ((device_y + self.y_phase).rem_euclid(self.h) * self.w) as usize;
        &self.data[sy..sy + self.w as usize]
    }

    #[inline]
    fn column(&self, device_x: i64) -> usize {
        (device_x + self.x_phase).rem_euclid(self.w) as usize
    }
}

/// Copies `dst.len()` bytes out of a periodic tile row starting at column `sx`.
#[inline]
fn tile_row(dst: &mut [u8], row: &[u8], mut sx: usize) {
    let mut written = 0;
    while written < dst.len() {
        let run = (row.len() - sx).min(dst.len() - written);
        dst[written..written + run].copy_from_slice(&row[sx..sx + run]);
        written += run;
        sx = 0;
    }
}

/// Screened halftoning of planar contone lines into 1-bit planes.
///
/// Source lines are fed in order through [Halftone::process_planar]; finished output
/// rows (portrait) or 32 column blocks (landscape) come back through the callback.
/// An instance carries cursor state and must not be driven from several threads at
/// once.
pub struct Halftone<'ctx> {
    ctx: &'ctx Context,
    landscape: bool,
    num_planes: usize,
    w: i32,
    h: i32,
    matrix: Matrix,
    drect: Rect,
    fdrect: Rect,
    cdrect: Rect,
    left: i32,
    right: i32,
    contone_stride: usize,
    halftone_stride: usize,
    contone: AlignedBlock<'ctx>,
    screen: AlignedBlock<'ctx>,
    halftone: AlignedBlock<'ctx>,
    cache: Option<AlignedBlock<'ctx>>,
    screens: [Option<Screen<'ctx>>; MAX_PLANES],
    screen_fill: usize,
    copy: CopyStrategy,
    threshold: ThresholdFn,
    screen_form: ScreenForm,
    brx: Bresenham,
    bry: Bresenham,
    out_idx: i32,
    in_idx: i32,
}

impl<'ctx> Halftone<'ctx> {
    /// Creates a halftone instance for a `w`×`h` source mapped through `matrix`.
    ///
    /// When `cache` is given it must hold `256 * num_planes` bytes; a single input plane
    /// is then expanded into `num_planes` planes by lookup.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        ctx: &'ctx Context,
        w: i32,
        h: i32,
        matrix: &Matrix,
        num_planes: usize,
        cache: Option<&[u8]>,
        clip: ClipRect,
        any_part_of_pixel: bool,
    ) -> Result<Halftone<'ctx>, IpaError> {
        if w < 0 || h < 0 || clip.w < 0 || clip.h < 0 {
            return Err(IpaError::NegativeDimensions);
        }
        if num_planes == 0 || num_planes > MAX_PLANES {
            return Err(IpaError::InvalidPlaneCount(num_planes));
        }
        let landscape = if matrix.xx != 0. && matrix.xy == 0. && matrix.yx == 0. && matrix.yy != 0.
        {
            false
        } else if matrix.xx == 0. && matrix.xy != 0. && matrix.yx != 0. && matrix.yy == 0. {
            true
        } else {
            return Err(IpaError::UnsupportedMatrix);
        };
        if let Some(cache) = cache {
            let expected = 256 * num_planes;
            if cache.len() < expected {
                return Err(IpaError::MinimumSliceSizeMismatch(MismatchedSize {
                    expected,
                    received: cache.len(),
                }));
            }
        }

        let fdrect = device_rect(matrix, w, h, any_part_of_pixel);
        let drect = Rect {
            x0: (fdrect.x0 + 127) >> 8,
            y0: (fdrect.y0 + 127) >> 8,
            x1: (fdrect.x1 + 127) >> 8,
            y1: (fdrect.y1 + 127) >> 8,
        };
        let clip_x1 = clip.x.saturating_add(clip.w);
        let clip_y1 = clip.y.saturating_add(clip.h);
        let mut cdrect = Rect {
            x0: drect.x0.max(clip.x),
            y0: drect.y0.max(clip.y),
            x1: drect.x1.min(clip_x1),
            y1: drect.y1.min(clip_y1),
        };
        if cdrect.x1 < cdrect.x0 {
            cdrect.x1 = cdrect.x0;
        }
        if cdrect.y1 < cdrect.y0 {
            cdrect.y1 = cdrect.y0;
        }

        let left = cdrect.x0 & !(HT_ALIGN as i32 - 1);
        let right = cdrect.x1.safe_add(HT_ALIGN as i32 - 1)? & !(HT_ALIGN as i32 - 1);
        let dh = (cdrect.y1 - cdrect.y0) as usize;

        let (contone_stride, halftone_stride, contone_size, halftone_size) = if landscape {
            let block = HT_LANDSCAPE.safe_mul(dh)?;
            (
                HT_LANDSCAPE,
                HT_LANDSCAPE / 8,
                num_planes.safe_mul(block)?,
                num_planes.safe_mul(block / 8)?,
            )
        } else {
            let stride = (right - left) as usize;
            (
                stride,
                stride / 8,
                num_planes.safe_mul(stride)?,
                num_planes.safe_mul(stride / 8)?,
            )
        };

        let use_simd = ctx.use_simd();
        let (threshold, screen_form) = select_threshold(use_simd);

        let contone = ctx.alloc_aligned(contone_size, HT_ALIGN)?;
        let mut screen = ctx.alloc_aligned(contone_size, HT_ALIGN)?;
        // Unfilled screen bytes never set a bit under either storage form.
        screen.fill(screen_form.encode(0, false));
        let halftone = ctx.alloc_aligned(halftone_size, HT_ALIGN)?;
        let cache = match cache {
            Some(table) => {
                let mut block = ctx.alloc_aligned(256 * num_planes, HT_ALIGN)?;
                block.copy_from_slice(&table[..256 * num_planes]);
                Some(block)
            }
            None => None,
        };

        let mut instance = Halftone {
            ctx,
            landscape,
            num_planes,
            w,
            h,
            matrix: *matrix,
            drect,
            fdrect,
            cdrect,
            left,
            right,
            contone_stride,
            halftone_stride,
            contone,
            screen,
            halftone,
            cache,
            screens: [None, None, None, None],
            screen_fill: 0,
            copy: CopyStrategy::Stepper,
            threshold,
            screen_form,
            brx: Bresenham::new(0, 0, 0, 0),
            bry: Bresenham::new(0, 0, 0, 0),
            out_idx: 0,
            in_idx: 0,
        };
        instance.reset();
        instance.copy = CopyStrategy::select(&instance.brx);

        log::debug!(
            "Halftone {}x{} {} planes {}, device rect {:?}, clipped {:?}, copy {:?}, simd {}",
            w,
            h,
            num_planes,
            if landscape { "landscape" } else { "portrait" },
            drect,
            cdrect,
            instance.copy,
            screen_form == ScreenForm::Biased
        );
        Ok(instance)
    }

    /// Adds the threshold tile for the next plane.
    ///
    /// `values` holds `width * height` bytes row by row. Phases shift the tile origin
    /// in device space and may be negative.
    pub fn add_screen(
        &mut self,
        invert: bool,
        width: usize,
        height: usize,
        x_phase: i32,
        y_phase: i32,
        values: &[u8],
    ) -> Result<(), IpaError> {
        if self.screen_fill >= self.num_planes {
            return Err(IpaError::ScreensExhausted);
        }
        if width == 0 || height == 0 {
            return Err(IpaError::InvalidScreen);
        }
        let size = width.safe_mul(height)?;
        if values.len() < size {
            return Err(IpaError::InvalidScreen);
        }
        let mut data = self.ctx.alloc_aligned(size, HT_ALIGN)?;
        let form = self.screen_form;
        for (dst, &src) in data.iter_mut().zip(values[..size].iter()) {
            *dst = form.encode(src, invert);
        }
        let (w, h) = (width as i64, height as i64);
        self.screens[self.screen_fill] = Some(Screen {
            w,
            h,
            x_phase: (x_phase as i64).rem_euclid(w),
            y_phase: (y_phase as i64).rem_euclid(h),
            data,
        });
        self.screen_fill += 1;
        Ok(())
    }

    /// Source width and height this instance was built for.
    pub fn source_size(&self) -> (i32, i32) {
        (self.w, self.h)
    }

    /// Whether the device mapping swaps the axes.
    pub fn is_landscape(&self) -> bool {
        self.landscape
    }

    /// Device rectangle after clipping, as `(x0, y0, x1, y1)`.
    pub fn clipped_rect(&self) -> (i32, i32, i32, i32) {
        let r = self.cdrect;
        (r.x0, r.y0, r.x1, r.y1)
    }

    /// Unclipped device rectangle, as `(x0, y0, x1, y1)`.
    pub fn device_rect(&self) -> (i32, i32, i32, i32) {
        let r = self.drect;
        (r.x0, r.y0, r.x1, r.y1)
    }

    #[inline]
    fn forward_y(&self) -> bool {
        if self.landscape {
            self.matrix.yx >= 0.
        } else {
            self.matrix.yy >= 0.
        }
    }

    /// Tells whether the next source line contributes to the output. When it doesn't,
    /// the line is accounted as consumed and must not be passed to
    /// [Halftone::process_planar].
    pub fn next_line_required(&mut self) -> bool {
        if self.forward_y() {
            if self.bry.i > self.in_idx {
                self.in_idx += 1;
                return false;
            }
        } else if self.bry.i < self.in_idx {
            self.in_idx -= 1;
            return false;
        }
        true
    }

    /// Feeds the next source line, one slice per plane (a single slice with a colour
    /// cache), and reports finished output through `callback`.
    pub fn process_planar<F>(&mut self, lines: &[&[u8]], mut callback: F) -> Result<(), IpaError>
    where
        F: FnMut(&HalftoneData<'_>),
    {
        if self.screen_fill < self.num_planes {
            return Err(IpaError::ScreensIncomplete);
        }
        let planes_in = if self.cache.is_some() {
            1
        } else {
            self.num_planes
        };
        if lines.len() < planes_in {
            return Err(IpaError::InvalidPlaneCount(lines.len()));
        }
        for line in lines.iter().take(planes_in) {
            if line.len() < self.w as usize {
                return Err(IpaError::MinimumSliceSizeMismatch(MismatchedSize {
                    expected: self.w as usize,
                    received: line.len(),
                }));
            }
        }

        if self.forward_y() {
            let skip = self.bry.i > self.in_idx;
            self.in_idx += 1;
            if skip {
                return Ok(());
            }
        } else {
            let skip = self.bry.i < self.in_idx;
            self.in_idx -= 1;
            if skip {
                return Ok(());
            }
        }

        let cd = self.cdrect;
        if cd.x1 == cd.x0 || cd.y1 == cd.y0 {
            return Ok(());
        }

        if self.landscape {
            self.process_landscape(lines, &mut callback);
        } else {
            self.process_portrait(lines, &mut callback);
        }
        Ok(())
    }

    /// Resamples `lines` along the x stepper into the contone buffer; sample `k` of
    /// plane `p` lands at `p * plane_stride + base + k * step`.
    fn copy_line(&mut self, lines: &[&[u8]], count: usize, base: usize, step: usize) {
        let plane_stride = self.contone.len() / self.num_planes;
        let contone = &mut self.contone[..];
        let n = self.num_planes;
        let w = self.w as usize;
        match &self.cache {
            Some(cache) => {
                resample_line(self.copy, &self.brx, &lines[0][..w], count, |k, v| {
                    let entry = &cache[v as usize * n..v as usize * n + n];
                    for (p, &value) in entry.iter().enumerate() {
                        contone[p * plane_stride + base + k * step] = value;
                    }
                });
            }
            None => {
                for (p, line) in lines.iter().take(n).enumerate() {
                    let dst = &mut contone[p * plane_stride..(p + 1) * plane_stride];
                    resample_line(self.copy, &self.brx, &line[..w], count, |k, v| {
                        dst[base + k * step] = v;
                    });
                }
            }
        }
    }

    fn process_portrait<F>(&mut self, lines: &[&[u8]], callback: &mut F)
    where
        F: FnMut(&HalftoneData<'_>),
    {
        let cd = self.cdrect;
        let dst_off = (cd.x0 - self.left) as usize;
        let dw = (cd.x1 - cd.x0) as usize;
        let stride = self.contone_stride;
        let direction = if self.matrix.yy >= 0. { 1 } else { -1 };

        self.copy_line(lines, dw, dst_off, 1);

        let y = self.bry.i;
        while self.bry.i == y {
            if self.out_idx < cd.y0 || self.out_idx >= cd.y1 {
                break;
            }
            for (p, screen) in self.screens.iter().take(self.num_planes).enumerate() {
                if let Some(screen) = screen {
                    let row = screen.row(self.out_idx as i64);
                    let sx = screen.column(cd.x0 as i64);
                    let start = p * stride + dst_off;
                    tile_row(&mut self.screen[start..start + dw], row, sx);
                }
            }
            (self.threshold)(&mut self.halftone[..], &self.contone[..], &self.screen[..]);

            let data = HalftoneData {
                data: &self.halftone[..],
                offset_x: (-self.left) >> 3,
                raster: self.halftone_stride,
                x: cd.x0,
                y: self.out_idx,
                w: dw as i32,
                h: 1,
                plane_raster: self.halftone_stride,
            };
            callback(&data);

            self.out_idx += direction;
            self.bry.step();
        }
    }

    fn process_landscape<F>(&mut self, lines: &[&[u8]], callback: &mut F)
    where
        F: FnMut(&HalftoneData<'_>),
    {
        let cd = self.cdrect;
        let dh = (cd.y1 - cd.y0) as usize;
        let block = HT_LANDSCAPE * dh;
        let forward = self.matrix.yx >= 0.;
        let mask = HT_LANDSCAPE as i32 - 1;

        let y = self.bry.i;
        while self.bry.i == y {
            if self.out_idx < cd.x0 || self.out_idx >= cd.x1 {
                break;
            }
            self.copy_line(lines, dh, (self.out_idx & mask) as usize, HT_LANDSCAPE);

            let ready = if forward {
                let written = self.out_idx;
                self.out_idx += 1;
                if (self.out_idx & mask) == 0 || self.out_idx == cd.x1 {
                    let x = (written & !mask).max(cd.x0);
                    Some((x, self.out_idx - x))
                } else {
                    None
                }
            } else {
                let x = self.out_idx;
                self.out_idx -= 1;
                if (self.out_idx & mask) == mask || self.out_idx == cd.x0 - 1 {
                    Some((x, (HT_LANDSCAPE as i32 - (x & mask)).min(cd.x1 - x)))
                } else {
                    None
                }
            };

            if let Some((x, w)) = ready {
                log::trace!("Halftone landscape block x {x} w {w}");
                let column = (x & mask) as usize;
                for (p, screen) in self.screens.iter().take(self.num_planes).enumerate() {
                    if let Some(screen) = screen {
                        let sx = screen.column(x as i64);
                        for k in 0..dh {
                            let row = screen.row(cd.y0 as i64 + k as i64);
                            let start = p * block + k * HT_LANDSCAPE + column;
                            tile_row(&mut self.screen[start..start + w as usize], row, sx);
                        }
                    }
                }
                (self.threshold)(&mut self.halftone[..], &self.contone[..], &self.screen[..]);

                let data = HalftoneData {
                    data: &self.halftone[..],
                    offset_x: -((x & !mask) >> 3),
                    raster: self.halftone_stride,
                    x,
                    y: cd.y0,
                    w,
                    h: dh as i32,
                    plane_raster: self.halftone_stride * dh,
                };
                callback(&data);
            }

            self.bry.step();
        }
    }

    /// Rewinds to the first source line. Screens and buffers are kept.
    pub fn reset(&mut self) {
        let d = self.drect;
        let fd = self.fdrect;
        let cd = self.cdrect;
        let (w, h) = (self.w, self.h);
        if self.landscape {
            self.brx = if self.matrix.xy > 0. {
                Bresenham::new(0, w, fd.y1, fd.y0)
            } else {
                Bresenham::new(w, -w, fd.y1, fd.y0)
            };
            self.brx.advance(cd.y0 - d.y0);
            if self.matrix.yx > 0. {
                self.bry = Bresenham::new(0, h, fd.x1, fd.x0);
                self.bry.advance(cd.x0 - d.x0);
                self.out_idx = cd.x0;
                self.in_idx = 0;
            } else {
                self.bry = Bresenham::new(h, -h, fd.x1, fd.x0);
                self.bry.advance(d.x1 - cd.x1);
                self.out_idx = cd.x1 - 1;
                self.in_idx = h - 1;
            }
        } else {
            self.brx = if self.matrix.xx > 0. {
                Bresenham::new(0, w, fd.x1, fd.x0)
            } else {
                Bresenham::new(w, -w, fd.x1, fd.x0)
            };
            self.brx.advance(cd.x0 - d.x0);
            if self.matrix.yy > 0. {
                self.bry = Bresenham::new(0, h, fd.y1, fd.y0);
                self.bry.advance(cd.y0 - d.y0);
                self.out_idx = cd.y0;
                self.in_idx = 0;
            } else {
                self.bry = Bresenham::new(h, -h, fd.y1, fd.y0);
                self.bry.advance(d.y1 - cd.y1);
                self.out_idx = cd.y1 - 1;
                self.in_idx = h - 1;
            }
        }
        log::trace!(
            "Halftone reset, working bounds {}..{}, first output {}",
            self.left,
            self.right,
            self.out_idx
        );
    }
}

/// Transforms the source extent and stores it in 24.8 fixed point, applying the
/// any part of pixel snap.
fn device_rect(matrix: &Matrix, w: i32, h: i32, any_part_of_pixel: bool) -> Rect {
    let (w, h) = (w as f32, h as f32);
    let corners = [
        matrix.transform(0., 0.),
        matrix.transform(w, 0.),
        matrix.transform(0., h),
        matrix.transform(w, h),
    ];
    let mut x0 = f32::INFINITY;
    let mut y0 = f32::INFINITY;
    let mut x1 = f32::NEG_INFINITY;
    let mut y1 = f32::NEG_INFINITY;
    for (x, y) in corners {
        x0 = x0.min(x);
        y0 = y0.min(y);
        x1 = x1.max(x);
        y1 = y1.max(y);
    }
    let fixed = |v: f32| (v * 256.).floor() as i32;
    let mut rect = Rect {
        x0: fixed(x0),
        y0: fixed(y0),
        x1: fixed(x1),
        y1: fixed(y1),
    };
    if any_part_of_pixel {
        if rect.x0 & 255 >= 128 {
            rect.x0 = (rect.x0 & !255) | 128;
        }
        if rect.y0 & 255 >= 128 {
            rect.y0 = (rect.y0 & !255) | 128;
        }
        if rect.x1 & 255 < 128 {
            rect.x1 = (rect.x1 & !255) | 128;
        }
        if rect.y1 & 255 < 128 {
            rect.y1 = (rect.y1 & !255) | 128;
        }
    }
    rect
}
