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

use crate::compose::blend::{blend_row, BlendRowFn};
use crate::unsafe_slice::UnsafeSlice;
use crate::util::{check_planar_size, check_slice_size, MismatchedSize};
use crate::{Context, IpaError, ThreadingPolicy};

/// Rectangle in absolute device coordinates, `x1` and `y1` exclusive.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Hash)]
pub struct ComposeRect {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl ComposeRect {
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> ComposeRect {
        ComposeRect { x0, y0, x1, y1 }
    }

    #[inline]
    fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x0 && x < self.x1 && y >= self.y0 && y < self.y1
    }
}

/// Planar pixel group: `n_chan` colour planes followed by one alpha plane.
///
/// `data` starts at the top left pixel of the composed rectangle.
#[derive(Debug, Copy, Clone)]
pub struct ComposePlanes<'a> {
    pub data: &'a [u8],
    pub row_stride: usize,
    pub plane_stride: usize,
}

#[derive(Debug)]
pub struct ComposePlanesMut<'a> {
    pub data: &'a mut [u8],
    pub row_stride: usize,
    pub plane_stride: usize,
}

/// Soft mask that only covers `bounds`; pixels outside read `bg_alpha`.
///
/// The raster still spans the whole rectangle: its row 0 and column 0 are the
/// rectangle's top left pixel.
#[derive(Debug, Copy, Clone)]
pub struct PartialMask<'a> {
    pub data: &'a [u8],
    pub row_stride: usize,
    pub bounds: ComposeRect,
    pub bg_alpha: u8,
    /// 256 entry transfer table.
    pub transfer: Option<&'a [u8]>,
}

/// Soft mask covering every pixel of the rectangle.
#[derive(Debug, Copy, Clone)]
pub struct FullMask<'a> {
    pub data: &'a [u8],
    pub row_stride: usize,
    /// 256 entry transfer table.
    pub transfer: Option<&'a [u8]>,
}

#[derive(Debug, Copy, Clone, Default)]
pub enum ComposeMask<'a> {
    #[default]
    None,
    Partial(PartialMask<'a>),
    Full(FullMask<'a>),
}

/// Everything one group composition needs: the top of stack group is blended onto the
/// backdrop over `rect`.
#[derive(Debug)]
pub struct ComposeParams<'a> {
    pub top: ComposePlanes<'a>,
    pub backdrop: ComposePlanesMut<'a>,
    pub isolated: bool,
    pub n_chan: usize,
    pub rect: ComposeRect,
    pub mask: ComposeMask<'a>,
    /// Group opacity.
    pub alpha: u8,
}

fn select_blend(use_simd: bool) -> BlendRowFn {
    #[cfg(all(any(target_arch = "x86_64", target_arch = "x86"), feature = "sse"))]
    {
        if use_simd && std::arch::is_x86_feature_detected!("sse4.1") {
            return crate::compose::sse::blend_row_sse;
        }
    }
    #[cfg(all(target_arch = "aarch64", feature = "neon"))]
    {
        if use_simd {
            return crate::compose::neon::blend_row_neon;
        }
    }
    let _ = use_simd;
    blend_row
}

/// Mask view with the transfer table folded to `None` when it is the identity.
#[derive(Copy, Clone)]
struct SoftMask<'a> {
    data: &'a [u8],
    row_stride: usize,
    bounds: Option<ComposeRect>,
    bg_alpha: u8,
    transfer: Option<&'a [u8; 256]>,
}

impl<'a> SoftMask<'a> {
    fn new(mask: &ComposeMask<'a>) -> Result<Option<SoftMask<'a>>, IpaError> {
        let (data, row_stride, bounds, bg_alpha, transfer) = match *mask {
            ComposeMask::None => return Ok(None),
            ComposeMask::Partial(m) => {
                (m.data, m.row_stride, Some(m.bounds), m.bg_alpha, m.transfer)
            }
            ComposeMask::Full(m) => (m.data, m.row_stride, None, 0, m.transfer),
        };
        let transfer = match transfer {
            Some(table) => {
                let table: &[u8; 256] = table.try_into().map_err(|_| {
                    IpaError::MinimumSliceSizeMismatch(MismatchedSize {
                        expected: 256,
                        received: table.len(),
                    })
                })?;
                let linear = table.iter().enumerate().all(|(i, &v)| i == v as usize);
                if linear {
                    None
                } else {
                    Some(table)
                }
            }
            None => None,
        };
        Ok(Some(SoftMask {
            data,
            row_stride,
            bounds,
            bg_alpha,
            transfer,
        }))
    }

    /// Resolves rectangle row `y` (absolute `abs_y`) into `dst`, one value per pixel.
    fn resolve_row(&self, dst: &mut [u8], y: usize, x0: i32, abs_y: i32) {
        let row = &self.data[y * self.row_stride..][..dst.len()];
        for (x, (dst, &src)) in dst.iter_mut().zip(row.iter()).enumerate() {
            if let Some(bounds) = self.bounds {
                if !bounds.contains(x0 + x as i32, abs_y) {
                    *dst = self.bg_alpha;
                    continue;
                }
            }
            *dst = match self.transfer {
                Some(table) => table[src as usize],
                None => src,
            };
        }
    }
}

struct ComposeJob<'a> {
    top: ComposePlanes<'a>,
    dst_row_stride: usize,
    dst_plane_stride: usize,
    n_chan: usize,
    rect: ComposeRect,
    width: usize,
    height: usize,
    mask: Option<SoftMask<'a>>,
    alpha: u8,
    blend: BlendRowFn,
}

/// Composes rows `height * worker / worker_count..height * (worker + 1) / worker_count`.
fn compose_worker(job: &ComposeJob, dst: &UnsafeSlice<u8>, worker: usize, worker_count: usize) {
    let start = job.height * worker / worker_count;
    let end = job.height * (worker + 1) / worker_count;
    let mut softmask = vec![0u8; if job.mask.is_some() { job.width } else { 0 }];
    for y in start..end {
        let soft = match &job.mask {
            Some(mask) => {
                mask.resolve_row(&mut softmask, y, job.rect.x0, job.rect.y0 + y as i32);
                Some(softmask.as_slice())
            }
            None => None,
        };
        (job.blend)(
            &job.top.data[y * job.top.row_stride..],
            job.top.plane_stride,
            dst,
            y * job.dst_row_stride,
            job.dst_plane_stride,
            job.n_chan,
            soft,
            job.alpha,
            job.width,
        );
    }
}

/// Blends a transparency group onto its backdrop over `params.rect`.
///
/// Both groups are planar with alpha after the colour planes. A pixel whose source
/// alpha is zero leaves the backdrop as is; an empty backdrop takes the source
/// colours; otherwise the colours are mixed in proportion to the source share of the
/// union alpha. `isolated` is accepted for both group kinds and does not change the
/// arithmetic.
pub fn compose_group(
    ctx: &Context,
    params: ComposeParams,
    threading_policy: ThreadingPolicy,
) -> Result<(), IpaError> {
    let n_chan = params.n_chan;
    if n_chan == 0 || n_chan > 4 {
        return Err(IpaError::InvalidChannels(n_chan));
    }
    let rect = params.rect;
    if rect.x1 < rect.x0 || rect.y1 < rect.y0 {
        return Err(IpaError::NegativeDimensions);
    }
    let width = (rect.x1 as i64 - rect.x0 as i64) as usize;
    let height = (rect.y1 as i64 - rect.y0 as i64) as usize;
    if width == 0 || height == 0 {
        return Ok(());
    }

    let top = params.top;
    check_planar_size(
        top.data,
        top.row_stride,
        top.plane_stride,
        width,
        height,
        n_chan + 1,
    )?;
    let backdrop = params.backdrop;
    check_planar_size(
        &*backdrop.data,
        backdrop.row_stride,
        backdrop.plane_stride,
        width,
        height,
        n_chan + 1,
    )?;
    let mask = SoftMask::new(&params.mask)?;
    if let Some(mask) = &mask {
        check_slice_size(mask.data, mask.row_stride, width, height, 1)?;
    }

    let blend = select_blend(ctx.use_simd());
    log::trace!(
        "Compose {} group {}x{} at {},{} with {} channels, mask {}, alpha {}",
        if params.isolated { "isolated" } else { "non isolated" },
        width,
        height,
        rect.x0,
        rect.y0,
        n_chan,
        mask.is_some(),
        params.alpha
    );

    let job = ComposeJob {
        top,
        dst_row_stride: backdrop.row_stride,
        dst_plane_stride: backdrop.plane_stride,
        n_chan,
        rect,
        width,
        height,
        mask,
        alpha: params.alpha,
        blend,
    };
    let dst = UnsafeSlice::new(backdrop.data);

    if let Some(pool) = threading_policy.pool(width as u32, height as u32) {
        let worker_count = pool.current_num_threads();
        let job = &job;
        pool.scope(|scope| {
            for worker in 0..worker_count {
                scope.spawn(move |_| {
                    compose_worker(job, &dst, worker, worker_count);
                });
            }
        });
    } else {
        compose_worker(&job, &dst, 0, 1);
    }
    Ok(())
}

macro_rules! compose_entry {
    ($(#[$meta:meta])* $name:ident, $isolated:expr) => {
        $(#[$meta])*
        #[allow(clippy::too_many_arguments)]
        pub fn $name(
            ctx: &Context,
            top: ComposePlanes,
            backdrop: ComposePlanesMut,
            n_chan: usize,
            rect: ComposeRect,
            alpha: u8,
            threading_policy: ThreadingPolicy,
        ) -> Result<(), IpaError> {
            compose_group(
                ctx,
                ComposeParams {
                    top,
                    backdrop,
                    isolated: $isolated,
                    n_chan,
                    rect,
                    mask: ComposeMask::None,
                    alpha,
                },
                threading_policy,
            )
        }
    };
    ($(#[$meta:meta])* $name:ident, $isolated:expr, $mask:ident, $variant:ident) => {
        $(#[$meta])*
        #[allow(clippy::too_many_arguments)]
        pub fn $name(
            ctx: &Context,
            top: ComposePlanes,
            backdrop: ComposePlanesMut,
            n_chan: usize,
            rect: ComposeRect,
            mask: $mask,
            alpha: u8,
            threading_policy: ThreadingPolicy,
        ) -> Result<(), IpaError> {
            compose_group(
                ctx,
                ComposeParams {
                    top,
                    backdrop,
                    isolated: $isolated,
                    n_chan,
                    rect,
                    mask: ComposeMask::$variant(mask),
                    alpha,
                },
                threading_policy,
            )
        }
    };
}

compose_entry!(
    /// Isolated group without a soft mask.
    compose_isolated_nomask,
    true
);
compose_entry!(
    /// Isolated group with a soft mask limited to its bounds.
    compose_isolated_partialmask,
    true,
    PartialMask,
    Partial
);
compose_entry!(
    /// Isolated group with a soft mask over the whole rectangle.
    compose_isolated_fullmask,
    true,
    FullMask,
    Full
);
compose_entry!(
    /// Non isolated group without a soft mask.
    compose_nonisolated_nomask,
    false
);
compose_entry!(
    /// Non isolated group with a soft mask limited to its bounds.
    compose_nonisolated_partialmask,
    false,
    PartialMask,
    Partial
);
compose_entry!(
    /// Non isolated group with a soft mask over the whole rectangle.
    compose_nonisolated_fullmask,
    false,
    FullMask,
    Full
);
