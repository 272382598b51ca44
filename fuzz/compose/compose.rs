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

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use libipa::{
    compose_group, ComposeMask, ComposeParams, ComposePlanes, ComposePlanesMut, ComposeRect,
    Context, FullMask, PartialMask, ThreadingPolicy,
};

#[derive(Clone, Debug, Arbitrary)]
pub struct ComposeInput {
    pub width: u8,
    pub height: u8,
    pub n_chan: u8,
    pub origin: (i16, i16),
    pub mask: u8,
    pub bounds: (i16, i16, i16, i16),
    pub bg_alpha: u8,
    pub alpha: u8,
    pub isolated: bool,
    pub simd: bool,
    pub threads: bool,
    pub seed: u8,
}

fuzz_target!(|data: ComposeInput| {
    let (w, h) = (data.width as usize, data.height as usize);
    let n_chan = (data.n_chan % 4) as usize + 1;
    let planes = n_chan + 1;
    let fill = |salt: usize| -> Vec<u8> {
        (0..w * h * planes)
            .map(|i| ((i * 31 + salt * 17 + data.seed as usize) % 256) as u8)
            .collect()
    };
    let top = fill(1);
    let mut backdrop = fill(2);
    let mask_data = fill(3);
    let transfer: Vec<u8> = (0..=255u8).map(|v| v.wrapping_mul(3)).collect();

    let mask = match data.mask % 4 {
        0 => ComposeMask::None,
        1 => ComposeMask::Partial(PartialMask {
            data: &mask_data,
            row_stride: w,
            bounds: ComposeRect::new(
                data.bounds.0 as i32,
                data.bounds.1 as i32,
                data.bounds.2 as i32,
                data.bounds.3 as i32,
            ),
            bg_alpha: data.bg_alpha,
            transfer: Some(&transfer),
        }),
        2 => ComposeMask::Full(FullMask {
            data: &mask_data,
            row_stride: w,
            transfer: None,
        }),
        _ => ComposeMask::Full(FullMask {
            data: &mask_data,
            row_stride: w,
            transfer: Some(&transfer),
        }),
    };

    let mut ctx = Context::new();
    ctx.force_simd(data.simd);
    let (x0, y0) = (data.origin.0 as i32, data.origin.1 as i32);
    let _ = compose_group(
        &ctx,
        ComposeParams {
            top: ComposePlanes {
                data: &top,
                row_stride: w,
                plane_stride: w * h,
            },
            backdrop: ComposePlanesMut {
                data: &mut backdrop,
                row_stride: w,
                plane_stride: w * h,
            },
            isolated: data.isolated,
            n_chan,
            rect: ComposeRect::new(x0, y0, x0 + w as i32, y0 + h as i32),
            mask,
            alpha: data.alpha,
        },
        if data.threads {
            ThreadingPolicy::Adaptive
        } else {
            ThreadingPolicy::Single
        },
    );
});
