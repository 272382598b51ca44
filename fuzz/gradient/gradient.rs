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
    render_axial_gradient, render_radial_gradient, Context, GradientAxis, GradientGeometry,
    GradientMask, GradientPoint, GradientRadius, ThreadingPolicy,
};

#[derive(Clone, Debug, Arbitrary)]
pub struct GradientInput {
    pub width: u8,
    pub height: u8,
    pub offset: (u8, u8),
    pub base: (i16, i16),
    pub points: (i16, i16, i16, i16),
    pub radii: (u16, u16),
    pub colors: Vec<[u8; 4]>,
    pub interpolate: bool,
    pub extend_start: bool,
    pub extend_end: bool,
    pub radial: bool,
    pub with_mask: bool,
    pub simd: bool,
}

fuzz_target!(|data: GradientInput| {
    if data.colors.len() > 64 {
        return;
    }
    let colors: Vec<[f32; 4]> = data
        .colors
        .iter()
        .map(|c| c.map(|v| v as f32 / 255.))
        .collect();
    let geometry = GradientGeometry {
        base_x: data.base.0 as i32,
        base_y: data.base.1 as i32,
        offset_x: (data.offset.0 % 16) as usize,
        offset_y: (data.offset.1 % 16) as usize,
        width: data.width as usize,
        height: data.height as usize,
    };
    let stride = (geometry.offset_x + geometry.width) * 4;
    let mut dst = vec![0u8; stride * (geometry.offset_y + geometry.height)];
    let mut coverage = vec![0u8; geometry.width * geometry.height];
    let mask = if data.with_mask {
        Some(GradientMask {
            data: &mut coverage,
            stride: geometry.width,
        })
    } else {
        None
    };
    let mut ctx = Context::new();
    ctx.force_simd(data.simd);
    let (x0, y0, x1, y1) = data.points;
    let _ = if data.radial {
        let (r0, r1) = (data.radii.0 as f32 / 8., data.radii.1 as f32 / 8.);
        render_radial_gradient(
            &ctx,
            &mut dst,
            stride,
            &geometry,
            &GradientRadius {
                center: GradientPoint::new(x0 as f32 / 4., y0 as f32 / 4.),
                r_start: r0.min(r1),
                r_end: r0.max(r1),
            },
            &colors,
            data.interpolate,
            data.extend_start,
            data.extend_end,
            mask,
            ThreadingPolicy::Single,
        )
    } else {
        render_axial_gradient(
            &ctx,
            &mut dst,
            stride,
            &geometry,
            &GradientAxis {
                start: GradientPoint::new(x0 as f32 / 4., y0 as f32 / 4.),
                end: GradientPoint::new(x1 as f32 / 4., y1 as f32 / 4.),
            },
            &colors,
            data.interpolate,
            data.extend_start,
            data.extend_end,
            mask,
            ThreadingPolicy::Single,
        )
    };
});
