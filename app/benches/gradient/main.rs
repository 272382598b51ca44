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

use criterion::{criterion_group, criterion_main, Criterion};
use libipa::{
    render_axial_gradient, render_radial_gradient, Context, GradientAxis, GradientGeometry,
    GradientPoint, GradientRadius, ThreadingPolicy,
};

const COLORS: [[f32; 4]; 3] = [[1., 0., 0., 1.], [0., 1., 0., 1.], [0., 0., 1., 1.]];

pub fn criterion_benchmark(c: &mut Criterion) {
    let ctx = Context::new();
    let geometry = GradientGeometry {
        width: 2000,
        height: 1500,
        ..Default::default()
    };
    let stride = geometry.width * 4;
    let mut dst = vec![0u8; stride * geometry.height];
    let axis = GradientAxis {
        start: GradientPoint::new(100., 80.),
        end: GradientPoint::new(1800., 1300.),
    };
    let radius = GradientRadius {
        center: GradientPoint::new(1000., 750.),
        r_start: 50.,
        r_end: 900.,
    };

    for (name, policy) in [
        ("Single", ThreadingPolicy::Single),
        ("Adaptive", ThreadingPolicy::Adaptive),
    ] {
        c.bench_function(&format!("libipa: axial gradient, {name}"), |b| {
            b.iter(|| {
                render_axial_gradient(
                    &ctx, &mut dst, stride, &geometry, &axis, &COLORS, true, true, true, None,
                    policy,
                )
                .unwrap();
            })
        });

        c.bench_function(&format!("libipa: radial gradient, {name}"), |b| {
            b.iter(|| {
                render_radial_gradient(
                    &ctx, &mut dst, stride, &geometry, &radius, &COLORS, true, true, true, None,
                    policy,
                )
                .unwrap();
            })
        });
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
