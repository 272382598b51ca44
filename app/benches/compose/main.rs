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
    compose_isolated_fullmask, compose_nonisolated_nomask, ComposePlanes, ComposePlanesMut,
    ComposeRect, Context, FullMask, ThreadingPolicy,
};

pub fn criterion_benchmark(c: &mut Criterion) {
    let ctx = Context::new();
    let (width, height, n_chan) = (1600usize, 1200usize, 4usize);
    let plane = width * height;
    let top: Vec<u8> = (0..plane * (n_chan + 1))
        .map(|i| ((i * 13) % 256) as u8)
        .collect();
    let backdrop: Vec<u8> = (0..plane * (n_chan + 1))
        .map(|i| ((i * 7 + 90) % 256) as u8)
        .collect();
    let mask: Vec<u8> = (0..plane).map(|i| (i % 256) as u8).collect();
    let rect = ComposeRect::new(0, 0, width as i32, height as i32);

    c.bench_function("libipa: CMYK group compose", |b| {
        let mut dst = backdrop.clone();
        b.iter(|| {
            compose_nonisolated_nomask(
                &ctx,
                ComposePlanes {
                    data: &top,
                    row_stride: width,
                    plane_stride: plane,
                },
                ComposePlanesMut {
                    data: &mut dst,
                    row_stride: width,
                    plane_stride: plane,
                },
                n_chan,
                rect,
                200,
                ThreadingPolicy::Adaptive,
            )
            .unwrap();
        })
    });

    c.bench_function("libipa: CMYK group compose with soft mask, Single", |b| {
        let mut dst = backdrop.clone();
        b.iter(|| {
            compose_isolated_fullmask(
                &ctx,
                ComposePlanes {
                    data: &top,
                    row_stride: width,
                    plane_stride: plane,
                },
                ComposePlanesMut {
                    data: &mut dst,
                    row_stride: width,
                    plane_stride: plane,
                },
                n_chan,
                rect,
                FullMask {
                    data: &mask,
                    row_stride: width,
                    transfer: None,
                },
                255,
                ThreadingPolicy::Single,
            )
            .unwrap();
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
