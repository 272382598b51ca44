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
use libipa::{Context, RescaleQuality, RescaleRect, Rescaler};

fn rescale(
    ctx: &Context,
    src: &[u8],
    width: usize,
    height: usize,
    dst_w: usize,
    dst_h: usize,
    quality: RescaleQuality,
) {
    let mut rescaler = Rescaler::new(
        ctx,
        width,
        height,
        RescaleRect::full(width, height),
        dst_w,
        dst_h,
        RescaleRect::full(dst_w, dst_h),
        quality,
        3,
    )
    .unwrap();
    let mut dst = vec![0u8; dst_w * dst_h * 3];
    rescaler
        .rescale_image(src, width * 3, &mut dst, dst_w * 3)
        .unwrap();
    criterion::black_box(dst);
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let (width, height) = (1200usize, 800usize);
    let src: Vec<u8> = (0..width * height * 3)
        .map(|i| ((i * 13 + i / 2900) % 256) as u8)
        .collect();
    let mut ctx = Context::new();

    c.bench_function("libipa: RGB rescale Mitchell 1.5x", |b| {
        b.iter(|| rescale(&ctx, &src, width, height, 1800, 1200, RescaleQuality::Mitchell))
    });

    c.bench_function("libipa: RGB rescale down to 0.4x", |b| {
        b.iter(|| rescale(&ctx, &src, width, height, 480, 320, RescaleQuality::Mitchell))
    });

    ctx.force_simd(false);
    c.bench_function("libipa: RGB rescale Mitchell 1.5x, scalar", |b| {
        b.iter(|| rescale(&ctx, &src, width, height, 1800, 1200, RescaleQuality::Mitchell))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
