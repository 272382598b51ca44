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
use libipa::{Context, RotateParams, Rotator};

fn rotate(ctx: &Context, src: &[u8], width: usize, height: usize, params: &RotateParams) {
    let rotator = Rotator::new(ctx, width, height, params, &[255, 255, 255], 3).unwrap();
    let (dst_w, dst_h) = rotator.dst_size();
    let mut dst = vec![0u8; dst_w * dst_h * 3];
    let stride = width * 3;
    let mapping = rotator.map_band(0, dst_h);
    rotator
        .band(
            &src[mapping.src_y0 * stride..mapping.src_y1 * stride],
            stride,
            mapping.src_y0,
            mapping.src_y1,
            &mut dst,
            dst_w * 3,
            0,
            dst_h,
        )
        .unwrap();
    criterion::black_box(dst);
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let (width, height) = (1200usize, 800usize);
    let src: Vec<u8> = (0..width * height * 3)
        .map(|i| ((i * 7 + i / 3000) % 256) as u8)
        .collect();
    let mut ctx = Context::new();
    let params = RotateParams::new(12.5);

    c.bench_function("libipa: RGB rotate 12.5°", |b| {
        b.iter(|| rotate(&ctx, &src, width, height, &params))
    });

    c.bench_function("libipa: RGB rotate -30° with post scale 1.5", |b| {
        let params = RotateParams::new(-30.).with_post_scale(1.5, 1.5);
        b.iter(|| rotate(&ctx, &src, width, height, &params))
    });

    ctx.force_simd(false);
    c.bench_function("libipa: RGB rotate 12.5°, scalar", |b| {
        b.iter(|| rotate(&ctx, &src, width, height, &params))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
