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
use libipa::{ClipRect, Context, Halftone, Matrix};

fn contone(width: usize, height: usize) -> Vec<u8> {
    (0..width * height)
        .map(|i| ((i % width) * 255 / width) as u8)
        .collect()
}

fn screen() -> Vec<u8> {
    (0..16 * 16).map(|i| ((i * 37 + 11) % 256) as u8).collect()
}

fn run(ctx: &Context, src: &[u8], width: usize, height: usize, matrix: &Matrix) {
    let clip = ClipRect::new(-100_000, -100_000, 200_000, 200_000);
    let mut halftone =
        Halftone::new(ctx, width as i32, height as i32, matrix, 1, None, clip, false).unwrap();
    halftone.add_screen(false, 16, 16, 0, 0, &screen()).unwrap();
    let mut set = 0usize;
    for row in src.chunks_exact(width) {
        if !halftone.next_line_required() {
            continue;
        }
        halftone
            .process_planar(&[row], |block| {
                set += block.w as usize;
            })
            .unwrap();
    }
    criterion::black_box(set);
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let (width, height) = (2480usize, 512usize);
    let src = contone(width, height);
    let mut ctx = Context::new();

    c.bench_function("libipa: halftone 1:1 portrait", |b| {
        b.iter(|| run(&ctx, &src, width, height, &Matrix::IDENTITY))
    });

    c.bench_function("libipa: halftone 2:1 landscape", |b| {
        let matrix = Matrix::new(0., 2., 2., 0., 0., 0.);
        b.iter(|| run(&ctx, &src, width, height, &matrix))
    });

    ctx.force_simd(false);
    c.bench_function("libipa: halftone 1:1 portrait, scalar", |b| {
        b.iter(|| run(&ctx, &src, width, height, &Matrix::IDENTITY))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
