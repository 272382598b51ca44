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

use image::{DynamicImage, ImageReader, RgbaImage};
use libipa::{
    enlarge_image, halftone_image, render_radial_gradient, resize_image, rotate_image,
    Context, DoubleQuality, GradientGeometry, GradientPoint, GradientRadius,
    RescaleQuality, RotateParams, ThreadingPolicy,
};
use std::time::Instant;

/// 8×8 Bayer ordered dither tile scaled to thresholds.
fn bayer_screen() -> Vec<u8> {
    let mut tile = vec![0u8; 64];
    for y in 0..8usize {
        for x in 0..8usize {
            let mut v = 0usize;
            for bit in (0..3).rev() {
                let bx = (x >> bit) & 1;
                let by = (y >> bit) & 1;
                v = (v << 2) | ((bx ^ by) << 1) | by;
            }
            tile[y * 8 + x] = (v * 4 + 2) as u8;
        }
    }
    tile
}

fn main() {
    env_logger::init();
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "assets/test_image_1.jpg".to_string());
    let img = ImageReader::open(&path).unwrap().decode().unwrap();
    log::info!("Loaded {path}: {}x{}", img.width(), img.height());

    let start = Instant::now();
    let rotated = rotate_image(&img, RotateParams::new(17.5)).unwrap();
    log::info!(
        "Rotated to {}x{} in {:?}",
        rotated.width(),
        rotated.height(),
        start.elapsed()
    );
    rotated.save("rotated.png").unwrap();

    let start = Instant::now();
    let enlarged = enlarge_image(&img, 2, DoubleQuality::Mitchell).unwrap();
    log::info!(
        "Enlarged to {}x{} in {:?}",
        enlarged.width(),
        enlarged.height(),
        start.elapsed()
    );
    enlarged.save("enlarged.png").unwrap();

    let start = Instant::now();
    let resized = resize_image(
        &img,
        img.width() * 3 / 5,
        img.height() * 3 / 5,
        RescaleQuality::Mitchell,
    )
    .unwrap();
    log::info!(
        "Resized to {}x{} in {:?}",
        resized.width(),
        resized.height(),
        start.elapsed()
    );
    resized.save("resized.png").unwrap();

    let start = Instant::now();
    let screened = halftone_image(&img, &bayer_screen(), 8, 8, 1.).unwrap();
    log::info!("Halftoned in {:?}", start.elapsed());
    screened.save("halftone.png").unwrap();

    let ctx = Context::new();
    let geometry = GradientGeometry {
        width: img.width() as usize,
        height: img.height() as usize,
        ..Default::default()
    };
    let stride = geometry.width * 4;
    let mut dst = vec![0u8; stride * geometry.height];
    let radius = GradientRadius {
        center: GradientPoint::new(geometry.width as f32 / 2., geometry.height as f32 / 2.),
        r_start: 0.,
        r_end: geometry.width.max(geometry.height) as f32 / 2.,
    };
    let colors = [[1., 0.9, 0.2, 1.], [0.9, 0.1, 0.3, 1.], [0.1, 0.1, 0.4, 1.]];
    let start = Instant::now();
    render_radial_gradient(
        &ctx,
        &mut dst,
        stride,
        &geometry,
        &radius,
        &colors,
        true,
        true,
        true,
        None,
        ThreadingPolicy::Adaptive,
    )
    .unwrap();
    log::info!("Radial gradient in {:?}", start.elapsed());
    let gradient = RgbaImage::from_raw(img.width(), img.height(), dst).unwrap();
    DynamicImage::ImageRgba8(gradient)
        .save("gradient.png")
        .unwrap();
}
