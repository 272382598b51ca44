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

use crate::{ClipRect, Context, Halftone, IpaError, Matrix};
use image::{DynamicImage, GrayImage};

/// Screens the image into a black and white raster.
///
/// The image is reduced to Luma8 and mapped to the device by `scale` in both
/// directions. `screen` is a `screen_w`×`screen_h` threshold tile; a pixel darker
/// than its threshold becomes ink, written as 0, everything else becomes 255.
///
/// # Arguments
///
/// * `image`: Dynamic image provided by image crate.
/// * `screen`: Threshold tile, row by row.
/// * `scale`: Source to device scale, must be positive.
///
pub fn halftone_image(
    image: &DynamicImage,
    screen: &[u8],
    screen_w: usize,
    screen_h: usize,
    scale: f32,
) -> Result<GrayImage, IpaError> {
    if !(scale.is_finite() && scale > 0.) {
        return Err(IpaError::InvalidScale);
    }
    let gray = image.to_luma8();
    let w = i32::try_from(gray.width()).map_err(|_| IpaError::ExceedingPointerSize)?;
    let h = i32::try_from(gray.height()).map_err(|_| IpaError::ExceedingPointerSize)?;

    let ctx = Context::new();
    let clip = ClipRect::new(0, 0, i32::MAX, i32::MAX);
    let mut halftone = Halftone::new(
        &ctx,
        w,
        h,
        &Matrix::scale(scale, scale),
        1,
        None,
        clip,
        false,
    )?;
    halftone.add_screen(false, screen_w, screen_h, 0, 0, screen)?;

    let (x0, y0, x1, y1) = halftone.clipped_rect();
    let out_w = (x1 - x0).max(0) as u32;
    let out_h = (y1 - y0).max(0) as u32;
    let mut out = GrayImage::from_pixel(out_w, out_h, image::Luma([255]));

    let stride = gray.width() as usize;
    for row in gray.as_raw().chunks_exact(stride.max(1)).take(h as usize) {
        if !halftone.next_line_required() {
            continue;
        }
        halftone.process_planar(&[row], |d| {
            for yy in 0..d.h.max(0) as usize {
                let y = d.y + yy as i32 - y0;
                for x in d.x..d.x + d.w {
                    if d.pixel(x, yy, 0) {
                        out.put_pixel((x - x0) as u32, y as u32, image::Luma([0]));
                    }
                }
            }
        })?;
    }
    Ok(out)
}
