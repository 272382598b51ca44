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

use crate::{Context, IpaError, RescaleQuality, RescaleRect, Rescaler};
use image::{DynamicImage, GrayAlphaImage, GrayImage, RgbImage, RgbaImage};

fn resize_interleaved(
    src: &[u8],
    width: u32,
    height: u32,
    channels: usize,
    dst_w: u32,
    dst_h: u32,
    quality: RescaleQuality,
) -> Result<Vec<u8>, IpaError> {
    let ctx = Context::new();
    let (src_w, src_h) = (width as usize, height as usize);
    let (out_w, out_h) = (dst_w as usize, dst_h as usize);
    let mut rescaler = Rescaler::new(
        &ctx,
        src_w,
        src_h,
        RescaleRect::full(src_w, src_h),
        out_w,
        out_h,
        RescaleRect::full(out_w, out_h),
        quality,
        channels,
    )?;
    let mut dst = vec![0u8; out_w * out_h * channels];
    rescaler.rescale_image(src, src_w * channels, &mut dst, out_w * channels)?;
    Ok(dst)
}

/// Resizes the image to `width`×`height`.
///
/// Axes that shrink always use [RescaleQuality::DogLeg]. 8 bit layouts are processed as
/// they are, anything else is converted to Rgba8.
pub fn resize_image(
    image: &DynamicImage,
    width: u32,
    height: u32,
    quality: RescaleQuality,
) -> Result<DynamicImage, IpaError> {
    let (w, h) = (image.width(), image.height());
    match image {
        DynamicImage::ImageLuma8(img) => {
            let data = resize_interleaved(img.as_raw(), w, h, 1, width, height, quality)?;
            let new_image =
                GrayImage::from_raw(width, height, data).ok_or(IpaError::InvalidArguments)?;
            Ok(DynamicImage::ImageLuma8(new_image))
        }
        DynamicImage::ImageLumaA8(img) => {
            let data = resize_interleaved(img.as_raw(), w, h, 2, width, height, quality)?;
            let new_image =
                GrayAlphaImage::from_raw(width, height, data).ok_or(IpaError::InvalidArguments)?;
            Ok(DynamicImage::ImageLumaA8(new_image))
        }
        DynamicImage::ImageRgb8(img) => {
            let data = resize_interleaved(img.as_raw(), w, h, 3, width, height, quality)?;
            let new_image =
                RgbImage::from_raw(width, height, data).ok_or(IpaError::InvalidArguments)?;
            Ok(DynamicImage::ImageRgb8(new_image))
        }
        DynamicImage::ImageRgba8(img) => {
            let data = resize_interleaved(img.as_raw(), w, h, 4, width, height, quality)?;
            let new_image =
                RgbaImage::from_raw(width, height, data).ok_or(IpaError::InvalidArguments)?;
            Ok(DynamicImage::ImageRgba8(new_image))
        }
        other => {
            let img = other.to_rgba8();
            let data = resize_interleaved(img.as_raw(), w, h, 4, width, height, quality)?;
            let new_image =
                RgbaImage::from_raw(width, height, data).ok_or(IpaError::InvalidArguments)?;
            Ok(DynamicImage::ImageRgba8(new_image))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Luma, Rgb};

    #[test]
    fn resize_image_reports_requested_size() {
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(9, 6, Rgb([40, 90, 200])));
        for (w, h) in [(20, 13), (4, 3), (9, 6)] {
            let resized = resize_image(&image, w, h, RescaleQuality::Mitchell).unwrap();
            assert_eq!((resized.width(), resized.height()), (w, h));
            let rgb = resized.as_rgb8().unwrap();
            assert!(rgb
                .pixels()
                .all(|p| p.0.iter().zip([40u8, 90, 200]).all(|(a, b)| a.abs_diff(b) <= 1)));
        }
    }

    #[test]
    fn resize_image_rejects_empty_target() {
        let image = DynamicImage::ImageLuma8(GrayImage::from_pixel(4, 4, Luma([1])));
        assert_eq!(
            resize_image(&image, 0, 4, RescaleQuality::Nearest).unwrap_err(),
            IpaError::ZeroBaseSize
        );
    }
}
