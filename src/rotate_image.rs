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

use crate::{Context, IpaError, RotateParams, Rotator};
use image::{DynamicImage, GrayImage, RgbImage, RgbaImage};

fn rotate_interleaved(
    src: &[u8],
    width: u32,
    height: u32,
    channels: usize,
    params: &RotateParams,
) -> Result<(Vec<u8>, u32, u32), IpaError> {
    let ctx = Context::new();
    let background = [0u8; 4];
    let rotator = Rotator::new(
        &ctx,
        width as usize,
        height as usize,
        params,
        &background[..channels],
        channels,
    )?;
    let (dst_w, dst_h) = rotator.dst_size();
    let out_w = u32::try_from(dst_w).map_err(|_| IpaError::ExceedingPointerSize)?;
    let out_h = u32::try_from(dst_h).map_err(|_| IpaError::ExceedingPointerSize)?;

    let src_stride = width as usize * channels;
    let dst_stride = dst_w * channels;
    let mut dst = vec![0u8; dst_stride * dst_h];
    let mapping = rotator.map_band(0, dst_h);
    rotator.band(
        &src[mapping.src_y0 * src_stride..mapping.src_y1 * src_stride],
        src_stride,
        mapping.src_y0,
        mapping.src_y1,
        &mut dst,
        dst_stride,
        0,
        dst_h,
    )?;
    Ok((dst, out_w, out_h))
}

/// Rotates the image by `params.degrees` with the configured pre and post scales.
///
/// Area outside the rotated source is zero, which is transparent black for images
/// with alpha. Luma8, Rgb8 and Rgba8 keep their layout; any other format is
/// converted to Rgba8 first.
///
/// # Arguments
///
/// * `image`: Dynamic image provided by image crate.
/// * `params`: See [RotateParams] for more info.
///
pub fn rotate_image(image: &DynamicImage, params: RotateParams) -> Result<DynamicImage, IpaError> {
    match image {
        DynamicImage::ImageLuma8(gray) => {
            let (data, w, h) =
                rotate_interleaved(gray.as_raw(), gray.width(), gray.height(), 1, &params)?;
            let new_image = GrayImage::from_raw(w, h, data).ok_or(IpaError::InvalidArguments)?;
            Ok(DynamicImage::ImageLuma8(new_image))
        }
        DynamicImage::ImageRgb8(img) => {
            let (data, w, h) =
                rotate_interleaved(img.as_raw(), img.width(), img.height(), 3, &params)?;
            let new_image = RgbImage::from_raw(w, h, data).ok_or(IpaError::InvalidArguments)?;
            Ok(DynamicImage::ImageRgb8(new_image))
        }
        DynamicImage::ImageRgba8(img) => {
            let (data, w, h) =
                rotate_interleaved(img.as_raw(), img.width(), img.height(), 4, &params)?;
            let new_image = RgbaImage::from_raw(w, h, data).ok_or(IpaError::InvalidArguments)?;
            Ok(DynamicImage::ImageRgba8(new_image))
        }
        other => {
            let img = other.to_rgba8();
            let (data, w, h) =
                rotate_interleaved(img.as_raw(), img.width(), img.height(), 4, &params)?;
            let new_image = RgbaImage::from_raw(w, h, data).ok_or(IpaError::InvalidArguments)?;
            Ok(DynamicImage::ImageRgba8(new_image))
        }
    }
}
