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

use crate::{DoubleQuality, Doubler, IpaError};
use image::{DynamicImage, GrayAlphaImage, GrayImage, RgbImage, RgbaImage};

fn enlarge_interleaved(
    src: &[u8],
    width: u32,
    height: u32,
    channels: usize,
    factor: usize,
    quality: DoubleQuality,
) -> Result<(Vec<u8>, u32, u32), IpaError> {
    let mut doubler = Doubler::new(width as usize, height as usize, factor, quality, channels)?;
    let (dst_w, dst_h) = doubler.dst_size();
    let out_w = u32::try_from(dst_w).map_err(|_| IpaError::ExceedingPointerSize)?;
    let out_h = u32::try_from(dst_h).map_err(|_| IpaError::ExceedingPointerSize)?;
    let mut dst = vec![0u8; dst_w * dst_h * channels];
    doubler.double_image(
        src,
        width as usize * channels,
        &mut dst,
        dst_w * channels,
    )?;
    Ok((dst, out_w, out_h))
}

/// Enlarges the image `factor` times (2, 4 or 8) in both directions.
///
/// 8 bit layouts are processed as they are, anything else is converted to Rgba8.
pub fn enlarge_image(
    image: &DynamicImage,
    factor: usize,
    quality: DoubleQuality,
) -> Result<DynamicImage, IpaError> {
    match image {
        DynamicImage::ImageLuma8(img) => {
            let (data, w, h) =
                enlarge_interleaved(img.as_raw(), img.width(), img.height(), 1, factor, quality)?;
            let new_image = GrayImage::from_raw(w, h, data).ok_or(IpaError::InvalidArguments)?;
            Ok(DynamicImage::ImageLuma8(new_image))
        }
        DynamicImage::ImageLumaA8(img) => {
            let (data, w, h) =
                enlarge_interleaved(img.as_raw(), img.width(), img.height(), 2, factor, quality)?;
            let new_image =
                GrayAlphaImage::from_raw(w, h, data).ok_or(IpaError::InvalidArguments)?;
            Ok(DynamicImage::ImageLumaA8(new_image))
        }
        DynamicImage::ImageRgb8(img) => {
            let (data, w, h) =
                enlarge_interleaved(img.as_raw(), img.width(), img.height(), 3, factor, quality)?;
            let new_image = RgbImage::from_raw(w, h, data).ok_or(IpaError::InvalidArguments)?;
            Ok(DynamicImage::ImageRgb8(new_image))
        }
        DynamicImage::ImageRgba8(img) => {
            let (data, w, h) =
                enlarge_interleaved(img.as_raw(), img.width(), img.height(), 4, factor, quality)?;
            let new_image = RgbaImage::from_raw(w, h, data).ok_or(IpaError::InvalidArguments)?;
            Ok(DynamicImage::ImageRgba8(new_image))
        }
        other => {
            let img = other.to_rgba8();
            let (data, w, h) =
                enlarge_interleaved(img.as_raw(), img.width(), img.height(), 4, factor, quality)?;
            let new_image = RgbaImage::from_raw(w, h, data).ok_or(IpaError::InvalidArguments)?;
            Ok(DynamicImage::ImageRgba8(new_image))
        }
    }
}
