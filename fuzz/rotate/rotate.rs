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

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use libipa::{Context, RotateParams, Rotator};

#[derive(Clone, Debug, Arbitrary)]
pub struct RotateInput {
    pub src_width: u8,
    pub src_height: u8,
    pub channels: u8,
    pub degrees: i16,
    pub pre_scale: (u8, u8),
    pub post_scale: (u8, u8),
    pub bands: u8,
}

fuzz_target!(|data: RotateInput| {
    let (w, h) = (data.src_width as usize, data.src_height as usize);
    if w == 0 || h == 0 {
        return;
    }
    let channels = (data.channels % 4) as usize + 1;
    let params = RotateParams::new((data.degrees % 901) as f64 / 10.)
        .with_pre_scale(
            (data.pre_scale.0 % 32 + 1) as f64 / 8.,
            (data.pre_scale.1 % 32 + 1) as f64 / 8.,
        )
        .with_post_scale(
            (data.post_scale.0 % 32 + 1) as f64 / 8.,
            (data.post_scale.1 % 32 + 1) as f64 / 8.,
        );
    let Ok((dst_w, dst_h)) = Rotator::pre_init(w, h, &params) else {
        return;
    };
    if dst_w == 0 || dst_h == 0 || dst_w * dst_h > 2048 * 2048 {
        return;
    }
    let ctx = Context::new();
    let rotator = Rotator::new(&ctx, w, h, &params, &[255, 128, 0, 255], channels).unwrap();
    assert_eq!(rotator.dst_size(), (dst_w, dst_h));

    let src: Vec<u8> = (0..w * h * channels).map(|i| (i % 251) as u8).collect();
    let src_stride = w * channels;
    let dst_stride = dst_w * channels;
    let mut dst = vec![0u8; dst_stride * dst_h];
    let bands = (data.bands % 8) as usize + 1;
    for b in 0..bands {
        let y0 = dst_h * b / bands;
        let y1 = dst_h * (b + 1) / bands;
        let mapping = rotator.map_band(y0, y1);
        rotator
            .band(
                &src[mapping.src_y0 * src_stride..mapping.src_y1 * src_stride],
                src_stride,
                mapping.src_y0,
                mapping.src_y1,
                &mut dst[y0 * dst_stride..y1 * dst_stride],
                dst_stride,
                y0,
                y1,
            )
            .unwrap();
    }
});
