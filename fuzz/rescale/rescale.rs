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
use libipa::{Context, RescaleQuality, RescaleRect, RescaleStep, Rescaler};

#[derive(Clone, Debug, Arbitrary)]
pub struct RescaleInput {
    pub src_width: u8,
    pub src_height: u8,
    pub dst_width: u8,
    pub dst_height: u8,
    pub patch: (u8, u8, u8, u8),
    pub channels: u8,
    pub quality: u8,
}

fuzz_target!(|data: RescaleInput| {
    let (src_w, src_h) = (data.src_width as usize, data.src_height as usize);
    let (dst_w, dst_h) = (data.dst_width as usize, data.dst_height as usize);
    if src_w == 0 || src_h == 0 || dst_w == 0 || dst_h == 0 {
        return;
    }
    let channels = (data.channels % 4) as usize + 1;
    let quality = match data.quality % 4 {
        0 => RescaleQuality::Nearest,
        1 => RescaleQuality::Linear,
        2 => RescaleQuality::DogLeg,
        _ => RescaleQuality::Mitchell,
    };
    let px = data.patch.0 as usize % dst_w;
    let py = data.patch.1 as usize % dst_h;
    let pw = data.patch.2 as usize % (dst_w - px + 1);
    let ph = data.patch.3 as usize % (dst_h - py + 1);
    let patch = RescaleRect::new(px, py, pw, ph);

    let ctx = Context::new();
    let mut rescaler = Rescaler::new(
        &ctx,
        src_w,
        src_h,
        RescaleRect::full(src_w, src_h),
        dst_w,
        dst_h,
        patch,
        quality,
        channels,
    )
    .unwrap();

    let src: Vec<u8> = (0..src_w * src_h * channels).map(|i| (i % 251) as u8).collect();
    let stride = src_w * channels;
    let mut row = vec![0u8; pw * channels];
    let (mut in_y, mut out_y) = (0usize, 0usize);
    loop {
        let input = if in_y < src_h {
            Some(&src[in_y * stride..(in_y + 1) * stride])
        } else {
            None
        };
        match rescaler.process(input, &mut row).unwrap() {
            RescaleStep::Consumed => in_y += 1,
            RescaleStep::Emitted => out_y += 1,
            RescaleStep::Finished => break,
            RescaleStep::NeedInput => panic!("Source exhausted at output line {out_y}"),
        }
    }
    assert_eq!(out_y, ph);
});
