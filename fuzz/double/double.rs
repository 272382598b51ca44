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
use libipa::{DoubleQuality, Doubler};

#[derive(Clone, Debug, Arbitrary)]
pub struct DoubleInput {
    pub src_width: u8,
    pub src_height: u8,
    pub channels: u8,
    pub factor: u8,
    pub quality: u8,
    pub seed: u8,
}

fuzz_target!(|data: DoubleInput| {
    let (w, h) = (data.src_width as usize, data.src_height as usize);
    let channels = (data.channels % 4) as usize + 1;
    let factor = [2, 4, 8][(data.factor % 3) as usize];
    let quality = match data.quality % 3 {
        0 => DoubleQuality::Nearest,
        1 => DoubleQuality::Interp,
        _ => DoubleQuality::Mitchell,
    };
    let Ok(mut doubler) = Doubler::new(w, h, factor, quality, channels) else {
        return;
    };
    let src: Vec<u8> = (0..w * h * channels)
        .map(|i| (i * 13 + data.seed as usize) as u8)
        .collect();
    let (dst_w, dst_h) = doubler.dst_size();
    let mut dst = vec![0u8; dst_w * dst_h * channels];
    doubler
        .double_image(&src, w * channels, &mut dst, dst_w * channels)
        .unwrap();
    assert_eq!(doubler.lines_written(), dst_h);
});
