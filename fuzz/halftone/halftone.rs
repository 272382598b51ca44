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
use libipa::{ClipRect, Context, Halftone, Matrix};

#[derive(Clone, Debug, Arbitrary)]
pub struct HalftoneInput {
    pub src_width: u8,
    pub src_height: u8,
    pub planes: u8,
    pub scale_x: i8,
    pub scale_y: i8,
    pub landscape: bool,
    pub any_part: bool,
    pub clip: (i16, i16, u16, u16),
    pub screen_w: u8,
    pub screen_h: u8,
    pub phase: (i16, i16),
    pub value: u8,
}

fuzz_target!(|data: HalftoneInput| {
    if data.scale_x == 0 || data.scale_y == 0 {
        return;
    }
    let planes = (data.planes % 4) as usize + 1;
    let (sx, sy) = (data.scale_x as f32 / 16., data.scale_y as f32 / 16.);
    let matrix = if data.landscape {
        Matrix::new(0., sy, sx, 0., 3.5, -2.25)
    } else {
        Matrix::new(sx, 0., 0., sy, -1.75, 4.5)
    };
    let (w, h) = (data.src_width as i32, data.src_height as i32);
    let clip = ClipRect::new(
        data.clip.0 as i32,
        data.clip.1 as i32,
        (data.clip.2 % 2048) as i32,
        (data.clip.3 % 2048) as i32,
    );
    let ctx = Context::new();
    let Ok(mut halftone) =
        Halftone::new(&ctx, w, h, &matrix, planes, None, clip, data.any_part)
    else {
        return;
    };
    let screen_w = (data.screen_w % 32) as usize + 1;
    let screen_h = (data.screen_h % 32) as usize + 1;
    let screen: Vec<u8> = (0..screen_w * screen_h)
        .map(|i| (i * 97 % 256) as u8)
        .collect();
    for p in 0..planes {
        halftone
            .add_screen(
                p % 2 == 1,
                screen_w,
                screen_h,
                data.phase.0 as i32,
                data.phase.1 as i32,
                &screen,
            )
            .unwrap();
    }
    let line = vec![data.value; w as usize];
    let lines: Vec<&[u8]> = (0..planes).map(|_| line.as_slice()).collect();
    for _ in 0..h {
        if !halftone.next_line_required() {
            continue;
        }
        halftone
            .process_planar(&lines, |block| {
                for y in 0..block.h.max(0) as usize {
                    for x in block.x..block.x + block.w {
                        for p in 0..planes {
                            let _ = block.pixel(x, y, p);
                        }
                    }
                }
            })
            .unwrap();
    }
});
