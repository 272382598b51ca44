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

/// Where a sample falls relative to the parametric range of the gradient.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) enum Span {
    BeforeStart,
    PastEnd,
    /// Parametric position, nominally in `0..=1`.
    Inside(f32),
}

/// Colour table lookup shared by the axial and radial renderers.
#[derive(Debug, Copy, Clone)]
pub(crate) struct ColorRamp<'a> {
    colors: &'a [[f32; 4]],
    interpolate: bool,
    extend_start: bool,
    extend_end: bool,
    start: [u8; 4],
    end: [u8; 4],
}

#[inline(always)]
fn to_byte(v: f32) -> u8 {
    (v as f64 * 255.0) as u8
}

#[inline(always)]
fn to_bytes(c: [f32; 4]) -> [u8; 4] {
    c.map(to_byte)
}

impl<'a> ColorRamp<'a> {
    /// `colors` must not be empty.
    pub(crate) fn new(
        colors: &'a [[f32; 4]],
        interpolate: bool,
        extend_start: bool,
        extend_end: bool,
    ) -> ColorRamp<'a> {
        ColorRamp {
            colors,
            interpolate,
            extend_start,
            extend_end,
            start: to_bytes(colors[0]),
            end: to_bytes(colors[colors.len() - 1]),
        }
    }

    pub(crate) fn color_at(&self, ratio: f32) -> [u8; 4] {
        let colors = self.colors;
        let n = colors.len();
        if n == 2 {
            if self.interpolate {
                let (c0, c1) = (colors[0], colors[1]);
                return std::array::from_fn(|i| to_byte(c0[i] + ratio * (c1[i] - c0[i])));
            }
            let index = ((ratio as f64 * 2.0) as usize).min(1);
            return to_bytes(colors[index]);
        }

        let scaled = ratio * n as f32;
        let index = (scaled as i32).clamp(0, n as i32 - 1) as usize;
        if !self.interpolate {
            return to_bytes(colors[index]);
        }
        let remainder = scaled - index as f32;
        let (c0, c1) = (colors[index], colors[(index + 1).min(n - 1)]);
        std::array::from_fn(|i| to_byte(c0[i] + remainder * (c1[i] - c0[i])))
    }

    /// Writes one pixel for `span` and marks `mask` when the pixel was painted.
    #[inline]
    pub(crate) fn shade(&self, px: &mut [u8], mask: Option<&mut u8>, span: Span) {
        let color = match span {
            Span::BeforeStart if self.extend_start => Some(self.start),
            Span::PastEnd if self.extend_end => Some(self.end),
            Span::Inside(ratio) => Some(self.color_at(ratio)),
            _ => None,
        };
        if let Some(color) = color {
            px.copy_from_slice(&color);
        }
        if let Some(mask) = mask {
            *mask = if color.is_some() { 0xFF } else { 0x00 };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: [f32; 4] = [0., 0., 0., 1.];
    const WHITE: [f32; 4] = [1., 1., 1., 1.];

    #[test]
    fn two_colors_interpolate() {
        let colors = [BLACK, WHITE];
        let ramp = ColorRamp::new(&colors, true, false, false);
        assert_eq!(ramp.color_at(0.), [0, 0, 0, 255]);
        assert_eq!(ramp.color_at(0.5), [127, 127, 127, 255]);
        assert_eq!(ramp.color_at(1.), [255, 255, 255, 255]);
    }

    #[test]
    fn two_colors_step() {
        let colors = [BLACK, WHITE];
        let ramp = ColorRamp::new(&colors, false, false, false);
        assert_eq!(ramp.color_at(0.49), [0, 0, 0, 255]);
        assert_eq!(ramp.color_at(0.5), [255, 255, 255, 255]);
        assert_eq!(ramp.color_at(1.), [255, 255, 255, 255]);
    }

    #[test]
    fn table_lookup_clamps_index() {
        let colors = [[0.; 4], [0.5; 4], [1.; 4]];
        let nearest = ColorRamp::new(&colors, false, false, false);
        assert_eq!(nearest.color_at(0.), [0; 4]);
        assert_eq!(nearest.color_at(0.4), [127; 4]);
        assert_eq!(nearest.color_at(1.), [255; 4]);

        let smooth = ColorRamp::new(&colors, true, false, false);
        // 0.5 * 3 = 1.5: halfway between entries one and two.
        assert_eq!(smooth.color_at(0.5), [191; 4]);
        assert_eq!(smooth.color_at(1.), [255; 4]);
    }

    #[test]
    fn extends_mark_mask() {
        let colors = [BLACK, WHITE];
        let ramp = ColorRamp::new(&colors, true, true, false);
        let mut px = [9u8; 4];
        let mut mask = 7u8;
        ramp.shade(&mut px, Some(&mut mask), Span::BeforeStart);
        assert_eq!((px, mask), ([0, 0, 0, 255], 0xFF));

        let mut px = [9u8; 4];
        ramp.shade(&mut px, Some(&mut mask), Span::PastEnd);
        assert_eq!((px, mask), ([9; 4], 0x00));
    }
}
