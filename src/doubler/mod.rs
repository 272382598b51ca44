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

mod engine;
mod filter;

pub use engine::*;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::IpaError;

    fn double(src: &[u8], w: usize, h: usize, factor: usize, quality: DoubleQuality, cn: usize) -> Vec<u8> {
        let mut doubler = Doubler::new(w, h, factor, quality, cn).unwrap();
        let mut dst = vec![0u8; w * h * factor * factor * cn];
        doubler
            .double_image(src, w * cn, &mut dst, w * factor * cn)
            .unwrap();
        assert_eq!(doubler.lines_written(), h * factor);
        dst
    }

    #[test]
    fn nearest_replicates_pixels() {
        let src = [1u8, 2, 3, 4, 5, 6];
        for factor in [2, 4, 8] {
            let dst = double(&src, 2, 1, factor, DoubleQuality::Nearest, 3);
            let row = 2 * factor * 3;
            for line in dst.chunks_exact(row) {
                for (x, px) in line.chunks_exact(3).enumerate() {
                    let expected = if x < factor { &src[..3] } else { &src[3..] };
                    assert_eq!(px, expected, "Factor {factor}, column {x}");
                }
            }
        }
    }

    #[test]
    fn flat_image_stays_flat() {
        for quality in [
            DoubleQuality::Nearest,
            DoubleQuality::Interp,
            DoubleQuality::Mitchell,
        ] {
            for factor in [2, 4] {
                for cn in 1..=4 {
                    let src = vec![173u8; 7 * 5 * cn];
                    let dst = double(&src, 7, 5, factor, quality, cn);
                    assert!(
                        dst.iter().all(|&v| v == 173),
                        "{quality:?} x{factor} with {cn} channels must keep a flat image"
                    );
                }
            }
        }
    }

    #[test]
    fn interp_x2_blends_quarters() {
        let src = [0u8, 100, 200, 40];
        let dst = double(&src, 2, 2, 2, DoubleQuality::Interp, 1);
        assert_eq!(
            dst,
            [
                0, 25, 75, 100, //
                50, 59, 76, 85, //
                150, 126, 79, 55, //
                200, 160, 80, 40,
            ]
        );
    }

    #[test]
    fn mitchell_reproduces_linear_ramps() {
        let (w, h) = (8, 8);
        let across: Vec<u8> = (0..h).flat_map(|_| (0..w).map(|x| (x * 20) as u8)).collect();
        let down: Vec<u8> = (0..h).flat_map(|y| (0..w).map(move |_| (y * 20) as u8)).collect();

        let dst = double(&across, w, h, 2, DoubleQuality::Mitchell, 1);
        for line in dst.chunks_exact(w * 2) {
            for j in 3..=12 {
                assert_eq!(line[j] as usize, 10 * j - 5, "Column {j}");
            }
        }
        let dst = double(&down, w, h, 2, DoubleQuality::Mitchell, 1);
        for (j, line) in dst.chunks_exact(w * 2).enumerate().take(13).skip(3) {
            assert!(line.iter().all(|&v| v as usize == 10 * j - 5), "Line {j} {line:?}");
        }

        let dst = double(&across, w, h, 4, DoubleQuality::Mitchell, 1);
        for line in dst.chunks_exact(w * 4) {
            for j in 6..=25 {
                let expected = 5. * j as f32 - 7.5;
                assert!(
                    (line[j] as f32 - expected).abs() <= 1.,
                    "Column {j} is {}, expected {expected}",
                    line[j]
                );
            }
        }
    }

    #[test]
    fn mitchell_clamps_ringing() {
        let row = [0u8, 0, 0, 0, 255, 255, 255, 255];
        let src: Vec<u8> = row.iter().chain(row.iter()).copied().collect();
        let dst = double(&src, 8, 2, 2, DoubleQuality::Mitchell, 1);
        // Just outside the edge the cubic undershoots below 0 and overshoots past 255.
        assert_eq!(dst[6], 0);
        assert_eq!(dst[9], 255);
        assert_eq!(&dst[..6], &[0; 6]);
        assert_eq!(&dst[10..16], &[255; 6]);
    }

    fn source_line(src: &[u8], row: usize, h: usize, y: isize) -> Option<&[u8]> {
        if y >= 0 && (y as usize) < h {
            Some(&src[y as usize * row..][..row])
        } else {
            None
        }
    }

    #[test]
    fn windows_stream_like_whole_image() {
        let (w, h, cn) = (9, 6, 2);
        let src: Vec<u8> = (0..w * h * cn).map(|i| ((i * 37) % 251) as u8).collect();
        for factor in [2, 4] {
            let expected = double(&src, w, h, factor, DoubleQuality::Mitchell, cn);
            let mut doubler = Doubler::new(w, h, factor, DoubleQuality::Mitchell, cn).unwrap();
            assert_eq!(doubler.lines_in(), 4);
            assert_eq!(doubler.lines_out(), factor);
            let row = w * factor * cn;
            let mut dst = Vec::new();
            let line = |y: isize| source_line(&src, w * cn, h, y);
            for r in -1..h as isize {
                let window = [line(r - 1), line(r), line(r + 1), line(r + 2)];
                let mut storage = vec![vec![0u8; row]; factor];
                let mut lines: Vec<&mut [u8]> =
                    storage.iter_mut().map(|l| l.as_mut_slice()).collect();
                let written = doubler.process(&window, &mut lines).unwrap();
                let full = r >= 0 && r + 1 < h as isize;
                assert_eq!(written, if full { factor } else { factor / 2 }, "Window {r}");
                for l in storage.iter().take(written) {
                    dst.extend_from_slice(l);
                }
            }
            assert!(dst == expected, "Streamed output differs at factor {factor}");

            let empty = [None, None, line(0), None];
            let mut storage = vec![vec![0u8; row]; factor];
            let mut lines: Vec<&mut [u8]> = storage.iter_mut().map(|l| l.as_mut_slice()).collect();
            assert_eq!(doubler.process(&[None, None, None, line(0)], &mut lines), Ok(0));
            assert_eq!(doubler.process(&empty, &mut lines), Ok(factor / 2));
        }
    }

    #[test]
    fn narrow_sources_fall_back() {
        let doubler = Doubler::new(3, 10, 2, DoubleQuality::Mitchell, 1).unwrap();
        assert_eq!(doubler.quality(), DoubleQuality::Interp);
        assert_eq!(doubler.lines_in(), 2);
        let doubler = Doubler::new(1, 10, 4, DoubleQuality::Mitchell, 1).unwrap();
        assert_eq!(doubler.quality(), DoubleQuality::Nearest);
        let doubler = Doubler::new(100, 10, 8, DoubleQuality::Interp, 3).unwrap();
        assert_eq!(doubler.quality(), DoubleQuality::Nearest);
        assert_eq!(doubler.dst_size(), (800, 80));
    }

    #[test]
    fn rejects_invalid_arguments() {
        assert_eq!(
            Doubler::new(4, 4, 3, DoubleQuality::Nearest, 1).unwrap_err(),
            IpaError::InvalidFactor(3)
        );
        assert_eq!(
            Doubler::new(4, 4, 2, DoubleQuality::Nearest, 5).unwrap_err(),
            IpaError::InvalidChannels(5)
        );
        assert_eq!(
            Doubler::new(0, 4, 2, DoubleQuality::Nearest, 1).unwrap_err(),
            IpaError::ZeroBaseSize
        );

        let mut doubler = Doubler::new(4, 4, 2, DoubleQuality::Interp, 1).unwrap();
        let src = [0u8; 4];
        let mut a = [0u8; 8];
        let mut b = [0u8; 8];
        let mut short = [0u8; 7];
        assert_eq!(
            doubler.process(&[Some(&src[..])], &mut [&mut a[..], &mut b[..]]),
            Err(IpaError::InvalidArguments)
        );
        assert!(matches!(
            doubler.process(&[Some(&src[..3]), Some(&src[..])], &mut [&mut a[..], &mut b[..]]),
            Err(IpaError::MinimumSliceSizeMismatch(_))
        ));
        assert!(matches!(
            doubler.process(&[Some(&src[..]), Some(&src[..])], &mut [&mut a[..], &mut short[..]]),
            Err(IpaError::MinimumSliceSizeMismatch(_))
        ));
        assert_eq!(
            doubler.process(&[Some(&src[..]), Some(&src[..])], &mut [&mut a[..]]),
            Err(IpaError::InvalidArguments)
        );
        let mut dst = vec![0u8; 60];
        assert!(doubler.double_image(&src, 4, &mut dst, 8).is_err());
    }

    #[test]
    fn doubler_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<Doubler>();
    }
}
