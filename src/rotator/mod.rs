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

mod shear;
#[cfg(all(any(target_arch = "x86_64", target_arch = "x86"), feature = "sse"))]
pub(crate) mod sse;
pub(crate) mod weights;
pub(crate) mod zoom;

pub use shear::*;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::tests::CountingAllocator;
    use crate::{Context, IpaError};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn render(rotator: &Rotator, src: &[u8], src_w: usize, bands: &[(usize, usize)]) -> Vec<u8> {
        let ch = rotator.channels();
        let (dst_w, dst_h) = rotator.dst_size();
        let mut dst = vec![0u8; dst_w * dst_h * ch];
        for &(y0, y1) in bands {
            let mapping = rotator.map_band(y0, y1);
            assert_eq!(mapping.src_w, src_w);
            let src_stride = src_w * ch;
            let band_src = &src[mapping.src_y0 * src_stride..mapping.src_y1 * src_stride];
            rotator
                .band(
                    band_src,
                    src_stride,
                    mapping.src_y0,
                    mapping.src_y1,
                    &mut dst[y0 * dst_w * ch..y1 * dst_w * ch],
                    dst_w * ch,
                    y0,
                    y1,
                )
                .unwrap();
        }
        dst
    }

    fn gradient_image(w: usize, h: usize, ch: usize) -> Vec<u8> {
        let mut src = vec![0u8; w * h * ch];
        for y in 0..h {
            for x in 0..w {
                for c in 0..ch {
                    src[(y * w + x) * ch + c] = ((x * 7 + y * 5 + c * 40) % 256) as u8;
                }
            }
        }
        src
    }

    #[test]
    fn pre_init_reports_output_size() {
        assert_eq!(
            Rotator::pre_init(100, 50, &RotateParams::new(0.)).unwrap(),
            (100, 50)
        );
        assert_eq!(
            Rotator::pre_init(100, 50, &RotateParams::new(0.).with_post_scale(2., 2.)).unwrap(),
            (200, 100)
        );
        assert_eq!(
            Rotator::pre_init(100, 50, &RotateParams::new(0.).with_pre_scale(0.5, 1.)).unwrap(),
            (50, 50)
        );
        for degrees in [90., -90.] {
            let (w, h) = Rotator::pre_init(100, 50, &RotateParams::new(degrees)).unwrap();
            assert!(w.abs_diff(50) <= 1, "Width {w} at {degrees}");
            assert!(h.abs_diff(100) <= 1, "Height {h} at {degrees}");
        }
        let (w, h) = Rotator::pre_init(64, 64, &RotateParams::new(45.)).unwrap();
        assert!(w.abs_diff(91) <= 1 && h.abs_diff(91) <= 1, "Diagonal {w}x{h}");
    }

    #[test]
    fn flat_image_stays_flat() {
        let ctx = Context::new();
        for degrees in [0., 12.5, -33., 90.] {
            let rotator =
                Rotator::new(&ctx, 24, 18, &RotateParams::new(degrees), &[120, 120, 120], 3)
                    .unwrap();
            let (_, dst_h) = rotator.dst_size();
            let src = vec![120u8; 24 * 18 * 3];
            let dst = render(&rotator, &src, 24, &[(0, dst_h)]);
            assert!(
                dst.iter().all(|&v| v.abs_diff(120) <= 2),
                "Flat image drifted at {degrees} degrees"
            );
        }
    }

    #[test]
    fn background_fills_outside_corners() {
        let ctx = Context::new();
        let rotator = Rotator::new(&ctx, 32, 32, &RotateParams::new(30.), &[0], 1).unwrap();
        let (dst_w, dst_h) = rotator.dst_size();
        let src = vec![200u8; 32 * 32];
        let dst = render(&rotator, &src, 32, &[(0, dst_h)]);
        for (x, y) in [(0, 0), (dst_w - 1, 0), (0, dst_h - 1), (dst_w - 1, dst_h - 1)] {
            assert_eq!(dst[y * dst_w + x], 0, "Corner {x},{y} must hold background");
        }
        let centre = dst[(dst_h / 2) * dst_w + dst_w / 2];
        assert!(centre.abs_diff(200) <= 2, "Centre was {centre}");
    }

    #[test]
    fn bands_match_single_pass() {
        let ctx = Context::new();
        for degrees in [7.5, -20.] {
            let rotator = Rotator::new(
                &ctx,
                40,
                30,
                &RotateParams::new(degrees).with_post_scale(1.5, 1.25),
                &[10, 20],
                2,
            )
            .unwrap();
            let (_, dst_h) = rotator.dst_size();
            let src = gradient_image(40, 30, 2);
            let whole = render(&rotator, &src, 40, &[(0, dst_h)]);
            let third = dst_h / 3;
            let split = render(
                &rotator,
                &src,
                40,
                &[(0, third), (third, 2 * third), (2 * third, dst_h)],
            );
            assert!(whole == split, "Banded output differs at {degrees} degrees");
        }
    }

    #[test]
    fn unrotated_top_rows_match_background() {
        let ctx = Context::new();
        let rotator = Rotator::new(&ctx, 24, 18, &RotateParams::new(0.), &[120], 1).unwrap();
        let (dst_w, dst_h) = rotator.dst_size();
        let src = vec![120u8; 24 * 18];
        let dst = render(&rotator, &src, 24, &[(0, dst_h)]);
        for (i, &v) in dst[..2 * dst_w].iter().enumerate() {
            assert!(v.abs_diff(120) <= 1, "Sample {i} was {v}");
        }
    }

    #[test]
    fn band_split_at_any_row_matches_single_pass() {
        let ctx = Context::new();
        let rotator =
            Rotator::new(&ctx, 40, 30, &RotateParams::new(7.5), &[0, 64, 255], 3).unwrap();
        let (_, dst_h) = rotator.dst_size();
        let src = gradient_image(40, 30, 3);
        let whole = render(&rotator, &src, 40, &[(0, dst_h)]);
        for split in [1, 5, 17, dst_h / 2, dst_h - 1] {
            let banded = render(&rotator, &src, 40, &[(0, split), (split, dst_h)]);
            assert!(whole == banded, "Split at row {split} differs");
        }
        let rows: Vec<(usize, usize)> = (0..dst_h).map(|y| (y, y + 1)).collect();
        assert!(whole == render(&rotator, &src, 40, &rows));
    }

    #[test]
    fn accelerated_path_matches_scalar() {
        let mut ctx = Context::new();
        let params = RotateParams::new(7.5).with_pre_scale(0.75, 1.).with_post_scale(1., 1.5);
        let src = gradient_image(33, 21, 3);
        let accelerated = {
            let rotator = Rotator::new(&ctx, 33, 21, &params, &[255, 0, 128], 3).unwrap();
            let (_, h) = rotator.dst_size();
            render(&rotator, &src, 33, &[(0, h)])
        };
        ctx.force_simd(false);
        let rotator = Rotator::new(&ctx, 33, 21, &params, &[255, 0, 128], 3).unwrap();
        let (_, h) = rotator.dst_size();
        let scalar = render(&rotator, &src, 33, &[(0, h)]);
        assert!(accelerated == scalar);
    }

    #[test]
    fn rejects_invalid_arguments() {
        let ctx = Context::new();
        assert_eq!(
            Rotator::new(&ctx, 8, 8, &RotateParams::new(91.), &[0], 1).err(),
            Some(IpaError::InvalidAngle)
        );
        assert_eq!(
            Rotator::new(&ctx, 8, 8, &RotateParams::new(0.).with_post_scale(0., 1.), &[0], 1)
                .err(),
            Some(IpaError::InvalidScale)
        );
        assert_eq!(
            Rotator::new(&ctx, 0, 8, &RotateParams::new(0.), &[0], 1).err(),
            Some(IpaError::ZeroBaseSize)
        );
        assert_eq!(
            Rotator::new(&ctx, 8, 8, &RotateParams::new(0.), &[0; 5], 5).err(),
            Some(IpaError::InvalidChannels(5))
        );
        assert!(Rotator::new(&ctx, 8, 8, &RotateParams::new(0.), &[0], 2).is_err());

        let rotator = Rotator::new(&ctx, 8, 8, &RotateParams::new(10.), &[0], 1).unwrap();
        let (dst_w, dst_h) = rotator.dst_size();
        let mut dst = vec![0u8; dst_w * dst_h];
        assert_eq!(
            rotator.band(&[0u8; 64], 8, 0, 8, &mut dst, dst_w, 0, dst_h + 1),
            Err(IpaError::BandOutOfRange)
        );
        // Only the first source row is supplied for the whole output.
        assert_eq!(
            rotator.band(&[0u8; 8], 8, 0, 1, &mut dst, dst_w, 0, dst_h),
            Err(IpaError::BandOutOfRange)
        );
    }

    #[test]
    fn band_releases_scratch_on_failure() {
        let live = Arc::new(AtomicUsize::new(0));
        let ctx = Context::with_allocator(CountingAllocator {
            live: live.clone(),
            fail_after: Some(1),
            ..Default::default()
        });
        let rotator = Rotator::new(&ctx, 16, 16, &RotateParams::new(15.), &[0], 1).unwrap();
        let (dst_w, dst_h) = rotator.dst_size();
        let mut dst = vec![0u8; dst_w * dst_h];
        let result = rotator.band(&[0u8; 256], 16, 0, 16, &mut dst, dst_w, 0, dst_h);
        assert!(matches!(result, Err(IpaError::OutOfMemory(_))));
        assert_eq!(live.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn rotator_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<Rotator<'static>>();
    }
}
