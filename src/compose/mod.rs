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

mod blend;
mod group;
#[cfg(all(target_arch = "aarch64", feature = "neon"))]
mod neon;
#[cfg(all(any(target_arch = "x86_64", target_arch = "x86"), feature = "sse"))]
mod sse;

pub use group::*;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Context, IpaError, ThreadingPolicy};
    use std::num::NonZeroUsize;

    /// Planar group of `n_chan + 1` planes, `w`×`h` each, rows `w` apart.
    fn planes(w: usize, h: usize, n_chan: usize, fill: impl Fn(usize, usize, usize) -> u8) -> Vec<u8> {
        let mut data = vec![0u8; w * h * (n_chan + 1)];
        for p in 0..=n_chan {
            for y in 0..h {
                for x in 0..w {
                    data[p * w * h + y * w + x] = fill(p, x, y);
                }
            }
        }
        data
    }

    fn view(data: &[u8], w: usize, h: usize) -> ComposePlanes<'_> {
        ComposePlanes {
            data,
            row_stride: w,
            plane_stride: w * h,
        }
    }

    fn view_mut(data: &mut [u8], w: usize, h: usize) -> ComposePlanesMut<'_> {
        ComposePlanesMut {
            data,
            row_stride: w,
            plane_stride: w * h,
        }
    }

    fn noise(p: usize, x: usize, y: usize) -> u8 {
        ((p * 71 + x * 13 + y * 29 + (x * y) % 7 * 31) % 256) as u8
    }

    #[test]
    fn transparent_top_leaves_backdrop() {
        let ctx = Context::new();
        let (w, h) = (9, 5);
        let top = planes(w, h, 3, |p, x, y| if p == 3 { 0 } else { noise(p, x, y) });
        let mut backdrop = planes(w, h, 3, |p, x, y| noise(p + 1, y, x));
        let expected = backdrop.clone();
        compose_isolated_nomask(
            &ctx,
            view(&top, w, h),
            view_mut(&mut backdrop, w, h),
            3,
            ComposeRect::new(10, 20, 10 + w as i32, 20 + h as i32),
            255,
            ThreadingPolicy::Single,
        )
        .unwrap();
        assert_eq!(backdrop, expected);
    }

    #[test]
    fn zero_group_alpha_keeps_empty_backdrop() {
        let mut ctx = Context::new();
        let (w, h) = (6, 2);
        let top = planes(w, h, 2, |p, x, y| if p == 2 { 255 } else { noise(p, x, y) });
        let original = planes(w, h, 2, |p, x, y| if p == 2 { 0 } else { noise(p + 5, x, y) });
        for simd in [true, false] {
            ctx.force_simd(simd);
            let mut backdrop = original.clone();
            compose_isolated_nomask(
                &ctx,
                view(&top, w, h),
                view_mut(&mut backdrop, w, h),
                2,
                ComposeRect::new(0, 0, w as i32, h as i32),
                0,
                ThreadingPolicy::Single,
            )
            .unwrap();
            assert_eq!(backdrop, original, "Backdrop changed, simd {simd}");
        }
    }

    #[test]
    fn empty_backdrop_copies_opaque_source() {
        let ctx = Context::new();
        let (w, h) = (7, 3);
        let top = planes(w, h, 2, |p, x, y| if p == 2 { 255 } else { noise(p, x, y) });
        let mut backdrop = planes(w, h, 2, |p, x, y| if p == 2 { 0 } else { noise(p, y, x) });
        compose_nonisolated_nomask(
            &ctx,
            view(&top, w, h),
            view_mut(&mut backdrop, w, h),
            2,
            ComposeRect::new(0, 0, w as i32, h as i32),
            255,
            ThreadingPolicy::Single,
        )
        .unwrap();
        assert_eq!(backdrop, top);
    }

    #[test]
    fn partial_mask_uses_background_outside_bounds() {
        let ctx = Context::new();
        let (w, h) = (4, 2);
        let top = planes(w, h, 1, |p, _, _| if p == 1 { 255 } else { 200 });
        let mut backdrop = planes(w, h, 1, |p, _, _| if p == 1 { 255 } else { 0 });
        let mask = vec![255u8; w * h];
        compose_isolated_partialmask(
            &ctx,
            view(&top, w, h),
            view_mut(&mut backdrop, w, h),
            1,
            ComposeRect::new(100, 50, 104, 52),
            PartialMask {
                data: &mask,
                row_stride: w,
                bounds: ComposeRect::new(102, 50, 110, 60),
                bg_alpha: 0,
                transfer: None,
            },
            255,
            ThreadingPolicy::Single,
        )
        .unwrap();
        // Columns 100 and 101 fall outside the mask and read a zero background.
        assert_eq!(&backdrop[..w], &[0, 0, 200, 200]);
        assert_eq!(&backdrop[w..2 * w], &[0, 0, 200, 200]);
    }

    #[test]
    fn transfer_table_maps_mask() {
        let ctx = Context::new();
        let (w, h) = (3, 1);
        let top = planes(w, h, 1, |p, _, _| if p == 1 { 255 } else { 250 });
        let mut backdrop = planes(w, h, 1, |p, _, _| if p == 1 { 255 } else { 0 });
        let mask = vec![0u8, 128, 255];
        let inverse: Vec<u8> = (0..=255u8).rev().collect();
        compose_nonisolated_fullmask(
            &ctx,
            view(&top, w, h),
            view_mut(&mut backdrop, w, h),
            1,
            ComposeRect::new(0, 0, 3, 1),
            FullMask {
                data: &mask,
                row_stride: w,
                transfer: Some(&inverse),
            },
            255,
            ThreadingPolicy::Single,
        )
        .unwrap();
        assert_eq!(backdrop[0], 250);
        assert!(backdrop[1].abs_diff(125) <= 1, "{backdrop:?}");
        assert_eq!(backdrop[2], 0);
    }

    #[test]
    fn identity_transfer_matches_no_transfer() {
        let ctx = Context::new();
        let (w, h) = (6, 4);
        let top = planes(w, h, 2, noise);
        let mask = planes(w, h, 0, |_, x, y| (x * 40 + y * 3) as u8);
        let identity: Vec<u8> = (0..=255u8).collect();
        let run = |transfer: Option<&[u8]>| {
            let mut backdrop = planes(w, h, 2, |p, x, y| noise(p + 2, x + 1, y));
            compose_isolated_fullmask(
                &ctx,
                view(&top, w, h),
                view_mut(&mut backdrop, w, h),
                2,
                ComposeRect::new(0, 0, w as i32, h as i32),
                FullMask {
                    data: &mask,
                    row_stride: w,
                    transfer,
                },
                200,
                ThreadingPolicy::Single,
            )
            .unwrap();
            backdrop
        };
        assert_eq!(run(None), run(Some(&identity)));
    }

    #[test]
    fn accelerated_and_threaded_match_scalar() {
        let mut ctx = Context::new();
        let (w, h) = (37, 23);
        let n_chan = 4;
        let top = planes(w, h, n_chan, |p, x, y| {
            if p == n_chan && (x + y) % 5 == 0 {
                0
            } else {
                noise(p, x, y)
            }
        });
        let mask = planes(w, h, 0, |_, x, y| noise(9, y, x));
        let transfer: Vec<u8> = (0..=255u32).map(|v| (v * v / 255) as u8).collect();
        let original = planes(w, h, n_chan, |p, x, y| {
            if p == n_chan && (x * 3 + y) % 4 == 0 {
                0
            } else {
                noise(p + 3, y, x)
            }
        });
        let run = |ctx: &Context, policy: ThreadingPolicy, masked: bool| {
            let mut backdrop = original.clone();
            let mask = if masked {
                ComposeMask::Partial(PartialMask {
                    data: &mask,
                    row_stride: w,
                    bounds: ComposeRect::new(5, 3, 30, 20),
                    bg_alpha: 77,
                    transfer: Some(&transfer),
                })
            } else {
                ComposeMask::None
            };
            compose_group(
                ctx,
                ComposeParams {
                    top: view(&top, w, h),
                    backdrop: view_mut(&mut backdrop, w, h),
                    isolated: false,
                    n_chan,
                    rect: ComposeRect::new(0, 0, w as i32, h as i32),
                    mask,
                    alpha: 190,
                },
                policy,
            )
            .unwrap();
            backdrop
        };
        let threads = ThreadingPolicy::Fixed(NonZeroUsize::new(4).unwrap());
        for masked in [false, true] {
            let accelerated = run(&ctx, ThreadingPolicy::Single, masked);
            let threaded = run(&ctx, threads, masked);
            ctx.force_simd(false);
            let scalar = run(&ctx, ThreadingPolicy::Single, masked);
            ctx.force_simd(true);
            assert!(accelerated == scalar, "Accelerated output differs, mask {masked}");
            assert!(threaded == scalar, "Threaded output differs, mask {masked}");
            assert!(scalar != original);
        }
    }

    #[test]
    fn rejects_invalid_layouts() {
        let ctx = Context::new();
        let top = vec![0u8; 16];
        let mut backdrop = vec![0u8; 16];
        let rect = ComposeRect::new(0, 0, 2, 2);
        assert_eq!(
            compose_isolated_nomask(
                &ctx,
                view(&top, 2, 2),
                view_mut(&mut backdrop, 2, 2),
                5,
                rect,
                255,
                ThreadingPolicy::Single,
            ),
            Err(IpaError::InvalidChannels(5))
        );
        assert!(compose_isolated_nomask(
            &ctx,
            view(&top, 2, 2),
            view_mut(&mut backdrop, 2, 2),
            4,
            rect,
            255,
            ThreadingPolicy::Single,
        )
        .is_err());
        assert_eq!(
            compose_isolated_nomask(
                &ctx,
                view(&top, 2, 2),
                view_mut(&mut backdrop, 2, 2),
                1,
                ComposeRect::new(2, 0, 0, 2),
                255,
                ThreadingPolicy::Single,
            ),
            Err(IpaError::NegativeDimensions)
        );
        let short = [0u8; 10];
        assert!(compose_isolated_fullmask(
            &ctx,
            view(&top, 2, 2),
            view_mut(&mut backdrop, 2, 2),
            1,
            rect,
            FullMask {
                data: &[0u8; 4],
                row_stride: 2,
                transfer: Some(&short),
            },
            255,
            ThreadingPolicy::Single,
        )
        .is_err());
    }
}
