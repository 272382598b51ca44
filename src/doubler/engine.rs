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

use crate::doubler::filter::{
    columns, combine_vertical, filter_horizontal, replicate_row, Column, Kernel,
};
use crate::util::{check_slice_size, MismatchedSize};
use crate::IpaError;
use log::{debug, warn};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum DoubleQuality {
    /// Pixel replication.
    Nearest,
    /// Bilinear, two source lines per step.
    Interp,
    /// Mitchell-Netravali cubic, four source lines per step.
    Mitchell,
}

/// Enlarges an interleaved 8 bit image by 2, 4 or 8 in both directions, one window of
/// source lines at a time.
///
/// The window is [Doubler::lines_in] lines long. Lines above or below the image are
/// passed as `None`: the caller slides the window from one line before the image to the
/// last line, and every call writes up to [Doubler::lines_out] output lines.
#[derive(Debug)]
pub struct Doubler {
    src_w: usize,
    src_h: usize,
    channels: usize,
    factor: usize,
    quality: DoubleQuality,
    kernel: Option<Kernel>,
    columns: Vec<Column>,
    combined: Vec<i32>,
    in_y: usize,
    out_y: usize,
}

impl Doubler {
    pub fn new(
        src_w: usize,
        src_h: usize,
        factor: usize,
        quality: DoubleQuality,
        channels: usize,
    ) -> Result<Doubler, IpaError> {
        if factor != 2 && factor != 4 && factor != 8 {
            return Err(IpaError::InvalidFactor(factor));
        }
        if channels == 0 || channels > 4 {
            return Err(IpaError::InvalidChannels(channels));
        }
        if src_w == 0 || src_h == 0 {
            return Err(IpaError::ZeroBaseSize);
        }
        src_w
            .checked_mul(factor * channels)
            .ok_or(IpaError::ExceedingPointerSize)?;

        let mut effective = quality;
        if effective == DoubleQuality::Mitchell && src_w < 4 {
            effective = DoubleQuality::Interp;
        }
        if effective == DoubleQuality::Interp && src_w < 2 {
            effective = DoubleQuality::Nearest;
        }
        if factor == 8 {
            effective = DoubleQuality::Nearest;
        }
        if effective != quality {
            warn!(
                "Doubler {:?} unavailable for {}x{} at factor {}, using {:?}",
                quality, src_w, src_h, factor, effective
            );
        }

        let kernel = match effective {
            DoubleQuality::Nearest => None,
            DoubleQuality::Interp => Some(Kernel::interp(factor)),
            DoubleQuality::Mitchell => Some(Kernel::mitchell(factor)),
        };
        let (columns, combined) = match &kernel {
            Some(kernel) => (
                columns(kernel, src_w, factor),
                vec![0i32; src_w * channels],
            ),
            None => (Vec::new(), Vec::new()),
        };
        debug!(
            "Doubler {}x{}x{} by {} with {:?}",
            src_w, src_h, channels, factor, effective
        );
        Ok(Doubler {
            src_w,
            src_h,
            channels,
            factor,
            quality: effective,
            kernel,
            columns,
            combined,
            in_y: 0,
            out_y: 0,
        })
    }

    /// Quality in effect after narrow sources and factor 8 fell back.
    pub fn quality(&self) -> DoubleQuality {
        self.quality
    }

    pub fn lines_in(&self) -> usize {
        match self.quality {
            DoubleQuality::Nearest => 1,
            DoubleQuality::Interp => 2,
            DoubleQuality::Mitchell => 4,
        }
    }

    pub fn lines_out(&self) -> usize {
        self.factor
    }

    pub fn dst_size(&self) -> (usize, usize) {
        (self.src_w * self.factor, self.src_h * self.factor)
    }

    /// Output lines written since creation or the last [Doubler::reset].
    pub fn lines_written(&self) -> usize {
        self.out_y
    }

    pub fn reset(&mut self) {
        self.in_y = 0;
        self.out_y = 0;
    }

    /// Writes the output lines that fall between the window lines and returns their
    /// count.
    ///
    /// For interpolating qualities the centre of the window is `input[0]` (Interp) or
    /// `input[1]` (Mitchell); a window whose centre is above the image writes the top
    /// half of a step, one whose next line is below writes the bottom half. Missing
    /// taps repeat the nearest present line.
    pub fn process(
        &mut self,
        input: &[Option<&[u8]>],
        output: &mut [&mut [u8]],
    ) -> Result<usize, IpaError> {
        if input.len() != self.lines_in() {
            return Err(IpaError::InvalidArguments);
        }
        let src_row = self.src_w * self.channels;
        for line in input.iter().flatten() {
            if line.len() < src_row {
                return Err(IpaError::MinimumSliceSizeMismatch(MismatchedSize {
                    expected: src_row,
                    received: line.len(),
                }));
            }
        }

        let written = match self.kernel {
            None => self.process_nearest(input, output)?,
            Some(kernel) => self.process_filtered(kernel, input, output)?,
        };
        self.in_y += 1;
        self.out_y += written;
        Ok(written)
    }

    fn check_output(&self, output: &[&mut [u8]], lines: usize) -> Result<(), IpaError> {
        if output.len() < lines {
            return Err(IpaError::InvalidArguments);
        }
        let dst_row = self.src_w * self.factor * self.channels;
        for line in output.iter().take(lines) {
            if line.len() < dst_row {
                return Err(IpaError::MinimumSliceSizeMismatch(MismatchedSize {
                    expected: dst_row,
                    received: line.len(),
                }));
            }
        }
        Ok(())
    }

    fn process_nearest(
        &self,
        input: &[Option<&[u8]>],
        output: &mut [&mut [u8]],
    ) -> Result<usize, IpaError> {
        let Some(src) = input[0] else {
            return Ok(0);
        };
        self.check_output(output, self.factor)?;
        let src = &src[..self.src_w * self.channels];
        let dst_row = self.src_w * self.factor * self.channels;
        let (first, rest) = output.split_at_mut(1);
        let first = &mut first[0][..dst_row];
        replicate_row(first, src, self.factor, self.channels);
        for line in rest.iter_mut().take(self.factor - 1) {
            line[..dst_row].copy_from_slice(first);
        }
        Ok(self.factor)
    }

    fn process_filtered(
        &mut self,
        kernel: Kernel,
        input: &[Option<&[u8]>],
        output: &mut [&mut [u8]],
    ) -> Result<usize, IpaError> {
        let centre = kernel.lead;
        let Some(first) = input.iter().position(|l| l.is_some()) else {
            return Ok(0);
        };
        let last = input.iter().rposition(|l| l.is_some()).unwrap_or(first);
        if input[first..=last].iter().any(|l| l.is_none()) {
            return Err(IpaError::InvalidArguments);
        }
        let has_centre = input[centre].is_some();
        let has_next = input[centre + 1].is_some();
        if !has_centre && !has_next {
            return Ok(0);
        }
        let half = self.factor / 2;
        let lo = if has_centre { 0 } else { half };
        let hi = if has_next { self.factor } else { half };
        self.check_output(output, hi - lo)?;

        let src_row = self.src_w * self.channels;
        let mut rows: [&[u8]; 4] = [&[]; 4];
        for (t, row) in rows.iter_mut().take(kernel.taps).enumerate() {
            let k = t.clamp(first, last);
            if let Some(line) = input[k] {
                *row = &line[..src_row];
            }
        }

        let dst_row = self.src_w * self.factor * self.channels;
        for (phase, dst) in (lo..hi).zip(output.iter_mut()) {
            combine_vertical(
                &mut self.combined,
                &rows[..kernel.taps],
                &kernel.phases[phase],
            );
            filter_horizontal(
                &mut dst[..dst_row],
                &self.combined,
                &self.columns,
                &kernel,
                self.channels,
            );
        }
        Ok(hi - lo)
    }

    /// Enlarges a whole image, driving [Doubler::process] over every window.
    pub fn double_image(
        &mut self,
        src: &[u8],
        src_stride: usize,
        dst: &mut [u8],
        dst_stride: usize,
    ) -> Result<(), IpaError> {
        check_slice_size(src, src_stride, self.src_w, self.src_h, self.channels)?;
        let (dst_w, dst_h) = self.dst_size();
        check_slice_size(dst, dst_stride, dst_w, dst_h, self.channels)?;

        let lines_in = self.lines_in();
        let (lead, windows) = match self.quality {
            DoubleQuality::Nearest => (0isize, self.src_h),
            DoubleQuality::Interp => (1, self.src_h + 1),
            DoubleQuality::Mitchell => (2, self.src_h + 1),
        };
        let src_h = self.src_h as isize;
        let mut window: Vec<Option<&[u8]>> = vec![None; lines_in];
        let mut out_y = 0usize;
        for step in 0..windows {
            for (k, line) in window.iter_mut().enumerate() {
                let y = step as isize - lead + k as isize;
                *line = if y >= 0 && y < src_h {
                    Some(&src[y as usize * src_stride..])
                } else {
                    None
                };
            }
            let mut lines: Vec<&mut [u8]> = dst[out_y * dst_stride..]
                .chunks_mut(dst_stride)
                .take(self.factor)
                .collect();
            out_y += self.process(&window, &mut lines)?;
        }
        debug_assert_eq!(out_y, dst_h);
        Ok(())
    }
}
