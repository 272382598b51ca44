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

use crate::safe_math::{SafeAdd, SafeMul};
use std::error::Error;

#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq)]
/// Shows size mismatching
pub struct MismatchedSize {
    pub expected: usize,
    pub received: usize,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum IpaError {
    /// Allocator refused a block of the given size.
    OutOfMemory(usize),
    ZeroBaseSize,
    NegativeDimensions,
    UnsupportedMatrix,
    InvalidPlaneCount(usize),
    InvalidChannels(usize),
    ScreensExhausted,
    ScreensIncomplete,
    InvalidScreen,
    MinimumSliceSizeMismatch(MismatchedSize),
    MinimumStrideSizeMismatch(MismatchedSize),
    InvalidAngle,
    InvalidScale,
    InvalidFactor(usize),
    BandOutOfRange,
    ExceedingPointerSize,
    InvalidArguments,
}

impl Error for IpaError {}

impl std::fmt::Display for IpaError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            IpaError::OutOfMemory(size) => {
                f.write_fmt(format_args!("Allocator failed to provide {size} bytes"))
            }
            IpaError::ZeroBaseSize => f.write_str("Image size must not be zero"),
            IpaError::NegativeDimensions => {
                f.write_str("Source and clip dimensions must not be negative")
            }
            IpaError::UnsupportedMatrix => {
                f.write_str("Only axis aligned portrait or landscape matrices are supported")
            }
            IpaError::InvalidPlaneCount(n) => {
                f.write_fmt(format_args!("Plane count must be in 1..=4, but it is {n}"))
            }
            IpaError::InvalidChannels(n) => {
                f.write_fmt(format_args!("Channel count must be in 1..=4, but it is {n}"))
            }
            IpaError::ScreensExhausted => {
                f.write_str("Every plane already has a screen assigned")
            }
            IpaError::ScreensIncomplete => {
                f.write_str("A screen must be added for every plane before processing")
            }
            IpaError::InvalidScreen => f.write_str("Screen tile is empty or its data is too short"),
            IpaError::MinimumSliceSizeMismatch(size) => f.write_fmt(format_args!(
                "Minimum image slice size mismatch: expected={}, received={}",
                size.expected, size.received
            )),
            IpaError::MinimumStrideSizeMismatch(size) => f.write_fmt(format_args!(
                "Minimum stride must have size at least {} but it is {}",
                size.expected, size.received
            )),
            IpaError::InvalidAngle => f.write_str("Rotation angle must be within -90..=90 degrees"),
            IpaError::InvalidScale => f.write_str("Scale factors must be positive and finite"),
            IpaError::InvalidFactor(n) => {
                f.write_fmt(format_args!("Doubling factor must be 2, 4 or 8, but it is {n}"))
            }
            IpaError::BandOutOfRange => {
                f.write_str("Band requires source rows outside of the supplied range")
            }
            IpaError::ExceedingPointerSize => {
                f.write_str("Image bounds exceed pointer capacity")
            }
            IpaError::InvalidArguments => f.write_str("Invalid arguments"),
        }
    }
}

/// Checks that a row-major buffer of `height` rows, each `width * cn` bytes wide,
/// fits into `arr` when rows are `stride` apart.
pub(crate) fn check_slice_size<T>(
    arr: &[T],
    stride: usize,
    width: usize,
    height: usize,
    cn: usize,
) -> Result<(), IpaError> {
    if width == 0 || height == 0 {
        return Err(IpaError::ZeroBaseSize);
    }
    let row = width.safe_mul(cn)?;
    if stride < row {
        return Err(IpaError::MinimumStrideSizeMismatch(MismatchedSize {
            expected: row,
            received: stride,
        }));
    }
    let required = stride.safe_mul(height - 1)?.safe_add(row)?;
    if arr.len() < required {
        return Err(IpaError::MinimumSliceSizeMismatch(MismatchedSize {
            expected: required,
            received: arr.len(),
        }));
    }
    Ok(())
}

/// Same as [check_slice_size] for planar storage: `planes` planes placed
/// `plane_stride` apart, each holding `height` rows.
pub(crate) fn check_planar_size<T>(
    arr: &[T],
    stride: usize,
    plane_stride: usize,
    width: usize,
    height: usize,
    planes: usize,
) -> Result<(), IpaError> {
    if width == 0 || height == 0 || planes == 0 {
        return Err(IpaError::ZeroBaseSize);
    }
    if stride < width {
        return Err(IpaError::MinimumStrideSizeMismatch(MismatchedSize {
            expected: width,
            received: stride,
        }));
    }
    let plane_extent = stride.safe_mul(height - 1)?.safe_add(width)?;
    if planes > 1 && plane_stride < plane_extent {
        return Err(IpaError::MinimumStrideSizeMismatch(MismatchedSize {
            expected: plane_extent,
            received: plane_stride,
        }));
    }
    let required = plane_stride.safe_mul(planes - 1)?.safe_add(plane_extent)?;
    if arr.len() < required {
        return Err(IpaError::MinimumSliceSizeMismatch(MismatchedSize {
            expected: required,
            received: arr.len(),
        }));
    }
    Ok(())
}
