// Copyright (c) Radzivon Bartoshyk. All rights reserved.

//
// Redistribution and use in source and binary forms, with or without modification,
// are permitted provided that the following conditions are met:
//
// 1.  Redistributions of source code must retain the above copyright notice, this
// list of conditions and the following disclaimer.
//
// 2.  Redistributions in binary form must reproduce the above copyright notice,
// this list of conditions and the following disclaimer in the documentation
// and/or other materials provided with the distribution.
//
// 3.  Neither the name of the copyright holder nor the names of its
// contributors may be used to endorse or promote products derived from
// this software without specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
// AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
// IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
// DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
// FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
// DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
// SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
// CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
// OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
// OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
#![allow(clippy::too_many_arguments, clippy::manual_range_contains)]
#![cfg_attr(docsrs, feature(doc_cfg))]
//! Raster stages of a print pipeline: screened halftoning, arbitrary angle rotation,
//! axial and radial gradients, transparency group compositing, separable rescaling
//! and integer upscaling.
//!
//! Stateful stages ([Halftone], [Rotator], [Rescaler], [Doubler]) are driven line by
//! line or in bands; gradients and compositing run over a whole rectangle and may split
//! rows across a thread pool sized by [ThreadingPolicy]. Scratch memory of the stateful
//! stages comes from the [IpaAllocator] held by a [Context].

mod bresenham;
mod compose;
mod context;
mod doubler;
#[cfg(feature = "image")]
#[cfg_attr(docsrs, doc(cfg(feature = "image")))]
mod enlarge_image;
mod gradient;
mod halftone;
#[cfg(feature = "image")]
#[cfg_attr(docsrs, doc(cfg(feature = "image")))]
mod halftone_image;
mod rescaler;
#[cfg(feature = "image")]
#[cfg_attr(docsrs, doc(cfg(feature = "image")))]
mod resize_image;
#[cfg(feature = "image")]
#[cfg_attr(docsrs, doc(cfg(feature = "image")))]
mod rotate_image;
mod rotator;
mod safe_math;
mod threading_policy;
mod unsafe_slice;
mod util;

pub use compose::{
    compose_group, compose_isolated_fullmask, compose_isolated_nomask,
    compose_isolated_partialmask, compose_nonisolated_fullmask, compose_nonisolated_nomask,
    compose_nonisolated_partialmask, ComposeMask, ComposeParams, ComposePlanes,
    ComposePlanesMut, ComposeRect, FullMask, PartialMask,
};
pub use context::{cpu_supports_simd, AlignedBlock, Context, GlobalAllocator, IpaAllocator};
pub use doubler::{DoubleQuality, Doubler};
#[cfg(feature = "image")]
#[cfg_attr(docsrs, doc(cfg(feature = "image")))]
pub use enlarge_image::enlarge_image;
pub use gradient::{
    render_axial_gradient, render_radial_gradient, GradientAxis, GradientGeometry,
    GradientMask, GradientPoint, GradientRadius,
};
pub use halftone::{
    ClipRect, Halftone, HalftoneData, Matrix, HT_ALIGN, HT_LANDSCAPE, MAX_PLANES,
};
#[cfg(feature = "image")]
#[cfg_attr(docsrs, doc(cfg(feature = "image")))]
pub use halftone_image::halftone_image;
#[cfg(feature = "image")]
#[cfg_attr(docsrs, doc(cfg(feature = "image")))]
pub use rotate_image::rotate_image;
pub use rescaler::{RescaleQuality, RescaleRect, RescaleStep, Rescaler};
#[cfg(feature = "image")]
#[cfg_attr(docsrs, doc(cfg(feature = "image")))]
pub use resize_image::resize_image;
pub use rotator::{BandMapping, RotateParams, Rotator};
pub use threading_policy::ThreadingPolicy;
pub use util::{IpaError, MismatchedSize};
