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

use crate::IpaError;
use std::alloc::Layout;
use std::fmt::{Debug, Formatter};
use std::ops::{Deref, DerefMut};
use std::ptr::NonNull;

/// Memory provider used by a [Context] for every owned buffer.
///
/// Implementors carry whatever state they need, the way an arena or pool host would.
/// Blocks handed out do not need to be zeroed, the context clears them itself.
pub trait IpaAllocator: Send + Sync {
    /// Returns a block of `size` bytes aligned to `align`, or `None` when exhausted.
    fn allocate(&self, size: usize, align: usize) -> Option<NonNull<u8>>;

    /// Resizes `block` from `old_size` to `new_size` bytes, preserving contents up to
    /// the smaller size.
    ///
    /// # Safety
    /// `block` must come from this allocator with the same `old_size` and `align`.
    unsafe fn reallocate(
        &self,
        block: NonNull<u8>,
        old_size: usize,
        new_size: usize,
        align: usize,
    ) -> Option<NonNull<u8>>;

    /// Releases a block.
    ///
    /// # Safety
    /// `block` must come from this allocator with the same `size` and `align`, and must
    /// not be used afterwards.
    unsafe fn deallocate(&self, block: NonNull<u8>, size: usize, align: usize);
}

/// Allocator backed by the Rust global allocator.
#[derive(Debug, Default, Copy, Clone)]
pub struct GlobalAllocator;

impl IpaAllocator for GlobalAllocator {
    fn allocate(&self, size: usize, align: usize) -> Option<NonNull<u8>> {
        let layout = Layout::from_size_align(size, align).ok()?;
        if layout.size() == 0 {
            return None;
        }
        NonNull::new(unsafe { std::alloc::alloc(layout) })
    }

    unsafe fn reallocate(
        &self,
        block: NonNull<u8>,
        old_size: usize,
        new_size: usize,
        align: usize,
    ) -> Option<NonNull<u8>> {
        let layout = Layout::from_size_align(old_size, align).ok()?;
        if new_size == 0 || Layout::from_size_align(new_size, align).is_err() {
            return None;
        }
        NonNull::new(std::alloc::realloc(block.as_ptr(), layout, new_size))
    }

    unsafe fn deallocate(&self, block: NonNull<u8>, size: usize, align: usize) {
        if let Ok(layout) = Layout::from_size_align(size, align) {
            std::alloc::dealloc(block.as_ptr(), layout);
        }
    }
}

/// Shared state for every engine: the allocator and the accelerated path switch.
///
/// Instances built from a context borrow it, so it always outlives them.
pub struct Context {
    allocator: Box<dyn IpaAllocator>,
    has_simd: bool,
    use_simd: bool,
}

impl Debug for Context {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("has_simd", &self.has_simd)
            .field("use_simd", &self.use_simd)
            .finish()
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// Creates a context using the global allocator.
    pub fn new() -> Context {
        Self::with_allocator(GlobalAllocator)
    }

    /// Creates a context routing every allocation through `allocator`.
    pub fn with_allocator<A: IpaAllocator + 'static>(allocator: A) -> Context {
        let has_simd = cpu_supports_simd();
        log::debug!("Context created, accelerated path available: {has_simd}");
        Context {
            allocator: Box::new(allocator),
            has_simd,
            use_simd: has_simd,
        }
    }

    /// Whether the CPU provides the accelerated path.
    pub fn has_simd(&self) -> bool {
        self.has_simd
    }

    /// Whether instances created from now on use the accelerated path.
    pub fn use_simd(&self) -> bool {
        self.use_simd
    }

    /// Enables or disables the accelerated path. It can't be enabled on a CPU without
    /// support; returns the resulting state.
    pub fn force_simd(&mut self, on: bool) -> bool {
        self.use_simd = self.has_simd && on;
        self.use_simd
    }

    /// Allocates a zeroed block of `size` bytes aligned to at least `align`.
    pub fn alloc_aligned(&self, size: usize, align: usize) -> Result<AlignedBlock<'_>, IpaError> {
        let align = align.max(size_of::<usize>());
        if !align.is_power_of_two() {
            return Err(IpaError::InvalidArguments);
        }
        if size == 0 {
            return Ok(AlignedBlock::empty(self.allocator.as_ref(), align));
        }
        let ptr = self
            .allocator
            .allocate(size, align)
            .ok_or(IpaError::OutOfMemory(size))?;
        unsafe {
            std::ptr::write_bytes(ptr.as_ptr(), 0, size);
        }
        Ok(AlignedBlock {
            allocator: self.allocator.as_ref(),
            ptr,
            size,
            align,
        })
    }

    /// Resizes `block`, keeping its contents up to the smaller size. Growth is zeroed.
    /// Resizing to zero releases the block and returns an empty one.
    pub fn realloc_aligned<'a>(
        &'a self,
        mut block: AlignedBlock<'a>,
        new_size: usize,
    ) -> Result<AlignedBlock<'a>, IpaError> {
        if block.size == 0 {
            return self.alloc_aligned(new_size, block.align);
        }
        if new_size == 0 {
            return Ok(AlignedBlock::empty(block.allocator, block.align));
        }
        let ptr = unsafe {
            block
                .allocator
                .reallocate(block.ptr, block.size, new_size, block.align)
        }
        .ok_or(IpaError::OutOfMemory(new_size))?;
        if new_size > block.size {
            unsafe {
                std::ptr::write_bytes(ptr.as_ptr().add(block.size), 0, new_size - block.size);
            }
        }
        block.ptr = ptr;
        block.size = new_size;
        Ok(block)
    }
}

/// Reports whether the running CPU has the instructions the accelerated kernels need.
pub fn cpu_supports_simd() -> bool {
    #[cfg(all(any(target_arch = "x86_64", target_arch = "x86"), feature = "sse"))]
    {
        std::arch::is_x86_feature_detected!("sse4.1")
    }
    #[cfg(all(target_arch = "aarch64", feature = "neon"))]
    {
        true
    }
    #[cfg(not(any(
        all(any(target_arch = "x86_64", target_arch = "x86"), feature = "sse"),
        all(target_arch = "aarch64", feature = "neon")
    )))]
    {
        false
    }
}

/// An owned, aligned, zero-initialised byte block obtained from a [Context].
///
/// The block goes back to the allocator that produced it when dropped.
pub struct AlignedBlock<'a> {
    allocator: &'a dyn IpaAllocator,
    ptr: NonNull<u8>,
    size: usize,
    align: usize,
}

unsafe impl Send for AlignedBlock<'_> {}
unsafe impl Sync for AlignedBlock<'_> {}

impl<'a> AlignedBlock<'a> {
    fn empty(allocator: &'a dyn IpaAllocator, align: usize) -> AlignedBlock<'a> {
        AlignedBlock {
            allocator,
            ptr: NonNull::dangling(),
            size: 0,
            align,
        }
    }

    /// Logical size of the block in bytes.
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn align(&self) -> usize {
        self.align
    }
}

impl Deref for AlignedBlock<'_> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        if self.size == 0 {
            return &[];
        }
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.size) }
    }
}

impl DerefMut for AlignedBlock<'_> {
    fn deref_mut(&mut self) -> &mut [u8] {
        if self.size == 0 {
            return &mut [];
        }
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.size) }
    }
}

impl Debug for AlignedBlock<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlignedBlock")
            .field("size", &self.size)
            .field("align", &self.align)
            .finish()
    }
}

impl Drop for AlignedBlock<'_> {
    fn drop(&mut self) {
        if self.size != 0 {
            unsafe {
                self.allocator.deallocate(self.ptr, self.size, self.align);
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Counts live blocks and can be told to refuse requests.
    #[derive(Default)]
    pub(crate) struct CountingAllocator {
        pub(crate) live: Arc<AtomicUsize>,
        pub(crate) fail_after: Option<usize>,
        pub(crate) served: AtomicUsize,
    }

    impl IpaAllocator for CountingAllocator {
        fn allocate(&self, size: usize, align: usize) -> Option<NonNull<u8>> {
            let served = self.served.fetch_add(1, Ordering::SeqCst);
            if let Some(limit) = self.fail_after {
                if served >= limit {
                    return None;
                }
            }
            let ptr = GlobalAllocator.allocate(size, align)?;
            self.live.fetch_add(1, Ordering::SeqCst);
            Some(ptr)
        }

        unsafe fn reallocate(
            &self,
            block: NonNull<u8>,
            old_size: usize,
            new_size: usize,
            align: usize,
        ) -> Option<NonNull<u8>> {
            GlobalAllocator.reallocate(block, old_size, new_size, align)
        }

        unsafe fn deallocate(&self, block: NonNull<u8>, size: usize, align: usize) {
            self.live.fetch_sub(1, Ordering::SeqCst);
            GlobalAllocator.deallocate(block, size, align);
        }
    }

    #[test]
    fn aligned_block_is_zeroed_and_aligned() {
        let ctx = Context::new();
        let block = ctx.alloc_aligned(100, 32).unwrap();
        assert_eq!(block.len(), 100);
        assert_eq!(block.as_ptr() as usize % 32, 0);
        assert!(block.iter().all(|&x| x == 0), "Block must be zero initialised");
    }

    #[test]
    fn zero_size_is_empty() {
        let ctx = Context::new();
        let block = ctx.alloc_aligned(0, 16).unwrap();
        assert!(block.is_empty());
        assert_eq!(&block[..], &[] as &[u8]);
    }

    #[test]
    fn alignment_is_raised_and_validated() {
        let ctx = Context::new();
        let block = ctx.alloc_aligned(8, 1).unwrap();
        assert_eq!(block.align(), size_of::<usize>());
        assert_eq!(
            ctx.alloc_aligned(8, 24).err(),
            Some(IpaError::InvalidArguments)
        );
    }

    #[test]
    fn realloc_preserves_contents() {
        let ctx = Context::new();
        let mut block = ctx.alloc_aligned(4, 16).unwrap();
        block.copy_from_slice(&[1, 2, 3, 4]);
        let block = ctx.realloc_aligned(block, 8).unwrap();
        assert_eq!(&block[..], &[1, 2, 3, 4, 0, 0, 0, 0]);
        let block = ctx.realloc_aligned(block, 2).unwrap();
        assert_eq!(&block[..], &[1, 2]);
        let block = ctx.realloc_aligned(block, 0).unwrap();
        assert!(block.is_empty());
        let block = ctx.realloc_aligned(block, 3).unwrap();
        assert_eq!(&block[..], &[0, 0, 0]);
    }

    #[test]
    fn blocks_return_to_their_allocator() {
        let live = Arc::new(AtomicUsize::new(0));
        let ctx = Context::with_allocator(CountingAllocator {
            live: live.clone(),
            ..Default::default()
        });
        {
            let _a = ctx.alloc_aligned(64, 32).unwrap();
            let _b = ctx.alloc_aligned(16, 8).unwrap();
            assert_eq!(live.load(Ordering::SeqCst), 2);
        }
        assert_eq!(live.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn exhausted_allocator_reports_out_of_memory() {
        let ctx = Context::with_allocator(CountingAllocator {
            fail_after: Some(0),
            ..Default::default()
        });
        assert_eq!(
            ctx.alloc_aligned(10, 16).err(),
            Some(IpaError::OutOfMemory(10))
        );
    }

    #[test]
    fn force_simd_respects_detection() {
        let mut ctx = Context::new();
        assert!(!ctx.force_simd(false));
        assert!(!ctx.use_simd());
        assert_eq!(ctx.force_simd(true), ctx.has_simd());
        assert_eq!(ctx.has_simd(), cpu_supports_simd());
    }
}
