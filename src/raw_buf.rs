use core::{alloc::Layout, mem, ptr::NonNull};

use crate::{
    ErrorBehavior,
    alloc::{Allocator, VecAllocator},
    polyfill::SizedTypeProperties,
};

/// Owns the raw slot buffer of a vector: pointer, slot capacity and the
/// allocator the buffer came from.
///
/// A `RawBuf` knows nothing about which slots are live; the containers drop
/// their live prefix themselves and dropping a `RawBuf` only releases the
/// memory. Zero-sized element types never allocate and report a capacity of
/// `usize::MAX`.
pub(crate) struct RawBuf<T, A: Allocator> {
    ptr: NonNull<T>,
    cap: usize,
    alloc: A,
}

unsafe impl<T: Send, A: Allocator + Send> Send for RawBuf<T, A> {}
unsafe impl<T: Sync, A: Allocator + Sync> Sync for RawBuf<T, A> {}

impl<T, A: Allocator> RawBuf<T, A> {
    #[inline]
    pub(crate) const fn new_in(alloc: A) -> Self {
        Self {
            ptr: NonNull::dangling(),
            cap: 0,
            alloc,
        }
    }

    #[inline]
    pub(crate) fn with_capacity_in<E: ErrorBehavior>(capacity: usize, alloc: A) -> Result<Self, E>
    where
        A: VecAllocator,
    {
        let mut buf = Self::new_in(alloc);

        if !T::IS_ZST && capacity != 0 {
            buf.grow_to(capacity)?;
        }

        Ok(buf)
    }

    #[inline(always)]
    pub(crate) fn ptr(&self) -> NonNull<T> {
        self.ptr
    }

    #[inline(always)]
    pub(crate) fn capacity(&self) -> usize {
        if T::IS_ZST { usize::MAX } else { self.cap }
    }

    #[inline(always)]
    pub(crate) fn allocator(&self) -> &A {
        &self.alloc
    }

    /// The layout of the current allocation, or `None` when nothing is
    /// allocated.
    #[inline]
    fn current_layout(&self) -> Option<Layout> {
        if T::IS_ZST || self.cap == 0 {
            None
        } else {
            // the layout was validated when the buffer was allocated
            Some(unsafe { Layout::array::<T>(self.cap).unwrap_unchecked() })
        }
    }

    /// Grows the buffer to exactly `new_cap` slots.
    ///
    /// Live elements are carried over bitwise by the allocator's `grow`, so
    /// either the old buffer stays untouched (on failure) or the new buffer
    /// holds every byte of the old one; elements are never left torn.
    pub(crate) fn grow_to<E: ErrorBehavior>(&mut self, new_cap: usize) -> Result<(), E>
    where
        A: VecAllocator,
    {
        debug_assert!(!T::IS_ZST);
        debug_assert!(new_cap > self.cap);

        let new_layout = match Layout::array::<T>(new_cap) {
            Ok(layout) => layout,
            Err(_) => return Err(E::capacity_overflow()),
        };

        if new_layout.size() > self.alloc.max_size() {
            return Err(E::allocation(new_layout));
        }

        let result = match self.current_layout() {
            Some(old_layout) => unsafe { self.alloc.grow(self.ptr.cast(), old_layout, new_layout) },
            None => self.alloc.allocate(new_layout),
        };

        match result {
            Ok(ptr) => {
                self.ptr = ptr.cast();
                self.cap = new_cap;
                Ok(())
            }
            Err(_) => Err(E::allocation(new_layout)),
        }
    }

    /// Shrinks the buffer to exactly `new_cap` slots; the live prefix must
    /// already fit within `new_cap`.
    pub(crate) fn shrink_to<E: ErrorBehavior>(&mut self, new_cap: usize) -> Result<(), E>
    where
        A: VecAllocator,
    {
        if T::IS_ZST || new_cap >= self.cap {
            return Ok(());
        }

        let Some(old_layout) = self.current_layout() else {
            return Ok(());
        };

        if new_cap == 0 {
            unsafe { self.alloc.deallocate(self.ptr.cast(), old_layout) };
            self.ptr = NonNull::dangling();
            self.cap = 0;
            return Ok(());
        }

        // smaller than a validated layout, cannot fail
        let new_layout = unsafe { Layout::array::<T>(new_cap).unwrap_unchecked() };

        match unsafe { self.alloc.shrink(self.ptr.cast(), old_layout, new_layout) } {
            Ok(ptr) => {
                self.ptr = ptr.cast();
                self.cap = new_cap;
                Ok(())
            }
            Err(_) => Err(E::allocation(new_layout)),
        }
    }

    /// Exchanges the buffers of two vectors while both allocator values stay
    /// put. Only sound when the allocators are compatible.
    #[inline]
    pub(crate) fn swap_buffer(&mut self, other: &mut Self) {
        mem::swap(&mut self.ptr, &mut other.ptr);
        mem::swap(&mut self.cap, &mut other.cap);
    }
}

impl<T, A: Allocator> Drop for RawBuf<T, A> {
    fn drop(&mut self) {
        if let Some(layout) = self.current_layout() {
            unsafe { self.alloc.deallocate(self.ptr.cast(), layout) };
        }
    }
}
