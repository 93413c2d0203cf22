use core::{
    fmt::{self, Debug},
    iter::FusedIterator,
    marker::PhantomData,
    mem::{self, ManuallyDrop},
    ptr::{self, NonNull},
    slice,
};

use crate::{
    alloc::{Global, VecAllocator},
    polyfill::SizedTypeProperties,
    raw_buf::RawBuf,
    slot_vec::SlotVec,
};

/// An iterator that moves out of a [`SlotVec`].
///
/// Returned by [`SlotVec::into_iter`]. Dropping it drops the elements that
/// were not yielded and releases the buffer.
pub struct IntoIter<T, A: VecAllocator = Global> {
    buf: RawBuf<T, A>,

    /// First element not yet yielded from the front.
    ptr: NonNull<T>,

    /// One past the last element not yet yielded. For zero-sized element
    /// types this is the dangling `ptr` offset by the remaining length in
    /// bytes instead.
    end: NonNull<T>,

    marker: PhantomData<T>,
}

unsafe impl<T: Send, A: VecAllocator + Send> Send for IntoIter<T, A> {}
unsafe impl<T: Sync, A: VecAllocator + Sync> Sync for IntoIter<T, A> {}

impl<T, A: VecAllocator> IntoIterator for SlotVec<T, A> {
    type Item = T;
    type IntoIter = IntoIter<T, A>;

    fn into_iter(self) -> Self::IntoIter {
        let this = ManuallyDrop::new(self);

        unsafe {
            let len = this.len;
            let buf = ptr::read(&this.buf);
            let ptr = buf.ptr();

            let end = if T::IS_ZST {
                NonNull::new_unchecked(ptr.as_ptr().wrapping_byte_add(len))
            } else {
                ptr.add(len)
            };

            IntoIter {
                buf,
                ptr,
                end,
                marker: PhantomData,
            }
        }
    }
}

impl<T, A: VecAllocator> IntoIter<T, A> {
    #[inline]
    fn remaining(&self) -> usize {
        if T::IS_ZST {
            self.end.addr().get().wrapping_sub(self.ptr.addr().get())
        } else {
            unsafe { self.end.as_ptr().offset_from(self.ptr.as_ptr()) as usize }
        }
    }

    /// Returns the remaining elements as a slice.
    #[must_use]
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.remaining()) }
    }

    /// Returns the remaining elements as a mutable slice.
    #[must_use]
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.remaining()) }
    }

    /// Returns a reference to the allocator.
    #[must_use]
    #[inline]
    pub fn allocator(&self) -> &A {
        self.buf.allocator()
    }
}

impl<T, A: VecAllocator> Iterator for IntoIter<T, A> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        if self.ptr == self.end {
            None
        } else if T::IS_ZST {
            // shrink from the `end` side so `ptr` stays dangling
            self.end = unsafe { NonNull::new_unchecked(self.end.as_ptr().wrapping_byte_sub(1)) };
            Some(unsafe { mem::zeroed() })
        } else {
            let old = self.ptr;
            self.ptr = unsafe { old.add(1) };
            Some(unsafe { old.read() })
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.remaining();
        (len, Some(len))
    }

    #[inline]
    fn count(self) -> usize {
        self.remaining()
    }
}

impl<T, A: VecAllocator> DoubleEndedIterator for IntoIter<T, A> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        if self.ptr == self.end {
            None
        } else if T::IS_ZST {
            self.end = unsafe { NonNull::new_unchecked(self.end.as_ptr().wrapping_byte_sub(1)) };
            Some(unsafe { mem::zeroed() })
        } else {
            self.end = unsafe { self.end.sub(1) };
            Some(unsafe { self.end.read() })
        }
    }
}

impl<T, A: VecAllocator> ExactSizeIterator for IntoIter<T, A> {
    #[inline]
    fn len(&self) -> usize {
        self.remaining()
    }
}

impl<T, A: VecAllocator> FusedIterator for IntoIter<T, A> {}

impl<T: Debug, A: VecAllocator> Debug for IntoIter<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

impl<T, A: VecAllocator> Drop for IntoIter<T, A> {
    fn drop(&mut self) {
        unsafe {
            // drop what was not yielded; the `RawBuf` field then releases
            // the memory
            let remaining = ptr::slice_from_raw_parts_mut(self.ptr.as_ptr(), self.remaining());
            ptr::drop_in_place(remaining);
        }
    }
}
