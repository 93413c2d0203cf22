use core::{
    fmt::{self, Debug},
    iter::FusedIterator,
    mem,
    ops::{Range, RangeBounds},
    ptr::{self, NonNull},
    slice,
};

use crate::{
    alloc::{Global, VecAllocator},
    polyfill::{SizedTypeProperties, slice_range},
    slot_vec::SlotVec,
};

/// A draining iterator for [`SlotVec`].
///
/// Returned by [`SlotVec::drain`]. While it exists the vector is truncated
/// at the start of the drained range; dropping it drops the elements that
/// were not yielded and moves the tail back down.
pub struct Drain<'a, T, A: VecAllocator = Global> {
    /// Index of the first element past the drained range.
    tail_start: usize,
    /// Length of the part past the drained range.
    tail_len: usize,
    /// The elements not yet yielded.
    iter: slice::Iter<'a, T>,
    vec: NonNull<SlotVec<T, A>>,
}

unsafe impl<T: Send, A: VecAllocator + Send> Send for Drain<'_, T, A> {}
unsafe impl<T: Sync, A: VecAllocator + Sync> Sync for Drain<'_, T, A> {}

impl<'a, T, A: VecAllocator> Drain<'a, T, A> {
    pub(super) fn new<R: RangeBounds<usize>>(vec: &'a mut SlotVec<T, A>, range: R) -> Self {
        let len = vec.len();
        let Range { start, end } = slice_range(range, ..len);

        unsafe {
            // truncate at the range start; `Drop` restores the tail
            vec.set_len(start);
            let range_slice = slice::from_raw_parts(vec.as_ptr().add(start), end - start);

            Drain {
                tail_start: end,
                tail_len: len - end,
                iter: range_slice.iter(),
                vec: NonNull::from(vec),
            }
        }
    }

    /// Returns the remaining elements as a slice.
    #[must_use]
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self.iter.as_slice()
    }

    /// Returns a reference to the allocator.
    #[must_use]
    #[inline]
    pub fn allocator(&self) -> &A {
        unsafe { self.vec.as_ref().allocator() }
    }
}

impl<T, A: VecAllocator> AsRef<[T]> for Drain<'_, T, A> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T: Debug, A: VecAllocator> Debug for Drain<'_, T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Drain").field(&self.as_slice()).finish()
    }
}

impl<T, A: VecAllocator> Iterator for Drain<'_, T, A> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.iter.next().map(|value| unsafe { ptr::read(value) })
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<T, A: VecAllocator> DoubleEndedIterator for Drain<'_, T, A> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        self.iter.next_back().map(|value| unsafe { ptr::read(value) })
    }
}

impl<T, A: VecAllocator> ExactSizeIterator for Drain<'_, T, A> {
    #[inline]
    fn len(&self) -> usize {
        self.iter.len()
    }
}

impl<T, A: VecAllocator> FusedIterator for Drain<'_, T, A> {}

impl<T, A: VecAllocator> Drop for Drain<'_, T, A> {
    fn drop(&mut self) {
        /// Moves the tail back down and restores the length, also when
        /// dropping the remaining elements unwinds.
        struct DropGuard<'r, 'a, T, A: VecAllocator>(&'r mut Drain<'a, T, A>);

        impl<T, A: VecAllocator> Drop for DropGuard<'_, '_, T, A> {
            fn drop(&mut self) {
                unsafe {
                    let source_vec = self.0.vec.as_mut();
                    let start = source_vec.len();
                    let tail = self.0.tail_start;

                    if self.0.tail_len > 0 && tail != start {
                        let ptr = source_vec.as_mut_ptr();
                        ptr::copy(ptr.add(tail), ptr.add(start), self.0.tail_len);
                    }

                    source_vec.set_len(start + self.0.tail_len);
                }
            }
        }

        let iter = mem::take(&mut self.iter);
        let drop_len = iter.len();

        let mut vec = self.vec;

        if T::IS_ZST {
            // nothing to memmove; adjust the length and drop through the
            // vector itself
            unsafe {
                let vec = vec.as_mut();
                let old_len = vec.len();
                vec.set_len(old_len + drop_len + self.tail_len);
                vec.truncate(old_len + self.tail_len);
            }

            return;
        }

        let guard = DropGuard(self);

        if drop_len == 0 {
            return;
        }

        // the slice pointer still points into the buffer; reacquire it
        // through the vector so the write is in bounds of its borrow
        let drop_ptr = iter.as_slice().as_ptr();

        unsafe {
            let vec_ptr = vec.as_mut().as_mut_ptr();
            let drop_offset = drop_ptr.offset_from(vec_ptr) as usize;
            let to_drop = ptr::slice_from_raw_parts_mut(vec_ptr.add(drop_offset), drop_len);
            ptr::drop_in_place(to_drop);
        }

        drop(guard);
    }
}
