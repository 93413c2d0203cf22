//! The general growable array type.

mod drain;
mod into_iter;

use core::{
    borrow::{Borrow, BorrowMut},
    cmp::Ordering,
    fmt::{self, Debug},
    hash::{Hash, Hasher},
    mem::{self, ManuallyDrop},
    ops::{Deref, DerefMut, Index, IndexMut, RangeBounds},
    ptr,
    slice::{self, SliceIndex},
};

use crate::{
    ErrorBehavior, RangeError,
    alloc::{AllocError, Global, VecAllocator},
    polyfill::SizedTypeProperties,
    raw_buf::RawBuf,
    set_len_on_drop::SetLenOnDrop,
};

#[cfg(feature = "panic-on-alloc")]
use crate::panic_on_error;

pub use drain::Drain;
pub use into_iter::IntoIter;

/// Capacity of the first allocation of a growing vector.
const MIN_CAP: usize = 8;

/// A contiguous, growable array with explicit allocator control.
///
/// The buffer holds `capacity` slots of which the first `len` are live
/// (constructed); the rest are raw storage. Appending is amortized constant
/// time: a full vector doubles its capacity, starting at [eight slots] for
/// the first allocation.
///
/// The allocator parameter defaults to [`Global`]. Anything implementing
/// [`VecAllocator`](crate::alloc::VecAllocator) can take its place, which
/// also decides how allocator values travel across
/// [`clone_from`](Clone::clone_from) and [`swap_with`](SlotVec::swap_with).
///
/// `SlotVec` dereferences to `[T]`, so the whole slice API is available on
/// it. Checked element access that reports the offending index is provided by
/// [`at`](SlotVec::at) and [`at_mut`](SlotVec::at_mut).
///
/// [eight slots]: SlotVec::push#growth
///
/// # Examples
/// ```
/// use slot_vec::SlotVec;
///
/// let mut vec: SlotVec<i32> = SlotVec::new();
///
/// vec.push(1);
/// vec.push(2);
/// vec.push(3);
///
/// assert_eq!(vec, [1, 2, 3]);
/// assert_eq!(vec.capacity(), 8);
///
/// vec.insert(1, 7);
/// assert_eq!(vec.remove(0), 1);
/// assert_eq!(vec, [7, 2, 3]);
/// ```
pub struct SlotVec<T, A: VecAllocator = Global> {
    buf: RawBuf<T, A>,
    len: usize,
}

impl<T> SlotVec<T> {
    /// Constructs a new empty `SlotVec<T>`.
    ///
    /// The vector will not allocate until elements are pushed onto it.
    ///
    /// # Examples
    /// ```
    /// # use slot_vec::SlotVec;
    /// let vec = SlotVec::<i32>::new();
    /// assert_eq!(vec.len(), 0);
    /// assert_eq!(vec.capacity(), 0);
    /// ```
    #[must_use]
    #[inline]
    pub const fn new() -> Self {
        Self::new_in(Global)
    }

    /// Constructs a new empty vector with the specified capacity.
    ///
    /// When `T` is a zero-sized type there is no allocation and the capacity
    /// is always `usize::MAX`.
    ///
    /// # Panics
    /// Panics if the allocation fails.
    #[must_use]
    #[inline(always)]
    #[cfg(feature = "panic-on-alloc")]
    pub fn with_capacity(capacity: usize) -> Self {
        panic_on_error(Self::generic_with_capacity_in(capacity, Global))
    }

    /// Constructs a new empty vector with the specified capacity.
    ///
    /// # Errors
    /// Errors if the allocation fails.
    #[inline(always)]
    pub fn try_with_capacity(capacity: usize) -> Result<Self, AllocError> {
        Self::generic_with_capacity_in(capacity, Global)
    }

    /// Constructs a new `SlotVec<T>` holding `count` clones of `value`.
    ///
    /// # Panics
    /// Panics if the allocation fails.
    ///
    /// # Examples
    /// ```
    /// # use slot_vec::SlotVec;
    /// let vec = SlotVec::from_elem(-1, 5);
    /// assert_eq!(vec, [-1, -1, -1, -1, -1]);
    /// ```
    #[must_use]
    #[inline(always)]
    #[cfg(feature = "panic-on-alloc")]
    pub fn from_elem(value: T, count: usize) -> Self
    where
        T: Clone,
    {
        panic_on_error(Self::generic_from_elem_in(value, count, Global))
    }

    /// Constructs a new `SlotVec<T>` holding `count` clones of `value`.
    ///
    /// # Errors
    /// Errors if the allocation fails.
    #[inline(always)]
    pub fn try_from_elem(value: T, count: usize) -> Result<Self, AllocError>
    where
        T: Clone,
    {
        Self::generic_from_elem_in(value, count, Global)
    }
}

impl<T, A: VecAllocator> SlotVec<T, A> {
    /// Constructs a new empty `SlotVec<T, A>` with the provided allocator.
    ///
    /// The vector will not allocate until elements are pushed onto it.
    #[inline]
    pub const fn new_in(allocator: A) -> Self {
        Self {
            buf: RawBuf::new_in(allocator),
            len: 0,
        }
    }

    /// Constructs a new empty vector with the specified capacity
    /// with the provided allocator.
    ///
    /// # Panics
    /// Panics if the allocation fails.
    #[must_use]
    #[inline(always)]
    #[cfg(feature = "panic-on-alloc")]
    pub fn with_capacity_in(capacity: usize, allocator: A) -> Self {
        panic_on_error(Self::generic_with_capacity_in(capacity, allocator))
    }

    /// Constructs a new empty vector with the specified capacity
    /// with the provided allocator.
    ///
    /// # Errors
    /// Errors if the allocation fails.
    #[inline(always)]
    pub fn try_with_capacity_in(capacity: usize, allocator: A) -> Result<Self, AllocError> {
        Self::generic_with_capacity_in(capacity, allocator)
    }

    #[inline]
    pub(crate) fn generic_with_capacity_in<E: ErrorBehavior>(capacity: usize, allocator: A) -> Result<Self, E> {
        Ok(Self {
            buf: RawBuf::with_capacity_in(capacity, allocator)?,
            len: 0,
        })
    }

    /// Constructs a new `SlotVec<T, A>` holding `count` clones of `value` in
    /// the provided allocator.
    ///
    /// # Panics
    /// Panics if the allocation fails.
    #[must_use]
    #[inline(always)]
    #[cfg(feature = "panic-on-alloc")]
    pub fn from_elem_in(value: T, count: usize, allocator: A) -> Self
    where
        T: Clone,
    {
        panic_on_error(Self::generic_from_elem_in(value, count, allocator))
    }

    /// Constructs a new `SlotVec<T, A>` holding `count` clones of `value` in
    /// the provided allocator.
    ///
    /// # Errors
    /// Errors if the allocation fails.
    #[inline(always)]
    pub fn try_from_elem_in(value: T, count: usize, allocator: A) -> Result<Self, AllocError>
    where
        T: Clone,
    {
        Self::generic_from_elem_in(value, count, allocator)
    }

    #[inline]
    fn generic_from_elem_in<E: ErrorBehavior>(value: T, count: usize, allocator: A) -> Result<Self, E>
    where
        T: Clone,
    {
        let mut vec = Self::generic_with_capacity_in(count, allocator)?;
        vec.generic_extend_with(count, value)?;
        Ok(vec)
    }

    /// Constructs a new `SlotVec<T, A>` from a `[T; N]` in the provided
    /// allocator.
    ///
    /// # Panics
    /// Panics if the allocation fails.
    #[must_use]
    #[inline(always)]
    #[cfg(feature = "panic-on-alloc")]
    pub fn from_array_in<const N: usize>(array: [T; N], allocator: A) -> Self {
        panic_on_error(Self::generic_from_array_in(array, allocator))
    }

    /// Constructs a new `SlotVec<T, A>` from a `[T; N]` in the provided
    /// allocator.
    ///
    /// # Errors
    /// Errors if the allocation fails.
    #[inline(always)]
    pub fn try_from_array_in<const N: usize>(array: [T; N], allocator: A) -> Result<Self, AllocError> {
        Self::generic_from_array_in(array, allocator)
    }

    #[inline]
    fn generic_from_array_in<E: ErrorBehavior, const N: usize>(array: [T; N], allocator: A) -> Result<Self, E> {
        let array = ManuallyDrop::new(array);
        let mut vec = Self::generic_with_capacity_in(N, allocator)?;

        unsafe {
            ptr::copy_nonoverlapping(array.as_ptr(), vec.as_mut_ptr(), N);
            vec.len = N;
        }

        Ok(vec)
    }

    /// Constructs a new `SlotVec<T, A>` from an iterator in the provided
    /// allocator.
    ///
    /// # Panics
    /// Panics if the allocation fails.
    ///
    /// # Examples
    /// ```
    /// # use slot_vec::SlotVec;
    /// # use slot_vec::alloc::Global;
    /// let vec = SlotVec::from_iter_in([1, 2, 3], Global);
    /// assert_eq!(vec, [1, 2, 3]);
    /// ```
    #[must_use]
    #[inline(always)]
    #[cfg(feature = "panic-on-alloc")]
    pub fn from_iter_in<I: IntoIterator<Item = T>>(iter: I, allocator: A) -> Self {
        panic_on_error(Self::generic_from_iter_in(iter, allocator))
    }

    /// Constructs a new `SlotVec<T, A>` from an iterator in the provided
    /// allocator.
    ///
    /// # Errors
    /// Errors if the allocation fails.
    #[inline(always)]
    pub fn try_from_iter_in<I: IntoIterator<Item = T>>(iter: I, allocator: A) -> Result<Self, AllocError> {
        Self::generic_from_iter_in(iter, allocator)
    }

    #[inline]
    fn generic_from_iter_in<E: ErrorBehavior, I: IntoIterator<Item = T>>(iter: I, allocator: A) -> Result<Self, E> {
        let iter = iter.into_iter();
        let mut vec = Self::generic_with_capacity_in(iter.size_hint().0, allocator)?;
        vec.generic_extend(iter)?;
        Ok(vec)
    }

    /// Returns the number of live elements.
    #[must_use]
    #[inline(always)]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true when the vector holds no elements.
    #[must_use]
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the total number of slots in the current buffer.
    #[must_use]
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Returns the largest element count any buffer of this vector could
    /// hold, as derived from the allocator's
    /// [`max_size`](crate::alloc::VecAllocator::max_size).
    #[must_use]
    #[inline]
    pub fn max_size(&self) -> usize {
        if T::IS_ZST {
            usize::MAX
        } else {
            self.buf.allocator().max_size() / T::SIZE
        }
    }

    /// Returns a reference to the allocator.
    #[must_use]
    #[inline(always)]
    pub fn allocator(&self) -> &A {
        self.buf.allocator()
    }

    /// Extracts a slice of the live elements.
    #[must_use]
    #[inline(always)]
    pub fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.as_ptr(), self.len) }
    }

    /// Extracts a mutable slice of the live elements.
    #[must_use]
    #[inline(always)]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { slice::from_raw_parts_mut(self.as_mut_ptr(), self.len) }
    }

    /// Returns a raw pointer to the buffer, which may be dangling when
    /// nothing is allocated.
    #[must_use]
    #[inline(always)]
    pub fn as_ptr(&self) -> *const T {
        self.buf.ptr().as_ptr()
    }

    /// Returns a raw mutable pointer to the buffer, which may be dangling
    /// when nothing is allocated.
    #[must_use]
    #[inline(always)]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.buf.ptr().as_ptr()
    }

    /// Returns a reference to the element at `index`, or a [`RangeError`]
    /// carrying the index when it is not below [`len`](SlotVec::len).
    ///
    /// # Errors
    /// Errors when `index >= self.len()`.
    ///
    /// # Examples
    /// ```
    /// # use slot_vec::slot_vec;
    /// let vec = slot_vec![1, 2, 3];
    /// assert_eq!(vec.at(0), Ok(&1));
    /// assert_eq!(vec.at(3).unwrap_err().index(), 3);
    /// ```
    #[inline]
    pub fn at(&self, index: usize) -> Result<&T, RangeError> {
        match self.as_slice().get(index) {
            Some(value) => Ok(value),
            None => Err(RangeError::new(index)),
        }
    }

    /// Returns a mutable reference to the element at `index`, or a
    /// [`RangeError`] carrying the index when it is not below
    /// [`len`](SlotVec::len).
    ///
    /// # Errors
    /// Errors when `index >= self.len()`.
    #[inline]
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, RangeError> {
        let len = self.len;
        match self.as_mut_slice().get_mut(index) {
            Some(value) => Ok(value),
            None => {
                debug_assert!(index >= len);
                Err(RangeError::new(index))
            }
        }
    }

    /// Reserves capacity for at least `additional` more elements.
    ///
    /// Does nothing when the capacity is already sufficient; never shrinks.
    ///
    /// # Panics
    /// Panics if the allocation fails.
    ///
    /// # Examples
    /// ```
    /// # use slot_vec::slot_vec;
    /// let mut vec = slot_vec![1];
    /// vec.reserve(10);
    /// assert!(vec.capacity() >= 11);
    /// ```
    #[inline(always)]
    #[cfg(feature = "panic-on-alloc")]
    pub fn reserve(&mut self, additional: usize) {
        panic_on_error(self.generic_reserve(additional));
    }

    /// Reserves capacity for at least `additional` more elements.
    ///
    /// # Errors
    /// Errors if the allocation fails; the vector is left untouched.
    #[inline(always)]
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), AllocError> {
        self.generic_reserve(additional)
    }

    #[inline]
    fn generic_reserve<E: ErrorBehavior>(&mut self, additional: usize) -> Result<(), E> {
        let Some(required) = self.len.checked_add(additional) else {
            return Err(E::capacity_overflow());
        };

        if required <= self.capacity() {
            return Ok(());
        }

        self.generic_grow_to(required)
    }

    /// Grows to the amortized capacity for `required` total slots:
    /// double the current capacity, or eight slots from zero, whichever
    /// covers `required`, clamped to what the allocator can provide.
    fn generic_grow_to<E: ErrorBehavior>(&mut self, required: usize) -> Result<(), E> {
        debug_assert!(!T::IS_ZST);
        debug_assert!(required > self.capacity());

        let new_cap = if self.capacity() == 0 {
            required.max(MIN_CAP)
        } else {
            // saturate and let the layout computation report the overflow
            self.capacity().saturating_mul(2).max(required)
        };

        // `required` above the allocator limit is reported by `grow_to`
        let new_cap = new_cap.min(self.max_size()).max(required);

        self.buf.grow_to(new_cap)
    }

    /// Shrinks the capacity to the current length, reallocating the buffer.
    ///
    /// # Panics
    /// Panics if the allocation fails.
    ///
    /// # Examples
    /// ```
    /// # use slot_vec::SlotVec;
    /// let mut vec = SlotVec::with_capacity(10);
    /// vec.push(1);
    /// vec.shrink_to_fit();
    /// assert_eq!(vec.capacity(), 1);
    /// ```
    #[inline(always)]
    #[cfg(feature = "panic-on-alloc")]
    pub fn shrink_to_fit(&mut self) {
        panic_on_error(self.generic_shrink_to_fit());
    }

    /// Shrinks the capacity to the current length, reallocating the buffer.
    ///
    /// # Errors
    /// Errors if the allocation fails; the vector is left untouched.
    #[inline(always)]
    pub fn try_shrink_to_fit(&mut self) -> Result<(), AllocError> {
        self.generic_shrink_to_fit()
    }

    #[inline]
    fn generic_shrink_to_fit<E: ErrorBehavior>(&mut self) -> Result<(), E> {
        self.buf.shrink_to(self.len)
    }

    /// Appends an element to the back of the vector.
    ///
    /// # Growth
    ///
    /// Appending to a full vector grows the buffer to twice its capacity;
    /// the first allocation reserves eight slots.
    ///
    /// # Panics
    /// Panics if the allocation fails.
    ///
    /// # Examples
    /// ```
    /// # use slot_vec::slot_vec;
    /// let mut vec = slot_vec![1, 2];
    /// vec.push(3);
    /// assert_eq!(vec, [1, 2, 3]);
    /// ```
    #[inline(always)]
    #[cfg(feature = "panic-on-alloc")]
    pub fn push(&mut self, value: T) {
        panic_on_error(self.generic_push(value));
    }

    /// Appends an element to the back of the vector.
    ///
    /// # Errors
    /// Errors if the allocation fails; the vector is left untouched.
    #[inline(always)]
    pub fn try_push(&mut self, value: T) -> Result<(), AllocError> {
        self.generic_push(value)
    }

    #[inline]
    fn generic_push<E: ErrorBehavior>(&mut self, value: T) -> Result<(), E> {
        if self.len == self.capacity() {
            self.generic_reserve(1)?;
        }

        unsafe {
            ptr::write(self.as_mut_ptr().add(self.len), value);
            self.len += 1;
        }

        Ok(())
    }

    /// Removes the last element and returns it, or `None` when the vector is
    /// empty.
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            None
        } else {
            unsafe {
                self.len -= 1;
                Some(ptr::read(self.as_ptr().add(self.len)))
            }
        }
    }

    /// Removes every element, keeping the buffer.
    #[inline]
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Shortens the vector to `len` elements, dropping the rest.
    ///
    /// Does nothing when `len` is not below the current length.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }

        unsafe {
            let tail_len = self.len - len;
            let tail = ptr::slice_from_raw_parts_mut(self.as_mut_ptr().add(len), tail_len);

            // shorten first so an unwinding element drop can't expose the
            // dead slots
            self.len = len;
            ptr::drop_in_place(tail);
        }
    }

    /// Resizes the vector so that `len` equals `new_len`, filling new slots
    /// with clones of `value` and dropping surplus elements.
    ///
    /// # Panics
    /// Panics if the allocation fails.
    ///
    /// # Examples
    /// ```
    /// # use slot_vec::slot_vec;
    /// let mut vec = slot_vec![1, 2];
    /// vec.resize(4, 9);
    /// assert_eq!(vec, [1, 2, 9, 9]);
    /// vec.resize(1, 9);
    /// assert_eq!(vec, [1]);
    /// ```
    #[inline(always)]
    #[cfg(feature = "panic-on-alloc")]
    pub fn resize(&mut self, new_len: usize, value: T)
    where
        T: Clone,
    {
        panic_on_error(self.generic_resize(new_len, value));
    }

    /// Resizes the vector so that `len` equals `new_len`, filling new slots
    /// with clones of `value` and dropping surplus elements.
    ///
    /// # Errors
    /// Errors if the allocation fails; the vector is left untouched.
    #[inline(always)]
    pub fn try_resize(&mut self, new_len: usize, value: T) -> Result<(), AllocError>
    where
        T: Clone,
    {
        self.generic_resize(new_len, value)
    }

    #[inline]
    fn generic_resize<E: ErrorBehavior>(&mut self, new_len: usize, value: T) -> Result<(), E>
    where
        T: Clone,
    {
        if new_len > self.len {
            self.generic_extend_with(new_len - self.len, value)
        } else {
            self.truncate(new_len);
            Ok(())
        }
    }

    /// Resizes the vector so that `len` equals `new_len`, filling new slots
    /// with the results of `f` in order and dropping surplus elements.
    ///
    /// # Panics
    /// Panics if the allocation fails.
    #[inline(always)]
    #[cfg(feature = "panic-on-alloc")]
    pub fn resize_with(&mut self, new_len: usize, f: impl FnMut() -> T) {
        panic_on_error(self.generic_resize_with(new_len, f));
    }

    /// Resizes the vector so that `len` equals `new_len`, filling new slots
    /// with the results of `f` in order and dropping surplus elements.
    ///
    /// # Errors
    /// Errors if the allocation fails; the vector is left untouched.
    #[inline(always)]
    pub fn try_resize_with(&mut self, new_len: usize, f: impl FnMut() -> T) -> Result<(), AllocError> {
        self.generic_resize_with(new_len, f)
    }

    fn generic_resize_with<E: ErrorBehavior>(
        &mut self,
        new_len: usize,
        mut f: impl FnMut() -> T,
    ) -> Result<(), E> {
        if new_len > self.len {
            let additional = new_len - self.len;
            self.generic_reserve(additional)?;

            unsafe {
                let mut ptr = self.as_mut_ptr().add(self.len);
                let mut guard = SetLenOnDrop::new(&mut self.len);

                for _ in 0..additional {
                    ptr::write(ptr, f());
                    ptr = ptr.add(1);
                    guard.increment_len(1);
                }
            }
        } else {
            self.truncate(new_len);
        }

        Ok(())
    }

    /// Replaces the contents with `count` clones of `value`, keeping the
    /// buffer when it is large enough.
    ///
    /// # Panics
    /// Panics if the allocation fails.
    ///
    /// # Examples
    /// ```
    /// # use slot_vec::slot_vec;
    /// let mut vec = slot_vec![1, 2, 3];
    /// vec.assign(5, -1);
    /// assert_eq!(vec, [-1, -1, -1, -1, -1]);
    /// ```
    #[inline(always)]
    #[cfg(feature = "panic-on-alloc")]
    pub fn assign(&mut self, count: usize, value: T)
    where
        T: Clone,
    {
        panic_on_error(self.generic_assign(count, value));
    }

    /// Replaces the contents with `count` clones of `value`.
    ///
    /// # Errors
    /// Errors if the allocation fails; the vector is left cleared.
    #[inline(always)]
    pub fn try_assign(&mut self, count: usize, value: T) -> Result<(), AllocError>
    where
        T: Clone,
    {
        self.generic_assign(count, value)
    }

    #[inline]
    fn generic_assign<E: ErrorBehavior>(&mut self, count: usize, value: T) -> Result<(), E>
    where
        T: Clone,
    {
        self.clear();
        self.generic_extend_with(count, value)
    }

    /// Replaces the contents with the elements of an iterator.
    ///
    /// # Panics
    /// Panics if the allocation fails.
    #[inline(always)]
    #[cfg(feature = "panic-on-alloc")]
    pub fn assign_from<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        panic_on_error(self.generic_assign_from(iter));
    }

    /// Replaces the contents with the elements of an iterator.
    ///
    /// # Errors
    /// Errors if the allocation fails; the vector is left cleared.
    #[inline(always)]
    pub fn try_assign_from<I: IntoIterator<Item = T>>(&mut self, iter: I) -> Result<(), AllocError> {
        self.generic_assign_from(iter)
    }

    #[inline]
    fn generic_assign_from<E: ErrorBehavior, I: IntoIterator<Item = T>>(&mut self, iter: I) -> Result<(), E> {
        self.clear();
        self.generic_extend(iter)
    }

    /// Inserts an element at position `index`, shifting everything after it
    /// to the right.
    ///
    /// # Panics
    /// Panics if `index > len` or if the allocation fails.
    ///
    /// # Examples
    /// ```
    /// # use slot_vec::slot_vec;
    /// let mut vec = slot_vec![1, 3];
    /// vec.insert(1, 2);
    /// assert_eq!(vec, [1, 2, 3]);
    /// ```
    #[inline(always)]
    #[cfg(feature = "panic-on-alloc")]
    pub fn insert(&mut self, index: usize, value: T) {
        panic_on_error(self.generic_insert(index, value));
    }

    /// Inserts an element at position `index`, shifting everything after it
    /// to the right.
    ///
    /// # Panics
    /// Panics if `index > len`.
    ///
    /// # Errors
    /// Errors if the allocation fails; the vector is left untouched.
    #[inline(always)]
    pub fn try_insert(&mut self, index: usize, value: T) -> Result<(), AllocError> {
        self.generic_insert(index, value)
    }

    #[inline]
    fn generic_insert<E: ErrorBehavior>(&mut self, index: usize, value: T) -> Result<(), E> {
        assert!(
            index <= self.len,
            "insertion index (is {index}) should be <= len (is {len})",
            len = self.len
        );

        if self.len == self.capacity() {
            self.generic_reserve(1)?;
        }

        unsafe {
            let ptr = self.as_mut_ptr().add(index);
            ptr::copy(ptr, ptr.add(1), self.len - index);
            ptr::write(ptr, value);
            self.len += 1;
        }

        Ok(())
    }

    /// Inserts clones of the elements of `values` at position `index`,
    /// shifting everything after it to the right by `values.len()`.
    ///
    /// When more slots are needed than doubling would provide, the buffer
    /// grows to `len + values.len()` slots directly.
    ///
    /// # Panics
    /// Panics if `index > len` or if the allocation fails.
    ///
    /// # Examples
    /// ```
    /// # use slot_vec::slot_vec;
    /// let mut vec = slot_vec![-1, -1, -1, -1, -1];
    /// vec.insert_slice(2, &[100, 200, 300]);
    /// assert_eq!(vec, [-1, -1, 100, 200, 300, -1, -1, -1]);
    /// ```
    #[inline(always)]
    #[cfg(feature = "panic-on-alloc")]
    pub fn insert_slice(&mut self, index: usize, values: &[T])
    where
        T: Clone,
    {
        panic_on_error(self.generic_insert_slice(index, values));
    }

    /// Inserts clones of the elements of `values` at position `index`.
    ///
    /// # Panics
    /// Panics if `index > len`.
    ///
    /// # Errors
    /// Errors if the allocation fails; the vector is left untouched.
    #[inline(always)]
    pub fn try_insert_slice(&mut self, index: usize, values: &[T]) -> Result<(), AllocError>
    where
        T: Clone,
    {
        self.generic_insert_slice(index, values)
    }

    fn generic_insert_slice<E: ErrorBehavior>(&mut self, index: usize, values: &[T]) -> Result<(), E>
    where
        T: Clone,
    {
        assert!(
            index <= self.len,
            "insertion index (is {index}) should be <= len (is {len})",
            len = self.len
        );

        let count = values.len();

        if count == 0 {
            return Ok(());
        }

        self.generic_reserve(count)?;

        unsafe {
            let tail_len = self.len - index;
            let ptr = self.as_mut_ptr();

            // open the gap; while it is raw the live prefix ends at `index`
            ptr::copy(ptr.add(index), ptr.add(index + count), tail_len);
            self.len = index;

            // Closes the gap again whether or not every clone succeeded:
            // the tail moves down to the end of the filled part and `len`
            // covers prefix, filled gap and tail.
            struct Gap<'a, T, A: VecAllocator> {
                vec: &'a mut SlotVec<T, A>,
                index: usize,
                count: usize,
                tail_len: usize,
                filled: usize,
            }

            impl<T, A: VecAllocator> Drop for Gap<'_, T, A> {
                fn drop(&mut self) {
                    unsafe {
                        let ptr = self.vec.as_mut_ptr();
                        ptr::copy(
                            ptr.add(self.index + self.count),
                            ptr.add(self.index + self.filled),
                            self.tail_len,
                        );
                        self.vec.len = self.index + self.filled + self.tail_len;
                    }
                }
            }

            let mut gap = Gap {
                vec: self,
                index,
                count,
                tail_len,
                filled: 0,
            };

            for value in values {
                let dst = gap.vec.as_mut_ptr().add(gap.index + gap.filled);
                ptr::write(dst, value.clone());
                gap.filled += 1;
            }
        }

        Ok(())
    }

    /// Removes and returns the element at position `index`, shifting
    /// everything after it to the left.
    ///
    /// # Panics
    /// Panics if `index >= len`.
    ///
    /// # Examples
    /// ```
    /// # use slot_vec::slot_vec;
    /// let mut vec = slot_vec![1, 2, 3];
    /// assert_eq!(vec.remove(1), 2);
    /// assert_eq!(vec, [1, 3]);
    /// ```
    pub fn remove(&mut self, index: usize) -> T {
        let len = self.len;
        assert!(index < len, "removal index (is {index}) should be < len (is {len})");

        unsafe {
            let ptr = self.as_mut_ptr().add(index);
            let value = ptr::read(ptr);
            ptr::copy(ptr.add(1), ptr, len - index - 1);
            self.len = len - 1;
            value
        }
    }

    /// Removes and returns the element at position `index`, replacing it
    /// with the last element. Does not preserve ordering but is O(1).
    ///
    /// # Panics
    /// Panics if `index >= len`.
    pub fn swap_remove(&mut self, index: usize) -> T {
        let len = self.len;
        assert!(index < len, "swap_remove index (is {index}) should be < len (is {len})");

        unsafe {
            let ptr = self.as_mut_ptr();
            let value = ptr::read(ptr.add(index));
            ptr::copy(ptr.add(len - 1), ptr.add(index), 1);
            self.len = len - 1;
            value
        }
    }

    /// Removes the given range and returns an iterator over the removed
    /// elements.
    ///
    /// Dropping the iterator before exhausting it drops the rest of the
    /// removed range. Leaking it leaves the vector truncated at the start of
    /// the range.
    ///
    /// # Panics
    /// Panics if the range is out of bounds.
    ///
    /// # Examples
    /// ```
    /// # use slot_vec::slot_vec;
    /// let mut vec = slot_vec![1, 2, 3, 4];
    /// let removed: Vec<i32> = vec.drain(0..2).collect();
    /// assert_eq!(removed, [1, 2]);
    /// assert_eq!(vec, [3, 4]);
    /// ```
    pub fn drain<R: RangeBounds<usize>>(&mut self, range: R) -> Drain<'_, T, A> {
        Drain::new(self, range)
    }

    /// Appends clones of the elements of `values`.
    ///
    /// # Panics
    /// Panics if the allocation fails.
    ///
    /// # Examples
    /// ```
    /// # use slot_vec::slot_vec;
    /// let mut vec = slot_vec![1];
    /// vec.extend_from_slice(&[2, 3]);
    /// assert_eq!(vec, [1, 2, 3]);
    /// ```
    #[inline(always)]
    #[cfg(feature = "panic-on-alloc")]
    pub fn extend_from_slice(&mut self, values: &[T])
    where
        T: Clone,
    {
        panic_on_error(self.generic_extend_from_slice(values));
    }

    /// Appends clones of the elements of `values`.
    ///
    /// # Errors
    /// Errors if the allocation fails; the vector is left untouched.
    #[inline(always)]
    pub fn try_extend_from_slice(&mut self, values: &[T]) -> Result<(), AllocError>
    where
        T: Clone,
    {
        self.generic_extend_from_slice(values)
    }

    fn generic_extend_from_slice<E: ErrorBehavior>(&mut self, values: &[T]) -> Result<(), E>
    where
        T: Clone,
    {
        self.generic_reserve(values.len())?;

        unsafe {
            let mut ptr = self.as_mut_ptr().add(self.len);
            let mut guard = SetLenOnDrop::new(&mut self.len);

            for value in values {
                ptr::write(ptr, value.clone());
                ptr = ptr.add(1);
                guard.increment_len(1);
            }
        }

        Ok(())
    }

    /// Appends `count` clones of `value`.
    fn generic_extend_with<E: ErrorBehavior>(&mut self, count: usize, value: T) -> Result<(), E>
    where
        T: Clone,
    {
        self.generic_reserve(count)?;

        unsafe {
            let mut ptr = self.as_mut_ptr().add(self.len);
            let mut guard = SetLenOnDrop::new(&mut self.len);

            if count > 0 {
                for _ in 1..count {
                    ptr::write(ptr, value.clone());
                    ptr = ptr.add(1);
                    guard.increment_len(1);
                }

                // the final slot takes the value itself
                ptr::write(ptr, value);
                guard.increment_len(1);
            }
        }

        Ok(())
    }

    #[inline]
    pub(crate) fn generic_extend<E: ErrorBehavior, I: IntoIterator<Item = T>>(&mut self, iter: I) -> Result<(), E> {
        let iter = iter.into_iter();
        self.generic_reserve(iter.size_hint().0)?;

        for value in iter {
            self.generic_push(value)?;
        }

        Ok(())
    }

    /// Exchanges the contents of two vectors.
    ///
    /// When the allocator's
    /// [`PROPAGATE_ON_SWAP`](crate::alloc::VecAllocator::PROPAGATE_ON_SWAP)
    /// is true the allocator values are exchanged along with the buffers;
    /// otherwise the allocators stay put, which requires them to be
    /// [compatible](crate::alloc::VecAllocator::compatible_with).
    ///
    /// # Panics
    /// Panics if the allocators neither propagate on swap nor compare
    /// compatible.
    ///
    /// # Examples
    /// ```
    /// # use slot_vec::SlotVec;
    /// let mut a = SlotVec::from(["one", "two", "three"]);
    /// let mut b = SlotVec::from(["ONE", "TWO", "THREE"]);
    ///
    /// a.swap_with(&mut b);
    ///
    /// assert_eq!(a, ["ONE", "TWO", "THREE"]);
    /// assert_eq!(b, ["one", "two", "three"]);
    /// ```
    pub fn swap_with(&mut self, other: &mut Self) {
        if A::PROPAGATE_ON_SWAP {
            mem::swap(self, other);
        } else {
            assert!(
                self.allocator().compatible_with(other.allocator()),
                "swapped vectors must have compatible allocators"
            );
            self.buf.swap_buffer(&mut other.buf);
            mem::swap(&mut self.len, &mut other.len);
        }
    }

    /// Splits the vector in two at `at`: `self` keeps `[0, at)`, the
    /// returned vector holds `[at, len)` in a fresh buffer allocated from a
    /// clone of this vector's allocator.
    ///
    /// # Panics
    /// Panics if `at > len` or if the allocation fails.
    #[must_use = "use `.truncate()` if you don't need the other half"]
    #[cfg(feature = "panic-on-alloc")]
    pub fn split_off(&mut self, at: usize) -> Self
    where
        A: Clone,
    {
        assert!(at <= self.len, "`at` split index (is {at}) should be <= len (is {len})", len = self.len);

        let other_len = self.len - at;
        let mut other = Self::with_capacity_in(other_len, self.allocator().clone());

        unsafe {
            ptr::copy_nonoverlapping(self.as_ptr().add(at), other.as_mut_ptr(), other_len);
            self.len = at;
            other.len = other_len;
        }

        other
    }

    /// Forces the length of the vector to `new_len`.
    ///
    /// # Safety
    /// `new_len` must not exceed the capacity and the first `new_len` slots
    /// must be initialized.
    #[inline(always)]
    pub unsafe fn set_len(&mut self, new_len: usize) {
        debug_assert!(new_len <= self.capacity());
        self.len = new_len;
    }
}

unsafe impl<T: Send, A: VecAllocator + Send> Send for SlotVec<T, A> {}
unsafe impl<T: Sync, A: VecAllocator + Sync> Sync for SlotVec<T, A> {}

impl<T, A: VecAllocator> Drop for SlotVec<T, A> {
    fn drop(&mut self) {
        unsafe {
            // destroy the live prefix; the `RawBuf` field then releases the
            // memory, also when one of the element drops unwinds
            let elements = ptr::slice_from_raw_parts_mut(self.as_mut_ptr(), self.len);
            ptr::drop_in_place(elements);
        }
    }
}

impl<T, A: VecAllocator> Deref for SlotVec<T, A> {
    type Target = [T];

    #[inline(always)]
    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T, A: VecAllocator> DerefMut for SlotVec<T, A> {
    #[inline(always)]
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl<T, A: VecAllocator, I: SliceIndex<[T]>> Index<I> for SlotVec<T, A> {
    type Output = I::Output;

    #[inline(always)]
    fn index(&self, index: I) -> &Self::Output {
        Index::index(self.as_slice(), index)
    }
}

impl<T, A: VecAllocator, I: SliceIndex<[T]>> IndexMut<I> for SlotVec<T, A> {
    #[inline(always)]
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        IndexMut::index_mut(self.as_mut_slice(), index)
    }
}

impl<T, A: VecAllocator + Default> Default for SlotVec<T, A> {
    fn default() -> Self {
        Self::new_in(A::default())
    }
}

impl<T: Debug, A: VecAllocator> Debug for SlotVec<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Debug::fmt(self.as_slice(), f)
    }
}

impl<T: Hash, A: VecAllocator> Hash for SlotVec<T, A> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        Hash::hash(self.as_slice(), state);
    }
}

impl<T, A: VecAllocator> AsRef<[T]> for SlotVec<T, A> {
    #[inline(always)]
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, A: VecAllocator> AsMut<[T]> for SlotVec<T, A> {
    #[inline(always)]
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, A: VecAllocator> Borrow<[T]> for SlotVec<T, A> {
    #[inline(always)]
    fn borrow(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, A: VecAllocator> BorrowMut<[T]> for SlotVec<T, A> {
    #[inline(always)]
    fn borrow_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

#[cfg(feature = "panic-on-alloc")]
impl<T: Clone, A: VecAllocator + Clone> Clone for SlotVec<T, A> {
    fn clone(&self) -> Self {
        let mut vec = Self::with_capacity_in(self.len, self.allocator().select_for_clone());
        vec.extend_from_slice(self);
        vec
    }

    /// Clones `source` into `self`, building the copy before the old buffer
    /// is released (strong exception guarantee).
    ///
    /// Which allocator the copy uses is decided by the allocator's
    /// [`PROPAGATE_ON_CLONE_FROM`](crate::alloc::VecAllocator::PROPAGATE_ON_CLONE_FROM).
    fn clone_from(&mut self, source: &Self) {
        let allocator = if A::PROPAGATE_ON_CLONE_FROM {
            source.allocator().clone()
        } else {
            self.allocator().clone()
        };

        let mut copy = Self::with_capacity_in(source.len, allocator);
        copy.extend_from_slice(source);
        *self = copy;
    }
}

impl<T: PartialOrd, A1: VecAllocator, A2: VecAllocator> PartialOrd<SlotVec<T, A2>> for SlotVec<T, A1> {
    /// Lexicographic ordering over the live elements.
    #[inline]
    fn partial_cmp(&self, other: &SlotVec<T, A2>) -> Option<Ordering> {
        PartialOrd::partial_cmp(self.as_slice(), other.as_slice())
    }
}

impl<T: Ord, A: VecAllocator> Ord for SlotVec<T, A> {
    /// Lexicographic ordering over the live elements.
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        Ord::cmp(self.as_slice(), other.as_slice())
    }
}

impl<T: Eq, A: VecAllocator> Eq for SlotVec<T, A> {}

#[cfg(feature = "panic-on-alloc")]
impl<T> FromIterator<T> for SlotVec<T> {
    #[inline]
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_iter_in(iter, Global)
    }
}

#[cfg(feature = "panic-on-alloc")]
impl<T, const N: usize> From<[T; N]> for SlotVec<T> {
    #[inline]
    fn from(array: [T; N]) -> Self {
        Self::from_array_in(array, Global)
    }
}

#[cfg(feature = "panic-on-alloc")]
impl<T: Clone> From<&[T]> for SlotVec<T> {
    #[inline]
    fn from(slice: &[T]) -> Self {
        let mut vec = Self::new();
        vec.extend_from_slice(slice);
        vec
    }
}

#[cfg(feature = "panic-on-alloc")]
impl<T, A: VecAllocator> Extend<T> for SlotVec<T, A> {
    #[inline]
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        panic_on_error(self.generic_extend(iter));
    }
}

#[cfg(feature = "panic-on-alloc")]
impl<'a, T: Copy + 'a, A: VecAllocator> Extend<&'a T> for SlotVec<T, A> {
    #[inline]
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<'a, T, A: VecAllocator> IntoIterator for &'a SlotVec<T, A> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, A: VecAllocator> IntoIterator for &'a mut SlotVec<T, A> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
