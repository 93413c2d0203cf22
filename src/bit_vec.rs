//! The bit-packed boolean vector.

use core::{
    fmt::{self, Debug},
    iter::FusedIterator,
    mem,
    ops::Range,
    ptr, slice,
};

use crate::{
    ErrorBehavior, RangeError,
    alloc::{AllocError, Global, VecAllocator},
    raw_buf::RawBuf,
};

#[cfg(feature = "panic-on-alloc")]
use crate::panic_on_error;

/// Bit capacity of the first allocation of a growing bit vector.
const MIN_BITS: usize = 8;

/// A growable vector of `bool` packed one element per bit.
///
/// Bit `i` lives in bit `i % 8` (counting from the least significant bit) of
/// byte `i / 8` of the buffer. The growth policy is the same as
/// [`SlotVec`](crate::SlotVec)'s, measured in bits.
///
/// A `bool` in the middle of a byte cannot be handed out as `&mut bool`, so
/// mutable access to a single bit goes through the [`BitRef`] proxy returned
/// by [`get_mut`](BitVec::get_mut).
///
/// # Examples
/// ```
/// use slot_vec::BitVec;
///
/// let mut bits = BitVec::new();
///
/// for _ in 0..10 {
///     bits.push(true);
/// }
///
/// bits.set(3, false);
///
/// assert_eq!(bits.len(), 10);
/// assert_eq!(bits.get(3), Some(false));
/// assert_eq!(bits.get(4), Some(true));
/// assert_eq!(bits.iter().filter(|&bit| bit).count(), 9);
/// ```
pub struct BitVec<A: VecAllocator = Global> {
    buf: RawBuf<u8, A>,
    /// Length in bits. The first `len.div_ceil(8)` bytes of the buffer are
    /// initialized.
    len: usize,
}

impl BitVec {
    /// Constructs a new empty `BitVec`.
    ///
    /// The vector will not allocate until bits are pushed onto it.
    #[must_use]
    #[inline]
    pub const fn new() -> Self {
        Self::new_in(Global)
    }

    /// Constructs a new empty bit vector with capacity for at least
    /// `capacity` bits.
    ///
    /// # Panics
    /// Panics if the allocation fails.
    #[must_use]
    #[inline(always)]
    #[cfg(feature = "panic-on-alloc")]
    pub fn with_capacity(capacity: usize) -> Self {
        panic_on_error(Self::generic_with_capacity_in(capacity, Global))
    }

    /// Constructs a new empty bit vector with capacity for at least
    /// `capacity` bits.
    ///
    /// # Errors
    /// Errors if the allocation fails.
    #[inline(always)]
    pub fn try_with_capacity(capacity: usize) -> Result<Self, AllocError> {
        Self::generic_with_capacity_in(capacity, Global)
    }

    /// Constructs a new `BitVec` holding `count` copies of `value`.
    ///
    /// Fills the buffer a whole byte at a time.
    ///
    /// # Panics
    /// Panics if the allocation fails.
    ///
    /// # Examples
    /// ```
    /// # use slot_vec::BitVec;
    /// let bits = BitVec::from_elem(true, 10);
    /// assert_eq!(bits.len(), 10);
    /// assert!(bits.iter().all(|bit| bit));
    /// ```
    #[must_use]
    #[inline(always)]
    #[cfg(feature = "panic-on-alloc")]
    pub fn from_elem(value: bool, count: usize) -> Self {
        panic_on_error(Self::generic_from_elem_in(value, count, Global))
    }

    /// Constructs a new `BitVec` holding `count` copies of `value`.
    ///
    /// # Errors
    /// Errors if the allocation fails.
    #[inline(always)]
    pub fn try_from_elem(value: bool, count: usize) -> Result<Self, AllocError> {
        Self::generic_from_elem_in(value, count, Global)
    }
}

impl<A: VecAllocator> BitVec<A> {
    /// Constructs a new empty `BitVec<A>` with the provided allocator.
    #[inline]
    pub const fn new_in(allocator: A) -> Self {
        Self {
            buf: RawBuf::new_in(allocator),
            len: 0,
        }
    }

    /// Constructs a new empty bit vector with capacity for at least
    /// `capacity` bits in the provided allocator.
    ///
    /// # Panics
    /// Panics if the allocation fails.
    #[must_use]
    #[inline(always)]
    #[cfg(feature = "panic-on-alloc")]
    pub fn with_capacity_in(capacity: usize, allocator: A) -> Self {
        panic_on_error(Self::generic_with_capacity_in(capacity, allocator))
    }

    /// Constructs a new empty bit vector with capacity for at least
    /// `capacity` bits in the provided allocator.
    ///
    /// # Errors
    /// Errors if the allocation fails.
    #[inline(always)]
    pub fn try_with_capacity_in(capacity: usize, allocator: A) -> Result<Self, AllocError> {
        Self::generic_with_capacity_in(capacity, allocator)
    }

    #[inline]
    fn generic_with_capacity_in<E: ErrorBehavior>(capacity: usize, allocator: A) -> Result<Self, E> {
        Ok(Self {
            buf: RawBuf::with_capacity_in(capacity.div_ceil(8), allocator)?,
            len: 0,
        })
    }

    /// Constructs a new `BitVec<A>` holding `count` copies of `value` in the
    /// provided allocator.
    ///
    /// # Panics
    /// Panics if the allocation fails.
    #[must_use]
    #[inline(always)]
    #[cfg(feature = "panic-on-alloc")]
    pub fn from_elem_in(value: bool, count: usize, allocator: A) -> Self {
        panic_on_error(Self::generic_from_elem_in(value, count, allocator))
    }

    /// Constructs a new `BitVec<A>` holding `count` copies of `value` in the
    /// provided allocator.
    ///
    /// # Errors
    /// Errors if the allocation fails.
    #[inline(always)]
    pub fn try_from_elem_in(value: bool, count: usize, allocator: A) -> Result<Self, AllocError> {
        Self::generic_from_elem_in(value, count, allocator)
    }

    fn generic_from_elem_in<E: ErrorBehavior>(value: bool, count: usize, allocator: A) -> Result<Self, E> {
        let mut bits = Self::generic_with_capacity_in(count, allocator)?;

        unsafe {
            // fill whole bytes; the excess bits past `count` are unobservable
            // through the bit accessors
            let fill = if value { 0xFF } else { 0x00 };
            ptr::write_bytes(bits.buf.ptr().as_ptr(), fill, count.div_ceil(8));
            bits.len = count;
        }

        Ok(bits)
    }

    /// Returns the number of live bits.
    #[must_use]
    #[inline(always)]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true when the bit vector holds no bits.
    #[must_use]
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns how many bits the current buffer can hold.
    #[must_use]
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.capacity().saturating_mul(8)
    }

    /// Returns the largest bit count any buffer of this vector could hold.
    #[must_use]
    #[inline]
    pub fn max_size(&self) -> usize {
        self.buf.allocator().max_size().saturating_mul(8)
    }

    /// Returns a reference to the allocator.
    #[must_use]
    #[inline(always)]
    pub fn allocator(&self) -> &A {
        self.buf.allocator()
    }

    /// Returns the initialized part of the byte buffer: `len / 8` full bytes
    /// plus, when `len` is not a multiple of eight, one byte whose high bits
    /// are unspecified.
    #[must_use]
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        unsafe { slice::from_raw_parts(self.buf.ptr().as_ptr(), self.len.div_ceil(8)) }
    }

    /// Returns the bit at `index`, or `None` when it is not below
    /// [`len`](BitVec::len).
    #[must_use]
    #[inline]
    pub fn get(&self, index: usize) -> Option<bool> {
        if index < self.len {
            Some(unsafe { self.get_unchecked(index) })
        } else {
            None
        }
    }

    /// Returns the bit at `index`, or a [`RangeError`] carrying the index
    /// when it is not below [`len`](BitVec::len).
    ///
    /// # Errors
    /// Errors when `index >= self.len()`.
    #[inline]
    pub fn at(&self, index: usize) -> Result<bool, RangeError> {
        match self.get(index) {
            Some(bit) => Ok(bit),
            None => Err(RangeError::new(index)),
        }
    }

    /// Returns a [`BitRef`] proxy for mutating the bit at `index`, or `None`
    /// when it is not below [`len`](BitVec::len).
    ///
    /// # Examples
    /// ```
    /// # use slot_vec::BitVec;
    /// let mut bits = BitVec::from_elem(false, 4);
    ///
    /// if let Some(mut bit) = bits.get_mut(2) {
    ///     bit.set(true);
    /// }
    ///
    /// assert_eq!(bits.get(2), Some(true));
    /// ```
    #[must_use]
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<BitRef<'_>> {
        if index < self.len {
            unsafe {
                let byte = &mut *self.buf.ptr().as_ptr().add(index / 8);
                Some(BitRef {
                    byte,
                    mask: 1 << (index % 8),
                })
            }
        } else {
            None
        }
    }

    /// Returns the bit at `index` without a bounds check.
    ///
    /// # Safety
    /// `index` must be below [`len`](BitVec::len).
    #[must_use]
    #[inline]
    pub unsafe fn get_unchecked(&self, index: usize) -> bool {
        debug_assert!(index < self.len);
        unsafe { *self.buf.ptr().as_ptr().add(index / 8) >> (index % 8) & 1 != 0 }
    }

    /// Writes the bit at `index`.
    ///
    /// # Panics
    /// Panics if `index >= len`.
    #[inline]
    pub fn set(&mut self, index: usize, value: bool) {
        assert!(
            index < self.len,
            "index out of bounds: the len is {len} but the index is {index}",
            len = self.len
        );

        unsafe { self.set_unchecked(index, value) }
    }

    /// Writes the bit at `index` without a bounds check.
    ///
    /// # Safety
    /// `index` must be below [`len`](BitVec::len).
    #[inline]
    pub unsafe fn set_unchecked(&mut self, index: usize, value: bool) {
        debug_assert!(index < self.len);

        unsafe {
            let byte = self.buf.ptr().as_ptr().add(index / 8);
            let mask = 1 << (index % 8);

            if value {
                *byte |= mask;
            } else {
                *byte &= !mask;
            }
        }
    }

    /// Inverts the bit at `index`.
    ///
    /// # Panics
    /// Panics if `index >= len`.
    #[inline]
    pub fn flip(&mut self, index: usize) {
        assert!(
            index < self.len,
            "index out of bounds: the len is {len} but the index is {index}",
            len = self.len
        );

        unsafe { *self.buf.ptr().as_ptr().add(index / 8) ^= 1 << (index % 8) }
    }

    /// Reserves capacity for at least `additional` more bits.
    ///
    /// Does nothing when the capacity is already sufficient; never shrinks.
    ///
    /// # Panics
    /// Panics if the allocation fails.
    #[inline(always)]
    #[cfg(feature = "panic-on-alloc")]
    pub fn reserve(&mut self, additional: usize) {
        panic_on_error(self.generic_reserve(additional));
    }

    /// Reserves capacity for at least `additional` more bits.
    ///
    /// # Errors
    /// Errors if the allocation fails; the bit vector is left untouched.
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

        let new_bits = if self.capacity() == 0 {
            required.max(MIN_BITS)
        } else {
            self.capacity().saturating_mul(2).max(required)
        };

        // `required` above the allocator limit is reported by `grow_to`
        let new_bits = new_bits.min(self.max_size()).max(required);

        self.buf.grow_to(new_bits.div_ceil(8))
    }

    /// Shrinks the capacity to the current length, rounded up to whole
    /// bytes, reallocating the buffer.
    ///
    /// # Panics
    /// Panics if the allocation fails.
    #[inline(always)]
    #[cfg(feature = "panic-on-alloc")]
    pub fn shrink_to_fit(&mut self) {
        panic_on_error(self.generic_shrink_to_fit());
    }

    /// Shrinks the capacity to the current length, rounded up to whole
    /// bytes, reallocating the buffer.
    ///
    /// # Errors
    /// Errors if the allocation fails; the bit vector is left untouched.
    #[inline(always)]
    pub fn try_shrink_to_fit(&mut self) -> Result<(), AllocError> {
        self.generic_shrink_to_fit()
    }

    #[inline]
    fn generic_shrink_to_fit<E: ErrorBehavior>(&mut self) -> Result<(), E> {
        self.buf.shrink_to(self.len.div_ceil(8))
    }

    /// Appends a bit to the back of the bit vector.
    ///
    /// # Panics
    /// Panics if the allocation fails.
    #[inline(always)]
    #[cfg(feature = "panic-on-alloc")]
    pub fn push(&mut self, value: bool) {
        panic_on_error(self.generic_push(value));
    }

    /// Appends a bit to the back of the bit vector.
    ///
    /// # Errors
    /// Errors if the allocation fails; the bit vector is left untouched.
    #[inline(always)]
    pub fn try_push(&mut self, value: bool) -> Result<(), AllocError> {
        self.generic_push(value)
    }

    #[inline]
    fn generic_push<E: ErrorBehavior>(&mut self, value: bool) -> Result<(), E> {
        if self.len == self.capacity() {
            self.generic_reserve(1)?;
        }

        unsafe { self.push_unchecked(value) }

        Ok(())
    }

    /// Appends a bit assuming spare capacity.
    unsafe fn push_unchecked(&mut self, value: bool) {
        debug_assert!(self.len < self.capacity());

        unsafe {
            let byte = self.buf.ptr().as_ptr().add(self.len / 8);
            let bit = self.len % 8;

            if bit == 0 {
                // first bit of a fresh, possibly uninitialized byte
                byte.write(u8::from(value));
            } else if value {
                *byte |= 1 << bit;
            } else {
                *byte &= !(1 << bit);
            }

            self.len += 1;
        }
    }

    /// Removes the last bit and returns it, or `None` when the bit vector is
    /// empty.
    #[inline]
    pub fn pop(&mut self) -> Option<bool> {
        if self.len == 0 {
            None
        } else {
            self.len -= 1;
            Some(unsafe { *self.buf.ptr().as_ptr().add(self.len / 8) >> (self.len % 8) & 1 != 0 })
        }
    }

    /// Removes every bit, keeping the buffer.
    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Shortens the bit vector to `len` bits.
    ///
    /// Does nothing when `len` is not below the current length.
    #[inline]
    pub fn truncate(&mut self, len: usize) {
        if len < self.len {
            self.len = len;
        }
    }

    /// Resizes the bit vector so that `len` equals `new_len`, filling new
    /// slots with `value`.
    ///
    /// # Panics
    /// Panics if the allocation fails.
    #[inline(always)]
    #[cfg(feature = "panic-on-alloc")]
    pub fn resize(&mut self, new_len: usize, value: bool) {
        panic_on_error(self.generic_resize(new_len, value));
    }

    /// Resizes the bit vector so that `len` equals `new_len`, filling new
    /// slots with `value`.
    ///
    /// # Errors
    /// Errors if the allocation fails; the bit vector is left untouched.
    #[inline(always)]
    pub fn try_resize(&mut self, new_len: usize, value: bool) -> Result<(), AllocError> {
        self.generic_resize(new_len, value)
    }

    fn generic_resize<E: ErrorBehavior>(&mut self, new_len: usize, value: bool) -> Result<(), E> {
        if new_len > self.len {
            self.generic_reserve(new_len - self.len)?;

            while self.len < new_len {
                unsafe { self.push_unchecked(value) }
            }
        } else {
            self.len = new_len;
        }

        Ok(())
    }

    /// Returns an iterator over the bits.
    #[inline]
    pub fn iter(&self) -> BitIter<'_> {
        BitIter {
            bytes: self.as_bytes(),
            range: 0..self.len,
        }
    }

    /// Exchanges the contents of two bit vectors, with the same allocator
    /// rules as [`SlotVec::swap_with`](crate::SlotVec::swap_with).
    ///
    /// # Panics
    /// Panics if the allocators neither propagate on swap nor compare
    /// compatible.
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
}

impl<A: VecAllocator + Default> Default for BitVec<A> {
    fn default() -> Self {
        Self::new_in(A::default())
    }
}

impl<A: VecAllocator> Debug for BitVec<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

#[cfg(feature = "panic-on-alloc")]
impl<A: VecAllocator + Clone> Clone for BitVec<A> {
    fn clone(&self) -> Self {
        let mut bits = Self::with_capacity_in(self.len, self.allocator().select_for_clone());

        unsafe {
            let bytes = self.as_bytes();
            ptr::copy_nonoverlapping(bytes.as_ptr(), bits.buf.ptr().as_ptr(), bytes.len());
            bits.len = self.len;
        }

        bits
    }
}

impl<A1: VecAllocator, A2: VecAllocator> PartialEq<BitVec<A2>> for BitVec<A1> {
    fn eq(&self, other: &BitVec<A2>) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<A: VecAllocator> Eq for BitVec<A> {}

impl<A: VecAllocator, const N: usize> PartialEq<[bool; N]> for BitVec<A> {
    fn eq(&self, other: &[bool; N]) -> bool {
        self.len == N && self.iter().eq(other.iter().copied())
    }
}

impl<A: VecAllocator> PartialEq<&[bool]> for BitVec<A> {
    fn eq(&self, other: &&[bool]) -> bool {
        self.len == other.len() && self.iter().eq(other.iter().copied())
    }
}

#[cfg(feature = "panic-on-alloc")]
impl<A: VecAllocator> Extend<bool> for BitVec<A> {
    fn extend<I: IntoIterator<Item = bool>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);

        for value in iter {
            self.push(value);
        }
    }
}

#[cfg(feature = "panic-on-alloc")]
impl FromIterator<bool> for BitVec {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let mut bits = Self::new();
        bits.extend(iter);
        bits
    }
}

impl<'a, A: VecAllocator> IntoIterator for &'a BitVec<A> {
    type Item = bool;
    type IntoIter = BitIter<'a>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A proxy for a single bit of a [`BitVec`].
///
/// Returned by [`BitVec::get_mut`]; reads and writes go to the bit's byte in
/// place.
pub struct BitRef<'a> {
    byte: &'a mut u8,
    mask: u8,
}

impl BitRef<'_> {
    /// Reads the bit.
    #[must_use]
    #[inline]
    pub fn get(&self) -> bool {
        *self.byte & self.mask != 0
    }

    /// Writes the bit.
    #[inline]
    pub fn set(&mut self, value: bool) {
        if value {
            *self.byte |= self.mask;
        } else {
            *self.byte &= !self.mask;
        }
    }

    /// Inverts the bit.
    #[inline]
    pub fn flip(&mut self) {
        *self.byte ^= self.mask;
    }

    /// Writes the bit and returns its previous value.
    #[inline]
    pub fn replace(&mut self, value: bool) -> bool {
        let old = self.get();
        self.set(value);
        old
    }
}

impl PartialEq<bool> for BitRef<'_> {
    #[inline]
    fn eq(&self, other: &bool) -> bool {
        self.get() == *other
    }
}

impl From<BitRef<'_>> for bool {
    #[inline]
    fn from(bit: BitRef<'_>) -> Self {
        bit.get()
    }
}

impl Debug for BitRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self.get(), f)
    }
}

/// An iterator over the bits of a [`BitVec`].
#[derive(Clone)]
pub struct BitIter<'a> {
    bytes: &'a [u8],
    range: Range<usize>,
}

impl BitIter<'_> {
    #[inline]
    fn bit(&self, index: usize) -> bool {
        self.bytes[index / 8] >> (index % 8) & 1 != 0
    }
}

impl Iterator for BitIter<'_> {
    type Item = bool;

    #[inline]
    fn next(&mut self) -> Option<bool> {
        let index = self.range.next()?;
        Some(self.bit(index))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.range.size_hint()
    }
}

impl DoubleEndedIterator for BitIter<'_> {
    #[inline]
    fn next_back(&mut self) -> Option<bool> {
        let index = self.range.next_back()?;
        Some(self.bit(index))
    }
}

impl ExactSizeIterator for BitIter<'_> {
    #[inline]
    fn len(&self) -> usize {
        self.range.len()
    }
}

impl FusedIterator for BitIter<'_> {}

impl Debug for BitIter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}
