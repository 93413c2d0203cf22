//! Memory allocation APIs.
//!
//! The containers obtain raw storage through [`VecAllocator`], an extension of
//! the [`allocator_api2`] [`Allocator`] trait. The extension covers the parts
//! of the container contract that plain memory allocation does not: an upper
//! bound on a single allocation, compatibility between allocator values, and
//! the propagation rules consulted by [`clone_from`](Clone::clone_from) and
//! [`swap_with`](crate::SlotVec::swap_with).

pub use allocator_api2::alloc::{AllocError, Allocator, Global};

/// An allocator usable as the storage provider of [`SlotVec`](crate::SlotVec)
/// and [`BitVec`](crate::BitVec).
///
/// Element construction and destruction are not allocator concerns; the
/// containers write and drop elements in place on the raw slots themselves.
///
/// # Compatibility
///
/// Two allocator values are *compatible* iff a buffer allocated by one may be
/// deallocated by the other. Stateless allocators like [`Global`] are totally
/// compatible; an arena-backed allocator would only be compatible with itself.
///
/// # Propagation
///
/// The two associated constants decide whether the allocator value itself
/// travels when container contents do. Rust moves are destructive bitwise
/// moves, so on move the allocator always travels with its container; there is
/// no knob for that.
///
/// # Safety
///
/// - `compatible_with` must only return `true` when a buffer allocated through
///   either value can be grown, shrunk and deallocated through the other.
/// - `select_for_clone` must return a value compatible with buffers it
///   allocates itself (it is allowed to differ from `self`, e.g. a fresh
///   arena).
/// - `max_size` must not exceed `isize::MAX` and allocations of at most
///   `max_size` bytes must not be rejected *because of their size*.
pub unsafe trait VecAllocator: Allocator {
    /// When true, [`clone_from`](Clone::clone_from) replaces the destination
    /// allocator with a clone of the source's.
    const PROPAGATE_ON_CLONE_FROM: bool = false;

    /// When true, [`swap_with`](crate::SlotVec::swap_with) swaps the allocator
    /// values along with the buffers.
    const PROPAGATE_ON_SWAP: bool = false;

    /// Upper bound in bytes on a single allocation.
    ///
    /// Containers derive their element bound from this; see
    /// [`SlotVec::max_size`](crate::SlotVec::max_size).
    #[inline(always)]
    fn max_size(&self) -> usize {
        isize::MAX as usize
    }

    /// Whether a buffer allocated by `self` may be released by `other`.
    fn compatible_with(&self, other: &Self) -> bool;

    /// The allocator value a fresh copy of a container should carry.
    ///
    /// This is the hook consulted by [`Clone::clone`]; stateless allocators
    /// simply return themselves.
    fn select_for_clone(&self) -> Self
    where
        Self: Sized;
}

unsafe impl VecAllocator for Global {
    #[inline(always)]
    fn compatible_with(&self, _other: &Self) -> bool {
        true
    }

    #[inline(always)]
    fn select_for_clone(&self) -> Self {
        Global
    }
}

unsafe impl<A: VecAllocator + ?Sized> VecAllocator for &A {
    const PROPAGATE_ON_CLONE_FROM: bool = A::PROPAGATE_ON_CLONE_FROM;
    const PROPAGATE_ON_SWAP: bool = A::PROPAGATE_ON_SWAP;

    #[inline(always)]
    fn max_size(&self) -> usize {
        A::max_size(self)
    }

    #[inline(always)]
    fn compatible_with(&self, other: &Self) -> bool {
        A::compatible_with(self, other)
    }

    #[inline(always)]
    fn select_for_clone(&self) -> Self {
        *self
    }
}
