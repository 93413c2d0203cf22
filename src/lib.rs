#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![warn(
    clippy::pedantic,
    clippy::correctness,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    missing_docs,
    rustdoc::missing_crate_level_docs
)]
#![allow(
    clippy::inline_always,
    clippy::module_name_repetitions,
    clippy::comparison_chain,
    clippy::partialeq_ne_impl,
    clippy::collapsible_else_if
)]
//! A growable array with explicit allocator control, plus a bit-packed boolean vector.
//!
//! The two containers of this crate are [`SlotVec`] and [`BitVec`].
//!
//! [`SlotVec<T, A>`] is a contiguous, growable sequence like [`Vec`](alloc_crate::vec::Vec),
//! except that the allocator parameter is front and center: every buffer is obtained
//! through a [`VecAllocator`](alloc::VecAllocator), a small extension of the
//! [`allocator_api2`] allocator trait that additionally settles how allocator values
//! travel across `clone_from` and [`swap_with`](SlotVec::swap_with) and what the
//! largest feasible allocation is.
//!
//! [`BitVec<A>`] packs one `bool` per bit over a byte buffer obtained through the
//! same allocator abstraction. Mutable access to a single bit goes through the
//! [`BitRef`] proxy because a bit is not individually addressable.
//!
//! ```
//! use slot_vec::{SlotVec, slot_vec};
//!
//! let mut squares: SlotVec<i32> = SlotVec::new();
//!
//! for i in 1..=10 {
//!     squares.push(i * i);
//! }
//!
//! assert_eq!(squares.len(), 10);
//! assert_eq!(squares.capacity(), 16);
//! assert_eq!(squares.last(), Some(&100));
//!
//! let mut other = slot_vec![1, 2, 3];
//! other.insert_slice(1, &[7, 8]);
//! assert_eq!(other, [1, 7, 8, 2, 3]);
//! ```
//!
//! # Growth policy
//!
//! Appending to a full vector doubles its capacity, except that the very first
//! allocation reserves eight slots. Bulk insertions that need more than that grow
//! to exactly `max(2 × capacity, len + count)`. Capacity never shrinks unless
//! [`shrink_to_fit`](SlotVec::shrink_to_fit) is called.
//!
//! # Fallible allocation
//!
//! Every method that allocates and panics on failure has a `try_`-prefixed
//! counterpart returning `Result<_, AllocError>`. The panicking flavors are gated
//! behind the `panic-on-alloc` feature (on by default); without it the crate
//! cannot panic on allocation failure at all.
//!
//! # Feature flags
//!
//! - `std` *(default)* — enables `std` in the base allocator crate.
//! - `panic-on-alloc` *(default)* — adds the panicking allocating methods.
//! - `serde` — `Serialize`/`Deserialize` for both containers.

extern crate alloc as alloc_crate;

pub mod alloc;
mod bit_vec;
mod error_behavior;
mod features;
mod partial_eq;
mod polyfill;
mod range_error;
mod raw_buf;
mod set_len_on_drop;
pub mod slot_vec;

pub use bit_vec::{BitIter, BitRef, BitVec};
pub use range_error::RangeError;
pub use slot_vec::{Drain, IntoIter, SlotVec};

pub(crate) use error_behavior::ErrorBehavior;

/// Creates a [`SlotVec`] containing the arguments, in the shape of [`vec!`](alloc_crate::vec!).
///
/// # Panics
/// If used without `try`, panics on allocation failure.
///
/// # Errors
/// If used with `try`, errors on allocation failure.
///
/// # Examples
///
/// ```
/// use slot_vec::{SlotVec, slot_vec};
///
/// let empty: SlotVec<i32> = slot_vec![];
/// assert!(empty.is_empty());
///
/// let filled = slot_vec![-1; 5];
/// assert_eq!(filled, [-1, -1, -1, -1, -1]);
///
/// let listed = slot_vec![1, 2, 3];
/// assert_eq!(listed, [1, 2, 3]);
/// ```
///
/// An allocator other than [`Global`](crate::alloc::Global) is supplied with `in`:
///
/// ```
/// use slot_vec::{SlotVec, slot_vec};
/// use ::slot_vec::alloc::Global;
///
/// let vec = slot_vec![in Global; 1, 2, 3];
/// assert_eq!(vec, [1, 2, 3]);
///
/// let vec = slot_vec![try in Global; 0; 4]?;
/// assert_eq!(vec, [0, 0, 0, 0]);
/// # Ok::<(), ::slot_vec::alloc::AllocError>(())
/// ```
#[macro_export]
macro_rules! slot_vec {
    [in $alloc:expr] => {
        $crate::SlotVec::new_in($alloc)
    };
    [in $alloc:expr; $value:expr; $count:expr] => {
        $crate::SlotVec::from_elem_in($value, $count, $alloc)
    };
    [in $alloc:expr; $($values:expr),* $(,)?] => {
        $crate::SlotVec::from_array_in([$($values),*], $alloc)
    };
    [try in $alloc:expr] => {
        Ok::<_, $crate::alloc::AllocError>($crate::SlotVec::new_in($alloc))
    };
    [try in $alloc:expr; $value:expr; $count:expr] => {
        $crate::SlotVec::try_from_elem_in($value, $count, $alloc)
    };
    [try in $alloc:expr; $($values:expr),* $(,)?] => {
        $crate::SlotVec::try_from_array_in([$($values),*], $alloc)
    };
    [] => {
        $crate::SlotVec::new()
    };
    [$value:expr; $count:expr] => {
        $crate::SlotVec::from_elem($value, $count)
    };
    [$($values:expr),+ $(,)?] => {
        $crate::SlotVec::from([$($values),+])
    };
}

/// Unwraps results whose error type is uninhabited.
#[cfg(feature = "panic-on-alloc")]
#[inline(always)]
pub(crate) fn panic_on_error<T>(result: Result<T, core::convert::Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(error) => match error {},
    }
}

#[cfg(feature = "panic-on-alloc")]
#[cold]
#[inline(never)]
pub(crate) fn capacity_overflow() -> ! {
    panic!("capacity overflow");
}
