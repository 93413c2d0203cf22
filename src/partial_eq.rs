use crate::{SlotVec, alloc::VecAllocator};

macro_rules! impl_slice_eq {
    ([$($vars:tt)*] $lhs:ty, $rhs:ty) => {
        impl<T, U, $($vars)*> PartialEq<$rhs> for $lhs
        where
            T: PartialEq<U>,
        {
            #[inline]
            fn eq(&self, other: &$rhs) -> bool { self[..] == other[..] }
            #[inline]
            fn ne(&self, other: &$rhs) -> bool { self[..] != other[..] }
        }
    }
}

impl_slice_eq! { [A1: VecAllocator, A2: VecAllocator] SlotVec<T, A1>, SlotVec<U, A2> }
impl_slice_eq! { [A: VecAllocator] SlotVec<T, A>, [U] }
impl_slice_eq! { [A: VecAllocator] SlotVec<T, A>, &[U] }
impl_slice_eq! { [A: VecAllocator] SlotVec<T, A>, &mut [U] }
impl_slice_eq! { [A: VecAllocator] [T], SlotVec<U, A> }
impl_slice_eq! { [A: VecAllocator] &[T], SlotVec<U, A> }
impl_slice_eq! { [A: VecAllocator] &mut [T], SlotVec<U, A> }
impl_slice_eq! { [A: VecAllocator, const N: usize] SlotVec<T, A>, [U; N] }
impl_slice_eq! { [A: VecAllocator, const N: usize] SlotVec<T, A>, &[U; N] }
impl_slice_eq! { [A: VecAllocator, const N: usize] SlotVec<T, A>, &mut [U; N] }
