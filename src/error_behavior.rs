use core::alloc::Layout;
#[cfg(feature = "panic-on-alloc")]
use core::convert::Infallible;

use crate::alloc::AllocError;

/// Decides between panicking and returning errors.
///
/// Allocating container methods are written once against this trait; the
/// public panicking methods instantiate it with [`Infallible`] (failures
/// divert to the global error hooks and never construct a value) and the
/// `try_` methods with [`AllocError`].
pub(crate) trait ErrorBehavior: Sized {
    fn allocation(layout: Layout) -> Self;
    fn capacity_overflow() -> Self;
}

#[cfg(feature = "panic-on-alloc")]
impl ErrorBehavior for Infallible {
    #[inline(always)]
    fn allocation(layout: Layout) -> Self {
        allocator_api2::alloc::handle_alloc_error(layout)
    }

    #[inline(always)]
    fn capacity_overflow() -> Self {
        crate::capacity_overflow()
    }
}

impl ErrorBehavior for AllocError {
    #[inline(always)]
    fn allocation(_layout: Layout) -> Self {
        Self
    }

    #[inline(always)]
    fn capacity_overflow() -> Self {
        Self
    }
}
