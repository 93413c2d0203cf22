use core::{error::Error, fmt};

/// The error of checked element access.
///
/// Returned by [`SlotVec::at`](crate::SlotVec::at),
/// [`SlotVec::at_mut`](crate::SlotVec::at_mut) and
/// [`BitVec::at`](crate::BitVec::at) when the supplied index is not within
/// `0..len`. Carries the offending index.
///
/// # Examples
/// ```
/// # use slot_vec::{SlotVec, slot_vec};
/// let vec = slot_vec![1, 2, 3];
///
/// assert_eq!(vec.at(2), Ok(&3));
///
/// let error = vec.at(3).unwrap_err();
/// assert_eq!(error.index(), 3);
/// assert_eq!(error.to_string(), "range error: index 3 is out of range");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeError {
    index: isize,
}

impl RangeError {
    #[inline(always)]
    pub(crate) fn new(index: usize) -> Self {
        #[allow(clippy::cast_possible_wrap)]
        Self { index: index as isize }
    }

    /// The index that was out of range.
    #[must_use]
    #[inline(always)]
    pub fn index(&self) -> isize {
        self.index
    }
}

impl fmt::Display for RangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "range error: index {} is out of range", self.index)
    }
}

impl Error for RangeError {}
