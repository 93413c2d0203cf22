// Set the length of the vec when the `SetLenOnDrop` value goes out of scope.
//
// Cloning elements into raw slots can unwind at every step; routing the
// length update through this guard keeps the live prefix invariant intact on
// both exits: every slot the guard counted is constructed and becomes part of
// the vector, everything past it stays raw.
pub(crate) struct SetLenOnDrop<'a> {
    len: &'a mut usize,
    local_len: usize,
}

impl<'a> SetLenOnDrop<'a> {
    #[inline]
    pub(crate) fn new(len: &'a mut usize) -> Self {
        SetLenOnDrop { local_len: *len, len }
    }

    #[inline]
    pub(crate) fn increment_len(&mut self, increment: usize) {
        self.local_len += increment;
    }
}

impl Drop for SetLenOnDrop<'_> {
    #[inline]
    fn drop(&mut self) {
        *self.len = self.local_len;
    }
}
