use std::ptr::NonNull;

use simple_vector_common::{Error, Result};

/// A move-only owner of a single heap allocation of `T` slots.
///
/// Every slot of an allocated buffer always holds a constructed value: slots
/// are default-constructed by [`OwnedBuffer::allocate`], and callers move
/// values in and out by swapping rather than by bit-copying. Dropping the
/// buffer therefore drops each slot exactly once, whether or not the owning
/// container considers it live.
///
/// An empty buffer (no allocation) is represented without touching the
/// allocator. Buffers are never shared: there is no `Clone` implementation,
/// and moving a buffer out with [`OwnedBuffer::take`] or
/// [`OwnedBuffer::release`] leaves the source empty.
pub struct OwnedBuffer<T> {
    /// The allocation, `None` when the buffer is empty. Never `Some` of a
    /// zero-length slice.
    slots: Option<Box<[T]>>,
}

impl<T> OwnedBuffer<T> {
    /// Creates an empty buffer that references no allocation.
    #[inline]
    pub const fn new() -> OwnedBuffer<T> {
        OwnedBuffer { slots: None }
    }

    /// Takes ownership of an existing allocation.
    ///
    /// A zero-length slice yields an empty buffer.
    pub fn from_boxed(slots: Box<[T]>) -> OwnedBuffer<T> {
        if slots.is_empty() {
            OwnedBuffer::new()
        } else {
            OwnedBuffer { slots: Some(slots) }
        }
    }

    /// Takes ownership of a raw allocation previously handed out by
    /// [`OwnedBuffer::into_raw`] (or by `Box::into_raw` on a `Box<[T]>`).
    ///
    /// `None` is the empty sentinel and produces an empty buffer.
    ///
    /// # Safety
    ///
    /// The pointer must originate from a `Box<[T]>` allocated by the global
    /// allocator, every slot it covers must hold an initialized `T`, and the
    /// caller must not use the pointer again after this call.
    pub unsafe fn from_raw(raw: Option<NonNull<[T]>>) -> OwnedBuffer<T> {
        match raw {
            Some(ptr) => OwnedBuffer::from_boxed(unsafe { Box::from_raw(ptr.as_ptr()) }),
            None => OwnedBuffer::new(),
        }
    }

    /// Relinquishes ownership of the allocation and resets this buffer to
    /// empty.
    ///
    /// Returns `None` if the buffer was already empty, so releasing twice
    /// never hands out the same allocation twice.
    #[inline]
    pub fn release(&mut self) -> Option<Box<[T]>> {
        self.slots.take()
    }

    /// Consumes the buffer and returns the raw allocation, or `None` if the
    /// buffer was empty.
    ///
    /// The caller becomes responsible for the allocation, typically by
    /// passing it back to [`OwnedBuffer::from_raw`].
    pub fn into_raw(mut self) -> Option<NonNull<[T]>> {
        self.release().map(|slots| NonNull::from(Box::leak(slots)))
    }

    /// Returns `true` if the buffer holds an allocation.
    #[inline]
    pub fn is_allocated(&self) -> bool {
        self.slots.is_some()
    }

    /// Returns the number of slots in the allocation, `0` for an empty buffer.
    ///
    /// This is the size of the allocation, not a count of live elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.as_deref().map_or(0, <[T]>::len)
    }

    /// Returns `true` if the buffer has no slots.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a pointer to the first slot.
    ///
    /// For an empty buffer the pointer is dangling but well aligned.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.as_slice().as_ptr()
    }

    /// Returns all slots of the allocation.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self.slots.as_deref().unwrap_or(&[])
    }

    /// Returns all slots of the allocation, mutably.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.slots.as_deref_mut().unwrap_or(&mut [])
    }

    /// Returns a reference to the slot at `index` without bounds checking.
    ///
    /// # Safety
    ///
    /// `index` must be less than [`OwnedBuffer::len`].
    #[inline]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        debug_assert!(index < self.len());
        unsafe { self.as_slice().get_unchecked(index) }
    }

    /// Returns a mutable reference to the slot at `index` without bounds
    /// checking.
    ///
    /// # Safety
    ///
    /// `index` must be less than [`OwnedBuffer::len`].
    #[inline]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < self.len());
        unsafe { self.as_mut_slice().get_unchecked_mut(index) }
    }

    /// Exchanges the allocations of two buffers. No element is moved.
    #[inline]
    pub fn swap(&mut self, other: &mut OwnedBuffer<T>) {
        std::mem::swap(&mut self.slots, &mut other.slots);
    }

    /// Moves the allocation out into a new buffer, leaving `self` empty.
    #[inline]
    pub fn take(&mut self) -> OwnedBuffer<T> {
        OwnedBuffer {
            slots: self.slots.take(),
        }
    }
}

impl<T: Default> OwnedBuffer<T> {
    /// Allocates a buffer of exactly `len` slots, each holding `T::default()`.
    ///
    /// A zero `len` returns an empty buffer without calling the allocator.
    ///
    /// # Errors
    ///
    /// Returns an `Allocation` error if the size computation overflows or the
    /// allocator cannot satisfy the request.
    pub fn allocate(len: usize) -> Result<OwnedBuffer<T>> {
        if len == 0 {
            return Ok(OwnedBuffer::new());
        }

        let mut slots = Vec::<T>::new();
        slots.try_reserve_exact(len).map_err(|e| {
            log::debug!(
                "allocation of {len} slots of {} bytes failed: {e}",
                std::mem::size_of::<T>()
            );
            Error::allocation(len, std::mem::size_of::<T>(), e)
        })?;
        slots.resize_with(len, T::default);
        Ok(OwnedBuffer::from_boxed(slots.into_boxed_slice()))
    }
}

impl<T> Default for OwnedBuffer<T> {
    fn default() -> Self {
        OwnedBuffer::new()
    }
}

impl<T> std::ops::Deref for OwnedBuffer<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T> std::ops::DerefMut for OwnedBuffer<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl<T> From<Box<[T]>> for OwnedBuffer<T> {
    fn from(slots: Box<[T]>) -> Self {
        OwnedBuffer::from_boxed(slots)
    }
}

impl<T> std::fmt::Debug for OwnedBuffer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OwnedBuffer")
            .field("allocated", &self.is_allocated())
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use simple_vector_testkit::tracked::{self, Tracked};

    use super::*;

    #[test]
    fn test_empty_buffer() {
        let buf = OwnedBuffer::<u32>::new();
        assert!(!buf.is_allocated());
        assert_eq!(buf.len(), 0);
        assert!(buf.is_empty());
        assert!(buf.as_slice().is_empty());
        assert!(!buf.as_ptr().is_null());
    }

    #[test]
    fn test_allocate_zero_does_not_allocate() {
        let buf = OwnedBuffer::<String>::allocate(0).unwrap();
        assert!(!buf.is_allocated());
        assert_eq!(buf.len(), 0);
    }

    #[test]
    fn test_allocate_default_slots() {
        let mut buf = OwnedBuffer::<u64>::allocate(5).unwrap();
        assert!(buf.is_allocated());
        assert_eq!(buf.len(), 5);
        assert!(buf.iter().all(|&v| v == 0));

        buf[3] = 42;
        assert_eq!(buf[3], 42);
        assert_eq!(unsafe { *buf.get_unchecked(3) }, 42);
        unsafe { *buf.get_unchecked_mut(0) = 7 };
        assert_eq!(buf.as_slice(), &[7, 0, 0, 42, 0]);
    }

    #[test]
    fn test_allocate_overflow_fails() {
        let err = OwnedBuffer::<u64>::allocate(usize::MAX).unwrap_err();
        assert!(err.is_allocation());
        assert_eq!(
            err.to_string(),
            format!("failed to allocate {} slots of 8 bytes", usize::MAX)
        );

        let err = OwnedBuffer::<u8>::allocate(usize::MAX).unwrap_err();
        assert!(err.is_allocation());
    }

    #[test]
    fn test_release_empties_buffer() {
        let mut buf = OwnedBuffer::<u8>::allocate(3).unwrap();
        let slots = buf.release().expect("allocated");
        assert_eq!(slots.len(), 3);
        assert!(!buf.is_allocated());
        assert!(buf.release().is_none());
    }

    #[test]
    fn test_raw_round_trip() {
        let mut buf = OwnedBuffer::<i32>::allocate(4).unwrap();
        buf.copy_from_slice(&[1, 2, 3, 4]);
        let ptr = buf.as_ptr();

        let raw = buf.into_raw();
        assert!(raw.is_some());
        let buf = unsafe { OwnedBuffer::from_raw(raw) };
        assert_eq!(buf.as_ptr(), ptr);
        assert_eq!(buf.as_slice(), &[1, 2, 3, 4]);

        let empty = unsafe { OwnedBuffer::<i32>::from_raw(None) };
        assert!(!empty.is_allocated());
        assert!(empty.into_raw().is_none());
    }

    #[test]
    fn test_from_boxed() {
        let buf = OwnedBuffer::from_boxed(vec![1u8, 2, 3].into_boxed_slice());
        assert_eq!(buf.as_slice(), &[1, 2, 3]);

        let buf = OwnedBuffer::<u8>::from(Vec::new().into_boxed_slice());
        assert!(!buf.is_allocated());
    }

    #[test]
    fn test_swap_exchanges_allocations() {
        let mut a = OwnedBuffer::from_boxed(vec![1, 2].into_boxed_slice());
        let mut b = OwnedBuffer::<i32>::new();
        let ptr = a.as_ptr();

        a.swap(&mut b);
        assert!(!a.is_allocated());
        assert_eq!(b.as_ptr(), ptr);
        assert_eq!(b.as_slice(), &[1, 2]);
    }

    #[test]
    fn test_take_leaves_source_empty() {
        let mut a = OwnedBuffer::from_boxed(vec!["x".to_string()].into_boxed_slice());
        let b = a.take();
        assert!(!a.is_allocated());
        assert_eq!(b.as_slice(), &["x".to_string()]);
    }

    #[test]
    fn test_drop_destroys_every_slot() {
        tracked::reset();
        {
            let mut buf = OwnedBuffer::<Tracked>::allocate(8).unwrap();
            buf[2] = Tracked::new(10);
            assert_eq!(tracked::stats().live(), 8);
        }
        let stats = tracked::stats();
        assert_eq!(stats.created, 9);
        assert_eq!(stats.live(), 0);
    }

    #[test]
    fn test_released_allocation_survives_buffer() {
        tracked::reset();
        let slots = {
            let mut buf = OwnedBuffer::<Tracked>::allocate(3).unwrap();
            buf.release()
        };
        assert_eq!(tracked::stats().live(), 3);
        drop(slots);
        assert_eq!(tracked::stats().live(), 0);
    }

    #[test]
    fn test_zero_sized_slots() {
        let buf = OwnedBuffer::<()>::allocate(1000).unwrap();
        assert!(buf.is_allocated());
        assert_eq!(buf.len(), 1000);
    }
}
