use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Deref, DerefMut, Range};

use simple_vector_buffer::OwnedBuffer;
use simple_vector_common::{Error, Result, verify_index};

/// A contiguous growable array with an explicit split between its logical
/// length and the capacity of its allocation.
///
/// Slots `[0, len)` hold the live elements. Slots `[len, capacity)` are dead:
/// they are allocated and always hold some constructed value (a default value
/// or a stale element left behind by `clear`, `pop_back`, `erase` or a
/// shrinking `resize`), but they are not part of the sequence. Stale values
/// keep any resources they own until the slot is overwritten or the array is
/// dropped; dropping the array drops every slot exactly once.
///
/// # Growth policy
///
/// When an append or insert finds the array full, the capacity becomes
/// `max(1, capacity * 2)`. A `resize` past the capacity grows to
/// `max(capacity * 2, new_len)`. `reserve` grows to exactly the requested
/// capacity. The capacity never shrinks. This doubling is part of the
/// contract: `n` appends starting from empty relocate fewer than `2n`
/// elements in total.
///
/// Every growth step builds the new allocation first and only then swaps it
/// in, so an allocation failure returns an error and leaves the array exactly
/// as it was.
///
/// # Positions
///
/// Positions are plain indices. Any operation that reallocates or shifts
/// elements invalidates raw pointers obtained from [`GrowableArray::as_ptr_range`];
/// borrowed slices and iterators are protected by the borrow checker.
pub struct GrowableArray<T> {
    /// Number of live elements.
    size: usize,
    /// Storage; its slot count is the capacity.
    buffer: OwnedBuffer<T>,
}

impl<T> GrowableArray<T> {
    /// Capacity multiplier applied when a full array needs room for one more
    /// element.
    pub const GROWTH_FACTOR: usize = 2;

    /// Capacity of the first allocation made by an append to an empty array.
    pub const MIN_NON_ZERO_CAPACITY: usize = 1;

    /// Creates an empty array. Does not allocate.
    #[inline]
    pub const fn new() -> GrowableArray<T> {
        GrowableArray {
            size: 0,
            buffer: OwnedBuffer::new(),
        }
    }

    /// Returns the number of live elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns the number of allocated slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Returns `true` if the array has no live elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the live elements as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.buffer[..self.size]
    }

    /// Returns the live elements as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.buffer[..self.size]
    }

    /// Returns an iterator over the live elements.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Returns an iterator that allows modifying the live elements.
    #[inline]
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Returns the begin/end pointer pair of the live range.
    ///
    /// The pointers are invalidated by any operation that reallocates or
    /// shifts elements.
    #[inline]
    pub fn as_ptr_range(&self) -> Range<*const T> {
        self.as_slice().as_ptr_range()
    }

    /// Returns the mutable begin/end pointer pair of the live range.
    #[inline]
    pub fn as_mut_ptr_range(&mut self) -> Range<*mut T> {
        self.as_mut_slice().as_mut_ptr_range()
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns an `OutOfRange` error if `index >= len`.
    pub fn at(&self, index: usize) -> Result<&T> {
        verify_index!(index, self.size);
        Ok(&self.buffer[index])
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns an `OutOfRange` error if `index >= len`.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T> {
        verify_index!(index, self.size);
        Ok(&mut self.buffer[index])
    }

    /// Returns a reference to the element at `index` without any bounds
    /// checking.
    ///
    /// # Safety
    ///
    /// `index` must be less than [`GrowableArray::len`].
    #[inline]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        debug_assert!(index < self.size, "index {index} >= len {}", self.size);
        unsafe { self.buffer.get_unchecked(index) }
    }

    /// Returns a mutable reference to the element at `index` without any
    /// bounds checking.
    ///
    /// # Safety
    ///
    /// `index` must be less than [`GrowableArray::len`].
    #[inline]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < self.size, "index {index} >= len {}", self.size);
        unsafe { self.buffer.get_unchecked_mut(index) }
    }

    /// Removes the last element from the live range. Does nothing on an
    /// empty array.
    ///
    /// The removed value stays in its (now dead) slot until it is
    /// overwritten or the array is dropped.
    #[inline]
    pub fn pop_back(&mut self) {
        if self.size != 0 {
            self.size -= 1;
        }
    }

    /// Removes the element at `position`, shifting the following elements one
    /// slot to the left.
    ///
    /// Returns the index of the element that followed the removed one, which
    /// is `position` itself. The removed value is moved into the first dead
    /// slot rather than dropped.
    ///
    /// # Panics
    ///
    /// `position` must be less than `len`. A violated precondition is caught
    /// by a debug assertion, and in any build panics instead of touching
    /// memory outside the allocation.
    pub fn erase(&mut self, position: usize) -> usize {
        debug_assert!(
            position < self.size,
            "erase position {position} >= len {}",
            self.size
        );
        self.buffer[position..self.size].rotate_left(1);
        self.size -= 1;
        position
    }

    /// Marks every element dead. Keeps the allocation and the stale values.
    #[inline]
    pub fn clear(&mut self) {
        self.size = 0;
    }

    /// Exchanges the contents (length, capacity and allocation) of two
    /// arrays in constant time.
    ///
    /// This shadows `<[T]>::swap`; use `as_mut_slice().swap(a, b)` to swap
    /// two elements.
    #[inline]
    pub fn swap(&mut self, other: &mut GrowableArray<T>) {
        std::mem::swap(&mut self.size, &mut other.size);
        self.buffer.swap(&mut other.buffer);
    }

    /// Moves the contents out into a new array, leaving `self` empty with no
    /// allocation.
    #[inline]
    pub fn take(&mut self) -> GrowableArray<T> {
        std::mem::take(self)
    }

    /// Converts the live range into a `Vec`, dropping the dead slots.
    pub fn into_vec(mut self) -> Vec<T> {
        let mut vec = match self.buffer.release() {
            Some(slots) => slots.into_vec(),
            None => Vec::new(),
        };
        vec.truncate(self.size);
        vec
    }

    /// Converts the live range into a boxed slice, dropping the dead slots.
    pub fn into_boxed_slice(self) -> Box<[T]> {
        self.into_vec().into_boxed_slice()
    }
}

impl<T: Default> GrowableArray<T> {
    /// Creates an empty array with exactly `capacity` allocated slots.
    ///
    /// # Errors
    ///
    /// Returns an `Allocation` error if the storage cannot be allocated.
    pub fn with_capacity(capacity: usize) -> Result<GrowableArray<T>> {
        Ok(GrowableArray {
            size: 0,
            buffer: OwnedBuffer::allocate(capacity)?,
        })
    }

    /// Creates an array of `len` default values. Length and capacity are both
    /// `len`.
    pub fn with_len(len: usize) -> Result<GrowableArray<T>> {
        Ok(GrowableArray {
            size: len,
            buffer: OwnedBuffer::allocate(len)?,
        })
    }

    /// Appends `value` at the end, growing the allocation if the array is
    /// full.
    ///
    /// # Errors
    ///
    /// Returns an `Allocation` error if growth is needed and fails; `value`
    /// is dropped and the array is unchanged.
    pub fn push_back(&mut self, value: T) -> Result<()> {
        if self.size == self.capacity() {
            self.reallocate(grown_capacity(self.capacity(), self.size + 1))?;
        }
        self.buffer[self.size] = value;
        self.size += 1;
        Ok(())
    }

    /// Inserts `value` at `position`, shifting the elements from `position`
    /// onwards one slot to the right. `position == len` appends.
    ///
    /// Returns the index of the inserted element.
    ///
    /// # Errors
    ///
    /// Returns an `Allocation` error if growth is needed and fails; the
    /// array is unchanged.
    ///
    /// # Panics
    ///
    /// `position` must not exceed `len`. A violated precondition panics.
    pub fn insert(&mut self, position: usize, value: T) -> Result<usize> {
        debug_assert!(
            position <= self.size,
            "insert position {position} > len {}",
            self.size
        );
        let size = self.size;
        if size == self.capacity() {
            let new_capacity = grown_capacity(self.capacity(), size + 1);
            let mut buffer = self.allocate_for_growth(new_capacity)?;
            let (head, tail) = self.buffer[..size].split_at_mut(position);
            buffer[..position].swap_with_slice(head);
            buffer[position] = value;
            buffer[position + 1..size + 1].swap_with_slice(tail);
            self.install(buffer);
        } else {
            // The dead slot at `size` rotates down into `position`.
            self.buffer[position..size + 1].rotate_right(1);
            self.buffer[position] = value;
        }
        self.size += 1;
        Ok(position)
    }

    /// Changes the length to `new_len`.
    ///
    /// - Shrinking only moves the end of the live range; truncated values
    ///   remain in their dead slots.
    /// - Growing within the capacity overwrites the newly exposed slots with
    ///   default values.
    /// - Growing past the capacity reallocates to
    ///   `max(capacity * 2, new_len)` slots.
    ///
    /// # Errors
    ///
    /// Returns an `Allocation` error if growth is needed and fails; the
    /// array is unchanged.
    pub fn resize(&mut self, new_len: usize) -> Result<()> {
        if new_len <= self.size {
            self.size = new_len;
        } else if new_len <= self.capacity() {
            self.buffer[self.size..new_len].fill_with(T::default);
            self.size = new_len;
        } else {
            // Slots past the live range of a fresh allocation are default
            // values already.
            self.reallocate(grown_capacity(self.capacity(), new_len))?;
            self.size = new_len;
        }
        Ok(())
    }

    /// Grows the allocation to exactly `new_capacity` slots if it is
    /// currently smaller. Never shrinks.
    ///
    /// # Errors
    ///
    /// Returns an `Allocation` error if the storage cannot be allocated; the
    /// array is unchanged.
    pub fn reserve(&mut self, new_capacity: usize) -> Result<()> {
        if new_capacity > self.capacity() {
            self.reallocate(new_capacity)?;
        }
        Ok(())
    }

    /// Moves the live elements into a fresh allocation of `new_capacity`
    /// slots and releases the old one.
    fn reallocate(&mut self, new_capacity: usize) -> Result<()> {
        debug_assert!(new_capacity >= self.size);
        let mut buffer = self.allocate_for_growth(new_capacity)?;
        buffer[..self.size].swap_with_slice(&mut self.buffer[..self.size]);
        self.install(buffer);
        Ok(())
    }

    fn allocate_for_growth(&self, new_capacity: usize) -> Result<OwnedBuffer<T>> {
        log::trace!(
            "growing capacity {} -> {new_capacity} (len {})",
            self.capacity(),
            self.size
        );
        OwnedBuffer::allocate(new_capacity)
    }

    /// Swaps in a fully populated buffer. The old allocation is dropped
    /// together with whatever values it still holds.
    fn install(&mut self, mut buffer: OwnedBuffer<T>) {
        self.buffer.swap(&mut buffer);
    }
}

impl<T: Clone + Default> GrowableArray<T> {
    /// Creates an array holding `len` clones of `value`. Length and capacity
    /// are both `len`.
    pub fn from_elem(value: T, len: usize) -> Result<GrowableArray<T>> {
        let mut buffer = OwnedBuffer::allocate(len)?;
        buffer.fill(value);
        Ok(GrowableArray { size: len, buffer })
    }

    /// Creates an array holding clones of the elements of `items`, in order.
    /// Length and capacity are both `items.len()`.
    pub fn from_slice(items: &[T]) -> Result<GrowableArray<T>> {
        let mut buffer = OwnedBuffer::allocate(items.len())?;
        buffer.clone_from_slice(items);
        Ok(GrowableArray {
            size: items.len(),
            buffer,
        })
    }

    /// Clones the live elements into a new array whose capacity equals the
    /// capacity of `self`.
    ///
    /// # Errors
    ///
    /// Returns an `Allocation` error if the storage cannot be allocated.
    pub fn try_clone(&self) -> Result<GrowableArray<T>> {
        let mut buffer = OwnedBuffer::allocate(self.capacity())?;
        buffer[..self.size].clone_from_slice(self.as_slice());
        Ok(GrowableArray {
            size: self.size,
            buffer,
        })
    }
}

/// Capacity to grow to when at least `required` slots are needed.
///
/// Doubles the current capacity, never returns less than `required` or
/// [`GrowableArray::MIN_NON_ZERO_CAPACITY`]. Saturates on overflow, which
/// turns into an allocation error downstream.
#[inline]
fn grown_capacity(capacity: usize, required: usize) -> usize {
    capacity
        .saturating_mul(GrowableArray::<()>::GROWTH_FACTOR)
        .max(required)
        .max(GrowableArray::<()>::MIN_NON_ZERO_CAPACITY)
}

#[cold]
#[track_caller]
fn alloc_failed(e: Error) -> ! {
    panic!("{e}")
}

impl<T> Default for GrowableArray<T> {
    fn default() -> Self {
        GrowableArray::new()
    }
}

impl<T: Clone + Default> Clone for GrowableArray<T> {
    /// # Panics
    ///
    /// Panics if the allocation fails; use [`GrowableArray::try_clone`] to
    /// handle the error.
    fn clone(&self) -> Self {
        self.try_clone().unwrap_or_else(|e| alloc_failed(e))
    }

    /// Reuses the existing allocation when it can hold the live elements of
    /// `source`; the capacity of `self` is then kept as is.
    fn clone_from(&mut self, source: &Self) {
        if self.capacity() >= source.size {
            self.buffer[..source.size].clone_from_slice(source.as_slice());
            self.size = source.size;
        } else {
            *self = source.clone();
        }
    }
}

impl<T> Deref for GrowableArray<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> DerefMut for GrowableArray<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T> AsRef<[T]> for GrowableArray<T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> AsMut<[T]> for GrowableArray<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T> Borrow<[T]> for GrowableArray<T> {
    fn borrow(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T: fmt::Debug> fmt::Debug for GrowableArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T, U> PartialEq<GrowableArray<U>> for GrowableArray<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &GrowableArray<U>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for GrowableArray<T> {}

impl<T, U> PartialEq<[U]> for GrowableArray<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &[U]) -> bool {
        self.as_slice() == other
    }
}

impl<T, U> PartialEq<&[U]> for GrowableArray<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &&[U]) -> bool {
        self.as_slice() == *other
    }
}

impl<T, U, const N: usize> PartialEq<[U; N]> for GrowableArray<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &[U; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T, U> PartialEq<Vec<U>> for GrowableArray<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &Vec<U>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: PartialOrd> PartialOrd for GrowableArray<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.as_slice().partial_cmp(other.as_slice())
    }
}

impl<T: Ord> Ord for GrowableArray<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl<T: Hash> Hash for GrowableArray<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state)
    }
}

impl<T> From<Vec<T>> for GrowableArray<T> {
    /// Takes over the elements of `vec`; length and capacity both equal
    /// `vec.len()`.
    fn from(vec: Vec<T>) -> Self {
        let size = vec.len();
        GrowableArray {
            size,
            buffer: OwnedBuffer::from_boxed(vec.into_boxed_slice()),
        }
    }
}

impl<T, const N: usize> From<[T; N]> for GrowableArray<T> {
    fn from(items: [T; N]) -> Self {
        GrowableArray::from(Vec::from(items))
    }
}

impl<T: Clone> From<&[T]> for GrowableArray<T> {
    fn from(items: &[T]) -> Self {
        GrowableArray::from(items.to_vec())
    }
}

impl<T> From<Box<[T]>> for GrowableArray<T> {
    fn from(items: Box<[T]>) -> Self {
        GrowableArray {
            size: items.len(),
            buffer: OwnedBuffer::from_boxed(items),
        }
    }
}

impl<T> From<GrowableArray<T>> for Vec<T> {
    fn from(array: GrowableArray<T>) -> Self {
        array.into_vec()
    }
}

impl<T> FromIterator<T> for GrowableArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        GrowableArray::from(iter.into_iter().collect::<Vec<T>>())
    }
}

impl<T: Default> Extend<T> for GrowableArray<T> {
    /// # Panics
    ///
    /// Panics if growing the allocation fails.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        let required = self.size.saturating_add(lower);
        if required > self.capacity() {
            self.reserve(grown_capacity(self.capacity(), required))
                .unwrap_or_else(|e| alloc_failed(e));
        }
        for value in iter {
            self.push_back(value).unwrap_or_else(|e| alloc_failed(e));
        }
    }
}

impl<'a, T: Copy + Default + 'a> Extend<&'a T> for GrowableArray<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied())
    }
}

impl<'a, T> IntoIterator for &'a GrowableArray<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut GrowableArray<T> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T> IntoIterator for GrowableArray<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    /// Yields the live elements by value; dead slots are dropped up front.
    fn into_iter(self) -> Self::IntoIter {
        self.into_vec().into_iter()
    }
}
