//! Exclusively owned heap storage for the simple-vector containers.
//!
//! [`OwnedBuffer`] holds zero or one contiguous allocation of `T` slots and
//! knows nothing about how many of them are logically in use: that
//! bookkeeping belongs to the container that owns the buffer.

pub mod owned_buffer;

pub use owned_buffer::OwnedBuffer;
