//! A growable array container built on an exclusively owned heap buffer.
//!
//! [`GrowableArray`] tracks a logical length (the live elements) separately
//! from the size of its allocation (the capacity), grows by doubling, and
//! reports allocation failures as errors instead of aborting.
//!
//! ```
//! use simple_vector::{GrowableArray, simple_vec};
//!
//! let mut v = GrowableArray::new();
//! v.push_back(1).unwrap();
//! v.push_back(2).unwrap();
//! v.push_back(3).unwrap();
//! v.insert(1, 9).unwrap();
//! assert_eq!(v, simple_vec![1, 9, 2, 3]);
//!
//! v.erase(0);
//! v.resize(5).unwrap();
//! assert_eq!(v, [9, 2, 3, 0, 0]);
//! assert!(v.at(10).unwrap_err().is_out_of_range());
//! ```

pub mod growable_array;
mod macros;

pub use growable_array::GrowableArray;
pub use simple_vector_common::{Error, ErrorKind, Result};
