use std::collections::TryReserveError;

use thiserror::Error;

#[derive(Debug, Error)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.0.as_ref()
    }

    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    /// Returns `true` if the storage allocator refused the request.
    pub fn is_allocation(&self) -> bool {
        matches!(self.kind(), ErrorKind::Allocation { .. })
    }

    /// Returns `true` if a checked accessor was called with an index outside
    /// of the live range.
    pub fn is_out_of_range(&self) -> bool {
        matches!(self.kind(), ErrorKind::OutOfRange { .. })
    }

    pub fn allocation(requested: usize, element_size: usize, source: TryReserveError) -> Error {
        Error(
            ErrorKind::Allocation {
                requested,
                element_size,
                source,
            }
            .into(),
        )
    }

    pub fn out_of_range(index: usize, len: usize) -> Error {
        Error(ErrorKind::OutOfRange { index, len }.into())
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("failed to allocate {requested} slots of {element_size} bytes")]
    Allocation {
        requested: usize,
        element_size: usize,
        source: TryReserveError,
    },

    #[error("index {index} is out of range for length {len}")]
    OutOfRange { index: usize, len: usize },
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(kind.into())
    }
}
