pub type Result<T> = std::result::Result<T, crate::error::Error>;

/// Returns early with an `OutOfRange` error unless `$index < $len`.
#[macro_export]
macro_rules! verify_index {
    ($index:expr, $len:expr) => {{
        $crate::result::verify_index($index, $len)?;
    }};
}

#[inline]
pub fn verify_index(index: usize, len: usize) -> Result<()> {
    if index < len {
        Ok(())
    } else {
        out_of_range(index, len)
    }
}

#[cold]
pub fn out_of_range(index: usize, len: usize) -> Result<()> {
    Err(crate::error::ErrorKind::OutOfRange { index, len }.into())
}
