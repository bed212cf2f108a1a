/// Creates a [`GrowableArray`](crate::GrowableArray) from a list of elements
/// or from an element and a count, like `vec!`.
///
/// - `simple_vec![a, b, c]` moves the elements in order; length and capacity
///   both equal the number of elements.
/// - `simple_vec![value; n]` holds `n` clones of `value`.
///
/// # Panics
///
/// Panics if the allocation fails. Use [`GrowableArray::from_elem`](crate::GrowableArray::from_elem)
/// to handle the error instead.
#[macro_export]
macro_rules! simple_vec {
    () => {
        $crate::GrowableArray::new()
    };
    ($elem:expr; $n:expr) => {
        match $crate::GrowableArray::from_elem($elem, $n) {
            Ok(v) => v,
            Err(e) => panic!("{e}"),
        }
    };
    ($($x:expr),+ $(,)?) => {
        $crate::GrowableArray::from([$($x),+])
    };
}

#[cfg(test)]
mod tests {
    use crate::GrowableArray;

    #[test]
    fn test_simple_vec_forms() {
        let empty: GrowableArray<u8> = simple_vec![];
        assert!(empty.is_empty());
        assert_eq!(empty.capacity(), 0);

        let v = simple_vec![1, 2, 3];
        assert_eq!(v.len(), 3);
        assert_eq!(v.capacity(), 3);
        assert_eq!(v, [1, 2, 3]);

        let v = simple_vec!["ab".to_string(); 4];
        assert_eq!(v.len(), 4);
        assert!(v.iter().all(|s| s == "ab"));

        let v = simple_vec![7u16,];
        assert_eq!(v, [7]);
    }
}
