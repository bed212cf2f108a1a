use std::collections::HashSet;

use simple_vector::{ErrorKind, GrowableArray, simple_vec};

#[test]
fn test_push_insert_erase_resize_scenario() {
    let mut v = GrowableArray::new();
    v.push_back(1).unwrap();
    v.push_back(2).unwrap();
    v.push_back(3).unwrap();
    assert_eq!(v.len(), 3);
    assert!(v.capacity() >= 3);
    assert_eq!(v, [1, 2, 3]);

    assert_eq!(v.insert(1, 9).unwrap(), 1);
    assert_eq!(v, [1, 9, 2, 3]);
    assert_eq!(v.len(), 4);

    assert_eq!(v.erase(0), 0);
    assert_eq!(v, [9, 2, 3]);
    assert_eq!(v.len(), 3);

    v.resize(5).unwrap();
    assert_eq!(v, [9, 2, 3, 0, 0]);
    assert_eq!(v.len(), 5);

    let err = v.at(10).unwrap_err();
    match err.kind() {
        ErrorKind::OutOfRange { index, len } => {
            assert_eq!(*index, 10);
            assert_eq!(*len, 5);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_slice_api_through_deref() {
    let mut v = simple_vec![5, 3, 9, 1];
    v.sort_unstable();
    assert_eq!(v, [1, 3, 5, 9]);
    assert_eq!(v.first(), Some(&1));
    assert_eq!(v.last(), Some(&9));
    assert!(v.contains(&5));
    assert_eq!(v.binary_search(&9), Ok(3));
    v.as_mut_slice().swap(0, 3);
    assert_eq!(v, [9, 3, 5, 1]);
    assert_eq!(v.iter().sum::<i32>(), 18);
}

#[test]
fn test_iteration_forms() {
    let mut v = GrowableArray::with_capacity(8).unwrap();
    v.extend(["a", "b", "c"].map(String::from));

    for s in &mut v {
        s.push('!');
    }
    let joined: Vec<&str> = (&v).into_iter().map(String::as_str).collect();
    assert_eq!(joined, ["a!", "b!", "c!"]);

    let owned: Vec<String> = v.into_iter().collect();
    assert_eq!(owned, ["a!", "b!", "c!"]);
}

#[test]
fn test_hash_follows_live_elements() {
    let mut a = GrowableArray::with_capacity(16).unwrap();
    a.extend([1u8, 2, 3]);
    let b = simple_vec![1u8, 2, 3];

    let mut set = HashSet::new();
    set.insert(a);
    assert!(set.contains(&b));
}

#[test]
fn test_sorting_arrays() {
    let mut arrays = vec![
        simple_vec![2, 1],
        simple_vec![1, 2, 3],
        GrowableArray::new(),
        simple_vec![1, 2],
    ];
    arrays.sort();
    assert_eq!(
        arrays,
        vec![
            GrowableArray::new(),
            simple_vec![1, 2],
            simple_vec![1, 2, 3],
            simple_vec![2, 1],
        ]
    );
}

#[test]
fn test_nested_arrays() {
    let mut outer: GrowableArray<GrowableArray<i32>> = GrowableArray::new();
    for i in 0..5 {
        let inner = GrowableArray::from_elem(i, i as usize).unwrap();
        outer.push_back(inner).unwrap();
    }
    outer.insert(0, simple_vec![42]).unwrap();
    assert_eq!(outer.len(), 6);
    assert_eq!(outer[0], [42]);
    assert_eq!(outer[5], [4, 4, 4, 4]);

    let copy = outer.try_clone().unwrap();
    assert_eq!(copy, outer);
}

#[test]
fn test_allocation_error_reports_request() {
    let mut v = GrowableArray::<u32>::new();
    let err = v.reserve(usize::MAX).unwrap_err();
    match err.into_kind() {
        ErrorKind::Allocation {
            requested,
            element_size,
            ..
        } => {
            assert_eq!(requested, usize::MAX);
            assert_eq!(element_size, 4);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(GrowableArray::<u32>::with_capacity(usize::MAX).is_err());
    assert!(GrowableArray::from_elem(0u32, usize::MAX).is_err());
}
