use strided_core::tensor::utils::{
    broadcast_shapes, calculate_strides, is_broadcastable, shape_to_size, unravel_index,
};
use strided_core::StridedError;

#[test]
fn test_shape_to_size() {
    assert_eq!(shape_to_size(&[]), 1);
    assert_eq!(shape_to_size(&[2, 3, 4]), 24);
    assert_eq!(shape_to_size(&[2, 0, 4]), 0);
}

#[test]
fn test_calculate_strides() {
    assert_eq!(calculate_strides(&[2, 3, 4]), vec![12, 4, 1]);
    assert_eq!(calculate_strides(&[5]), vec![1]);
    assert!(calculate_strides(&[]).is_empty());
}

#[test]
fn test_unravel_index() {
    assert_eq!(unravel_index(23, &[2, 3, 4]).unwrap(), vec![1, 2, 3]);
    assert_eq!(unravel_index(0, &[]).unwrap(), Vec::<usize>::new());
    assert!(matches!(
        unravel_index(24, &[2, 3, 4]),
        Err(StridedError::UnravelIndexOutOfDomain { .. })
    ));
}

#[test]
fn test_broadcast_law() {
    let cases: [(&[usize], &[usize]); 6] = [
        (&[2, 3], &[3]),
        (&[4, 1, 3], &[2, 1]),
        (&[1], &[5, 5]),
        (&[], &[2, 2]),
        (&[2, 3], &[3, 2]),
        (&[0, 1], &[1, 7]),
    ];
    for (a, b) in cases {
        let compatible = is_broadcastable(a, b);
        assert_eq!(compatible, is_broadcastable(b, a));
        match broadcast_shapes(a, b) {
            Ok(shape) => {
                assert!(compatible);
                assert_eq!(shape, broadcast_shapes(b, a).unwrap());
                assert_eq!(shape.len(), a.len().max(b.len()));
                for (i, &dim) in shape.iter().rev().enumerate() {
                    let da = a.len().checked_sub(i + 1).map_or(1, |j| a[j]);
                    let db = b.len().checked_sub(i + 1).map_or(1, |j| b[j]);
                    assert!(dim == da || da == 1);
                    assert!(dim == db || db == 1);
                }
            }
            Err(err) => {
                assert!(!compatible);
                assert!(matches!(err, StridedError::BroadcastError { .. }));
            }
        }
    }
    assert_eq!(broadcast_shapes(&[0, 1], &[1, 7]).unwrap(), vec![0, 7]);
}
