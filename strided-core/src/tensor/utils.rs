use crate::error::StridedError;
use std::cmp::max;

/// Number of elements described by `shape`. The empty shape holds one element.
pub fn shape_to_size(shape: &[usize]) -> usize {
    shape.iter().product()
}

/// Calculates the row-major strides for a given shape.
/// Strides represent the number of elements to skip in the flattened data array
/// to move one step along each dimension.
///
/// Example:
/// shape = [2, 3] -> strides = [3, 1]
/// shape = [2, 2, 2] -> strides = [4, 2, 1]
pub fn calculate_strides(shape: &[usize]) -> Vec<usize> {
    if shape.is_empty() {
        return vec![];
    }
    let rank = shape.len();
    let mut strides = vec![1; rank];
    for i in (0..rank - 1).rev() {
        strides[i] = strides[i + 1] * shape[i + 1];
    }
    strides
}

/// Converts a linear (row-major) index into coordinates of `shape`.
///
/// Fails with `UnravelIndexOutOfDomain` if the index does not fit the shape.
pub fn unravel_index(index: usize, shape: &[usize]) -> Result<Vec<usize>, StridedError> {
    if index >= shape_to_size(shape) {
        return Err(StridedError::UnravelIndexOutOfDomain {
            index,
            shape: shape.to_vec(),
        });
    }
    let mut coords = vec![0; shape.len()];
    let mut quotient = index;
    for i in (0..shape.len()).rev() {
        coords[i] = quotient % shape[i];
        quotient /= shape[i];
    }
    Ok(coords)
}

/// Right-aligned NumPy rule: every trailing dimension pair up to the shorter
/// rank must match, or one side must be 1.
pub fn is_broadcastable(shape_a: &[usize], shape_b: &[usize]) -> bool {
    shape_a
        .iter()
        .rev()
        .zip(shape_b.iter().rev())
        .all(|(&a, &b)| a == b || a == 1 || b == 1)
}

/// Determines the output shape resulting from broadcasting two input shapes.
///
/// 1. If the shapes have different numbers of dimensions, prepend 1s to the shorter shape.
/// 2. Compare dimensions element-wise from right to left.
/// 3. Dimensions are compatible if they are equal, or one of them is 1.
/// 4. The resulting dimension is the maximum of the two compared dimensions.
pub fn broadcast_shapes(shape_a: &[usize], shape_b: &[usize]) -> Result<Vec<usize>, StridedError> {
    if !is_broadcastable(shape_a, shape_b) {
        return Err(StridedError::BroadcastError {
            shape1: shape_a.to_vec(),
            shape2: shape_b.to_vec(),
        });
    }
    let rank_a = shape_a.len();
    let rank_b = shape_b.len();
    let max_rank = max(rank_a, rank_b);
    let mut result_shape = vec![0; max_rank];

    for i in 0..max_rank {
        let dim_a = shape_a.get(rank_a.wrapping_sub(1 + i)).copied().unwrap_or(1);
        let dim_b = shape_b.get(rank_b.wrapping_sub(1 + i)).copied().unwrap_or(1);
        // A size-1 dim stretches to the other; a 0 paired with 1 stays 0.
        result_shape[max_rank - 1 - i] = if dim_a == 1 { dim_b } else { dim_a };
    }
    Ok(result_shape)
}

/// Checks `axis` against `rank`.
pub(crate) fn check_axis(axis: usize, rank: usize) -> Result<(), StridedError> {
    if axis >= rank {
        return Err(StridedError::InvalidAxis { axis, rank });
    }
    Ok(())
}
