//! Shared planning for single-axis reductions.

use crate::error::StridedError;
use crate::tensor::utils::check_axis;
use crate::tensor_data::ArrayDesc;

/// Where each output element's reduction run starts, and how to walk it.
///
/// Output element `i` reduces `len` input elements starting at `bases[i]`,
/// spaced `stride` apart.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ReductionPlan {
    pub out_shape: Vec<usize>,
    pub bases: Vec<usize>,
    pub stride: usize,
    pub len: usize,
}

/// Plans a reduction of `desc` along `axis`, or over everything for `None`.
///
/// Reducing everything walks the buffer linearly from `desc.offset`, so the
/// caller must hand in a contiguous descriptor in that case. The full
/// reduction produces shape `[1]`; an axis reduction drops that axis.
pub(crate) fn plan_reduction(
    desc: &ArrayDesc,
    axis: Option<usize>,
) -> Result<ReductionPlan, StridedError> {
    let axis = match axis {
        None => {
            return Ok(ReductionPlan {
                out_shape: vec![1],
                bases: vec![desc.offset],
                stride: 1,
                len: desc.numel(),
            })
        }
        Some(axis) => axis,
    };
    check_axis(axis, desc.rank())?;
    let mut outer = desc.clone();
    let len = outer.shape.remove(axis);
    let stride = outer.strides.remove(axis);
    Ok(ReductionPlan {
        bases: outer.offsets(),
        out_shape: outer.shape,
        stride,
        len,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_axis_reduction() {
        let desc = ArrayDesc::contiguous(vec![2, 3]);
        let rows = plan_reduction(&desc, Some(1)).unwrap();
        assert_eq!(rows.out_shape, vec![2]);
        assert_eq!(rows.bases, vec![0, 3]);
        assert_eq!((rows.stride, rows.len), (1, 3));

        let cols = plan_reduction(&desc, Some(0)).unwrap();
        assert_eq!(cols.out_shape, vec![3]);
        assert_eq!(cols.bases, vec![0, 1, 2]);
        assert_eq!((cols.stride, cols.len), (3, 2));
    }

    #[test]
    fn test_plan_full_reduction() {
        let desc = ArrayDesc::contiguous(vec![2, 2, 2]);
        let plan = plan_reduction(&desc, None).unwrap();
        assert_eq!(plan.out_shape, vec![1]);
        assert_eq!(plan.bases, vec![0]);
        assert_eq!(plan.len, 8);
    }

    #[test]
    fn test_plan_rejects_bad_axis() {
        let desc = ArrayDesc::contiguous(vec![4]);
        assert_eq!(
            plan_reduction(&desc, Some(1)),
            Err(StridedError::InvalidAxis { axis: 1, rank: 1 })
        );
    }
}
