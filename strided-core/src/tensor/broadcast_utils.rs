use crate::buffer::{read_buffer, Buffer};
use crate::dispatch::{dispatch_assign, AssignVisitor};
use crate::element::{cast, Element};
use crate::error::StridedError;
use crate::ops::reduction::sum_op;
use crate::tensor::Tensor;
use crate::tensor_data::ArrayDesc;
use crate::types::DType;

/// Element-wise copy along two offset arrays, converting to the destination type.
struct StridedAssign<'a> {
    src_offsets: &'a [usize],
    dst_offsets: &'a [usize],
}

impl AssignVisitor for StridedAssign<'_> {
    type Output = ();

    fn visit<D: Element, S: Element>(&mut self, dst: &mut [D], src: &[S]) {
        for (&d, &s) in self.dst_offsets.iter().zip(self.src_offsets) {
            dst[d] = cast::<S, D>(src[s]);
        }
    }
}

fn check_offsets(offsets: &[usize], len: usize) -> Result<(), StridedError> {
    match offsets.iter().copied().max() {
        Some(index) if index >= len => Err(StridedError::BufferIndexOutOfBounds { index, len }),
        _ => Ok(()),
    }
}

/// Copies `src` (read through `src_desc`) into the `dst_desc` region of `dst`.
///
/// Every destination coordinate reads the source at the same trailing
/// coordinates; size-1 source dims repeat through stride 0. This is the one
/// mechanism that materializes broadcast or re-strided data.
pub fn strided_copy(
    src: &Buffer,
    src_desc: &ArrayDesc,
    dst: &mut Buffer,
    dst_desc: &ArrayDesc,
) -> Result<(), StridedError> {
    let aligned = src_desc.align_to(&dst_desc.shape)?;
    let src_offsets = aligned.offsets();
    let dst_offsets = dst_desc.offsets();
    check_offsets(&src_offsets, src.len())?;
    check_offsets(&dst_offsets, dst.len())?;
    dispatch_assign(
        dst,
        src,
        &mut StridedAssign {
            src_offsets: &src_offsets,
            dst_offsets: &dst_offsets,
        },
    );
    Ok(())
}

/// Fresh row-major buffer holding the elements of `desc`, converted to `dtype`.
pub fn materialize(src: &Buffer, desc: &ArrayDesc, dtype: DType) -> Result<Buffer, StridedError> {
    let numel = desc.numel();
    if desc.is_contiguous() && desc.offset == 0 && src.len() == numel {
        return src.convert(dtype);
    }
    let mut out = Buffer::allocate(dtype, numel)?;
    strided_copy(src, desc, &mut out, &ArrayDesc::contiguous(desc.shape.clone()))?;
    Ok(out)
}

impl Tensor {
    /// Contiguous copy of this tensor's elements as a bare buffer.
    pub(crate) fn materialize(&self, dtype: DType) -> Result<Buffer, StridedError> {
        let (_, desc, buffer) = self.parts();
        let guard = read_buffer(&buffer);
        materialize(&guard, &desc, dtype)
    }

    /// Sums a broadcast gradient back down to `target_shape`.
    ///
    /// Extra leading dims are summed away, then every target dim of size 1
    /// that was stretched is summed and re-inserted.
    pub fn reduce_to_shape(&self, target_shape: &[usize]) -> Result<Tensor, StridedError> {
        let mismatch = || StridedError::ShapeMismatch {
            expected: target_shape.to_vec(),
            actual: self.shape(),
            operation: "reduce_to_shape".to_string(),
        };
        let mut current = self.clone();
        if current.shape() == target_shape {
            return Ok(current);
        }
        if current.rank() < target_shape.len() {
            return Err(mismatch());
        }
        while current.rank() > target_shape.len() {
            current = sum_op(&current, Some(0))?;
        }
        for (axis, &target_dim) in target_shape.iter().enumerate() {
            let dim = current.shape()[axis];
            if dim == target_dim {
                continue;
            }
            if target_dim != 1 {
                return Err(mismatch());
            }
            let mut kept = current.shape();
            kept[axis] = 1;
            current = sum_op(&current, Some(axis))?.reshape(kept)?;
        }
        Ok(current)
    }
}
