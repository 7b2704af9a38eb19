use crate::element::{cast, Element, Numeric};

/// Dense row-major `C = A @ B` for one `rows x inner` by `inner x cols` block.
pub fn matmul<T1: Element, T2: Element, O: Numeric>(
    a: &[T1],
    b: &[T2],
    rows: usize,
    inner: usize,
    cols: usize,
    c: &mut [O],
) {
    for r in 0..rows {
        for col in 0..cols {
            let mut acc = O::zero();
            for k in 0..inner {
                let x = cast::<T1, O>(a[r * inner + k]);
                let y = cast::<T2, O>(b[k * cols + col]);
                acc = acc.plus(x.times(y));
            }
            c[r * cols + col] = acc;
        }
    }
}
