use crate::element::{cast, Element, Numeric};

/// Adds `n` elements of `a` spaced `stride` apart into `out`, in the
/// accumulator's type.
pub fn sum<T: Element, O: Numeric>(a: &[T], stride: usize, n: usize, out: &mut O) {
    for i in 0..n {
        *out = out.plus(cast::<T, O>(a[i * stride]));
    }
}

/// Clears `out` unless all `n` elements spaced `stride` apart are non-zero.
pub fn all<T: Element>(a: &[T], stride: usize, n: usize, out: &mut bool) {
    for i in 0..n {
        if !a[i * stride].is_nonzero() {
            *out = false;
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sum_accumulates_with_stride() {
        let data = [1i32, 2, 3, 4, 5, 6];
        let mut out = 100i32;
        sum(&data, 2, 3, &mut out);
        assert_eq!(out, 100 + 1 + 3 + 5);
    }

    #[test]
    fn test_all_with_stride() {
        let data = [1.0f64, 0.0, 2.0, 0.0];
        let mut out = true;
        all(&data, 2, 2, &mut out);
        assert!(out);
        all(&data[1..], 2, 2, &mut out);
        assert!(!out);
    }
}
