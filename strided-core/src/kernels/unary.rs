use crate::element::{cast, Element, FloatElement, Numeric};

pub fn exp<T: Element>(a: &[T], idx: &[usize], out: &mut [T::Float]) {
    for (slot, &i) in out.iter_mut().zip(idx) {
        *slot = cast::<T, T::Float>(a[i]).exp();
    }
}

pub fn log<T: Element>(a: &[T], idx: &[usize], out: &mut [T::Float]) {
    for (slot, &i) in out.iter_mut().zip(idx) {
        *slot = cast::<T, T::Float>(a[i]).ln();
    }
}

pub fn negate<T: Element>(a: &[T], idx: &[usize], out: &mut [T::Arith]) {
    for (slot, &i) in out.iter_mut().zip(idx) {
        *slot = cast::<T, T::Arith>(a[i]).negate();
    }
}

/// Copies `a[idx[i]]` into `out[i]`, converting to the output type.
pub fn gather<T: Element, U: Element>(a: &[T], idx: &[usize], out: &mut [U]) {
    for (slot, &i) in out.iter_mut().zip(idx) {
        *slot = cast::<T, U>(a[i]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_exp_log_promote_integers() {
        let mut out = [0.0f64; 2];
        exp(&[0i32, 1], &[0, 1], &mut out);
        assert_relative_eq!(out[0], 1.0);
        assert_relative_eq!(out[1], std::f64::consts::E);
        log(&[1u8, 0], &[0, 1], &mut out);
        assert_relative_eq!(out[0], 0.0);
        assert!(out[1].is_infinite());
    }

    #[test]
    fn test_negate_and_gather_follow_offsets() {
        let mut neg = [0i32; 3];
        negate(&[1i32, 2, 3], &[2, 1, 0], &mut neg);
        assert_eq!(neg, [-3, -2, -1]);
        let mut copied = [0.0f64; 2];
        gather(&[true, false], &[1, 0], &mut copied);
        assert_eq!(copied, [0.0, 1.0]);
    }
}
