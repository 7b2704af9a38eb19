use crate::element::{cast, Element, Numeric};
use crate::error::StridedError;

#[inline]
fn apply<T1, T2, O, R>(
    a: &[T1],
    idx_a: &[usize],
    b: &[T2],
    idx_b: &[usize],
    out: &mut [R],
    f: impl Fn(O, O) -> R,
) where
    T1: Element,
    T2: Element,
    O: Element,
{
    for (i, slot) in out.iter_mut().enumerate() {
        let x = cast::<T1, O>(a[idx_a[i]]);
        let y = cast::<T2, O>(b[idx_b[i]]);
        *slot = f(x, y);
    }
}

pub fn add<T1: Element, T2: Element, O: Numeric>(
    a: &[T1],
    idx_a: &[usize],
    b: &[T2],
    idx_b: &[usize],
    out: &mut [O],
) {
    apply(a, idx_a, b, idx_b, out, |x: O, y: O| x.plus(y));
}

pub fn subtract<T1: Element, T2: Element, O: Numeric>(
    a: &[T1],
    idx_a: &[usize],
    b: &[T2],
    idx_b: &[usize],
    out: &mut [O],
) {
    apply(a, idx_a, b, idx_b, out, |x: O, y: O| x.minus(y));
}

pub fn multiply<T1: Element, T2: Element, O: Numeric>(
    a: &[T1],
    idx_a: &[usize],
    b: &[T2],
    idx_b: &[usize],
    out: &mut [O],
) {
    apply(a, idx_a, b, idx_b, out, |x: O, y: O| x.times(y));
}

/// Integer division by zero is an error; float division follows IEEE rules.
pub fn divide<T1: Element, T2: Element, O: Numeric>(
    a: &[T1],
    idx_a: &[usize],
    b: &[T2],
    idx_b: &[usize],
    out: &mut [O],
) -> Result<(), StridedError> {
    for (i, slot) in out.iter_mut().enumerate() {
        let x = cast::<T1, O>(a[idx_a[i]]);
        let y = cast::<T2, O>(b[idx_b[i]]);
        *slot = x.divide(y).ok_or(StridedError::DivisionByZero)?;
    }
    Ok(())
}

/// Compares in the promoted type `O`.
pub fn equal<T1: Element, T2: Element, O: Element>(
    a: &[T1],
    idx_a: &[usize],
    b: &[T2],
    idx_b: &[usize],
    out: &mut [bool],
) {
    apply(a, idx_a, b, idx_b, out, |x: O, y: O| x == y);
}

pub fn not_equal<T1: Element, T2: Element, O: Element>(
    a: &[T1],
    idx_a: &[usize],
    b: &[T2],
    idx_b: &[usize],
    out: &mut [bool],
) {
    apply(a, idx_a, b, idx_b, out, |x: O, y: O| x != y);
}
