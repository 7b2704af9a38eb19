//! Element-wise transcendental functions.
//!
//! Integer and boolean inputs are computed in `f64`; complex inputs stay
//! complex.

pub mod exp;
pub mod ln;

pub use exp::{exp, exp_op};
pub use ln::{ln_op, log};
