//! Broadcasting arithmetic: `+`, `-`, `*`, `/` and unary negation.
//!
//! The result dtype is the promotion of the operand dtypes, with booleans
//! computed as `uint8`.

pub mod add;
pub mod div;
pub mod mul;
pub mod neg;
pub mod sub;

pub use add::{add, add_op};
pub use div::{divide, div_op};
pub use mul::{mul_op, multiply};
pub use neg::{neg_op, negate};
pub use sub::{sub_op, subtract};
