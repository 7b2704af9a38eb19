//! Loss functions.

pub mod mse;
pub mod nll;

pub use mse::MSELoss;
pub use nll::NLLLoss;

/// How per-element losses are combined into the returned value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Reduction {
    #[default]
    Mean,
    Sum,
}
