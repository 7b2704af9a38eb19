//! Neural-network building blocks composed from recorded operations.

pub mod activation;
pub mod layers;
pub mod losses;
pub mod module;

pub use activation::LogSoftmax;
pub use layers::Linear;
pub use losses::{MSELoss, NLLLoss, Reduction};
pub use module::Module;
