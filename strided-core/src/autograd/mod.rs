//! Reverse-mode automatic differentiation.
//!
//! A differentiable operation saves its inputs in a [`Context`], runs its
//! evaluator, and, when any input requires gradients, marks the output as
//! produced (`requires_grad`, not a leaf, `grad_fn` set) and registers it in an
//! explicit [`GraphContext`]. `GraphContext::backward` walks the record and
//! accumulates into leaf gradients.

use std::sync::Arc;

use crate::error::StridedError;
use crate::tensor::Tensor;

pub mod backward_op;
pub mod graph;

pub use backward_op::{BackwardFn, Context};
pub use graph::{GraphContext, NodeKey};

/// Runs `forward` and records its output in `graph` when any of `inputs`
/// requires gradients.
///
/// Nothing is registered if `forward` fails.
pub(crate) fn apply<B, F>(
    graph: &mut GraphContext,
    inputs: &[&Tensor],
    backward: B,
    forward: F,
) -> Result<Tensor, StridedError>
where
    B: BackwardFn + 'static,
    F: FnOnce() -> Result<Tensor, StridedError>,
{
    let name = backward.name();
    let mut ctx = Context::new();
    for input in inputs {
        ctx.save_for_backward(input);
    }
    let output = forward()?;
    let requires_grad = inputs.iter().any(|t| t.requires_grad());
    {
        let mut guard = output.write_data();
        guard.flags.is_leaf = false;
        if requires_grad {
            guard.flags.requires_grad = true;
            guard.grad_fn = Some(Arc::new(backward));
        }
    }
    if requires_grad {
        log::debug!("graph: recorded {} over {} inputs", name, ctx.len());
        graph.record(&output, ctx);
    }
    Ok(output)
}
