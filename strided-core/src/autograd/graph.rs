use std::collections::HashMap;
use std::sync::Arc;

use crate::autograd::backward_op::Context;
use crate::buffer::SharedBuffer;
use crate::error::StridedError;
use crate::tensor::Tensor;

/// Identity of a tensor in the graph: its buffer address plus its
/// `requires_grad` flag.
///
/// Two shallow copies over one buffer that differ in `requires_grad` are
/// distinct nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeKey {
    buffer: usize,
    requires_grad: bool,
}

impl NodeKey {
    pub(crate) fn new(buffer: &SharedBuffer, requires_grad: bool) -> Self {
        NodeKey {
            buffer: Arc::as_ptr(buffer) as usize,
            requires_grad,
        }
    }
}

#[derive(Debug)]
struct GraphNode {
    context: Context,
    /// Keeps the output buffer alive so its address is not reused while the
    /// node is recorded.
    _output_buffer: SharedBuffer,
}

/// Explicit record of produced tensors and the contexts that made them.
///
/// Differentiable operations take `&mut GraphContext` and register their output
/// here. [`GraphContext::backward`] consumes the whole record: after it returns
/// the graph is empty, whether the pass succeeded or not.
#[derive(Debug, Default)]
pub struct GraphContext {
    nodes: HashMap<NodeKey, GraphNode>,
}

impl GraphContext {
    pub fn new() -> Self {
        GraphContext::default()
    }

    /// Number of recorded nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, tensor: &Tensor) -> bool {
        self.nodes.contains_key(&tensor.node_key())
    }

    /// Registers `output` as produced from the inputs saved in `context`.
    pub(crate) fn record(&mut self, output: &Tensor, context: Context) {
        let (_, _, buffer) = output.parts();
        let key = output.node_key();
        self.nodes.insert(
            key,
            GraphNode {
                context,
                _output_buffer: buffer,
            },
        );
    }

    /// Drops every recorded node.
    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Reverse-mode pass from `output`, seeded with `grad`.
    ///
    /// Nodes are visited depth first, each node's inputs in saved order. A
    /// tensor with no recorded node is a leaf: if it requires grad, `grad` is
    /// added into its accumulator. The graph is cleared once the traversal
    /// ends.
    ///
    /// # Errors
    /// `GradientShapeMismatch` if `grad` does not have the shape of `output`;
    /// the graph is left untouched in that case. Errors raised during the
    /// traversal are returned after the graph has been cleared.
    pub fn backward(&mut self, output: &Tensor, grad: &Tensor) -> Result<(), StridedError> {
        let expected = output.shape();
        let actual = grad.shape();
        if expected != actual {
            return Err(StridedError::GradientShapeMismatch { expected, actual });
        }
        log::debug!("backward: start over {} recorded nodes", self.nodes.len());
        let result = self.traverse(output, grad);
        let cleared = self.nodes.len();
        self.clear();
        log::debug!("backward: end, cleared {} nodes", cleared);
        result
    }

    fn traverse(&self, output: &Tensor, grad: &Tensor) -> Result<(), StridedError> {
        let mut stack = vec![(output.clone(), grad.clone())];
        while let Some((tensor, grad)) = stack.pop() {
            let node = match self.nodes.get(&tensor.node_key()) {
                Some(node) => node,
                None => {
                    if tensor.requires_grad() {
                        tensor.accumulate_grad(&grad)?;
                    }
                    continue;
                }
            };
            let grad_fn = tensor.grad_fn()?;
            let input_grads = grad_fn.backward(&node.context, &grad)?;
            let inputs = node.context.saved_tensors();
            if input_grads.len() != inputs.len() {
                return Err(StridedError::GradientCountMismatch {
                    name: grad_fn.name().to_string(),
                    expected: inputs.len(),
                    actual: input_grads.len(),
                });
            }
            log::trace!("backward: {} -> {} inputs", grad_fn.name(), inputs.len());
            // Reversed so the first saved input is popped first.
            for (input, input_grad) in inputs.iter().zip(input_grads).rev() {
                stack.push((input.clone(), input_grad));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "graph_test.rs"]
mod tests;
