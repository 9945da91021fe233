use crate::autograd::operation::Operation;
use crate::tensor::Tensor;
use std::collections::HashSet;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Creation counter shared by every node. Ids only ever grow, so a node's inputs
/// always carry smaller ids than the node itself.
static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(0);

/// Identifier of a node in the computation graph, assigned in creation order.
pub type NodeId = u64;

/// One recorded operation in the computation graph.
///
/// A node is stored in the `grad_fn` of the tensor it produced and keeps strong
/// handles to its inputs. Edges therefore only point from newer nodes to older
/// tensors and the graph cannot contain a cycle.
pub struct Node {
    id: NodeId,
    op: Operation,
    inputs: Vec<Tensor>,
}

impl Node {
    pub(crate) fn new(op: Operation, inputs: Vec<Tensor>) -> Self {
        Node {
            id: NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed),
            op,
            inputs,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn op(&self) -> &Operation {
        &self.op
    }

    /// Inputs in the order the operation consumed them.
    pub fn inputs(&self) -> &[Tensor] {
        &self.inputs
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("op", &self.op.name())
            .field("inputs", &self.inputs.len())
            .finish()
    }
}

/// Collects every node reachable backwards from `root`, newest first.
///
/// Visiting in decreasing creation id is a valid reverse topological order:
/// a node is always created after all nodes that produced its inputs.
pub(crate) fn reverse_creation_order(root: &Arc<Node>) -> Vec<Arc<Node>> {
    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut stack = vec![Arc::clone(root)];
    let mut nodes = Vec::new();

    while let Some(node) = stack.pop() {
        if !visited.insert(node.id) {
            continue;
        }
        for input in node.inputs.iter() {
            if let Some(parent) = input.grad_fn() {
                if !visited.contains(&parent.id) {
                    stack.push(parent);
                }
            }
        }
        nodes.push(node);
    }

    nodes.sort_unstable_by(|a, b| b.id.cmp(&a.id));
    nodes
}
