/// World transform resolution for the node hierarchy.
///
/// Nodes are visited in pool order, not root-first. For each node not yet
/// resolved this pass, the unresolved part of its parent chain is pushed
/// on an explicit stack (no recursion, so hierarchy depth never touches
/// the call stack) and resolved root-to-leaf, seeded by the first ancestor
/// already resolved. Each node's world matrix is computed once per pass.
///
/// `world = parent_world * local`: with glam's column vectors a point is
/// transformed by the local matrix first, then by the parent chain.
///
/// A parent cycle is not detected. The walk stops at the first node it
/// has already marked, so it terminates, but the matrices produced for
/// the cycle are meaningless.

use glam::Mat4;
use crate::scene::node::{Node, NodeKey};
use crate::utils::NodePool;

/// Scratch storage reused across passes
#[derive(Default)]
pub struct TransformResolver {
    order: Vec<NodeKey>,
    stack: Vec<NodeKey>,
}

impl TransformResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute the world matrix of every live node
    ///
    /// Every visited flag is false again when this returns.
    pub fn resolve_all_transforms(&mut self, nodes: &mut NodePool<NodeKey, Node>) {
        self.order.clear();
        self.order.extend(nodes.keys());

        for &key in &self.order {
            let Some(node) = nodes.get(key) else { continue };
            if node.visited {
                continue;
            }

            // walk up until a root, a freed parent or an already resolved ancestor
            let mut parent_world = Mat4::IDENTITY;
            let mut next = node.parent;
            self.stack.clear();
            while let Some(parent_key) = next {
                let Some(parent) = nodes.get_mut(parent_key) else { break };
                if parent.visited {
                    parent_world = parent.world;
                    break;
                }
                parent.visited = true;
                self.stack.push(parent_key);
                next = parent.parent;
            }

            // root-to-leaf
            while let Some(ancestor_key) = self.stack.pop() {
                if let Some(ancestor) = nodes.get_mut(ancestor_key) {
                    ancestor.world = parent_world * ancestor.local_matrix();
                    parent_world = ancestor.world;
                }
            }

            if let Some(node) = nodes.get_mut(key) {
                node.world = parent_world * node.local_matrix();
                node.visited = true;
            }
        }

        for (_, node) in nodes.iter_mut() {
            node.visited = false;
        }
    }
}

#[cfg(test)]
#[path = "transform_resolver_tests.rs"]
mod tests;
