/// Scene: the node pool, its render batches and the transform resolver.
///
/// Node creation and removal are deferred: `make_node` and `remove_node`
/// only queue the change, `flush` applies it. Between two flushes the set
/// of live nodes is stable, so the resolver and the frame builder can walk
/// the pool and the batches without seeing it change underneath them.

use crate::engine_debug;
use crate::error::{Error, Result};
use crate::resource::ResourceManager;
use crate::utils::NodePool;
use super::node::{Node, NodeDesc, NodeKey};
use super::render_batches::RenderBatches;
use super::transform_resolver::TransformResolver;

pub struct Scene {
    nodes: NodePool<NodeKey, Node>,
    batches: RenderBatches,
    resolver: TransformResolver,
}

impl Scene {
    /// Create an empty scene holding at most `max_nodes` nodes
    pub fn new(max_nodes: usize) -> Self {
        Self {
            nodes: NodePool::with_capacity(max_nodes),
            batches: RenderBatches::new(),
            resolver: TransformResolver::new(),
        }
    }

    /// Queue a new node drawn with the named mesh and material
    ///
    /// The node becomes visible to lookups and drawing at the next `flush`.
    ///
    /// # Errors
    ///
    /// * `Error::MeshNotFound` - no mesh registered under `desc.mesh`
    /// * `Error::MaterialNotFound` - the mesh exists but no material is
    ///   registered under `desc.material`
    /// * `Error::OutOfMemory` - the pool is full
    ///
    /// No node is created on error.
    pub fn make_node(&mut self, resources: &ResourceManager, desc: NodeDesc) -> Result<NodeKey> {
        let mesh = resources
            .mesh_slot(&desc.mesh)
            .ok_or_else(|| Error::MeshNotFound(desc.mesh.clone()))?;
        let material = resources
            .material_slot(&desc.material)
            .ok_or_else(|| Error::MaterialNotFound(desc.material.clone()))?;

        let mut node = Node::new(mesh, material);
        node.position = desc.position;
        node.rotation = desc.rotation;
        node.scale = desc.scale;
        node.parent = desc.parent;
        self.nodes.insert_deferred(node)
    }

    /// Queue removal of a node
    ///
    /// Returns `false` for an unknown or already freed key. The node stays
    /// visible until the next `flush`.
    pub fn remove_node(&mut self, key: NodeKey) -> Result<bool> {
        self.nodes.free_deferred(key)
    }

    /// Apply queued removals, then queued insertions
    ///
    /// Every node made live is filed in the render batches.
    ///
    /// # Errors
    ///
    /// `Error::OutOfMemory` when the pool or the batches cannot grow. Nodes
    /// not yet filed stay queued and are filed by the next successful
    /// flush.
    pub fn flush(&mut self) -> Result<()> {
        self.nodes.flush_frees();
        self.nodes.flush_inserts()?;

        let nodes = &self.nodes;
        let batches = &mut self.batches;
        let (filed, result) = file_in_order(nodes.pending_inserts(), |key| match nodes.get(key) {
            Some(node) => batches.register(key, node.material(), node.mesh()),
            // freed before it could be filed
            None => Ok(()),
        });
        self.nodes.consume_pending_inserts(filed);

        if filed > 0 {
            engine_debug!("orrery::Scene", "Flushed {} new node(s), {} live",
                filed, self.nodes.len());
        }
        result
    }

    /// Recompute every live node's world matrix
    pub fn resolve_transforms(&mut self) {
        self.resolver.resolve_all_transforms(&mut self.nodes);
    }

    // ===== ACCESSORS =====

    pub fn node(&self, key: NodeKey) -> Option<&Node> {
        self.nodes.get(key)
    }

    pub fn node_mut(&mut self, key: NodeKey) -> Option<&mut Node> {
        self.nodes.get_mut(key)
    }

    pub fn nodes(&self) -> &NodePool<NodeKey, Node> {
        &self.nodes
    }

    pub fn batches(&self) -> &RenderBatches {
        &self.batches
    }

    /// Number of live nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

/// Pass `keys` to `register` in order, stopping at the first error
///
/// Returns how many keys were filed along with the outcome. On error the
/// failing key is not counted.
fn file_in_order<F>(keys: &[NodeKey], mut register: F) -> (usize, Result<()>)
where
    F: FnMut(NodeKey) -> Result<()>,
{
    for (filed, &key) in keys.iter().enumerate() {
        if let Err(err) = register(key) {
            return (filed, Err(err));
        }
    }
    (keys.len(), Ok(()))
}

#[cfg(test)]
#[path = "scene_tests.rs"]
mod tests;
