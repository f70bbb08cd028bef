/// Material → mesh → nodes batching table.
///
/// Every node is filed once, at insert flush, under the (material, mesh)
/// pair it was created with. Buckets are never pruned: a freed node's key
/// stays in its bucket and is skipped by the consumer through the pool's
/// liveness check.

use crate::error::Result;
use crate::scene::node::NodeKey;

/// One non-empty bucket of the table
#[derive(Debug, Clone, Copy)]
pub struct Batch<'a> {
    pub material: u32,
    pub mesh: u32,
    /// Registered keys, possibly stale
    pub nodes: &'a [NodeKey],
}

#[derive(Default)]
pub struct RenderBatches {
    /// Indexed by material slot, then mesh slot
    table: Vec<Vec<Vec<NodeKey>>>,
    entries: usize,
}

impl RenderBatches {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `key` to bucket `[material][mesh]`
    ///
    /// Both dimensions grow on demand.
    ///
    /// # Errors
    ///
    /// `Error::OutOfMemory` when the table cannot grow. The key is not
    /// registered in that case.
    pub fn register(&mut self, key: NodeKey, material: u32, mesh: u32) -> Result<()> {
        let material = material as usize;
        let mesh = mesh as usize;

        if self.table.len() <= material {
            self.table.try_reserve(material + 1 - self.table.len())?;
            self.table.resize_with(material + 1, Vec::new);
        }
        let meshes = &mut self.table[material];
        if meshes.len() <= mesh {
            meshes.try_reserve(mesh + 1 - meshes.len())?;
            meshes.resize_with(mesh + 1, Vec::new);
        }
        let bucket = &mut meshes[mesh];
        bucket.try_reserve(1)?;
        bucket.push(key);

        self.entries += 1;
        Ok(())
    }

    /// Non-empty buckets, material ascending then mesh ascending
    pub fn iter(&self) -> impl Iterator<Item = Batch<'_>> {
        self.table.iter().enumerate().flat_map(|(material, meshes)| {
            meshes
                .iter()
                .enumerate()
                .filter(|(_, nodes)| !nodes.is_empty())
                .map(move |(mesh, nodes)| Batch {
                    material: material as u32,
                    mesh: mesh as u32,
                    nodes,
                })
        })
    }

    /// Number of keys filed under (material, mesh), stale ones included
    pub fn bucket_len(&self, material: u32, mesh: u32) -> usize {
        self.table
            .get(material as usize)
            .and_then(|meshes| meshes.get(mesh as usize))
            .map_or(0, Vec::len)
    }

    /// Number of keys in the whole table, stale ones included
    pub fn total_entries(&self) -> usize {
        self.entries
    }
}

#[cfg(test)]
#[path = "render_batches_tests.rs"]
mod tests;
