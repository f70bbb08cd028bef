/// Scene graph node: a local transform, an optional parent and the
/// (material, mesh) pair it is drawn with.

use glam::{Mat4, Quat, Vec3};
use slotmap::new_key_type;

// ===== SLOT MAP KEY =====

new_key_type! {
    /// Generation-checked handle to a node in a Scene.
    ///
    /// A key whose node was freed resolves to nothing, even after its slot
    /// is reused by another node.
    pub struct NodeKey;
}

// ===== NODE =====

/// A transform in the scene hierarchy
///
/// Position, rotation, scale and parent may change between frames. The
/// mesh and material slots are resolved once at creation and cannot be
/// changed: the node is filed under that pair in the render batches.
#[derive(Debug, Clone)]
pub struct Node {
    pub position: Vec3,
    /// Unit quaternion
    pub rotation: Quat,
    /// Per-axis scale
    pub scale: Vec3,
    /// Parent node; a freed parent is treated as no parent
    pub parent: Option<NodeKey>,
    mesh: u32,
    material: u32,
    /// Set while a resolution pass is running
    pub(crate) visited: bool,
    /// World matrix from the last resolution pass
    pub(crate) world: Mat4,
}

impl Node {
    pub(crate) fn new(mesh: u32, material: u32) -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
            parent: None,
            mesh,
            material,
            visited: false,
            world: Mat4::IDENTITY,
        }
    }

    /// Mesh slot this node is drawn with
    pub fn mesh(&self) -> u32 {
        self.mesh
    }

    /// Material slot this node is drawn with
    pub fn material(&self) -> u32 {
        self.material
    }

    /// Scale, then rotate, then translate
    pub fn local_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// World matrix computed by the last transform resolution
    pub fn world_matrix(&self) -> &Mat4 {
        &self.world
    }

    /// Whether a resolution pass is currently holding this node
    pub fn visited(&self) -> bool {
        self.visited
    }
}

/// Parameters for `Scene::make_node`
///
/// # Example
///
/// ```no_run
/// use orrery_engine::orrery::scene::NodeDesc;
/// use orrery_engine::glam::Vec3;
///
/// let desc = NodeDesc {
///     position: Vec3::new(0.0, 1.0, 0.0),
///     ..NodeDesc::new("crate", "wood")
/// };
/// ```
#[derive(Debug, Clone)]
pub struct NodeDesc {
    /// Registered mesh name
    pub mesh: String,
    /// Registered material name
    pub material: String,
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
    pub parent: Option<NodeKey>,
}

impl NodeDesc {
    /// Identity transform, no parent
    pub fn new(mesh: &str, material: &str) -> Self {
        Self {
            mesh: mesh.to_string(),
            material: material.to_string(),
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
            parent: None,
        }
    }
}
