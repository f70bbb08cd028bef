/// SceneRenderer: owns the scene, its resources, the camera and the
/// instance buffer, and turns them into one frame of GPU work.
///
/// A frame is:
///
/// 1. flush queued node removals, then insertions (new nodes are batched)
/// 2. resolve world transforms
/// 3. acquire a swapchain target (none: nothing is drawn this frame)
/// 4. walk the batches in (material, mesh) order, writing one
///    `view_projection * world` matrix per live node, then record one
///    instanced draw per non-empty batch
/// 5. record the instance upload into a second command list
/// 6. submit the upload list ahead of the draw list in a single call
///
/// The instance count per frame is capped by `Config::max_instances`; nodes
/// past the cap are left out of that frame and reported in `FrameStats`.

use std::sync::{Arc, Mutex, MutexGuard};
use glam::Mat4;
use crate::camera::Camera;
use crate::config::Config;
use crate::error::Result;
use crate::graphics_device::{ClearValue, GraphicsDevice, IndexType, Pipeline};
use crate::resource::{ImageData, MeshData, ResourceManager};
use crate::scene::{Node, NodeDesc, NodeKey, Scene};
use crate::{engine_debug, engine_err, engine_info, engine_trace, engine_warn};
use super::instance_buffer::InstanceBuffer;

/// Counters for one rendered frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Live nodes after the flush
    pub live_nodes: usize,
    /// Instances written and uploaded
    pub rendered_nodes: usize,
    pub draw_calls: u32,
    /// Live nodes left out because the instance buffer was full
    pub dropped_nodes: usize,
}

/// One instanced draw: a contiguous range of the instance buffer
#[derive(Debug, Clone, Copy)]
struct DrawRange {
    material: u32,
    mesh: u32,
    first: u32,
    count: u32,
}

pub struct SceneRenderer {
    device: Arc<Mutex<dyn GraphicsDevice>>,
    pipeline: Arc<dyn Pipeline>,
    config: Config,
    resources: ResourceManager,
    scene: Scene,
    camera: Camera,
    instances: InstanceBuffer,
    draws: Vec<DrawRange>,
    frame_index: u64,
}

impl SceneRenderer {
    /// Create a renderer with an empty scene
    ///
    /// # Arguments
    ///
    /// * `device` - Graphics device shared with the rest of the application
    /// * `pipeline` - Graphics pipeline every batch is drawn with. It reads
    ///   instance matrices from vertex storage slot 0 and the batch's first
    ///   instance index from vertex uniform slot 0.
    /// * `config` - Validated before anything is created
    pub fn new(device: Arc<Mutex<dyn GraphicsDevice>>, pipeline: Arc<dyn Pipeline>, config: Config) -> Result<Self> {
        config.validate()?;

        let instances = {
            let mut device = lock(&device)?;
            InstanceBuffer::new(&mut *device, config.max_instances)?
        };

        engine_info!("orrery::Renderer", "Scene renderer created ({} max nodes, {} max instances, {}x{})",
            config.max_nodes, config.max_instances, config.width, config.height);

        Ok(Self {
            camera: Camera::from_config(&config),
            scene: Scene::new(config.max_nodes),
            resources: ResourceManager::new(),
            draws: Vec::new(),
            frame_index: 0,
            device,
            pipeline,
            config,
            instances,
        })
    }

    // ===== RESOURCES =====

    /// Load every mesh of the models directory and every material of the
    /// materials directory
    ///
    /// Returns the number of (meshes, materials) loaded.
    pub fn load_assets(&mut self) -> Result<(usize, usize)> {
        let mut device = lock(&self.device)?;
        let meshes = self.resources.load_models_dir(&mut *device, &self.config.models_path())?;
        let materials = self.resources.load_materials_dir(&mut *device, &self.config.materials_path())?;
        engine_info!("orrery::Renderer", "Loaded {} mesh(es), {} material(s) from '{}'",
            meshes, materials, self.config.asset_root.display());
        Ok((meshes, materials))
    }

    /// Register an in-memory mesh
    pub fn add_mesh(&mut self, name: &str, data: &MeshData) -> Result<u32> {
        let mut device = lock(&self.device)?;
        self.resources.add_mesh(&mut *device, name, data)
    }

    /// Register an in-memory material from its base image
    pub fn add_material(&mut self, name: &str, image: &ImageData) -> Result<u32> {
        let mut device = lock(&self.device)?;
        self.resources.add_material(&mut *device, name, image)
    }

    pub fn resources(&self) -> &ResourceManager {
        &self.resources
    }

    // ===== NODES =====

    /// Queue a node; it is drawn from the next frame on
    ///
    /// See `Scene::make_node` for the errors.
    pub fn make_node(&mut self, desc: NodeDesc) -> Result<NodeKey> {
        self.scene.make_node(&self.resources, desc)
    }

    /// Queue removal of a node; it is still drawn until the next frame
    pub fn remove_node(&mut self, key: NodeKey) -> Result<bool> {
        self.scene.remove_node(key)
    }

    pub fn node(&self, key: NodeKey) -> Option<&Node> {
        self.scene.node(key)
    }

    /// Edit a live node's transform or parent
    pub fn node_mut(&mut self, key: NodeKey) -> Option<&mut Node> {
        self.scene.node_mut(key)
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    // ===== CAMERA =====

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Track a new viewport size
    ///
    /// A zero-sized viewport (minimized window) keeps the current
    /// projection.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.camera.set_aspect(self.config.aspect_ratio());
        engine_debug!("orrery::Renderer", "Resized to {}x{}", width, height);
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    // ===== FRAME =====

    /// Render one frame
    ///
    /// # Errors
    ///
    /// `Error::OutOfMemory` if the scene cannot grow, or the device error
    /// if recording or submission fails. The frame is abandoned in both
    /// cases; the scene itself stays consistent.
    pub fn render_frame(&mut self) -> Result<FrameStats> {
        self.scene.flush()?;
        self.scene.resolve_transforms();
        self.frame_index += 1;

        let mut stats = FrameStats {
            live_nodes: self.scene.node_count(),
            ..FrameStats::default()
        };
        self.instances.clear();
        self.draws.clear();

        let device = Arc::clone(&self.device);
        let mut device = lock(&device)?;
        let mut render = device.create_command_list()?;
        render.begin()?;

        let Some(target) = device.acquire_swapchain_target(render.as_mut())? else {
            render.end()?;
            device.submit(&[render.as_ref()])?;
            engine_trace!("orrery::Renderer", "Frame {}: no swapchain target", self.frame_index);
            return Ok(stats);
        };

        let view_projection = self.camera.view_projection_matrix();
        self.build_instances(view_projection, &mut stats);

        render.begin_render_pass(&target, ClearValue::Color(self.config.clear_color))?;
        render.bind_pipeline(&self.pipeline)?;
        render.bind_vertex_storage_buffer(0, self.instances.storage())?;
        for draw in &self.draws {
            let mesh = self.resources.mesh(draw.mesh);
            let material = self.resources.material(draw.material);
            render.bind_vertex_buffer(&mesh.vertex_buffer, 0)?;
            render.bind_index_buffer(&mesh.index_buffer, 0, IndexType::U16)?;
            render.bind_fragment_samplers(0, &material.bindings)?;
            render.push_vertex_uniform(0, bytemuck::bytes_of(&draw.first))?;
            render.draw_indexed_instanced(mesh.index_count, draw.count, 0, 0, 0)?;
        }
        render.end_render_pass()?;
        render.end()?;

        // recorded after the draws, submitted ahead of them
        let mut upload = device.create_command_list()?;
        upload.begin()?;
        let uploaded = self.instances.record_upload(upload.as_mut())?;
        upload.end()?;

        if uploaded > 0 {
            device.submit(&[upload.as_ref(), render.as_ref()])?;
        } else {
            device.submit(&[render.as_ref()])?;
        }

        stats.rendered_nodes = self.instances.len();
        stats.draw_calls = self.draws.len() as u32;
        if stats.dropped_nodes > 0 {
            engine_warn!("orrery::Renderer", "Frame {}: instance buffer full, {} node(s) not drawn",
                self.frame_index, stats.dropped_nodes);
        }
        engine_trace!("orrery::Renderer", "Frame {}: {} instance(s), {} draw(s), {} bytes uploaded",
            self.frame_index, stats.rendered_nodes, stats.draw_calls, uploaded);
        Ok(stats)
    }

    /// Instance matrices written by the last frame, in draw order
    pub fn instance_transforms(&self) -> &[Mat4] {
        self.instances.as_slice()
    }

    /// Block until the device has finished all submitted work
    pub fn wait_idle(&self) -> Result<()> {
        lock(&self.device)?.wait_idle()
    }

    /// Fill the instance buffer from the batches and plan one draw per
    /// non-empty batch
    fn build_instances(&mut self, view_projection: Mat4, stats: &mut FrameStats) {
        let nodes = self.scene.nodes();
        for batch in self.scene.batches().iter() {
            let first = self.instances.len();
            for &key in batch.nodes {
                // freed nodes stay in their bucket
                let Some(node) = nodes.get(key) else { continue };
                if !self.instances.push(view_projection * *node.world_matrix()) {
                    stats.dropped_nodes += 1;
                }
            }
            let count = self.instances.len() - first;
            if count > 0 {
                self.draws.push(DrawRange {
                    material: batch.material,
                    mesh: batch.mesh,
                    first: first as u32,
                    count: count as u32,
                });
            }
        }
    }
}

fn lock<'a>(device: &'a Mutex<dyn GraphicsDevice + 'static>) -> Result<MutexGuard<'a, dyn GraphicsDevice + 'static>> {
    device
        .lock()
        .map_err(|_| engine_err!("orrery::Renderer", "Graphics device mutex poisoned"))
}

#[cfg(test)]
#[path = "scene_renderer_tests.rs"]
mod tests;
