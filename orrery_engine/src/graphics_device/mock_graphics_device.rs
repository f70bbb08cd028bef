/// Mock GraphicsDevice for unit tests (no GPU required)
///
/// Records every command, enforces pass scoping, keeps buffer and texture
/// contents in host memory and executes copy commands at submit time so
/// tests can read GPU buffers back.

use std::any::Any;
use std::sync::{Arc, Mutex};
use crate::engine_bail;
use crate::error::Result;
use crate::graphics_device::{
    Buffer, BufferDesc, BufferUsage, ClearValue, CommandList, GraphicsDevice,
    IndexType, Pipeline, RenderTarget, Sampler, SamplerDesc, Texture,
    TextureDesc, TextureFormat, TextureInfo, TextureSamplerBinding,
    TransferBuffer, TransferBufferDesc,
};

const SOURCE: &str = "orrery::mock";

// ============================================================================
// Mock Buffer
// ============================================================================

pub struct MockBuffer {
    pub size: u64,
    pub usage: BufferUsage,
    pub data: Mutex<Vec<u8>>,
}

impl MockBuffer {
    pub fn new(size: u64, usage: BufferUsage) -> Self {
        Self { size, usage, data: Mutex::new(vec![0; size as usize]) }
    }

    pub fn contents(&self) -> Vec<u8> {
        self.data.lock().unwrap().clone()
    }
}

impl Buffer for MockBuffer {
    fn size(&self) -> u64 {
        self.size
    }

    fn usage(&self) -> BufferUsage {
        self.usage
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// ============================================================================
// Mock Texture / Sampler
// ============================================================================

pub struct MockTexture {
    pub info: TextureInfo,
    pub data: Mutex<Vec<u8>>,
}

impl MockTexture {
    pub fn new(desc: &TextureDesc) -> Self {
        let info = TextureInfo {
            width: desc.width,
            height: desc.height,
            format: desc.format,
            usage: desc.usage,
        };
        Self { data: Mutex::new(vec![0; info.byte_size() as usize]), info }
    }

    pub fn contents(&self) -> Vec<u8> {
        self.data.lock().unwrap().clone()
    }
}

impl Texture for MockTexture {
    fn info(&self) -> &TextureInfo {
        &self.info
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

pub struct MockSampler {
    pub desc: SamplerDesc,
}

impl Sampler for MockSampler {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

// ============================================================================
// Mock TransferBuffer
// ============================================================================

#[derive(Default)]
struct TransferState {
    data: Vec<u8>,
    mapped: bool,
    maps: u32,
    cycles: u32,
}

pub struct MockTransferBuffer {
    pub size: u64,
    state: Mutex<TransferState>,
}

impl MockTransferBuffer {
    pub fn new(size: u64) -> Self {
        Self {
            size,
            state: Mutex::new(TransferState { data: vec![0; size as usize], ..Default::default() }),
        }
    }

    /// Number of `map` calls so far
    pub fn map_count(&self) -> u32 {
        self.state.lock().unwrap().maps
    }

    /// Number of `map(cycle = true)` calls so far
    pub fn cycle_count(&self) -> u32 {
        self.state.lock().unwrap().cycles
    }

    pub fn is_mapped(&self) -> bool {
        self.state.lock().unwrap().mapped
    }

    fn read(&self, offset: u64, size: u64) -> Result<Vec<u8>> {
        let state = self.state.lock().unwrap();
        if state.mapped {
            engine_bail!(SOURCE, "Copy source transfer buffer is still mapped");
        }
        let end = offset + size;
        if end > state.data.len() as u64 {
            engine_bail!(SOURCE, "Copy reads {}..{} of a {} byte transfer buffer",
                offset, end, state.data.len());
        }
        Ok(state.data[offset as usize..end as usize].to_vec())
    }
}

impl TransferBuffer for MockTransferBuffer {
    fn size(&self) -> u64 {
        self.size
    }

    fn map(&self, cycle: bool) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.mapped {
            engine_bail!(SOURCE, "Transfer buffer mapped twice");
        }
        if cycle {
            // discard previous contents
            state.data.fill(0);
            state.cycles += 1;
        }
        state.mapped = true;
        state.maps += 1;
        Ok(())
    }

    fn write(&self, offset: u64, data: &[u8]) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if !state.mapped {
            engine_bail!(SOURCE, "Write to an unmapped transfer buffer");
        }
        let end = offset + data.len() as u64;
        if end > state.data.len() as u64 {
            engine_bail!(SOURCE, "Write {}..{} overflows a {} byte transfer buffer",
                offset, end, state.data.len());
        }
        state.data[offset as usize..end as usize].copy_from_slice(data);
        Ok(())
    }

    fn unmap(&self) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if !state.mapped {
            engine_bail!(SOURCE, "Unmap of an unmapped transfer buffer");
        }
        state.mapped = false;
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// ============================================================================
// Mock Pipeline / RenderTarget
// ============================================================================

pub struct MockPipeline {
    pub name: String,
}

impl MockPipeline {
    pub fn new(name: &str) -> Self {
        Self { name: name.to_string() }
    }
}

impl Pipeline for MockPipeline {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

pub struct MockRenderTarget {
    pub width: u32,
    pub height: u32,
}

impl RenderTarget for MockRenderTarget {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn format(&self) -> TextureFormat {
        TextureFormat::B8G8R8A8_UNORM
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// ============================================================================
// Mock CommandList
// ============================================================================

/// A recorded copy, executed when the list is submitted
pub enum MockCopy {
    Buffer {
        src: Arc<dyn TransferBuffer>,
        src_offset: u64,
        dst: Arc<dyn Buffer>,
        dst_offset: u64,
        size: u64,
        cycle: bool,
    },
    Texture {
        src: Arc<dyn TransferBuffer>,
        src_offset: u64,
        dst: Arc<dyn Texture>,
        cycle: bool,
    },
}

/// A recorded draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockDraw {
    pub index_count: u32,
    pub instance_count: u32,
    pub first_index: u32,
    pub vertex_offset: i32,
    pub first_instance: u32,
    /// Last `u32` pushed to vertex uniform slot 0
    pub instance_base: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pass {
    None,
    Copy,
    Render,
}

pub struct MockCommandList {
    pub commands: Vec<String>,
    pub copies: Vec<MockCopy>,
    pub draws: Vec<MockDraw>,
    recording: bool,
    pass: Pass,
    instance_base: Option<u32>,
}

impl MockCommandList {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            copies: Vec::new(),
            draws: Vec::new(),
            recording: false,
            pass: Pass::None,
            instance_base: None,
        }
    }

    fn require(&self, pass: Pass, command: &str) -> Result<()> {
        if !self.recording {
            engine_bail!(SOURCE, "{} recorded outside begin/end", command);
        }
        if self.pass != pass {
            engine_bail!(SOURCE, "{} requires {:?} pass, current pass is {:?}", command, pass, self.pass);
        }
        Ok(())
    }

    fn record(&mut self, pass: Pass, command: &str) -> Result<()> {
        self.require(pass, command)?;
        self.commands.push(command.to_string());
        Ok(())
    }
}

impl CommandList for MockCommandList {
    fn begin(&mut self) -> Result<()> {
        if self.recording {
            engine_bail!(SOURCE, "Command list already recording");
        }
        self.recording = true;
        self.commands.push("begin".to_string());
        Ok(())
    }

    fn end(&mut self) -> Result<()> {
        self.record(Pass::None, "end")?;
        self.recording = false;
        Ok(())
    }

    fn begin_copy_pass(&mut self) -> Result<()> {
        self.record(Pass::None, "begin_copy_pass")?;
        self.pass = Pass::Copy;
        Ok(())
    }

    fn upload_to_buffer(
        &mut self,
        src: &Arc<dyn TransferBuffer>,
        src_offset: u64,
        dst: &Arc<dyn Buffer>,
        dst_offset: u64,
        size: u64,
        cycle: bool,
    ) -> Result<()> {
        self.record(Pass::Copy, "upload_to_buffer")?;
        self.copies.push(MockCopy::Buffer {
            src: Arc::clone(src),
            src_offset,
            dst: Arc::clone(dst),
            dst_offset,
            size,
            cycle,
        });
        Ok(())
    }

    fn upload_to_texture(
        &mut self,
        src: &Arc<dyn TransferBuffer>,
        src_offset: u64,
        dst: &Arc<dyn Texture>,
        cycle: bool,
    ) -> Result<()> {
        self.record(Pass::Copy, "upload_to_texture")?;
        self.copies.push(MockCopy::Texture {
            src: Arc::clone(src),
            src_offset,
            dst: Arc::clone(dst),
            cycle,
        });
        Ok(())
    }

    fn end_copy_pass(&mut self) -> Result<()> {
        self.record(Pass::Copy, "end_copy_pass")?;
        self.pass = Pass::None;
        Ok(())
    }

    fn begin_render_pass(&mut self, _target: &Arc<dyn RenderTarget>, _clear: ClearValue) -> Result<()> {
        self.record(Pass::None, "begin_render_pass")?;
        self.pass = Pass::Render;
        self.instance_base = None;
        Ok(())
    }

    fn end_render_pass(&mut self) -> Result<()> {
        self.record(Pass::Render, "end_render_pass")?;
        self.pass = Pass::None;
        Ok(())
    }

    fn bind_pipeline(&mut self, _pipeline: &Arc<dyn Pipeline>) -> Result<()> {
        self.record(Pass::Render, "bind_pipeline")
    }

    fn bind_vertex_buffer(&mut self, _buffer: &Arc<dyn Buffer>, _offset: u64) -> Result<()> {
        self.record(Pass::Render, "bind_vertex_buffer")
    }

    fn bind_index_buffer(&mut self, _buffer: &Arc<dyn Buffer>, _offset: u64, _index_type: IndexType) -> Result<()> {
        self.record(Pass::Render, "bind_index_buffer")
    }

    fn bind_fragment_samplers(&mut self, _first_slot: u32, _bindings: &[TextureSamplerBinding]) -> Result<()> {
        self.record(Pass::Render, "bind_fragment_samplers")
    }

    fn bind_vertex_storage_buffer(&mut self, _slot: u32, _buffer: &Arc<dyn Buffer>) -> Result<()> {
        self.record(Pass::Render, "bind_vertex_storage_buffer")
    }

    fn push_vertex_uniform(&mut self, slot: u32, data: &[u8]) -> Result<()> {
        self.record(Pass::Render, "push_vertex_uniform")?;
        if slot == 0 && data.len() >= 4 {
            self.instance_base = Some(u32::from_ne_bytes([data[0], data[1], data[2], data[3]]));
        }
        Ok(())
    }

    fn draw_indexed_instanced(
        &mut self,
        index_count: u32,
        instance_count: u32,
        first_index: u32,
        vertex_offset: i32,
        first_instance: u32,
    ) -> Result<()> {
        self.record(Pass::Render, "draw_indexed_instanced")?;
        self.draws.push(MockDraw {
            index_count,
            instance_count,
            first_index,
            vertex_offset,
            first_instance,
            instance_base: self.instance_base,
        });
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// ============================================================================
// Mock GraphicsDevice
// ============================================================================

/// Recording graphics device
pub struct MockGraphicsDevice {
    pub buffers_created: usize,
    pub textures_created: usize,
    pub samplers_created: usize,
    pub transfer_buffers_created: usize,
    pub command_lists_created: usize,
    /// Commands of every submitted list, grouped per `submit` call
    pub submissions: Vec<Vec<Vec<String>>>,
    /// Draws of every submitted list, in execution order
    pub draws: Vec<MockDraw>,
    /// When false, `acquire_swapchain_target` returns `None`
    pub swapchain_available: bool,
    /// When true, `create_buffer` fails with a backend error
    pub fail_buffer_creation: bool,
    target: Arc<dyn RenderTarget>,
}

impl MockGraphicsDevice {
    pub fn new() -> Self {
        Self {
            buffers_created: 0,
            textures_created: 0,
            samplers_created: 0,
            transfer_buffers_created: 0,
            command_lists_created: 0,
            submissions: Vec::new(),
            draws: Vec::new(),
            swapchain_available: true,
            fail_buffer_creation: false,
            target: Arc::new(MockRenderTarget { width: 1280, height: 720 }),
        }
    }

    /// Current contents of a buffer created by this device
    pub fn read_buffer(&self, buffer: &dyn Buffer) -> Option<Vec<u8>> {
        buffer.as_any().downcast_ref::<MockBuffer>().map(MockBuffer::contents)
    }

    /// Current contents of a texture created by this device
    pub fn read_texture(&self, texture: &dyn Texture) -> Option<Vec<u8>> {
        texture.as_any().downcast_ref::<MockTexture>().map(MockTexture::contents)
    }

    /// Flattened command names of the last `submit` call
    pub fn last_submission(&self) -> Vec<String> {
        self.submissions.last().map(|lists| lists.concat()).unwrap_or_default()
    }

    fn execute(&self, copy: &MockCopy) -> Result<()> {
        match copy {
            MockCopy::Buffer { src, src_offset, dst, dst_offset, size, .. } => {
                let Some(src) = src.as_any().downcast_ref::<MockTransferBuffer>() else {
                    engine_bail!(SOURCE, "Foreign transfer buffer");
                };
                let Some(dst) = dst.as_any().downcast_ref::<MockBuffer>() else {
                    engine_bail!(SOURCE, "Foreign buffer");
                };
                let bytes = src.read(*src_offset, *size)?;
                let mut data = dst.data.lock().unwrap();
                let end = dst_offset + size;
                if end > data.len() as u64 {
                    engine_bail!(SOURCE, "Copy writes {}..{} of a {} byte buffer",
                        dst_offset, end, data.len());
                }
                data[*dst_offset as usize..end as usize].copy_from_slice(&bytes);
            }
            MockCopy::Texture { src, src_offset, dst, .. } => {
                let Some(src) = src.as_any().downcast_ref::<MockTransferBuffer>() else {
                    engine_bail!(SOURCE, "Foreign transfer buffer");
                };
                let Some(dst) = dst.as_any().downcast_ref::<MockTexture>() else {
                    engine_bail!(SOURCE, "Foreign texture");
                };
                let bytes = src.read(*src_offset, dst.info.byte_size())?;
                dst.data.lock().unwrap().copy_from_slice(&bytes);
            }
        }
        Ok(())
    }
}

impl GraphicsDevice for MockGraphicsDevice {
    fn create_buffer(&mut self, desc: BufferDesc) -> Result<Arc<dyn Buffer>> {
        if self.fail_buffer_creation {
            engine_bail!(SOURCE, "Buffer creation failed ({} bytes)", desc.size);
        }
        self.buffers_created += 1;
        Ok(Arc::new(MockBuffer::new(desc.size, desc.usage)))
    }

    fn create_texture(&mut self, desc: TextureDesc) -> Result<Arc<dyn Texture>> {
        self.textures_created += 1;
        Ok(Arc::new(MockTexture::new(&desc)))
    }

    fn create_sampler(&mut self, desc: SamplerDesc) -> Result<Arc<dyn Sampler>> {
        self.samplers_created += 1;
        Ok(Arc::new(MockSampler { desc }))
    }

    fn create_transfer_buffer(&mut self, desc: TransferBufferDesc) -> Result<Arc<dyn TransferBuffer>> {
        self.transfer_buffers_created += 1;
        Ok(Arc::new(MockTransferBuffer::new(desc.size)))
    }

    fn create_command_list(&mut self) -> Result<Box<dyn CommandList>> {
        self.command_lists_created += 1;
        Ok(Box::new(MockCommandList::new()))
    }

    fn acquire_swapchain_target(&mut self, _cmd: &mut dyn CommandList) -> Result<Option<Arc<dyn RenderTarget>>> {
        Ok(self.swapchain_available.then(|| Arc::clone(&self.target)))
    }

    fn submit(&mut self, command_lists: &[&dyn CommandList]) -> Result<()> {
        let mut recorded = Vec::with_capacity(command_lists.len());
        for list in command_lists {
            let Some(list) = list.as_any().downcast_ref::<MockCommandList>() else {
                engine_bail!(SOURCE, "Foreign command list");
            };
            if list.recording {
                engine_bail!(SOURCE, "Submitted a command list that is still recording");
            }
            for copy in &list.copies {
                self.execute(copy)?;
            }
            self.draws.extend_from_slice(&list.draws);
            recorded.push(list.commands.clone());
        }
        self.submissions.push(recorded);
        Ok(())
    }

    fn wait_idle(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "mock_graphics_device_tests.rs"]
mod tests;
