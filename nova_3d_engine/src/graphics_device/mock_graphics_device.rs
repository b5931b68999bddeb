/// Mock graphics device for unit tests (no GPU required)
///
/// Every backend call is recorded into a shared `MockDeviceState` so tests
/// can count resource creations and inspect the submitted draw commands
/// after handing the device itself to a `ResourceCache`.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::{Error, Result};
use super::{
    BackendKind, DeviceCapabilities, GraphicsDevice, RenderPass,
    BindGroupEntry, BindGroupId, BindGroupLayoutDesc, LayoutId,
    BufferDesc, BufferId, IndexFormat, PipelineDesc, PipelineId,
    SamplerDesc, SamplerId, TextureDesc, TextureId, TextureRegion,
};

// ============================================================================
// Recorded commands and state
// ============================================================================

/// A command recorded by `MockRenderPass`
#[derive(Debug, Clone, PartialEq)]
pub enum MockCommand {
    UsePipeline(PipelineId),
    SetVertexBuffer(u32, BufferId),
    SetIndexBuffer(BufferId, IndexFormat),
    SetBindGroup(u32, BindGroupId),
    DrawInstanced { vertex_count: u32, index_count: u32, instance_count: u32 },
    DrawSimple(u32),
    Submit,
}

/// Everything the mock device has been asked to do
#[derive(Debug, Default)]
pub struct MockDeviceState {
    next_id: u32,
    pub buffers: Vec<(BufferId, BufferDesc)>,
    pub buffer_writes: Vec<(BufferId, u64, Vec<u8>)>,
    pub textures: Vec<(TextureId, TextureDesc)>,
    pub texture_updates: Vec<TextureId>,
    pub samplers: Vec<SamplerId>,
    pub layouts: Vec<(LayoutId, BindGroupLayoutDesc)>,
    pub bind_groups: Vec<(BindGroupId, LayoutId, Vec<BindGroupEntry>)>,
    pub destroyed_buffers: Vec<BufferId>,
    pub destroyed_bind_groups: Vec<BindGroupId>,
    pub pipelines: Vec<(PipelineId, PipelineDesc)>,
    pub commands: Vec<MockCommand>,
    /// When set, buffer creation fails with `OutOfMemory`
    pub fail_buffer_creation: bool,
}

impl MockDeviceState {
    fn next_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    /// Commands of the draw kind only
    pub fn draw_commands(&self) -> Vec<&MockCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, MockCommand::DrawInstanced { .. } | MockCommand::DrawSimple(_)))
            .collect()
    }

    /// Size of a created buffer
    pub fn buffer_size(&self, id: BufferId) -> Option<u64> {
        self.buffers.iter().find(|(b, _)| *b == id).map(|(_, d)| d.size)
    }

    /// All writes issued to one buffer
    pub fn writes_to(&self, id: BufferId) -> Vec<(u64, Vec<u8>)> {
        self.buffer_writes
            .iter()
            .filter(|(b, _, _)| *b == id)
            .map(|(_, offset, data)| (*offset, data.clone()))
            .collect()
    }
}

// ============================================================================
// Mock device
// ============================================================================

pub struct MockGraphicsDevice {
    backend: BackendKind,
    capabilities: DeviceCapabilities,
    state: Rc<RefCell<MockDeviceState>>,
}

impl MockGraphicsDevice {
    /// Create a mock device and a handle to its recorded state
    pub fn new(backend: BackendKind) -> (Self, Rc<RefCell<MockDeviceState>>) {
        Self::with_capabilities(backend, DeviceCapabilities::default())
    }

    pub fn with_capabilities(
        backend: BackendKind,
        capabilities: DeviceCapabilities,
    ) -> (Self, Rc<RefCell<MockDeviceState>>) {
        let state = Rc::new(RefCell::new(MockDeviceState::default()));
        (Self { backend, capabilities, state: state.clone() }, state)
    }
}

impl GraphicsDevice for MockGraphicsDevice {
    fn backend_kind(&self) -> BackendKind {
        self.backend
    }

    fn capabilities(&self) -> DeviceCapabilities {
        self.capabilities
    }

    fn create_buffer(&mut self, desc: &BufferDesc) -> Result<BufferId> {
        let mut state = self.state.borrow_mut();
        if state.fail_buffer_creation {
            return Err(Error::OutOfMemory);
        }
        let id = BufferId(state.next_id());
        state.buffers.push((id, desc.clone()));
        Ok(id)
    }

    fn create_buffer_with_data(&mut self, desc: &BufferDesc, data: &[u8]) -> Result<BufferId> {
        let id = self.create_buffer(desc)?;
        self.state.borrow_mut().buffer_writes.push((id, 0, data.to_vec()));
        Ok(id)
    }

    fn write_buffer(&mut self, buffer: BufferId, offset: u64, data: &[u8]) -> Result<()> {
        let mut state = self.state.borrow_mut();
        let size = state.buffer_size(buffer)
            .ok_or_else(|| Error::InvalidResource(format!("unknown buffer {:?}", buffer)))?;
        if offset + data.len() as u64 > size {
            return Err(Error::InvalidResource(format!(
                "write of {} bytes at {} overflows buffer {:?} ({} bytes)",
                data.len(), offset, buffer, size
            )));
        }
        state.buffer_writes.push((buffer, offset, data.to_vec()));
        Ok(())
    }

    fn destroy_buffer(&mut self, buffer: BufferId) -> Result<()> {
        let mut state = self.state.borrow_mut();
        let index = state.buffers.iter().position(|(id, _)| *id == buffer)
            .ok_or_else(|| Error::InvalidResource(format!("unknown buffer {:?}", buffer)))?;
        state.buffers.remove(index);
        state.destroyed_buffers.push(buffer);
        Ok(())
    }

    fn create_texture(&mut self, desc: &TextureDesc) -> Result<TextureId> {
        let mut state = self.state.borrow_mut();
        let id = TextureId(state.next_id());
        state.textures.push((id, desc.clone()));
        Ok(id)
    }

    fn update_texture(&mut self, texture: TextureId, _region: &TextureRegion) -> Result<()> {
        self.state.borrow_mut().texture_updates.push(texture);
        Ok(())
    }

    fn create_sampler(&mut self, _desc: &SamplerDesc) -> Result<SamplerId> {
        let mut state = self.state.borrow_mut();
        let id = SamplerId(state.next_id());
        state.samplers.push(id);
        Ok(id)
    }

    fn create_shader_layout(&mut self, desc: &BindGroupLayoutDesc) -> Result<LayoutId> {
        let mut state = self.state.borrow_mut();
        let id = LayoutId(state.next_id());
        state.layouts.push((id, desc.clone()));
        Ok(id)
    }

    fn create_bind_group(&mut self, layout: LayoutId, entries: &[BindGroupEntry]) -> Result<BindGroupId> {
        let mut state = self.state.borrow_mut();
        let id = BindGroupId(state.next_id());
        state.bind_groups.push((id, layout, entries.to_vec()));
        Ok(id)
    }

    fn destroy_bind_group(&mut self, bind_group: BindGroupId) -> Result<()> {
        let mut state = self.state.borrow_mut();
        let index = state.bind_groups.iter().position(|(id, _, _)| *id == bind_group)
            .ok_or_else(|| Error::InvalidResource(format!("unknown bind group {:?}", bind_group)))?;
        state.bind_groups.remove(index);
        state.destroyed_bind_groups.push(bind_group);
        Ok(())
    }

    fn init_pipeline(&mut self, desc: &PipelineDesc) -> Result<PipelineId> {
        let mut state = self.state.borrow_mut();
        let id = PipelineId(state.next_id());
        state.pipelines.push((id, desc.clone()));
        Ok(id)
    }

    fn begin_render_pass(&mut self) -> Result<Box<dyn RenderPass>> {
        Ok(Box::new(MockRenderPass {
            state: self.state.clone(),
            recorded: Vec::new(),
        }))
    }
}

// ============================================================================
// Mock render pass
// ============================================================================

pub struct MockRenderPass {
    state: Rc<RefCell<MockDeviceState>>,
    recorded: Vec<MockCommand>,
}

impl RenderPass for MockRenderPass {
    fn use_pipeline(&mut self, pipeline: PipelineId) -> Result<()> {
        self.recorded.push(MockCommand::UsePipeline(pipeline));
        Ok(())
    }

    fn set_vertex_buffer(&mut self, slot: u32, buffer: BufferId) -> Result<()> {
        self.recorded.push(MockCommand::SetVertexBuffer(slot, buffer));
        Ok(())
    }

    fn set_index_buffer(&mut self, buffer: BufferId, format: IndexFormat) -> Result<()> {
        self.recorded.push(MockCommand::SetIndexBuffer(buffer, format));
        Ok(())
    }

    fn set_bind_group(&mut self, index: u32, bind_group: BindGroupId) -> Result<()> {
        self.recorded.push(MockCommand::SetBindGroup(index, bind_group));
        Ok(())
    }

    fn draw_instanced(&mut self, vertex_count: u32, index_count: u32, instance_count: u32) -> Result<()> {
        self.recorded.push(MockCommand::DrawInstanced { vertex_count, index_count, instance_count });
        Ok(())
    }

    fn draw_simple(&mut self, vertex_count: u32) -> Result<()> {
        self.recorded.push(MockCommand::DrawSimple(vertex_count));
        Ok(())
    }

    fn submit(self: Box<Self>) -> Result<()> {
        let mut state = self.state.borrow_mut();
        state.commands.extend(self.recorded);
        state.commands.push(MockCommand::Submit);
        Ok(())
    }
}

#[cfg(test)]
#[path = "mock_graphics_device_tests.rs"]
mod tests;
