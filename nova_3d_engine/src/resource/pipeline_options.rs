/// Partial pipeline options and their resolution into a full `PipelineState`
///
/// A material only sets the options it cares about. Resolution is a
/// two-stage merge: the color and depth attachment sub-records are first
/// completed from their own defaults, then the top-level record is
/// completed from the top-level defaults. Option equality drives the
/// pipeline cache key, so the order matters.

use std::fmt::Write;

use crate::graphics_device::{
    BlendMode, ColorAttachmentState, ColorWriteMask, CompareOp, CullMode,
    DepthAttachmentState, PipelineState, PrimitiveTopology,
};

/// Defaults applied to every option a material leaves unset
pub const DEFAULT_PIPELINE_STATE: PipelineState = PipelineState {
    cull_mode: CullMode::Back,
    topology: PrimitiveTopology::TriangleList,
    wireframe: false,
    color_attachment: ColorAttachmentState {
        blend: BlendMode::Opaque,
        write_mask: ColorWriteMask::ALL,
    },
    depth_attachment: DepthAttachmentState {
        depth_compare: CompareOp::Less,
        depth_write_enabled: true,
    },
};

/// Color attachment options (all optional)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ColorAttachmentOptions {
    pub blend: Option<BlendMode>,
    pub write_mask: Option<ColorWriteMask>,
}

impl ColorAttachmentOptions {
    fn resolve(&self) -> ColorAttachmentState {
        let defaults = DEFAULT_PIPELINE_STATE.color_attachment;
        ColorAttachmentState {
            blend: self.blend.unwrap_or(defaults.blend),
            write_mask: self.write_mask.unwrap_or(defaults.write_mask),
        }
    }
}

/// Depth attachment options (all optional)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DepthAttachmentOptions {
    pub depth_compare: Option<CompareOp>,
    pub depth_write: Option<bool>,
}

impl DepthAttachmentOptions {
    fn resolve(&self) -> DepthAttachmentState {
        let defaults = DEFAULT_PIPELINE_STATE.depth_attachment;
        DepthAttachmentState {
            depth_compare: self.depth_compare.unwrap_or(defaults.depth_compare),
            depth_write_enabled: self.depth_write.unwrap_or(defaults.depth_write_enabled),
        }
    }
}

/// Material pipeline options (all optional)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PipelineOptions {
    pub cull_mode: Option<CullMode>,
    pub topology: Option<PrimitiveTopology>,
    pub wireframe: Option<bool>,
    pub color_attachment: Option<ColorAttachmentOptions>,
    pub depth_attachment: Option<DepthAttachmentOptions>,
}

impl PipelineOptions {
    pub fn new() -> Self {
        Self::default()
    }

    // ===== BUILDERS =====

    pub fn with_cull_mode(mut self, cull_mode: CullMode) -> Self {
        self.cull_mode = Some(cull_mode);
        self
    }

    pub fn with_topology(mut self, topology: PrimitiveTopology) -> Self {
        self.topology = Some(topology);
        self
    }

    pub fn with_wireframe(mut self, wireframe: bool) -> Self {
        self.wireframe = Some(wireframe);
        self
    }

    pub fn with_blend(mut self, blend: BlendMode) -> Self {
        let mut color = self.color_attachment.unwrap_or_default();
        color.blend = Some(blend);
        self.color_attachment = Some(color);
        self
    }

    pub fn with_write_mask(mut self, mask: ColorWriteMask) -> Self {
        let mut color = self.color_attachment.unwrap_or_default();
        color.write_mask = Some(mask);
        self.color_attachment = Some(color);
        self
    }

    pub fn with_depth(mut self, compare: CompareOp, write: bool) -> Self {
        self.depth_attachment = Some(DepthAttachmentOptions {
            depth_compare: Some(compare),
            depth_write: Some(write),
        });
        self
    }

    // ===== RESOLUTION =====

    /// Fill every unset option from the defaults
    pub fn resolve(&self) -> PipelineState {
        // Stage 1: sub-records against their own defaults
        let color_attachment = self
            .color_attachment
            .map(|c| c.resolve())
            .unwrap_or(DEFAULT_PIPELINE_STATE.color_attachment);
        let depth_attachment = self
            .depth_attachment
            .map(|d| d.resolve())
            .unwrap_or(DEFAULT_PIPELINE_STATE.depth_attachment);

        // Stage 2: top level
        PipelineState {
            cull_mode: self.cull_mode.unwrap_or(DEFAULT_PIPELINE_STATE.cull_mode),
            topology: self.topology.unwrap_or(DEFAULT_PIPELINE_STATE.topology),
            wireframe: self.wireframe.unwrap_or(DEFAULT_PIPELINE_STATE.wireframe),
            color_attachment,
            depth_attachment,
        }
    }

    /// Blend class of the resolved options
    pub fn blend_mode(&self) -> BlendMode {
        self.resolve().color_attachment.blend
    }
}

/// Deterministic text form of a resolved state, used in pipeline cache keys
pub fn state_key(state: &PipelineState) -> String {
    let mut key = String::new();
    let _ = write!(
        key,
        "cull={:?};topo={:?};wire={};blend={:?};mask={};cmp={:?};zwrite={}",
        state.cull_mode,
        state.topology,
        state.wireframe as u8,
        state.color_attachment.blend,
        state.color_attachment.write_mask.bits(),
        state.depth_attachment.depth_compare,
        state.depth_attachment.depth_write_enabled as u8,
    );
    key
}

#[cfg(test)]
#[path = "pipeline_options_tests.rs"]
mod tests;
