/// Buffer ids, usage flags, and buffer descriptor

use bitflags::bitflags;

/// Backend handle of a GPU buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BufferId(pub u32);

bitflags! {
    /// How a buffer will be used by the pipeline
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct BufferUsage: u32 {
        const VERTEX   = 1 << 0;
        const INDEX    = 1 << 1;
        const UNIFORM  = 1 << 2;
        const STORAGE  = 1 << 3;
        const COPY_DST = 1 << 4;
    }
}

/// Descriptor for creating a buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferDesc {
    /// Debug label
    pub label: String,
    /// Size in bytes
    pub size: u64,
    /// Usage flags
    pub usage: BufferUsage,
}

impl BufferDesc {
    pub fn new(label: impl Into<String>, size: u64, usage: BufferUsage) -> Self {
        Self { label: label.into(), size, usage }
    }
}
