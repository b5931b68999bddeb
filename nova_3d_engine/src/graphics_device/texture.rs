/// Texture and sampler ids, descriptors, and update regions

/// Backend handle of a texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(pub u32);

/// Backend handle of a sampler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SamplerId(pub u32);

/// Pixel formats understood by both backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureFormat {
    Rgba8Unorm,
    Rgba8UnormSrgb,
    Bgra8Unorm,
    Depth24Plus,
    Depth32Float,
}

impl TextureFormat {
    /// Bytes per pixel (depth formats report their storage size)
    pub fn bytes_per_pixel(&self) -> u32 {
        match self {
            TextureFormat::Rgba8Unorm
            | TextureFormat::Rgba8UnormSrgb
            | TextureFormat::Bgra8Unorm
            | TextureFormat::Depth24Plus
            | TextureFormat::Depth32Float => 4,
        }
    }
}

/// Texture usage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureUsage {
    /// Sampled in shaders
    Sampled,
    /// Render attachment
    RenderTarget,
    /// Depth attachment
    DepthStencil,
}

/// Descriptor for creating a texture (2D or 2D array)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureDesc {
    pub label: String,
    pub width: u32,
    pub height: u32,
    /// 1 = plain 2D texture, >1 = texture array
    pub array_layers: u32,
    pub format: TextureFormat,
    pub usage: TextureUsage,
}

/// Read-only properties of a created texture, kept by the resource cache
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureInfo {
    pub width: u32,
    pub height: u32,
    pub array_layers: u32,
    pub format: TextureFormat,
}

impl TextureInfo {
    pub fn is_array(&self) -> bool {
        self.array_layers > 1
    }

    /// "WxH" or "WxHxL" for arrays; used as texture-size metadata in pipeline keys
    pub fn size_tag(&self) -> String {
        if self.is_array() {
            format!("{}x{}x{}", self.width, self.height, self.array_layers)
        } else {
            format!("{}x{}", self.width, self.height)
        }
    }
}

impl From<&TextureDesc> for TextureInfo {
    fn from(desc: &TextureDesc) -> Self {
        Self {
            width: desc.width,
            height: desc.height,
            array_layers: desc.array_layers,
            format: desc.format,
        }
    }
}

/// A rectangular region of one layer to overwrite with pixel data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub layer: u32,
    pub data: Vec<u8>,
}

/// Texture filtering mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterMode {
    Nearest,
    Linear,
}

/// Texture addressing mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressMode {
    ClampToEdge,
    Repeat,
    MirrorRepeat,
}

/// Descriptor for creating a sampler
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SamplerDesc {
    pub label: String,
    pub mag_filter: FilterMode,
    pub min_filter: FilterMode,
    pub address_mode: AddressMode,
}

impl Default for SamplerDesc {
    fn default() -> Self {
        Self {
            label: "default_sampler".to_string(),
            mag_filter: FilterMode::Linear,
            min_filter: FilterMode::Linear,
            address_mode: AddressMode::Repeat,
        }
    }
}
