/// Shader library - backend-specific shader sources and vertex layouts
///
/// Every shader is registered once with both a GLSL and a WGSL variant; the
/// active `BackendKind` picks which text reaches the device. Unknown shader
/// or vertex-layout names fall back to the configured defaults with a
/// warning, so a bad name renders wrong instead of crashing.

use rustc_hash::FxHashMap;

use crate::config::Config;
use crate::engine_warn;
use crate::error::{Error, Result};
use crate::graphics_device::{
    BackendKind, VertexAttribute, VertexBufferLayout, VertexFormat, VertexLayout,
};

/// Programmable stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

/// One stage's source text for each backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSource {
    pub glsl: String,
    pub wgsl: String,
}

impl ShaderSource {
    pub fn new(glsl: impl Into<String>, wgsl: impl Into<String>) -> Self {
        Self { glsl: glsl.into(), wgsl: wgsl.into() }
    }

    pub fn for_backend(&self, backend: BackendKind) -> &str {
        match backend {
            BackendKind::OpenGl => &self.glsl,
            BackendKind::WebGpu => &self.wgsl,
        }
    }
}

pub struct ShaderLibrary {
    backend: BackendKind,
    shaders: FxHashMap<(String, ShaderStage), ShaderSource>,
    layouts: FxHashMap<String, VertexLayout>,
    default_shader: String,
    default_layout: String,
}

impl ShaderLibrary {
    /// Library with the built-in shaders and vertex layouts registered
    pub fn new(backend: BackendKind, config: &Config) -> Self {
        let mut library = Self {
            backend,
            shaders: FxHashMap::default(),
            layouts: FxHashMap::default(),
            default_shader: config.default_shader.clone(),
            default_layout: config.default_vertex_layout.clone(),
        };

        library.register_shader("default", ShaderStage::Vertex, ShaderSource::new(DEFAULT_VERT_GLSL, DEFAULT_VERT_WGSL));
        library.register_shader("default", ShaderStage::Fragment, ShaderSource::new(DEFAULT_FRAG_GLSL, DEFAULT_FRAG_WGSL));
        library.register_shader("skybox", ShaderStage::Vertex, ShaderSource::new(SKYBOX_VERT_GLSL, SKYBOX_VERT_WGSL));
        library.register_shader("skybox", ShaderStage::Fragment, ShaderSource::new(SKYBOX_FRAG_GLSL, SKYBOX_FRAG_WGSL));

        for layout in builtin_vertex_layouts() {
            library.register_vertex_layout(layout);
        }
        library
    }

    pub fn backend(&self) -> BackendKind {
        self.backend
    }

    // ===== SHADERS =====

    /// Register (or replace) one stage of a named shader
    pub fn register_shader(&mut self, name: impl Into<String>, stage: ShaderStage, source: ShaderSource) {
        self.shaders.insert((name.into(), stage), source);
    }

    pub fn has_shader(&self, name: &str, stage: ShaderStage) -> bool {
        self.shaders.contains_key(&(name.to_string(), stage))
    }

    /// Source text of `name` for the active backend, falling back to the
    /// default shader when `name` is unknown
    pub fn source(&self, name: &str, stage: ShaderStage) -> Result<&str> {
        if let Some(source) = self.shaders.get(&(name.to_string(), stage)) {
            return Ok(source.for_backend(self.backend));
        }

        engine_warn!(
            "nova3d::ShaderLibrary",
            "Unknown {:?} shader '{}', using '{}'", stage, name, self.default_shader
        );
        self.shaders
            .get(&(self.default_shader.clone(), stage))
            .map(|source| source.for_backend(self.backend))
            .ok_or_else(|| Error::InvalidResource(format!(
                "default {:?} shader '{}' is not registered", stage, self.default_shader
            )))
    }

    // ===== VERTEX LAYOUTS =====

    pub fn register_vertex_layout(&mut self, layout: VertexLayout) {
        self.layouts.insert(layout.name.clone(), layout);
    }

    /// Layout registered as `name`, falling back to the default layout
    pub fn vertex_layout(&self, name: &str) -> Result<VertexLayout> {
        if let Some(layout) = self.layouts.get(name) {
            return Ok(layout.clone());
        }

        engine_warn!(
            "nova3d::ShaderLibrary",
            "Unknown vertex layout '{}', using '{}'", name, self.default_layout
        );
        self.layouts
            .get(&self.default_layout)
            .cloned()
            .ok_or_else(|| Error::InvalidResource(format!(
                "default vertex layout '{}' is not registered", self.default_layout
            )))
    }
}

fn attribute(name: &str, location: u32, format: VertexFormat, offset: u32) -> VertexAttribute {
    VertexAttribute { name: name.to_string(), location, format, offset }
}

fn builtin_vertex_layouts() -> Vec<VertexLayout> {
    vec![
        VertexLayout {
            name: "position".to_string(),
            buffers: vec![VertexBufferLayout {
                stride: 12,
                attributes: vec![attribute("position", 0, VertexFormat::Float32x3, 0)],
            }],
        },
        VertexLayout {
            name: "position_uv".to_string(),
            buffers: vec![VertexBufferLayout {
                stride: 20,
                attributes: vec![
                    attribute("position", 0, VertexFormat::Float32x3, 0),
                    attribute("uv", 2, VertexFormat::Float32x2, 12),
                ],
            }],
        },
        VertexLayout {
            name: "position_normal_uv".to_string(),
            buffers: vec![VertexBufferLayout {
                stride: 32,
                attributes: vec![
                    attribute("position", 0, VertexFormat::Float32x3, 0),
                    attribute("normal", 1, VertexFormat::Float32x3, 12),
                    attribute("uv", 2, VertexFormat::Float32x2, 24),
                ],
            }],
        },
    ]
}

// ===== BUILT-IN SHADERS =====

const DEFAULT_VERT_GLSL: &str = r#"#version 430
layout(location = 0) in vec3 a_position;
layout(location = 1) in vec3 a_normal;
layout(location = 2) in vec2 a_uv;

struct Light { vec4 position_or_direction; vec4 color_intensity; };
layout(std140, binding = 0) uniform Frame {
    mat4 view;
    mat4 projection;
    vec4 camera_position_time;
    uvec4 light_count;
    Light lights[8];
};
layout(std430, binding = 3) readonly buffer Instances { mat4 models[]; };

out vec3 v_normal;
out vec2 v_uv;
out vec3 v_world;

void main() {
    mat4 model = models[gl_InstanceID];
    vec4 world = model * vec4(a_position, 1.0);
    v_world = world.xyz;
    v_normal = mat3(model) * a_normal;
    v_uv = a_uv;
    gl_Position = projection * view * world;
}
"#;

const DEFAULT_FRAG_GLSL: &str = r#"#version 430
in vec3 v_normal;
in vec2 v_uv;
in vec3 v_world;

struct Light { vec4 position_or_direction; vec4 color_intensity; };
layout(std140, binding = 0) uniform Frame {
    mat4 view;
    mat4 projection;
    vec4 camera_position_time;
    uvec4 light_count;
    Light lights[8];
};

out vec4 frag_color;

void main() {
    vec3 n = normalize(v_normal);
    vec3 color = vec3(0.05);
    for (uint i = 0u; i < light_count.x; ++i) {
        vec4 p = lights[i].position_or_direction;
        vec3 l = p.w == 0.0 ? -p.xyz : normalize(p.xyz - v_world);
        color += max(dot(n, l), 0.0) * lights[i].color_intensity.rgb * lights[i].color_intensity.a;
    }
    frag_color = vec4(color, 1.0);
}
"#;

const DEFAULT_VERT_WGSL: &str = r#"struct Light { position_or_direction: vec4<f32>, color_intensity: vec4<f32> };
struct Frame {
    view: mat4x4<f32>,
    projection: mat4x4<f32>,
    camera_position_time: vec4<f32>,
    light_count: vec4<u32>,
    lights: array<Light, 8>,
};
@group(0) @binding(0) var<uniform> frame: Frame;
@group(2) @binding(0) var<storage, read> models: array<mat4x4<f32>>;

struct VertexOut {
    @builtin(position) clip: vec4<f32>,
    @location(0) normal: vec3<f32>,
    @location(1) uv: vec2<f32>,
    @location(2) world: vec3<f32>,
};

@vertex
fn vs_main(
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
    @builtin(instance_index) instance: u32,
) -> VertexOut {
    let model = models[instance];
    let world = model * vec4<f32>(position, 1.0);
    var out: VertexOut;
    out.clip = frame.projection * frame.view * world;
    out.normal = (model * vec4<f32>(normal, 0.0)).xyz;
    out.uv = uv;
    out.world = world.xyz;
    return out;
}
"#;

const DEFAULT_FRAG_WGSL: &str = r#"struct Light { position_or_direction: vec4<f32>, color_intensity: vec4<f32> };
struct Frame {
    view: mat4x4<f32>,
    projection: mat4x4<f32>,
    camera_position_time: vec4<f32>,
    light_count: vec4<u32>,
    lights: array<Light, 8>,
};
@group(0) @binding(0) var<uniform> frame: Frame;

@fragment
fn fs_main(
    @location(0) normal: vec3<f32>,
    @location(1) uv: vec2<f32>,
    @location(2) world: vec3<f32>,
) -> @location(0) vec4<f32> {
    let n = normalize(normal);
    var color = vec3<f32>(0.05);
    for (var i = 0u; i < frame.light_count.x; i++) {
        let p = frame.lights[i].position_or_direction;
        var l = -p.xyz;
        if (p.w != 0.0) {
            l = normalize(p.xyz - world);
        }
        let c = frame.lights[i].color_intensity;
        color += max(dot(n, l), 0.0) * c.rgb * c.a;
    }
    return vec4<f32>(color, 1.0);
}
"#;

const SKYBOX_VERT_GLSL: &str = r#"#version 430
layout(location = 0) in vec3 a_position;
layout(std140, binding = 0) uniform Frame {
    mat4 view;
    mat4 projection;
};
out vec3 v_direction;

void main() {
    v_direction = a_position;
    vec4 clip = projection * mat4(mat3(view)) * vec4(a_position, 1.0);
    gl_Position = clip.xyww;
}
"#;

const SKYBOX_FRAG_GLSL: &str = r#"#version 430
in vec3 v_direction;
layout(binding = 4) uniform sampler2D u_sky;
out vec4 frag_color;

void main() {
    vec3 d = normalize(v_direction);
    vec2 uv = vec2(atan(d.z, d.x) / 6.2831853 + 0.5, d.y * 0.5 + 0.5);
    frag_color = texture(u_sky, uv);
}
"#;

const SKYBOX_VERT_WGSL: &str = r#"struct Frame { view: mat4x4<f32>, projection: mat4x4<f32> };
@group(0) @binding(0) var<uniform> frame: Frame;

struct VertexOut {
    @builtin(position) clip: vec4<f32>,
    @location(0) direction: vec3<f32>,
};

@vertex
fn vs_main(@location(0) position: vec3<f32>) -> VertexOut {
    let rotation = mat4x4<f32>(
        vec4<f32>(frame.view[0].xyz, 0.0),
        vec4<f32>(frame.view[1].xyz, 0.0),
        vec4<f32>(frame.view[2].xyz, 0.0),
        vec4<f32>(0.0, 0.0, 0.0, 1.0),
    );
    let clip = frame.projection * rotation * vec4<f32>(position, 1.0);
    var out: VertexOut;
    out.clip = clip.xyww;
    out.direction = position;
    return out;
}
"#;

const SKYBOX_FRAG_WGSL: &str = r#"@group(1) @binding(0) var sky: texture_2d<f32>;
@group(1) @binding(1) var sky_sampler: sampler;

@fragment
fn fs_main(@location(0) direction: vec3<f32>) -> @location(0) vec4<f32> {
    let d = normalize(direction);
    let uv = vec2<f32>(atan2(d.z, d.x) / 6.2831853 + 0.5, d.y * 0.5 + 0.5);
    return textureSample(sky, sky_sampler, uv);
}
"#;

#[cfg(test)]
#[path = "shader_library_tests.rs"]
mod tests;
