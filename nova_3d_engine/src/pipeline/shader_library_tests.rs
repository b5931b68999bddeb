/// Tests for ShaderLibrary

use super::*;

fn library(backend: BackendKind) -> ShaderLibrary {
    ShaderLibrary::new(backend, &Config::default())
}

#[test]
fn test_backend_selects_source_language() {
    let gl = library(BackendKind::OpenGl);
    let wgpu = library(BackendKind::WebGpu);

    assert!(gl.source("default", ShaderStage::Vertex).unwrap().starts_with("#version"));
    assert!(wgpu.source("default", ShaderStage::Vertex).unwrap().contains("@vertex"));
    assert!(wgpu.source("default", ShaderStage::Fragment).unwrap().contains("@fragment"));
}

#[test]
fn test_unknown_shader_falls_back_to_default() {
    let lib = library(BackendKind::WebGpu);

    let fallback = lib.source("does_not_exist", ShaderStage::Fragment).unwrap();
    assert_eq!(fallback, lib.source("default", ShaderStage::Fragment).unwrap());
}

#[test]
fn test_missing_default_shader_is_an_error() {
    let config = Config { default_shader: "missing".to_string(), ..Config::default() };
    let lib = ShaderLibrary::new(BackendKind::OpenGl, &config);

    assert!(lib.source("also_missing", ShaderStage::Vertex).is_err());
    // Registered names still resolve
    assert!(lib.source("default", ShaderStage::Vertex).is_ok());
}

#[test]
fn test_register_shader() {
    let mut lib = library(BackendKind::OpenGl);
    lib.register_shader("toon", ShaderStage::Fragment, ShaderSource::new("glsl toon", "wgsl toon"));

    assert!(lib.has_shader("toon", ShaderStage::Fragment));
    assert!(!lib.has_shader("toon", ShaderStage::Vertex));
    assert_eq!(lib.source("toon", ShaderStage::Fragment).unwrap(), "glsl toon");
}

#[test]
fn test_builtin_vertex_layouts() {
    let lib = library(BackendKind::WebGpu);

    let layout = lib.vertex_layout("position_normal_uv").unwrap();
    assert_eq!(layout.primary_stride(), 32);
    assert_eq!(layout.entry_counts(), vec![3]);

    assert_eq!(lib.vertex_layout("position").unwrap().entry_counts(), vec![1]);
}

#[test]
fn test_unknown_vertex_layout_falls_back() {
    let lib = library(BackendKind::WebGpu);
    let layout = lib.vertex_layout("tangent_space").unwrap();
    assert_eq!(layout.name, "position_normal_uv");
}
