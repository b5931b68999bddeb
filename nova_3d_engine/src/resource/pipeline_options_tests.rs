/// Tests for PipelineOptions resolution

use super::*;

#[test]
fn test_empty_options_resolve_to_defaults() {
    assert_eq!(PipelineOptions::new().resolve(), DEFAULT_PIPELINE_STATE);
}

#[test]
fn test_defaults_values() {
    let state = PipelineOptions::new().resolve();
    assert_eq!(state.cull_mode, CullMode::Back);
    assert_eq!(state.topology, PrimitiveTopology::TriangleList);
    assert!(!state.wireframe);
    assert_eq!(state.color_attachment.write_mask, ColorWriteMask::ALL);
    assert_eq!(state.depth_attachment.depth_compare, CompareOp::Less);
    assert!(state.depth_attachment.depth_write_enabled);
}

#[test]
fn test_partial_color_attachment_keeps_default_mask() {
    let options = PipelineOptions {
        color_attachment: Some(ColorAttachmentOptions {
            blend: Some(BlendMode::Alpha),
            write_mask: None,
        }),
        ..PipelineOptions::default()
    };

    let state = options.resolve();
    assert_eq!(state.color_attachment.blend, BlendMode::Alpha);
    assert_eq!(state.color_attachment.write_mask, ColorWriteMask::ALL);
}

#[test]
fn test_partial_depth_attachment_keeps_default_compare() {
    let options = PipelineOptions {
        depth_attachment: Some(DepthAttachmentOptions {
            depth_compare: None,
            depth_write: Some(false),
        }),
        ..PipelineOptions::default()
    };

    let state = options.resolve();
    assert_eq!(state.depth_attachment.depth_compare, CompareOp::Less);
    assert!(!state.depth_attachment.depth_write_enabled);
}

#[test]
fn test_explicit_default_equals_unset() {
    let explicit = PipelineOptions::new()
        .with_cull_mode(CullMode::Back)
        .with_blend(BlendMode::Opaque)
        .with_depth(CompareOp::Less, true);

    assert_eq!(state_key(&explicit.resolve()), state_key(&PipelineOptions::new().resolve()));
}

#[test]
fn test_state_key_changes_with_each_field() {
    let base = state_key(&PipelineOptions::new().resolve());

    let variants = [
        PipelineOptions::new().with_cull_mode(CullMode::None),
        PipelineOptions::new().with_topology(PrimitiveTopology::LineList),
        PipelineOptions::new().with_wireframe(true),
        PipelineOptions::new().with_blend(BlendMode::Additive),
        PipelineOptions::new().with_write_mask(ColorWriteMask::RED),
        PipelineOptions::new().with_depth(CompareOp::LessOrEqual, true),
        PipelineOptions::new().with_depth(CompareOp::Less, false),
    ];

    for options in variants {
        assert_ne!(state_key(&options.resolve()), base, "{:?}", options);
    }
}

#[test]
fn test_builders_merge_color_fields() {
    let options = PipelineOptions::new()
        .with_blend(BlendMode::Alpha)
        .with_write_mask(ColorWriteMask::RED | ColorWriteMask::GREEN);

    let color = options.resolve().color_attachment;
    assert_eq!(color.blend, BlendMode::Alpha);
    assert_eq!(color.write_mask, ColorWriteMask::RED | ColorWriteMask::GREEN);
    assert_eq!(options.blend_mode(), BlendMode::Alpha);
}
