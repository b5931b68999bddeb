/// Unit tests for the diagnostics port

use super::*;
use slotmap::SlotMap;

struct Silent;
impl Diagnostics for Silent {}

#[test]
fn test_default_hooks_are_no_ops() {
    let silent = Silent;
    silent.layout_created("k", LayoutId(1));
    silent.pipeline_created("k", PipelineId(1));
    silent.frame_completed(&FrameStats::default());
}

#[test]
fn test_recorder_counts_events() {
    let mut entities: SlotMap<EntityId, ()> = SlotMap::with_key();
    let mut meshes: SlotMap<MeshKey, ()> = SlotMap::with_key();
    let entity = entities.insert(());
    let mesh = meshes.insert(());

    let recorder = DiagnosticsRecorder::new();
    recorder.entity_culled(entity);
    recorder.entity_culled(entity);
    recorder.layout_created("global", LayoutId(3));
    recorder.pipeline_created("p", PipelineId(4));
    recorder.draw_skipped(mesh, "missing bind group");

    assert_eq!(recorder.culled_count(), 2);
    assert_eq!(recorder.layouts_created(), 1);
    assert_eq!(recorder.pipelines_created(), 1);
    assert_eq!(recorder.skipped_draws(), vec![(mesh, "missing bind group".to_string())]);
    assert_eq!(recorder.last_frame(), None);
}

#[test]
fn test_recorder_keeps_last_frame() {
    let recorder = DiagnosticsRecorder::new();
    let first = FrameStats { draw_calls: 2, ..FrameStats::default() };
    let second = FrameStats { draw_calls: 5, instances_drawn: 9, ..FrameStats::default() };

    recorder.frame_completed(&first);
    recorder.frame_completed(&second);

    assert_eq!(recorder.frames_completed(), 2);
    assert_eq!(recorder.last_frame(), Some(second));
}
