// File: crates/telemetry-core/tests/text_batch.rs
// Purpose: Queue/flush laws and font recycling of the batched text renderer.

mod common;

use common::{Event, RecordingSurface};
use telemetry_core::{BatchConfig, FontTier, RenderError, RendererState, Rgba, TextBatchRenderer};

fn ready(config: BatchConfig) -> (RecordingSurface, TextBatchRenderer<RecordingSurface>) {
    let mut surface = RecordingSurface::default();
    let mut text = TextBatchRenderer::new(config);
    text.initialise(&mut surface).expect("fonts");
    (surface, text)
}

#[test]
fn measuring_before_initialise_fails() {
    let text = TextBatchRenderer::<RecordingSurface>::default();
    assert_eq!(text.state(), RendererState::Uninitialized);
    assert_eq!(text.text_width(FontTier::Small, "x"), Err(RenderError::NotInitialised { tier: FontTier::Small }));
    assert_eq!(text.text_height(FontTier::Large), Err(RenderError::NotInitialised { tier: FontTier::Large }));
}

#[test]
fn flush_draws_each_request_once_in_order() {
    let (mut surface, mut text) = ready(BatchConfig::default());
    text.set_origin(0, 0, 640, 480);
    for i in 0..5 {
        text.enqueue(FontTier::Medium, format!("m{i}"), i, 0, Rgba::WHITE);
    }
    text.enqueue(FontTier::Small, "s", 1, 1, Rgba::BLACK);
    assert_eq!(text.state(), RendererState::Accumulating);

    assert_eq!(text.flush(&mut surface), Ok(6));
    assert_eq!(text.state(), RendererState::Ready);
    for tier in FontTier::ALL {
        assert_eq!(text.pending(tier), 0);
    }

    let medium: Vec<_> = surface
        .texts()
        .into_iter()
        .filter(|t| t.0 == FontTier::Medium)
        .map(|t| t.1)
        .collect();
    assert_eq!(medium, vec!["m0", "m1", "m2", "m3", "m4"]);
    // one pass per tier with work, no duplicate drain passes
    assert_eq!(surface.passes(), 2);
    assert_eq!(surface.events.first(), Some(&Event::Begin(FontTier::Small, 640, 480)));

    assert_eq!(text.flush(&mut surface), Ok(0));
    assert_eq!(surface.texts().len(), 6);
}

#[test]
fn origin_is_applied_at_enqueue_time() {
    let (mut surface, mut text) = ready(BatchConfig::default());
    text.set_origin(100, 50, 800, 600);
    text.enqueue(FontTier::Large, "a", 10, 20, Rgba::WHITE);
    text.set_origin(400, 300, 800, 600);
    text.enqueue(FontTier::Large, "b", 10, 20, Rgba::WHITE);
    text.flush(&mut surface).unwrap();

    let positions: Vec<_> = surface.texts().into_iter().map(|t| (t.1, t.2, t.3)).collect();
    assert_eq!(positions, vec![("a".to_string(), 110, 70), ("b".to_string(), 410, 320)]);
}

#[test]
fn fonts_recycle_after_frame_ceiling() {
    let (mut surface, mut text) = ready(BatchConfig { recycle_after_frames: 3, initial_scale: 1.0 });
    assert_eq!(text.generation(), 1);
    for _ in 0..3 {
        text.flush(&mut surface).unwrap();
    }
    assert_eq!(text.generation(), 1);
    text.flush(&mut surface).unwrap();
    assert_eq!(text.generation(), 2);
    assert_eq!(surface.fonts_created.len(), 6);
    for _ in 0..3 {
        text.flush(&mut surface).unwrap();
    }
    assert_eq!(text.generation(), 3);
}

#[test]
fn scaling_change_rebuilds_fonts_and_metrics() {
    let (mut surface, mut text) = ready(BatchConfig::default());
    assert_eq!(text.text_height(FontTier::Small), Ok(10.0));
    assert_eq!(text.text_width(FontTier::Large, "ab"), Ok(24.0));

    text.scaling_factor_changed(2.0);
    // stale metrics are never reported
    assert_eq!(text.text_height(FontTier::Small), Err(RenderError::NotInitialised { tier: FontTier::Small }));
    text.enqueue(FontTier::Small, "queued before rescale", 0, 0, Rgba::WHITE);
    assert_eq!(text.flush(&mut surface), Ok(1));

    assert_eq!(text.generation(), 2);
    assert_eq!(text.text_height(FontTier::Small), Ok(20.0));
    assert_eq!(text.text_width(FontTier::Large, "ab"), Ok(48.0));
    assert!(surface.fonts_created[3..].iter().all(|&(_, scale)| scale == 2.0));
}

#[test]
fn flush_initialises_lazily() {
    let mut surface = RecordingSurface::default();
    let mut text = TextBatchRenderer::default();
    text.enqueue(FontTier::Small, "early", 0, 0, Rgba::WHITE);
    assert_eq!(text.flush(&mut surface), Ok(1));
    assert_eq!(text.generation(), 1);
}

#[test]
fn teardown_discards_fonts_and_pending_text() {
    let (mut surface, mut text) = ready(BatchConfig::default());
    text.enqueue(FontTier::Small, "dropped", 0, 0, Rgba::WHITE);
    text.teardown();
    assert_eq!(text.state(), RendererState::Uninitialized);
    assert_eq!(text.pending(FontTier::Small), 0);
    assert_eq!(text.flush(&mut surface), Ok(0));
}

#[test]
fn font_failure_surfaces_as_error() {
    let mut surface = RecordingSurface { refuse_fonts: true, ..Default::default() };
    let mut text = TextBatchRenderer::default();
    assert!(matches!(text.initialise(&mut surface), Err(RenderError::FontUnavailable { tier: FontTier::Small, .. })));
    assert_eq!(text.state(), RendererState::Uninitialized);
}

#[test]
fn prepare_rebuilds_before_layout_and_flush_does_not_repeat_it() {
    let (mut surface, mut text) = ready(BatchConfig::default());
    assert!(!text.needs_reinit());
    text.scaling_factor_changed(2.0);
    assert!(text.needs_reinit());

    text.prepare(&mut surface).unwrap();
    assert_eq!(text.text_width(FontTier::Large, "ab"), Ok(48.0));
    assert_eq!(text.generation(), 2);
    text.enqueue(FontTier::Large, "ab", 0, 0, Rgba::WHITE);
    assert_eq!(text.flush(&mut surface), Ok(1));
    assert_eq!(text.generation(), 2);
}

#[test]
fn prepare_takes_over_the_frame_ceiling() {
    let (mut surface, mut text) = ready(BatchConfig { recycle_after_frames: 3, initial_scale: 1.0 });
    let mut generations = Vec::new();
    for _ in 0..6 {
        text.prepare(&mut surface).unwrap();
        let measured = text.generation();
        text.flush(&mut surface).unwrap();
        // the flush draws with the generation the frame measured with
        assert_eq!(text.generation(), measured);
        generations.push(measured);
    }
    assert_eq!(generations, vec![1, 1, 1, 2, 2, 2]);
}

#[test]
fn discarded_text_is_never_drawn() {
    let (mut surface, mut text) = ready(BatchConfig::default());
    text.enqueue(FontTier::Medium, "abandoned", 0, 0, Rgba::WHITE);
    text.discard_pending();
    assert_eq!(text.state(), RendererState::Ready);
    assert_eq!(text.flush(&mut surface), Ok(0));
    assert!(surface.texts().is_empty());
}
