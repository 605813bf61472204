//! Glitch overlay integration tests
//!
//! Drive the engine through its public API against a recording surface.

mod common;

use std::time::{Duration, Instant};

use common::mock_overlay;
use notes_overlay::mock::SurfaceCall;
use notes_overlay::{
    AnimationState, OverlayLayer, OverlaySurface, PrimitiveKind, Stipple, TICK_INTERVAL,
};

fn later() -> Instant {
    Instant::now() + TICK_INTERVAL * 2
}

#[test]
fn test_dark_theme_survives_a_hundred_ticks() {
    let mut overlay = mock_overlay(800, 600);
    overlay.set_theme("Dark");
    overlay.start();
    let palette = notes_theme::DARK.glitch_colors;

    for _ in 0..100 {
        let summary = overlay.tick().expect("800x600 is drawable");
        assert!((6..=12).contains(&summary.scanlines), "{summary:?}");
        assert!((2..=5).contains(&summary.blocks), "{summary:?}");
        assert!(summary.echoes <= summary.scanlines);
        assert!(summary.splits <= summary.blocks);

        for p in &overlay.surface().drawn {
            assert!(palette.contains(&p.color), "{p:?}");
        }
    }
}

#[test]
fn test_each_tick_replaces_the_previous_frame() {
    let mut overlay = mock_overlay(640, 480);
    overlay.start();
    overlay.tick();
    overlay.tick();

    let calls = &overlay.surface().calls;
    let clears = calls.iter().filter(|c| matches!(c, SurfaceCall::Clear)).count();
    assert_eq!(clears, 2);

    // What is visible is exactly the second frame
    let last_clear = calls
        .iter()
        .rposition(|c| matches!(c, SurfaceCall::Clear))
        .unwrap();
    assert_eq!(overlay.surface().drawn.len(), calls.len() - last_clear - 1);
}

#[test]
fn test_primitives_are_drawn_in_layer_order() {
    let mut overlay = mock_overlay(800, 600);
    overlay.start();
    overlay.tick();
    let layers: Vec<usize> = overlay.surface().drawn.iter().map(|p| p.layer).collect();
    let expected: Vec<usize> = (0..layers.len()).collect();
    assert_eq!(layers, expected);
}

#[test]
fn test_flash_covers_whole_surface() {
    let mut overlay = mock_overlay(320, 200);
    overlay.start();
    let mut seen = false;
    for _ in 0..500 {
        overlay.tick();
        if let Some(flash) = overlay
            .surface()
            .drawn
            .iter()
            .find(|p| p.kind == PrimitiveKind::Flash)
        {
            assert_eq!((flash.rect.x, flash.rect.y), (0, 0));
            assert_eq!((flash.rect.width, flash.rect.height), (320, 200));
            assert_eq!(flash.stipple, Stipple::Gray12);
            assert_eq!(Some(flash), overlay.surface().drawn.last());
            seen = true;
        }
    }
    assert!(seen, "an 8% flash should appear within 500 ticks");
}

#[test]
fn test_timer_chain_keeps_exactly_one_pending_tick() {
    let mut overlay = mock_overlay(800, 600).with_interval(Duration::from_millis(1));
    overlay.start();
    overlay.start();

    for _ in 0..10 {
        assert_eq!(overlay.scheduler().pending_count(), 1);
        assert!(overlay.poll(later()));
    }
    assert_eq!(overlay.scheduler().pending_count(), 1);
}

#[test]
fn test_poll_before_deadline_draws_nothing() {
    let mut overlay = mock_overlay(800, 600);
    overlay.start();
    assert!(!overlay.poll(Instant::now()));
    assert_eq!(overlay.surface().total_draws(), 0);
    assert!(overlay.next_deadline().is_some());
}

#[test]
fn test_stop_cancels_and_clears() {
    let mut overlay = mock_overlay(800, 600);
    overlay.start();
    overlay.poll(later());
    assert!(!overlay.surface().drawn.is_empty());

    overlay.stop();
    assert!(overlay.surface().drawn.is_empty());
    assert_eq!(overlay.surface().layer(), OverlayLayer::Lowered);
    assert_eq!(overlay.next_deadline(), None);
    assert!(!overlay.poll(later()));
}

#[test]
fn test_degenerate_surface_is_skipped_until_resized() {
    let mut overlay = mock_overlay(0, 0).with_interval(Duration::ZERO);
    overlay.start();

    assert!(!overlay.poll(later()));
    assert_eq!(overlay.surface().total_draws(), 0);
    // The chain continues even though nothing was drawn
    assert_eq!(overlay.scheduler().pending_count(), 1);

    overlay.surface_mut().resize(200, 100);
    assert!(overlay.poll(later()));
    assert!(overlay.surface().total_draws() > 0);
}

#[test]
fn test_theme_switch_applies_to_next_tick() {
    let mut overlay = mock_overlay(800, 600);
    overlay.start();
    overlay.set_theme("Light");
    overlay.tick();
    overlay.set_theme("Dark Glitch");
    overlay.tick();

    let palette = notes_theme::DARK_GLITCH.glitch_colors;
    for p in &overlay.surface().drawn {
        assert!(palette.contains(&p.color), "{p:?}");
    }
}

#[test]
fn test_stale_fire_after_restart_is_ignored() {
    let mut overlay = mock_overlay(800, 600);
    overlay.start();
    let AnimationState::Running { pending: stale } = overlay.state() else {
        panic!("overlay should be running");
    };
    overlay.stop();
    overlay.start();
    overlay.surface_mut().clear_calls();

    assert!(!overlay.fire(stale));
    assert_eq!(overlay.surface().total_draws(), 0);
    assert_eq!(overlay.scheduler().pending_count(), 1);
}

#[test]
fn test_unknown_theme_falls_back_to_dark() {
    assert_eq!(
        notes_theme::resolve("NonexistentTheme"),
        notes_theme::resolve("Dark")
    );

    let mut overlay = mock_overlay(800, 600);
    overlay.set_theme("NonexistentTheme");
    overlay.start();
    overlay.tick();
    for p in &overlay.surface().drawn {
        assert!(notes_theme::DARK.glitch_colors.contains(&p.color));
    }
}

#[test]
fn test_tick_after_stop_draws_nothing() {
    let mut overlay = mock_overlay(800, 600);
    overlay.start();
    assert!(overlay.tick().is_some());
    overlay.stop();

    assert_eq!(overlay.tick(), None);
    assert!(overlay.surface().drawn.is_empty());
    assert_eq!(overlay.surface().layer(), OverlayLayer::Lowered);
}
