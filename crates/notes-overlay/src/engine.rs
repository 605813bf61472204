//! Glitch overlay engine
//!
//! Owns the overlay surface, the random source and the tick timer. While
//! running, every delivery of the pending timer regenerates the frame and
//! re-arms the next tick, so exactly one tick is ever scheduled.
//!
//! ## Lifecycle
//!
//! ```text
//!   Stopped --start()--> Running { pending }
//!   Running --fire(pending)--> tick, re-arm --> Running { pending' }
//!   Running --stop()--> cancel pending, clear, lower --> Stopped
//! ```
//!
//! A delivery whose handle is not the pending one (it raced with `stop()`
//! or a restart) is ignored.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use notes_theme::Theme;

use crate::frame::FrameSummary;
use crate::generator::{self, GlitchParams};
use crate::scheduler::{AnimationScheduler, TimerHandle};
use crate::surface::{OverlayLayer, OverlaySurface};

/// Delay between ticks (~12.5 fps)
pub const TICK_INTERVAL: Duration = Duration::from_millis(80);

/// Animation lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationState {
    #[default]
    Stopped,
    /// Running with exactly one armed tick
    Running { pending: TimerHandle },
}

/// Randomized glitch overlay drawn above the text surface
pub struct GlitchOverlay<S, R = StdRng> {
    surface: S,
    rng: R,
    timers: AnimationScheduler,
    state: AnimationState,
    theme: &'static Theme,
    params: GlitchParams,
    interval: Duration,
}

impl<S: OverlaySurface> GlitchOverlay<S, StdRng> {
    /// Create a stopped overlay seeded from the OS
    pub fn new(surface: S) -> Self {
        Self::with_rng(surface, StdRng::from_os_rng())
    }
}

impl<S: OverlaySurface, R: Rng> GlitchOverlay<S, R> {
    /// Create a stopped overlay with an explicit random source
    pub fn with_rng(surface: S, rng: R) -> Self {
        Self {
            surface,
            rng,
            timers: AnimationScheduler::new(),
            state: AnimationState::Stopped,
            theme: notes_theme::DEFAULT_THEME,
            params: GlitchParams::default(),
            interval: TICK_INTERVAL,
        }
    }

    /// Use a different tick interval (tests, benchmarks)
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Use different generation parameters
    pub fn with_params(mut self, params: GlitchParams) -> Self {
        self.params = params;
        self
    }

    /// Switch palette by theme name; unknown names use the default theme
    pub fn set_theme(&mut self, name: &str) {
        self.theme = notes_theme::resolve(name);
    }

    pub fn theme(&self) -> &'static Theme {
        self.theme
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, AnimationState::Running { .. })
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn scheduler(&self) -> &AnimationScheduler {
        &self.timers
    }

    /// Raise the overlay and schedule the first tick
    ///
    /// Does nothing if already running.
    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }
        self.surface.set_layer(OverlayLayer::Raised);
        let pending = self.timers.arm(self.interval);
        self.state = AnimationState::Running { pending };
        log::debug!("Glitch overlay started ({:?} interval)", self.interval);
    }

    /// Cancel the pending tick, clear the overlay and lower it below the text
    pub fn stop(&mut self) {
        if let AnimationState::Running { pending } = self.state {
            self.timers.cancel(pending);
            log::debug!("Glitch overlay stopped");
        }
        self.state = AnimationState::Stopped;
        self.surface.clear();
        self.surface.set_layer(OverlayLayer::Lowered);
    }

    /// Start or stop to match `enabled`
    pub fn set_enabled(&mut self, enabled: bool) {
        if enabled {
            self.start();
        } else {
            self.stop();
        }
    }

    /// Deliver a timer handle
    ///
    /// Ticks and re-arms only if `handle` is the pending tick of a running
    /// overlay. Returns whether a frame was drawn; the chain is re-armed
    /// even when the surface was too small to draw on.
    pub fn fire(&mut self, handle: TimerHandle) -> bool {
        match self.state {
            AnimationState::Running { pending } if pending == handle => {
                let drawn = self.regenerate().is_some();
                let pending = self.timers.arm(self.interval);
                self.state = AnimationState::Running { pending };
                drawn
            }
            _ => {
                log::trace!("Ignoring stale overlay timer {:?}", handle);
                false
            }
        }
    }

    /// Deliver every timer due at `now`; returns whether anything was drawn
    pub fn poll(&mut self, now: Instant) -> bool {
        let mut ticked = false;
        for handle in self.timers.take_due(now) {
            ticked |= self.fire(handle);
        }
        ticked
    }

    /// When the event loop should wake up next
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    /// Regenerate and draw one frame without touching the timer chain
    ///
    /// Returns `None` without touching the surface while stopped, or if the
    /// surface has no usable size yet; a later tick will try again.
    pub fn tick(&mut self) -> Option<FrameSummary> {
        if !self.is_running() {
            log::trace!("Ignoring overlay tick while stopped");
            return None;
        }
        self.regenerate()
    }

    fn regenerate(&mut self) -> Option<FrameSummary> {
        let palette = self.theme.glitch_colors;
        let (width, height) = self.surface.size();

        let Some(frame) = generator::generate(&mut self.rng, &self.params, palette, width, height)
        else {
            log::trace!("Skipping overlay tick on {}x{} surface", width, height);
            return None;
        };

        self.surface.present(&frame);
        Some(frame.summary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::PrimitiveKind;
    use crate::mock::MockSurface;

    fn overlay(width: u32, height: u32) -> GlitchOverlay<MockSurface> {
        GlitchOverlay::with_rng(MockSurface::new(width, height), StdRng::seed_from_u64(404))
    }

    fn past_deadline() -> Instant {
        Instant::now() + TICK_INTERVAL * 2
    }

    #[test]
    fn test_new_overlay_is_stopped_and_lowered() {
        let overlay = overlay(800, 600);
        assert_eq!(overlay.state(), AnimationState::Stopped);
        assert_eq!(overlay.surface().layer(), OverlayLayer::Lowered);
        assert_eq!(overlay.scheduler().pending_count(), 0);
    }

    #[test]
    fn test_start_raises_and_arms_without_drawing() {
        let mut overlay = overlay(800, 600);
        overlay.start();

        assert!(overlay.is_running());
        assert!(overlay.surface().is_raised());
        assert_eq!(overlay.scheduler().pending_count(), 1);
        assert_eq!(overlay.surface().total_draws(), 0);
    }

    #[test]
    fn test_start_twice_keeps_one_pending_tick() {
        let mut overlay = overlay(800, 600);
        overlay.start();
        let first = overlay.state();
        overlay.start();

        assert_eq!(overlay.state(), first);
        assert_eq!(overlay.scheduler().pending_count(), 1);
    }

    #[test]
    fn test_fire_ticks_and_rearms() {
        let mut overlay = overlay(800, 600);
        overlay.start();
        let AnimationState::Running { pending } = overlay.state() else {
            panic!("expected running");
        };
        let due = overlay.timers.take_due(past_deadline());
        assert_eq!(due, vec![pending]);

        assert!(overlay.fire(pending));
        assert!(overlay.surface().drawn_count(PrimitiveKind::Scanline) >= 6);
        assert_eq!(overlay.scheduler().pending_count(), 1);
        assert_ne!(overlay.state(), AnimationState::Running { pending });
    }

    #[test]
    fn test_poll_drives_the_chain() {
        let mut overlay = overlay(800, 600).with_interval(Duration::ZERO);
        overlay.start();
        for _ in 0..5 {
            assert!(overlay.poll(past_deadline()));
            assert_eq!(overlay.scheduler().pending_count(), 1);
        }
    }

    #[test]
    fn test_stale_fire_after_stop_is_ignored() {
        let mut overlay = overlay(800, 600);
        overlay.start();
        // The handle has already left the queue when stop() runs
        let due = overlay.timers.take_due(past_deadline());
        overlay.stop();
        overlay.surface_mut().clear_calls();

        for handle in due {
            assert!(!overlay.fire(handle));
        }
        assert_eq!(overlay.surface().total_draws(), 0);
        assert_eq!(overlay.scheduler().pending_count(), 0);
    }

    #[test]
    fn test_stop_clears_and_lowers() {
        let mut overlay = overlay(800, 600);
        overlay.start();
        overlay.tick();
        assert!(!overlay.surface().drawn.is_empty());

        overlay.stop();
        assert!(overlay.surface().drawn.is_empty());
        assert_eq!(overlay.surface().layer(), OverlayLayer::Lowered);
        assert_eq!(overlay.scheduler().pending_count(), 0);
    }

    #[test]
    fn test_stop_when_stopped_still_clears() {
        let mut overlay = overlay(800, 600);
        overlay.start();
        overlay.tick();
        overlay.stop();
        overlay.stop();
        assert!(overlay.surface().drawn.is_empty());
        assert_eq!(overlay.surface().layer(), OverlayLayer::Lowered);
    }

    #[test]
    fn test_tick_while_stopped_draws_nothing() {
        let mut overlay = overlay(800, 600);
        assert!(overlay.tick().is_none());
        assert!(overlay.surface().calls.is_empty());

        overlay.start();
        overlay.stop();
        overlay.surface_mut().clear_calls();
        assert!(overlay.tick().is_none());
        assert_eq!(overlay.surface().total_draws(), 0);
        assert_eq!(overlay.surface().layer(), OverlayLayer::Lowered);
    }

    #[test]
    fn test_tick_skips_degenerate_surface_without_clearing() {
        let mut overlay = overlay(1, 1);
        overlay.start();
        overlay.surface_mut().clear_calls();
        assert!(overlay.tick().is_none());
        assert!(overlay.surface().calls.is_empty());

        overlay.surface_mut().resize(320, 200);
        assert!(overlay.tick().is_some());
    }

    #[test]
    fn test_tick_uses_active_theme_palette() {
        let mut overlay = overlay(800, 600);
        overlay.set_theme("Dark Glitch");
        overlay.start();
        for _ in 0..20 {
            overlay.tick();
            for p in &overlay.surface().drawn {
                assert!(notes_theme::DARK_GLITCH.glitch_colors.contains(&p.color));
            }
        }
    }

    #[test]
    fn test_unknown_theme_uses_default_palette() {
        let mut overlay = overlay(800, 600);
        overlay.set_theme("NonexistentTheme");
        assert_eq!(overlay.theme(), notes_theme::resolve("Dark"));
    }

    #[test]
    fn test_restart_after_stop_schedules_fresh_tick() {
        let mut overlay = overlay(800, 600);
        overlay.start();
        let AnimationState::Running { pending: old } = overlay.state() else {
            panic!("expected running");
        };
        overlay.stop();
        overlay.start();

        assert_eq!(overlay.scheduler().pending_count(), 1);
        assert!(!overlay.fire(old));
    }
}
