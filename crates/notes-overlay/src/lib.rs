//! Glitch overlay for DC404 Notes
//!
//! A randomized visual-noise layer drawn above the editor text: scanlines,
//! offset blocks with chromatic splits, and the odd full-surface flash, all
//! in the active theme's glitch colors.
//!
//! ## Architecture
//!
//! - [`generator`] builds a fresh [`GlitchFrame`] per tick.
//! - [`GlitchOverlay`] owns the lifecycle (start/stop), the tick timer and
//!   the surface.
//! - [`AnimationScheduler`] is a cooperative one-shot timer queue; the host
//!   event loop sleeps until its next deadline and calls
//!   [`GlitchOverlay::poll`].
//! - [`OverlaySurface`] is the drawing seam: [`SceneSurface`] records into
//!   a vello scene, [`mock::MockSurface`] records calls for tests.
//!
//! ## Usage
//!
//! ```ignore
//! let mut overlay = GlitchOverlay::new(SceneSurface::new(width, height));
//! overlay.set_theme(&session.state().theme);
//! overlay.set_enabled(session.state().glitch_on);
//!
//! // In the event loop:
//! if overlay.poll(Instant::now()) {
//!     window.request_redraw();
//! }
//! ```

pub mod engine;
pub mod frame;
pub mod generator;
pub mod mock;
pub mod scene_surface;
pub mod scheduler;
pub mod surface;

pub use engine::{AnimationState, GlitchOverlay, TICK_INTERVAL};
pub use frame::{FrameSummary, GlitchFrame, PixelRect, Primitive, PrimitiveKind, Stipple};
pub use generator::{GlitchParams, MIN_SURFACE_EXTENT};
pub use scene_surface::SceneSurface;
pub use scheduler::{AnimationScheduler, TimerHandle};
pub use surface::{OverlayLayer, OverlaySurface};
