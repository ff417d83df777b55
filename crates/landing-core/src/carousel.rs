#![forbid(unsafe_code)]

//! Carousel controller: one current slide, autoplay, pause, hover hold and
//! swipe navigation.
//!
//! [`Carousel`] composes the three leaf pieces of this crate: a
//! [`PointerCapture`] for touch/pointer input, a lazily built
//! [`DotIndicator`], and an autoplay timer scheduled through a [`TimerHost`].
//! Everything visual is delegated to injected surfaces; the controller only
//! decides offsets and flags.
//!
//! # State machine
//!
//! ```text
//!   Playing ──hover_enter──▶ Held ──hover_leave──▶ Playing
//!      ▲ │
//!      │ └──set_paused(true)──▶ Paused ──set_paused(false)──┐
//!      └─────────────────────────────────────────────────────┘
//!   Playing | Held | Paused ──drag start──▶ Dragging
//!   Dragging ──vertical-dominant move──▶ previous phase (index unchanged)
//!   Dragging ──release──▶ Playing | Paused (index per threshold rule)
//!   Held ──select_dot──▶ Playing (still hovered, autoplay re-armed)
//! ```
//!
//! # Invariants
//!
//! 1. `current_index < slide_count` whenever the carousel is not inert.
//! 2. At most one autoplay timer is armed; every arm is preceded by a cancel.
//! 3. No autoplay timer is armed while a drag is in progress.
//! 4. While paused, no autoplay timer is armed.
//! 5. With zero slides (or no strip) every operation is a no-op.
//!
//! # Example
//! ```
//! use landing_core::autoplay::ManualTimerHost;
//! use landing_core::carousel::{CarouselBuilder, SlideStrip};
//! use std::time::Duration;
//!
//! #[derive(Default)]
//! struct Strip { offset: f64 }
//!
//! impl SlideStrip for Strip {
//!     fn set_offset_percent(&mut self, percent: f64) { self.offset = percent; }
//!     fn set_transitions_enabled(&mut self, _enabled: bool) {}
//!     fn width_px(&self) -> f64 { 320.0 }
//! }
//!
//! let mut carousel = CarouselBuilder::new(ManualTimerHost::new())
//!     .strip(Strip::default(), 3)
//!     .build();
//! carousel.advance_time(Duration::from_millis(3200));
//! assert_eq!(carousel.current_index(), 1);
//! assert_eq!(carousel.strip().unwrap().offset, -100.0);
//! ```

use std::time::Duration;

use tracing::{debug, trace, warn};

use crate::autoplay::{ManualTimerHost, TimerHandle, TimerHost};
use crate::capture::{CaptureDispatch, DragSignal, PointerButton, PointerCapture, PointerPosition};
use crate::config::CarouselConfig;
use crate::indicator::{DotIndicator, IndicatorSurface};

/// The horizontally arranged container of slides.
pub trait SlideStrip {
    /// Position the strip at `percent` of its own width (`0` = first slide).
    fn set_offset_percent(&mut self, percent: f64);

    /// Enable or disable animated transitions between offsets.
    fn set_transitions_enabled(&mut self, enabled: bool);

    /// Rendered width of the strip in CSS pixels.
    fn width_px(&self) -> f64;
}

/// Pause/play control: a paused marker on the carousel root plus the
/// toggle's accessible label.
pub trait PauseSurface {
    fn set_paused_indicator(&mut self, paused: bool);
    fn set_toggle_label(&mut self, label: &str);
}

/// Coarse controller phase, derived from its flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselPhase {
    /// No slides or no strip; nothing ever happens.
    Inert,
    /// Not paused and not held; autoplay is armed unless the timer host
    /// refused it. A dot selection or drag release while hovered lands here.
    Playing,
    /// Hovered with no autoplay armed; the paused flag is untouched.
    Held,
    /// Paused by the user.
    Paused,
    /// A drag gesture is in progress.
    Dragging,
}

/// Outcome of one drag-move.
#[derive(Debug, Clone, Copy, PartialEq)]
#[must_use]
pub enum DragMove {
    /// No drag in progress.
    Ignored,
    /// Horizontal gesture; the strip follows the pointer. The host must
    /// suppress default scrolling for this event.
    Tracking { offset_percent: f64 },
    /// Vertical-dominant movement; the gesture is left to the page scroll.
    Abandoned,
}

impl DragMove {
    /// Whether the platform's default scroll must be suppressed.
    #[must_use]
    pub const fn suppresses_scroll(self) -> bool {
        matches!(self, Self::Tracking { .. })
    }
}

/// Outcome of releasing (or cancelling) a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum DragRelease {
    /// No drag in progress.
    Ignored,
    /// Travel did not exceed the threshold; the current slide is replayed.
    SnappedBack,
    /// Dragged left past the threshold.
    Advanced,
    /// Dragged right past the threshold.
    Retreated,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct DragTracker {
    start_x: f64,
    start_y: f64,
    current_x: f64,
}

/// Collects collaborators and configuration for a [`Carousel`].
pub struct CarouselBuilder<S, T> {
    timer: T,
    strip: Option<(S, usize)>,
    indicators: Option<Box<dyn IndicatorSurface>>,
    pause_control: Option<Box<dyn PauseSurface>>,
    config: CarouselConfig,
}

impl<S: SlideStrip, T: TimerHost> CarouselBuilder<S, T> {
    #[must_use]
    pub fn new(timer: T) -> Self {
        Self {
            timer,
            strip: None,
            indicators: None,
            pause_control: None,
            config: CarouselConfig::default(),
        }
    }

    /// Slide strip and the number of slides it holds.
    #[must_use]
    pub fn strip(mut self, strip: S, slide_count: usize) -> Self {
        self.strip = Some((strip, slide_count));
        self
    }

    /// Surface for the dot strip. Dots are only rendered when slides exist.
    #[must_use]
    pub fn indicators(mut self, surface: impl IndicatorSurface + 'static) -> Self {
        self.indicators = Some(Box::new(surface));
        self
    }

    #[must_use]
    pub fn pause_control(mut self, surface: impl PauseSurface + 'static) -> Self {
        self.pause_control = Some(Box::new(surface));
        self
    }

    #[must_use]
    pub fn config(mut self, config: CarouselConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the controller, render the dots and arm autoplay.
    ///
    /// A missing strip or a zero slide count yields an inert carousel.
    pub fn build(self) -> Carousel<S, T> {
        let (strip, slide_count) = match self.strip {
            Some((strip, count)) if count > 0 => (Some(strip), count),
            _ => (None, 0),
        };
        let dots = if strip.is_some() {
            self.indicators
                .and_then(|surface| DotIndicator::render(surface, slide_count))
        } else {
            None
        };
        let mut carousel = Carousel {
            strip,
            timer: self.timer,
            slide_count,
            current: 0,
            paused: false,
            hover_held: false,
            drag: None,
            active_timer: None,
            dots,
            pause_control: self.pause_control,
            capture: PointerCapture::new(PointerButton::Primary),
            config: self.config,
        };
        if carousel.is_inert() {
            debug!("carousel inert: no slides");
        } else {
            debug!(slides = slide_count, "carousel mounted");
            carousel.resume_autoplay();
        }
        carousel
    }
}

/// Carousel controller over a slide strip `S` and a timer host `T`.
pub struct Carousel<S, T> {
    strip: Option<S>,
    timer: T,
    slide_count: usize,
    current: usize,
    paused: bool,
    hover_held: bool,
    drag: Option<DragTracker>,
    active_timer: Option<TimerHandle>,
    dots: Option<DotIndicator>,
    pause_control: Option<Box<dyn PauseSurface>>,
    capture: PointerCapture,
    config: CarouselConfig,
}

impl<S, T> std::fmt::Debug for Carousel<S, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Carousel")
            .field("slide_count", &self.slide_count)
            .field("current", &self.current)
            .field("paused", &self.paused)
            .field("hover_held", &self.hover_held)
            .field("dragging", &self.drag.is_some())
            .field("active_timer", &self.active_timer)
            .finish()
    }
}

fn base_offset(index: usize) -> f64 {
    0.0 - index as f64 * 100.0
}

impl<S: SlideStrip, T: TimerHost> Carousel<S, T> {
    #[must_use]
    pub const fn slide_count(&self) -> usize {
        self.slide_count
    }

    #[must_use]
    pub const fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub const fn is_paused(&self) -> bool {
        self.paused
    }

    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    #[must_use]
    pub const fn is_inert(&self) -> bool {
        self.strip.is_none()
    }

    /// Handle of the armed autoplay timer, if any.
    #[must_use]
    pub const fn active_timer(&self) -> Option<TimerHandle> {
        self.active_timer
    }

    #[must_use]
    pub fn phase(&self) -> CarouselPhase {
        if self.is_inert() {
            CarouselPhase::Inert
        } else if self.drag.is_some() {
            CarouselPhase::Dragging
        } else if self.paused {
            CarouselPhase::Paused
        } else if self.hover_held && self.active_timer.is_none() {
            CarouselPhase::Held
        } else {
            CarouselPhase::Playing
        }
    }

    #[must_use]
    pub fn strip(&self) -> Option<&S> {
        self.strip.as_ref()
    }

    #[must_use]
    pub fn dots(&self) -> Option<&DotIndicator> {
        self.dots.as_ref()
    }

    #[must_use]
    pub const fn timer_host(&self) -> &T {
        &self.timer
    }

    #[must_use]
    pub const fn config(&self) -> &CarouselConfig {
        &self.config
    }

    // ── Navigation ──────────────────────────────────────────────────────

    /// Show slide `target`, wrapping in both directions.
    ///
    /// The index becomes `((target % n) + n) % n`, so `-1` is the last slide.
    pub fn go_to(&mut self, target: i64) {
        let Some(strip) = self.strip.as_mut() else {
            return;
        };
        let n = self.slide_count as i64;
        self.current = target.rem_euclid(n) as usize;
        strip.set_offset_percent(base_offset(self.current));
        if let Some(dots) = self.dots.as_mut() {
            dots.activate(self.current);
        }
        trace!(target_index = target, index = self.current, "carousel go_to");
    }

    pub fn advance(&mut self) {
        self.go_to(self.current as i64 + 1);
    }

    pub fn retreat(&mut self) {
        self.go_to(self.current as i64 - 1);
    }

    /// Indicator activation: jump to the dot's slide and restart autoplay.
    pub fn select_dot(&mut self, dot: usize) {
        let Some(target) = self.dots.as_ref().and_then(|dots| dots.target(dot)) else {
            return;
        };
        self.go_to(target as i64);
        self.resume_autoplay();
    }

    // ── Autoplay ────────────────────────────────────────────────────────

    /// Arm autoplay at `interval`, replacing any armed timer.
    ///
    /// No timer is armed while paused or while a drag is in progress; the
    /// drag release re-arms.
    pub fn start_autoplay(&mut self, interval: Duration) {
        if self.is_inert() {
            return;
        }
        self.stop_autoplay();
        if self.paused || self.drag.is_some() {
            return;
        }
        match self.timer.schedule(interval) {
            Some(handle) => {
                self.active_timer = Some(handle);
                debug!(
                    handle = handle.raw(),
                    interval_ms = interval.as_millis() as u64,
                    "autoplay armed"
                );
            }
            None => warn!("timer host refused to schedule autoplay"),
        }
    }

    pub fn stop_autoplay(&mut self) {
        if let Some(handle) = self.active_timer.take() {
            self.timer.cancel(handle);
            debug!(handle = handle.raw(), "autoplay cancelled");
        }
    }

    /// Re-arm autoplay at the configured interval.
    pub fn resume_autoplay(&mut self) {
        self.start_autoplay(self.config.autoplay_interval());
    }

    /// Timer expiry. Only the armed timer advances the carousel; anything
    /// else is a stale tick and is dropped.
    ///
    /// Returns whether the carousel advanced.
    pub fn on_autoplay_tick(&mut self, handle: TimerHandle) -> bool {
        if self.active_timer != Some(handle) || self.drag.is_some() {
            trace!(handle = handle.raw(), "stale autoplay tick ignored");
            return false;
        }
        self.advance();
        true
    }

    // ── Pause and hover ─────────────────────────────────────────────────

    pub fn set_paused(&mut self, paused: bool) {
        if self.is_inert() {
            return;
        }
        self.paused = paused;
        if let Some(control) = self.pause_control.as_mut() {
            control.set_paused_indicator(paused);
            let label = if paused {
                &self.config.play_label
            } else {
                &self.config.stop_label
            };
            control.set_toggle_label(label);
        }
        if paused {
            self.stop_autoplay();
        } else {
            self.resume_autoplay();
        }
        debug!(paused, "carousel pause toggled");
    }

    pub fn toggle_paused(&mut self) {
        self.set_paused(!self.paused);
    }

    pub fn hover_enter(&mut self) {
        if self.is_inert() {
            return;
        }
        self.hover_held = true;
        self.stop_autoplay();
    }

    pub fn hover_leave(&mut self) {
        if self.is_inert() {
            return;
        }
        self.hover_held = false;
        self.resume_autoplay();
    }

    // ── Drag ────────────────────────────────────────────────────────────

    pub fn on_drag_start(&mut self, x: f64, y: f64) {
        let Some(strip) = self.strip.as_mut() else {
            return;
        };
        strip.set_transitions_enabled(false);
        self.drag = Some(DragTracker {
            start_x: x,
            start_y: y,
            current_x: x,
        });
        self.stop_autoplay();
        trace!(x, y, "drag started");
    }

    pub fn on_drag_move(&mut self, x: f64, y: f64) -> DragMove {
        let (Some(drag), Some(strip)) = (self.drag.as_mut(), self.strip.as_mut()) else {
            return DragMove::Ignored;
        };
        drag.current_x = x;
        let dx = x - drag.start_x;
        let dy = y - drag.start_y;

        if dx.abs() > dy.abs() {
            let width = strip.width_px();
            let follow = if width.is_finite() && width > 0.0 {
                dx / width * 100.0
            } else {
                0.0
            };
            let offset_percent = base_offset(self.current) + follow;
            strip.set_offset_percent(offset_percent);
            DragMove::Tracking { offset_percent }
        } else {
            self.drag = None;
            strip.set_transitions_enabled(true);
            trace!(dx, dy, "drag abandoned for vertical scroll");
            self.resume_autoplay();
            DragMove::Abandoned
        }
    }

    /// Release the drag and apply the threshold rule.
    ///
    /// Travel strictly greater than the swipe threshold commits; anything
    /// else snaps back. Autoplay is re-armed in every case.
    pub fn on_drag_end(&mut self) -> DragRelease {
        let Some(drag) = self.drag.take() else {
            return DragRelease::Ignored;
        };
        if let Some(strip) = self.strip.as_mut() {
            strip.set_transitions_enabled(true);
        }
        let dx = drag.current_x - drag.start_x;
        let release = if dx.abs() > self.config.swipe_threshold_px {
            if dx < 0.0 {
                self.advance();
                DragRelease::Advanced
            } else {
                self.retreat();
                DragRelease::Retreated
            }
        } else {
            self.go_to(self.current as i64);
            DragRelease::SnappedBack
        };
        debug!(dx, index = self.current, ?release, "drag released");
        self.resume_autoplay();
        release
    }

    /// Platform cancellation of the gesture: snap back and re-arm autoplay.
    pub fn on_drag_cancel(&mut self) -> DragRelease {
        if self.drag.take().is_none() {
            return DragRelease::Ignored;
        }
        if let Some(strip) = self.strip.as_mut() {
            strip.set_transitions_enabled(true);
        }
        self.go_to(self.current as i64);
        debug!(index = self.current, "drag cancelled");
        self.resume_autoplay();
        DragRelease::SnappedBack
    }

    // ── Pointer routing ─────────────────────────────────────────────────

    /// Pointer-down / touch-start routed through the pointer capture.
    pub fn pointer_down(
        &mut self,
        pointer_id: i32,
        button: PointerButton,
        position: PointerPosition,
    ) -> CaptureDispatch {
        let dispatch = self.capture.pointer_down(pointer_id, button, position);
        if let Some(DragSignal::Start(at)) = dispatch.signal {
            self.on_drag_start(at.x, at.y);
        }
        dispatch
    }

    pub fn pointer_move(&mut self, pointer_id: i32, position: PointerPosition) -> DragMove {
        let dispatch = self.capture.pointer_move(pointer_id, position);
        let Some(DragSignal::Move(at)) = dispatch.signal else {
            return DragMove::Ignored;
        };
        let outcome = self.on_drag_move(at.x, at.y);
        if !matches!(outcome, DragMove::Tracking { .. }) {
            let _ = self.capture.release();
        }
        outcome
    }

    pub fn pointer_up(&mut self, pointer_id: i32) -> DragRelease {
        match self.capture.pointer_up(pointer_id).signal {
            Some(DragSignal::End) => self.on_drag_end(),
            _ => DragRelease::Ignored,
        }
    }

    pub fn pointer_cancel(&mut self, pointer_id: Option<i32>) -> DragRelease {
        match self.capture.pointer_cancel(pointer_id).signal {
            Some(DragSignal::Cancel) => self.on_drag_cancel(),
            _ => DragRelease::Ignored,
        }
    }
}

impl<S: SlideStrip> Carousel<S, ManualTimerHost> {
    /// Advance the deterministic clock and deliver every expiry.
    ///
    /// Returns how many ticks advanced the carousel.
    pub fn advance_time(&mut self, dt: Duration) -> usize {
        let fired = self.timer.advance(dt);
        fired
            .into_iter()
            .filter(|&handle| self.on_autoplay_tick(handle))
            .count()
    }
}
