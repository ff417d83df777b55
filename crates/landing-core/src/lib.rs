#![forbid(unsafe_code)]

//! Core: deterministic state machines behind the landing page's interactions.
//!
//! # Role in the workspace
//! `landing-core` owns every piece of UI state the page keeps. It never touches
//! a DOM: collaborators (the slide strip, the dot strip, the pause control, the
//! platform timer, the preference store) are injected through small traits,
//! and time only moves when the host says so. `landing-web` is the adapter that
//! implements those traits against `web-sys` and forwards browser events.
//!
//! # Primary responsibilities
//! - **Carousel**: slide index, autoplay, pause, hover hold and swipe handling.
//! - **Sibling behaviors**: menu, theme, scroll chrome, reveal-on-scroll,
//!   section highlighting, accordion, quiz and the sticky call-to-action.
//! - **Configuration**: every threshold and label in one validated struct.

pub mod accordion;
pub mod autoplay;
pub mod capture;
pub mod carousel;
pub mod config;
pub mod indicator;
pub mod menu;
pub mod quiz;
pub mod reveal;
pub mod scroll_chrome;
pub mod section_highlight;
pub mod sticky_cta;
pub mod theme;

pub use autoplay::{ManualTimerHost, TimerHandle, TimerHost};
pub use capture::{DragSignal, PointerCapture, PointerPosition};
pub use carousel::{Carousel, CarouselBuilder, CarouselPhase, DragMove, DragRelease, SlideStrip};
pub use config::{ConfigError, LandingConfig};
pub use indicator::{DotIndicator, IndicatorSurface};
pub use theme::{PreferenceStore, ThemePreference};
