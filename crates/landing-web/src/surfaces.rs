//! DOM implementations of the core's surface traits.

use std::cell::RefCell;
use std::rc::Weak;
use std::time::Duration;

use gloo::events::EventListener;
use gloo::timers::callback::Interval;
use landing_core::carousel::PauseSurface;
use landing_core::{Carousel, IndicatorSurface, PreferenceStore, SlideStrip, TimerHandle, TimerHost};
use tracing::{trace, warn};
use web_sys::{Document, Element, HtmlElement, Storage};

use crate::markup::{self, classes};

pub(crate) type PageCarousel = Carousel<DomSlideStrip, IntervalTimerHost>;
pub(crate) type CarouselCell = RefCell<PageCarousel>;

/// Run `f` against the carousel if it is still alive and not already
/// borrowed by the handler that triggered this one.
pub(crate) fn with_carousel<R>(
    carousel: &Weak<CarouselCell>,
    f: impl FnOnce(&mut PageCarousel) -> R,
) -> Option<R> {
    let cell = carousel.upgrade()?;
    let Ok(mut guard) = cell.try_borrow_mut() else {
        trace!("carousel busy; event dropped");
        return None;
    };
    let result = f(&mut guard);
    Some(result)
}

pub(crate) struct DomSlideStrip {
    slides: HtmlElement,
}

impl DomSlideStrip {
    pub(crate) fn new(slides: HtmlElement) -> Self {
        Self { slides }
    }
}

impl SlideStrip for DomSlideStrip {
    fn set_offset_percent(&mut self, percent: f64) {
        let _ = self
            .slides
            .style()
            .set_property("transform", &markup::translate_x(percent));
    }

    fn set_transitions_enabled(&mut self, enabled: bool) {
        let _ = self
            .slides
            .class_list()
            .toggle_with_force(classes::SWIPING, !enabled);
    }

    fn width_px(&self) -> f64 {
        f64::from(self.slides.offset_width())
    }
}

/// Dots appended to `#dots`; clicking one selects its slide.
pub(crate) struct DomDots {
    document: Document,
    container: Element,
    carousel: Weak<CarouselCell>,
    dots: Vec<Element>,
    listeners: Vec<EventListener>,
}

impl DomDots {
    pub(crate) fn new(document: Document, container: Element, carousel: Weak<CarouselCell>) -> Self {
        Self {
            document,
            container,
            carousel,
            dots: Vec::new(),
            listeners: Vec::new(),
        }
    }
}

impl IndicatorSurface for DomDots {
    fn create_dot(&mut self, index: usize, active: bool) {
        let dot = match self.document.create_element("div") {
            Ok(dot) => dot,
            Err(err) => {
                warn!(index, ?err, "could not create indicator dot");
                return;
            }
        };
        dot.set_class_name(markup::dot_class(active));
        let _ = dot.set_attribute("data-idx", &index.to_string());
        let carousel = self.carousel.clone();
        self.listeners.push(EventListener::new(&dot, "click", move |_| {
            with_carousel(&carousel, |carousel| carousel.select_dot(index));
        }));
        let _ = self.container.append_child(&dot);
        self.dots.push(dot);
    }

    fn set_dot_active(&mut self, index: usize, active: bool) {
        if let Some(dot) = self.dots.get(index) {
            let _ = dot.class_list().toggle_with_force(classes::ACTIVE, active);
        }
    }
}

pub(crate) struct DomPauseControl {
    slider: Element,
    button: Option<Element>,
}

impl DomPauseControl {
    pub(crate) fn new(slider: Element, button: Option<Element>) -> Self {
        Self { slider, button }
    }
}

impl PauseSurface for DomPauseControl {
    fn set_paused_indicator(&mut self, paused: bool) {
        let _ = self.slider.class_list().toggle_with_force(classes::PAUSED, paused);
    }

    fn set_toggle_label(&mut self, label: &str) {
        if let Some(button) = &self.button {
            let _ = button.set_attribute("aria-label", label);
        }
    }
}

/// `setInterval`-backed timers. Dropping an [`Interval`] clears it.
///
/// Ticks never cancel, so an interval is never dropped from inside its own
/// callback.
pub(crate) struct IntervalTimerHost {
    carousel: Weak<CarouselCell>,
    next_handle: u64,
    live: Vec<(TimerHandle, Interval)>,
}

impl IntervalTimerHost {
    pub(crate) fn new(carousel: Weak<CarouselCell>) -> Self {
        Self {
            carousel,
            next_handle: 0,
            live: Vec::new(),
        }
    }
}

impl TimerHost for IntervalTimerHost {
    fn schedule(&mut self, interval: Duration) -> Option<TimerHandle> {
        let millis = markup::interval_delay_ms(interval);
        self.next_handle += 1;
        let handle = TimerHandle::new(self.next_handle);
        let carousel = self.carousel.clone();
        let timer = Interval::new(millis, move || {
            with_carousel(&carousel, |carousel| carousel.on_autoplay_tick(handle));
        });
        self.live.push((handle, timer));
        Some(handle)
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.live.retain(|(live, _)| *live != handle);
    }
}

/// `localStorage`, when the browser grants it.
pub(crate) struct LocalStorageStore {
    storage: Option<Storage>,
}

impl LocalStorageStore {
    pub(crate) fn new(storage: Option<Storage>) -> Self {
        Self { storage }
    }
}

impl PreferenceStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) {
        let Some(storage) = &self.storage else {
            return;
        };
        if let Err(err) = storage.set_item(key, value) {
            warn!(key, ?err, "could not persist preference");
        }
    }
}
