//! `wasm-bindgen` entry point: binds every page behavior once the DOM is ready.
//!
//! Each behavior looks up its own elements. A missing element disables only
//! that behavior. A failing JS call disables it too: the [`BindError`] is
//! logged at `warn`, whatever that behavior had bound is dropped, and the
//! remaining behaviors are still bound.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use js_sys::Array;
use landing_core::accordion::Accordion;
use landing_core::capture::PointerButton;
use landing_core::menu::{MenuAttributes, NavMenu};
use landing_core::quiz::Quiz;
use landing_core::reveal::{RevealEntry, RevealTracker};
use landing_core::scroll_chrome::{ScrollChrome, ScrollMetrics};
use landing_core::section_highlight::{DetectionBand, SectionEntry, SectionHighlighter};
use landing_core::sticky_cta::StickyCta;
use landing_core::theme::ThemeSwitch;
use landing_core::{CarouselBuilder, LandingConfig, PointerPosition};
use tracing::{debug, info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, HtmlDetailsElement, HtmlElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, Node, TouchEvent, TouchList, Window,
};

use crate::console_log;
use crate::error::BindError;
use crate::load_config;
use crate::markup::{self, classes, ids, selectors};
use crate::surfaces::{
    CarouselCell, DomDots, DomPauseControl, DomSlideStrip, IntervalTimerHost, LocalStorageStore,
    with_carousel,
};

thread_local! {
    static PAGE: RefCell<Option<BoundPage>> = const { RefCell::new(None) };
    static PENDING_BOOT: RefCell<Option<EventListener>> = const { RefCell::new(None) };
}

type ObserverCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

/// An observer and the closure it calls; disconnected on drop.
struct ObserverGuard {
    observer: IntersectionObserver,
    _callback: ObserverCallback,
}

impl Drop for ObserverGuard {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// Listeners, observers and the carousel bound to one document.
///
/// Dropping it unbinds every behavior.
#[derive(Default)]
pub struct BoundPage {
    listeners: Vec<EventListener>,
    observers: Vec<ObserverGuard>,
    carousel: Option<Rc<CarouselCell>>,
    failures: Vec<(&'static str, BindError)>,
}

impl BoundPage {
    /// Behaviors that failed to bind, with the error that disabled each.
    #[must_use]
    pub fn failures(&self) -> &[(&'static str, BindError)] {
        &self.failures
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    #[must_use]
    pub fn has_carousel(&self) -> bool {
        self.carousel.is_some()
    }

    /// Bind one behavior into a scratch page and keep it only on success.
    fn bind(&mut self, behavior: &'static str, bind: impl FnOnce(&mut Self) -> Result<(), BindError>) {
        let mut scratch = Self::default();
        match bind(&mut scratch) {
            Ok(()) => {
                self.listeners.append(&mut scratch.listeners);
                self.observers.append(&mut scratch.observers);
                if scratch.carousel.is_some() {
                    self.carousel = scratch.carousel.take();
                }
            }
            Err(err) => {
                warn!(behavior, %err, "behavior disabled");
                self.failures.push((behavior, err));
            }
        }
    }
}

/// Bind every page behavior found in `document`.
///
/// Never fails as a whole; see [`BoundPage::failures`].
pub fn bind_page(window: &Window, document: &Document, config: &LandingConfig) -> BoundPage {
    let mut page = BoundPage::default();
    page.bind("menu", |page| bind_menu(document, page));
    page.bind("carousel", |page| bind_carousel(document, config, page));
    page.bind("theme", |page| bind_theme(window, document, config, page));
    page.bind("scroll chrome", |page| bind_scroll_chrome(window, document, config, page));
    page.bind("reveal", |page| bind_reveal(document, config, page));
    page.bind("section highlight", |page| bind_section_highlight(document, config, page));
    page.bind("accordion", |page| bind_accordion(document, page));
    page.bind("quiz", |page| bind_quiz(document, config, page));
    page.bind("sticky cta", |page| bind_sticky_cta(document, config, page));
    page
}

fn js_err(call: &'static str) -> impl FnOnce(JsValue) -> BindError {
    move |value| BindError::js(call, format!("{value:?}"))
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_log::install_panic_hook();
    let window = web_sys::window().ok_or_else(|| JsValue::from_str(&BindError::NoWindow.to_string()))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str(&BindError::NoDocument.to_string()))?;

    if document.ready_state() == "loading" {
        let listener = EventListener::once(&document, "DOMContentLoaded", |_| {
            if let Err(err) = boot() {
                gloo::console::error!(err.to_string());
            }
        });
        PENDING_BOOT.with(|slot| *slot.borrow_mut() = Some(listener));
        return Ok(());
    }
    boot().map_err(|err| JsValue::from_str(&err.to_string()))
}

fn boot() -> Result<(), BindError> {
    let window = web_sys::window().ok_or(BindError::NoWindow)?;
    let document = window.document().ok_or(BindError::NoDocument)?;

    let raw = document
        .get_element_by_id(markup::CONFIG_SCRIPT_ID)
        .and_then(|script| script.text_content());
    let parsed = load_config(raw.as_deref());
    let config = parsed.as_ref().map_or_else(|_| LandingConfig::default(), Clone::clone);
    console_log::install(config.tracing_level());
    if let Err(err) = &parsed {
        warn!(%err, "invalid page configuration; using defaults");
    }

    let page = bind_page(&window, &document, &config);
    info!(
        listeners = page.listener_count(),
        observers = page.observer_count(),
        carousel = page.has_carousel(),
        disabled = page.failures().len(),
        "landing page bound"
    );
    PAGE.with(|slot| *slot.borrow_mut() = Some(page));
    Ok(())
}

fn query_all(root: &Document, selector: &str) -> Result<Vec<Element>, BindError> {
    let list = root
        .query_selector_all(selector)
        .map_err(js_err("querySelectorAll"))?;
    Ok((0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

fn set_class(element: &Element, class: &str, on: bool) {
    let _ = element.class_list().toggle_with_force(class, on);
}

fn observe(
    targets: &[Element],
    init: &IntersectionObserverInit,
    mut on_entries: impl FnMut(Vec<IntersectionObserverEntry>, &IntersectionObserver) + 'static,
) -> Result<ObserverGuard, BindError> {
    let callback: ObserverCallback = Closure::new(move |entries: Array, observer: IntersectionObserver| {
        let entries = entries
            .iter()
            .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
            .collect();
        on_entries(entries, &observer);
    });
    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), init)
        .map_err(js_err("IntersectionObserver"))?;
    for target in targets {
        observer.observe(target);
    }
    Ok(ObserverGuard {
        observer,
        _callback: callback,
    })
}

fn index_of(elements: &[Element], target: &Element) -> Option<usize> {
    elements.iter().position(|element| element == target)
}

// ── Menu ────────────────────────────────────────────────────────────────

fn bind_menu(document: &Document, page: &mut BoundPage) -> Result<(), BindError> {
    let (Some(button), Some(nav)) = (
        document.get_element_by_id(ids::MENU_BUTTON),
        document.get_element_by_id(ids::NAV),
    ) else {
        debug!("menu not present");
        return Ok(());
    };
    let menu = Rc::new(RefCell::new(NavMenu::new()));
    let apply = {
        let button = button.clone();
        let nav = nav.clone();
        move |attrs: MenuAttributes| {
            set_class(&nav, classes::OPEN, attrs.open);
            let _ = button.set_attribute("aria-expanded", markup::bool_attr(attrs.aria_expanded));
            let _ = nav.set_attribute("aria-hidden", markup::bool_attr(attrs.aria_hidden));
        }
    };
    let apply = Rc::new(apply);

    {
        let menu = Rc::clone(&menu);
        let apply = Rc::clone(&apply);
        page.listeners.push(EventListener::new(&button, "click", move |_| {
            let attrs = menu.borrow_mut().toggle();
            apply(attrs);
        }));
    }
    {
        let menu = Rc::clone(&menu);
        let apply = Rc::clone(&apply);
        let button = button.clone();
        let nav = nav.clone();
        page.listeners.push(EventListener::new(document, "click", move |event| {
            let target = event.target().and_then(|t| t.dyn_into::<Node>().ok());
            let inside = nav.contains(target.as_ref()) || button.contains(target.as_ref());
            if let Some(attrs) = menu.borrow_mut().document_click(inside) {
                apply(attrs);
            }
        }));
    }
    for link in query_all(document, selectors::NAV_LINKS)? {
        let menu = Rc::clone(&menu);
        let apply = Rc::clone(&apply);
        page.listeners.push(EventListener::new(&link, "click", move |_| {
            if let Some(attrs) = menu.borrow_mut().link_clicked() {
                apply(attrs);
            }
        }));
    }
    Ok(())
}

// ── Carousel ────────────────────────────────────────────────────────────

fn touch_position(touch: &web_sys::Touch) -> PointerPosition {
    PointerPosition::new(f64::from(touch.client_x()), f64::from(touch.client_y()))
}

fn touches(list: &TouchList) -> impl Iterator<Item = web_sys::Touch> + '_ {
    (0..list.length()).filter_map(|i| list.get(i))
}

fn bind_carousel(document: &Document, config: &LandingConfig, page: &mut BoundPage) -> Result<(), BindError> {
    let (Some(slider), Some(slides)) = (
        document.get_element_by_id(ids::SLIDER),
        document.get_element_by_id(ids::SLIDES),
    ) else {
        debug!("carousel not present");
        return Ok(());
    };
    let slide_count = slides.child_element_count() as usize;
    if slide_count == 0 {
        debug!("carousel has no slides");
        return Ok(());
    }
    let slides: HtmlElement = slides.dyn_into().map_err(|_| BindError::js("#slides", "not an HTMLElement"))?;
    let toggle = document.get_element_by_id(ids::SLIDER_TOGGLE);
    let dots = document.get_element_by_id(ids::DOTS);

    let carousel: Rc<CarouselCell> = Rc::new_cyclic(|weak| {
        let mut builder = CarouselBuilder::new(IntervalTimerHost::new(weak.clone()))
            .strip(DomSlideStrip::new(slides.clone()), slide_count)
            .pause_control(DomPauseControl::new(slider.clone(), toggle.clone()))
            .config(config.carousel.clone());
        if let Some(container) = dots {
            builder = builder.indicators(DomDots::new(document.clone(), container, weak.clone()));
        }
        RefCell::new(builder.build())
    });
    let weak = Rc::downgrade(&carousel);

    let bubble = |passive| EventListenerOptions {
        phase: EventListenerPhase::Bubble,
        passive,
    };
    {
        let weak = weak.clone();
        page.listeners.push(EventListener::new_with_options(&slides, "touchstart", bubble(true), move |event| {
            let Some(event) = event.dyn_ref::<TouchEvent>() else {
                return;
            };
            if let Some(touch) = event.touches().get(0) {
                with_carousel(&weak, |c| {
                    let _ = c.pointer_down(touch.identifier(), PointerButton::Primary, touch_position(&touch));
                });
            }
        }));
    }
    {
        let weak = weak.clone();
        page.listeners.push(EventListener::new_with_options(&slides, "touchmove", bubble(false), move |event| {
            let Some(touch_event) = event.dyn_ref::<TouchEvent>() else {
                return;
            };
            let suppress = with_carousel(&weak, |c| {
                touches(&touch_event.changed_touches())
                    .map(|touch| c.pointer_move(touch.identifier(), touch_position(&touch)))
                    .fold(false, |any, outcome| any | outcome.suppresses_scroll())
            });
            if suppress == Some(true) {
                event.prevent_default();
            }
        }));
    }
    {
        let weak = weak.clone();
        page.listeners.push(EventListener::new(&slides, "touchend", move |event| {
            let Some(event) = event.dyn_ref::<TouchEvent>() else {
                return;
            };
            with_carousel(&weak, |c| {
                for touch in touches(&event.changed_touches()) {
                    let _ = c.pointer_up(touch.identifier());
                }
            });
        }));
    }
    {
        let weak = weak.clone();
        page.listeners.push(EventListener::new(&slides, "touchcancel", move |event| {
            let Some(event) = event.dyn_ref::<TouchEvent>() else {
                return;
            };
            with_carousel(&weak, |c| {
                for touch in touches(&event.changed_touches()) {
                    let _ = c.pointer_cancel(Some(touch.identifier()));
                }
            });
        }));
    }
    {
        let weak = weak.clone();
        page.listeners.push(EventListener::new(&slides, "mouseenter", move |_| {
            with_carousel(&weak, |c| c.hover_enter());
        }));
    }
    {
        let weak = weak.clone();
        page.listeners.push(EventListener::new(&slides, "mouseleave", move |_| {
            with_carousel(&weak, |c| c.hover_leave());
        }));
    }
    if let Some(toggle) = &toggle {
        let weak = weak.clone();
        page.listeners.push(EventListener::new(toggle, "click", move |_| {
            with_carousel(&weak, |c| c.toggle_paused());
        }));
    }

    page.carousel = Some(carousel);
    Ok(())
}

// ── Theme ───────────────────────────────────────────────────────────────

fn bind_theme(window: &Window, document: &Document, config: &LandingConfig, page: &mut BoundPage) -> Result<(), BindError> {
    let Some(body) = document.body() else {
        debug!("no body; theme not applied");
        return Ok(());
    };
    let os_prefers_dark = window
        .match_media(markup::DARK_SCHEME_QUERY)
        .ok()
        .flatten()
        .is_some_and(|query| query.matches());
    let storage = window.local_storage().ok().flatten();
    let switch = ThemeSwitch::resolve(
        LocalStorageStore::new(storage),
        config.theme.storage_key.clone(),
        os_prefers_dark,
    );
    body.set_attribute(markup::THEME_ATTRIBUTE, switch.current().as_str())
        .map_err(js_err("setAttribute"))?;

    let Some(button) = document.get_element_by_id(ids::THEME_TOGGLE) else {
        debug!("theme toggle not present");
        return Ok(());
    };
    let switch = RefCell::new(switch);
    page.listeners.push(EventListener::new(&button, "click", move |_| {
        let theme = switch.borrow_mut().toggle();
        let _ = body.set_attribute(markup::THEME_ATTRIBUTE, theme.as_str());
    }));
    Ok(())
}

// ── Scroll chrome ───────────────────────────────────────────────────────

fn bind_scroll_chrome(
    window: &Window,
    document: &Document,
    config: &LandingConfig,
    page: &mut BoundPage,
) -> Result<(), BindError> {
    let header = document
        .query_selector(selectors::HEADER)
        .map_err(js_err("querySelector"))?;
    let page_top = document.get_element_by_id(ids::PAGE_TOP);
    let progress = document
        .get_element_by_id(ids::PROGRESS_BAR)
        .and_then(|bar| bar.dyn_into::<HtmlElement>().ok());
    if header.is_none() && page_top.is_none() && progress.is_none() {
        debug!("no scroll chrome present");
        return Ok(());
    }

    let chrome = ScrollChrome::new(config.scroll.clone());
    let update = {
        let window = window.clone();
        let document = document.clone();
        move || {
            let Some(root) = document.document_element() else {
                return;
            };
            let metrics = ScrollMetrics {
                scroll_y: window.scroll_y().unwrap_or(0.0),
                scroll_height: f64::from(root.scroll_height()),
                client_height: f64::from(root.client_height()),
            };
            let state = chrome.update(metrics);
            if let Some(header) = &header {
                set_class(header, classes::SCROLLED, state.header_scrolled);
            }
            if let Some(button) = &page_top {
                set_class(button, classes::VISIBLE, state.back_to_top_visible);
            }
            if let Some(bar) = &progress {
                let _ = bar
                    .style()
                    .set_property("width", &markup::width_percent(state.progress_percent));
            }
        }
    };
    update();
    page.listeners.push(EventListener::new_with_options(
        window,
        "scroll",
        EventListenerOptions {
            phase: EventListenerPhase::Bubble,
            passive: true,
        },
        move |_| update(),
    ));
    Ok(())
}

// ── Reveal ──────────────────────────────────────────────────────────────

fn bind_reveal(document: &Document, config: &LandingConfig, page: &mut BoundPage) -> Result<(), BindError> {
    let elements = query_all(document, selectors::REVEAL)?;
    if elements.is_empty() {
        return Ok(());
    }
    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(config.reveal.threshold));
    let mut tracker = RevealTracker::new(elements.len(), config.reveal.threshold);
    let targets = elements.clone();
    let guard = observe(&targets, &init, move |entries, observer| {
        let reports: Vec<RevealEntry> = entries
            .iter()
            .filter_map(|entry| {
                Some(RevealEntry {
                    element: index_of(&elements, &entry.target())?,
                    is_intersecting: entry.is_intersecting(),
                    ratio: entry.intersection_ratio(),
                })
            })
            .collect();
        for index in tracker.observe(&reports) {
            let element = &elements[index];
            set_class(element, classes::VISIBLE, true);
            observer.unobserve(element);
        }
    })?;
    page.observers.push(guard);
    Ok(())
}

// ── Section highlight ───────────────────────────────────────────────────

fn bind_section_highlight(document: &Document, config: &LandingConfig, page: &mut BoundPage) -> Result<(), BindError> {
    let sections = query_all(document, selectors::SECTIONS)?;
    let links = query_all(document, selectors::NAV_LINKS)?;
    if sections.is_empty() {
        return Ok(());
    }
    let section_ids: Vec<String> = sections.iter().map(Element::id).collect();
    let hrefs: Vec<Option<String>> = links.iter().map(|link| link.get_attribute("href")).collect();
    let mut highlighter = SectionHighlighter::new(markup::link_for_sections(&section_ids, &hrefs));

    let band = DetectionBand::from(&config.sections);
    let init = IntersectionObserverInit::new();
    init.set_root_margin(&band.root_margin());
    init.set_threshold(&JsValue::from_f64(0.0));
    let targets = sections.clone();
    let guard = observe(&targets, &init, move |entries, _| {
        let reports: Vec<SectionEntry> = entries
            .iter()
            .filter_map(|entry| {
                Some(SectionEntry {
                    section: index_of(&sections, &entry.target())?,
                    is_intersecting: entry.is_intersecting(),
                })
            })
            .collect();
        if let Some(active) = highlighter.observe(&reports) {
            for (index, link) in links.iter().enumerate() {
                set_class(link, classes::NAV_ACTIVE, Some(index) == active);
            }
        }
    })?;
    page.observers.push(guard);
    Ok(())
}

// ── Accordion ───────────────────────────────────────────────────────────

fn bind_accordion(document: &Document, page: &mut BoundPage) -> Result<(), BindError> {
    let items: Vec<HtmlDetailsElement> = query_all(document, selectors::FAQ)?
        .into_iter()
        .filter_map(|element| element.dyn_into::<HtmlDetailsElement>().ok())
        .collect();
    if items.is_empty() {
        return Ok(());
    }
    let accordion = Accordion::from_open(items.iter().map(HtmlDetailsElement::open).collect());
    let accordion = Rc::new(RefCell::new(accordion));
    let items = Rc::new(items);
    for (index, item) in items.iter().enumerate() {
        let items = Rc::clone(&items);
        let accordion = Rc::clone(&accordion);
        // `toggle` does not bubble; each item needs its own listener.
        page.listeners.push(EventListener::new(item, "toggle", move |_| {
            let open = items[index].open();
            let close = accordion.borrow_mut().toggled(index, open);
            for other in close {
                items[other].set_open(false);
            }
        }));
    }
    Ok(())
}

// ── Quiz ────────────────────────────────────────────────────────────────

fn bind_quiz(document: &Document, config: &LandingConfig, page: &mut BoundPage) -> Result<(), BindError> {
    let Some(demo) = document.get_element_by_id(ids::QUIZ) else {
        debug!("quiz not present");
        return Ok(());
    };
    let list = demo
        .query_selector_all(selectors::QUIZ_OPTIONS)
        .map_err(js_err("querySelectorAll"))?;
    let buttons: Rc<Vec<Element>> = Rc::new(
        (0..list.length())
            .filter_map(|i| list.get(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect(),
    );
    let result = document.get_element_by_id(ids::QUIZ_RESULT);
    let correct = buttons
        .iter()
        .map(|button| button.get_attribute("data-correct").as_deref() == Some("true"))
        .collect();
    let quiz = Rc::new(RefCell::new(Quiz::new(correct, config.quiz.clone())));

    for (index, button) in buttons.iter().enumerate() {
        let buttons = Rc::clone(&buttons);
        let quiz = Rc::clone(&quiz);
        let result = result.clone();
        page.listeners.push(EventListener::new(button, "click", move |_| {
            let Some(outcome) = quiz.borrow_mut().answer(index) else {
                return;
            };
            if let Some(result) = &result {
                result.set_text_content(Some(outcome.message.as_str()));
                result.set_class_name(&markup::quiz_result_class(outcome.verdict));
            }
            set_class(&buttons[outcome.chosen], outcome.verdict.class(), true);
            if let Some(correct) = outcome.reveal_correct.and_then(|i| buttons.get(i)) {
                set_class(correct, classes::CORRECT, true);
            }
        }));
    }
    Ok(())
}

// ── Sticky call-to-action ───────────────────────────────────────────────

fn bind_sticky_cta(document: &Document, config: &LandingConfig, page: &mut BoundPage) -> Result<(), BindError> {
    let (Some(footer), Some(hero)) = (
        document.get_element_by_id(ids::STICKY_FOOTER),
        document.get_element_by_id(ids::HERO),
    ) else {
        debug!("sticky footer or hero not present");
        return Ok(());
    };
    let mut cta = StickyCta::new(&config.sticky_cta);
    let init = IntersectionObserverInit::new();
    init.set_root_margin(&cta.root_margin());
    let guard = observe(&[hero], &init, move |entries, _| {
        for entry in entries {
            let visible = cta.hero_intersecting(entry.is_intersecting());
            set_class(&footer, classes::VISIBLE, visible);
        }
    })?;
    page.observers.push(guard);
    Ok(())
}
