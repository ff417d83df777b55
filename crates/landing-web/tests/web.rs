//! Browser checks for the page contract and the bound behaviors. Run with
//! `wasm-pack test --headless`.

#![cfg(target_arch = "wasm32")]

use js_sys::{Array, Reflect};
use landing_core::LandingConfig;
use landing_core::quiz::Verdict;
use landing_web::markup::{self, classes, ids};
use landing_web::{BoundPage, bind_page};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;
use web_sys::{
    Element, Event, HtmlDetailsElement, HtmlElement, Touch, TouchEvent, TouchEventInit, TouchInit,
};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> web_sys::Document {
    web_sys::window().unwrap().document().unwrap()
}

/// Mount `html` in a fresh container at the end of `<body>`.
fn mount(html: &str) -> Element {
    let root = document().create_element("div").unwrap();
    root.set_inner_html(html);
    document().body().unwrap().append_child(&root).unwrap();
    root
}

fn bind() -> BoundPage {
    bind_page(&web_sys::window().unwrap(), &document(), &LandingConfig::default())
}

fn by_id(id: &str) -> HtmlElement {
    document().get_element_by_id(id).unwrap().dyn_into().unwrap()
}

fn has_class(element: &Element, class: &str) -> bool {
    element.class_list().contains(class)
}

const CAROUSEL: &str = r#"
    <div id="slider">
      <div id="slides"><div>one</div><div>two</div><div>three</div></div>
      <div id="dots"></div>
    </div>"#;

/// A touch event on `target` with one touch at `(x, y)`, or `None` where the
/// browser does not construct touches.
fn touch_event(kind: &str, target: &Element, x: i32, y: i32) -> Option<TouchEvent> {
    let init = TouchInit::new(7, target);
    init.set_client_x(x);
    init.set_client_y(y);
    let touch = Touch::new(&init).ok()?;
    let list = Array::of1(&touch);
    let event_init = TouchEventInit::new();
    event_init.set_bubbles(true);
    event_init.set_cancelable(true);
    event_init.set_changed_touches(&list);
    if kind != "touchend" {
        event_init.set_touches(&list);
    }
    TouchEvent::new_with_event_init_dict(kind, &event_init).ok()
}

fn fire(target: &Element, event: &TouchEvent) -> bool {
    target.dispatch_event(event).unwrap();
    event.default_prevented()
}

#[wasm_bindgen_test]
fn slide_transform_is_accepted_by_the_browser() {
    let strip: HtmlElement = document().create_element("div").unwrap().dyn_into().unwrap();
    strip
        .style()
        .set_property("transform", &markup::translate_x(-200.0))
        .unwrap();
    assert_eq!(
        strip.style().get_property_value("transform").unwrap(),
        "translateX(-200%)"
    );
}

#[wasm_bindgen_test]
fn config_block_is_read_from_a_json_script() {
    let doc = document();
    let script = doc.create_element("script").unwrap();
    script.set_attribute("type", "application/json").unwrap();
    script.set_id(markup::CONFIG_SCRIPT_ID);
    script.set_text_content(Some(r#"{ "reveal": { "threshold": 0.3 } }"#));
    doc.body().unwrap().append_child(&script).unwrap();

    let raw = doc
        .get_element_by_id(markup::CONFIG_SCRIPT_ID)
        .and_then(|el| el.text_content());
    let config = landing_web::load_config(raw.as_deref()).unwrap();
    assert_eq!(config.reveal.threshold, 0.3);
    script.remove();
}

#[wasm_bindgen_test]
fn dot_class_marks_the_active_dot() {
    let dot = document().create_element("div").unwrap();
    dot.set_class_name(markup::dot_class(true));
    assert!(dot.class_list().contains(classes::DOT));
    assert!(dot.class_list().contains(classes::ACTIVE));
}

#[wasm_bindgen_test]
fn dot_click_moves_the_active_dot_and_the_strip() {
    let root = mount(CAROUSEL);
    let page = bind();
    assert!(page.has_carousel());

    let dots = by_id(ids::DOTS).children();
    assert_eq!(dots.length(), 3);
    assert!(has_class(&dots.item(0).unwrap(), classes::ACTIVE));

    let third: HtmlElement = dots.item(2).unwrap().dyn_into().unwrap();
    third.click();
    assert!(has_class(&third, classes::ACTIVE));
    assert!(!has_class(&dots.item(0).unwrap(), classes::ACTIVE));
    assert_eq!(
        by_id(ids::SLIDES).style().get_property_value("transform").unwrap(),
        "translateX(-200%)"
    );

    drop(page);
    root.remove();
}

#[wasm_bindgen_test]
fn touchmove_blocks_scrolling_only_for_a_horizontal_swipe() {
    let root = mount(CAROUSEL);
    let page = bind();
    let slides: Element = by_id(ids::SLIDES).into();

    let Some(start) = touch_event("touchstart", &slides, 200, 100) else {
        // No `Touch` constructor in this browser.
        drop(page);
        root.remove();
        return;
    };
    fire(&slides, &start);
    let sideways = touch_event("touchmove", &slides, 120, 104).unwrap();
    assert!(fire(&slides, &sideways));
    fire(&slides, &touch_event("touchend", &slides, 120, 104).unwrap());
    let dots = by_id(ids::DOTS).children();
    assert!(has_class(&dots.item(1).unwrap(), classes::ACTIVE));

    fire(&slides, &touch_event("touchstart", &slides, 200, 100).unwrap());
    let downwards = touch_event("touchmove", &slides, 204, 180).unwrap();
    assert!(!fire(&slides, &downwards));
    fire(&slides, &touch_event("touchend", &slides, 204, 180).unwrap());
    assert!(has_class(&dots.item(1).unwrap(), classes::ACTIVE));

    drop(page);
    root.remove();
}

#[wasm_bindgen_test]
fn opening_a_faq_item_closes_the_one_open_in_markup() {
    let root = mount(
        r#"<details class="faq" open><summary>a</summary></details>
           <details class="faq"><summary>b</summary></details>"#,
    );
    let page = bind();
    let items: Vec<HtmlDetailsElement> = (0..2)
        .map(|i| {
            root.query_selector_all(".faq")
                .unwrap()
                .item(i)
                .unwrap()
                .dyn_into()
                .unwrap()
        })
        .collect();
    assert!(items[0].open());

    items[1].set_open(true);
    items[1].dispatch_event(&Event::new("toggle").unwrap()).unwrap();
    assert!(!items[0].open());
    assert!(items[1].open());

    drop(page);
    root.remove();
}

#[wasm_bindgen_test]
fn quiz_locks_after_the_first_answer() {
    let root = mount(
        r#"<div id="interactiveDemo">
             <div class="demo-options">
               <button data-correct="false">a</button>
               <button data-correct="true">b</button>
               <button data-correct="false">c</button>
             </div>
             <div id="demoResult" class="demo-result"></div>
           </div>"#,
    );
    let page = bind();
    let buttons = root.query_selector_all(".demo-options button").unwrap();
    let button = |i: u32| -> HtmlElement { buttons.item(i).unwrap().dyn_into().unwrap() };
    let result = by_id(ids::QUIZ_RESULT);

    button(0).click();
    assert!(has_class(&button(0), Verdict::Wrong.class()));
    assert!(has_class(&button(1), classes::CORRECT));
    assert_eq!(result.class_name(), markup::quiz_result_class(Verdict::Wrong));
    let message = result.text_content();

    button(2).click();
    button(1).click();
    assert!(!has_class(&button(2), Verdict::Wrong.class()));
    assert_eq!(result.class_name(), markup::quiz_result_class(Verdict::Wrong));
    assert_eq!(result.text_content(), message);

    drop(page);
    root.remove();
}

#[wasm_bindgen_test]
fn failing_behavior_leaves_the_others_bound() {
    let root = mount(
        r##"<button id="menuBtn">menu</button>
           <nav id="globalNav"><a href="#top">top</a></nav>
           <div class="reveal">later</div>"##,
    );
    let window = web_sys::window().unwrap();
    let key = JsValue::from_str("IntersectionObserver");
    let observer = Reflect::get(&window, &key).unwrap();
    Reflect::delete_property(window.unchecked_ref::<js_sys::Object>(), &key).unwrap();
    let page = bind();
    Reflect::set(&window, &key, &observer).unwrap();

    assert!(page.failures().iter().any(|(behavior, _)| *behavior == "reveal"));
    assert_eq!(page.observer_count(), 0);
    by_id(ids::MENU_BUTTON).click();
    assert!(has_class(&by_id(ids::NAV), classes::OPEN));

    drop(page);
    root.remove();
}
