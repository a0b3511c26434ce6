use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::js_sys;
use web_sys::{
    AddEventListenerOptions, Element, HtmlElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, MouseEvent,
};
use yew::prelude::*;

// Reveal classes swap at these visibility ratios: a sliver of the element
// peeks in early, the full entrance plays from about a third visible.
const PEEK_RATIO: f64 = 0.02;
const SHOW_RATIO: f64 = 0.35;
const REVEAL_THRESHOLDS: [f64; 7] = [0.0, 0.02, 0.08, 0.18, 0.35, 0.6, 1.0];

/// Watches every `.reveal` element with one IntersectionObserver and flips
/// `peek`/`show` classes as they scroll in. Elements get a staggered `--d`
/// delay by document order. Without observer support everything shows
/// immediately.
#[hook]
pub fn use_reveal_on_scroll() {
    use_effect_with_deps(
        |_| {
            let mut observer: Option<IntersectionObserver> = None;
            let mut handler: Option<Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>> =
                None;

            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                let elements: Vec<Element> = document
                    .query_selector_all(".reveal")
                    .map(|nodes| {
                        (0..nodes.length())
                            .filter_map(|i| nodes.item(i))
                            .filter_map(|node| node.dyn_into::<Element>().ok())
                            .collect()
                    })
                    .unwrap_or_default();

                if !observer_supported() {
                    for element in &elements {
                        let _ = element.class_list().add_1("show");
                    }
                } else {
                    for (index, element) in elements.iter().enumerate() {
                        if let Some(html) = element.dyn_ref::<HtmlElement>() {
                            let delay = (index as f64 * 0.06).min(0.5);
                            let _ = html.style().set_property("--d", &format!("{delay}s"));
                        }
                    }

                    let callback = Closure::wrap(Box::new(
                        move |entries: js_sys::Array, io: IntersectionObserver| {
                            for entry in entries.iter() {
                                let entry: IntersectionObserverEntry = entry.unchecked_into();
                                let element = entry.target();
                                let ratio = entry.intersection_ratio();
                                if ratio >= SHOW_RATIO {
                                    let _ = element.class_list().add_1("show");
                                    let _ = element.class_list().remove_1("peek");
                                    io.unobserve(&element);
                                } else if ratio > PEEK_RATIO {
                                    let _ = element.class_list().add_1("peek");
                                } else {
                                    let _ = element.class_list().remove_1("peek");
                                }
                            }
                        },
                    )
                        as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

                    let thresholds = js_sys::Array::new();
                    for t in REVEAL_THRESHOLDS {
                        thresholds.push(&JsValue::from_f64(t));
                    }
                    let options = IntersectionObserverInit::new();
                    options.set_threshold(&thresholds.into());

                    if let Ok(io) = IntersectionObserver::new_with_options(
                        callback.as_ref().unchecked_ref(),
                        &options,
                    ) {
                        for element in &elements {
                            io.observe(element);
                        }
                        observer = Some(io);
                        handler = Some(callback);
                    }
                }
            }

            move || {
                if let Some(io) = observer {
                    io.disconnect();
                }
                drop(handler);
            }
        },
        (),
    );
}

/// While the mouse drags from a non-textual element, puts `no-select-drag`
/// on the body so carousel swipes and slider drags do not smear text
/// selection across the page.
#[hook]
pub fn use_drag_select_guard() {
    use_effect_with_deps(
        |_| {
            let down = Closure::wrap(Box::new(move |event: MouseEvent| {
                if event.button() != 0 {
                    return;
                }
                let textual = event
                    .target()
                    .and_then(|target| target.dyn_into::<Element>().ok())
                    .map(|element| is_textual(&element))
                    .unwrap_or(false);
                if textual {
                    return;
                }
                if let Some(body) = web_sys::window().and_then(|w| w.document()).and_then(|d| d.body())
                {
                    let _ = body.class_list().add_1("no-select-drag");
                }
            }) as Box<dyn FnMut(MouseEvent)>);

            let release = Closure::wrap(Box::new(move || {
                if let Some(body) = web_sys::window().and_then(|w| w.document()).and_then(|d| d.body())
                {
                    let _ = body.class_list().remove_1("no-select-drag");
                }
            }) as Box<dyn FnMut()>);

            if let Some(window) = web_sys::window() {
                let options = AddEventListenerOptions::new();
                options.set_passive(true);
                let _ = window.add_event_listener_with_callback_and_add_event_listener_options(
                    "mousedown",
                    down.as_ref().unchecked_ref(),
                    &options,
                );
                let _ = window
                    .add_event_listener_with_callback("mouseup", release.as_ref().unchecked_ref());
                let _ = window
                    .add_event_listener_with_callback("blur", release.as_ref().unchecked_ref());
                if let Some(document) = window.document() {
                    let _ = document.add_event_listener_with_callback(
                        "mouseleave",
                        release.as_ref().unchecked_ref(),
                    );
                }
            }

            move || {
                if let Some(window) = web_sys::window() {
                    let _ = window.remove_event_listener_with_callback(
                        "mousedown",
                        down.as_ref().unchecked_ref(),
                    );
                    let _ = window.remove_event_listener_with_callback(
                        "mouseup",
                        release.as_ref().unchecked_ref(),
                    );
                    let _ = window.remove_event_listener_with_callback(
                        "blur",
                        release.as_ref().unchecked_ref(),
                    );
                    if let Some(document) = window.document() {
                        let _ = document.remove_event_listener_with_callback(
                            "mouseleave",
                            release.as_ref().unchecked_ref(),
                        );
                    }
                }
            }
        },
        (),
    );
}

pub fn observer_supported() -> bool {
    web_sys::window()
        .map(|w| {
            js_sys::Reflect::has(w.as_ref(), &JsValue::from_str("IntersectionObserver"))
                .unwrap_or(false)
        })
        .unwrap_or(false)
}

fn is_textual(element: &Element) -> bool {
    if matches!(
        element.closest("input, textarea, select, [contenteditable=\"true\"]"),
        Ok(Some(_))
    ) {
        return true;
    }
    const TEXT_TAGS: [&str; 15] = [
        "P", "SPAN", "A", "STRONG", "EM", "H1", "H2", "H3", "H4", "H5", "H6", "LI", "CODE",
        "PRE", "LABEL",
    ];
    if TEXT_TAGS.contains(&element.tag_name().as_str()) {
        return true;
    }
    web_sys::window()
        .and_then(|w| w.get_computed_style(element).ok().flatten())
        .map(|style| {
            style
                .get_property_value("user-select")
                .map(|value| value == "text")
                .unwrap_or(false)
        })
        .unwrap_or(false)
}
