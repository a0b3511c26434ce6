use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, MediaQueryList, MouseEvent};
use yew::prelude::*;

const THUMB_HEIGHT: f64 = 35.0;
const TRACK_GAP_NAV: f64 = 4.0;
const TRACK_GAP_BOTTOM: f64 = 12.0;
const HIDE_AFTER_SCROLL_MILLIS: u32 = 1_200;
const HIDE_AFTER_POINTER_MILLIS: u32 = 800;

fn media(query: &str) -> Option<MediaQueryList> {
    web_sys::window()?.match_media(query).ok().flatten()
}

fn coarse_pointer() -> bool {
    media("(pointer: coarse)").map(|q| q.matches()).unwrap_or(false)
}

fn narrow_viewport() -> bool {
    media("(max-width: 760px)").map(|q| q.matches()).unwrap_or(false)
}

/// (scroll_y, viewport height, full document height).
fn page_metrics() -> Option<(f64, f64, f64)> {
    let window = web_sys::window()?;
    let root = window.document()?.document_element()?;
    let viewport = window.inner_height().ok()?.as_f64()?;
    let scroll_y = window.scroll_y().ok()?;
    Some((scroll_y, viewport, root.scroll_height() as f64))
}

/// Replacement scrollbar for desktop: a fixed right-edge track under the
/// nav with a fixed-height draggable thumb. Shows on scroll, resize and
/// hover, fades shortly after, and bows out entirely on coarse pointers,
/// narrow viewports or pages that do not scroll.
#[function_component(OverlayScrollbar)]
pub fn overlay_scrollbar() -> Html {
    let track_ref = use_node_ref();
    let thumb_ref = use_node_ref();

    {
        let track_ref = track_ref.clone();
        let thumb_ref = thumb_ref.clone();
        use_effect_with_deps(
            move |_| {
                let mut teardown: Vec<Box<dyn FnOnce()>> = Vec::new();

                if let Some(window) = web_sys::window() {
                    let dragging = Rc::new(Cell::new(false));
                    let hovered = Rc::new(Cell::new(false));
                    // (mouse y, scroll y) at drag start.
                    let drag_origin = Rc::new(Cell::new((0.0f64, 0.0f64)));
                    let hide_timer: Rc<RefCell<Option<Timeout>>> = Rc::new(RefCell::new(None));

                    let layout = {
                        let track_ref = track_ref.clone();
                        let thumb_ref = thumb_ref.clone();
                        move || {
                            let pair = track_ref
                                .cast::<HtmlElement>()
                                .zip(thumb_ref.cast::<HtmlElement>());
                            if let Some((track, thumb)) = pair {
                                let metrics = page_metrics();
                                let scrollable = metrics
                                    .map(|(_, viewport, full)| full > viewport + 1.0)
                                    .unwrap_or(false);
                                if coarse_pointer() || narrow_viewport() || !scrollable {
                                    let _ = track.style().set_property("display", "none");
                                    return;
                                }
                                let _ = track.style().remove_property("display");

                                let nav_height = web_sys::window()
                                    .and_then(|w| w.document())
                                    .and_then(|d| d.query_selector(".site-nav").ok().flatten())
                                    .and_then(|nav| nav.dyn_into::<HtmlElement>().ok())
                                    .map(|nav| nav.offset_height() as f64)
                                    .unwrap_or(0.0);
                                let _ = track.style().set_property(
                                    "top",
                                    &format!("{}px", nav_height + TRACK_GAP_NAV),
                                );
                                let _ = track
                                    .style()
                                    .set_property("bottom", &format!("{}px", TRACK_GAP_BOTTOM));

                                if let Some((scroll_y, viewport, full)) = metrics {
                                    let travel =
                                        (track.client_height() as f64 - THUMB_HEIGHT).max(0.0);
                                    let max_scroll = (full - viewport).max(1.0);
                                    let offset =
                                        (scroll_y / max_scroll).clamp(0.0, 1.0) * travel;
                                    let _ = thumb.style().set_property(
                                        "transform",
                                        &format!("translateY({:.1}px)", offset),
                                    );
                                }
                            }
                        }
                    };

                    let reveal = {
                        let track_ref = track_ref.clone();
                        let hide_timer = hide_timer.clone();
                        let dragging = dragging.clone();
                        let hovered = hovered.clone();
                        move |linger: u32| {
                            if let Some(track) = track_ref.cast::<HtmlElement>() {
                                let _ = track.class_list().add_1("visible");
                            }
                            let track_ref = track_ref.clone();
                            let dragging = dragging.clone();
                            let hovered = hovered.clone();
                            *hide_timer.borrow_mut() = Some(Timeout::new(linger, move || {
                                if dragging.get() || hovered.get() {
                                    return;
                                }
                                if let Some(track) = track_ref.cast::<HtmlElement>() {
                                    let _ = track.class_list().remove_1("visible");
                                }
                            }));
                        }
                    };

                    let on_scroll = Closure::wrap(Box::new({
                        let layout = layout.clone();
                        let reveal = reveal.clone();
                        move |_: web_sys::Event| {
                            layout();
                            reveal(HIDE_AFTER_SCROLL_MILLIS);
                        }
                    }) as Box<dyn FnMut(web_sys::Event)>);
                    let _ = window.add_event_listener_with_callback(
                        "scroll",
                        on_scroll.as_ref().unchecked_ref(),
                    );
                    {
                        let window = window.clone();
                        teardown.push(Box::new(move || {
                            let _ = window.remove_event_listener_with_callback(
                                "scroll",
                                on_scroll.as_ref().unchecked_ref(),
                            );
                        }));
                    }

                    let on_resize = Closure::wrap(Box::new({
                        let layout = layout.clone();
                        let reveal = reveal.clone();
                        move |_: web_sys::Event| {
                            layout();
                            reveal(HIDE_AFTER_POINTER_MILLIS);
                        }
                    }) as Box<dyn FnMut(web_sys::Event)>);
                    let _ = window.add_event_listener_with_callback(
                        "resize",
                        on_resize.as_ref().unchecked_ref(),
                    );
                    {
                        let window = window.clone();
                        teardown.push(Box::new(move || {
                            let _ = window.remove_event_listener_with_callback(
                                "resize",
                                on_resize.as_ref().unchecked_ref(),
                            );
                        }));
                    }

                    if let Some(track) = track_ref.cast::<HtmlElement>() {
                        let on_enter = Closure::wrap(Box::new({
                            let hovered = hovered.clone();
                            let reveal = reveal.clone();
                            move |_: MouseEvent| {
                                hovered.set(true);
                                reveal(HIDE_AFTER_POINTER_MILLIS);
                            }
                        })
                            as Box<dyn FnMut(MouseEvent)>);
                        let on_leave = Closure::wrap(Box::new({
                            let hovered = hovered.clone();
                            let reveal = reveal.clone();
                            move |_: MouseEvent| {
                                hovered.set(false);
                                reveal(HIDE_AFTER_POINTER_MILLIS);
                            }
                        })
                            as Box<dyn FnMut(MouseEvent)>);
                        let _ = track.add_event_listener_with_callback(
                            "mouseenter",
                            on_enter.as_ref().unchecked_ref(),
                        );
                        let _ = track.add_event_listener_with_callback(
                            "mouseleave",
                            on_leave.as_ref().unchecked_ref(),
                        );
                        teardown.push(Box::new(move || {
                            let _ = track.remove_event_listener_with_callback(
                                "mouseenter",
                                on_enter.as_ref().unchecked_ref(),
                            );
                            let _ = track.remove_event_listener_with_callback(
                                "mouseleave",
                                on_leave.as_ref().unchecked_ref(),
                            );
                        }));
                    }

                    if let Some(thumb) = thumb_ref.cast::<HtmlElement>() {
                        let on_down = Closure::wrap(Box::new({
                            let dragging = dragging.clone();
                            let drag_origin = drag_origin.clone();
                            let reveal = reveal.clone();
                            move |event: MouseEvent| {
                                event.prevent_default();
                                let scroll_y =
                                    page_metrics().map(|(y, _, _)| y).unwrap_or(0.0);
                                drag_origin.set((event.client_y() as f64, scroll_y));
                                dragging.set(true);
                                reveal(HIDE_AFTER_SCROLL_MILLIS);
                            }
                        })
                            as Box<dyn FnMut(MouseEvent)>);
                        let _ = thumb.add_event_listener_with_callback(
                            "mousedown",
                            on_down.as_ref().unchecked_ref(),
                        );
                        teardown.push(Box::new(move || {
                            let _ = thumb.remove_event_listener_with_callback(
                                "mousedown",
                                on_down.as_ref().unchecked_ref(),
                            );
                        }));
                    }

                    let on_move = Closure::wrap(Box::new({
                        let dragging = dragging.clone();
                        let drag_origin = drag_origin.clone();
                        let track_ref = track_ref.clone();
                        let layout = layout.clone();
                        let window = window.clone();
                        move |event: MouseEvent| {
                            if !dragging.get() {
                                return;
                            }
                            let travel = track_ref
                                .cast::<HtmlElement>()
                                .map(|track| (track.client_height() as f64 - THUMB_HEIGHT).max(1.0))
                                .unwrap_or(1.0);
                            if let Some((_, viewport, full)) = page_metrics() {
                                let (start_mouse, start_scroll) = drag_origin.get();
                                let max_scroll = (full - viewport).max(0.0);
                                let delta = (event.client_y() as f64 - start_mouse) / travel;
                                let target =
                                    (start_scroll + delta * max_scroll).clamp(0.0, max_scroll);
                                window.scroll_to_with_x_and_y(0.0, target);
                                layout();
                            }
                        }
                    })
                        as Box<dyn FnMut(MouseEvent)>);
                    let _ = window.add_event_listener_with_callback(
                        "mousemove",
                        on_move.as_ref().unchecked_ref(),
                    );
                    {
                        let window = window.clone();
                        teardown.push(Box::new(move || {
                            let _ = window.remove_event_listener_with_callback(
                                "mousemove",
                                on_move.as_ref().unchecked_ref(),
                            );
                        }));
                    }

                    let on_up = Closure::wrap(Box::new({
                        let dragging = dragging.clone();
                        let reveal = reveal.clone();
                        move |_: MouseEvent| {
                            if dragging.get() {
                                dragging.set(false);
                                reveal(HIDE_AFTER_POINTER_MILLIS);
                            }
                        }
                    })
                        as Box<dyn FnMut(MouseEvent)>);
                    let _ = window.add_event_listener_with_callback(
                        "mouseup",
                        on_up.as_ref().unchecked_ref(),
                    );
                    {
                        let window = window.clone();
                        teardown.push(Box::new(move || {
                            let _ = window.remove_event_listener_with_callback(
                                "mouseup",
                                on_up.as_ref().unchecked_ref(),
                            );
                        }));
                    }

                    for query_text in ["(pointer: coarse)", "(max-width: 760px)"] {
                        if let Some(query) = media(query_text) {
                            let on_change = Closure::wrap(Box::new({
                                let layout = layout.clone();
                                move |_: web_sys::Event| layout()
                            })
                                as Box<dyn FnMut(web_sys::Event)>);
                            let _ = query.add_event_listener_with_callback(
                                "change",
                                on_change.as_ref().unchecked_ref(),
                            );
                            teardown.push(Box::new(move || {
                                let _ = query.remove_event_listener_with_callback(
                                    "change",
                                    on_change.as_ref().unchecked_ref(),
                                );
                            }));
                        }
                    }

                    layout();
                    teardown.push(Box::new(move || {
                        hide_timer.borrow_mut().take();
                    }));
                }

                move || {
                    for release in teardown {
                        release();
                    }
                }
            },
            (),
        );
    }

    html! {
        <>
            <style>{SCROLLBAR_CSS}</style>
            <div ref={track_ref} class="os-track" aria-hidden="true">
                <div ref={thumb_ref} class="os-thumb"></div>
            </div>
        </>
    }
}

const SCROLLBAR_CSS: &str = r#"
    .os-track {
        position: fixed;
        right: 4px;
        width: 8px;
        z-index: 90;
        opacity: 0;
        transition: opacity 0.25s ease;
        pointer-events: auto;
    }
    .os-track.visible {
        opacity: 1;
    }
    .os-thumb {
        position: absolute;
        left: 0;
        right: 0;
        height: 35px;
        border-radius: 999px;
        background: rgba(255, 153, 0, 0.55);
        cursor: grab;
    }
    .os-thumb:active {
        cursor: grabbing;
        background: rgba(255, 153, 0, 0.8);
    }
"#;
