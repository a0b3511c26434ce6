use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, Element, Event, HtmlElement, KeyboardEvent, MouseEvent};
use yew::prelude::*;

pub const CLOSE_ANIMATION_MILLIS: u32 = 180;

/// Fullscreen image preview state. Closing is two-phase so the exit
/// animation can play: open -> closing -> gone.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LightboxState {
    open: bool,
    closing: bool,
    src: String,
    alt: String,
}

impl LightboxState {
    pub fn open(&mut self, src: String, alt: String) {
        self.open = true;
        self.closing = false;
        self.src = src;
        self.alt = alt;
    }

    /// Starts the exit animation. Returns false when there is nothing to
    /// close, including while a close is already running.
    pub fn begin_close(&mut self) -> bool {
        if !self.open {
            return false;
        }
        self.open = false;
        self.closing = true;
        true
    }

    /// Ends the exit animation. A stale timer firing after a reopen is a
    /// no-op because `open` already cleared `closing`.
    pub fn finish_close(&mut self) {
        if !self.closing {
            return;
        }
        self.closing = false;
        self.src.clear();
        self.alt.clear();
    }

    pub fn visible(&self) -> bool {
        self.open || self.closing
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn closing(&self) -> bool {
        self.closing
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    pub fn alt(&self) -> &str {
        &self.alt
    }
}

pub enum LightboxAction {
    Open { src: String, alt: String },
    BeginClose,
    FinishClose,
}

impl Reducible for LightboxState {
    type Action = LightboxAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            LightboxAction::Open { src, alt } => next.open(src, alt),
            LightboxAction::BeginClose => {
                next.begin_close();
            }
            LightboxAction::FinishClose => next.finish_close(),
        }
        Rc::new(next)
    }
}

/// One lightbox per page, fed by every section that zooms images. `open`
/// takes (src, alt); `request_close` runs the timed two-phase close.
#[derive(Clone)]
pub struct LightboxHandle {
    state: UseReducerHandle<LightboxState>,
    pub open: Callback<(String, String)>,
    pub request_close: Callback<()>,
}

impl LightboxHandle {
    pub fn state(&self) -> LightboxState {
        (*self.state).clone()
    }
}

#[hook]
pub fn use_lightbox() -> LightboxHandle {
    let state = use_reducer(LightboxState::default);
    let close_timer = use_mut_ref(|| Option::<Timeout>::None);

    let open = {
        let state = state.clone();
        let close_timer = close_timer.clone();
        Callback::from(move |(src, alt): (String, String)| {
            close_timer.borrow_mut().take();
            state.dispatch(LightboxAction::Open { src, alt });
        })
    };

    let request_close = {
        let state = state.clone();
        let close_timer = close_timer.clone();
        Callback::from(move |_: ()| {
            if !state.is_open() {
                return;
            }
            state.dispatch(LightboxAction::BeginClose);
            let state = state.clone();
            *close_timer.borrow_mut() = Some(Timeout::new(CLOSE_ANIMATION_MILLIS, move || {
                state.dispatch(LightboxAction::FinishClose);
            }));
        })
    };

    LightboxHandle { state, open, request_close }
}

/// Blocks page scroll while the overlay is up: overflow hidden plus wheel,
/// touchmove and scroll-key suppression. Dropping it undoes everything.
struct ScrollLock {
    prevent: Closure<dyn FnMut(Event)>,
    keydown: Closure<dyn FnMut(KeyboardEvent)>,
    saved_overflow: String,
}

impl ScrollLock {
    fn engage() -> Option<Self> {
        let window = web_sys::window()?;
        let body = window.document()?.body()?;

        let saved_overflow = body.style().get_property_value("overflow").unwrap_or_default();
        let _ = body.style().set_property("overflow", "hidden");

        let prevent = Closure::wrap(Box::new(move |event: Event| {
            event.prevent_default();
        }) as Box<dyn FnMut(Event)>);
        let options = AddEventListenerOptions::new();
        options.set_passive(false);
        let _ = window.add_event_listener_with_callback_and_add_event_listener_options(
            "wheel",
            prevent.as_ref().unchecked_ref(),
            &options,
        );
        let _ = window.add_event_listener_with_callback_and_add_event_listener_options(
            "touchmove",
            prevent.as_ref().unchecked_ref(),
            &options,
        );

        let keydown = Closure::wrap(Box::new(move |event: KeyboardEvent| {
            const SCROLL_KEYS: [&str; 7] =
                [" ", "PageUp", "PageDown", "End", "Home", "ArrowUp", "ArrowDown"];
            if !SCROLL_KEYS.contains(&event.key().as_str()) {
                return;
            }
            let editable = event
                .target()
                .and_then(|target| target.dyn_into::<Element>().ok())
                .map(|el| matches!(el.tag_name().as_str(), "INPUT" | "TEXTAREA" | "SELECT"))
                .unwrap_or(false);
            if !editable {
                event.prevent_default();
            }
        }) as Box<dyn FnMut(KeyboardEvent)>);
        let _ = window
            .add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref());

        Some(Self { prevent, keydown, saved_overflow })
    }
}

impl Drop for ScrollLock {
    fn drop(&mut self) {
        if let Some(window) = web_sys::window() {
            let _ = window
                .remove_event_listener_with_callback("wheel", self.prevent.as_ref().unchecked_ref());
            let _ = window.remove_event_listener_with_callback(
                "touchmove",
                self.prevent.as_ref().unchecked_ref(),
            );
            let _ = window.remove_event_listener_with_callback(
                "keydown",
                self.keydown.as_ref().unchecked_ref(),
            );
            if let Some(body) = window.document().and_then(|d| d.body()) {
                if self.saved_overflow.is_empty() {
                    let _ = body.style().remove_property("overflow");
                } else {
                    let _ = body.style().set_property("overflow", &self.saved_overflow);
                }
            }
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct LightboxProps {
    pub state: LightboxState,
    pub on_close: Callback<()>,
}

#[function_component(Lightbox)]
pub fn lightbox(props: &LightboxProps) -> Html {
    let close_button = use_node_ref();
    let lock = use_mut_ref(|| Option::<ScrollLock>::None);

    {
        let on_close = props.on_close.clone();
        let lock = lock.clone();
        use_effect_with_deps(
            move |visible| {
                let mut escape: Option<Closure<dyn FnMut(KeyboardEvent)>> = None;
                if *visible {
                    if lock.borrow().is_none() {
                        *lock.borrow_mut() = ScrollLock::engage();
                    }
                    let handler = Closure::wrap(Box::new(move |event: KeyboardEvent| {
                        if event.key() == "Escape" {
                            on_close.emit(());
                        }
                    }) as Box<dyn FnMut(KeyboardEvent)>);
                    if let Some(window) = web_sys::window() {
                        let _ = window.add_event_listener_with_callback(
                            "keydown",
                            handler.as_ref().unchecked_ref(),
                        );
                    }
                    escape = Some(handler);
                } else {
                    lock.borrow_mut().take();
                }
                move || {
                    if let Some(handler) = escape.take() {
                        if let Some(window) = web_sys::window() {
                            let _ = window.remove_event_listener_with_callback(
                                "keydown",
                                handler.as_ref().unchecked_ref(),
                            );
                        }
                    }
                }
            },
            props.state.visible(),
        );
    }

    {
        let close_button = close_button.clone();
        use_effect_with_deps(
            move |open| {
                if *open {
                    if let Some(button) = close_button.cast::<HtmlElement>() {
                        let _ = button.focus();
                    }
                }
                || ()
            },
            props.state.is_open(),
        );
    }

    if !props.state.visible() {
        return Html::default();
    }

    let overlay_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };
    let close_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };
    let swallow_click = Callback::from(|event: MouseEvent| event.stop_propagation());

    let host = match web_sys::window().and_then(|w| w.document()).and_then(|d| d.body()) {
        Some(body) => Element::from(body),
        None => return Html::default(),
    };

    let overlay = html! {
        <div
            class={classes!("lightbox-overlay", props.state.closing().then(|| "closing"))}
            role="dialog"
            aria-modal="true"
            aria-label="Image preview"
            onclick={overlay_click}
        >
            <style>{r#"
                .lightbox-overlay {
                    position: fixed;
                    inset: 0;
                    z-index: 1200;
                    display: flex;
                    align-items: center;
                    justify-content: center;
                    background: rgba(5, 4, 3, 0.84);
                    backdrop-filter: blur(2px);
                    animation: lightbox-in 0.18s ease;
                }
                .lightbox-overlay.closing {
                    animation: lightbox-out 0.18s ease forwards;
                }
                .lightbox-frame {
                    position: relative;
                    margin: 0;
                }
                .lightbox-frame img {
                    display: block;
                    max-width: 92vw;
                    max-height: 86vh;
                    border-radius: 10px;
                    box-shadow: 0 18px 60px rgba(0, 0, 0, 0.6);
                }
                .lightbox-close {
                    position: absolute;
                    top: -14px;
                    right: -14px;
                    width: 34px;
                    height: 34px;
                    border: none;
                    border-radius: 50%;
                    background: #ff9900;
                    color: #140d06;
                    font-size: 1.1rem;
                    font-weight: 700;
                    cursor: pointer;
                    line-height: 1;
                }
                .lightbox-close:focus-visible {
                    outline: 2px solid #fff;
                    outline-offset: 2px;
                }
                @keyframes lightbox-in {
                    from { opacity: 0; }
                    to { opacity: 1; }
                }
                @keyframes lightbox-out {
                    from { opacity: 1; }
                    to { opacity: 0; }
                }
            "#}</style>
            <figure class="lightbox-frame" onclick={swallow_click}>
                <img src={props.state.src().to_string()} alt={props.state.alt().to_string()} />
                <button
                    ref={close_button}
                    type="button"
                    class="lightbox-close"
                    aria-label="Close preview"
                    onclick={close_click}
                >
                    {"\u{00d7}"}
                </button>
            </figure>
        </div>
    };

    create_portal(overlay, host)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_close_only_fires_from_open() {
        let mut state = LightboxState::default();
        assert!(!state.begin_close());
        state.open("blob:one".to_string(), "Attachment 1".to_string());
        assert!(state.begin_close());
        assert!(!state.begin_close());
        assert!(state.visible());
    }

    #[test]
    fn test_finish_close_clears_content() {
        let mut state = LightboxState::default();
        state.open("blob:one".to_string(), "Attachment 1".to_string());
        state.begin_close();
        state.finish_close();
        assert!(!state.visible());
        assert_eq!(state.src(), "");
        assert_eq!(state.alt(), "");
    }

    #[test]
    fn test_reopen_during_close_survives_stale_finish() {
        let mut state = LightboxState::default();
        state.open("blob:one".to_string(), "first".to_string());
        state.begin_close();
        state.open("blob:two".to_string(), "second".to_string());
        // The close timer from the first image fires late.
        state.finish_close();
        assert!(state.is_open());
        assert_eq!(state.src(), "blob:two");
    }

    #[test]
    fn test_visible_spans_both_close_phases() {
        let mut state = LightboxState::default();
        assert!(!state.visible());
        state.open("blob:one".to_string(), "x".to_string());
        assert!(state.visible());
        state.begin_close();
        assert!(state.visible());
        state.finish_close();
        assert!(!state.visible());
    }
}
