use std::cell::Cell;
use std::rc::Rc;

use gloo_console::error;
use gloo_timers::future::TimeoutFuture;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::js_sys;
use web_sys::Element;
use yew::prelude::*;

// Explicit-render API of the script loaded from index.html
// (js.hcaptcha.com/1/api.js?render=explicit).
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = hcaptcha, js_name = render, catch)]
    fn hcaptcha_render(container: &Element, params: &JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_namespace = hcaptcha, js_name = reset, catch)]
    fn hcaptcha_reset(widget_id: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(js_namespace = hcaptcha, js_name = remove, catch)]
    fn hcaptcha_remove(widget_id: &str) -> Result<(), JsValue>;
}

#[derive(Serialize)]
struct RenderParams<'a> {
    sitekey: &'a str,
    theme: &'a str,
}

/// One rendered widget. The JS-facing callbacks live exactly as long as the
/// widget; dropping it removes the iframe from the page.
pub struct ChallengeWidget {
    widget_id: String,
    _on_verify: Closure<dyn FnMut(JsValue)>,
    _on_expire: Closure<dyn FnMut()>,
}

impl ChallengeWidget {
    pub fn mount(
        container: &Element,
        site_key: &str,
        on_verify: Callback<String>,
        on_expire: Callback<()>,
    ) -> Result<Self, JsValue> {
        let verify = Closure::wrap(Box::new(move |token: JsValue| {
            if let Some(token) = token.as_string() {
                on_verify.emit(token);
            }
        }) as Box<dyn FnMut(JsValue)>);
        let expire = Closure::wrap(Box::new(move || on_expire.emit(())) as Box<dyn FnMut()>);

        let params = serde_wasm_bindgen::to_value(&RenderParams { sitekey: site_key, theme: "dark" })
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        js_sys::Reflect::set(&params, &JsValue::from_str("callback"), verify.as_ref())?;
        js_sys::Reflect::set(&params, &JsValue::from_str("expired-callback"), expire.as_ref())?;

        let widget_id = hcaptcha_render(container, &params)?.as_string().unwrap_or_default();

        Ok(Self { widget_id, _on_verify: verify, _on_expire: expire })
    }

    pub fn reset(&self) {
        let _ = hcaptcha_reset(&self.widget_id);
    }
}

impl Drop for ChallengeWidget {
    fn drop(&mut self) {
        let _ = hcaptcha_remove(&self.widget_id);
    }
}

fn challenge_api_ready() -> bool {
    web_sys::window()
        .map(|w| js_sys::Reflect::has(w.as_ref(), &JsValue::from_str("hcaptcha")).unwrap_or(false))
        .unwrap_or(false)
}

#[derive(Properties, PartialEq)]
pub struct CaptchaGateProps {
    pub site_key: &'static str,
    /// Bumped by the parent after a successful send to clear the widget.
    pub reset_epoch: u32,
    pub on_verify: Callback<String>,
    pub on_expire: Callback<()>,
}

#[function_component(CaptchaGate)]
pub fn captcha_gate(props: &CaptchaGateProps) -> Html {
    let container = use_node_ref();
    let widget = use_mut_ref(|| Option::<ChallengeWidget>::None);

    {
        let container = container.clone();
        let widget = widget.clone();
        let site_key = props.site_key;
        let on_verify = props.on_verify.clone();
        let on_expire = props.on_expire.clone();
        use_effect_with_deps(
            move |_| {
                let cancelled = Rc::new(Cell::new(false));
                if !site_key.is_empty() {
                    let cancelled = cancelled.clone();
                    let widget = widget.clone();
                    spawn_local(async move {
                        // api.js loads async; poll briefly until the global
                        // namespace shows up.
                        for _ in 0..40 {
                            if cancelled.get() || challenge_api_ready() {
                                break;
                            }
                            TimeoutFuture::new(250).await;
                        }
                        if cancelled.get() {
                            return;
                        }
                        if !challenge_api_ready() {
                            error!("hCaptcha script never became ready");
                            return;
                        }
                        if let Some(element) = container.cast::<Element>() {
                            match ChallengeWidget::mount(&element, site_key, on_verify, on_expire)
                            {
                                Ok(mounted) => *widget.borrow_mut() = Some(mounted),
                                Err(err) => {
                                    error!("failed to render hCaptcha widget", format!("{err:?}"))
                                }
                            }
                        }
                    });
                }
                move || {
                    cancelled.set(true);
                    widget.borrow_mut().take();
                }
            },
            (),
        );
    }

    {
        let widget = widget.clone();
        use_effect_with_deps(
            move |epoch| {
                if *epoch > 0 {
                    if let Some(widget) = widget.borrow().as_ref() {
                        widget.reset();
                    }
                }
                || ()
            },
            props.reset_epoch,
        );
    }

    if props.site_key.is_empty() {
        return html! { <p class="captcha-unconfigured">{"hCaptcha not configured."}</p> };
    }

    html! { <div ref={container} class="captcha-slot"></div> }
}
