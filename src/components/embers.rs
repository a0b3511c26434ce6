use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    js_sys, CanvasRenderingContext2d, Element, HtmlCanvasElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, MediaQueryList,
};
use yew::prelude::*;

const EMBER_COLOR: &str = "#ff9900";
const SHADOW_BLUR: f64 = 8.0;
const FRAME_MILLIS: f64 = 1000.0 / 60.0;
const DT_CAP_MILLIS: f64 = 64.0;
const MIN_COUNT: usize = 18;
const MAX_COUNT: usize = 60;
const PIXELS_PER_EMBER: f64 = 20_000.0;

/// One drifting spark. Velocities are in pixels per 60 fps frame; `step`
/// scales them by the elapsed time so the drift speed is independent of
/// the real frame rate.
#[derive(Clone, Debug)]
struct Ember {
    x: f64,
    y: f64,
    vx: f64,
    vy: f64,
    radius: f64,
    alpha: f64,
    wobble: f64,
    phase: f64,
    life: f64,
    max_life: f64,
}

impl Ember {
    fn step(&mut self, dt: f64, width: f64) -> bool {
        let units = dt / FRAME_MILLIS;
        self.phase += self.wobble * dt;
        self.x += (self.vx + self.phase.sin() * 0.08) * units;
        self.y += self.vy * units;
        self.life += dt;

        if self.x < -10.0 {
            self.x = width + 10.0;
        } else if self.x > width + 10.0 {
            self.x = -10.0;
        }

        self.life < self.max_life * 1000.0 && self.y > -12.0
    }

    fn glow(&self) -> f64 {
        self.alpha * (0.6 + 0.4 * self.phase.sin())
    }
}

fn rand_range(lo: f64, hi: f64) -> f64 {
    lo + js_sys::Math::random() * (hi - lo)
}

fn spawn_ember(width: f64, height: f64) -> Ember {
    Ember {
        x: rand_range(0.0, width),
        y: height + rand_range(0.0, 20.0),
        vx: rand_range(-0.15, 0.15),
        vy: rand_range(-0.4, -0.15),
        radius: rand_range(0.8, 2.2),
        alpha: rand_range(0.35, 0.8),
        wobble: rand_range(0.002, 0.008),
        phase: rand_range(0.0, std::f64::consts::TAU),
        life: 0.0,
        max_life: rand_range(4.0, 9.0),
    }
}

fn target_count(width: f64, height: f64) -> usize {
    let by_area = (width * height / PIXELS_PER_EMBER) as usize;
    by_area.clamp(MIN_COUNT, MAX_COUNT)
}

fn reduced_motion_query() -> Option<MediaQueryList> {
    web_sys::window()?
        .match_media("(prefers-reduced-motion: reduce)")
        .ok()
        .flatten()
}

/// Decorative spark field that fills its (positioned) parent. Draws on a
/// device-pixel canvas capped at 2x, pauses while scrolled out of view
/// and stays blank under `prefers-reduced-motion`.
#[function_component(EmberField)]
pub fn ember_field() -> Html {
    let canvas_ref = use_node_ref();

    {
        let canvas_ref = canvas_ref.clone();
        use_effect_with_deps(
            move |_| {
                let mut teardown: Vec<Box<dyn FnOnce()>> = Vec::new();

                if let Some((window, canvas)) =
                    web_sys::window().zip(canvas_ref.cast::<HtmlCanvasElement>())
                {
                    let context = canvas
                        .get_context("2d")
                        .ok()
                        .flatten()
                        .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok());

                    if let Some(context) = context {
                        let embers: Rc<RefCell<Vec<Ember>>> = Rc::new(RefCell::new(Vec::new()));
                        let size = Rc::new(Cell::new((0.0f64, 0.0f64)));
                        let visible = Rc::new(Cell::new(true));
                        let motion_ok = Rc::new(Cell::new(true));
                        let raf_id = Rc::new(Cell::new(0i32));
                        let last_ts = Rc::new(Cell::new(0.0f64));

                        let fit = {
                            let window = window.clone();
                            let canvas = canvas.clone();
                            let context = context.clone();
                            let embers = embers.clone();
                            let size = size.clone();
                            move || {
                                let width = canvas.client_width() as f64;
                                let height = canvas.client_height() as f64;
                                let dpr = window.device_pixel_ratio().min(2.0).max(1.0);
                                canvas.set_width((width * dpr) as u32);
                                canvas.set_height((height * dpr) as u32);
                                let _ = context.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
                                size.set((width, height));

                                let mut field = embers.borrow_mut();
                                let wanted = target_count(width, height);
                                while field.len() < wanted {
                                    field.push(spawn_ember(width, height));
                                }
                                field.truncate(wanted);
                            }
                        };
                        fit();

                        // The frame closure re-schedules itself, so it lives in a
                        // shared slot it can reach through a clone.
                        let frame: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> =
                            Rc::new(RefCell::new(None));
                        {
                            let window = window.clone();
                            let context = context.clone();
                            let embers = embers.clone();
                            let size = size.clone();
                            let visible = visible.clone();
                            let motion_ok = motion_ok.clone();
                            let raf_id = raf_id.clone();
                            let last_ts = last_ts.clone();
                            let frame_slot = frame.clone();
                            *frame.borrow_mut() =
                                Some(Closure::wrap(Box::new(move |timestamp: f64| {
                                    raf_id.set(0);
                                    if !visible.get() || !motion_ok.get() {
                                        last_ts.set(0.0);
                                        return;
                                    }

                                    let previous = last_ts.get();
                                    let dt = if previous == 0.0 {
                                        FRAME_MILLIS
                                    } else {
                                        (timestamp - previous).min(DT_CAP_MILLIS)
                                    };
                                    last_ts.set(timestamp);

                                    let (width, height) = size.get();
                                    {
                                        let mut field = embers.borrow_mut();
                                        for ember in field.iter_mut() {
                                            if !ember.step(dt, width) {
                                                *ember = spawn_ember(width, height);
                                            }
                                        }

                                        context.clear_rect(0.0, 0.0, width, height);
                                        let _ =
                                            context.set_global_composite_operation("lighter");
                                        context.set_shadow_blur(SHADOW_BLUR);
                                        context.set_shadow_color(EMBER_COLOR);
                                        context.set_fill_style_str(EMBER_COLOR);
                                        for ember in field.iter() {
                                            context.set_global_alpha(ember.glow());
                                            context.begin_path();
                                            let _ = context.arc(
                                                ember.x,
                                                ember.y,
                                                ember.radius,
                                                0.0,
                                                std::f64::consts::TAU,
                                            );
                                            context.fill();
                                        }
                                        context.set_global_alpha(1.0);
                                    }

                                    if let Some(cb) = frame_slot.borrow().as_ref() {
                                        if let Ok(id) = window
                                            .request_animation_frame(cb.as_ref().unchecked_ref())
                                        {
                                            raf_id.set(id);
                                        }
                                    }
                                })
                                    as Box<dyn FnMut(f64)>));
                        }

                        let kick = {
                            let window = window.clone();
                            let frame = frame.clone();
                            let raf_id = raf_id.clone();
                            let visible = visible.clone();
                            let motion_ok = motion_ok.clone();
                            let last_ts = last_ts.clone();
                            move || {
                                if raf_id.get() != 0 || !visible.get() || !motion_ok.get() {
                                    return;
                                }
                                last_ts.set(0.0);
                                if let Some(cb) = frame.borrow().as_ref() {
                                    if let Ok(id) = window
                                        .request_animation_frame(cb.as_ref().unchecked_ref())
                                    {
                                        raf_id.set(id);
                                    }
                                }
                            }
                        };
                        kick();

                        let observer = {
                            let visible_flag = visible.clone();
                            let kick = kick.clone();
                            let watch = Closure::wrap(Box::new(
                                move |entries: js_sys::Array, _: IntersectionObserver| {
                                    for entry in entries.iter() {
                                        if let Ok(entry) =
                                            entry.dyn_into::<IntersectionObserverEntry>()
                                        {
                                            visible_flag.set(entry.is_intersecting());
                                        }
                                    }
                                    kick();
                                },
                            )
                                as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);
                            let options = IntersectionObserverInit::new();
                            options.set_threshold(&JsValue::from_f64(0.05));
                            IntersectionObserver::new_with_options(
                                watch.as_ref().unchecked_ref(),
                                &options,
                            )
                            .ok()
                            .map(|observer| {
                                observer.observe(&Element::from(canvas.clone()));
                                (observer, watch)
                            })
                        };
                        if let Some((observer, watch)) = observer {
                            teardown.push(Box::new(move || {
                                observer.disconnect();
                                drop(watch);
                            }));
                        }

                        if let Some(query) = reduced_motion_query() {
                            motion_ok.set(!query.matches());
                            let on_change = {
                                let motion_ok = motion_ok.clone();
                                let context = context.clone();
                                let size = size.clone();
                                let kick = kick.clone();
                                Closure::wrap(Box::new(move |_: web_sys::Event| {
                                    let reduced = reduced_motion_query()
                                        .map(|q| q.matches())
                                        .unwrap_or(false);
                                    motion_ok.set(!reduced);
                                    if reduced {
                                        let (width, height) = size.get();
                                        context.clear_rect(0.0, 0.0, width, height);
                                    } else {
                                        kick();
                                    }
                                })
                                    as Box<dyn FnMut(web_sys::Event)>)
                            };
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

                        let on_resize = Closure::wrap(Box::new(move |_: web_sys::Event| {
                            fit();
                        })
                            as Box<dyn FnMut(web_sys::Event)>);
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

                        teardown.push(Box::new(move || {
                            visible.set(false);
                            let id = raf_id.get();
                            if id != 0 {
                                let _ = window.cancel_animation_frame(id);
                            }
                            frame.borrow_mut().take();
                        }));
                    }
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
            <style>{EMBER_CSS}</style>
            <canvas ref={canvas_ref} class="ember-field" aria-hidden="true"></canvas>
        </>
    }
}

const EMBER_CSS: &str = r#"
    .ember-field {
        position: absolute;
        inset: 0;
        width: 100%;
        height: 100%;
        pointer-events: none;
    }
"#;

#[cfg(test)]
mod tests {
    use super::*;

    fn test_ember() -> Ember {
        Ember {
            x: 50.0,
            y: 100.0,
            vx: 0.1,
            vy: -0.3,
            radius: 1.5,
            alpha: 0.5,
            wobble: 0.004,
            phase: 0.0,
            life: 0.0,
            max_life: 5.0,
        }
    }

    #[test]
    fn test_step_moves_upward_and_ages() {
        let mut ember = test_ember();
        assert!(ember.step(FRAME_MILLIS, 800.0));
        assert!(ember.y < 100.0);
        assert!(ember.life > 0.0);
    }

    #[test]
    fn test_step_reports_death_past_lifetime() {
        let mut ember = test_ember();
        ember.life = 4_999.0;
        assert!(!ember.step(DT_CAP_MILLIS, 800.0));
    }

    #[test]
    fn test_step_reports_death_above_top_edge() {
        let mut ember = test_ember();
        ember.y = -11.9;
        assert!(!ember.step(FRAME_MILLIS, 800.0));
    }

    #[test]
    fn test_step_wraps_horizontally() {
        let mut ember = test_ember();
        ember.x = -10.5;
        ember.vx = 0.0;
        ember.wobble = 0.0;
        ember.phase = 0.0;
        assert!(ember.step(FRAME_MILLIS, 800.0));
        assert!(ember.x > 800.0);
    }

    #[test]
    fn test_target_count_clamps_small_and_large_areas() {
        assert_eq!(target_count(100.0, 100.0), MIN_COUNT);
        assert_eq!(target_count(10_000.0, 10_000.0), MAX_COUNT);
        assert_eq!(target_count(1_000.0, 600.0), 30);
    }

    #[test]
    fn test_glow_stays_positive() {
        let mut ember = test_ember();
        ember.phase = -std::f64::consts::FRAC_PI_2;
        assert!(ember.glow() > 0.0);
        assert!(ember.glow() < ember.alpha);
    }
}
