use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{js_sys, HtmlElement};
use yew::prelude::*;

use crate::components::about::About;
use crate::components::contact_form::Contact;
use crate::components::hero::Hero;
use crate::components::lightbox::{use_lightbox, Lightbox};
use crate::components::overlay_scrollbar::OverlayScrollbar;
use crate::components::stats_panel::StatsPanel;
use crate::components::testimonials::Testimonials;
use crate::components::works::Works;
use crate::hooks::{use_drag_select_guard, use_reveal_on_scroll};
use crate::utils;

static SECTIONS: [(&str, &str); 5] = [
    ("about", "About"),
    ("works", "Works"),
    ("stats", "Stats"),
    ("testimonials", "Clients"),
    ("contact", "Contact"),
];

const PROJECT_IDS: &[&str] = &["1180042", "1205377", "1281940"];

/// While smooth scroll settles after a nav click, the spy would drag the
/// dot across every section in between. The lock pins it on the clicked
/// target; longer jumps get a longer pin.
fn dot_lock_millis(distance_px: f64) -> f64 {
    1_200.0 + (distance_px / 4.0).min(400.0)
}

#[function_component(Home)]
pub fn home() -> Html {
    let active = use_state_eq(|| Option::<&'static str>::None);
    let menu_open = use_state_eq(|| false);
    let dot_lock_until = use_mut_ref(|| 0.0f64);
    let nav_ref = use_node_ref();
    let dot_ref = use_node_ref();
    let lightbox = use_lightbox();

    use_reveal_on_scroll();
    use_drag_select_guard();

    {
        let active = active.clone();
        let dot_lock_until = dot_lock_until.clone();
        use_effect_with_deps(
            move |_| {
                let mut teardown: Vec<Box<dyn FnOnce()>> = Vec::new();

                if let Some(window) = web_sys::window() {
                    let spy = {
                        let window = window.clone();
                        move || {
                            if js_sys::Date::now() < *dot_lock_until.borrow() {
                                return;
                            }
                            let viewport_mid = window
                                .inner_height()
                                .ok()
                                .and_then(|h| h.as_f64())
                                .unwrap_or(0.0)
                                / 2.0;
                            let document = match window.document() {
                                Some(document) => document,
                                None => return,
                            };
                            let mut best: Option<(&'static str, f64)> = None;
                            for &(id, _) in SECTIONS.iter() {
                                if let Some(section) = document.get_element_by_id(id) {
                                    let rect = section.get_bounding_client_rect();
                                    let mid = rect.top() + rect.height() / 2.0;
                                    let distance = (mid - viewport_mid).abs();
                                    if best.map(|(_, d)| distance < d).unwrap_or(true) {
                                        best = Some((id, distance));
                                    }
                                }
                            }
                            if let Some((id, _)) = best {
                                active.set(Some(id));
                            }
                        }
                    };
                    spy();

                    let on_scroll = Closure::wrap(Box::new({
                        let spy = spy.clone();
                        move |_: web_sys::Event| spy()
                    })
                        as Box<dyn FnMut(web_sys::Event)>);
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

                    let on_resize = Closure::wrap(Box::new(move |_: web_sys::Event| spy())
                        as Box<dyn FnMut(web_sys::Event)>);
                    let _ = window.add_event_listener_with_callback(
                        "resize",
                        on_resize.as_ref().unchecked_ref(),
                    );
                    teardown.push(Box::new(move || {
                        let _ = window.remove_event_listener_with_callback(
                            "resize",
                            on_resize.as_ref().unchecked_ref(),
                        );
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

    // The dot rides under whichever link is active; measured from the DOM
    // because link widths depend on the font.
    {
        let nav_ref = nav_ref.clone();
        let dot_ref = dot_ref.clone();
        use_effect_with_deps(
            move |section: &Option<&'static str>| {
                if let Some(dot) = dot_ref.cast::<HtmlElement>() {
                    let link = section.and_then(|section| {
                        nav_ref.cast::<HtmlElement>().and_then(|nav| {
                            nav.query_selector(&format!("a[data-section=\"{}\"]", section))
                                .ok()
                                .flatten()
                        })
                    });
                    match link.and_then(|link| link.dyn_into::<HtmlElement>().ok()) {
                        Some(link) => {
                            let center = link.offset_left() as f64
                                + link.offset_width() as f64 / 2.0
                                - 3.0;
                            let _ = dot
                                .style()
                                .set_property("left", &format!("{:.0}px", center));
                            let _ = dot.style().set_property("opacity", "1");
                        }
                        None => {
                            let _ = dot.style().set_property("opacity", "0");
                        }
                    }
                }
                || ()
            },
            *active,
        );
    }

    let jump = {
        let active = active.clone();
        let menu_open = menu_open.clone();
        let dot_lock_until = dot_lock_until.clone();
        Callback::from(move |section: &'static str| {
            let distance = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.get_element_by_id(section))
                .map(|el| el.get_bounding_client_rect().top().abs())
                .unwrap_or(0.0);
            *dot_lock_until.borrow_mut() = js_sys::Date::now() + dot_lock_millis(distance);
            active.set(Some(section));
            menu_open.set(false);
            utils::jump_to_section(section);
        })
    };

    let to_top = Callback::from(|event: MouseEvent| {
        event.prevent_default();
        utils::jump_to_section("top");
    });

    let toggle_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| menu_open.set(!*menu_open))
    };

    let year = js_sys::Date::new_0().get_full_year();

    html! {
        <div class="page">
            <style>{HOME_CSS}</style>
            <nav ref={nav_ref} class="site-nav">
                <a class="brand" href="#top" onclick={to_top}>
                    <img src="assets/logo.svg" alt="" />
                    <span>{"Cinderworks"}</span>
                </a>
                <button
                    type="button"
                    class={classes!("burger", menu_open.then(|| "open"))}
                    aria-label="Menu"
                    aria-expanded={menu_open.to_string()}
                    onclick={toggle_menu}
                >
                    <span></span><span></span><span></span>
                </button>
                <div class={classes!("nav-links", menu_open.then(|| "open"))}>
                    { for SECTIONS.iter().map(|&(id, label)| {
                        let click = {
                            let jump = jump.clone();
                            Callback::from(move |event: MouseEvent| {
                                event.prevent_default();
                                jump.emit(id);
                            })
                        };
                        html! {
                            <a
                                key={id}
                                href={format!("#{}", id)}
                                data-section={id}
                                class={classes!("nav-link", (*active == Some(id)).then(|| "active"))}
                                onclick={click}
                            >
                                { label }
                            </a>
                        }
                    }) }
                    <span ref={dot_ref} class="nav-dot" aria-hidden="true"></span>
                </div>
            </nav>
            <main>
                <Hero />
                <div class="shell">
                    <About />
                    <Works />
                    <StatsPanel project_ids={PROJECT_IDS} />
                    <Testimonials on_zoom={lightbox.open.clone()} />
                    <Contact on_zoom={lightbox.open.clone()} />
                </div>
            </main>
            <footer class="site-footer">
                <p>{ format!("\u{00a9} {} Cinderworks. Forged for Bedrock.", year) }</p>
            </footer>
            <OverlayScrollbar />
            <Lightbox state={lightbox.state()} on_close={lightbox.request_close.clone()} />
        </div>
    }
}

const HOME_CSS: &str = r#"
    :root {
        color-scheme: dark;
    }
    body {
        margin: 0;
        background: radial-gradient(1200px 600px at 50% -100px, #2a1a0c, #0c0805 60%);
        color: #f6efdf;
        font-family: "Segoe UI", "Inter", system-ui, sans-serif;
    }
    @media (pointer: fine) and (min-width: 761px) {
        html {
            scrollbar-width: none;
        }
        body::-webkit-scrollbar {
            display: none;
        }
    }
    body.no-select-drag {
        user-select: none;
        -webkit-user-select: none;
    }
    .shell {
        max-width: 1080px;
        margin: 0 auto;
        padding: 0 20px;
    }
    .section-head {
        margin-bottom: 34px;
    }
    .section-head h2 {
        margin: 0 0 8px;
        font-size: 2rem;
        color: #f6efdf;
    }
    .section-head p {
        margin: 0;
        color: #8f8370;
    }
    .reveal {
        opacity: 0;
        transform: translateY(26px);
    }
    .reveal.peek {
        opacity: 0.35;
        transform: translateY(14px);
        transition: opacity 0.5s ease var(--d, 0s), transform 0.5s ease var(--d, 0s);
    }
    .reveal.show {
        opacity: 1;
        transform: none;
        transition: opacity 0.6s ease var(--d, 0s), transform 0.6s ease var(--d, 0s);
    }
    @media (prefers-reduced-motion: reduce) {
        .reveal,
        .reveal.peek {
            opacity: 1;
            transform: none;
            transition: none;
        }
    }
    .site-nav {
        position: fixed;
        top: 0;
        left: 0;
        right: 0;
        z-index: 100;
        display: flex;
        align-items: center;
        justify-content: space-between;
        gap: 20px;
        padding: 14px 22px;
        background: rgba(10, 7, 4, 0.82);
        backdrop-filter: blur(10px);
        border-bottom: 1px solid rgba(255, 153, 0, 0.12);
    }
    .brand {
        display: flex;
        align-items: center;
        gap: 10px;
        text-decoration: none;
        color: #ffb84d;
        font-weight: 800;
        letter-spacing: 0.06em;
    }
    .brand img {
        width: 28px;
        height: 28px;
    }
    .nav-links {
        position: relative;
        display: flex;
        gap: 22px;
    }
    .nav-link {
        color: #c9bba6;
        text-decoration: none;
        font-size: 0.95rem;
        padding: 4px 2px;
        transition: color 0.2s ease;
    }
    .nav-link:hover,
    .nav-link.active {
        color: #ffb84d;
    }
    .nav-dot {
        position: absolute;
        bottom: -6px;
        width: 6px;
        height: 6px;
        border-radius: 50%;
        background: #ff9900;
        opacity: 0;
        transition: left 0.35s cubic-bezier(0.3, 1.2, 0.4, 1), opacity 0.25s ease;
    }
    .burger {
        display: none;
        flex-direction: column;
        gap: 5px;
        background: none;
        border: none;
        cursor: pointer;
        padding: 6px;
    }
    .burger span {
        width: 22px;
        height: 2px;
        background: #ffb84d;
        transition: transform 0.25s ease, opacity 0.25s ease;
    }
    .burger.open span:nth-child(1) {
        transform: translateY(7px) rotate(45deg);
    }
    .burger.open span:nth-child(2) {
        opacity: 0;
    }
    .burger.open span:nth-child(3) {
        transform: translateY(-7px) rotate(-45deg);
    }
    @media (max-width: 760px) {
        .burger {
            display: flex;
        }
        .nav-links {
            position: absolute;
            top: 100%;
            left: 0;
            right: 0;
            flex-direction: column;
            gap: 0;
            background: rgba(10, 7, 4, 0.96);
            border-bottom: 1px solid rgba(255, 153, 0, 0.12);
            max-height: 0;
            overflow: hidden;
            transition: max-height 0.3s ease;
        }
        .nav-links.open {
            max-height: 320px;
        }
        .nav-link {
            padding: 14px 22px;
        }
        .nav-dot {
            display: none;
        }
    }
    .site-footer {
        border-top: 1px solid rgba(255, 153, 0, 0.12);
        margin-top: 40px;
        padding: 26px 20px;
        text-align: center;
        color: #8f8370;
        font-size: 0.9rem;
    }
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot_lock_scales_with_distance_within_bounds() {
        assert_eq!(dot_lock_millis(0.0), 1_200.0);
        assert_eq!(dot_lock_millis(800.0), 1_400.0);
        assert_eq!(dot_lock_millis(50_000.0), 1_600.0);
    }

    #[test]
    fn test_sections_and_project_ids_are_distinct() {
        for (index, (id, _)) in SECTIONS.iter().enumerate() {
            assert!(SECTIONS.iter().skip(index + 1).all(|(other, _)| other != id));
        }
        for (index, id) in PROJECT_IDS.iter().enumerate() {
            assert!(PROJECT_IDS.iter().skip(index + 1).all(|other| other != id));
        }
    }
}
