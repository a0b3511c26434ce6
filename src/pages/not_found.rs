use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::embers::EmberField;
use crate::Route;

#[function_component(NotFound)]
pub fn not_found() -> Html {
    html! {
        <div class="lost-page">
            <style>{NOT_FOUND_CSS}</style>
            <EmberField />
            <div class="lost-inner">
                <h1 class="lost-glitch" data-text="404">{"404"}</h1>
                <p>{"This chunk never generated."}</p>
                <Link<Route> classes="lost-home" to={Route::Home}>
                    {"Back to the forge"}
                </Link<Route>>
            </div>
        </div>
    }
}

const NOT_FOUND_CSS: &str = r#"
    .lost-page {
        position: relative;
        min-height: 100vh;
        display: flex;
        align-items: center;
        justify-content: center;
        text-align: center;
        overflow: hidden;
        background: radial-gradient(1200px 600px at 50% -100px, #2a1a0c, #0c0805 60%);
        color: #f6efdf;
        font-family: "Segoe UI", "Inter", system-ui, sans-serif;
    }
    .lost-inner {
        position: relative;
        z-index: 1;
        padding: 20px;
    }
    .lost-glitch {
        position: relative;
        margin: 0;
        font-size: clamp(5rem, 20vw, 9rem);
        font-weight: 900;
        letter-spacing: 0.1em;
        color: #f6efdf;
    }
    .lost-glitch::before,
    .lost-glitch::after {
        content: attr(data-text);
        position: absolute;
        inset: 0;
        opacity: 0;
        pointer-events: none;
    }
    .lost-glitch::before {
        color: #ff9900;
        animation: lost-shift 2.9s infinite steps(1);
    }
    .lost-glitch::after {
        color: #ff3b00;
        animation: lost-shift 2.3s infinite steps(1) reverse;
    }
    @keyframes lost-shift {
        0%, 84%, 100% { transform: none; clip-path: none; opacity: 0; }
        85% { transform: translate(-4px, 2px); clip-path: inset(10% 0 60% 0); opacity: 0.8; }
        89% { transform: translate(4px, -2px); clip-path: inset(55% 0 15% 0); opacity: 0.8; }
        94% { transform: none; clip-path: none; opacity: 0; }
    }
    @media (prefers-reduced-motion: reduce) {
        .lost-glitch::before,
        .lost-glitch::after {
            animation: none;
        }
    }
    .lost-inner p {
        margin: 14px 0 30px;
        color: #c9bba6;
    }
    .lost-home {
        display: inline-block;
        background: linear-gradient(180deg, #ffaa33, #ff8800);
        color: #1c1107;
        text-decoration: none;
        font-weight: 700;
        border-radius: 10px;
        padding: 13px 30px;
    }
"#;
