use yew::prelude::*;

use crate::components::embers::EmberField;
use crate::utils;

#[function_component(Hero)]
pub fn hero() -> Html {
    let to_works = Callback::from(|_: MouseEvent| utils::jump_to_section("works"));
    let to_contact = Callback::from(|_: MouseEvent| utils::jump_to_section("contact"));

    html! {
        <section id="top" class="hero">
            <style>{HERO_CSS}</style>
            <EmberField />
            <div class="hero-inner">
                <h1 class="glitch" data-text="CINDERWORKS">{"CINDERWORKS"}</h1>
                <p class="hero-tagline">
                    {"Bedrock add-ons \u{2022} Server interfaces \u{2022} Custom tooling"}
                </p>
                <p class="hero-copy">
                    {"A small studio forging script-heavy Minecraft Bedrock experiences \
                      for servers and marketplaces."}
                </p>
                <div class="hero-ctas">
                    <button type="button" class="cta primary" onclick={to_works}>
                        {"See the work"}
                    </button>
                    <button type="button" class="cta ghost" onclick={to_contact}>
                        {"Start a project"}
                    </button>
                </div>
            </div>
        </section>
    }
}

const HERO_CSS: &str = r#"
    .hero {
        position: relative;
        min-height: 88vh;
        display: flex;
        align-items: center;
        justify-content: center;
        text-align: center;
        overflow: hidden;
        padding: 120px 20px 80px;
    }
    .hero-inner {
        position: relative;
        z-index: 1;
        max-width: 760px;
    }
    .glitch {
        position: relative;
        margin: 0;
        font-size: clamp(2.6rem, 8vw, 5rem);
        font-weight: 900;
        letter-spacing: 0.12em;
        color: #f6efdf;
    }
    .glitch::before,
    .glitch::after {
        content: attr(data-text);
        position: absolute;
        inset: 0;
        opacity: 0.8;
        pointer-events: none;
    }
    .glitch::before {
        color: #ff9900;
        animation: glitch-shift 3.2s infinite steps(1);
    }
    .glitch::after {
        color: #ff3b00;
        animation: glitch-shift 2.7s infinite steps(1) reverse;
    }
    @keyframes glitch-shift {
        0%, 86%, 100% { transform: none; clip-path: none; opacity: 0; }
        87% { transform: translate(-3px, 1px); clip-path: inset(12% 0 66% 0); opacity: 0.8; }
        90% { transform: translate(3px, -1px); clip-path: inset(58% 0 18% 0); opacity: 0.8; }
        93% { transform: translate(-2px, 0); clip-path: inset(32% 0 42% 0); opacity: 0.7; }
        96% { transform: none; clip-path: none; opacity: 0; }
    }
    @media (prefers-reduced-motion: reduce) {
        .glitch::before,
        .glitch::after {
            animation: none;
            opacity: 0;
        }
    }
    .hero-tagline {
        margin: 22px 0 10px;
        color: #ffb84d;
        letter-spacing: 0.18em;
        text-transform: uppercase;
        font-size: 0.95rem;
    }
    .hero-copy {
        margin: 0 auto 34px;
        max-width: 520px;
        color: #c9bba6;
        line-height: 1.65;
    }
    .hero-ctas {
        display: flex;
        gap: 14px;
        justify-content: center;
        flex-wrap: wrap;
    }
    .cta {
        font: inherit;
        font-weight: 700;
        border-radius: 10px;
        padding: 13px 30px;
        cursor: pointer;
    }
    .cta.primary {
        background: linear-gradient(180deg, #ffaa33, #ff8800);
        color: #1c1107;
        border: none;
    }
    .cta.ghost {
        background: none;
        color: #ffb84d;
        border: 1px solid rgba(255, 153, 0, 0.5);
    }
    .cta:hover {
        filter: brightness(1.1);
    }
"#;
