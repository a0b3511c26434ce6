use yew::prelude::*;

#[derive(PartialEq)]
struct TeamMember {
    name: &'static str,
    role: &'static str,
    bio: &'static str,
}

static TEAM: [TeamMember; 3] = [
    TeamMember {
        name: "Ren",
        role: "Scripting lead",
        bio: "Writes the gameplay systems. If it ticks, teleports or talks \
              back, it went through Ren first.",
    },
    TeamMember {
        name: "Soot",
        role: "UI and art",
        bio: "Owns every pixel from lobby screens to storefront banners. \
              Allergic to default fonts.",
    },
    TeamMember {
        name: "Vex",
        role: "Infrastructure",
        bio: "Keeps the bots, webhooks and release pipelines running so the \
              other two can pretend servers are simple.",
    },
];

#[function_component(About)]
pub fn about() -> Html {
    html! {
        <section id="about" class="about-section">
            <style>{ABOUT_CSS}</style>
            <div class="section-head reveal">
                <h2>{"The studio"}</h2>
                <p>{"Three people, one forge, a lot of shipped packs."}</p>
            </div>
            <div class="team-grid">
                { for TEAM.iter().map(|member| html! {
                    <div key={member.name} class="team-card reveal">
                        <span class="team-avatar" aria-hidden="true">
                            { member.name.chars().next().unwrap_or('?') }
                        </span>
                        <h3>{ member.name }</h3>
                        <span class="team-role">{ member.role }</span>
                        <p>{ member.bio }</p>
                    </div>
                }) }
            </div>
        </section>
    }
}

const ABOUT_CSS: &str = r#"
    .about-section {
        padding: 90px 0;
    }
    .team-grid {
        display: grid;
        grid-template-columns: repeat(auto-fit, minmax(240px, 1fr));
        gap: 22px;
    }
    .team-card {
        background: rgba(24, 17, 10, 0.72);
        border: 1px solid rgba(255, 153, 0, 0.14);
        border-radius: 14px;
        padding: 26px;
    }
    .team-avatar {
        display: inline-flex;
        align-items: center;
        justify-content: center;
        width: 52px;
        height: 52px;
        border-radius: 50%;
        background: rgba(255, 153, 0, 0.16);
        color: #ffb84d;
        font-size: 1.4rem;
        font-weight: 800;
        margin-bottom: 14px;
    }
    .team-card h3 {
        margin: 0 0 2px;
        color: #f6efdf;
    }
    .team-role {
        color: #ffb84d;
        font-size: 0.85rem;
        text-transform: uppercase;
        letter-spacing: 0.08em;
    }
    .team-card p {
        margin: 12px 0 0;
        color: #c9bba6;
        line-height: 1.55;
        font-size: 0.95rem;
    }
"#;
