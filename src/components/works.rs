use web_sys::TouchEvent;
use yew::prelude::*;
use yew_hooks::use_interval;

const MIN_AUTOPLAY_MILLIS: u32 = 1_500;
const SWIPE_MIN_DX: i32 = 40;
const SWIPE_MAX_DY: i32 = 60;

#[derive(PartialEq)]
pub struct WorkItem {
    pub title: &'static str,
    pub blurb: &'static str,
    pub tags: &'static [&'static str],
    pub images: &'static [&'static str],
    pub interval_millis: u32,
}

pub static WORKS: [WorkItem; 6] = [
    WorkItem {
        title: "Emberforge RPG Core",
        blurb: "Class system, skill trees and boss encounters scripted for a \
                2k-player survival RPG server.",
        tags: &["Scripting", "User Interface"],
        images: &[
            "assets/works/emberforge-1.svg",
            "assets/works/emberforge-2.svg",
            "assets/works/emberforge-3.svg",
        ],
        interval_millis: 2_600,
    },
    WorkItem {
        title: "Ashen Realms Hub",
        blurb: "Lobby UI overhaul with animated server selector and live \
                queue counts fed from the network bridge.",
        tags: &["User Interface"],
        images: &[
            "assets/works/ashen-1.svg",
            "assets/works/ashen-2.svg",
        ],
        interval_millis: 3_200,
    },
    WorkItem {
        title: "Molten Parkour Pack",
        blurb: "Timed parkour courses with checkpoint logic, ghost replays \
                and a seasonal leaderboard.",
        tags: &["Scripting"],
        images: &["assets/works/molten-1.svg"],
        interval_millis: 0,
    },
    WorkItem {
        title: "Wardenkeep Ticket Bot",
        blurb: "Discord bot handling commissions, build queues and automatic \
                delivery of purchased packs.",
        tags: &["Discord Bot"],
        images: &[
            "assets/works/wardenkeep-1.svg",
            "assets/works/wardenkeep-2.svg",
        ],
        interval_millis: 2_000,
    },
    WorkItem {
        title: "Cindershop Storefront",
        blurb: "Marketplace-style storefront with bundle pages, license keys \
                and webhook-driven releases.",
        tags: &["Website"],
        images: &[
            "assets/works/cindershop-1.svg",
            "assets/works/cindershop-2.svg",
            "assets/works/cindershop-3.svg",
        ],
        interval_millis: 1_000,
    },
    WorkItem {
        title: "Hollowlight Quest Engine",
        blurb: "Dialogue trees, quest stages and cutscene camera paths \
                authored from a JSON manifest.",
        tags: &["Scripting", "User Interface"],
        images: &["assets/works/hollowlight-1.svg"],
        interval_millis: 0,
    },
];

fn advance(current: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        (current + 1) % len
    }
}

fn retreat(current: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        (current + len - 1) % len
    }
}

/// Swipe verdict from a touch delta: +1 advances, -1 retreats, None when
/// the gesture is too short or too vertical.
fn swipe_step(dx: i32, dy: i32) -> Option<i32> {
    if dx.abs() > SWIPE_MIN_DX && dy.abs() < SWIPE_MAX_DY {
        Some(if dx < 0 { 1 } else { -1 })
    } else {
        None
    }
}

fn autoplay_millis(item: &WorkItem, hovered: bool) -> u32 {
    if hovered || item.images.len() < 2 {
        0
    } else {
        item.interval_millis.max(MIN_AUTOPLAY_MILLIS)
    }
}

#[derive(Properties, PartialEq)]
pub struct WorkCardProps {
    pub item: &'static WorkItem,
}

#[function_component(WorkCard)]
pub fn work_card(props: &WorkCardProps) -> Html {
    let item = props.item;
    let index = use_state_eq(|| 0usize);
    let hovered = use_state_eq(|| false);
    let touch_origin = use_mut_ref(|| Option::<(i32, i32)>::None);

    {
        let index = index.clone();
        let len = item.images.len();
        use_interval(
            move || index.set(advance(*index, len)),
            autoplay_millis(item, *hovered),
        );
    }

    let go_prev = {
        let index = index.clone();
        let len = item.images.len();
        Callback::from(move |_: MouseEvent| index.set(retreat(*index, len)))
    };
    let go_next = {
        let index = index.clone();
        let len = item.images.len();
        Callback::from(move |_: MouseEvent| index.set(advance(*index, len)))
    };

    let enter = {
        let hovered = hovered.clone();
        Callback::from(move |_: MouseEvent| hovered.set(true))
    };
    let leave = {
        let hovered = hovered.clone();
        Callback::from(move |_: MouseEvent| hovered.set(false))
    };

    let touch_start = {
        let touch_origin = touch_origin.clone();
        Callback::from(move |event: TouchEvent| {
            *touch_origin.borrow_mut() = event
                .touches()
                .get(0)
                .map(|touch| (touch.client_x(), touch.client_y()));
        })
    };
    let touch_end = {
        let touch_origin = touch_origin.clone();
        let index = index.clone();
        let len = item.images.len();
        Callback::from(move |event: TouchEvent| {
            let origin = touch_origin.borrow_mut().take();
            let landed = event
                .changed_touches()
                .get(0)
                .map(|touch| (touch.client_x(), touch.client_y()));
            if let Some(((sx, sy), (ex, ey))) = origin.zip(landed) {
                match swipe_step(ex - sx, ey - sy) {
                    Some(1) => index.set(advance(*index, len)),
                    Some(_) => index.set(retreat(*index, len)),
                    None => {}
                }
            }
        })
    };

    let track_style = format!("transform: translateX(-{}%);", *index * 100);
    let multi = item.images.len() > 1;

    html! {
        <article
            class="work-card reveal"
            onmouseenter={enter}
            onmouseleave={leave}
        >
            <div
                class="work-viewport"
                ontouchstart={touch_start}
                ontouchend={touch_end}
            >
                <div class="work-track" style={track_style}>
                    { for item.images.iter().map(|src| html! {
                        <img
                            key={*src}
                            class="work-frame"
                            src={*src}
                            alt={item.title}
                            loading="lazy"
                        />
                    }) }
                </div>
                { multi.then(|| html! {
                    <>
                        <button
                            type="button"
                            class="work-arrow prev"
                            aria-label="Previous image"
                            onclick={go_prev.clone()}
                        >
                            {"\u{2039}"}
                        </button>
                        <button
                            type="button"
                            class="work-arrow next"
                            aria-label="Next image"
                            onclick={go_next.clone()}
                        >
                            {"\u{203a}"}
                        </button>
                        <div class="work-dots">
                            { for (0..item.images.len()).map(|dot| {
                                let jump = {
                                    let index = index.clone();
                                    Callback::from(move |_: MouseEvent| index.set(dot))
                                };
                                html! {
                                    <button
                                        type="button"
                                        key={dot.to_string()}
                                        class={classes!("work-dot", (dot == *index).then(|| "active"))}
                                        aria-label={format!("Image {}", dot + 1)}
                                        onclick={jump}
                                    />
                                }
                            }) }
                        </div>
                    </>
                }) }
            </div>
            <div class="work-body">
                <h3>{ item.title }</h3>
                <p>{ item.blurb }</p>
                <div class="work-tags">
                    { for item.tags.iter().map(|tag| html! {
                        <span key={*tag} class="work-tag">{ *tag }</span>
                    }) }
                </div>
            </div>
        </article>
    }
}

#[function_component(Works)]
pub fn works() -> Html {
    html! {
        <section id="works" class="works-section">
            <style>{WORKS_CSS}</style>
            <div class="section-head reveal">
                <h2>{"Recent builds"}</h2>
                <p>{"A slice of what has shipped from the forge lately."}</p>
            </div>
            <div class="works-grid">
                { for WORKS.iter().map(|item| html! {
                    <WorkCard key={item.title} item={item} />
                }) }
            </div>
        </section>
    }
}

const WORKS_CSS: &str = r#"
    .works-section {
        padding: 90px 0;
    }
    .works-grid {
        display: grid;
        grid-template-columns: repeat(auto-fill, minmax(300px, 1fr));
        gap: 22px;
    }
    .work-card {
        background: rgba(24, 17, 10, 0.72);
        border: 1px solid rgba(255, 153, 0, 0.14);
        border-radius: 14px;
        overflow: hidden;
        transition: transform 0.25s ease, border-color 0.25s ease;
    }
    .work-card:hover {
        transform: translateY(-4px);
        border-color: rgba(255, 153, 0, 0.4);
    }
    .work-viewport {
        position: relative;
        overflow: hidden;
        aspect-ratio: 16 / 9;
        background: #0d0906;
    }
    .work-track {
        display: flex;
        height: 100%;
        transition: transform 0.45s ease;
    }
    .work-frame {
        width: 100%;
        height: 100%;
        flex: 0 0 100%;
        object-fit: cover;
    }
    .work-arrow {
        position: absolute;
        top: 50%;
        transform: translateY(-50%);
        width: 34px;
        height: 34px;
        border: none;
        border-radius: 50%;
        background: rgba(5, 4, 3, 0.7);
        color: #ffb84d;
        font-size: 1.2rem;
        line-height: 1;
        cursor: pointer;
        opacity: 0;
        transition: opacity 0.2s ease;
    }
    .work-viewport:hover .work-arrow {
        opacity: 1;
    }
    .work-arrow.prev {
        left: 10px;
    }
    .work-arrow.next {
        right: 10px;
    }
    .work-dots {
        position: absolute;
        left: 0;
        right: 0;
        bottom: 8px;
        display: flex;
        justify-content: center;
        gap: 6px;
    }
    .work-dot {
        width: 8px;
        height: 8px;
        border: none;
        border-radius: 50%;
        background: rgba(246, 239, 223, 0.35);
        cursor: pointer;
        padding: 0;
    }
    .work-dot.active {
        background: #ff9900;
    }
    .work-body {
        padding: 18px 20px 22px;
    }
    .work-body h3 {
        margin: 0 0 8px;
        color: #ffb84d;
    }
    .work-body p {
        margin: 0 0 14px;
        color: #c9bba6;
        line-height: 1.55;
        font-size: 0.95rem;
    }
    .work-tags {
        display: flex;
        flex-wrap: wrap;
        gap: 7px;
    }
    .work-tag {
        font-size: 0.78rem;
        color: #ffb84d;
        border: 1px solid rgba(255, 153, 0, 0.35);
        border-radius: 999px;
        padding: 3px 10px;
    }
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_and_retreat_wrap() {
        assert_eq!(advance(0, 3), 1);
        assert_eq!(advance(2, 3), 0);
        assert_eq!(retreat(0, 3), 2);
        assert_eq!(retreat(1, 3), 0);
        assert_eq!(advance(0, 0), 0);
        assert_eq!(retreat(0, 0), 0);
    }

    #[test]
    fn test_swipe_requires_horizontal_intent() {
        assert_eq!(swipe_step(-80, 10), Some(1));
        assert_eq!(swipe_step(80, -10), Some(-1));
        assert_eq!(swipe_step(-30, 0), None);
        assert_eq!(swipe_step(-80, 70), None);
        assert_eq!(swipe_step(41, 59), Some(-1));
    }

    #[test]
    fn test_autoplay_floors_interval_and_pauses() {
        let item = &WORKS[4];
        assert!(item.interval_millis < MIN_AUTOPLAY_MILLIS);
        assert_eq!(autoplay_millis(item, false), MIN_AUTOPLAY_MILLIS);
        assert_eq!(autoplay_millis(item, true), 0);
    }

    #[test]
    fn test_autoplay_disabled_for_single_image() {
        let single = &WORKS[2];
        assert_eq!(single.images.len(), 1);
        assert_eq!(autoplay_millis(single, false), 0);
    }

    #[test]
    fn test_autoplay_respects_longer_intervals() {
        let item = &WORKS[1];
        assert_eq!(autoplay_millis(item, false), item.interval_millis);
    }

    #[test]
    fn test_every_work_has_artwork() {
        for item in WORKS.iter() {
            assert!(!item.images.is_empty(), "{} has no images", item.title);
            assert!(!item.tags.is_empty(), "{} has no tags", item.title);
        }
    }
}
