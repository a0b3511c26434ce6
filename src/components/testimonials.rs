use yew::prelude::*;

#[derive(PartialEq)]
pub struct Testimonial {
    pub author: &'static str,
    pub role: &'static str,
    pub quote: &'static str,
    pub rating: u32,
    pub media: &'static [&'static str],
}

static TESTIMONIALS: [Testimonial; 2] = [
    Testimonial {
        author: "Kaelen V.",
        role: "Owner, Ashen Realms network",
        quote: "They rebuilt our whole lobby flow in three weeks. Queue times \
                dropped, players stopped getting lost, and the UI still feels \
                vanilla. Best money the server ever spent.",
        rating: 5,
        media: &[
            "assets/testimonials/ashen-lobby.svg",
            "assets/testimonials/ashen-queue.svg",
        ],
    },
    Testimonial {
        author: "Mirra T.",
        role: "Lead, Hollowlight storyline",
        quote: "The quest engine handles branching dialogue we thought was \
                impossible in Bedrock. Iteration went from days to minutes \
                once the manifest tooling landed.",
        rating: 4,
        media: &["assets/testimonials/hollowlight-quests.svg"],
    },
];

fn star_row(rating: u32) -> String {
    (1..=5)
        .map(|step| if step <= rating { '\u{2605}' } else { '\u{2606}' })
        .collect()
}

#[derive(Properties, PartialEq)]
pub struct TestimonialsProps {
    pub on_zoom: Callback<(String, String)>,
}

#[function_component(Testimonials)]
pub fn testimonials(props: &TestimonialsProps) -> Html {
    html! {
        <section id="testimonials" class="testimonials-section">
            <style>{TESTIMONIALS_CSS}</style>
            <div class="section-head reveal">
                <h2>{"What clients say"}</h2>
                <p>{"Straight from the server owners we build for."}</p>
            </div>
            <div class="testimonials-grid">
                { for TESTIMONIALS.iter().map(|entry| html! {
                    <figure key={entry.author} class="testimonial-card reveal">
                        <span
                            class="testimonial-stars"
                            role="img"
                            aria-label={format!("Rated {} out of 5", entry.rating)}
                        >
                            { star_row(entry.rating) }
                        </span>
                        <blockquote>{ entry.quote }</blockquote>
                        <figcaption>
                            <strong>{ entry.author }</strong>
                            <span>{ entry.role }</span>
                        </figcaption>
                        { (!entry.media.is_empty()).then(|| html! {
                            <div class="testimonial-media">
                                { for entry.media.iter().enumerate().map(|(index, src)| {
                                    let src: &'static str = *src;
                                    let alt = format!("Delivered work for {}", entry.author);
                                    let zoom = {
                                        let on_zoom = props.on_zoom.clone();
                                        let alt = alt.clone();
                                        Callback::from(move |_: MouseEvent| {
                                            on_zoom.emit((src.to_string(), alt.clone()));
                                        })
                                    };
                                    html! {
                                        <button
                                            type="button"
                                            key={src}
                                            class="testimonial-thumb"
                                            aria-label={format!(
                                                "Open screenshot {} from {}",
                                                index + 1,
                                                entry.author
                                            )}
                                            onclick={zoom}
                                        >
                                            <img src={src} alt={alt} loading="lazy" />
                                        </button>
                                    }
                                }) }
                            </div>
                        }) }
                    </figure>
                }) }
            </div>
        </section>
    }
}

const TESTIMONIALS_CSS: &str = r#"
    .testimonials-section {
        padding: 90px 0;
    }
    .testimonials-grid {
        display: grid;
        grid-template-columns: repeat(auto-fit, minmax(300px, 1fr));
        gap: 22px;
    }
    .testimonial-card {
        margin: 0;
        background: rgba(24, 17, 10, 0.72);
        border: 1px solid rgba(255, 153, 0, 0.14);
        border-radius: 14px;
        padding: 26px;
        display: flex;
        flex-direction: column;
        gap: 14px;
    }
    .testimonial-stars {
        color: #ff9900;
        letter-spacing: 3px;
        font-size: 1.05rem;
    }
    .testimonial-card blockquote {
        margin: 0;
        color: #e8dcc6;
        line-height: 1.6;
    }
    .testimonial-card figcaption {
        display: flex;
        flex-direction: column;
        gap: 2px;
    }
    .testimonial-card figcaption strong {
        color: #ffb84d;
    }
    .testimonial-card figcaption span {
        color: #8f8370;
        font-size: 0.85rem;
    }
    .testimonial-media {
        display: flex;
        gap: 10px;
    }
    .testimonial-thumb {
        border: 1px solid rgba(255, 153, 0, 0.18);
        border-radius: 8px;
        background: none;
        padding: 0;
        overflow: hidden;
        cursor: zoom-in;
        width: 84px;
        height: 56px;
    }
    .testimonial-thumb img {
        display: block;
        width: 100%;
        height: 100%;
        object-fit: cover;
    }
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_star_row_fills_by_rating() {
        assert_eq!(star_row(5), "\u{2605}\u{2605}\u{2605}\u{2605}\u{2605}");
        assert_eq!(star_row(4), "\u{2605}\u{2605}\u{2605}\u{2605}\u{2606}");
        assert_eq!(star_row(0), "\u{2606}\u{2606}\u{2606}\u{2606}\u{2606}");
    }

    #[test]
    fn test_star_row_caps_at_five_glyphs() {
        assert_eq!(star_row(9).chars().count(), 5);
    }

    #[test]
    fn test_testimonials_carry_ratings_in_range() {
        for entry in TESTIMONIALS.iter() {
            assert!((1..=5).contains(&entry.rating), "{}", entry.author);
        }
    }
}
