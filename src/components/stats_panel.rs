use std::cell::{Cell, RefCell};
use std::rc::Rc;

use futures::future::join_all;
use gloo_net::http::Request;
use serde::Deserialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    js_sys, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
};
use yew::prelude::*;

use crate::config;
use crate::hooks::observer_supported;
use crate::stats::{count_up_frame, group_digits, normalize_ids, summarize, StatsSummary};

const DOWNLOADS_COUNT_UP_MILLIS: f64 = 1_200.0;
const PROJECTS_COUNT_UP_MILLIS: f64 = 900.0;
const ARM_THRESHOLD: f64 = 0.3;

#[derive(Deserialize)]
struct DownloadStats {
    #[serde(rename = "downloadCount", default)]
    download_count: u64,
}

/// Asks the backend proxy for one project's download count. Failures come
/// back as display-ready strings; the caller sums whatever succeeded.
async fn fetch_download_count(base: &'static str, id: &str) -> Result<u64, String> {
    let url = format!("{}/api/curseforge/{}", base, urlencoding::encode(id));
    let response = Request::get(&url)
        .send()
        .await
        .map_err(|err| err.to_string())?;
    if !response.ok() {
        return Err(format!("HTTP {} for {}", response.status(), id));
    }

    let json_body = json_content_type(response.headers().get("content-type").as_deref());
    if !json_body {
        let body = response.text().await.unwrap_or_default();
        let body = body.trim();
        return Err(if body.is_empty() {
            format!("Non-JSON response for {}", id)
        } else {
            body.chars().take(140).collect()
        });
    }

    let stats: DownloadStats = response.json().await.map_err(|err| err.to_string())?;
    Ok(stats.download_count)
}

// Servers report the header with arbitrary casing and parameters.
fn json_content_type(header: Option<&str>) -> bool {
    header.map(|kind| kind.to_lowercase().contains("application/json")).unwrap_or(false)
}

#[derive(Properties, PartialEq)]
pub struct StatsPanelProps {
    pub project_ids: &'static [&'static str],
}

#[function_component(StatsPanel)]
pub fn stats_panel(props: &StatsPanelProps) -> Html {
    let ids = normalize_ids(props.project_ids.iter().copied());
    let project_total = ids.len() as u64;

    let summary = use_state(|| Option::<StatsSummary>::None);
    let armed = use_state_eq(|| false);
    let shown = use_state_eq(|| (0u64, 0u64));
    let host = use_node_ref();

    {
        let summary = summary.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    let base = config::api_base();
                    let results = join_all(ids.iter().map(|id| fetch_download_count(base, id)));
                    summary.set(Some(summarize(results.await)));
                });
                || ()
            },
            (),
        );
    }

    // Count-up starts the first time the panel scrolls into view and never
    // re-arms, so scrolling past again does not replay the animation.
    {
        let armed = armed.clone();
        let host = host.clone();
        use_effect_with_deps(
            move |_| {
                let mut release: Option<Box<dyn FnOnce()>> = None;
                if !observer_supported() {
                    armed.set(true);
                } else if let Some(element) = host.cast::<Element>() {
                    let watch = Closure::wrap(Box::new(
                        move |entries: js_sys::Array, observer: IntersectionObserver| {
                            for entry in entries.iter() {
                                if let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() {
                                    if entry.is_intersecting() {
                                        armed.set(true);
                                        observer.unobserve(&entry.target());
                                    }
                                }
                            }
                        },
                    )
                        as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);
                    let options = IntersectionObserverInit::new();
                    options.set_threshold(&JsValue::from_f64(ARM_THRESHOLD));
                    if let Ok(observer) = IntersectionObserver::new_with_options(
                        watch.as_ref().unchecked_ref(),
                        &options,
                    ) {
                        observer.observe(&element);
                        release = Some(Box::new(move || {
                            observer.disconnect();
                            drop(watch);
                        }));
                    }
                } else {
                    armed.set(true);
                }
                move || {
                    if let Some(release) = release {
                        release();
                    }
                }
            },
            (),
        );
    }

    {
        let shown = shown.clone();
        let deps = (*armed, (*summary).clone());
        use_effect_with_deps(
            move |(is_armed, loaded): &(bool, Option<StatsSummary>)| {
                let mut release: Option<Box<dyn FnOnce()>> = None;
                if let (true, Some(loaded), Some(window)) =
                    (*is_armed, loaded.as_ref(), web_sys::window())
                {
                    let download_target = loaded.total_downloads;
                    let start = Rc::new(Cell::new(0.0f64));
                    let raf_id = Rc::new(Cell::new(0i32));
                    let frame: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> =
                        Rc::new(RefCell::new(None));
                    {
                        let window = window.clone();
                        let start = start.clone();
                        let raf_id = raf_id.clone();
                        let frame_slot = frame.clone();
                        *frame.borrow_mut() =
                            Some(Closure::wrap(Box::new(move |timestamp: f64| {
                                raf_id.set(0);
                                if start.get() == 0.0 {
                                    start.set(timestamp);
                                }
                                let elapsed = timestamp - start.get();
                                let (downloads, downloads_done) = count_up_frame(
                                    download_target,
                                    elapsed,
                                    DOWNLOADS_COUNT_UP_MILLIS,
                                );
                                let (projects, projects_done) = count_up_frame(
                                    project_total,
                                    elapsed,
                                    PROJECTS_COUNT_UP_MILLIS,
                                );
                                shown.set((downloads, projects));
                                if downloads_done && projects_done {
                                    return;
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
                    if let Some(cb) = frame.borrow().as_ref() {
                        if let Ok(id) =
                            window.request_animation_frame(cb.as_ref().unchecked_ref())
                        {
                            raf_id.set(id);
                        }
                    }
                    release = Some(Box::new(move || {
                        let id = raf_id.get();
                        if id != 0 {
                            let _ = window.cancel_animation_frame(id);
                        }
                        frame.borrow_mut().take();
                    }));
                }
                move || {
                    if let Some(release) = release {
                        release();
                    }
                }
            },
            deps,
        );
    }

    let loaded = summary.is_some();
    let note = summary.as_ref().and_then(|s| s.failure_note.clone());
    let total = summary.as_ref().map(|s| s.total_downloads).unwrap_or(0);
    let (shown_downloads, shown_projects) = *shown;
    let zero_hint = loaded && note.is_none() && total == 0;

    html! {
        <section id="stats" class="stats-section" ref={host}>
            <style>{STATS_CSS}</style>
            <div class="section-head reveal">
                <h2>{"Numbers so far"}</h2>
                <p>{"Live download counts straight from the project pages."}</p>
            </div>
            <div class="stats-grid">
                <div class="stat-card reveal">
                    <span class="stat-value">
                        { if loaded { group_digits(shown_downloads) } else { "\u{2026}".to_string() } }
                    </span>
                    <span class="stat-label">{"Total downloads"}</span>
                </div>
                <div class="stat-card reveal">
                    <span class="stat-value">
                        { if loaded { group_digits(shown_projects) } else { "\u{2026}".to_string() } }
                    </span>
                    <span class="stat-label">{"Published projects"}</span>
                </div>
            </div>
            { note.map(|note| html! {
                <p class="stats-note">{ format!("Server: {}", note) }</p>
            }) }
            { zero_hint.then(|| html! {
                <p class="stats-hint">{"Counters just reset upstream, check back in a bit."}</p>
            }) }
        </section>
    }
}

const STATS_CSS: &str = r#"
    .stats-section {
        padding: 90px 0;
    }
    .stats-grid {
        display: grid;
        grid-template-columns: repeat(auto-fit, minmax(220px, 1fr));
        gap: 22px;
        max-width: 640px;
    }
    .stat-card {
        background: rgba(24, 17, 10, 0.72);
        border: 1px solid rgba(255, 153, 0, 0.14);
        border-radius: 14px;
        padding: 28px 24px;
        display: flex;
        flex-direction: column;
        gap: 8px;
    }
    .stat-value {
        font-size: 2.4rem;
        font-weight: 800;
        color: #ffb84d;
        font-variant-numeric: tabular-nums;
    }
    .stat-label {
        color: #c9bba6;
        font-size: 0.9rem;
        text-transform: uppercase;
        letter-spacing: 0.08em;
    }
    .stats-note {
        margin: 16px 0 0;
        color: #ff8a5c;
        font-size: 0.9rem;
    }
    .stats-hint {
        margin: 16px 0 0;
        color: #8f8370;
        font-size: 0.9rem;
    }
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_download_stats_reads_camel_case_count() {
        let stats: DownloadStats = serde_json::from_str(r#"{"downloadCount": 4321}"#)
            .expect("payload should parse");
        assert_eq!(stats.download_count, 4321);
    }

    #[test]
    fn test_download_stats_missing_count_defaults_to_zero() {
        let stats: DownloadStats = serde_json::from_str("{}").expect("payload should parse");
        assert_eq!(stats.download_count, 0);
    }

    #[test]
    fn test_download_stats_ignores_extra_fields() {
        let stats: DownloadStats =
            serde_json::from_str(r#"{"downloadCount": 7, "name": "pack"}"#)
                .expect("payload should parse");
        assert_eq!(stats.download_count, 7);
    }

    #[test]
    fn test_json_content_type_ignores_case_and_parameters() {
        assert!(json_content_type(Some("application/json")));
        assert!(json_content_type(Some("Application/JSON; charset=utf-8")));
        assert!(json_content_type(Some("application/json;charset=UTF-8")));
        assert!(!json_content_type(Some("text/html")));
        assert!(!json_content_type(None));
    }
}
