use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{
    Element, Event, File, HtmlInputElement, HtmlTextAreaElement, KeyboardEvent, MouseEvent, Node,
    ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition, SubmitEvent,
};
use yew::prelude::*;

use crate::components::captcha::CaptchaGate;
use crate::config;
use crate::contact::attachments::{AttachmentStore, MAX_ATTACHMENTS};
use crate::contact::payload::{ContactDraft, ContactMethod, MAX_MESSAGE_CHARS, MAX_SUBJECT_CHARS};
use crate::contact::submission::{
    self, SubmissionBlock, SubmissionController, SubmissionEvent, Verdict, SENDING_MESSAGE,
    SUCCESS_MESSAGE,
};
use crate::contact::tags::{TagSelection, TAG_OPTIONS};
use crate::contact::verification::{VerificationState, HIGHLIGHT_MILLIS};
use crate::contact::web::{HttpContactGateway, ObjectUrlRegistry};

const DISCORD_INVITE: &str = "https://discord.gg/cinderworks";
const DISCORD_USERNAME: &str = "cinderworks";
const COPIED_RESET_MILLIS: u32 = 2_800;

pub enum VerificationAction {
    Verified(String),
    Expired,
    FlagMissing,
    ClearHighlight,
    Reset,
}

// The widget callbacks and highlight timer fire long after the render that
// created them, so verification state updates go through a reducer and
// always apply to the current value.
impl Reducible for VerificationState {
    type Action = VerificationAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            VerificationAction::Verified(token) => next.verify(token),
            VerificationAction::Expired => next.expire(),
            VerificationAction::FlagMissing => next.flag_missing(),
            VerificationAction::ClearHighlight => next.clear_highlight(),
            VerificationAction::Reset => next.reset(),
        }
        Rc::new(next)
    }
}

#[derive(Clone, PartialEq)]
struct PreviewCard {
    url: String,
    name: String,
}

fn snapshot_previews(store: &AttachmentStore<File, ObjectUrlRegistry>) -> Vec<PreviewCard> {
    store
        .items()
        .iter()
        .map(|item| PreviewCard {
            url: item.preview().to_string(),
            name: item.source().name(),
        })
        .collect()
}

#[derive(Properties, PartialEq)]
pub struct TagSelectProps {
    pub on_change: Callback<TagSelection>,
}

/// Multi-select dropdown over the fixed tag list. Options toggle without
/// closing the menu; Escape, the trigger button and outside clicks close
/// it. The parent remounts this via its `key` to reset it after a send.
#[function_component(TagSelect)]
pub fn tag_select(props: &TagSelectProps) -> Html {
    let selection = use_state(TagSelection::default);
    let open = use_state_eq(|| false);
    let root = use_node_ref();

    {
        let open = open.clone();
        let root = root.clone();
        use_effect_with_deps(
            move |_| {
                let outside = Closure::wrap(Box::new(move |event: MouseEvent| {
                    let inside = root
                        .get()
                        .zip(event.target().and_then(|t| t.dyn_into::<Node>().ok()))
                        .map(|(root, target)| root.contains(Some(&target)))
                        .unwrap_or(false);
                    if !inside {
                        open.set(false);
                    }
                }) as Box<dyn FnMut(MouseEvent)>);
                if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                    let _ = document.add_event_listener_with_callback(
                        "mousedown",
                        outside.as_ref().unchecked_ref(),
                    );
                }
                move || {
                    if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                        let _ = document.remove_event_listener_with_callback(
                            "mousedown",
                            outside.as_ref().unchecked_ref(),
                        );
                    }
                }
            },
            (),
        );
    }

    let toggle_open = {
        let open = open.clone();
        Callback::from(move |_: MouseEvent| open.set(!*open))
    };
    let key_control = {
        let open = open.clone();
        Callback::from(move |event: KeyboardEvent| match event.key().as_str() {
            "Enter" | " " => {
                event.prevent_default();
                open.set(!*open);
            }
            "Escape" => open.set(false),
            _ => {}
        })
    };

    let label = if selection.is_empty() {
        "Select tags".to_string()
    } else {
        selection.serialized()
    };

    let menu = (*open).then(|| {
        html! {
            <ul class="tag-menu" role="listbox" aria-label="Project tags">
                { for TAG_OPTIONS.iter().map(|option| {
                    let option: &'static str = *option;
                    let picked = selection.contains(option);
                    let pick = {
                        let selection = selection.clone();
                        let on_change = props.on_change.clone();
                        Callback::from(move |_: MouseEvent| {
                            let mut next = (*selection).clone();
                            next.toggle(option);
                            on_change.emit(next.clone());
                            selection.set(next);
                        })
                    };
                    html! {
                        <li
                            key={option}
                            class={classes!("tag-option", picked.then(|| "picked"))}
                            role="option"
                            aria-selected={picked.to_string()}
                            onclick={pick}
                        >
                            <span class="tag-mark">{ if picked { "\u{2713}" } else { "" } }</span>
                            { option }
                        </li>
                    }
                }) }
            </ul>
        }
    });

    html! {
        <div class="tag-select" ref={root}>
            <button
                type="button"
                class={classes!("tag-trigger", (!selection.is_empty()).then(|| "has-tags"))}
                aria-haspopup="listbox"
                aria-expanded={open.to_string()}
                onclick={toggle_open}
                onkeydown={key_control}
            >
                { label }
                <span class="tag-caret" aria-hidden="true">{"\u{25be}"}</span>
            </button>
            { menu }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ContactProps {
    pub on_zoom: Callback<(String, String)>,
}

#[function_component(Contact)]
pub fn contact(props: &ContactProps) -> Html {
    let method = use_state(|| ContactMethod::Discord);
    let name = use_state(String::new);
    let email = use_state(String::new);
    let discord_username = use_state(String::new);
    let subject = use_state(String::new);
    let message_body = use_state(String::new);

    let tags = use_state(TagSelection::default);
    let tags_epoch = use_state(|| 0u32);

    let verification = use_reducer(VerificationState::default);
    let captcha_epoch = use_state(|| 0u32);
    let gate_anchor = use_node_ref();

    let status = use_state(String::new);
    let sending = use_state(|| false);
    let controller = use_mut_ref(SubmissionController::default);

    let store = use_mut_ref(|| AttachmentStore::new(ObjectUrlRegistry::default()));
    let previews = use_state(Vec::<PreviewCard>::new);
    let file_input = use_node_ref();

    let copied = use_state(|| false);
    let copy_timer = use_mut_ref(|| Option::<Timeout>::None);

    // Preview handles die with the section.
    {
        let store = store.clone();
        use_effect_with_deps(
            move |_| {
                move || {
                    store.borrow_mut().clear();
                }
            },
            (),
        );
    }

    let set_discord = {
        let method = method.clone();
        Callback::from(move |_: Event| method.set(ContactMethod::Discord))
    };
    let set_email = {
        let method = method.clone();
        Callback::from(move |_: Event| method.set(ContactMethod::Email))
    };

    let on_name = {
        let name = name.clone();
        Callback::from(move |event: Event| {
            let input: HtmlInputElement = event.target_unchecked_into();
            name.set(input.value());
        })
    };
    let on_email = {
        let email = email.clone();
        Callback::from(move |event: Event| {
            let input: HtmlInputElement = event.target_unchecked_into();
            email.set(input.value());
        })
    };
    let on_discord_username = {
        let discord_username = discord_username.clone();
        Callback::from(move |event: Event| {
            let input: HtmlInputElement = event.target_unchecked_into();
            discord_username.set(input.value());
        })
    };
    let on_subject = {
        let subject = subject.clone();
        Callback::from(move |event: Event| {
            let input: HtmlInputElement = event.target_unchecked_into();
            let value = input.value();
            if value.chars().count() <= MAX_SUBJECT_CHARS {
                subject.set(value);
            }
        })
    };
    let on_message = {
        let message_body = message_body.clone();
        Callback::from(move |event: Event| {
            let area: HtmlTextAreaElement = event.target_unchecked_into();
            let value = area.value();
            if value.chars().count() <= MAX_MESSAGE_CHARS {
                message_body.set(value);
            }
        })
    };

    let on_tags = {
        let tags = tags.clone();
        Callback::from(move |selection: TagSelection| tags.set(selection))
    };

    let on_verify = {
        let verification = verification.clone();
        Callback::from(move |token: String| {
            verification.dispatch(VerificationAction::Verified(token));
        })
    };
    let on_expire = {
        let verification = verification.clone();
        Callback::from(move |_: ()| verification.dispatch(VerificationAction::Expired))
    };

    let pick_files = {
        let file_input = file_input.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(input) = file_input.cast::<HtmlInputElement>() {
                input.click();
            }
        })
    };

    let on_pick = {
        let store = store.clone();
        let previews = previews.clone();
        let status = status.clone();
        Callback::from(move |event: Event| {
            let input: HtmlInputElement = event.target_unchecked_into();
            let picked: Vec<File> = input
                .files()
                .map(|list| (0..list.length()).filter_map(|i| list.item(i)).collect())
                .unwrap_or_default();
            // Re-picking the same file should fire change again next time.
            input.set_value("");
            if picked.is_empty() {
                return;
            }
            let outcome = store.borrow_mut().add(picked);
            if let Some(notice) = outcome.notice {
                status.set(notice.message().to_string());
            }
            previews.set(snapshot_previews(&store.borrow()));
        })
    };

    let on_remove = {
        let store = store.clone();
        let previews = previews.clone();
        Callback::from(move |index: usize| {
            store.borrow_mut().remove(index);
            previews.set(snapshot_previews(&store.borrow()));
        })
    };

    let on_copy = {
        let copied = copied.clone();
        let copy_timer = copy_timer.clone();
        Callback::from(move |_: MouseEvent| {
            let copied = copied.clone();
            let copy_timer = copy_timer.clone();
            spawn_local(async move {
                if let Some(window) = web_sys::window() {
                    let promise = window.navigator().clipboard().write_text(DISCORD_USERNAME);
                    if JsFuture::from(promise).await.is_ok() {
                        copied.set(true);
                        let copied = copied.clone();
                        *copy_timer.borrow_mut() =
                            Some(Timeout::new(COPIED_RESET_MILLIS, move || {
                                copied.set(false);
                            }));
                    }
                }
            });
        })
    };

    let on_submit = {
        let method = method.clone();
        let name = name.clone();
        let email = email.clone();
        let discord_username = discord_username.clone();
        let subject = subject.clone();
        let message_body = message_body.clone();
        let tags = tags.clone();
        let tags_epoch = tags_epoch.clone();
        let captcha_epoch = captcha_epoch.clone();
        let verification = verification.clone();
        let status = status.clone();
        let sending = sending.clone();
        let controller = controller.clone();
        let store = store.clone();
        let previews = previews.clone();
        let gate_anchor = gate_anchor.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();

            let draft = ContactDraft {
                method: *method,
                name: (*name).clone(),
                email: (*email).clone(),
                discord_username: (*discord_username).clone(),
                subject: (*subject).clone(),
                message: (*message_body).clone(),
            };
            let verification_now = (*verification).clone();
            let tags_now = (*tags).clone();
            let files = store.borrow().sources();

            let method = method.clone();
            let name = name.clone();
            let email = email.clone();
            let discord_username = discord_username.clone();
            let subject = subject.clone();
            let message_body = message_body.clone();
            let tags = tags.clone();
            let tags_epoch = tags_epoch.clone();
            let captcha_epoch = captcha_epoch.clone();
            let verification = verification.clone();
            let status = status.clone();
            let sending = sending.clone();
            let controller = controller.clone();
            let store = store.clone();
            let previews = previews.clone();
            let gate_anchor = gate_anchor.clone();
            spawn_local(async move {
                let gateway = HttpContactGateway::new(config::api_base());
                let flip_to_sending = {
                    let status = status.clone();
                    let sending = sending.clone();
                    move || {
                        status.set(SENDING_MESSAGE.to_string());
                        sending.set(true);
                    }
                };

                let outcome = submission::submit(
                    controller,
                    &gateway,
                    &draft,
                    &verification_now,
                    &tags_now,
                    files,
                    !config::hcaptcha_site_key().is_empty(),
                    flip_to_sending,
                )
                .await;

                if !outcome.concludes_attempt() {
                    // The first attempt still owns the sending flag.
                    return;
                }

                match outcome {
                    SubmissionEvent::Blocked(SubmissionBlock::VerificationMissing) => {
                        status.set(SubmissionBlock::VerificationMissing.to_string());
                        verification.dispatch(VerificationAction::FlagMissing);
                        if let Some(anchor) = gate_anchor.cast::<Element>() {
                            let options = ScrollIntoViewOptions::new();
                            options.set_behavior(ScrollBehavior::Smooth);
                            options.set_block(ScrollLogicalPosition::Center);
                            anchor.scroll_into_view_with_scroll_into_view_options(&options);
                        }
                        let verification = verification.clone();
                        Timeout::new(HIGHLIGHT_MILLIS, move || {
                            verification.dispatch(VerificationAction::ClearHighlight);
                        })
                        .forget();
                    }
                    SubmissionEvent::Blocked(block) => status.set(block.to_string()),
                    SubmissionEvent::Settled(Verdict::Accepted) => {
                        method.set(ContactMethod::Discord);
                        name.set(String::new());
                        email.set(String::new());
                        discord_username.set(String::new());
                        subject.set(String::new());
                        message_body.set(String::new());
                        tags.set(TagSelection::default());
                        tags_epoch.set(*tags_epoch + 1);
                        captcha_epoch.set(*captcha_epoch + 1);
                        verification.dispatch(VerificationAction::Reset);
                        store.borrow_mut().clear();
                        previews.set(Vec::new());
                        status.set(SUCCESS_MESSAGE.to_string());
                    }
                    SubmissionEvent::Settled(Verdict::Rejected { message }) => status.set(message),
                }
                sending.set(false);
            });
        })
    };

    let site_key = config::hcaptcha_site_key();
    let gate_state: VerificationState = (*verification).clone();
    let preview_cards = (*previews).clone();
    let at_capacity = preview_cards.len() >= MAX_ATTACHMENTS;

    let identity_fields = match *method {
        ContactMethod::Discord => html! {
            <label class="field">
                <span>{"Discord username"}</span>
                <input
                    type="text"
                    name="discordUsername"
                    placeholder="yourname"
                    required=true
                    maxlength="100"
                    value={(*discord_username).clone()}
                    onchange={on_discord_username}
                />
            </label>
        },
        ContactMethod::Email => html! {
            <>
                <label class="field">
                    <span>{"Name"}</span>
                    <input
                        type="text"
                        name="name"
                        placeholder="Your name"
                        required=true
                        maxlength="100"
                        value={(*name).clone()}
                        onchange={on_name}
                    />
                </label>
                <label class="field">
                    <span>{"Email"}</span>
                    <input
                        type="email"
                        name="email"
                        placeholder="you@example.com"
                        required=true
                        maxlength="120"
                        value={(*email).clone()}
                        onchange={on_email}
                    />
                </label>
            </>
        },
    };

    html! {
        <section id="contact" class="contact-section">
            <style>{CONTACT_CSS}</style>
            <div class="section-head reveal">
                <h2>{"Start a project"}</h2>
                <p>{"Tell us what you need and we will get a build plan back to you."}</p>
            </div>
            <div class="contact-grid">
                <form class="contact-form reveal" onsubmit={on_submit}>
                    <fieldset class="method-row">
                        <legend>{"How should we reply?"}</legend>
                        <label class="method-option">
                            <input
                                type="radio"
                                name="method"
                                checked={*method == ContactMethod::Discord}
                                onchange={set_discord}
                            />
                            <span>{"Discord"}</span>
                        </label>
                        <label class="method-option">
                            <input
                                type="radio"
                                name="method"
                                checked={*method == ContactMethod::Email}
                                onchange={set_email}
                            />
                            <span>{"Email"}</span>
                        </label>
                    </fieldset>

                    { identity_fields }

                    <label class="field">
                        <span>{"Subject"}</span>
                        <input
                            type="text"
                            name="subject"
                            placeholder="What are we building?"
                            required=true
                            maxlength="120"
                            value={(*subject).clone()}
                            onchange={on_subject}
                        />
                    </label>

                    <label class="field">
                        <span>{"Message"}</span>
                        <textarea
                            name="message"
                            rows="6"
                            placeholder="Scope, references, deadlines..."
                            required=true
                            maxlength="1900"
                            value={(*message_body).clone()}
                            onchange={on_message}
                        />
                    </label>

                    <div class="field">
                        <span class="field-label">{"Tags"}</span>
                        <TagSelect key={format!("tags-{}", *tags_epoch)} on_change={on_tags} />
                    </div>

                    <div class="field">
                        <span class="field-label">{"Screenshots (optional)"}</span>
                        <input
                            ref={file_input}
                            type="file"
                            accept="image/*"
                            multiple=true
                            style="display: none;"
                            onchange={on_pick}
                        />
                        <button
                            type="button"
                            class="attach-button"
                            onclick={pick_files}
                            disabled={at_capacity}
                        >
                            { if at_capacity { "Image limit reached" } else { "Add images" } }
                        </button>
                        { (!preview_cards.is_empty()).then(|| html! {
                            <div class="attachment-grid">
                                { for preview_cards.iter().enumerate().map(|(index, card)| {
                                    let alt = format!("Attachment {}", index + 1);
                                    let open_preview = {
                                        let on_zoom = props.on_zoom.clone();
                                        let url = card.url.clone();
                                        let alt = alt.clone();
                                        Callback::from(move |_: MouseEvent| {
                                            on_zoom.emit((url.clone(), alt.clone()));
                                        })
                                    };
                                    let remove = {
                                        let on_remove = on_remove.clone();
                                        Callback::from(move |event: MouseEvent| {
                                            event.stop_propagation();
                                            on_remove.emit(index);
                                        })
                                    };
                                    html! {
                                        <div
                                            class="attachment-card"
                                            key={card.url.clone()}
                                            title={card.name.clone()}
                                            onclick={open_preview}
                                        >
                                            <img src={card.url.clone()} alt={alt} />
                                            <button
                                                type="button"
                                                class="attachment-remove"
                                                aria-label={format!("Remove attachment {}", index + 1)}
                                                onclick={remove}
                                            >
                                                {"\u{00d7}"}
                                            </button>
                                        </div>
                                    }
                                }) }
                            </div>
                        }) }
                    </div>

                    <div
                        ref={gate_anchor}
                        class={classes!("captcha-bay", gate_state.highlighted().then(|| "attention"))}
                    >
                        <CaptchaGate
                            site_key={site_key}
                            reset_epoch={*captcha_epoch}
                            on_verify={on_verify}
                            on_expire={on_expire}
                        />
                        { (!gate_state.error().is_empty()).then(|| html! {
                            <p class="captcha-error" aria-live="assertive">
                                { gate_state.error().to_string() }
                            </p>
                        }) }
                    </div>

                    <button
                        type="submit"
                        class="send-button"
                        disabled={*sending || site_key.is_empty()}
                    >
                        { if *sending { "Sending\u{2026}" } else { "Send" } }
                    </button>
                    <p class="form-status" aria-live="polite">{ (*status).clone() }</p>
                </form>

                <aside class="discord-panel reveal">
                    <h3>{"Prefer Discord?"}</h3>
                    <p>
                        {"Most of our build threads live on our server. Join and ping us, or \
                          add the studio account directly."}
                    </p>
                    <a
                        class="discord-join"
                        href={DISCORD_INVITE}
                        target="_blank"
                        rel="noreferrer noopener"
                    >
                        {"Join the server"}
                    </a>
                    <div class="discord-user">
                        <code>{ DISCORD_USERNAME }</code>
                        <button type="button" class="copy-button" onclick={on_copy}>
                            { if *copied { "Copied!" } else { "Copy" } }
                        </button>
                    </div>
                    <p class="discord-hint">
                        {"Replies usually land within a day, faster on weekdays."}
                    </p>
                </aside>
            </div>
        </section>
    }
}

const CONTACT_CSS: &str = r#"
    .contact-section {
        padding: 90px 0 110px;
    }
    .contact-grid {
        display: grid;
        grid-template-columns: minmax(0, 1.6fr) minmax(0, 1fr);
        gap: 28px;
        align-items: start;
    }
    .contact-form {
        display: flex;
        flex-direction: column;
        gap: 16px;
        background: rgba(24, 17, 10, 0.72);
        border: 1px solid rgba(255, 153, 0, 0.14);
        border-radius: 14px;
        padding: 26px;
    }
    .method-row {
        display: flex;
        gap: 18px;
        border: none;
        padding: 0;
        margin: 0;
    }
    .method-row legend {
        color: #c9bba6;
        font-size: 0.85rem;
        margin-bottom: 8px;
    }
    .method-option {
        display: inline-flex;
        align-items: center;
        gap: 7px;
        color: #f3e9d8;
        cursor: pointer;
    }
    .method-option input {
        accent-color: #ff9900;
    }
    .field {
        display: flex;
        flex-direction: column;
        gap: 6px;
    }
    .field > span,
    .field-label {
        color: #c9bba6;
        font-size: 0.85rem;
    }
    .field input[type="text"],
    .field input[type="email"],
    .field textarea {
        background: rgba(10, 7, 4, 0.85);
        border: 1px solid rgba(255, 153, 0, 0.18);
        border-radius: 9px;
        padding: 11px 13px;
        color: #f6efdf;
        font: inherit;
        resize: vertical;
    }
    .field input:focus-visible,
    .field textarea:focus-visible,
    .tag-trigger:focus-visible {
        outline: 2px solid #ff9900;
        outline-offset: 1px;
    }
    .tag-select {
        position: relative;
    }
    .tag-trigger {
        width: 100%;
        display: flex;
        align-items: center;
        justify-content: space-between;
        gap: 10px;
        background: rgba(10, 7, 4, 0.85);
        border: 1px solid rgba(255, 153, 0, 0.18);
        border-radius: 9px;
        padding: 11px 13px;
        color: #8f8370;
        font: inherit;
        cursor: pointer;
        text-align: left;
    }
    .tag-trigger.has-tags {
        color: #f6efdf;
    }
    .tag-menu {
        position: absolute;
        top: calc(100% + 6px);
        left: 0;
        right: 0;
        z-index: 30;
        margin: 0;
        padding: 6px;
        list-style: none;
        background: #17100a;
        border: 1px solid rgba(255, 153, 0, 0.22);
        border-radius: 10px;
        box-shadow: 0 14px 40px rgba(0, 0, 0, 0.5);
    }
    .tag-option {
        display: flex;
        align-items: center;
        gap: 9px;
        padding: 9px 11px;
        border-radius: 7px;
        color: #e8dcc6;
        cursor: pointer;
    }
    .tag-option:hover {
        background: rgba(255, 153, 0, 0.1);
    }
    .tag-option.picked {
        color: #ffb84d;
    }
    .tag-mark {
        width: 14px;
        color: #ff9900;
    }
    .attach-button {
        align-self: flex-start;
        background: none;
        border: 1px dashed rgba(255, 153, 0, 0.4);
        border-radius: 9px;
        color: #ffb84d;
        padding: 9px 14px;
        font: inherit;
        cursor: pointer;
    }
    .attach-button:disabled {
        color: #8f8370;
        border-color: rgba(143, 131, 112, 0.4);
        cursor: not-allowed;
    }
    .attachment-grid {
        display: grid;
        grid-template-columns: repeat(auto-fill, minmax(86px, 1fr));
        gap: 10px;
        margin-top: 10px;
    }
    .attachment-card {
        position: relative;
        border-radius: 8px;
        overflow: hidden;
        cursor: zoom-in;
        border: 1px solid rgba(255, 153, 0, 0.18);
    }
    .attachment-card img {
        display: block;
        width: 100%;
        height: 72px;
        object-fit: cover;
    }
    .attachment-remove {
        position: absolute;
        top: 4px;
        right: 4px;
        width: 22px;
        height: 22px;
        border: none;
        border-radius: 50%;
        background: rgba(5, 4, 3, 0.82);
        color: #ffb84d;
        cursor: pointer;
        line-height: 1;
    }
    .captcha-bay {
        border-radius: 10px;
        padding: 6px;
        transition: box-shadow 0.25s ease, outline-color 0.25s ease;
        outline: 2px solid transparent;
    }
    .captcha-bay.attention {
        outline-color: #ff9900;
        box-shadow: 0 0 0 4px rgba(255, 153, 0, 0.25);
    }
    .captcha-slot {
        min-height: 78px;
    }
    .captcha-error {
        margin: 8px 0 0;
        color: #ff8a5c;
        font-size: 0.9rem;
    }
    .captcha-unconfigured {
        margin: 0;
        color: #8f8370;
        font-size: 0.9rem;
    }
    .send-button {
        align-self: flex-start;
        background: linear-gradient(180deg, #ffaa33, #ff8800);
        color: #1c1107;
        border: none;
        border-radius: 10px;
        padding: 12px 30px;
        font: inherit;
        font-weight: 700;
        cursor: pointer;
    }
    .send-button:disabled {
        filter: grayscale(0.7);
        opacity: 0.6;
        cursor: not-allowed;
    }
    .form-status {
        min-height: 1.2em;
        margin: 0;
        color: #e8dcc6;
        font-size: 0.92rem;
    }
    .discord-panel {
        background: rgba(24, 17, 10, 0.72);
        border: 1px solid rgba(255, 153, 0, 0.14);
        border-radius: 14px;
        padding: 26px;
        display: flex;
        flex-direction: column;
        gap: 14px;
    }
    .discord-panel h3 {
        margin: 0;
        color: #ffb84d;
    }
    .discord-panel p {
        margin: 0;
        color: #c9bba6;
        line-height: 1.55;
    }
    .discord-join {
        align-self: flex-start;
        background: #5865f2;
        color: #fff;
        text-decoration: none;
        border-radius: 9px;
        padding: 10px 18px;
        font-weight: 600;
    }
    .discord-user {
        display: flex;
        align-items: center;
        gap: 10px;
    }
    .discord-user code {
        background: rgba(10, 7, 4, 0.85);
        border: 1px solid rgba(255, 153, 0, 0.18);
        border-radius: 7px;
        padding: 7px 12px;
        color: #f6efdf;
    }
    .copy-button {
        background: none;
        border: 1px solid rgba(255, 153, 0, 0.4);
        border-radius: 7px;
        color: #ffb84d;
        padding: 7px 14px;
        font: inherit;
        cursor: pointer;
    }
    .discord-hint {
        font-size: 0.85rem;
    }
    @media (max-width: 860px) {
        .contact-grid {
            grid-template-columns: 1fr;
        }
    }
"#;
