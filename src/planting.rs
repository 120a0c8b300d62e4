use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlTextAreaElement, KeyboardEvent};
use yew::prelude::*;

use digibloom_core::protocol::CreateFlower;
use digibloom_core::{Flower, FlowerKind, AUTHOR_MAX_CHARS, MESSAGE_MAX_CHARS, TITLE_MAX_CHARS};

use crate::api;

const STEP_FIRST: u8 = 1;
const STEP_LAST: u8 = 4;
const SUBMIT_FAILED_MESSAGE: &str = "Failed to plant flower. Please try again.";

#[derive(Properties, PartialEq)]
pub(crate) struct PlantingDrawerProps {
    pub open: bool,
    pub position: Option<(f64, f64)>,
    pub on_close: Callback<()>,
    pub on_success: Callback<Flower>,
}

/// Four-step planting wizard: kind, title, message, optional author. The
/// form keeps its state on submission failure so the user can retry.
#[function_component(PlantingDrawer)]
pub(crate) fn planting_drawer(props: &PlantingDrawerProps) -> Html {
    let step = use_state(|| STEP_FIRST);
    let title = use_state(String::new);
    let message = use_state(String::new);
    let author = use_state(String::new);
    let kind = use_state(|| FlowerKind::YellowSunflower);
    let submitting = use_state(|| false);
    let form_error = use_state(|| None::<String>);

    // Start fresh every time the drawer opens.
    {
        let step = step.clone();
        let title = title.clone();
        let message = message.clone();
        let author = author.clone();
        let kind = kind.clone();
        let submitting = submitting.clone();
        let form_error = form_error.clone();
        use_effect_with(props.open, move |open| {
            if *open {
                step.set(STEP_FIRST);
                title.set(String::new());
                message.set(String::new());
                author.set(String::new());
                kind.set(FlowerKind::YellowSunflower);
                submitting.set(false);
                form_error.set(None);
            }
            || ()
        });
    }

    if !props.open {
        return html! {};
    }

    let next_blocked = match *step {
        2 => title.trim().is_empty(),
        3 => message.trim().is_empty(),
        _ => false,
    };

    let on_next = {
        let step = step.clone();
        let form_error = form_error.clone();
        Callback::from(move |_: MouseEvent| {
            form_error.set(None);
            step.set((*step + 1).min(STEP_LAST));
        })
    };
    let on_back = {
        let step = step.clone();
        Callback::from(move |_: MouseEvent| {
            step.set((*step - 1).max(STEP_FIRST));
        })
    };
    let on_close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    let on_title_input = {
        let title = title.clone();
        Callback::from(move |event: InputEvent| {
            let input: HtmlInputElement = event.target_unchecked_into();
            title.set(input.value());
        })
    };
    let on_title_keydown = {
        let step = step.clone();
        let title = title.clone();
        Callback::from(move |event: KeyboardEvent| {
            if event.key() == "Enter" {
                event.prevent_default();
                if !title.trim().is_empty() {
                    step.set(3);
                }
            }
        })
    };
    let on_message_input = {
        let message = message.clone();
        Callback::from(move |event: InputEvent| {
            let area: HtmlTextAreaElement = event.target_unchecked_into();
            message.set(area.value());
        })
    };
    let on_author_input = {
        let author = author.clone();
        Callback::from(move |event: InputEvent| {
            let input: HtmlInputElement = event.target_unchecked_into();
            author.set(input.value());
        })
    };

    let on_submit = {
        let title = title.clone();
        let message = message.clone();
        let author = author.clone();
        let kind = kind.clone();
        let submitting = submitting.clone();
        let form_error = form_error.clone();
        let on_success = props.on_success.clone();
        let position = props.position;
        Callback::from(move |_: MouseEvent| {
            if *submitting {
                return;
            }
            let Some((x, y)) = position else {
                form_error.set(Some("Invalid planting position".to_string()));
                return;
            };
            let body = CreateFlower {
                title: title.trim().to_string(),
                message: message.trim().to_string(),
                author: Some(author.trim().to_string()).filter(|author| !author.is_empty()),
                x,
                y,
                flower: *kind,
            };
            if let Err(err) = body.validate() {
                form_error.set(Some(err.to_string()));
                return;
            }
            submitting.set(true);
            form_error.set(None);
            let submitting = submitting.clone();
            let form_error = form_error.clone();
            let on_success = on_success.clone();
            spawn_local(async move {
                match api::plant_flower(&body).await {
                    Ok(flower) => {
                        on_success.emit(flower);
                    }
                    Err(err) => {
                        log::error!("planting failed: {err}");
                        form_error.set(Some(SUBMIT_FAILED_MESSAGE.to_string()));
                    }
                }
                submitting.set(false);
            });
        })
    };

    let kind_options: Html = FlowerKind::ALL
        .into_iter()
        .map(|option| {
            let meta = option.meta();
            let selected = *kind == option;
            let onclick = {
                let kind = kind.clone();
                Callback::from(move |_: MouseEvent| kind.set(option))
            };
            html! {
                <button
                    type="button"
                    key={option.tag()}
                    class={classes!("kind-option", selected.then_some("kind-selected"))}
                    {onclick}
                >
                    <img src={meta.image} alt={meta.name} />
                    <span class="kind-name">{ meta.name }</span>
                    <span class="kind-meaning">{ meta.meaning }</span>
                </button>
            }
        })
        .collect();

    let body = match *step {
        1 => html! {
            <div class="wizard-step">
                <h3>{ "Pick a flower type" }</h3>
                <p class="wizard-hint">{ "Each flower carries a different meaning." }</p>
                <div class="kind-grid">{ kind_options }</div>
            </div>
        },
        2 => html! {
            <div class="wizard-step">
                <label for="plant-title">{ "Give your message a title" }</label>
                <input
                    id="plant-title"
                    type="text"
                    value={(*title).clone()}
                    oninput={on_title_input}
                    onkeydown={on_title_keydown}
                    placeholder="e.g. Hope for Tomorrow"
                    maxlength={TITLE_MAX_CHARS.to_string()}
                />
                <p class="char-count">{ format!("{}/{}", title.chars().count(), TITLE_MAX_CHARS) }</p>
            </div>
        },
        3 => html! {
            <div class="wizard-step">
                <label for="plant-message">{ "What's on your mind?" }</label>
                <textarea
                    id="plant-message"
                    value={(*message).clone()}
                    oninput={on_message_input}
                    placeholder="Share your positive thoughts..."
                    rows="6"
                    maxlength={MESSAGE_MAX_CHARS.to_string()}
                />
                <p class="char-count">{ format!("{}/{}", message.chars().count(), MESSAGE_MAX_CHARS) }</p>
            </div>
        },
        _ => html! {
            <div class="wizard-step">
                <label for="plant-author">{ "Sign your name (optional)" }</label>
                <input
                    id="plant-author"
                    type="text"
                    value={(*author).clone()}
                    oninput={on_author_input}
                    placeholder="Anonymous"
                    maxlength={AUTHOR_MAX_CHARS.to_string()}
                />
            </div>
        },
    };

    html! {
        <div class="drawer-backdrop">
            <div class="planting-drawer">
                <button type="button" class="drawer-close" onclick={on_close} aria-label="Close">
                    { "\u{00d7}" }
                </button>
                <div class="drawer-body">{ body }</div>
                if let Some(message) = (*form_error).clone() {
                    <p class="form-error">{ message }</p>
                }
                <div class="drawer-footer">
                    if *step > STEP_FIRST {
                        <button type="button" class="button-secondary" onclick={on_back}>
                            { "Back" }
                        </button>
                    }
                    if *step < STEP_LAST {
                        <button
                            type="button"
                            class="button-primary"
                            disabled={next_blocked}
                            onclick={on_next}
                        >
                            { "Next Step" }
                        </button>
                    } else {
                        <button
                            type="button"
                            class="button-primary"
                            disabled={*submitting}
                            onclick={on_submit}
                        >
                            { if *submitting { "Planting..." } else { "Plant Flower" } }
                        </button>
                    }
                </div>
            </div>
        </div>
    }
}
