use gloo::events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::KeyboardEvent;
use yew::prelude::*;

/// Corner button that opens a short description of the garden. Escape
/// closes it, like any other dismissable layer.
#[function_component(InfoPanel)]
pub(crate) fn info_panel() -> Html {
    let open = use_state(|| false);

    {
        let open = open.clone();
        use_effect_with(*open, move |is_open| {
            let listener = if *is_open {
                web_sys::window().map(|window| {
                    EventListener::new(&window, "keydown", move |event| {
                        let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                            return;
                        };
                        if event.key() == "Escape" {
                            open.set(false);
                        }
                    })
                })
            } else {
                None
            };
            move || drop(listener)
        });
    }

    let show = {
        let open = open.clone();
        Callback::from(move |_: MouseEvent| open.set(true))
    };
    let hide = {
        let open = open.clone();
        Callback::from(move |_: MouseEvent| open.set(false))
    };

    html! {
        <>
            <button type="button" class="info-button" onclick={show} aria-label="App Information">
                { "i" }
            </button>
            if *open {
                <div class="info-backdrop" onclick={hide.clone()} />
                <div class="info-panel">
                    <button type="button" class="modal-close" onclick={hide} aria-label="Close">
                        { "\u{00d7}" }
                    </button>
                    <h2>{ "DigiBloom" }</h2>
                    <p>
                        { "Welcome to DigiBloom, a digital sanctuary of peace and positivity. \
                           Plant a flower, leave a kind message, and share it with someone who \
                           needs it." }
                    </p>
                    <h3>{ "How to use" }</h3>
                    <ul>
                        <li>{ "Click anywhere on the garden to plant a flower" }</li>
                        <li>{ "Choose a flower type and write a positive message" }</li>
                        <li>{ "Click on any flower to read its message" }</li>
                        <li>{ "Share flowers with friends via their link" }</li>
                    </ul>
                </div>
            }
        </>
    }
}
