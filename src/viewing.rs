use yew::prelude::*;

use digibloom_core::Flower;

use crate::router::Route;

#[derive(Properties, PartialEq)]
pub(crate) struct FlowerModalProps {
    pub flower: Option<Flower>,
    pub on_close: Callback<()>,
}

/// Detail card for the flower being viewed. The flower image itself renders
/// as an overlay in the page; this shows the message and the share path.
#[function_component(FlowerModal)]
pub(crate) fn flower_modal(props: &FlowerModalProps) -> Html {
    let Some(flower) = &props.flower else {
        return html! {};
    };
    let meta = flower.kind.meta();
    let share_path = Route::Flower(flower.slug.clone()).path();

    let on_close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    html! {
        <div class="flower-modal">
            <button type="button" class="modal-close" onclick={on_close} aria-label="Close">
                { "\u{00d7}" }
            </button>
            <p class="modal-kind">{ meta.name }</p>
            <h2 class="modal-title">{ flower.title.clone() }</h2>
            <p class="modal-message">{ flower.message.clone() }</p>
            if let Some(author) = &flower.author {
                <p class="modal-author">{ format!("by {author}") }</p>
            }
            <p class="modal-meaning">{ meta.meaning }</p>
            <p class="modal-share">
                { "Share this flower: " }
                <code>{ share_path }</code>
            </p>
        </div>
    }
}
