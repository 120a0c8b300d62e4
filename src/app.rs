use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use gloo::timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{MouseEvent, TouchEvent};
use yew::prelude::*;

use digibloom_core::geometry::{clamp_flower_x, LEFT_PADDING};
use digibloom_core::{Flower, GardenMode, GardenState, NEW_FLOWER_GLOW_MS};

use crate::api::{self, ApiFailure};
use crate::info::InfoPanel;
use crate::input;
use crate::planting::PlantingDrawer;
use crate::router::{self, Route};
use crate::scroll::AutopanLoop;
use crate::viewing::FlowerModal;

const LOAD_FAILED_MESSAGE: &str = "Failed to load garden. Please refresh.";
const SHARED_NOT_FOUND_MESSAGE: &str = "Shared flower not found";

const TOOLTIP_TITLE_MAX: usize = 40;

/// Resolve the flower named by the current location and enter viewing mode.
/// Unknown slugs are fetched and merged first; a late completion still
/// merges the record but only transitions if the location and mode still
/// agree, so a stale response cannot yank the UI around.
fn open_route_flower(
    garden: Rc<RefCell<GardenState>>,
    error: UseStateHandle<Option<String>>,
    redraw: Callback<()>,
    slug: String,
) {
    let known = garden.borrow().flower_by_slug(&slug).cloned();
    if let Some(flower) = known {
        garden.borrow_mut().begin_viewing(flower);
        redraw.emit(());
        return;
    }
    spawn_local(async move {
        match api::fetch_flower(&slug).await {
            Ok(flower) => {
                let mut state = garden.borrow_mut();
                state.merge_flower(flower.clone());
                let still_wanted = router::current_route() == Route::Flower(slug.clone());
                if still_wanted && state.mode().is_browsing() {
                    state.begin_viewing(flower);
                }
                drop(state);
                redraw.emit(());
            }
            Err(ApiFailure::NotFound) => {
                log::warn!("shared flower '{slug}' does not exist");
                error.set(Some(SHARED_NOT_FOUND_MESSAGE.to_string()));
            }
            Err(err) => {
                log::error!("shared flower lookup failed: {err}");
                error.set(Some(SHARED_NOT_FOUND_MESSAGE.to_string()));
            }
        }
    });
}

#[function_component(App)]
pub(crate) fn app() -> Html {
    let garden = use_mut_ref(GardenState::new);
    let autopan = use_mut_ref(AutopanLoop::new);
    let glow_timer = use_mut_ref(|| None::<Timeout>);
    let revision = use_state(|| 0u64);
    let loading = use_state(|| true);
    let error = use_state(|| None::<String>);
    let container_ref = use_node_ref();

    let redraw = {
        let revision = revision.clone();
        Callback::from(move |_: ()| revision.set(revision.wrapping_add(1)))
    };

    // Initial load, then reconcile a shared /flower/{slug} location.
    {
        let garden = garden.clone();
        let loading = loading.clone();
        let error = error.clone();
        let redraw = redraw.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match api::fetch_flowers().await {
                    Ok(flowers) => {
                        log::debug!("loaded {} flowers", flowers.len());
                        garden.borrow_mut().set_flowers(flowers);
                        error.set(None);
                        if let Route::Flower(slug) = router::current_route() {
                            open_route_flower(
                                garden.clone(),
                                error.clone(),
                                redraw.clone(),
                                slug,
                            );
                        }
                    }
                    Err(err) => {
                        log::error!("initial flower load failed: {err}");
                        error.set(Some(LOAD_FAILED_MESSAGE.to_string()));
                    }
                }
                loading.set(false);
                redraw.emit(());
            });
            || ()
        });
    }

    // Browser back/forward can force browsing <-> viewing directly.
    {
        let garden = garden.clone();
        let autopan = autopan.clone();
        let error = error.clone();
        let redraw = redraw.clone();
        use_effect_with((), move |_| {
            let listener = web_sys::window().map(|window| {
                EventListener::new(&window, "popstate", move |_event| {
                    match router::current_route() {
                        Route::Home => {
                            garden.borrow_mut().close_viewing();
                            redraw.emit(());
                        }
                        Route::Flower(slug) => {
                            open_route_flower(
                                garden.clone(),
                                error.clone(),
                                redraw.clone(),
                                slug,
                            );
                        }
                    }
                    autopan.borrow().sync(&garden, &redraw);
                })
            });
            move || drop(listener)
        });
    }

    // Touch listeners go on the container natively so that panning can
    // suppress the default scroll.
    {
        let garden = garden.clone();
        let autopan = autopan.clone();
        let redraw = redraw.clone();
        use_effect_with(container_ref.clone(), move |container_ref| {
            let mut listeners = Vec::new();
            if let Some(element) = container_ref.cast::<web_sys::Element>() {
                listeners.push(EventListener::new(&element, "touchstart", {
                    let garden = garden.clone();
                    move |event| {
                        let Some(event) = event.dyn_ref::<TouchEvent>() else {
                            return;
                        };
                        if let Some((x, y)) = input::touch_position(event) {
                            garden.borrow_mut().touch_start(x, y);
                        }
                    }
                }));
                listeners.push(EventListener::new_with_options(
                    &element,
                    "touchmove",
                    EventListenerOptions::enable_prevent_default(),
                    {
                        let garden = garden.clone();
                        let redraw = redraw.clone();
                        move |event| {
                            let Some(event) = event.dyn_ref::<TouchEvent>() else {
                                return;
                            };
                            if let Some((x, _)) = input::touch_position(event) {
                                let panned = garden.borrow_mut().touch_move(x);
                                if panned {
                                    event.prevent_default();
                                    redraw.emit(());
                                }
                            }
                        }
                    },
                ));
                listeners.push(EventListener::new(&element, "touchend", {
                    let garden = garden.clone();
                    let autopan = autopan.clone();
                    let redraw = redraw.clone();
                    move |event| {
                        let Some(event) = event.dyn_ref::<TouchEvent>() else {
                            return;
                        };
                        let Some((x, y)) = input::changed_touch_position(event) else {
                            garden.borrow_mut().touch_cancel();
                            return;
                        };
                        let tap = garden.borrow_mut().touch_end(x, y);
                        let Some((tap_x, tap_y)) = tap else {
                            redraw.emit(());
                            return;
                        };
                        // Taps on flowers are handled by the flower itself.
                        if input::flower_element_at(tap_x, tap_y) {
                            return;
                        }
                        let (_, viewport_h) = input::viewport_size();
                        let attempt =
                            garden
                                .borrow_mut()
                                .try_begin_planting(tap_x, tap_y, viewport_h);
                        log::debug!("tap plant attempt: {attempt:?}");
                        autopan.borrow().sync(&garden, &redraw);
                        redraw.emit(());
                    }
                }));
                listeners.push(EventListener::new(&element, "touchcancel", {
                    let garden = garden.clone();
                    move |_event| {
                        garden.borrow_mut().touch_cancel();
                    }
                }));
            }
            move || drop(listeners)
        });
    }

    let on_mouse_move = {
        let garden = garden.clone();
        let autopan = autopan.clone();
        let redraw = redraw.clone();
        Callback::from(move |event: MouseEvent| {
            let (viewport_w, _) = input::viewport_size();
            garden
                .borrow_mut()
                .pointer_moved(event.client_x() as f64, viewport_w);
            autopan.borrow().sync(&garden, &redraw);
        })
    };

    let on_mouse_leave = {
        let garden = garden.clone();
        let autopan = autopan.clone();
        let redraw = redraw.clone();
        Callback::from(move |_event: MouseEvent| {
            garden.borrow_mut().pointer_left();
            autopan.borrow().sync(&garden, &redraw);
        })
    };

    let on_ground_click = {
        let garden = garden.clone();
        let autopan = autopan.clone();
        let redraw = redraw.clone();
        Callback::from(move |event: MouseEvent| {
            let mut left_viewing = false;
            {
                let mut state = garden.borrow_mut();
                match state.mode() {
                    GardenMode::Viewing(_) => {
                        state.close_viewing();
                        left_viewing = true;
                    }
                    GardenMode::Planting { .. } => {}
                    GardenMode::Browsing => {
                        let (_, viewport_h) = input::viewport_size();
                        let attempt = state.try_begin_planting(
                            event.client_x() as f64,
                            event.client_y() as f64,
                            viewport_h,
                        );
                        log::debug!("click plant attempt: {attempt:?}");
                    }
                }
            }
            if left_viewing {
                router::push_route(&Route::Home);
            }
            autopan.borrow().sync(&garden, &redraw);
            redraw.emit(());
        })
    };

    let on_close_viewing = {
        let garden = garden.clone();
        let redraw = redraw.clone();
        Callback::from(move |_: ()| {
            garden.borrow_mut().close_viewing();
            router::push_route(&Route::Home);
            redraw.emit(());
        })
    };

    let on_close_planting = {
        let garden = garden.clone();
        let redraw = redraw.clone();
        Callback::from(move |_: ()| {
            garden.borrow_mut().cancel_planting();
            redraw.emit(());
        })
    };

    let on_plant_success = {
        let garden = garden.clone();
        let glow_timer = glow_timer.clone();
        let redraw = redraw.clone();
        Callback::from(move |flower: Flower| {
            log::info!("planted '{}'", flower.slug);
            garden.borrow_mut().finish_planting(flower);
            let garden = garden.clone();
            let redraw_later = redraw.clone();
            *glow_timer.borrow_mut() = Some(Timeout::new(NEW_FLOWER_GLOW_MS, move || {
                garden.borrow_mut().clear_newly_planted();
                redraw_later.emit(());
            }));
            redraw.emit(());
        })
    };

    if *loading {
        return html! {
            <div class="loading-screen">
                <img class="loading-flower" src="flowers/white-rose.png" alt="Loading" />
            </div>
        };
    }

    let (viewport_w, _) = input::viewport_size();
    let state = garden.borrow();
    let mode = state.mode().clone();
    let offset = state.offset();
    let visible: Vec<Flower> = state
        .visible_flowers(viewport_w)
        .into_iter()
        .cloned()
        .collect();
    let newly_planted = state.newly_planted().map(str::to_string);
    drop(state);

    let selected = match &mode {
        GardenMode::Viewing(flower) => Some(flower.clone()),
        _ => None,
    };
    let planting_position = match &mode {
        GardenMode::Planting { x, y } => Some((*x, *y)),
        _ => None,
    };
    let zoomed = !mode.is_browsing();

    let container_style = format!(
        "padding-left: {LEFT_PADDING}px; transform: translateX(-{offset}px);"
    );

    let flowers: Html = visible
        .iter()
        .map(|flower| {
            let is_selected = selected
                .as_ref()
                .map(|viewed| viewed.id == flower.id)
                .unwrap_or(false);
            let other_selected = selected.is_some() && !is_selected;
            let is_new = newly_planted.as_deref() == Some(flower.id.as_str());
            let meta = flower.kind.meta();

            let mut wrapper_class = classes!("flower", input::FLOWER_CLICKABLE_CLASS);
            if is_selected {
                // The viewed flower renders as a fixed overlay instead.
                wrapper_class.push("flower-hidden");
            } else if other_selected {
                wrapper_class.push("flower-dimmed");
            }
            let mut image_class = classes!("flower-image");
            if is_new {
                image_class.push("flower-new");
            } else if !zoomed {
                image_class.push("flower-sway");
            }

            let left = clamp_flower_x(flower.x as f64);
            let sway_delay = if zoomed {
                0.0
            } else {
                (flower.x.rem_euclid(20)) as f64 * 0.1
            };
            let wrapper_style = format!("left: {left}px; top: {}px;", flower.y);
            let image_style = format!(
                "width: {width}px; animation-delay: {sway_delay}s;",
                width = meta.render_width
            );

            let onclick = {
                let garden = garden.clone();
                let autopan = autopan.clone();
                let redraw = redraw.clone();
                let flower = flower.clone();
                Callback::from(move |event: MouseEvent| {
                    event.stop_propagation();
                    event.prevent_default();
                    if garden.borrow_mut().begin_viewing(flower.clone()) {
                        router::push_route(&Route::Flower(flower.slug.clone()));
                    }
                    autopan.borrow().sync(&garden, &redraw);
                    redraw.emit(());
                })
            };
            let ontouchend = {
                let garden = garden.clone();
                let autopan = autopan.clone();
                let redraw = redraw.clone();
                let flower = flower.clone();
                Callback::from(move |event: TouchEvent| {
                    event.stop_propagation();
                    event.prevent_default();
                    if garden.borrow_mut().begin_viewing(flower.clone()) {
                        router::push_route(&Route::Flower(flower.slug.clone()));
                    }
                    autopan.borrow().sync(&garden, &redraw);
                    redraw.emit(());
                })
            };

            let tooltip = if mode.is_browsing() {
                let title: String = if flower.title.chars().count() > TOOLTIP_TITLE_MAX {
                    let short: String = flower.title.chars().take(TOOLTIP_TITLE_MAX).collect();
                    format!("{short}...")
                } else {
                    flower.title.clone()
                };
                html! {
                    <div class={classes!("flower-tooltip", format!("tooltip-{}", flower.kind.tag()))}>
                        <p class="tooltip-title">{ title }</p>
                        if let Some(author) = &flower.author {
                            <p class="tooltip-author">{ format!("by {author}") }</p>
                        }
                    </div>
                }
            } else {
                html! {}
            };

            html! {
                <div
                    key={flower.id.clone()}
                    class={wrapper_class}
                    style={wrapper_style}
                    role="button"
                    tabindex="0"
                    aria-label={format!("View {}", flower.title)}
                    {onclick}
                    {ontouchend}
                >
                    <img
                        class={image_class}
                        style={image_style}
                        src={meta.image}
                        alt={flower.title.clone()}
                    />
                    { tooltip }
                </div>
            }
        })
        .collect();

    html! {
        <div class="garden-viewport">
            <div
                ref={container_ref}
                class="garden-scroller"
                style={container_style}
                onmousemove={on_mouse_move}
                onmouseleave={on_mouse_leave}
                onclick={on_ground_click}
            >
                <div class="garden-background" />
                if let Some((x, y)) = planting_position {
                    <div
                        class="dirt-plot"
                        style={format!("left: {}px; top: {y}px;", x + LEFT_PADDING)}
                    />
                }
                { flowers }
            </div>

            if let Some(flower) = &selected {
                <div class="viewed-flower-overlay">
                    <img
                        class="flower-image flower-viewing"
                        style={format!("width: {}px;", flower.kind.meta().render_width)}
                        src={flower.kind.meta().image}
                        alt={flower.title.clone()}
                    />
                </div>
            }

            if let Some(message) = (*error).clone() {
                <div class="error-banner">{ message }</div>
            }

            <PlantingDrawer
                open={planting_position.is_some()}
                position={planting_position}
                on_close={on_close_planting}
                on_success={on_plant_success}
            />
            <FlowerModal flower={selected} on_close={on_close_viewing} />
            <InfoPanel />
        </div>
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use wasm_bindgen_test::*;

    use crate::router::{self, Route};

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn pushed_routes_read_back() {
        let route = Route::Flower("red-tulip-ab12cd34".to_string());
        router::push_route(&route);
        assert_eq!(router::current_route(), route);
        router::push_route(&Route::Home);
        assert_eq!(router::current_route(), Route::Home);
    }

    #[wasm_bindgen_test]
    fn viewport_size_is_positive() {
        let (width, height) = crate::input::viewport_size();
        assert!(width > 0.0);
        assert!(height > 0.0);
    }
}
