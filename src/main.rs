mod api;
mod app;
mod info;
mod input;
mod planting;
mod router;
mod scroll;
mod viewing;

use app::App;

fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
    yew::Renderer::<App>::new().render();
}
