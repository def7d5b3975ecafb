mod api;
mod config;
mod ui;

lazy_static::lazy_static! {
    static ref CLIENT: reqwest::Client = reqwest::Client::new();
}

fn main() {
    tracing_wasm::set_as_global_default();
    yew::Renderer::<ui::App>::new().render();
}
