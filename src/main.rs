mod api;
mod components;
mod config;
mod model;
mod state;
mod util;

use components::app::App;

fn main() {
    let cfg = config::AppConfig::load();
    util::set_debug(cfg.debug);
    util::clog(&format!("api base: {}", cfg.api_base));
    yew::Renderer::<App>::with_props(components::app::AppProps { config: cfg.into() }).render();
}
