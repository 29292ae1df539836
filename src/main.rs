mod components;
mod config;
mod controller;
mod model;
mod net;
mod protocol;
mod util;

use components::app::App;

fn main() {
    yew::Renderer::<App>::new().render();
}
