use crate::app::App;

mod app;
mod components;
mod config;
mod console_logger;
mod submission;

fn main() {
    console_logger::init(log::LevelFilter::Info);
    yew::Renderer::<App>::new().render();
}
