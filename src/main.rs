//! SnapAsk desktop entry point

use dioxus::desktop::tao::dpi::LogicalSize;
use dioxus::desktop::{Config, WindowBuilder};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("snapask=info")),
        )
        .init();

    tracing::info!("Starting SnapAsk");

    let window = WindowBuilder::new()
        .with_title("SnapAsk")
        .with_inner_size(LogicalSize::new(560.0, 560.0))
        .with_min_inner_size(LogicalSize::new(420.0, 400.0))
        .with_transparent(true);

    let config = Config::new()
        .with_window(window)
        .with_menu(None)
        .with_custom_head(format!(
            "<style>{}</style>",
            include_str!("../assets/main.css")
        ));

    dioxus::LaunchBuilder::desktop()
        .with_cfg(config)
        .launch(snapask::app::App);
}
