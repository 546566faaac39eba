mod api;
mod app;
mod browser;
mod components;
mod config;
mod error;
mod logging;
mod pages;
mod session;

use leptos::prelude::*;
use tracing::{info, warn};

use app::App;
use config::{page_origin, Config, DEFAULT_LOG_FILTER};

fn main() {
    let loaded = Config::load();
    logging::init(
        loaded
            .as_ref()
            .map(|c| c.log_filter.as_str())
            .unwrap_or(DEFAULT_LOG_FILTER),
    );

    let config = loaded.unwrap_or_else(|e| {
        warn!("Using default config: {}", e);
        Config::default().with_origin(page_origin())
    });
    info!(
        "Question browser starting with {} companies",
        config.companies.len()
    );

    leptos::mount::mount_to_body(move || view! { <App config=config /> });
}
