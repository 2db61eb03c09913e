use leptos::*;
use wasm_bindgen::prelude::*;

use crate::app::App;
use crate::config::DashboardConfig;
use crate::domain::logging::{LogComponent, get_logger};

pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod global_state;
pub mod infrastructure;
pub mod macros;
pub mod time_utils;

/// Element the dashboard mounts into. Pages without it only get logging.
pub const MOUNT_POINT_ID: &str = "coin-watch";

#[wasm_bindgen(start)]
pub fn initialize() {
    console_error_panic_hook::set_once();

    let console_logger = Box::new(infrastructure::services::ConsoleLogger::new_development());
    domain::logging::init_logger(console_logger);

    let browser_time_provider = Box::new(infrastructure::services::BrowserTimeProvider::new());
    domain::logging::init_time_provider(browser_time_provider);

    let config = DashboardConfig::from_document().unwrap_or_else(|err| {
        log_warn!(LogComponent::Presentation("Initialize"), "Ignoring dashboard config: {}", err);
        DashboardConfig::default()
    });

    let Some(mount_point) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(MOUNT_POINT_ID))
        .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
    else {
        get_logger().debug(LogComponent::Presentation("Initialize"), "No mount point, dashboard not started");
        return;
    };

    log_info!(LogComponent::Presentation("Initialize"), "Starting dashboard, polling every {} ms", config.poll_period_ms);

    mount_to(mount_point, move || view! { <App config=config.clone() /> });
}
