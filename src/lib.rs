use leptos::*;
use wasm_bindgen::prelude::*;

use crate::app::App;
use crate::domain::logging::{LogComponent, LogLevel, get_logger, init_logger, init_time_provider};
use crate::infrastructure::config::{CONFIG_GLOBAL, init_config, load_config_or_default};

pub mod app;
pub mod application;
pub mod domain;
pub mod infrastructure;

/// Initialize logging and configuration, then mount the price feed page
#[wasm_bindgen(start)]
pub fn initialize() {
    console_error_panic_hook::set_once();

    // The logger level comes from config, so parse first and report afterwards.
    let (page_config, config_error) = load_config_or_default();

    let console_logger = Box::new(infrastructure::ConsoleLogger::new(page_config.log_level));
    init_logger(console_logger);
    init_time_provider(Box::new(infrastructure::BrowserTimeProvider::new()));

    if let Some(e) = config_error {
        get_logger().log_with_metadata(
            LogLevel::Warn,
            LogComponent::Infrastructure("Config"),
            &format!("Ignoring {CONFIG_GLOBAL}, using defaults"),
            &e.to_string(),
        );
    }

    log_info!(
        LogComponent::Presentation("Initialize"),
        "🚀 Oracle price feed initialized with {} pairs",
        page_config.pairs.len()
    );
    init_config(page_config);

    mount_to_body(|| view! { <App /> });
}
