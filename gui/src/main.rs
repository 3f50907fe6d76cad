// Desktop entry point: loads configuration, opens storage and launches the Dioxus app.
#![allow(non_snake_case)]

use dioxus::prelude::*;
use dioxus_desktop::tao::dpi::LogicalSize;
use dioxus_desktop::{Config as DesktopConfig, WindowBuilder};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod app;
mod components;
mod config;
mod services;
mod state;

use app::App;
use config::AppConfig;
use services::EngineClient;
use shared::clock::SystemClock;

fn config_path() -> PathBuf {
    std::env::var_os("PARKING_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("parking.json"))
}

fn open_client(config: &AppConfig) -> EngineClient {
    let settings = config.engine.clone();
    match std::fs::create_dir_all(&settings.data_dir) {
        Ok(()) => EngineClient::new(settings),
        Err(e) => {
            tracing::warn!(
                data_dir = %settings.data_dir.display(),
                error = %e,
                "Data directory unavailable, records will not survive a restart"
            );
            EngineClient::in_memory(settings, Arc::new(SystemClock))
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let app_config = AppConfig::load_with_engine_file(&config_path())?;
    tracing::info!(
        version = %app_config.version,
        language = app_config.app.language.code(),
        data_dir = %app_config.engine.data_dir.display(),
        "Starting Hotel Parking"
    );

    let client = open_client(&app_config);
    let desktop_config = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title(app_config.app.title.clone())
            .with_inner_size(LogicalSize::new(app_config.app.window_width, app_config.app.window_height)),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_config)
        .with_context(client)
        .with_context(app_config)
        .launch(App);

    tracing::info!("Hotel Parking closed");
    Ok(())
}
