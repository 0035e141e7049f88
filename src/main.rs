use std::process;
use std::sync::Arc;

use anyhow::Context;
use evlog::{meta, LogEventConsolePrinter, Logger};
use itertools::Itertools;

use crate::config::Config;
use crate::handler::AppState;
use crate::runtime::{get_logger, set_logger};

mod config;
mod google;
mod handler;
mod routes;
mod runtime;
mod support;
mod theme;

async fn run() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    theme::THEME.validate().context("invalid theme tokens")?;
    get_logger().debug("Theme tokens validated.", meta![
        "Colors" => theme::THEME.theme.extend.colors.len(),
        "FontSizes" => theme::THEME.theme.extend.font_size.len(),
        "Spacing" => theme::THEME.theme.extend.spacing.len(),
        "Plugins" => theme::THEME.plugins.iter().join(", "),
        "BodyFontPx" => theme::THEME.font_size_px("md").unwrap_or(theme::ROOT_FONT_PX),
    ]);

    let state = AppState::new(config)?;
    get_logger().info("Loaded configuration.", meta![
        "ListenAddr" => state.config.listen_addr,
        "TokenPath" => state.config.token_path.display(),
    ]);

    routes::serve(Arc::new(state)).await
}

#[tokio::main]
async fn main() {
    let mut logger = Logger::default();
    logger.register(LogEventConsolePrinter::default());
    set_logger(logger);

    if let Err(e) = dotenv::dotenv() {
        get_logger().debug("No .env file loaded.", meta![
            "Error" => e,
        ]);
    }

    if let Err(e) = run().await {
        get_logger().error("Server error.", meta![
            "Error" => format!("{:#}", e),
        ]);
        process::exit(1);
    }
}
