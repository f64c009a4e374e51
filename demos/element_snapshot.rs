//! Capture one element of a self-contained page
//!
//! Requires a local Chrome/Chromium (set CHROMIUM_PATH if it is not on PATH).
//! Writes ./screenshots/login-button.png.

use anyhow::{Context, Result};
use chromiumoxide::browser::{Browser, BrowserConfig};
use futures::StreamExt;
use tracing::{error, info};

use kodegen_test_helpers::{
    ChromePage, ElementSnapshotter, SnapshotConfig, current_date, generate_random_string,
    init_logging, load_yaml_config,
};

const PAGE: &str = "data:text/html,<html><body style='height:3000px'>\
    <div style='margin-top:2500px'>\
    <button id='login' style='padding:12px'>Log in</button>\
    </div></body></html>";

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let mut config = load_yaml_config().context("Failed to load snapshot.yaml")?;
    // The demo owns its output directory
    config.create_output_dir = true;

    let mut builder = BrowserConfig::builder();
    if let Ok(path) = std::env::var("CHROMIUM_PATH") {
        builder = builder.chrome_executable(path);
    }
    let browser_config = builder
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build browser config: {e}"))?;

    let (mut browser, mut handler) = Browser::launch(browser_config)
        .await
        .context("Failed to launch browser")?;
    let handler_task = tokio::spawn(async move {
        while let Some(event) = handler.next().await {
            if let Err(e) = event {
                error!("Browser handler error: {:?}", e);
            }
        }
    });

    let result = run(&browser, config).await;

    if let Err(e) = browser.close().await {
        tracing::warn!("Failed to close browser cleanly: {}", e);
    }
    let _ = browser.wait().await;
    handler_task.abort();

    result
}

async fn run(browser: &Browser, config: SnapshotConfig) -> Result<()> {
    let page = browser
        .new_page(PAGE)
        .await
        .context("Failed to open demo page")?;
    let page = ChromePage::with_config(page, &config)?;
    let snapshotter = ElementSnapshotter::new(config);

    snapshotter.capture(&page, "#login", "login-button").await?;
    info!("Saved {}", snapshotter.artifact_path("login-button").display());

    let run_name = format!("login-{}-{}", current_date(), generate_random_string(6));
    snapshotter.capture(&page, "#login", &run_name).await?;
    info!("Saved {}", snapshotter.artifact_path(&run_name).display());

    Ok(())
}
