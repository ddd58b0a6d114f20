//! WebDriver session provisioning and pacing. One session is shared by an
//! entire run and must be released with [`WebDriver::quit`] when done.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use rand::Rng;
use thirtyfour::prelude::*;
use thirtyfour::ChromiumLikeCapabilities;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Shared flags for the browser-backed stages.
#[derive(Debug, Clone, Args)]
pub struct BrowserArgs {
    /// WebDriver endpoint (chromedriver or a Selenium hub)
    #[arg(long, default_value = "http://localhost:9515")]
    pub webdriver_url: String,
    /// Run with a visible browser window
    #[arg(long)]
    pub headed: bool,
    /// Bounded wait for page-readiness checks, in seconds
    #[arg(long, default_value = "15")]
    pub page_timeout_secs: u64,
}

impl BrowserArgs {
    pub fn page_timeout(&self) -> Duration {
        Duration::from_secs(self.page_timeout_secs)
    }
}

pub async fn connect(args: &BrowserArgs) -> Result<WebDriver> {
    let mut caps = DesiredCapabilities::chrome();
    if !args.headed {
        caps.add_arg("--headless=new")?;
    }
    caps.add_arg("--no-sandbox")?;
    caps.add_arg("--disable-dev-shm-usage")?;
    caps.add_arg("--window-size=1920,1080")?;
    caps.add_arg("--lang=ko-KR")?;
    caps.add_arg(&format!("user-agent={}", USER_AGENT))?;

    let driver = WebDriver::new(&args.webdriver_url, caps)
        .await
        .with_context(|| format!("failed to connect to WebDriver at {}", args.webdriver_url))?;
    Ok(driver)
}

/// Jittered pause between browser-driven rows, to look less like automation.
pub async fn human_sleep(lo_ms: u64, hi_ms: u64) {
    let ms = rand::thread_rng().gen_range(lo_ms..=hi_ms);
    tokio::time::sleep(Duration::from_millis(ms)).await;
}
