//! Menu-focused navigation for the standalone detail page: load by place id,
//! reach the menu section via the tab or by scrolling, and classify venues
//! that only publish their menu as an image.

use std::time::Duration;

use anyhow::{anyhow, Result};
use thirtyfour::prelude::*;

use crate::{browser, page};

const POLL: Duration = Duration::from_millis(250);
const SCROLL_ATTEMPTS: usize = 6;

/// Terminal classification of a place's menu surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAccess {
    /// A text menu section was reached and has parsable content.
    Text,
    /// Only the "view menu as image" affordance exists; structured
    /// extraction is impossible by design.
    ImageOnly,
    /// A section was reached (or none found) but nothing parsable exists.
    NoText,
}

/// Load the canonical detail page for `place_id` and try to reach its menu
/// section. Only a page-load failure is an error; everything else is a
/// classification.
pub async fn open_menu_section(
    driver: &WebDriver,
    place_id: &str,
    timeout: Duration,
) -> Result<MenuAccess> {
    driver.goto(page::place_home_url(place_id)).await?;
    driver
        .query(By::Id(page::APP_ROOT_ID))
        .wait(timeout, POLL)
        .first()
        .await
        .map_err(|e| anyhow!("home load failed for place {}: {}", place_id, e))?;

    browser::human_sleep(600, 1400).await;

    let mut opened = false;

    // Tab or in-page menu link first.
    if let Ok(candidates) = driver.find_all(By::XPath(page::MENU_TAB)).await {
        if let Some(tab) = candidates.first() {
            if tab.click().await.is_ok() {
                opened = true;
                browser::human_sleep(800, 1600).await;
            }
        }
    }

    // Backup route: scroll down until the section heading appears.
    if !opened {
        for _ in 0..SCROLL_ATTEMPTS {
            let _ = driver.execute("window.scrollBy(0, 800);", vec![]).await;
            browser::human_sleep(300, 600).await;
            if driver.find(By::XPath(page::MENU_HEADING)).await.is_ok() {
                opened = true;
                break;
            }
        }
    }

    let image_affordance = !driver
        .find_all(By::XPath(page::IMAGE_MENU_AFFORDANCE))
        .await
        .unwrap_or_default()
        .is_empty();
    if image_affordance && !opened {
        return Ok(MenuAccess::ImageOnly);
    }

    let has_items = !driver
        .find_all(By::XPath(page::SECTION_CONTENT_ITEMS))
        .await
        .unwrap_or_default()
        .is_empty();
    let has_texty = has_items
        || !driver
            .find_all(By::XPath(page::SECTION_CONTENT_PRICE_BLOCKS))
            .await
            .unwrap_or_default()
            .is_empty();

    if has_texty {
        Ok(MenuAccess::Text)
    } else if image_affordance {
        Ok(MenuAccess::ImageOnly)
    } else {
        Ok(MenuAccess::NoText)
    }
}
