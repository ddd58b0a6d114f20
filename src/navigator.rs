//! Search-page navigation over the two-frame map UI.
//!
//! A search lands in one of two shapes: a result list in the left iframe
//! (activate the first hit, then read the right detail iframe), or a direct
//! detail view when the query was unambiguous. Failing both is a recorded
//! absence for the row, not an error.

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use thirtyfour::prelude::*;
use tracing::debug;

use crate::page;

static PLACE_ID_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"place/(\d+)").unwrap());

const POLL: Duration = Duration::from_millis(250);

/// Where the navigation ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    /// Result list found; first item activated, detail frame entered.
    ViaList,
    /// No usable list; the UI had already routed to the detail view.
    DirectDetail,
    /// Neither frame reachable.
    Failed,
}

/// Navigate to the search view for `query` and try to land inside the
/// detail frame.
pub async fn open_search(driver: &WebDriver, query: &str, timeout: Duration) -> NavOutcome {
    if driver.goto(page::search_url(query)).await.is_err() {
        return NavOutcome::Failed;
    }

    match try_via_list(driver, timeout).await {
        Ok(true) => NavOutcome::ViaList,
        Ok(false) | Err(_) => {
            debug!("no result list for {:?}, assuming direct detail view", query);
            match enter_frame_by_id(driver, page::ENTRY_IFRAME_ID, timeout).await {
                Ok(()) => NavOutcome::DirectDetail,
                Err(_) => NavOutcome::Failed,
            }
        }
    }
}

async fn try_via_list(driver: &WebDriver, timeout: Duration) -> WebDriverResult<bool> {
    enter_frame_by_id(driver, page::SEARCH_IFRAME_ID, timeout).await?;

    let items = driver.find_all(By::XPath(page::LIST_ITEMS)).await?;
    let Some(first) = items.first() else {
        return Ok(false);
    };

    // Activating the first hit routes the outer page to the detail view.
    first.find(By::Tag("a")).await?.click().await?;
    enter_frame_by_id(driver, page::ENTRY_IFRAME_ID, timeout).await?;
    Ok(true)
}

/// Frame entry always goes through the default content first; nested frames
/// cannot be switched between directly.
async fn enter_frame_by_id(
    driver: &WebDriver,
    id: &'static str,
    timeout: Duration,
) -> WebDriverResult<()> {
    driver.enter_default_frame().await?;
    let frame = driver.query(By::Id(id)).wait(timeout, POLL).first().await?;
    frame.enter_frame().await?;
    Ok(())
}

/// Parse the numeric place id out of the current address bar, if present.
pub async fn current_place_id(driver: &WebDriver) -> Option<String> {
    let url = driver.current_url().await.ok()?;
    place_id_from_url(url.as_str())
}

pub fn place_id_from_url(url: &str) -> Option<String> {
    PLACE_ID_RE.captures(url).map(|c| c[1].to_string())
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn place_id_parses_from_detail_url() {
        let url = "https://map.naver.com/p/search/%EC%8A%A4%ED%83%80/place/11727802?c=15.00";
        assert_eq!(place_id_from_url(url).as_deref(), Some("11727802"));
    }

    #[test]
    fn place_id_absent_without_segment() {
        assert!(place_id_from_url("https://map.naver.com/v5/search/한옥집").is_none());
    }

    #[test]
    fn place_id_takes_first_match() {
        let url = "https://x.test/place/123/place/456";
        assert_eq!(place_id_from_url(url).as_deref(), Some("123"));
    }
}
