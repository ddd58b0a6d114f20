use std::time::Duration;

use thirtyfour::prelude::*;

use crate::page;

/// Review snippets render lazily; the section has to be scrolled into view
/// and given a beat before its text exists in the DOM.
const RENDER_SETTLE: Duration = Duration::from_millis(1500);

const MIN_SNIPPET_CHARS: usize = 3;
const MAX_SNIPPETS: usize = 5;

pub async fn extract(driver: &WebDriver) -> Vec<String> {
    let Ok(section) = driver.find(By::XPath(page::REVIEW_SECTION)).await else {
        return Vec::new();
    };

    if let Ok(arg) = section.to_json() {
        let _ = driver
            .execute("arguments[0].scrollIntoView(true);", vec![arg])
            .await;
    }
    tokio::time::sleep(RENDER_SETTLE).await;

    let spans = driver
        .find_all(By::XPath(page::REVIEW_SNIPPETS))
        .await
        .unwrap_or_default();

    let mut out = Vec::new();
    for span in spans {
        if out.len() == MAX_SNIPPETS {
            break;
        }
        if let Ok(text) = span.text().await {
            let text = text.trim();
            if text.chars().count() > MIN_SNIPPET_CHARS {
                out.push(text.to_string());
            }
        }
    }
    out
}
