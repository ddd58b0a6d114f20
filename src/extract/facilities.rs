use thirtyfour::prelude::*;

use crate::page;

pub async fn extract(driver: &WebDriver) -> Vec<String> {
    let Ok(section) = driver.find(By::XPath(page::FACILITY_SECTION)).await else {
        return Vec::new();
    };
    let Ok(tags) = section.find_all(By::XPath(page::FACILITY_TAGS)).await else {
        return Vec::new();
    };

    let mut out = Vec::new();
    for tag in tags {
        if let Ok(text) = tag.text().await {
            let text = text.trim();
            if !text.is_empty() {
                out.push(text.to_string());
            }
        }
    }
    out
}
