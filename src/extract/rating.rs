use thirtyfour::prelude::*;

use crate::page;

pub async fn extract(driver: &WebDriver) -> Option<String> {
    let elem = driver.find(By::ClassName(page::RATING_CLASS)).await.ok()?;
    let text = elem.text().await.ok()?;
    let text = text.trim().to_string();
    (!text.is_empty()).then_some(text)
}
