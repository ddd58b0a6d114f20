//! Menu facet extraction: the anchored place-section variant used inside the
//! search detail frame, and the looser variant for the standalone menu page.

use std::sync::LazyLock;

use regex::Regex;
use thirtyfour::prelude::*;

use crate::menu_text::{self, clean_text, dedup_menu, MenuItem, CURRENCY_MARKER};
use crate::page;

static PRICE_IN_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d[\d,]*\s*원").unwrap());

/// Anchored variant: locate the section headed by the menu marker word and
/// read each list item's name link and price element. Items contributing
/// neither are dropped.
pub async fn from_place_section(driver: &WebDriver) -> Vec<MenuItem> {
    let Ok(section) = driver.find(By::XPath(page::MENU_SECTION)).await else {
        return Vec::new();
    };
    let Ok(items) = section.find_all(By::Tag("li")).await else {
        return Vec::new();
    };

    let mut out = Vec::new();
    for item in items {
        let name = match item.find(By::XPath(page::MENU_ITEM_NAME)).await {
            Ok(elem) => elem
                .text()
                .await
                .ok()
                .map(|t| clean_text(&t))
                .filter(|t| !t.is_empty()),
            Err(_) => None,
        };
        let price = match item.find(By::XPath(page::MENU_ITEM_PRICE)).await {
            Ok(elem) => elem
                .text()
                .await
                .ok()
                .map(|t| clean_text(&t))
                .filter(|t| !t.is_empty()),
            Err(_) => None,
        };

        if name.is_none() && price.is_none() {
            continue;
        }
        out.push(MenuItem {
            name: name.unwrap_or_default(),
            price,
        });
    }
    dedup_menu(out)
}

/// Menu-page variant: parse list items line-wise, falling back to a block
/// scan for pages without a list structure.
pub async fn from_menu_page(driver: &WebDriver) -> Vec<MenuItem> {
    let items = driver
        .find_all(By::XPath(page::SECTION_CONTENT_ITEMS))
        .await
        .unwrap_or_default();

    if items.is_empty() {
        return from_price_blocks(driver).await;
    }

    let mut out = Vec::new();
    for li in items {
        let Ok(raw) = li.text().await else { continue };
        if let Some(item) = menu_text::split_lines(&raw) {
            out.push(item);
        }
    }
    dedup_menu(out)
}

/// Fallback: scan content blocks mentioning the currency marker and split
/// name from price within each short block.
async fn from_price_blocks(driver: &WebDriver) -> Vec<MenuItem> {
    const MAX_BLOCK_CHARS: usize = 80;

    let blocks = driver
        .find_all(By::XPath(page::SECTION_CONTENT_BLOCKS))
        .await
        .unwrap_or_default();

    let mut out = Vec::new();
    for block in blocks {
        let Ok(raw) = block.text().await else { continue };
        let text = clean_text(&raw);
        if !text.contains(CURRENCY_MARKER) || text.chars().count() > MAX_BLOCK_CHARS {
            continue;
        }

        match PRICE_IN_BLOCK_RE.find(&text) {
            Some(m) => {
                let price = m.as_str().to_string();
                let name = clean_text(&text.replace(m.as_str(), ""));
                if !name.is_empty() {
                    out.push(MenuItem {
                        name,
                        price: Some(price),
                    });
                }
            }
            None => out.push(MenuItem {
                name: text,
                price: None,
            }),
        }
    }
    dedup_menu(out)
}
