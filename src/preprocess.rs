//! Offline clean stage: re-derive (menu, price) from the crawled rows and
//! apply the output filter. Runs without a browser or network.

use rayon::prelude::*;

use crate::menu_text::split_menu_price;
use crate::table::{NormalizedMenuRow, RawMenuRow};

pub const MAX_MENU_CHARS: usize = 255;

pub struct CleanSummary {
    pub input: usize,
    pub kept: usize,
    pub dropped: usize,
}

/// Normalize one raw row. `None` means the output filter dropped it: no
/// menu text, no derivable price, or an over-long name.
pub fn normalize(row: &RawMenuRow) -> Option<NormalizedMenuRow> {
    let text = row.menu.as_deref()?.trim();
    if text.is_empty() {
        return None;
    }
    let (name, parsed_price) = split_menu_price(text);

    // An explicit price column from the crawl stage wins over re-parsing.
    let price = row
        .price
        .as_deref()
        .map(|p| p.chars().filter(|c| c.is_ascii_digit()).collect::<String>())
        .filter(|p| !p.is_empty())
        .or(parsed_price)?;

    if name.is_empty() || name.chars().count() > MAX_MENU_CHARS {
        return None;
    }

    Some(NormalizedMenuRow {
        place_id: row.place_id.clone(),
        menu: name,
        price,
    })
}

/// Normalize and filter all rows; drops are only counted, never reported
/// individually.
pub fn run(rows: &[RawMenuRow]) -> (Vec<NormalizedMenuRow>, CleanSummary) {
    let kept: Vec<NormalizedMenuRow> = rows.par_iter().filter_map(normalize).collect();
    let summary = CleanSummary {
        input: rows.len(),
        kept: kept.len(),
        dropped: rows.len() - kept.len(),
    };
    (kept, summary)
}

// ── Tests ──
