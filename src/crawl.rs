//! Per-row crawl loops for the browser-backed stages. Strictly sequential:
//! each row is navigated, extracted, and recorded before the next begins,
//! with a jittered pause in between. Failures are caught at the row boundary
//! and recorded in the row's note field.

use std::time::Duration;

use chrono::Local;
use indicatif::{ProgressBar, ProgressStyle};
use thirtyfour::WebDriver;
use tracing::{info, warn};

use crate::menu_text::{join_menus, price_amount};
use crate::menu_tab::{self, MenuAccess};
use crate::table::{InputRecord, MenuRow, PlaceRow};
use crate::{browser, extract, navigator, query};

const CURRENCY_CODE: &str = "KRW";

const NOTE_NAV_FAILED: &str = "검색 결과/상세 페이지 진입 실패";
const NOTE_IMAGE_ONLY: &str = "메뉴판 이미지 전용(텍스트 없음)";
const NOTE_NO_TEXT: &str = "메뉴 섹션은 있으나 텍스트 파싱 실패";

pub struct RunStats {
    pub total: usize,
    pub ok: usize,
    pub errors: usize,
}

pub fn row_progress(total: usize) -> ProgressBar {
    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} ({per_sec}, eta {eta})")
            .unwrap()
            .progress_chars("=> "),
    );
    pb
}

/// Search crawl: one output row per input restaurant. With `id_only` the
/// detail facets are skipped and only the place id is resolved.
pub async fn crawl_places(
    driver: &WebDriver,
    records: &[InputRecord],
    id_only: bool,
    timeout: Duration,
) -> (Vec<PlaceRow>, RunStats) {
    let pb = row_progress(records.len());
    let mut rows = Vec::with_capacity(records.len());
    let mut ok = 0usize;
    let mut errors = 0usize;

    for record in records {
        let q = query::build_query(
            &record.restaurant_name,
            &record.sig_kor_nm,
            &record.emd_kor_nm,
        );
        info!("searching {:?}", q);

        let mut row = PlaceRow {
            restaurant_name: record.restaurant_name.clone(),
            sig_kor_nm: record.sig_kor_nm.clone(),
            emd_kor_nm: record.emd_kor_nm.clone(),
            place_id: None,
            rating: None,
            menus: None,
            facilities: None,
            reviews: None,
            note: None,
            crawled_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        };

        match navigator::open_search(driver, &q, timeout).await {
            navigator::NavOutcome::Failed => {
                warn!("detail view not reached for {:?}", q);
                row.note = Some(NOTE_NAV_FAILED.to_string());
                errors += 1;
            }
            outcome => {
                row.place_id = navigator::current_place_id(driver).await;
                if !id_only {
                    let details = extract::extract_all(driver).await;
                    row.rating = details.rating;
                    row.menus =
                        (!details.menus.is_empty()).then(|| join_menus(&details.menus));
                    row.facilities =
                        (!details.facilities.is_empty()).then(|| details.facilities.join(", "));
                    row.reviews =
                        (!details.reviews.is_empty()).then(|| details.reviews.join(" | "));
                }
                info!(
                    "done: {} ({:?}, place_id={:?})",
                    record.restaurant_name, outcome, row.place_id
                );
                ok += 1;
            }
        }

        rows.push(row);
        pb.inc(1);
        browser::human_sleep(800, 1800).await;
    }

    pb.finish_and_clear();
    let stats = RunStats {
        total: records.len(),
        ok,
        errors,
    };
    (rows, stats)
}

/// Menu crawl: one output row per parsed menu item, or a single note row per
/// place when nothing could be parsed.
pub async fn crawl_menus(
    driver: &WebDriver,
    place_ids: &[String],
    timeout: Duration,
) -> (Vec<MenuRow>, RunStats) {
    let pb = row_progress(place_ids.len());
    let mut rows = Vec::new();
    let mut ok = 0usize;
    let mut errors = 0usize;

    for place_id in place_ids {
        match menu_tab::open_menu_section(driver, place_id, timeout).await {
            Err(e) => {
                warn!("place {}: {:#}", place_id, e);
                rows.push(note_row(place_id, format!("ERROR: {:#}", e)));
                errors += 1;
            }
            Ok(MenuAccess::ImageOnly) => {
                info!("place {}: image menu only", place_id);
                rows.push(note_row(place_id, NOTE_IMAGE_ONLY.to_string()));
            }
            Ok(MenuAccess::NoText) => {
                rows.push(note_row(place_id, NOTE_NO_TEXT.to_string()));
            }
            Ok(MenuAccess::Text) => {
                let items = extract::menu::from_menu_page(driver).await;
                if items.is_empty() {
                    rows.push(note_row(place_id, NOTE_NO_TEXT.to_string()));
                } else {
                    info!("place {}: {} menu items", place_id, items.len());
                    for item in items {
                        let price_num = item.price.as_deref().and_then(price_amount);
                        rows.push(MenuRow {
                            place_id: place_id.clone(),
                            menu: Some(item.name),
                            price: item.price,
                            price_num,
                            currency: CURRENCY_CODE,
                            note: None,
                        });
                    }
                    ok += 1;
                }
            }
        }

        pb.inc(1);
        browser::human_sleep(800, 1800).await;
    }

    pb.finish_and_clear();
    let stats = RunStats {
        total: place_ids.len(),
        ok,
        errors,
    };
    (rows, stats)
}

fn note_row(place_id: &str, note: String) -> MenuRow {
    MenuRow {
        place_id: place_id.to_string(),
        menu: None,
        price: None,
        price_num: None,
        currency: CURRENCY_CODE,
        note: Some(note),
    }
}
