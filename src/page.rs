//! Every structural locator for the Naver map pages lives here. Markup drift
//! should only ever require edits to this module.

pub const SEARCH_URL_PREFIX: &str = "https://map.naver.com/v5/search/";

/// Left result-list iframe and right detail iframe of the search page.
pub const SEARCH_IFRAME_ID: &str = "searchIframe";
pub const ENTRY_IFRAME_ID: &str = "entryIframe";

pub const LIST_ITEMS: &str = r#"//*[@id="_pcmap_list_scroll_container"]/ul/li"#;

pub const RATING_CLASS: &str = "PXMot";

pub const MENU_SECTION: &str =
    "//div[contains(@class,'place_section') and .//div[text()='메뉴']]";
pub const MENU_ITEM_NAME: &str = ".//a[contains(@href, '/menu/')]";
pub const MENU_ITEM_PRICE: &str = ".//div[contains(text(),'원')]";

pub const FACILITY_SECTION: &str =
    "//div[contains(@class,'place_section') and .//div[contains(text(),'편의시설')]]";
pub const FACILITY_TAGS: &str = ".//span";

pub const REVIEW_SECTION: &str =
    "//div[contains(@class,'place_section') and .//div[contains(text(),'리뷰')]]";
pub const REVIEW_SNIPPETS: &str = "//span[contains(@class,'zPfVt')]";

// ── Standalone detail page (menus stage) ──

pub const APP_ROOT_ID: &str = "app-root";

pub const MENU_TAB: &str = "//a[(contains(., '메뉴') and (@role='tab' or \
     contains(@href, '/menu')))] | //button[contains(., '메뉴')]";
pub const MENU_HEADING: &str =
    "//h2[.//div[contains(normalize-space(.), '메뉴')] or contains(normalize-space(.), '메뉴')]";
pub const IMAGE_MENU_AFFORDANCE: &str =
    "//*[contains(., '메뉴판 이미지로 보기')][self::a or self::button or self::span]";

pub const SECTION_CONTENT_ITEMS: &str = "//div[contains(@class,'place_section_content')]//li";
pub const SECTION_CONTENT_BLOCKS: &str =
    "//div[contains(@class,'place_section_content')]//*[self::div or self::li]";
pub const SECTION_CONTENT_PRICE_BLOCKS: &str =
    "//div[contains(@class,'place_section_content')]//*[self::div or self::span or \
     self::p][contains(., '원')]";

pub fn search_url(query: &str) -> String {
    format!("{}{}", SEARCH_URL_PREFIX, query)
}

pub fn place_home_url(place_id: &str) -> String {
    format!("https://pcmap.place.naver.com/restaurant/{}/home", place_id)
}
