//! Menu/price text parsing shared by the live crawl stages and the offline
//! clean stage. All heuristics key off the Korean currency marker "원".

use std::sync::LazyLock;

use regex::Regex;

static WS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static DIGIT_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d[\d,]*)").unwrap());
static HAS_DIGIT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d").unwrap());

/// Price notations tried in order; the first match wins.
static PRICE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"[\d,]+원").unwrap(),
        Regex::new(r"₩[\d,]+").unwrap(),
        Regex::new(r"\d+원").unwrap(),
    ]
});

pub const CURRENCY_MARKER: char = '원';

/// A single menu entry as scraped: display name plus the raw price text
/// ("12,000원") when one was found.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MenuItem {
    pub name: String,
    pub price: Option<String>,
}

/// Collapse whitespace runs and trim.
pub fn clean_text(s: &str) -> String {
    WS_RE.replace_all(s, " ").trim().to_string()
}

/// Extract the first maximal digits-and-commas run as an integer amount.
/// "12,000원", "~12,000원", "12,000 ~" all yield 12000.
pub fn price_amount(price_text: &str) -> Option<i64> {
    let compact: String = price_text.split_whitespace().collect();
    let m = DIGIT_RUN_RE.find(&compact)?;
    m.as_str().replace(',', "").parse().ok()
}

/// Live variant: split a multi-line list-item text into name and price line.
/// The price line is the last line containing both a digit and the currency
/// marker; the name line is the first remaining line. Over-long name lines
/// are treated as descriptions and the item is skipped.
pub fn split_lines(raw: &str) -> Option<MenuItem> {
    const MAX_NAME_CHARS: usize = 60;

    let lines: Vec<String> = raw
        .split('\n')
        .map(clean_text)
        .filter(|l| !l.is_empty())
        .collect();
    let first = lines.first()?;

    let price_line = lines
        .iter()
        .rev()
        .find(|l| l.contains(CURRENCY_MARKER) && HAS_DIGIT_RE.is_match(l));

    match price_line {
        Some(price) => {
            let name = match lines.iter().find(|l| *l != price) {
                Some(n) => n.clone(),
                // A lone price line: treat it as a name without a price.
                None => {
                    if price.chars().count() > MAX_NAME_CHARS {
                        return None;
                    }
                    return Some(MenuItem {
                        name: price.clone(),
                        price: None,
                    });
                }
            };
            if name.chars().count() > MAX_NAME_CHARS {
                return None;
            }
            Some(MenuItem {
                name,
                price: Some(price.clone()),
            })
        }
        None => {
            if first.chars().count() > MAX_NAME_CHARS {
                return None;
            }
            Some(MenuItem {
                name: first.clone(),
                price: None,
            })
        }
    }
}

/// Offline variant: split a single combined field ("아메리카노 (4,500원)")
/// into a name remainder and the bare price digits. A matched price with no
/// digits is a false positive and yields no price.
pub fn split_menu_price(text: &str) -> (String, Option<String>) {
    let text = clean_text(text);

    for pattern in PRICE_PATTERNS.iter() {
        if let Some(m) = pattern.find(&text) {
            let digits: String = m.as_str().chars().filter(|c| c.is_ascii_digit()).collect();
            // The first match is the price; every occurrence is stripped
            // from the name, or a second price token would be split again
            // on the next run.
            let mut name = pattern.replace_all(&text, "").into_owned();
            // The price often sat inside parentheses; drop the empty shell.
            name = name.replace("()", "").replace("( )", "");
            let name = clean_text(&name);
            let price = if digits.is_empty() { None } else { Some(digits) };
            return (name, price);
        }
    }

    (text, None)
}

/// Drop repeated (name, price) pairs, keeping first occurrence order.
pub fn dedup_menu(items: Vec<MenuItem>) -> Vec<MenuItem> {
    let mut seen = std::collections::HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert((item.name.clone(), item.price.clone())))
        .collect()
}

/// Storage form for a place row: "이름 (가격)" entries joined with ", ".
pub fn join_menus(items: &[MenuItem]) -> String {
    items
        .iter()
        .map(|item| match &item.price {
            Some(p) => format!("{} ({})", item.name, p),
            None => item.name.clone(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_amount_basic() {
        assert_eq!(price_amount("12,000원"), Some(12000));
        assert_eq!(price_amount("12000 원"), Some(12000));
    }

    #[test]
    fn price_amount_takes_first_run() {
        assert_eq!(price_amount("~12,000원"), Some(12000));
        assert_eq!(price_amount("12,000 ~ 15,000원"), Some(12000));
    }

    #[test]
    fn price_amount_absent_without_digits() {
        assert_eq!(price_amount(""), None);
        assert_eq!(price_amount("시가"), None);
    }

    #[test]
    fn offline_split_trailing_price() {
        let (name, price) = split_menu_price("김치찌개 8,000원");
        assert_eq!(name, "김치찌개");
        assert_eq!(price.as_deref(), Some("8000"));
    }

    #[test]
    fn offline_split_parenthesised_price() {
        let (name, price) = split_menu_price("아메리카노 (4,500원)");
        assert_eq!(name, "아메리카노");
        assert_eq!(price.as_deref(), Some("4500"));
    }

    #[test]
    fn offline_split_won_sign() {
        let (name, price) = split_menu_price("불고기 ₩15,000");
        assert_eq!(name, "불고기");
        assert_eq!(price.as_deref(), Some("15000"));
    }

    #[test]
    fn offline_split_strips_every_price_token() {
        let (name, price) = split_menu_price("세트 2,000원 할인 5,000원");
        assert_eq!(name, "세트 할인");
        assert_eq!(price.as_deref(), Some("2000"));
    }

    #[test]
    fn offline_split_no_marker_means_no_price() {
        let (name, price) = split_menu_price("옛날 도시락");
        assert_eq!(name, "옛날 도시락");
        assert!(price.is_none());
    }

    #[test]
    fn line_split_price_on_last_line() {
        let item = split_lines("수제 돈까스\n등심 100% 수제\n12,000원").unwrap();
        assert_eq!(item.name, "수제 돈까스");
        assert_eq!(item.price.as_deref(), Some("12,000원"));
    }

    #[test]
    fn line_split_name_only() {
        let item = split_lines("계절 반찬").unwrap();
        assert_eq!(item.name, "계절 반찬");
        assert!(item.price.is_none());
    }

    #[test]
    fn line_split_decorative_marker_is_not_a_price() {
        // "원" without digits never counts as a price line.
        let item = split_lines("원조 할머니 국밥").unwrap();
        assert_eq!(item.name, "원조 할머니 국밥");
        assert!(item.price.is_none());
    }

    #[test]
    fn line_split_skips_over_long_descriptions() {
        let long = "아".repeat(61);
        assert!(split_lines(&format!("{}\n9,000원", long)).is_none());
    }

    #[test]
    fn line_split_lone_price_line_respects_name_cap() {
        let short = "점심 특선 9,000원";
        let item = split_lines(short).unwrap();
        assert_eq!(item.name, short);
        assert!(item.price.is_none());

        let long = format!("{} 9,000원", "아".repeat(58));
        assert!(split_lines(&long).is_none());
    }

    #[test]
    fn dedup_keeps_first_occurrence() {
        let items = vec![
            MenuItem { name: "비빔밥".into(), price: Some("9,000원".into()) },
            MenuItem { name: "비빔밥".into(), price: Some("9,000원".into()) },
            MenuItem { name: "비빔밥".into(), price: None },
        ];
        let out = dedup_menu(items);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].price.as_deref(), Some("9,000원"));
    }

    #[test]
    fn join_formats_price_in_parens() {
        let items = vec![
            MenuItem { name: "아메리카노".into(), price: Some("4,500원".into()) },
            MenuItem { name: "서비스 반찬".into(), price: None },
        ];
        assert_eq!(join_menus(&items), "아메리카노 (4,500원), 서비스 반찬");
    }
}
