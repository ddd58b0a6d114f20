use std::sync::LazyLock;

use regex::Regex;

static PAREN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\(.*?\)").unwrap());

/// Branch marker: a name ending conventionally in this character already
/// encodes a specific outlet ("스타벅스 강남점").
const BRANCH_MARKER: char = '점';
/// "반점" is a dish-house suffix, not a branch suffix.
const BRANCH_EXCEPTION: &str = "반점";

/// Reduce a free-text road address to a canonical query fragment: drop
/// parentheticals (building names, floors), cut at the first comma, collapse
/// whitespace runs.
pub fn clean_address(raw: Option<&str>) -> String {
    let raw = raw.unwrap_or_default();
    let no_paren = PAREN_RE.replace_all(raw, "");
    let before_comma = no_paren.split(',').next().unwrap_or_default();
    before_comma.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Compose the map search query. Branch-qualified names are already locally
/// unambiguous; everything else gets area-qualified.
pub fn build_query(name: &str, sig: &str, emd: &str) -> String {
    if name.contains(BRANCH_MARKER) && !name.contains(BRANCH_EXCEPTION) {
        name.to_string()
    } else {
        format!("{} {} {}", name, sig, emd)
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_strips_parentheticals() {
        let out = clean_address(Some("서울 강남구 테헤란로 123 (역삼동, 아크타워 3층)"));
        assert_eq!(out, "서울 강남구 테헤란로 123");
        assert!(!out.contains('(') && !out.contains(')'));
    }

    #[test]
    fn address_cuts_at_first_comma() {
        let full = clean_address(Some("서울 마포구 양화로 45, 2층, 201호"));
        let prefix = clean_address(Some("서울 마포구 양화로 45"));
        assert_eq!(full, prefix);
    }

    #[test]
    fn address_collapses_whitespace() {
        assert_eq!(clean_address(Some("  서울   종로구\t세종대로  1 ")), "서울 종로구 세종대로 1");
    }

    #[test]
    fn address_absent_is_empty_token() {
        assert_eq!(clean_address(None), "");
        assert_eq!(clean_address(Some("")), "");
    }

    #[test]
    fn branch_name_is_used_alone() {
        assert_eq!(build_query("OO점", "강남구", "역삼동"), "OO점");
        assert_eq!(build_query("스타벅스 강남점", "강남구", "역삼동"), "스타벅스 강남점");
    }

    #[test]
    fn dish_house_suffix_still_gets_area() {
        assert_eq!(
            build_query("중국반점", "강남구", "역삼동"),
            "중국반점 강남구 역삼동"
        );
    }

    #[test]
    fn plain_name_gets_area() {
        assert_eq!(build_query("한옥집", "종로구", "계동"), "한옥집 종로구 계동");
    }
}
