//! Naver Local search API client. One query per input row, first item only.

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::warn;

const LOCAL_SEARCH_URL: &str = "https://openapi.naver.com/v1/search/local.json";

#[derive(Debug, Deserialize)]
struct LocalResponse {
    #[serde(default)]
    items: Vec<LocalItem>,
}

/// First search hit for a query. Fields the API omits come back empty.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LocalItem {
    pub title: String,
    pub link: String,
    pub category: String,
    pub description: String,
    pub telephone: String,
    pub address: String,
    #[serde(rename = "roadAddress")]
    pub road_address: String,
    pub mapx: String,
    pub mapy: String,
}

pub struct LocalApi {
    client: reqwest::Client,
    client_id: String,
    client_secret: String,
}

impl LocalApi {
    /// Credentials are required up front; a missing variable aborts the run
    /// before any row is processed.
    pub fn from_env() -> Result<Self> {
        let client_id = std::env::var("NAVER_CLIENT_ID")
            .context("NAVER_CLIENT_ID environment variable must be set")?;
        let client_secret = std::env::var("NAVER_CLIENT_SECRET")
            .context("NAVER_CLIENT_SECRET environment variable must be set")?;

        Ok(LocalApi {
            client: reqwest::Client::new(),
            client_id,
            client_secret,
        })
    }

    /// Look up a query and return the first item, if any. Non-success
    /// responses and empty item lists are both "no result", not errors.
    pub async fn lookup(&self, query: &str) -> Result<Option<LocalItem>> {
        let response = self
            .client
            .get(LOCAL_SEARCH_URL)
            .header("X-Naver-Client-Id", &self.client_id)
            .header("X-Naver-Client-Secret", &self.client_secret)
            .query(&[("query", query), ("display", "1")])
            .send()
            .await
            .context("local search request failed")?;

        if !response.status().is_success() {
            warn!("local search returned {} for query {:?}", response.status(), query);
            return Ok(None);
        }

        let body = response.text().await?;
        let parsed: LocalResponse =
            serde_json::from_str(&body).context("unexpected local search response shape")?;
        Ok(parsed.items.into_iter().next())
    }
}

/// Split the API's "대분류>중분류>소분류" category string into major/minor.
pub fn split_category(raw: &str) -> (String, String) {
    if raw.contains('>') {
        let parts: Vec<&str> = raw.split('>').map(str::trim).collect();
        let major = parts.first().copied().unwrap_or_default();
        let minor = parts.last().copied().unwrap_or_default();
        (major.to_string(), minor.to_string())
    } else {
        (raw.trim().to_string(), String::new())
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_splits_major_and_minor() {
        let (major, minor) = split_category("음식점>한식>국밥");
        assert_eq!(major, "음식점");
        assert_eq!(minor, "국밥");
    }

    #[test]
    fn flat_category_has_no_minor() {
        let (major, minor) = split_category("카페");
        assert_eq!(major, "카페");
        assert_eq!(minor, "");
    }

    #[test]
    fn response_items_parse() {
        let body = r#"{
            "total": 1, "start": 1, "display": 1,
            "items": [{
                "title": "중국<b>반점</b>",
                "link": "https://example.com",
                "category": "음식점>중식",
                "description": "",
                "telephone": "02-123-4567",
                "address": "서울 강남구 역삼동 1-1",
                "roadAddress": "서울 강남구 테헤란로 1",
                "mapx": "1270000000",
                "mapy": "375000000"
            }]
        }"#;
        let parsed: LocalResponse = serde_json::from_str(body).unwrap();
        let item = parsed.items.into_iter().next().unwrap();
        assert_eq!(item.address, "서울 강남구 역삼동 1-1");
        assert_eq!(item.road_address, "서울 강남구 테헤란로 1");
        assert_eq!(item.telephone, "02-123-4567");
    }

    #[test]
    fn empty_items_is_no_result() {
        let parsed: LocalResponse = serde_json::from_str(r#"{"items": []}"#).unwrap();
        assert!(parsed.items.is_empty());
    }
}
