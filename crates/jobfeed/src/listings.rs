use anyhow::Context;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// Fixed literal identifying the origin API in stored rows and document ids.
pub const SOURCE: &str = "wanted";

const USER_AGENT: &str = "Mozilla/5.0";
const DETAIL_URL_BASE: &str = "https://www.wanted.co.kr/wd";

// Short timeout for the per-posting corroboration call only; the page fetch
// uses the client default.
const DETAIL_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Deserialize)]
pub struct ListingRecord {
    pub id: i64,
    pub position: String,
    pub company: CompanyRecord,
    #[serde(default)]
    pub address: Option<AddressRecord>,
    #[serde(default)]
    pub annual_from: Option<i32>,
    #[serde(default)]
    pub annual_to: Option<i32>,
    #[serde(default)]
    pub due_time: Option<String>,
    #[serde(default)]
    pub posted_date: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompanyRecord {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddressRecord {
    #[serde(default)]
    pub location: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ListingsPage {
    #[serde(default)]
    data: Vec<ListingRecord>,
}

/// Subset of the per-posting detail response used by the API status resolver.
#[derive(Debug, Clone, Deserialize)]
pub struct ListingDetail {
    #[serde(default)]
    pub due_time: Option<String>,
    #[serde(default)]
    pub posted_date: Option<String>,
}

#[derive(Clone)]
pub struct ListingsClient {
    client: Client,
    base_url: String,
    country: String,
}

impl ListingsClient {
    pub fn new(base_url: &str, country: &str) -> anyhow::Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            country: country.to_string(),
        })
    }

    pub async fn fetch_page(&self, limit: i64, offset: i64) -> anyhow::Result<Vec<ListingRecord>> {
        let params = [
            ("limit", limit.to_string()),
            ("offset", offset.to_string()),
            ("country", self.country.clone()),
        ];

        let page: ListingsPage = self
            .client
            .get(&self.base_url)
            .query(&params)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .context("malformed listings page")?;

        Ok(page.data)
    }

    pub async fn fetch_detail(&self, external_id: i64) -> anyhow::Result<ListingDetail> {
        let url = format!("{}/{}", self.base_url, external_id);

        let detail = self
            .client
            .get(&url)
            .timeout(DETAIL_TIMEOUT)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(detail)
    }
}

pub fn detail_url(external_id: i64) -> String {
    format!("{DETAIL_URL_BASE}/{external_id}")
}

/// Parse the API's ISO-8601 timestamps. The feed sometimes sends a bare date
/// ("2025-04-08"), sometimes a datetime. Anything unparseable is treated as
/// absent, never as an error.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(ndt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(Utc.from_utc_datetime(&ndt));
    }
    if let Ok(nd) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return nd
            .and_hms_opt(0, 0, 0)
            .map(|ndt| Utc.from_utc_datetime(&ndt));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn page_deserializes_with_optional_fields_missing() {
        let body = r#"
        {
            "data": [
                {
                    "id": 12345,
                    "position": "Senior Backend Engineer (Node)",
                    "company": { "name": "Acme" },
                    "address": { "location": "Seoul" },
                    "annual_from": 0,
                    "annual_to": 10,
                    "due_time": "2025-04-08",
                    "posted_date": "2025-03-01"
                },
                {
                    "id": 12346,
                    "position": "Designer",
                    "company": { "name": "Beta" }
                }
            ]
        }"#;

        let page: ListingsPage = serde_json::from_str(body).unwrap();
        assert_eq!(page.data.len(), 2);
        assert_eq!(page.data[0].id, 12345);
        assert_eq!(page.data[0].company.name, "Acme");
        assert_eq!(
            page.data[0].address.as_ref().unwrap().location.as_deref(),
            Some("Seoul")
        );
        assert!(page.data[1].due_time.is_none());
        assert!(page.data[1].annual_from.is_none());
    }

    #[test]
    fn page_with_no_data_array_is_empty() {
        let page: ListingsPage = serde_json::from_str("{}").unwrap();
        assert!(page.data.is_empty());
    }

    #[test]
    fn parses_bare_date() {
        let ts = parse_timestamp("2025-04-08").unwrap();
        assert_eq!((ts.year(), ts.month(), ts.day()), (2025, 4, 8));
    }

    #[test]
    fn parses_datetime_and_rfc3339() {
        assert!(parse_timestamp("2025-04-08T12:30:00").is_some());
        assert!(parse_timestamp("2025-04-08T12:30:00+09:00").is_some());
    }

    #[test]
    fn malformed_timestamp_is_absent() {
        assert!(parse_timestamp("not-a-date").is_none());
        assert!(parse_timestamp("").is_none());
    }

    #[test]
    fn detail_url_shape() {
        assert_eq!(detail_url(42), "https://www.wanted.co.kr/wd/42");
    }
}
