use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Serialize;

use crate::classify::classify;
use crate::config::SearchConfig;
use crate::postings::model::NewPosting;

pub const INDEX_NAME: &str = "jobs";

/// Denormalized projection of a posting for the search index.
#[derive(Debug, Clone, Serialize)]
pub struct SearchDocument {
    pub external_id: i64,
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub annual_from: Option<i32>,
    pub annual_to: Option<i32>,
    pub source: String,
    pub detail_url: String,
    pub posted_date: Option<DateTime<Utc>>,
    pub due_time: Option<DateTime<Utc>>,
    pub job_category: String,
    pub indexed_at: DateTime<Utc>,
}

impl SearchDocument {
    pub fn from_posting(posting: &NewPosting) -> Self {
        Self {
            external_id: posting.external_id,
            title: posting.title.clone(),
            company: posting.company.clone(),
            location: posting.location.clone(),
            annual_from: posting.annual_from,
            annual_to: posting.annual_to,
            source: posting.source.clone(),
            detail_url: posting.detail_url.clone(),
            posted_date: posting.posted_date,
            due_time: posting.due_time,
            job_category: classify(&posting.title).to_string(),
            indexed_at: Utc::now(),
        }
    }

    pub fn doc_id(&self) -> String {
        format!("{}_{}", self.source, self.external_id)
    }
}

/// Build the search client when the store is configured. Construction
/// failure disables indexing for the pass instead of failing it; the
/// relational path never depends on the search store.
pub fn client_or_disabled(cfg: Option<&SearchConfig>) -> Option<SearchClient> {
    let cfg = cfg?;
    match SearchClient::new(cfg) {
        Ok(client) => Some(client),
        Err(e) => {
            eprintln!("[search] client init failed, indexing disabled: {e}");
            None
        }
    }
}

#[derive(Clone)]
pub struct SearchClient {
    client: Client,
    host: String,
    username: String,
    password: String,
}

impl SearchClient {
    pub fn new(cfg: &SearchConfig) -> anyhow::Result<Self> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            host: cfg.host.trim_end_matches('/').to_string(),
            username: cfg.username.clone(),
            password: cfg.password.clone(),
        })
    }

    /// PUT by document id: re-indexing the same posting overwrites the prior
    /// document instead of duplicating it.
    pub async fn index_posting(&self, doc: &SearchDocument) -> anyhow::Result<()> {
        let url = format!("{}/{}/_doc/{}", self.host, INDEX_NAME, doc.doc_id());

        self.client
            .put(&url)
            .basic_auth(&self.username, Some(&self.password))
            .json(doc)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listings;

    fn sample_posting() -> NewPosting {
        NewPosting {
            external_id: 777,
            title: "Senior Backend Engineer (Node)".to_string(),
            company: "Acme".to_string(),
            location: Some("Seoul".to_string()),
            annual_from: Some(0),
            annual_to: Some(10),
            source: listings::SOURCE.to_string(),
            detail_url: listings::detail_url(777),
            posted_date: None,
            due_time: None,
        }
    }

    #[test]
    fn document_id_is_source_underscore_external_id() {
        let doc = SearchDocument::from_posting(&sample_posting());
        assert_eq!(doc.doc_id(), "wanted_777");
    }

    #[test]
    fn document_carries_derived_category() {
        let doc = SearchDocument::from_posting(&sample_posting());
        assert_eq!(doc.job_category, "backend");
    }

    #[test]
    fn absent_config_disables_indexing() {
        assert!(client_or_disabled(None).is_none());
    }

    #[test]
    fn present_config_enables_indexing() {
        let cfg = SearchConfig {
            host: "http://127.0.0.1:1".to_string(),
            username: "u".to_string(),
            password: "p".to_string(),
        };
        assert!(client_or_disabled(Some(&cfg)).is_some());
    }
}
