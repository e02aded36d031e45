use serde_json::Value;
use sqlx::PgPool;

use crate::config::Config;
use crate::listings::ListingsClient;
use crate::outcome::JobOutcome;
use crate::postings::{NewPosting, PostingsRepo};
use crate::search::{self, SearchDocument};

/// Ingest entrypoint: fetch one page of postings and insert-or-ignore each.
/// When a search store is configured, every fetched posting is also indexed;
/// search failures are logged per document and never abort the pass.
pub async fn run_ingest(cfg: &Config, pool: &PgPool, _trigger: Value) -> JobOutcome {
    match ingest_pass(cfg, pool).await {
        Ok((fetched, inserted)) => {
            JobOutcome::ok(format!("{fetched} postings fetched, {inserted} inserted."))
        }
        Err(e) => JobOutcome::error(format!("Error occurred: {e}")),
    }
}

async fn ingest_pass(cfg: &Config, pool: &PgPool) -> anyhow::Result<(usize, u64)> {
    let listings = ListingsClient::new(&cfg.api_base, &cfg.country)?;
    let search = search::client_or_disabled(cfg.search.as_ref());

    // An upstream failure degrades to an empty page; the job still reports
    // success with zero processed.
    let records = match listings.fetch_page(cfg.page_limit, cfg.page_offset).await {
        Ok(records) => records,
        Err(e) => {
            eprintln!("[ingest] fetch failed, treating as empty page: {e}");
            Vec::new()
        }
    };

    let repo = PostingsRepo::new(pool.clone());
    let mut inserted = 0u64;

    for record in &records {
        let posting = NewPosting::from_record(record);

        if repo.insert_ignore(&posting).await? {
            inserted += 1;
        }

        if let Some(search) = &search {
            let doc = SearchDocument::from_posting(&posting);
            if let Err(e) = search.index_posting(&doc).await {
                eprintln!("[search] index failed for {}, skipping: {e}", doc.doc_id());
            }
        }
    }

    println!("[ingest] fetched={} inserted={}", records.len(), inserted);
    Ok((records.len(), inserted))
}
