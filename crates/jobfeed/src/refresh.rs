use chrono::Utc;
use serde_json::Value;
use sqlx::PgPool;

use crate::config::{Config, RefreshStrategy};
use crate::listings::ListingsClient;
use crate::outcome::JobOutcome;
use crate::postings::{ApiResolver, PostingStatus, PostingsRepo, StatusResolver, TimestampResolver};

/// Refresh entrypoint: re-evaluate every active / open_ended posting and
/// write back only the rows whose status actually changed.
pub async fn run_refresh(cfg: &Config, pool: &PgPool, _trigger: Value) -> JobOutcome {
    let result = match cfg.refresh_strategy {
        RefreshStrategy::Timestamp => refresh_pass(pool, &TimestampResolver).await,
        RefreshStrategy::Api => {
            match ListingsClient::new(&cfg.api_base, &cfg.country) {
                Ok(listings) => refresh_pass(pool, &ApiResolver::new(listings)).await,
                Err(e) => Err(e),
            }
        }
    };

    match result {
        Ok(updated) => JobOutcome::ok(format!("refresh complete, {updated} postings updated.")),
        Err(e) => JobOutcome::error(format!("Error occurred: {e}")),
    }
}

/// One refresh pass with an injected status strategy. All resulting writes
/// commit together in one transaction at the end, or none do.
pub async fn refresh_pass<R: StatusResolver>(
    pool: &PgPool,
    resolver: &R,
) -> anyhow::Result<u64> {
    let repo = PostingsRepo::new(pool.clone());
    let postings = repo.list_refreshable().await?;
    let now = Utc::now();

    let mut changes: Vec<(i64, PostingStatus)> = Vec::new();
    for posting in &postings {
        let next = resolver.resolve(posting, now).await;

        if PostingStatus::parse(&posting.status) != Some(next) {
            println!(
                "[refresh] posting {} status changed: {} -> {}",
                posting.external_id,
                posting.status,
                next.as_str()
            );
            changes.push((posting.id, next));
        }
    }

    repo.apply_status_changes(&changes).await
}
