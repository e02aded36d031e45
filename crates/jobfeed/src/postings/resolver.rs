use chrono::{DateTime, Duration, Utc};
use std::pin::Pin;

use crate::listings::{parse_timestamp, ListingDetail, ListingsClient};
use crate::postings::model::{evaluate_status, Posting, PostingStatus, OPEN_ENDED_CUTOFF_DAYS};

pub type BoxFuture<'a, T> = Pin<Box<dyn std::future::Future<Output = T> + Send + 'a>>;

/// Strategy for recomputing a posting's status during a refresh pass.
pub trait StatusResolver {
    fn resolve<'a>(&'a self, posting: &'a Posting, now: DateTime<Utc>) -> BoxFuture<'a, PostingStatus>;
}

/// Default strategy: trust the locally stored due_time / posted_date.
pub struct TimestampResolver;

impl StatusResolver for TimestampResolver {
    fn resolve<'a>(
        &'a self,
        posting: &'a Posting,
        now: DateTime<Utc>,
    ) -> BoxFuture<'a, PostingStatus> {
        let status = evaluate_status(posting.due_time, posting.posted_date, now);
        Box::pin(async move { status })
    }
}

/// Opt-in strategy: re-query the origin API per posting to corroborate the
/// status. Any failure (network, timeout, non-200) keeps the stored status.
pub struct ApiResolver {
    listings: ListingsClient,
}

impl ApiResolver {
    pub fn new(listings: ListingsClient) -> Self {
        Self { listings }
    }
}

impl StatusResolver for ApiResolver {
    fn resolve<'a>(
        &'a self,
        posting: &'a Posting,
        now: DateTime<Utc>,
    ) -> BoxFuture<'a, PostingStatus> {
        Box::pin(async move {
            let stored =
                PostingStatus::parse(&posting.status).unwrap_or(PostingStatus::Active);

            let detail = match self.listings.fetch_detail(posting.external_id).await {
                Ok(detail) => detail,
                Err(e) => {
                    eprintln!(
                        "[refresh] api check failed for external_id={}: {e}",
                        posting.external_id
                    );
                    return stored;
                }
            };

            status_from_detail(&detail, stored, now)
        })
    }
}

fn status_from_detail(
    detail: &ListingDetail,
    stored: PostingStatus,
    now: DateTime<Utc>,
) -> PostingStatus {
    match detail.due_time.as_deref().and_then(parse_timestamp) {
        Some(due) if now > due => PostingStatus::Closed,
        Some(_) => PostingStatus::Active,
        None => match detail.posted_date.as_deref().and_then(parse_timestamp) {
            Some(posted) if now - posted > Duration::days(OPEN_ENDED_CUTOFF_DAYS) => {
                PostingStatus::Closed
            }
            Some(_) => PostingStatus::OpenEnded,
            // API knows nothing either: keep what we have.
            None => stored,
        },
    }
}
