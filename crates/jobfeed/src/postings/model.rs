use chrono::{DateTime, Duration, Utc};

use crate::listings::{self, ListingRecord};

/// Undated postings are considered expired once older than this.
pub const OPEN_ENDED_CUTOFF_DAYS: i64 = 30;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Posting {
    pub id: i64,
    pub external_id: i64,
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub annual_from: Option<i32>,
    pub annual_to: Option<i32>,
    pub source: String,
    pub detail_url: String,
    pub posted_date: DateTime<Utc>,
    pub due_time: Option<DateTime<Utc>>,
    pub status: String,
    pub last_validated_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewPosting {
    pub external_id: i64,
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub annual_from: Option<i32>,
    pub annual_to: Option<i32>,
    pub source: String,
    pub detail_url: String,
    // None falls back to the column default (now()).
    pub posted_date: Option<DateTime<Utc>>,
    pub due_time: Option<DateTime<Utc>>,
}

impl NewPosting {
    pub fn from_record(rec: &ListingRecord) -> Self {
        Self {
            external_id: rec.id,
            title: rec.position.clone(),
            company: rec.company.name.clone(),
            location: rec
                .address
                .as_ref()
                .and_then(|addr| addr.location.clone()),
            annual_from: rec.annual_from,
            annual_to: rec.annual_to,
            source: listings::SOURCE.to_string(),
            detail_url: listings::detail_url(rec.id),
            posted_date: rec
                .posted_date
                .as_deref()
                .and_then(listings::parse_timestamp),
            due_time: rec.due_time.as_deref().and_then(listings::parse_timestamp),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostingStatus {
    Active,
    OpenEnded,
    Closed,
}

impl PostingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostingStatus::Active => "active",
            PostingStatus::OpenEnded => "open_ended",
            PostingStatus::Closed => "closed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(PostingStatus::Active),
            "open_ended" => Some(PostingStatus::OpenEnded),
            "closed" => Some(PostingStatus::Closed),
            _ => None,
        }
    }
}

/// The status lifecycle rule. A posting with a deadline is active until the
/// deadline passes; an undated posting stays open_ended for
/// OPEN_ENDED_CUTOFF_DAYS after it was posted, then closes.
pub fn evaluate_status(
    due_time: Option<DateTime<Utc>>,
    posted_date: DateTime<Utc>,
    now: DateTime<Utc>,
) -> PostingStatus {
    match due_time {
        Some(due) if now > due => PostingStatus::Closed,
        Some(_) => PostingStatus::Active,
        None if now - posted_date > Duration::days(OPEN_ENDED_CUTOFF_DAYS) => PostingStatus::Closed,
        None => PostingStatus::OpenEnded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn days_ago(n: i64) -> DateTime<Utc> {
        Utc::now() - Duration::days(n)
    }

    #[test]
    fn past_due_is_closed() {
        let now = Utc::now();
        assert_eq!(
            evaluate_status(Some(days_ago(1)), days_ago(10), now),
            PostingStatus::Closed
        );
    }

    #[test]
    fn future_due_is_active() {
        let now = Utc::now();
        assert_eq!(
            evaluate_status(Some(now + Duration::days(7)), days_ago(10), now),
            PostingStatus::Active
        );
    }

    #[test]
    fn undated_and_stale_is_closed() {
        let now = Utc::now();
        assert_eq!(
            evaluate_status(None, days_ago(31), now),
            PostingStatus::Closed
        );
    }

    #[test]
    fn undated_and_fresh_is_open_ended() {
        let now = Utc::now();
        assert_eq!(
            evaluate_status(None, days_ago(29), now),
            PostingStatus::OpenEnded
        );
    }

    #[test]
    fn cutoff_is_exclusive() {
        let now = Utc::now();
        // exactly 30 days old is still open_ended
        assert_eq!(
            evaluate_status(None, now - Duration::days(30), now),
            PostingStatus::OpenEnded
        );
    }

    #[test]
    fn status_round_trips_through_strings() {
        for status in [
            PostingStatus::Active,
            PostingStatus::OpenEnded,
            PostingStatus::Closed,
        ] {
            assert_eq!(PostingStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(PostingStatus::parse("bogus"), None);
    }
}
