use sqlx::PgPool;

use crate::postings::model::{NewPosting, Posting, PostingStatus};

#[derive(Clone)]
pub struct PostingsRepo {
    pool: PgPool,
}

impl PostingsRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert-or-ignore on the (source, external_id) natural key.
    /// Returns true when a row was actually inserted; an already-seen posting
    /// is silently skipped and never updated.
    pub async fn insert_ignore(&self, posting: &NewPosting) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"
            INSERT INTO jobs (
                external_id, title, company, location,
                annual_from, annual_to, source, detail_url,
                posted_date, due_time
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, COALESCE($9, now()), $10)
            ON CONFLICT (source, external_id) DO NOTHING
            "#,
        )
        .bind(posting.external_id)
        .bind(&posting.title)
        .bind(&posting.company)
        .bind(&posting.location)
        .bind(posting.annual_from)
        .bind(posting.annual_to)
        .bind(&posting.source)
        .bind(&posting.detail_url)
        .bind(posting.posted_date)
        .bind(posting.due_time)
        .execute(&self.pool)
        .await?;

        Ok(res.rows_affected() == 1)
    }

    /// Everything the refresh pass re-evaluates. Closed is terminal and
    /// deliberately excluded here.
    pub async fn list_refreshable(&self) -> anyhow::Result<Vec<Posting>> {
        let postings = sqlx::query_as::<_, Posting>(
            r#"
            SELECT *
            FROM jobs
            WHERE status IN ('active', 'open_ended')
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(postings)
    }

    /// Apply all status changes of a refresh pass in one transaction, so the
    /// pass commits together at the end or not at all. last_validated_at is
    /// only bumped here, never on a no-op row.
    pub async fn apply_status_changes(
        &self,
        changes: &[(i64, PostingStatus)],
    ) -> anyhow::Result<u64> {
        if changes.is_empty() {
            return Ok(0);
        }

        let mut tx = self.pool.begin().await?;
        let mut updated = 0u64;

        for (id, status) in changes {
            let res = sqlx::query(
                r#"
                UPDATE jobs
                SET status = $2,
                    last_validated_at = now()
                WHERE id = $1
                "#,
            )
            .bind(id)
            .bind(status.as_str())
            .execute(&mut *tx)
            .await?;

            updated += res.rows_affected();
        }

        tx.commit().await?;
        Ok(updated)
    }

    pub async fn find_by_natural_key(
        &self,
        source: &str,
        external_id: i64,
    ) -> anyhow::Result<Option<Posting>> {
        let posting = sqlx::query_as::<_, Posting>(
            r#"
            SELECT *
            FROM jobs
            WHERE source = $1 AND external_id = $2
            "#,
        )
        .bind(source)
        .bind(external_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(posting)
    }
}
