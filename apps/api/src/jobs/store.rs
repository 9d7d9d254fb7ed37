//! Job persistence.
//!
//! Every method is scoped to the owning user: a job belonging to someone else
//! behaves exactly like a job that does not exist.
//!
//! `AppState` holds an `Arc<dyn JobStore>`; `PgJobStore` is the production backend.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::jobs::models::{Job, JobChanges, NewJob, OrderUpdate};

#[async_trait]
pub trait JobStore: Send + Sync {
    /// All of the user's jobs, sorted by `(status, order)`.
    async fn list(&self, user_id: Uuid) -> Result<Vec<Job>, AppError>;

    async fn get(&self, user_id: Uuid, job_id: Uuid) -> Result<Option<Job>, AppError>;

    /// Appends the job to the end of its status column.
    async fn create(&self, user_id: Uuid, job: NewJob) -> Result<Job, AppError>;

    /// Applies present fields only. Sibling orders are not renumbered.
    async fn update(
        &self,
        user_id: Uuid,
        job_id: Uuid,
        changes: JobChanges,
    ) -> Result<Option<Job>, AppError>;

    /// Applies every `(id, order, status)` triple as a point update and returns
    /// how many jobs were touched. Ids the user does not own are skipped.
    async fn reorder(&self, user_id: Uuid, updates: &[OrderUpdate]) -> Result<u64, AppError>;

    /// Returns whether a job was removed. Remaining orders keep their gaps.
    async fn delete(&self, user_id: Uuid, job_id: Uuid) -> Result<bool, AppError>;
}

pub struct PgJobStore {
    pool: PgPool,
}

impl PgJobStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobStore for PgJobStore {
    async fn list(&self, user_id: Uuid) -> Result<Vec<Job>, AppError> {
        Ok(sqlx::query_as::<_, Job>(
            "SELECT * FROM jobs WHERE user_id = $1 ORDER BY status ASC, sort_order ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn get(&self, user_id: Uuid, job_id: Uuid) -> Result<Option<Job>, AppError> {
        Ok(
            sqlx::query_as::<_, Job>("SELECT * FROM jobs WHERE id = $1 AND user_id = $2")
                .bind(job_id)
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn create(&self, user_id: Uuid, job: NewJob) -> Result<Job, AppError> {
        // Order is the column size at insert time. Two concurrent inserts into
        // the same column can observe the same count.
        Ok(sqlx::query_as::<_, Job>(
            r#"
            INSERT INTO jobs
                (id, user_id, position, company, company_logo, location, description,
                 salary, link, status, sort_order, custom_resume_link, interview_date,
                 contract_link)
            VALUES
                ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                 (SELECT COUNT(*)::INTEGER FROM jobs WHERE user_id = $2 AND status = $10),
                 $11, $12, $13)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(&job.position)
        .bind(&job.company)
        .bind(&job.company_logo)
        .bind(&job.location)
        .bind(&job.description)
        .bind(&job.salary)
        .bind(&job.link)
        .bind(job.status)
        .bind(&job.custom_resume_link)
        .bind(&job.interview_date)
        .bind(&job.contract_link)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn update(
        &self,
        user_id: Uuid,
        job_id: Uuid,
        changes: JobChanges,
    ) -> Result<Option<Job>, AppError> {
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query_as::<_, Job>(
            "SELECT * FROM jobs WHERE id = $1 AND user_id = $2 FOR UPDATE",
        )
        .bind(job_id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(mut job) = existing else {
            return Ok(None);
        };
        changes.apply_to(&mut job);

        let updated = sqlx::query_as::<_, Job>(
            r#"
            UPDATE jobs SET
                position = $3, company = $4, company_logo = $5, location = $6,
                description = $7, salary = $8, link = $9, status = $10, sort_order = $11,
                custom_resume_link = $12, interview_date = $13, contract_link = $14
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(job.id)
        .bind(job.user_id)
        .bind(&job.position)
        .bind(&job.company)
        .bind(&job.company_logo)
        .bind(&job.location)
        .bind(&job.description)
        .bind(&job.salary)
        .bind(&job.link)
        .bind(job.status)
        .bind(job.order)
        .bind(&job.custom_resume_link)
        .bind(&job.interview_date)
        .bind(&job.contract_link)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(updated))
    }

    async fn reorder(&self, user_id: Uuid, updates: &[OrderUpdate]) -> Result<u64, AppError> {
        // One transaction per call: a failed item rolls back the whole batch.
        // Concurrent calls are still last-writer-wins per job.
        let mut tx = self.pool.begin().await?;
        let mut touched = 0;

        for update in updates {
            let result = sqlx::query(
                "UPDATE jobs SET sort_order = $1, status = $2 WHERE id = $3 AND user_id = $4",
            )
            .bind(update.order)
            .bind(update.status)
            .bind(update.id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

            if result.rows_affected() == 0 {
                debug!("Reorder skipped job {} (not owned or missing)", update.id);
            }
            touched += result.rows_affected();
        }

        tx.commit().await?;
        Ok(touched)
    }

    async fn delete(&self, user_id: Uuid, job_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1 AND user_id = $2")
            .bind(job_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
