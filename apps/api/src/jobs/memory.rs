use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::errors::AppError;
use crate::jobs::models::{Job, JobChanges, NewJob, OrderUpdate};
use crate::jobs::store::JobStore;

/// In-process `JobStore` for handler tests. Mirrors `PgJobStore` semantics.
#[derive(Default)]
pub struct MemoryJobStore {
    jobs: Mutex<Vec<Job>>,
}

impl MemoryJobStore {
    /// Drops every job owned by `user_id`.
    pub fn remove_owned_by(&self, user_id: Uuid) {
        self.jobs.lock().unwrap().retain(|j| j.user_id != user_id);
    }
}

#[async_trait]
impl JobStore for MemoryJobStore {
    async fn list(&self, user_id: Uuid) -> Result<Vec<Job>, AppError> {
        let jobs = self.jobs.lock().unwrap();
        let mut owned: Vec<Job> = jobs.iter().filter(|j| j.user_id == user_id).cloned().collect();
        owned.sort_by_key(|j| (j.status, j.order));
        Ok(owned)
    }

    async fn get(&self, user_id: Uuid, job_id: Uuid) -> Result<Option<Job>, AppError> {
        let jobs = self.jobs.lock().unwrap();
        Ok(jobs
            .iter()
            .find(|j| j.id == job_id && j.user_id == user_id)
            .cloned())
    }

    async fn create(&self, user_id: Uuid, job: NewJob) -> Result<Job, AppError> {
        let mut jobs = self.jobs.lock().unwrap();
        let order = jobs
            .iter()
            .filter(|j| j.user_id == user_id && j.status == job.status)
            .count() as i32;
        let row = Job {
            id: Uuid::new_v4(),
            user_id,
            position: job.position,
            company: job.company,
            company_logo: job.company_logo,
            location: job.location,
            description: job.description,
            salary: job.salary,
            link: job.link,
            status: job.status,
            order,
            custom_resume_link: job.custom_resume_link,
            interview_date: job.interview_date,
            contract_link: job.contract_link,
            created_at: Utc::now(),
        };
        jobs.push(row.clone());
        Ok(row)
    }

    async fn update(
        &self,
        user_id: Uuid,
        job_id: Uuid,
        changes: JobChanges,
    ) -> Result<Option<Job>, AppError> {
        let mut jobs = self.jobs.lock().unwrap();
        let Some(job) = jobs
            .iter_mut()
            .find(|j| j.id == job_id && j.user_id == user_id)
        else {
            return Ok(None);
        };
        changes.apply_to(job);
        Ok(Some(job.clone()))
    }

    async fn reorder(&self, user_id: Uuid, updates: &[OrderUpdate]) -> Result<u64, AppError> {
        let mut jobs = self.jobs.lock().unwrap();
        let mut touched = 0;
        for update in updates {
            if let Some(job) = jobs
                .iter_mut()
                .find(|j| j.id == update.id && j.user_id == user_id)
            {
                job.order = update.order;
                job.status = update.status;
                touched += 1;
            }
        }
        Ok(touched)
    }

    async fn delete(&self, user_id: Uuid, job_id: Uuid) -> Result<bool, AppError> {
        let mut jobs = self.jobs.lock().unwrap();
        let before = jobs.len();
        jobs.retain(|j| !(j.id == job_id && j.user_id == user_id));
        Ok(jobs.len() < before)
    }
}
