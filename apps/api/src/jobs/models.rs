use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

/// One tracked job application.
///
/// `status` is the kanban column; `order` is the position inside that column.
/// Column names are up to the client, the store only sees integers.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Job {
    pub id: Uuid,
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    pub position: String,
    pub company: String,
    pub company_logo: Option<String>,
    pub location: String,
    pub description: String,
    pub salary: Option<String>,
    pub link: String,
    pub status: i32,
    #[sqlx(rename = "sort_order")]
    pub order: i32,
    pub custom_resume_link: Option<String>,
    pub interview_date: Option<String>,
    pub contract_link: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Body of POST /api/job. Owner and order are never taken from the client.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewJob {
    #[validate(length(min = 1))]
    pub position: String,
    #[validate(length(min = 1))]
    pub company: String,
    pub company_logo: Option<String>,
    pub location: String,
    pub description: String,
    pub salary: Option<String>,
    #[validate(url)]
    pub link: String,
    #[validate(range(min = 0))]
    pub status: i32,
    #[validate(url)]
    pub custom_resume_link: Option<String>,
    pub interview_date: Option<String>,
    pub contract_link: Option<String>,
}

/// Body of PATCH /api/job/:jobId. Absent fields stay untouched.
///
/// Nullable columns use `Option<Option<_>>`: absent leaves the value, `null`
/// clears it. `null` on a required column is a decode error.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct JobChanges {
    #[serde(default, deserialize_with = "non_null")]
    #[validate(length(min = 1))]
    pub position: Option<String>,
    #[serde(default, deserialize_with = "non_null")]
    #[validate(length(min = 1))]
    pub company: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub company_logo: Option<Option<String>>,
    #[serde(default, deserialize_with = "non_null")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "non_null")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub salary: Option<Option<String>>,
    #[serde(default, deserialize_with = "non_null")]
    #[validate(url)]
    pub link: Option<String>,
    #[serde(default, deserialize_with = "non_null")]
    #[validate(range(min = 0))]
    pub status: Option<i32>,
    #[serde(default, deserialize_with = "non_null")]
    #[validate(range(min = 0))]
    pub order: Option<i32>,
    #[serde(default, deserialize_with = "nullable")]
    #[validate(url)]
    pub custom_resume_link: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub interview_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub contract_link: Option<Option<String>>,
}

/// Present field that must carry a value.
fn non_null<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Present field that may be `null`.
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl JobChanges {
    /// Writes every present field onto `job`.
    pub fn apply_to(self, job: &mut Job) {
        if let Some(v) = self.position {
            job.position = v;
        }
        if let Some(v) = self.company {
            job.company = v;
        }
        if let Some(v) = self.company_logo {
            job.company_logo = v;
        }
        if let Some(v) = self.location {
            job.location = v;
        }
        if let Some(v) = self.description {
            job.description = v;
        }
        if let Some(v) = self.salary {
            job.salary = v;
        }
        if let Some(v) = self.link {
            job.link = v;
        }
        if let Some(v) = self.status {
            job.status = v;
        }
        if let Some(v) = self.order {
            job.order = v;
        }
        if let Some(v) = self.custom_resume_link {
            job.custom_resume_link = v;
        }
        if let Some(v) = self.interview_date {
            job.interview_date = v;
        }
        if let Some(v) = self.contract_link {
            job.contract_link = v;
        }
    }
}

/// One item of a bulk reorder.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Validate)]
pub struct OrderUpdate {
    pub id: Uuid,
    #[validate(range(min = 0))]
    pub order: i32,
    #[validate(range(min = 0))]
    pub status: i32,
}

/// Body of PATCH /api/job/order: a bare JSON array of `OrderUpdate`.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct ReorderJobs(pub Vec<OrderUpdate>);

impl Validate for ReorderJobs {
    fn validate(&self) -> Result<(), ValidationErrors> {
        for update in &self.0 {
            update.validate()?;
        }
        Ok(())
    }
}

/// A user's jobs grouped by status column, each column sorted by `order`.
///
/// Serializes as an object keyed by the status value; empty columns are absent.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct JobBoard(pub BTreeMap<i32, Vec<Job>>);

impl JobBoard {
    pub fn from_jobs(jobs: Vec<Job>) -> Self {
        let mut columns: BTreeMap<i32, Vec<Job>> = BTreeMap::new();
        for job in jobs {
            columns.entry(job.status).or_default().push(job);
        }
        for column in columns.values_mut() {
            column.sort_by_key(|job| job.order);
        }
        JobBoard(columns)
    }

    /// Total number of jobs across all columns.
    pub fn job_count(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    #[cfg(test)]
    pub fn column(&self, status: i32) -> &[Job] {
        self.0.get(&status).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
pub(crate) fn sample_job(user_id: Uuid, status: i32, order: i32) -> Job {
    Job {
        id: Uuid::new_v4(),
        user_id,
        position: "Engineer".to_string(),
        company: "Acme".to_string(),
        company_logo: None,
        location: "Remote".to_string(),
        description: "Build things".to_string(),
        salary: None,
        link: "https://acme.example.com/jobs/1".to_string(),
        status,
        order,
        custom_resume_link: None,
        interview_date: None,
        contract_link: None,
        created_at: Utc::now(),
    }
}
