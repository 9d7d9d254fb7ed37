use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::errors::AppError;
use crate::jobs::memory::MemoryJobStore;
use crate::users::models::{NewUser, UserRow, UserUpdate};
use crate::users::store::UserStore;

/// In-process `UserStore` for handler tests. When built `with_jobs`, deleting
/// a user also drops their jobs, like the foreign-key cascade in Postgres.
#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<Vec<UserRow>>,
    jobs: Option<Arc<MemoryJobStore>>,
}

impl MemoryUserStore {
    pub fn with_jobs(jobs: Arc<MemoryJobStore>) -> Self {
        Self {
            users: Mutex::default(),
            jobs: Some(jobs),
        }
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, user: NewUser) -> Result<UserRow, AppError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(AppError::Conflict("User already exists".to_string()));
        }
        let row = UserRow {
            id: Uuid::new_v4(),
            email: user.email,
            password_hash: user.password_hash,
            first_name: user.first_name,
            last_name: user.last_name,
            resume_link: None,
            created_at: Utc::now(),
        };
        users.push(row.clone());
        Ok(row)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRow>, AppError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRow>, AppError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn update(&self, id: Uuid, update: UserUpdate) -> Result<Option<UserRow>, AppError> {
        let mut users = self.users.lock().unwrap();
        let Some(user) = users.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };
        if let Some(first_name) = update.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = update.last_name {
            user.last_name = last_name;
        }
        if let Some(password_hash) = update.password_hash {
            user.password_hash = password_hash;
        }
        if let Some(resume_link) = update.resume_link {
            user.resume_link = Some(resume_link);
        }
        Ok(Some(user.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let removed = {
            let mut users = self.users.lock().unwrap();
            let before = users.len();
            users.retain(|u| u.id != id);
            users.len() < before
        };
        if removed {
            if let Some(jobs) = &self.jobs {
                jobs.remove_owned_by(id);
            }
        }
        Ok(removed)
    }
}
