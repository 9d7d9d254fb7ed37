// Job Store: owner-scoped CRUD plus kanban ordering (status column + order).

pub mod handlers;
#[cfg(test)]
pub mod memory;
pub mod models;
pub mod store;

pub use store::{JobStore, PgJobStore};
