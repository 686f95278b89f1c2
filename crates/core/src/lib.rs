//! Domain logic shared by the persistence and API layers.
//!
//! This crate has no internal dependencies so validation rules, the error
//! taxonomy, and the activity-diff helper can be used from the API layer,
//! repositories, and any future CLI tooling alike.

pub mod activity;
pub mod error;
pub mod farm;
pub mod types;
pub mod validation;
