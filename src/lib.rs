//! GearGuard Maintenance Tracking System
//!
//! A Rust REST API server for tracking maintenance requests across
//! equipment, teams and technicians, with a status lifecycle, recurrence
//! scheduling and an append-only audit trail.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
