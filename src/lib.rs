//! TrackHub Equipment Maintenance Tracker
//!
//! A Rust implementation of the TrackHub maintenance tracking server,
//! providing a REST JSON API for managing equipment inventory, maintenance
//! interventions, locations and user accounts.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod policy;
pub mod repository;
pub mod rules;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
