// SPDX-License-Identifier: MIT

//! Carbonlog: personal carbon-footprint tracking backend
//!
//! This crate provides the API for logging everyday activities in free
//! text, classifying them into emission categories, and serving the
//! aggregated dashboards (daily score, weekly trend, heatmap, history).

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::FirestoreDb;
use services::Classifier;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub classifier: Classifier,
}
