//! Work-Time Engine library crate.
//!
//! This crate converts income details and purchase prices into the
//! work-time needed to afford them.  The core is two pure functions,
//! [`rate::derive_hourly_rate`] and [`engine::compute_time_cost`];
//! the remaining modules validate input, format results, keep saved
//! insights in local files and serve the engine over HTTP via
//! `api::build_router`.

pub mod models;
pub mod rate;
pub mod engine;
pub mod validate;
pub mod format;
pub mod insights;
pub mod config;
pub mod api;
