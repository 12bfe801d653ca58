//! Clinic Booking Service
//!
//! This library renders a small marketing site for a local lice-removal
//! clinic and accepts appointment-booking submissions, forwarding them to
//! either a third-party form relay or a configurable HTTP endpoint. All
//! site content and booking-form behavior are driven by a single static
//! clinic configuration.
//!
//! # Modules
//!
//! - `config`: clinic configuration types and loading
//! - `services::booking`: required-field rules, validation and submission
//! - `target`: the relay / direct-POST submission targets
//! - `pages`: server-rendered site pages
//! - `handlers` and `routes`: the HTTP surface

pub mod config;
pub mod handlers;
pub mod models;
pub mod pages;
pub mod routes;
pub mod services;
pub mod target;

#[cfg(test)]
pub mod target_mock;


// Re-export the main types for ease of use
pub use config::{load_config, ClinicConfig, FormField};
pub use handlers::api::AppState;
pub use routes::create_router;
pub use target::SubmissionTarget;
