//! # Celestial Watch
//!
//! Stargazing-conditions engine for the Celestial Weather Watcher dashboard.
//!
//! Given a weather snapshot, an instant and an observer location, this crate
//! works out the lunar phase, rates how good the night is for stargazing,
//! measures great-circle distances, and suggests nearby dark-sky sites. An
//! axum REST API exposes all of it to the frontend.
//!
//! ## Features
//!
//! - **Moon phase**: synodic-cycle approximation from a reference new moon
//! - **Stargazing score**: 1-10 rating under an explicit scoring policy
//! - **Distances**: haversine great-circle distance in kilometres
//! - **Forecast outlook**: per-night ratings and the best night of the week
//! - **Dark-sky sites**: candidate sites ranked by darkness and proximity
//! - **Photo analysis boundary**: upload validation and model answer decoding
//! - **Visit tracking**: session bookkeeping behind an injected repository
//! - **HTTP API**: RESTful endpoints for frontend integration
//!
//! ## Architecture
//!
//! - [`algorithms`]: pure moon, score and distance computations
//! - [`models`]: value types shared by every layer
//! - [`services`]: reports and orchestration on top of the algorithms
//! - [`db`]: repository traits and the in-memory visit store
//! - [`config`]: TOML and environment configuration
//! - [`http`]: Axum-based HTTP server and request handlers
//!

// RepositoryError carries an ErrorContext for debugging
#![allow(clippy::result_large_err)]

pub mod algorithms;
pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
