//! HTTP server module for the celestial-conditions backend.
//!
//! This module provides an axum-based HTTP server that exposes the moon,
//! score, forecast, location, photo-analysis and visit features as a REST
//! API for the dashboard frontend.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers)                               │
//! │  - Request parsing and validation                         │
//! │  - JSON serialization/deserialization                     │
//! │  - CORS, compression, error handling                      │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Service Layer (services/, algorithms/)                   │
//! │  - Moon phase, stargazing score, distances                │
//! │  - Conditions, forecast, dark-sky sites, visits           │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Repository Layer (db/)                                   │
//! │  - Visit sessions                                         │
//! │  - LocalRepository (in-memory)                            │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
