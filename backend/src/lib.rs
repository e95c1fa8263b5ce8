//! Health Coach Backend Library
//!
//! This library exposes the backend modules for use in tests and the
//! binaries (HTTP service and terminal dashboard).

pub mod config;
pub mod db;
pub mod error;
pub mod generator;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
