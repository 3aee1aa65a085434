//! HRMS Lite: employee records, daily attendance and dashboard statistics.

pub mod api;
pub mod config;
pub mod db;
pub mod docs;
pub mod error;
pub mod model;
pub mod routes;
pub mod service;
pub mod store;
pub mod utils;

/// Services wired to the backend chosen at startup.
pub type AppServices = service::Services<db::Store>;
