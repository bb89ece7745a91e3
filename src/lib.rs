#![doc = "The `routine` library crate."]
#![doc = ""]
#![doc = "Domain models, persistence, services, HTTP Basic authentication, routing and"]
#![doc = "error handling for the routine task-management backend. The binary (`main.rs`)"]
#![doc = "reads the configuration, picks a store and starts the server."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod routes;
pub mod security;
pub mod services;

pub use error::AppError;
pub use services::Services;
