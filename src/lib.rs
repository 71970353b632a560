#![doc = "The `todolist_api` library crate."]
#![doc = ""]
#![doc = "Domain models, authentication, repositories, services, routing and error"]
#![doc = "handling for the todo list API. The binary (`main.rs`) only loads"]
#![doc = "configuration, connects to PostgreSQL and runs the HTTP server."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;
pub mod state;
pub mod testing;

pub use crate::error::{AppError, ErrorKind};
pub use crate::state::AppState;
