#![doc = "The `projecttasks` library crate."]
#![doc = ""]
#![doc = "Multi-tenant project and task API. Every request to `/api` is resolved to"]
#![doc = "an authenticated identity, and every project or task it touches is checked"]
#![doc = "against that identity before the data is read or written."]
#![doc = "The binary (`main.rs`) only loads configuration, picks a store and starts the server."]

pub mod auth;
pub mod config;
pub mod error;
pub mod guard;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;

pub use crate::error::AppError;
pub use crate::state::AppState;
