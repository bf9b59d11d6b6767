//! HTTP backend for Meeple Hub.
//!
//! Game libraries, friendships, groups with their polls and events, and the marketplace are
//! served as a JSON API built on Axum and SeaORM. Uploaded images live on the local file
//! system and every successful mutation is announced on the change feed, which browsers
//! follow over Server-Sent Events.
//!
//! Handlers in `controller/` check access with `middleware::auth::AuthGuard`, turn DTOs into
//! the parameter types of `model/` and call a service. Services in `service/` hold the
//! rules (capacity, last admin, price per offer type) and talk to the repositories in
//! `data/`, which map entity rows to domain models. `error::AppError` carries failures back
//! out and renders them as `{"error": ...}` responses.
//!
//! `startup` wires the database, session store and OAuth client, `router` mounts the
//! handlers with their OpenAPI documentation and `scheduler` closes polls past their
//! deadline.

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod middleware;
pub mod model;
pub mod router;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod state;
pub mod util;
