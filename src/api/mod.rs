//! API Module
//!
//! Admin HTTP surface for inspecting and invalidating a shared cache.
//!
//! # Endpoints
//! - `PUT /cache` - Store a JSON value
//! - `GET /cache` - List keys
//! - `DELETE /cache` - Invalidate by prefix or clear
//! - `GET /cache/:key` - Retrieve a value
//! - `DELETE /cache/:key` - Delete a key
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
