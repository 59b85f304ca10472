//! Employee API Module
//!
//! | Method | Path | Query | Body | Success |
//! |--------|------|-------|------|---------|
//! | GET | /api/employees | - | - | 200, records newest first |
//! | POST | /api/employees | - | all six fields | 201, created record |
//! | PUT | /api/employees | id | replacement fields | 200, record or `null` |
//! | DELETE | /api/employees | id | - | 200, `{"success": true}` |
//!
//! PUT and DELETE without `id` answer 400 `ID required`.

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub use handler::IdQuery;

/// Employee router
pub fn router() -> Router<ServerState> {
    Router::new().route(
        "/api/employees",
        get(handler::list)
            .post(handler::create)
            .put(handler::update)
            .delete(handler::delete),
    )
}
