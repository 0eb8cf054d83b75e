//! Web layer for the trip resolver.
//!
//! Provides the JSON API used by the map front end and serves its static
//! assets.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
