//! Web layer.
//!
//! A small HTTP front end: give it two station names and a mode, get back
//! the scraped journeys as HTML or JSON.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::create_router;
pub use state::AppState;
