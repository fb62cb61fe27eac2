//! HTTP adapter for class roster endpoints.
//!
//! - `GET /api/classes` - List classes
//! - `POST /api/classes` - Schedule a class
//! - `GET /api/classes/:id` - Roster view
//! - `DELETE /api/classes/:id` - Delete a class
//! - `POST /api/classes/:id/bookings` - Book a member
//! - `DELETE /api/classes/:id/bookings/:member_id` - Cancel a booking
//! - `PUT /api/classes/:id/capacity` - Change capacity
//! - `POST /api/classes/:id/cancel` - Cancel the class
//! - `GET /health` - Liveness

pub mod dto;
mod handlers;
mod routes;

pub use handlers::{RosterApiError, RosterAppState};
pub use routes::{roster_router, roster_routes};
