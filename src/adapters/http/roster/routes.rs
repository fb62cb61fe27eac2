//! Axum router configuration for class roster endpoints.

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use super::handlers::{
    book_member, cancel_booking, cancel_class, create_class, delete_class, get_roster, health,
    list_classes, set_capacity, RosterAppState,
};

/// Create the class roster API router.
///
/// # Routes
///
/// - `GET /` - List classes (`?status=scheduled|full|canceled`)
/// - `POST /` - Schedule a class
/// - `GET /:id` - Roster view with waitlist positions
/// - `DELETE /:id` - Delete a class
/// - `POST /:id/bookings` - Book a member
/// - `DELETE /:id/bookings/:member_id` - Cancel a booking
/// - `PUT /:id/capacity` - Change capacity
/// - `POST /:id/cancel` - Cancel the class
pub fn roster_routes() -> Router<RosterAppState> {
    Router::new()
        .route("/", get(list_classes).post(create_class))
        .route("/:id", get(get_roster).delete(delete_class))
        .route("/:id/bookings", post(book_member))
        .route("/:id/bookings/:member_id", delete(cancel_booking))
        .route("/:id/capacity", put(set_capacity))
        .route("/:id/cancel", post(cancel_class))
}

/// Create the complete router, mounted at `/api/classes`, plus `/health`.
///
/// # Example
///
/// ```ignore
/// let state = RosterAppState::new(repository, notifier, bus, true);
/// let app = roster_router(state);
/// ```
pub fn roster_router(state: RosterAppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api/classes", roster_routes())
        .with_state(state)
}
