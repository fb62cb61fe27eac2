//! HTTP handlers for class roster endpoints.
//!
//! These handlers connect Axum routes to application layer command/query handlers.

use std::sync::Arc;

use axum::extract::{Json, Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::application::handlers::roster::{
    BookMemberCommand, BookMemberHandler, CancelBookingCommand, CancelBookingHandler,
    CancelClassCommand, CancelClassHandler, CreateClassSessionCommand, CreateClassSessionHandler,
    DeleteClassSessionCommand, DeleteClassSessionHandler, GetRosterHandler, GetRosterQuery,
    ListClassSessionsHandler, ListClassSessionsQuery, RosterDispatcher, SessionLocks,
    SetCapacityCommand, SetCapacityHandler,
};
use crate::domain::foundation::{ClassSessionId, CommandMetadata, MemberId};
use crate::domain::roster::{RosterError, RosterView};
use crate::ports::{ClassSessionRepository, EventPublisher, Notifier};

use super::dto::{
    parse_capacity, BookingRequest, BookingResponse, CancelBookingResponse, CapacityRequest,
    CapacityResponse, ClassListResponse, CreateClassRequest, ErrorResponse, ListClassesQuery,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
///
/// Cloned per request. Locks and dispatcher are shared so every handler
/// built from this state serializes on the same per-session locks.
#[derive(Clone)]
pub struct RosterAppState {
    pub repository: Arc<dyn ClassSessionRepository>,
    pub locks: Arc<SessionLocks>,
    pub dispatcher: Arc<RosterDispatcher>,
}

impl RosterAppState {
    pub fn new(
        repository: Arc<dyn ClassSessionRepository>,
        notifier: Arc<dyn Notifier>,
        event_publisher: Arc<dyn EventPublisher>,
        notifications_enabled: bool,
    ) -> Self {
        Self {
            repository,
            locks: Arc::new(SessionLocks::new()),
            dispatcher: Arc::new(RosterDispatcher::new(
                notifier,
                event_publisher,
                notifications_enabled,
            )),
        }
    }

    /// Create handlers on demand from the shared state.
    pub fn create_handler(&self) -> CreateClassSessionHandler {
        CreateClassSessionHandler::new(self.repository.clone(), self.dispatcher.clone())
    }

    pub fn book_handler(&self) -> BookMemberHandler {
        BookMemberHandler::new(
            self.repository.clone(),
            self.locks.clone(),
            self.dispatcher.clone(),
        )
    }

    pub fn cancel_booking_handler(&self) -> CancelBookingHandler {
        CancelBookingHandler::new(
            self.repository.clone(),
            self.locks.clone(),
            self.dispatcher.clone(),
        )
    }

    pub fn set_capacity_handler(&self) -> SetCapacityHandler {
        SetCapacityHandler::new(
            self.repository.clone(),
            self.locks.clone(),
            self.dispatcher.clone(),
        )
    }

    pub fn cancel_class_handler(&self) -> CancelClassHandler {
        CancelClassHandler::new(
            self.repository.clone(),
            self.locks.clone(),
            self.dispatcher.clone(),
        )
    }

    pub fn delete_handler(&self) -> DeleteClassSessionHandler {
        DeleteClassSessionHandler::new(self.repository.clone(), self.locks.clone())
    }

    pub fn get_roster_handler(&self) -> GetRosterHandler {
        GetRosterHandler::new(self.repository.clone())
    }

    pub fn list_handler(&self) -> ListClassSessionsHandler {
        ListClassSessionsHandler::new(self.repository.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error wrapper for consistent error responses.
#[derive(Debug)]
pub struct RosterApiError(pub RosterError);

impl From<RosterError> for RosterApiError {
    fn from(err: RosterError) -> Self {
        Self(err)
    }
}

impl RosterApiError {
    pub fn status_code(&self) -> StatusCode {
        match &self.0 {
            RosterError::NotFound(_) | RosterError::MemberNotOnRoster { .. } => {
                StatusCode::NOT_FOUND
            }
            RosterError::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
            RosterError::ClassCanceled(_)
            | RosterError::InvalidState { .. }
            | RosterError::Conflict(_) => StatusCode::CONFLICT,
            RosterError::InvariantViolation(_) | RosterError::Infrastructure(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for RosterApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "Roster request failed");
        }
        let body = ErrorResponse::new(self.0.code().to_string(), self.0.message());
        (status, Json(body)).into_response()
    }
}

type ApiResult<T> = Result<T, RosterApiError>;

fn parse_class_id(raw: &str) -> ApiResult<ClassSessionId> {
    raw.parse::<ClassSessionId>().map_err(|_| {
        RosterApiError(RosterError::validation(
            "id",
            format!("Invalid class session ID: {}", raw),
        ))
    })
}

/// Correlates events with the caller's `x-request-id`, when sent.
fn metadata_from(headers: &HeaderMap) -> CommandMetadata {
    let metadata = CommandMetadata::new().with_source("api");
    match headers.get("x-request-id").and_then(|v| v.to_str().ok()) {
        Some(id) => metadata.with_correlation_id(id),
        None => metadata,
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// HTTP Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /health
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// GET /api/classes - List classes
pub async fn list_classes(
    State(state): State<RosterAppState>,
    Query(query): Query<ListClassesQuery>,
) -> ApiResult<Json<ClassListResponse>> {
    let classes = state
        .list_handler()
        .handle(ListClassSessionsQuery {
            status: query.status,
        })
        .await?;
    Ok(Json(ClassListResponse { classes }))
}

/// POST /api/classes - Schedule a class
pub async fn create_class(
    State(state): State<RosterAppState>,
    headers: HeaderMap,
    Json(req): Json<CreateClassRequest>,
) -> ApiResult<(StatusCode, Json<RosterView>)> {
    let cmd = CreateClassSessionCommand {
        capacity: parse_capacity(req.capacity)?,
        starts_at: req.starts_at(),
        title: req.title,
    };

    let result = state
        .create_handler()
        .handle(cmd, metadata_from(&headers))
        .await?;
    Ok((StatusCode::CREATED, Json(RosterView::from(&result.session))))
}

/// GET /api/classes/:id - Roster view
pub async fn get_roster(
    State(state): State<RosterAppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<RosterView>> {
    let class_session_id = parse_class_id(&id)?;
    let view = state
        .get_roster_handler()
        .handle(GetRosterQuery { class_session_id })
        .await?;
    Ok(Json(view))
}

/// DELETE /api/classes/:id - Delete a class
pub async fn delete_class(
    State(state): State<RosterAppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let class_session_id = parse_class_id(&id)?;
    state
        .delete_handler()
        .handle(DeleteClassSessionCommand { class_session_id })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/classes/:id/bookings - Book a member
pub async fn book_member(
    State(state): State<RosterAppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(req): Json<BookingRequest>,
) -> ApiResult<Json<BookingResponse>> {
    let cmd = BookMemberCommand {
        class_session_id: parse_class_id(&id)?,
        member: req.into_member()?,
    };

    let result = state
        .book_handler()
        .handle(cmd, metadata_from(&headers))
        .await?;

    Ok(Json(BookingResponse {
        member_id: result.outcome.member.id.clone(),
        placement: result.outcome.placement,
        newly_placed: result.outcome.newly_placed,
        roster: RosterView::from(&result.session),
    }))
}

/// DELETE /api/classes/:id/bookings/:member_id - Cancel a booking
pub async fn cancel_booking(
    State(state): State<RosterAppState>,
    Path((id, member_id)): Path<(String, String)>,
    headers: HeaderMap,
) -> ApiResult<Json<CancelBookingResponse>> {
    let cmd = CancelBookingCommand {
        class_session_id: parse_class_id(&id)?,
        member_id: MemberId::new(member_id).map_err(RosterError::from)?,
    };

    let result = state
        .cancel_booking_handler()
        .handle(cmd, metadata_from(&headers))
        .await?;

    Ok(Json(CancelBookingResponse {
        member_id: result.outcome.removed.id.clone(),
        removed_from: result.outcome.removed_from,
        promoted: result.outcome.promoted.iter().map(|m| m.id.clone()).collect(),
        roster: RosterView::from(&result.session),
    }))
}

/// PUT /api/classes/:id/capacity - Change capacity
pub async fn set_capacity(
    State(state): State<RosterAppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(req): Json<CapacityRequest>,
) -> ApiResult<Json<CapacityResponse>> {
    let cmd = SetCapacityCommand {
        class_session_id: parse_class_id(&id)?,
        capacity: parse_capacity(req.capacity)?,
    };

    let result = state
        .set_capacity_handler()
        .handle(cmd, metadata_from(&headers))
        .await?;

    Ok(Json(CapacityResponse {
        previous: result.change.previous,
        current: result.change.current,
        promoted: result.change.promoted.iter().map(|m| m.id.clone()).collect(),
        roster: RosterView::from(&result.session),
    }))
}

/// POST /api/classes/:id/cancel - Cancel the class
pub async fn cancel_class(
    State(state): State<RosterAppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> ApiResult<Json<RosterView>> {
    let cmd = CancelClassCommand {
        class_session_id: parse_class_id(&id)?,
    };

    let result = state
        .cancel_class_handler()
        .handle(cmd, metadata_from(&headers))
        .await?;
    Ok(Json(RosterView::from(&result.session)))
}
