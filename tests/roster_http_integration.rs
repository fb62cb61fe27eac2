//! Integration tests for class roster HTTP endpoints.
//!
//! These tests drive the full router (handlers, application layer, in-memory
//! repository, event bus, recording notifier) through `tower::ServiceExt`.

use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use class_roster::adapters::http::{app_router, RosterAppState};
use class_roster::adapters::{InMemoryClassSessionRepository, InMemoryEventBus, RecordingNotifier};

// =============================================================================
// Test Infrastructure
// =============================================================================

#[derive(Clone)]
struct TestApp {
    router: Router,
    notifier: Arc<RecordingNotifier>,
    bus: Arc<InMemoryEventBus>,
}

impl TestApp {
    fn new() -> Self {
        Self::with_notifications(true)
    }

    fn with_notifications(enabled: bool) -> Self {
        let notifier = Arc::new(RecordingNotifier::new());
        let bus = Arc::new(InMemoryEventBus::new());
        let state = RosterAppState::new(
            Arc::new(InMemoryClassSessionRepository::new()),
            notifier.clone(),
            bus.clone(),
            enabled,
        );
        Self {
            router: app_router(state, Duration::from_secs(5)),
            notifier,
            bus,
        }
    }

    async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn create_class(&self, title: &str, capacity: i64) -> String {
        let (status, body) = self
            .send(
                "POST",
                "/api/classes",
                Some(json!({ "title": title, "capacity": capacity })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["id"].as_str().unwrap().to_string()
    }

    async fn book(&self, class_id: &str, member: &str) -> (StatusCode, Value) {
        self.send(
            "POST",
            &format!("/api/classes/{class_id}/bookings"),
            Some(json!({
                "member_id": member,
                "name": member.to_uppercase(),
                "email": format!("{member}@gym.test"),
            })),
        )
        .await
    }

    async fn cancel(&self, class_id: &str, member: &str) -> (StatusCode, Value) {
        self.send(
            "DELETE",
            &format!("/api/classes/{class_id}/bookings/{member}"),
            None,
        )
        .await
    }
}

fn ids(entries: &Value) -> Vec<String> {
    entries
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["member_id"].as_str().unwrap().to_string())
        .collect()
}

// =============================================================================
// Scenarios
// =============================================================================

#[tokio::test]
async fn health_reports_ok() {
    let app = TestApp::new();
    let (status, body) = app.send("GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn capacity_two_class_with_five_members() {
    let app = TestApp::new();
    let class_id = app.create_class("Spin 6am", 2).await;

    let mut placements = Vec::new();
    for member in ["m1", "m2", "m3", "m4", "m5"] {
        let (status, body) = app.book(&class_id, member).await;
        assert_eq!(status, StatusCode::OK);
        placements.push(body["placement"].clone());
    }

    assert_eq!(placements[0], json!({ "status": "enrolled" }));
    assert_eq!(placements[1], json!({ "status": "enrolled" }));
    assert_eq!(placements[2], json!({ "status": "waitlisted", "position": 1 }));
    assert_eq!(placements[4], json!({ "status": "waitlisted", "position": 3 }));

    let (status, body) = app.cancel(&class_id, "m1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["removed_from"], "enrolled");
    assert_eq!(body["promoted"], json!(["m3"]));

    let roster = &body["roster"];
    assert_eq!(ids(&roster["enrolled"]), vec!["m2", "m3"]);
    assert_eq!(ids(&roster["waitlist"]), vec!["m4", "m5"]);
    assert_eq!(roster["waitlist"][0]["position"], 1);
    assert_eq!(roster["status"], "full");

    let promoted = app.notifier.sent_to("m3@gym.test");
    assert_eq!(promoted.len(), 1);
    assert!(promoted[0].message.contains("moved from waitlist to enrolled"));
    assert!(app.bus.has_event("roster.member_promoted.v1"));
}

#[tokio::test]
async fn leaving_waitlist_promotes_nobody() {
    let app = TestApp::new();
    let class_id = app.create_class("Yoga", 1).await;
    for member in ["a", "b", "c"] {
        app.book(&class_id, member).await;
    }

    let (status, body) = app.cancel(&class_id, "b").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["removed_from"], "waitlist");
    assert_eq!(body["promoted"], json!([]));
    assert_eq!(ids(&body["roster"]["waitlist"]), vec!["c"]);
}

#[tokio::test]
async fn repeated_booking_is_idempotent() {
    let app = TestApp::new();
    let class_id = app.create_class("Boxing", 2).await;
    app.book(&class_id, "a").await;
    let sent_before = app.notifier.count();

    let (status, body) = app.book(&class_id, "a").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["newly_placed"], false);
    assert_eq!(ids(&body["roster"]["enrolled"]), vec!["a"]);
    assert_eq!(app.notifier.count(), sent_before);
}

#[tokio::test]
async fn raising_capacity_promotes_in_order() {
    let app = TestApp::new();
    let class_id = app.create_class("Row", 1).await;
    for member in ["a", "b", "c", "d"] {
        app.book(&class_id, member).await;
    }

    let (status, body) = app
        .send(
            "PUT",
            &format!("/api/classes/{class_id}/capacity"),
            Some(json!({ "capacity": 3 })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["previous"], 1);
    assert_eq!(body["current"], 3);
    assert_eq!(body["promoted"], json!(["b", "c"]));
    assert_eq!(ids(&body["roster"]["waitlist"]), vec!["d"]);
}

#[tokio::test]
async fn lowering_capacity_keeps_enrolled_members() {
    let app = TestApp::new();
    let class_id = app.create_class("Row", 3).await;
    for member in ["a", "b", "c"] {
        app.book(&class_id, member).await;
    }

    let (status, body) = app
        .send(
            "PUT",
            &format!("/api/classes/{class_id}/capacity"),
            Some(json!({ "capacity": 1 })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body["roster"]["enrolled"]), vec!["a", "b", "c"]);
    assert_eq!(body["roster"]["status"], "full");
}

#[tokio::test]
async fn canceled_class_rejects_new_bookings() {
    let app = TestApp::new();
    let class_id = app.create_class("Pilates", 2).await;
    app.book(&class_id, "a").await;

    let (status, body) = app
        .send("POST", &format!("/api/classes/{class_id}/cancel"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "canceled");

    let (status, body) = app.book(&class_id, "b").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CLASS_CANCELED");

    let (status, _) = app
        .send("POST", &format!("/api/classes/{class_id}/cancel"), None)
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn list_filters_by_status() {
    let app = TestApp::new();
    let full = app.create_class("Full", 1).await;
    app.create_class("Open", 5).await;
    app.book(&full, "a").await;

    let (status, body) = app.send("GET", "/api/classes?status=full", None).await;

    assert_eq!(status, StatusCode::OK);
    let classes = body["classes"].as_array().unwrap();
    assert_eq!(classes.len(), 1);
    assert_eq!(classes[0]["title"], "Full");
    assert_eq!(classes[0]["enrolled_count"], 1);
}

#[tokio::test]
async fn delete_then_get_is_not_found() {
    let app = TestApp::new();
    let class_id = app.create_class("Barre", 4).await;

    let (status, _) = app
        .send("DELETE", &format!("/api/classes/{class_id}"), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = app
        .send("GET", &format!("/api/classes/{class_id}"), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "CLASS_SESSION_NOT_FOUND");
}

#[tokio::test]
async fn error_statuses() {
    let app = TestApp::new();
    let class_id = app.create_class("Spin", 2).await;

    let (status, body) = app
        .send(
            "POST",
            "/api/classes",
            Some(json!({ "title": "Zero", "capacity": 0 })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_FAILED");

    let (status, body) = app
        .send(
            "PUT",
            &format!("/api/classes/{class_id}/capacity"),
            Some(json!({ "capacity": 3_000_000_000_i64 })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_FAILED");

    let (status, body) = app.cancel(&class_id, "ghost").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "MEMBER_NOT_ON_ROSTER");

    let (status, _) = app.send("GET", "/api/classes/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .send(
            "POST",
            &format!("/api/classes/{class_id}/bookings"),
            Some(json!({ "member_id": "x", "email": "no-at-sign" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_FAILED");
}

#[tokio::test]
async fn disabled_notifications_still_publish_events() {
    let app = TestApp::with_notifications(false);
    let class_id = app.create_class("HIIT", 1).await;
    app.book(&class_id, "a").await;

    assert_eq!(app.notifier.count(), 0);
    assert!(app.bus.has_event("roster.member_enrolled.v1"));
}

#[tokio::test]
async fn concurrent_bookings_never_overfill() {
    let app = TestApp::new();
    let class_id = app.create_class("Cycle", 3).await;

    let mut bookings = tokio::task::JoinSet::new();
    for n in 0..12 {
        let app = app.clone();
        let class_id = class_id.clone();
        bookings.spawn(async move { app.book(&class_id, &format!("m{n}")).await.0 });
    }
    while let Some(status) = bookings.join_next().await {
        assert_eq!(status.unwrap(), StatusCode::OK);
    }

    let (_, roster) = app
        .send("GET", &format!("/api/classes/{class_id}"), None)
        .await;
    assert_eq!(roster["enrolled"].as_array().unwrap().len(), 3);
    let positions: Vec<u64> = roster["waitlist"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["position"].as_u64().unwrap())
        .collect();
    assert_eq!(positions, (1..=9).collect::<Vec<_>>());
}
