//! HTTP surface: the relay endpoint plus the JSON envelopes the submitting
//! page expects.
//!
//! The handler is the only boundary that talks to the caller: every pipeline
//! failure surfaces here as a 500 envelope with message and timestamp, and
//! the caller learns aggregate delivery counts only.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use chrono::Utc;
use serde_json::json;

use rrb_core::{dispatch::DispatchReport, relay::Relay, submission::Submission, Result};

#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<Relay>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/send-results",
            post(handle_submission).fallback(method_not_allowed),
        )
        .with_state(state)
}

/// `POST /send-results`.
///
/// The body is parsed here rather than by an extractor so malformed JSON
/// takes the same 500 error envelope as every other pipeline failure.
async fn handle_submission(State(state): State<AppState>, body: String) -> Response {
    match relay_body(&state, &body).await {
        Ok(report) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "sent_to": report.delivered,
                "total_chats": report.attempted,
            })),
        )
            .into_response(),
        Err(err) => {
            tracing::error!(error = %err, "relay failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": err.to_string(),
                    "timestamp": Utc::now().to_rfc3339(),
                })),
            )
                .into_response()
        }
    }
}

async fn relay_body(state: &AppState, body: &str) -> Result<DispatchReport> {
    let submission: Submission = serde_json::from_str(body)?;
    state.relay.run(&submission).await
}

async fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({"error": "Method not allowed"})),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{header, Method, Request},
    };
    use rrb_core::{
        dispatch::{BroadcastPacing, Sleeper},
        domain::ChatId,
        locale::{Locale, ReportStyle},
        ports::{MessagingPort, SubscriberRegistry},
        Error,
    };
    use std::{sync::Mutex, time::Duration};
    use tower::ServiceExt;

    struct FixedRegistry(Vec<ChatId>);

    #[async_trait]
    impl SubscriberRegistry for FixedRegistry {
        async fn list(&self) -> Result<Vec<ChatId>> {
            Ok(self.0.clone())
        }
    }

    struct FakeMessenger {
        sends: Mutex<Vec<i64>>,
        failing_chat: Option<i64>,
    }

    #[async_trait]
    impl MessagingPort for FakeMessenger {
        async fn send_html(&self, chat_id: ChatId, _html: &str) -> Result<()> {
            if self.failing_chat == Some(chat_id.0) {
                return Err(Error::External("telegram error: 403".to_string()));
            }
            self.sends.lock().unwrap().push(chat_id.0);
            Ok(())
        }
    }

    struct NoopSleeper;

    #[async_trait]
    impl Sleeper for NoopSleeper {
        async fn sleep(&self, _duration: Duration) {}
    }

    fn app(recipients: Vec<ChatId>, failing_chat: Option<i64>) -> Router {
        let relay = Relay::new(
            Arc::new(FixedRegistry(recipients)),
            Arc::new(FakeMessenger {
                sends: Mutex::new(Vec::new()),
                failing_chat,
            }),
            Arc::new(NoopSleeper),
            ReportStyle::new(Locale::Uk, false),
            4000,
            BroadcastPacing::default(),
        );
        router(AppState {
            relay: Arc::new(relay),
        })
    }

    const SUBMISSION: &str = r#"{
        "fio": "Test Person",
        "telegram": "@test",
        "submitted_at_local": "01.01.2026, 12:00",
        "summary": {
            "total_view_time_formatted": "5:00",
            "total_typing_time_formatted": "12:30",
            "items_count": 1
        },
        "items": {
            "T1": {
                "code": "T1",
                "name": "Item One",
                "time_view_formatted": "1:00",
                "time_typing_formatted": "2:00",
                "ads_copy": "copy",
                "analysis": "analysis",
                "landing": "https://example.com/l",
                "video": "https://example.com/v"
            }
        },
        "page_url": "https://example.com/test",
        "user_agent": "Mozilla/5.0"
    }"#;

    async fn send(app: Router, method: Method, body: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri("/send-results")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn valid_post_reports_delivery_counts() {
        let app = app(vec![ChatId(1), ChatId(2), ChatId(3)], None);
        let (status, body) = send(app, Method::POST, SUBMISSION).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"success": true, "sent_to": 3, "total_chats": 3})
        );
    }

    #[tokio::test]
    async fn partial_failure_still_reports_success() {
        let app = app(vec![ChatId(1), ChatId(2), ChatId(3)], Some(2));
        let (status, body) = send(app, Method::POST, SUBMISSION).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"success": true, "sent_to": 2, "total_chats": 3})
        );
    }

    #[tokio::test]
    async fn wrong_method_is_rejected() {
        let app = app(vec![ChatId(1)], None);
        let (status, body) = send(app, Method::GET, "").await;

        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body, json!({"error": "Method not allowed"}));
    }

    #[tokio::test]
    async fn no_subscribers_is_a_server_error() {
        let app = app(Vec::new(), None);
        let (status, body) = send(app, Method::POST, SUBMISSION).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "No subscribers found");
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn malformed_body_is_a_server_error() {
        let app = app(vec![ChatId(1)], None);
        let (status, body) = send(app, Method::POST, "{not json").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"]
            .as_str()
            .unwrap()
            .starts_with("invalid submission:"));
        assert!(body["timestamp"].is_string());
    }
}
