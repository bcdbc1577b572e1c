// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod session;
mod upstream;

use aircare::{CalendarDay, preload_calendar};
use aircare_api::{
    ApiError, CalendarRequest, CalendarResponse, DashboardSummaryResponse, MergeRangesRequest,
    MergeRangesResponse, QuoteRequest, QuoteResponse, build_calendar_response, dashboard_summary,
    merge_ranges, plan_calendar, quote, quote_text,
};
use axum::{
    Json, Router,
    extract::{Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{error, info, warn};

use crate::session::SessionOperator;
use crate::upstream::{ActorSession, BookingApiClient, UpstreamError};

/// `AirCare` Server - HTTP service for the `AirCare` booking console
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: String,

    /// Base URL of the booking API
    #[arg(short, long, default_value = "http://127.0.0.1:8080")]
    upstream_url: String,

    /// Maximum availability requests in flight during a calendar pre-load
    #[arg(long, default_value_t = 4)]
    preload_concurrency: usize,

    /// Timeout for each booking API request, in seconds
    #[arg(long, default_value_t = 10)]
    upstream_timeout_secs: u64,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// Connection to the booking API.
    upstream: BookingApiClient,
    /// Maximum availability requests in flight per calendar pre-load.
    preload_concurrency: usize,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct HealthResponse {
    /// Always `ok` while the process serves requests.
    status: String,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::UpstreamUnavailable { .. } => StatusCode::BAD_GATEWAY,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<UpstreamError> for HttpError {
    fn from(err: UpstreamError) -> Self {
        if err.is_auth_rejection() {
            warn!(error = %err, "Booking API rejected credentials");
            let status: StatusCode = match &err {
                UpstreamError::Status { status, .. } => *status,
                _ => StatusCode::UNAUTHORIZED,
            };
            return Self {
                status,
                message: String::from("Booking API rejected the session"),
            };
        }

        error!(error = %err, "Booking API error");
        Self::from(ApiError::UpstreamUnavailable {
            message: err.to_string(),
        })
    }
}

/// Handler for GET `/health` endpoint.
async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: String::from("ok"),
    })
}

/// Handler for POST `/quote` endpoint.
///
/// Prices an installation and renders the plain-text quotation.
async fn handle_quote(Json(request): Json<QuoteRequest>) -> Result<Json<QuoteResponse>, HttpError> {
    let response: QuoteResponse = quote(&request)?;
    Ok(Json(response))
}

/// Handler for POST `/quote/text` endpoint.
///
/// Returns only the plain-text quotation, ready to paste into a chat.
async fn handle_quote_text(Json(request): Json<QuoteRequest>) -> Result<String, HttpError> {
    Ok(quote_text(&request)?)
}

/// Handler for POST `/availability/ranges` endpoint.
async fn handle_merge_ranges(
    Json(request): Json<MergeRangesRequest>,
) -> Json<MergeRangesResponse> {
    Json(merge_ranges(&request))
}

/// Handler for GET `/availability/calendar` endpoint.
///
/// Pre-loads a window of days from the booking API. Days that fail to load
/// are reported as failed instead of failing the whole calendar.
async fn handle_calendar(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor): SessionOperator,
    Query(request): Query<CalendarRequest>,
) -> Result<Json<CalendarResponse>, HttpError> {
    info!(
        from = %request.from,
        days = request.days,
        role = ?actor.role,
        "Handling calendar request"
    );

    let dates: Vec<time::Date> = plan_calendar(&request, &actor)?;
    let Some(&from) = dates.first() else {
        return Err(HttpError::from(ApiError::Internal {
            message: String::from("calendar window is empty"),
        }));
    };

    let session: ActorSession<'_> = app_state.upstream.as_actor(&actor);
    let days: Vec<CalendarDay> =
        preload_calendar(&session, dates, app_state.preload_concurrency).await;

    Ok(Json(build_calendar_response(from, days)))
}

/// Handler for GET `/dashboard/summary` endpoint.
///
/// Reads jobs and technicians from the booking API concurrently and
/// aggregates them.
async fn handle_dashboard_summary(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator(actor): SessionOperator,
) -> Result<Json<DashboardSummaryResponse>, HttpError> {
    info!(role = ?actor.role, "Handling dashboard summary request");

    aircare_api::AuthorizationService::authorize_view_dashboard(&actor)
        .map_err(ApiError::from)?;

    let session: ActorSession<'_> = app_state.upstream.as_actor(&actor);
    let (jobs, technicians) = tokio::try_join!(session.jobs(), session.technicians())?;

    let response: DashboardSummaryResponse = dashboard_summary(&jobs, &technicians, &actor)?;
    Ok(Json(response))
}

/// Builds the application router with all routes.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route("/quote", post(handle_quote))
        .route("/quote/text", post(handle_quote_text))
        .route("/availability/ranges", post(handle_merge_ranges))
        .route("/availability/calendar", get(handle_calendar))
        .route("/dashboard/summary", get(handle_dashboard_summary))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing AirCare Server");

    let upstream: BookingApiClient = BookingApiClient::new(
        &args.upstream_url,
        Duration::from_secs(args.upstream_timeout_secs),
    )?;
    info!(upstream = %args.upstream_url, "Using booking API");

    let app_state: AppState = AppState {
        upstream,
        preload_concurrency: args.preload_concurrency.max(1),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{HeaderMap, Request, StatusCode as HttpStatusCode, header::AUTHORIZATION},
    };
    use std::collections::HashMap;
    use tower::ServiceExt;

    const GOOD_TOKEN: &str = "Bearer good-token";

    /// Booking API stand-in.
    ///
    /// Accepts only `GOOD_TOKEN`. Availability for 2026-03-02 always fails;
    /// 2026-03-03 answers with a bare slot list.
    fn create_stub_booking_api() -> Router {
        fn authorized(headers: &HeaderMap) -> bool {
            headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) == Some(GOOD_TOKEN)
                && headers.get(upstream::ROLE_HEADER).is_some()
        }

        async fn availability(
            headers: HeaderMap,
            Query(query): Query<HashMap<String, String>>,
        ) -> Response {
            if !authorized(&headers) {
                return HttpStatusCode::UNAUTHORIZED.into_response();
            }
            let date: String = query.get("date").cloned().unwrap_or_default();
            let slots = serde_json::json!([
                { "start": "09:00", "end": "10:00", "available": true },
                { "start": "10:00", "end": "11:00", "available": true },
                { "start": "11:00", "end": "12:00", "available": false }
            ]);
            match date.as_str() {
                "2026-03-02" => HttpStatusCode::INTERNAL_SERVER_ERROR.into_response(),
                "2026-03-03" => Json(slots).into_response(),
                _ => Json(serde_json::json!({ "date": date, "slots": slots })).into_response(),
            }
        }

        async fn jobs(headers: HeaderMap) -> Response {
            if !authorized(&headers) {
                return HttpStatusCode::UNAUTHORIZED.into_response();
            }
            Json(serde_json::json!([
                { "job_id": 1, "booking_code": "AC0001", "status": "pending" },
                { "job_id": 2, "status": "assigned", "technician_username": "somchai" },
                { "job_id": 3, "status": "awaiting_parts" }
            ]))
            .into_response()
        }

        async fn technicians(headers: HeaderMap) -> Response {
            if !authorized(&headers) {
                return HttpStatusCode::UNAUTHORIZED.into_response();
            }
            Json(serde_json::json!([
                { "username": "somchai" },
                { "username": "anan", "active": false }
            ]))
            .into_response()
        }

        Router::new()
            .route("/public/availability_v2", get(availability))
            .route("/jobs", get(jobs))
            .route("/technicians", get(technicians))
    }

    /// Serves the stub booking API on an ephemeral port and returns its URL.
    async fn spawn_stub_booking_api() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, create_stub_booking_api()).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn create_test_app_state(upstream_url: &str) -> AppState {
        AppState {
            upstream: BookingApiClient::new(upstream_url, Duration::from_secs(5))
                .expect("Failed to build booking API client"),
            preload_concurrency: 2,
        }
    }

    async fn read_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body_bytes).unwrap()
    }

    fn json_post(uri: &str, body: &serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn authed_get(uri: &str, token: &str, role: &str) -> Request<Body> {
        Request::builder()
            .method("GET")
            .uri(uri)
            .header(AUTHORIZATION, token)
            .header(upstream::ROLE_HEADER, role)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let app: Router = build_router(create_test_app_state("http://127.0.0.1:9"));

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::OK);
        let health: HealthResponse = read_json(response).await;
        assert_eq!(health.status, "ok");
    }

    #[tokio::test]
    async fn test_quote_returns_breakdown_and_text() {
        let app: Router = build_router(create_test_app_state("http://127.0.0.1:9"));
        let body = serde_json::json!({
            "machine_count": 2,
            "ac_type": "แบบติดผนัง",
            "btu": "9000",
            "len_ref": 10,
            "len_power": 8,
            "len_drain": 8,
            "len_trunk": 4,
            "promotion": {
                "promo_id": 3,
                "title": "ลด 10%",
                "discount_type": "percent",
                "discount_value": 10
            }
        });

        let response = app.oneshot(json_post("/quote", &body)).await.unwrap();

        assert_eq!(response.status(), HttpStatusCode::OK);
        let quote: QuoteResponse = read_json(response).await;
        assert_eq!(quote.breakdown.totals.per_machine, 6_750);
        assert_eq!(quote.breakdown.totals.grand, 13_500);
        assert_eq!(quote.discount, 1_350);
        assert_eq!(quote.net_total, 12_150);
        assert!(quote.text.contains("รวมทั้งสิ้น (2 เครื่อง): 13,500 บาท"));
    }

    #[tokio::test]
    async fn test_quote_rejects_unknown_selector() {
        let app: Router = build_router(create_test_app_state("http://127.0.0.1:9"));
        let body = serde_json::json!({ "btu": 9000, "scaffold": "crane" });

        let response = app.oneshot(json_post("/quote", &body)).await.unwrap();

        assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);
        let error: ErrorResponse = read_json(response).await;
        assert!(error.error);
        assert!(error.message.contains("scaffold"));
    }

    #[tokio::test]
    async fn test_quote_text_is_plain_text() {
        let app: Router = build_router(create_test_app_state("http://127.0.0.1:9"));
        let body = serde_json::json!({ "btu": 9000, "machine_count": 1 });

        let response = app.oneshot(json_post("/quote/text", &body)).await.unwrap();

        assert_eq!(response.status(), HttpStatusCode::OK);
        let content_type = response.headers().get("content-type").unwrap().clone();
        assert!(content_type.to_str().unwrap().starts_with("text/plain"));
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8(body_bytes.to_vec()).unwrap();
        assert!(text.starts_with("ใบเสนอราคาติดตั้งเครื่องปรับอากาศ"));
    }

    #[tokio::test]
    async fn test_merge_ranges_endpoint() {
        let app: Router = build_router(create_test_app_state("http://127.0.0.1:9"));
        let body = serde_json::json!({
            "slots": [
                { "start": "13:00", "end": "14:00", "available": true },
                { "start": "14:00", "end": "15:00", "available": false },
                { "start": "15:00", "end": "16:00", "available": true }
            ]
        });

        let response = app
            .oneshot(json_post("/availability/ranges", &body))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::OK);
        let merged: MergeRangesResponse = read_json(response).await;
        assert_eq!(merged.ranges.len(), 2);
    }

    #[tokio::test]
    async fn test_calendar_requires_credentials() {
        let app: Router = build_router(create_test_app_state("http://127.0.0.1:9"));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/availability/calendar?from=2026-03-01&days=3")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_calendar_rejects_technician() {
        let app: Router = build_router(create_test_app_state("http://127.0.0.1:9"));

        let response = app
            .oneshot(authed_get(
                "/availability/calendar?from=2026-03-01&days=3",
                GOOD_TOKEN,
                "technician",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_calendar_validates_window() {
        let app: Router = build_router(create_test_app_state("http://127.0.0.1:9"));

        let response = app
            .clone()
            .oneshot(authed_get(
                "/availability/calendar?from=2026-03-01&days=90",
                GOOD_TOKEN,
                "admin",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);

        let response = app
            .oneshot(authed_get(
                "/availability/calendar?from=01/03/2026&days=3",
                GOOD_TOKEN,
                "admin",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_calendar_preloads_window_and_flags_failed_days() {
        let upstream_url: String = spawn_stub_booking_api().await;
        let app: Router = build_router(create_test_app_state(&upstream_url));

        let response = app
            .oneshot(authed_get(
                "/availability/calendar?from=2026-03-01&days=4",
                GOOD_TOKEN,
                "admin",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::OK);
        let calendar: CalendarResponse = read_json(response).await;

        let dates: Vec<&str> = calendar.days.iter().map(|day| day.date.as_str()).collect();
        assert_eq!(
            dates,
            vec!["2026-03-01", "2026-03-02", "2026-03-03", "2026-03-04"]
        );
        assert_eq!(calendar.failed_days, 1);
        assert!(calendar.days[1].failed);
        assert!(calendar.days[1].ranges.is_empty());
        for index in [0, 2, 3] {
            assert!(!calendar.days[index].failed);
            assert_eq!(calendar.days[index].ranges.len(), 1);
            assert_eq!(calendar.days[index].available_slot_count, 2);
        }
    }

    #[tokio::test]
    async fn test_calendar_with_unreachable_booking_api_marks_every_day_failed() {
        let app: Router = build_router(create_test_app_state("http://127.0.0.1:9"));

        let response = app
            .oneshot(authed_get(
                "/availability/calendar?from=2026-03-01&days=2",
                GOOD_TOKEN,
                "superadmin",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::OK);
        let calendar: CalendarResponse = read_json(response).await;
        assert_eq!(calendar.failed_days, 2);
    }

    #[tokio::test]
    async fn test_dashboard_summary_aggregates_booking_api_data() {
        let upstream_url: String = spawn_stub_booking_api().await;
        let app: Router = build_router(create_test_app_state(&upstream_url));

        let response = app
            .oneshot(authed_get("/dashboard/summary", GOOD_TOKEN, "admin"))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::OK);
        let summary: DashboardSummaryResponse = read_json(response).await;
        assert_eq!(summary.total_jobs, 3);
        assert_eq!(summary.open_jobs, 2);
        assert_eq!(summary.unassigned.len(), 1);
        assert_eq!(summary.unassigned[0].booking_code, "AC0001");
        assert_eq!(summary.active_technicians, 1);
    }

    #[tokio::test]
    async fn test_dashboard_passes_through_session_rejection() {
        let upstream_url: String = spawn_stub_booking_api().await;
        let app: Router = build_router(create_test_app_state(&upstream_url));

        let response = app
            .oneshot(authed_get("/dashboard/summary", "Bearer expired", "admin"))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_dashboard_with_unreachable_booking_api_is_bad_gateway() {
        let app: Router = build_router(create_test_app_state("http://127.0.0.1:9"));

        let response = app
            .oneshot(authed_get("/dashboard/summary", GOOD_TOKEN, "admin"))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::BAD_GATEWAY);
    }
}
