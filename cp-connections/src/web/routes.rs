//! HTTP route handlers.

use askama::Template;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use tracing::{error, warn};

use crate::client::FetchError;
use crate::document::{Document, ParseError};
use crate::extract::Extraction;
use crate::query::{ConnectionQuery, QueryError, TransportMode};
use crate::render::ResultsPage;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/connections", get(connections))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// Search connections between two stations.
async fn connections(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(req): Query<ConnectionsRequest>,
) -> Result<Response, AppError> {
    let mode = req
        .mode
        .as_deref()
        .filter(|m| !m.is_empty())
        .map(str::parse::<TransportMode>)
        .transpose()?
        .unwrap_or_default();

    let from = state.stations.resolve_or_verbatim(&req.from);
    let to = state.stations.resolve_or_verbatim(&req.to);
    let query = ConnectionQuery::new(from, to, mode)?;

    let page = state.client.fetch(&query).await?;
    let doc = Document::parse(&page)?;
    let extraction = state.extractor.extract(&doc);

    respond(query, extraction, accepts_html(&headers))
}

/// Render an extraction as HTML or JSON.
///
/// "No journeys" is a successful response with an empty list.
fn respond(
    query: ConnectionQuery,
    extraction: Extraction,
    html: bool,
) -> Result<Response, AppError> {
    if html {
        let template = ResultsPage::new(
            query.to_string(),
            &extraction.journeys,
            extraction.skipped.len(),
        );
        let html = template.render().map_err(|e| AppError::Internal {
            message: format!("Template error: {}", e),
        })?;

        Ok(Html(html).into_response())
    } else {
        Ok(Json(ConnectionsResponse::new(query, extraction)).into_response())
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    BadGateway { message: String },
    Internal { message: String },
}

impl From<QueryError> for AppError {
    fn from(e: QueryError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<FetchError> for AppError {
    fn from(e: FetchError) -> Self {
        match e {
            FetchError::Query(e) => e.into(),
            FetchError::Config(_) => AppError::Internal {
                message: e.to_string(),
            },
            _ => AppError::BadGateway {
                message: e.to_string(),
            },
        }
    }
}

impl From<ParseError> for AppError {
    fn from(e: ParseError) -> Self {
        AppError::BadGateway {
            message: format!("unreadable results page: {e}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::BadGateway { message } => (StatusCode::BAD_GATEWAY, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "Request failed");
        } else {
            warn!(%status, %message, "Request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use axum::http::HeaderValue;

    fn query() -> ConnectionQuery {
        ConnectionQuery::new("Bratislava hl.st.", "Miloslavov", TransportMode::Train).unwrap()
    }

    async fn body_string(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn content_type(response: &Response) -> &str {
        response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
    }

    #[test]
    fn accepts_html_checks_header() {
        let mut headers = HeaderMap::new();
        assert!(!accepts_html(&headers));

        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        assert!(!accepts_html(&headers));

        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml"),
        );
        assert!(accepts_html(&headers));
    }

    #[tokio::test]
    async fn empty_result_is_ok_json() {
        let response = respond(query(), Extraction::default(), false).unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(content_type(&response).starts_with("application/json"));

        let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json["journeys"].as_array().unwrap().len(), 0);
        assert_eq!(json["query"]["from"], "Bratislava hl.st.");
        assert_eq!(json["query"]["mode"], "train");
    }

    #[tokio::test]
    async fn empty_result_is_ok_html() {
        let response = respond(query(), Extraction::default(), true).unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(content_type(&response).starts_with("text/html"));
        assert!(body_string(response).await.contains("No connections found."));
    }

    #[tokio::test]
    async fn same_stations_is_bad_request() {
        let err = AppError::from(QueryError::SameStations("Senec".into()));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert!(json["error"].as_str().unwrap().contains("same as arrival"));
    }

    #[test]
    fn error_status_mapping() {
        let status = |e: AppError| e.into_response().status();

        assert_eq!(
            status(FetchError::Query(QueryError::UnknownMode("ferry".into())).into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status(
                FetchError::Status {
                    status: 503,
                    message: String::new()
                }
                .into()
            ),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status(FetchError::Config("bad".into()).into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status(ParseError::Binary { offset: 0 }.into()),
            StatusCode::BAD_GATEWAY
        );
    }

    #[tokio::test]
    async fn health_is_ok() {
        assert_eq!(health().await, "ok");
    }
}
